//! [`GitCli`]: file listing and retrieval through the `git` executable.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::{VcsError, VcsResult};
use crate::traits::{VcsFileLister, VcsFileReader};

/// Lists files with `git ls-tree` and reads them with `git show`.
#[derive(Clone, Debug)]
pub struct GitCli {
    program: String,
    repo_dir: Option<PathBuf>,
}

impl GitCli {
    /// Use `git` from `PATH` in the current working directory.
    pub fn new() -> Self {
        Self {
            program: "git".into(),
            repo_dir: None,
        }
    }

    /// Run git against the repository at `dir` (`git -C <dir>`).
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: Some(dir.into()),
            ..Self::new()
        }
    }

    /// Override the executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn run(&self, args: &[&str]) -> VcsResult<Vec<u8>> {
        let mut cmd = Command::new(&self.program);
        if let Some(dir) = &self.repo_dir {
            cmd.arg("-C").arg(dir);
        }
        cmd.args(args);

        debug!(program = %self.program, ?args, "running git");
        let output = cmd.output()?;
        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                command: format!("{} {}", self.program, args.join(" ")),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VcsFileLister for GitCli {
    fn list_files(&self, reference: &str, dir: &str) -> VcsResult<Vec<String>> {
        let stdout = self.run(&["ls-tree", "-r", "-z", "--name-only", reference, dir])?;
        Ok(parse_name_list(&stdout))
    }
}

impl VcsFileReader for GitCli {
    fn read_file(&self, reference: &str, path: &str) -> VcsResult<Vec<u8>> {
        self.run(&["show", &format!("{reference}:{path}")])
    }
}

/// Split NUL-terminated `ls-tree -z` output. Paths are not quoted.
fn parse_name_list(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|&b| b == 0)
        .filter(|name| !name.is_empty())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}
