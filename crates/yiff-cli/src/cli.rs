use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::render::OutputFormat;

#[derive(Parser)]
#[command(
    name = "yiff",
    about = "Variable-level diffs for YAML values files between files or git refs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short = 'o', long = "output", global = true, default_value = "shell")]
    pub output: OutputFormat,

    /// When to color terminal output
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two YAML files
    Diff(DiffArgs),
    /// Compare every YAML file under a path between two git refs
    Refs(RefsArgs),
    /// Serve the diff over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Baseline file
    pub a: PathBuf,
    /// Target file
    pub b: PathBuf,
}

#[derive(Args)]
pub struct RefsArgs {
    /// Base ref, tag or commit
    #[arg(long)]
    pub from: String,
    /// Target ref, tag or commit
    #[arg(long)]
    pub to: String,
    /// Directory to compare, relative to the repository root
    #[arg(long)]
    pub path: String,
    /// Repository location (defaults to the current directory)
    #[arg(long)]
    pub repo: Option<PathBuf>,
    /// Fail on the first file that cannot be read or parsed
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Overrides `bind_addr` from the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML server config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["yiff", "diff", "a.yaml", "b.yaml"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.a, PathBuf::from("a.yaml"));
            assert_eq!(args.b, PathBuf::from("b.yaml"));
        } else { panic!("wrong command"); }
        assert_eq!(cli.output, OutputFormat::Shell);
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn diff_requires_two_files() {
        assert!(Cli::try_parse_from(["yiff", "diff", "a.yaml"]).is_err());
    }

    #[test]
    fn parse_refs() {
        let cli = Cli::try_parse_from([
            "yiff", "refs", "--from", "v1.0", "--to", "main", "--path", "charts/app", "--strict",
        ])
        .unwrap();
        if let Command::Refs(args) = cli.command {
            assert_eq!(args.from, "v1.0");
            assert_eq!(args.to, "main");
            assert_eq!(args.path, "charts/app");
            assert!(args.strict);
            assert!(args.repo.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn refs_requires_all_three() {
        assert!(Cli::try_parse_from(["yiff", "refs", "--from", "a", "--to", "b"]).is_err());
    }

    #[test]
    fn parse_output_formats() {
        let cli = Cli::try_parse_from(["yiff", "-o", "yaml", "diff", "a", "b"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Yaml);
        let cli = Cli::try_parse_from(["yiff", "diff", "a", "b", "--output", "columns"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Columns);
    }

    #[test]
    fn unknown_output_format_is_usage_error() {
        let err = Cli::try_parse_from(["yiff", "-o", "xml", "diff", "a", "b"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["yiff", "serve", "--bind", "127.0.0.1:9000"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("127.0.0.1:9000".parse().unwrap()));
            assert!(args.config.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_color_and_verbose() {
        let cli = Cli::try_parse_from(["yiff", "--color", "never", "-v", "diff", "a", "b"]).unwrap();
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(cli.verbose);
    }
}
