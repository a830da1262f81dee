use std::io::IsTerminal;
use std::path::Path;

use anyhow::Context;
use yiff_diff::Mapping;
use yiff_server::{ServerConfig, YiffServer};
use yiff_vcs::{diff_refs, ErrorPolicy, GitCli, VcsFileLister, VcsFileReader};

use crate::cli::*;
use crate::render::{render_dir_diff, render_records, RefRange, RenderOptions};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let options = RenderOptions {
        format: cli.output,
        color: resolve_color(cli.color),
    };
    // colored suppresses styling on a pipe unless overridden, even for --color always.
    colored::control::set_override(options.color);

    match cli.command {
        Command::Diff(args) => cmd_diff(args, &options),
        Command::Refs(args) => cmd_refs(args, &options),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn resolve_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => auto_color(
            std::env::var_os("NO_COLOR").is_some(),
            std::env::var("TERM").ok().as_deref(),
            std::io::stdout().is_terminal(),
        ),
    }
}

fn auto_color(no_color: bool, term: Option<&str>, is_tty: bool) -> bool {
    !no_color && matches!(term, Some(t) if !t.is_empty() && t != "dumb") && is_tty
}

fn load_file(path: &Path) -> anyhow::Result<Mapping> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    yiff_diff::load(&bytes).with_context(|| format!("failed to parse {}", path.display()))
}

fn diff_files(a: &Path, b: &Path, options: &RenderOptions) -> anyhow::Result<String> {
    let baseline = load_file(a)?;
    let target = load_file(b)?;
    let records = yiff_diff::diff(&baseline, &target);
    tracing::debug!(a = %a.display(), b = %b.display(), records = records.len(), "files compared");
    render_records(&records, options)
}

fn cmd_diff(args: DiffArgs, options: &RenderOptions) -> anyhow::Result<()> {
    print!("{}", diff_files(&args.a, &args.b, options)?);
    Ok(())
}

fn diff_dir<V>(vcs: &V, args: &RefsArgs, options: &RenderOptions) -> anyhow::Result<String>
where
    V: VcsFileLister + VcsFileReader,
{
    let policy = if args.strict {
        ErrorPolicy::Strict
    } else {
        ErrorPolicy::Skip
    };
    let result = diff_refs(vcs, vcs, &args.from, &args.to, &args.path, policy).with_context(
        || format!("failed to compare {} between {} and {}", args.path, args.from, args.to),
    )?;
    let range = RefRange {
        dir: &args.path,
        from: &args.from,
        to: &args.to,
    };
    render_dir_diff(&result, &range, options)
}

fn cmd_refs(args: RefsArgs, options: &RenderOptions) -> anyhow::Result<()> {
    let git = match &args.repo {
        Some(dir) => GitCli::in_dir(dir),
        None => GitCli::new(),
    };
    print!("{}", diff_dir(&git, &args, options)?);
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load server config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(YiffServer::new(config).serve())?;
    Ok(())
}
