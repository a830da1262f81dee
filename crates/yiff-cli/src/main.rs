use clap::Parser;
use tracing::Level;

mod cli;
mod commands;
mod render;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // stdout carries the rendered diff; logs go to stderr.
    let level = match (&cli.command, cli.verbose) {
        (_, true) => Level::DEBUG,
        (cli::Command::Serve(_), false) => Level::INFO,
        _ => Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    commands::run_command(cli)
}
