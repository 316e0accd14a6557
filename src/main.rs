//! CLI entry point for sprite sheet grid detection

use clap::Parser;
use spritegrid::io::cli::{Cli, FileProcessor};

fn main() -> spritegrid::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();
    FileProcessor::new(cli).process()
}
