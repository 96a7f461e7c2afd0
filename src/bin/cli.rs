// src/bin/cli.rs
use clap::Parser;
use nhl_scrape::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = cli::Args::parse();
    if let Err(e) = log::init(args.verbose) {
        eprintln!("Warning: logging disabled: {e}");
    }
    cli::run(args)?;
    Ok(())
}
