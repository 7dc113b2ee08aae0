//! Main entry point for the uimage CLI tool

use clap::Parser;
use colored::Colorize;
use uimage::cli::{Args, init_logger, run_cli};

fn main() {
    let args = Args::parse();
    init_logger(args.debug);

    if let Err(e) = run_cli(args) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
