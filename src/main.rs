//! Stacksmith CLI: patch and inspect the smart-library database.

use clap::Parser;
use colored::Colorize;
use stacksmith::engine::arg_parser::Cli;
use stacksmith::engine::handle_run;
use std::time::Instant;

fn main() {
    let start_time = Instant::now();
    let cli = Cli::parse();
    if let Err(e) = handle_run(&cli) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
    log::debug!("Total time: {:?}", start_time.elapsed());
}
