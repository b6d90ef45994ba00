//! `FormForge` CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use formforge_runtime::cli::{Cli, run};
use formforge_runtime::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log.spec());

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}
