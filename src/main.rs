//! # gdnative-bootstrap CLI
//!
//! This is the binary entry point for the `gdnative-bootstrap` command-line
//! tool. It parses arguments with `clap`, runs the selected command and turns
//! errors into an exit status.
//!
//! The core logic lives in the library crate; the binary is a thin wrapper
//! around it. Generator and build failures exit with the child's own status
//! code, every other error with `1`.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<gdnative_bootstrap::error::Error>()
                .map(|e| e.exit_code())
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
