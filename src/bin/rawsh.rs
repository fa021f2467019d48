// src/bin/rawsh.rs

use anyhow::Result;
use clap::Parser;
use rawsh::{
    cli::{Cli, dispatcher::Flow, handlers::commons},
    constants::FATAL_EXIT_CODE,
    system::shell,
};

/// Sets up logging and colors, runs the shell, and maps the outcome to a
/// process exit status.
fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // The terminal mode has already been restored on the way out.
            commons::report_fatal(&e);
            std::process::exit(FATAL_EXIT_CODE);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    log::debug!("CLI args parsed: {:?}", cli);

    if let Some(line) = cli.command {
        return Ok(match shell::run_line(&line) {
            Flow::Exit(code) => code,
            Flow::Continue => 0,
        });
    }

    Ok(shell::run_interactive()?)
}
