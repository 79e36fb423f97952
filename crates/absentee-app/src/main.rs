// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Absentee: attendance-roster absence filter.
//
// Entry point. Initialises logging, parses arguments, runs one filter pass,
// and maps the outcome to an exit code.

mod cli;
mod run;

use std::process::ExitCode;

use absentee_core::humanize_error;
use clap::Parser;

use cli::Cli;
use run::{NO_MATCHES_NOTICE, RunReport};

fn main() -> ExitCode {
    // Logs go to stderr so `--list` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!(input = %cli.input.display(), "Absentee starting");

    match run::run(&cli) {
        Ok(RunReport::Listed(pages)) => {
            for page in pages {
                println!("{page}");
            }
            ExitCode::SUCCESS
        }
        Ok(RunReport::NoMatches) => {
            println!("{NO_MATCHES_NOTICE}");
            ExitCode::SUCCESS
        }
        Ok(RunReport::Written { pages, total }) => {
            println!(
                "{pages} of {total} pages with absences written to {}",
                cli.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let human = humanize_error(&err);
            tracing::error!(error = %err, "Filtering failed");
            eprintln!("error: {err}");
            eprintln!("{} {}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}
