// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One filtering run driven by parsed command-line arguments.

use absentee_core::{AbsenteeError, FilterOutcome, Result};
use absentee_document::{PageClassifier, SourceDocument, filter_source};
use tracing::info;

use crate::cli::Cli;

/// Notice printed when the document is readable but nothing matched.
pub const NO_MATCHES_NOTICE: &str = "No student with an absence was found in the PDF; nothing written.";

/// What a run produced, for the caller to report.
#[derive(Debug)]
pub enum RunReport {
    /// `--list`: the 1-based numbers of the selected pages.
    Listed(Vec<usize>),
    /// No page matched; no file was written.
    NoMatches,
    /// The filtered PDF was written.
    Written { pages: usize, total: usize },
}

pub fn run(cli: &Cli) -> Result<RunReport> {
    let config = cli.filter_config()?;
    let classifier = PageClassifier::new(&config)?;
    let source = SourceDocument::open(&cli.input)?;

    if cli.list {
        let selection = classifier.classify(&source)?;
        return Ok(RunReport::Listed(selection.page_numbers()));
    }

    match filter_source(&source, &classifier)? {
        FilterOutcome::NoMatches { .. } => Ok(RunReport::NoMatches),
        FilterOutcome::Filtered { output, .. } => {
            output.write_to_file(&cli.output).map_err(|err| match err {
                AbsenteeError::Io(io) => AbsenteeError::Io(std::io::Error::new(
                    io.kind(),
                    format!("{}: {io}", cli.output.display()),
                )),
                other => other,
            })?;
            info!(path = %cli.output.display(), pages = output.page_count(), "Filtered PDF written");
            Ok(RunReport::Written {
                pages: output.page_count(),
                total: source.page_count(),
            })
        }
    }
}
