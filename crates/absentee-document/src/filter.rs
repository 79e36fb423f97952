// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-call pipeline: classify, then assemble when anything matched.

use absentee_core::{FilterConfig, FilterOutcome, Result};
use tracing::{info, instrument};

use crate::classify::PageClassifier;
use crate::pdf::assembler::assemble;
use crate::pdf::reader::SourceDocument;

/// Run classification over `data` and, when at least one page matches,
/// assemble those pages into a new PDF.
///
/// A readable document without matches is [`FilterOutcome::NoMatches`],
/// not an error.
#[instrument(skip_all, fields(bytes_len = data.len()))]
pub fn filter_absences(data: &[u8], config: &FilterConfig) -> Result<FilterOutcome> {
    let classifier = PageClassifier::new(config)?;
    let source = SourceDocument::from_bytes(data)?;
    filter_source(&source, &classifier)
}

/// Same as [`filter_absences`] for an already-loaded document.
pub fn filter_source(source: &SourceDocument, classifier: &PageClassifier) -> Result<FilterOutcome> {
    let selection = classifier.classify(source)?;
    if selection.is_empty() {
        info!(pages = source.page_count(), "No page records an absence");
        return Ok(FilterOutcome::NoMatches {
            page_count: source.page_count(),
        });
    }

    let output = assemble(source, &selection)?;
    Ok(FilterOutcome::Filtered { selection, output })
}
