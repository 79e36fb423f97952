// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page classification: which pages hold a table cell that records an
// absence.

use absentee_core::marker::ContainsMarker;
use absentee_core::{FilterConfig, MarkerMatcher, Result, SelectionResult, Table, TableSettings};
use tracing::{debug, info, instrument};

use crate::pdf::reader::SourceDocument;
use crate::table::TableFinder;

/// Flags pages whose tables contain a cell matching the absence marker.
pub struct PageClassifier {
    matcher: Box<dyn MarkerMatcher>,
    finder: TableFinder,
}

impl PageClassifier {
    /// Build a classifier from a validated configuration.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            matcher: config.matcher()?,
            finder: TableFinder::new(&config.tables),
        })
    }

    /// Use a caller-supplied predicate instead of a configured strategy.
    pub fn with_matcher(matcher: impl MarkerMatcher + 'static, settings: TableSettings) -> Self {
        Self {
            matcher: Box::new(matcher),
            finder: TableFinder::new(&settings),
        }
    }

    /// Scan every page in order and return the indices of flagged pages.
    ///
    /// The first page that cannot be read aborts the run; no partial result
    /// is returned.
    #[instrument(skip_all, fields(pages = source.page_count()))]
    pub fn classify(&self, source: &SourceDocument) -> Result<SelectionResult> {
        let mut selection = SelectionResult::new();

        for index in 0..source.page_count() {
            let tables = source.extract_tables(index, &self.finder)?;
            if self.page_has_marker(&tables) {
                debug!(index, tables = tables.len(), "Page records an absence");
                selection.try_push(index)?;
            }
        }

        info!(
            pages = source.page_count(),
            selected = selection.len(),
            "Classification finished"
        );
        Ok(selection)
    }

    /// Whether any present, non-empty cell of any table matches. Stops at the
    /// first match.
    pub fn page_has_marker(&self, tables: &[Table]) -> bool {
        tables
            .iter()
            .flat_map(Table::cells)
            .filter_map(|cell| cell.text())
            .any(|text| self.matcher.matches(text))
    }
}

impl Default for PageClassifier {
    fn default() -> Self {
        Self::with_matcher(ContainsMarker::default(), TableSettings::default())
    }
}

/// Classify with the default marker (`"F"` anywhere in a cell) and default
/// table settings.
pub fn classify(source: &SourceDocument) -> Result<SelectionResult> {
    PageClassifier::default().classify(source)
}
