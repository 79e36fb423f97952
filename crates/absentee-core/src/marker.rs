// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Absence-marker matching: the predicate that decides whether a single
// table cell records an absence.
//
// The default is the literal, case-sensitive substring "F". That also
// matches words such as "Feito" or names containing an upper-case F, so the
// predicate is injectable: callers can pick an exact, trimmed, or regex
// strategy, or pass any closure.

use regex::Regex;

use crate::config::MarkerStrategy;
use crate::error::{AbsenteeError, Result};

/// The default absence marker.
pub const DEFAULT_MARKER: &str = "F";

/// Decides whether a cell's text records an absence.
///
/// Callers never pass empty text: absent and empty cells are filtered out
/// before the matcher runs.
pub trait MarkerMatcher: Send + Sync {
    fn matches(&self, cell_text: &str) -> bool;
}

impl<F> MarkerMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, cell_text: &str) -> bool {
        self(cell_text)
    }
}

/// Raw substring containment. No trimming, no case folding, no word
/// boundaries.
#[derive(Debug, Clone)]
pub struct ContainsMarker(pub String);

impl Default for ContainsMarker {
    fn default() -> Self {
        Self(DEFAULT_MARKER.to_string())
    }
}

impl MarkerMatcher for ContainsMarker {
    fn matches(&self, cell_text: &str) -> bool {
        cell_text.contains(self.0.as_str())
    }
}

/// The whole cell text must equal the marker.
#[derive(Debug, Clone)]
pub struct ExactMarker(pub String);

impl MarkerMatcher for ExactMarker {
    fn matches(&self, cell_text: &str) -> bool {
        cell_text == self.0
    }
}

/// Like [`ExactMarker`], after trimming surrounding whitespace.
#[derive(Debug, Clone)]
pub struct TrimmedMarker(pub String);

impl MarkerMatcher for TrimmedMarker {
    fn matches(&self, cell_text: &str) -> bool {
        cell_text.trim() == self.0.trim()
    }
}

/// Regex search anywhere in the cell text.
#[derive(Debug, Clone)]
pub struct RegexMarker(Regex);

impl RegexMarker {
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|err| AbsenteeError::Config(format!("invalid marker regex {pattern:?}: {err}")))
    }
}

impl MarkerMatcher for RegexMarker {
    fn matches(&self, cell_text: &str) -> bool {
        self.0.is_match(cell_text)
    }
}

/// Build the matcher described by a configured strategy.
pub fn build_matcher(strategy: &MarkerStrategy) -> Result<Box<dyn MarkerMatcher>> {
    let matcher: Box<dyn MarkerMatcher> = match strategy {
        MarkerStrategy::Contains { marker } => Box::new(ContainsMarker(marker.clone())),
        MarkerStrategy::Exact { marker } => Box::new(ExactMarker(marker.clone())),
        MarkerStrategy::Trimmed { marker } => Box::new(TrimmedMarker(marker.clone())),
        MarkerStrategy::Regex { pattern } => Box::new(RegexMarker::new(pattern)?),
    };
    Ok(matcher)
}
