// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter configuration: which marker counts as an absence and how tables
// are found on a page.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AbsenteeError, Result};
use crate::marker::{self, DEFAULT_MARKER, MarkerMatcher};

/// How a cell's text is tested for the absence marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerStrategy {
    /// Raw substring containment (the historical behaviour).
    Contains { marker: String },
    /// Whole-cell equality.
    Exact { marker: String },
    /// Whole-cell equality after trimming whitespace.
    Trimmed { marker: String },
    /// Regex search anywhere in the cell.
    Regex { pattern: String },
}

impl Default for MarkerStrategy {
    fn default() -> Self {
        Self::Contains {
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

/// Where table rulings come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStrategy {
    /// Drawn lines and rectangle sides.
    #[default]
    Lines,
    /// Synthetic rulings inferred from word alignment.
    Text,
}

/// Table-finding parameters. Distances are in PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub strategy: TableStrategy,
    /// Parallel edges closer than this are snapped to a shared position.
    pub snap_tolerance: f64,
    /// Collinear segments separated by at most this gap are joined.
    pub join_tolerance: f64,
    /// Edges shorter than this are ignored.
    pub edge_min_length: f64,
    /// Slack when testing whether a horizontal and a vertical edge cross.
    pub intersection_tolerance: f64,
    /// Text strategy: words needed to share a left edge before it becomes a
    /// vertical ruling.
    pub min_words_vertical: usize,
    /// Text strategy: words needed to share a top before it becomes a
    /// horizontal ruling.
    pub min_words_horizontal: usize,
    /// Horizontal gap that still joins two characters into one word.
    pub text_x_tolerance: f64,
    /// Vertical drift that still keeps two characters on one line.
    pub text_y_tolerance: f64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            strategy: TableStrategy::Lines,
            snap_tolerance: 3.0,
            join_tolerance: 3.0,
            edge_min_length: 3.0,
            intersection_tolerance: 3.0,
            min_words_vertical: 3,
            min_words_horizontal: 1,
            text_x_tolerance: 3.0,
            text_y_tolerance: 3.0,
        }
    }
}

impl TableSettings {
    fn validate(&self) -> Result<()> {
        let distances = [
            ("snap_tolerance", self.snap_tolerance),
            ("join_tolerance", self.join_tolerance),
            ("edge_min_length", self.edge_min_length),
            ("intersection_tolerance", self.intersection_tolerance),
            ("text_x_tolerance", self.text_x_tolerance),
            ("text_y_tolerance", self.text_y_tolerance),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(AbsenteeError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.min_words_vertical == 0 || self.min_words_horizontal == 0 {
            return Err(AbsenteeError::Config(
                "minimum word counts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Complete settings for one filtering run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub marker: MarkerStrategy,
    pub tables: TableSettings,
}

impl FilterConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading filter configuration");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check marker pattern and table parameters.
    pub fn validate(&self) -> Result<()> {
        self.tables.validate()?;
        match &self.marker {
            MarkerStrategy::Contains { marker }
            | MarkerStrategy::Exact { marker }
            | MarkerStrategy::Trimmed { marker }
                if marker.is_empty() =>
            {
                Err(AbsenteeError::Config("marker must not be empty".into()))
            }
            other => marker::build_matcher(other).map(|_| ()),
        }
    }

    /// The predicate described by [`FilterConfig::marker`].
    pub fn matcher(&self) -> Result<Box<dyn MarkerMatcher>> {
        marker::build_matcher(&self.marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_historical_behaviour() {
        let config = FilterConfig::default();
        assert_eq!(
            config.marker,
            MarkerStrategy::Contains {
                marker: "F".into()
            }
        );
        assert_eq!(config.tables.strategy, TableStrategy::Lines);
        assert_eq!(config.tables.snap_tolerance, 3.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = FilterConfig::from_json_str(
            r#"{ "marker": { "kind": "trimmed", "marker": "F" }, "tables": { "strategy": "text" } }"#,
        )
        .unwrap();
        assert_eq!(
            config.marker,
            MarkerStrategy::Trimmed {
                marker: "F".into()
            }
        );
        assert_eq!(config.tables.strategy, TableStrategy::Text);
        assert_eq!(config.tables.join_tolerance, 3.0);
        assert_eq!(config.tables.min_words_vertical, 3);
    }

    #[test]
    fn bad_regex_is_rejected() {
        let err = FilterConfig::from_json_str(r#"{ "marker": { "kind": "regex", "pattern": "[" } }"#)
            .unwrap_err();
        assert!(matches!(err, AbsenteeError::Config(_)));
    }

    #[test]
    fn empty_marker_is_rejected() {
        let config = FilterConfig {
            marker: MarkerStrategy::Contains {
                marker: String::new(),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let err = FilterConfig::from_json_str(r#"{ "tables": { "snap_tolerance": -1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, AbsenteeError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = FilterConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, AbsenteeError::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filter.json");
        std::fs::write(&path, r#"{ "marker": { "kind": "exact", "marker": "F" } }"#).unwrap();

        let config = FilterConfig::from_json_file(&path).unwrap();
        assert!(config.matcher().unwrap().matches("F"));
        assert!(!config.matcher().unwrap().matches("Feito"));
    }
}
