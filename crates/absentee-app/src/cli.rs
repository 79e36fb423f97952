// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and how they layer over a configuration file.

use std::path::PathBuf;

use absentee_core::{FilterConfig, MarkerStrategy, Result, TableStrategy};
use clap::{Parser, ValueEnum};
use tracing::debug;

/// Output file name used when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "alunos_com_falta.pdf";

/// Keep only the attendance-roster pages whose tables record an absence.
#[derive(Debug, Parser)]
#[command(name = "absentee", about, version)]
pub struct Cli {
    /// Roster PDF to filter
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the filtered PDF
    #[arg(short, long, value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// JSON filter configuration; flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Absence marker text, or the pattern with `--match regex`
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// How a cell's text is compared with the marker
    #[arg(long = "match", value_enum, value_name = "MODE")]
    pub match_mode: Option<MatchMode>,

    /// Where table rulings come from
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Print the selected page numbers (1-based) instead of writing a PDF
    #[arg(long)]
    pub list: bool,
}

/// Marker comparison modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    Contains,
    Exact,
    Trimmed,
    Regex,
}

/// Table-finding strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Lines,
    Text,
}

impl From<StrategyArg> for TableStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Lines => TableStrategy::Lines,
            StrategyArg::Text => TableStrategy::Text,
        }
    }
}

impl Cli {
    /// Load the configuration file (if any), apply flag overrides, and
    /// validate the result.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut config = match &self.config {
            Some(path) => FilterConfig::from_json_file(path)?,
            None => FilterConfig::default(),
        };

        if self.marker.is_some() || self.match_mode.is_some() {
            config.marker = override_marker(&config.marker, self.match_mode, self.marker.as_deref());
        }
        if let Some(strategy) = self.strategy {
            config.tables.strategy = strategy.into();
        }

        config.validate()?;
        debug!(?config, "Effective filter configuration");
        Ok(config)
    }
}

/// Replace the mode and/or text of `current`, keeping whichever part was not
/// given on the command line.
fn override_marker(current: &MarkerStrategy, mode: Option<MatchMode>, text: Option<&str>) -> MarkerStrategy {
    let (current_mode, current_text) = match current {
        MarkerStrategy::Contains { marker } => (MatchMode::Contains, marker),
        MarkerStrategy::Exact { marker } => (MatchMode::Exact, marker),
        MarkerStrategy::Trimmed { marker } => (MatchMode::Trimmed, marker),
        MarkerStrategy::Regex { pattern } => (MatchMode::Regex, pattern),
    };
    let marker = text.map_or_else(|| current_text.clone(), str::to_string);

    match mode.unwrap_or(current_mode) {
        MatchMode::Contains => MarkerStrategy::Contains { marker },
        MatchMode::Exact => MarkerStrategy::Exact { marker },
        MatchMode::Trimmed => MarkerStrategy::Trimmed { marker },
        MatchMode::Regex => MarkerStrategy::Regex { pattern: marker },
    }
}
