// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// absentee-core: core types, errors, configuration, and marker matching shared
// across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod marker;
pub mod types;

pub use config::{FilterConfig, MarkerStrategy, TableSettings, TableStrategy};
pub use error::{AbsenteeError, Result};
pub use human_errors::{HumanError, Severity, humanize_error};
pub use marker::MarkerMatcher;
pub use types::*;
