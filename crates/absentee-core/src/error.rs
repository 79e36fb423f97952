// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Absentee.

use thiserror::Error;

/// Top-level error type for all Absentee operations.
#[derive(Debug, Error)]
pub enum AbsenteeError {
    // -- Reading --
    #[error("cannot read PDF document: {0}")]
    DocumentRead(String),

    #[error("cannot read page at index {page}: {cause}")]
    PageRead { page: usize, cause: String },

    // -- Assembly --
    #[error("invalid page selection: {0}")]
    InvalidIndex(String),

    #[error("cannot serialise output PDF: {0}")]
    Serialization(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AbsenteeError {
    /// True for both document-level and page-scoped read failures.
    pub fn is_document_read(&self) -> bool {
        matches!(self, Self::DocumentRead(_) | Self::PageRead { .. })
    }

    /// Page index the failure is scoped to, if any.
    pub fn page(&self) -> Option<usize> {
        match self {
            Self::PageRead { page, .. } => Some(*page),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AbsenteeError>;
