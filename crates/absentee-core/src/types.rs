// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Absentee: extracted tables, page selections, and the
// assembled output document.

use std::ops::Deref;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AbsenteeError, Result};

/// Axis-aligned box in page space, y growing downwards from the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }
}

/// One cell of an extracted table.
///
/// `text` is `None` when no characters fell inside the cell. An empty string
/// and `None` are treated the same way by marker matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub bbox: BBox,
    pub text: Option<String>,
}

impl Cell {
    pub fn new(bbox: BBox, text: Option<String>) -> Self {
        Self { bbox, text }
    }

    /// Cell text, or `None` for absent and empty text alike.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// A table detected on a page: rows top-to-bottom, cells left-to-right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub bbox: BBox,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// All cells in document order (row by row).
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// A table without any cell carries no information; it behaves exactly
    /// like a page without a table.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    /// Row texts, mainly for diagnostics and tests.
    pub fn text_rows(&self) -> Vec<Vec<Option<String>>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.text.clone()).collect())
            .collect()
    }
}

/// Zero-based indices of selected pages, strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult(Vec<usize>);

impl SelectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from arbitrary indices, rejecting sequences that are
    /// not strictly increasing.
    pub fn from_indices(indices: Vec<usize>) -> Result<Self> {
        let mut selection = Self::new();
        for index in indices {
            selection.try_push(index)?;
        }
        Ok(selection)
    }

    /// Append an index; it must be greater than the last one.
    pub fn try_push(&mut self, index: usize) -> Result<()> {
        if let Some(&last) = self.0.last()
            && index <= last
        {
            return Err(AbsenteeError::InvalidIndex(format!(
                "index {index} does not follow {last} in ascending order"
            )));
        }
        self.0.push(index);
        Ok(())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// One-based page numbers, as shown to people.
    pub fn page_numbers(&self) -> Vec<usize> {
        self.0.iter().map(|index| index + 1).collect()
    }
}

impl Deref for SelectionResult {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl AsRef<[usize]> for SelectionResult {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a SelectionResult {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A freshly assembled PDF, serialised and ready to hand to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    bytes: Vec<u8>,
    page_count: usize,
}

impl OutputDocument {
    /// MIME type for serving the output over HTTP.
    pub const MIME_TYPE: &'static str = "application/pdf";

    pub fn new(bytes: Vec<u8>, page_count: usize) -> Self {
        Self { bytes, page_count }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Write the PDF to disk.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.bytes)?;
        Ok(())
    }
}

/// Result of a full classify-then-assemble run.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// The document was read successfully but no page records an absence.
    NoMatches { page_count: usize },
    /// At least one page matched; `output` holds exactly those pages.
    Filtered {
        selection: SelectionResult,
        output: OutputDocument,
    },
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoMatches { .. })
    }

    pub fn output(&self) -> Option<&OutputDocument> {
        match self {
            Self::NoMatches { .. } => None,
            Self::Filtered { output, .. } => Some(output),
        }
    }
}
