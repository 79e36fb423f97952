// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// absentee-document: PDF processing for Absentee.
//
// Reads a roster PDF, finds the tables on each page, flags the pages whose
// cells record an absence, and copies those pages structurally into a new
// document.

pub mod classify;
pub mod filter;
pub mod pdf;
pub mod table;

// Re-export the primary entry points so callers can use
// `absentee_document::SourceDocument` etc.
pub use classify::{PageClassifier, classify};
pub use filter::{filter_absences, filter_source};
pub use pdf::assembler::assemble;
pub use pdf::reader::SourceDocument;
pub use table::TableFinder;
