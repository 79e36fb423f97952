// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Source document access: load a PDF, enumerate its pages in document order,
// and extract a page's tables.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use absentee_core::error::AbsenteeError;
use absentee_core::{Result, Table};
use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfplumber::Pdf;
use tracing::{debug, info, instrument};

use super::objects;
use crate::table::TableFinder;

/// A parsed, read-only input PDF.
///
/// The object graph (`lopdf`) backs page copying; the same bytes opened with
/// pdfplumber back table extraction. Pages are addressed by zero-based index
/// in document order.
pub struct SourceDocument {
    document: Document,
    pdf: Pdf,
    page_ids: Vec<ObjectId>,
    source_path: Option<String>,
}

impl fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceDocument")
            .field("version", &self.document.version)
            .field("pages", &self.page_ids.len())
            .field("source_path", &self.source_path)
            .finish()
    }
}

impl SourceDocument {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let data = std::fs::read(path_ref).map_err(|err| {
            AbsenteeError::DocumentRead(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        let mut source = Self::from_bytes(&data)?;
        source.source_path = Some(path_ref.display().to_string());
        Ok(source)
    }

    /// Parse a PDF already held in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            AbsenteeError::DocumentRead(format!("failed to load PDF from memory: {}", err))
        })?;
        let pdf = Pdf::open(data, None)
            .map_err(|err| AbsenteeError::DocumentRead(format!("failed to prepare PDF for extraction: {err}")))?;

        // `get_pages` is keyed by 1-based page number, so values come out in
        // document order.
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        debug!(pages = page_ids.len(), version = %document.version, "PDF loaded");
        Ok(Self {
            document,
            pdf,
            page_ids,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Header version of the source, e.g. `"1.7"`.
    pub fn version(&self) -> &str {
        &self.document.version
    }

    /// Return the source path if the document was created via
    /// [`SourceDocument::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Object id of the page at `index`.
    pub fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids.get(index).copied().ok_or_else(|| {
            AbsenteeError::InvalidIndex(format!(
                "page index {index} out of range (document has {} pages)",
                self.page_count()
            ))
        })
    }

    pub(crate) fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    // -- Extraction -----------------------------------------------------------

    /// Tables found on the page at `index`, in reading order.
    ///
    /// Any failure to read the page (a missing or undecodable content stream,
    /// a broken form XObject, malformed operators) is reported as
    /// [`AbsenteeError::PageRead`] for that page; nothing is skipped silently.
    #[instrument(skip(self, finder))]
    pub fn extract_tables(&self, index: usize, finder: &TableFinder) -> Result<Vec<Table>> {
        let page_id = self.page_id(index)?;
        self.check_page_streams(index, page_id)?;

        let page = self.pdf.page(index).map_err(|err| AbsenteeError::PageRead {
            page: index,
            cause: err.to_string(),
        })?;
        let tables = finder.find_tables(&page);
        debug!(tables = tables.len(), "Page extracted");
        Ok(tables)
    }

    /// Every stream the page's content draws on must resolve and decode: the
    /// /Contents streams and the form XObjects reachable from its resources.
    fn check_page_streams(&self, index: usize, page_id: ObjectId) -> Result<()> {
        let page_error = |cause: String| AbsenteeError::PageRead { page: index, cause };
        let doc = &self.document;

        let page = doc
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|err| page_error(format!("page object unreadable: {err}")))?;

        if let Ok(contents) = page.get(b"Contents") {
            let parts: Vec<&Object> = match objects::resolve(doc, contents) {
                Object::Array(items) => items.iter().collect(),
                _ => vec![contents],
            };
            for part in parts {
                match objects::resolve(doc, part) {
                    Object::Stream(stream) => {
                        objects::decoded(stream)
                            .map_err(|err| page_error(format!("content stream undecodable: {err}")))?;
                    }
                    Object::Reference((num, generation)) => {
                        return Err(page_error(format!(
                            "content stream {num} {generation} R does not exist"
                        )));
                    }
                    _ => return Err(page_error("/Contents entry is not a stream".into())),
                }
            }
        }

        if let Some(Object::Dictionary(resources)) = objects::inherited(doc, page_id, b"Resources") {
            let mut seen = HashSet::new();
            self.check_forms(resources, &mut seen).map_err(page_error)?;
        }
        Ok(())
    }

    /// Decode every form XObject named in `resources`, descending into the
    /// forms' own resources.
    fn check_forms(&self, resources: &Dictionary, seen: &mut HashSet<ObjectId>) -> std::result::Result<(), String> {
        let doc = &self.document;
        let Some(xobjects) = objects::get_dict(doc, resources, b"XObject") else {
            return Ok(());
        };

        for (name, value) in xobjects.iter() {
            let Object::Reference(id) = value else {
                continue;
            };
            if !seen.insert(*id) {
                continue;
            }
            let Ok(Object::Stream(stream)) = doc.get_object(*id) else {
                continue;
            };
            if !matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(subtype)) if subtype == b"Form") {
                continue;
            }

            objects::decoded(stream).map_err(|err| {
                format!(
                    "form XObject /{} undecodable: {err}",
                    String::from_utf8_lossy(name)
                )
            })?;
            if let Some(inner) = objects::get_dict(doc, &stream.dict, b"Resources") {
                self.check_forms(inner, seen)?;
            }
        }
        Ok(())
    }
}
