// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembly: copy selected pages structurally into a fresh PDF.
//
// Every object reachable from a selected page is copied exactly once (an id
// map keeps shared fonts and images shared and makes reference cycles
// harmless). Stream bytes are never re-encoded.

use std::collections::{HashMap, HashSet, VecDeque};

use absentee_core::error::AbsenteeError;
use absentee_core::{OutputDocument, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use tracing::{debug, info, instrument};

use super::objects;
use super::reader::SourceDocument;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Build a new PDF holding the pages at `indices`, in that order.
///
/// `indices` must be strictly increasing and within the source's page range;
/// this is checked before any copying starts.
#[instrument(skip(source), fields(source_pages = source.page_count()))]
pub fn assemble(source: &SourceDocument, indices: &[usize]) -> Result<OutputDocument> {
    validate_indices(indices, source.page_count())?;

    let mut target = Document::with_version(source.version());
    let pages_id = target.new_object_id();

    let mut copier = PageCopier::new(source.document(), source.page_ids());
    let selected: Vec<(ObjectId, ObjectId)> = indices
        .iter()
        .map(|&index| {
            let source_id = source.page_ids()[index];
            (source_id, copier.reserve(&mut target, source_id))
        })
        .collect();

    for &(source_id, new_id) in &selected {
        let page = copier.copy_page(&mut target, source_id, pages_id)?;
        target.objects.insert(new_id, Object::Dictionary(page));
    }
    copier.drain(&mut target)?;

    let kids: Vec<Object> = selected
        .iter()
        .map(|&(_, new_id)| Object::Reference(new_id))
        .collect();
    target.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => selected.len() as i64,
        }),
    );
    let catalog_id = target.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    target.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    target
        .save_to(&mut bytes)
        .map_err(|err| AbsenteeError::Serialization(format!("failed to write output PDF: {err}")))?;

    info!(
        pages = selected.len(),
        objects = target.objects.len(),
        output_bytes = bytes.len(),
        "Output document assembled"
    );
    Ok(OutputDocument::new(bytes, selected.len()))
}

/// Reject out-of-range or non-ascending selections.
pub fn validate_indices(indices: &[usize], page_count: usize) -> Result<()> {
    let mut previous: Option<usize> = None;
    for &index in indices {
        if index >= page_count {
            return Err(AbsenteeError::InvalidIndex(format!(
                "page index {index} out of range (document has {page_count} pages)"
            )));
        }
        if let Some(prev) = previous
            && index <= prev
        {
            return Err(AbsenteeError::InvalidIndex(format!(
                "page indices must be strictly increasing, got {index} after {prev}"
            )));
        }
        previous = Some(index);
    }
    Ok(())
}

/// Copies page objects and everything they reference from one document into
/// another.
struct PageCopier<'a> {
    source: &'a Document,
    /// Every page of the source; references to unselected ones become null.
    source_pages: HashSet<ObjectId>,
    /// Source id → target id for everything copied or reserved so far.
    id_map: HashMap<ObjectId, ObjectId>,
    /// Objects with a target id whose content still has to be copied.
    pending: VecDeque<(ObjectId, ObjectId)>,
}

impl<'a> PageCopier<'a> {
    fn new(source: &'a Document, page_ids: &[ObjectId]) -> Self {
        Self {
            source,
            source_pages: page_ids.iter().copied().collect(),
            id_map: HashMap::new(),
            pending: VecDeque::new(),
        }
    }

    /// Allocate the target id of a selected page up front, so references
    /// between selected pages resolve whichever is copied first.
    fn reserve(&mut self, target: &mut Document, page_id: ObjectId) -> ObjectId {
        let new_id = target.new_object_id();
        self.id_map.insert(page_id, new_id);
        new_id
    }

    /// The copied page dictionary, with inherited attributes materialised and
    /// `/Parent` pointing at the new page tree.
    fn copy_page(
        &mut self,
        target: &mut Document,
        page_id: ObjectId,
        parent: ObjectId,
    ) -> Result<Dictionary> {
        let page = self
            .source
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|err| {
                AbsenteeError::DocumentRead(format!("page object {page_id:?} unreadable: {err}"))
            })?;

        let mut copied = Dictionary::new();
        for (key, value) in page.iter() {
            if key == b"Parent" {
                continue;
            }
            copied.set(key.clone(), self.copy_object(target, value));
        }

        for key in INHERITABLE {
            if copied.has(key) {
                continue;
            }
            if let Some(value) = objects::inherited_raw(self.source, page_id, key) {
                debug!(key = %String::from_utf8_lossy(key), "Materialising inherited attribute");
                copied.set(key.to_vec(), self.copy_object(target, value));
            }
        }

        copied.set("Type", Object::Name(b"Page".to_vec()));
        copied.set("Parent", Object::Reference(parent));
        Ok(copied)
    }

    /// Copy the contents of every object queued by [`Self::copy_reference`].
    fn drain(&mut self, target: &mut Document) -> Result<()> {
        while let Some((source_id, new_id)) = self.pending.pop_front() {
            let object = self.source.get_object(source_id).map_err(|err| {
                AbsenteeError::DocumentRead(format!("object {source_id:?} unreadable: {err}"))
            })?;
            let copied = self.copy_object(target, object);
            target.objects.insert(new_id, copied);
        }
        Ok(())
    }

    fn copy_object(&mut self, target: &mut Document, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.copy_reference(target, *id),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(target, item))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dict(target, dict)),
            Object::Stream(stream) => {
                let mut copied = stream.clone();
                copied.dict = self.copy_dict(target, &stream.dict);
                Object::Stream(copied)
            }
            other => other.clone(),
        }
    }

    fn copy_dict(&mut self, target: &mut Document, dict: &Dictionary) -> Dictionary {
        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            copied.set(key.clone(), self.copy_object(target, value));
        }
        copied
    }

    /// Target reference for a source reference. New objects are queued
    /// rather than copied recursively, so long reference chains cannot
    /// exhaust the stack.
    fn copy_reference(&mut self, target: &mut Document, id: ObjectId) -> Object {
        if let Some(new_id) = self.id_map.get(&id) {
            return Object::Reference(*new_id);
        }
        if self.source_pages.contains(&id) {
            return Object::Null;
        }
        let Ok(object) = self.source.get_object(id) else {
            // A dangling reference is equivalent to null.
            return Object::Null;
        };
        if is_document_structure(object) {
            return Object::Null;
        }

        let new_id = target.new_object_id();
        self.id_map.insert(id, new_id);
        self.pending.push_back((id, new_id));
        Object::Reference(new_id)
    }
}

/// Page-tree nodes and the catalog belong to the source document's
/// structure, not to any page.
fn is_document_structure(object: &Object) -> bool {
    let Ok(dict) = object.as_dict() else {
        return false;
    };
    matches!(
        dict.get(b"Type"),
        Ok(Object::Name(name)) if name == b"Pages" || name == b"Catalog"
    )
}
