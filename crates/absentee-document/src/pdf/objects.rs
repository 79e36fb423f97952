// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Small helpers over lopdf objects shared by the reader and the assembler.

use std::io::Read;

use flate2::read::ZlibDecoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Follow a reference chain to the object it points at.
///
/// Dangling references resolve to the reference itself; chains longer than a
/// handful of hops are cut short.
pub fn resolve<'a>(doc: &'a Document, mut obj: &'a Object) -> &'a Object {
    for _ in 0..8 {
        match obj {
            Object::Reference(id) => match doc.get_object(*id) {
                Ok(target) => obj = target,
                Err(_) => return obj,
            },
            _ => return obj,
        }
    }
    obj
}

/// `dict[key]`, with references followed.
pub fn get<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    dict.get(key).ok().map(|obj| resolve(doc, obj))
}

pub fn get_dict<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Dictionary> {
    match get(doc, dict, key)? {
        Object::Dictionary(inner) => Some(inner),
        Object::Stream(stream) => Some(&stream.dict),
        _ => None,
    }
}

/// Decoded stream content. Unfiltered streams are returned as stored.
///
/// lopdf hands back whatever inflated before a corrupt Flate body, so a
/// leading FlateDecode is inflated strictly first.
pub fn decoded(stream: &Stream) -> Result<Vec<u8>, String> {
    if !stream.dict.has(b"Filter") {
        return Ok(stream.content.clone());
    }

    let filters = stream.filters().map_err(|err| err.to_string())?;
    if filters.first().is_some_and(|filter| *filter == b"FlateDecode") && !stream.content.is_empty() {
        let mut inflated = Vec::new();
        ZlibDecoder::new(stream.content.as_slice())
            .read_to_end(&mut inflated)
            .map_err(|err| format!("FlateDecode: {err}"))?;
    }
    stream.decompressed_content().map_err(|err| err.to_string())
}

/// Look a key up on a page, walking `/Parent` links for inherited attributes.
pub fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    inherited_raw(doc, page_id, key).map(|value| resolve(doc, value))
}

/// Like [`inherited`], but without following a reference in the value.
pub fn inherited_raw<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_object(page_id).ok()?.as_dict().ok()?;
    for _ in 0..64 {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_object(parent).ok()?.as_dict().ok()?;
    }
    None
}
