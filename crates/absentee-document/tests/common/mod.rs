// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory roster PDFs for integration tests.

#![allow(dead_code)]

use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// Left edge and top of every fixture table, in PDF user space.
const TABLE_X: f64 = 50.0;
const TABLE_TOP: f64 = 750.0;
const CELL_W: f64 = 120.0;
const CELL_H: f64 = 20.0;

/// What to draw on one fixture page.
#[derive(Debug, Clone)]
pub enum PageFixture {
    /// A ruled grid (stroked lines) with one string per cell.
    Table(Vec<Vec<&'static str>>),
    /// A grid drawn as one stroked rectangle per cell.
    BoxedTable(Vec<Vec<&'static str>>),
    /// A ruled grid whose text is shown through a Type0 font with a
    /// ToUnicode map.
    Type0Table(Vec<Vec<&'static str>>),
    /// Free text, no rulings.
    Text(&'static str),
    /// Nothing at all.
    Blank,
}

/// Build a PDF with one page per fixture. Pages share a Helvetica font, a
/// Type0 font, and an inherited MediaBox.
pub fn build_pdf(pages: &[PageFixture]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let helvetica = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let type0 = add_type0_font(&mut doc);

    let mut kids: Vec<Object> = Vec::new();
    for fixture in pages {
        let content = page_content(fixture);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => helvetica,
                    "F2" => type0,
                },
            },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("fixture PDF serialises");
    bytes
}

fn add_type0_font(doc: &mut Document) -> ObjectId {
    let cmap = doc.add_object(Stream::new(
        dictionary! {},
        b"/CIDInit /ProcSet findresource begin\n\
          12 dict begin\nbegincmap\n\
          1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n\
          1 beginbfrange\n<0000> <00FF> <0000>\nendbfrange\n\
          endcmap\nend\nend\n"
            .to_vec(),
    ));
    let descendant = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => "RosterSans",
        "DW" => 500,
    });
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => "RosterSans",
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(descendant)],
        "ToUnicode" => cmap,
    })
}

fn page_content(fixture: &PageFixture) -> String {
    match fixture {
        PageFixture::Table(rows) => grid_lines(rows) + &cell_texts(rows, false),
        PageFixture::BoxedTable(rows) => grid_boxes(rows) + &cell_texts(rows, false),
        PageFixture::Type0Table(rows) => grid_lines(rows) + &cell_texts(rows, true),
        PageFixture::Text(text) => format!("BT /F1 12 Tf 72 700 Td ({}) Tj ET\n", escape(text)),
        PageFixture::Blank => String::new(),
    }
}

fn dimensions(rows: &[Vec<&str>]) -> (usize, usize) {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    (rows.len(), cols)
}

fn grid_lines(rows: &[Vec<&str>]) -> String {
    let (n_rows, n_cols) = dimensions(rows);
    let right = TABLE_X + n_cols as f64 * CELL_W;
    let bottom = TABLE_TOP - n_rows as f64 * CELL_H;
    let mut ops = String::from("0.5 w\n");
    for r in 0..=n_rows {
        let y = TABLE_TOP - r as f64 * CELL_H;
        ops.push_str(&format!("{TABLE_X} {y} m {right} {y} l S\n"));
    }
    for c in 0..=n_cols {
        let x = TABLE_X + c as f64 * CELL_W;
        ops.push_str(&format!("{x} {TABLE_TOP} m {x} {bottom} l S\n"));
    }
    ops
}

fn grid_boxes(rows: &[Vec<&str>]) -> String {
    let (n_rows, n_cols) = dimensions(rows);
    let mut ops = String::new();
    for r in 0..n_rows {
        for c in 0..n_cols {
            let x = TABLE_X + c as f64 * CELL_W;
            let y = TABLE_TOP - (r + 1) as f64 * CELL_H;
            ops.push_str(&format!("{x} {y} {CELL_W} {CELL_H} re S\n"));
        }
    }
    ops
}

fn cell_texts(rows: &[Vec<&str>], type0: bool) -> String {
    let mut ops = String::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let x = TABLE_X + c as f64 * CELL_W + 4.0;
            let y = TABLE_TOP - r as f64 * CELL_H - 14.0;
            let shown = if type0 {
                let hex: String = text.chars().map(|ch| format!("{:04X}", ch as u32)).collect();
                format!("<{hex}>")
            } else {
                format!("({})", escape(text))
            };
            let font = if type0 { "F2" } else { "F1" };
            ops.push_str(&format!("BT /{font} 10 Tf {x} {y} Td {shown} Tj ET\n"));
        }
    }
    ops
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// A roster row: student name, then one attendance mark per lesson.
pub fn roster(marks: &[&[&'static str]]) -> Vec<Vec<&'static str>> {
    let names = ["Ana Souza", "Bruno Lima", "Carla Dias", "Davi Rocha"];
    let mut rows = vec![vec!["Aluno", "Aula 1", "Aula 2"]];
    for (i, row_marks) in marks.iter().enumerate() {
        let mut row = vec![names[i % names.len()]];
        row.extend_from_slice(row_marks);
        rows.push(row);
    }
    rows
}

/// Ways a page can be unreadable.
#[derive(Debug, Clone, Copy)]
pub enum BrokenPage {
    /// /Contents points at an object that does not exist.
    DanglingContents,
    /// /Contents is FlateDecode over bytes that are not zlib data.
    CorruptFlate,
    /// /Contents is stored plainly but is not an operator sequence.
    GarbageOperators,
    /// The page draws a form XObject whose Flate body is corrupt.
    CorruptForm,
}

const NOT_ZLIB: &[u8] = b"this is not zlib data";

/// Three roster pages that each record an absence; the middle one is then
/// broken as described by `broken`.
pub fn pdf_with_broken_middle_page(broken: BrokenPage) -> Vec<u8> {
    let absent = || PageFixture::Table(roster(&[&["F", "P"]]));
    let bytes = build_pdf(&[absent(), absent(), absent()]);
    let mut doc = Document::load_mem(&bytes).expect("fixture PDF parses");
    let page_id = doc.get_pages()[&2];

    let contents: Object = match broken {
        BrokenPage::DanglingContents => Object::Reference((999, 0)),
        BrokenPage::CorruptFlate => doc
            .add_object(Stream::new(
                dictionary! { "Filter" => "FlateDecode" },
                NOT_ZLIB.to_vec(),
            ))
            .into(),
        BrokenPage::GarbageOperators => doc
            .add_object(Stream::new(
                dictionary! {},
                b"BT ) ] >> <<< \xff\xfe (unterminated".to_vec(),
            ))
            .into(),
        BrokenPage::CorruptForm => {
            let form = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Form",
                    "BBox" => vec![0.into(), 0.into(), 100.into(), 100.into()],
                    "Filter" => "FlateDecode",
                },
                NOT_ZLIB.to_vec(),
            ));
            page_dict(&mut doc, page_id).set(
                "Resources",
                dictionary! { "XObject" => dictionary! { "Fm0" => form } },
            );
            doc.add_object(Stream::new(dictionary! {}, b"q /Fm0 Do Q\n".to_vec()))
                .into()
        }
    };
    page_dict(&mut doc, page_id).set("Contents", contents);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("broken fixture PDF serialises");
    out
}

fn page_dict(doc: &mut Document, page_id: ObjectId) -> &mut lopdf::Dictionary {
    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .expect("page dictionary")
}

/// Raw bytes of the (single) content stream of page `index`.
pub fn content_of(doc: &Document, index: usize) -> Vec<u8> {
    let page_id = doc.get_pages()[&(index as u32 + 1)];
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
    doc.get_object(content_id)
        .unwrap()
        .as_stream()
        .unwrap()
        .content
        .clone()
}
