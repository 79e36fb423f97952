// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Table finding on an interpreted page, delegated to pdfplumber.

use absentee_core::{BBox, Cell, Table, TableSettings, TableStrategy};
use pdfplumber::Strategy;

/// Finds tables on pdfplumber pages with a fixed set of settings.
#[derive(Debug, Clone)]
pub struct TableFinder {
    settings: pdfplumber::TableSettings,
}

impl TableFinder {
    pub fn new(settings: &TableSettings) -> Self {
        Self {
            settings: extraction_settings(settings),
        }
    }

    /// Tables on `page`, in the order pdfplumber reports them.
    ///
    /// Tables without any cell are dropped; they carry nothing to match.
    pub fn find_tables(&self, page: &pdfplumber::Page) -> Vec<Table> {
        page.find_tables(&self.settings)
            .into_iter()
            .map(|table| Table {
                bbox: bbox(&table.bbox),
                rows: table
                    .rows
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|cell| Cell::new(bbox(&cell.bbox), cell.text))
                            .collect()
                    })
                    .collect(),
            })
            .filter(|table| !table.is_empty())
            .collect()
    }
}

impl Default for TableFinder {
    fn default() -> Self {
        Self::new(&TableSettings::default())
    }
}

fn bbox(b: &pdfplumber::BBox) -> BBox {
    BBox::new(b.x0, b.top, b.x1, b.bottom)
}

/// Map configured settings onto pdfplumber's. Ruled tables use the lattice
/// finder, unruled ones the stream (text-alignment) finder.
fn extraction_settings(settings: &TableSettings) -> pdfplumber::TableSettings {
    let strategy = match settings.strategy {
        TableStrategy::Lines => Strategy::Lattice,
        TableStrategy::Text => Strategy::Stream,
    };

    pdfplumber::TableSettings {
        strategy,
        snap_tolerance: settings.snap_tolerance,
        snap_x_tolerance: settings.snap_tolerance,
        snap_y_tolerance: settings.snap_tolerance,
        join_tolerance: settings.join_tolerance,
        join_x_tolerance: settings.join_tolerance,
        join_y_tolerance: settings.join_tolerance,
        edge_min_length: settings.edge_min_length,
        intersection_tolerance: settings.intersection_tolerance,
        intersection_x_tolerance: settings.intersection_tolerance,
        intersection_y_tolerance: settings.intersection_tolerance,
        min_words_vertical: settings.min_words_vertical,
        min_words_horizontal: settings.min_words_horizontal,
        text_tolerance: settings.text_x_tolerance,
        text_x_tolerance: settings.text_x_tolerance,
        text_y_tolerance: settings.text_y_tolerance,
        ..pdfplumber::TableSettings::default()
    }
}
