// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reading (page access, stream checks, table extraction) and writing
// (structural page copy).

pub mod assembler;
pub mod objects;
pub mod reader;
