// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lenient OBJ vertex loading
//!
//! Only `v` lines matter to the analysis; faces, normals, texture
//! coordinates, comments and anything else are skipped. A `v` line that does
//! not parse as three floats is skipped too, silently. The one fatal case is
//! a source that yields no vertices at all: every downstream extremum would
//! be undefined.

use crate::types::Vertex;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors of the scan analysis pipeline
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no vertices found in scan source")]
    EmptyCloud,
    #[error("failed to read scan source: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse vertex lines from OBJ text, in source order
///
/// Returns `ScanError::EmptyCloud` when nothing parses.
pub fn parse_obj_vertices(source: &str) -> Result<Vec<Vertex>, ScanError> {
    let mut cloud = Vec::new();
    for line in source.lines() {
        if let Some(vertex) = parse_vertex_line(line) {
            cloud.push(vertex);
        }
    }
    if cloud.is_empty() {
        return Err(ScanError::EmptyCloud);
    }
    tracing::debug!(vertices = cloud.len(), "parsed scan source");
    Ok(cloud)
}

/// Read an OBJ file and parse its vertices
pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<Vertex>, ScanError> {
    let content = fs::read_to_string(path)?;
    parse_obj_vertices(&content)
}

fn parse_vertex_line(line: &str) -> Option<Vertex> {
    let mut fields = line.split_whitespace();
    if fields.next()? != "v" {
        return None;
    }
    let x = parse_float(fields.next()?)?;
    let y = parse_float(fields.next()?)?;
    let z = parse_float(fields.next()?)?;
    Some(Vertex::new(x, y, z))
}

fn parse_float(field: &str) -> Option<f64> {
    fast_float::parse(field).ok()
}
