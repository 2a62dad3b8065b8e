// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heuristic room analysis from 3D scan point clouds
//!
//! This crate provides a single-pass pipeline that turns a raw room scan
//! into a structured description:
//! 1. Loading vertex coordinates from an OBJ geometry source
//! 2. Deriving the six room reference planes (floor/ceiling, front/back,
//!    left/right) as global extrema
//! 3. Segmenting eleven named regions (speakers, shelves, racks, sofa,
//!    floor, ceiling, wall bands) with heuristic axis-interval predicates
//! 4. Deriving physical measurements (wall offsets, heights, inter-speaker
//!    distance, listening-position geometry) from the region statistics
//! 5. Assembling everything, plus diagnostics (axis histograms, density
//!    grid, horizontal slices), into one hierarchical JSON document
//!
//! # Usage
//!
//! ```rust,ignore
//! use room_scan::{analyze_obj_file, HeuristicConfig};
//!
//! let report = analyze_obj_file("room/scans/room.obj", &HeuristicConfig::default())?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```
//!
//! The pipeline is deterministic: identical input and identical config
//! produce an identical document.

pub mod camera;
pub mod diagnostics;
pub mod measurements;
pub mod obj_loader;
pub mod regions;
pub mod report;
pub mod types;

// Re-export commonly used types and functions
pub use camera::{placements, CameraPlacement};
pub use measurements::Measurements;
pub use obj_loader::{load_obj, parse_obj_vertices, ScanError};
pub use regions::{segment, RegionAnchors};
pub use report::ReportDocument;
pub use types::{Bounds3, HeuristicConfig, RegionKind, RegionStats, RoomFrame, Vertex};

use std::path::Path;

/// Run the full analysis over an in-memory point cloud
///
/// Fails only on an empty cloud; empty regions and missing measurements
/// degrade gracefully inside the document.
pub fn analyze_cloud(
    cloud: &[Vertex],
    config: &HeuristicConfig,
) -> Result<ReportDocument, ScanError> {
    let frame = RoomFrame::from_cloud(cloud).ok_or(ScanError::EmptyCloud)?;
    tracing::debug!(
        vertices = cloud.len(),
        width_m = frame.width(),
        height_m = frame.height(),
        depth_m = frame.depth(),
        "computed room frame"
    );

    let regions = regions::segment(cloud, &frame, config);
    let measurements = measurements::derive(&regions, &frame, config);
    let detailed = report::detailed_data(cloud, &frame, config);

    Ok(report::assemble(
        cloud.len(),
        &frame,
        &regions,
        measurements,
        detailed,
    ))
}

/// Load an OBJ scan file and run the full analysis
pub fn analyze_obj_file(
    path: impl AsRef<Path>,
    config: &HeuristicConfig,
) -> Result<ReportDocument, ScanError> {
    let cloud = obj_loader::load_obj(path)?;
    analyze_cloud(&cloud, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzing_an_empty_cloud_fails() {
        assert!(matches!(
            analyze_cloud(&[], &HeuristicConfig::default()),
            Err(ScanError::EmptyCloud)
        ));
    }

    #[test]
    fn unit_cube_analysis() {
        let mut cloud = Vec::new();
        for &x in &[0.0, 1.0] {
            for &y in &[0.0, 1.0] {
                for &z in &[0.0, 1.0] {
                    cloud.push(Vertex::new(x, y, z));
                }
            }
        }
        let doc = analyze_cloud(&cloud, &HeuristicConfig::default()).unwrap();

        assert_eq!(doc.room.total_vertices, 8);
        assert_eq!(doc.room.walls.floor_y_m, 0.0);
        assert_eq!(doc.room.walls.ceiling_y_m, 1.0);
        assert_eq!(doc.room.dimensions_mm.height_y, 1000);
        assert_eq!(doc.regions.len(), 11);
    }
}
