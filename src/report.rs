// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The hierarchical analysis report
//!
//! Purely structural: merges the room frame, the eleven region records, the
//! measurement map and the diagnostics into one serializable document. Key
//! names and nesting are the stable output schema; optional keys are typed
//! `Option`s, present iff their source data exists.

use crate::diagnostics::{self, DensityCell, HistogramBin, HorizontalSlice};
use crate::measurements::Measurements;
use crate::types::{to_mm, Axis, HeuristicConfig, RegionStats, RoomFrame, SizeMm, Vertex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Axis legend of the scan coordinate system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    #[serde(rename = "X")]
    pub x: String,
    #[serde(rename = "Y")]
    pub y: String,
    #[serde(rename = "Z")]
    pub z: String,
    pub unit: String,
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self {
            x: "width (negative left, positive right)".to_string(),
            y: "height (negative floor, positive ceiling)".to_string(),
            z: "depth (negative front wall, positive back wall)".to_string(),
            unit: "meters (m)".to_string(),
        }
    }
}

/// Glossary of the wall reference planes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallGlossary {
    pub front_wall: String,
    pub back_wall: String,
    pub left_wall: String,
    pub right_wall: String,
}

impl Default for WallGlossary {
    fn default() -> Self {
        Self {
            front_wall: "wall behind the speakers (ahead of the listening position)".to_string(),
            back_wall: "wall behind the sofa (behind the listening position)".to_string(),
            left_wall: "left as seen from the listening position".to_string(),
            right_wall: "right as seen from the listening position".to_string(),
        }
    }
}

/// Global bounding ranges per axis, in meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBoxRanges {
    pub x_range_m: [f64; 2],
    pub y_range_m: [f64; 2],
    pub z_range_m: [f64; 2],
}

/// Room dimensions in truncated millimeters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDimensionsMm {
    pub width_x: i64,
    pub height_y: i64,
    pub depth_z: i64,
}

/// The six reference plane positions in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallPlanes {
    pub front_z_m: f64,
    pub back_z_m: f64,
    pub left_x_m: f64,
    pub right_x_m: f64,
    pub floor_y_m: f64,
    pub ceiling_y_m: f64,
}

/// Room-level metadata derived from the frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub total_vertices: usize,
    pub bounding_box: BoundingBoxRanges,
    pub dimensions_mm: RoomDimensionsMm,
    pub walls: WallPlanes,
}

/// A point in meters with explicit unit-suffixed keys
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointM {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

impl From<Vertex> for PointM {
    fn from(v: Vertex) -> Self {
        Self {
            x_m: v.x,
            y_m: v.y,
            z_m: v.z,
        }
    }
}

/// Region bounds in meters with unit-suffixed keys
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsM {
    pub x_min_m: f64,
    pub x_max_m: f64,
    pub y_min_m: f64,
    pub y_max_m: f64,
    pub z_min_m: f64,
    pub z_max_m: f64,
}

/// One region record of the report
///
/// An empty region carries only name and count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    pub name: String,
    pub vertex_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<PointM>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsM>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeMm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_vertices: Option<Vec<PointM>>,
}

impl RegionReport {
    fn from_stats(stats: &RegionStats) -> Self {
        Self {
            name: stats.kind.name().to_string(),
            vertex_count: stats.vertex_count,
            centroid: stats.centroid.map(PointM::from),
            bounds: stats.bounds.map(|b| BoundsM {
                x_min_m: b.x_min,
                x_max_m: b.x_max,
                y_min_m: b.y_min,
                y_max_m: b.y_max,
                z_min_m: b.z_min,
                z_max_m: b.z_max,
            }),
            size: stats.size_mm,
            sample_vertices: if stats.samples.is_empty() {
                None
            } else {
                Some(stats.samples.iter().copied().map(PointM::from).collect())
            },
        }
    }
}

/// Histogram bin keyed by its axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XHistogramBin {
    pub x_m: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YHistogramBin {
    pub y_m: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZHistogramBin {
    pub z_m: f64,
    pub count: usize,
}

/// A significant cluster bin along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterBin {
    pub center_m: f64,
    pub count: usize,
}

impl From<HistogramBin> for ClusterBin {
    fn from(bin: HistogramBin) -> Self {
        Self {
            center_m: bin.center,
            count: bin.count,
        }
    }
}

/// Significant density bands per axis (diagnostic only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisClusters {
    pub x: Vec<ClusterBin>,
    pub y: Vec<ClusterBin>,
    pub z: Vec<ClusterBin>,
}

/// The diagnostics sub-document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedData {
    pub xz_density_map_10cm_grid: Vec<DensityCell>,
    pub x_histogram: Vec<XHistogramBin>,
    pub z_histogram: Vec<ZHistogramBin>,
    pub y_histogram: Vec<YHistogramBin>,
    pub axis_clusters: AxisClusters,
    pub horizontal_slices: BTreeMap<String, HorizontalSlice>,
}

/// Build the diagnostics sub-document for the report
pub fn detailed_data(cloud: &[Vertex], frame: &RoomFrame, config: &HeuristicConfig) -> DetailedData {
    let cluster = |axis: Axis| {
        diagnostics::detect_clusters(cloud, axis, config.cluster_bins, config.cluster_fraction)
            .into_iter()
            .map(ClusterBin::from)
            .collect()
    };
    DetailedData {
        xz_density_map_10cm_grid: diagnostics::density_grid(cloud, frame, config.grid_cell_size),
        x_histogram: diagnostics::axis_histogram(cloud, Axis::X, config.x_histogram_bins)
            .into_iter()
            .map(|b| XHistogramBin {
                x_m: b.center,
                count: b.count,
            })
            .collect(),
        z_histogram: diagnostics::axis_histogram(cloud, Axis::Z, config.z_histogram_bins)
            .into_iter()
            .map(|b| ZHistogramBin {
                z_m: b.center,
                count: b.count,
            })
            .collect(),
        y_histogram: diagnostics::axis_histogram(cloud, Axis::Y, config.y_histogram_bins)
            .into_iter()
            .map(|b| YHistogramBin {
                y_m: b.center,
                count: b.count,
            })
            .collect(),
        axis_clusters: AxisClusters {
            x: cluster(Axis::X),
            y: cluster(Axis::Y),
            z: cluster(Axis::Z),
        },
        horizontal_slices: diagnostics::horizontal_slices(cloud, frame, config),
    }
}

/// The complete analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    #[serde(rename = "_description")]
    pub description: String,
    #[serde(rename = "_coordinate_system")]
    pub coordinate_system: CoordinateSystem,
    #[serde(rename = "_reference")]
    pub reference: WallGlossary,
    pub room: RoomSummary,
    pub regions: Vec<RegionReport>,
    pub measurements: Measurements,
    #[serde(rename = "_notes")]
    pub notes: Vec<String>,
    pub detailed_data: DetailedData,
}

/// Merge all completed pieces into the final document
pub fn assemble(
    total_vertices: usize,
    frame: &RoomFrame,
    regions: &[RegionStats],
    measurements: Measurements,
    detailed: DetailedData,
) -> ReportDocument {
    ReportDocument {
        description: "Coordinate analysis of a 3D room scan".to_string(),
        coordinate_system: CoordinateSystem::default(),
        reference: WallGlossary::default(),
        room: RoomSummary {
            total_vertices,
            bounding_box: BoundingBoxRanges {
                x_range_m: [frame.left_x, frame.right_x],
                y_range_m: [frame.floor_y, frame.ceiling_y],
                z_range_m: [frame.front_z, frame.back_z],
            },
            dimensions_mm: RoomDimensionsMm {
                width_x: to_mm(frame.width()),
                height_y: to_mm(frame.height()),
                depth_z: to_mm(frame.depth()),
            },
            walls: WallPlanes {
                front_z_m: frame.front_z,
                back_z_m: frame.back_z,
                left_x_m: frame.left_x,
                right_x_m: frame.right_x,
                floor_y_m: frame.floor_y,
                ceiling_y_m: frame.ceiling_y,
            },
        },
        regions: regions.iter().map(RegionReport::from_stats).collect(),
        measurements,
        notes: vec![
            "Estimated accuracy is about +/-50 mm".to_string(),
            "Speaker and furniture regions are inferred from vertex density; actual boundaries may differ".to_string(),
            "Toe-in angle cannot be judged from the vertex data".to_string(),
        ],
        detailed_data: detailed,
    }
}
