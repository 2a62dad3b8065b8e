// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for room scan analysis

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A scanned 3D point in meters (simplified for serialization)
///
/// Axis convention: X is width (left negative / right positive), Y is height
/// (floor low / ceiling high), Z is depth (front wall low / back wall high).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: &Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }

    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Distance in the horizontal (X, Z) plane, ignoring height
    pub fn planar_distance_to(&self, other: &Vertex) -> f64 {
        let d = Vector3::new(other.x - self.x, 0.0, other.z - self.z);
        d.norm()
    }
}

/// Coordinate axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Axis-aligned bounding box accumulated over a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl Bounds3 {
    /// Bounds initialized to the invalid (inverted) state
    pub fn empty() -> Self {
        Self {
            x_min: f64::MAX,
            x_max: f64::MIN,
            y_min: f64::MAX,
            y_max: f64::MIN,
            z_min: f64::MAX,
            z_max: f64::MIN,
        }
    }

    /// Expand bounds to include a point
    #[inline]
    pub fn expand(&mut self, v: &Vertex) {
        self.x_min = self.x_min.min(v.x);
        self.x_max = self.x_max.max(v.x);
        self.y_min = self.y_min.min(v.y);
        self.y_max = self.y_max.max(v.y);
        self.z_min = self.z_min.min(v.z);
        self.z_max = self.z_max.max(v.z);
    }

    pub fn from_points(points: &[Vertex]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut bounds = Self::empty();
        for v in points {
            bounds.expand(v);
        }
        Some(bounds)
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x_max - self.x_min,
            Axis::Y => self.y_max - self.y_min,
            Axis::Z => self.z_max - self.z_min,
        }
    }
}

/// Convert a length in meters to truncated integer millimeters
///
/// Truncates toward zero rather than rounding; the reported precision caveat
/// (±50 mm) dwarfs the sub-millimeter difference.
#[inline]
pub fn to_mm(meters: f64) -> i64 {
    (meters * 1000.0) as i64
}

/// The six global reference planes of the scanned room
///
/// Each value is the global min/max of one axis over the whole cloud, so
/// `floor_y <= ceiling_y`, `front_z <= back_z`, `left_x <= right_x` always
/// hold. Computed once, before any region predicate runs; predicates anchor
/// to these planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomFrame {
    pub floor_y: f64,
    pub ceiling_y: f64,
    pub front_z: f64,
    pub back_z: f64,
    pub left_x: f64,
    pub right_x: f64,
}

impl RoomFrame {
    /// Reduce a non-empty cloud to its six extrema
    ///
    /// The loader guarantees at least one vertex; an empty slice would leave
    /// the planes undefined, so this returns `None` for it.
    pub fn from_cloud(cloud: &[Vertex]) -> Option<Self> {
        let bounds = Bounds3::from_points(cloud)?;
        Some(Self {
            floor_y: bounds.y_min,
            ceiling_y: bounds.y_max,
            front_z: bounds.z_min,
            back_z: bounds.z_max,
            left_x: bounds.x_min,
            right_x: bounds.x_max,
        })
    }

    pub fn width(&self) -> f64 {
        self.right_x - self.left_x
    }

    pub fn height(&self) -> f64 {
        self.ceiling_y - self.floor_y
    }

    pub fn depth(&self) -> f64 {
        self.back_z - self.front_z
    }

    /// Geometric center of the room's bounding box
    pub fn center(&self) -> Vertex {
        Vertex::new(
            (self.left_x + self.right_x) / 2.0,
            (self.floor_y + self.ceiling_y) / 2.0,
            (self.front_z + self.back_z) / 2.0,
        )
    }
}

/// The eleven named regions, in their fixed declared output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    FrontWallArea,
    BackWallArea,
    LeftShelf,
    RightShelf,
    LeftSpeaker,
    RightSpeaker,
    LeftRack,
    RightRack,
    SofaEstimated,
    Floor,
    Ceiling,
}

impl RegionKind {
    /// Declared order; segmentation output always follows this order
    pub const ALL: [RegionKind; 11] = [
        RegionKind::FrontWallArea,
        RegionKind::BackWallArea,
        RegionKind::LeftShelf,
        RegionKind::RightShelf,
        RegionKind::LeftSpeaker,
        RegionKind::RightSpeaker,
        RegionKind::LeftRack,
        RegionKind::RightRack,
        RegionKind::SofaEstimated,
        RegionKind::Floor,
        RegionKind::Ceiling,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RegionKind::FrontWallArea => "front_wall_area",
            RegionKind::BackWallArea => "back_wall_area",
            RegionKind::LeftShelf => "left_shelf",
            RegionKind::RightShelf => "right_shelf",
            RegionKind::LeftSpeaker => "left_speaker",
            RegionKind::RightSpeaker => "right_speaker",
            RegionKind::LeftRack => "left_rack",
            RegionKind::RightRack => "right_rack",
            RegionKind::SofaEstimated => "sofa_estimated",
            RegionKind::Floor => "floor",
            RegionKind::Ceiling => "ceiling",
        }
    }
}

/// Per-axis extent of a region's bounding box in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeMm {
    pub x_mm: i64,
    pub y_mm: i64,
    pub z_mm: i64,
}

/// Statistics of one segmented region
///
/// A region with no matching points degrades to a stub: count zero and no
/// centroid/bounds/size/samples. That is expected output, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStats {
    pub kind: RegionKind,
    pub vertex_count: usize,
    pub centroid: Option<Vertex>,
    pub bounds: Option<Bounds3>,
    pub size_mm: Option<SizeMm>,
    /// Evenly spaced sample of member points for inspection (capped)
    pub samples: Vec<Vertex>,
}

impl RegionStats {
    /// Compute statistics over the matched points of a region
    pub fn from_points(kind: RegionKind, points: &[Vertex], sample_cap: usize) -> Self {
        let Some(bounds) = Bounds3::from_points(points) else {
            return Self {
                kind,
                vertex_count: 0,
                centroid: None,
                bounds: None,
                size_mm: None,
                samples: Vec::new(),
            };
        };

        let n = points.len() as f64;
        let mut sum = Vector3::zeros();
        for v in points {
            sum += Vector3::new(v.x, v.y, v.z);
        }
        let centroid = Vertex::new(sum.x / n, sum.y / n, sum.z / n);

        Self {
            kind,
            vertex_count: points.len(),
            centroid: Some(centroid),
            bounds: Some(bounds),
            size_mm: Some(SizeMm {
                x_mm: to_mm(bounds.extent(Axis::X)),
                y_mm: to_mm(bounds.extent(Axis::Y)),
                z_mm: to_mm(bounds.extent(Axis::Z)),
            }),
            samples: sample_evenly(points, sample_cap),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}

/// Select up to `cap` points, evenly spaced over the input order
///
/// Index selection is linspace-style (first and last element always
/// included), truncating fractional indices toward zero.
pub fn sample_evenly(points: &[Vertex], cap: usize) -> Vec<Vertex> {
    if points.is_empty() || cap == 0 {
        return Vec::new();
    }
    if points.len() <= cap {
        return points.to_vec();
    }
    let last = (points.len() - 1) as f64;
    (0..cap)
        .map(|i| {
            let idx = (i as f64 * last / (cap - 1) as f64) as usize;
            points[idx]
        })
        .collect()
}

/// Heuristic constants and tolerance margins for region segmentation
///
/// All lengths are meters. The defaults encode the measured listening room:
/// a TANNOY-sized speaker cabinet (380 x 580 x 270 mm) standing on 600 mm
/// shelves, baffles 280 mm off the front wall, cabinets 110 mm (left) and
/// 150 mm (right) off their side walls. Margins are non-negative; widening
/// any one of them can only grow the matched point set of its region.
///
/// Immutable input to the pipeline; pass by reference, never mutate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Depth of the front wall band (front_z .. front_z + this)
    pub front_band_depth: f64,
    /// Depth of the back wall band (back_z - this .. back_z)
    pub back_band_depth: f64,
    /// Shelf top above the floor; also the speaker bottom (600 mm measured)
    pub shelf_top_height: f64,
    /// Speaker cabinet width (380 mm)
    pub speaker_width: f64,
    /// Speaker cabinet height (580 mm)
    pub speaker_height: f64,
    /// Speaker cabinet depth (270 mm)
    pub speaker_depth: f64,
    /// Baffle face distance from the front wall (280 mm)
    pub baffle_offset: f64,
    /// Left cabinet clearance off the left wall (110 mm measured)
    pub left_wall_clearance: f64,
    /// Right cabinet clearance off the right wall (150 mm measured)
    pub right_wall_clearance: f64,
    /// Symmetric margin around the speaker body box (20 mm)
    pub speaker_margin: f64,
    /// Shelf margin on the wall side of the cabinet span (50 mm)
    pub shelf_wall_margin: f64,
    /// Shelf margin on the room side of the cabinet span (100 mm)
    pub shelf_room_margin: f64,
    /// Extra shelf depth beyond the cabinet rear (100 mm)
    pub shelf_depth_margin: f64,
    /// Rack region stops this far below the ceiling (300 mm)
    pub rack_ceiling_clearance: f64,
    /// Sofa region starts behind this absolute Z, in scan coordinates
    /// (the scan origin sits mid-room, so 0.5 m is past the room center)
    pub sofa_min_z: f64,
    /// Seat band above the floor, lower edge (200 mm)
    pub sofa_seat_min_height: f64,
    /// Seat band above the floor, upper edge (700 mm)
    pub sofa_seat_max_height: f64,
    /// Floor band thickness (100 mm)
    pub floor_band: f64,
    /// Ceiling band thickness (100 mm)
    pub ceiling_band: f64,
    /// Ear height above the sofa seat centroid (450 mm)
    pub ear_offset: f64,
    /// Histogram bin counts per axis
    pub x_histogram_bins: usize,
    pub y_histogram_bins: usize,
    pub z_histogram_bins: usize,
    /// Bin count for cluster detection
    pub cluster_bins: usize,
    /// A cluster bin is significant above this fraction of the total count
    pub cluster_fraction: f64,
    /// Density grid cell size over the (x, z) plane (0.1 m)
    pub grid_cell_size: f64,
    /// Horizontal slice heights above the floor
    pub slice_heights: Vec<f64>,
    /// Half-thickness of each horizontal slice band (50 mm)
    pub slice_band: f64,
    /// Per-region sample cap in the report
    pub region_sample_cap: usize,
    /// Per-slice sample cap in the report
    pub slice_sample_cap: usize,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            front_band_depth: 0.5,
            back_band_depth: 0.5,
            shelf_top_height: 0.6,
            speaker_width: 0.38,
            speaker_height: 0.58,
            speaker_depth: 0.27,
            baffle_offset: 0.28,
            left_wall_clearance: 0.11,
            right_wall_clearance: 0.15,
            speaker_margin: 0.02,
            shelf_wall_margin: 0.05,
            shelf_room_margin: 0.10,
            shelf_depth_margin: 0.10,
            rack_ceiling_clearance: 0.3,
            sofa_min_z: 0.5,
            sofa_seat_min_height: 0.2,
            sofa_seat_max_height: 0.7,
            floor_band: 0.1,
            ceiling_band: 0.1,
            ear_offset: 0.45,
            x_histogram_bins: 30,
            y_histogram_bins: 30,
            z_histogram_bins: 40,
            cluster_bins: 50,
            cluster_fraction: 0.01,
            grid_cell_size: 0.1,
            slice_heights: vec![0.5, 1.0, 1.5],
            slice_band: 0.05,
            region_sample_cap: 30,
            slice_sample_cap: 50,
        }
    }
}
