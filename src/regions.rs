// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Region segmentation
//!
//! Evaluates the fixed table of eleven axis-interval predicates against every
//! point of the cloud. All predicates anchor to the same derived values
//! (shelf top, speaker top, baffle depth, per-side cabinet X spans) computed
//! once from the room frame and the heuristic config; the left and right
//! sides mirror each other by reflecting the wall-offset convention.
//!
//! Predicates are intentionally not mutually exclusive: shelf and speaker
//! boxes share depth range because the physical objects interpenetrate under
//! an axis-aligned approximation.

use crate::types::{HeuristicConfig, RegionKind, RegionStats, RoomFrame, Vertex};
use rayon::prelude::*;

/// Which side wall a span is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// X extent of one speaker cabinet, from wall-side edge to room-side edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CabinetSpan {
    pub side: Side,
    /// Cabinet edge nearer its side wall
    pub wall_x: f64,
    /// Cabinet edge nearer the room center
    pub room_x: f64,
}

impl CabinetSpan {
    pub fn x_lo(&self) -> f64 {
        self.wall_x.min(self.room_x)
    }

    pub fn x_hi(&self) -> f64 {
        self.wall_x.max(self.room_x)
    }

    /// Open interval for the speaker body, widened symmetrically
    fn speaker_interval(&self, margin: f64) -> (f64, f64) {
        (self.x_lo() - margin, self.x_hi() + margin)
    }

    /// Open interval for shelf and rack: the wall-side margin is tighter
    /// than the room-side margin, mirrored between the two sides
    fn furniture_interval(&self, config: &HeuristicConfig) -> (f64, f64) {
        match self.side {
            Side::Left => (
                self.wall_x - config.shelf_wall_margin,
                self.room_x + config.shelf_room_margin,
            ),
            Side::Right => (
                self.room_x - config.shelf_room_margin,
                self.wall_x + config.shelf_wall_margin,
            ),
        }
    }
}

/// Anchor values shared by multiple region predicates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionAnchors {
    /// Shelf upper edge = speaker lower edge
    pub shelf_top_y: f64,
    /// Speaker upper edge (shelf top + cabinet height)
    pub speaker_top_y: f64,
    /// Z position of the baffle face
    pub baffle_z: f64,
    pub left: CabinetSpan,
    pub right: CabinetSpan,
}

impl RegionAnchors {
    pub fn derive(frame: &RoomFrame, config: &HeuristicConfig) -> Self {
        let shelf_top_y = frame.floor_y + config.shelf_top_height;
        let left_wall_x = frame.left_x + config.left_wall_clearance;
        let right_wall_x = frame.right_x - config.right_wall_clearance;
        Self {
            shelf_top_y,
            speaker_top_y: shelf_top_y + config.speaker_height,
            baffle_z: frame.front_z + config.baffle_offset,
            left: CabinetSpan {
                side: Side::Left,
                wall_x: left_wall_x,
                room_x: left_wall_x + config.speaker_width,
            },
            right: CabinetSpan {
                side: Side::Right,
                wall_x: right_wall_x,
                room_x: right_wall_x - config.speaker_width,
            },
        }
    }

    fn span(&self, side: Side) -> &CabinetSpan {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Shared read-only context for all predicates
struct SegmentContext<'a> {
    frame: &'a RoomFrame,
    config: &'a HeuristicConfig,
    anchors: RegionAnchors,
}

/// Evaluate all eleven regions over the cloud, in declared order
///
/// Regions are independent of each other, so they are evaluated in parallel;
/// the output order is `RegionKind::ALL` regardless.
pub fn segment(cloud: &[Vertex], frame: &RoomFrame, config: &HeuristicConfig) -> Vec<RegionStats> {
    let ctx = SegmentContext {
        frame,
        config,
        anchors: RegionAnchors::derive(frame, config),
    };

    let regions: Vec<RegionStats> = RegionKind::ALL
        .par_iter()
        .map(|&kind| {
            let matched: Vec<Vertex> = cloud
                .iter()
                .copied()
                .filter(|v| region_contains(kind, v, &ctx))
                .collect();
            RegionStats::from_points(kind, &matched, config.region_sample_cap)
        })
        .collect();

    for region in &regions {
        tracing::debug!(
            region = region.kind.name(),
            vertices = region.vertex_count,
            "segmented region"
        );
    }
    regions
}

/// The membership predicate of one region, as a conjunction of open
/// axis-interval tests over the shared context
fn region_contains(kind: RegionKind, v: &Vertex, ctx: &SegmentContext<'_>) -> bool {
    let frame = ctx.frame;
    let config = ctx.config;
    let a = &ctx.anchors;
    match kind {
        RegionKind::FrontWallArea => v.z < frame.front_z + config.front_band_depth,
        RegionKind::BackWallArea => v.z > frame.back_z - config.back_band_depth,
        RegionKind::LeftShelf | RegionKind::RightShelf => {
            let span = a.span(shelf_side(kind));
            let (x_lo, x_hi) = span.furniture_interval(config);
            v.z < a.baffle_z + config.speaker_depth + config.shelf_depth_margin
                && v.x > x_lo
                && v.x < x_hi
                && v.y > frame.floor_y
                && v.y < a.shelf_top_y
        }
        RegionKind::LeftSpeaker | RegionKind::RightSpeaker => {
            let span = a.span(shelf_side(kind));
            let (x_lo, x_hi) = span.speaker_interval(config.speaker_margin);
            let m = config.speaker_margin;
            v.z > a.baffle_z - m
                && v.z < a.baffle_z + config.speaker_depth + m
                && v.x > x_lo
                && v.x < x_hi
                && v.y > a.shelf_top_y - m
                && v.y < a.speaker_top_y + m
        }
        RegionKind::LeftRack | RegionKind::RightRack => {
            // Between the baffle and the front wall, above the shelf top
            let span = a.span(shelf_side(kind));
            let (x_lo, x_hi) = span.furniture_interval(config);
            v.z < a.baffle_z - config.speaker_margin
                && v.x > x_lo
                && v.x < x_hi
                && v.y > a.shelf_top_y
                && v.y < frame.ceiling_y - config.rack_ceiling_clearance
        }
        RegionKind::SofaEstimated => {
            v.z > config.sofa_min_z
                && v.y > frame.floor_y + config.sofa_seat_min_height
                && v.y < frame.floor_y + config.sofa_seat_max_height
        }
        RegionKind::Floor => v.y < frame.floor_y + config.floor_band,
        RegionKind::Ceiling => v.y > frame.ceiling_y - config.ceiling_band,
    }
}

fn shelf_side(kind: RegionKind) -> Side {
    match kind {
        RegionKind::LeftShelf | RegionKind::LeftSpeaker | RegionKind::LeftRack => Side::Left,
        _ => Side::Right,
    }
}
