// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Physical measurements derived from region statistics
//!
//! Every record is guarded by the non-emptiness of its source region(s):
//! presence in the output is a typed contract (`Option` fields skipped when
//! absent), never an accident of control flow. All `_mm` values are meter
//! differences times 1000, truncated toward zero; `_m` fields stay floats.

use crate::types::{to_mm, HeuristicConfig, RegionKind, RegionStats, RoomFrame, Vertex};
use serde::{Deserialize, Serialize};

/// Placement measurements of one speaker cabinet
///
/// `from_left_wall_mm` is set for the left cabinet, `from_right_wall_mm`
/// for the right one; each measures the outer cabinet edge to its near wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerMeasurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_left_wall_mm: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_right_wall_mm: Option<i64>,
    /// Z position of the baffle face (far Z bound of the cabinet)
    pub baffle_z_m: f64,
    /// Cabinet rear edge to the front wall
    pub from_front_wall_mm: i64,
    /// Cabinet top above the floor
    pub tweeter_height_mm: i64,
    /// Cabinet bottom above the floor
    pub bottom_height_mm: i64,
    pub width_mm: i64,
    pub depth_mm: i64,
}

/// Shelf height and depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfMeasurements {
    pub height_mm: i64,
    pub depth_mm: i64,
}

/// Rack depth off the front wall and top height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackMeasurements {
    pub depth_mm: i64,
    pub top_height_mm: i64,
}

/// Listening position estimated from the sofa centroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListeningPoint {
    pub from_front_wall_mm: i64,
    pub seat_height_mm: i64,
    /// Seat height plus the configured ear offset
    pub ear_height_estimated_mm: i64,
    /// Planar distance to the midpoint of the two speaker centroids;
    /// requires both speaker regions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_speaker_center_mm: Option<i64>,
}

/// The full measurement map; a key is present iff every region it reads
/// from is non-empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_speaker: Option<SpeakerMeasurements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_speaker: Option<SpeakerMeasurements>,
    /// Nearest-edge gap between the cabinets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_distance_mm: Option<i64>,
    /// Centroid-to-centroid distance along X
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_center_distance_mm: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_shelf: Option<ShelfMeasurements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_shelf: Option<ShelfMeasurements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_rack: Option<RackMeasurements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_rack: Option<RackMeasurements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listening_point: Option<ListeningPoint>,
}

/// Bounds and centroid of a region known to be non-empty
#[derive(Clone, Copy)]
struct FilledRegion {
    bounds: crate::types::Bounds3,
    centroid: Vertex,
}

/// Derive all measurements from completed region statistics
///
/// Strict fan-in: reads region stats and the frame, mutates nothing.
pub fn derive(
    regions: &[RegionStats],
    frame: &RoomFrame,
    config: &HeuristicConfig,
) -> Measurements {
    let get = |kind: RegionKind| -> Option<FilledRegion> {
        let region = regions.iter().find(|r| r.kind == kind)?;
        match (region.bounds, region.centroid) {
            (Some(bounds), Some(centroid)) => Some(FilledRegion { bounds, centroid }),
            _ => None,
        }
    };

    let left_spk = get(RegionKind::LeftSpeaker);
    let right_spk = get(RegionKind::RightSpeaker);

    let mut m = Measurements::default();

    if let Some(spk) = left_spk {
        let b = spk.bounds;
        m.left_speaker = Some(SpeakerMeasurements {
            from_left_wall_mm: Some(to_mm((b.x_min - frame.left_x).abs())),
            from_right_wall_mm: None,
            baffle_z_m: b.z_max,
            from_front_wall_mm: to_mm((b.z_min - frame.front_z).abs()),
            tweeter_height_mm: to_mm(b.y_max - frame.floor_y),
            bottom_height_mm: to_mm(b.y_min - frame.floor_y),
            width_mm: to_mm(b.x_max - b.x_min),
            depth_mm: to_mm(b.z_max - b.z_min),
        });
    }

    if let Some(spk) = right_spk {
        let b = spk.bounds;
        m.right_speaker = Some(SpeakerMeasurements {
            from_left_wall_mm: None,
            from_right_wall_mm: Some(to_mm((frame.right_x - b.x_max).abs())),
            baffle_z_m: b.z_max,
            from_front_wall_mm: to_mm((b.z_min - frame.front_z).abs()),
            tweeter_height_mm: to_mm(b.y_max - frame.floor_y),
            bottom_height_mm: to_mm(b.y_min - frame.floor_y),
            width_mm: to_mm(b.x_max - b.x_min),
            depth_mm: to_mm(b.z_max - b.z_min),
        });
    }

    if let (Some(left), Some(right)) = (left_spk, right_spk) {
        m.speaker_distance_mm = Some(to_mm((right.bounds.x_min - left.bounds.x_max).abs()));
        m.speaker_center_distance_mm = Some(to_mm((right.centroid.x - left.centroid.x).abs()));
    }

    for (kind, slot) in [
        (RegionKind::LeftShelf, &mut m.left_shelf),
        (RegionKind::RightShelf, &mut m.right_shelf),
    ] {
        if let Some(shelf) = get(kind) {
            let b = shelf.bounds;
            *slot = Some(ShelfMeasurements {
                height_mm: to_mm(b.y_max - frame.floor_y),
                depth_mm: to_mm(b.z_max - b.z_min),
            });
        }
    }

    for (kind, slot) in [
        (RegionKind::LeftRack, &mut m.left_rack),
        (RegionKind::RightRack, &mut m.right_rack),
    ] {
        if let Some(rack) = get(kind) {
            let b = rack.bounds;
            *slot = Some(RackMeasurements {
                depth_mm: to_mm((b.z_max - frame.front_z).abs()),
                top_height_mm: to_mm(b.y_max - frame.floor_y),
            });
        }
    }

    if let Some(sofa) = get(RegionKind::SofaEstimated) {
        let sc = sofa.centroid;
        let from_speaker_center_mm = match (left_spk, right_spk) {
            (Some(left), Some(right)) => {
                let (lc, rc) = (left.centroid, right.centroid);
                let mid = Vertex::new((lc.x + rc.x) / 2.0, 0.0, (lc.z + rc.z) / 2.0);
                Some(to_mm(sc.planar_distance_to(&mid)))
            }
            _ => None,
        };
        m.listening_point = Some(ListeningPoint {
            from_front_wall_mm: to_mm((sc.z - frame.front_z).abs()),
            seat_height_mm: to_mm(sc.y - frame.floor_y),
            ear_height_estimated_mm: to_mm(sc.y - frame.floor_y + config.ear_offset),
            from_speaker_center_mm,
        });
    }

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegionStats;

    fn frame() -> RoomFrame {
        RoomFrame {
            floor_y: 0.0,
            ceiling_y: 2.5,
            front_z: 0.0,
            back_z: 5.0,
            left_x: 0.0,
            right_x: 4.0,
        }
    }

    fn box_region(kind: RegionKind, lo: Vertex, hi: Vertex) -> RegionStats {
        // Two corner points give exact bounds and a centroid at the middle
        RegionStats::from_points(kind, &[lo, hi], 30)
    }

    fn stub(kind: RegionKind) -> RegionStats {
        RegionStats::from_points(kind, &[], 30)
    }

    fn all_stubs() -> Vec<RegionStats> {
        RegionKind::ALL.iter().map(|&k| stub(k)).collect()
    }

    #[test]
    fn empty_regions_yield_no_measurements() {
        let m = derive(&all_stubs(), &frame(), &HeuristicConfig::default());
        assert_eq!(m, Measurements::default());
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "{}");
    }

    // Fixture coordinates are dyadic fractions so the asserted millimeter
    // values are exact rather than one off from binary representation.

    #[test]
    fn speaker_record_reads_bounds_against_the_frame() {
        let mut regions = all_stubs();
        regions[4] = box_region(
            RegionKind::LeftSpeaker,
            Vertex::new(0.125, 0.625, 0.25),
            Vertex::new(0.5, 1.25, 0.5),
        );
        let m = derive(&regions, &frame(), &HeuristicConfig::default());

        let spk = m.left_speaker.unwrap();
        assert_eq!(spk.from_left_wall_mm, Some(125));
        assert_eq!(spk.from_right_wall_mm, None);
        assert_eq!(spk.baffle_z_m, 0.5);
        assert_eq!(spk.from_front_wall_mm, 250);
        assert_eq!(spk.tweeter_height_mm, 1250);
        assert_eq!(spk.bottom_height_mm, 625);
        assert_eq!(spk.width_mm, 375);
        assert_eq!(spk.depth_mm, 250);
        // No right speaker: the pair measurements stay absent
        assert_eq!(m.speaker_distance_mm, None);
        assert_eq!(m.speaker_center_distance_mm, None);
    }

    #[test]
    fn speaker_pair_measurements_need_both_sides() {
        let mut regions = all_stubs();
        regions[4] = box_region(
            RegionKind::LeftSpeaker,
            Vertex::new(0.125, 0.625, 0.25),
            Vertex::new(0.5, 1.25, 0.5),
        );
        regions[5] = box_region(
            RegionKind::RightSpeaker,
            Vertex::new(3.5, 0.625, 0.25),
            Vertex::new(3.875, 1.25, 0.5),
        );
        let m = derive(&regions, &frame(), &HeuristicConfig::default());

        // Right x_min (3.5) minus left x_max (0.5)
        assert_eq!(m.speaker_distance_mm, Some(3000));
        // Centroids at x = 0.3125 and x = 3.6875
        assert_eq!(m.speaker_center_distance_mm, Some(3375));
        assert_eq!(m.right_speaker.unwrap().from_right_wall_mm, Some(125));
    }

    #[test]
    fn listening_point_without_speakers_omits_center_distance() {
        let mut regions = all_stubs();
        regions[8] = box_region(
            RegionKind::SofaEstimated,
            Vertex::new(1.0, 0.375, 3.75),
            Vertex::new(3.0, 0.625, 4.25),
        );
        let m = derive(&regions, &frame(), &HeuristicConfig::default());

        let lp = m.listening_point.unwrap();
        assert_eq!(lp.from_front_wall_mm, 4000);
        assert_eq!(lp.seat_height_mm, 500);
        assert_eq!(lp.ear_height_estimated_mm, 950);
        assert_eq!(lp.from_speaker_center_mm, None);
    }

    #[test]
    fn listening_point_distance_to_speaker_midpoint() {
        let mut regions = all_stubs();
        // Symmetric speakers: centroids (1.0, _, 0.5) and (3.0, _, 0.5),
        // midpoint (2.0, 0.5); sofa centroid (2.0, _, 4.5)
        regions[4] = box_region(
            RegionKind::LeftSpeaker,
            Vertex::new(0.875, 0.625, 0.375),
            Vertex::new(1.125, 1.0, 0.625),
        );
        regions[5] = box_region(
            RegionKind::RightSpeaker,
            Vertex::new(2.875, 0.625, 0.375),
            Vertex::new(3.125, 1.0, 0.625),
        );
        regions[8] = box_region(
            RegionKind::SofaEstimated,
            Vertex::new(1.875, 0.375, 4.375),
            Vertex::new(2.125, 0.625, 4.625),
        );
        let m = derive(&regions, &frame(), &HeuristicConfig::default());

        // Planar distance is purely along Z: 4.5 - 0.5 = 4.0 m
        let lp = m.listening_point.unwrap();
        assert_eq!(lp.from_speaker_center_mm, Some(4000));
    }

    #[test]
    fn shelf_and_rack_records_are_independently_guarded() {
        let mut regions = all_stubs();
        regions[2] = box_region(
            RegionKind::LeftShelf,
            Vertex::new(0.0625, 0.0, 0.0),
            Vertex::new(0.5625, 0.5625, 0.625),
        );
        regions[7] = box_region(
            RegionKind::RightRack,
            Vertex::new(3.375, 0.75, 0.0625),
            Vertex::new(3.875, 2.125, 0.25),
        );
        let m = derive(&regions, &frame(), &HeuristicConfig::default());

        let shelf = m.left_shelf.unwrap();
        // 0.5625 m truncates to 562 mm
        assert_eq!(shelf.height_mm, 562);
        assert_eq!(shelf.depth_mm, 625);
        assert!(m.right_shelf.is_none());

        let rack = m.right_rack.unwrap();
        assert_eq!(rack.depth_mm, 250);
        assert_eq!(rack.top_height_mm, 2125);
        assert!(m.left_rack.is_none());
    }
}
