// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pipeline tests over a synthetic listening room
//!
//! The fixture room is 4.0 m wide, 2.5 m high and 5.0 m deep with its frame
//! pinned by two corner points. Furniture clusters are placed inside the
//! default heuristic boxes so the region predicates are exercised with known
//! centroids and bounds.

use approx::assert_relative_eq;
use room_scan::{analyze_cloud, parse_obj_vertices, HeuristicConfig, ScanError, Vertex};

/// Corner points pinning the frame to (0,0,0)..(4,2.5,5)
fn corners() -> Vec<Vertex> {
    vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(4.0, 2.5, 5.0)]
}

/// Cloud with both speakers and a sofa at exactly known centroids
///
/// Coordinates are dyadic fractions so every derived bound, centroid and
/// millimeter value is exact in binary floating point.
fn furnished_room() -> Vec<Vertex> {
    let mut cloud = corners();
    // Left speaker cabinet, centroid (0.3125, 0.875, 0.4375)
    cloud.push(Vertex::new(0.25, 0.75, 0.375));
    cloud.push(Vertex::new(0.375, 1.0, 0.5));
    // Right speaker cabinet, centroid (3.5625, 0.875, 0.4375)
    cloud.push(Vertex::new(3.5, 0.75, 0.375));
    cloud.push(Vertex::new(3.625, 1.0, 0.5));
    // Sofa seat, centroid (2.0, 0.5, 4.0)
    cloud.push(Vertex::new(1.75, 0.375, 4.0));
    cloud.push(Vertex::new(2.0, 0.5, 4.0));
    cloud.push(Vertex::new(2.25, 0.625, 4.0));
    cloud
}

#[test]
fn furnished_room_yields_speaker_and_listening_measurements() {
    let doc = analyze_cloud(&furnished_room(), &HeuristicConfig::default()).unwrap();

    assert_eq!(doc.room.dimensions_mm.width_x, 4000);
    assert_eq!(doc.room.dimensions_mm.height_y, 2500);
    assert_eq!(doc.room.dimensions_mm.depth_z, 5000);

    let m = &doc.measurements;
    let left = m.left_speaker.as_ref().unwrap();
    assert_eq!(left.from_left_wall_mm, Some(250));
    assert_eq!(left.from_front_wall_mm, 375);
    assert_eq!(left.tweeter_height_mm, 1000);
    assert_eq!(left.bottom_height_mm, 750);
    assert_eq!(left.width_mm, 125);
    assert_eq!(left.depth_mm, 125);
    assert_relative_eq!(left.baffle_z_m, 0.5);

    let right = m.right_speaker.as_ref().unwrap();
    assert_eq!(right.from_right_wall_mm, Some(375));

    // Right cabinet near edge (3.5) minus left far edge (0.375)
    assert_eq!(m.speaker_distance_mm, Some(3125));
    // Centroid X difference: 3.5625 - 0.3125
    assert_eq!(m.speaker_center_distance_mm, Some(3250));
}

#[test]
fn listening_point_matches_planar_midpoint_distance() {
    let doc = analyze_cloud(&furnished_room(), &HeuristicConfig::default()).unwrap();
    let lp = doc.measurements.listening_point.as_ref().unwrap();

    assert_eq!(lp.from_front_wall_mm, 4000);
    assert_eq!(lp.seat_height_mm, 500);
    assert_eq!(lp.ear_height_estimated_mm, 950);

    // Speaker centroid midpoint is (1.9375, 0.4375); sofa centroid
    // (2.0, 4.0) in the (x, z) plane: sqrt(0.0625^2 + 3.5625^2) = 3.56304...
    assert_eq!(lp.from_speaker_center_mm, Some(3563));
}

#[test]
fn bare_room_omits_every_furniture_measurement() {
    let doc = analyze_cloud(&corners(), &HeuristicConfig::default()).unwrap();

    let m = &doc.measurements;
    assert!(m.left_speaker.is_none());
    assert!(m.right_speaker.is_none());
    assert!(m.speaker_distance_mm.is_none());
    assert!(m.left_shelf.is_none());
    assert!(m.right_rack.is_none());
    assert!(m.listening_point.is_none());

    // All eleven regions are still reported, most as stubs
    assert_eq!(doc.regions.len(), 11);
    let stubs = doc.regions.iter().filter(|r| r.vertex_count == 0).count();
    assert!(stubs >= 7);
}

#[test]
fn identical_input_produces_identical_documents() {
    let cloud = furnished_room();
    let config = HeuristicConfig::default();
    let a = serde_json::to_string(&analyze_cloud(&cloud, &config).unwrap()).unwrap();
    let b = serde_json::to_string(&analyze_cloud(&cloud, &config).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn widened_margin_never_loses_speaker_points() {
    let cloud = furnished_room();
    let narrow = HeuristicConfig::default();
    let mut wide = HeuristicConfig::default();
    wide.speaker_margin += 0.1;

    let count = |cfg: &HeuristicConfig| {
        analyze_cloud(&cloud, cfg)
            .unwrap()
            .regions
            .iter()
            .find(|r| r.name == "left_speaker")
            .unwrap()
            .vertex_count
    };
    assert!(count(&wide) >= count(&narrow));
}

#[test]
fn obj_source_feeds_the_same_analysis() {
    let cloud = furnished_room();
    let mut obj = String::from("# synthetic scan\no room\n");
    for v in &cloud {
        obj.push_str(&format!("v {} {} {}\n", v.x, v.y, v.z));
    }
    obj.push_str("v broken line here\nf 1 2 3\n");

    let parsed = parse_obj_vertices(&obj).unwrap();
    assert_eq!(parsed.len(), cloud.len());

    let from_obj = analyze_cloud(&parsed, &HeuristicConfig::default()).unwrap();
    let direct = analyze_cloud(&cloud, &HeuristicConfig::default()).unwrap();
    assert_eq!(
        serde_json::to_string(&from_obj).unwrap(),
        serde_json::to_string(&direct).unwrap()
    );
}

#[test]
fn vertex_free_source_is_the_only_fatal_input() {
    assert!(matches!(
        parse_obj_vertices("o empty\nf 1 2 3\n"),
        Err(ScanError::EmptyCloud)
    ));
}

#[test]
fn diagnostics_cover_the_whole_cloud() {
    let cloud = furnished_room();
    let doc = analyze_cloud(&cloud, &HeuristicConfig::default()).unwrap();
    let detailed = &doc.detailed_data;

    let grid_total: usize = detailed
        .xz_density_map_10cm_grid
        .iter()
        .map(|c| c.count)
        .sum();
    assert_eq!(grid_total, cloud.len());

    let hist_total: usize = detailed.x_histogram.iter().map(|b| b.count).sum();
    assert_eq!(hist_total, cloud.len());
    assert_eq!(detailed.x_histogram.len(), 30);
    assert_eq!(detailed.y_histogram.len(), 30);
    assert_eq!(detailed.z_histogram.len(), 40);

    // Only the top sofa point clears the exclusive lower edge of the
    // 0.5 m band (0.45, 0.55)
    let slice = &detailed.horizontal_slices["0.5m_from_floor"];
    assert_eq!(slice.vertex_count, 1);
    assert_eq!(slice.z_range_m, [4.0, 4.0]);

    // Both speaker tops sit in the 1.0 m band
    let slice = &detailed.horizontal_slices["1.0m_from_floor"];
    assert_eq!(slice.vertex_count, 2);
    assert_eq!(slice.x_range_m, [0.375, 3.625]);
}
