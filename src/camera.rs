// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera placements for the external render tool
//!
//! The renderer consumes the same raw scan plus this fixed, named set of 16
//! placements (one top-down, four corner obliques, four wall-facing views,
//! two axis elevations, four interior wide-angle views, one floor close-up)
//! and emits one image per placement. It has no data dependency on the
//! segmentation output; only the room frame feeds the placement geometry.
//!
//! The placement names are part of the output-file naming contract and stay
//! fixed, including `11_elevation_y`, which is named for the render tool's
//! up-axis convention rather than this crate's Y-up scan frame.

use crate::types::{RoomFrame, Vertex};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One named camera placement in scan coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPlacement {
    pub name: String,
    pub eye: Vertex,
    pub target: Vertex,
    /// Focal length hint for the renderer
    pub lens_mm: f64,
}

fn placement(name: &str, eye: Vector3<f64>, target: Vector3<f64>, lens_mm: f64) -> CameraPlacement {
    CameraPlacement {
        name: name.to_string(),
        eye: Vertex::new(eye.x, eye.y, eye.z),
        target: Vertex::new(target.x, target.y, target.z),
        lens_mm,
    }
}

/// Build the fixed set of 16 placements around and inside the room frame
pub fn placements(frame: &RoomFrame) -> Vec<CameraPlacement> {
    let c = frame.center();
    let center = Vector3::new(c.x, c.y, c.z);
    let extents = Vector3::new(frame.width(), frame.height(), frame.depth());
    let max_dim = extents.x.max(extents.y).max(extents.z);

    let mut views = Vec::with_capacity(16);

    // Top-down overview
    views.push(placement(
        "01_top",
        center + Vector3::new(0.0, 2.0 * max_dim, 0.0),
        center,
        35.0,
    ));

    // Oblique views from above the four corners
    let corners: [(&str, Vector3<f64>); 4] = [
        ("02_corner_pp", Vector3::new(1.0, 1.0, 1.0)),
        ("03_corner_pn", Vector3::new(1.0, 1.0, -1.0)),
        ("04_corner_np", Vector3::new(-1.0, 1.0, 1.0)),
        ("05_corner_nn", Vector3::new(-1.0, 1.0, -1.0)),
    ];
    for (name, direction) in corners {
        views.push(placement(name, center + direction * 0.8 * max_dim, center, 50.0));
    }

    // Head-on views of the four walls, at mid height
    let walls: [(&str, Vector3<f64>); 4] = [
        ("06_wall_front", Vector3::new(0.0, 0.0, -1.0)),
        ("07_wall_back", Vector3::new(0.0, 0.0, 1.0)),
        ("08_wall_left", Vector3::new(1.0, 0.0, 0.0)),
        ("09_wall_right", Vector3::new(-1.0, 0.0, 0.0)),
    ];
    for (name, direction) in walls {
        let mut eye = center + direction * 1.2 * max_dim;
        eye.y = center.y;
        views.push(placement(name, eye, center, 50.0));
    }

    // Axis elevations
    views.push(placement(
        "10_elevation_x",
        center + Vector3::new(2.0 * max_dim, 0.0, 0.0),
        center,
        35.0,
    ));
    views.push(placement(
        "11_elevation_y",
        center + Vector3::new(0.0, 0.0, 2.0 * max_dim),
        center,
        35.0,
    ));

    // Wide-angle interior views from offset standpoints at mid height
    let interior: [(&str, Vector3<f64>, Vector3<f64>); 4] = [
        (
            "12_internal_to_front",
            Vector3::new(0.0, 0.0, 0.3),
            Vector3::new(0.0, 0.0, -1.0),
        ),
        (
            "13_internal_to_back",
            Vector3::new(0.0, 0.0, -0.3),
            Vector3::new(0.0, 0.0, 1.0),
        ),
        (
            "14_internal_to_left",
            Vector3::new(0.3, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
        ),
        (
            "15_internal_to_right",
            Vector3::new(-0.3, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        ),
    ];
    for (name, offset, look) in interior {
        let mut eye = center + offset.component_mul(&extents);
        eye.y = center.y;
        views.push(placement(name, eye, eye + look, 28.0));
    }

    // Floor close-up from an upper corner offset
    let eye = center + extents * 0.3;
    let floor_target = Vector3::new(center.x, frame.floor_y, center.z);
    views.push(placement("16_floor", eye, floor_target, 50.0));

    views
}
