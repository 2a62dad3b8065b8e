// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostic views of the cloud: axis histograms, cluster bins, the
//! horizontal density grid and horizontal slices
//!
//! Everything here is informational output for external plotting and
//! inspection; segmentation and measurement never read it.

use crate::types::{sample_evenly, Axis, HeuristicConfig, RoomFrame, Vertex};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One histogram bin: center value of the bin and its point count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub center: f64,
    pub count: usize,
}

/// Histogram of one axis over equal-width bins spanning the axis extrema
///
/// The rightmost bin is closed, so the maximum value lands in it rather
/// than falling off the end. All bins are reported, including empty ones.
pub fn axis_histogram(cloud: &[Vertex], axis: Axis, bins: usize) -> Vec<HistogramBin> {
    if cloud.is_empty() || bins == 0 {
        return Vec::new();
    }
    let values: Vec<f64> = cloud.iter().map(|v| v.axis(axis)).collect();
    let mut lo = values.iter().copied().fold(f64::MAX, f64::min);
    let mut hi = values.iter().copied().fold(f64::MIN, f64::max);
    if lo == hi {
        // Degenerate axis: widen to a unit range around the single value
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for value in &values {
        let idx = (((value - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            center: lo + (i as f64 + 0.5) * width,
            count,
        })
        .collect()
}

/// Bins whose count exceeds `fraction` of the total point count
///
/// Flags dense value bands along one axis (walls, large furniture faces).
/// Diagnostic only; nothing downstream consumes it.
pub fn detect_clusters(
    cloud: &[Vertex],
    axis: Axis,
    bins: usize,
    fraction: f64,
) -> Vec<HistogramBin> {
    let threshold = cloud.len() as f64 * fraction;
    axis_histogram(cloud, axis, bins)
        .into_iter()
        .filter(|bin| bin.count as f64 > threshold)
        .collect()
}

/// One occupied cell of the horizontal density grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityCell {
    /// Cell center
    pub x_m: f64,
    pub z_m: f64,
    pub count: usize,
}

/// Occupancy grid over the (x, z) plane, anchored at the left/front walls
///
/// Only non-empty cells are reported, ordered by x index then z index.
pub fn density_grid(cloud: &[Vertex], frame: &RoomFrame, cell_size: f64) -> Vec<DensityCell> {
    let mut cells: FxHashMap<(i64, i64), usize> = FxHashMap::default();
    for v in cloud {
        let ix = ((v.x - frame.left_x) / cell_size).floor() as i64;
        let iz = ((v.z - frame.front_z) / cell_size).floor() as i64;
        *cells.entry((ix, iz)).or_insert(0) += 1;
    }

    let mut occupied: Vec<((i64, i64), usize)> = cells.into_iter().collect();
    occupied.sort_unstable_by_key(|&(key, _)| key);
    occupied
        .into_iter()
        .map(|((ix, iz), count)| DensityCell {
            x_m: frame.left_x + (ix as f64 + 0.5) * cell_size,
            z_m: frame.front_z + (iz as f64 + 0.5) * cell_size,
            count,
        })
        .collect()
}

/// A sampled point of a horizontal slice, projected onto the floor plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x_m: f64,
    pub z_m: f64,
}

/// Points within a thin horizontal band at a fixed height above the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalSlice {
    pub vertex_count: usize,
    pub x_range_m: [f64; 2],
    pub z_range_m: [f64; 2],
    pub sample_points: Vec<PlanarPoint>,
}

/// Extract the configured horizontal slices, keyed like `"0.5m_from_floor"`
///
/// Heights with no matching points are omitted entirely.
pub fn horizontal_slices(
    cloud: &[Vertex],
    frame: &RoomFrame,
    config: &HeuristicConfig,
) -> BTreeMap<String, HorizontalSlice> {
    let mut slices = BTreeMap::new();
    for &height in &config.slice_heights {
        let slice_y = frame.floor_y + height;
        let matched: Vec<Vertex> = cloud
            .iter()
            .copied()
            .filter(|v| v.y > slice_y - config.slice_band && v.y < slice_y + config.slice_band)
            .collect();
        if matched.is_empty() {
            continue;
        }

        let x_lo = matched.iter().map(|v| v.x).fold(f64::MAX, f64::min);
        let x_hi = matched.iter().map(|v| v.x).fold(f64::MIN, f64::max);
        let z_lo = matched.iter().map(|v| v.z).fold(f64::MAX, f64::min);
        let z_hi = matched.iter().map(|v| v.z).fold(f64::MIN, f64::max);
        let sample_points = sample_evenly(&matched, config.slice_sample_cap)
            .into_iter()
            .map(|v| PlanarPoint { x_m: v.x, z_m: v.z })
            .collect();

        slices.insert(
            format!("{:.1}m_from_floor", height),
            HorizontalSlice {
                vertex_count: matched.len(),
                x_range_m: [x_lo, x_hi],
                z_range_m: [z_lo, z_hi],
                sample_points,
            },
        );
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_cloud(n: usize) -> Vec<Vertex> {
        (0..n)
            .map(|i| Vertex::new(i as f64 / (n - 1) as f64, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn histogram_covers_extrema_and_closes_last_bin() {
        let cloud = line_cloud(10);
        let bins = axis_histogram(&cloud, Axis::X, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 10);
        // x = 1.0 is the axis maximum and must land in the last bin
        assert!(bins[4].count > 0);
        assert_relative_eq!(bins[0].center, 0.1);
        assert_relative_eq!(bins[4].center, 0.9);
    }

    #[test]
    fn histogram_of_constant_axis_widens_the_range() {
        let cloud = vec![Vertex::new(2.0, 1.0, 1.0); 4];
        let bins = axis_histogram(&cloud, Axis::X, 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
        assert!(bins.iter().all(|b| b.center > 1.5 && b.center < 2.5));
    }

    #[test]
    fn clusters_require_one_percent_of_points() {
        // 200 points at x=0, 1 point at x=1: only the dense bin qualifies
        let mut cloud = vec![Vertex::new(0.0, 0.0, 0.0); 200];
        cloud.push(Vertex::new(1.0, 0.0, 0.0));
        let clusters = detect_clusters(&cloud, Axis::X, 50, 0.01);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count, 200);
    }

    #[test]
    fn density_grid_counts_cells_in_xz_order() {
        let cloud = vec![
            Vertex::new(0.05, 0.0, 0.05),
            Vertex::new(0.07, 1.0, 0.02),
            Vertex::new(0.25, 0.0, 0.05),
        ];
        let frame = RoomFrame::from_cloud(&cloud).unwrap();
        let cells = density_grid(&cloud, &frame, 0.1);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].count, 2);
        assert_eq!(cells[1].count, 1);
        assert!(cells[0].x_m < cells[1].x_m);
        // Anchored at the left/front extrema of the cloud itself
        assert_relative_eq!(cells[0].x_m, 0.05 + 0.05);
        assert_relative_eq!(cells[0].z_m, 0.02 + 0.05);
    }

    #[test]
    fn slices_report_matched_bands_and_omit_empty_ones() {
        let mut cloud = vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(2.0, 2.4, 3.0)];
        // Band around floor + 1.0 m
        cloud.push(Vertex::new(0.5, 0.98, 1.0));
        cloud.push(Vertex::new(1.5, 1.03, 2.0));
        let frame = RoomFrame::from_cloud(&cloud).unwrap();
        let slices = horizontal_slices(&cloud, &frame, &HeuristicConfig::default());

        assert_eq!(slices.len(), 1);
        let slice = &slices["1.0m_from_floor"];
        assert_eq!(slice.vertex_count, 2);
        assert_eq!(slice.x_range_m, [0.5, 1.5]);
        assert_eq!(slice.z_range_m, [1.0, 2.0]);
        assert_eq!(slice.sample_points.len(), 2);
    }

    #[test]
    fn slice_band_edges_are_exclusive() {
        let cloud = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(0.0, 2.0, 0.0),
            // Exactly on the band edge of the 0.5 m slice
            Vertex::new(0.0, 0.55, 0.0),
        ];
        let frame = RoomFrame::from_cloud(&cloud).unwrap();
        let slices = horizontal_slices(&cloud, &frame, &HeuristicConfig::default());
        assert!(!slices.contains_key("0.5m_from_floor"));
    }
}
