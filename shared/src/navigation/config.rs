//! Navigation tunables.

use serde::{Deserialize, Serialize};

/// Extra clearance around every obstacle footprint
pub const SAFETY_MARGIN: f32 = 0.1;

/// Clearance between a path and any wall segment
pub const WALL_MARGIN: f32 = 0.5;

/// Inset applied to floor regions when validating clicks
pub const FLOOR_MARGIN: f32 = 0.4;

/// Inset applied to floor regions when snapping detour candidates
pub const SNAP_MARGIN: f32 = 0.5;

/// Distance added to an obstacle's half-extent for generated detours
pub const AVOIDANCE_CLEARANCE: f32 = 2.0;

/// Maximum recursion depth of the waypoint search
pub const MAX_SEARCH_DEPTH: usize = 5;

/// Open-area fallback waypoints are only tried above this depth
pub const FALLBACK_MAX_DEPTH: usize = 2;

/// Upper bound on candidates expanded from a single search node
pub const MAX_CANDIDATES_PER_NODE: usize = 12;

/// Segment-vs-box sampling never uses fewer points than this
pub const BOX_SAMPLES_MIN: usize = 10;

/// Segment-vs-box sampling density
pub const BOX_SAMPLES_PER_UNIT: f32 = 5.0;

/// Pathfinding settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub safety_margin: f32,
    pub wall_margin: f32,
    pub floor_margin: f32,
    pub snap_margin: f32,
    pub avoidance_clearance: f32,
    pub max_depth: usize,
    pub fallback_max_depth: usize,
    pub max_candidates_per_node: usize,
    pub box_samples_min: usize,
    pub box_samples_per_unit: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            safety_margin: SAFETY_MARGIN,
            wall_margin: WALL_MARGIN,
            floor_margin: FLOOR_MARGIN,
            snap_margin: SNAP_MARGIN,
            avoidance_clearance: AVOIDANCE_CLEARANCE,
            max_depth: MAX_SEARCH_DEPTH,
            fallback_max_depth: FALLBACK_MAX_DEPTH,
            max_candidates_per_node: MAX_CANDIDATES_PER_NODE,
            box_samples_min: BOX_SAMPLES_MIN,
            box_samples_per_unit: BOX_SAMPLES_PER_UNIT,
        }
    }
}

impl NavConfig {
    /// Number of sampling steps for a segment of the given length.
    ///
    /// A segment sampled with `n` steps is tested at `n + 1` points,
    /// both endpoints included.
    pub fn box_sample_steps(&self, segment_length: f32) -> usize {
        let by_length = (segment_length * self.box_samples_per_unit).ceil() as usize;
        by_length.max(self.box_samples_min).max(1)
    }
}
