//! Floor navigation for the room avatar.
//!
//! This module provides:
//! - Floor-plane geometry primitives
//! - The room layout (walls, furniture, floor regions)
//! - Segment collision checks and click validation
//! - Detour candidate generation and a bounded recursive waypoint search
//! - The path cursor a movement controller follows
//!
//! Everything here is synchronous and infallible: an impossible request
//! still yields a path, flagged through [`PathOutcome`].

mod collision;
mod config;
mod geometry;
mod layout;
mod path;
mod search;
mod walkable;
mod waypoints;

pub use collision::SegmentCollision;
pub use config::*;
pub use geometry::{
    distance_point_to_segment, point_in_circle, point_in_rotated_box, segments_proximate, Vec2,
};
pub use layout::{FloorRegion, Obstacle, ObstacleShape, RoomLayout, WallSegment};
pub use path::{chain_length, Path, PathOutcome, PathPoint};

/// Pathfinding queries over one room layout
#[derive(Debug, Clone)]
pub struct Navigator {
    layout: RoomLayout,
    config: NavConfig,
}

impl Navigator {
    pub fn new(layout: RoomLayout, config: NavConfig) -> Self {
        Self { layout, config }
    }

    /// Read-only view for debug overlays
    pub fn layout(&self) -> &RoomLayout {
        &self.layout
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(RoomLayout::gaming_room(), NavConfig::default())
    }
}
