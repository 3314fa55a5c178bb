//! Static room layout: walls, furniture footprints and floor regions.
//!
//! The compiled-in [`RoomLayout::gaming_room`] mirrors the 3D scene. If a
//! piece of furniture moves in the scene it has to move here too.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use super::geometry::{point_in_circle, point_in_rotated_box, Vec2};

/// An infinitely thin room boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl WallSegment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

/// Footprint of a piece of furniture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Box rotated about the vertical axis; `width` is local x, `depth` local z
    Box {
        center: Vec2,
        width: f32,
        depth: f32,
        rotation: f32,
    },
    Circle { center: Vec2, radius: f32 },
}

/// A named obstacle with optional hand-placed detour points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub name: String,
    pub shape: ObstacleShape,
    /// Open-floor points known to route well around this obstacle
    pub detour_hints: Vec<Vec2>,
}

impl Obstacle {
    pub fn boxed(name: &str, center: Vec2, width: f32, depth: f32, rotation: f32) -> Self {
        Self {
            name: name.to_string(),
            shape: ObstacleShape::Box { center, width, depth, rotation },
            detour_hints: Vec::new(),
        }
    }

    pub fn circle(name: &str, center: Vec2, radius: f32) -> Self {
        Self {
            name: name.to_string(),
            shape: ObstacleShape::Circle { center, radius },
            detour_hints: Vec::new(),
        }
    }

    pub fn with_hints(mut self, hints: &[Vec2]) -> Self {
        self.detour_hints = hints.to_vec();
        self
    }

    pub fn center(&self) -> Vec2 {
        match self.shape {
            ObstacleShape::Box { center, .. } => center,
            ObstacleShape::Circle { center, .. } => center,
        }
    }

    /// Radius for circles, half the larger side for boxes
    pub fn half_extent(&self) -> f32 {
        match self.shape {
            ObstacleShape::Box { width, depth, .. } => width.max(depth) / 2.0,
            ObstacleShape::Circle { radius, .. } => radius,
        }
    }

    /// Whether `point` lies inside the footprint inflated by `margin`
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        match self.shape {
            ObstacleShape::Box { center, width, depth, rotation } => {
                point_in_rotated_box(point, center, width, depth, rotation, margin)
            }
            ObstacleShape::Circle { center, radius } => {
                point_in_circle(point, center, radius, margin)
            }
        }
    }
}

/// Axis-aligned walkable floor rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl FloorRegion {
    /// Create a region from two opposite corners in any order
    pub fn from_corners(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Self {
        Self {
            min: Vec2::new(min_x.min(max_x), min_z.min(max_z)),
            max: Vec2::new(min_x.max(max_x), min_z.max(max_z)),
        }
    }

    pub fn contains_inset(&self, point: Vec2, inset: f32) -> bool {
        point.x >= self.min.x + inset
            && point.x <= self.max.x - inset
            && point.z >= self.min.z + inset
            && point.z <= self.max.z - inset
    }

    /// Nearest point of the inset rectangle.
    ///
    /// An inset wider than the region collapses that axis to its midline.
    pub fn clamp_inset(&self, point: Vec2, inset: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(point.x, self.min.x + inset, self.max.x - inset),
            clamp_axis(point.z, self.min.z + inset, self.max.z - inset),
        )
    }
}

fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        value.clamp(lo, hi)
    }
}

/// Everything the pathfinder knows about a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLayout {
    pub walls: Vec<WallSegment>,
    /// Registration order is collision priority
    pub obstacles: Vec<Obstacle>,
    pub floor_regions: Vec<FloorRegion>,
    /// Doorway and corner points tried when a wall blocks the way
    pub corner_waypoints: Vec<Vec2>,
    /// Known open spots tried when nothing else works
    pub open_area_waypoints: Vec<Vec2>,
}

impl RoomLayout {
    /// A room with nothing in it but one floor region
    pub fn open_floor(region: FloorRegion) -> Self {
        Self {
            walls: Vec::new(),
            obstacles: Vec::new(),
            floor_regions: vec![region],
            corner_waypoints: Vec::new(),
            open_area_waypoints: Vec::new(),
        }
    }

    /// The L-shaped gaming room: PC corner on the left, living area on the right
    pub fn gaming_room() -> Self {
        let walls = vec![
            // PC section, left wall
            WallSegment::new(Vec2::new(-3.6, -4.39), Vec2::new(-3.6, -9.01)),
            // Back wall
            WallSegment::new(Vec2::new(-3.7, -9.0), Vec2::new(5.3, -9.0)),
            // Right wall
            WallSegment::new(Vec2::new(5.2, 0.0), Vec2::new(5.2, -9.0)),
            // Front wall of the living area
            WallSegment::new(Vec2::new(-1.675, 0.0), Vec2::new(5.475, 0.0)),
            // Inner partition, vertical then horizontal
            WallSegment::new(Vec2::new(-1.6, 0.0), Vec2::new(-1.6, -4.5)),
            WallSegment::new(Vec2::new(-3.5, -4.5), Vec2::new(-1.5, -4.5)),
        ];

        let tv_area_hints = [Vec2::new(1.9, -1.5), Vec2::new(0.5, -1.0), Vec2::new(4.0, -1.0)];

        let obstacles = vec![
            // The partition walls again as solid boxes, so crossings mid-wall are caught
            Obstacle::boxed("inner wall (vertical)", Vec2::new(-1.6, -2.25), 0.2, 4.5, 0.0),
            Obstacle::boxed("inner wall (horizontal)", Vec2::new(-2.5, -4.5), 2.0, 0.2, 0.0),
            // Desk runs along the left wall
            Obstacle::boxed("pc desk", Vec2::new(-3.4, -6.425), 4.5, 0.5, FRAC_PI_2)
                .with_hints(&[
                    Vec2::new(-1.5, -6.5),
                    Vec2::new(-3.0, -5.0),
                    Vec2::new(-1.5, -8.0),
                ]),
            Obstacle::boxed("gaming chair", Vec2::new(-0.8, -6.7), 1.0, 1.0, FRAC_PI_2)
                .with_hints(&[
                    Vec2::new(-0.3, -6.5),
                    Vec2::new(-0.8, -5.5),
                    Vec2::new(-0.8, -7.5),
                ]),
            Obstacle::boxed("tv stand", Vec2::new(2.0, -0.3), 0.6, 2.5, FRAC_PI_2).with_hints(&[
                Vec2::new(1.9, -1.5),
                Vec2::new(0.5, -0.5),
                Vec2::new(3.5, -0.5),
                Vec2::new(1.5, -2.5),
            ]),
            Obstacle::boxed("couch", Vec2::new(2.0, -3.0), 1.3, 3.0, -FRAC_PI_2).with_hints(&[
                Vec2::new(0.5, -3.0),
                Vec2::new(3.5, -3.0),
                Vec2::new(2.0, -4.5),
                Vec2::new(1.5, -2.0),
            ]),
            Obstacle::boxed("coffee table", Vec2::new(2.1, -1.55), 0.7, 0.5, 0.0).with_hints(&[
                Vec2::new(2.6, -1.2),
                Vec2::new(1.5, -1.5),
                Vec2::new(2.7, -1.5),
                Vec2::new(2.1, -2.2),
            ]),
            Obstacle::boxed("bed", Vec2::new(4.0, -6.8), 3.0, 2.6, -PI).with_hints(&[
                Vec2::new(2.5, -6.8),
                Vec2::new(5.0, -6.8),
                Vec2::new(4.0, -5.0),
                Vec2::new(4.0, -8.2),
            ]),
            Obstacle::circle("air purifier", Vec2::new(-1.0, -4.0), 0.3),
            Obstacle::circle("left speaker", Vec2::new(0.3, -0.3), 0.25)
                .with_hints(&tv_area_hints),
            Obstacle::circle("right speaker", Vec2::new(3.5, -0.3), 0.25)
                .with_hints(&tv_area_hints),
            Obstacle::circle("robot sweeper", Vec2::new(1.3, -8.2), 0.25).with_hints(&[
                Vec2::new(1.4, -7.5),
                Vec2::new(0.8, -8.2),
                Vec2::new(1.8, -8.2),
            ]),
        ];

        let floor_regions = vec![
            // PC section
            FloorRegion::from_corners(-3.5, -9.0, -1.5, 0.0),
            // Living section
            FloorRegion::from_corners(-1.5, -9.0, 5.3, 0.0),
        ];

        let corner_waypoints = vec![
            Vec2::new(-2.0, -4.5),
            Vec2::new(-2.0, -1.5),
            Vec2::new(-2.5, -6.0),
            Vec2::new(0.5, -4.5),
            Vec2::new(-2.5, -5.0),
            Vec2::new(1.5, -4.0),
        ];

        let open_area_waypoints = vec![
            Vec2::new(-3.0, -5.0),
            Vec2::new(-1.5, -6.5),
            Vec2::new(1.5, -6.0),
            Vec2::new(2.5, -5.0),
            Vec2::new(1.9, -1.5),
            Vec2::new(0.5, -2.5),
            Vec2::new(1.4, -7.5),
        ];

        Self {
            walls,
            obstacles,
            floor_regions,
            corner_waypoints,
            open_area_waypoints,
        }
    }
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self::gaming_room()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaming_room_counts() {
        let room = RoomLayout::gaming_room();
        assert_eq!(room.walls.len(), 6);
        assert_eq!(room.obstacles.len(), 12);
        assert_eq!(room.floor_regions.len(), 2);
    }

    #[test]
    fn test_obstacle_half_extent() {
        let table = Obstacle::boxed("table", Vec2::ZERO, 0.7, 0.5, 0.0);
        assert!((table.half_extent() - 0.35).abs() < 1e-6);

        let speaker = Obstacle::circle("speaker", Vec2::ZERO, 0.25);
        assert!((speaker.half_extent() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_coffee_table_contains() {
        let room = RoomLayout::gaming_room();
        let table = room
            .obstacles
            .iter()
            .find(|o| o.name == "coffee table")
            .expect("coffee table registered");

        assert!(table.contains(Vec2::new(2.1, -1.55), 0.0));
        // 0.05 outside the nominal edge, still within the margin
        assert!(table.contains(Vec2::new(2.5, -1.55), 0.1));
        assert!(!table.contains(Vec2::new(2.5, -1.55), 0.0));
    }

    #[test]
    fn test_floor_region_inset() {
        let region = FloorRegion::from_corners(-1.5, 0.0, 5.3, -9.0);
        assert_eq!(region.min, Vec2::new(-1.5, -9.0));

        assert!(region.contains_inset(Vec2::new(0.0, -4.0), 0.4));
        assert!(!region.contains_inset(Vec2::new(0.0, -0.2), 0.4));

        let clamped = region.clamp_inset(Vec2::new(10.0, 3.0), 0.5);
        assert!((clamped.x - 4.8).abs() < 1e-5);
        assert!((clamped.z + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_inset_collapses_narrow_region() {
        let strip = FloorRegion::from_corners(0.0, 0.0, 0.6, 10.0);
        let clamped = strip.clamp_inset(Vec2::new(5.0, 5.0), 0.5);
        assert!((clamped.x - 0.3).abs() < 1e-5);
        assert!((clamped.z - 5.0).abs() < 1e-5);
    }
}
