//! Segment collision queries against the room layout.

use log::trace;

use super::geometry::{distance_point_to_segment, segments_proximate, Vec2};
use super::layout::ObstacleShape;
use super::Navigator;

/// What, if anything, blocks a straight segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentCollision {
    Clear,
    /// Index into the layout's walls
    Wall(usize),
    /// Index into the layout's obstacles
    Obstacle(usize),
}

impl SegmentCollision {
    pub fn is_blocked(&self) -> bool {
        !matches!(self, SegmentCollision::Clear)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, SegmentCollision::Clear)
    }

    pub fn obstacle_index(&self) -> Option<usize> {
        match self {
            SegmentCollision::Obstacle(index) => Some(*index),
            _ => None,
        }
    }
}

impl Navigator {
    /// First thing blocking the straight walk from `start` to `end`.
    ///
    /// Walls are checked before obstacles; obstacles in registration
    /// order. Only the first hit is reported.
    pub fn check_segment_collision(&self, start: Vec2, end: Vec2) -> SegmentCollision {
        let margin = self.config.wall_margin;
        for (index, wall) in self.layout.walls.iter().enumerate() {
            if segments_proximate(start, end, wall.start, wall.end, margin) {
                trace!(
                    "[COLLISION] ({:.2}, {:.2})->({:.2}, {:.2}) too close to wall {}",
                    start.x, start.z, end.x, end.z, index
                );
                return SegmentCollision::Wall(index);
            }
        }

        for (index, obstacle) in self.layout.obstacles.iter().enumerate() {
            let hit = match obstacle.shape {
                ObstacleShape::Circle { center, radius } => {
                    self.segment_hits_circle(start, end, center, radius)
                }
                ObstacleShape::Box { .. } => self.segment_hits_box(start, end, |p| {
                    obstacle.contains(p, self.config.safety_margin)
                }),
            };

            if hit {
                trace!(
                    "[COLLISION] ({:.2}, {:.2})->({:.2}, {:.2}) hits '{}'",
                    start.x, start.z, end.x, end.z, obstacle.name
                );
                return SegmentCollision::Obstacle(index);
            }
        }

        SegmentCollision::Clear
    }

    /// Whether `point` sits inside any obstacle inflated by the safety margin
    pub fn point_in_obstacle(&self, point: Vec2) -> bool {
        let margin = self.config.safety_margin;
        self.layout.obstacles.iter().any(|o| o.contains(point, margin))
    }

    /// Whether every leg of `start -> waypoints... -> end` is clear
    pub fn is_chain_clear(&self, start: Vec2, waypoints: &[Vec2], end: Vec2) -> bool {
        let mut current = start;
        for &next in waypoints.iter().chain(std::iter::once(&end)) {
            if self.check_segment_collision(current, next).is_blocked() {
                return false;
            }
            current = next;
        }
        true
    }

    fn segment_hits_circle(&self, start: Vec2, end: Vec2, center: Vec2, radius: f32) -> bool {
        let along = end - start;
        let length = along.length();
        let projection = (center - start).dot(along.normalized());

        // Circles entirely behind or beyond the segment are skipped
        if projection < 0.0 || projection > length {
            return false;
        }

        distance_point_to_segment(center, start, end) < radius + self.config.safety_margin
    }

    fn segment_hits_box(&self, start: Vec2, end: Vec2, contains: impl Fn(Vec2) -> bool) -> bool {
        let steps = self.config.box_sample_steps(start.distance_to(end));
        (0..=steps).any(|i| contains(start.lerp(end, i as f32 / steps as f32)))
    }
}
