//! Detour candidates for a blocked segment.

use log::debug;

use super::collision::SegmentCollision;
use super::geometry::Vec2;
use super::layout::ObstacleShape;
use super::Navigator;

impl Navigator {
    /// Intermediate points worth routing through when `start -> end` is blocked.
    ///
    /// A wall hit only considers the layout's corner waypoints. An obstacle
    /// hit considers that obstacle's detour hints, two points beside it
    /// perpendicular to the walk, and for boxes four points off its
    /// corners. Every returned point has a clear leg from `start` and a
    /// clear leg to `end`. Duplicates are possible.
    pub fn avoidance_candidates(
        &self,
        start: Vec2,
        end: Vec2,
        collision: SegmentCollision,
    ) -> Vec<Vec2> {
        let mut candidates = match collision {
            SegmentCollision::Clear => Vec::new(),
            SegmentCollision::Wall(_) => self
                .layout
                .corner_waypoints
                .iter()
                .copied()
                .filter(|&wp| self.both_legs_clear(start, wp, end))
                .collect(),
            SegmentCollision::Obstacle(index) => self.obstacle_candidates(start, end, index),
        };

        candidates.truncate(self.config.max_candidates_per_node);
        debug!(
            "[WAYPOINTS] {:?} between ({:.2}, {:.2}) and ({:.2}, {:.2}): {} candidates",
            collision,
            start.x,
            start.z,
            end.x,
            end.z,
            candidates.len()
        );
        candidates
    }

    /// Known open-area points, kept if either leg is clear.
    ///
    /// The looser bar lets the search resolve the remaining leg itself.
    pub fn fallback_candidates(&self, start: Vec2, end: Vec2) -> Vec<Vec2> {
        let mut candidates: Vec<Vec2> = self
            .layout
            .open_area_waypoints
            .iter()
            .copied()
            .filter(|&wp| !self.point_in_obstacle(wp))
            .filter(|&wp| {
                self.check_segment_collision(start, wp).is_clear()
                    || self.check_segment_collision(wp, end).is_clear()
            })
            .collect();

        candidates.truncate(self.config.max_candidates_per_node);
        debug!("[WAYPOINTS] fallback: {} open-area candidates", candidates.len());
        candidates
    }

    fn obstacle_candidates(&self, start: Vec2, end: Vec2, index: usize) -> Vec<Vec2> {
        let obstacle = match self.layout.obstacles.get(index) {
            Some(o) => o,
            None => return Vec::new(),
        };

        let mut candidates: Vec<Vec2> = obstacle
            .detour_hints
            .iter()
            .copied()
            .filter(|&wp| !self.point_in_obstacle(wp) && self.both_legs_clear(start, wp, end))
            .collect();

        let clearance = self.config.avoidance_clearance;
        let center = obstacle.center();

        // Either side of the obstacle, across the direction of travel
        let side = (end - start).perpendicular().normalized();
        let radius = obstacle.half_extent() + clearance;
        for sign in [1.0, -1.0] {
            self.push_if_usable(&mut candidates, center + side * (sign * radius), start, end);
        }

        if let ObstacleShape::Box { width, depth, rotation, .. } = obstacle.shape {
            let hw = width / 2.0 + clearance;
            let hd = depth / 2.0 + clearance;
            for corner in [
                Vec2::new(hw, hd),
                Vec2::new(hw, -hd),
                Vec2::new(-hw, hd),
                Vec2::new(-hw, -hd),
            ] {
                self.push_if_usable(&mut candidates, center + corner.rotated(rotation), start, end);
            }
        }

        candidates
    }

    /// Snap a generated point onto the floor and keep it if it routes cleanly
    fn push_if_usable(&self, candidates: &mut Vec<Vec2>, raw: Vec2, start: Vec2, end: Vec2) {
        let snapped = self.snap_to_floor(raw);
        if self.point_in_obstacle(snapped) {
            return;
        }
        if self.both_legs_clear(start, snapped, end) {
            candidates.push(snapped);
        }
    }

    fn both_legs_clear(&self, start: Vec2, via: Vec2, end: Vec2) -> bool {
        self.check_segment_collision(start, via).is_clear()
            && self.check_segment_collision(via, end).is_clear()
    }
}
