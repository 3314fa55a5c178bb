//! Click validation and floor snapping.

use log::trace;

use super::geometry::Vec2;
use super::Navigator;

impl Navigator {
    /// Whether the avatar may be sent to `point`.
    ///
    /// The point must be clear of every inflated obstacle and inside one
    /// of the floor regions shrunk by the floor margin.
    pub fn is_walkable(&self, point: Vec2) -> bool {
        if self.point_in_obstacle(point) {
            trace!("[WALKABLE] ({:.2}, {:.2}) is on furniture", point.x, point.z);
            return false;
        }

        let inset = self.config.floor_margin;
        let on_floor = self
            .layout
            .floor_regions
            .iter()
            .any(|region| region.contains_inset(point, inset));

        if !on_floor {
            trace!("[WALKABLE] ({:.2}, {:.2}) is off the floor", point.x, point.z);
        }
        on_floor
    }

    /// Clamp `point` into the nearest floor region, inset by the snap margin.
    ///
    /// With no floor regions the point is returned unchanged.
    pub fn snap_to_floor(&self, point: Vec2) -> Vec2 {
        let inset = self.config.snap_margin;
        let mut best: Option<(f32, Vec2)> = None;

        for region in &self.layout.floor_regions {
            let candidate = region.clamp_inset(point, inset);
            let dist = candidate.distance_to(point);
            match best {
                Some((best_dist, _)) if best_dist <= dist => {}
                _ => best = Some((dist, candidate)),
            }
        }

        best.map(|(_, p)| p).unwrap_or(point)
    }
}
