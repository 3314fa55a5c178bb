//! Recursive waypoint search.
//!
//! Every blocked segment branches into its detour candidates, each of
//! which is searched again toward the goal, up to the configured depth.
//! All complete chains are collected; the shortest one that re-validates
//! clear end to end wins.

use log::{debug, warn};

use super::geometry::Vec2;
use super::path::{chain_length, Path, PathOutcome};
use super::Navigator;

struct Candidate {
    waypoints: Vec<Vec2>,
    distance: f32,
    collision_free: bool,
}

impl Navigator {
    /// Plan a walk from `start` to `end`.
    ///
    /// Never fails: when nothing clear is found the result is the shortest
    /// colliding chain, or the straight line if the search came up empty.
    /// [`Path::outcome`] says which.
    pub fn find_path(&self, start: Vec2, end: Vec2) -> Path {
        if self.check_segment_collision(start, end).is_clear() {
            return Path::with_outcome(start, Vec::new(), end, PathOutcome::Direct);
        }

        let chains = self.collect_chains(start, end, 0);
        if chains.is_empty() {
            warn!(
                "[PATH] No route from ({:.2}, {:.2}) to ({:.2}, {:.2}), walking straight",
                start.x, start.z, end.x, end.z
            );
            return Path::with_outcome(start, Vec::new(), end, PathOutcome::Unresolved);
        }

        let mut options: Vec<Candidate> = chains
            .into_iter()
            .map(|waypoints| Candidate {
                distance: chain_length(start, &waypoints, end),
                collision_free: self.is_chain_clear(start, &waypoints, end),
                waypoints,
            })
            .collect();

        // Clear chains first, then shortest
        options.sort_by(|a, b| {
            b.collision_free
                .cmp(&a.collision_free)
                .then(a.distance.total_cmp(&b.distance))
        });

        let clear_count = options.iter().filter(|o| o.collision_free).count();
        debug!(
            "[PATH] {} candidate chains, {} collision-free",
            options.len(),
            clear_count
        );

        let best = options.swap_remove(0);
        let outcome = if best.collision_free {
            PathOutcome::Detour
        } else {
            warn!(
                "[PATH] Every route from ({:.2}, {:.2}) to ({:.2}, {:.2}) collides, using shortest",
                start.x, start.z, end.x, end.z
            );
            PathOutcome::BestEffort
        };

        debug!(
            "[PATH] Chose {} waypoints, length {:.2} ({:?})",
            best.waypoints.len(),
            best.distance,
            outcome
        );
        Path::with_outcome(start, best.waypoints, end, outcome)
    }

    /// Interior waypoints only; empty means walk straight
    pub fn find_waypoints(&self, start: Vec2, end: Vec2) -> Vec<Vec2> {
        self.find_path(start, end).waypoints()
    }

    /// Every waypoint chain that ends with a clear leg into `to`
    fn collect_chains(&self, from: Vec2, to: Vec2, depth: usize) -> Vec<Vec<Vec2>> {
        let collision = self.check_segment_collision(from, to);
        if collision.is_clear() {
            return vec![Vec::new()];
        }

        if depth >= self.config.max_depth {
            return Vec::new();
        }

        let mut candidates = self.avoidance_candidates(from, to, collision);
        if candidates.is_empty() && depth < self.config.fallback_max_depth {
            candidates = self.fallback_candidates(from, to);
        }

        let mut chains = Vec::new();
        for waypoint in candidates {
            for rest in self.collect_chains(waypoint, to, depth + 1) {
                let mut chain = Vec::with_capacity(rest.len() + 1);
                chain.push(waypoint);
                chain.extend(rest);
                chains.push(chain);
            }
        }
        chains
    }
}
