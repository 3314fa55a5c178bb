//! Resolved walk and its progress cursor.

use serde::{Deserialize, Serialize};

use super::geometry::Vec2;

/// How the search arrived at a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathOutcome {
    /// The straight line was already clear
    Direct,
    /// Shortest collision-free detour
    Detour,
    /// No detour was collision-free; shortest candidate used anyway
    BestEffort,
    /// The search found nothing; straight line used anyway
    Unresolved,
}

impl PathOutcome {
    /// Whether every leg of the path was verified clear
    pub fn is_collision_free(&self) -> bool {
        matches!(self, PathOutcome::Direct | PathOutcome::Detour)
    }
}

/// One point of a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Vec2,
    pub reached: bool,
}

/// `[start, waypoints..., end]` plus a cursor.
///
/// Positions never change once built; only the cursor and `reached`
/// flags move.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<PathPoint>,
    current_index: usize,
    outcome: PathOutcome,
}

impl Path {
    pub fn new(start: Vec2, waypoints: Vec<Vec2>, end: Vec2) -> Self {
        let outcome = if waypoints.is_empty() { PathOutcome::Direct } else { PathOutcome::Detour };
        Self::with_outcome(start, waypoints, end, outcome)
    }

    pub fn with_outcome(
        start: Vec2,
        waypoints: Vec<Vec2>,
        end: Vec2,
        outcome: PathOutcome,
    ) -> Self {
        let mut points = Vec::with_capacity(waypoints.len() + 2);
        points.push(PathPoint { position: start, reached: false });
        points.extend(waypoints.into_iter().map(|position| PathPoint { position, reached: false }));
        points.push(PathPoint { position: end, reached: false });

        Self {
            points,
            current_index: 0,
            outcome,
        }
    }

    /// Point the follower should head for, or `None` once complete
    pub fn current_target(&self) -> Option<Vec2> {
        self.points.get(self.current_index).map(|p| p.position)
    }

    /// Mark the current point reached and move on. No-op when complete.
    pub fn advance(&mut self) {
        if let Some(point) = self.points.get_mut(self.current_index) {
            point.reached = true;
            self.current_index += 1;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.points.len()
    }

    /// Fraction of points reached, in [0, 1]
    pub fn progress(&self) -> f32 {
        self.current_index as f32 / self.points.len() as f32
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn start(&self) -> Vec2 {
        self.points[0].position
    }

    pub fn end(&self) -> Vec2 {
        self.points[self.points.len() - 1].position
    }

    /// Intermediate points, excluding start and end
    pub fn waypoints(&self) -> Vec<Vec2> {
        self.points[1..self.points.len() - 1]
            .iter()
            .map(|p| p.position)
            .collect()
    }

    pub fn outcome(&self) -> PathOutcome {
        self.outcome
    }

    pub fn is_collision_free(&self) -> bool {
        self.outcome.is_collision_free()
    }

    /// Sum of leg lengths from start to end
    pub fn total_length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| pair[0].position.distance_to(pair[1].position))
            .sum()
    }
}

/// Total walking distance of `start -> waypoints... -> end`
pub fn chain_length(start: Vec2, waypoints: &[Vec2], end: Vec2) -> f32 {
    let mut distance = 0.0;
    let mut current = start;
    for &wp in waypoints {
        distance += current.distance_to(wp);
        current = wp;
    }
    distance + current.distance_to(end)
}
