//! Server-side avatar that walks along a path.

use room_shared::navigation::{Path, Vec2};
use room_shared::AnimationState;

/// Avatar walking speed in units per second
pub const AVATAR_SPEED: f32 = 2.0;

/// Distance at which a path point counts as reached
pub const ARRIVAL_RADIUS: f32 = 0.1;

/// Where the avatar stands when a session starts
pub const AVATAR_START: Vec2 = Vec2::new(0.5, -4.0);

/// Position and pose of one avatar
#[derive(Debug, Clone)]
pub struct Avatar {
    pub position: Vec2,
    pub rotation: f32,
    pub animation_state: AnimationState,
}

impl Avatar {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            animation_state: AnimationState::Idle,
        }
    }

    /// Walk `current_path` for one tick.
    ///
    /// Consumes at most one path point per call and clears the slot once
    /// the path is complete.
    pub fn update(&mut self, current_path: &mut Option<Path>, delta: f32) {
        let path = match current_path.as_mut() {
            Some(p) => p,
            None => {
                self.animation_state = AnimationState::Idle;
                return;
            }
        };

        let target = match path.current_target() {
            Some(t) => t,
            None => {
                *current_path = None;
                self.animation_state = AnimationState::Idle;
                return;
            }
        };

        if self.position.distance_to(target) < ARRIVAL_RADIUS {
            path.advance();
            if path.is_complete() {
                *current_path = None;
                self.animation_state = AnimationState::Idle;
            }
            return;
        }

        self.move_towards(target, delta);
        self.animation_state = AnimationState::Walking;
    }

    /// Move towards a target position, never overshooting it
    fn move_towards(&mut self, target: Vec2, delta: f32) {
        let dx = target.x - self.position.x;
        let dz = target.z - self.position.z;
        let dist = (dx * dx + dz * dz).sqrt();

        if dist > 0.0 {
            let ratio = (AVATAR_SPEED * delta / dist).min(1.0);
            self.position.x += dx * ratio;
            self.position.z += dz * ratio;

            // Face movement direction
            self.rotation = dx.atan2(dz);
        }
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new(AVATAR_START)
    }
}
