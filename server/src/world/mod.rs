//! Room world management.

mod layout_file;

pub use layout_file::{load_room, LAYOUT_FILE};

use std::collections::HashMap;

use log::{debug, info};

use room_shared::navigation::{Navigator, Path, Vec2};
use room_shared::{AvatarState, HotspotId, ServerMessage};

use crate::entities::Avatar;

/// Everything the server keeps for one connected client
#[derive(Debug, Default)]
pub struct RoomSession {
    pub avatar: Avatar,
    /// Path being walked; replaced wholesale on every accepted request
    pub current_path: Option<Path>,
    pub focused: Option<HotspotId>,
}

impl RoomSession {
    pub fn state(&self) -> AvatarState {
        AvatarState {
            position: self.avatar.position.to_3d(),
            rotation: self.avatar.rotation,
            animation_state: self.avatar.animation_state,
            path_progress: self.current_path.as_ref().map_or(0.0, Path::progress),
        }
    }
}

/// The room and every session walking around in it
pub struct RoomWorld {
    navigator: Navigator,
    sessions: HashMap<u64, RoomSession>,
}

impl RoomWorld {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            sessions: HashMap::new(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Create a session with its avatar at the start position
    pub fn spawn_session(&mut self, id: u64) -> &RoomSession {
        info!("Session {} entered the room", id);
        self.sessions.entry(id).or_default()
    }

    pub fn despawn_session(&mut self, id: u64) {
        if self.sessions.remove(&id).is_some() {
            info!("Session {} left the room", id);
        }
    }

    pub fn get_session(&self, id: u64) -> Option<&RoomSession> {
        self.sessions.get(&id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Handle a click on the floor.
    ///
    /// Clicks on furniture or off the floor are ignored. Otherwise the
    /// session's path is replaced and the new one returned for the client.
    pub fn handle_floor_click(&mut self, id: u64, position: [f32; 3]) -> Option<ServerMessage> {
        let target = Vec2::from_3d(position);
        if !self.navigator.is_walkable(target) {
            debug!(
                "Session {}: ignoring click at ({:.2}, {:.2}), not walkable",
                id, target.x, target.z
            );
            return None;
        }

        self.walk_to(id, target)
    }

    /// Focus a hotspot and walk to its viewing position
    pub fn focus_hotspot(&mut self, id: u64, hotspot: HotspotId) -> Vec<ServerMessage> {
        let session = match self.sessions.get_mut(&id) {
            Some(s) => s,
            None => return Vec::new(),
        };
        session.focused = Some(hotspot);
        debug!("Session {} focused {}", id, hotspot.name());

        let mut messages = vec![ServerMessage::hotspot_focused(Some(hotspot))];
        messages.extend(self.walk_to(id, hotspot.viewing_position()));
        messages
    }

    /// Move focus along the hotspot order. Does nothing without a focus.
    pub fn cycle_hotspot(&mut self, id: u64, forward: bool) -> Option<ServerMessage> {
        let session = self.sessions.get_mut(&id)?;
        let current = session.focused?;
        let hotspot = if forward { current.next() } else { current.previous() };
        session.focused = Some(hotspot);
        Some(ServerMessage::hotspot_focused(Some(hotspot)))
    }

    pub fn clear_focus(&mut self, id: u64) -> Option<ServerMessage> {
        let session = self.sessions.get_mut(&id)?;
        session.focused.take()?;
        Some(ServerMessage::hotspot_focused(None))
    }

    /// Collision geometry for the debug overlay
    pub fn layout_snapshot(&self) -> ServerMessage {
        let layout = self.navigator.layout();
        ServerMessage::LayoutSnapshot {
            walls: layout.walls.clone(),
            obstacles: layout.obstacles.clone(),
            safety_margin: self.navigator.config().safety_margin,
        }
    }

    /// Step every avatar along its path
    pub fn update(&mut self, delta: f32) {
        for session in self.sessions.values_mut() {
            session.avatar.update(&mut session.current_path, delta);
        }
    }

    /// Plan from the avatar's current position and replace its path
    fn walk_to(&mut self, id: u64, target: Vec2) -> Option<ServerMessage> {
        let session = self.sessions.get_mut(&id)?;
        let path = self.navigator.find_path(session.avatar.position, target);

        if !path.is_collision_free() {
            debug!("Session {}: walking a {:?} path", id, path.outcome());
        }

        let msg = ServerMessage::PathAssigned {
            points: path.points().iter().map(|p| p.position.to_3d()).collect(),
            outcome: path.outcome(),
        };
        session.current_path = Some(path);
        Some(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_shared::navigation::PathOutcome;
    use room_shared::AnimationState;

    const DT: f32 = 1.0 / 30.0;

    fn world_with_session() -> RoomWorld {
        let mut world = RoomWorld::new(Navigator::default());
        world.spawn_session(1);
        world
    }

    fn run(world: &mut RoomWorld, ticks: usize) {
        for _ in 0..ticks {
            world.update(DT);
        }
    }

    #[test]
    fn test_session_starts_idle_at_start() {
        let world = world_with_session();
        let state = world.get_session(1).unwrap().state();
        assert_eq!(state.position, [0.5, 0.0, -4.0]);
        assert_eq!(state.animation_state, AnimationState::Idle);
        assert_eq!(state.path_progress, 0.0);
    }

    #[test]
    fn test_click_on_furniture_is_ignored() {
        let mut world = world_with_session();
        assert!(world.handle_floor_click(1, [2.1, 0.0, -1.55]).is_none());
        assert!(world.get_session(1).unwrap().current_path.is_none());
    }

    #[test]
    fn test_rejected_click_keeps_current_path() {
        let mut world = world_with_session();
        assert!(world.handle_floor_click(1, [1.4, 0.0, -7.5]).is_some());
        run(&mut world, 5);
        let before = world.get_session(1).unwrap().current_path.clone();

        assert!(world.handle_floor_click(1, [20.0, 0.0, 20.0]).is_none());
        assert_eq!(world.get_session(1).unwrap().current_path, before);
    }

    #[test]
    fn test_click_walks_avatar_there() {
        let mut world = world_with_session();
        let msg = world.handle_floor_click(1, [1.4, 0.0, -7.5]).unwrap();
        match msg {
            ServerMessage::PathAssigned { points, outcome } => {
                assert_eq!(outcome, PathOutcome::Direct);
                assert_eq!(points.len(), 2);
                assert_eq!(points[0], [0.5, 0.0, -4.0]);
            }
            other => panic!("unexpected message {:?}", other),
        }

        run(&mut world, 1);
        run(&mut world, 1);
        assert_eq!(world.get_session(1).unwrap().state().animation_state, AnimationState::Walking);

        // 3.6 units at 2 units/s is under 2 seconds
        run(&mut world, 120);
        let session = world.get_session(1).unwrap();
        assert!(session.current_path.is_none());
        assert_eq!(session.avatar.animation_state, AnimationState::Idle);
        assert!(session.avatar.position.distance_to(Vec2::new(1.4, -7.5)) < 0.1);
    }

    #[test]
    fn test_new_click_replaces_path() {
        let mut world = world_with_session();
        world.handle_floor_click(1, [1.4, 0.0, -7.5]);
        run(&mut world, 10);
        let mid = world.get_session(1).unwrap().avatar.position;

        world.handle_floor_click(1, [0.5, 0.0, -5.0]);
        let path = world.get_session(1).unwrap().current_path.as_ref().unwrap();
        assert_eq!(path.start(), mid);
        assert_eq!(path.end(), Vec2::new(0.5, -5.0));
        assert_eq!(path.progress(), 0.0);
    }

    #[test]
    fn test_click_into_pc_corner_detours() {
        let mut world = world_with_session();
        let msg = world.handle_floor_click(1, [-3.0, 0.0, -5.0]).unwrap();
        match msg {
            ServerMessage::PathAssigned { points, outcome } => {
                assert_eq!(outcome, PathOutcome::Detour);
                assert!(points.len() > 2);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_hotspot_focus_cycle_and_clear() {
        let mut world = world_with_session();

        // Nothing to cycle from yet
        assert!(world.cycle_hotspot(1, true).is_none());
        assert!(world.clear_focus(1).is_none());

        let messages = world.focus_hotspot(1, HotspotId::Portrait);
        assert_eq!(messages.len(), 2);
        match &messages[0] {
            ServerMessage::HotspotFocused { content: Some(content) } => {
                assert_eq!(content.hotspot, HotspotId::Portrait);
                assert_eq!(content.title, "My Projects");
                assert_eq!(content.cta, "View All Projects");
            }
            other => panic!("unexpected message {:?}", other),
        }
        let path_end = world.get_session(1).unwrap().current_path.as_ref().unwrap().end();
        assert_eq!(path_end, HotspotId::Portrait.viewing_position());

        let msg = world.cycle_hotspot(1, true).unwrap();
        assert_eq!(
            msg,
            ServerMessage::HotspotFocused { content: Some(HotspotId::Phone.content()) }
        );
        // Cycling doesn't re-plan
        let path_end = world.get_session(1).unwrap().current_path.as_ref().unwrap().end();
        assert_eq!(path_end, HotspotId::Portrait.viewing_position());

        world.cycle_hotspot(1, false);
        world.cycle_hotspot(1, false);
        assert_eq!(world.get_session(1).unwrap().focused, Some(HotspotId::Pc));

        assert_eq!(world.clear_focus(1), Some(ServerMessage::HotspotFocused { content: None }));
        assert!(world.get_session(1).unwrap().focused.is_none());
        assert!(world.get_session(1).unwrap().current_path.is_some());
    }

    #[test]
    fn test_every_hotspot_reachable_from_start() {
        for hotspot in HotspotId::ALL {
            let mut world = world_with_session();
            world.focus_hotspot(1, hotspot);
            let path = world.get_session(1).unwrap().current_path.as_ref().unwrap();
            assert!(
                path.is_collision_free(),
                "{} walk is {:?}",
                hotspot.name(),
                path.outcome()
            );
        }

        // From the scene's idle spot beside the partition the phone is cut off
        let nav = Navigator::default();
        let path = nav.find_path(Vec2::new(-1.0, -2.0), HotspotId::Phone.viewing_position());
        assert!(!path.is_collision_free());
    }

    #[test]
    fn test_unknown_session_is_noop() {
        let mut world = world_with_session();
        assert!(world.handle_floor_click(99, [1.4, 0.0, -7.5]).is_none());
        assert!(world.focus_hotspot(99, HotspotId::Pc).is_empty());
        assert_eq!(world.session_count(), 1);

        world.despawn_session(1);
        assert_eq!(world.session_count(), 0);
        assert!(world.get_session(1).is_none());
    }

    #[test]
    fn test_layout_snapshot_matches_navigator() {
        let world = world_with_session();
        match world.layout_snapshot() {
            ServerMessage::LayoutSnapshot { walls, obstacles, safety_margin } => {
                assert_eq!(walls.len(), 6);
                assert_eq!(obstacles.len(), 12);
                assert_eq!(safety_margin, 0.1);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }
}
