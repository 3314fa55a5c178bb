//! Network protocol definitions shared between the room server and its clients.

use serde::{Deserialize, Serialize};

use crate::hotspots::{HotspotContent, HotspotId};
use crate::navigation::{Obstacle, PathOutcome, WallSegment};

/// Protocol version for compatibility checking
pub const PROTOCOL_VERSION: u32 = 1;

/// Server tick rate in Hz
pub const TICK_RATE: u32 = 30;

/// Default server port
pub const DEFAULT_PORT: u16 = 7777;

// =============================================================================
// Client -> Server Messages
// =============================================================================

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientMessage {
    /// First packet of a session
    Hello {
        protocol_version: u32,
    },

    /// Floor hit-test result; `y` is ignored
    FloorClick {
        position: [f32; 3],
    },

    /// Walk to a hotspot's viewing position and focus it
    FocusHotspot {
        hotspot: HotspotId,
    },

    /// Move focus to the next or previous hotspot without walking
    CycleHotspot {
        forward: bool,
    },

    /// Drop hotspot focus
    ClearFocus,

    /// Ask for wall and furniture data for the debug overlay
    RequestLayout,

    /// Disconnect gracefully
    Disconnect,
}

// =============================================================================
// Server -> Client Messages
// =============================================================================

/// Messages sent from server to client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Session accepted
    Welcome {
        session_id: u64,
        position: [f32; 3],
        rotation: f32,
    },

    /// Client speaks a different protocol version
    VersionMismatch {
        expected: u32,
    },

    /// A new path replaced the previous one
    PathAssigned {
        /// `[start, waypoints..., end]`
        points: Vec<[f32; 3]>,
        outcome: PathOutcome,
    },

    /// Avatar state (sent every server tick)
    AvatarUpdate {
        tick: u64,
        state: AvatarState,
    },

    /// Focus changed; `None` means cleared
    HotspotFocused {
        content: Option<HotspotContent>,
    },

    /// Collision geometry for the debug overlay
    LayoutSnapshot {
        walls: Vec<WallSegment>,
        obstacles: Vec<Obstacle>,
        safety_margin: f32,
    },
}

// =============================================================================
// State Types
// =============================================================================

/// Avatar state for per-tick updates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    pub position: [f32; 3],
    pub rotation: f32,
    pub animation_state: AnimationState,
    /// Fraction of the current path walked, 0.0 with no path
    pub path_progress: f32,
}

/// Animation state enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Walking,
}

// =============================================================================
// Serialization helpers
// =============================================================================

impl ClientMessage {
    pub fn serialize(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

impl ServerMessage {
    /// Focus message carrying the banner for `hotspot`
    pub fn hotspot_focused(hotspot: Option<HotspotId>) -> Self {
        Self::HotspotFocused {
            content: hotspot.map(|h| h.content()),
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}
