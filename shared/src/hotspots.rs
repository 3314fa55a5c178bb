//! Interactive hotspots in the room.

use serde::{Deserialize, Serialize};

use crate::navigation::Vec2;

/// Hotspot the camera can focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HotspotId {
    Pc = 0,
    Portrait = 1,
    Phone = 2,
    Ps5 = 3,
}

impl HotspotId {
    /// Order used by the previous/next arrows
    pub const ALL: [HotspotId; 4] = [Self::Pc, Self::Portrait, Self::Phone, Self::Ps5];

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Pc),
            1 => Some(Self::Portrait),
            2 => Some(Self::Phone),
            3 => Some(Self::Ps5),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::Portrait => "Portrait",
            Self::Phone => "Phone",
            Self::Ps5 => "PS5",
        }
    }

    /// Banner text shown while focused
    pub fn title(&self) -> &'static str {
        match self {
            Self::Pc => "Curious?",
            Self::Portrait => "My Projects",
            Self::Phone => "Get In Touch",
            Self::Ps5 => "VR Game Development",
        }
    }

    /// Label of the banner's call-to-action button
    pub fn cta(&self) -> &'static str {
        match self {
            Self::Pc => "About Me",
            Self::Portrait => "View All Projects",
            Self::Phone => "Reach Out",
            Self::Ps5 => "Check VR Game",
        }
    }

    /// Where the call-to-action button leads
    pub fn href(&self) -> &'static str {
        match self {
            Self::Pc => "https://portfolio.ahmedmahmoud.de/en#about",
            Self::Portrait => "https://portfolio.ahmedmahmoud.de/en#projects",
            Self::Phone => "https://portfolio.ahmedmahmoud.de/en#contact",
            Self::Ps5 => "https://minigame.ahmedmahmoud.de/en#about",
        }
    }

    pub fn content(&self) -> HotspotContent {
        HotspotContent {
            hotspot: *self,
            title: self.title().to_string(),
            cta: self.cta().to_string(),
            href: self.href().to_string(),
        }
    }

    pub fn next(&self) -> Self {
        let index = (self.as_u8() as usize + 1) % Self::ALL.len();
        Self::ALL[index]
    }

    pub fn previous(&self) -> Self {
        let len = Self::ALL.len();
        let index = (self.as_u8() as usize + len - 1) % len;
        Self::ALL[index]
    }

    /// Floor point the avatar walks to when this hotspot is focused.
    /// Every position is walkable in the compiled-in room.
    pub fn viewing_position(&self) -> Vec2 {
        match self {
            Self::Pc => Vec2::new(-2.2, -6.5),
            Self::Portrait => Vec2::new(1.4, -7.5),
            Self::Phone => Vec2::new(2.6, -1.2),
            Self::Ps5 => Vec2::new(0.9, -1.5),
        }
    }
}

/// Banner shown while a hotspot is focused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotContent {
    pub hotspot: HotspotId,
    pub title: String,
    pub cta: String,
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Navigator;

    #[test]
    fn test_cycling_wraps_both_ways() {
        assert_eq!(HotspotId::Ps5.next(), HotspotId::Pc);
        assert_eq!(HotspotId::Pc.previous(), HotspotId::Ps5);

        for hotspot in HotspotId::ALL {
            assert_eq!(hotspot.next().previous(), hotspot);
        }

        let mut current = HotspotId::Pc;
        for _ in 0..HotspotId::ALL.len() {
            current = current.next();
        }
        assert_eq!(current, HotspotId::Pc);
    }

    #[test]
    fn test_u8_conversion() {
        for hotspot in HotspotId::ALL {
            assert_eq!(HotspotId::from_u8(hotspot.as_u8()), Some(hotspot));
        }
        assert_eq!(HotspotId::from_u8(4), None);
    }

    #[test]
    fn test_content_matches_hotspot() {
        let content = HotspotId::Phone.content();
        assert_eq!(content.hotspot, HotspotId::Phone);
        assert_eq!(content.title, "Get In Touch");
        assert_eq!(content.cta, "Reach Out");
        assert!(content.href.ends_with("#contact"));

        for hotspot in HotspotId::ALL {
            let content = hotspot.content();
            assert!(!content.title.is_empty() && !content.cta.is_empty());
            assert!(content.href.starts_with("https://"));
        }
        assert_ne!(HotspotId::Pc.content(), HotspotId::Ps5.content());
    }

    #[test]
    fn test_viewing_positions_are_walkable() {
        let nav = Navigator::default();
        for hotspot in HotspotId::ALL {
            assert!(
                nav.is_walkable(hotspot.viewing_position()),
                "{} viewing position is not walkable",
                hotspot.name()
            );
        }
    }
}
