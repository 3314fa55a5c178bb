//! Room layout loading.
//!
//! The room can be overridden with a `room_layout.json` next to the server
//! binary. Format (all coordinates are `[x, z]` floor pairs, angles in
//! radians):
//!
//! ```json
//! {
//!   "walls": [{ "start": [-3.5, 0.0], "end": [-3.5, -9.0] }],
//!   "obstacles": [
//!     { "name": "couch", "type": "box", "center": [4.6, -4.4],
//!       "width": 2.8, "depth": 1.2, "rotation": 1.5708, "hints": [[3.0, -2.0]] },
//!     { "name": "purifier", "type": "circle", "center": [-1.0, -8.5], "radius": 0.3 }
//!   ],
//!   "floor_regions": [{ "min": [-3.5, -9.0], "max": [-1.5, 0.0] }],
//!   "corner_waypoints": [[-1.0, -0.9]],
//!   "open_area_waypoints": [[1.0, -5.0]],
//!   "nav": { "safety_margin": 0.15 }
//! }
//! ```
//!
//! Malformed entries are skipped with a warning; `nav` fields that are
//! missing keep their defaults.

use std::path::Path;

use log::{error, info, warn};
use serde_json::Value;
use thiserror::Error;

use room_shared::navigation::{FloorRegion, NavConfig, Obstacle, RoomLayout, Vec2, WallSegment};

/// Layout file looked up in the working directory
pub const LAYOUT_FILE: &str = "room_layout.json";

/// Layout loading errors
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid layout: {0}")]
    Invalid(String),
}

/// Load the room from `path`, falling back to the compiled-in gaming room
pub fn load_room<P: AsRef<Path>>(path: P) -> (RoomLayout, NavConfig) {
    let path = path.as_ref();

    match read_layout_file(path) {
        Ok(Some(loaded)) => loaded,
        Ok(None) => {
            info!("No {:?} found, using compiled-in gaming room", path);
            (RoomLayout::gaming_room(), NavConfig::default())
        }
        Err(e) => {
            error!("Failed to load {:?}: {}", path, e);
            error!("Using compiled-in gaming room");
            (RoomLayout::gaming_room(), NavConfig::default())
        }
    }
}

/// Read and parse a layout file. `Ok(None)` if the file doesn't exist.
pub fn read_layout_file(path: &Path) -> Result<Option<(RoomLayout, NavConfig)>, LayoutError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let (layout, config) = parse_layout(&content)?;
    info!(
        "Loaded room from {:?}: {} walls, {} obstacles, {} floor regions",
        path,
        layout.walls.len(),
        layout.obstacles.len(),
        layout.floor_regions.len()
    );
    Ok(Some((layout, config)))
}

/// Parse layout JSON
pub fn parse_layout(content: &str) -> Result<(RoomLayout, NavConfig), LayoutError> {
    let json: Value = serde_json::from_str(content)?;
    let obj = json
        .as_object()
        .ok_or_else(|| LayoutError::Invalid("root is not an object".to_string()))?;

    let walls = parse_list(obj.get("walls"), "wall", parse_wall);
    let obstacles = parse_list(obj.get("obstacles"), "obstacle", parse_obstacle);
    let floor_regions = parse_list(obj.get("floor_regions"), "floor region", parse_region);
    let corner_waypoints = parse_list(obj.get("corner_waypoints"), "corner waypoint", parse_point);
    let open_area_waypoints =
        parse_list(obj.get("open_area_waypoints"), "open-area waypoint", parse_point);

    if floor_regions.is_empty() {
        return Err(LayoutError::Invalid("no usable floor regions".to_string()));
    }

    let config = match obj.get("nav") {
        Some(nav) => serde_json::from_value(nav.clone())?,
        None => NavConfig::default(),
    };

    let layout = RoomLayout {
        walls,
        obstacles,
        floor_regions,
        corner_waypoints,
        open_area_waypoints,
    };
    Ok((layout, config))
}

/// Parse every element of an optional JSON array, skipping bad ones
fn parse_list<T>(value: Option<&Value>, what: &str, parse: fn(&Value) -> Option<T>) -> Vec<T> {
    let items = match value {
        Some(v) => match v.as_array() {
            Some(arr) => arr,
            None => {
                warn!("Layout {} list is not an array", what);
                return Vec::new();
            }
        },
        None => return Vec::new(),
    };

    let mut parsed = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match parse(item) {
            Some(p) => parsed.push(p),
            None => warn!("Skipping malformed {} #{}: {}", what, i, item),
        }
    }
    parsed
}

fn parse_point(value: &Value) -> Option<Vec2> {
    let arr = value.as_array()?;
    if arr.len() != 2 {
        return None;
    }
    let x = arr[0].as_f64()? as f32;
    let z = arr[1].as_f64()? as f32;
    Some(Vec2::new(x, z))
}

fn parse_wall(value: &Value) -> Option<WallSegment> {
    let obj = value.as_object()?;
    let start = parse_point(obj.get("start")?)?;
    let end = parse_point(obj.get("end")?)?;
    Some(WallSegment::new(start, end))
}

fn parse_region(value: &Value) -> Option<FloorRegion> {
    let obj = value.as_object()?;
    let min = parse_point(obj.get("min")?)?;
    let max = parse_point(obj.get("max")?)?;
    Some(FloorRegion::from_corners(min.x, min.z, max.x, max.z))
}

fn parse_obstacle(value: &Value) -> Option<Obstacle> {
    let obj = value.as_object()?;
    let name = obj.get("name").and_then(Value::as_str).unwrap_or("unnamed");
    let center = parse_point(obj.get("center")?)?;

    let obstacle = match obj.get("type")?.as_str()? {
        "box" => {
            let width = obj.get("width")?.as_f64()? as f32;
            let depth = obj.get("depth")?.as_f64()? as f32;
            let rotation = obj.get("rotation").and_then(Value::as_f64).unwrap_or(0.0) as f32;
            if width <= 0.0 || depth <= 0.0 {
                return None;
            }
            Obstacle::boxed(name, center, width, depth, rotation)
        }
        "circle" => {
            let radius = obj.get("radius")?.as_f64()? as f32;
            if radius <= 0.0 {
                return None;
            }
            Obstacle::circle(name, center, radius)
        }
        other => {
            warn!("Unknown obstacle type: {}", other);
            return None;
        }
    };

    let hints: Vec<Vec2> = match obj.get("hints").and_then(Value::as_array) {
        Some(arr) => arr.iter().filter_map(parse_point).collect(),
        None => Vec::new(),
    };
    Some(obstacle.with_hints(&hints))
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_shared::navigation::ObstacleShape;

    const SMALL_ROOM: &str = r#"{
        "walls": [{ "start": [0.0, -1.0], "end": [0.0, 1.0] }],
        "obstacles": [
            { "name": "crate", "type": "box", "center": [2.0, 0.0], "width": 1.0, "depth": 0.5,
              "rotation": 0.5, "hints": [[2.0, 2.0], [2.0, -2.0]] },
            { "name": "lamp", "type": "circle", "center": [-2.0, 0.0], "radius": 0.3 }
        ],
        "floor_regions": [{ "min": [5.0, 5.0], "max": [-5.0, -5.0] }],
        "corner_waypoints": [[0.0, 2.0]],
        "open_area_waypoints": [[3.0, 3.0], [-3.0, 3.0]]
    }"#;

    #[test]
    fn test_parse_full_layout() {
        let (layout, config) = parse_layout(SMALL_ROOM).unwrap();

        assert_eq!(layout.walls.len(), 1);
        assert_eq!(layout.obstacles.len(), 2);
        assert_eq!(layout.obstacles[0].name, "crate");
        assert_eq!(layout.obstacles[0].detour_hints.len(), 2);
        assert!(matches!(
            layout.obstacles[1].shape,
            ObstacleShape::Circle { radius, .. } if radius == 0.3
        ));
        assert_eq!(layout.corner_waypoints, vec![Vec2::new(0.0, 2.0)]);
        assert_eq!(layout.open_area_waypoints.len(), 2);
        assert_eq!(config, NavConfig::default());

        // Corners given in any order
        let region = layout.floor_regions[0];
        assert_eq!(region.min, Vec2::new(-5.0, -5.0));
        assert_eq!(region.max, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let json = r#"{
            "walls": [
                { "start": [0.0], "end": [0.0, 1.0] },
                { "start": [1.0, 1.0], "end": [2.0, 1.0] }
            ],
            "obstacles": [
                { "type": "pyramid", "center": [0.0, 0.0] },
                { "type": "circle", "center": [0.0, 0.0], "radius": -1.0 },
                { "type": "box", "center": [1.0, 1.0], "width": 1.0, "depth": 1.0 }
            ],
            "floor_regions": [{ "min": [-5.0, -5.0], "max": [5.0, 5.0] }, "nope"]
        }"#;
        let (layout, _) = parse_layout(json).unwrap();

        assert_eq!(layout.walls.len(), 1);
        assert_eq!(layout.obstacles.len(), 1);
        assert_eq!(layout.obstacles[0].name, "unnamed");
        assert_eq!(layout.floor_regions.len(), 1);
    }

    #[test]
    fn test_nav_overrides_keep_defaults() {
        let json = r#"{
            "floor_regions": [{ "min": [-5.0, -5.0], "max": [5.0, 5.0] }],
            "nav": { "safety_margin": 0.25, "max_depth": 3 }
        }"#;
        let (_, config) = parse_layout(json).unwrap();

        assert_eq!(config.safety_margin, 0.25);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.wall_margin, NavConfig::default().wall_margin);
    }

    #[test]
    fn test_invalid_layouts_are_errors() {
        assert!(matches!(parse_layout("[1, 2, 3]"), Err(LayoutError::Invalid(_))));
        assert!(matches!(parse_layout("{ \"walls\": [] }"), Err(LayoutError::Invalid(_))));
        assert!(matches!(parse_layout("{ not json"), Err(LayoutError::Json(_))));
        let bad_nav = r#"{
            "floor_regions": [{ "min": [0.0, 0.0], "max": [1.0, 1.0] }],
            "nav": { "max_depth": "deep" }
        }"#;
        assert!(matches!(parse_layout(bad_nav), Err(LayoutError::Json(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("definitely/not/here/room_layout.json");
        assert!(read_layout_file(path).unwrap().is_none());

        let (layout, config) = load_room(path);
        assert_eq!(layout, RoomLayout::gaming_room());
        assert_eq!(config, NavConfig::default());
    }
}
