//! Floor-plane geometry primitives.
//!
//! All collision math happens in the horizontal (x, z) plane. Heights are
//! dropped on the way in and restored as `y = 0` on the way out.

use serde::{Deserialize, Serialize};

/// A 2D position on the floor (x, z in world coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, z: 0.0 };

    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn from_3d(pos: [f32; 3]) -> Self {
        Self { x: pos[0], z: pos[2] }
    }

    /// Lift back into world space on the floor plane
    pub fn to_3d(self) -> [f32; 3] {
        [self.x, 0.0, self.z]
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.z * self.z
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self { x: self.x / len, z: self.z / len }
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.z * other.z
    }

    pub fn distance_to(&self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Left-hand perpendicular `(-z, x)`
    pub fn perpendicular(&self) -> Self {
        Self { x: -self.z, z: self.x }
    }

    /// Rotate about the vertical axis by `angle` radians
    pub fn rotated(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.z * sin,
            z: self.x * sin + self.z * cos,
        }
    }

    pub fn lerp(&self, other: Vec2, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, z: self.z + rhs.z }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x - rhs.x, z: self.z - rhs.z }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 { x: self.x * rhs, z: self.z * rhs }
    }
}

impl From<[f32; 3]> for Vec2 {
    fn from(pos: [f32; 3]) -> Self {
        Self::from_3d(pos)
    }
}

/// Distance from `p` to the finite segment `a`-`b`.
///
/// The projection parameter is clamped to [0, 1], so points past either
/// end measure to that endpoint. A degenerate segment is a point.
pub fn distance_point_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_squared();

    if length_sq == 0.0 {
        return p.distance_to(a);
    }

    let t = ((p - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    p.distance_to(a + ab * t)
}

/// Approximate "these segments touch" test used for thick walls.
///
/// True when any endpoint of either segment lies within `margin` of the
/// other segment. Two long segments crossing in their middles are NOT
/// reported; interior walls are also registered as box obstacles for that.
pub fn segments_proximate(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2, margin: f32) -> bool {
    distance_point_to_segment(a1, b1, b2) < margin
        || distance_point_to_segment(a2, b1, b2) < margin
        || distance_point_to_segment(b1, a1, a2) < margin
        || distance_point_to_segment(b2, a1, a2) < margin
}

/// Containment test against a box rotated about its center.
///
/// `width` runs along the box's local x axis, `depth` along local z. Both
/// are inflated by `margin` on every side; the boundary counts as inside.
pub fn point_in_rotated_box(
    p: Vec2,
    center: Vec2,
    width: f32,
    depth: f32,
    rotation: f32,
    margin: f32,
) -> bool {
    let mut local = p - center;
    if rotation != 0.0 {
        local = local.rotated(-rotation);
    }

    let half_width = width / 2.0 + margin;
    let half_depth = depth / 2.0 + margin;

    local.x.abs() <= half_width && local.z.abs() <= half_depth
}

/// Strict containment test against an inflated circle
pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32, margin: f32) -> bool {
    p.distance_to(center) < radius + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_distance_point_to_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);

        // Perpendicular foot inside the segment
        assert!((distance_point_to_segment(Vec2::new(2.0, 3.0), a, b) - 3.0).abs() < EPS);

        // Past the end clamps to the endpoint
        assert!((distance_point_to_segment(Vec2::new(7.0, 4.0), a, b) - 5.0).abs() < EPS);
        assert!((distance_point_to_segment(Vec2::new(-3.0, 0.0), a, b) - 3.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_segment_is_point_distance() {
        let a = Vec2::new(1.0, 1.0);
        let d = distance_point_to_segment(Vec2::new(4.0, 5.0), a, a);
        assert!((d - 5.0).abs() < EPS);
    }

    #[test]
    fn test_segments_proximate_endpoint_near() {
        let wall_a = Vec2::new(0.0, -2.0);
        let wall_b = Vec2::new(0.0, 2.0);

        // Path ends 0.3 from the wall
        assert!(segments_proximate(
            Vec2::new(-3.0, 0.0),
            Vec2::new(-0.3, 0.0),
            wall_a,
            wall_b,
            0.5
        ));

        // Wall endpoint sits right next to the path
        assert!(segments_proximate(
            Vec2::new(-1.0, 2.2),
            Vec2::new(1.0, 2.2),
            wall_a,
            wall_b,
            0.5
        ));

        // Parallel and far away
        assert!(!segments_proximate(
            Vec2::new(2.0, -2.0),
            Vec2::new(2.0, 2.0),
            wall_a,
            wall_b,
            0.5
        ));
    }

    #[test]
    fn test_segments_proximate_ignores_mid_crossing() {
        // A clean X: every endpoint is 5 units from the other segment
        let crossing = segments_proximate(
            Vec2::new(-5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(0.0, -5.0),
            Vec2::new(0.0, 5.0),
            0.5,
        );
        assert!(!crossing);
    }

    #[test]
    fn test_point_in_axis_aligned_box() {
        let center = Vec2::new(2.0, -1.0);
        assert!(!point_in_rotated_box(Vec2::new(2.6, -1.0), center, 1.0, 0.5, 0.0, 0.0));
        // Boundary counts as inside
        assert!(point_in_rotated_box(Vec2::new(2.5, -1.0), center, 1.0, 0.5, 0.0, 0.0));
        assert!(point_in_rotated_box(Vec2::new(2.55, -1.0), center, 1.0, 0.5, 0.0, 0.1));
        assert!(!point_in_rotated_box(Vec2::new(2.0, -1.4), center, 1.0, 0.5, 0.0, 0.1));
    }

    #[test]
    fn test_point_in_rotated_box_swaps_extents() {
        // 4 wide, 1 deep; a quarter turn makes it 1 wide and 4 deep in world space
        let center = Vec2::ZERO;
        let along_z = Vec2::new(0.0, 1.8);
        let along_x = Vec2::new(1.8, 0.0);

        assert!(!point_in_rotated_box(along_z, center, 4.0, 1.0, 0.0, 0.0));
        assert!(point_in_rotated_box(along_x, center, 4.0, 1.0, 0.0, 0.0));

        assert!(point_in_rotated_box(along_z, center, 4.0, 1.0, FRAC_PI_2, 0.0));
        assert!(!point_in_rotated_box(along_x, center, 4.0, 1.0, FRAC_PI_2, 0.0));
    }

    #[test]
    fn test_point_in_circle() {
        let center = Vec2::new(-1.0, -4.0);
        assert!(point_in_circle(Vec2::new(-1.35, -4.0), center, 0.3, 0.1));
        assert!(!point_in_circle(Vec2::new(-1.45, -4.0), center, 0.3, 0.1));
    }

    #[test]
    fn test_vec2_helpers() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < EPS);
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        assert_eq!(v.perpendicular(), Vec2::new(-4.0, 3.0));

        let turned = Vec2::new(1.0, 0.0).rotated(FRAC_PI_2);
        assert!(turned.x.abs() < EPS && (turned.z - 1.0).abs() < EPS);

        assert_eq!(Vec2::from_3d([1.5, 7.0, -2.0]).to_3d(), [1.5, 0.0, -2.0]);
    }
}
