//! Collision detection
//!
//! Everything in the arena is a circle; contact means the centers are closer
//! than the sum of the radii (touching edges do not count).

use glam::Vec2;

/// Result of a circle-circle test
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResult {
    pub hit: bool,
    /// Overlap depth (positive when hit)
    pub penetration: f32,
}

/// Test two circles for strict overlap
#[inline]
pub fn circle_circle_collision(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> CollisionResult {
    let reach = a_radius + b_radius;
    let dist = a.distance(b);
    if dist < reach {
        CollisionResult {
            hit: true,
            penetration: reach - dist,
        }
    } else {
        CollisionResult::default()
    }
}

#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    circle_circle_collision(a, a_radius, b, b_radius).hit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let result = circle_circle_collision(Vec2::new(0.0, 0.0), 4.0, Vec2::new(10.0, 0.0), 16.0);
        assert!(result.hit);
        assert!((result.penetration - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        // Exactly radius sum apart
        assert!(!circles_overlap(Vec2::new(0.0, 0.0), 16.0, Vec2::new(0.0, 42.0), 26.0));
        assert!(circles_overlap(Vec2::new(0.0, 0.0), 16.0, Vec2::new(0.0, 41.9), 26.0));
    }

    #[test]
    fn test_diagonal_miss() {
        // Bounding boxes overlap but circles do not
        assert!(!circles_overlap(Vec2::new(0.0, 0.0), 16.0, Vec2::new(30.0, 30.0), 16.0));
    }
}
