//! Shared collision geometry
//!
//! Box penetration for grid tiles, segment distance helpers for ink lines,
//! and the mirror reflection every collider uses.

use glam::{IVec2, Vec2};

use super::ball::Ball;

/// Result of a ball-vs-box penetration check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Outward normal of the side that was hit
    pub normal: Vec2,
    /// Overlap along the normal (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a ball against an axis-aligned box and pick the side to resolve on
///
/// Penetration is measured per side as how far the ball's edge has crossed the
/// corresponding box edge. The axis with the strictly smaller minimum wins;
/// equal depths resolve vertically.
pub fn ball_box_collision(ball: &Ball, min: IVec2, size: IVec2) -> CollisionResult {
    if !ball.overlaps_box(min, size) {
        return CollisionResult::miss();
    }

    let c = ball.center();
    let r = ball.radius;
    let lo = min.as_vec2();
    let hi = (min + size).as_vec2();

    let overlap_left = (c.x + r) - lo.x;
    let overlap_right = hi.x - (c.x - r);
    let overlap_top = (c.y + r) - lo.y;
    let overlap_bottom = hi.y - (c.y - r);

    let min_x = overlap_left.min(overlap_right);
    let min_y = overlap_top.min(overlap_bottom);

    let (normal, penetration) = if min_x < min_y {
        if overlap_left < overlap_right {
            (Vec2::NEG_X, overlap_left)
        } else {
            (Vec2::X, overlap_right)
        }
    } else if overlap_top < overlap_bottom {
        (Vec2::NEG_Y, overlap_top)
    } else {
        (Vec2::Y, overlap_bottom)
    };

    CollisionResult {
        hit: true,
        normal,
        penetration,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Cheap proximity test: the point lies inside the ellipse with foci at the
/// segment ends whose major axis is `len + slack`
#[inline]
pub fn near_segment_ellipse(point: Vec2, a: Vec2, b: Vec2, slack: f32) -> bool {
    point.distance(a) + point.distance(b) < a.distance(b) + slack
}

/// Shortest distance from a point to a segment
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let seg = b - a;
    let len_sq = seg.length_squared();
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}
