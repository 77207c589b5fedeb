//! Ball entity and kinematics

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::ColorId;
use crate::consts::*;

/// A ball entity
///
/// Position lives on the integer board grid; velocity is fractional, so each
/// step truncates toward zero the same way a float-to-int cast does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: IVec2,
    pub vel: Vec2,
    /// Current radius (shrinks while being pulled into a hole)
    pub radius: f32,
    pub initial_radius: f32,
    /// Velocity the ball was minted with; acceleration tiles snap back to it
    pub initial_vel: Vec2,
    pub color: ColorId,
    pub active: bool,
}

impl Ball {
    /// Mint an inactive ball with a random ±speed velocity on each axis
    pub fn new(id: u32, pos: IVec2, color: ColorId, radius: f32, rng: &mut impl Rng) -> Self {
        let vel = random_velocity(rng);
        Self {
            id,
            pos,
            vel,
            radius,
            initial_radius: radius,
            initial_vel: vel,
            color,
            active: false,
        }
    }

    /// Advance one tick. No bounds checking; colliders correct afterwards.
    #[inline]
    pub fn advance(&mut self) {
        self.pos.x = (self.pos.x as f32 + self.vel.x) as i32;
        self.pos.y = (self.pos.y as f32 + self.vel.y) as i32;
    }

    /// Center as a float point
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos.as_vec2()
    }

    /// Center one tick ahead at the current velocity
    #[inline]
    pub fn projected_center(&self) -> Vec2 {
        self.center() + self.vel
    }

    pub fn reset_radius(&mut self) {
        self.radius = self.initial_radius;
    }

    /// Put the ball into play at `pos` with a fresh random velocity
    pub fn dispatch(&mut self, pos: IVec2, rng: &mut impl Rng) {
        self.pos = pos;
        self.vel = random_velocity(rng);
        self.radius = self.initial_radius;
        self.active = true;
    }

    /// Whether the ball's bounding box overlaps the box at `min` with `size`
    pub fn overlaps_box(&self, min: IVec2, size: IVec2) -> bool {
        let c = self.center();
        let lo = min.as_vec2();
        let hi = (min + size).as_vec2();
        c.x + self.radius > lo.x
            && c.x - self.radius < hi.x
            && c.y + self.radius > lo.y
            && c.y - self.radius < hi.y
    }
}

fn random_velocity(rng: &mut impl Rng) -> Vec2 {
    let x = random_speed(rng);
    let y = random_speed(rng);
    Vec2::new(x, y)
}

#[inline]
fn random_speed(rng: &mut impl Rng) -> f32 {
    if rng.random_bool(0.5) { -BALL_SPEED } else { BALL_SPEED }
}
