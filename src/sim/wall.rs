//! Blocking tiles: reflect balls and optionally repaint them

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::{ball_box_collision, reflect_velocity};
use super::color::ColorId;
use super::debounce::Debounce;
use crate::consts::*;

/// What a wall hit did to the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallHit {
    /// New ball color, if the wall repainted it
    pub recolored: Option<ColorId>,
}

/// A grid-aligned blocking tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub pos: IVec2,
    pub size: IVec2,
    /// Color transferred to balls on hit (0 = none)
    pub color: ColorId,
    pub debounce: Debounce,
}

impl Wall {
    pub fn new(pos: IVec2, color: ColorId) -> Self {
        Self {
            pos,
            size: IVec2::splat(CELL_SIZE),
            color,
            debounce: Debounce::new(WALL_DEBOUNCE),
        }
    }

    /// Resolve a ball against this tile
    ///
    /// The ball is pushed back by the smaller penetration on the resolving
    /// axis only, so it is corrected but not necessarily fully separated.
    pub fn resolve(&mut self, ball: &mut Ball) -> Option<WallHit> {
        if !self.debounce.bump() {
            return None;
        }

        let result = ball_box_collision(ball, self.pos, self.size);
        if !result.hit {
            return None;
        }

        let correction = result.normal * result.penetration;
        ball.pos.x = (ball.pos.x as f32 + correction.x) as i32;
        ball.pos.y = (ball.pos.y as f32 + correction.y) as i32;
        ball.vel = reflect_velocity(ball.vel, result.normal);

        let recolored = if self.color != 0 {
            ball.color = self.color;
            Some(self.color)
        } else {
            None
        };

        self.debounce.reset();
        log::trace!("ball {} hit wall at {:?}", ball.id, self.pos);
        Some(WallHit { recolored })
    }
}
