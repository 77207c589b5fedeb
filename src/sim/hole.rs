//! Capture holes: pull nearby balls in, shrink them, and swallow them
//!
//! A hole tracks which balls it is currently pulling by id only. It never
//! owns ball memory, so the level can remove a ball from play without telling
//! the hole; stale ids are pruned after each tick.

use std::collections::BTreeSet;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::color::{self, ColorId};
use super::services::ScoreSink;
use crate::consts::*;

/// How a capture resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Colors matched (or a wildcard was involved); the ball is gone for good
    Accepted,
    /// Wrong hole; the ball goes back to the waiting queue
    Rejected,
}

/// A capture hole (2x2 cells)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hole {
    pub pos: IVec2,
    pub size: IVec2,
    pub color: ColorId,
    /// Ids of balls currently inside the attraction radius
    attracted: BTreeSet<u32>,
}

impl Hole {
    pub fn new(pos: IVec2, color: ColorId) -> Self {
        Self {
            pos,
            size: IVec2::splat(HOLE_SIZE),
            color,
            attracted: BTreeSet::new(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos.as_vec2() + self.size.as_vec2() / 2.0
    }

    pub fn is_attracting(&self, ball_id: u32) -> bool {
        self.attracted.contains(&ball_id)
    }

    pub fn attracted(&self) -> impl Iterator<Item = u32> + '_ {
        self.attracted.iter().copied()
    }

    /// Pull a ball toward the center and capture it once close enough
    ///
    /// Returns the capture outcome when the ball was taken out of play this
    /// call; the ball is then inactive and the score sink has been notified.
    pub fn attract(&mut self, ball: &mut Ball, scores: &mut dyn ScoreSink) -> Option<Capture> {
        let center = self.center();
        let to_center = center - ball.center();
        let distance = to_center.length();

        if distance > ATTRACTION_RADIUS {
            if self.attracted.remove(&ball.id) {
                ball.reset_radius();
            }
            return None;
        }

        self.attracted.insert(ball.id);

        // Pull grows as the ball closes in; a ball dead on center has no direction
        if distance > f32::EPSILON {
            let dir = to_center / distance;
            ball.vel += dir * (ATTRACTION_FACTOR / distance);
        }

        ball.radius = (ball.initial_radius * (distance / ATTRACTION_RADIUS)).max(0.0);

        if distance >= CAPTURE_RADIUS {
            return None;
        }

        self.attracted.remove(&ball.id);
        ball.active = false;

        if color::accepts(self.color, ball.color) {
            scores.increase(ball.color);
            log::debug!("hole {:?} captured ball {} (color {})", self.pos, ball.id, ball.color);
            Some(Capture::Accepted)
        } else {
            scores.decrease(ball.color);
            log::debug!(
                "hole {:?} (color {}) rejected ball {} (color {})",
                self.pos,
                self.color,
                ball.id,
                ball.color
            );
            Some(Capture::Rejected)
        }
    }

    /// Drop ids of balls that left play, and release active balls that drifted
    /// out of range, restoring their radius
    pub fn prune_attracted(&mut self, balls: &mut [Ball]) {
        let center = self.center();
        self.attracted.retain(|id| {
            let Some(ball) = balls.iter_mut().find(|b| b.id == *id) else {
                return false;
            };
            if ball.center().distance(center) > ATTRACTION_RADIUS {
                ball.reset_radius();
                return false;
            }
            true
        });
    }
}
