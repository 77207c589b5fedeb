//! Acceleration tiles: nudge a ball's velocity toward a fixed direction

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::debounce::Debounce;
use crate::consts::*;

/// Axis-aligned direction an acceleration tile pushes toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Layout digit encoding: 0 up, 1 down, 2 left, 3 right
    pub fn from_digit(digit: u32) -> Option<Self> {
        match digit {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Sign of the push along the affected axis (screen y grows downward)
    fn sign(&self) -> f32 {
        match self {
            Direction::Up | Direction::Left => -1.0,
            Direction::Down | Direction::Right => 1.0,
        }
    }

    fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// A grid-aligned tile that accelerates balls passing over it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccelTile {
    pub pos: IVec2,
    pub size: IVec2,
    pub direction: Direction,
    pub debounce: Debounce,
}

impl AccelTile {
    pub fn new(pos: IVec2, direction: Direction) -> Self {
        Self {
            pos,
            size: IVec2::splat(CELL_SIZE),
            direction,
            debounce: Debounce::new(ACCEL_DEBOUNCE),
        }
    }

    /// Accelerate a ball overlapping this tile. Returns true on a hit.
    ///
    /// The ball is not repositioned. The affected velocity component is
    /// clamped to the maximum speed, and a component that lands on the
    /// minimum speed snaps back to the ball's initial velocity on that axis.
    pub fn check_collision(&mut self, ball: &mut Ball) -> bool {
        if !self.debounce.bump() {
            return false;
        }
        if !ball.overlaps_box(self.pos, self.size) {
            return false;
        }

        let (component, initial) = if self.direction.is_horizontal() {
            (&mut ball.vel.x, ball.initial_vel.x)
        } else {
            (&mut ball.vel.y, ball.initial_vel.y)
        };
        *component = accelerate(*component, self.direction.sign(), initial);

        self.debounce.reset();
        log::trace!("ball {} accelerated {}", ball.id, self.direction.as_str());
        true
    }
}

fn accelerate(v: f32, sign: f32, initial: f32) -> f32 {
    let v = (v + sign * ACCEL_AMOUNT).clamp(-ACCEL_MAX_SPEED, ACCEL_MAX_SPEED);
    if v.abs() <= ACCEL_MIN_SPEED { initial } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_on_tile(vel: Vec2, initial: Vec2) -> Ball {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut b = Ball::new(2, IVec2::new(116, 116), 1, BALL_RADIUS, &mut rng);
        b.vel = vel;
        b.initial_vel = initial;
        b.active = true;
        b
    }

    fn ready_tile(direction: Direction) -> AccelTile {
        let mut tile = AccelTile::new(IVec2::new(100, 100), direction);
        for _ in 0..ACCEL_DEBOUNCE - 1 {
            tile.debounce.bump();
        }
        tile
    }

    #[test]
    fn test_direction_digits() {
        assert_eq!(Direction::from_digit(0), Some(Direction::Up));
        assert_eq!(Direction::from_digit(3), Some(Direction::Right));
        assert_eq!(Direction::from_digit(4), None);
    }

    #[test]
    fn test_each_direction_pushes_its_axis() {
        let cases = [
            (Direction::Up, Vec2::new(2.0, 1.5)),
            (Direction::Down, Vec2::new(2.0, 2.5)),
            (Direction::Left, Vec2::new(1.5, 2.0)),
            (Direction::Right, Vec2::new(2.5, 2.0)),
        ];
        for (direction, expected) in cases {
            let mut tile = ready_tile(direction);
            let mut b = ball_on_tile(Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0));
            assert!(tile.check_collision(&mut b));
            assert_eq!(b.vel, expected, "{}", direction.as_str());
            assert_eq!(b.pos, IVec2::new(116, 116));
        }
    }

    #[test]
    fn test_clamped_at_max_speed() {
        let mut tile = ready_tile(Direction::Right);
        let mut b = ball_on_tile(Vec2::new(4.8, 0.0), Vec2::new(2.0, 2.0));
        tile.check_collision(&mut b);
        assert_eq!(b.vel.x, ACCEL_MAX_SPEED);
    }

    #[test]
    fn test_zero_crossing_snaps_to_initial() {
        let mut tile = ready_tile(Direction::Left);
        let mut b = ball_on_tile(Vec2::new(0.5, 2.0), Vec2::new(-2.0, 2.0));
        tile.check_collision(&mut b);
        assert_eq!(b.vel.x, -2.0);
    }

    #[test]
    fn test_no_overlap_no_change() {
        let mut tile = ready_tile(Direction::Up);
        let mut b = ball_on_tile(Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0));
        b.pos = IVec2::new(10, 10);
        assert!(!tile.check_collision(&mut b));
        assert_eq!(b.vel, Vec2::new(2.0, 2.0));
        assert_eq!(tile.debounce.counter(), ACCEL_DEBOUNCE);
    }

    proptest! {
        #[test]
        fn never_exceeds_max_speed(
            v in -20.0f32..20.0,
            initial in -2.0f32..2.0,
            dir in 0u32..4,
        ) {
            let direction = Direction::from_digit(dir).unwrap();
            let mut tile = ready_tile(direction);
            let mut b = ball_on_tile(Vec2::new(v, v), Vec2::new(initial, initial));
            tile.check_collision(&mut b);
            let component = if direction.is_horizontal() { b.vel.x } else { b.vel.y };
            prop_assert!(component.abs() <= ACCEL_MAX_SPEED);
        }
    }
}
