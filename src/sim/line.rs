//! Player-drawn ink lines: one-shot reflectors
//!
//! A line is a polyline the player draws. The first ball to touch any of its
//! segments bounces off it and the whole line disappears.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::{distance_to_segment, near_segment_ellipse, reflect_velocity};
use super::debounce::Debounce;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerLine {
    points: Vec<Vec2>,
    pub debounce: Debounce,
}

impl Default for PlayerLine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerLine {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            debounce: Debounce::new(LINE_DEBOUNCE),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            points: points.into_iter().collect(),
            ..Self::new()
        }
    }

    pub fn push_point(&mut self, point: Vec2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// True once the line has no collidable segment left
    pub fn is_spent(&self) -> bool {
        self.points.len() < 2
    }

    /// Iterate consecutive point pairs
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Bounce a ball off the first segment it is about to touch
    ///
    /// The test runs against where the ball will be next tick, using the
    /// sum-of-distances-to-endpoints proximity heuristic. On a hit the entire
    /// line is cleared. Returns true on a hit.
    pub fn check_collision(&mut self, ball: &mut Ball) -> bool {
        if !self.debounce.bump() {
            return false;
        }

        let projected = ball.projected_center();
        let hit = self.segments().find_map(|(a, b)| {
            let seg = b - a;
            if seg == Vec2::ZERO {
                return None;
            }
            if !near_segment_ellipse(projected, a, b, ball.radius) {
                return None;
            }
            Some(pick_normal(a, b, seg, projected))
        });

        let Some(normal) = hit else {
            return false;
        };

        ball.vel = reflect_velocity(ball.vel, normal);
        self.clear();
        self.debounce.reset();
        log::trace!("ball {} bounced off a line", ball.id);
        true
    }

    /// Whether a pointer position is close enough to delete this line
    pub fn is_near(&self, point: Vec2) -> bool {
        self.segments()
            .any(|(a, b)| distance_to_segment(point, a, b) < LINE_DELETE_DISTANCE)
    }
}

/// Of the two unit normals of a segment, the one whose tip (offset from the
/// segment midpoint) is closer to `toward`; ties go to the second
fn pick_normal(a: Vec2, b: Vec2, seg: Vec2, toward: Vec2) -> Vec2 {
    let n1 = Vec2::new(-seg.y, seg.x).normalize();
    let n2 = Vec2::new(seg.y, -seg.x).normalize();
    let mid = (a + b) / 2.0;
    if (mid + n1).distance(toward) < (mid + n2).distance(toward) {
        n1
    } else {
        n2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball(x: i32, y: i32, vel: Vec2) -> Ball {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut b = Ball::new(5, IVec2::new(x, y), 1, BALL_RADIUS, &mut rng);
        b.vel = vel;
        b.active = true;
        b
    }

    fn horizontal_line() -> PlayerLine {
        PlayerLine::from_points([Vec2::new(100.0, 200.0), Vec2::new(200.0, 200.0)])
    }

    fn run_until_eligible(line: &mut PlayerLine, ball: &mut Ball) -> bool {
        (0..LINE_DEBOUNCE).any(|_| line.check_collision(ball))
    }

    #[test]
    fn test_head_on_bounce_clears_line() {
        let mut line = horizontal_line();
        let mut b = ball(150, 194, Vec2::new(0.0, 2.0));
        assert!(run_until_eligible(&mut line, &mut b));
        assert_eq!(b.vel, Vec2::new(0.0, -2.0));
        assert!(line.points().is_empty());
        assert!(line.is_spent());
        assert_eq!(line.debounce.counter(), 0);
    }

    #[test]
    fn test_bounce_from_below() {
        let mut line = horizontal_line();
        let mut b = ball(150, 206, Vec2::new(1.0, -2.0));
        assert!(run_until_eligible(&mut line, &mut b));
        assert_eq!(b.vel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_debounced_before_threshold() {
        let mut line = horizontal_line();
        let mut b = ball(150, 194, Vec2::new(0.0, 2.0));
        for _ in 0..LINE_DEBOUNCE - 1 {
            assert!(!line.check_collision(&mut b));
        }
        assert_eq!(line.points().len(), 2);
    }

    #[test]
    fn test_far_ball_misses() {
        let mut line = horizontal_line();
        let mut b = ball(150, 100, Vec2::new(0.0, 2.0));
        assert!(!run_until_eligible(&mut line, &mut b));
        assert_eq!(b.vel, Vec2::new(0.0, 2.0));
        assert_eq!(line.points().len(), 2);
    }

    #[test]
    fn test_uses_projected_position() {
        let mut line = horizontal_line();
        // Currently clear of the line, but next tick lands on it
        let mut b = ball(150, 180, Vec2::new(0.0, 19.0));
        assert!(run_until_eligible(&mut line, &mut b));
        assert_eq!(b.vel, Vec2::new(0.0, -19.0));
    }

    #[test]
    fn test_zero_length_segment_is_skipped() {
        let mut line = PlayerLine::from_points([Vec2::new(150.0, 200.0), Vec2::new(150.0, 200.0)]);
        let mut b = ball(150, 200, Vec2::new(0.0, 0.0));
        assert!(!run_until_eligible(&mut line, &mut b));
        assert_eq!(line.points().len(), 2);
    }

    #[test]
    fn test_single_point_line_never_collides() {
        let mut line = PlayerLine::from_points([Vec2::new(150.0, 200.0)]);
        let mut b = ball(150, 200, Vec2::new(0.0, 2.0));
        assert!(line.is_spent());
        assert!(!run_until_eligible(&mut line, &mut b));
    }

    #[test]
    fn test_is_near_uses_true_segment_distance() {
        let line = horizontal_line();
        assert!(line.is_near(Vec2::new(150.0, 210.0)));
        assert!(!line.is_near(Vec2::new(150.0, 220.0)));
        // Beyond the endpoint, measured to the endpoint
        assert!(line.is_near(Vec2::new(210.0, 200.0)));
        assert!(!line.is_near(Vec2::new(220.0, 200.0)));
    }
}
