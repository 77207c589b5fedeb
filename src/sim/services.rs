//! Collaborators the simulation calls out to
//!
//! The level tick owns physics only. Score keeping, the queue of balls waiting
//! to be spawned and the level clock live outside it behind these traits.

use super::ball::Ball;
use super::color::ColorId;

/// Receives score changes keyed by ball color
pub trait ScoreSink {
    /// A ball of `color` was captured by an accepting hole
    fn increase(&mut self, color: ColorId);
    /// A ball of `color` fell into the wrong hole
    fn decrease(&mut self, color: ColorId);
    /// Flat points paid out from the end-of-level time bonus
    fn add_bonus(&mut self, points: u32);
}

/// Balls not currently in play, spawned in FIFO order
pub trait WaitingQueue {
    fn is_empty(&self) -> bool;
    fn push(&mut self, ball: Ball);
    fn pop(&mut self) -> Option<Ball>;
}

/// Level countdown, sampled once per tick
pub trait LevelTimer {
    fn has_expired(&self) -> bool;
    fn remaining_secs(&self) -> u32;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Default)]
    pub struct RecordingScore {
        pub increased: Vec<ColorId>,
        pub decreased: Vec<ColorId>,
        pub bonus: u32,
    }

    impl ScoreSink for RecordingScore {
        fn increase(&mut self, color: ColorId) {
            self.increased.push(color);
        }
        fn decrease(&mut self, color: ColorId) {
            self.decreased.push(color);
        }
        fn add_bonus(&mut self, points: u32) {
            self.bonus += points;
        }
    }

    #[derive(Debug, Default)]
    pub struct VecQueue(pub VecDeque<Ball>);

    impl WaitingQueue for VecQueue {
        fn is_empty(&self) -> bool {
            self.0.is_empty()
        }
        fn push(&mut self, ball: Ball) {
            self.0.push_back(ball);
        }
        fn pop(&mut self) -> Option<Ball> {
            self.0.pop_front()
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct FixedTimer {
        pub expired: bool,
        pub remaining: u32,
    }

    impl FixedTimer {
        pub fn running(remaining: u32) -> Self {
            Self {
                expired: false,
                remaining,
            }
        }

        pub fn expired() -> Self {
            Self {
                expired: true,
                remaining: 0,
            }
        }
    }

    impl LevelTimer for FixedTimer {
        fn has_expired(&self) -> bool {
            self.expired
        }
        fn remaining_secs(&self) -> u32 {
            self.remaining
        }
    }
}
