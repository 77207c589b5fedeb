//! Per-collider rate limiting
//!
//! Every collider call bumps the counter; a resolution is only attempted once
//! the counter reaches the collider kind's threshold, and a resolved hit
//! resets it. This keeps a ball that dwells on a collider for several ticks
//! from being resolved again every tick.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debounce {
    counter: u32,
    threshold: u32,
}

impl Debounce {
    pub fn new(threshold: u32) -> Self {
        Self {
            counter: 0,
            threshold,
        }
    }

    /// Count one call; returns true if a collision test may run
    #[inline]
    pub fn bump(&mut self) -> bool {
        self.counter = self.counter.saturating_add(1);
        self.counter >= self.threshold
    }

    /// Call after a resolved collision
    #[inline]
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligible_on_threshold_call() {
        let mut d = Debounce::new(3);
        assert!(!d.bump());
        assert!(!d.bump());
        assert!(d.bump());
        // Stays eligible until something resets it
        assert!(d.bump());
        d.reset();
        assert_eq!(d.counter(), 0);
        assert!(!d.bump());
    }
}
