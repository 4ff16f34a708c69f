//! Momentum scrolling with exponential ease-out.
//!
//! A mouse-wheel notch injects velocity (rows per tick).  Each tick the
//! velocity decays; fractional rows are carried over so slow tails still
//! move.  While this animator is running the surface is decelerating.

/// Row-velocity momentum animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Rows per tick.  Positive = towards the bottom.
    velocity: f64,
    /// Sub-row movement not yet applied.
    carry: f64,
    /// Damping: `velocity *= (1 - friction)` each tick.
    friction: f64,
}

impl SmoothScroll {
    pub fn new(friction: f64) -> Self {
        Self {
            velocity: 0.0,
            carry: 0.0,
            friction: friction.clamp(0.05, 0.95),
        }
    }

    /// Add velocity; a reversal cancels the momentum left over.
    pub fn fling(&mut self, rows: f64) {
        if self.velocity.signum() != rows.signum() {
            self.stop();
        }
        self.velocity += rows;
    }

    /// Advance one frame.  Returns whole rows to scroll (0 when settled).
    pub fn tick(&mut self) -> isize {
        if !self.is_animating() {
            return 0;
        }
        self.carry += self.velocity;
        let rows = self.carry.trunc();
        self.carry -= rows;

        self.velocity *= 1.0 - self.friction;
        if self.velocity.abs() < 0.2 {
            self.velocity = 0.0;
            self.carry = 0.0;
        }
        rows as isize
    }

    pub fn stop(&mut self) {
        self.velocity = 0.0;
        self.carry = 0.0;
    }

    pub fn is_animating(&self) -> bool {
        self.velocity != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_after_a_few_ticks() {
        let mut m = SmoothScroll::new(0.4);
        m.fling(3.0);
        let mut total = 0;
        for _ in 0..50 {
            total += m.tick();
        }
        assert!(!m.is_animating());
        assert!(total >= 5, "moved {total} rows");
        assert_eq!(m.tick(), 0);
    }

    #[test]
    fn reversal_cancels_momentum() {
        let mut m = SmoothScroll::new(0.4);
        m.fling(3.0);
        m.fling(-2.0);
        assert!(m.tick() < 0);
    }

    #[test]
    fn stop_halts_immediately() {
        let mut m = SmoothScroll::new(0.4);
        m.fling(5.0);
        m.stop();
        assert!(!m.is_animating());
        assert_eq!(m.tick(), 0);
    }
}
