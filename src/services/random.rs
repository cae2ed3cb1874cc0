//! Random source for the simulated latency and customer replies.
//!
//! The view only ever asks for a unit draw in `[0, 1)`; the helpers below
//! turn that into coin flips, delays and picks. Tests swap in a
//! [`FixedRandom`] to force outcomes.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DelayRange;

pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform delay within `range`.
    fn delay_in(&mut self, range: DelayRange) -> Duration {
        let span = range.max_ms.saturating_sub(range.min_ms);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let offset = (self.unit() * span as f64).round() as u64;
        Duration::from_millis(range.min_ms + offset.min(span))
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let idx = (self.unit() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// `rand`-backed source, optionally seeded for reproducible runs.
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl RandomSource for RngSource {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Always returns the same draw.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn unit(&mut self) -> f64 {
        self.0
    }
}

#[cfg(test)]
#[path = "random_test.rs"]
mod tests;
