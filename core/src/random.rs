use rand::prelude::*;
use rand_distr::Exp;

/// Source of random durations for the entities.
///
/// Every entity owns its own source so that runs are reproducible per seed
/// and tests can script exact draw sequences.
pub trait VariateSource {
    /// Draws an exponentially distributed duration with the given rate.
    ///
    /// `rate` must be strictly positive; anything else is a caller bug.
    fn exponential(&mut self, rate: f64) -> f64;
}

/// Exponential draws from `rand_distr` on top of a seeded `StdRng`.
pub struct SeededVariates {
    rng: StdRng,
}

impl SeededVariates {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Splits one master seed into two independent streams.
    pub fn split(seed: u64) -> (Self, Self) {
        let mut master = StdRng::seed_from_u64(seed);
        let first = Self::new(master.gen());
        (first, Self::new(master.gen()))
    }
}

impl VariateSource for SeededVariates {
    fn exponential(&mut self, rate: f64) -> f64 {
        debug_assert!(rate > 0.0, "exponential rate must be positive, got {rate}");
        match Exp::new(rate) {
            Ok(exp) => exp.sample(&mut self.rng),
            // a negative or NaN rate never fires
            Err(_) => f64::INFINITY,
        }
    }
}

/// Replays a fixed list of durations, ignoring the rate.
///
/// A repeating script cycles forever. A one-shot script yields `f64::INFINITY`
/// once exhausted, which pushes the follow-up event past any finite horizon.
#[derive(Debug, Clone)]
pub struct ScriptedVariates {
    values: Vec<f64>,
    cursor: usize,
    repeat: bool,
}

impl ScriptedVariates {
    pub fn repeating(values: Vec<f64>) -> Self {
        debug_assert!(!values.is_empty(), "a repeating script needs at least one value");
        Self { values, cursor: 0, repeat: true }
    }

    pub fn once(values: Vec<f64>) -> Self {
        Self { values, cursor: 0, repeat: false }
    }

    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl VariateSource for ScriptedVariates {
    fn exponential(&mut self, _rate: f64) -> f64 {
        let value = if self.repeat && !self.values.is_empty() {
            self.values[self.cursor % self.values.len()]
        } else {
            self.values.get(self.cursor).copied().unwrap_or(f64::INFINITY)
        };
        self.cursor += 1;
        value
    }
}
