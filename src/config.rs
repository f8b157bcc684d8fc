//! Generator configuration

use std::time::Duration;

use crate::clock::DEFAULT_TOLERANCE;
use crate::error::Error;
use crate::rng::{DEFAULT_RESEED_INTERVAL, DEFAULT_ROUNDS, MIN_ROUNDS};

/// Tunable parameters of a [`Generator`](crate::Generator).
///
/// With the `serde` feature, missing fields take their default values when deserialized.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use uuidkit::{Generator, GeneratorConfig};
///
/// let config = GeneratorConfig::default()
///     .with_clock_tolerance(Duration::from_millis(250))
///     .with_rng_rounds(12);
/// let mut g = Generator::with_config(&config)?;
/// println!("{}", g.generate(7)?);
/// # Ok::<(), uuidkit::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GeneratorConfig {
    /// Backward clock movement hidden from the clock-sequence state (default: one second).
    pub clock_tolerance: Duration,

    /// Number of permutation rounds of the fast random generator (default: 8, minimum: 4).
    pub rng_rounds: u32,

    /// Number of 16-word blocks between entropy reseeds (default: 16384).
    pub rng_reseed_interval: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            clock_tolerance: DEFAULT_TOLERANCE,
            rng_rounds: DEFAULT_ROUNDS,
            rng_reseed_interval: DEFAULT_RESEED_INTERVAL,
        }
    }
}

impl GeneratorConfig {
    /// Sets the clock tolerance.
    pub fn with_clock_tolerance(mut self, clock_tolerance: Duration) -> Self {
        self.clock_tolerance = clock_tolerance;
        self
    }

    /// Sets the round count.
    pub fn with_rng_rounds(mut self, rng_rounds: u32) -> Self {
        self.rng_rounds = rng_rounds;
        self
    }

    /// Sets the reseed interval.
    pub fn with_rng_reseed_interval(mut self, rng_reseed_interval: u64) -> Self {
        self.rng_reseed_interval = rng_reseed_interval;
        self
    }

    /// Checks that the parameters are within the accepted ranges.
    pub const fn validate(&self) -> Result<(), Error> {
        if self.rng_rounds < MIN_ROUNDS {
            return Err(Error::InvalidArgument("fewer than four rounds requested"));
        }
        if self.rng_reseed_interval == 0 {
            return Err(Error::InvalidArgument("reseed interval must be positive"));
        }
        Ok(())
    }
}
