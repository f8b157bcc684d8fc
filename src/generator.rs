//! UUID generator and related types.

use std::time::{Duration, SystemTime};

use rand::rngs::OsRng;

use crate::clock::{Clock, ClockSequence, StdSystemTime, TimeSource, DEFAULT_TOLERANCE};
use crate::config::GeneratorConfig;
use crate::error::Error;
use crate::id::{Uuid, Variant, MAX_UINT48};
use crate::rng::{FastRng, RandSource};
use crate::timestamp::{self, TimeBase, MAX_RAW_TIMESTAMP};

/// Width of the sequence field of generated UUIDs.
const SEQUENCE_BITS: u32 = Variant::Var10.sequence_bits();

/// The multicast bit of the node field, set on random nodes of versions 1 and 6.
const MULTICAST_BIT: u64 = 1 << 40;

/// Parameters of a single [`Generator::generate_with()`] call.
///
/// # Examples
///
/// ```rust
/// use std::time::{Duration, UNIX_EPOCH};
/// use uuidkit::{GenerateOptions, Generator};
///
/// let mut g = Generator::new();
/// let opts = GenerateOptions::new(1)
///     .time(UNIX_EPOCH + Duration::from_secs(854_991_792))
///     .sequence(0x2765)
///     .node(0x00a0_c91e_6bf6);
/// assert_eq!(
///     g.generate_with(&opts)?.to_string(),
///     "f7fc3800-7dec-11d0-a765-00a0c91e6bf6"
/// );
/// # Ok::<(), uuidkit::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenerateOptions {
    version: u8,
    time: Option<SystemTime>,
    sequence: Option<u16>,
    node: Option<u64>,
}

impl GenerateOptions {
    /// Creates options for `version`, which must be 1, 4, 6 or 7 when generating.
    pub const fn new(version: u8) -> Self {
        Self {
            version,
            time: None,
            sequence: None,
            node: None,
        }
    }

    /// Uses `time` instead of reading the clock. The clock-sequence state still applies.
    pub const fn time(mut self, time: SystemTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Uses `sequence` as is, bypassing the clock-sequence state. Must fit in 14 bits.
    pub const fn sequence(mut self, sequence: u16) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Uses `node` instead of a random node. Must fit in 48 bits.
    pub const fn node(mut self, node: u64) -> Self {
        self.node = Some(node);
        self
    }
}

/// Represents a UUID generator that encapsulates the clock reader, the clock-sequence states and
/// the random number generator, and guarantees the monotonic order of timestamped UUIDs it
/// generates.
///
/// Versions 1 and 6 share one clock-sequence state and version 7 has its own, so UUIDs of each
/// time base are strictly increasing under the [`Ord`] of [`Uuid`] as long as the clock does not
/// move back by more than the configured tolerance. Versions 1 and 6 are mutually ordered as
/// well because they encode the same tick count.
///
/// A generator holds mutable state and is intended for single-owner use. The following example
/// guarantees the process-wide (cross-thread) monotonicity using Rust's standard synchronization
/// mechanism.
///
/// # Examples
///
/// ```rust
/// use std::{sync, thread};
/// use uuidkit::Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(Generator::new()));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(7).unwrap(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug)]
pub struct Generator<R = FastRng, T = StdSystemTime> {
    clock: Clock<T>,
    gregorian: ClockSequence,
    unix: ClockSequence,

    /// The random number generator used by the generator.
    rng: R,
}

impl Generator {
    /// Creates a generator with the default configuration, reading the system clock and drawing
    /// entropy from [`FastRng`].
    pub const fn new() -> Self {
        Self::with_sources(FastRng::new(), StdSystemTime)
    }

    /// Creates a generator with the specified configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the configuration does not validate.
    pub fn with_config(config: &GeneratorConfig) -> Result<Self, Error> {
        config.validate()?;
        let rng = FastRng::with_config(OsRng, config.rng_rounds, config.rng_reseed_interval)?;
        Ok(Self::with_sources(rng, StdSystemTime).with_clock_tolerance(config.clock_tolerance))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandSource, T: TimeSource> Generator<R, T> {
    /// Creates a generator with a random number generator and a time source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::{Duration, UNIX_EPOCH};
    /// use uuidkit::{rng::FastRng, Generator};
    ///
    /// let fixed = || UNIX_EPOCH + Duration::from_millis(0x0123_4567_89ab);
    /// let mut g = Generator::with_sources(FastRng::new(), fixed);
    /// assert!(g.generate(7)?.to_string().starts_with("01234567-89ab-7000-"));
    /// # Ok::<(), uuidkit::Error>(())
    /// ```
    pub const fn with_sources(rng: R, time_source: T) -> Self {
        Self {
            clock: Clock::new(time_source, DEFAULT_TOLERANCE),
            gregorian: ClockSequence::new(),
            unix: ClockSequence::new(),
            rng,
        }
    }

    /// Replaces the tolerance to backward clock jumps, which is one second by default.
    pub fn with_clock_tolerance(mut self, tolerance: Duration) -> Self {
        self.clock.set_tolerance(tolerance);
        self
    }

    /// Generates a new UUID of `version` (1, 4, 6 or 7) from the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `version` is not supported or the clock reads a time
    /// that the version cannot represent.
    pub fn generate(&mut self, version: u8) -> Result<Uuid, Error> {
        self.generate_with(&GenerateOptions::new(version))
    }

    /// Generates a new UUID as specified by `opts`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the version is not supported, if an option is not
    /// applicable to the version or out of range, or if the time precedes the version's epoch.
    pub fn generate_with(&mut self, opts: &GenerateOptions) -> Result<Uuid, Error> {
        let base = match opts.version {
            1 | 6 => TimeBase::Gregorian,
            7 => TimeBase::Unix,
            4 => {
                if opts.time.is_some() || opts.sequence.is_some() || opts.node.is_some() {
                    return Err(Error::InvalidArgument(
                        "version 4 takes no time, sequence or node",
                    ));
                }
                return Ok(self.generate_v4());
            }
            _ => return Err(Error::InvalidArgument("unsupported version")),
        };

        if matches!(opts.sequence, Some(s) if u32::from(s) >= 1 << SEQUENCE_BITS) {
            return Err(Error::InvalidArgument("sequence out of range"));
        }
        let node = match opts.node {
            Some(node) if node > MAX_UINT48 => {
                return Err(Error::InvalidArgument("node out of range"));
            }
            Some(node) => node,
            None if opts.version == 7 => self.rng.next_u64() & MAX_UINT48,
            None => self.rng.next_u64() & MAX_UINT48 | MULTICAST_BIT,
        };

        let time = match opts.time {
            Some(time) => time,
            None => self.clock.now(),
        };
        let raw = base.encode(time)?;

        let (raw, sequence) = match opts.sequence {
            Some(sequence) => (raw, sequence),
            None => {
                let state = match base {
                    TimeBase::Gregorian => &mut self.gregorian,
                    TimeBase::Unix => &mut self.unix,
                };
                let tick = state.next(raw, SEQUENCE_BITS, &mut self.rng);
                (tick.timestamp, tick.sequence)
            }
        };
        if raw > MAX_RAW_TIMESTAMP {
            return Err(Error::InvalidArgument("timestamp overflowed 60 bits"));
        }

        let (high48, bits12) = timestamp::pack(opts.version, raw);
        let mid32 = u32::from(opts.version) << 28
            | u32::from(bits12) << 16
            | u32::from(Variant::Var10.prefix() | sequence);
        Ok(Uuid::from_fields_unchecked(high48, mid32, node))
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    pub fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.rng.next_u64().to_be_bytes());
        bytes[8..].copy_from_slice(&self.rng.next_u64().to_be_bytes());
        bytes[6] = 0x40 | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Uuid::from(bytes)
    }
}
