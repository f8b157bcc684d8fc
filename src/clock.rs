//! Wall-clock reading and the clock-sequence state machine

use std::time::{Duration, SystemTime};

use crate::rng::RandSource;

/// Default amount of backward clock movement that [`Clock`] hides from its callers.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(1);

/// A trait that defines the minimum system clock interface for [`Generator`](crate::Generator).
///
/// Any `FnMut() -> SystemTime` closure is a time source, which is handy for injecting a fixed or
/// manually advanced clock.
pub trait TimeSource {
    /// Returns the current wall-clock time.
    fn now(&mut self) -> SystemTime;
}

/// The default [`TimeSource`] that reads [`SystemTime::now()`].
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn now(&mut self) -> SystemTime {
        SystemTime::now()
    }
}

impl<F: FnMut() -> SystemTime> TimeSource for F {
    fn now(&mut self) -> SystemTime {
        self()
    }
}

/// A wall-clock reader that smooths small backward jumps.
///
/// If a reading is earlier than the last reading returned by less than the tolerance, the last
/// reading is returned again so that minor clock corrections never produce decreasing
/// timestamps. A larger backward jump is reported as is.
#[derive(Clone, Debug)]
pub struct Clock<T> {
    source: T,
    tolerance: Duration,
    last: Option<SystemTime>,
}

impl<T: TimeSource> Clock<T> {
    /// Creates a clock reader with the specified tolerance to backward jumps.
    pub const fn new(source: T, tolerance: Duration) -> Self {
        Self {
            source,
            tolerance,
            last: None,
        }
    }

    /// Returns the tolerance to backward jumps.
    pub const fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Replaces the tolerance to backward jumps.
    pub fn set_tolerance(&mut self, tolerance: Duration) {
        self.tolerance = tolerance;
    }

    /// Returns the current time, or the last reading returned if the clock has moved backward
    /// within the tolerance.
    pub fn now(&mut self) -> SystemTime {
        let reading = self.source.now();
        if let Some(last) = self.last {
            if let Ok(rollback) = last.duration_since(reading) {
                if rollback < self.tolerance {
                    return last;
                }
                if !rollback.is_zero() {
                    tracing::debug!(?rollback, "clock moved backward beyond tolerance");
                }
            }
        }
        self.last = Some(reading);
        reading
    }
}

/// Outcome of a [`ClockSequence::next()`] call.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Transition {
    /// The timestamp is new; the sequence was drawn at random.
    Fresh,
    /// The timestamp falls within the range already covered; the sequence was advanced by a
    /// random step.
    Coalesced,
}

/// The timestamp and sequence pair to be placed in an identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Tick {
    /// Raw timestamp, which may run ahead of the input after sequence overflows.
    pub timestamp: u64,
    /// Sequence value masked to the requested width.
    pub sequence: u16,
    /// Whether the state machine started over or continued.
    pub transition: Transition,
}

/// The clock-sequence state machine that keeps identifiers from one time base locally monotonic.
///
/// The state covers the range from the raw timestamp seen at the last fresh start (`timestamp`)
/// to a `horizon` that moves forward on every sequence overflow by a tenth of the overflow. A new
/// timestamp within that range continues the sequence by a random positive step, so that
/// identifiers issued within the same tick stay ordered while the number of identifiers between
/// two observed values remains obscure. Any other timestamp starts over with a random sequence.
///
/// The timestamp of the identifier issued (`issued`) receives one raw unit per overflow and never
/// lags the input timestamp; it may therefore run slightly ahead of the clock. The horizon never
/// falls behind it.
///
/// Raw timestamps of different time bases must not be fed into the same state.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ClockSequence {
    timestamp: u64,
    horizon: u64,
    issued: u64,
    sequence: u64,
    primed: bool,
}

impl ClockSequence {
    /// Creates an empty state.
    pub const fn new() -> Self {
        Self {
            timestamp: 0,
            horizon: 0,
            issued: 0,
            sequence: 0,
            primed: false,
        }
    }

    /// Returns the raw timestamp of the last fresh start.
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns the last timestamp that still continues the current sequence.
    pub const fn horizon(&self) -> u64 {
        self.horizon
    }

    /// Returns the timestamp of the last identifier issued.
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    /// Determines the timestamp and sequence for a new identifier from `timestamp` and the
    /// previous state, for a sequence field `bits` wide.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is not within `1..=16`.
    pub fn next(&mut self, timestamp: u64, bits: u32, rng: &mut impl RandSource) -> Tick {
        assert!((1..=16).contains(&bits), "`bits` out of range");
        let width = 1u64 << bits;

        let transition =
            if self.primed && self.timestamp <= timestamp && timestamp <= self.horizon {
                self.issued = self.issued.max(timestamp);
                self.sequence += rng.next_below(width >> 1) + 1;
                if self.sequence >= width {
                    // the step is at most width / 2, so the counter wraps at most once
                    let overflow = self.sequence - width;
                    self.issued += self.sequence >> bits;
                    self.horizon = (self.horizon + overflow / 10).max(self.issued);
                    self.sequence &= width - 1;
                    tracing::trace!(
                        issued = self.issued,
                        horizon = self.horizon,
                        "clock sequence overflowed"
                    );
                }
                Transition::Coalesced
            } else {
                if self.primed && timestamp < self.timestamp {
                    tracing::debug!(
                        previous = self.timestamp,
                        current = timestamp,
                        "timestamp moved backward; clock sequence restarts"
                    );
                }
                self.timestamp = timestamp;
                self.horizon = timestamp;
                self.issued = timestamp;
                self.sequence = rng.next_below(width);
                self.primed = true;
                Transition::Fresh
            };

        Tick {
            timestamp: self.issued,
            sequence: self.sequence as u16,
            transition,
        }
    }
}
