//! Timestamp bit layouts of UUID versions 1, 6 and 7
//!
//! A raw timestamp is a single `u64` with up to 60 significant bits. Versions 1 and 6 count
//! 100-nanosecond ticks since 1582-10-15 and version 7 places the 48-bit Unix millisecond
//! timestamp above twelve sub-millisecond bits. The raw value is split into the 48 bits stored in
//! `high48` and the 12 bits stored in `mid32` only when packed into a [`Uuid`](crate::Uuid):
//!
//! ```text
//! version 1:  high48 = time_low(32) | time_mid(16)    mid32 = ver | time_hi(12) | var+seq
//! version 6:  high48 = raw[59..12]                     mid32 = ver | raw[11..0]  | var+seq
//! version 7:  high48 = unix_ts_ms                      mid32 = ver | sub_ms(12)  | var+seq
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Error;

/// Number of 100-nanosecond ticks between 1582-10-15 and 1970-01-01.
pub const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// Largest raw timestamp that fits in 60 bits.
pub const MAX_RAW_TIMESTAMP: u64 = (1 << 60) - 1;

const TICKS_PER_SEC: u64 = 10_000_000;

/// The time base of a timestamped UUID version.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TimeBase {
    /// 100-nanosecond ticks since 1582-10-15 (versions 1 and 6).
    Gregorian,
    /// Milliseconds since 1970-01-01 followed by 1/4096 millisecond fractions (version 7).
    Unix,
}

impl TimeBase {
    /// Returns the time base of `version`, or `None` if the version is not timestamped.
    pub const fn of(version: u8) -> Option<Self> {
        match version {
            1 | 6 => Some(Self::Gregorian),
            7 => Some(Self::Unix),
            _ => None,
        }
    }

    /// Converts a wall-clock reading into a raw timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `time` precedes the epoch of this time base or does
    /// not fit in the 60-bit raw timestamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::{Duration, UNIX_EPOCH};
    /// use uuidkit::timestamp::TimeBase;
    ///
    /// let t = UNIX_EPOCH + Duration::from_micros(1_234_500);
    /// assert_eq!(TimeBase::Unix.encode(t)?, 1_234 << 12 | 2_048);
    /// assert_eq!(TimeBase::Gregorian.encode(t)?, 0x01b2_1dd2_1381_4000 + 12_345_000);
    /// # Ok::<(), uuidkit::Error>(())
    /// ```
    pub fn encode(self, time: SystemTime) -> Result<u64, Error> {
        match self {
            Self::Gregorian => {
                let ticks = match time.duration_since(UNIX_EPOCH) {
                    Ok(since) => (since.as_nanos() / 100).checked_add(GREGORIAN_OFFSET as u128),
                    Err(err) => {
                        // round toward the past so that the tick count never overstates time
                        let before = (err.duration().as_nanos() + 99) / 100;
                        (GREGORIAN_OFFSET as u128).checked_sub(before)
                    }
                }
                .ok_or(Error::InvalidArgument("time precedes the Gregorian epoch"))?;

                if ticks > MAX_RAW_TIMESTAMP as u128 {
                    return Err(Error::InvalidArgument("time beyond the 60-bit tick range"));
                }
                Ok(ticks as u64)
            }
            Self::Unix => {
                let since = time
                    .duration_since(UNIX_EPOCH)
                    .map_err(|_| Error::InvalidArgument("time precedes the Unix epoch"))?;
                let millis = since.as_millis();
                if millis >= 1 << 48 {
                    return Err(Error::InvalidArgument("time beyond the 48-bit millisecond range"));
                }
                let fraction = u64::from(since.subsec_nanos() % 1_000_000) * 4096 / 1_000_000;
                Ok((millis as u64) << 12 | fraction)
            }
        }
    }

    /// Converts a raw timestamp back into a wall-clock time, in 100-nanosecond precision for the
    /// Gregorian base and in millisecond precision for the Unix base.
    pub fn decode(self, raw: u64) -> Option<SystemTime> {
        match self {
            Self::Gregorian => {
                if raw >= GREGORIAN_OFFSET {
                    UNIX_EPOCH.checked_add(ticks_to_duration(raw - GREGORIAN_OFFSET))
                } else {
                    UNIX_EPOCH.checked_sub(ticks_to_duration(GREGORIAN_OFFSET - raw))
                }
            }
            Self::Unix => UNIX_EPOCH.checked_add(Duration::from_millis(raw >> 12)),
        }
    }
}

fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::new(
        ticks / TICKS_PER_SEC,
        (ticks % TICKS_PER_SEC) as u32 * 100,
    )
}

/// Splits a raw timestamp into the `high48` field and the twelve bits stored in `mid32`.
pub(crate) const fn pack(version: u8, raw: u64) -> (u64, u16) {
    if version == 1 {
        let time_low = raw & 0xffff_ffff;
        let time_mid = (raw >> 32) & 0xffff;
        let time_hi = (raw >> 48) & 0xfff;
        ((time_low << 16) | time_mid, time_hi as u16)
    } else {
        ((raw >> 12) & 0xffff_ffff_ffff, (raw & 0xfff) as u16)
    }
}

/// Reassembles a raw timestamp from the `high48` field and the twelve bits stored in `mid32`.
pub(crate) const fn unpack(version: u8, high48: u64, bits12: u16) -> u64 {
    let bits12 = (bits12 & 0xfff) as u64;
    if version == 1 {
        let time_low = high48 >> 16;
        let time_mid = high48 & 0xffff;
        (bits12 << 48) | (time_mid << 32) | time_low
    } else {
        (high48 << 12) | bits12
    }
}
