//! UUID versions 1, 4, 6 and 7 with a shared clock-sequence state and a timestamp-aware ordering
//!
//! ```rust
//! use uuidkit::{uuid1, uuid4, uuid6, uuid7};
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian array
//!
//! // versions 1 and 6 share the same Gregorian clock sequence
//! let (a, b) = (uuid1(), uuid6());
//! assert!(a < b);
//!
//! println!("{}", uuid4()); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # Field and bit layout
//!
//! A [`Uuid`] holds three fields: the 48-bit `high48`, the 32-bit `mid32` and the 48-bit
//! `low48`. The version nibble sits at the top of `mid32` and the variant bits at the top of its
//! low 16 bits:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            high48                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |            high48             |  ver  |     timestamp_low     |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|          sequence         |             low48             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             low48                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where, for the timestamped versions:
//!
//! - Version 1 places the low 32 bits of the 60-bit count of 100-nanosecond ticks since
//!   1582-10-15 first, the middle 16 bits next and the top 12 bits in `timestamp_low`.
//! - Version 6 places the same tick count most significant bits first, so that the binary order
//!   follows the creation time.
//! - Version 7 places the 48-bit Unix timestamp in milliseconds in `high48` and a 12-bit
//!   sub-millisecond fraction in `timestamp_low`.
//! - The 14-bit `sequence` comes from the clock-sequence state ([`ClockSequence`]), which starts
//!   at a random value for each new timestamp and advances by a random step when the timestamp
//!   repeats. Overflows carry into the timestamp; therefore, the timestamp may run slightly
//!   ahead of the real-time clock.
//! - `low48` holds the node. Random nodes have the multicast bit set.
//!
//! Minor backward clock jumps (less than one second by default) are hidden by repeating the last
//! clock reading. A larger jump restarts the clock sequence and thus breaks the monotonic order
//! of generated identifiers.
//!
//! # Ordering
//!
//! The [`Ord`] implementation of [`Uuid`] compares timestamped UUIDs by the time they encode
//! across versions and epochs. See the [`cmp`] module for details.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen` enables the process-wide default generator behind [`uuid1()`], [`uuid4()`],
//!   [`uuid6()`], [`uuid7()`] and [`generate()`].
//!
//! Optional features:
//!
//! - `serde` enables serialization and deserialization of [`Uuid`] and [`GeneratorConfig`].
//! - `uuid` enables conversion from and into `uuid::Uuid`.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, ParseError};

mod id;
pub use id::{Uuid, Variant};

pub mod clock;
pub use clock::{Clock, ClockSequence, StdSystemTime, TimeSource};

pub mod cmp;
pub mod rng;
pub mod timestamp;

mod config;
pub use config::GeneratorConfig;

mod generator;
pub use generator::{GenerateOptions, Generator};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{configure, generate, uuid1, uuid4, uuid6, uuid7};
