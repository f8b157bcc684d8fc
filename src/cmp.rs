//! Orderings of UUIDs
//!
//! The natural ordering ([`Ord`]) of [`Uuid`] is timestamp-aware:
//!
//! 1.  UUIDs without a timestamp (versions other than 1, 6, 7 and 8, or a variant other than
//!     [`Variant::Var10`]) are ordered by their fields, i.e., as 128-bit big-endian integers.
//! 2.  A UUID with a timestamp is greater than any UUID without one.
//! 3.  UUIDs with timestamps are ordered by the time they encode, then by sequence. Versions 1
//!     and 6 share the same tick count and thus compare exactly. Versions 7 and 8 are read as a
//!     48-bit Unix millisecond timestamp followed by twelve sub-millisecond bits and are compared
//!     to versions 1 and 6 after shifting the Gregorian ticks to the Unix epoch and scaling both
//!     sides to a common unit. Since the twelve bits of version 7 need not be a time fraction,
//!     this cross-epoch comparison is approximate below one millisecond. Even when they are, a
//!     version 7 fraction is truncated to 1/4096 ms, so a version 1 or 6 UUID can sort after a
//!     version 7 UUID created up to 1/4096 ms (about 244 ns) later.
//! 4.  Remaining ties are broken by node, version and variant.
//!
//! [`compare_binary()`] provides the plain binary ordering for callers that need it.

use std::cmp::Ordering;

use crate::id::{Uuid, Variant};
use crate::timestamp::{self, GREGORIAN_OFFSET};

/// Common time units per 100-nanosecond Gregorian tick.
const UNITS_PER_TICK: i128 = 4096;

/// Common time units per 1/4096 millisecond of the Unix-based layout.
const UNITS_PER_UNIX_FRACTION: i128 = 10_000;

/// Compares two UUIDs with the timestamp-aware ordering, which is also the [`Ord`] of [`Uuid`].
///
/// # Examples
///
/// ```rust
/// use uuidkit::{cmp, Uuid};
///
/// // 1997-02-03 (version 1) vs 2022-02-22 (version 7)
/// let x: Uuid = "f81d4fae-7dec-11d0-a765-00a0c91e6bf6".parse()?;
/// let y: Uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse()?;
/// assert!(cmp::compare(&x, &y).is_lt());
/// assert!(cmp::compare_binary(&x, &y).is_gt());
/// # Ok::<(), uuidkit::ParseError>(())
/// ```
pub fn compare(a: &Uuid, b: &Uuid) -> Ordering {
    match (time_magnitude(a), time_magnitude(b)) {
        (None, None) => compare_binary(a, b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x
            .cmp(&y)
            .then_with(|| a.sequence().cmp(&b.sequence()))
            .then_with(|| a.node().cmp(&b.node()))
            .then_with(|| a.version().cmp(&b.version()))
            .then_with(|| a.variant().cmp(&b.variant())),
    }
}

/// Compares two UUIDs by their fields in declared order, which equals the byte-wise order.
pub fn compare_binary(a: &Uuid, b: &Uuid) -> Ordering {
    (a.high48(), a.mid32(), a.low48()).cmp(&(b.high48(), b.mid32(), b.low48()))
}

/// Returns the time encoded in `e` in common units since the Unix epoch, or `None` if `e` does
/// not carry an orderable timestamp.
fn time_magnitude(e: &Uuid) -> Option<i128> {
    if e.variant() != Variant::Var10 {
        return None;
    }
    let raw = timestamp::unpack(e.version(), e.high48(), e.mid_timestamp_bits()) as i128;
    match e.version() {
        1 | 6 => Some((raw - GREGORIAN_OFFSET as i128) * UNITS_PER_TICK),
        7 | 8 => Some(raw * UNITS_PER_UNIX_FRACTION),
        _ => None,
    }
}

impl Uuid {
    /// Compares with `other` by fields only, ignoring timestamp semantics.
    pub fn cmp_binary(&self, other: &Self) -> Ordering {
        compare_binary(self, other)
    }
}

impl Ord for Uuid {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl PartialOrd for Uuid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::{compare, compare_binary};
    use crate::Uuid;
    use std::cmp::Ordering;

    fn uuid(text: &str) -> Uuid {
        text.parse().unwrap()
    }

    /// Orders UUIDs without timestamps by their fields
    #[test]
    fn orders_uuids_without_timestamps_by_their_fields() {
        let sorted = [
            uuid("00000000-0000-0000-0000-000000000000"),
            uuid("00000000-0000-4000-8000-000000000001"),
            uuid("00000001-0000-4000-8000-000000000000"),
            uuid("ffffffff-ffff-1fff-0fff-ffffffffffff"),
            uuid("ffffffff-ffff-4fff-bfff-ffffffffffff"),
            uuid("ffffffff-ffff-7fff-cfff-ffffffffffff"),
            uuid("ffffffff-ffff-ffff-ffff-ffffffffffff"),
        ];
        for i in 1..sorted.len() {
            assert_eq!(compare(&sorted[i - 1], &sorted[i]), Ordering::Less);
            assert_eq!(compare_binary(&sorted[i - 1], &sorted[i]), Ordering::Less);
        }
    }

    /// Places timestamped UUIDs after those without timestamps
    #[test]
    fn places_timestamped_uuids_after_those_without_timestamps() {
        let earliest_v1 = uuid("00000000-0000-1000-8000-000000000000");
        let earliest_v8 = uuid("00000000-0000-8000-8000-000000000000");
        let max_v4 = uuid("ffffffff-ffff-4fff-bfff-ffffffffffff");
        assert!(max_v4 < earliest_v1);
        assert!(max_v4 < earliest_v8);
        assert!(Uuid::MAX < earliest_v1);
        assert!(Uuid::NIL < max_v4);
        assert_eq!(compare_binary(&max_v4, &earliest_v1), Ordering::Greater);
    }

    /// Orders version 1 by time although the byte order differs
    #[test]
    fn orders_version_1_by_time_although_the_byte_order_differs() {
        // time_low wraps from 0xffffffff to 0x00000000 while time_mid increments
        let earlier = uuid("ffffffff-0000-1000-8000-000000000000");
        let later = uuid("00000000-0001-1000-8000-000000000000");
        assert!(earlier < later);
        assert_eq!(earlier.cmp_binary(&later), Ordering::Greater);
        assert!(earlier.raw_timestamp() < later.raw_timestamp());
    }

    /// Compares versions 1 and 6 by tick count
    #[test]
    fn compares_versions_1_and_6_by_tick_count() {
        let v1 = uuid("f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
        let v6 = uuid("1d07decf-81d4-6fae-a765-00a0c91e6bf6");
        assert_eq!(v1.raw_timestamp(), v6.raw_timestamp());

        // same time, sequence and node: version breaks the tie
        assert!(v1 < v6);

        let v6_next_tick = uuid("1d07decf-81d4-6faf-8000-000000000000");
        assert!(v1 < v6_next_tick);

        let v6_higher_sequence = uuid("1d07decf-81d4-6fae-a766-000000000000");
        assert!(v1 < v6_higher_sequence);
    }

    /// Compares Gregorian and Unix timestamps on a common scale
    #[test]
    fn compares_gregorian_and_unix_timestamps_on_a_common_scale() {
        // 1997-02-03T17:43:12.216875Z
        let v1 = uuid("f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
        // 1997-02-03T17:43:12.216Z and .217Z
        let v7_before = uuid("00c7117b-6858-7000-8000-000000000000");
        let v7_after = uuid("00c7117b-6859-7000-8000-000000000000");
        assert!(v7_before < v1);
        assert!(v1 < v7_after);

        // sub-millisecond bits of version 7 are read as 1/4096 ms: 0xe00 = 0.875 ms
        let v7_tie = uuid("00c7117b-6858-7e00-a765-00a0c91e6bf6");
        let v7_past = uuid("00c7117b-6858-7e01-8000-000000000000");
        assert_eq!(compare(&v1, &v7_tie), Ordering::Less);
        assert!(v1 < v7_past);

        // version 8 is laid out as version 7 for ordering
        let v8 = uuid("00c7117b-6859-8000-8000-000000000000");
        assert!(v1 < v8);
        assert!(v7_before < v8);
    }

    /// Orders by the truncated version 7 fraction within 1/4096 ms
    #[test]
    fn orders_by_the_truncated_version_7_fraction_within_a_fraction_unit() {
        // 1997-02-03T17:43:12.2160004Z
        let v1 = uuid("f81d2d84-7dec-11d0-8000-000000000000");
        // 1997-02-03T17:43:12.21600044Z, truncated to 1/4096 ms
        let v7_later = uuid("00c7117b-6858-7001-8000-000000000000");
        assert!(v1 > v7_later);

        let v7_next_unit = uuid("00c7117b-6858-7002-8000-000000000000");
        assert!(v1 < v7_next_unit);
    }

    /// Breaks ties by sequence, node, version and variant
    #[test]
    fn breaks_ties_by_sequence_node_version_and_variant() {
        let base = uuid("017f22e2-79b0-7cc3-98c4-dc0c0c07398f");
        let higher_sequence = uuid("017f22e2-79b0-7cc3-98c5-000000000000");
        let lower_node = uuid("017f22e2-79b0-7cc3-98c4-dc0c0c07398e");
        assert!(base < higher_sequence);
        assert!(lower_node < base);
        assert_eq!(compare(&base, &base), Ordering::Equal);
    }

    mod properties {
        use super::super::compare;
        use crate::Uuid;
        use proptest::prelude::*;
        use std::cmp::Ordering;

        prop_compose! {
            fn arb_uuid()(
                raw in any::<u128>(),
                version in prop::sample::select(vec![0u128, 1, 4, 6, 7, 8, 15]),
                rfc_variant in any::<bool>(),
            ) -> Uuid {
                let mut raw = raw & !(0xf << 76) | version << 76;
                if rfc_variant {
                    raw = raw & !(0b11 << 62) | 0b10 << 62;
                }
                Uuid::from(raw)
            }
        }

        proptest! {
            /// Is antisymmetric and consistent with equality
            #[test]
            fn is_antisymmetric_and_consistent_with_equality(a in arb_uuid(), b in arb_uuid()) {
                prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
                prop_assert_eq!(compare(&a, &b) == Ordering::Equal, a == b);
                prop_assert_eq!(compare(&a, &a), Ordering::Equal);
            }

            /// Is transitive
            #[test]
            fn is_transitive(a in arb_uuid(), b in arb_uuid(), c in arb_uuid()) {
                if a <= b && b <= c {
                    prop_assert!(a <= c);
                }

                let mut sorted = [a, b, c];
                sorted.sort();
                prop_assert!(sorted[0] <= sorted[1]);
                prop_assert!(sorted[1] <= sorted[2]);
                prop_assert!(sorted[0] <= sorted[2]);
            }
        }
    }
}
