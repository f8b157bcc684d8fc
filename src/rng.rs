//! Random number sources, including the fast generator that feeds identifier entropy.

use std::fmt;

use rand::{rngs::OsRng, Rng, RngCore};

use crate::error::Error;

pub mod with_rand08;

/// Default number of rounds of the [`FastRng`] permutation.
pub const DEFAULT_ROUNDS: u32 = 8;

/// Smallest number of rounds accepted by [`FastRng`].
pub const MIN_ROUNDS: u32 = 4;

/// Default number of 16-word blocks [`FastRng`] produces before mixing in fresh entropy.
pub const DEFAULT_RESEED_INTERVAL: u64 = 1 << 14;

/// A trait that defines the minimum random number generator interface for
/// [`Generator`](crate::Generator).
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;

    /// Returns a random integer in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    fn next_below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "`bound` must be positive");
        self.next_u64() % bound
    }
}

/// A fast, reduced-round block generator for identifier entropy.
///
/// The working block is a ChaCha-style state of sixteen 32-bit words. At the start of each block
/// the working block is XORed with a secret block and permuted with `rounds` ChaCha rounds; every
/// `reseed_interval` blocks, and on the very first request, both blocks are instead XORed with
/// fresh words from the trusted entropy source `E`. Requests bounded by `2^32` are served from
/// the working block; larger bounds are delegated to the entropy source.
///
/// This generator trades cryptographic strength for throughput. Its output is good enough to
/// make identifiers collision-resistant and hard to predict casually, but it must not be used for
/// keys, tokens or any other purpose beyond identifier generation.
///
/// # Examples
///
/// ```rust
/// use uuidkit::rng::{FastRng, RandSource};
///
/// let mut rng = FastRng::new();
/// assert!(rng.next_below(6) < 6);
/// ```
pub struct FastRng<E = OsRng> {
    block: [u32; 16],
    secret: [u32; 16],
    index: u64,
    rounds: u32,
    reseed_interval: u64,
    entropy: E,
}

impl FastRng<OsRng> {
    /// Creates a generator that draws its entropy from the operating system.
    pub const fn new() -> Self {
        Self::with_entropy(OsRng)
    }
}

impl Default for FastRng<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for FastRng<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastRng")
            .field("rounds", &self.rounds)
            .field("reseed_interval", &self.reseed_interval)
            .finish_non_exhaustive()
    }
}

impl<E> FastRng<E> {
    /// Creates a generator with the default round count and reseed interval.
    pub const fn with_entropy(entropy: E) -> Self {
        Self {
            block: [0; 16],
            secret: [0; 16],
            index: 0,
            rounds: DEFAULT_ROUNDS,
            reseed_interval: DEFAULT_RESEED_INTERVAL,
            entropy,
        }
    }

    /// Creates a generator with a custom round count and reseed interval (in blocks).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `rounds` is less than [`MIN_ROUNDS`] or
    /// `reseed_interval` is zero.
    pub fn with_config(entropy: E, rounds: u32, reseed_interval: u64) -> Result<Self, Error> {
        if rounds < MIN_ROUNDS {
            return Err(Error::InvalidArgument("fewer than four rounds requested"));
        }
        if reseed_interval == 0 {
            return Err(Error::InvalidArgument("reseed interval must be positive"));
        }
        Ok(Self {
            rounds,
            reseed_interval,
            ..Self::with_entropy(entropy)
        })
    }
}

impl<E: RngCore> FastRng<E> {
    /// Returns the next word of the working block, refilling the block at block boundaries.
    fn next_word(&mut self) -> u32 {
        let position = (self.index % 16) as usize;
        if position == 0 {
            if (self.index / 16) % self.reseed_interval == 0 {
                self.reseed();
            } else {
                for (w, s) in self.block.iter_mut().zip(self.secret.iter()) {
                    *w ^= s;
                }
                permute(&mut self.block, self.rounds);
            }
        }
        self.index = self.index.wrapping_add(1);
        self.block[position]
    }

    fn reseed(&mut self) {
        tracing::trace!(index = self.index, "reseeding fast random generator");
        let mut buffer = [0u8; 128];
        self.entropy.fill_bytes(&mut buffer);
        let (for_block, for_secret) = buffer.split_at(64);
        for (w, chunk) in self.block.iter_mut().zip(for_block.chunks_exact(4)) {
            *w ^= u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        for (w, chunk) in self.secret.iter_mut().zip(for_secret.chunks_exact(4)) {
            *w ^= u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
    }
}

impl<E: RngCore> RandSource for FastRng<E> {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        (self.next_word() as u64) << 32 | self.next_word() as u64
    }

    fn next_below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "`bound` must be positive");
        if bound <= 1 << 32 {
            self.next_word() as u64 % bound
        } else {
            self.entropy.gen_range(0..bound)
        }
    }
}

/// Applies `rounds` ChaCha rounds, alternating column and diagonal rounds, to `block` in place.
/// Unlike the ChaCha block function, the input is not added back to the output.
pub(crate) fn permute(block: &mut [u32; 16], rounds: u32) {
    for round in 0..rounds {
        if round % 2 == 0 {
            quarter_round(block, 0, 4, 8, 12);
            quarter_round(block, 1, 5, 9, 13);
            quarter_round(block, 2, 6, 10, 14);
            quarter_round(block, 3, 7, 11, 15);
        } else {
            quarter_round(block, 0, 5, 10, 15);
            quarter_round(block, 1, 6, 11, 12);
            quarter_round(block, 2, 7, 8, 13);
            quarter_round(block, 3, 4, 9, 14);
        }
    }
}

#[inline(always)]
fn quarter_round(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[a] = x[a].wrapping_add(x[b]);
    x[d] = (x[d] ^ x[a]).rotate_left(16);
    x[c] = x[c].wrapping_add(x[d]);
    x[b] = (x[b] ^ x[c]).rotate_left(12);
    x[a] = x[a].wrapping_add(x[b]);
    x[d] = (x[d] ^ x[a]).rotate_left(8);
    x[c] = x[c].wrapping_add(x[d]);
    x[b] = (x[b] ^ x[c]).rotate_left(7);
}
