//! Integration with `rand` (v0.8) crate.

use rand::RngCore;

use super::RandSource;
use crate::{clock::StdSystemTime, Generator};

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

impl<T: RngCore> Generator<Adapter<T>, StdSystemTime> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate, reading the system clock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidkit::Generator;
    ///
    /// let mut g = Generator::with_rand08(rand::rngs::OsRng);
    /// println!("{}", g.generate(7)?);
    /// # Ok::<(), uuidkit::Error>(())
    /// ```
    pub fn with_rand08(rng: T) -> Self {
        Self::with_sources(Adapter(rng), StdSystemTime)
    }
}
