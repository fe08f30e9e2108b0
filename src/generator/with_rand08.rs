//! Integration with `rand` (v0.8) crate.

use super::{ObjectIdGenerator, RandSource, RandSourceError};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandSourceError> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|_| RandSourceError::new(dest.len()))
    }
}

impl ObjectIdGenerator {
    /// Creates a generator seeded from a random number generator that implements [`RngCore`] from
    /// `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objectid::ObjectIdGenerator;
    ///
    /// let g = ObjectIdGenerator::with_rand08(rand::thread_rng())?;
    /// println!("{}", g.generate());
    /// # Ok::<(), objectid::RandSourceError>(())
    /// ```
    pub fn with_rand08<T: RngCore>(rng: T) -> Result<Self, RandSourceError> {
        Self::from_rand(&mut Adapter(rng))
    }
}
