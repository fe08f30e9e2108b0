//! Process-wide sequence counter.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::generator::{RandSource, RandSourceError};

/// Represents the 32-bit counter whose low 24 bits are embedded in each ObjectID.
///
/// The counter is shared by reference; every call of [`next`](Counter::next) atomically advances
/// the state, so concurrent callers never observe the same value until the counter wraps around
/// after 2<sup>32</sup> increments.
#[derive(Debug, Default)]
pub struct Counter(AtomicU32);

impl Counter {
    /// Creates a counter with the given initial state.
    pub const fn new(value: u32) -> Self {
        Self(AtomicU32::new(value))
    }

    /// Creates a counter initialized with four bytes read from `rng`, interpreted as a big-endian
    /// integer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objectid::Counter;
    ///
    /// let mut src: &[u8] = &[0x00, 0x00, 0x01, 0x00];
    /// let counter = Counter::from_rand(&mut src)?;
    /// assert_eq!(counter.next(), 0x101);
    /// # Ok::<(), objectid::RandSourceError>(())
    /// ```
    pub fn from_rand(rng: &mut impl RandSource) -> Result<Self, RandSourceError> {
        let mut buf = [0u8; 4];
        rng.try_fill_bytes(&mut buf)?;
        Ok(Self::new(u32::from_be_bytes(buf)))
    }

    /// Increments the counter by one and returns the new value, wrapping around on overflow.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    /// Returns the current state without advancing it.
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }

    /// Replaces the current state.
    ///
    /// This is not ordered against concurrent [`next`](Counter::next) calls; a caller that needs
    /// a deterministic sequence must not race the two.
    pub fn set(&self, value: u32) {
        self.0.store(value, Ordering::SeqCst);
    }
}

impl From<u32> for Counter {
    fn from(src: u32) -> Self {
        Self::new(src)
    }
}
