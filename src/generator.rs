//! ObjectID generator and related types.

use core::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{Counter, MachineProcessId, ObjectId};

pub mod with_rand08;

/// A trait that defines the minimum random source interface for [`ObjectIdGenerator`].
///
/// The generator reads from its source only when it is seeded, so the source is consumed
/// upfront and not retained.
pub trait RandSource {
    /// Fills `dest` entirely with random bytes or returns an error if the source cannot supply
    /// `dest.len()` bytes.
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandSourceError>;
}

/// Reads bytes from the front of the slice, advancing it past the bytes consumed.
///
/// The slice is left untouched if it holds fewer bytes than requested. This implementation is
/// useful for deterministic seeding.
impl RandSource for &[u8] {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandSourceError> {
        if self.len() < dest.len() {
            return Err(RandSourceError::new(dest.len()));
        }
        let (head, tail) = self.split_at(dest.len());
        dest.copy_from_slice(head);
        *self = tail;
        Ok(())
    }
}

/// Error reported when a random source could not supply the number of bytes requested.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RandSourceError {
    requested: usize,
}

impl RandSourceError {
    /// Creates an error for a failed request of `requested` bytes.
    pub const fn new(requested: usize) -> Self {
        Self { requested }
    }

    /// Returns the number of bytes that were requested.
    pub const fn requested(&self) -> usize {
        self.requested
    }
}

impl fmt::Display for RandSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "random source could not supply {} bytes",
            self.requested
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RandSourceError {}

/// Represents an ObjectID generator that encapsulates a counter and a machine and process
/// discriminator.
///
/// This type is the explicit counterpart of the process-wide default generator behind
/// [`object_id()`](crate::object_id): a host program may own one, seed it from a random source of
/// its choice, and hand it to whatever creates identifiers. All methods take `&self`, so a single
/// instance can be shared across threads by reference or through an `Arc`.
///
/// # Examples
///
/// ```rust
/// use objectid::ObjectIdGenerator;
/// use std::{sync, thread};
///
/// let g = sync::Arc::new(ObjectIdGenerator::with_rand08(rand::rngs::OsRng)?);
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// # Ok::<(), objectid::RandSourceError>(())
/// ```
///
/// # Generator functions
///
/// | Method                      | Timestamp                        |
/// | --------------------------- | -------------------------------- |
/// | [`generate`]                | Now, in seconds                  |
/// | [`generate_with_timestamp`] | Argument, truncated to 32 bits   |
///
/// Both advance the counter by one and embed the low 24 bits of the new value.
///
/// [`generate`]: ObjectIdGenerator::generate
/// [`generate_with_timestamp`]: ObjectIdGenerator::generate_with_timestamp
#[derive(Debug)]
pub struct ObjectIdGenerator {
    /// The machine and process discriminator packed into the low 40 bits.
    machine_process_id: AtomicU64,
    counter: Counter,
}

impl ObjectIdGenerator {
    /// Creates a generator instance from explicit field values.
    pub const fn new(machine_process_id: MachineProcessId, counter: u32) -> Self {
        Self {
            machine_process_id: AtomicU64::new(pack(machine_process_id)),
            counter: Counter::new(counter),
        }
    }

    /// Creates a generator seeded from `rng`: four bytes for the counter and then five bytes for
    /// the machine and process discriminator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objectid::ObjectIdGenerator;
    ///
    /// let mut src: &[u8] = &[0, 0, 0, 9, 0xd2, 0x43, 0x55, 0x3c, 0xda];
    /// let g = ObjectIdGenerator::from_rand(&mut src)?;
    /// assert_eq!(g.generate_with_timestamp(0x640c_5fe5).to_string(), "640c5fe5d243553cda00000a");
    /// # Ok::<(), objectid::RandSourceError>(())
    /// ```
    pub fn from_rand(rng: &mut impl RandSource) -> Result<Self, RandSourceError> {
        let counter = Counter::from_rand(rng)?;
        let machine_process_id = MachineProcessId::from_rand(rng)?;
        Ok(Self {
            machine_process_id: AtomicU64::new(pack(machine_process_id)),
            counter,
        })
    }

    /// Generates a new ObjectID from the current system time.
    ///
    /// The timestamp is the number of whole seconds since the Unix epoch, truncated to 32 bits.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate(&self) -> ObjectId {
        self.generate_with_timestamp(unix_ts_secs(std::time::SystemTime::now()))
    }

    /// Generates a new ObjectID from the `unix_ts_secs` passed, keeping only its low 32 bits.
    ///
    /// This is useful for backdating identifiers and for deterministic tests.
    pub fn generate_with_timestamp(&self, unix_ts_secs: i64) -> ObjectId {
        ObjectId::from_fields(
            unix_ts_secs as u32,
            self.machine_process_id(),
            self.counter.next(),
        )
    }

    /// Returns the current machine and process discriminator.
    pub fn machine_process_id(&self) -> MachineProcessId {
        unpack(self.machine_process_id.load(Ordering::Acquire))
    }

    /// Replaces the machine and process discriminator used for subsequent ObjectIDs.
    pub fn set_machine_process_id(&self, machine_process_id: MachineProcessId) {
        self.machine_process_id
            .store(pack(machine_process_id), Ordering::Release);
    }

    /// Returns a reference to the counter inside.
    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    /// Replaces the counter state. The next ObjectID embeds `value + 1`.
    pub fn set_counter(&self, value: u32) {
        self.counter.set(value);
    }

    /// Returns an infinite iterator that produces a new ObjectID from the current system time for
    /// each call of `next()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objectid::{MachineProcessId, ObjectIdGenerator};
    ///
    /// let g = ObjectIdGenerator::new(MachineProcessId::from([1, 2, 3, 4, 5]), 0);
    /// g.iter()
    ///     .enumerate()
    ///     .skip(4)
    ///     .take(4)
    ///     .for_each(|(i, e)| println!("[{}] {}", i, e));
    /// ```
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn iter(&self) -> Iter<'_> {
        Iter(self)
    }
}

/// An infinite iterator of ObjectIDs, created by [`ObjectIdGenerator::iter`].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Debug)]
pub struct Iter<'a>(&'a ObjectIdGenerator);

#[cfg(feature = "std")]
impl Iterator for Iter<'_> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.0.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(feature = "std")]
impl std::iter::FusedIterator for Iter<'_> {}

/// Returns the whole seconds since the Unix epoch, rounding times before the epoch toward
/// negative infinity.
#[cfg(feature = "std")]
fn unix_ts_secs(time: std::time::SystemTime) -> i64 {
    match time.duration_since(std::time::UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(err) => {
            let d = err.duration();
            -(d.as_secs() as i64) - i64::from(d.subsec_nanos() > 0)
        }
    }
}

const fn pack(src: MachineProcessId) -> u64 {
    let b = src.as_bytes();
    u64::from_be_bytes([0, 0, 0, b[0], b[1], b[2], b[3], b[4]])
}

const fn unpack(src: u64) -> MachineProcessId {
    let b = src.to_be_bytes();
    MachineProcessId::from_bytes([b[3], b[4], b[5], b[6], b[7]])
}
