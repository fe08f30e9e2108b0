//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{MachineProcessId, ObjectId, ObjectIdGenerator, RandSource, RandSourceError};
use inner::GlobalGenInner;

static G: sync::OnceLock<GlobalGenInner> = sync::OnceLock::new();

/// Returns the process-wide global generator, creating one if none exists.
///
/// The generator is seeded from the operating system's secure random source upon first use, and
/// the seeding runs only once even if multiple threads race to call this function. On Unix, the
/// counter and the machine and process discriminator are reseeded when the process ID changes
/// (i.e., upon process forks), so a child process never reuses its parent's discriminator.
///
/// # Panics
///
/// Panics if the operating system's random source fails, as identifiers cannot be generated
/// safely without it.
pub fn global() -> &'static ObjectIdGenerator {
    G.get_or_init(GlobalGenInner::from_os_rng).get()
}

/// Initializes the global generator with a random source of the caller's choice, returning
/// `Ok(true)` if the generator has been initialized by this call or `Ok(false)` if it had already
/// been initialized, in which case `src` is not used.
///
/// Call this function once at startup, before any other function in this module, to control the
/// seed of the process-wide generator.
///
/// # Examples
///
/// ```rust
/// let seed: &[u8] = &[0, 0, 0, 0, 1, 2, 3, 4, 5];
/// objectid::init_with(seed)?;
/// # Ok::<(), objectid::RandSourceError>(())
/// ```
pub fn init_with(mut src: impl RandSource) -> Result<bool, RandSourceError> {
    if G.get().is_some() {
        return Ok(false);
    }
    let generator = ObjectIdGenerator::from_rand(&mut src)?;
    Ok(G.set(GlobalGenInner::new(generator)).is_ok())
}

/// Generates an ObjectID object from the current system time.
///
/// This function employs the global generator, and thus the counters of ObjectIDs generated by
/// all threads of a process come from a single sequence.
///
/// # Examples
///
/// ```rust
/// let id = objectid::object_id();
/// println!("{}", id); // e.g., "640c5fe5d243553cda8dde1b"
/// println!("{:?}", id.as_bytes()); // as 12-byte big-endian array
///
/// let id_string: String = objectid::object_id().to_string();
/// ```
pub fn object_id() -> ObjectId {
    global().generate()
}

/// Generates an ObjectID object from the `unix_ts_secs` passed, keeping only its low 32 bits.
///
/// # Examples
///
/// ```rust
/// let id = objectid::object_id_at(1_678_532_581);
/// assert_eq!(id.timestamp_secs(), 1_678_532_581);
/// ```
pub fn object_id_at(unix_ts_secs: i64) -> ObjectId {
    global().generate_with_timestamp(unix_ts_secs)
}

/// Replaces the counter state of the global generator.
///
/// This is primarily for deterministic tests. Calls racing against concurrent ObjectID generation
/// produce no predictable sequence.
pub fn set_counter(value: u32) {
    global().set_counter(value);
}

/// Replaces the machine and process discriminator of the global generator.
///
/// This lets the host program assign discriminators by a policy of its own, e.g. one derived from
/// a stable host identifier. On Unix, the value set is discarded upon process forks.
pub fn set_machine_process_id(machine_process_id: MachineProcessId) {
    global().set_machine_process_id(machine_process_id);
}

mod inner {
    use rand::rngs::OsRng;

    use crate::ObjectIdGenerator;

    /// Seeds a new generator from the operating system's random source.
    fn seed_from_os() -> ObjectIdGenerator {
        match ObjectIdGenerator::with_rand08(OsRng) {
            Ok(generator) => generator,
            Err(err) => {
                tracing::error!(error = %err, "objectid: could not seed global generator");
                panic!("objectid: could not seed global generator: {err}");
            }
        }
    }

    /// A thin wrapper to reseed the generator when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: std::sync::atomic::AtomicU32,
        #[cfg(unix)]
        reseed_lock: std::sync::Mutex<()>,
        generator: ObjectIdGenerator,
    }

    impl GlobalGenInner {
        pub fn new(generator: ObjectIdGenerator) -> Self {
            Self {
                #[cfg(unix)]
                pid: std::sync::atomic::AtomicU32::new(std::process::id()),
                #[cfg(unix)]
                reseed_lock: std::sync::Mutex::new(()),
                generator,
            }
        }

        pub fn from_os_rng() -> Self {
            Self::new(seed_from_os())
        }

        /// Returns a reference to the inner [`ObjectIdGenerator`] instance, reseeding the
        /// generator on Unix if the process ID has changed.
        ///
        /// The new process ID is published only after the reseed completes, so no thread of a
        /// forked child reads the generator in its parent's state.
        pub fn get(&self) -> &ObjectIdGenerator {
            #[cfg(unix)]
            {
                use std::sync::{atomic::Ordering, PoisonError};
                let pid = std::process::id();
                if self.pid.load(Ordering::Acquire) != pid {
                    let _guard = self
                        .reseed_lock
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner);
                    if self.pid.load(Ordering::Acquire) != pid {
                        let fresh = seed_from_os();
                        self.generator.set_counter(fresh.counter().get());
                        self.generator
                            .set_machine_process_id(fresh.machine_process_id());
                        self.pid.store(pid, Ordering::Release);
                    }
                }
            }
            &self.generator
        }
    }

}
