//! A Rust implementation of MongoDB-style ObjectID
//!
//! ```rust
//! use objectid::object_id;
//!
//! let id = object_id();
//! println!("{}", id); // e.g., "640c5fe5d243553cda8dde1b"
//! println!("{:?}", id.as_bytes()); // as 12-byte big-endian array
//! ```
//!
//! See [ObjectId in the MongoDB manual](https://www.mongodb.com/docs/manual/reference/method/ObjectId/).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         unix_ts_secs                          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                      machine_process_id                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! | machine_process_id |                 counter                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 32-bit `unix_ts_secs` field is dedicated to the Unix timestamp in seconds, which lasts
//!   until the year 2106.
//! - The 40-bit `machine_process_id` field holds a random value generated once per process to
//!   distinguish the identifiers of concurrently running processes.
//! - The 24-bit `counter` field holds the low 24 bits of a process-wide 32-bit counter that starts
//!   at a random value and is incremented by one for each new identifier.
//!
//! All fields are big-endian. The identifiers are unique, not unguessable; do not use them as
//! security tokens.
//!
//! # Text and structured-data representations
//!
//! The text representation is 24 lowercase hexadecimal digits. Parsing accepts both upper and
//! lower case:
//!
//! ```rust
//! use objectid::ObjectId;
//!
//! let id: ObjectId = "640C5FE5D243553CDA8DDE1B".parse()?;
//! assert_eq!(id.to_string(), "640c5fe5d243553cda8dde1b");
//! assert_eq!(id.timestamp_secs(), 1_678_532_581);
//! assert_eq!(id.counter(), 0x8d_de1b);
//! # Ok::<(), objectid::ParseError>(())
//! ```
//!
//! With the `serde` feature, human-readable formats such as JSON carry the same string, so an
//! ObjectID also works as a key of a JSON object. The [`value`] module converts ObjectIDs to and
//! from untyped database values.
//!
//! # Generators
//!
//! [`object_id()`] employs a process-wide generator seeded from the operating system's random
//! source on first use. A host program that prefers an explicitly owned generator creates an
//! [`ObjectIdGenerator`] and passes it to whatever creates identifiers:
//!
//! ```rust
//! use objectid::{MachineProcessId, ObjectIdGenerator};
//!
//! let g = ObjectIdGenerator::new(MachineProcessId::from([0xd2, 0x43, 0x55, 0x3c, 0xda]), 0);
//! let id = g.generate_with_timestamp(1_678_532_581);
//! assert_eq!(id.to_string(), "640c5fe5d243553cda000001");
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen`: enables the process-wide generator and the entry point functions. This
//!   feature implies `std`.
//! - `serde`: enables serialization and deserialization of [`ObjectId`] via serde.
//!
//! Optional features:
//!
//! - `std`: enables features that depend on the standard library, such as
//!   [`ObjectId::timestamp`] and the [`value`] module. Without it, the crate is `no_std`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{ObjectId, ParseError};

mod counter;
pub use counter::Counter;

mod machine_process_id;
pub use machine_process_id::MachineProcessId;

pub mod generator;
pub use generator::{ObjectIdGenerator, RandSource, RandSourceError};

pub mod value;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{
    global, init_with, object_id, object_id_at, set_counter, set_machine_process_id,
};
