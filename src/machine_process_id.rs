use core::fmt;

use crate::generator::{RandSource, RandSourceError};

/// Represents the 5-byte machine and process discriminator embedded in each ObjectID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct MachineProcessId([u8; 5]);

impl MachineProcessId {
    /// Creates a discriminator from raw bytes.
    pub const fn from_bytes(bytes: [u8; 5]) -> Self {
        Self(bytes)
    }

    /// Creates a discriminator filled with five bytes read from `rng`.
    pub fn from_rand(rng: &mut impl RandSource) -> Result<Self, RandSourceError> {
        let mut buf = [0u8; 5];
        rng.try_fill_bytes(&mut buf)?;
        Ok(Self(buf))
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 5] {
        &self.0
    }
}

impl fmt::Display for MachineProcessId {
    /// Returns the 10-digit lowercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|e| write!(f, "{e:02x}"))
    }
}

impl From<[u8; 5]> for MachineProcessId {
    fn from(src: [u8; 5]) -> Self {
        Self(src)
    }
}

impl From<MachineProcessId> for [u8; 5] {
    fn from(src: MachineProcessId) -> Self {
        src.0
    }
}
