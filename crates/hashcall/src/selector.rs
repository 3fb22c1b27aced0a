//! Selector bytes understood by the hash backend.
use core::fmt;

/// SHA3-256.
pub const SHA3_256: u8 = 0x00;
/// SHA3-512.
pub const SHA3_512: u8 = 0x01;
/// Keccak-512, the pre-standard padding variant of SHA3-512.
pub const KECCAK512: u8 = 0x02;
/// SHA2-512.
pub const SHA2_512: u8 = 0x03;
/// BLAKE2s driven by a 32-byte config record.
pub const BLAKE2S: u8 = 0x10;

/// Hash algorithms served through the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HashAlgorithm {
    /// SHA3-256 hash function.
    Sha3_256,
    /// SHA3-512 hash function.
    Sha3_512,
    /// Keccak-512 hash function.
    Keccak512,
    /// SHA2-512 hash function.
    Sha2_512,
    /// Parameterized BLAKE2s hash function.
    Blake2s,
}

impl HashAlgorithm {
    /// All algorithms, in selector order.
    pub const ALL: [Self; 5] = [
        Self::Sha3_256,
        Self::Sha3_512,
        Self::Keccak512,
        Self::Sha2_512,
        Self::Blake2s,
    ];

    /// Selector byte that routes to this algorithm.
    pub const fn selector(self) -> u8 {
        match self {
            Self::Sha3_256 => SHA3_256,
            Self::Sha3_512 => SHA3_512,
            Self::Keccak512 => KECCAK512,
            Self::Sha2_512 => SHA2_512,
            Self::Blake2s => BLAKE2S,
        }
    }

    /// Returns the algorithm for a selector byte.
    pub const fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            SHA3_256 => Some(Self::Sha3_256),
            SHA3_512 => Some(Self::Sha3_512),
            KECCAK512 => Some(Self::Keccak512),
            SHA2_512 => Some(Self::Sha2_512),
            BLAKE2S => Some(Self::Blake2s),
            _ => None,
        }
    }

    /// Fixed digest length in bytes.
    ///
    /// `None` for [`HashAlgorithm::Blake2s`], whose length comes from the
    /// config record.
    pub const fn output_len(self) -> Option<usize> {
        match self {
            Self::Sha3_256 => Some(32),
            Self::Sha3_512 | Self::Keccak512 | Self::Sha2_512 => Some(64),
            Self::Blake2s => None,
        }
    }

    /// Returns `true` if the algorithm takes a config record.
    pub const fn is_parameterized(self) -> bool {
        matches!(self, Self::Blake2s)
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_512 => "SHA3-512",
            Self::Keccak512 => "Keccak-512",
            Self::Sha2_512 => "SHA2-512",
            Self::Blake2s => "BLAKE2s",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
