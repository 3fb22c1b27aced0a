//! BLAKE2s config record codec.
//!
//! The record is the 32-byte BLAKE2s parameter block (with the BLAKE2Xs split
//! of the node offset word) and is laid out as follows:
//!
//! | offset | width | field               | encoding      |
//! |--------|-------|---------------------|---------------|
//! | 0      | 1     | digest size         | byte          |
//! | 1      | 1     | key length          | byte, <= 32   |
//! | 2      | 1     | fanout              | byte          |
//! | 3      | 1     | depth               | byte          |
//! | 4      | 4     | leaf length         | little-endian |
//! | 8      | 4     | node offset         | little-endian |
//! | 12     | 2     | xof digest length   | little-endian |
//! | 14     | 1     | node depth          | byte          |
//! | 15     | 1     | inner length        | byte          |
//! | 16     | 8     | salt                | raw bytes     |
//! | 24     | 8     | personalization     | raw bytes     |
use crate::error::HashError;
use alloy_primitives::B256;

/// Length of the config record.
pub const CONFIG_LEN: usize = 32;
/// Largest key the record can describe.
pub const MAX_KEY_LENGTH: u8 = 32;
/// Largest digest the record can describe.
pub const MAX_DIGEST_SIZE: u8 = 32;
/// Salt length.
pub const SALT_LEN: usize = 8;
/// Personalization length.
pub const PERSONALIZE_LEN: usize = 8;

const DIGEST_SIZE: usize = 0;
const KEY_LENGTH: usize = 1;
const FANOUT: usize = 2;
const DEPTH: usize = 3;
const LEAF_LENGTH: usize = 4;
const NODE_OFFSET: usize = 8;
const XOF_DIGEST_LENGTH: usize = 12;
const NODE_DEPTH: usize = 14;
const INNER_LENGTH: usize = 15;
const SALT: usize = 16;
const PERSONALIZE: usize = 24;

/// Decoded config record fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigParams {
    /// Output length in bytes, 1..=32.
    pub digest_size: u8,
    /// Key length in bytes, 0..=32.
    pub key_length: u8,
    /// Tree fanout, 0 means unlimited.
    pub fanout: u8,
    /// Maximal tree depth.
    pub depth: u8,
    /// Maximal leaf byte length.
    pub leaf_length: u32,
    /// Node offset.
    pub node_offset: u32,
    /// Extendable output length.
    pub xof_digest_length: u16,
    /// Depth of the node within the tree.
    pub node_depth: u8,
    /// Inner (non-leaf) digest length.
    pub inner_length: u8,
    /// Salt.
    pub salt: [u8; SALT_LEN],
    /// Personalization string.
    pub personalize: [u8; PERSONALIZE_LEN],
}

impl ConfigParams {
    /// Sequential, unkeyed hashing with the given digest size.
    pub const fn sequential(digest_size: u8) -> Self {
        Self {
            digest_size,
            key_length: 0,
            fanout: 1,
            depth: 1,
            leaf_length: 0,
            node_offset: 0,
            xof_digest_length: 0,
            node_depth: 0,
            inner_length: 0,
            salt: [0; SALT_LEN],
            personalize: [0; PERSONALIZE_LEN],
        }
    }

    /// Sets the key length.
    pub const fn with_key_length(mut self, key_length: u8) -> Self {
        self.key_length = key_length;
        self
    }

    /// Sets the salt.
    pub const fn with_salt(mut self, salt: [u8; SALT_LEN]) -> Self {
        self.salt = salt;
        self
    }

    /// Sets the personalization string.
    pub const fn with_personalize(mut self, personalize: [u8; PERSONALIZE_LEN]) -> Self {
        self.personalize = personalize;
        self
    }
}

/// 32-byte BLAKE2s config record.
///
/// The key length is validated when the record is created, the match between
/// the key length and an actual key only when the record is consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConfigRecord(B256);

impl ConfigRecord {
    /// Packs the given fields into a record.
    ///
    /// Fails with [`HashError::InvalidKeyLength`] if the key length exceeds
    /// [`MAX_KEY_LENGTH`]. Every other field is taken as given.
    pub fn encode(params: &ConfigParams) -> Result<Self, HashError> {
        if params.key_length > MAX_KEY_LENGTH {
            return Err(HashError::InvalidKeyLength(params.key_length));
        }

        let mut out = [0u8; CONFIG_LEN];
        out[DIGEST_SIZE] = params.digest_size;
        out[KEY_LENGTH] = params.key_length;
        out[FANOUT] = params.fanout;
        out[DEPTH] = params.depth;
        out[LEAF_LENGTH..NODE_OFFSET].copy_from_slice(&params.leaf_length.to_le_bytes());
        out[NODE_OFFSET..XOF_DIGEST_LENGTH].copy_from_slice(&params.node_offset.to_le_bytes());
        out[XOF_DIGEST_LENGTH..NODE_DEPTH]
            .copy_from_slice(&params.xof_digest_length.to_le_bytes());
        out[NODE_DEPTH] = params.node_depth;
        out[INNER_LENGTH] = params.inner_length;
        out[SALT..PERSONALIZE].copy_from_slice(&params.salt);
        out[PERSONALIZE..].copy_from_slice(&params.personalize);

        Ok(Self(B256::new(out)))
    }

    /// Unpacks every field of the record.
    pub fn decode(&self) -> ConfigParams {
        ConfigParams {
            digest_size: self.digest_size(),
            key_length: self.key_length(),
            fanout: self.fanout(),
            depth: self.depth(),
            leaf_length: self.leaf_length(),
            node_offset: self.node_offset(),
            xof_digest_length: self.xof_digest_length(),
            node_depth: self.node_depth(),
            inner_length: self.inner_length(),
            salt: self.salt(),
            personalize: self.personalize(),
        }
    }

    /// Wraps raw record bytes without validation.
    pub const fn from_bytes(bytes: [u8; CONFIG_LEN]) -> Self {
        Self(B256::new(bytes))
    }

    /// Wraps a slice of exactly [`CONFIG_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; CONFIG_LEN] = bytes.try_into().ok()?;
        Some(Self::from_bytes(bytes))
    }

    /// Raw record bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; CONFIG_LEN] {
        &self.0 .0
    }

    /// Output length in bytes.
    #[inline]
    pub fn digest_size(&self) -> u8 {
        self.0[DIGEST_SIZE]
    }

    /// Key length in bytes.
    #[inline]
    pub fn key_length(&self) -> u8 {
        self.0[KEY_LENGTH]
    }

    /// Tree fanout.
    #[inline]
    pub fn fanout(&self) -> u8 {
        self.0[FANOUT]
    }

    /// Maximal tree depth.
    #[inline]
    pub fn depth(&self) -> u8 {
        self.0[DEPTH]
    }

    /// Maximal leaf length.
    pub fn leaf_length(&self) -> u32 {
        u32::from_le_bytes(self.array::<4>(LEAF_LENGTH))
    }

    /// Node offset.
    pub fn node_offset(&self) -> u32 {
        u32::from_le_bytes(self.array::<4>(NODE_OFFSET))
    }

    /// Extendable output length.
    pub fn xof_digest_length(&self) -> u16 {
        u16::from_le_bytes(self.array::<2>(XOF_DIGEST_LENGTH))
    }

    /// Depth of the node within the tree.
    #[inline]
    pub fn node_depth(&self) -> u8 {
        self.0[NODE_DEPTH]
    }

    /// Inner digest length.
    #[inline]
    pub fn inner_length(&self) -> u8 {
        self.0[INNER_LENGTH]
    }

    /// Salt.
    pub fn salt(&self) -> [u8; SALT_LEN] {
        self.array(SALT)
    }

    /// Personalization string.
    pub fn personalize(&self) -> [u8; PERSONALIZE_LEN] {
        self.array(PERSONALIZE)
    }

    /// Checks that `key` has exactly the length the record announces.
    pub fn validate_key(&self, key: &[u8]) -> Result<(), HashError> {
        let expected = self.key_length();
        if key.len() != expected as usize {
            return Err(HashError::KeyLengthMismatch {
                expected,
                actual: key.len(),
            });
        }
        Ok(())
    }

    fn array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.0[offset..offset + N]);
        out
    }
}

impl From<ConfigRecord> for B256 {
    fn from(record: ConfigRecord) -> Self {
        record.0
    }
}

impl From<B256> for ConfigRecord {
    fn from(bytes: B256) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ConfigRecord {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// Packs the eleven config fields into a record.
///
/// See [`ConfigRecord::encode`].
#[allow(clippy::too_many_arguments)]
pub fn create_config(
    digest_size: u8,
    key_length: u8,
    fanout: u8,
    depth: u8,
    leaf_length: u32,
    node_offset: u32,
    xof_digest_length: u16,
    node_depth: u8,
    inner_length: u8,
    salt: [u8; SALT_LEN],
    personalize: [u8; PERSONALIZE_LEN],
) -> Result<ConfigRecord, HashError> {
    ConfigRecord::encode(&ConfigParams {
        digest_size,
        key_length,
        fanout,
        depth,
        leaf_length,
        node_offset,
        xof_digest_length,
        node_depth,
        inner_length,
        salt,
        personalize,
    })
}

/// Key length field of a record.
#[inline]
pub fn extract_key_length(config: &ConfigRecord) -> u8 {
    config.key_length()
}
