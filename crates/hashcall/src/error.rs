//! Errors surfaced by the dispatcher and the config codec.
use crate::interface::BackendError;

/// Hash operation error.
///
/// Every variant is fatal to the operation that produced it; nothing is
/// retried and no partial output accompanies it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    /// The backend call did not complete successfully.
    ///
    /// The wrapped [`BackendError`] is informational; callers should treat
    /// every instance the same way.
    #[error("hash backend call failed: {0}")]
    BackendCallFailed(#[source] BackendError),
    /// A config record was requested with a key length above 32 bytes.
    #[error("invalid key length {0}, at most 32 bytes are allowed")]
    InvalidKeyLength(u8),
    /// The supplied key does not match the key length encoded in the config record.
    #[error("key length mismatch: config expects {expected} bytes, got {actual}")]
    KeyLengthMismatch {
        /// Key length encoded in the config record
        expected: u8,
        /// Length of the supplied key
        actual: usize,
    },
}

impl HashError {
    /// Returns `true` if the backend call failed.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::BackendCallFailed(_))
    }

    /// Returns the backend error, if the backend call failed.
    pub fn backend_error(&self) -> Option<&BackendError> {
        match self {
            Self::BackendCallFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for HashError {
    fn from(err: BackendError) -> Self {
        Self::BackendCallFailed(err)
    }
}
