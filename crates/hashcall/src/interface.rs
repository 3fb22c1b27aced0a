//! Interface for hash backends. It contains the backend result type, the
//! backend output type, the backend error type and the [`HashBackend`] trait
//! every backend implements.
use alloy_primitives::{Address, Bytes};
use auto_impl::auto_impl;

/// A backend call result type
///
/// Returns either `Ok(BackendOutput)` or `Err(BackendError)`.
pub type BackendResult = Result<BackendOutput, BackendError>;

/// Backend execution output
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BackendOutput {
    /// Gas used by the backend
    pub gas_used: u64,
    /// Output bytes
    pub bytes: Bytes,
}

impl BackendOutput {
    /// Returns new backend output with the given gas used and output bytes.
    pub fn new(gas_used: u64, bytes: Bytes) -> Self {
        Self { gas_used, bytes }
    }
}

/// Hashing backend reached through a reserved address.
///
/// `input` is the tagged request buffer: the selector byte followed by the
/// algorithm payload. On success the backend returns exactly `output_len`
/// bytes and never reports more gas than `gas_limit`.
#[auto_impl(&, Box, Arc)]
pub trait HashBackend {
    /// Runs the algorithm named by `input[0]` over the rest of `input`.
    fn call(
        &self,
        address: &Address,
        input: &[u8],
        gas_limit: u64,
        output_len: usize,
    ) -> BackendResult;
}

/// Backend error type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum BackendError {
    /// Call needed more gas than its limit
    #[error("out of gas")]
    OutOfGas,
    /// Request buffer did not even carry a selector byte
    #[error("empty request buffer")]
    EmptyInput,
    /// Selector not served by this backend
    #[error("unknown selector {0:#04x}")]
    UnknownSelector(u8),
    /// Addressed account is not a hash backend
    #[error("{0} is not a hash backend")]
    NotHashBackend(Address),
    /// Backend produced (or would produce) a different number of bytes than requested
    #[error("output length mismatch: expected {expected}, got {actual}")]
    OutputLength {
        /// Requested output length
        expected: usize,
        /// Length the backend produced
        actual: usize,
    },
    /// Payload rejected by the backend
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Catch-all variant for other errors
    #[error("{0}")]
    Other(String),
}

impl BackendError {
    /// Returns another error with the given message.
    pub fn other(err: impl Into<String>) -> Self {
        Self::Other(err.into())
    }

    /// Returns `true` if the error is out of gas.
    pub fn is_oog(&self) -> bool {
        matches!(self, Self::OutOfGas)
    }
}
