//! # hashcall
//!
//! Dispatch layer for hash precompiles reached through one reserved backend
//! address. Every request is tagged with a one-byte [selector] and forwarded to
//! a [`HashBackend`]; the BLAKE2s parameterized hash additionally carries a
//! 32-byte [`ConfigRecord`] in front of its preimage.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod interface;
#[cfg(feature = "native")]
pub mod native;
pub mod request;
pub mod selector;

pub use config::{create_config, extract_key_length, ConfigParams, ConfigRecord};
pub use dispatcher::{Dispatcher, DispatcherConfig, DEFAULT_GAS_LIMIT, HASH_BACKEND_ADDRESS};
pub use error::HashError;
pub use interface::*;
#[cfg(feature = "native")]
pub use native::NativeBackend;
pub use request::RequestBuffer;
pub use selector::HashAlgorithm;

pub use alloy_primitives::{Address, Bytes, B256, B512};

/// Calculates the linear cost of hashing `len` bytes: `base` plus `word` for
/// every started 32-byte word.
#[inline]
pub const fn calc_linear_cost(len: usize, base: u64, word: u64) -> u64 {
    (len as u64).div_ceil(32) * word + base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_cost_rounds_up_to_words() {
        assert_eq!(calc_linear_cost(0, 60, 12), 60);
        assert_eq!(calc_linear_cost(1, 60, 12), 72);
        assert_eq!(calc_linear_cost(32, 60, 12), 72);
        assert_eq!(calc_linear_cost(33, 60, 12), 84);
    }
}
