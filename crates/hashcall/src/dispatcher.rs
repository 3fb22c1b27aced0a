//! Hash dispatcher. More details in [`Dispatcher::execute`].
use crate::{
    config::{ConfigParams, ConfigRecord, MAX_DIGEST_SIZE},
    error::HashError,
    interface::{BackendError, HashBackend},
    request::RequestBuffer,
    selector::{self, HashAlgorithm},
};
use alloy_primitives::{address, Address, Bytes, B256, B512};
use tracing::{debug, warn};

/// Reserved address of the hash backend.
pub const HASH_BACKEND_ADDRESS: Address = address!("00000000000000000000000000000000000000f3");

/// Gas handed to every backend call unless configured otherwise.
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// Dispatcher settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatcherConfig {
    /// Resource budget of a single backend call.
    pub gas_limit: u64,
    /// Address the backend is reached through.
    pub backend_address: Address,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
            backend_address: HASH_BACKEND_ADDRESS,
        }
    }
}

impl DispatcherConfig {
    /// Sets the gas limit of every backend call.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Sets the backend address.
    pub fn with_backend_address(mut self, backend_address: Address) -> Self {
        self.backend_address = backend_address;
        self
    }
}

/// Routes named hash operations through one [`HashBackend`].
#[derive(Clone, Debug)]
pub struct Dispatcher<B> {
    backend: B,
    config: DispatcherConfig,
}

impl<B: HashBackend> Dispatcher<B> {
    /// Dispatcher with the default config.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, DispatcherConfig::default())
    }

    /// Dispatcher with the given config.
    pub fn with_config(backend: B, config: DispatcherConfig) -> Self {
        Self { backend, config }
    }

    /// Returns the config.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the dispatcher and returns the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Tags `preimage` with `selector`, calls the backend and returns exactly
    /// `output_len` bytes.
    ///
    /// Any backend failure, a gas report above the budget or an output of the
    /// wrong length is reported as [`HashError::BackendCallFailed`].
    pub fn execute(
        &self,
        preimage: &[u8],
        selector: u8,
        output_len: usize,
    ) -> Result<Bytes, HashError> {
        self.call(RequestBuffer::new(selector, preimage), output_len)
    }

    /// SHA3-256 of `preimage`.
    pub fn sha3_256(&self, preimage: &[u8]) -> Result<B256, HashError> {
        let out = self.execute(preimage, selector::SHA3_256, 32)?;
        Ok(B256::from_slice(&out))
    }

    /// SHA3-512 of `preimage`.
    pub fn sha3_512(&self, preimage: &[u8]) -> Result<B512, HashError> {
        let out = self.execute(preimage, selector::SHA3_512, 64)?;
        Ok(B512::from_slice(&out))
    }

    /// Keccak-512 of `preimage`.
    pub fn keccak512(&self, preimage: &[u8]) -> Result<B512, HashError> {
        let out = self.execute(preimage, selector::KECCAK512, 64)?;
        Ok(B512::from_slice(&out))
    }

    /// SHA2-512 of `preimage`.
    pub fn sha2_512(&self, preimage: &[u8]) -> Result<B512, HashError> {
        let out = self.execute(preimage, selector::SHA2_512, 64)?;
        Ok(B512::from_slice(&out))
    }

    /// BLAKE2s of `preimage` configured by `config`.
    ///
    /// `key` must be exactly as long as the record's key length, otherwise
    /// [`HashError::KeyLengthMismatch`] is returned and the backend is not
    /// called. The key is only checked here; the backend receives
    /// `config || preimage` and `config.digest_size()` output bytes are
    /// requested.
    ///
    /// # Keyed hashing
    ///
    /// `key` never reaches the backend. Backends such as the native one take
    /// the first `config.key_length()` bytes of the payload as the key, so a
    /// keyed call passes `key || message` as `preimage`:
    ///
    /// ```ignore
    /// let mut preimage = key.to_vec();
    /// preimage.extend_from_slice(message);
    /// dispatcher.parameterized_hash_with_config(&config, &key, &preimage)?;
    /// ```
    pub fn parameterized_hash_with_config(
        &self,
        config: &ConfigRecord,
        key: &[u8],
        preimage: &[u8],
    ) -> Result<Bytes, HashError> {
        config.validate_key(key)?;
        let request =
            RequestBuffer::from_parts(selector::BLAKE2S, &[config.as_bytes().as_slice(), preimage]);
        self.call(request, config.digest_size() as usize)
    }

    /// Unkeyed, sequential BLAKE2s-256 of `preimage`.
    pub fn parameterized_hash(&self, preimage: &[u8]) -> Result<Bytes, HashError> {
        let config = ConfigRecord::encode(&ConfigParams::sequential(MAX_DIGEST_SIZE))?;
        self.parameterized_hash_with_config(&config, &[], preimage)
    }

    /// Hashes `preimage` with `algorithm`.
    ///
    /// [`HashAlgorithm::Blake2s`] runs with the default config of
    /// [`Dispatcher::parameterized_hash`].
    pub fn hash(&self, algorithm: HashAlgorithm, preimage: &[u8]) -> Result<Bytes, HashError> {
        match algorithm.output_len() {
            Some(output_len) => self.execute(preimage, algorithm.selector(), output_len),
            None => self.parameterized_hash(preimage),
        }
    }

    fn call(&self, request: RequestBuffer, output_len: usize) -> Result<Bytes, HashError> {
        let selector = request.selector();
        let gas_limit = self.config.gas_limit;
        debug!(
            selector,
            input_len = request.len(),
            output_len,
            gas_limit,
            "hash backend call"
        );

        let result = self
            .backend
            .call(
                &self.config.backend_address,
                request.as_slice(),
                gas_limit,
                output_len,
            )
            .and_then(|output| {
                if output.gas_used > gas_limit {
                    return Err(BackendError::OutOfGas);
                }
                if output.bytes.len() != output_len {
                    return Err(BackendError::OutputLength {
                        expected: output_len,
                        actual: output.bytes.len(),
                    });
                }
                Ok(output)
            });

        match result {
            Ok(output) => {
                debug!(selector, gas_used = output.gas_used, "hash backend call done");
                Ok(output.bytes)
            }
            Err(err) => {
                warn!(selector, %err, "hash backend call failed");
                Err(HashError::BackendCallFailed(err))
            }
        }
    }
}
