//! In-process hash backend. More details in [`NativeBackend`].
use crate::{
    calc_linear_cost,
    config::{ConfigRecord, CONFIG_LEN, MAX_DIGEST_SIZE, MAX_KEY_LENGTH},
    dispatcher::HASH_BACKEND_ADDRESS,
    interface::{BackendError, BackendOutput, BackendResult, HashBackend},
    selector,
};
use alloy_primitives::{Address, Bytes};
use sha2::Digest;

/// Base gas of every hash call.
pub const HASH_BASE: u64 = 60;
/// Gas per started 32-byte word of payload.
pub const HASH_PER_WORD: u64 = 12;

/// Backend that computes every selector's digest in process.
///
/// Gas is `HASH_BASE + HASH_PER_WORD * words(payload)`, the selector byte not
/// counted. The BLAKE2s payload is `record || key || message`, with the key as
/// long as the record's key length.
///
/// Through [`Dispatcher::parameterized_hash_with_config`] the payload is
/// `record || preimage`, so keyed callers put the key at the front of the
/// preimage. A preimage shorter than the key length is rejected with
/// [`BackendError::InvalidInput`].
///
/// Depth follows BLAKE2: 1 is sequential hashing and 0 is rejected.
///
/// [`Dispatcher::parameterized_hash_with_config`]: crate::Dispatcher::parameterized_hash_with_config
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeBackend {
    address: Address,
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self::new(HASH_BACKEND_ADDRESS)
    }
}

impl NativeBackend {
    /// Backend answering at `address`.
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// Address the backend answers at.
    pub const fn address(&self) -> Address {
        self.address
    }
}

impl HashBackend for NativeBackend {
    fn call(
        &self,
        address: &Address,
        input: &[u8],
        gas_limit: u64,
        output_len: usize,
    ) -> BackendResult {
        if *address != self.address {
            return Err(BackendError::NotHashBackend(*address));
        }
        let (&selector, payload) = input.split_first().ok_or(BackendError::EmptyInput)?;

        let gas_used = calc_linear_cost(payload.len(), HASH_BASE, HASH_PER_WORD);
        if gas_used > gas_limit {
            return Err(BackendError::OutOfGas);
        }

        let bytes: Bytes = match selector {
            selector::SHA3_256 => {
                check_len(32, output_len)?;
                sha3::Sha3_256::digest(payload).to_vec().into()
            }
            selector::SHA3_512 => {
                check_len(64, output_len)?;
                sha3::Sha3_512::digest(payload).to_vec().into()
            }
            selector::KECCAK512 => {
                check_len(64, output_len)?;
                sha3::Keccak512::digest(payload).to_vec().into()
            }
            selector::SHA2_512 => {
                check_len(64, output_len)?;
                sha2::Sha512::digest(payload).to_vec().into()
            }
            selector::BLAKE2S => blake2s(payload, output_len)?,
            _ => return Err(BackendError::UnknownSelector(selector)),
        };

        Ok(BackendOutput::new(gas_used, bytes))
    }
}

fn check_len(actual: usize, expected: usize) -> Result<(), BackendError> {
    if actual != expected {
        return Err(BackendError::OutputLength { expected, actual });
    }
    Ok(())
}

/// BLAKE2s with the full parameter block taken from the config record.
///
/// Node offset and xof digest length share the 48-bit node offset word.
fn blake2s(payload: &[u8], output_len: usize) -> Result<Bytes, BackendError> {
    let (record, rest) = payload
        .split_at_checked(CONFIG_LEN)
        .ok_or(BackendError::InvalidInput("config record too short"))?;
    let config = ConfigRecord::from_slice(record)
        .ok_or(BackendError::InvalidInput("config record too short"))?;

    let digest_size = config.digest_size();
    if digest_size == 0 || digest_size > MAX_DIGEST_SIZE {
        return Err(BackendError::InvalidInput("digest size out of range"));
    }
    check_len(digest_size as usize, output_len)?;
    if config.key_length() > MAX_KEY_LENGTH {
        return Err(BackendError::InvalidInput("key length out of range"));
    }
    if config.inner_length() > MAX_DIGEST_SIZE {
        return Err(BackendError::InvalidInput("inner length out of range"));
    }
    if config.depth() == 0 {
        return Err(BackendError::InvalidInput("depth must be at least one"));
    }

    let (key, message) = rest
        .split_at_checked(config.key_length() as usize)
        .ok_or(BackendError::InvalidInput("key shorter than key length"))?;
    let node_offset =
        u64::from(config.node_offset()) | (u64::from(config.xof_digest_length()) << 32);

    let hash = blake2s_simd::Params::new()
        .hash_length(digest_size as usize)
        .key(key)
        .salt(&config.salt())
        .personal(&config.personalize())
        .fanout(config.fanout())
        .max_depth(config.depth())
        .max_leaf_length(config.leaf_length())
        .node_offset(node_offset)
        .node_depth(config.node_depth())
        .inner_hash_length(config.inner_length() as usize)
        .hash(message);

    Ok(Bytes::copy_from_slice(hash.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigParams;
    use alloy_primitives::{address, hex};
    use rstest::rstest;

    fn run(input: &[u8], output_len: usize) -> BackendResult {
        NativeBackend::default().call(&HASH_BACKEND_ADDRESS, input, u64::MAX, output_len)
    }

    fn blake2s_input(params: &ConfigParams, key: &[u8], message: &[u8]) -> Vec<u8> {
        let record = ConfigRecord::encode(params).unwrap();
        let mut input = vec![selector::BLAKE2S];
        input.extend_from_slice(record.as_bytes());
        input.extend_from_slice(key);
        input.extend_from_slice(message);
        input
    }

    #[rstest]
    #[case::sha3_256_empty(selector::SHA3_256, "", "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")]
    #[case::sha3_256_abc(selector::SHA3_256, "abc", "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532")]
    #[case::sha3_512_empty(selector::SHA3_512, "", "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a615b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26")]
    #[case::sha3_512_abc(selector::SHA3_512, "abc", "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0")]
    #[case::keccak512_empty(selector::KECCAK512, "", "0eab42de4c3ceb9235fc91acffe746b29c29a8c366b7c60e4e67c466f36a4304c00fa9caf9d87976ba469bcbe06713b435f091ef2769fb160cdab33d3670680e")]
    #[case::keccak512_abc(selector::KECCAK512, "abc", "18587dc2ea106b9a1563e32b3312421ca164c7f1f07bc922a9c83d77cea3a1e5d0c69910739025372dc14ac9642629379540c17e2a65b19d77aa511a9d00bb96")]
    #[case::sha2_512_empty(selector::SHA2_512, "", "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e")]
    #[case::sha2_512_abc(selector::SHA2_512, "abc", "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f")]
    fn fixed_length_vectors(#[case] selector: u8, #[case] message: &str, #[case] expected: &str) {
        let expected = hex::decode(expected).unwrap();
        let mut input = vec![selector];
        input.extend_from_slice(message.as_bytes());

        let output = run(&input, expected.len()).unwrap();
        assert_eq!(output.bytes[..], expected[..]);
        assert_eq!(output.gas_used, calc_linear_cost(message.len(), 60, 12));
    }

    #[rstest]
    #[case::empty("", "69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9")]
    #[case::abc("abc", "508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982")]
    fn blake2s_sequential_vectors(#[case] message: &str, #[case] expected: &str) {
        let input = blake2s_input(&ConfigParams::sequential(32), &[], message.as_bytes());
        let output = run(&input, 32).unwrap();
        assert_eq!(output.bytes[..], hex::decode(expected).unwrap()[..]);
    }

    #[test]
    fn blake2s_honours_every_parameter() {
        let params = ConfigParams {
            digest_size: 20,
            key_length: 5,
            fanout: 2,
            depth: 3,
            leaf_length: 4096,
            node_offset: 7,
            xof_digest_length: 0x0102,
            node_depth: 1,
            inner_length: 32,
            salt: *b"salt-123",
            personalize: *b"persona!",
        };
        let input = blake2s_input(&params, b"key!!", b"message");
        let output = run(&input, 20).unwrap();

        let expected = blake2s_simd::Params::new()
            .hash_length(20)
            .key(b"key!!")
            .salt(b"salt-123")
            .personal(b"persona!")
            .fanout(2)
            .max_depth(3)
            .max_leaf_length(4096)
            .node_offset(7 | (0x0102 << 32))
            .node_depth(1)
            .inner_hash_length(32)
            .hash(b"message");
        assert_eq!(&output.bytes[..], expected.as_bytes());

        let unsalted = blake2s_input(&ConfigParams { salt: [0; 8], ..params }, b"key!!", b"message");
        assert_ne!(run(&unsalted, 20).unwrap().bytes, output.bytes);
    }

    #[rstest]
    #[case::short_record(vec![selector::BLAKE2S; 10], 32)]
    #[case::zero_digest(blake2s_input(&ConfigParams::sequential(0), &[], b""), 0)]
    #[case::large_digest(blake2s_input(&ConfigParams::sequential(33), &[], b""), 33)]
    #[case::zero_depth(blake2s_input(&ConfigParams { depth: 0, ..ConfigParams::sequential(32) }, &[], b""), 32)]
    #[case::missing_key(blake2s_input(&ConfigParams::sequential(32).with_key_length(8), &[], b"abc"), 32)]
    fn blake2s_rejects_bad_payloads(#[case] input: Vec<u8>, #[case] output_len: usize) {
        assert!(matches!(
            run(&input, output_len),
            Err(BackendError::InvalidInput(_))
        ));
    }

    #[test]
    fn output_length_must_match() {
        assert_eq!(
            run(&[selector::SHA3_256], 64),
            Err(BackendError::OutputLength {
                expected: 64,
                actual: 32
            })
        );
        let input = blake2s_input(&ConfigParams::sequential(16), &[], b"");
        assert_eq!(
            run(&input, 32),
            Err(BackendError::OutputLength {
                expected: 32,
                actual: 16
            })
        );
    }

    #[test]
    fn gas_limit_is_enforced() {
        let backend = NativeBackend::default();
        let mut input = vec![selector::SHA2_512];
        input.extend_from_slice(&[0u8; 33]);
        // two words
        assert_eq!(
            backend
                .call(&HASH_BACKEND_ADDRESS, &input, 84, 64)
                .unwrap()
                .gas_used,
            84
        );
        assert_eq!(
            backend.call(&HASH_BACKEND_ADDRESS, &input, 83, 64),
            Err(BackendError::OutOfGas)
        );
    }

    #[test]
    fn rejects_unknown_requests() {
        assert_eq!(run(&[], 32), Err(BackendError::EmptyInput));
        assert_eq!(run(&[0x04], 32), Err(BackendError::UnknownSelector(0x04)));

        let other = address!("00000000000000000000000000000000000000f2");
        assert_eq!(
            NativeBackend::default().call(&other, &[selector::SHA3_256], u64::MAX, 32),
            Err(BackendError::NotHashBackend(other))
        );
        assert_eq!(NativeBackend::new(other).address(), other);
    }
}
