//! Wire plumbing for the opaque registry contract.
//!
//! The registry is an external service; this crate only knows how to shape
//! the three calls the demo performs and how to read their answers back.
//! The browser transport lives in the UI crate; everything here is pure
//! bytes and JSON, so it tests on the host.

pub mod abi;

use abi::{AbiError, encode_u64_word};
use serde_json::{Value, json};
use tiny_keccak::{Hasher, Keccak};

/// First contract deployed on a fresh local devnet; the demo registry is
/// assumed to live there unless the UI overrides it.
pub const DEFAULT_REGISTRY_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

const ITEM_COUNT_SIG: &str = "itemCount()";
const RECORD_AT_SIG: &str = "records(uint256)";
const ADD_RECORD_SIG: &str = "addRecord(string,string)";

/// Keccak-256 function selector for a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut hasher = Keccak::v256();
    hasher.update(signature.as_bytes());
    let mut digest = [0u8; 32];
    hasher.finalize(&mut digest);
    [digest[0], digest[1], digest[2], digest[3]]
}

pub fn item_count_call() -> Vec<u8> {
    selector(ITEM_COUNT_SIG).to_vec()
}

pub fn record_at_call(index: u64) -> Vec<u8> {
    let mut data = selector(RECORD_AT_SIG).to_vec();
    data.extend_from_slice(&encode_u64_word(index));
    data
}

pub fn add_record_call(name: &str, location: &str) -> Vec<u8> {
    let mut data = selector(ADD_RECORD_SIG).to_vec();
    data.extend_from_slice(&abi::encode_two_strings(name, location));
    data
}

/// `eth_call` positional params: call object plus the latest-block tag.
pub fn eth_call_params(to: &str, data: &[u8]) -> Value {
    json!([
        {
            "to": to,
            "data": format!("0x{}", abi::hex_lower(data)),
        },
        "latest"
    ])
}

/// `eth_sendTransaction` positional params for the signer-backed write.
pub fn eth_send_transaction_params(from: &str, to: &str, data: &[u8]) -> Value {
    json!([
        {
            "from": from,
            "to": to,
            "data": format!("0x{}", abi::hex_lower(data)),
        }
    ])
}

pub fn transaction_receipt_params(tx_hash: &str) -> Value {
    json!([tx_hash])
}

/// `eth_chainId` answers a hex quantity, e.g. `0x7a69`.
pub fn parse_chain_id(input: &str) -> Result<u64, AbiError> {
    let trimmed = input.trim().trim_start_matches("0x");
    if trimmed.is_empty() {
        return Err(AbiError::InvalidHex);
    }
    u64::from_str_radix(trimmed, 16).map_err(|_| AbiError::InvalidHex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_are_four_bytes_and_distinct() {
        let count = selector(ITEM_COUNT_SIG);
        let record = selector(RECORD_AT_SIG);
        let add = selector(ADD_RECORD_SIG);

        assert_ne!(count, record);
        assert_ne!(record, add);
        assert_ne!(count, add);
        // Deterministic: the signature is the single source of truth.
        assert_eq!(count, selector(ITEM_COUNT_SIG));
    }

    #[test]
    fn read_calls_carry_selector_plus_word_aligned_args() {
        assert_eq!(item_count_call().len(), 4);

        let call = record_at_call(7);
        assert_eq!(call.len(), 4 + 32);
        assert_eq!(&call[..4], &selector(RECORD_AT_SIG));
        assert_eq!(call[4 + 31], 7);

        let write = add_record_call("Green Valley Herbs", "Nashik");
        assert_eq!(&write[..4], &selector(ADD_RECORD_SIG));
        assert_eq!((write.len() - 4) % 32, 0);
    }

    #[test]
    fn call_params_shape_matches_json_rpc() {
        let params = eth_call_params(DEFAULT_REGISTRY_ADDRESS, &item_count_call());

        assert_eq!(params[0]["to"], DEFAULT_REGISTRY_ADDRESS);
        let data = params[0]["data"].as_str().unwrap();
        assert!(data.starts_with("0x"));
        assert_eq!(data.len(), 2 + 8);
        assert_eq!(params[1], "latest");
    }

    #[test]
    fn chain_id_parses_hex_quantities() {
        assert_eq!(parse_chain_id("0x7a69").unwrap(), 31337);
        assert_eq!(parse_chain_id("0x539").unwrap(), 1337);
        assert_eq!(parse_chain_id("7a69").unwrap(), 31337);
        assert!(parse_chain_id("0x").is_err());
        assert!(parse_chain_id("nope").is_err());
    }
}
