//! Minimal ABI head/tail codec for the three registry entry points.
//!
//! The registry only ever moves two strings, a uint256 and an address, so
//! a general-purpose ABI library would be the heavier dependency here.

use ac_types::ProvenanceRecord;
use thiserror::Error;

pub const WORD: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("return data shorter than expected")]
    Truncated,
    #[error("value does not fit in 64 bits")]
    Overflow,
    #[error("string field is not valid utf-8")]
    InvalidUtf8,
    #[error("invalid hex payload")]
    InvalidHex,
}

pub fn encode_u64_word(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn padded_len(bytes: usize) -> usize {
    bytes.div_ceil(WORD) * WORD
}

/// Append a dynamic string tail: length word plus right-padded bytes.
fn append_string_tail(out: &mut Vec<u8>, value: &str) {
    let bytes = value.as_bytes();
    out.extend_from_slice(&encode_u64_word(bytes.len() as u64));
    out.extend_from_slice(bytes);
    out.resize(out.len() + padded_len(bytes.len()) - bytes.len(), 0);
}

/// Argument block for `(string, string)`: two offset words, then the tails.
pub fn encode_two_strings(first: &str, second: &str) -> Vec<u8> {
    let first_tail = WORD + padded_len(first.len());
    let mut out = Vec::with_capacity(2 * WORD + first_tail + WORD + padded_len(second.len()));
    out.extend_from_slice(&encode_u64_word((2 * WORD) as u64));
    out.extend_from_slice(&encode_u64_word((2 * WORD + first_tail) as u64));
    append_string_tail(&mut out, first);
    append_string_tail(&mut out, second);
    out
}

fn word_at(data: &[u8], index: usize) -> Result<&[u8], AbiError> {
    data.get(index * WORD..(index + 1) * WORD)
        .ok_or(AbiError::Truncated)
}

fn word_to_u64(word: &[u8]) -> Result<u64, AbiError> {
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(AbiError::Overflow);
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(buf))
}

fn string_at(data: &[u8], offset: usize) -> Result<String, AbiError> {
    let len_word = data.get(offset..offset + WORD).ok_or(AbiError::Truncated)?;
    let len = word_to_u64(len_word)? as usize;
    let bytes = data
        .get(offset + WORD..offset + WORD + len)
        .ok_or(AbiError::Truncated)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8)
}

/// Single uint256 return value, e.g. the item count.
pub fn decode_u64(data: &[u8]) -> Result<u64, AbiError> {
    word_to_u64(word_at(data, 0)?)
}

/// Return layout of the record getter: `(string name, string location,
/// uint256 timestamp, address collector)` — two offset words, timestamp,
/// address, then the string tails.
pub fn decode_record(data: &[u8]) -> Result<ProvenanceRecord, AbiError> {
    let name_offset = word_to_u64(word_at(data, 0)?)? as usize;
    let location_offset = word_to_u64(word_at(data, 1)?)? as usize;
    let timestamp = word_to_u64(word_at(data, 2)?)?;
    let address_word = word_at(data, 3)?;

    Ok(ProvenanceRecord {
        name: string_at(data, name_offset)?,
        location: string_at(data, location_offset)?,
        timestamp,
        collector_address: format!("0x{}", hex_lower(&address_word[WORD - 20..])),
    })
}

pub fn hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

/// Parse a `0x`-prefixed (or bare) even-length hex blob.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, AbiError> {
    let trimmed = input.trim().trim_start_matches("0x");
    if trimmed.len() % 2 != 0 {
        return Err(AbiError::InvalidHex);
    }
    (0..trimmed.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&trimmed[i..i + 2], 16).map_err(|_| AbiError::InvalidHex))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_word(out: &mut Vec<u8>, value: u64) {
        out.extend_from_slice(&encode_u64_word(value));
    }

    #[test]
    fn decode_u64_rejects_values_beyond_64_bits() {
        let mut big = [0u8; WORD];
        big[0] = 1;
        assert_eq!(decode_u64(&big), Err(AbiError::Overflow));

        assert_eq!(decode_u64(&encode_u64_word(42)).unwrap(), 42);
    }

    #[test]
    fn decode_record_reads_a_hand_laid_out_tuple() {
        // (name @ 0x80, location @ 0xc0, timestamp, collector)
        let mut data = Vec::new();
        push_word(&mut data, 0x80);
        push_word(&mut data, 0xc0);
        push_word(&mut data, 1_726_000_000);
        let mut address = [0u8; WORD];
        address[WORD - 20..].copy_from_slice(&[0xab; 20]);
        data.extend_from_slice(&address);
        // name tail: "Ram Farmers Coop" (16 bytes, one padded word)
        push_word(&mut data, 16);
        data.extend_from_slice(b"Ram Farmers Coop");
        data.resize(data.len() + 16, 0);
        // location tail: "Neemuch" (7 bytes)
        push_word(&mut data, 7);
        data.extend_from_slice(b"Neemuch");
        data.resize(data.len() + 25, 0);

        let record = decode_record(&data).unwrap();

        assert_eq!(record.name, "Ram Farmers Coop");
        assert_eq!(record.location, "Neemuch");
        assert_eq!(record.timestamp, 1_726_000_000);
        assert_eq!(
            record.collector_address,
            format!("0x{}", "ab".repeat(20))
        );
    }

    #[test]
    fn decode_record_fails_cleanly_on_truncated_tail() {
        let mut data = Vec::new();
        push_word(&mut data, 0x80);
        push_word(&mut data, 0xc0);
        push_word(&mut data, 1);
        push_word(&mut data, 0);
        push_word(&mut data, 64); // claims a 64-byte string, supplies none

        assert_eq!(decode_record(&data), Err(AbiError::Truncated));
    }

    #[test]
    fn two_string_encoding_places_offsets_and_padding() {
        let data = encode_two_strings("Ram Farmers Coop", "Neemuch");

        // Head: offsets relative to the argument block start.
        assert_eq!(decode_u64(&data[..WORD]).unwrap(), 64);
        assert_eq!(decode_u64(&data[WORD..2 * WORD]).unwrap(), 64 + 32 + 32);
        // First tail: length word then exactly one padded word.
        assert_eq!(decode_u64(&data[2 * WORD..3 * WORD]).unwrap(), 16);
        assert_eq!(&data[3 * WORD..3 * WORD + 16], b"Ram Farmers Coop");
        assert!(data[3 * WORD + 16..4 * WORD].iter().all(|b| *b == 0));
        // Whole block is word-aligned.
        assert_eq!(data.len() % WORD, 0);
        assert_eq!(data.len(), 6 * WORD);
    }

    #[test]
    fn hex_parses_prefixed_and_rejects_odd_length() {
        assert_eq!(parse_hex("0x0aff").unwrap(), vec![0x0a, 0xff]);
        assert_eq!(parse_hex("0aff").unwrap(), vec![0x0a, 0xff]);
        assert_eq!(parse_hex("0xabc"), Err(AbiError::InvalidHex));
        assert_eq!(parse_hex("zz"), Err(AbiError::InvalidHex));
    }
}
