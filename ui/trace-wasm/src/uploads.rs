//! Placeholder acknowledgments for file selections.
//!
//! Neither the QR image nor the certificate PDF is ever decoded or stored
//! anywhere: after a fixed delay the UI fabricates a plausible-looking
//! identifier and moves on. A real upload integration is an external
//! collaborator and out of scope; nothing here must imply that
//! content-addressed storage happened.

use rand::Rng;

pub const QR_SCAN_DELAY_MS: u32 = 1_000;
pub const CERT_UPLOAD_DELAY_MS: u32 = 2_000;

/// The batch id every simulated QR scan "finds".
pub const SCANNED_BATCH_ID: &str = "ASHWA-001";

const HASH_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const HASH_TAIL_LEN: usize = 44;

/// A content-hash-shaped placeholder string for the certificate form.
pub fn placeholder_certificate_hash() -> String {
    let mut rng = rand::thread_rng();
    let tail: String = (0..HASH_TAIL_LEN)
        .map(|_| HASH_CHARSET[rng.gen_range(0..HASH_CHARSET.len())] as char)
        .collect();
    format!("Qm{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_hash_is_shaped_like_a_cid() {
        let hash = placeholder_certificate_hash();
        assert!(hash.starts_with("Qm"));
        assert_eq!(hash.len(), 2 + HASH_TAIL_LEN);
        assert!(hash.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
