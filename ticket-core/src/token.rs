//! Receipt verification tokens
//!
//! The token is the opaque payload the QR collaborator renders for entry
//! checks. It must be unguessable: SHA-256 over the reservation id plus a
//! fresh 32-byte random nonce, hex encoded. Nothing about the reservation
//! (sequence, timestamps) is recoverable from it.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hex length of a generated token.
pub const TOKEN_LEN: usize = 64;

/// Generate the verification token for a receipt.
pub fn verification_token(reservation_id: &str) -> String {
    let mut nonce = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut nonce);

    let mut hasher = Sha256::new();
    hasher.update(reservation_id.as_bytes());
    hasher.update(nonce);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_shape() {
        let token = verification_token("rs-1");
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique_per_issue() {
        // Same reservation id, different nonce, different token.
        let a = verification_token("rs-1");
        let b = verification_token("rs-1");
        assert_ne!(a, b);
    }
}
