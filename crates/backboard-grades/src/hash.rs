// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Education ID hashing.

use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};

/// Standard-alphabet, padded base64 of the SHA-256 digest of `data`.
///
/// This is the form in which the server knows a student's education ID, so
/// the plain ID never has to leave the machine.
pub fn hash(data: &str) -> String {
    STANDARD.encode(Sha256::digest(data.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digests() {
        assert_eq!(hash(""), "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
        assert_eq!(hash("abc"), "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=");
    }

    #[test]
    fn distinct_ids_hash_apart() {
        assert_ne!(hash("72345678901"), hash("72345678902"));
        assert_eq!(hash("72345678901"), hash("72345678901"));
    }
}
