//! Password storage: salted SHA-256, encoded as `sha256$<salt hex>$<digest hex>`.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::utils::config::PASSWORD_SALT_LEN;

const SCHEME: &str = "sha256";

fn digest_hex(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Encode `password` with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; PASSWORD_SALT_LEN];
    rand::rng().fill(&mut salt[..]);
    format!("{SCHEME}${}${}", hex::encode(salt), digest_hex(&salt, password))
}

/// Check `password` against an encoded string from [`hash_password`].
/// Unknown schemes and malformed encodings verify as false.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.splitn(3, '$');
    let (Some(scheme), Some(salt_hex), Some(digest)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    digest_hex(&salt, password) == digest
}
