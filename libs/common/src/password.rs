//! Password hashing shared by the API (on user creation) and the web
//! front-end (on login).
//!
//! Stored hashes are the standard base64 encoding of an unsalted SHA-256
//! digest of the UTF-8 password. Existing rows depend on this exact format.

use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

/// Hash a password into its stored representation
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    STANDARD.encode(digest)
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    hash_password(password) == hash
}
