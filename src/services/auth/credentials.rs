use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Turns passwords into stored credentials and checks them later.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    /// Produce the value to store for `password`.
    fn hash(&self, password: &str) -> String;

    /// Check `password` against a value produced by [`CredentialVerifier::hash`].
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Salted SHA-256, stored as `salt_hex$digest_hex`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaltedSha256Verifier;

impl SaltedSha256Verifier {
    fn digest(salt: &[u8], password: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        hasher.finalize().to_vec()
    }
}

impl CredentialVerifier for SaltedSha256Verifier {
    fn hash(&self, password: &str) -> String {
        let salt: [u8; SALT_LEN] = rand::random();
        let digest = Self::digest(&salt, password);
        format!("{}${}", to_hex(&salt), to_hex(&digest))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
            return false;
        };
        let (Some(salt), Some(expected)) = (from_hex(salt_hex), from_hex(digest_hex)) else {
            return false;
        };

        constant_time_eq(&Self::digest(&salt, password), &expected)
    }
}

/// Compare without short-circuiting on the first differing byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 || !text.is_ascii() {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).ok())
        .collect()
}
