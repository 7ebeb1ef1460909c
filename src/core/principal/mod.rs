use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::common::{ErrorKind, Result};
use crate::core::UserEntry;

// Salt byte length before hex encoding.
const SALT_BYTES: usize = 16;

// Number of digest iterations for password stretching.
const HASH_ITERATIONS: u32 = 100_000;

// A known user identity with credentials.
// Constructed once at startup, read-only afterwards.
pub(crate) struct Principal {
    username: String,
    password_hash: String,
    salt: String,
}

impl Principal {
    pub(crate) fn from_entry(entry: &UserEntry) -> Result<Self> {
        let salt = generate_salt()?;
        let password_hash = hash_password(&entry.password, &salt);

        Ok(Self {
            username: entry.username.clone(),
            password_hash,
            salt,
        })
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn verify_password(&self, password: &str) -> bool {
        let attempt = hash_password(password, &self.salt);
        constant_time_eq(attempt.as_bytes(), self.password_hash.as_bytes())
    }
}

// Mask credential material.
impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Principal")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn generate_salt() -> Result<String> {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|err| ErrorKind::Internal(format!("secure random source. {}", err)))?;

    Ok(hex::encode(bytes))
}

// Salted iterated SHA-256. Deterministic for a given (password, salt) pair.
fn hash_password(password: &str, salt: &str) -> String {
    let mut hash = Sha256::new();
    hash.update(salt.as_bytes());
    hash.update(password.as_bytes());
    let mut digest = hash.finalize();

    for _ in 1..HASH_ITERATIONS {
        let mut hash = Sha256::new();
        hash.update(digest);
        hash.update(salt.as_bytes());
        digest = hash.finalize();
    }

    hex::encode(digest)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(username: &str, password: &str) -> UserEntry {
        UserEntry {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn hash_is_deterministic_for_same_salt() {
        let h1 = hash_password("kurier", "00ff00ff00ff00ff");
        let h2 = hash_password("kurier", "00ff00ff00ff00ff");

        assert_eq!(h1, h2);
    }

    #[test]
    fn hash_differs_across_salts() {
        let h1 = hash_password("kurier", "salt-a");
        let h2 = hash_password("kurier", "salt-b");

        assert_ne!(h1, h2);
    }

    #[test]
    fn verify_password() {
        let principal = Principal::from_entry(&entry("kurier", "kurier")).unwrap();

        assert!(principal.verify_password("kurier"));
        assert!(!principal.verify_password("wrong"));
        assert!(!principal.verify_password(""));
    }

    #[test]
    fn same_password_distinct_hashes_per_principal() {
        let p1 = Principal::from_entry(&entry("kurier", "secret")).unwrap();
        let p2 = Principal::from_entry(&entry("admin", "secret")).unwrap();

        assert_ne!(p1.password_hash, p2.password_hash);
    }

    #[test]
    fn debug_masks_credentials() {
        let principal = Principal::from_entry(&entry("kurier", "kurier")).unwrap();
        let debug = format!("{:?}", principal);

        assert!(debug.contains("kurier"));
        assert!(!debug.contains(&principal.password_hash));
        assert!(!debug.contains(&principal.salt));
    }
}
