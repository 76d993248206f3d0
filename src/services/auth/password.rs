use argon2::password_hash::{self, PasswordHasher, PasswordVerifier as _, SaltString};
use argon2::{Argon2, PasswordHash};
use tracing::warn;

/// Checks a raw password against a stored hash.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, raw: &str, stored_hash: &str) -> bool;
}

/// Argon2 verifier for PHC-formatted hashes.
#[derive(Debug, Default, Clone)]
pub struct Argon2Verifier;

impl PasswordVerifier for Argon2Verifier {
    fn verify(&self, raw: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(h) => h,
            Err(e) => {
                warn!(error = %e, "stored password hash is not a valid PHC string");
                return false;
            }
        };

        Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok()
    }
}

/// PHC hash of a throwaway password.
///
/// Verified against when the username is unknown, so that path costs the same
/// as a wrong password.
pub fn dummy_hash() -> Result<String, password_hash::Error> {
    let salt = SaltString::encode_b64(b"bearer-gate-none")?;
    let hash = Argon2::default().hash_password(b"no-such-user-password", &salt)?;
    Ok(hash.to_string())
}

#[cfg(test)]
pub(crate) fn hash_for_tests(raw: &str) -> String {
    let salt = SaltString::encode_b64(b"fixed-test-salt!").unwrap();
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon2_accepts_matching_password_only() {
        let hash = hash_for_tests("Password123!");
        let verifier = Argon2Verifier;

        assert!(verifier.verify("Password123!", &hash));
        assert!(!verifier.verify("password123!", &hash));
    }

    #[test]
    fn dummy_hash_is_a_valid_phc_string() {
        let hash = dummy_hash().unwrap();
        assert!(PasswordHash::new(&hash).is_ok());
        assert!(!Argon2Verifier.verify("Password123!", &hash));
    }

    #[test]
    fn garbage_hash_never_matches() {
        assert!(!Argon2Verifier.verify("anything", "not-a-phc-string"));
    }
}
