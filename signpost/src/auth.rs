//! Admin credential verification.
//!
//! One credential pair guards the admin dashboard. Production configures the
//! password as an argon2 PHC hash; dev mode may configure it in plaintext.
//! There is no lockout or throttling (open hardening item, not a bug).

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};

use crate::config::Args;
use crate::types::{Result, SignpostError};

/// Verify a password against a stored PHC-formatted argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| SignpostError::AuthRejected(format!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Check a login attempt against the configured admin credential pair.
pub fn check_credentials(args: &Args, username: &str, password: &str) -> Result<()> {
    if username != args.admin_username {
        return Err(SignpostError::AuthRejected("Invalid credentials".into()));
    }

    let ok = match (&args.admin_password_hash, &args.admin_password) {
        (Some(hash), _) => verify_password(password, hash)?,
        (None, Some(plain)) => constant_time_eq(password.as_bytes(), plain.as_bytes()),
        (None, None) => false,
    };

    if ok {
        Ok(())
    } else {
        Err(SignpostError::AuthRejected("Invalid credentials".into()))
    }
}

/// Length-then-bytes comparison that does not short-circuit on the first
/// mismatching byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
        Argon2,
    };

    fn hash_password(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn args_with_hash(hash: Option<String>, plain: Option<String>) -> Args {
        Args {
            listen: "127.0.0.1:8080".parse().unwrap(),
            mongodb_uri: "mongodb://localhost:27017".into(),
            mongodb_db: "signpost".into(),
            admin_username: "admin".into(),
            admin_password_hash: hash,
            admin_password: plain,
            dev_mode: true,
            skip_seed: false,
            log_level: "info".into(),
        }
    }

    #[test]
    fn hashed_credential_round_trip() {
        let args = args_with_hash(Some(hash_password("uisn2026")), None);

        assert!(check_credentials(&args, "admin", "uisn2026").is_ok());
        assert!(matches!(
            check_credentials(&args, "admin", "wrong"),
            Err(SignpostError::AuthRejected(_))
        ));
    }

    #[test]
    fn plaintext_credential_for_dev_mode() {
        let args = args_with_hash(None, Some("uisn2026".into()));

        assert!(check_credentials(&args, "admin", "uisn2026").is_ok());
        assert!(check_credentials(&args, "admin", "uisn2027").is_err());
    }

    #[test]
    fn wrong_username_is_rejected_without_password_check() {
        let args = args_with_hash(None, Some("uisn2026".into()));
        assert!(check_credentials(&args, "root", "uisn2026").is_err());
    }

    #[test]
    fn hash_takes_precedence_over_plaintext() {
        let args = args_with_hash(Some(hash_password("real")), Some("decoy".into()));
        assert!(check_credentials(&args, "admin", "real").is_ok());
        assert!(check_credentials(&args, "admin", "decoy").is_err());
    }
}
