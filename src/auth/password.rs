use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_verifies_the_signup_credential() {
        let hash = hash_password("palak-paneer-po55word").expect("hash");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("palak-paneer-po55word", &hash).expect("verify"));
    }

    #[test]
    fn login_with_wrong_credential_fails_cleanly() {
        let hash = hash_password("the-signup-password").expect("hash");
        // wrong password is Ok(false), not an error
        assert!(!verify_password("a-login-guess", &hash).expect("verify"));
    }

    #[test]
    fn same_credential_hashes_to_distinct_strings() {
        let first = hash_password("repeat-me").expect("hash");
        let second = hash_password("repeat-me").expect("hash");
        // fresh salt every time
        assert_ne!(first, second);
        assert!(verify_password("repeat-me", &second).expect("verify"));
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("anything", "plaintext-from-a-legacy-row").is_err());
    }
}
