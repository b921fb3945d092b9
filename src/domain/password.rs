//! Password value object - salted keyed hashing of user passwords.
//!
//! A password is stored as a 64-byte HMAC-SHA-512 digest of its UTF-8
//! bytes, keyed with a 128-byte random salt unique to each user. Hash and
//! salt always travel together.

use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;

use crate::config::{PASSWORD_HASH_LEN, PASSWORD_SALT_LEN};
use crate::errors::{AppError, AppResult};

type HmacSha512 = Hmac<Sha512>;

/// Stored password credential: digest plus the salt that keyed it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: Vec<u8>,
    salt: Vec<u8>,
}

// Don't expose hash or salt in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the password is empty or whitespace only.
    pub fn hash(plain_text: &str) -> AppResult<Self> {
        ensure_not_blank(plain_text)?;

        let mut salt = vec![0u8; PASSWORD_SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let hash = keyed_mac(&salt, plain_text)?.finalize().into_bytes().to_vec();
        Ok(Self { hash, salt })
    }

    /// Rebuild a credential from stored bytes.
    ///
    /// Lengths are not checked here; `verify` rejects malformed pairs.
    pub fn from_parts(hash: Vec<u8>, salt: Vec<u8>) -> Self {
        Self { hash, salt }
    }

    pub fn hash_bytes(&self) -> &[u8] {
        &self.hash
    }

    pub fn salt_bytes(&self) -> &[u8] {
        &self.salt
    }

    /// Consume and return `(hash, salt)` for storage.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.hash, self.salt)
    }

    /// Verify a plaintext password against this credential.
    pub fn verify(&self, plain_text: &str) -> AppResult<bool> {
        verify_password(plain_text, &self.hash, &self.salt)
    }
}

/// Verify a plaintext password against a stored hash and salt.
///
/// Returns `Ok(false)` on mismatch. The digest comparison is constant time.
///
/// # Errors
/// Returns `InvalidArgument` if the password is blank, the hash is not
/// 64 bytes, or the salt is not 128 bytes.
pub fn verify_password(plain_text: &str, stored_hash: &[u8], stored_salt: &[u8]) -> AppResult<bool> {
    ensure_not_blank(plain_text)?;
    if stored_hash.len() != PASSWORD_HASH_LEN {
        return Err(AppError::invalid_argument(format!(
            "Invalid length of password hash ({} bytes expected)",
            PASSWORD_HASH_LEN
        )));
    }
    if stored_salt.len() != PASSWORD_SALT_LEN {
        return Err(AppError::invalid_argument(format!(
            "Invalid length of password salt ({} bytes expected)",
            PASSWORD_SALT_LEN
        )));
    }

    Ok(keyed_mac(stored_salt, plain_text)?
        .verify_slice(stored_hash)
        .is_ok())
}

/// True when the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn ensure_not_blank(plain_text: &str) -> AppResult<()> {
    if is_blank(plain_text) {
        return Err(AppError::invalid_argument(
            "Password cannot be empty or whitespace only",
        ));
    }
    Ok(())
}

fn keyed_mac(salt: &[u8], plain_text: &str) -> AppResult<HmacSha512> {
    let mut mac = HmacSha512::new_from_slice(salt)
        .map_err(|e| AppError::internal(format!("HMAC key rejected: {}", e)))?;
    mac.update(plain_text.as_bytes());
    Ok(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_lengths() {
        let password = Password::hash("secret123").unwrap();

        assert_eq!(password.hash_bytes().len(), PASSWORD_HASH_LEN);
        assert_eq!(password.salt_bytes().len(), PASSWORD_SALT_LEN);
    }

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::hash(plain).unwrap();

        assert!(password.verify(plain).unwrap());
        assert!(!password.verify("WrongPassword123").unwrap());
    }

    #[test]
    fn test_password_from_parts() {
        let plain = "TestPassword123";
        let (hash, salt) = Password::hash(plain).unwrap().into_parts();

        let restored = Password::from_parts(hash, salt);
        assert!(restored.verify(plain).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::hash(plain).unwrap();
        let pass2 = Password::hash(plain).unwrap();

        assert_ne!(pass1.salt_bytes(), pass2.salt_bytes());
        assert_ne!(pass1.hash_bytes(), pass2.hash_bytes());
        assert!(pass1.verify(plain).unwrap());
        assert!(pass2.verify(plain).unwrap());
    }

    #[test]
    fn test_unicode_password() {
        let plain = "pässwörd-密码";
        let password = Password::hash(plain).unwrap();

        assert!(password.verify(plain).unwrap());
        assert!(!password.verify("passwort-密码").unwrap());
    }

    #[test]
    fn test_blank_password_rejected() {
        for blank in ["", " ", "\t\n "] {
            assert!(matches!(
                Password::hash(blank),
                Err(AppError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_verify_blank_password_rejected() {
        let password = Password::hash("secret123").unwrap();
        assert!(matches!(
            password.verify("   "),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_hash_length() {
        let (hash, salt) = Password::hash("secret123").unwrap().into_parts();

        let result = verify_password("secret123", &hash[..32], &salt);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));

        // Still an argument error even when the password would not match
        let result = verify_password("other", &[0u8; 65], &salt);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_verify_rejects_wrong_salt_length() {
        let (hash, salt) = Password::hash("secret123").unwrap().into_parts();

        let result = verify_password("secret123", &hash, &salt[..64]);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_debug_redacted() {
        let password = Password::hash("secret123").unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" a "));
    }
}
