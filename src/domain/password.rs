//! Password hashing capability used by protected links.

/// Error raised when a password cannot be hashed.
#[derive(Debug, thiserror::Error)]
#[error("Password hash error: {0}")]
pub struct PasswordHashError(pub String);

/// Salted one-way password hashing.
///
/// Implementations must embed the salt and parameters in the produced hash string
/// so that [`PasswordHasher::verify`] needs nothing but the stored value.
///
/// # Implementations
///
/// - [`crate::infrastructure::security::Argon2PasswordHasher`] - Argon2id (PHC string format)
pub trait PasswordHasher: Send + Sync {
    /// Hashes `raw` with a freshly generated salt.
    fn hash(&self, raw: &str) -> Result<String, PasswordHashError>;

    /// Checks `raw` against a stored hash.
    ///
    /// Returns `false` for a mismatch and for a malformed stored hash.
    fn verify(&self, raw: &str, hash: &str) -> bool;
}
