//! DTOs for password submission on protected links.

use serde::Deserialize;

/// Body of `POST /{code}`, accepted as JSON or as an HTML form.
#[derive(Debug, Default, Deserialize)]
pub struct UnlockRequest {
    /// Missing field means an empty password.
    #[serde(default)]
    pub password: String,
}
