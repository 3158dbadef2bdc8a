//! Redirect request and outcome model.

use std::fmt;

/// How the visitor approached a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Plain navigation (GET); carries no password.
    None,
    /// Password submission (POST); an absent field is an empty password.
    Password(String),
}

/// A single redirect attempt.
#[derive(Debug, Clone)]
pub struct RedirectRequest {
    pub code: String,
    pub credential: Credential,
    /// Resolved client address, used for deduplication only.
    pub client_ip: String,
    pub user_agent: Option<String>,
}

impl RedirectRequest {
    pub fn new(
        code: impl Into<String>,
        credential: Credential,
        client_ip: impl Into<String>,
        user_agent: Option<&str>,
    ) -> Self {
        Self {
            code: code.into(),
            credential,
            client_ip: client_ip.into(),
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }
}

/// Why a redirect was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Undecodable code or unknown link. Both cases look the same to the caller.
    Invalid,
    Expired,
    PasswordRequired,
    Forbidden,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::Invalid => "invalid",
            Rejection::Expired => "expired",
            Rejection::PasswordRequired => "password_required",
            Rejection::Forbidden => "forbidden",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal decision of the redirect pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Success { original_url: String },
    Rejected(Rejection),
}

impl RedirectOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectOutcome::Success { .. } => "success",
            RedirectOutcome::Rejected(rejection) => rejection.as_str(),
        }
    }
}
