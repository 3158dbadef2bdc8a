//! Validation of URLs submitted for shortening.

use url::Url;

/// Upper bound for stored URLs, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL validation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL is longer than {MAX_URL_LENGTH} bytes")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Validates an absolute HTTP(S) URL and returns it trimmed but otherwise unchanged.
///
/// # Rules
///
/// 1. **Protocol**: Only HTTP and HTTPS are allowed
/// 2. **Host**: Must be present
/// 3. **Length**: At most [`MAX_URL_LENGTH`] bytes
///
/// The URL is stored exactly as submitted (no case folding, port or fragment
/// rewriting), so visitors land on the address the creator typed.
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls_are_kept_verbatim() {
        assert_eq!(
            validate_url("https://example.com").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            validate_url("  http://EXAMPLE.com:80/Path?q=1#frag ").unwrap(),
            "http://EXAMPLE.com:80/Path?q=1#frag"
        );
    }

    #[test]
    fn test_relative_url_is_rejected() {
        assert!(matches!(
            validate_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_dangerous_protocols_are_rejected() {
        for input in ["javascript:alert(1)", "data:text/html,hi", "file:///etc/passwd", "ftp://x.org"] {
            assert_eq!(
                validate_url(input),
                Err(UrlValidationError::UnsupportedProtocol),
                "{input}"
            );
        }
    }

    #[test]
    fn test_empty_and_oversized() {
        assert_eq!(validate_url("   "), Err(UrlValidationError::Empty));

        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(validate_url(&long), Err(UrlValidationError::TooLong));
    }
}
