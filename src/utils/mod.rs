//! Utility functions used across the application.
//!
//! - [`short_code`] - Reversible short code codec
//! - [`url_validator`] - Validation of submitted URLs
//! - [`client_ip`] - Visitor address resolution from HTTP headers
//! - [`origin`] - Public origin for absolute short URLs

pub mod client_ip;
pub mod origin;
pub mod short_code;
pub mod url_validator;
