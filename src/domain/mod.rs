//! Domain layer containing business entities and logic.
//!
//! This module holds the core model of the service independent of HTTP and SQL:
//!
//! - [`entities`] - Short links, click logs and their rules (expiration, password gate)
//! - [`repositories`] - Data access trait definitions
//! - [`password`] - Password hashing capability
//! - [`redirect`] - Redirect request and outcome types
//!
//! # Redirect Flow
//!
//! 1. HTTP handler builds a [`redirect::RedirectRequest`]
//! 2. [`crate::application::services::RedirectService`] decodes, looks up and gates the link
//! 3. Click data is persisted via [`repositories::ClickLogRepository`] and
//!    [`repositories::LinkRepository`]
//! 4. The handler maps the [`redirect::RedirectOutcome`] to an HTTP response

pub mod entities;
pub mod password;
pub mod redirect;
pub mod repositories;
