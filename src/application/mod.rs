//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! the short code codec and the password gate. Services consume repository
//! traits and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, lookup and administration
//! - [`services::redirect_service::RedirectService`] - Redirect decision pipeline
//! - [`services::stats_service::StatsService`] - Click reports

pub mod services;
