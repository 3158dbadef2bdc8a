//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A long URL addressed by an obfuscated short code
//! - [`ClickLog`] - One distinct visitor (by IP) of a link
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewShortLink`, `NewClickLog`).

pub mod click_log;
pub mod short_link;

pub use click_log::{ClickLog, NewClickLog};
pub use short_link::{NewShortLink, ShortLink};
