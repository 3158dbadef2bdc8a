//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the relational store behind the service. Concrete
//! implementations live in `crate::infrastructure::persistence`; mocks are
//! generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link CRUD, click counters and analytics queries
//! - [`ClickLogRepository`] - Distinct-visitor click logs

pub mod click_log_repository;
pub mod link_repository;

pub use click_log_repository::ClickLogRepository;
pub use link_repository::{LinkFilter, LinkRepository};

#[cfg(test)]
pub use click_log_repository::MockClickLogRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
