//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Short link storage, click counters and analytics queries
//! - [`PgClickLogRepository`] - Distinct-visitor click logs
//! - [`InMemoryStore`] - Both repositories in process memory

pub mod memory_store;
pub mod pg_click_log_repository;
pub mod pg_link_repository;

pub use memory_store::InMemoryStore;
pub use pg_click_log_repository::PgClickLogRepository;
pub use pg_link_repository::PgLinkRepository;
