//! Business logic services for the application layer.

mod blocking;
pub mod link_service;
pub mod redirect_service;
pub mod stats_service;

pub use link_service::LinkService;
pub use redirect_service::RedirectService;
pub use stats_service::{ClickReport, StatsService};
