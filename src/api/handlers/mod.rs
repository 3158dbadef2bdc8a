//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod metrics;
pub mod redirect;
pub mod report;
pub mod shorten;

pub use health::health_handler;
pub use links::link_details_handler;
pub use metrics::metrics_handler;
pub use redirect::{redirect_handler, unlock_handler};
pub use report::report_handler;
pub use shorten::shorten_handler;
