//! HTTP API handlers for ecosort-ai

pub mod classify;
pub mod health;
pub mod status;

pub use classify::classify_routes;
pub use health::{health_routes, BuildInfo};
pub use status::status_routes;
