//! Cohort Server — HTTP boundary over the membership and RBAC engine.
//!
//! Exact framing is a deployment choice; this crate maps the engine's
//! operations onto an axum router with JSON payloads. Requester identity
//! arrives in the `x-user-id` header — the slot where a deployment's token
//! middleware would sit, since authentication itself is out of scope.

mod api;
mod config;
mod error;
mod state;

pub use api::router;
pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;
