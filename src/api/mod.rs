//! Intake HTTP API.
//!
//! Exposes the catalog, the stateless engine and per-user intake sessions
//! as JSON endpoints nested under `/api/`.
//!
//! The router is composable. `intake_api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::intake_api_router;
pub use server::{start_api_server_on, IntakeApiServer, ServerSession};
pub use types::ApiContext;
