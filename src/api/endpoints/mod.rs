//! API endpoint handlers.
//!
//! Handlers are thin: they parse, call into `CoreState` / the engine, and
//! shape the response.

pub mod catalog;
pub mod health;
pub mod intake;
pub mod triage;
