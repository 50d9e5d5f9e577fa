//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. CORS: answers preflight before anything else runs
//! 2. Audit logger: one line per request, no bodies

pub mod audit;
