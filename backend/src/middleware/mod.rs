//! Request middleware.

pub mod trace;

pub use trace::{TraceId, trace_requests};
