//! Task board backend: task and category management behind JWT bearer
//! authentication.
//!
//! - [`domain`]: entities, use-case services and ports
//! - [`inbound`]: the actix-web HTTP adapter and response translator
//! - [`outbound`]: Diesel persistence plus bcrypt and JWT adapters
//! - [`middleware`]: request tracing

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::trace_requests;
