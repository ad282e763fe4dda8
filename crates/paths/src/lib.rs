//! Shared path and parameter-mapping definitions for API Gateway integrations
//!
//! This crate centralizes the string formats that the topology builder, the
//! validator and the template renderer all need to agree on.
//!
//! ## Path templates
//!
//! `PathTemplate` parses slash-separated templates such as `/{folder}/{item}`
//! (public resource paths). `BackendPath` wraps a template for integration
//! paths (`{bucket}`) and keeps the text as written, since it ends up verbatim
//! in the integration URI.
//!
//! ## Parameter expressions
//!
//! `ParameterExpression` parses the dotted mapping keys used on both sides of
//! an integration, e.g. `method.request.path.folder` or
//! `integration.response.header.Content-Type`.

pub mod backend;
pub mod errors;
pub mod expression;
pub mod segment;
pub mod template;
pub mod uri;

// Re-export core types for convenience
pub use backend::BackendPath;
pub use errors::PathError;
pub use expression::{ParameterExpression, ParameterLocation, ParameterSource};
pub use segment::PathSegment;
pub use template::PathTemplate;
pub use uri::integration_uri;
