//! # API Gateway S3 Proxy
//!
//! Declarative topology of a REST API that proxies HTTP verbs to S3 storage
//! operations.
//!
//! ## Overview
//!
//! The crate builds an in-memory graph and renders it for an external
//! provisioning engine:
//!
//! 1. **Definitions** - a `TopologyDefinition` describes the API, its path
//!    resources, the execution role and every method binding
//! 2. **Builder** - `TopologyBuilder` assembles the definition into an
//!    `HttpSurface`, constructing the role once with its complete action set
//! 3. **Validation** - parameter mappings, resource ancestry and role grants
//!    are checked before anything leaves the process
//! 4. **Template** - the finalized surface renders to a CloudFormation-style
//!    document (JSON or YAML)
//!
//! The built-in configuration (`builder::s3_proxy`) exposes `GET /` (list all
//! buckets) and `GET /{folder}` (list the objects of one bucket), both
//! requiring IAM-signed callers.

pub mod builder;
pub mod config;
pub mod constants;
pub mod definition;
pub mod error;
pub mod observability;
pub mod report;
pub mod template;
pub mod topology;
pub mod validation;

pub use builder::{s3_proxy, TopologyBuilder};
pub use definition::{DefinitionError, TopologyDefinition};
pub use error::{ConfigurationError, PolicyError, TopologyError};
pub use template::{render, OutputFormat, RenderOptions, Template};
pub use topology::*;
pub use validation::validate_topology;
