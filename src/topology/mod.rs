//! # Topology
//!
//! The resolved, in-memory graph handed to the provisioning engine.
//!
//! `HttpSurface` owns the `ResourceTree` and every `MethodBinding`. Bindings
//! refer to the single `ExecutionRole` by identity (`RoleRef`) rather than
//! embedding its policy.

pub mod binding;
pub mod resource;
pub mod role;
pub mod surface;

pub use binding::{
    AuthorizationType, HttpMethod, Integration, IntegrationResponse, MethodBinding,
    MethodResponse, PassthroughBehavior,
};
pub use resource::{PathResource, ResourceId, ResourceTree};
pub use role::{ExecutionRole, RoleRef, StorageAction, StorageOperation};
pub use surface::{EndpointType, HttpSurface};
