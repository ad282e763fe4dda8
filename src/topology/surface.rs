//! # HTTP Surface
//!
//! The REST API as a whole: its exposure, its resource tree, the execution
//! role and every method binding.

use std::collections::BTreeSet;
use std::fmt;

use paths::PathTemplate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::binding::{HttpMethod, MethodBinding};
use super::resource::{ResourceId, ResourceTree};
use super::role::{ExecutionRole, StorageAction};

/// How the API is exposed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EndpointType {
    /// Fronted by the global edge network
    #[default]
    Edge,
    /// Served from a single region
    Regional,
    /// Reachable only from inside a VPC
    Private,
}

impl EndpointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointType::Edge => "EDGE",
            EndpointType::Regional => "REGIONAL",
            EndpointType::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finalized API topology, ready for the provisioning engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSurface {
    /// Construct id, also the base of rendered logical ids
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub endpoint_type: EndpointType,
    pub binary_media_types: Vec<String>,
    pub resources: ResourceTree,
    pub role: ExecutionRole,
    pub bindings: Vec<MethodBinding>,
}

impl HttpSurface {
    /// Bindings declared on `resource`, in declaration order
    pub fn bindings_for(&self, resource: ResourceId) -> Vec<&MethodBinding> {
        self.bindings
            .iter()
            .filter(|binding| binding.resource == resource)
            .collect()
    }

    pub fn binding(&self, resource: ResourceId, method: HttpMethod) -> Option<&MethodBinding> {
        self.bindings
            .iter()
            .find(|binding| binding.resource == resource && binding.http_method == method)
    }

    /// Resource at `path` (e.g. `/{folder}`), if declared
    pub fn resource_by_path(&self, path: &str) -> Option<ResourceId> {
        let template: PathTemplate = path.parse().ok()?;
        self.resources.find(&template)
    }

    /// Union of the storage actions all bindings need
    pub fn required_actions(&self) -> BTreeSet<&StorageAction> {
        self.bindings
            .iter()
            .map(|binding| &binding.integration.action)
            .collect()
    }

    /// Path of `resource` as rendered text
    pub fn path_of(&self, resource: ResourceId) -> String {
        self.resources.full_path(resource).to_string()
    }
}
