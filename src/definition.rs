//! # Topology Definitions
//!
//! Declarative input for a parameterized topology build.
//!
//! The built-in S3 proxy is expressed as one of these (see
//! [`crate::builder::s3_proxy`]); any other topology can be loaded from YAML
//! or JSON and fed to the same builder.
//!
//! # Example
//!
//! ```yaml
//! name: S3ObjectsApi
//! api:
//!   displayName: S3 Proxy Service
//!   endpointType: EDGE
//!   binaryMediaTypes: [application/octet-stream]
//! role:
//!   id: api-gateway-role
//! resources:
//!   - /{folder}
//! methods:
//!   - path: /{folder}
//!     httpMethod: GET
//!     authorization: AWS_IAM
//!     requestParameters:
//!       method.request.path.folder: true
//!     integration:
//!       service: s3
//!       httpMethod: GET
//!       path: "{bucket}"
//!       action: s3:ListBucket
//!       requestParameters:
//!         integration.request.path.bucket: method.request.path.folder
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{APIGATEWAY_SERVICE_PRINCIPAL, UNRESTRICTED_RESOURCE_SCOPE};
use crate::topology::{AuthorizationType, EndpointType, HttpMethod, PassthroughBehavior};

/// Failure to read or parse a definition file
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read definition '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid YAML definition: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported definition file extension for '{}', expected .yaml, .yml or .json", .path.display())]
    UnsupportedExtension { path: PathBuf },
}

/// Complete declarative description of one API topology
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopologyDefinition {
    /// Construct id of the API, used as the base of rendered logical ids
    pub name: String,
    /// REST API settings
    pub api: ApiDefinition,
    /// Execution role assumed by integrations
    pub role: RoleDefinition,
    /// Resource paths to create (e.g. "/{folder}/{item}")
    /// Missing intermediate resources are created implicitly
    #[serde(default)]
    pub resources: Vec<String>,
    /// Method bindings
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

impl TopologyDefinition {
    pub fn from_yaml_str(content: &str) -> Result<Self, DefinitionError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a definition, choosing the parser from the file extension
    pub fn from_path(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(DefinitionError::UnsupportedExtension {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// REST API settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinition {
    /// Human-readable API name
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Exposure mode (EDGE, REGIONAL, PRIVATE). Default: EDGE
    #[serde(default)]
    pub endpoint_type: EndpointType,
    /// Content types treated as binary payloads (e.g. "image/jpeg")
    #[serde(default)]
    pub binary_media_types: Vec<String>,
}

/// Execution role settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    /// Role identity referenced by integration credentials
    pub id: String,
    /// Trusted service principal. Default: apigateway.amazonaws.com
    #[serde(default = "default_assumed_by")]
    pub assumed_by: String,
    /// Explicit granted actions
    /// When omitted, the role grants exactly the actions the methods require
    #[serde(default)]
    pub actions: Option<Vec<String>>,
    /// Resource scope of the granted actions. Default: ["*"]
    #[serde(default = "default_role_resources")]
    pub resources: Vec<String>,
}

/// One method binding
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MethodDefinition {
    /// Resource path the method is bound on (must be declared or be "/")
    pub path: String,
    pub http_method: HttpMethod,
    /// Caller authorization. Default: NONE
    #[serde(default)]
    pub authorization: AuthorizationType,
    /// Public request parameters (e.g. "method.request.path.folder") and whether they are required
    #[serde(default)]
    pub request_parameters: BTreeMap<String, bool>,
    #[serde(default)]
    pub method_responses: Vec<MethodResponseDefinition>,
    pub integration: IntegrationDefinition,
}

/// Public response contract
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MethodResponseDefinition {
    pub status_code: String,
    /// Response headers (e.g. "method.response.header.Content-Type") and whether they are required
    #[serde(default)]
    pub response_parameters: BTreeMap<String, bool>,
}

/// Backend service call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationDefinition {
    /// AWS service name (e.g. "s3")
    pub service: String,
    /// Service region. Default: the builder's default region
    #[serde(default)]
    pub region: Option<String>,
    /// Verb of the backend call
    pub http_method: HttpMethod,
    /// Backend path template (e.g. "{bucket}")
    pub path: String,
    /// Storage action the backend call requires (e.g. "s3:ListBucket")
    pub action: String,
    /// Default: WHEN_NO_MATCH
    #[serde(default)]
    pub passthrough_behavior: PassthroughBehavior,
    /// Backend parameter -> public parameter
    /// (e.g. "integration.request.path.bucket": "method.request.path.folder")
    #[serde(default)]
    pub request_parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub responses: Vec<IntegrationResponseDefinition>,
}

/// Backend response mapping
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResponseDefinition {
    pub status_code: String,
    /// Public header -> backend header
    #[serde(default)]
    pub response_parameters: BTreeMap<String, String>,
}

fn default_assumed_by() -> String {
    APIGATEWAY_SERVICE_PRINCIPAL.to_string()
}

fn default_role_resources() -> Vec<String> {
    vec![UNRESTRICTED_RESOURCE_SCOPE.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
name: Api
api:
  displayName: Minimal
role:
  id: gateway-role
methods:
  - path: /
    httpMethod: GET
    integration:
      service: s3
      httpMethod: GET
      path: /
      action: s3:ListAllMyBuckets
"#;

    #[test]
    fn test_defaults_applied() {
        let definition = TopologyDefinition::from_yaml_str(MINIMAL).unwrap();
        assert_eq!(definition.api.endpoint_type, EndpointType::Edge);
        assert_eq!(definition.role.assumed_by, "apigateway.amazonaws.com");
        assert_eq!(definition.role.resources, vec!["*"]);
        assert!(definition.role.actions.is_none());
        assert!(definition.resources.is_empty());

        let method = &definition.methods[0];
        assert_eq!(method.authorization, AuthorizationType::None);
        assert_eq!(
            method.integration.passthrough_behavior,
            PassthroughBehavior::WhenNoMatch
        );
        assert!(method.integration.region.is_none());
    }

    #[test]
    fn test_enum_wire_names() {
        let yaml = MINIMAL
            .replace("httpMethod: GET\n    integration", "httpMethod: GET\n    authorization: AWS_IAM\n    integration")
            .replace("displayName: Minimal", "displayName: Minimal\n  endpointType: REGIONAL");
        let definition = TopologyDefinition::from_yaml_str(&yaml).unwrap();
        assert_eq!(definition.api.endpoint_type, EndpointType::Regional);
        assert_eq!(definition.methods[0].authorization, AuthorizationType::Iam);
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let err = TopologyDefinition::from_yaml_str("name: [").unwrap_err();
        assert!(matches!(err, DefinitionError::Yaml(_)));
    }

    #[test]
    fn test_unknown_http_method_is_rejected() {
        let yaml = MINIMAL.replacen("httpMethod: GET", "httpMethod: FETCH", 1);
        assert!(TopologyDefinition::from_yaml_str(&yaml).is_err());
    }
}
