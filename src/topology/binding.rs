//! # Method Bindings
//!
//! Association of an HTTP verb on a path resource with one backend storage
//! operation, including parameter mappings and the authorization requirement.

use std::collections::BTreeMap;
use std::fmt;

use paths::{integration_uri, BackendPath, ParameterExpression};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::resource::ResourceId;
use super::role::{RoleRef, StorageAction};

/// HTTP verb, used both for the public method and the backend call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Head,
    Patch,
    Options,
    Any,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Any => "ANY",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization required from the public-facing caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationType {
    /// Open access
    #[default]
    None,
    /// Caller must sign the request with an IAM identity
    #[serde(rename = "AWS_IAM")]
    Iam,
    /// Custom (Lambda) authorizer
    Custom,
    /// Cognito user pool authorizer
    CognitoUserPools,
}

impl AuthorizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationType::None => "NONE",
            AuthorizationType::Iam => "AWS_IAM",
            AuthorizationType::Custom => "CUSTOM",
            AuthorizationType::CognitoUserPools => "COGNITO_USER_POOLS",
        }
    }

    /// Whether the caller's identity must be established before the call
    pub fn requires_caller_identity(&self) -> bool {
        !matches!(self, AuthorizationType::None)
    }
}

/// How requests are forwarded when no mapping template matches the content type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassthroughBehavior {
    /// Pass the body through when no template matches the content type
    #[default]
    WhenNoMatch,
    /// Pass the body through only when no templates are defined at all
    WhenNoTemplates,
    /// Reject unmapped content types with 415
    Never,
}

impl PassthroughBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassthroughBehavior::WhenNoMatch => "WHEN_NO_MATCH",
            PassthroughBehavior::WhenNoTemplates => "WHEN_NO_TEMPLATES",
            PassthroughBehavior::Never => "NEVER",
        }
    }
}

/// Public response contract for one status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodResponse {
    pub status_code: String,
    /// `method.response.header.*` -> required
    pub response_parameters: BTreeMap<ParameterExpression, bool>,
}

/// Backend response mapping for one status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationResponse {
    pub status_code: String,
    /// `method.response.header.*` <- `integration.response.header.*`
    pub response_parameters: BTreeMap<ParameterExpression, ParameterExpression>,
}

/// Backend side of a binding: an AWS service call made with the role's credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integration {
    pub service: String,
    pub region: String,
    /// Verb of the backend call; may differ from the public verb
    pub http_method: HttpMethod,
    /// Backend path as written; it appears verbatim in the URI
    pub path: BackendPath,
    /// Storage action the backend call needs
    pub action: StorageAction,
    pub credentials: RoleRef,
    pub passthrough_behavior: PassthroughBehavior,
    /// `integration.request.*` <- `method.request.*`
    pub request_parameters: BTreeMap<ParameterExpression, ParameterExpression>,
    pub responses: Vec<IntegrationResponse>,
}

impl Integration {
    /// Backend ARN, e.g. `arn:aws:apigateway:us-east-1:s3:path/{bucket}`
    pub fn uri(&self) -> String {
        integration_uri(&self.region, &self.service, self.path.as_str())
    }

    /// Integration response mapped for `status_code`
    pub fn response_for(&self, status_code: &str) -> Option<&IntegrationResponse> {
        self.responses
            .iter()
            .find(|response| response.status_code == status_code)
    }
}

/// One (resource, verb) pair bound to one backend operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBinding {
    pub resource: ResourceId,
    pub http_method: HttpMethod,
    pub authorization: AuthorizationType,
    /// `method.request.*` -> required
    pub request_parameters: BTreeMap<ParameterExpression, bool>,
    pub method_responses: Vec<MethodResponse>,
    pub integration: Integration,
}

impl MethodBinding {
    /// Public path parameters the caller must supply
    pub fn required_path_parameters(&self) -> Vec<&str> {
        self.request_parameters
            .iter()
            .filter(|(expression, required)| **required && expression.is_path())
            .map(|(expression, _)| expression.name.as_str())
            .collect()
    }

    pub fn requires_caller_identity(&self) -> bool {
        self.authorization.requires_caller_identity()
    }
}
