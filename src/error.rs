//! # Topology Errors
//!
//! Validation failures raised while assembling a topology, split into
//! configuration problems (paths, parameters, mappings) and access policy
//! problems (roles and their granted actions).
//!
//! Both are raised before anything is handed to the provisioning engine.

use paths::PathError;
use thiserror::Error;

/// Any failure that prevents a topology from being finalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl TopologyError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, TopologyError::Configuration(_))
    }

    pub fn is_policy(&self) -> bool {
        matches!(self, TopologyError::Policy(_))
    }
}

/// Structural inconsistency in resources, methods or parameter mappings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("invalid path '{path}': {source}")]
    InvalidPath { path: String, source: PathError },

    #[error("invalid parameter expression '{expression}': {source}")]
    InvalidParameterExpression { expression: String, source: PathError },

    /// An expression was used on the wrong side of a mapping
    #[error("parameter '{expression}' is not allowed here, expected a {expected} parameter")]
    MisplacedParameter {
        expression: String,
        expected: &'static str,
    },

    #[error("resource '{path}' is not declared")]
    UnknownResource { path: String },

    #[error("resource '{path}' is already declared")]
    DuplicateResource { path: String },

    /// The same parameter name appears twice along one path
    #[error("resource '{path}' reuses path parameter '{name}' already bound by an ancestor")]
    DuplicatePathParameter { path: String, name: String },

    /// Two differently named parameters under one parent make routing ambiguous
    #[error("resource '{parent}' already has parameter child '{existing}', cannot add '{requested}'")]
    ConflictingParameterSiblings {
        parent: String,
        existing: String,
        requested: String,
    },

    #[error("method {method} on '{path}' is declared more than once")]
    DuplicateMethod { path: String, method: String },

    /// `ANY` cannot share a resource with explicit verbs
    #[error("method {method} on '{path}' conflicts with an ANY method on the same resource")]
    ConflictingAnyMethod { path: String, method: String },

    /// A greedy `{name+}` parameter must be the last segment of every path
    #[error("resource '{path}' is nested under greedy parameter '{parameter}'")]
    GreedyParameterNotLast { path: String, parameter: String },

    #[error("method {method} on '{path}': backend placeholder '{{{placeholder}}}' has no request-parameter mapping")]
    UnmappedBackendPlaceholder {
        path: String,
        method: String,
        placeholder: String,
    },

    /// A mapping reads a path parameter the resource chain does not define
    #[error("method {method} on '{path}': path parameter '{parameter}' is not defined by the resource or its ancestors")]
    DanglingPathParameter {
        path: String,
        method: String,
        parameter: String,
    },

    #[error("method {method} on '{path}': required request parameter '{parameter}' is not mapped by the integration")]
    UnmappedRequiredParameter {
        path: String,
        method: String,
        parameter: String,
    },

    #[error("method {method} on '{path}': required response parameter '{parameter}' for status {status_code} is not mapped by the integration")]
    UnmappedResponseParameter {
        path: String,
        method: String,
        status_code: String,
        parameter: String,
    },

    #[error("binary media type '{media_type}' must have the form type/subtype")]
    InvalidBinaryMediaType { media_type: String },

    #[error("region '{region}' is not a valid AWS region code")]
    InvalidRegion { region: String },

    /// Also raised when the value has no letter or digit to build an id from
    #[error("{field} must contain at least one letter or digit")]
    EmptyField { field: &'static str },
}

/// Access policy inconsistency between bindings and the execution role
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("method {method} on '{path}' uses credentials '{role}' which is not the topology's execution role")]
    UnknownRole {
        path: String,
        method: String,
        role: String,
    },

    /// The storage service would reject the call at request time
    #[error("method {method} on '{path}' requires action '{action}' which role '{role}' does not grant")]
    MissingAction {
        path: String,
        method: String,
        action: String,
        role: String,
    },

    /// The role grants more than its bindings use
    #[error("role '{role}' grants action '{action}' which no method requires")]
    UnusedAction { role: String, action: String },

    #[error("role '{role}' has an empty resource scope")]
    EmptyResourceScope { role: String },

    #[error("role '{role}' has no trusted principal")]
    MissingTrustedPrincipal { role: String },
}
