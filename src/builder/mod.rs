//! # Topology Builder
//!
//! Assembles an `HttpSurface` from a `TopologyDefinition`.
//!
//! Assembly is a straight line with no I/O:
//!
//! 1. Create the surface settings (root resource is implicit)
//! 2. Build the resource tree
//! 3. Collect every storage action the methods need
//! 4. Construct the execution role once, with its complete action set
//! 5. Build each method binding against the tree and the role
//! 6. Validate the finished topology
//!
//! Any inconsistency is returned as a `TopologyError`; nothing partially
//! built escapes.

pub mod s3_proxy;

use std::collections::BTreeMap;

use paths::{BackendPath, ParameterExpression, PathTemplate};
use tracing::{debug, info};

use crate::constants::DEFAULT_REGION;
use crate::definition::{MethodDefinition, TopologyDefinition};
use crate::error::{ConfigurationError, TopologyError};
use crate::topology::{
    ExecutionRole, HttpSurface, Integration, IntegrationResponse, MethodBinding, MethodResponse,
    ResourceTree, RoleRef, StorageAction,
};
use crate::validation::validate_topology;

/// Builds topologies from definitions
#[derive(Debug, Clone)]
pub struct TopologyBuilder {
    default_region: String,
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl TopologyBuilder {
    /// `default_region` applies to integrations that do not name a region
    pub fn new(default_region: impl Into<String>) -> Self {
        Self {
            default_region: default_region.into(),
        }
    }

    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    /// Assemble and validate the topology described by `definition`
    pub fn build(&self, definition: &TopologyDefinition) -> Result<HttpSurface, TopologyError> {
        let span = tracing::debug_span!("topology.build", topology.name = %definition.name);
        let _guard = span.enter();

        let resources = build_resource_tree(definition)?;
        debug!(resources = resources.len(), "resource tree assembled");

        let actions = match &definition.role.actions {
            Some(explicit) => explicit.iter().map(StorageAction::new).collect(),
            None => required_actions(&definition.methods),
        };
        let role = ExecutionRole::new(
            definition.role.id.clone(),
            definition.role.assumed_by.clone(),
            actions,
            definition.role.resources.clone(),
        );
        debug!(
            role = %role.id(),
            actions = ?role.actions().iter().map(StorageAction::as_str).collect::<Vec<_>>(),
            "execution role constructed"
        );

        let credentials = role.reference();
        let bindings = definition
            .methods
            .iter()
            .map(|method| self.bind(&resources, &credentials, method))
            .collect::<Result<Vec<_>, _>>()?;

        let surface = HttpSurface {
            name: definition.name.clone(),
            display_name: definition.api.display_name.clone(),
            description: definition.api.description.clone(),
            endpoint_type: definition.api.endpoint_type,
            binary_media_types: definition.api.binary_media_types.clone(),
            resources,
            role,
            bindings,
        };

        validate_topology(&surface)?;

        info!(
            topology.name = %surface.name,
            resources = surface.resources.len(),
            bindings = surface.bindings.len(),
            actions = surface.role.actions().len(),
            "topology finalized"
        );
        Ok(surface)
    }

    fn bind(
        &self,
        resources: &ResourceTree,
        credentials: &RoleRef,
        method: &MethodDefinition,
    ) -> Result<MethodBinding, ConfigurationError> {
        let template = parse_path(&method.path)?;
        let resource = resources
            .find(&template)
            .ok_or_else(|| ConfigurationError::UnknownResource {
                path: template.to_string(),
            })?;

        let integration = &method.integration;
        let binding = MethodBinding {
            resource,
            http_method: method.http_method,
            authorization: method.authorization,
            request_parameters: parse_required(&method.request_parameters)?,
            method_responses: method
                .method_responses
                .iter()
                .map(|response| {
                    Ok(MethodResponse {
                        status_code: response.status_code.clone(),
                        response_parameters: parse_required(&response.response_parameters)?,
                    })
                })
                .collect::<Result<Vec<_>, ConfigurationError>>()?,
            integration: Integration {
                service: integration.service.clone(),
                region: integration
                    .region
                    .clone()
                    .unwrap_or_else(|| self.default_region.clone()),
                http_method: integration.http_method,
                path: parse_backend_path(&integration.path)?,
                action: StorageAction::new(integration.action.clone()),
                credentials: credentials.clone(),
                passthrough_behavior: integration.passthrough_behavior,
                request_parameters: parse_mappings(&integration.request_parameters)?,
                responses: integration
                    .responses
                    .iter()
                    .map(|response| {
                        Ok(IntegrationResponse {
                            status_code: response.status_code.clone(),
                            response_parameters: parse_mappings(&response.response_parameters)?,
                        })
                    })
                    .collect::<Result<Vec<_>, ConfigurationError>>()?,
            },
        };

        debug!(
            path = %template,
            method = %binding.http_method,
            action = %binding.integration.action,
            "method bound"
        );
        Ok(binding)
    }
}

/// Storage actions required by `methods`, deduplicated in first-seen order
pub fn required_actions(methods: &[MethodDefinition]) -> Vec<StorageAction> {
    let mut actions: Vec<StorageAction> = Vec::new();
    for method in methods {
        let action = StorageAction::new(method.integration.action.clone());
        if !actions.contains(&action) {
            actions.push(action);
        }
    }
    actions
}

fn build_resource_tree(definition: &TopologyDefinition) -> Result<ResourceTree, ConfigurationError> {
    let mut tree = ResourceTree::new();
    for path in &definition.resources {
        tree.ensure_path(&parse_path(path)?)?;
    }
    Ok(tree)
}

fn parse_path(path: &str) -> Result<PathTemplate, ConfigurationError> {
    path.parse::<PathTemplate>()
        .map_err(|source| ConfigurationError::InvalidPath {
            path: path.to_string(),
            source,
        })
}

fn parse_backend_path(path: &str) -> Result<BackendPath, ConfigurationError> {
    path.parse::<BackendPath>()
        .map_err(|source| ConfigurationError::InvalidPath {
            path: path.to_string(),
            source,
        })
}

fn parse_expression(expression: &str) -> Result<ParameterExpression, ConfigurationError> {
    expression
        .parse::<ParameterExpression>()
        .map_err(|source| ConfigurationError::InvalidParameterExpression {
            expression: expression.to_string(),
            source,
        })
}

fn parse_required(
    parameters: &BTreeMap<String, bool>,
) -> Result<BTreeMap<ParameterExpression, bool>, ConfigurationError> {
    parameters
        .iter()
        .map(|(expression, required)| Ok((parse_expression(expression)?, *required)))
        .collect()
}

fn parse_mappings(
    mappings: &BTreeMap<String, String>,
) -> Result<BTreeMap<ParameterExpression, ParameterExpression>, ConfigurationError> {
    mappings
        .iter()
        .map(|(target, source)| Ok((parse_expression(target)?, parse_expression(source)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{ApiDefinition, IntegrationDefinition, RoleDefinition};
    use crate::error::PolicyError;
    use crate::topology::{AuthorizationType, EndpointType, HttpMethod, PassthroughBehavior};

    fn method(path: &str, backend_path: &str, action: &str) -> MethodDefinition {
        MethodDefinition {
            path: path.to_string(),
            http_method: HttpMethod::Get,
            authorization: AuthorizationType::Iam,
            request_parameters: BTreeMap::new(),
            method_responses: Vec::new(),
            integration: IntegrationDefinition {
                service: "s3".to_string(),
                region: None,
                http_method: HttpMethod::Get,
                path: backend_path.to_string(),
                action: action.to_string(),
                passthrough_behavior: PassthroughBehavior::WhenNoTemplates,
                request_parameters: BTreeMap::new(),
                responses: Vec::new(),
            },
        }
    }

    fn definition(resources: &[&str], methods: Vec<MethodDefinition>) -> TopologyDefinition {
        TopologyDefinition {
            name: "Api".to_string(),
            api: ApiDefinition {
                display_name: "Test".to_string(),
                description: None,
                endpoint_type: EndpointType::Regional,
                binary_media_types: Vec::new(),
            },
            role: RoleDefinition {
                id: "role".to_string(),
                assumed_by: "apigateway.amazonaws.com".to_string(),
                actions: None,
                resources: vec!["*".to_string()],
            },
            resources: resources.iter().map(ToString::to_string).collect(),
            methods,
        }
    }

    #[test]
    fn test_required_actions_deduplicated() {
        let methods = vec![
            method("/", "/", "s3:ListAllMyBuckets"),
            method("/", "/", "s3:ListAllMyBuckets"),
            method("/", "/", "s3:ListBucket"),
        ];
        assert_eq!(
            required_actions(&methods),
            vec![
                StorageAction::new("s3:ListAllMyBuckets"),
                StorageAction::new("s3:ListBucket")
            ]
        );
    }

    #[test]
    fn test_default_region_applied() {
        let builder = TopologyBuilder::new("eu-west-1");
        let surface = builder
            .build(&definition(&[], vec![method("/", "/", "s3:ListAllMyBuckets")]))
            .unwrap();
        assert_eq!(surface.bindings[0].integration.region, "eu-west-1");
    }

    #[test]
    fn test_method_on_undeclared_resource() {
        let err = TopologyBuilder::default()
            .build(&definition(&[], vec![method("/{folder}", "/", "s3:ListBucket")]))
            .unwrap_err();
        assert_eq!(
            err,
            TopologyError::Configuration(ConfigurationError::UnknownResource {
                path: "/{folder}".to_string()
            })
        );
    }

    #[test]
    fn test_explicit_role_actions_missing_one() {
        let mut def = definition(&[], vec![method("/", "/", "s3:ListAllMyBuckets")]);
        def.role.actions = Some(vec!["s3:GetObject".to_string()]);
        let err = TopologyBuilder::default().build(&def).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::Policy(PolicyError::MissingAction { ref action, .. }) if action == "s3:ListAllMyBuckets"
        ));
    }

    #[test]
    fn test_invalid_expression_reported() {
        let mut get = method("/", "/", "s3:ListAllMyBuckets");
        get.request_parameters
            .insert("method.request.body.x".to_string(), true);
        let err = TopologyBuilder::default()
            .build(&definition(&[], vec![get]))
            .unwrap_err();
        assert!(matches!(
            err,
            TopologyError::Configuration(ConfigurationError::InvalidParameterExpression { .. })
        ));
    }
}
