//! # Template Rendering
//!
//! Translates a validated `HttpSurface` into template resources.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};
use tracing::debug;

use super::logical_id::{sanitize, LogicalIds};
use super::{Template, TemplateOutput, TemplateResource};
use crate::constants::{DEFAULT_STACK_NAME, DEFAULT_STAGE_NAME, TEMPLATE_FORMAT_VERSION};
use crate::error::{ConfigurationError, TopologyError};
use crate::topology::{HttpSurface, MethodBinding, ResourceId};
use crate::validation::validate_topology;

const POLICY_VERSION: &str = "2012-10-17";

/// Settings that affect the rendered template but not the topology
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub stack_name: String,
    /// Stage the deployment is published to
    pub stage_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            stage_name: DEFAULT_STAGE_NAME.to_string(),
        }
    }
}

/// Render `surface` into a deployment template
///
/// The surface is validated first; an inconsistent topology never produces
/// a template.
pub fn render(surface: &HttpSurface, options: &RenderOptions) -> Result<Template, TopologyError> {
    validate_topology(surface)?;

    let mut ids = LogicalIds::new();
    let mut resources = BTreeMap::new();

    let api_id = ids.allocate(&sanitize(&surface.name));
    resources.insert(api_id.clone(), rest_api(surface));

    let role_id = ids.allocate(&sanitize(surface.role.id().as_str()));
    let policy_id = ids.allocate(&format!("{role_id}DefaultPolicy"));
    resources.insert(role_id.clone(), role(surface));
    resources.insert(policy_id.clone(), policy(surface, &role_id, &policy_id));

    // Logical id per resource index; the root renders through RootResourceId
    let mut resource_ids: Vec<Option<String>> = vec![None; surface.resources.len()];
    for node in surface.resources.iter() {
        let (Some(parent), Some(segment)) = (node.parent, node.segment.as_ref()) else {
            continue;
        };
        let parent_base = resource_ids[parent.index()].clone().unwrap_or_else(|| api_id.clone());
        let logical_id = ids.allocate(&format!("{parent_base}{}", sanitize(&segment.to_string())));
        resources.insert(
            logical_id.clone(),
            TemplateResource {
                resource_type: "AWS::ApiGateway::Resource".to_string(),
                properties: json!({
                    "ParentId": resource_ref(&api_id, &resource_ids, parent)?,
                    "PathPart": node.path_part(),
                    "RestApiId": { "Ref": api_id },
                }),
                depends_on: Vec::new(),
            },
        );
        resource_ids[node.id.index()] = Some(logical_id);
    }

    let mut method_ids = Vec::with_capacity(surface.bindings.len());
    for binding in &surface.bindings {
        let base = resource_ids
            .get(binding.resource.index())
            .cloned()
            .flatten()
            .unwrap_or_else(|| format!("{api_id}Root"));
        let method_id = ids.allocate(&format!("{base}{}", binding.http_method));
        let properties = method(&api_id, &role_id, &resource_ids, binding)?;
        resources.insert(
            method_id.clone(),
            TemplateResource {
                resource_type: "AWS::ApiGateway::Method".to_string(),
                properties,
                depends_on: Vec::new(),
            },
        );
        method_ids.push(method_id);
    }

    let deployment_id = ids.allocate(&format!("{api_id}Deployment"));
    resources.insert(
        deployment_id.clone(),
        TemplateResource {
            resource_type: "AWS::ApiGateway::Deployment".to_string(),
            properties: json!({
                "Description": format!("Deployment of {}", surface.display_name),
                "RestApiId": { "Ref": api_id },
            }),
            depends_on: method_ids,
        },
    );

    let stage_id = ids.allocate(&format!(
        "{api_id}DeploymentStage{}",
        sanitize(&options.stage_name)
    ));
    resources.insert(
        stage_id,
        TemplateResource {
            resource_type: "AWS::ApiGateway::Stage".to_string(),
            properties: json!({
                "DeploymentId": { "Ref": deployment_id },
                "RestApiId": { "Ref": api_id },
                "StageName": options.stage_name,
            }),
            depends_on: Vec::new(),
        },
    );

    let mut outputs = BTreeMap::new();
    outputs.insert(
        format!("{api_id}Endpoint"),
        TemplateOutput {
            description: Some(format!("Invoke URL of {}", surface.display_name)),
            value: json!({
                "Fn::Join": ["", [
                    "https://",
                    { "Ref": api_id },
                    ".execute-api.",
                    { "Ref": "AWS::Region" },
                    ".",
                    { "Ref": "AWS::URLSuffix" },
                    "/",
                    options.stage_name,
                    "/"
                ]]
            }),
        },
    );

    debug!(
        resources = resources.len(),
        stack = %options.stack_name,
        "template rendered"
    );

    Ok(Template {
        format_version: TEMPLATE_FORMAT_VERSION.to_string(),
        description: Some(format!(
            "{} - {}",
            options.stack_name,
            surface
                .description
                .as_deref()
                .unwrap_or(&surface.display_name)
        )),
        resources,
        outputs,
    })
}

fn rest_api(surface: &HttpSurface) -> TemplateResource {
    let mut properties = Map::new();
    properties.insert("Name".to_string(), json!(surface.display_name));
    if let Some(description) = &surface.description {
        properties.insert("Description".to_string(), json!(description));
    }
    properties.insert(
        "EndpointConfiguration".to_string(),
        json!({ "Types": [surface.endpoint_type.as_str()] }),
    );
    if !surface.binary_media_types.is_empty() {
        properties.insert(
            "BinaryMediaTypes".to_string(),
            json!(surface.binary_media_types),
        );
    }
    TemplateResource {
        resource_type: "AWS::ApiGateway::RestApi".to_string(),
        properties: Value::Object(properties),
        depends_on: Vec::new(),
    }
}

fn role(surface: &HttpSurface) -> TemplateResource {
    TemplateResource {
        resource_type: "AWS::IAM::Role".to_string(),
        properties: json!({
            "AssumeRolePolicyDocument": {
                "Version": POLICY_VERSION,
                "Statement": [{
                    "Action": "sts:AssumeRole",
                    "Effect": "Allow",
                    "Principal": { "Service": surface.role.trusted_principal() },
                }],
            },
        }),
        depends_on: Vec::new(),
    }
}

/// One statement per granted action, all scoped to the role's resources
fn policy(surface: &HttpSurface, role_id: &str, policy_id: &str) -> TemplateResource {
    let scope = match surface.role.resources() {
        [single] => json!(single),
        many => json!(many),
    };
    let statements: Vec<Value> = surface
        .role
        .actions()
        .iter()
        .map(|action| {
            json!({
                "Action": action.as_str(),
                "Effect": "Allow",
                "Resource": scope,
            })
        })
        .collect();

    TemplateResource {
        resource_type: "AWS::IAM::Policy".to_string(),
        properties: json!({
            "PolicyDocument": {
                "Version": POLICY_VERSION,
                "Statement": statements,
            },
            "PolicyName": policy_id,
            "Roles": [{ "Ref": role_id }],
        }),
        depends_on: Vec::new(),
    }
}

fn method(
    api_id: &str,
    role_id: &str,
    resource_ids: &[Option<String>],
    binding: &MethodBinding,
) -> Result<Value, ConfigurationError> {
    let integration = &binding.integration;

    let mut integration_properties = Map::new();
    integration_properties.insert("Type".to_string(), json!("AWS"));
    integration_properties.insert(
        "IntegrationHttpMethod".to_string(),
        json!(integration.http_method.as_str()),
    );
    integration_properties.insert("Uri".to_string(), json!(integration.uri()));
    integration_properties.insert(
        "Credentials".to_string(),
        json!({ "Fn::GetAtt": [role_id, "Arn"] }),
    );
    integration_properties.insert(
        "PassthroughBehavior".to_string(),
        json!(integration.passthrough_behavior.as_str()),
    );
    if !integration.request_parameters.is_empty() {
        let mappings: Map<String, Value> = integration
            .request_parameters
            .iter()
            .map(|(target, source)| (target.to_string(), json!(source.to_string())))
            .collect();
        integration_properties.insert("RequestParameters".to_string(), Value::Object(mappings));
    }
    if !integration.responses.is_empty() {
        let responses: Vec<Value> = integration
            .responses
            .iter()
            .map(|response| {
                let parameters: Map<String, Value> = response
                    .response_parameters
                    .iter()
                    .map(|(target, source)| (target.to_string(), json!(source.to_string())))
                    .collect();
                json!({
                    "StatusCode": response.status_code,
                    "ResponseParameters": parameters,
                })
            })
            .collect();
        integration_properties.insert("IntegrationResponses".to_string(), json!(responses));
    }

    let mut properties = Map::new();
    properties.insert(
        "HttpMethod".to_string(),
        json!(binding.http_method.as_str()),
    );
    properties.insert(
        "ResourceId".to_string(),
        resource_ref(api_id, resource_ids, binding.resource)?,
    );
    properties.insert("RestApiId".to_string(), json!({ "Ref": api_id }));
    properties.insert(
        "AuthorizationType".to_string(),
        json!(binding.authorization.as_str()),
    );
    if !binding.request_parameters.is_empty() {
        let parameters: Map<String, Value> = binding
            .request_parameters
            .iter()
            .map(|(expression, required)| (expression.to_string(), json!(required)))
            .collect();
        properties.insert("RequestParameters".to_string(), Value::Object(parameters));
    }
    properties.insert(
        "Integration".to_string(),
        Value::Object(integration_properties),
    );
    if !binding.method_responses.is_empty() {
        let responses: Vec<Value> = binding
            .method_responses
            .iter()
            .map(|response| {
                let parameters: Map<String, Value> = response
                    .response_parameters
                    .iter()
                    .map(|(expression, required)| (expression.to_string(), json!(required)))
                    .collect();
                json!({
                    "StatusCode": response.status_code,
                    "ResponseParameters": parameters,
                })
            })
            .collect();
        properties.insert("MethodResponses".to_string(), json!(responses));
    }

    Ok(Value::Object(properties))
}

/// `RootResourceId` for the root, `Ref` for everything else
fn resource_ref(
    api_id: &str,
    resource_ids: &[Option<String>],
    resource: ResourceId,
) -> Result<Value, ConfigurationError> {
    if resource == ResourceId::ROOT {
        return Ok(json!({ "Fn::GetAtt": [api_id, "RootResourceId"] }));
    }
    match resource_ids.get(resource.index()) {
        Some(Some(logical_id)) => Ok(json!({ "Ref": logical_id })),
        _ => Err(ConfigurationError::UnknownResource {
            path: format!("#{}", resource.index()),
        }),
    }
}
