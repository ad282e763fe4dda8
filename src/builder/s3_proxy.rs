//! # S3 Proxy Topology
//!
//! The fixed two-operation configuration: a REST API that lists all buckets
//! on `GET /` and lists the objects of one bucket on `GET /{folder}`, both
//! through AWS-type integrations signed with a dedicated execution role.
//!
//! `/{folder}/{item}` is created but left unbound; it is reserved for
//! per-object operations.

use std::collections::BTreeMap;

use paths::ParameterExpression;

use crate::builder::TopologyBuilder;
use crate::constants::{
    APIGATEWAY_SERVICE_PRINCIPAL, CONTENT_TYPE_HEADER, DEFAULT_API_DESCRIPTION,
    DEFAULT_API_DISPLAY_NAME, DEFAULT_BINARY_MEDIA_TYPES, DEFAULT_REGION, DEFAULT_ROLE_ID,
    STATUS_OK, STORAGE_SERVICE, UNRESTRICTED_RESOURCE_SCOPE,
};
use crate::definition::{
    ApiDefinition, IntegrationDefinition, IntegrationResponseDefinition, MethodDefinition,
    MethodResponseDefinition, RoleDefinition, TopologyDefinition,
};
use crate::error::TopologyError;
use crate::topology::{
    AuthorizationType, EndpointType, HttpMethod, HttpSurface, PassthroughBehavior,
    StorageOperation,
};

/// Public path of the bucket resource
pub const FOLDER_PATH: &str = "/{folder}";

/// Public path of the reserved per-object resource
pub const ITEM_PATH: &str = "/{folder}/{item}";

/// Build the S3 proxy topology with integrations in the default region
pub fn build(name: &str) -> Result<HttpSurface, TopologyError> {
    build_in_region(name, DEFAULT_REGION)
}

/// Build the S3 proxy topology with integrations in `region`
pub fn build_in_region(name: &str, region: &str) -> Result<HttpSurface, TopologyError> {
    TopologyBuilder::new(region).build(&definition(name))
}

/// Declarative definition of the S3 proxy
///
/// Integrations leave the region unset so the builder's default applies.
pub fn definition(name: &str) -> TopologyDefinition {
    TopologyDefinition {
        name: name.to_string(),
        api: ApiDefinition {
            display_name: DEFAULT_API_DISPLAY_NAME.to_string(),
            description: Some(DEFAULT_API_DESCRIPTION.to_string()),
            endpoint_type: EndpointType::Edge,
            binary_media_types: DEFAULT_BINARY_MEDIA_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
        },
        role: RoleDefinition {
            id: DEFAULT_ROLE_ID.to_string(),
            assumed_by: APIGATEWAY_SERVICE_PRINCIPAL.to_string(),
            actions: None,
            resources: vec![UNRESTRICTED_RESOURCE_SCOPE.to_string()],
        },
        resources: vec![FOLDER_PATH.to_string(), ITEM_PATH.to_string()],
        methods: vec![list_all_buckets(), list_bucket_contents()],
    }
}

/// `GET /` -> `GET s3:/`
fn list_all_buckets() -> MethodDefinition {
    MethodDefinition {
        path: "/".to_string(),
        http_method: HttpMethod::Get,
        authorization: AuthorizationType::Iam,
        request_parameters: BTreeMap::new(),
        method_responses: vec![content_type_method_response()],
        integration: IntegrationDefinition {
            service: STORAGE_SERVICE.to_string(),
            region: None,
            http_method: HttpMethod::Get,
            path: "/".to_string(),
            action: StorageOperation::ListAllBuckets.action().to_string(),
            passthrough_behavior: PassthroughBehavior::WhenNoTemplates,
            request_parameters: BTreeMap::new(),
            responses: vec![content_type_integration_response()],
        },
    }
}

/// `GET /{folder}` -> `GET s3:{bucket}` with folder mapped onto bucket
fn list_bucket_contents() -> MethodDefinition {
    let folder = ParameterExpression::method_path("folder").to_string();
    let bucket = ParameterExpression::integration_path("bucket").to_string();

    MethodDefinition {
        path: FOLDER_PATH.to_string(),
        http_method: HttpMethod::Get,
        authorization: AuthorizationType::Iam,
        request_parameters: BTreeMap::from([(folder.clone(), true)]),
        method_responses: vec![content_type_method_response()],
        integration: IntegrationDefinition {
            service: STORAGE_SERVICE.to_string(),
            region: None,
            http_method: HttpMethod::Get,
            path: "{bucket}".to_string(),
            action: StorageOperation::ListBucketContents.action().to_string(),
            passthrough_behavior: PassthroughBehavior::WhenNoTemplates,
            request_parameters: BTreeMap::from([(bucket, folder)]),
            responses: vec![content_type_integration_response()],
        },
    }
}

fn content_type_method_response() -> MethodResponseDefinition {
    MethodResponseDefinition {
        status_code: STATUS_OK.to_string(),
        response_parameters: BTreeMap::from([(
            ParameterExpression::method_response_header(CONTENT_TYPE_HEADER).to_string(),
            true,
        )]),
    }
}

fn content_type_integration_response() -> IntegrationResponseDefinition {
    IntegrationResponseDefinition {
        status_code: STATUS_OK.to_string(),
        response_parameters: BTreeMap::from([(
            ParameterExpression::method_response_header(CONTENT_TYPE_HEADER).to_string(),
            ParameterExpression::integration_response_header(CONTENT_TYPE_HEADER).to_string(),
        )]),
    }
}
