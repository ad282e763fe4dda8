//! # S3 Proxy Topology Tests
//!
//! Tests for the built-in S3 proxy topology.
//!
//! These tests verify:
//! - The resource tree and which resources carry methods
//! - The execution role grants exactly the actions the bindings need
//! - Every backend placeholder and required parameter is mapped
//! - Building is deterministic

use std::collections::BTreeSet;

use apigw_s3_proxy::s3_proxy::{self, FOLDER_PATH, ITEM_PATH};
use apigw_s3_proxy::{
    AuthorizationType, EndpointType, HttpMethod, PassthroughBehavior, ResourceId, StorageAction,
};
use paths::ParameterExpression;

#[test]
fn test_resource_tree_has_root_folder_and_item() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    assert_eq!(surface.resources.len(), 3);

    let folder = surface.resource_by_path(FOLDER_PATH).unwrap();
    let item = surface.resource_by_path(ITEM_PATH).unwrap();
    assert_eq!(surface.resources.get(folder).unwrap().parent, Some(ResourceId::ROOT));
    assert_eq!(surface.resources.get(item).unwrap().parent, Some(folder));
    assert_eq!(surface.path_of(item), "/{folder}/{item}");
}

#[test]
fn test_item_resource_is_unbound() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    let item = surface.resource_by_path(ITEM_PATH).unwrap();
    assert!(surface.bindings_for(item).is_empty());
}

#[test]
fn test_list_all_buckets_on_root() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    let binding = surface.binding(ResourceId::ROOT, HttpMethod::Get).unwrap();

    assert_eq!(binding.authorization, AuthorizationType::Iam);
    assert!(binding.requires_caller_identity());
    assert!(binding.request_parameters.is_empty());
    assert_eq!(binding.integration.service, "s3");
    assert_eq!(binding.integration.region, "us-east-1");
    assert_eq!(binding.integration.http_method, HttpMethod::Get);
    assert_eq!(
        binding.integration.uri(),
        "arn:aws:apigateway:us-east-1:s3:path//"
    );
    assert_eq!(binding.integration.action.as_str(), "s3:ListAllMyBuckets");
    assert_eq!(
        binding.integration.passthrough_behavior,
        PassthroughBehavior::WhenNoTemplates
    );
}

#[test]
fn test_list_bucket_contents_on_folder() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    let folder = surface.resource_by_path(FOLDER_PATH).unwrap();
    let binding = surface.binding(folder, HttpMethod::Get).unwrap();

    assert_eq!(binding.required_path_parameters(), vec!["folder"]);
    assert_eq!(
        binding.integration.uri(),
        "arn:aws:apigateway:us-east-1:s3:path/{bucket}"
    );
    assert_eq!(binding.integration.action.as_str(), "s3:ListBucket");
    assert_eq!(
        binding
            .integration
            .request_parameters
            .get(&ParameterExpression::integration_path("bucket")),
        Some(&ParameterExpression::method_path("folder"))
    );
}

#[test]
fn test_content_type_forwarded_on_200() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    let header = ParameterExpression::method_response_header("Content-Type");

    for binding in &surface.bindings {
        let response = &binding.method_responses[0];
        assert_eq!(response.status_code, "200");
        assert_eq!(response.response_parameters.get(&header), Some(&true));

        let mapped = binding.integration.response_for("200").unwrap();
        assert_eq!(
            mapped.response_parameters.get(&header),
            Some(&ParameterExpression::integration_response_header("Content-Type"))
        );
    }
}

#[test]
fn test_role_grants_exactly_required_actions() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();

    let granted: BTreeSet<&StorageAction> = surface.role.actions().iter().collect();
    assert_eq!(granted, surface.required_actions());
    assert_eq!(
        surface
            .role
            .actions()
            .iter()
            .map(StorageAction::as_str)
            .collect::<Vec<_>>(),
        vec!["s3:ListAllMyBuckets", "s3:ListBucket"]
    );
    assert_eq!(surface.role.trusted_principal(), "apigateway.amazonaws.com");
    assert_eq!(surface.role.resources().to_vec(), vec!["*".to_string()]);
}

#[test]
fn test_bindings_use_the_execution_role() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    for binding in &surface.bindings {
        assert_eq!(&binding.integration.credentials, surface.role.id());
        assert!(surface.role.allows(&binding.integration.action));
    }
}

#[test]
fn test_every_backend_placeholder_is_mapped() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    for binding in &surface.bindings {
        let available = surface.resources.path_parameters(binding.resource);
        for placeholder in binding.integration.path.placeholders() {
            let source = binding
                .integration
                .request_parameters
                .get(&ParameterExpression::integration_path(placeholder))
                .unwrap();
            assert!(available.contains(&source.name));
        }
    }
}

#[test]
fn test_required_parameters_feed_the_integration() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    for binding in &surface.bindings {
        for (expression, required) in &binding.request_parameters {
            if *required {
                assert!(binding
                    .integration
                    .request_parameters
                    .values()
                    .any(|source| source == expression));
            }
        }
    }
}

#[test]
fn test_api_settings() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    assert_eq!(surface.display_name, "S3 Proxy Service");
    assert_eq!(surface.description.as_deref(), Some("S3 Actions Proxy API"));
    assert_eq!(surface.endpoint_type, EndpointType::Edge);
    assert_eq!(
        surface.binary_media_types,
        vec!["application/octet-stream", "image/jpeg"]
    );
}

#[test]
fn test_build_is_deterministic() {
    let first = s3_proxy::build("S3ObjectsApi").unwrap();
    let second = s3_proxy::build("S3ObjectsApi").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_region_override() {
    let surface = s3_proxy::build_in_region("S3ObjectsApi", "eu-central-1").unwrap();
    for binding in &surface.bindings {
        assert_eq!(binding.integration.region, "eu-central-1");
        assert!(binding.integration.uri().starts_with("arn:aws:apigateway:eu-central-1:s3:"));
    }
}

#[test]
fn test_invalid_region_rejected() {
    let err = s3_proxy::build_in_region("S3ObjectsApi", "not a region").unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_each_resource_method_count() {
    let surface = s3_proxy::build("S3ObjectsApi").unwrap();
    let folder = surface.resource_by_path(FOLDER_PATH).unwrap();
    let item = surface.resource_by_path(ITEM_PATH).unwrap();

    let root_methods = surface.bindings_for(ResourceId::ROOT);
    assert_eq!(root_methods.len(), 1);
    assert_eq!(root_methods[0].http_method, HttpMethod::Get);
    assert!(root_methods[0].required_path_parameters().is_empty());

    let folder_methods = surface.bindings_for(folder);
    assert_eq!(folder_methods.len(), 1);
    assert_eq!(folder_methods[0].authorization, AuthorizationType::Iam);
    assert_eq!(folder_methods[0].required_path_parameters(), vec!["folder"]);

    assert_eq!(surface.bindings_for(item).len(), 0);
}
