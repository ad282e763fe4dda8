//! # Constants
//!
//! Default values shared by the builder, the template renderer and the CLI.

/// Construct id of the S3 proxy REST API
pub const DEFAULT_API_NAME: &str = "S3ObjectsApi";

/// Display name of the S3 proxy REST API
pub const DEFAULT_API_DISPLAY_NAME: &str = "S3 Proxy Service";

pub const DEFAULT_API_DESCRIPTION: &str = "S3 Actions Proxy API";

/// Binary payloads the gateway passes through untouched
pub const DEFAULT_BINARY_MEDIA_TYPES: &[&str] = &["application/octet-stream", "image/jpeg"];

/// Id of the role API Gateway assumes when calling S3
pub const DEFAULT_ROLE_ID: &str = "api-gateway-role";

/// Service principal trusted by the execution role
pub const APIGATEWAY_SERVICE_PRINCIPAL: &str = "apigateway.amazonaws.com";

/// Resource scope granted to the execution role
pub const UNRESTRICTED_RESOURCE_SCOPE: &str = "*";

/// Backend service name used in integration URIs
pub const STORAGE_SERVICE: &str = "s3";

/// Region used for integrations that do not name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Stack name used in rendered template descriptions
pub const DEFAULT_STACK_NAME: &str = "ApigwS3Stack";

/// Deployment stage created alongside the API
pub const DEFAULT_STAGE_NAME: &str = "prod";

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

pub const STATUS_OK: &str = "200";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "apigw_s3_proxy=info";

/// CloudFormation template format version
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";
