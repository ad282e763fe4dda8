//! # Integration URIs
//!
//! Backend service ARNs used by AWS-type integrations.

/// Render the integration URI for a path-style call to an AWS service
///
/// `path` is appended verbatim after `path/`: `{bucket}` yields
/// `arn:aws:apigateway:us-east-1:s3:path/{bucket}` and `/` yields
/// `arn:aws:apigateway:us-east-1:s3:path//`.
pub fn integration_uri(region: &str, service: &str, path: &str) -> String {
    format!("arn:aws:apigateway:{region}:{service}:path/{}", path.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        assert_eq!(
            integration_uri("us-east-1", "s3", "/"),
            "arn:aws:apigateway:us-east-1:s3:path//"
        );
    }

    #[test]
    fn test_bucket_placeholder() {
        assert_eq!(
            integration_uri("eu-west-1", "s3", "{bucket}"),
            "arn:aws:apigateway:eu-west-1:s3:path/{bucket}"
        );
        assert_eq!(
            integration_uri("eu-west-1", "s3", "/{bucket}/{object}"),
            "arn:aws:apigateway:eu-west-1:s3:path//{bucket}/{object}"
        );
    }
}
