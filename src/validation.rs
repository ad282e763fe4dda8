//! # Validation
//!
//! Consistency checks over a finalized `HttpSurface`.
//!
//! Everything here is a local check that fails fast, before the topology is
//! handed to the provisioning engine. Inconsistencies caught here would
//! otherwise surface as deployment failures or 5xx responses at request time.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use paths::{ParameterExpression, ParameterSource};
use regex::Regex;

use crate::error::{ConfigurationError, PolicyError, TopologyError};
use crate::template::sanitize;
use crate::topology::{ExecutionRole, HttpMethod, HttpSurface, MethodBinding};

/// `type/subtype`, wildcards allowed (e.g. `image/*`, `*/*`)
static MEDIA_TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w!#$&^.+*-]+/[\w!#$&^.+*-]+$").expect("media type regex is valid")
});

/// AWS region code patterns:
/// Standard: us-east-1, Gov: us-gov-west-1, ISO: us-iso-east-1, China: cn-north-1
static REGION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]{2}-(gov-|iso-)?[a-z]+-\d+|cn-[a-z]+-\d+)$")
        .expect("region regex is valid")
});

/// Validate a complete topology
///
/// Returns the first inconsistency found, in this order: API settings, the
/// execution role, each binding in declaration order, then role actions no
/// binding requires.
pub fn validate_topology(surface: &HttpSurface) -> Result<(), TopologyError> {
    validate_api(surface)?;
    validate_role(&surface.role)?;

    let mut seen = BTreeSet::new();
    for binding in &surface.bindings {
        if surface.resources.get(binding.resource).is_none() {
            return Err(ConfigurationError::UnknownResource {
                path: format!("#{}", binding.resource.index()),
            }
            .into());
        }
        if !seen.insert((binding.resource, binding.http_method)) {
            return Err(ConfigurationError::DuplicateMethod {
                path: surface.path_of(binding.resource),
                method: binding.http_method.to_string(),
            }
            .into());
        }
        if binding.http_method == HttpMethod::Any && surface.bindings_for(binding.resource).len() > 1 {
            return Err(ConfigurationError::ConflictingAnyMethod {
                path: surface.path_of(binding.resource),
                method: binding.http_method.to_string(),
            }
            .into());
        }
        validate_binding(surface, binding)?;
    }

    // The role grants exactly what the bindings use
    let required = surface.required_actions();
    if let Some(unused) = surface
        .role
        .actions()
        .iter()
        .find(|action| !required.contains(action))
    {
        return Err(PolicyError::UnusedAction {
            role: surface.role.id().to_string(),
            action: unused.to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_api(surface: &HttpSurface) -> Result<(), ConfigurationError> {
    if sanitize(&surface.name).is_empty() {
        return Err(ConfigurationError::EmptyField { field: "name" });
    }
    if surface.display_name.trim().is_empty() {
        return Err(ConfigurationError::EmptyField {
            field: "api.displayName",
        });
    }
    for media_type in &surface.binary_media_types {
        if !MEDIA_TYPE_REGEX.is_match(media_type) {
            return Err(ConfigurationError::InvalidBinaryMediaType {
                media_type: media_type.clone(),
            });
        }
    }
    Ok(())
}

/// Role ids become logical ids, so they need at least one alphanumeric character
fn validate_role(role: &ExecutionRole) -> Result<(), TopologyError> {
    if sanitize(role.id().as_str()).is_empty() {
        return Err(ConfigurationError::EmptyField { field: "role.id" }.into());
    }
    if role.trusted_principal().trim().is_empty() {
        return Err(PolicyError::MissingTrustedPrincipal {
            role: role.id().to_string(),
        }
        .into());
    }
    if role.resources().is_empty() {
        return Err(PolicyError::EmptyResourceScope {
            role: role.id().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validate an AWS region code
pub fn validate_region(region: &str) -> Result<(), ConfigurationError> {
    if REGION_REGEX.is_match(region.trim()) {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidRegion {
            region: region.to_string(),
        })
    }
}

fn validate_binding(surface: &HttpSurface, binding: &MethodBinding) -> Result<(), TopologyError> {
    let path = surface.path_of(binding.resource);
    let method = binding.http_method.to_string();
    let integration = &binding.integration;
    let available = surface.resources.path_parameters(binding.resource);

    validate_region(&integration.region)?;

    // Credentials must point at the execution role, which must grant the action
    if integration.credentials != *surface.role.id() {
        return Err(PolicyError::UnknownRole {
            path,
            method,
            role: integration.credentials.to_string(),
        }
        .into());
    }
    if !surface.role.allows(&integration.action) {
        return Err(PolicyError::MissingAction {
            path,
            method,
            action: integration.action.to_string(),
            role: surface.role.id().to_string(),
        }
        .into());
    }

    // Public request parameters
    for expression in binding.request_parameters.keys() {
        expect_source(expression, ParameterSource::MethodRequest)?;
        check_path_parameter(expression, &available, &path, &method)?;
    }

    // Backend request mappings
    for (target, source) in &integration.request_parameters {
        expect_source(target, ParameterSource::IntegrationRequest)?;
        expect_source(source, ParameterSource::MethodRequest)?;
        check_path_parameter(source, &available, &path, &method)?;
    }

    for placeholder in integration.path.placeholders() {
        let key = ParameterExpression::integration_path(placeholder);
        if !integration.request_parameters.contains_key(&key) {
            return Err(ConfigurationError::UnmappedBackendPlaceholder {
                path,
                method,
                placeholder: placeholder.to_string(),
            }
            .into());
        }
    }

    for (expression, required) in &binding.request_parameters {
        if *required && !integration.request_parameters.values().any(|v| v == expression) {
            return Err(ConfigurationError::UnmappedRequiredParameter {
                path,
                method,
                parameter: expression.to_string(),
            }
            .into());
        }
    }

    // Response mappings
    for response in &integration.responses {
        for (target, source) in &response.response_parameters {
            expect_source(target, ParameterSource::MethodResponse)?;
            expect_source(source, ParameterSource::IntegrationResponse)?;
        }
    }

    for response in &binding.method_responses {
        let mapped = integration.response_for(&response.status_code);
        for (expression, required) in &response.response_parameters {
            expect_source(expression, ParameterSource::MethodResponse)?;
            let is_mapped =
                mapped.is_some_and(|mapping| mapping.response_parameters.contains_key(expression));
            if *required && !is_mapped {
                return Err(ConfigurationError::UnmappedResponseParameter {
                    path,
                    method,
                    status_code: response.status_code.clone(),
                    parameter: expression.to_string(),
                }
                .into());
            }
        }
    }

    Ok(())
}

fn expect_source(
    expression: &ParameterExpression,
    expected: ParameterSource,
) -> Result<(), ConfigurationError> {
    if expression.source == expected {
        Ok(())
    } else {
        Err(ConfigurationError::MisplacedParameter {
            expression: expression.to_string(),
            expected: expected.as_str(),
        })
    }
}

/// A `method.request.path.X` reference must name a parameter of the resource chain
fn check_path_parameter(
    expression: &ParameterExpression,
    available: &[String],
    path: &str,
    method: &str,
) -> Result<(), ConfigurationError> {
    if expression.is_path() && !available.iter().any(|name| *name == expression.name) {
        return Err(ConfigurationError::DanglingPathParameter {
            path: path.to_string(),
            method: method.to_string(),
            parameter: expression.name.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_region_accepts_known_formats() {
        for region in ["us-east-1", "eu-west-1", "us-gov-west-1", "us-iso-east-1", "cn-north-1"] {
            assert!(validate_region(region).is_ok(), "expected '{region}' to be valid");
        }
    }

    #[test]
    fn test_validate_region_rejects_garbage() {
        for region in ["", "useast1", "US-EAST-1", "us-east", "mars-north-1", "local"] {
            assert!(validate_region(region).is_err(), "expected '{region}' to be invalid");
        }
    }

    #[test]
    fn test_media_type_regex() {
        assert!(MEDIA_TYPE_REGEX.is_match("application/octet-stream"));
        assert!(MEDIA_TYPE_REGEX.is_match("image/jpeg"));
        assert!(MEDIA_TYPE_REGEX.is_match("*/*"));
        assert!(!MEDIA_TYPE_REGEX.is_match("jpeg"));
        assert!(!MEDIA_TYPE_REGEX.is_match("image/ jpeg"));
    }
}
