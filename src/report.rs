//! # Topology Reports
//!
//! Human-readable and summary views of a built topology, used by the
//! `describe` and `validate` commands.

use serde::Serialize;

use crate::topology::HttpSurface;

/// Counts and grants of a finalized topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologySummary {
    pub name: String,
    pub endpoint_type: String,
    pub resources: usize,
    pub bindings: usize,
    /// Resources without any bound method
    pub unbound_resources: Vec<String>,
    pub role: String,
    pub actions: Vec<String>,
}

pub fn summarize(surface: &HttpSurface) -> TopologySummary {
    TopologySummary {
        name: surface.name.clone(),
        endpoint_type: surface.endpoint_type.to_string(),
        resources: surface.resources.len(),
        bindings: surface.bindings.len(),
        unbound_resources: surface
            .resources
            .iter()
            .filter(|node| surface.bindings_for(node.id).is_empty())
            .map(|node| surface.path_of(node.id))
            .collect(),
        role: surface.role.id().to_string(),
        actions: surface
            .role
            .actions()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Indented tree of resources with their bound methods
pub fn describe(surface: &HttpSurface) -> String {
    let actions = surface
        .role
        .actions()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![format!(
        "{} ({}, {})",
        surface.name, surface.display_name, surface.endpoint_type
    )];
    if !surface.binary_media_types.is_empty() {
        lines.push(format!(
            "binary media types: {}",
            surface.binary_media_types.join(", ")
        ));
    }
    lines.push(format!(
        "role {} trusted by {}: {actions} on {}",
        surface.role.id(),
        surface.role.trusted_principal(),
        surface.role.resources().join(", ")
    ));

    for node in surface.resources.iter() {
        let depth = surface.resources.ancestry(node.id).len() - 1;
        let indent = "  ".repeat(depth);
        lines.push(format!("{indent}{}", surface.path_of(node.id)));

        let bindings = surface.bindings_for(node.id);
        if bindings.is_empty() {
            lines.push(format!("{indent}  (no methods)"));
        }
        lines.extend(bindings.into_iter().map(|binding| {
            let integration = &binding.integration;
            format!(
                "{indent}  {} [{}] -> {} {} {} ({})",
                binding.http_method,
                binding.authorization.as_str(),
                integration.service,
                integration.http_method,
                integration.path,
                integration.action
            )
        }));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::s3_proxy;

    #[test]
    fn test_summary_of_s3_proxy() {
        let surface = s3_proxy::build("S3ObjectsApi").unwrap();
        let summary = summarize(&surface);
        assert_eq!(summary.resources, 3);
        assert_eq!(summary.bindings, 2);
        assert_eq!(summary.unbound_resources, vec!["/{folder}/{item}"]);
        assert_eq!(summary.actions, vec!["s3:ListAllMyBuckets", "s3:ListBucket"]);
    }

    #[test]
    fn test_describe_lists_every_resource() {
        let surface = s3_proxy::build("S3ObjectsApi").unwrap();
        let text = describe(&surface);
        assert!(text.starts_with("S3ObjectsApi (S3 Proxy Service, EDGE)"));
        assert!(text.contains("\n/\n"));
        assert!(text.contains("  /{folder}\n"));
        assert!(text.contains("    /{folder}/{item}\n      (no methods)"));
        assert!(text.contains("GET [AWS_IAM] -> s3 GET {bucket} (s3:ListBucket)"));
    }
}
