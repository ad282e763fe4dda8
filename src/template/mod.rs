//! # Deployment Template
//!
//! CloudFormation-style document handed to the provisioning engine.
//!
//! The template is the only serialized form of a topology. Resource maps are
//! ordered so rendering the same topology twice yields identical output.

mod logical_id;
mod render;

pub use logical_id::{sanitize, LogicalIds};
pub use render::{render, RenderOptions};

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Failure to serialize or write a template
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to serialize template as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize template as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to write template to '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Output encoding for rendered templates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{other}', expected json or yaml")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// A complete deployment template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub resources: BTreeMap<String, TemplateResource>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, TemplateOutput>,
}

/// One provisioned resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub properties: serde_json::Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

/// One stack output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: serde_json::Value,
}

impl Template {
    /// Logical ids of every resource of `resource_type`
    pub fn resources_of_type<'a>(&'a self, resource_type: &'a str) -> impl Iterator<Item = (&'a String, &'a TemplateResource)> {
        self.resources
            .iter()
            .filter(move |(_, resource)| resource.resource_type == resource_type)
    }

    /// Serialize in the requested format
    pub fn to_string_as(&self, format: OutputFormat) -> Result<String, TemplateError> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }

    /// Serialize and write to `path`
    pub fn write_to(&self, path: &Path, format: OutputFormat) -> Result<(), TemplateError> {
        let content = self.to_string_as(format)?;
        std::fs::write(path, content).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
