//! # Synthesis Configuration
//!
//! Settings that control how a topology is built and rendered.

use crate::builder::TopologyBuilder;
use crate::template::{OutputFormat, RenderOptions};

use super::env_var_or_default;

/// Synthesis settings
///
/// Environment variables:
/// - `APIGW_API_NAME` - construct id of the API (default: `S3ObjectsApi`)
/// - `APIGW_STACK_NAME` - stack name used in the template description
/// - `APIGW_REGION` - default integration region (default: `us-east-1`)
/// - `APIGW_STAGE_NAME` - deployment stage (default: `prod`)
/// - `APIGW_OUTPUT_FORMAT` - `json` or `yaml` (default: `json`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthConfig {
    pub api_name: String,
    pub stack_name: String,
    pub region: String,
    pub stage_name: String,
    pub output_format: OutputFormat,
}

impl Default for SynthConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            api_name: DEFAULT_API_NAME.to_string(),
            stack_name: DEFAULT_STACK_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            stage_name: DEFAULT_STAGE_NAME.to_string(),
            output_format: OutputFormat::default(),
        }
    }
}

impl SynthConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_name: env_var_or_default("APIGW_API_NAME", defaults.api_name),
            stack_name: env_var_or_default("APIGW_STACK_NAME", defaults.stack_name),
            region: env_var_or_default("APIGW_REGION", defaults.region),
            stage_name: env_var_or_default("APIGW_STAGE_NAME", defaults.stage_name),
            output_format: env_var_or_default("APIGW_OUTPUT_FORMAT", defaults.output_format),
        }
    }

    /// Builder using this configuration's default region
    pub fn builder(&self) -> TopologyBuilder {
        TopologyBuilder::new(self.region.clone())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            stack_name: self.stack_name.clone(),
            stage_name: self.stage_name.clone(),
        }
    }
}
