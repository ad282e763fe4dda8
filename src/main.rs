//! # apigw-s3-proxy
//!
//! Command-line front end for building and rendering the S3 proxy topology.
//!
//! ## Usage
//!
//! ```bash
//! # Render the built-in S3 proxy as a JSON template
//! apigw-s3-proxy synth
//!
//! # Render a custom definition as YAML into a file
//! apigw-s3-proxy --definition topology.yaml synth --format yaml --output template.yaml
//!
//! # Check a definition without rendering it
//! apigw-s3-proxy --definition topology.yaml validate
//!
//! # Print the resource tree with its bound methods
//! apigw-s3-proxy describe
//!
//! # Print the JSON schema of definition files
//! apigw-s3-proxy schema
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use apigw_s3_proxy::config::{self, SynthConfig};
use apigw_s3_proxy::{observability, report, s3_proxy, template, HttpSurface, OutputFormat, TopologyDefinition};
use clap::{Parser, Subcommand};
use tracing::info;

/// Build and render API Gateway topologies that proxy to S3
#[derive(Parser)]
#[command(name = "apigw-s3-proxy")]
#[command(about = "Build and render API Gateway topologies that proxy to S3", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Topology definition file (.yaml, .yml or .json); defaults to the built-in S3 proxy
    #[arg(short, long, global = true)]
    definition: Option<PathBuf>,

    /// Construct id of the built-in S3 proxy API
    #[arg(long, global = true)]
    name: Option<String>,

    /// Default region for integrations that do not name one
    #[arg(short, long, global = true)]
    region: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the deployment template
    Synth {
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deployment stage name
        #[arg(long)]
        stage: Option<String>,

        /// Stack name used in the template description
        #[arg(long)]
        stack_name: Option<String>,
    },
    /// Build and validate the topology, then print a summary
    Validate,
    /// Print the resource tree with bound methods
    Describe,
    /// Print the JSON schema of topology definition files
    Schema,
}

fn main() -> Result<()> {
    observability::init_tracing();

    let cli = Cli::parse();
    let mut config = config::load_config();
    if let Some(name) = cli.name {
        config.api_name = name;
    }
    if let Some(region) = cli.region {
        config.region = region;
    }

    match cli.command {
        Commands::Synth {
            format,
            output,
            stage,
            stack_name,
        } => {
            if let Some(format) = format {
                config.output_format = format;
            }
            if let Some(stage) = stage {
                config.stage_name = stage;
            }
            if let Some(stack_name) = stack_name {
                config.stack_name = stack_name;
            }
            let surface = build_surface(&config, cli.definition.as_ref())?;
            synth_command(&config, &surface, output)
        }
        Commands::Validate => {
            let surface = build_surface(&config, cli.definition.as_ref())?;
            let summary = report::summarize(&surface);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Commands::Describe => {
            let surface = build_surface(&config, cli.definition.as_ref())?;
            print!("{}", report::describe(&surface));
            Ok(())
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(TopologyDefinition);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

/// Build from a definition file when given, otherwise the built-in S3 proxy
fn build_surface(config: &SynthConfig, definition: Option<&PathBuf>) -> Result<HttpSurface> {
    let definition = match definition {
        Some(path) => TopologyDefinition::from_path(path)
            .with_context(|| format!("Failed to load topology definition '{}'", path.display()))?,
        None => s3_proxy::definition(&config.api_name),
    };

    let surface = config
        .builder()
        .build(&definition)
        .with_context(|| format!("Topology '{}' is inconsistent", definition.name))?;
    info!(
        "Built topology '{}' with {} resources and {} methods",
        surface.name,
        surface.resources.len(),
        surface.bindings.len()
    );
    Ok(surface)
}

fn synth_command(config: &SynthConfig, surface: &HttpSurface, output: Option<PathBuf>) -> Result<()> {
    let rendered = template::render(surface, &config.render_options())
        .context("Failed to render deployment template")?;

    match output {
        Some(path) => {
            rendered
                .write_to(&path, config.output_format)
                .with_context(|| format!("Failed to write template to '{}'", path.display()))?;
            info!(
                "Wrote {} template with {} resources to {}",
                config.output_format,
                rendered.resources.len(),
                path.display()
            );
        }
        None => println!("{}", rendered.to_string_as(config.output_format)?),
    }
    Ok(())
}
