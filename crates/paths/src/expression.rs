//! # Parameter Expressions
//!
//! Dotted mapping keys of the form `<source>.<location>.<name>`, used for
//! request-parameter and response-parameter mappings on both the public
//! method and the backend integration.
//!
//! ```text
//! method.request.path.folder                 -> public path parameter
//! integration.request.path.bucket            -> backend path placeholder
//! method.response.header.Content-Type        -> public response header
//! integration.response.header.Content-Type   -> backend response header
//! ```

use std::fmt;
use std::str::FromStr;

use crate::errors::PathError;

/// Which side of the integration the parameter lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterSource {
    MethodRequest,
    IntegrationRequest,
    MethodResponse,
    IntegrationResponse,
}

impl ParameterSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterSource::MethodRequest => "method.request",
            ParameterSource::IntegrationRequest => "integration.request",
            ParameterSource::MethodResponse => "method.response",
            ParameterSource::IntegrationResponse => "integration.response",
        }
    }
}

/// Where in the HTTP message the parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterLocation {
    Path,
    QueryString,
    Header,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::QueryString => "querystring",
            ParameterLocation::Header => "header",
        }
    }
}

/// A parsed `<source>.<location>.<name>` mapping key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterExpression {
    pub source: ParameterSource,
    pub location: ParameterLocation,
    pub name: String,
}

impl ParameterExpression {
    pub fn new(source: ParameterSource, location: ParameterLocation, name: impl Into<String>) -> Self {
        Self {
            source,
            location,
            name: name.into(),
        }
    }

    /// `method.request.path.<name>`
    pub fn method_path(name: impl Into<String>) -> Self {
        Self::new(ParameterSource::MethodRequest, ParameterLocation::Path, name)
    }

    /// `integration.request.path.<name>`
    pub fn integration_path(name: impl Into<String>) -> Self {
        Self::new(
            ParameterSource::IntegrationRequest,
            ParameterLocation::Path,
            name,
        )
    }

    /// `method.response.header.<name>`
    pub fn method_response_header(name: impl Into<String>) -> Self {
        Self::new(
            ParameterSource::MethodResponse,
            ParameterLocation::Header,
            name,
        )
    }

    /// `integration.response.header.<name>`
    pub fn integration_response_header(name: impl Into<String>) -> Self {
        Self::new(
            ParameterSource::IntegrationResponse,
            ParameterLocation::Header,
            name,
        )
    }

    pub fn is_path(&self) -> bool {
        self.location == ParameterLocation::Path
    }
}

impl FromStr for ParameterExpression {
    type Err = PathError;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        let malformed = || PathError::MalformedExpression {
            expression: expression.to_string(),
        };

        // Header names never contain dots, but keep everything after the
        // location as the name so the round trip is exact.
        let mut parts = expression.splitn(4, '.');
        let side = parts.next().ok_or_else(malformed)?;
        let direction = parts.next().ok_or_else(malformed)?;
        let location = parts.next().ok_or_else(malformed)?;
        let name = parts.next().filter(|n| !n.is_empty()).ok_or_else(malformed)?;

        let source = match (side, direction) {
            ("method", "request") => ParameterSource::MethodRequest,
            ("integration", "request") => ParameterSource::IntegrationRequest,
            ("method", "response") => ParameterSource::MethodResponse,
            ("integration", "response") => ParameterSource::IntegrationResponse,
            _ => {
                return Err(PathError::UnknownSource {
                    source_name: format!("{side}.{direction}"),
                    expression: expression.to_string(),
                })
            }
        };

        let location = match location {
            "path" => ParameterLocation::Path,
            "querystring" => ParameterLocation::QueryString,
            "header" => ParameterLocation::Header,
            other => {
                return Err(PathError::UnknownLocation {
                    location: other.to_string(),
                    expression: expression.to_string(),
                })
            }
        };

        Ok(Self {
            source,
            location,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.source.as_str(),
            self.location.as_str(),
            self.name
        )
    }
}
