//! Errors raised while parsing path templates and parameter expressions.

use thiserror::Error;

/// Parse failure for a path template or a parameter expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A template contained `//` or a trailing empty segment
    #[error("path template '{template}' contains an empty segment")]
    EmptySegment { template: String },

    /// A segment opened or closed a placeholder without a valid name
    #[error("malformed placeholder '{segment}': expected '{{name}}' with name matching [A-Za-z0-9._-]+")]
    MalformedPlaceholder { segment: String },

    /// The expression did not have the `<source>.<location>.<name>` shape
    #[error("malformed parameter expression '{expression}': expected <source>.<location>.<name>")]
    MalformedExpression { expression: String },

    /// The expression source is not one of the four mapping sources
    #[error("unknown parameter source '{source_name}' in '{expression}'")]
    UnknownSource {
        source_name: String,
        expression: String,
    },

    /// The expression location is not path, querystring or header
    #[error("unknown parameter location '{location}' in '{expression}'")]
    UnknownLocation {
        location: String,
        expression: String,
    },
}
