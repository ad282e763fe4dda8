//! # Path Segments
//!
//! A single slash-delimited piece of a path template.

use std::fmt;
use std::str::FromStr;

use crate::errors::PathError;

/// One segment of a path template
///
/// `{name}` (or greedy `{name+}`) parses as a parameter, anything else as a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Fixed path text, matched verbatim
    Literal(String),
    /// Named path parameter
    Parameter {
        /// Parameter name without braces or greedy marker
        name: String,
        /// Whether the parameter swallows the rest of the path (`{proxy+}`)
        greedy: bool,
    },
}

impl PathSegment {
    /// Build a non-greedy parameter segment
    pub fn parameter(name: impl Into<String>) -> Self {
        PathSegment::Parameter {
            name: name.into(),
            greedy: false,
        }
    }

    /// Build a literal segment
    pub fn literal(text: impl Into<String>) -> Self {
        PathSegment::Literal(text.into())
    }

    /// Parameter name, if this segment is a parameter
    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            PathSegment::Parameter { name, .. } => Some(name),
            PathSegment::Literal(_) => None,
        }
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, PathSegment::Parameter { .. })
    }
}

/// Parameter names accepted inside braces
fn is_valid_parameter_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl FromStr for PathSegment {
    type Err = PathError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        if segment.is_empty() {
            return Err(PathError::EmptySegment {
                template: segment.to_string(),
            });
        }

        let opens = segment.starts_with('{');
        let closes = segment.ends_with('}');
        match (opens, closes) {
            (true, true) => {
                let inner = &segment[1..segment.len() - 1];
                let (name, greedy) = match inner.strip_suffix('+') {
                    Some(name) => (name, true),
                    None => (inner, false),
                };
                if !is_valid_parameter_name(name) {
                    return Err(PathError::MalformedPlaceholder {
                        segment: segment.to_string(),
                    });
                }
                Ok(PathSegment::Parameter {
                    name: name.to_string(),
                    greedy,
                })
            }
            (false, false) if !segment.contains(['{', '}']) => {
                Ok(PathSegment::Literal(segment.to_string()))
            }
            _ => Err(PathError::MalformedPlaceholder {
                segment: segment.to_string(),
            }),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Literal(text) => f.write_str(text),
            PathSegment::Parameter { name, greedy: false } => write!(f, "{{{name}}}"),
            PathSegment::Parameter { name, greedy: true } => write!(f, "{{{name}+}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parameter_segment() {
        let segment: PathSegment = "{folder}".parse().unwrap();
        assert_eq!(segment, PathSegment::parameter("folder"));
        assert_eq!(segment.parameter_name(), Some("folder"));
    }

    #[test]
    fn test_parse_greedy_parameter_segment() {
        let segment: PathSegment = "{proxy+}".parse().unwrap();
        assert_eq!(
            segment,
            PathSegment::Parameter {
                name: "proxy".to_string(),
                greedy: true
            }
        );
        assert_eq!(segment.to_string(), "{proxy+}");
    }

    #[test]
    fn test_parse_literal_segment() {
        let segment: PathSegment = "buckets".parse().unwrap();
        assert_eq!(segment, PathSegment::literal("buckets"));
        assert!(!segment.is_parameter());
    }

    #[test]
    fn test_reject_malformed_placeholders() {
        for bad in ["{folder", "folder}", "{}", "{+}", "{fo lder}", "a{b}c"] {
            assert!(
                matches!(
                    bad.parse::<PathSegment>(),
                    Err(PathError::MalformedPlaceholder { .. })
                ),
                "expected '{bad}' to be rejected"
            );
        }
    }
}
