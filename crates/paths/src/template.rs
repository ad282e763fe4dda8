//! # Path Templates
//!
//! Slash-separated templates with `{name}` placeholders.
//!
//! Public resource paths are written with a leading slash (`/{folder}/{item}`),
//! backend integration paths usually without one (`{bucket}`). Both parse to
//! the same segment list; `Display` always renders the leading-slash form.

use std::fmt;
use std::str::FromStr;

use crate::errors::PathError;
use crate::segment::PathSegment;

/// Ordered list of path segments; the empty list is the root path `/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    segments: Vec<PathSegment>,
}

impl PathTemplate {
    /// The root path `/`
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parameter names in path order
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(PathSegment::parameter_name)
            .collect()
    }

    /// New template with `segment` appended
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Template without its last segment; the root has no parent
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl FromStr for PathTemplate {
    type Err = PathError;

    fn from_str(template: &str) -> Result<Self, Self::Err> {
        let trimmed = template.trim();
        let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
        if body.is_empty() {
            return Ok(Self::root());
        }

        let segments = body
            .split('/')
            .map(|piece| {
                if piece.is_empty() {
                    Err(PathError::EmptySegment {
                        template: template.to_string(),
                    })
                } else {
                    piece.parse::<PathSegment>()
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_forms() {
        assert!("/".parse::<PathTemplate>().unwrap().is_root());
        assert!("".parse::<PathTemplate>().unwrap().is_root());
        assert_eq!(PathTemplate::root().to_string(), "/");
    }

    #[test]
    fn test_nested_parameters() {
        let template: PathTemplate = "/{folder}/{item}".parse().unwrap();
        assert_eq!(template.placeholders(), vec!["folder", "item"]);
        assert_eq!(template.to_string(), "/{folder}/{item}");
        assert_eq!(template.parent().unwrap().to_string(), "/{folder}");
    }

    #[test]
    fn test_backend_form_without_leading_slash() {
        let template: PathTemplate = "{bucket}".parse().unwrap();
        assert_eq!(template.placeholders(), vec!["bucket"]);
        assert_eq!(template.to_string(), "/{bucket}");
    }

    #[test]
    fn test_mixed_literal_and_parameter() {
        let template: PathTemplate = "/buckets/{bucket}/objects".parse().unwrap();
        assert_eq!(template.segments().len(), 3);
        assert_eq!(template.placeholders(), vec!["bucket"]);
    }

    #[test]
    fn test_empty_segment_rejected() {
        let err = "/a//b".parse::<PathTemplate>().unwrap_err();
        assert_eq!(
            err,
            PathError::EmptySegment {
                template: "/a//b".to_string()
            }
        );
    }

    #[test]
    fn test_child_and_root_parent() {
        let child = PathTemplate::root().child(PathSegment::parameter("folder"));
        assert_eq!(child.to_string(), "/{folder}");
        assert!(PathTemplate::root().parent().is_none());
    }
}
