//! # Backend Paths
//!
//! Integration paths kept exactly as written.
//!
//! The backend path is part of the integration URI, so `/` and `{bucket}`
//! must survive verbatim (`path//` and `path/{bucket}`). The parsed template
//! is carried alongside for placeholder checks.

use std::fmt;
use std::str::FromStr;

use crate::errors::PathError;
use crate::template::PathTemplate;

/// Backend path text plus its parsed template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackendPath {
    raw: String,
    template: PathTemplate,
}

impl BackendPath {
    /// Path text as written (`/`, `{bucket}`, `/{bucket}/{key}`)
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Placeholder names in path order
    pub fn placeholders(&self) -> Vec<&str> {
        self.template.placeholders()
    }
}

impl FromStr for BackendPath {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let raw = path.trim();
        Ok(Self {
            template: raw.parse()?,
            raw: raw.to_string(),
        })
    }
}

impl fmt::Display for BackendPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_text_as_written() {
        let root: BackendPath = "/".parse().unwrap();
        assert_eq!(root.as_str(), "/");
        assert!(root.template().is_root());

        let bucket: BackendPath = "{bucket}".parse().unwrap();
        assert_eq!(bucket.to_string(), "{bucket}");
        assert_eq!(bucket.template().to_string(), "/{bucket}");
    }

    #[test]
    fn test_leading_slash_is_significant() {
        let with: BackendPath = "/{bucket}".parse().unwrap();
        let without: BackendPath = "{bucket}".parse().unwrap();
        assert_ne!(with, without);
        assert_eq!(with.placeholders(), without.placeholders());
    }

    #[test]
    fn test_malformed_path_rejected() {
        assert!("{bucket}//{key}".parse::<BackendPath>().is_err());
    }
}
