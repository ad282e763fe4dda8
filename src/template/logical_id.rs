//! # Logical IDs
//!
//! Deterministic, collision-free CloudFormation logical ids.

use std::collections::BTreeSet;

/// Turn arbitrary text into a PascalCase alphanumeric id fragment
///
/// `api-gateway-role` -> `ApiGatewayRole`, `{folder}` -> `Folder`.
pub fn sanitize(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Hands out logical ids, suffixing a counter when a base id is already taken
#[derive(Debug, Default)]
pub struct LogicalIds {
    used: BTreeSet<String>,
}

impl LogicalIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut counter = 2usize;
        loop {
            let candidate = format!("{base}{counter}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("api-gateway-role"), "ApiGatewayRole");
        assert_eq!(sanitize("{folder}"), "Folder");
        assert_eq!(sanitize("{proxy+}"), "Proxy");
        assert_eq!(sanitize("S3ObjectsApi"), "S3ObjectsApi");
    }

    #[test]
    fn test_allocate_disambiguates() {
        let mut ids = LogicalIds::new();
        assert_eq!(ids.allocate("ApiFolder"), "ApiFolder");
        assert_eq!(ids.allocate("ApiFolder"), "ApiFolder2");
        assert_eq!(ids.allocate("ApiFolder"), "ApiFolder3");
    }
}
