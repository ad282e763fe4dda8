//! # Execution Role
//!
//! The identity API Gateway assumes when it calls the storage service, and
//! the storage actions that identity is allowed to perform.

use std::fmt;

/// A storage-service action string such as `s3:ListBucket`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageAction(String);

impl StorageAction {
    pub fn new(action: impl Into<String>) -> Self {
        Self(action.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<StorageOperation> for StorageAction {
    fn from(operation: StorageOperation) -> Self {
        StorageAction::new(operation.action())
    }
}

/// Storage operations exposed by the S3 proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOperation {
    /// List every bucket owned by the caller's account
    ListAllBuckets,
    /// List the objects inside one bucket
    ListBucketContents,
}

impl StorageOperation {
    /// IAM action the storage service checks for this operation
    pub fn action(self) -> &'static str {
        match self {
            StorageOperation::ListAllBuckets => "s3:ListAllMyBuckets",
            StorageOperation::ListBucketContents => "s3:ListBucket",
        }
    }
}

/// Reference to an execution role by identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleRef(String);

impl RoleRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role assumed by the gateway, with its complete allowed-action set
///
/// The action set is fixed at construction: callers collect every action the
/// bindings need first and build the role once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRole {
    id: RoleRef,
    trusted_principal: String,
    actions: Vec<StorageAction>,
    resources: Vec<String>,
}

impl ExecutionRole {
    /// Build a role; duplicate actions are dropped, first occurrence wins
    pub fn new(
        id: impl Into<String>,
        trusted_principal: impl Into<String>,
        actions: impl IntoIterator<Item = StorageAction>,
        resources: Vec<String>,
    ) -> Self {
        let mut deduplicated: Vec<StorageAction> = Vec::new();
        for action in actions {
            if !deduplicated.contains(&action) {
                deduplicated.push(action);
            }
        }
        Self {
            id: RoleRef::new(id),
            trusted_principal: trusted_principal.into(),
            actions: deduplicated,
            resources,
        }
    }

    pub fn id(&self) -> &RoleRef {
        &self.id
    }

    /// Identity reference handed to integrations as their credentials
    pub fn reference(&self) -> RoleRef {
        self.id.clone()
    }

    pub fn trusted_principal(&self) -> &str {
        &self.trusted_principal
    }

    /// Granted actions in declaration order
    pub fn actions(&self) -> &[StorageAction] {
        &self.actions
    }

    /// Resource scope the actions apply to
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn allows(&self, action: &StorageAction) -> bool {
        self.actions.contains(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_are_deduplicated_in_order() {
        let role = ExecutionRole::new(
            "role",
            "apigateway.amazonaws.com",
            [
                StorageAction::new("s3:ListBucket"),
                StorageAction::new("s3:ListAllMyBuckets"),
                StorageAction::new("s3:ListBucket"),
            ],
            vec!["*".to_string()],
        );
        assert_eq!(
            role.actions(),
            &[
                StorageAction::new("s3:ListBucket"),
                StorageAction::new("s3:ListAllMyBuckets")
            ]
        );
    }

    #[test]
    fn test_allows() {
        let role = ExecutionRole::new(
            "role",
            "apigateway.amazonaws.com",
            [StorageOperation::ListAllBuckets.into()],
            vec!["*".to_string()],
        );
        assert!(role.allows(&StorageAction::new("s3:ListAllMyBuckets")));
        assert!(!role.allows(&StorageOperation::ListBucketContents.into()));
        assert_eq!(role.reference(), RoleRef::new("role"));
    }
}
