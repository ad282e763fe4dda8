//! # Path Resources
//!
//! The URL path hierarchy of an API, stored as an arena rooted at index 0.

use paths::{PathSegment, PathTemplate};

use crate::error::ConfigurationError;

/// Index of a resource inside its `ResourceTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(usize);

impl ResourceId {
    /// The implicit root resource `/`
    pub const ROOT: ResourceId = ResourceId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One node in the URL path tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResource {
    pub id: ResourceId,
    /// `None` only for the root
    pub segment: Option<PathSegment>,
    pub parent: Option<ResourceId>,
    /// Children in insertion order
    pub children: Vec<ResourceId>,
}

impl PathResource {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Segment text as it appears in the path (`{folder}`), empty for the root
    pub fn path_part(&self) -> String {
        self.segment
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Arena of path resources; always contains the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTree {
    nodes: Vec<PathResource>,
}

impl Default for ResourceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![PathResource {
                id: ResourceId::ROOT,
                segment: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> ResourceId {
        ResourceId::ROOT
    }

    pub fn get(&self, id: ResourceId) -> Option<&PathResource> {
        self.nodes.get(id.0)
    }

    /// Number of resources, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root always exists
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resources in creation order, which is also a valid parent-first order
    pub fn iter(&self) -> impl Iterator<Item = &PathResource> {
        self.nodes.iter()
    }

    /// Add `segment` under `parent`
    ///
    /// Fails if the parent is unknown or is a greedy parameter, the child
    /// already exists, the segment reuses a parameter name from the ancestor
    /// chain, or the parent already has a differently named parameter child.
    pub fn add_child(
        &mut self,
        parent: ResourceId,
        segment: PathSegment,
    ) -> Result<ResourceId, ConfigurationError> {
        let parent_node = self
            .get(parent)
            .ok_or_else(|| ConfigurationError::UnknownResource {
                path: format!("#{}", parent.0),
            })?;
        let parent_path = self.full_path(parent);
        let child_path = parent_path.child(segment.clone());

        if let Some(PathSegment::Parameter { name, greedy: true }) = parent_node.segment.as_ref()
        {
            return Err(ConfigurationError::GreedyParameterNotLast {
                path: child_path.to_string(),
                parameter: name.clone(),
            });
        }

        for sibling in &parent_node.children {
            let Some(existing) = self.nodes[sibling.0].segment.as_ref() else {
                continue;
            };
            if *existing == segment {
                return Err(ConfigurationError::DuplicateResource {
                    path: child_path.to_string(),
                });
            }
            if existing.is_parameter() && segment.is_parameter() {
                return Err(ConfigurationError::ConflictingParameterSiblings {
                    parent: parent_path.to_string(),
                    existing: existing.to_string(),
                    requested: segment.to_string(),
                });
            }
        }

        if let Some(name) = segment.parameter_name() {
            if parent_path.placeholders().contains(&name) {
                return Err(ConfigurationError::DuplicatePathParameter {
                    path: child_path.to_string(),
                    name: name.to_string(),
                });
            }
        }

        let id = ResourceId(self.nodes.len());
        self.nodes.push(PathResource {
            id,
            segment: Some(segment),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Find the resource at `template`, creating any missing nodes on the way
    pub fn ensure_path(&mut self, template: &PathTemplate) -> Result<ResourceId, ConfigurationError> {
        let mut current = ResourceId::ROOT;
        for segment in template.segments() {
            current = match self.child_with_segment(current, segment) {
                Some(existing) => existing,
                None => self.add_child(current, segment.clone())?,
            };
        }
        Ok(current)
    }

    /// Resource at exactly `template`, if declared
    pub fn find(&self, template: &PathTemplate) -> Option<ResourceId> {
        template
            .segments()
            .iter()
            .try_fold(ResourceId::ROOT, |current, segment| {
                self.child_with_segment(current, segment)
            })
    }

    fn child_with_segment(&self, parent: ResourceId, segment: &PathSegment) -> Option<ResourceId> {
        self.get(parent)?
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].segment.as_ref() == Some(segment))
    }

    /// Resources from the root down to `id`, inclusive
    pub fn ancestry(&self, id: ResourceId) -> Vec<ResourceId> {
        let mut chain = Vec::new();
        let mut cursor = self.get(id).map(|node| node.id);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.nodes[current.0].parent;
        }
        chain.reverse();
        chain
    }

    /// Full path of `id`, built by concatenating ancestor segments
    pub fn full_path(&self, id: ResourceId) -> PathTemplate {
        let segments = self
            .ancestry(id)
            .into_iter()
            .filter_map(|node| self.nodes[node.0].segment.clone())
            .collect();
        PathTemplate::from_segments(segments)
    }

    /// Path parameter names visible at `id`, outermost first
    pub fn path_parameters(&self, id: ResourceId) -> Vec<String> {
        self.full_path(id)
            .placeholders()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(path: &str) -> PathTemplate {
        path.parse().unwrap()
    }

    #[test]
    fn test_new_tree_has_only_root() {
        let tree = ResourceTree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.get(tree.root()).unwrap().is_root());
        assert_eq!(tree.full_path(tree.root()).to_string(), "/");
    }

    #[test]
    fn test_ensure_path_creates_intermediate_nodes() {
        let mut tree = ResourceTree::new();
        let item = tree.ensure_path(&template("/{folder}/{item}")).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.full_path(item).to_string(), "/{folder}/{item}");
        assert_eq!(tree.path_parameters(item), vec!["folder", "item"]);

        let folder = tree.find(&template("/{folder}")).unwrap();
        assert_eq!(tree.get(item).unwrap().parent, Some(folder));
        assert_eq!(tree.get(folder).unwrap().children, vec![item]);
    }

    #[test]
    fn test_ensure_path_is_idempotent() {
        let mut tree = ResourceTree::new();
        let first = tree.ensure_path(&template("/{folder}")).unwrap();
        let second = tree.ensure_path(&template("/{folder}")).unwrap();
        assert_eq!(first, second);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_add_child_rejects_duplicate() {
        let mut tree = ResourceTree::new();
        tree.add_child(ResourceId::ROOT, PathSegment::literal("buckets"))
            .unwrap();
        let err = tree
            .add_child(ResourceId::ROOT, PathSegment::literal("buckets"))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateResource {
                path: "/buckets".to_string()
            }
        );
    }

    #[test]
    fn test_reused_parameter_name_in_ancestry_is_rejected() {
        let mut tree = ResourceTree::new();
        let err = tree.ensure_path(&template("/{folder}/{folder}")).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::DuplicatePathParameter { ref name, .. } if name == "folder"
        ));
    }

    #[test]
    fn test_conflicting_parameter_siblings_are_rejected() {
        let mut tree = ResourceTree::new();
        tree.ensure_path(&template("/{folder}")).unwrap();
        let err = tree.ensure_path(&template("/{bucket}")).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::ConflictingParameterSiblings { .. }
        ));
    }

    #[test]
    fn test_greedy_parameter_must_be_last() {
        let mut tree = ResourceTree::new();
        let err = tree.ensure_path(&template("/{proxy+}/objects")).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::GreedyParameterNotLast {
                path: "/{proxy+}/objects".to_string(),
                parameter: "proxy".to_string(),
            }
        );

        let mut tree = ResourceTree::new();
        tree.ensure_path(&template("/files/{proxy+}")).unwrap();
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_find_missing_path() {
        let tree = ResourceTree::new();
        assert!(tree.find(&template("/{folder}")).is_none());
        assert_eq!(tree.find(&PathTemplate::root()), Some(ResourceId::ROOT));
    }
}
