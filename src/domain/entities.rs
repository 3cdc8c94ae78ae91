//! Domain entities: values derived from one CIB snapshot

use indexmap::IndexMap;

use crate::domain::arena::Attributes;

/// Resource identifier as it appears in a constraint's `rsc` attribute.
pub type ResourceId = String;

/// Configuration of one resource primitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Resource agent type (`type` attribute of the primitive)
    pub name: Option<String>,
    /// Instance/meta parameters in discovery order
    pub parameters: IndexMap<String, String>,
}

impl ResourceRecord {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            parameters: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}

/// Absolute placement rules for one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSummary {
    pub resource: ResourceId,
    /// Leading token of the constraint id, e.g. `location`
    pub kind: String,
    /// Nodes with `INFINITY` affinity, insertion ordered
    pub enabled_on: Vec<String>,
    /// Nodes with `-INFINITY` affinity, insertion ordered
    pub disabled_on: Vec<String>,
}

impl ConstraintSummary {
    pub fn new(resource: impl Into<ResourceId>) -> Self {
        Self {
            resource: resource.into(),
            ..Default::default()
        }
    }

    /// Mark `node` as allowed. A previous deny for the same node is dropped.
    pub fn enable(&mut self, node: &str) {
        self.disabled_on.retain(|n| n != node);
        if !self.enabled_on.iter().any(|n| n == node) {
            self.enabled_on.push(node.to_string());
        }
    }

    /// Mark `node` as forbidden. A previous allow for the same node is dropped.
    pub fn disable(&mut self, node: &str) {
        self.enabled_on.retain(|n| n != node);
        if !self.disabled_on.iter().any(|n| n == node) {
            self.disabled_on.push(node.to_string());
        }
    }

    /// Whether `node` is classified either way.
    pub fn covers(&self, node: &str) -> bool {
        self.enabled_on.iter().chain(&self.disabled_on).any(|n| n == node)
    }
}

/// A constraint whose score the summary cannot classify (finite weight, or an
/// absolute score without a target node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousScore {
    pub constraint_id: String,
    pub resource: ResourceId,
    pub node: Option<String>,
    pub score: String,
}

/// Result of resolving a constraints section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    /// One summary per resource, first-seen order
    pub summaries: IndexMap<ResourceId, ConstraintSummary>,
    /// Scores that were logged and left out of the summaries
    pub ambiguous: Vec<AmbiguousScore>,
}

impl ConstraintSet {
    pub fn get(&self, resource: &str) -> Option<&ConstraintSummary> {
        self.summaries.get(resource)
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstraintSummary> {
        self.summaries.values()
    }
}

/// One attribute-bearing element of a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedEntry {
    pub tag: String,
    pub attributes: Attributes,
}

/// Linear view of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    /// Attribute-bearing elements in pre-order
    pub entries: Vec<FlattenedEntry>,
    /// Distinct tags of all visited elements, first-seen order
    pub tags: Vec<String>,
}

/// Per-resource line of the brief constraints report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefEntry {
    pub resource: ResourceId,
    pub allowed: Vec<String>,
    /// None when negative locations were not requested
    pub disallowed: Option<Vec<String>>,
    /// Every known cluster node is either allowed or disallowed
    pub covers_all_nodes: bool,
}

/// Constraints cross-referenced with the cluster's node list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BriefReport {
    pub nodes: Vec<String>,
    pub entries: Vec<BriefEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_repeated_enable_when_summarising_then_deduplicates() {
        let mut s = ConstraintSummary::new("A");
        s.enable("n1");
        s.enable("n2");
        s.enable("n1");
        assert_eq!(s.enabled_on, vec!["n1", "n2"]);
    }

    #[test]
    fn given_contradicting_scores_when_summarising_then_last_classification_wins() {
        let mut s = ConstraintSummary::new("A");
        s.enable("n1");
        s.disable("n1");
        assert!(s.enabled_on.is_empty());
        assert_eq!(s.disabled_on, vec!["n1"]);

        s.enable("n1");
        assert_eq!(s.enabled_on, vec!["n1"]);
        assert!(s.disabled_on.is_empty());
        assert!(s.covers("n1"));
        assert!(!s.covers("n2"));
    }
}
