//! Placement constraint classification.
//!
//! Scores are a tri-state policy: `INFINITY` allows a resource on a node,
//! `-INFINITY` forbids it, and any finite weight is only a preference which
//! this summary does not represent.

use tracing::{debug, instrument, warn};

use crate::domain::arena::{ConfigDocument, Node};
use crate::domain::entities::{
    AmbiguousScore, BriefEntry, BriefReport, ConstraintSet, ConstraintSummary,
};
use crate::domain::nodes::node_names;
use crate::domain::section::Section;

pub const SCORE_ALLOW: &str = "INFINITY";
pub const SCORE_DENY: &str = "-INFINITY";

/// How a single constraint's score is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Allow,
    Deny,
    Ignore,
}

impl Affinity {
    pub fn from_score(score: &str) -> Self {
        match score {
            SCORE_ALLOW => Affinity::Allow,
            SCORE_DENY => Affinity::Deny,
            _ => Affinity::Ignore,
        }
    }
}

/// Constraint kind from its id: `location-A-n1--INFINITY` -> `location`.
pub fn constraint_kind(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

/// Summarise the constraints section per resource.
///
/// With `filter`, only constraints whose id contains it (substring) are used.
/// When a resource/node pair is classified more than once the last one in
/// document order wins.
#[instrument(level = "debug", skip(doc))]
pub fn resolve(doc: &ConfigDocument, filter: Option<&str>) -> ConstraintSet {
    let mut set = ConstraintSet::default();

    for constraint in constraint_nodes(doc) {
        let id = constraint.attr("id").unwrap_or_default();
        if let Some(filter) = filter {
            if !id.contains(filter) {
                continue;
            }
        }
        let Some(resource) = constraint.attr("rsc") else {
            debug!("constraint {} has no rsc, skipping", id);
            continue;
        };

        let summary = set
            .summaries
            .entry(resource.to_string())
            .or_insert_with(|| ConstraintSummary::new(resource));
        summary.kind = constraint_kind(id).to_string();

        let Some(score) = constraint.attr("score") else {
            continue;
        };
        let node = constraint.attr("node");
        match (Affinity::from_score(score), node) {
            (Affinity::Allow, Some(node)) => summary.enable(node),
            (Affinity::Deny, Some(node)) => summary.disable(node),
            _ => {
                warn!(
                    "ignoring constraint {} for {}: score {} on node {}",
                    id,
                    resource,
                    score,
                    node.unwrap_or("<none>")
                );
                set.ambiguous.push(AmbiguousScore {
                    constraint_id: id.to_string(),
                    resource: resource.to_string(),
                    node: node.map(str::to_string),
                    score: score.to_string(),
                });
            }
        }
    }

    debug!(
        "resolved {} resources, {} ambiguous scores",
        set.len(),
        set.ambiguous.len()
    );
    set
}

/// Per-resource allow/deny lists checked against the cluster's node list.
///
/// `constraints` and `nodes` may be the same full document or two scoped ones.
#[instrument(level = "debug", skip(constraints, nodes))]
pub fn brief_by_node(
    constraints: &ConfigDocument,
    nodes: &ConfigDocument,
    include_negative: bool,
) -> BriefReport {
    let known: Vec<String> = node_names(nodes).into_iter().collect();
    debug!("discovered {} node unames", known.len());

    let entries = resolve(constraints, None)
        .iter()
        .map(|summary| BriefEntry {
            resource: summary.resource.clone(),
            allowed: summary.enabled_on.clone(),
            disallowed: include_negative.then(|| summary.disabled_on.clone()),
            covers_all_nodes: !known.is_empty() && known.iter().all(|n| summary.covers(n)),
        })
        .collect();

    BriefReport {
        nodes: known,
        entries,
    }
}

/// Direct children of the `constraints` element.
fn constraint_nodes(doc: &ConfigDocument) -> Vec<&Node> {
    doc.section_root(Section::Constraints)
        .map(|root| doc.children(root).map(|(_, node)| node).collect())
        .unwrap_or_default()
}
