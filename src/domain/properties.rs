//! Cluster-wide properties from `crm_config`.

use indexmap::IndexMap;
use tracing::instrument;

use crate::domain::arena::ConfigDocument;
use crate::domain::section::Section;

/// `name -> value` for every element in `crm_config` carrying a `name`.
///
/// A missing `value` is stored as an empty string. A repeated name keeps its
/// first position and takes the last value.
#[instrument(level = "debug", skip(doc))]
pub fn properties(doc: &ConfigDocument) -> IndexMap<String, String> {
    doc.iter_section(Section::CrmConfig)
        .filter_map(|(_, node)| {
            node.attr("name")
                .map(|name| (name.to_string(), node.attr("value").unwrap_or_default().to_string()))
        })
        .collect()
}
