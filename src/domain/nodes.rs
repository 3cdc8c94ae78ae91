//! Cluster member names from the `nodes` section.

use indexmap::IndexSet;

use crate::domain::arena::ConfigDocument;
use crate::domain::section::Section;

/// Declared `uname`s of cluster members, in document order.
///
/// Only the `nodes` section is consulted; `node_state` entries under `status`
/// also carry `uname` but describe runtime state, not membership.
pub fn node_names(doc: &ConfigDocument) -> IndexSet<String> {
    doc.iter_section(Section::Nodes)
        .filter_map(|(_, node)| node.attr("uname"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parser::parse_document;

    #[test]
    fn given_full_cib_when_listing_nodes_then_ignores_status_section() {
        let doc = parse_document(
            r#"<cib>
                 <configuration>
                   <nodes>
                     <node id="1" uname="alpha"/>
                     <node id="2" uname="beta"/>
                   </nodes>
                 </configuration>
                 <status>
                   <node_state id="3" uname="gamma"/>
                 </status>
               </cib>"#,
        )
        .unwrap();

        let names: Vec<_> = node_names(&doc).into_iter().collect();

        assert_eq!(names, vec!["alpha", "beta"]);
    }
}
