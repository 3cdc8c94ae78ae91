//! Resource configuration recovered from the `resources` section.
//!
//! Parameters are not stored as one key/value element. A `name` attribute
//! opens a parameter and the next `value` attribute closes it, possibly on a
//! later sibling, so the scan below must see elements in document order.

use tracing::{debug, instrument, trace};

use crate::domain::arena::{ConfigDocument, Node};
use crate::domain::entities::ResourceRecord;
use crate::domain::section::Section;

/// Operation identifiers that appear as `name` values but are not parameters.
pub const RESERVED_NAMES: [&str; 8] = [
    "op",
    "id",
    "stop",
    "start",
    "promote",
    "demote",
    "monitor",
    "OCF_CHECK_LEVEL",
];

/// Rebuild one [`ResourceRecord`] per primitive, in document order.
///
/// A primitive starts at an element carrying `class`; its record is sealed
/// when the next primitive starts or the section ends. An absent or empty
/// `resources` section yields an empty list.
#[instrument(level = "debug", skip(doc))]
pub fn build_configuration(doc: &ConfigDocument) -> Vec<ResourceRecord> {
    let records = doc
        .iter_section(Section::Resources)
        .map(|(_, node)| node)
        .filter(|node| node.is_attributed())
        .fold(Scan::default(), Scan::visit)
        .finish();
    debug!("collected {} resource records", records.len());
    records
}

/// Fold state: sealed records, the record being filled, and the pending key.
#[derive(Debug, Default)]
struct Scan {
    sealed: Vec<ResourceRecord>,
    open: Option<ResourceRecord>,
    pending: Option<String>,
}

impl Scan {
    fn visit(mut self, node: &Node) -> Self {
        if node.attr("class").is_some() {
            self.seal();
            self.open = Some(ResourceRecord::new(node.attr("type").map(str::to_string)));
        }
        for (key, value) in &node.attributes {
            self.pair(key, value);
        }
        self
    }

    fn pair(&mut self, key: &str, value: &str) {
        let Some(record) = self.open.as_mut() else {
            return;
        };
        match key {
            "name" if RESERVED_NAMES.contains(&value) => {
                trace!("skipping reserved name {}", value);
            }
            "name" => self.pending = Some(value.to_string()),
            "value" => {
                if let Some(param) = self.pending.take() {
                    record.parameters.insert(param, value.to_string());
                }
            }
            _ => {}
        }
    }

    fn seal(&mut self) {
        self.pending = None;
        if let Some(record) = self.open.take() {
            self.sealed.push(record);
        }
    }

    fn finish(mut self) -> Vec<ResourceRecord> {
        self.seal();
        self.sealed
    }
}
