//! XML text -> [`ConfigDocument`].
//!
//! Only elements and their attributes are kept. Text, comments, processing
//! instructions and the XML declaration carry no CIB data and are dropped.

use generational_arena::Index;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, instrument};

use crate::domain::arena::{Attributes, ConfigDocument};
use crate::domain::error::{DomainError, DomainResult};

/// Parse a CIB (or one section of it) into an arena tree.
///
/// Fails with [`DomainError::MalformedDocument`] on syntax errors, mismatched or
/// unclosed tags, duplicate attributes, a missing root element, or more than
/// one root element.
#[instrument(level = "debug", skip(xml), fields(len = xml.len()))]
pub fn parse_document(xml: &str) -> DomainResult<ConfigDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = ConfigDocument::new();
    let mut open: Vec<Index> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let idx = insert_element(&mut doc, &open, &e)?;
                open.push(idx);
            }
            Ok(Event::Empty(e)) => {
                insert_element(&mut doc, &open, &e)?;
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(DomainError::malformed(format!(
                    "at byte {}: {}",
                    reader.error_position(),
                    e
                )))
            }
        }
    }

    if let Some(&unclosed) = open.last() {
        let tag = doc
            .get_node(unclosed)
            .map(|n| n.tag.clone())
            .unwrap_or_default();
        return Err(DomainError::malformed(format!("unclosed element <{}>", tag)));
    }
    if doc.is_empty() {
        return Err(DomainError::malformed("no root element"));
    }

    debug!("parsed {} elements, depth {}", doc.len(), doc.depth());
    Ok(doc)
}

fn insert_element(
    doc: &mut ConfigDocument,
    open: &[Index],
    element: &BytesStart<'_>,
) -> DomainResult<Index> {
    let tag = std::str::from_utf8(element.name().as_ref())
        .map_err(|e| DomainError::malformed(format!("tag is not UTF-8: {}", e)))?
        .to_string();

    let parent = open.last().copied();
    if parent.is_none() && !doc.is_empty() {
        return Err(DomainError::malformed(format!(
            "second root element <{}>",
            tag
        )));
    }

    let attributes = read_attributes(element, &tag)?;
    Ok(doc.insert_node(tag, attributes, parent))
}

fn read_attributes(element: &BytesStart<'_>, tag: &str) -> DomainResult<Attributes> {
    let mut attributes = Attributes::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| DomainError::malformed(format!("<{}>: {}", tag, e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| DomainError::malformed(format!("<{}>: attribute name: {}", tag, e)))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| DomainError::malformed(format!("<{}> {}: {}", tag, key, e)))?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_xml_when_parsing_then_builds_tree_in_document_order() {
        let xml = r#"<?xml version="1.0"?>
            <constraints>
              <rsc_location id="location-A-n1" rsc="A" node="n1" score="INFINITY"/>
              <!-- comment -->
              <rsc_order id="order-A-B" first="A" then="B"></rsc_order>
            </constraints>"#;
        let doc = parse_document(xml).unwrap();

        let tags: Vec<_> = doc.iter().map(|(_, n)| n.tag.clone()).collect();
        assert_eq!(tags, vec!["constraints", "rsc_location", "rsc_order"]);

        let (_, loc) = doc.iter().nth(1).unwrap();
        let keys: Vec<_> = loc.attributes.keys().cloned().collect();
        assert_eq!(keys, vec!["id", "rsc", "node", "score"]);
    }

    #[test]
    fn given_escaped_attribute_when_parsing_then_unescapes_value() {
        let doc = parse_document(r#"<nvpair name="msg" value="a &amp; b &lt;c&gt;"/>"#).unwrap();
        let (_, node) = doc.iter().next().unwrap();
        assert_eq!(node.attr("value"), Some("a & b <c>"));
    }

    #[test]
    fn given_mismatched_end_tag_when_parsing_then_fails_malformed() {
        let err = parse_document("<a><b></a>").unwrap_err();
        assert!(matches!(err, DomainError::MalformedDocument { .. }));
    }

    #[test]
    fn given_unclosed_element_when_parsing_then_fails_malformed() {
        let err = parse_document("<cib><configuration>").unwrap_err();
        assert!(err.to_string().contains("unclosed"), "{}", err);
    }

    #[test]
    fn given_plain_text_when_parsing_then_fails_malformed() {
        let err = parse_document("Call cib_query failed (-107): Transport endpoint is not connected")
            .unwrap_err();
        assert!(err.to_string().contains("no root element"), "{}", err);
    }

    #[test]
    fn given_two_roots_when_parsing_then_fails_malformed() {
        let err = parse_document("<a/><b/>").unwrap_err();
        assert!(err.to_string().contains("second root"), "{}", err);
    }

    #[test]
    fn given_duplicate_attribute_when_parsing_then_fails_malformed() {
        let err = parse_document(r#"<a id="1" id="2"/>"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedDocument { .. }));
    }
}
