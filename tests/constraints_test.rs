//! Constraint resolution over parsed documents

use rstest::rstest;

use crmctl::domain::{brief_by_node, parse_document, resolve, Affinity};

fn location(id: &str, rsc: &str, node: &str, score: &str) -> String {
    format!(
        r#"<rsc_location id="{id}" rsc="{rsc}" node="{node}" score="{score}"/>"#
    )
}

fn constraints(body: &[String]) -> String {
    format!("<constraints>{}</constraints>", body.concat())
}

#[rstest]
#[case("INFINITY", Affinity::Allow)]
#[case("+INFINITY", Affinity::Ignore)]
#[case("-INFINITY", Affinity::Deny)]
#[case("100", Affinity::Ignore)]
#[case("-50", Affinity::Ignore)]
fn given_score_when_classifying_then_only_infinities_place(
    #[case] score: &str,
    #[case] expected: Affinity,
) {
    assert_eq!(Affinity::from_score(score), expected);
}

#[test]
fn given_enable_then_disable_on_same_node_when_resolving_then_last_score_wins() {
    let xml = constraints(&[
        location("loc-a", "A", "n1", "INFINITY"),
        location("loc-b", "A", "n1", "-INFINITY"),
    ]);
    let doc = parse_document(&xml).unwrap();

    let set = resolve(&doc, None);

    let a = set.get("A").unwrap();
    assert!(a.enabled_on.is_empty());
    assert_eq!(a.disabled_on, vec!["n1"]);
}

#[test]
fn given_repeated_location_when_resolving_then_node_listed_once() {
    let xml = constraints(&[
        location("loc-a", "A", "n1", "INFINITY"),
        location("loc-a-again", "A", "n1", "INFINITY"),
    ]);
    let doc = parse_document(&xml).unwrap();

    let set = resolve(&doc, None);

    assert_eq!(set.get("A").unwrap().enabled_on, vec!["n1"]);
}

#[test]
fn given_constraint_without_score_when_resolving_then_records_resource_only() {
    let xml = constraints(&[r#"<rsc_colocation id="colocation-A-B" rsc="A" with-rsc="B"/>"#.to_string()]);
    let doc = parse_document(&xml).unwrap();

    let set = resolve(&doc, None);

    let a = set.get("A").unwrap();
    assert_eq!(a.kind, "colocation");
    assert!(a.enabled_on.is_empty() && a.disabled_on.is_empty());
    assert!(set.ambiguous.is_empty());
}

#[rstest]
#[case(Some("loc-a"), vec!["A"])]
#[case(Some("loc"), vec!["A", "B"])]
#[case(Some("nothing"), vec![])]
#[case(None, vec!["A", "B"])]
fn given_filter_when_resolving_then_keeps_matching_ids(
    #[case] filter: Option<&str>,
    #[case] expected: Vec<&str>,
) {
    let xml = constraints(&[
        location("loc-a", "A", "n1", "INFINITY"),
        location("loc-b", "B", "n2", "INFINITY"),
    ]);
    let doc = parse_document(&xml).unwrap();

    let set = resolve(&doc, filter);

    let resources: Vec<_> = set.iter().map(|s| s.resource.as_str()).collect();
    assert_eq!(resources, expected);
}

#[test]
fn given_no_known_nodes_when_briefing_then_nothing_covers_all_nodes() {
    let xml = constraints(&[location("loc-a", "A", "n1", "INFINITY")]);
    let doc = parse_document(&xml).unwrap();

    let report = brief_by_node(&doc, &doc, true);

    assert!(report.nodes.is_empty());
    assert_eq!(report.entries.len(), 1);
    assert!(!report.entries[0].covers_all_nodes);
}
