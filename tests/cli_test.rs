//! Command dispatch and exit code mapping

use std::fs;
use std::sync::Arc;

use crmctl::cli::args::Commands;
use crmctl::cli::commands::run;
use crmctl::config::Settings;
use crmctl::exitcode;
use crmctl::infrastructure::di::ServiceContainer;
use crmctl::util::testing::{init_test_setup, ScriptedRunner};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/resources/cib/{}", name)).expect("read fixture")
}

fn container(runner: ScriptedRunner) -> (Arc<ScriptedRunner>, ServiceContainer) {
    init_test_setup();
    let runner = Arc::new(runner);
    let container = ServiceContainer::with_deps(Settings::default(), runner.clone());
    (runner, container)
}

#[test]
fn given_unknown_section_when_dumping_tree_then_usage_error() {
    let (runner, c) = container(ScriptedRunner::new());

    let err = run(
        &c,
        &Commands::Tree {
            section: Some("bogus".into()),
            nested: false,
        },
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(runner.calls().is_empty());
}

#[test]
fn given_daemon_down_when_listing_properties_then_unavailable() {
    let (_, c) = container(ScriptedRunner::new().failing(
        "cibadmin --query --scope crm_config",
        102,
        "Could not connect to the CIB",
    ));

    let err = run(&c, &Commands::Properties).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::UNAVAILABLE);
}

#[test]
fn given_garbage_output_when_listing_config_then_data_error() {
    let (_, c) = container(ScriptedRunner::new().on("cibadmin --query --scope resources", "not xml <"));

    let err = run(&c, &Commands::Config).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_unknown_node_when_executing_then_nohost() {
    let (runner, c) = container(
        ScriptedRunner::new().on("cibadmin --query --scope nodes", &fixture("nodes.xml")),
    );

    let err = run(
        &c,
        &Commands::NodeExec {
            node: "node9".into(),
            command: vec!["uptime".into()],
        },
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOHOST);
    assert_eq!(runner.calls(), vec!["cibadmin --query --scope nodes"]);
}

#[test]
fn given_reachable_cluster_when_running_constraints_then_queries_both_sections() {
    let (runner, c) = container(
        ScriptedRunner::new()
            .on("cibadmin --query --scope constraints", &fixture("constraints.xml"))
            .on("cibadmin --query --scope nodes", &fixture("nodes.xml")),
    );

    run(
        &c,
        &Commands::Constraints {
            filter: None,
            positive_only: false,
        },
    )
    .unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            "cibadmin --query --scope constraints",
            "cibadmin --query --scope nodes"
        ]
    );
}

#[test]
fn given_full_cib_when_dumping_nested_tree_then_succeeds() {
    let (_, c) = container(ScriptedRunner::new().on("cibadmin --query", &fixture("cib.xml")));

    run(
        &c,
        &Commands::Tree {
            section: None,
            nested: true,
        },
    )
    .unwrap();
}

#[test]
fn given_no_resource_when_running_resources_then_lists_them() {
    let (runner, c) = container(ScriptedRunner::new().on("crm_resource --list-raw", "VIP\n"));

    run(&c, &Commands::Resources { resource: None }).unwrap();

    assert_eq!(runner.calls(), vec!["crm_resource --list-raw"]);
}

#[test]
fn given_resource_when_running_resources_then_queries_constraints() {
    let (runner, c) = container(
        ScriptedRunner::new().on("cibadmin --query --scope constraints", &fixture("constraints.xml")),
    );

    run(
        &c,
        &Commands::Resources {
            resource: Some("VIP".into()),
        },
    )
    .unwrap();

    assert_eq!(runner.calls(), vec!["cibadmin --query --scope constraints"]);
}
