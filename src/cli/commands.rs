//! Command dispatch: one function per subcommand

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{ConstraintSummary, ToDisplayTree};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Load settings, wire services, and run the selected command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "crmctl requires a command; see 'crmctl --help'".into(),
        ));
    };

    if let Commands::Completion { shell } = command {
        return completion(*shell);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);
    run(&container, command)
}

/// Run `command` against an already wired container.
pub fn run(container: &ServiceContainer, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Config => config(container),
        Commands::Properties => properties(container),
        Commands::Constraints {
            filter,
            positive_only,
        } => constraints(container, filter.as_deref(), !positive_only),
        Commands::Resources {
            resource: Some(resource),
        } => resource_overview(container, resource),
        Commands::Resources { resource: None } => {
            output::info(&container.cluster.list_resources()?);
            Ok(())
        }
        Commands::Tree { section, nested } => tree(container, section.as_deref(), *nested),
        Commands::Sections => sections(container),
        Commands::Nodes { live } => nodes(container, *live),
        Commands::State => {
            output::info(&container.cluster.state()?);
            Ok(())
        }
        Commands::Locate { master, resource } => {
            output::info(&container.cluster.locate(resource, *master)?);
            Ok(())
        }
        Commands::NodeExec { node, command } => node_exec(container, node, command),
        Commands::Settings { template } => settings(container, *template),
        Commands::Completion { shell } => completion(*shell),
    }
}

#[instrument(skip(c))]
fn config(c: &ServiceContainer) -> CliResult<()> {
    let records = c.cib.configuration()?;
    for record in &records {
        output::header(&format!(
            "--------- {} ---------",
            record.name.as_deref().unwrap_or("<untyped>")
        ));
        for (key, value) in &record.parameters {
            output::field(key, value);
        }
    }
    Ok(())
}

#[instrument(skip(c))]
fn properties(c: &ServiceContainer) -> CliResult<()> {
    let props = c.cib.properties()?;
    output::header("------- Cluster Properties --------");
    for (name, value) in &props {
        output::field(name, value);
    }
    Ok(())
}

#[instrument(skip(c))]
fn constraints(c: &ServiceContainer, filter: Option<&str>, include_negative: bool) -> CliResult<()> {
    let report = c.cib.brief_constraints(include_negative)?;
    output::header(&format!(
        "Discovered {} node unames: {}",
        report.nodes.len(),
        report.nodes.join(", ")
    ));
    for entry in &report.entries {
        let coverage = if entry.covers_all_nodes {
            "all nodes placed"
        } else {
            "partial placement"
        };
        output::info(&format!("{} ({})", entry.resource, coverage));
        for node in &entry.allowed {
            output::allowed(&format!("allowed on {}", node));
        }
        for node in entry.disallowed.iter().flatten() {
            output::disallowed(&format!("disallowed on {}", node));
        }
    }

    if let Some(filter) = filter {
        let set = c.cib.constraints(Some(filter))?;
        for summary in set.iter() {
            print_summary(summary);
        }
    }
    Ok(())
}

#[instrument(skip(c))]
fn resource_overview(c: &ServiceContainer, resource: &str) -> CliResult<()> {
    let set = c.cib.constraints(Some(resource))?;
    if set.is_empty() {
        output::warning(&format!("no constraints reference '{}'", resource));
    }
    for summary in set.iter() {
        print_summary(summary);
    }
    Ok(())
}

fn print_summary(summary: &ConstraintSummary) {
    output::field("resource", &summary.resource);
    output::field("type", &summary.kind);
    output::field("enabled_on", &summary.enabled_on.join(", "));
    output::field("disabled_on", &summary.disabled_on.join(", "));
}

#[instrument(skip(c))]
fn tree(c: &ServiceContainer, section: Option<&str>, nested: bool) -> CliResult<()> {
    if nested {
        let doc = c.cib.fetch(section)?;
        output::info(&doc.to_display_tree());
        return Ok(());
    }

    let flat = c.cib.flattened(section)?;
    for entry in &flat.entries {
        for (key, value) in &entry.attributes {
            output::detail(&format!("[ {} ] {:20}: {}", entry.tag, key, value));
        }
    }
    output::header(&format!("{} distinct tags", flat.tags.len()));
    output::info(&flat.tags.iter().map(|t| format!(" - {}", t)).join("\n"));
    Ok(())
}

fn sections(c: &ServiceContainer) -> CliResult<()> {
    for section in c.cib.section_names()? {
        output::info(&section);
    }
    Ok(())
}

fn nodes(c: &ServiceContainer, live: bool) -> CliResult<()> {
    if live {
        output::info(&c.cluster.list_nodes()?);
    } else {
        for name in c.cib.node_names()? {
            output::info(&name);
        }
    }
    Ok(())
}

#[instrument(skip(c))]
fn node_exec(c: &ServiceContainer, node: &str, command: &[String]) -> CliResult<()> {
    if command.is_empty() {
        return Err(CliError::InvalidArgs("missing command to execute on node".into()));
    }
    let known = c.cib.node_names()?;
    let stdout = c.cluster.node_exec(node, &command.join(" "), &known)?;
    output::info(&stdout);
    Ok(())
}

fn settings(c: &ServiceContainer, template: bool) -> CliResult<()> {
    if template {
        output::info(&Settings::template());
    } else {
        output::info(&c.settings.to_toml()?);
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut stdout = io::stdout();
    generate(shell, &mut cmd, name, &mut stdout);
    stdout
        .flush()
        .map_err(|e| InfraError::terminal("write completion script", e))?;
    Ok(())
}
