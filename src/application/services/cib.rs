//! CIB access service
//!
//! Queries the control daemon for the CIB (optionally one section of it),
//! parses the answer, and hands typed views to callers. Nothing is cached:
//! every call is a fresh query because the daemon is the source of truth.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    self, BriefReport, ConfigDocument, ConstraintSet, Flattened, ResourceRecord, Section,
};
use crate::infrastructure::traits::CommandRunner;

/// Service for fetching and interpreting the cluster information base.
pub struct CibService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl CibService {
    /// Create a new CIB service.
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    /// Fetch the CIB, restricted to `scope` when given.
    ///
    /// The scope is validated before anything is executed.
    ///
    /// # Errors
    /// - `UnknownSection` for a scope outside the permitted set
    /// - `DaemonUnavailable` when the query cannot run, exits non-zero, or prints nothing
    /// - `MalformedDocument` when the output is not well-formed XML
    pub fn fetch(&self, scope: Option<&str>) -> ApplicationResult<ConfigDocument> {
        let section = scope.map(str::parse::<Section>).transpose()?;
        self.fetch_section(section)
    }

    /// Fetch the CIB for an already validated section.
    #[instrument(level = "debug", skip(self))]
    pub fn fetch_section(&self, section: Option<Section>) -> ApplicationResult<ConfigDocument> {
        let mut args = vec!["--query"];
        if let Some(section) = section {
            args.extend(["--scope", section.as_str()]);
        }
        let program = self.settings.query_command.as_str();
        let command = format!("{} {}", program, args.join(" "));
        debug!("fetching CIB: {}", command);

        let output = self
            .cmd
            .run(program, &args)
            .map_err(|e| ApplicationError::DaemonUnavailable {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApplicationError::DaemonUnavailable {
                command,
                reason: format!("exited with {}: {}", output.status, stderr.trim()),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Err(ApplicationError::DaemonUnavailable {
                command,
                reason: "no output".to_string(),
            });
        }

        Ok(domain::parse_document(&stdout)?)
    }

    /// Resource primitives with their parameters.
    pub fn configuration(&self) -> ApplicationResult<Vec<ResourceRecord>> {
        let doc = self.fetch_section(Some(Section::Resources))?;
        Ok(domain::build_configuration(&doc))
    }

    /// Per-resource placement summaries, optionally filtered by constraint id.
    pub fn constraints(&self, filter: Option<&str>) -> ApplicationResult<ConstraintSet> {
        let doc = self.fetch_section(Some(Section::Constraints))?;
        Ok(domain::resolve(&doc, filter))
    }

    /// Constraint summaries checked against the cluster's node list.
    pub fn brief_constraints(&self, include_negative: bool) -> ApplicationResult<BriefReport> {
        let constraints = self.fetch_section(Some(Section::Constraints))?;
        let nodes = self.fetch_section(Some(Section::Nodes))?;
        Ok(domain::brief_by_node(&constraints, &nodes, include_negative))
    }

    /// Cluster properties from `crm_config`.
    pub fn properties(&self) -> ApplicationResult<IndexMap<String, String>> {
        let doc = self.fetch_section(Some(Section::CrmConfig))?;
        Ok(domain::properties(&doc))
    }

    /// Declared cluster member names.
    pub fn node_names(&self) -> ApplicationResult<IndexSet<String>> {
        let doc = self.fetch_section(Some(Section::Nodes))?;
        Ok(domain::node_names(&doc))
    }

    /// Sections present in the full CIB.
    pub fn section_names(&self) -> ApplicationResult<IndexSet<Section>> {
        let doc = self.fetch_section(None)?;
        Ok(doc.section_names())
    }

    /// Flattened dump of the CIB or one section of it.
    pub fn flattened(&self, scope: Option<&str>) -> ApplicationResult<Flattened> {
        let doc = self.fetch(scope)?;
        Ok(domain::flatten(&doc))
    }
}
