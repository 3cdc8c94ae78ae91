//! Read-only cluster helpers around the `crm_*` tools and ssh.

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, OutputExt};
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, RemoteRunner};

/// Service for cluster status queries and remote execution on members.
pub struct ClusterService {
    cmd: Arc<dyn CommandRunner>,
    remote: RemoteRunner,
    settings: Arc<Settings>,
}

impl ClusterService {
    pub fn new(cmd: Arc<dyn CommandRunner>, remote: RemoteRunner, settings: Arc<Settings>) -> Self {
        Self {
            cmd,
            remote,
            settings,
        }
    }

    /// One-shot cluster status (`crm_mon --one-shot --show-detail`).
    pub fn state(&self) -> ApplicationResult<String> {
        self.run(&self.settings.crm_mon_command, &["--one-shot", "--show-detail"])
    }

    /// Nodes a resource is running on; with `master`, only its promoted instance.
    pub fn locate(&self, resource: &str, master: bool) -> ApplicationResult<String> {
        let mut args = vec!["--locate", "--resource", resource];
        if master {
            args.push("--master");
        }
        self.run(&self.settings.crm_resource_command, &args)
    }

    /// Configured resources, one per line (`crm_resource --list-raw`).
    pub fn list_resources(&self) -> ApplicationResult<String> {
        self.run(&self.settings.crm_resource_command, &["--list-raw"])
    }

    /// Cluster membership as reported by `crm_node --list`.
    pub fn list_nodes(&self) -> ApplicationResult<String> {
        self.run(&self.settings.crm_node_command, &["--list"])
    }

    /// Run `command` on cluster member `node` over ssh.
    ///
    /// `node` must be one of `known_nodes`, the `uname`s declared in the CIB.
    #[instrument(level = "debug", skip(self, known_nodes))]
    pub fn node_exec(
        &self,
        node: &str,
        command: &str,
        known_nodes: &IndexSet<String>,
    ) -> ApplicationResult<String> {
        if !known_nodes.contains(node) {
            return Err(ApplicationError::UnknownNode(node.to_string()));
        }
        let cmdline = self.remote.command_line(node, command);
        self.remote
            .run_on(node, command)
            .with_command_context(&cmdline)?
            .into_stdout(&cmdline)
    }

    fn run(&self, program: &str, args: &[&str]) -> ApplicationResult<String> {
        let cmdline = format!("{} {}", program, args.join(" "));
        debug!("run: {}", cmdline);
        self.cmd
            .run(program, args)
            .with_command_context(&cmdline)?
            .into_stdout(&cmdline)
    }
}
