//! I/O boundary traits for testability
//!
//! External commands (the CIB query, `crm_*` tools, ssh) all go through
//! [`CommandRunner`], so services can be tested against canned output.

use std::io;
use std::process::Output;
use std::sync::Arc;

use tracing::debug;

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments, capturing stdout and stderr.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        debug!("exec: {} {}", cmd, args.join(" "));
        std::process::Command::new(cmd).args(args).output()
    }
}

/// Runs commands on another cluster member by prefixing them with ssh.
#[derive(Clone)]
pub struct RemoteRunner {
    inner: Arc<dyn CommandRunner>,
    ssh_command: String,
    ssh_options: Vec<String>,
}

impl RemoteRunner {
    pub fn new(inner: Arc<dyn CommandRunner>, ssh_command: impl Into<String>, ssh_options: Vec<String>) -> Self {
        Self {
            inner,
            ssh_command: ssh_command.into(),
            ssh_options,
        }
    }

    /// Run `command` (a single shell string) on `target`.
    pub fn run_on(&self, target: &str, command: &str) -> io::Result<Output> {
        self.inner.run(&self.ssh_command, &self.args(target, command))
    }

    /// The command line `run_on` executes, for messages.
    pub fn command_line(&self, target: &str, command: &str) -> String {
        std::iter::once(self.ssh_command.as_str())
            .chain(self.args(target, command))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn args<'a>(&'a self, target: &'a str, command: &'a str) -> Vec<&'a str> {
        self.ssh_options
            .iter()
            .map(String::as_str)
            .chain([target, command])
            .collect()
    }
}

impl std::fmt::Debug for RemoteRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteRunner")
            .field("ssh_command", &self.ssh_command)
            .field("ssh_options", &self.ssh_options)
            .finish()
    }
}
