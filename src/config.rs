//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/crmctl/crmctl.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `CRMCTL_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for crmctl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// CIB query tool (invoked as `<cmd> --query [--scope <section>]`)
    pub query_command: String,
    /// Resource tool used by `locate`
    pub crm_resource_command: String,
    /// Status tool used by `state`
    pub crm_mon_command: String,
    /// Membership tool used by `nodes --live`
    pub crm_node_command: String,
    /// Remote shell used by `node-exec`
    pub ssh_command: String,
    /// Extra arguments placed before the target host
    pub ssh_options: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            query_command: "cibadmin".into(),
            crm_resource_command: "crm_resource".into(),
            crm_mon_command: "crm_mon".into(),
            crm_node_command: "crm_node".into(),
            ssh_command: "ssh".into(),
            ssh_options: vec![],
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub query_command: Option<String>,
    pub crm_resource_command: Option<String>,
    pub crm_mon_command: Option<String>,
    pub crm_node_command: Option<String>,
    pub ssh_command: Option<String>,
    pub ssh_options: Option<Vec<String>>,
}

/// Get the XDG config directory for crmctl.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "crmctl").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("crmctl.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value; lists are replaced, not merged.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            query_command: overlay
                .query_command
                .clone()
                .unwrap_or_else(|| self.query_command.clone()),
            crm_resource_command: overlay
                .crm_resource_command
                .clone()
                .unwrap_or_else(|| self.crm_resource_command.clone()),
            crm_mon_command: overlay
                .crm_mon_command
                .clone()
                .unwrap_or_else(|| self.crm_mon_command.clone()),
            crm_node_command: overlay
                .crm_node_command
                .clone()
                .unwrap_or_else(|| self.crm_node_command.clone()),
            ssh_command: overlay
                .ssh_command
                .clone()
                .unwrap_or_else(|| self.ssh_command.clone()),
            ssh_options: overlay
                .ssh_options
                .clone()
                .unwrap_or_else(|| self.ssh_options.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply CRMCTL_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CRMCTL")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("ssh_options"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("query_command") {
            settings.query_command = val;
        }
        if let Ok(val) = config.get_string("crm_resource_command") {
            settings.crm_resource_command = val;
        }
        if let Ok(val) = config.get_string("crm_mon_command") {
            settings.crm_mon_command = val;
        }
        if let Ok(val) = config.get_string("crm_node_command") {
            settings.crm_node_command = val;
        }
        if let Ok(val) = config.get_string("ssh_command") {
            settings.ssh_command = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("ssh_options") {
            settings.ssh_options = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# crmctl configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/crmctl/crmctl.toml
#   Explicit: crmctl --config <file>
#   Env:      CRMCTL_* environment variables (e.g. CRMCTL_QUERY_COMMAND)

# CIB query tool, called as: <query_command> --query [--scope <section>]
# query_command = "cibadmin"

# crm_resource_command = "crm_resource"
# crm_mon_command = "crm_mon"
# crm_node_command = "crm_node"

# Remote shell for node-exec, called as: <ssh_command> <ssh_options...> <node> <command>
# ssh_command = "ssh"
# ssh_options = ["-o", "BatchMode=yes"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
