//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CibService, ClusterService};
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, RealCommandRunner, RemoteRunner};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// CIB queries
    pub cib: CibService,

    /// Read-only cluster helpers
    pub cluster: ClusterService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealCommandRunner))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, cmd: Arc<dyn CommandRunner>) -> Self {
        let settings = Arc::new(settings);

        let remote = RemoteRunner::new(
            Arc::clone(&cmd),
            settings.ssh_command.clone(),
            settings.ssh_options.clone(),
        );
        let cib = CibService::new(Arc::clone(&cmd), Arc::clone(&settings));
        let cluster = ClusterService::new(Arc::clone(&cmd), remote, Arc::clone(&settings));

        Self {
            settings,
            cmd,
            cib,
            cluster,
        }
    }
}
