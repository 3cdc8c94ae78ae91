//! crmctl: read-only operator tooling for Pacemaker clusters.
//!
//! The CIB is fetched from the control daemon on every call, parsed into an
//! arena tree ([`domain::ConfigDocument`]) and interpreted by the domain
//! engines: resource configuration, constraint resolution, cluster properties
//! and tree flattening.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
