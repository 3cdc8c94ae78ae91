//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `CommandRunner` I/O boundary trait
//! but are themselves concrete structs, not traits.

mod cib;
mod cluster;

pub use cib::CibService;
pub use cluster::ClusterService;
