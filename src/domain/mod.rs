//! Domain layer: the CIB tree and what can be derived from it
//!
//! This layer is independent of external concerns (no process execution, no CLI, no config loading).

pub mod arena;
pub mod configuration;
pub mod constraints;
pub mod entities;
pub mod error;
pub mod flatten;
pub mod nodes;
pub mod parser;
pub mod properties;
pub mod section;

pub use arena::{Attributes, ConfigDocument, Node, NodeKind};
pub use configuration::build_configuration;
pub use constraints::{brief_by_node, resolve, Affinity};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use flatten::{flatten, ToDisplayTree};
pub use nodes::node_names;
pub use parser::parse_document;
pub use properties::properties;
pub use section::Section;
