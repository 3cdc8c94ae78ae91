//! Named top-level partitions of the CIB.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// A scope accepted by `cibadmin --query --scope`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Nodes,
    Resources,
    Constraints,
    CrmConfig,
    RscDefaults,
    OpDefaults,
    Status,
}

impl Section {
    /// All permitted scopes, in the order `cibadmin` documents them.
    pub const ALL: [Section; 7] = [
        Section::Nodes,
        Section::Resources,
        Section::Constraints,
        Section::CrmConfig,
        Section::RscDefaults,
        Section::OpDefaults,
        Section::Status,
    ];

    /// The element tag (and scope argument) for this section.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Nodes => "nodes",
            Section::Resources => "resources",
            Section::Constraints => "constraints",
            Section::CrmConfig => "crm_config",
            Section::RscDefaults => "rsc_defaults",
            Section::OpDefaults => "op_defaults",
            Section::Status => "status",
        }
    }

    /// Map an element tag to a section, if it names one.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == tag)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s.trim()).ok_or_else(|| DomainError::UnknownSection(s.to_string()))
    }
}
