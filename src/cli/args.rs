//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Operator view of a Pacemaker cluster: resources, constraints, properties and the CIB tree
#[derive(Parser, Debug)]
#[command(name = "crmctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file (applied on top of the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resource primitives and their parameters
    #[command(visible_aliases = ["cf", "cfg"])]
    Config,

    /// Cluster properties (crm_config)
    #[command(visible_aliases = ["prop", "pr"])]
    Properties,

    /// Location constraints per resource, checked against cluster nodes
    #[command(visible_aliases = ["const", "cnst"])]
    Constraints {
        /// Also list the summaries of constraints whose id contains this text
        filter: Option<String>,
        /// Leave out -INFINITY (disallowed) locations
        #[arg(long)]
        positive_only: bool,
    },

    /// List resources, or show the placement summary for one
    #[command(visible_aliases = ["rsc", "r"])]
    Resources {
        /// Resource name (matched as a substring of constraint ids)
        resource: Option<String>,
    },

    /// Dump the CIB, or one section of it
    #[command(visible_aliases = ["xt", "xtree"])]
    Tree {
        /// Section: nodes, resources, constraints, crm_config, rsc_defaults, op_defaults, status
        section: Option<String>,
        /// Print as a nested tree instead of a flat list
        #[arg(long)]
        nested: bool,
    },

    /// Sections present in the CIB
    Sections,

    /// Cluster nodes declared in the CIB
    #[command(visible_alias = "nd")]
    Nodes {
        /// Ask crm_node for current membership instead
        #[arg(long)]
        live: bool,
    },

    /// One-shot cluster status
    #[command(visible_aliases = ["status", "st"])]
    State,

    /// Show where a resource is running
    #[command(visible_aliases = ["loc", "find"])]
    Locate {
        /// Only the promoted (master) instance
        #[arg(long)]
        master: bool,
        /// Resource name
        resource: String,
    },

    /// Run a command on a cluster node over ssh
    #[command(visible_aliases = ["node-run", "ndx"])]
    NodeExec {
        /// Node uname as declared in the CIB
        node: String,
        /// Command to run
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        command: Vec<String>,
    },

    /// Show effective settings
    Settings {
        /// Print a commented template instead
        #[arg(long)]
        template: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
