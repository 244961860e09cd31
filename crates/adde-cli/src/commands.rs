//! Available subcommands.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Show resolved install paths
    Paths {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List RESOLV.SRV entries
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List distinct entry groups
    Groups,

    /// Add an entry and save
    Add {
        /// Fields as KEY=VALUE (N1 is the group, N2 the descriptor)
        #[arg(required_unless_present = "line", conflicts_with = "line")]
        fields: Vec<String>,

        /// Add a raw RESOLV.SRV line instead of fields
        #[arg(long)]
        line: Option<String>,
    },

    /// Remove an entry by its `list` index and save
    Remove {
        /// Index as shown by `list`
        index: usize,
    },

    /// Run the local server until Ctrl-C or until it exits
    Serve,
}
