//! Command line surface of the `support-console` binary.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use support_console::models::StatusFilter;

#[derive(Parser)]
#[command(name = "support-console")]
#[command(about = "Browse the support analytics console from a terminal")]
pub struct Cli {
    /// Skip the simulated service latency
    #[arg(long, global = true)]
    pub instant: bool,

    /// Directory holding users.json, apps.json and ai_logs.json
    #[arg(long, global = true, value_name = "DIR")]
    pub fixtures: Option<PathBuf>,

    /// Print loaded records as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List users, optionally searched and filtered by status
    Users {
        #[arg(long)]
        search: Option<String>,
        /// All, Active, Inactive, Pending or New
        #[arg(long, default_value = "All")]
        status: StatusFilter,
    },
    /// List applications with their performance band
    Apps,
    /// Application overview
    Dashboard {
        /// Header click; repeat a key to flip it to descending
        #[arg(long, value_name = "KEY")]
        sort: Vec<String>,
    },
    /// List AI event logs
    Logs {
        /// Header click; repeat a key to flip it to descending
        #[arg(long, value_name = "KEY")]
        sort: Vec<String>,
    },
    /// Show the detail view of one AI log
    Log {
        /// Log Id as shown in the list
        id: String,
    },
}
