// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Notes directory (default: <documents>/BulletinBoard)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Path to TOML configuration file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show all notes as the sidebar
    List {
        /// Show only the "Add New" control and the note count
        #[arg(long)]
        collapsed: bool,
    },

    /// Show pinned notes
    Board,

    /// Add an empty note
    Add,

    /// Replace the body of a note
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: u64,

        /// New body text
        #[arg(value_name = "BODY")]
        body: String,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: u64,
    },

    /// Pin or unpin a note (pin state lasts for the session only)
    Pin {
        /// Note ID to pin or unpin
        #[arg(value_name = "NOTE_ID")]
        note_id: u64,
    },

    /// Interactive session reading commands from stdin
    Shell,

    /// Run the storage side over JSON Lines on stdin/stdout
    Serve,
}
