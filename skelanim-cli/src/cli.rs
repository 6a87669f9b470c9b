//! Root CLI structure for skelanim

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::demo::DescriptionFormat;
use crate::commands::sample::SampleArgs;

#[derive(Parser)]
#[command(name = "skelanim")]
#[command(about = "Inspect and sample skeletal animation rigs", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display a summary of a rig (built-in arm rig when no file is given)
    Info {
        /// Rig description file (.json, .yaml, .yml)
        rig: Option<PathBuf>,
    },

    /// Display the bone hierarchy as a tree
    Tree {
        /// Rig description file (.json, .yaml, .yml)
        rig: Option<PathBuf>,

        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Check that a rig description builds a valid rig
    Validate {
        /// Rig description file (.json, .yaml, .yml)
        rig: PathBuf,
    },

    /// Evaluate skinning matrices
    Sample(SampleArgs),

    /// Write the built-in arm rig as a description file
    Demo {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: DescriptionFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
