//! Defines the command-line arguments and subcommands for the Jen CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "jen",
    version,
    about = "Parse Jen source files and inspect their syntax trees."
)]
pub struct JenArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the Abstract Syntax Tree (AST) for a source file.
    Ast {
        /// The path to the Jen source file to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// Print the tree as JSON instead of the canonical text form.
        #[arg(long)]
        json: bool,
    },
    /// Show a source file with its indentation rewritten as block markers.
    Normalize {
        /// The path to the Jen source file to normalize.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Parse every `.jen` file under a path and report the ones that fail.
    Check {
        /// A Jen source file, or a directory to search recursively.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Check the grammar against the parser's rule table.
    ValidateGrammar,
}
