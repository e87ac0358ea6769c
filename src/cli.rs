//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand};

use crate::config::{InputConfig, OneOrMany};

/// Mockup catalogue generator and synchronization server
#[derive(Parser, Debug)]
#[command(name = "mockups")]
#[command(about = "Generate a mockup manifest and sync mockup state with developer tools")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level to debug
    #[arg(long, global = true)]
    pub debug: bool,

    /// Silence all logging
    #[arg(long, global = true)]
    pub silent: bool,
}

/// Available subcommands for mockups
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the mockups manifest file
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Start the synchronization server
    #[command(visible_alias = "s")]
    Server(ServerArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory, relative to the project root, to search for mockup files
    /// in (repeatable)
    #[arg(long = "search-dir", value_name = "DIR")]
    pub search_dir: Vec<String>,

    /// Glob pattern applied inside each search directory. Quote patterns
    /// containing "**/*" so the shell does not expand them
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Path of the generated manifest file
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<String>,

    /// Start the synchronization server after generating
    #[arg(long)]
    pub start_server: bool,
}

impl GenerateArgs {
    /// The run-time override layer for config resolution.
    pub fn overrides(&self) -> InputConfig {
        InputConfig {
            search_dir: if self.search_dir.is_empty() {
                None
            } else {
                Some(OneOrMany::Many(self.search_dir.clone()))
            },
            pattern: self.pattern.clone(),
            output_file: self.output_file.clone(),
            host: None,
            port: None,
        }
    }
}

/// Arguments for the server command
#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Hostname to bind
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}
