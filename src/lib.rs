//! mockups-cli: mockup catalogue generation and synchronization
//!
//! Two subsystems:
//!
//! - a **generation pipeline** that scans a project tree for mockup modules
//!   and deterministically emits a manifest module referencing them
//!   ([`config`] -> [`locator`] -> [`template`] -> written file);
//! - a **synchronization server** ([`server`]) that relays the currently
//!   selected mockup and the mockup inventory between a running app
//!   instance and developer-tool clients over WebSocket connections.
//!
//! # Example
//!
//! ```no_run
//! use mockups_cli::{config::InputConfig, Config};
//!
//! let cwd = std::env::current_dir()?;
//! let config = Config::resolve(&InputConfig::default(), &cwd)?;
//! let written = mockups_cli::generate::run(&config)?;
//! println!("manifest written to {}", written.display());
//! # Ok::<(), mockups_cli::MockupsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod fs_utils;
pub mod generate;
pub mod locator;
pub mod paths;
pub mod server;
pub mod template;

// Re-export commonly used types
pub use cli::{Cli, Commands, GenerateArgs, ServerArgs};
pub use config::{Config, InputConfig};
pub use error::{MockupsError, Result};
pub use format::FormatOptions;
pub use locator::{locate, DiscoveredFile, LoaderManifest};
pub use server::{SyncServer, DEFAULT_HOST, DEFAULT_PORT};
pub use template::generate_template;
