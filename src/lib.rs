//! Build environment detection for ecmd-pdbg.
//!
//! Resolves the toolchain, architecture, and output locations for a build
//! and writes them to `makefile.config` for the make build to include.

pub mod arch;
pub mod config;
pub mod emit;
pub mod error;
pub mod logging;
pub mod resolve;
pub mod settings;

pub use config::{resolve_config, BuildConfig, Defaults, Inputs};
pub use emit::{render, write_config};
pub use error::{ConfigError, Result};
pub use settings::SettingsTable;
