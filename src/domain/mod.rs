//! Domain types for o3de-setup.
//!
//! This module contains:
//! - Platform: per-OS defaults (generator, script name, build directory)
//! - SetupPaths: the four paths collected at the prompts
//! - CommandSpec: one external invocation
//! - SetupStep / SetupMode / SetupOutcome: the run's step sequence and result
//! - ToolVersion: dotted versions reported by external tools

mod command;
mod paths;
mod platform;
mod step;
mod version;

pub use command::CommandSpec;
pub use paths::{absolute_from, PathDefaults, SetupPaths};
pub use platform::Platform;
pub use step::{SetupMode, SetupOutcome, SetupStep};
pub use version::ToolVersion;
