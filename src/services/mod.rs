//! Infrastructure services for o3de-setup.
//!
//! This module contains:
//! - CommandRunner / SystemRunner: process execution and the run log
//! - GitService: version-control client invocations
//! - CmakeService: build-configuration generator invocations
//! - EngineScript: the engine's bundled utility script
//! - Prompter / LinePrompter: console questions with defaults

mod cmake;
mod engine;
mod git;
pub mod process;
pub mod prompt;

pub use cmake::CmakeService;
pub use engine::EngineScript;
pub use git::{normalize_remote_url, GitService};
pub use process::{CommandRunner, SystemRunner};
pub use prompt::{is_affirmative, LinePrompter, Prompter};
