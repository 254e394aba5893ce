//! o3de-setup: interactive installer for an O3DE engine source tree
//!
//! This crate drives git, cmake and the engine's own utility script to
//! clone, configure and register the engine, then scaffold and configure a
//! first project.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod plan;
pub mod services;
pub mod ui;

pub use app::SetupApp;
pub use config::SetupConfig;
pub use error::{AppError, Result};
pub use plan::SetupPlan;
