//! The filesystem paths a setup run works with.

use super::Platform;
use crate::config::SetupConfig;
use std::path::{Path, PathBuf};

/// `path` itself when absolute, otherwise `path` under `base`
///
/// The engine script runs from the source root, so prompt answers must be
/// absolute before any command is built from them.
pub fn absolute_from(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    base.join(path).components().collect()
}

/// Prompt defaults, resolved from configuration and platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDefaults {
    pub source: PathBuf,
    pub packages: PathBuf,
    pub project: PathBuf,
}

impl PathDefaults {
    /// Configured paths win over the platform defaults
    pub fn resolve(config: &SetupConfig) -> Self {
        let platform = config.platform();
        Self {
            source: config
                .paths
                .source
                .clone()
                .unwrap_or_else(|| platform.default_source()),
            packages: config
                .paths
                .packages
                .clone()
                .unwrap_or_else(|| platform.default_packages()),
            project: config
                .paths
                .project
                .clone()
                .unwrap_or_else(|| platform.default_project()),
        }
    }
}

/// Engine source, build output, package cache and project locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupPaths {
    /// Engine source tree (clone destination)
    pub source: PathBuf,
    /// Engine build tree
    pub build: PathBuf,
    /// Third-party package cache
    pub packages: PathBuf,
    /// New project directory
    pub project: PathBuf,
    platform: Platform,
}

impl SetupPaths {
    pub fn new(
        platform: Platform,
        source: PathBuf,
        build: PathBuf,
        packages: PathBuf,
        project: PathBuf,
    ) -> Self {
        Self {
            source,
            build,
            packages,
            project,
            platform,
        }
    }

    /// All defaults, with the build path derived from the default source
    pub fn from_defaults(platform: Platform, defaults: PathDefaults) -> Self {
        let build = platform.build_dir_under(&defaults.source);
        Self::new(
            platform,
            defaults.source,
            build,
            defaults.packages,
            defaults.project,
        )
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Project name, taken from the last component of the project path
    pub fn project_name(&self) -> String {
        self.project
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Build tree of the new project
    pub fn project_build(&self) -> PathBuf {
        self.platform.build_dir_under(&self.project)
    }

    /// The engine's bundled utility script
    pub fn engine_script(&self) -> PathBuf {
        self.source
            .join("scripts")
            .join(self.platform.engine_script_name())
    }

    /// Where the compiled project binaries end up
    pub fn binaries_dir(&self, build_config: &str) -> PathBuf {
        self.project_build().join("bin").join(build_config)
    }

    /// Existing directories a fresh install would remove, labelled for the prompt
    pub fn existing_installations(&self) -> Vec<(&'static str, &Path)> {
        self.installations()
            .into_iter()
            .filter(|(_, path)| path.exists())
            .collect()
    }

    pub(crate) fn installations(&self) -> Vec<(&'static str, &Path)> {
        vec![
            ("engine source", self.source.as_path()),
            ("engine build", self.build.as_path()),
            ("package cache", self.packages.as_path()),
            ("project", self.project.as_path()),
        ]
    }

    /// Configuration summary lines shown before confirmation
    pub fn summary(&self) -> Vec<String> {
        vec![
            format!("{:<17}{}", "O3DE Source:", self.source.display()),
            format!("{:<17}{}", "Build Path:", self.build.display()),
            format!("{:<17}{}", "Packages Path:", self.packages.display()),
            format!("{:<17}{}", "Project Path:", self.project.display()),
            format!("{:<17}{}", "Project Name:", self.project_name()),
        ]
    }
}
