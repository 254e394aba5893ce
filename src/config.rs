//! Configuration management for o3de-setup.
//!
//! Supports layered configuration: defaults → project → user → explicit file → env

use crate::domain::{Platform, ToolVersion};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-directory config file picked up from the working directory
pub const PROJECT_CONFIG_FILE: &str = ".o3de-setup.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub cmake: CmakeConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    /// Overrides the platform detected from the build target
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub log: LogConfig,
}

impl SetupConfig {
    /// Load configuration with hierarchy: defaults → project → user → explicit file → env
    pub fn load(working_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.o3de-setup.toml in the working directory)
        if let Some(dir) = working_dir {
            let project_config = dir.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/o3de-setup/config.toml)
        if let Some(dirs) = project_dirs() {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. File passed on the command line
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        // 5. Environment variables (O3DE_SETUP_*)
        builder = builder.add_source(
            Environment::with_prefix("O3DE_SETUP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values that would only fail later, halfway through a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repository.url.trim().is_empty() {
            return Err(ConfigError::Invalid("repository.url is empty".to_string()));
        }
        if self.repository.remote.trim().is_empty() {
            return Err(ConfigError::Invalid("repository.remote is empty".to_string()));
        }
        if ToolVersion::parse(&self.cmake.minimum_version).is_none() {
            return Err(ConfigError::Invalid(format!(
                "cmake.minimum_version is not a version: {}",
                self.cmake.minimum_version
            )));
        }
        Ok(())
    }

    /// The platform to configure for
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    /// The CMake generator, falling back to the platform default
    pub fn generator(&self) -> String {
        self.cmake
            .generator
            .clone()
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| self.platform().default_generator().to_string())
    }

    /// Where the run log is written, if enabled
    pub fn run_log_dir(&self) -> Option<PathBuf> {
        if !self.log.run_log {
            return None;
        }
        project_dirs().map(|dirs| dirs.data_local_dir().join("logs"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "o3de-setup", "o3de-setup")
}

/// Engine repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Clone URL of the engine repository
    #[serde(default = "default_repository_url")]
    pub url: String,
    /// Remote name checked when verifying a clone
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Run `git lfs pull` after cloning
    #[serde(default = "default_true")]
    pub fetch_large_files: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            url: default_repository_url(),
            remote: default_remote(),
            fetch_large_files: true,
        }
    }
}

fn default_repository_url() -> String {
    "https://github.com/o3de/o3de.git".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_true() -> bool {
    true
}

/// Git client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_git_program")]
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_git_program(),
        }
    }
}

fn default_git_program() -> String {
    "git".to_string()
}

/// CMake configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmakeConfig {
    #[serde(default = "default_cmake_program")]
    pub program: String,
    /// Oldest CMake release the engine accepts
    #[serde(default = "default_minimum_version")]
    pub minimum_version: String,
    /// Generator passed with -G; platform default when unset
    #[serde(default)]
    pub generator: Option<String>,
    /// Configuration built by `cmake --build --config`
    #[serde(default = "default_build_config")]
    pub build_config: String,
    /// Cache variable naming the third-party package directory
    #[serde(default = "default_third_party_define")]
    pub third_party_define: String,
}

impl Default for CmakeConfig {
    fn default() -> Self {
        Self {
            program: default_cmake_program(),
            minimum_version: default_minimum_version(),
            generator: None,
            build_config: default_build_config(),
            third_party_define: default_third_party_define(),
        }
    }
}

fn default_cmake_program() -> String {
    "cmake".to_string()
}

fn default_minimum_version() -> String {
    "3.24.0".to_string()
}

fn default_build_config() -> String {
    "profile".to_string()
}

fn default_third_party_define() -> String {
    "LY_3RDPARTY_PATH".to_string()
}

/// Prompt defaults; platform defaults are used when unset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub packages: Option<PathBuf>,
    #[serde(default)]
    pub project: Option<PathBuf>,
}

/// Run log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Append every external command and its exit code to a log file
    #[serde(default = "default_true")]
    pub run_log: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { run_log: true }
    }
}
