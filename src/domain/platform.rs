//! Target platform and the defaults that depend on it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Operating system the engine is being set up for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    /// Platform of the running binary
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// CMake generator used when none is configured
    pub fn default_generator(&self) -> &'static str {
        match self {
            Self::Windows => "Visual Studio 16",
            Self::Linux => "Ninja Multi-Config",
            Self::MacOs => "Xcode",
        }
    }

    /// Directory name under `build/` for this platform
    pub fn build_dir_name(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "mac",
        }
    }

    /// File name of the engine's utility script under `scripts/`
    pub fn engine_script_name(&self) -> &'static str {
        match self {
            Self::Windows => "o3de.bat",
            Self::Linux | Self::MacOs => "o3de.sh",
        }
    }

    /// Arguments handed to the native build tool after `--`
    pub fn native_build_args(&self) -> &'static [&'static str] {
        match self {
            // msbuild parallel build
            Self::Windows => &["/m"],
            Self::Linux | Self::MacOs => &[],
        }
    }

    /// `C:\<name>` on Windows, `~/<name>` elsewhere
    fn under_root(&self, name: &str) -> PathBuf {
        match self {
            // Path::join on a non-Windows host would use '/', keep the drive form intact
            Self::Windows => PathBuf::from(format!("C:\\{}", name)),
            Self::Linux | Self::MacOs => directories::BaseDirs::new()
                .map(|dirs| dirs.home_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
                .join(name),
        }
    }

    pub fn default_source(&self) -> PathBuf {
        self.under_root("o3de")
    }

    pub fn default_packages(&self) -> PathBuf {
        self.under_root("o3de-packages")
    }

    pub fn default_project(&self) -> PathBuf {
        self.under_root("my-o3de-project")
    }

    /// `<base>/build/<platform>`
    pub fn build_dir_under(&self, base: &Path) -> PathBuf {
        base.join("build").join(self.build_dir_name())
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "macos",
        };
        write!(f, "{}", name)
    }
}
