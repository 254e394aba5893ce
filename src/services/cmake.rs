//! CMake service: engine and project build trees.

use super::CommandRunner;
use crate::config::SetupConfig;
use crate::domain::{CommandSpec, SetupPaths, ToolVersion};
use crate::error::{ToolError, ToolResult};

/// Builds and runs `cmake` invocations for the engine and the new project
#[derive(Debug, Clone)]
pub struct CmakeService {
    program: String,
    generator: String,
    minimum_version: ToolVersion,
    build_config: String,
    third_party_define: String,
    native_build_args: Vec<String>,
}

impl CmakeService {
    /// Create a new CmakeService from the `cmake` section and resolved generator
    pub fn from_config(config: &SetupConfig) -> Self {
        let platform = config.platform();
        Self {
            program: config.cmake.program.clone(),
            generator: config.generator(),
            // validated on load; 3.24 is the engine's floor
            minimum_version: ToolVersion::parse(&config.cmake.minimum_version)
                .unwrap_or_else(|| ToolVersion::new(3, 24, 0)),
            build_config: config.cmake.build_config.clone(),
            third_party_define: config.cmake.third_party_define.clone(),
            native_build_args: platform
                .native_build_args()
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }

    /// Get the oldest accepted CMake version
    pub fn minimum_version(&self) -> ToolVersion {
        self.minimum_version
    }

    /// Get the configuration name passed to `--config`
    pub fn build_config(&self) -> &str {
        &self.build_config
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.program)
    }

    /// Build `cmake --version`
    pub fn version_command(&self) -> CommandSpec {
        self.command().arg("--version")
    }

    /// Configure the engine build tree, pointing it at the package cache
    pub fn configure_engine_command(&self, paths: &SetupPaths) -> CommandSpec {
        self.command()
            .arg("-B")
            .path_arg(&paths.build)
            .arg("-S")
            .path_arg(&paths.source)
            .arg("-G")
            .arg(&self.generator)
            .arg(format!(
                "-D{}={}",
                self.third_party_define,
                paths.packages.display()
            ))
    }

    /// Configure the project build tree under `<project>/build/<platform>`
    pub fn configure_project_command(&self, paths: &SetupPaths) -> CommandSpec {
        self.command()
            .arg("-B")
            .path_arg(&paths.project_build())
            .arg("-S")
            .path_arg(&paths.project)
            .arg("-G")
            .arg(&self.generator)
    }

    /// Compile the game launcher and the editor
    pub fn build_project_command(&self, paths: &SetupPaths) -> CommandSpec {
        let mut cmd = self
            .command()
            .arg("--build")
            .path_arg(&paths.project_build())
            .arg("--target")
            .arg(format!("{}.GameLauncher", paths.project_name()))
            .arg("Editor")
            .arg("--config")
            .arg(&self.build_config);
        if !self.native_build_args.is_empty() {
            cmd = cmd.arg("--").args(self.native_build_args.iter().cloned());
        }
        cmd
    }

    /// Find the installed version and check it against the minimum
    pub fn check_version(&self, runner: &mut dyn CommandRunner) -> ToolResult<ToolVersion> {
        let output = runner.capture(&self.version_command())?;
        let first_line = output.lines().next().unwrap_or_default();
        let found = ToolVersion::parse(first_line)
            .ok_or_else(|| ToolError::VersionParse(first_line.to_string()))?;

        if found < self.minimum_version {
            return Err(ToolError::VersionTooOld {
                tool: "CMake".to_string(),
                found: found.to_string(),
                required: self.minimum_version.to_string(),
            });
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Platform;
    use crate::services::process::scripted::ScriptedRunner;
    use std::path::PathBuf;

    fn windows_service() -> CmakeService {
        let config = SetupConfig {
            platform: Some(Platform::Windows),
            ..SetupConfig::default()
        };
        CmakeService::from_config(&config)
    }

    fn paths(platform: Platform) -> SetupPaths {
        SetupPaths::new(
            platform,
            PathBuf::from("/o3de"),
            PathBuf::from("/o3de/build"),
            PathBuf::from("/pkgs"),
            PathBuf::from("/projects/Garden"),
        )
    }

    #[test]
    fn test_configure_engine_command() {
        let cmd = windows_service().configure_engine_command(&paths(Platform::Windows));
        insta::assert_snapshot!(
            cmd.to_string(),
            @r#"cmake -B /o3de/build -S /o3de -G "Visual Studio 16" -DLY_3RDPARTY_PATH=/pkgs"#
        );
    }

    #[test]
    fn test_build_project_command_windows() {
        let cmd = windows_service().build_project_command(&paths(Platform::Windows));
        assert_eq!(
            cmd.args,
            vec![
                "--build",
                "/projects/Garden/build/windows",
                "--target",
                "Garden.GameLauncher",
                "Editor",
                "--config",
                "profile",
                "--",
                "/m",
            ]
        );
    }

    #[test]
    fn test_build_project_command_linux_has_no_native_args() {
        let config = SetupConfig {
            platform: Some(Platform::Linux),
            ..SetupConfig::default()
        };
        let cmd = CmakeService::from_config(&config).build_project_command(&paths(Platform::Linux));
        assert!(!cmd.has_arg("--"));
        assert_eq!(cmd.args.last().map(String::as_str), Some("profile"));
    }

    #[test]
    fn test_check_version() {
        let cmake = windows_service();

        let mut runner = ScriptedRunner::new().output_for("--version", "cmake version 3.28.1\n\nCMake suite");
        assert_eq!(
            cmake.check_version(&mut runner).unwrap(),
            ToolVersion::new(3, 28, 1)
        );

        let mut runner = ScriptedRunner::new().output_for("--version", "cmake version 3.20.0");
        assert!(matches!(
            cmake.check_version(&mut runner),
            Err(ToolError::VersionTooOld { .. })
        ));

        let mut runner = ScriptedRunner::new().output_for("--version", "garbage");
        assert!(matches!(
            cmake.check_version(&mut runner),
            Err(ToolError::VersionParse(_))
        ));

        let mut runner = ScriptedRunner::new().missing("cmake");
        assert!(matches!(
            cmake.check_version(&mut runner),
            Err(ToolError::NotFound(_))
        ));
    }
}
