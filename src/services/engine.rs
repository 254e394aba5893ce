//! The engine's bundled utility script (`scripts/o3de.bat` / `scripts/o3de.sh`).

use crate::domain::{CommandSpec, SetupPaths};

/// Command builders for the engine script; every call runs from the source root
#[derive(Debug, Clone)]
pub struct EngineScript<'a> {
    paths: &'a SetupPaths,
}

impl<'a> EngineScript<'a> {
    /// Create builders for the script under `paths.source`
    pub fn new(paths: &'a SetupPaths) -> Self {
        Self { paths }
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(self.paths.engine_script().display().to_string())
            .current_dir(&self.paths.source)
    }

    /// Register the source tree as an engine in the user's manifest
    pub fn register_command(&self) -> CommandSpec {
        self.command().args(["register", "--this-engine"])
    }

    /// Scaffold the new project from the default template
    pub fn create_project_command(&self) -> CommandSpec {
        self.command()
            .arg("create-project")
            .arg("--project-path")
            .path_arg(&self.paths.project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Platform;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_commands_run_from_source() {
        let paths = SetupPaths::new(
            Platform::Linux,
            PathBuf::from("/o3de"),
            PathBuf::from("/o3de/build/linux"),
            PathBuf::from("/pkgs"),
            PathBuf::from("/projects/Garden"),
        );
        let script = EngineScript::new(&paths);

        let register = script.register_command();
        assert_eq!(register.program, "/o3de/scripts/o3de.sh");
        assert_eq!(register.args, vec!["register", "--this-engine"]);
        assert_eq!(register.cwd.as_deref(), Some(Path::new("/o3de")));

        let create = script.create_project_command();
        assert_eq!(
            create.to_string(),
            "/o3de/scripts/o3de.sh create-project --project-path /projects/Garden"
        );
    }
}
