//! The command sequence a setup run would execute, for display without running it.

use crate::config::SetupConfig;
use crate::domain::{CommandSpec, Platform, SetupMode, SetupPaths, SetupStep};
use crate::services::{CmakeService, EngineScript, GitService};
use serde::Serialize;
use std::path::PathBuf;

/// One step and the external commands it issues
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStep {
    pub step: SetupStep,
    pub commands: Vec<CommandSpec>,
    /// Condition under which the step is skipped or what it does without a command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PlannedStep {
    fn new(step: SetupStep, commands: Vec<CommandSpec>) -> Self {
        Self {
            step,
            commands,
            note: None,
        }
    }

    fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedPaths {
    pub source: PathBuf,
    pub build: PathBuf,
    pub packages: PathBuf,
    pub project: PathBuf,
    pub project_name: String,
}

/// Tool checks that run before any prompt
#[derive(Debug, Clone, Serialize)]
pub struct PlannedPrerequisites {
    pub commands: Vec<CommandSpec>,
    pub note: String,
}

/// Ordered steps for one set of paths
#[derive(Debug, Clone, Serialize)]
pub struct SetupPlan {
    pub platform: Platform,
    pub fresh: bool,
    pub paths: PlannedPaths,
    pub prerequisites: PlannedPrerequisites,
    pub steps: Vec<PlannedStep>,
}

impl SetupPlan {
    /// Build the plan from the same command builders a run uses
    pub fn build(config: &SetupConfig, paths: &SetupPaths, mode: SetupMode) -> Self {
        let git = GitService::new(&config.git.program);
        let cmake = CmakeService::from_config(config);
        let script = EngineScript::new(paths);

        let prerequisites = PlannedPrerequisites {
            commands: vec![
                git.version_command(),
                git.lfs_version_command(),
                cmake.version_command(),
            ],
            note: format!(
                "`{}` runs if git lfs is missing; cmake must be {} or newer",
                git.lfs_install_command(),
                cmake.minimum_version()
            ),
        };

        let mut steps = Vec::new();

        if mode.deletes_existing() {
            steps.push(
                PlannedStep::new(SetupStep::RemoveExisting, Vec::new())
                    .note("each existing directory is deleted only after its own confirmation"),
            );
        }

        steps.push(
            PlannedStep::new(
                SetupStep::CloneRepository,
                vec![git.clone_command(&config.repository.url, &paths.source)],
            )
            .note(format!("skipped when {} exists", paths.source.display())),
        );

        if mode.verifies_clone() {
            steps.push(
                PlannedStep::new(
                    SetupStep::VerifyRepository,
                    vec![git.remote_url_command(&paths.source, &config.repository.remote)],
                )
                .note(format!("remote must match {}", config.repository.url)),
            );
        }

        if config.repository.fetch_large_files {
            steps.push(
                PlannedStep::new(
                    SetupStep::FetchLargeFiles,
                    vec![git.lfs_pull_command(&paths.source)],
                )
                .note("only after a new clone"),
            );
        }

        steps.extend([
            PlannedStep::new(SetupStep::CreatePackagesDirectory, Vec::new())
                .note(format!("creates {}", paths.packages.display())),
            PlannedStep::new(
                SetupStep::ConfigureEngine,
                vec![cmake.configure_engine_command(paths)],
            ),
            PlannedStep::new(SetupStep::RegisterEngine, vec![script.register_command()]),
            PlannedStep::new(
                SetupStep::CreateProject,
                vec![script.create_project_command()],
            ),
            PlannedStep::new(
                SetupStep::ConfigureProject,
                vec![cmake.configure_project_command(paths)],
            ),
            PlannedStep::new(
                SetupStep::BuildProject,
                vec![cmake.build_project_command(paths)],
            )
            .note("only when confirmed at the final prompt"),
        ]);

        Self {
            platform: paths.platform(),
            fresh: mode.deletes_existing(),
            paths: PlannedPaths {
                source: paths.source.clone(),
                build: paths.build.clone(),
                packages: paths.packages.clone(),
                project: paths.project.clone(),
                project_name: paths.project_name(),
            },
            prerequisites,
            steps,
        }
    }

    /// Human-readable listing, one numbered step per block
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Platform: {}\n", self.platform));
        out.push_str("\nPrerequisites\n");
        for command in &self.prerequisites.commands {
            out.push_str(&format!("   $ {}\n", command));
        }
        out.push_str(&format!("   ({})\n", self.prerequisites.note));
        for (index, planned) in self.steps.iter().enumerate() {
            out.push_str(&format!("\n{}. {}\n", index + 1, planned.step));
            for command in &planned.commands {
                out.push_str(&format!("   $ {}\n", command));
            }
            if let Some(note) = &planned.note {
                out.push_str(&format!("   ({})\n", note));
            }
        }
        out
    }
}
