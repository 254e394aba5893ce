//! Setup run: prompts, optional clean-up, then the external tool steps in order.

use crate::config::SetupConfig;
use crate::domain::{
    absolute_from, CommandSpec, PathDefaults, SetupMode, SetupOutcome, SetupPaths, SetupStep,
};
use crate::error::{AppError, Result, ToolError};
use crate::services::{CmakeService, CommandRunner, EngineScript, GitService, Prompter};
use crate::ui::Console;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Drives one interactive setup run
pub struct SetupApp<R, P, W> {
    config: SetupConfig,
    mode: SetupMode,
    runner: R,
    prompter: P,
    console: Console<W>,
    git: GitService,
    cmake: CmakeService,
    /// Set when this run cloned the source (rather than reusing it)
    cloned: bool,
    /// Base for relative answers; the process working directory when unset
    working_dir: Option<PathBuf>,
    /// Never offered for deletion
    home_dir: Option<PathBuf>,
}

impl<R, P, W> SetupApp<R, P, W>
where
    R: CommandRunner,
    P: Prompter,
    W: Write,
{
    pub fn new(
        config: SetupConfig,
        mode: SetupMode,
        runner: R,
        prompter: P,
        console: Console<W>,
    ) -> Self {
        let git = GitService::new(&config.git.program);
        let cmake = CmakeService::from_config(&config);
        Self {
            config,
            mode,
            runner,
            prompter,
            console,
            git,
            cmake,
            cloned: false,
            working_dir: None,
            home_dir: directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
        }
    }

    /// Resolve relative answers against `dir` instead of the process working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Use `dir` as the home directory a fresh run refuses to delete
    pub fn with_home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn console(&self) -> &Console<W> {
        &self.console
    }

    /// Run every step; stops at the first failure
    pub fn run(&mut self) -> Result<SetupOutcome> {
        tracing::info!(mode = ?self.mode, platform = %self.config.platform(), "starting setup");
        self.console.banner("O3DE Setup Automation Script")?;

        match self.check_prerequisites() {
            Ok(()) => {}
            Err(AppError::PrerequisitesMissing) => {
                self.console.blank()?;
                self.console
                    .failure("Prerequisites not met. Please install missing tools and try again.")?;
                return Ok(SetupOutcome::PrerequisitesMissing);
            }
            Err(err) => return Err(err),
        }

        let Some(paths) = self.collect_paths()? else {
            self.console.blank()?;
            self.console.failure("Setup cancelled by user.")?;
            return Ok(SetupOutcome::Cancelled);
        };

        for step in self.steps() {
            if let Err(err) = self.execute(step, &paths) {
                return self.report_failure(step, &err);
            }
        }

        self.console.blank()?;
        self.console.rule()?;
        if self
            .prompter
            .confirm("Build the project now? (This takes 30+ minutes)")?
        {
            if let Err(err) = self.execute(SetupStep::BuildProject, &paths) {
                return self.report_failure(SetupStep::BuildProject, &err);
            }
        } else {
            self.console.blank()?;
            self.console.line("Skipping build. You can build later with:")?;
            let later = self.cmake.build_project_command(&paths);
            self.console.line(&later.to_string())?;
        }

        self.console.banner("Setup Complete!")?;
        self.console.blank()?;
        self.console.line(&format!(
            "Your O3DE project is ready at: {}",
            paths.project.display()
        ))?;
        tracing::info!("setup complete");
        Ok(SetupOutcome::Completed)
    }

    /// Steps that follow the confirmed configuration, in order
    fn steps(&self) -> Vec<SetupStep> {
        let mut steps = Vec::new();
        if self.mode.deletes_existing() {
            steps.push(SetupStep::RemoveExisting);
        }
        steps.push(SetupStep::CloneRepository);
        if self.mode.verifies_clone() {
            steps.push(SetupStep::VerifyRepository);
        }
        if self.config.repository.fetch_large_files {
            steps.push(SetupStep::FetchLargeFiles);
        }
        steps.extend([
            SetupStep::CreatePackagesDirectory,
            SetupStep::ConfigureEngine,
            SetupStep::RegisterEngine,
            SetupStep::CreateProject,
            SetupStep::ConfigureProject,
        ]);
        steps
    }

    fn execute(&mut self, step: SetupStep, paths: &SetupPaths) -> Result<()> {
        tracing::debug!(%step, "step starting");
        match step {
            SetupStep::RemoveExisting => self.remove_existing(paths),
            SetupStep::CloneRepository => self.clone_repository(paths),
            SetupStep::VerifyRepository => self.verify_repository(paths),
            SetupStep::FetchLargeFiles => self.fetch_large_files(paths),
            SetupStep::CreatePackagesDirectory => self.create_packages_dir(paths),
            SetupStep::ConfigureEngine => self.configure_engine(paths),
            SetupStep::RegisterEngine => self.register_engine(paths),
            SetupStep::CreateProject => self.create_project(paths),
            SetupStep::ConfigureProject => self.configure_project(paths),
            SetupStep::BuildProject => self.build_project(paths),
        }
    }

    fn report_failure(&mut self, step: SetupStep, err: &AppError) -> Result<SetupOutcome> {
        tracing::error!(%step, error = %err, "step failed");
        self.console.blank()?;
        self.console.failure(&format!("{} failed: {}", step, err))?;
        self.console.blank()?;
        self.console
            .line(&format!("✗✗✗ Setup failed at step: {} ✗✗✗", step))?;
        Ok(SetupOutcome::Failed(step))
    }

    /// Check git, git-lfs and cmake; installs the LFS hooks if they are missing
    fn check_prerequisites(&mut self) -> Result<()> {
        self.console.heading("Checking Prerequisites...")?;

        match self.git.version(&mut self.runner) {
            Ok(version) => self.console.success(&format!("Git found: {}", version))?,
            Err(err) => {
                tracing::warn!(error = %err, "git unavailable");
                self.console
                    .failure("Git not found! Please install Git first.")?;
                return Err(AppError::PrerequisitesMissing);
            }
        }

        match self.git.lfs_version(&mut self.runner) {
            Ok(version) => self
                .console
                .success(&format!("Git LFS found: {}", version))?,
            Err(err) => {
                tracing::warn!(error = %err, "git lfs unavailable");
                self.console
                    .failure("Git LFS not found! Installing Git LFS hooks...")?;
                if let Err(err) = self.git.lfs_install(&mut self.runner) {
                    tracing::warn!(error = %err, "git lfs install failed");
                    self.console.failure(
                        "Failed to install Git LFS. Please install manually from https://git-lfs.github.com/",
                    )?;
                    return Err(AppError::PrerequisitesMissing);
                }
                self.console.success("Git LFS installed")?;
            }
        }

        let minimum = self.cmake.minimum_version();
        match self.cmake.check_version(&mut self.runner) {
            Ok(version) => self
                .console
                .success(&format!("CMake found: cmake version {}", version))?,
            Err(ToolError::VersionTooOld { found, .. }) => {
                self.console.failure(&format!(
                    "CMake {} is too old! Please install CMake {}+ from https://cmake.org/download/",
                    found, minimum
                ))?;
                return Err(AppError::PrerequisitesMissing);
            }
            Err(err) => {
                tracing::warn!(error = %err, "cmake unavailable");
                self.console.failure(&format!(
                    "CMake not found! Please install CMake {}+ from https://cmake.org/download/",
                    minimum
                ))?;
                return Err(AppError::PrerequisitesMissing);
            }
        }

        self.console.blank()?;
        self.console.success("All prerequisites met!")?;
        Ok(())
    }

    /// Ask for the four paths, show the summary and confirm
    fn collect_paths(&mut self) -> Result<Option<SetupPaths>> {
        self.console.heading("Configuration Setup")?;

        let platform = self.config.platform();
        let defaults = PathDefaults::resolve(&self.config);
        let base = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let source = self.prompter.ask_path("O3DE source path", &defaults.source)?;
        let source = absolute_from(&base, &source);
        let build = self
            .prompter
            .ask_path("Build path", &platform.build_dir_under(&source))?;
        let packages = self
            .prompter
            .ask_path("3rd party packages path", &defaults.packages)?;
        let project = self
            .prompter
            .ask_path("New project path", &defaults.project)?;

        let paths = SetupPaths::new(
            platform,
            source,
            absolute_from(&base, &build),
            absolute_from(&base, &packages),
            absolute_from(&base, &project),
        );

        self.console.heading("Configuration Summary:")?;
        for line in paths.summary() {
            self.console.line(&line)?;
        }
        self.console.rule()?;
        self.console.blank()?;

        if self.prompter.confirm("Proceed with these settings?")? {
            Ok(Some(paths))
        } else {
            Ok(None)
        }
    }

    /// Offer each existing directory for deletion, one confirmation per directory
    fn remove_existing(&mut self, paths: &SetupPaths) -> Result<()> {
        self.console.heading("Removing Existing Installations...")?;

        if paths.existing_installations().is_empty() {
            self.console.success("No existing installations found")?;
            return Ok(());
        }

        for (label, path) in paths.installations() {
            // the build tree may have gone with the source tree
            if !path.exists() {
                continue;
            }
            ensure_safe_to_delete(path, self.home_dir.as_deref())?;

            let question = format!("Delete existing {} at {}?", label, path.display());
            if self.prompter.confirm(&question)? {
                tracing::info!(?path, "removing");
                if path.is_dir() {
                    fs::remove_dir_all(path)?;
                } else {
                    fs::remove_file(path)?;
                }
                self.console
                    .success(&format!("Removed {}", path.display()))?;
            } else {
                self.console
                    .warning(&format!("Keeping {}", path.display()))?;
            }
        }
        Ok(())
    }

    fn clone_repository(&mut self, paths: &SetupPaths) -> Result<()> {
        if paths.source.exists() {
            self.console.blank()?;
            self.console.success(&format!(
                "O3DE source already exists at {}",
                paths.source.display()
            ))?;
            return Ok(());
        }

        self.console.heading("Cloning O3DE Repository...")?;
        self.console
            .line("This may take a while due to large files...")?;
        self.git
            .clone_repository(&mut self.runner, &self.config.repository.url, &paths.source)?;
        self.cloned = true;
        self.console.success("Repository cloned successfully!")?;
        Ok(())
    }

    fn verify_repository(&mut self, paths: &SetupPaths) -> Result<()> {
        self.console.heading("Verifying Repository...")?;
        self.git.verify_repository(
            &mut self.runner,
            &paths.source,
            &self.config.repository.remote,
            &self.config.repository.url,
        )?;
        self.console.success(&format!(
            "Repository at {} tracks {}",
            paths.source.display(),
            self.config.repository.url
        ))?;
        Ok(())
    }

    fn fetch_large_files(&mut self, paths: &SetupPaths) -> Result<()> {
        if !self.cloned {
            tracing::debug!("source was reused, not fetching large files");
            return Ok(());
        }

        self.console.heading("Fetching Large Files...")?;
        self.git.fetch_large_files(&mut self.runner, &paths.source)?;
        self.console.success("Large files fetched!")?;
        Ok(())
    }

    fn create_packages_dir(&mut self, paths: &SetupPaths) -> Result<()> {
        if !paths.packages.exists() {
            self.console.blank()?;
            self.console.line(&format!(
                "Creating packages directory: {}",
                paths.packages.display()
            ))?;
            fs::create_dir_all(&paths.packages)?;
        }
        self.console.success(&format!(
            "Packages directory ready: {}",
            paths.packages.display()
        ))?;
        Ok(())
    }

    fn configure_engine(&mut self, paths: &SetupPaths) -> Result<()> {
        self.console.heading("Configuring Engine with CMake...")?;
        self.console
            .line("This will download and configure third-party dependencies...")?;

        fs::create_dir_all(&paths.build)?;
        let command = self.cmake.configure_engine_command(paths);
        self.run_announced(&command)?;

        self.console.blank()?;
        self.console.success("Engine configured successfully!")?;
        Ok(())
    }

    fn register_engine(&mut self, paths: &SetupPaths) -> Result<()> {
        self.console.heading("Registering Engine...")?;
        let command = EngineScript::new(paths).register_command();
        self.runner.run(&command)?;
        self.console.success("Engine registered successfully!")?;
        Ok(())
    }

    fn create_project(&mut self, paths: &SetupPaths) -> Result<()> {
        self.console.heading("Creating New Project...")?;
        let command = EngineScript::new(paths).create_project_command();
        self.runner.run(&command)?;
        self.console
            .success(&format!("Project created: {}", paths.project_name()))?;
        Ok(())
    }

    fn configure_project(&mut self, paths: &SetupPaths) -> Result<()> {
        self.console.heading("Configuring Project...")?;

        fs::create_dir_all(paths.project_build())?;
        let command = self.cmake.configure_project_command(paths);
        self.run_announced(&command)?;

        self.console.blank()?;
        self.console.success("Project configured successfully!")?;
        Ok(())
    }

    fn build_project(&mut self, paths: &SetupPaths) -> Result<()> {
        self.console
            .heading("Building Project (This will take a while)...")?;

        let command = self.cmake.build_project_command(paths);
        self.console.blank()?;
        self.console.line(&format!("Running: {}", command))?;
        self.console.blank()?;
        self.console
            .line("Go grab a coffee, this will take 30+ minutes...")?;
        self.console.blank()?;
        self.runner.run(&command)?;

        self.console.blank()?;
        self.console.success("Project built successfully!")?;
        self.console.blank()?;
        self.console.line(&format!(
            "Binaries location: {}",
            paths.binaries_dir(self.cmake.build_config()).display()
        ))?;
        Ok(())
    }

    /// Print the command line, then run it
    fn run_announced(&mut self, command: &CommandSpec) -> Result<()> {
        self.console.blank()?;
        self.console.line(&format!("Running: {}", command))?;
        self.console.blank()?;
        self.runner.run(command)?;
        Ok(())
    }
}

/// Refuse filesystem roots and the home directory
fn ensure_safe_to_delete(path: &Path, home: Option<&Path>) -> Result<()> {
    let is_root = path.parent().is_none();
    let is_home = home.is_some_and(|home| home == path);
    if is_root || is_home {
        return Err(AppError::UnsafeDelete(path.to_path_buf()));
    }
    Ok(())
}
