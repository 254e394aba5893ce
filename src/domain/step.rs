//! Setup steps, modes and run outcomes.

use serde::Serialize;

/// One stage of a setup run after the configuration is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    RemoveExisting,
    CloneRepository,
    VerifyRepository,
    FetchLargeFiles,
    CreatePackagesDirectory,
    ConfigureEngine,
    RegisterEngine,
    CreateProject,
    ConfigureProject,
    BuildProject,
}

impl SetupStep {
    /// Get the display name for this step
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::RemoveExisting => "Remove Existing Installations",
            Self::CloneRepository => "Clone Repository",
            Self::VerifyRepository => "Verify Repository",
            Self::FetchLargeFiles => "Fetch Large Files",
            Self::CreatePackagesDirectory => "Create Packages Directory",
            Self::ConfigureEngine => "Configure Engine",
            Self::RegisterEngine => "Register Engine",
            Self::CreateProject => "Create Project",
            Self::ConfigureProject => "Configure Project",
            Self::BuildProject => "Build Project",
        }
    }
}

impl std::fmt::Display for SetupStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How much of an existing installation a run is allowed to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupMode {
    /// Reuse whatever already exists
    #[default]
    Standard,
    /// Offer to delete existing directories, then verify the new clone
    Fresh,
}

impl SetupMode {
    pub fn deletes_existing(&self) -> bool {
        matches!(self, Self::Fresh)
    }

    pub fn verifies_clone(&self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// How a setup run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    Completed,
    /// The user declined the configuration summary
    Cancelled,
    PrerequisitesMissing,
    Failed(SetupStep),
}

impl SetupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
