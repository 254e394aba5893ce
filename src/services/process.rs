//! Process execution service for running external tools.
//!
//! Every command is launched and waited on before the caller continues.
//! Invocations and exit codes are traced and optionally appended to a run log.

use crate::domain::CommandSpec;
use crate::error::{AppError, Result, ToolError, ToolResult};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Something that can execute a [`CommandSpec`]
pub trait CommandRunner {
    /// Run with inherited stdio; a non-zero exit is an error
    fn run(&mut self, command: &CommandSpec) -> ToolResult<()>;

    /// Run with stdout captured and returned (trimmed); a non-zero exit is an error
    fn capture(&mut self, command: &CommandSpec) -> ToolResult<String>;
}

/// Runs commands as real child processes
#[derive(Debug, Default)]
pub struct SystemRunner {
    /// Log file path
    log_file: Option<PathBuf>,
    /// Set after the first failed log write, so the warning is not repeated
    log_failed: bool,
}

impl SystemRunner {
    /// Create a runner without a log file
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner that appends to a fresh log file in `log_dir`
    pub fn with_log_dir(log_dir: &Path) -> Result<Self> {
        if !log_dir.exists() {
            fs::create_dir_all(log_dir).map_err(AppError::Io)?;
        }

        let log_file = log_dir.join(format!("setup-{}.log", unix_timestamp()));
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_file)?;
        writeln!(file, "# o3de-setup run")?;
        writeln!(file, "# Started: {}", unix_timestamp())?;
        writeln!(file, "---")?;

        tracing::debug!("Writing run log to {:?}", log_file);
        Ok(Self {
            log_file: Some(log_file),
            log_failed: false,
        })
    }

    /// Get log file path
    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    fn append_log(&mut self, line: &str) {
        let Some(path) = &self.log_file else {
            return;
        };
        let written = OpenOptions::new()
            .append(true)
            .open(path)
            .and_then(|mut f| writeln!(f, "{}", line));
        if let Err(e) = written {
            if !self.log_failed {
                tracing::warn!("Failed to write run log {:?}: {}", path, e);
                self.log_failed = true;
            }
        }
    }

    fn build(command: &CommandSpec) -> Command {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn record_exit(&mut self, command: &CommandSpec, status: ExitStatus) -> ToolResult<()> {
        let code = status.code();
        self.append_log(&format!(
            "exit: {}",
            code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string())
        ));

        if status.success() {
            tracing::debug!(command = %command, "command succeeded");
            Ok(())
        } else {
            tracing::warn!(command = %command, ?code, "command failed");
            Err(ToolError::ExitStatus {
                command: command.to_string(),
                code,
            })
        }
    }
}

/// Distinguish a missing executable from other spawn failures
fn spawn_error(program: &str, err: io::Error) -> ToolError {
    if err.kind() == io::ErrorKind::NotFound {
        ToolError::NotFound(program.to_string())
    } else {
        ToolError::Spawn {
            program: program.to_string(),
            message: err.to_string(),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &CommandSpec) -> ToolResult<()> {
        tracing::info!(command = %command, cwd = ?command.cwd, "running");
        self.append_log(&format!("$ {}", command));

        let status = Self::build(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(&command.program, e))?;

        self.record_exit(command, status)
    }

    fn capture(&mut self, command: &CommandSpec) -> ToolResult<String> {
        tracing::debug!(command = %command, "capturing");
        self.append_log(&format!("$ {}", command));

        let output = Self::build(command)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&command.program, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                tracing::debug!(command = %command, stderr = %stderr.trim(), "stderr");
            }
        }
        self.record_exit(command, output.status)?;

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Seconds since the epoch, used to name log files
fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}", duration.as_secs())
}

#[cfg(test)]
pub(crate) mod scripted {
    //! A [`CommandRunner`] double that records calls and replays scripted results.

    use super::CommandRunner;
    use crate::domain::CommandSpec;
    use crate::error::{ToolError, ToolResult};
    use std::path::PathBuf;

    #[derive(Default)]
    pub(crate) struct ScriptedRunner {
        pub calls: Vec<CommandSpec>,
        failing: Vec<String>,
        missing: Vec<String>,
        outputs: Vec<(String, String)>,
        creates: Vec<(String, PathBuf)>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Commands whose rendering contains `pattern` exit with code 1
        pub fn fail_when(mut self, pattern: &str) -> Self {
            self.failing.push(pattern.to_string());
            self
        }

        /// Calls to `program` fail as if it were not installed
        pub fn missing(mut self, program: &str) -> Self {
            self.missing.push(program.to_string());
            self
        }

        /// Captured stdout for commands containing `pattern`
        pub fn output_for(mut self, pattern: &str, stdout: &str) -> Self {
            self.outputs.push((pattern.to_string(), stdout.to_string()));
            self
        }

        /// Create `dir` when a command containing `pattern` runs successfully
        pub fn creates_dir(mut self, pattern: &str, dir: PathBuf) -> Self {
            self.creates.push((pattern.to_string(), dir));
            self
        }

        pub fn rendered_calls(&self) -> Vec<String> {
            self.calls.iter().map(|c| c.to_string()).collect()
        }

        pub fn ran(&self, pattern: &str) -> bool {
            self.calls.iter().any(|c| c.to_string().contains(pattern))
        }

        fn execute(&mut self, command: &CommandSpec) -> ToolResult<()> {
            self.calls.push(command.clone());
            let rendered = command.to_string();

            if self.missing.iter().any(|p| *p == command.program) {
                return Err(ToolError::NotFound(command.program.clone()));
            }
            if self.failing.iter().any(|p| rendered.contains(p.as_str())) {
                return Err(ToolError::ExitStatus {
                    command: rendered,
                    code: Some(1),
                });
            }
            for (pattern, dir) in &self.creates {
                if rendered.contains(pattern.as_str()) {
                    std::fs::create_dir_all(dir).expect("create scripted dir");
                }
            }
            Ok(())
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&mut self, command: &CommandSpec) -> ToolResult<()> {
            self.execute(command)
        }

        fn capture(&mut self, command: &CommandSpec) -> ToolResult<String> {
            self.execute(command)?;
            let rendered = command.to_string();
            let stdout = self
                .outputs
                .iter()
                .find(|(pattern, _)| rendered.contains(pattern.as_str()))
                .map(|(_, out)| out.clone())
                .unwrap_or_else(|| format!("{} version 3.28.1", command.program));
            Ok(stdout)
        }
    }
}
