//! External tool invocation.
//!
//! Every pipeline stage boils down to "run one program, wait for it, fail
//! if it failed". [`ExternalTool`] wraps [`std::process::Command`] with the
//! three policies all stages share:
//!
//! * environment overrides are scoped to the child — the parent process
//!   environment is never mutated;
//! * the child runs inside the per-run working directory, so tools that
//!   drop fixed-named files into their cwd cannot collide across runs;
//! * stdout is streamed or suppressed as a whole (nothing is captured),
//!   while stderr always streams so failures stay diagnosable.

use crate::error::Hdf2TifError;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// One external tool invocation, waited on to completion.
#[derive(Debug)]
pub struct ExternalTool {
    program: PathBuf,
    args: Vec<OsString>,
    envs: Vec<(String, String)>,
    cwd: Option<PathBuf>,
    verbose: bool,
}

impl ExternalTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
            verbose: true,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Environment overrides for the child only.
    pub fn envs(mut self, envs: &[(String, String)]) -> Self {
        self.envs.extend_from_slice(envs);
        self
    }

    /// Working directory for the child.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Stream (true) or suppress (false) the child's stdout.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Short name used in error messages and logs.
    fn name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Spawn the tool and wait for it to exit.
    ///
    /// A launch failure and a non-zero exit are both fatal; neither is
    /// retried.
    pub fn run(self) -> Result<(), Hdf2TifError> {
        let name = self.name();
        debug!(tool = %name, args = ?self.args, cwd = ?self.cwd, "invoking external tool");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        cmd.stdout(if self.verbose {
            Stdio::inherit()
        } else {
            Stdio::null()
        });

        let status = cmd
            .status()
            .map_err(|e| Hdf2TifError::ToolLaunchFailed {
                tool: name.clone(),
                source: e,
            })?;

        if status.success() {
            debug!(tool = %name, "external tool finished");
            Ok(())
        } else {
            Err(Hdf2TifError::ToolFailed { tool: name, status })
        }
    }
}
