use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::errors::TacoError;
use crate::strings::quote_if_needed;

/// Builder for constructing and executing external processes.
///
/// Every execution is logged at debug level with its rendered command line.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The command line as it would be typed in a shell.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_if_needed)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command and return its output, whatever the exit status.
    pub fn exec(&self) -> Result<Output, TacoError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        tracing::debug!("Running `{}`", self.display());
        let output = cmd.output().map_err(TacoError::from)?;
        tracing::debug!("`{}` exited with {}", self.program, output.status);
        Ok(output)
    }

    /// Execute the command, failing with [`TacoError::CommandFailed`] on a
    /// non-zero exit status.
    pub fn exec_checked(&self) -> Result<Output, TacoError> {
        let output = self.exec()?;
        if !output.status.success() {
            return Err(TacoError::CommandFailed {
                command: self.display(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}
