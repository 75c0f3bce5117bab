//! Host operations
//!
//! Everything that touches the running system (privilege, external tools,
//! procfs/sysfs) goes through [`System`], so the backends can be driven
//! against a recording fake in tests.

#[cfg(test)]
pub mod fake;

use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Captured result of running an external tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Turn a non-zero exit into an error carrying the tool's diagnostics.
    pub fn check(self, program: &str) -> Result<ToolOutput> {
        if self.success {
            return Ok(self);
        }
        let detail = if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        };
        Err(anyhow!("{program} failed: {detail}"))
    }
}

pub trait System {
    /// Effective user is root
    fn is_root(&self) -> bool;

    /// Whether `tool` can be found on PATH
    fn tool_available(&self, tool: &str) -> bool;

    /// Run `program args...` to completion, capturing its output
    fn run_tool(&self, program: &str, args: &[&str]) -> Result<ToolOutput>;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    fn path_exists(&self, path: &Path) -> bool;

    /// Write `contents` to an existing file (sysfs control files cannot be created)
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;
}

/// The real machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSystem;

impl System for HostSystem {
    fn is_root(&self) -> bool {
        nix::unistd::geteuid().is_root()
    }

    fn tool_available(&self, tool: &str) -> bool {
        let found = Command::new("which")
            .arg(tool)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        debug!("tool '{}' available: {}", tool, found);
        found
    }

    fn run_tool(&self, program: &str, args: &[&str]) -> Result<ToolOutput> {
        debug!("running {} {:?}", program, args);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("Failed to execute {program}"))?;

        Ok(ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        debug!("writing '{}' to {}", contents, path.display());
        let mut f = OpenOptions::new()
            .write(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        f.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
