//! Recording [`System`] for tests. File operations hit the real filesystem
//! (point the config at a temp dir); privilege and tools are scripted.

use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{System, ToolOutput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Probe(String),
    Run(String),
    Read(PathBuf),
    Exists(PathBuf),
    Write(PathBuf, String),
}

#[derive(Debug, Default)]
pub struct FakeSystem {
    pub root: bool,
    tools: HashSet<String>,
    responses: HashMap<String, ToolOutput>,
    calls: RefCell<Vec<Call>>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_root(mut self) -> Self {
        self.root = true;
        self
    }

    pub fn with_tool(mut self, tool: &str) -> Self {
        self.tools.insert(tool.to_string());
        self
    }

    /// Script the output of `command_line` (program and args joined by spaces).
    pub fn respond(mut self, command_line: &str, output: ToolOutput) -> Self {
        self.responses.insert(command_line.to_string(), output);
        self
    }

    pub fn respond_ok(self, command_line: &str, stdout: &str) -> Self {
        self.respond(
            command_line,
            ToolOutput {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn runs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Run(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Write(path, contents) => Some((path, contents)),
                _ => None,
            })
            .collect()
    }

    pub fn fs_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Read(_) | Call::Exists(_) | Call::Write(..)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl System for FakeSystem {
    fn is_root(&self) -> bool {
        self.root
    }

    fn tool_available(&self, tool: &str) -> bool {
        self.record(Call::Probe(tool.to_string()));
        self.tools.contains(tool)
    }

    fn run_tool(&self, program: &str, args: &[&str]) -> Result<ToolOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.record(Call::Run(line.clone()));

        if !self.tools.contains(program) {
            return Err(anyhow!("Failed to execute {program}"));
        }
        Ok(self.responses.get(&line).cloned().unwrap_or(ToolOutput {
            success: true,
            ..ToolOutput::default()
        }))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.record(Call::Read(path.to_path_buf()));
        Ok(fs::read_to_string(path)?)
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.record(Call::Exists(path.to_path_buf()));
        path.exists()
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        self.record(Call::Write(path.to_path_buf(), contents.to_string()));
        let mut f = OpenOptions::new().write(true).open(path)?;
        f.write_all(contents.as_bytes())?;
        Ok(())
    }
}
