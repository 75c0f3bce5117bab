//! Read-only check of whether the current session's backend can see the
//! internal keyboard. Never changes device state.

use tracing::info;

use crate::config::{Config, HYPRCTL, HYPRLAND_DEVICE, KEYBOARD_MARKER};
use crate::env::{BackendKind, EnvSignature};
use crate::locate;
use crate::platform::System;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Success,
    Failure,
    /// Wayland desktop without a handler
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub verdict: Verdict,
    pub lines: Vec<String>,
}

impl Diagnosis {
    fn new(signature: &EnvSignature) -> Self {
        Self {
            verdict: Verdict::Failure,
            lines: vec![
                "--- Diagnostic Check ---".to_string(),
                format!("Detected Session: {}", signature.session_type),
                format!("Detected Desktop: {}", signature.desktop),
            ],
        }
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn finish(mut self, verdict: Verdict, line: impl Into<String>) -> Self {
        self.line(line);
        self.verdict = verdict;
        self
    }
}

pub fn diagnose(sys: &dyn System, config: &Config, signature: &EnvSignature) -> Diagnosis {
    let report = Diagnosis::new(signature);
    let kind = signature.classify();
    info!("Diagnosing backend: {}", kind);

    let mut report = match kind {
        BackendKind::CompositorIpc => check_hyprland(sys, report),
        BackendKind::DriverRebind => check_devices_file(sys, config, report),
        BackendKind::DeviceManager => check_xinput(sys, report),
        BackendKind::Unhandled { desktop } => report.finish(
            Verdict::Unsupported,
            format!("WARNING: Unknown Wayland compositor: {desktop}"),
        ),
    };
    report.line("------------------------");
    report
}

fn check_hyprland(sys: &dyn System, mut report: Diagnosis) -> Diagnosis {
    if !sys.tool_available(HYPRCTL) {
        return report.finish(Verdict::Failure, format!("FAILURE: '{HYPRCTL}' command not found."));
    }

    report.line("Checking Hyprland devices...");
    match sys.run_tool(HYPRCTL, &["devices"]).and_then(|o| o.check(HYPRCTL)) {
        Ok(output) if output.stdout.contains(HYPRLAND_DEVICE) => report.finish(
            Verdict::Success,
            format!("SUCCESS: '{HYPRLAND_DEVICE}' found in Hyprland."),
        ),
        Ok(_) => report.finish(
            Verdict::Failure,
            format!("FAILURE: '{HYPRLAND_DEVICE}' NOT found. Check 'hyprctl devices'."),
        ),
        Err(e) => report.finish(Verdict::Failure, format!("Error: {e:#}")),
    }
}

fn check_devices_file(sys: &dyn System, config: &Config, mut report: Diagnosis) -> Diagnosis {
    let path = config.devices_file.display().to_string();
    report.line(format!("Checking {path} for GNOME..."));

    let contents = match sys.read_to_string(&config.devices_file) {
        Ok(contents) => contents,
        Err(e) => return report.finish(Verdict::Failure, format!("Error reading system files: {e:#}")),
    };

    if !contents.contains(KEYBOARD_MARKER) {
        return report.finish(
            Verdict::Failure,
            format!("FAILURE: Internal keyboard string not found in {path}."),
        );
    }

    report.line("SUCCESS: Internal keyboard detected in system files.");
    if !sys.is_root() {
        report.line("NOTE: You are not root. Disabling will fail unless you run with sudo.");
    }
    report.verdict = Verdict::Success;
    report
}

fn check_xinput(sys: &dyn System, mut report: Diagnosis) -> Diagnosis {
    report.line("Checking X11 devices...");
    match locate::find_xinput_id(sys) {
        Ok(Some(id)) => report.finish(Verdict::Success, format!("SUCCESS: Found X11 device ID: {id}")),
        Ok(None) => report.finish(Verdict::Failure, "FAILURE: X11 device not found."),
        Err(e) => {
            report.line(format!("Error: {e}"));
            report.finish(Verdict::Failure, "FAILURE: X11 device not found.")
        }
    }
}
