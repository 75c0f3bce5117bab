//! Static configuration: tool names, device identifiers and host paths.

use std::path::{Path, PathBuf};

/// Exact name of the internal keyboard as reported by the kernel and xinput.
pub const KEYBOARD_MARKER: &str = "AT Translated Set 2 keyboard";

/// Name Hyprland uses for the internal keyboard in `device:<name>:...` keywords.
pub const HYPRLAND_DEVICE: &str = "at-translated-set-2-keyboard";

pub const HYPRCTL: &str = "hyprctl";
pub const XINPUT: &str = "xinput";

/// Host layout the backends operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `/proc/bus/input/devices`
    pub devices_file: PathBuf,
    /// `/sys/bus/serio/drivers/atkbd`
    pub atkbd_driver_dir: PathBuf,
}

impl Config {
    pub fn new(proc_root: impl AsRef<Path>, sys_root: impl AsRef<Path>) -> Self {
        Self {
            devices_file: proc_root.as_ref().join("bus").join("input").join("devices"),
            atkbd_driver_dir: sys_root
                .as_ref()
                .join("bus")
                .join("serio")
                .join("drivers")
                .join("atkbd"),
        }
    }

    pub fn new_default() -> Self {
        Self::new("/proc", "/sys")
    }

    /// Directory that exists only while `serio` is bound to atkbd.
    pub fn serio_device_dir(&self, serio: &str) -> PathBuf {
        self.atkbd_driver_dir.join(serio)
    }

    pub fn unbind_file(&self) -> PathBuf {
        self.atkbd_driver_dir.join("unbind")
    }

    pub fn bind_file(&self) -> PathBuf {
        self.atkbd_driver_dir.join("bind")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new_default()
    }
}
