//! Operating system probes used by color detection.
//!
//! These are the only places the detector touches the OS beyond environment
//! variables: the kernel version file (for WSL), the Windows build number,
//! and whether stdout is a terminal.
//!
//! ## Examples
//!
//! ```
//! use biscuit_color::discovery::os_detection::{is_wsl_kernel, current_shell};
//!
//! assert!(is_wsl_kernel("Linux version 5.15.90.1-microsoft-standard-WSL2"));
//! assert!(!is_wsl_kernel("Linux version 6.8.0-45-generic"));
//!
//! if let Some(shell) = current_shell(true) {
//!     println!("shell: {shell}");
//! }
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The pseudo-file holding the running kernel's version banner.
pub const KERNEL_VERSION_PATH: &str = "/proc/version";

/// Marker present in the kernel banner of both WSL1 and WSL2.
const WSL_KERNEL_MARKER: &str = "microsoft";

/// Read the kernel version banner from `path`.
///
/// Returns `None` when the file is missing or unreadable (every non-Linux
/// system, and sandboxes without `/proc`).
pub fn read_kernel_version<P: AsRef<Path>>(path: P) -> Option<String> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Kernel version file not readable");
            None
        }
    }
}

/// Whether a kernel version banner belongs to a WSL kernel.
pub fn is_wsl_kernel(kernel_version: &str) -> bool {
    kernel_version.to_lowercase().contains(WSL_KERNEL_MARKER)
}

/// Version details of the running Windows installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsVersion {
    /// Major version (10 for both Windows 10 and 11)
    pub major: u32,
    /// OS build number (e.g. 19045, 22631)
    pub build: u32,
}

/// Query the Windows version via `RtlGetVersion`.
///
/// Unlike `GetVersionEx`, this is not subject to manifest-based version lies.
#[cfg(windows)]
pub fn windows_version() -> Option<WindowsVersion> {
    use windows_sys::Wdk::System::SystemServices::RtlGetVersion;
    use windows_sys::Win32::System::SystemInformation::OSVERSIONINFOW;

    let mut info: OSVERSIONINFOW = unsafe { std::mem::zeroed() };
    info.dwOSVersionInfoSize = std::mem::size_of::<OSVERSIONINFOW>() as u32;

    let status = unsafe { RtlGetVersion(&mut info) };
    if status != 0 {
        tracing::debug!(status, "RtlGetVersion failed");
        return None;
    }

    Some(WindowsVersion {
        major: info.dwMajorVersion,
        build: info.dwBuildNumber,
    })
}

/// Always `None` off Windows.
#[cfg(not(windows))]
pub fn windows_version() -> Option<WindowsVersion> {
    None
}

/// Whether stdout is attached to a terminal.
pub fn is_tty() -> bool {
    use std::io::IsTerminal;

    std::io::stdout().is_terminal()
}

/// The user's current shell, from `SHELL` (or `ComSpec` on Windows).
///
/// With `only_name` the directory part (and a trailing `.exe`) is removed,
/// so `/bin/zsh` becomes `zsh` and `C:\Windows\system32\cmd.exe` becomes `cmd`.
pub fn current_shell(only_name: bool) -> Option<String> {
    let shell = env::var("SHELL")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| env::var("ComSpec").ok().filter(|s| !s.is_empty()))?;

    if !only_name {
        return Some(shell);
    }

    Some(shell_name(&shell).to_string())
}

fn shell_name(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    name.strip_suffix(".exe")
        .or_else(|| name.strip_suffix(".EXE"))
        .unwrap_or(name)
}
