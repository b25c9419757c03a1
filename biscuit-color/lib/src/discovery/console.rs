//! Windows console virtual terminal processing.
//!
//! Windows 10 consoles only interpret ANSI escapes once
//! `ENABLE_VIRTUAL_TERMINAL_PROCESSING` is set on the output handle.
//! Everywhere else this is a no-op.

use crate::error::ColorError;

/// Enable virtual terminal processing on stdout.
///
/// Succeeds immediately if the mode is already enabled.
#[cfg(windows)]
pub fn enable_virtual_terminal_processing() -> Result<(), ColorError> {
    use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
    use windows_sys::Win32::System::Console::{
        CONSOLE_MODE, ENABLE_VIRTUAL_TERMINAL_PROCESSING, GetConsoleMode, GetStdHandle,
        STD_OUTPUT_HANDLE, SetConsoleMode,
    };

    let console_err = |op: &'static str| ColorError::ConsoleMode {
        op,
        source: std::io::Error::last_os_error(),
    };

    let handle = unsafe { GetStdHandle(STD_OUTPUT_HANDLE) };
    if handle == INVALID_HANDLE_VALUE || handle.is_null() {
        return Err(console_err("GetStdHandle"));
    }

    let mut mode: CONSOLE_MODE = 0;
    if unsafe { GetConsoleMode(handle, &mut mode) } == 0 {
        return Err(console_err("GetConsoleMode"));
    }

    if mode & ENABLE_VIRTUAL_TERMINAL_PROCESSING != 0 {
        return Ok(());
    }

    if unsafe { SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING) } == 0 {
        return Err(console_err("SetConsoleMode"));
    }

    tracing::debug!("Enabled virtual terminal processing on stdout");
    Ok(())
}

/// No console modes to set outside Windows.
#[cfg(not(windows))]
pub fn enable_virtual_terminal_processing() -> Result<(), ColorError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn noop_outside_windows() {
        assert!(enable_virtual_terminal_processing().is_ok());
    }
}
