//! Host capability detection

use std::path::PathBuf;

/// Check whether the host offers a native notification center.
///
/// On Linux/BSD this asks the D-Bus notification server to identify
/// itself; macOS and Windows always ship one.
pub fn native_center_available() -> bool {
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        match notify_rust::get_server_information() {
            Ok(info) => {
                tracing::debug!(
                    server = %info.name,
                    vendor = %info.vendor,
                    version = %info.version,
                    "Found notification server"
                );
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "No notification server on the session bus");
                false
            }
        }
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    {
        true
    }
}

/// Resolve a command to an executable file.
///
/// Commands containing a path separator are checked as given; bare
/// names are searched for in `PATH`. Files without execute permission
/// do not count.
pub fn find_command(command: &str) -> Option<PathBuf> {
    if command.is_empty() {
        return None;
    }

    match which::which(command) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::debug!(command, error = %e, "Command not found");
            None
        }
    }
}

/// Check if a command can be run
pub fn is_command_available(command: &str) -> bool {
    find_command(command).is_some()
}
