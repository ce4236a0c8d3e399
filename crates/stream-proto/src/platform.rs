//! Per-user locations for the config file and the log.

use std::path::PathBuf;

const APP_DIR: &str = "streamwatch";

/// `~/.local/share/streamwatch` on unix (macOS included), the local app
/// data directory on Windows.
pub fn data_dir() -> PathBuf {
    #[cfg(unix)]
    {
        under_home(&[".local", "share"])
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    // A config.toml next to the executable marks a portable install.
    #[cfg(windows)]
    {
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        {
            if exe_dir.join("config.toml").exists() {
                return exe_dir;
            }
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
    #[cfg(unix)]
    {
        under_home(&[".config"])
    }
}

#[cfg(unix)]
fn under_home(parts: &[&str]) -> PathBuf {
    let mut dir = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    for part in parts {
        dir.push(part);
    }
    dir.join(APP_DIR)
}

pub fn log_path() -> PathBuf {
    data_dir().join("streamwatch.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn unix_dirs_end_in_app_dir() {
        assert!(under_home(&[".local", "share"]).ends_with(".local/share/streamwatch"));
        assert!(config_dir().ends_with(".config/streamwatch"));
        assert!(log_path().ends_with("streamwatch/streamwatch.log"));
    }
}
