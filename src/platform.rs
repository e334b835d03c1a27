// Bookmarks platform paths
// Linux:   $XDG_CONFIG_HOME/bookmarks, $XDG_DATA_HOME/bookmarks
// macOS:   ~/Library/Application Support/Bookmarks
// Windows: %APPDATA%/Bookmarks

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns `$var/<app>` when `var` is set, otherwise `~/<fallback>/<app>`.
#[cfg(target_os = "linux")]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) => PathBuf::from(dir).join("bookmarks"),
        Err(_) => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join("bookmarks"),
    }
}

/// Directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join("Bookmarks")
    }
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
            .join("Bookmarks")
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(".bookmarks")
    }
}

/// Directory holding the local store database.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
    #[cfg(not(target_os = "linux"))]
    {
        get_config_dir()
    }
}
