//! Where the command line tool writes its log.
//!
//! Each run overwrites a single log file. `PARTY_GRID_LOG` names the file
//! explicitly; otherwise it lives in the platform cache directory.

use std::ffi::OsString;
use std::fs::{self, File};
use std::path::PathBuf;

use directories::ProjectDirs;

const LOG_ENV: &str = "PARTY_GRID_LOG";
const LOG_NAME: &str = "party-grid.log";

/// Open the log file for this run, creating its directory if needed.
pub fn open_log() -> Option<File> {
    let path = log_path(
        std::env::var_os(LOG_ENV),
        ProjectDirs::from("", "", "party-grid").map(|dirs| dirs.cache_dir().to_path_buf()),
    )?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    File::create(path).ok()
}

/// An explicit, non-empty override wins over the cache directory.
fn log_path(explicit: Option<OsString>, cache_dir: Option<PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => cache_dir.map(|dir| dir.join(LOG_NAME)),
    }
}
