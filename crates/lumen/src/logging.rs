//! File logging. The terminal belongs to the UI, so log lines go to
//! `lumen.log` in the platform cache directory.

use std::fs::{self, File};
use std::path::PathBuf;

use directories::ProjectDirs;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

const LOG_FILE: &str = "lumen.log";

/// Where the log file is written, if the platform has a cache directory.
pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lumen").map(|dirs| dirs.cache_dir().join(LOG_FILE))
}

/// Install the file logger. Logging stays off if the file can't be created.
pub fn init() {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_err()
    {
        return;
    }
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}
