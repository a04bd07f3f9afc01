use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use once_cell::sync::OnceCell;

static LOG_FILE: OnceCell<PathBuf> = OnceCell::new();

/// Mirror log lines into `path` in addition to stdout. Only the first call wins.
pub fn init(path: Option<PathBuf>) {
    let Some(path) = path else { return };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        let _ = fs::create_dir_all(dir);
    }
    let _ = LOG_FILE.set(path);
}

pub fn log_path() -> Option<&'static Path> {
    LOG_FILE.get().map(PathBuf::as_path)
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

pub fn log_line(line: &str) {
    let stamped = format!("[{}] {}", timestamp(), line);
    println!("{}", stamped);
    if let Some(path) = log_path() {
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(f, "{}", stamped);
        }
    }
}

pub fn log_error(prefix: &str, e: &dyn std::error::Error) {
    log_line(&format!("ERROR: {}: {}", prefix, e));
}

pub fn log_command(program: &str, args: &[String]) {
    let joined = args.join(" ");
    log_line(&format!("RUN: {} {}", program, joined));
}
