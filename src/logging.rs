use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

pub fn init_logging() -> std::io::Result<PathBuf> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("jira-log-time")
        .join("logs");

    create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!("jlt-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
    set_log_file(Some(log_file.clone()));

    log_info(&format!("Logging initialized to: {}", log_file.display()));

    Ok(log_file)
}

/// Points the logger at an explicit file, or disables it with `None`.
pub fn set_log_file(path: Option<PathBuf>) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = path;
    }
}

pub fn log_error(message: &str) {
    log_with_level("ERROR", message);
}

pub fn log_info(message: &str) {
    log_with_level("INFO", message);
}

pub fn log_debug(message: &str) {
    log_with_level("DEBUG", message);
}

pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let mut message = String::from("PANIC: ");

        if let Some(location) = info.location() {
            message.push_str(&format!(
                "at {}:{}:{} - ",
                location.file(),
                location.line(),
                location.column()
            ));
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            message.push_str(s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            message.push_str(s);
        } else {
            message.push_str("Unknown panic payload");
        }

        log_error(&message);
        previous(info);
    }));
}

fn log_with_level(level: &str, message: &str) {
    let Ok(guard) = LOG_FILE.lock() else { return };
    let Some(log_file) = guard.as_ref() else { return };

    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_file) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(file, "[{}] {} - {}", timestamp, level, message);
    }

    // stderr belongs to the TUI while it runs
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}
