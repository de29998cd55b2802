//! Logging initialization

use std::path::PathBuf;

/// Initialize logging based on debug flag
/// Returns the log file path if debug logging is enabled
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if !debug {
        // Silent by default: the TUI owns stdout/stderr
        return None;
    }

    // Log to a temp file so tracing output never interferes with the TUI
    let log_path = tempfile::Builder::new()
        .prefix("kubedoc-")
        .suffix(".log")
        .tempfile()
        .map(|f| {
            let path = f.path().to_path_buf();
            // Keep the file alive for the process lifetime; the OS reclaims it
            std::mem::forget(f);
            path
        })
        .unwrap_or_else(|_| {
            std::env::temp_dir().join(format!("kubedoc-{}.log", std::process::id()))
        });

    match std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&log_path)
    {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_writer(file)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
                )
                .with_ansi(false)
                .with_target(true)
                .init();
            Some(log_path)
        }
        Err(_) => None,
    }
}
