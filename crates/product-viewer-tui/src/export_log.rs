//! Export history
//!
//! Appends one line per report export to `~/.product-viewer/exports.log`.

use chrono::{DateTime, Local};
use product_viewer_core::config::app_dir;
use product_viewer_core::constants::EXPORT_LOG_FILE_NAME;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result of an export attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportResult {
    Success,
    Failure,
}

impl ExportResult {
    fn as_str(&self) -> &'static str {
        match self {
            ExportResult::Success => "SUCCESS",
            ExportResult::Failure => "FAILURE",
        }
    }
}

impl std::fmt::Display for ExportResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of the export history
#[derive(Debug, Clone)]
pub struct ExportEntry {
    pub timestamp: DateTime<Local>,
    /// User who ran the export (from environment)
    pub user: String,
    pub result: ExportResult,
    /// Number of products in the report
    pub count: usize,
    /// Report path, if one was written
    pub path: Option<PathBuf>,
    pub details: String,
}

impl ExportEntry {
    /// Format: [timestamp] [user] [result] count=N path details
    ///
    /// Line breaks in `details` are flattened so each entry stays on one line.
    fn to_line(&self) -> String {
        let path = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "[{}] [{}] [{}] count={} {} {}\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.user,
            self.result,
            self.count,
            path,
            self.details.replace(['\r', '\n'], " ")
        )
    }
}

/// Writer for the export history file
pub struct ExportLogger {
    log_path: PathBuf,
    user: String,
    enabled: bool,
}

impl ExportLogger {
    /// Logger for the default history file
    ///
    /// Creates ~/.product-viewer if needed. Logging is disabled when the
    /// directory cannot be created.
    pub fn new() -> Self {
        match app_dir() {
            Ok(dir) => Self::with_path(dir.join(EXPORT_LOG_FILE_NAME)),
            Err(e) => {
                tracing::warn!("Export history disabled: {}", e);
                Self {
                    log_path: PathBuf::from(EXPORT_LOG_FILE_NAME),
                    user: current_user(),
                    enabled: false,
                }
            }
        }
    }

    /// Logger writing to a specific file
    pub fn with_path(log_path: PathBuf) -> Self {
        let enabled = match log_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).is_ok(),
            _ => true,
        };
        Self {
            log_path,
            user: current_user(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn log_success(&self, count: usize, path: &Path) {
        self.log(ExportResult::Success, count, Some(path.to_path_buf()), "report written");
    }

    pub fn log_failure(&self, count: usize, details: &str) {
        self.log(ExportResult::Failure, count, None, details);
    }

    fn log(&self, result: ExportResult, count: usize, path: Option<PathBuf>, details: &str) {
        if !self.enabled {
            return;
        }

        let entry = ExportEntry {
            timestamp: Local::now(),
            user: self.user.clone(),
            result,
            count,
            path,
            details: details.to_string(),
        };

        if let Err(e) = self.write_entry(&entry) {
            tracing::warn!("Failed to write export history: {}", e);
        }
    }

    fn write_entry(&self, entry: &ExportEntry) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        file.write_all(entry.to_line().as_bytes())
    }

    /// Read the last `count` lines, oldest first
    pub fn read_recent(&self, count: usize) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }

        match fs::read_to_string(&self.log_path) {
            Ok(content) => {
                let lines: Vec<&str> = content.lines().collect();
                let start = lines.len().saturating_sub(count);
                lines[start..].iter().map(|s| s.to_string()).collect()
            }
            Err(_) => Vec::new(),
        }
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_result_display() {
        assert_eq!(ExportResult::Success.to_string(), "SUCCESS");
        assert_eq!(ExportResult::Failure.to_string(), "FAILURE");
    }

    #[test]
    fn test_log_and_read_recent() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ExportLogger::with_path(dir.path().join("history").join("exports.log"));
        assert!(logger.is_enabled());

        logger.log_success(2, Path::new("/tmp/products.pdf"));
        logger.log_failure(1, "disk full");

        let lines = logger.read_recent(10);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[SUCCESS] count=2 /tmp/products.pdf report written"));
        assert!(lines[1].contains("[FAILURE] count=1 - disk full"));

        let last = logger.read_recent(1);
        assert_eq!(last.len(), 1);
        assert!(last[0].contains("disk full"));
    }

    #[test]
    fn test_multiline_details_stay_on_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ExportLogger::with_path(dir.path().join("exports.log"));

        logger.log_failure(3, "I/O error:\nPermission denied\r\n(os error 13)");
        logger.log_success(1, Path::new("/tmp/products.pdf"));

        let lines = logger.read_recent(10);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[FAILURE] count=3 - I/O error: Permission denied  (os error 13)"));
        assert!(lines[1].contains("[SUCCESS] count=1"));
    }

    #[test]
    fn test_read_recent_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ExportLogger::with_path(dir.path().join("exports.log"));
        assert!(logger.read_recent(5).is_empty());
    }
}
