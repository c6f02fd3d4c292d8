// ============================================================================
// Console Output + Silent Log File
// ============================================================================

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use colored::*;

pub const LOG_FILE: &str = "apod.log";

/// Console reporter. Every line is also appended to the log file, if one is set.
pub struct Logger {
    log_path: Option<PathBuf>,
}

impl Logger {
    pub fn new(log_path: Option<PathBuf>) -> Self {
        Logger { log_path }
    }

    pub fn banner(&self, title: &str) {
        println!("{}", "+------------------------------------------+".cyan());
        println!("{}", format!("| {} |", center_text(title, 40)).cyan().bold());
        println!("{}", "+------------------------------------------+".cyan());
        println!();
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", "[ INFO ]".cyan(), message);
        self.log_silent("INFO", message);
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green(), message.green());
        self.log_silent("OK", message);
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "!".yellow().bold(), message.yellow());
        self.log_silent("WARN", message);
    }

    /// Prints the error and every `source()` below it.
    pub fn error(&self, err: &dyn std::error::Error) {
        eprintln!("{}", format!("[ ERROR ] {}", err).red());
        self.log_silent("ERROR", &err.to_string());

        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("{}", format!("  caused by: {}", cause).red());
            self.log_silent("ERROR", &format!("caused by: {}", cause));
            source = cause.source();
        }
    }

    // Write failures are ignored
    fn log_silent(&self, level: &str, message: &str) {
        if let Some(path) = &self.log_path {
            append_line(path, level, message);
        }
    }
}

fn append_line(path: &Path, level: &str, message: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "[{}] {:<5} {}", timestamp, level, message);
    }
}

// Helper function to center text in box headers
fn center_text(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len >= width {
        return text.to_string();
    }
    let padding = width - text_len;
    let left_pad = padding / 2;
    let right_pad = padding - left_pad;
    format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
}
