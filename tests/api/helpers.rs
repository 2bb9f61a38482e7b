//! tests/api/helpers.rs
use std::path::PathBuf;
use wordcount::configuration::{MonitorSettings, Settings};
use wordcount::monitor::BarDisplay;

pub fn test_data_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path
}

pub fn temp_dir() -> PathBuf {
    let path = std::env::temp_dir()
        .join("wordcount")
        .join(uuid::Uuid::new_v4().to_string());
    std::fs::create_dir_all(&path).expect("Failed to create test directory");
    path
}

pub fn write_source(contents: &str) -> PathBuf {
    let path = temp_dir().join("source.txt");
    std::fs::write(&path, contents).expect("Failed to write source file");
    path
}

/// Fast polling so tests don't wait a second per frame.
pub fn test_settings() -> Settings {
    Settings {
        monitor: MonitorSettings {
            poll_interval_ms: 5,
            max_idle_polls: 10,
            bar_width: 50,
        },
        ..Settings::default()
    }
}

/// Progress bars that track state but never touch the terminal.
pub fn hidden_display() -> BarDisplay {
    BarDisplay::hidden().expect("Failed to build progress display")
}

/// Report body without the duration line, which changes between runs.
pub fn stable_report(report: &str) -> String {
    report
        .lines()
        .filter(|line| !line.starts_with("Duration("))
        .collect::<Vec<_>>()
        .join("\n")
}
