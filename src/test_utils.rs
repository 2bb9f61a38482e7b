//! src/test_utils.rs
use std::path::PathBuf;

pub fn test_data_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path
}

/// Fresh directory under `/tmp/wordcount`.
pub fn temp_dir() -> PathBuf {
    let path = std::env::temp_dir()
        .join("wordcount")
        .join(uuid::Uuid::new_v4().to_string());
    std::fs::create_dir_all(&path).expect("Failed to create test directory");
    path
}

pub fn write_temp_file(contents: &[u8]) -> PathBuf {
    let path = temp_dir().join("input.txt");
    std::fs::write(&path, contents).expect("Failed to write test input");
    path
}
