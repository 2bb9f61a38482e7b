//! src/lib.rs
pub mod cli;
pub mod configuration;
pub mod error;
pub mod file_splitter;
pub mod frequency;
pub mod mappers;
pub mod monitor;
pub mod reducers;
pub mod registry;
pub mod report;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
pub mod wordcount;
pub mod worker;
