pub mod bench;
pub mod config;
pub mod error;
pub mod matching;
pub mod metrics;
pub mod report;
