//! Core building blocks shared by every pipeline
//!
//! - **config**: release.toml parsing, defaults and validation
//! - **context**: project root + configuration, built once in main.rs
//! - **error**: error kinds with contextual help and exit codes
//! - **fsops**: file and tree copy helpers
//! - **report**: step-by-step run reports for multi-step commands

pub mod config;
pub mod context;
pub mod error;
pub mod fsops;
pub mod report;
