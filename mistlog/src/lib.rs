// mistlog/src/lib.rs
//! # Mistlog CLI Application
//!
//! This crate provides the terminal front end for `mistlog-core`: it reads a
//! pasted review screen, shows what was extracted, and keeps the mistake log
//! (a CSV file) up to date.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

pub use utils::log_store::MistakeLog;
