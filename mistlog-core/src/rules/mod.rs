//! Compiled form of the field rule table.
//!
//! `compiler` turns an `ExtractionConfig` into ready-to-run regexes and keeps
//! a process-wide cache so each distinct configuration is compiled once.

pub mod compiler;
