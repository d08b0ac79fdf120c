//! Tugaphone CLI library
//!
//! This library provides the command-line interface for the tugaphone
//! Portuguese phonemizer.

pub mod commands;
pub mod config;
pub mod dialect_source;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
