//! Library side of the `admissions-qc` binary: configuration, logging and
//! the command implementations.

pub mod commands;
pub mod config;
pub mod logging;
