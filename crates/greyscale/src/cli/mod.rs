//! Command handlers for the greyscale CLI.

pub mod config;
pub mod convert;
