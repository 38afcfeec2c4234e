//! CLI command implementations

pub mod check;
pub mod checks;
pub mod config;
pub mod json_output;
pub mod select;
