//! ngcheck CLI library.
//!
//! Command implementations behind the `ngcheck` binary: batch checking of
//! scene files, element selection for a single object and the check list.

pub mod commands;
