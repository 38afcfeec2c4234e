//! ngcheck integration test infrastructure
//!
//! Shared fixtures for the integration tests:
//!
//! - [`fixtures`]: reference meshes (cube, reversed cube, open quad, pentagon,
//!   fin) and a temporary scene directory
//! - [`glb`]: in-memory GLB writer for loader tests
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ngcheck-tests
//! cargo test -p ngcheck-tests --test proptest_analysis
//!
//! # batch analysis on the rayon pool; entry order must not change
//! cargo test -p ngcheck-core --features parallel
//! cargo test -p ngcheck-tests --features ngcheck-core/parallel
//! ```

pub mod fixtures;
pub mod glb;
