//! Formwork Core
//!
//! Shared plumbing for the Formwork crates: collections, geometry,
//! configuration, logging and profiling.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;

pub use config::FormConfig;
pub use geometry::Size;
