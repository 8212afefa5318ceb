//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Random short code generation
//! - [`hostname`] - Long URL parsing and registrable-domain matching

pub mod code_generator;
pub mod hostname;
