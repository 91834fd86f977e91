//! gn_core: Core utilities for the GN syntax analyzer.
//!
//! Provides byte-offset spans and ranges plus the workspace error type
//! shared by the scanner, parser, and front ends.

pub mod error;
pub mod text;

// Re-export commonly used types
pub use error::{Error, Result};
pub use text::{TextPos, TextRange, TextSpan};
