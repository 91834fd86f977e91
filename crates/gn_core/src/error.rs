//! Infrastructure errors.
//!
//! Malformed GN source never produces one of these: syntax problems are
//! reported as error nodes and diagnostics. These cover the world around
//! the parser (reading inputs, decoding bytes).

use std::path::PathBuf;

/// Errors raised while loading GN inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file could not be read.
    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid UTF-8.
    #[error("`{path}` is not valid UTF-8 text")]
    InvalidUtf8 { path: PathBuf },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
