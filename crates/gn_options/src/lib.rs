//! gn_options: Parser configuration.
//!
//! Options can come from a JSON file in camelCase form:
//!
//! ```json
//! { "maxDepth": 120, "collectTrivia": false }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default nesting limit for statements and expressions. Small enough for a
/// debug build to stay inside a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Options that control a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ParseOptions {
    /// How deeply statements and expressions may nest before the parser
    /// gives up on the construct and records an error node.
    pub max_depth: u32,
    /// Whether whitespace and comment tokens are kept in the token log.
    pub collect_trivia: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            collect_trivia: true,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_collect_trivia(mut self, collect_trivia: bool) -> Self {
        self.collect_trivia = collect_trivia;
        self
    }

    fn validate(self) -> Result<Self, OptionsError> {
        if self.max_depth == 0 {
            return Err(OptionsError::InvalidMaxDepth);
        }
        Ok(self)
    }
}

/// Errors from reading or validating options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("cannot read options file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options JSON")]
    Json(#[from] serde_json::Error),
    #[error("maxDepth must be at least 1")]
    InvalidMaxDepth,
}

/// Parse options from a JSON string.
pub fn parse_options(content: &str) -> Result<ParseOptions, OptionsError> {
    let options: ParseOptions = serde_json::from_str(content)?;
    options.validate()
}

/// Parse options from a JSON file.
pub fn parse_options_file(path: &Path) -> Result<ParseOptions, OptionsError> {
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_options(&content)
}
