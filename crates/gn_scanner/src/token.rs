//! Owned token information for tools and tests.

use gn_ast::node::Token;
use gn_ast::syntax_kind::SyntaxKind;

/// A token with its source text copied out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub kind: SyntaxKind,
    /// Start position in the source text.
    pub pos: u32,
    /// End position in the source text (exclusive).
    pub end: u32,
    pub text: String,
}

impl TokenInfo {
    pub fn from_token(token: &Token, source: &str) -> Self {
        Self {
            kind: token.kind(),
            pos: token.data.range.pos,
            end: token.data.range.end,
            text: token.text(source).to_string(),
        }
    }

    /// The length of this token in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}
