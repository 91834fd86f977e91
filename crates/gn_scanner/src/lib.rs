//! gn_scanner: Tokenizer for GN source text.
//!
//! The scanner has two modes, both driven by the parser:
//! - [`Scanner::scan`] produces structural tokens (keywords, punctuation,
//!   operators, identifiers, integers), skipping trivia;
//! - [`Scanner::scan_string_part`] produces the pieces of a string literal
//!   (literal fragments, escape sequences, `$`/`${` expansion starts, the
//!   closing quote) and never skips anything.
//!
//! Every token either mode produces, trivia included, is appended to a
//! lossless log that reproduces the input when concatenated.

mod char_codes;
mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::TokenInfo;
