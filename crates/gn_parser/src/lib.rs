//! gn_parser: Recursive descent parser for GN.
//!
//! Turns GN source text into an arena-allocated syntax tree plus a list of
//! diagnostics. Parsing never fails; malformed regions show up as error
//! nodes.

mod parser;
mod precedence;
mod utilities;

pub use parser::Parser;

use bumpalo::Bump;
use gn_ast::node::SourceFile;
use gn_diagnostics::DiagnosticCollection;
use gn_options::ParseOptions;
use gn_scanner::TokenInfo;

/// A parsed file and the problems found while parsing it.
#[derive(Debug)]
pub struct ParseResult<'a> {
    pub source_file: SourceFile<'a>,
    pub diagnostics: DiagnosticCollection,
}

impl ParseResult<'_> {
    /// Whether any error (not just warnings) was reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Parse `source` with default options, discarding diagnostics.
pub fn parse<'a>(arena: &'a Bump, source: &str) -> SourceFile<'a> {
    Parser::new(arena, "", source).parse_source_file()
}

pub fn parse_with_options<'a>(arena: &'a Bump, source: &str, options: &ParseOptions) -> ParseResult<'a> {
    parse_file(arena, "", source, options)
}

/// Like [`parse_with_options`], with diagnostics attributed to `file_name`.
pub fn parse_file<'a>(
    arena: &'a Bump,
    file_name: &str,
    source: &str,
    options: &ParseOptions,
) -> ParseResult<'a> {
    let mut parser = Parser::with_options(arena, file_name, source, options);
    let source_file = parser.parse_source_file();
    let diagnostics = parser.take_diagnostics();
    ParseResult { source_file, diagnostics }
}

/// The full token stream of `source`, trivia included, as seen by the
/// parser. Concatenating the token texts gives back `source`.
pub fn tokenize(source: &str) -> Vec<TokenInfo> {
    let arena = Bump::new();
    let file = parse(&arena, source);
    file.tokens
        .iter()
        .map(|token| TokenInfo::from_token(token, file.text))
        .collect()
}
