//! The GN scanner.
//!
//! Works on the UTF-8 bytes of the source. Every multi-byte sequence is
//! either whitespace, string content, comment content, or a single invalid
//! character, so positions always land on character boundaries.

use crate::char_codes::*;
use crate::token::TokenInfo;
use gn_ast::node::Token;
use gn_ast::syntax_kind::SyntaxKind;
use gn_core::text::TextSpan;
use gn_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// The scanner converts GN source text into tokens.
pub struct Scanner<'s> {
    /// The source text being scanned.
    text: &'s str,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// Every token produced so far, in source order.
    tokens: Vec<Token>,
    /// Whether trivia is written to `tokens`.
    record_trivia: bool,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'s> Scanner<'s> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            tokens: Vec::new(),
            record_trivia: true,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Turn trivia recording off (or back on). Structural tokens are
    /// always recorded.
    pub fn set_record_trivia(&mut self, record: bool) {
        self.record_trivia = record;
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the current token's source text.
    #[inline]
    pub fn token_text(&self) -> &'s str {
        &self.text[self.token_start..self.pos]
    }

    /// Get the start position of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            kind: self.token,
            pos: self.token_start as u32,
            end: self.pos as u32,
            text: self.token_text().to_string(),
        }
    }

    /// The tokens recorded so far.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Take the recorded token log, leaving an empty one.
    pub fn take_tokens(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.tokens)
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take accumulated diagnostics.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    fn error(&mut self, message: &DiagnosticMessage, start: usize, end: usize, args: &[&str]) {
        let span = TextSpan::from_bounds(start as u32, end as u32);
        self.diagnostics.add(Diagnostic::with_span(span, message, args));
    }

    fn push_token(&mut self, kind: SyntaxKind, start: usize, end: usize) {
        if start == end {
            return;
        }
        if kind.is_trivia() && !self.record_trivia {
            return;
        }
        self.tokens.push(Token::new(kind, start as u32, end as u32));
    }

    /// Finish the current token: set its kind and log it.
    fn finish(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.token = kind;
        self.push_token(kind, self.token_start, self.pos);
        kind
    }

    // ========================================================================
    // Structural mode
    // ========================================================================

    /// Scan the next structural token, skipping and logging any trivia
    /// before it.
    pub fn scan(&mut self) -> SyntaxKind {
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(b) = self.byte_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        let kind = match b {
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b'.' => self.single(SyntaxKind::DotToken),
            b',' => self.single(SyntaxKind::CommaToken),
            DOUBLE_QUOTE => self.single(SyntaxKind::DoubleQuoteToken),
            b'!' => self.with_equals(SyntaxKind::ExclamationToken, SyntaxKind::ExclamationEqualsToken),
            b'=' => self.with_equals(SyntaxKind::EqualsToken, SyntaxKind::EqualsEqualsToken),
            b'+' => self.with_equals(SyntaxKind::PlusToken, SyntaxKind::PlusEqualsToken),
            b'-' => self.with_equals(SyntaxKind::MinusToken, SyntaxKind::MinusEqualsToken),
            b'<' => self.with_equals(SyntaxKind::LessThanToken, SyntaxKind::LessThanEqualsToken),
            b'>' => self.with_equals(SyntaxKind::GreaterThanToken, SyntaxKind::GreaterThanEqualsToken),
            b'&' => self.doubled(b'&', SyntaxKind::AmpersandAmpersandToken),
            b'|' => self.doubled(b'|', SyntaxKind::BarBarToken),
            b if is_digit(b) => {
                self.pos = self.skip_while(self.pos, is_digit);
                SyntaxKind::IntegerLiteral
            }
            b if is_identifier_start(b) => {
                self.pos = self.skip_while(self.pos, is_identifier_part);
                SyntaxKind::from_keyword(self.token_text()).unwrap_or(SyntaxKind::Identifier)
            }
            _ => {
                self.pos += self.char_len_at(self.pos);
                self.error(&messages::INVALID_CHARACTER, self.token_start, self.pos, &[]);
                SyntaxKind::Unknown
            }
        };
        self.finish(kind)
    }

    /// Whether the current token is a `-` with a digit right after it.
    pub fn minus_starts_integer(&self) -> bool {
        self.token == SyntaxKind::MinusToken && self.byte_at(self.pos).is_some_and(is_digit)
    }

    /// Reinterpret a `-` immediately followed by digits as a negative
    /// integer literal. The parser calls this only where an operand is
    /// expected, so `a-1` stays a subtraction.
    pub fn rescan_minus_token(&mut self) -> SyntaxKind {
        if !self.minus_starts_integer() {
            return self.token;
        }
        self.pos = self.skip_while(self.pos, is_digit);
        self.token = SyntaxKind::IntegerLiteral;
        if let Some(last) = self.tokens.last_mut() {
            *last = Token::new(SyntaxKind::IntegerLiteral, self.token_start as u32, self.pos as u32);
        }
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// `op` or `op=`.
    fn with_equals(&mut self, plain: SyntaxKind, with_equals: SyntaxKind) -> SyntaxKind {
        if self.byte_at(self.pos + 1) == Some(b'=') {
            self.pos += 2;
            with_equals
        } else {
            self.pos += 1;
            plain
        }
    }

    /// `&&` and `||`; a lone `&` or `|` is not a GN token.
    fn doubled(&mut self, ch: u8, kind: SyntaxKind) -> SyntaxKind {
        if self.byte_at(self.pos + 1) == Some(ch) {
            self.pos += 2;
            kind
        } else {
            self.pos += 1;
            self.error(&messages::INVALID_CHARACTER, self.token_start, self.pos, &[]);
            SyntaxKind::Unknown
        }
    }

    fn skip_while(&self, mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
        let bytes = self.text.as_bytes();
        while pos < bytes.len() && pred(bytes[pos]) {
            pos += 1;
        }
        pos
    }

    fn char_len_at(&self, pos: usize) -> usize {
        self.text[pos..].chars().next().map_or(1, char::len_utf8)
    }

    fn skip_trivia(&mut self) {
        while let Some(b) = self.byte_at(self.pos) {
            let start = self.pos;
            let kind = match b {
                LINE_FEED => {
                    self.pos += 1;
                    SyntaxKind::NewLineTrivia
                }
                b'#' => {
                    let text = self.text;
                    let rest = &text.as_bytes()[self.pos..];
                    self.pos += memchr::memchr2(LINE_FEED, CARRIAGE_RETURN, rest).unwrap_or(rest.len());
                    SyntaxKind::CommentTrivia
                }
                b if is_white_space_single_line(b) || b >= 0x80 => {
                    self.skip_white_space();
                    if self.pos == start {
                        // A non-ASCII character that is not whitespace.
                        return;
                    }
                    SyntaxKind::WhitespaceTrivia
                }
                _ => return,
            };
            self.push_token(kind, start, self.pos);
        }
    }

    fn skip_white_space(&mut self) {
        loop {
            match self.byte_at(self.pos) {
                Some(b) if is_white_space_single_line(b) => self.pos += 1,
                Some(b) if b >= 0x80 => match self.text[self.pos..].chars().next() {
                    Some(ch) if is_unicode_white_space(ch) && ch != '\u{2028}' && ch != '\u{2029}' => {
                        self.pos += ch.len_utf8()
                    }
                    _ => return,
                },
                _ => return,
            }
        }
    }

    // ========================================================================
    // String mode
    // ========================================================================

    /// Scan the next piece of string content. Nothing is skipped; the caller
    /// is positioned just after the opening quote, an escape, or the end of
    /// an expansion.
    ///
    /// Returns `EndOfFileToken` when input ends inside the string.
    pub fn scan_string_part(&mut self) -> SyntaxKind {
        self.token_start = self.pos;
        let Some(b) = self.byte_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        let kind = match b {
            DOUBLE_QUOTE => self.single(SyntaxKind::DoubleQuoteToken),
            BACKSLASH if self.byte_at(self.pos + 1).is_some_and(is_escapable) => {
                self.pos += 2;
                SyntaxKind::EscapeSequence
            }
            DOLLAR_SIGN if self.byte_at(self.pos + 1) == Some(b'{') => {
                self.pos += 2;
                SyntaxKind::DollarOpenBraceToken
            }
            DOLLAR_SIGN => self.single(SyntaxKind::DollarToken),
            _ => {
                self.scan_string_fragment();
                SyntaxKind::StringFragment
            }
        };
        self.finish(kind)
    }

    /// Literal text up to the next quote, expansion, or escape sequence.
    /// A backslash that does not start an escape sequence stays in the
    /// fragment.
    fn scan_string_fragment(&mut self) {
        let text = self.text;
        let bytes = text.as_bytes();
        loop {
            let Some(offset) = memchr::memchr3(DOUBLE_QUOTE, BACKSLASH, DOLLAR_SIGN, &bytes[self.pos..]) else {
                self.pos = bytes.len();
                return;
            };
            let at = self.pos + offset;
            if bytes[at] != BACKSLASH {
                self.pos = at;
                return;
            }
            match bytes.get(at + 1).copied() {
                Some(next) if is_escapable(next) => {
                    // A real escape ends the fragment, unless it is the very
                    // first thing (handled by scan_string_part).
                    self.pos = at;
                    return;
                }
                Some(_) => {
                    let len = self.char_len_at(at + 1);
                    let ch = &text[at + 1..at + 1 + len];
                    self.error(&messages::UNRECOGNIZED_ESCAPE_SEQUENCE, at, at + 1 + len, &[ch]);
                    self.pos = at + 1;
                }
                None => {
                    self.pos = bytes.len();
                    return;
                }
            }
        }
    }

    /// Scan what follows a bare `$` in a string: an identifier or a
    /// `0xNN` hex value. No trivia is allowed in between.
    pub fn scan_expansion_target(&mut self) -> SyntaxKind {
        self.token_start = self.pos;
        let text = self.text;
        let bytes = text.as_bytes();
        let kind = match self.byte_at(self.pos) {
            Some(b'0') if bytes.get(self.pos + 1) == Some(&b'x') && bytes.get(self.pos + 2).is_some_and(|&b| is_hex_digit(b)) => {
                self.pos = self.skip_while(self.pos + 2, is_hex_digit);
                SyntaxKind::HexLiteral
            }
            // Keywords are plain names here: `"$if"` expands a variable `if`.
            Some(b) if is_identifier_start(b) => {
                self.pos = self.skip_while(self.pos, is_identifier_part);
                SyntaxKind::Identifier
            }
            _ => {
                let start = self.pos.saturating_sub(1);
                self.error(&messages::EXPANSION_TARGET_EXPECTED, start, self.pos, &[]);
                self.token = SyntaxKind::Unknown;
                return self.token;
            }
        };
        self.finish(kind)
    }
}
