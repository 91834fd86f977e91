//! gn_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Syntax problems never abort a parse. The scanner and parser record a
//! [`Diagnostic`] next to the error node they build, and front ends decide
//! how to present them.

use gn_core::text::TextSpan;
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (1xxx scanner, 2xxx parser).
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// The source byte span where this diagnostic occurred, if any.
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a new diagnostic attached to a source span.
    pub fn with_span(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Attach a file name, replacing any previous one.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// The code in its printed form, e.g. `GN2001`.
    pub fn code_string(&self) -> String {
        format!("GN{}", self.code)
    }

    fn start(&self) -> u32 {
        self.span.map_or(0, |span| span.start)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.span) {
            (Some(file), Some(span)) => write!(f, "{}:{}: ", file, span.start)?,
            (Some(file), None) => write!(f, "{}: ", file)?,
            _ => {}
        }
        write!(f, "{} {}: {}", self.category, self.code_string(), self.message_text)
    }
}

/// Substitute `{0}`, `{1}`, ... in `template`. Placeholders without a
/// matching argument are left as written.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|i| (i, close)))
            .and_then(|(i, close)| args.get(i).map(|arg| (*arg, close)));
        match arg {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Diagnostics accumulated during a parse.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Warnings do not count.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Order by file, then by start offset. Stable, so diagnostics at the
    /// same offset keep the order they were reported in.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| (a.file.as_deref(), a.start()).cmp(&(b.file.as_deref(), b.start())));
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner (1000-1999)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1001, Error, "Unterminated string literal.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1002, Error, "Invalid character.");
    pub const EXPANSION_TARGET_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Identifier or hex value expected after '$'.");
    pub const UNRECOGNIZED_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1004, Warning, "'\\{0}' is not an escape sequence; the backslash is kept literally.");

    // ========================================================================
    // Parser (2000-2999)
    // ========================================================================
    pub const _0_EXPECTED: DiagnosticMessage = diag!(2001, Error, "'{0}' expected.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(2002, Error, "Expression expected.");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(2003, Error, "Identifier expected.");
    pub const UNEXPECTED_TOKEN_0: DiagnosticMessage = diag!(2004, Error, "Unexpected token '{0}'.");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(2005, Error, "The left-hand side of an assignment must be an identifier, array access, or scope access.");
    pub const UNARY_OPERAND_MUST_BE_PRIMARY: DiagnosticMessage = diag!(2006, Error, "The operand of '!' must be a primary expression; wrap it in parentheses.");
    pub const INVALID_BRACED_EXPANSION: DiagnosticMessage = diag!(2007, Error, "Only an identifier, array access, or scope access may appear inside '${...}'.");
    pub const NESTING_TOO_DEEP_0: DiagnosticMessage = diag!(2008, Error, "Maximum nesting depth of {0} exceeded.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("'{0}' expected.", &[")"]), "')' expected.");
        assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
        assert_eq!(format_message("'${...}' {1}", &["x"]), "'${...}' {1}");
    }

    #[test]
    fn test_display_with_file() {
        let diag = Diagnostic::with_span(TextSpan::new(4, 1), &messages::_0_EXPECTED, &[")"])
            .in_file("BUILD.gn");
        assert_eq!(diag.to_string(), "BUILD.gn:4: error GN2001: ')' expected.");
        assert_eq!(diag.code_string(), "GN2001");
    }

    #[test]
    fn test_collection_counts_only_errors() {
        let mut diags = DiagnosticCollection::new();
        diags.add(Diagnostic::new(&messages::UNRECOGNIZED_ESCAPE_SEQUENCE, &["n"]));
        assert!(!diags.has_errors());
        diags.add(Diagnostic::new(&messages::EXPRESSION_EXPECTED, &[]));
        assert!(diags.has_errors());
        assert_eq!(diags.error_count(), 1);
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn test_sort_by_position() {
        let mut diags = DiagnosticCollection::new();
        diags.add(Diagnostic::with_span(TextSpan::new(9, 1), &messages::EXPRESSION_EXPECTED, &[]));
        diags.add(Diagnostic::with_span(TextSpan::new(2, 1), &messages::IDENTIFIER_EXPECTED, &[]));
        diags.sort();
        assert_eq!(diags.diagnostics()[0].code, 2003);
    }
}
