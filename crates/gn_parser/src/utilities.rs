//! Parser utility functions.

use gn_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start an expression.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::IntegerLiteral
            // Only when it rescans as a negative integer.
            | SyntaxKind::MinusToken
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::DoubleQuoteToken
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::ExclamationToken
    )
}

/// Check if a token kind can start a statement.
pub fn can_start_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ImportKeyword | SyntaxKind::IfKeyword | SyntaxKind::ForeachKeyword
    ) || can_start_expression(kind)
}

/// Tokens that close a bracketed construct.
pub fn is_closing_token(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken | SyntaxKind::CloseBraceToken
    )
}

/// The closing token matching an opening one.
pub fn closing_token_for(kind: SyntaxKind) -> Option<SyntaxKind> {
    match kind {
        SyntaxKind::OpenParenToken => Some(SyntaxKind::CloseParenToken),
        SyntaxKind::OpenBracketToken => Some(SyntaxKind::CloseBracketToken),
        SyntaxKind::OpenBraceToken => Some(SyntaxKind::CloseBraceToken),
        _ => None,
    }
}
