//! Operator precedence for binary operators.
//!
//! Postfix forms (calls, `.field`, `[index]`) bind tighter than every
//! binary operator and are handled by the postfix loop, not here.

use gn_ast::syntax_kind::SyntaxKind;

/// Binary operator precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    /// Below every operator; the starting level for a full expression.
    Lowest = 0,
    LogicalOr = 1,
    LogicalAnd = 2,
    Equality = 3,
    /// Relational and additive operators share one level.
    Comparison = 4,
    Invalid = 255,
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => {
            OperatorPrecedence::Equality
        }
        SyntaxKind::LessThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::PlusToken
        | SyntaxKind::MinusToken => OperatorPrecedence::Comparison,
        _ => OperatorPrecedence::Invalid,
    }
}
