//! Common accessors over the node enums.
//!
//! Every enum in `node` gets `data()`, `kind()`, `pos()` and `end()` so
//! callers can read spans without matching on variants.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use gn_core::text::TextRange;

macro_rules! node_accessors {
    ($ty:ident) => {
        impl<'a> $ty<'a> {
            pub fn kind(&self) -> SyntaxKind {
                self.data().kind
            }

            pub fn range(&self) -> TextRange {
                self.data().range
            }

            pub fn pos(&self) -> u32 {
                self.data().range.pos
            }

            pub fn end(&self) -> u32 {
                self.data().range.end
            }
        }
    };
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::Import(n) => &n.data,
            Statement::If(n) => &n.data,
            Statement::Foreach(n) => &n.data,
            Statement::Assignment(n) => &n.data,
            Statement::Expression(e) => e.data(),
            Statement::Error(n) => &n.data,
        }
    }
}

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Unary(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Primary(p) => p.data(),
        }
    }

    /// The primary expression, if this is one.
    pub fn as_primary(&self) -> Option<&PrimaryExpression<'a>> {
        match self {
            Expression::Primary(p) => Some(p),
            _ => None,
        }
    }
}

impl<'a> PrimaryExpression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            PrimaryExpression::Identifier(n) => &n.data,
            PrimaryExpression::Integer(n) => &n.data,
            PrimaryExpression::String(n) => &n.data,
            PrimaryExpression::Boolean(n) => &n.data,
            PrimaryExpression::Call(n) => &n.data,
            PrimaryExpression::ArrayAccess(n) => &n.data,
            PrimaryExpression::ScopeAccess(n) => &n.data,
            PrimaryExpression::Block(n) => &n.data,
            PrimaryExpression::Parenthesized(n) => &n.data,
            PrimaryExpression::List(n) => &n.data,
            PrimaryExpression::Error(n) => &n.data,
        }
    }
}

impl<'a> AssignmentTarget<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            AssignmentTarget::Identifier(n) => &n.data,
            AssignmentTarget::ArrayAccess(n) => &n.data,
            AssignmentTarget::ScopeAccess(n) => &n.data,
        }
    }

    /// The identifier at the root of the target: `a` for `a`, `a.b` and `a[0].c`.
    pub fn root_identifier(&self) -> Option<&Identifier<'a>> {
        match self {
            AssignmentTarget::Identifier(id) => Some(id),
            AssignmentTarget::ArrayAccess(n) => n.array.root_identifier(),
            AssignmentTarget::ScopeAccess(n) => n.scope.root_identifier(),
        }
    }
}

impl<'a> PrimaryExpression<'a> {
    /// Follow array and scope accesses down to the base identifier.
    pub fn root_identifier(&self) -> Option<&Identifier<'a>> {
        match self {
            PrimaryExpression::Identifier(id) => Some(id),
            PrimaryExpression::ArrayAccess(n) => n.array.root_identifier(),
            PrimaryExpression::ScopeAccess(n) => n.scope.root_identifier(),
            _ => None,
        }
    }
}

impl<'a> ElseAlternative<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ElseAlternative::If(n) => &n.data,
            ElseAlternative::Block(n) => &n.data,
        }
    }
}

impl<'a> StringPart<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            StringPart::Fragment(t) | StringPart::Escape(t) => &t.data,
            StringPart::Expansion(n) => &n.data,
        }
    }
}

impl<'a> ExpansionTarget<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ExpansionTarget::Identifier(n) => &n.data,
            ExpansionTarget::Hex(n) => &n.data,
            ExpansionTarget::Access(p) => p.data(),
            ExpansionTarget::Error(n) => &n.data,
        }
    }
}

node_accessors!(Statement);
node_accessors!(Expression);
node_accessors!(PrimaryExpression);
node_accessors!(AssignmentTarget);
node_accessors!(ElseAlternative);
node_accessors!(StringPart);
node_accessors!(ExpansionTarget);
