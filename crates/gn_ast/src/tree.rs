//! Uniform, kind-tagged view over the typed tree.
//!
//! `NodeRef` erases the concrete node type so that generic tooling (query
//! engines, tree dumps, editors) can walk the tree through named field
//! slots. Node names and field names follow the tree-sitter-gn grammar:
//!
//! ```text
//! (source_file
//!   (if_statement
//!     condition: (identifier)
//!     consequence: (block)
//!     (else_statement alternative: (block))))
//! ```
//!
//! Nodes the grammar gives no fields (import, assignment, foreach body,
//! unary operand) expose their parts as unnamed children.
//!
//! The umbrella categories `statement` and `expression` are supertypes,
//! not nodes: test membership with [`NodeRef::is_statement`] and
//! [`NodeRef::is_expression`].

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::types::NodeFlags;
use gn_core::text::TextRange;
use std::fmt::Write;

/// A borrowed reference to any node in the tree.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'n, 'a> {
    SourceFile(&'n SourceFile<'a>),
    Block(&'n Block<'a>),
    Import(&'n ImportStatement<'a>),
    If(&'n IfStatement<'a>),
    Else(&'n ElseStatement<'a>),
    Foreach(&'n ForeachStatement<'a>),
    Assignment(&'n AssignmentStatement<'a>),
    Unary(&'n UnaryExpression<'a>),
    Binary(&'n BinaryExpression<'a>),
    Call(&'n CallExpression<'a>),
    ArrayAccess(&'n ArrayAccess<'a>),
    ScopeAccess(&'n ScopeAccess<'a>),
    Parenthesized(&'n ParenthesizedExpression<'a>),
    List(&'n ListExpression<'a>),
    Identifier(&'n Identifier<'a>),
    Integer(&'n IntegerLiteral<'a>),
    Boolean(&'n BooleanLiteral),
    String(&'n StringLiteral<'a>),
    StringContent(&'n StringContent<'a>),
    Expansion(&'n Expansion<'a>),
    Hex(&'n HexLiteral<'a>),
    /// Operator tokens and escape sequences.
    Token(&'n Token),
    Error(&'n ErrorNode),
}

/// A child slot: the field it occupies (if named) and the node.
#[derive(Debug, Clone, Copy)]
pub struct Child<'n, 'a> {
    pub field: Option<&'static str>,
    pub node: NodeRef<'n, 'a>,
}

impl<'n, 'a> Child<'n, 'a> {
    fn field(field: &'static str, node: NodeRef<'n, 'a>) -> Self {
        Self { field: Some(field), node }
    }

    fn plain(node: NodeRef<'n, 'a>) -> Self {
        Self { field: None, node }
    }
}

impl<'n, 'a> NodeRef<'n, 'a> {
    pub fn from_statement(stmt: &'n Statement<'a>) -> Self {
        match stmt {
            Statement::Import(n) => NodeRef::Import(n),
            Statement::If(n) => NodeRef::If(n),
            Statement::Foreach(n) => NodeRef::Foreach(n),
            Statement::Assignment(n) => NodeRef::Assignment(n),
            Statement::Expression(e) => NodeRef::from_expression(e),
            Statement::Error(n) => NodeRef::Error(n),
        }
    }

    pub fn from_expression(expr: &'n Expression<'a>) -> Self {
        match expr {
            Expression::Unary(n) => NodeRef::Unary(n),
            Expression::Binary(n) => NodeRef::Binary(n),
            Expression::Primary(p) => NodeRef::from_primary(p),
        }
    }

    pub fn from_primary(expr: &'n PrimaryExpression<'a>) -> Self {
        match expr {
            PrimaryExpression::Identifier(n) => NodeRef::Identifier(n),
            PrimaryExpression::Integer(n) => NodeRef::Integer(n),
            PrimaryExpression::String(n) => NodeRef::String(n),
            PrimaryExpression::Boolean(n) => NodeRef::Boolean(n),
            PrimaryExpression::Call(n) => NodeRef::Call(n),
            PrimaryExpression::ArrayAccess(n) => NodeRef::ArrayAccess(n),
            PrimaryExpression::ScopeAccess(n) => NodeRef::ScopeAccess(n),
            PrimaryExpression::Block(n) => NodeRef::Block(n),
            PrimaryExpression::Parenthesized(n) => NodeRef::Parenthesized(n),
            PrimaryExpression::List(n) => NodeRef::List(n),
            PrimaryExpression::Error(n) => NodeRef::Error(n),
        }
    }

    fn from_target(target: &'n AssignmentTarget<'a>) -> Self {
        match target {
            AssignmentTarget::Identifier(n) => NodeRef::Identifier(n),
            AssignmentTarget::ArrayAccess(n) => NodeRef::ArrayAccess(n),
            AssignmentTarget::ScopeAccess(n) => NodeRef::ScopeAccess(n),
        }
    }

    pub fn data(&self) -> &'n NodeData {
        match *self {
            NodeRef::SourceFile(n) => &n.data,
            NodeRef::Block(n) => &n.data,
            NodeRef::Import(n) => &n.data,
            NodeRef::If(n) => &n.data,
            NodeRef::Else(n) => &n.data,
            NodeRef::Foreach(n) => &n.data,
            NodeRef::Assignment(n) => &n.data,
            NodeRef::Unary(n) => &n.data,
            NodeRef::Binary(n) => &n.data,
            NodeRef::Call(n) => &n.data,
            NodeRef::ArrayAccess(n) => &n.data,
            NodeRef::ScopeAccess(n) => &n.data,
            NodeRef::Parenthesized(n) => &n.data,
            NodeRef::List(n) => &n.data,
            NodeRef::Identifier(n) => &n.data,
            NodeRef::Integer(n) => &n.data,
            NodeRef::Boolean(n) => &n.data,
            NodeRef::String(n) => &n.data,
            NodeRef::StringContent(n) => &n.data,
            NodeRef::Expansion(n) => &n.data,
            NodeRef::Hex(n) => &n.data,
            NodeRef::Token(n) => &n.data,
            NodeRef::Error(n) => &n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    /// The tree-sitter node name, e.g. `if_statement` or `"+="`.
    pub fn name(&self) -> &'static str {
        self.kind().node_name()
    }

    /// Named nodes appear in S-expressions; operator tokens do not.
    pub fn is_named(&self) -> bool {
        match self {
            NodeRef::Token(t) => t.kind() == SyntaxKind::EscapeSequence,
            _ => true,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind() == SyntaxKind::Error
    }

    /// Membership in the `statement` supertype.
    pub fn is_statement(&self) -> bool {
        self.kind().is_statement()
    }

    /// Membership in the `expression` supertype.
    pub fn is_expression(&self) -> bool {
        self.kind().is_expression()
    }

    /// Whether this node or any descendant needed error recovery.
    pub fn contains_error(&self) -> bool {
        self.data().has_error() || self.children().iter().any(|c| c.node.contains_error())
    }

    /// Child slots in source order.
    pub fn children(&self) -> Vec<Child<'n, 'a>> {
        let mut out = Vec::new();
        match *self {
            NodeRef::SourceFile(n) => {
                out.extend(n.statements.iter().map(|s| Child::plain(NodeRef::from_statement(s))));
            }
            NodeRef::Block(n) => {
                out.extend(n.statements.iter().map(|s| Child::plain(NodeRef::from_statement(s))));
            }
            NodeRef::Import(n) => {
                out.push(Child::plain(NodeRef::from_expression(n.source)));
            }
            NodeRef::If(n) => {
                out.push(Child::field("condition", NodeRef::from_expression(n.condition)));
                out.push(Child::field("consequence", NodeRef::Block(&n.consequence)));
                out.extend(n.else_clauses.iter().map(|e| Child::plain(NodeRef::Else(e))));
            }
            NodeRef::Else(n) => {
                let alternative = match &n.alternative {
                    ElseAlternative::If(i) => NodeRef::If(i),
                    ElseAlternative::Block(b) => NodeRef::Block(b),
                };
                out.push(Child::field("alternative", alternative));
            }
            NodeRef::Foreach(n) => {
                out.push(Child::field("item", NodeRef::Identifier(&n.item)));
                out.push(Child::field("list", NodeRef::from_expression(n.list)));
                out.push(Child::plain(NodeRef::Block(&n.body)));
            }
            NodeRef::Assignment(n) => {
                out.push(Child::plain(NodeRef::from_target(&n.target)));
                out.push(Child::plain(NodeRef::Token(&n.operator)));
                out.push(Child::plain(NodeRef::from_expression(n.value)));
            }
            NodeRef::Unary(n) => {
                out.push(Child::plain(NodeRef::Token(&n.operator)));
                out.push(Child::plain(NodeRef::from_primary(n.operand)));
            }
            NodeRef::Binary(n) => {
                out.push(Child::field("left", NodeRef::from_expression(n.left)));
                out.push(Child::field("operator", NodeRef::Token(&n.operator_token)));
                out.push(Child::field("right", NodeRef::from_expression(n.right)));
            }
            NodeRef::Call(n) => {
                out.push(Child::field("function", NodeRef::Identifier(&n.function)));
                out.extend(n.arguments.iter().map(|a| Child::plain(NodeRef::from_expression(a))));
                if let Some(ref block) = n.block {
                    out.push(Child::plain(NodeRef::Block(block)));
                }
            }
            NodeRef::ArrayAccess(n) => {
                out.push(Child::field("array", NodeRef::from_primary(n.array)));
                out.push(Child::field("index", NodeRef::from_expression(n.index)));
            }
            NodeRef::ScopeAccess(n) => {
                out.push(Child::field("scope", NodeRef::from_primary(n.scope)));
                out.push(Child::field("field", NodeRef::Identifier(&n.field)));
            }
            NodeRef::Parenthesized(n) => {
                out.push(Child::plain(NodeRef::from_expression(n.expression)));
            }
            NodeRef::List(n) => {
                out.extend(n.elements.iter().map(|e| Child::plain(NodeRef::from_expression(e))));
            }
            NodeRef::String(n) => {
                if let Some(ref content) = n.content {
                    out.push(Child::plain(NodeRef::StringContent(content)));
                }
            }
            NodeRef::StringContent(n) => {
                for part in n.parts.iter() {
                    match part {
                        // Literal fragments are hidden, as in the grammar.
                        StringPart::Fragment(_) => {}
                        StringPart::Escape(t) => out.push(Child::plain(NodeRef::Token(t))),
                        StringPart::Expansion(e) => out.push(Child::plain(NodeRef::Expansion(e))),
                    }
                }
            }
            NodeRef::Expansion(n) => {
                let target = match &n.target {
                    ExpansionTarget::Identifier(id) => NodeRef::Identifier(id),
                    ExpansionTarget::Hex(h) => NodeRef::Hex(h),
                    ExpansionTarget::Access(p) => NodeRef::from_primary(p),
                    ExpansionTarget::Error(e) => NodeRef::Error(e),
                };
                out.push(Child::plain(target));
            }
            NodeRef::Identifier(_)
            | NodeRef::Integer(_)
            | NodeRef::Boolean(_)
            | NodeRef::Hex(_)
            | NodeRef::Token(_)
            | NodeRef::Error(_) => {}
        }
        out
    }

    /// Named children in source order.
    pub fn named_children(&self) -> Vec<NodeRef<'n, 'a>> {
        self.children()
            .into_iter()
            .map(|c| c.node)
            .filter(NodeRef::is_named)
            .collect()
    }

    /// The first child in the given field slot.
    pub fn child_by_field_name(&self, field: &str) -> Option<NodeRef<'n, 'a>> {
        self.children()
            .into_iter()
            .find(|c| c.field == Some(field))
            .map(|c| c.node)
    }

    /// The smallest named node whose range contains `range`.
    pub fn descendant_for_range(&self, range: TextRange) -> Option<NodeRef<'n, 'a>> {
        if !self.range().contains_range(range) {
            return None;
        }
        for child in self.named_children() {
            if let Some(found) = child.descendant_for_range(range) {
                return Some(found);
            }
        }
        Some(*self)
    }

    /// Render the named structure as a tree-sitter style S-expression.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        if self.data().flags.contains(NodeFlags::MISSING) {
            out.push_str("MISSING ");
        }
        out.push_str(self.name());
        for child in self.children() {
            if !child.node.is_named() {
                continue;
            }
            out.push(' ');
            if let Some(field) = child.field {
                let _ = write!(out, "{}: ", field);
            }
            child.node.write_sexp(out);
        }
        out.push(')');
    }
}

impl<'a> SourceFile<'a> {
    /// The generic view of the root node.
    pub fn root(&self) -> NodeRef<'_, 'a> {
        NodeRef::SourceFile(self)
    }

    /// S-expression of the whole tree.
    pub fn to_sexp(&self) -> String {
        self.root().to_sexp()
    }
}
