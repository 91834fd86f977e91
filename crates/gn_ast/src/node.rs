//! Syntax tree node definitions for GN.
//!
//! Nodes are allocated in the caller's bump arena and reference their
//! children by `&'a` borrows. `Statement` and `Expression` are the two
//! umbrella categories; `PrimaryExpression` is the closed set of operand
//! forms that postfix chains and unary `!` are built from.

use crate::syntax_kind::SyntaxKind;
use crate::types::NodeFlags;
use gn_core::text::TextRange;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    pub kind: SyntaxKind,
    /// Source byte range.
    pub range: TextRange,
    pub flags: NodeFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
        }
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        self.flags.contains(NodeFlags::THIS_NODE_HAS_ERROR)
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    /// Every token of the document in order, trivia included. Concatenating
    /// their ranges reproduces `text` exactly.
    pub tokens: NodeList<'a, Token>,
    pub end_of_file_token: Token,
    pub file_name: String,
    pub text: &'a str,
}

impl<'a> SourceFile<'a> {
    /// Comment tokens in document order.
    pub fn comments(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens
            .iter()
            .filter(|t| t.data.kind == SyntaxKind::CommentTrivia)
    }

    /// Source text of a token or node range.
    #[inline]
    pub fn text_of(&self, range: TextRange) -> &'a str {
        range.slice(self.text)
    }
}

// ============================================================================
// Token
// ============================================================================

/// A token with kind and range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub data: NodeData,
}

impl Token {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            data: NodeData::new(kind, pos, end),
        }
    }

    /// A zero-width placeholder for a token the parser expected but did not find.
    pub fn missing(kind: SyntaxKind, pos: u32) -> Self {
        Self {
            data: NodeData::new(kind, pos, pos).with_flags(NodeFlags::MISSING),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.data.flags.contains(NodeFlags::MISSING)
    }

    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.data.range.slice(source)
    }
}

/// An unparsable region, or the place where a required construct is missing
/// (zero width).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorNode {
    pub data: NodeData,
}

impl ErrorNode {
    pub fn new(pos: u32, end: u32) -> Self {
        Self {
            data: NodeData::new(SyntaxKind::Error, pos, end).with_flags(NodeFlags::THIS_NODE_HAS_ERROR),
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Statement<'a> {
    Import(ImportStatement<'a>),
    If(IfStatement<'a>),
    Foreach(ForeachStatement<'a>),
    Assignment(AssignmentStatement<'a>),
    /// A bare expression used as a statement, typically a target call.
    Expression(Expression<'a>),
    Error(ErrorNode),
}

#[derive(Debug)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

/// `import("//build/config.gni")`
#[derive(Debug)]
pub struct ImportStatement<'a> {
    pub data: NodeData,
    pub source: &'a Expression<'a>,
}

/// `if (cond) { ... } else if (cond) { ... } else { ... }`
///
/// An `else if` is nested: the inner `if` owns every `else` that follows
/// it, so the outer statement normally has at most one clause.
#[derive(Debug)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub consequence: Block<'a>,
    pub else_clauses: NodeList<'a, ElseStatement<'a>>,
}

#[derive(Debug)]
pub struct ElseStatement<'a> {
    pub data: NodeData,
    pub alternative: ElseAlternative<'a>,
}

#[derive(Debug)]
pub enum ElseAlternative<'a> {
    If(&'a IfStatement<'a>),
    Block(Block<'a>),
}

/// `foreach (item, list) { ... }`
#[derive(Debug)]
pub struct ForeachStatement<'a> {
    pub data: NodeData,
    pub item: Identifier<'a>,
    pub list: &'a Expression<'a>,
    pub body: Block<'a>,
}

/// `target = value`, `target += value`, `target -= value`
#[derive(Debug)]
pub struct AssignmentStatement<'a> {
    pub data: NodeData,
    pub target: AssignmentTarget<'a>,
    pub operator: Token,
    pub value: &'a Expression<'a>,
}

/// The only forms allowed on the left of an assignment.
#[derive(Debug)]
pub enum AssignmentTarget<'a> {
    Identifier(Identifier<'a>),
    ArrayAccess(ArrayAccess<'a>),
    ScopeAccess(ScopeAccess<'a>),
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug)]
pub enum Expression<'a> {
    Unary(UnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Primary(PrimaryExpression<'a>),
}

/// `!operand`. The operand is always a primary expression.
#[derive(Debug)]
pub struct UnaryExpression<'a> {
    pub data: NodeData,
    pub operator: Token,
    pub operand: &'a PrimaryExpression<'a>,
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator_token: Token,
    pub right: &'a Expression<'a>,
}

#[derive(Debug)]
pub enum PrimaryExpression<'a> {
    Identifier(Identifier<'a>),
    Integer(IntegerLiteral<'a>),
    String(StringLiteral<'a>),
    Boolean(BooleanLiteral),
    Call(CallExpression<'a>),
    ArrayAccess(ArrayAccess<'a>),
    ScopeAccess(ScopeAccess<'a>),
    Block(Block<'a>),
    Parenthesized(ParenthesizedExpression<'a>),
    List(ListExpression<'a>),
    Error(ErrorNode),
}

#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    pub data: NodeData,
    pub name: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct IntegerLiteral<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

impl IntegerLiteral<'_> {
    /// The numeric value, or `None` when it does not fit in an `i64`.
    pub fn value(&self) -> Option<i64> {
        self.text.parse().ok()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HexLiteral<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

impl HexLiteral<'_> {
    /// The byte value of `$0xNN`, or `None` for out-of-range or malformed text.
    pub fn value(&self) -> Option<u32> {
        let digits = self.text.strip_prefix("0x")?;
        u32::from_str_radix(digits, 16).ok()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BooleanLiteral {
    pub data: NodeData,
    pub value: bool,
}

/// `target("name") { ... }`: a rule or template invocation with an
/// optional scope body.
#[derive(Debug)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub function: Identifier<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
    pub block: Option<Block<'a>>,
}

/// `array[index]`
#[derive(Debug)]
pub struct ArrayAccess<'a> {
    pub data: NodeData,
    pub array: &'a PrimaryExpression<'a>,
    pub index: &'a Expression<'a>,
}

/// `scope.field`
#[derive(Debug)]
pub struct ScopeAccess<'a> {
    pub data: NodeData,
    pub scope: &'a PrimaryExpression<'a>,
    pub field: Identifier<'a>,
}

#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `[a, b, c]`
#[derive(Debug)]
pub struct ListExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
}

// ============================================================================
// Strings
// ============================================================================

#[derive(Debug)]
pub struct StringLiteral<'a> {
    pub data: NodeData,
    /// Everything between the quotes; `None` for `""`.
    pub content: Option<StringContent<'a>>,
    /// False when input ended before the closing quote.
    pub terminated: bool,
}

#[derive(Debug)]
pub struct StringContent<'a> {
    pub data: NodeData,
    pub parts: NodeList<'a, StringPart<'a>>,
}

#[derive(Debug)]
pub enum StringPart<'a> {
    /// Literal text (`StringFragment` token).
    Fragment(Token),
    /// `\"`, `\$` or `\\`.
    Escape(Token),
    Expansion(Expansion<'a>),
}

/// `$name`, `$0xNN` or `${...}` inside a string.
#[derive(Debug)]
pub struct Expansion<'a> {
    pub data: NodeData,
    pub braced: bool,
    pub target: ExpansionTarget<'a>,
}

#[derive(Debug)]
pub enum ExpansionTarget<'a> {
    Identifier(Identifier<'a>),
    Hex(HexLiteral<'a>),
    /// Array or scope access inside `${...}`.
    Access(&'a PrimaryExpression<'a>),
    Error(ErrorNode),
}

impl<'a> StringLiteral<'a> {
    pub fn parts(&self) -> &'a [StringPart<'a>] {
        self.content.as_ref().map_or(&[], |c| c.parts)
    }

    pub fn has_expansions(&self) -> bool {
        self.parts()
            .iter()
            .any(|p| matches!(p, StringPart::Expansion(_)))
    }

    /// The string's text with escape sequences decoded and expansions
    /// copied verbatim, e.g. `"a\$b $c"` gives `a$b $c`.
    pub fn cooked_text(&self, source: &str) -> String {
        let mut out = String::new();
        for part in self.parts() {
            match part {
                StringPart::Fragment(token) => out.push_str(token.text(source)),
                StringPart::Escape(token) => out.push_str(&token.text(source)[1..]),
                StringPart::Expansion(expansion) => {
                    out.push_str(expansion.data.range.slice(source))
                }
            }
        }
        out
    }
}
