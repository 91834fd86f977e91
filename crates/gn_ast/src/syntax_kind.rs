//! SyntaxKind enum - all token and node kinds in the GN syntax tree.

/// The kind of a syntax token or node.
///
/// Variants are grouped in contiguous ranges (trivia, literals,
/// punctuation, keywords, nodes) so the classification helpers below are
/// simple range checks. Reordering variants changes those ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken,

    // Trivia
    WhitespaceTrivia,
    NewLineTrivia,
    CommentTrivia,

    // Literals
    IntegerLiteral,
    HexLiteral,
    StringFragment,
    EscapeSequence,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    CommaToken,
    DoubleQuoteToken,
    DollarToken,
    DollarOpenBraceToken,
    ExclamationToken,
    PlusToken,
    MinusToken,
    LessThanToken,
    LessThanEqualsToken,
    GreaterThanToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    AmpersandAmpersandToken,
    BarBarToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,

    Identifier,

    // Keywords
    ImportKeyword,
    IfKeyword,
    ElseKeyword,
    ForeachKeyword,
    TrueKeyword,
    FalseKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================
    SourceFile,
    Block,

    // Statements
    ImportStatement,
    IfStatement,
    ElseStatement,
    ForeachStatement,
    AssignmentStatement,

    // Expressions
    UnaryExpression,
    BinaryExpression,
    CallExpression,
    ArrayAccess,
    ScopeAccess,
    ParenthesizedExpression,
    List,
    BooleanLiteral,
    StringLiteral,

    // String interior
    StringContent,
    Expansion,

    /// An unparsable region or a missing construct.
    Error,
}

impl SyntaxKind {
    /// Whether this kind represents trivia (whitespace, newlines, comments).
    #[inline]
    pub fn is_trivia(self) -> bool {
        let v = self as u8;
        v >= SyntaxKind::WhitespaceTrivia as u8 && v <= SyntaxKind::CommentTrivia as u8
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u8;
        v >= SyntaxKind::ImportKeyword as u8 && v <= SyntaxKind::FalseKeyword as u8
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u8;
        v >= SyntaxKind::OpenBraceToken as u8 && v <= SyntaxKind::MinusEqualsToken as u8
    }

    /// Whether this kind is produced by the scanner rather than the parser.
    #[inline]
    pub fn is_token(self) -> bool {
        (self as u8) < SyntaxKind::SourceFile as u8
    }

    /// Whether this kind is `=`, `+=` or `-=`.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        let v = self as u8;
        v >= SyntaxKind::EqualsToken as u8 && v <= SyntaxKind::MinusEqualsToken as u8
    }

    /// Node kinds that belong to the `expression` supertype.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::UnaryExpression | SyntaxKind::BinaryExpression
        ) || self.is_primary_expression()
    }

    /// Node kinds that belong to the `primary_expression` category.
    pub fn is_primary_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::Identifier
                | SyntaxKind::IntegerLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::BooleanLiteral
                | SyntaxKind::CallExpression
                | SyntaxKind::ArrayAccess
                | SyntaxKind::ScopeAccess
                | SyntaxKind::Block
                | SyntaxKind::ParenthesizedExpression
                | SyntaxKind::List
        )
    }

    /// Node kinds that belong to the `statement` supertype. A bare
    /// expression is a statement too.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::ImportStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::ForeachStatement
                | SyntaxKind::AssignmentStatement
        ) || self.is_expression()
    }

    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::ImportKeyword => Some("import"),
            SyntaxKind::IfKeyword => Some("if"),
            SyntaxKind::ElseKeyword => Some("else"),
            SyntaxKind::ForeachKeyword => Some("foreach"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::FalseKeyword => Some("false"),
            _ => None,
        }
    }

    /// Look up a keyword SyntaxKind from text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "import" => Some(SyntaxKind::ImportKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "else" => Some(SyntaxKind::ElseKeyword),
            "foreach" => Some(SyntaxKind::ForeachKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            _ => None,
        }
    }

    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::OpenBraceToken => Some("{"),
            SyntaxKind::CloseBraceToken => Some("}"),
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::OpenBracketToken => Some("["),
            SyntaxKind::CloseBracketToken => Some("]"),
            SyntaxKind::DotToken => Some("."),
            SyntaxKind::CommaToken => Some(","),
            SyntaxKind::DoubleQuoteToken => Some("\""),
            SyntaxKind::DollarToken => Some("$"),
            SyntaxKind::DollarOpenBraceToken => Some("${"),
            SyntaxKind::ExclamationToken => Some("!"),
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::LessThanToken => Some("<"),
            SyntaxKind::LessThanEqualsToken => Some("<="),
            SyntaxKind::GreaterThanToken => Some(">"),
            SyntaxKind::GreaterThanEqualsToken => Some(">="),
            SyntaxKind::EqualsEqualsToken => Some("=="),
            SyntaxKind::ExclamationEqualsToken => Some("!="),
            SyntaxKind::AmpersandAmpersandToken => Some("&&"),
            SyntaxKind::BarBarToken => Some("||"),
            SyntaxKind::EqualsToken => Some("="),
            SyntaxKind::PlusEqualsToken => Some("+="),
            SyntaxKind::MinusEqualsToken => Some("-="),
            _ => None,
        }
    }

    /// Fixed source text of a keyword or punctuation kind.
    pub fn fixed_text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }

    /// The node name used in S-expressions and by tree query patterns.
    ///
    /// Anonymous tokens are named by their text (`"("`, `"if"`).
    pub fn node_name(self) -> &'static str {
        if let Some(text) = self.fixed_text() {
            return text;
        }
        match self {
            SyntaxKind::Unknown => "UNKNOWN",
            SyntaxKind::EndOfFileToken => "end",
            SyntaxKind::WhitespaceTrivia | SyntaxKind::NewLineTrivia => "whitespace",
            SyntaxKind::CommentTrivia => "comment",
            SyntaxKind::IntegerLiteral => "integer",
            SyntaxKind::HexLiteral => "hex",
            SyntaxKind::StringFragment => "string_fragment",
            SyntaxKind::EscapeSequence => "escape_sequence",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::SourceFile => "source_file",
            SyntaxKind::Block => "block",
            SyntaxKind::ImportStatement => "import_statement",
            SyntaxKind::IfStatement => "if_statement",
            SyntaxKind::ElseStatement => "else_statement",
            SyntaxKind::ForeachStatement => "foreach_statement",
            SyntaxKind::AssignmentStatement => "assignment_statement",
            SyntaxKind::UnaryExpression => "unary_expression",
            SyntaxKind::BinaryExpression => "binary_expression",
            SyntaxKind::CallExpression => "call_expression",
            SyntaxKind::ArrayAccess => "array_access",
            SyntaxKind::ScopeAccess => "scope_access",
            SyntaxKind::ParenthesizedExpression => "parenthesized_expression",
            SyntaxKind::List => "list",
            SyntaxKind::BooleanLiteral => "boolean",
            SyntaxKind::StringLiteral => "string",
            SyntaxKind::StringContent => "string_content",
            SyntaxKind::Expansion => "expansion",
            SyntaxKind::Error => "ERROR",
            _ => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
