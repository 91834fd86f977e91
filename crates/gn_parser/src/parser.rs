//! The GN parser implementation.
//!
//! A recursive descent parser with precedence climbing for binary
//! operators. It pulls tokens from the scanner, switching the scanner into
//! string mode between the quotes of a string literal, and builds an
//! arena-allocated tree.
//!
//! The parser never fails: malformed input turns into error nodes,
//! zero-width missing tokens, and diagnostics, and parsing resumes at the
//! next token that can start a statement.

use bumpalo::Bump;
use gn_ast::node::*;
use gn_ast::syntax_kind::SyntaxKind;
use gn_ast::types::NodeFlags;
use gn_core::text::TextSpan;
use gn_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use gn_options::ParseOptions;
use gn_scanner::Scanner;
use tracing::{debug, debug_span, trace};

use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{can_start_expression, can_start_statement, closing_token_for, is_closing_token};

/// Move a Vec into the arena as a slice.
fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}

/// `THIS_NODE_HAS_ERROR` when any of the node's own tokens is missing.
fn missing_token_flags(tokens: &[Token]) -> NodeFlags {
    if tokens.iter().any(Token::is_missing) {
        NodeFlags::THIS_NODE_HAS_ERROR
    } else {
        NodeFlags::NONE
    }
}

/// The parser produces a SourceFile tree from GN source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    scanner: Scanner<'a>,
    file_name: String,
    source_text: &'a str,
    diagnostics: DiagnosticCollection,
    /// Tracks nesting depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
    max_depth: u32,
    /// Open `(`, `[` and argument lists around the current token. A new
    /// statement can only begin where this is zero.
    group_depth: u32,
    /// End of the last consumed token.
    prev_end: u32,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, file_name: &str, source_text: &str) -> Self {
        Self::with_options(arena, file_name, source_text, &ParseOptions::default())
    }

    pub fn with_options(
        arena: &'a Bump,
        file_name: &str,
        source_text: &str,
        options: &ParseOptions,
    ) -> Self {
        let source_text: &'a str = arena.alloc_str(source_text);
        let mut scanner = Scanner::new(source_text);
        scanner.set_record_trivia(options.collect_trivia);
        Self {
            arena,
            scanner,
            file_name: file_name.to_string(),
            source_text,
            diagnostics: DiagnosticCollection::new(),
            recursion_depth: 0,
            max_depth: options.max_depth,
            group_depth: 0,
            prev_end: 0,
        }
    }

    pub fn parse_source_file(&mut self) -> SourceFile<'a> {
        let _span = debug_span!("parse_source_file", file = %self.file_name).entered();
        self.next_token();

        let statements = self.parse_statements(false);
        let end = self.source_text.len() as u32;
        let tokens = self.scanner.take_tokens();
        let tokens: &'a [Token] = self.arena.alloc_slice_copy(&tokens);

        debug!(
            statements = statements.len(),
            tokens = tokens.len(),
            errors = self.diagnostics.error_count() + self.scanner.diagnostics().error_count(),
            "parsed source file"
        );

        SourceFile {
            data: NodeData::new(SyntaxKind::SourceFile, 0, end),
            statements,
            tokens,
            end_of_file_token: Token::new(SyntaxKind::EndOfFileToken, end, end),
            file_name: self.file_name.clone(),
            text: self.source_text,
        }
    }

    /// Parser and scanner diagnostics, sorted by position.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        for diagnostic in self.scanner.take_diagnostics().into_diagnostics() {
            diagnostics.add(self.locate(diagnostic));
        }
        diagnostics.sort();
        diagnostics
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    fn next_token(&mut self) -> SyntaxKind {
        self.prev_end = self.token_end();
        self.scanner.scan()
    }

    /// Advance in string mode.
    #[inline]
    fn next_string_part(&mut self) -> SyntaxKind {
        self.prev_end = self.token_end();
        self.scanner.scan_string_part()
    }

    #[inline]
    fn next_expansion_target(&mut self) -> SyntaxKind {
        self.prev_end = self.token_end();
        self.scanner.scan_expansion_target()
    }

    #[inline]
    fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    #[inline]
    fn token_end(&self) -> u32 {
        self.scanner.token_end() as u32
    }

    #[inline]
    fn token_text(&self) -> &'a str {
        self.scanner.token_text()
    }

    fn current_as_token(&self) -> Token {
        Token::new(self.current_token(), self.token_pos(), self.token_end())
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> Token {
        if self.current_token() == kind {
            let token = self.current_as_token();
            self.next_token();
            token
        } else {
            let text = kind.fixed_text().unwrap_or("token");
            self.error(&messages::_0_EXPECTED, &[text]);
            Token::missing(kind, self.prev_end)
        }
    }

    fn optional_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.current_token() == kind {
            let token = self.current_as_token();
            self.next_token();
            Some(token)
        } else {
            None
        }
    }

    fn locate(&self, diagnostic: Diagnostic) -> Diagnostic {
        if self.file_name.is_empty() {
            diagnostic
        } else {
            diagnostic.in_file(self.file_name.clone())
        }
    }

    /// Report at the current token.
    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let (pos, end) = (self.token_pos(), self.token_end());
        self.error_at(message, pos, end, args);
    }

    fn error_at(&mut self, message: &DiagnosticMessage, pos: u32, end: u32, args: &[&str]) {
        let diagnostic = Diagnostic::with_span(TextSpan::from_bounds(pos, end), message, args);
        let diagnostic = self.locate(diagnostic);
        self.diagnostics.add(diagnostic);
    }

    // ========================================================================
    // Nesting limit
    // ========================================================================

    fn enter_nesting(&mut self) -> bool {
        if self.recursion_depth >= self.max_depth {
            let limit = self.max_depth.to_string();
            self.error(&messages::NESTING_TOO_DEEP_0, &[&limit]);
            trace!(pos = self.token_pos(), depth = self.recursion_depth, "nesting limit reached");
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    #[inline]
    fn exit_nesting(&mut self) {
        self.recursion_depth -= 1;
    }

    #[inline]
    fn enter_group(&mut self) {
        self.group_depth += 1;
    }

    #[inline]
    fn exit_group(&mut self) {
        self.group_depth -= 1;
    }

    /// Consume one token, or one whole bracketed group or string literal,
    /// without building nodes. Always makes progress unless at end of file.
    fn skip_balanced(&mut self) {
        let mut closers: Vec<SyntaxKind> = Vec::new();
        loop {
            let kind = self.current_token();
            if kind == SyntaxKind::EndOfFileToken {
                return;
            }
            if kind == SyntaxKind::DoubleQuoteToken {
                self.skip_string();
            } else if let Some(close) = closing_token_for(kind) {
                closers.push(close);
                self.next_token();
            } else {
                if is_closing_token(kind) {
                    if let Some(at) = closers.iter().rposition(|&c| c == kind) {
                        closers.truncate(at);
                    }
                }
                self.next_token();
            }
            if closers.is_empty() {
                return;
            }
        }
    }

    /// Skip a string literal whose opening quote is the current token.
    fn skip_string(&mut self) {
        let mut kind = self.next_string_part();
        loop {
            match kind {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::DoubleQuoteToken => {
                    self.next_token();
                    return;
                }
                SyntaxKind::DollarOpenBraceToken => {
                    kind = self.next_token();
                    while !matches!(
                        kind,
                        SyntaxKind::CloseBraceToken | SyntaxKind::DoubleQuoteToken | SyntaxKind::EndOfFileToken
                    ) {
                        kind = self.next_token();
                    }
                    if kind == SyntaxKind::CloseBraceToken {
                        kind = self.next_string_part();
                    }
                }
                SyntaxKind::DollarToken => {
                    self.next_expansion_target();
                    kind = self.next_string_part();
                }
                _ => kind = self.next_string_part(),
            }
        }
    }

    /// Past the nesting limit: skip everything up to the token that closes
    /// the enclosing construct and leave that token to the caller. For a
    /// statement only `}` closes; stray `)` and `]` are skipped with the rest.
    fn skip_rest_of_group(&mut self, in_statement: bool) -> ErrorNode {
        let pos = self.token_pos();
        loop {
            let kind = self.current_token();
            let closes = if in_statement {
                kind == SyntaxKind::CloseBraceToken
            } else {
                is_closing_token(kind)
            };
            if kind == SyntaxKind::EndOfFileToken || closes {
                break;
            }
            self.skip_balanced();
        }
        // A top-level `}` has no block to return to.
        if in_statement && self.prev_end <= pos && self.current_token() != SyntaxKind::EndOfFileToken {
            self.next_token();
        }
        trace!(pos, end = self.prev_end, "skipped group past nesting limit");
        if self.prev_end > pos {
            ErrorNode::new(pos, self.prev_end)
        } else {
            ErrorNode::new(self.prev_end, self.prev_end)
        }
    }

    // ========================================================================
    // Statement parsing
    // ========================================================================

    fn parse_statements(&mut self, in_block: bool) -> &'a [Statement<'a>] {
        let mut statements = Vec::new();
        loop {
            match self.current_token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if in_block => break,
                _ => statements.push(self.parse_statement()),
            }
        }
        alloc_vec_in(self.arena, statements)
    }

    fn parse_statement(&mut self) -> Statement<'a> {
        if !self.enter_nesting() {
            return Statement::Error(self.skip_rest_of_group(true));
        }
        let statement = match self.current_token() {
            SyntaxKind::ImportKeyword => self.parse_import_statement(),
            SyntaxKind::IfKeyword => Statement::If(self.parse_if_statement()),
            SyntaxKind::ForeachKeyword => self.parse_foreach_statement(),
            kind if can_start_expression(kind) => self.parse_assignment_or_expression_statement(),
            _ => self.parse_error_statement(),
        };
        self.exit_nesting();
        statement
    }

    /// Wrap a run of tokens that cannot start a statement in an error node.
    fn parse_error_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        // The scanner already reported invalid characters.
        if self.current_token() != SyntaxKind::Unknown {
            let text = self.token_text();
            self.error(&messages::UNEXPECTED_TOKEN_0, &[text]);
        }
        self.next_token();
        while !can_start_statement(self.current_token())
            && !matches!(
                self.current_token(),
                SyntaxKind::EndOfFileToken | SyntaxKind::CloseBraceToken
            )
        {
            self.next_token();
        }
        trace!(pos, end = self.prev_end, "skipped tokens that cannot start a statement");
        Statement::Error(ErrorNode::new(pos, self.prev_end))
    }

    fn parse_block(&mut self) -> Block<'a> {
        if self.current_token() != SyntaxKind::OpenBraceToken {
            self.error(&messages::_0_EXPECTED, &["{"]);
            return Block {
                data: NodeData::new(SyntaxKind::Block, self.prev_end, self.prev_end)
                    .with_flags(NodeFlags::MISSING | NodeFlags::THIS_NODE_HAS_ERROR),
                statements: &[],
            };
        }
        let pos = self.token_pos();
        self.next_token();
        let outer_groups = std::mem::take(&mut self.group_depth);
        let statements = self.parse_statements(true);
        self.group_depth = outer_groups;
        let close = self.expect_token(SyntaxKind::CloseBraceToken);
        Block {
            data: NodeData::new(SyntaxKind::Block, pos, self.prev_end)
                .with_flags(missing_token_flags(&[close])),
            statements,
        }
    }

    fn parse_import_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        self.enter_group();
        let source = self.parse_expression_and_alloc();
        self.exit_group();
        let close = self.expect_token(SyntaxKind::CloseParenToken);
        Statement::Import(ImportStatement {
            data: NodeData::new(SyntaxKind::ImportStatement, pos, self.prev_end)
                .with_flags(missing_token_flags(&[open, close])),
            source,
        })
    }

    /// `if (cond) { } else if (cond) { } else { }`. A nested `if` after
    /// `else` takes every `else` that follows it.
    fn parse_if_statement(&mut self) -> IfStatement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        self.enter_group();
        let condition = self.parse_expression_and_alloc();
        self.exit_group();
        let close = self.expect_token(SyntaxKind::CloseParenToken);
        let consequence = self.parse_block();

        let mut else_clauses = Vec::new();
        while self.current_token() == SyntaxKind::ElseKeyword {
            let else_pos = self.token_pos();
            self.next_token();
            let alternative = if self.current_token() == SyntaxKind::IfKeyword {
                self.parse_else_if()
            } else {
                ElseAlternative::Block(self.parse_block())
            };
            else_clauses.push(ElseStatement {
                data: NodeData::new(SyntaxKind::ElseStatement, else_pos, self.prev_end),
                alternative,
            });
        }

        IfStatement {
            data: NodeData::new(SyntaxKind::IfStatement, pos, self.prev_end)
                .with_flags(missing_token_flags(&[open, close])),
            condition,
            consequence,
            else_clauses: alloc_vec_in(self.arena, else_clauses),
        }
    }

    fn parse_else_if(&mut self) -> ElseAlternative<'a> {
        if self.enter_nesting() {
            let nested = self.parse_if_statement();
            self.exit_nesting();
            return ElseAlternative::If(self.arena.alloc(nested));
        }
        // Too deep: skip `if (...) {...}` and let the caller pick up any
        // further `else` clauses at this level.
        let pos = self.token_pos();
        self.next_token();
        self.skip_balanced();
        self.skip_balanced();
        ElseAlternative::Block(Block {
            data: NodeData::new(SyntaxKind::Block, pos, self.prev_end)
                .with_flags(NodeFlags::THIS_NODE_HAS_ERROR),
            statements: &[],
        })
    }

    fn parse_foreach_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        self.enter_group();
        let item = self.parse_identifier();
        let comma = self.expect_token(SyntaxKind::CommaToken);
        let list = self.parse_expression_and_alloc();
        self.exit_group();
        let close = self.expect_token(SyntaxKind::CloseParenToken);
        let body = self.parse_block();
        Statement::Foreach(ForeachStatement {
            data: NodeData::new(SyntaxKind::ForeachStatement, pos, self.prev_end)
                .with_flags(missing_token_flags(&[open, comma, close])),
            item,
            list,
            body,
        })
    }

    /// An expression, turned into an assignment when `=`, `+=` or `-=`
    /// follows it.
    fn parse_assignment_or_expression_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let expr = self.parse_expression();
        if !self.current_token().is_assignment_operator() {
            return Statement::Expression(expr);
        }

        let operator = self.current_as_token();
        self.next_token();
        let value = self.parse_expression_and_alloc();
        match into_assignment_target(expr) {
            Ok(target) => Statement::Assignment(AssignmentStatement {
                data: NodeData::new(SyntaxKind::AssignmentStatement, pos, self.prev_end),
                target,
                operator,
                value,
            }),
            Err(expr) => {
                let range = expr.range();
                self.error_at(&messages::INVALID_ASSIGNMENT_TARGET, range.pos, range.end, &[]);
                trace!(pos, "invalid assignment target");
                Statement::Error(ErrorNode::new(pos, self.prev_end))
            }
        }
    }

    fn parse_identifier(&mut self) -> Identifier<'a> {
        if self.current_token() == SyntaxKind::Identifier {
            let identifier = Identifier {
                data: NodeData::new(SyntaxKind::Identifier, self.token_pos(), self.token_end()),
                name: self.token_text(),
            };
            self.next_token();
            identifier
        } else {
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            Identifier {
                data: NodeData::new(SyntaxKind::Identifier, self.prev_end, self.prev_end)
                    .with_flags(NodeFlags::MISSING | NodeFlags::THIS_NODE_HAS_ERROR),
                name: "",
            }
        }
    }

    // ========================================================================
    // Expression parsing
    // ========================================================================

    fn parse_expression(&mut self) -> Expression<'a> {
        if !self.enter_nesting() {
            return Expression::Primary(PrimaryExpression::Error(self.skip_rest_of_group(false)));
        }
        let expr = self.parse_binary_expression(OperatorPrecedence::Lowest);
        self.exit_nesting();
        expr
    }

    /// `parse_expression` for a child held by reference. Nested brackets
    /// recurse through here, so it calls the binary parser directly.
    fn parse_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        if !self.enter_nesting() {
            let node = self.skip_rest_of_group(false);
            return self.arena.alloc(Expression::Primary(PrimaryExpression::Error(node)));
        }
        let expr = self.parse_binary_expression(OperatorPrecedence::Lowest);
        self.exit_nesting();
        self.arena.alloc(expr)
    }

    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> Expression<'a> {
        let mut left = if self.current_token() == SyntaxKind::ExclamationToken {
            self.parse_unary_expression()
        } else {
            Expression::Primary(self.parse_postfix_expression())
        };

        loop {
            // Outside brackets `a -1` ends the expression; `-1` starts the
            // next statement.
            if self.group_depth == 0 && self.scanner.minus_starts_integer() {
                break;
            }
            let precedence = get_binary_operator_precedence(self.current_token());
            if precedence == OperatorPrecedence::Invalid || precedence <= min_precedence {
                break;
            }

            let pos = left.pos();
            let operator_token = self.current_as_token();
            self.next_token();
            let right = self.parse_binary_expression(precedence);
            let left_ref = self.arena.alloc(left);
            let right_ref = self.arena.alloc(right);
            left = Expression::Binary(BinaryExpression {
                data: NodeData::new(SyntaxKind::BinaryExpression, pos, self.prev_end),
                left: left_ref,
                operator_token,
                right: right_ref,
            });
        }

        left
    }

    /// `!operand`; the current token is the `!`.
    fn parse_unary_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let operator = self.current_as_token();
        self.next_token();
        let operand = if self.current_token() == SyntaxKind::ExclamationToken {
            self.parse_non_primary_operand()
        } else {
            self.parse_postfix_expression()
        };
        let flags = if matches!(operand, PrimaryExpression::Error(_)) {
            NodeFlags::THIS_NODE_HAS_ERROR
        } else {
            NodeFlags::NONE
        };
        Expression::Unary(UnaryExpression {
            data: NodeData::new(SyntaxKind::UnaryExpression, pos, self.prev_end).with_flags(flags),
            operator,
            operand: self.arena.alloc(operand),
        })
    }

    /// `!!a`: the operand of `!` is itself a unary expression. Consume it
    /// and stand an error node in its place.
    fn parse_non_primary_operand(&mut self) -> PrimaryExpression<'a> {
        let pos = self.token_pos();
        self.error(&messages::UNARY_OPERAND_MUST_BE_PRIMARY, &[]);
        while self.current_token() == SyntaxKind::ExclamationToken {
            self.next_token();
        }
        self.parse_postfix_expression();
        PrimaryExpression::Error(ErrorNode::new(pos, self.prev_end))
    }

    /// A primary expression followed by any number of `.field` and
    /// `[index]` suffixes, built left to right.
    fn parse_postfix_expression(&mut self) -> PrimaryExpression<'a> {
        let mut expr = self.parse_primary_expression();
        loop {
            let pos = expr.pos();
            match self.current_token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let field = self.parse_identifier();
                    expr = PrimaryExpression::ScopeAccess(ScopeAccess {
                        data: NodeData::new(SyntaxKind::ScopeAccess, pos, self.prev_end),
                        scope: self.arena.alloc(expr),
                        field,
                    });
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    self.enter_group();
                    let index = self.parse_expression_and_alloc();
                    self.exit_group();
                    let close = self.expect_token(SyntaxKind::CloseBracketToken);
                    expr = PrimaryExpression::ArrayAccess(ArrayAccess {
                        data: NodeData::new(SyntaxKind::ArrayAccess, pos, self.prev_end)
                            .with_flags(missing_token_flags(&[close])),
                        array: self.arena.alloc(expr),
                        index,
                    });
                }
                _ => return expr,
            }
        }
    }

    fn parse_primary_expression(&mut self) -> PrimaryExpression<'a> {
        match self.current_token() {
            SyntaxKind::Identifier => {
                let identifier = self.parse_identifier();
                if self.current_token() == SyntaxKind::OpenParenToken {
                    self.parse_call_expression(identifier)
                } else {
                    PrimaryExpression::Identifier(identifier)
                }
            }
            SyntaxKind::IntegerLiteral => PrimaryExpression::Integer(self.parse_integer_literal()),
            SyntaxKind::MinusToken => {
                if self.scanner.rescan_minus_token() == SyntaxKind::IntegerLiteral {
                    PrimaryExpression::Integer(self.parse_integer_literal())
                } else {
                    self.parse_missing_expression()
                }
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.current_token() == SyntaxKind::TrueKeyword;
                let data = NodeData::new(SyntaxKind::BooleanLiteral, self.token_pos(), self.token_end());
                self.next_token();
                PrimaryExpression::Boolean(BooleanLiteral { data, value })
            }
            SyntaxKind::DoubleQuoteToken => PrimaryExpression::String(self.parse_string_literal()),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_list_expression(),
            SyntaxKind::OpenBraceToken => PrimaryExpression::Block(self.parse_block()),
            _ => self.parse_missing_expression(),
        }
    }

    fn parse_integer_literal(&mut self) -> IntegerLiteral<'a> {
        let literal = IntegerLiteral {
            data: NodeData::new(SyntaxKind::IntegerLiteral, self.token_pos(), self.token_end()),
            text: self.token_text(),
        };
        self.next_token();
        literal
    }

    /// An operand is required but the current token cannot start one.
    ///
    /// Closers, separators, keywords and end of file are left for the
    /// enclosing construct and get a zero-width error node; anything else is
    /// consumed into the error node.
    fn parse_missing_expression(&mut self) -> PrimaryExpression<'a> {
        let kind = self.current_token();
        if kind == SyntaxKind::EndOfFileToken
            || kind == SyntaxKind::CommaToken
            || is_closing_token(kind)
            || kind.is_keyword()
            || kind.is_assignment_operator()
        {
            self.error(&messages::EXPRESSION_EXPECTED, &[]);
            trace!(pos = self.prev_end, "missing operand");
            return PrimaryExpression::Error(ErrorNode::new(self.prev_end, self.prev_end));
        }

        let pos = self.token_pos();
        if kind != SyntaxKind::Unknown {
            let text = self.token_text();
            self.error(&messages::UNEXPECTED_TOKEN_0, &[text]);
        }
        self.next_token();
        trace!(pos, end = self.prev_end, "unexpected token in operand position");
        PrimaryExpression::Error(ErrorNode::new(pos, self.prev_end))
    }

    /// `name(arguments) { block }`; the current token is the `(`.
    fn parse_call_expression(&mut self, function: Identifier<'a>) -> PrimaryExpression<'a> {
        let pos = function.data.range.pos;
        self.next_token();
        self.enter_group();
        let (arguments, list_flags) = self.parse_comma_list(SyntaxKind::CloseParenToken);
        self.exit_group();
        let close = self.expect_token(SyntaxKind::CloseParenToken);
        let block = if self.current_token() == SyntaxKind::OpenBraceToken {
            Some(self.parse_block())
        } else {
            None
        };
        PrimaryExpression::Call(CallExpression {
            data: NodeData::new(SyntaxKind::CallExpression, pos, self.prev_end)
                .with_flags(list_flags | missing_token_flags(&[close])),
            function,
            arguments,
            block,
        })
    }

    fn parse_parenthesized_expression(&mut self) -> PrimaryExpression<'a> {
        let pos = self.token_pos();
        self.next_token();
        self.enter_group();
        let expression = self.parse_expression_and_alloc();
        self.exit_group();
        let close = self.expect_token(SyntaxKind::CloseParenToken);
        PrimaryExpression::Parenthesized(ParenthesizedExpression {
            data: NodeData::new(SyntaxKind::ParenthesizedExpression, pos, self.prev_end)
                .with_flags(missing_token_flags(&[close])),
            expression,
        })
    }

    fn parse_list_expression(&mut self) -> PrimaryExpression<'a> {
        let pos = self.token_pos();
        self.next_token();
        self.enter_group();
        let (elements, list_flags) = self.parse_comma_list(SyntaxKind::CloseBracketToken);
        self.exit_group();
        let close = self.expect_token(SyntaxKind::CloseBracketToken);
        PrimaryExpression::List(ListExpression {
            data: NodeData::new(SyntaxKind::List, pos, self.prev_end)
                .with_flags(list_flags | missing_token_flags(&[close])),
            elements,
        })
    }

    /// Comma-separated expressions up to (not including) `closer`. A trailing
    /// comma is allowed. Returns error flags when a separator or an element
    /// was missing.
    fn parse_comma_list(&mut self, closer: SyntaxKind) -> (&'a [Expression<'a>], NodeFlags) {
        let mut elements = Vec::new();
        let mut flags = NodeFlags::NONE;
        loop {
            let kind = self.current_token();
            if kind == closer || kind == SyntaxKind::EndOfFileToken {
                break;
            }
            if kind == SyntaxKind::CommaToken {
                self.error(&messages::EXPRESSION_EXPECTED, &[]);
                flags |= NodeFlags::THIS_NODE_HAS_ERROR;
                self.next_token();
                continue;
            }
            if !can_start_expression(kind) {
                break;
            }
            elements.push(self.parse_expression());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                if !can_start_expression(self.current_token()) {
                    break;
                }
                self.error(&messages::_0_EXPECTED, &[","]);
                flags |= NodeFlags::THIS_NODE_HAS_ERROR;
            }
        }
        (alloc_vec_in(self.arena, elements), flags)
    }

    // ========================================================================
    // Strings
    // ========================================================================

    /// The current token is the opening quote. Everything up to the closing
    /// quote is scanned in string mode, except the inside of `${...}`.
    fn parse_string_literal(&mut self) -> StringLiteral<'a> {
        let pos = self.token_pos();
        let mut parts = Vec::new();
        self.next_string_part();
        let terminated = loop {
            match self.current_token() {
                SyntaxKind::DoubleQuoteToken => break true,
                SyntaxKind::StringFragment => {
                    parts.push(StringPart::Fragment(self.current_as_token()));
                    self.next_string_part();
                }
                SyntaxKind::EscapeSequence => {
                    parts.push(StringPart::Escape(self.current_as_token()));
                    self.next_string_part();
                }
                SyntaxKind::DollarToken => parts.push(StringPart::Expansion(self.parse_simple_expansion())),
                SyntaxKind::DollarOpenBraceToken => {
                    parts.push(StringPart::Expansion(self.parse_braced_expansion()))
                }
                _ => break false,
            }
        };

        let content_range = parts.first().zip(parts.last()).map(|(first, last)| (first.pos(), last.end()));
        let content = content_range.map(|(start, end)| StringContent {
            data: NodeData::new(SyntaxKind::StringContent, start, end),
            parts: alloc_vec_in(self.arena, parts),
        });

        let mut flags = NodeFlags::NONE;
        let end = if terminated {
            self.next_token();
            self.prev_end
        } else {
            let end = self.source_text.len() as u32;
            self.error_at(&messages::UNTERMINATED_STRING_LITERAL, pos, end, &[]);
            flags |= NodeFlags::THIS_NODE_HAS_ERROR;
            end
        };

        StringLiteral {
            data: NodeData::new(SyntaxKind::StringLiteral, pos, end).with_flags(flags),
            content,
            terminated,
        }
    }

    /// `$name` or `$0xNN`; the current token is the `$`.
    fn parse_simple_expansion(&mut self) -> Expansion<'a> {
        let pos = self.token_pos();
        let (target, flags) = match self.next_expansion_target() {
            SyntaxKind::Identifier => {
                let identifier = Identifier {
                    data: NodeData::new(SyntaxKind::Identifier, self.token_pos(), self.token_end()),
                    name: self.token_text(),
                };
                (ExpansionTarget::Identifier(identifier), NodeFlags::NONE)
            }
            SyntaxKind::HexLiteral => {
                let hex = HexLiteral {
                    data: NodeData::new(SyntaxKind::HexLiteral, self.token_pos(), self.token_end()),
                    text: self.token_text(),
                };
                (ExpansionTarget::Hex(hex), NodeFlags::NONE)
            }
            _ => (
                ExpansionTarget::Error(ErrorNode::new(self.prev_end, self.prev_end)),
                NodeFlags::THIS_NODE_HAS_ERROR,
            ),
        };
        self.next_string_part();
        Expansion {
            data: NodeData::new(SyntaxKind::Expansion, pos, self.prev_end).with_flags(flags),
            braced: false,
            target,
        }
    }

    /// `${name}`, `${a[i]}` or `${a.b}`; the current token is the `${`.
    fn parse_braced_expansion(&mut self) -> Expansion<'a> {
        let pos = self.token_pos();
        self.next_token();
        let target_pos = self.token_pos();
        let mut flags = NodeFlags::NONE;

        let target = if self.current_token() == SyntaxKind::Identifier {
            Some(self.parse_expansion_access())
        } else {
            self.error(&messages::INVALID_BRACED_EXPANSION, &[]);
            None
        };

        if self.current_token() != SyntaxKind::CloseBraceToken {
            if target.is_some() {
                self.error(&messages::_0_EXPECTED, &["}"]);
            }
            flags |= NodeFlags::THIS_NODE_HAS_ERROR;
            while !matches!(
                self.current_token(),
                SyntaxKind::CloseBraceToken | SyntaxKind::DoubleQuoteToken | SyntaxKind::EndOfFileToken
            ) {
                self.next_token();
            }
            trace!(pos, end = self.prev_end, "skipped malformed expansion");
        }

        let target = match target {
            Some(target) => target,
            None => {
                flags |= NodeFlags::THIS_NODE_HAS_ERROR;
                ExpansionTarget::Error(ErrorNode::new(target_pos.min(self.prev_end), self.prev_end))
            }
        };
        if matches!(target, ExpansionTarget::Error(_)) {
            flags |= NodeFlags::THIS_NODE_HAS_ERROR;
        }

        // Back to string mode after the closing brace. A quote or end of
        // file found while recovering ends the string instead.
        if self.current_token() == SyntaxKind::CloseBraceToken {
            self.next_string_part();
        }

        Expansion {
            data: NodeData::new(SyntaxKind::Expansion, pos, self.prev_end).with_flags(flags),
            braced: true,
            target,
        }
    }

    fn parse_expansion_access(&mut self) -> ExpansionTarget<'a> {
        match self.parse_postfix_expression() {
            PrimaryExpression::Identifier(identifier) => ExpansionTarget::Identifier(identifier),
            expr @ (PrimaryExpression::ArrayAccess(_) | PrimaryExpression::ScopeAccess(_)) => {
                ExpansionTarget::Access(self.arena.alloc(expr))
            }
            other => {
                let range = other.range();
                self.error_at(&messages::INVALID_BRACED_EXPANSION, range.pos, range.end, &[]);
                ExpansionTarget::Error(ErrorNode::new(range.pos, range.end))
            }
        }
    }
}

fn into_assignment_target(expr: Expression<'_>) -> Result<AssignmentTarget<'_>, Expression<'_>> {
    match expr {
        Expression::Primary(PrimaryExpression::Identifier(identifier)) => {
            Ok(AssignmentTarget::Identifier(identifier))
        }
        Expression::Primary(PrimaryExpression::ArrayAccess(access)) => {
            Ok(AssignmentTarget::ArrayAccess(access))
        }
        Expression::Primary(PrimaryExpression::ScopeAccess(access)) => {
            Ok(AssignmentTarget::ScopeAccess(access))
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<'a>(arena: &'a Bump, source: &str) -> (SourceFile<'a>, DiagnosticCollection) {
        let mut parser = Parser::new(arena, "test.gn", source);
        let file = parser.parse_source_file();
        let diagnostics = parser.take_diagnostics();
        (file, diagnostics)
    }

    #[test]
    fn test_empty_file() {
        let arena = Bump::new();
        let (file, diagnostics) = parse(&arena, "");
        assert!(file.statements.is_empty());
        assert!(diagnostics.is_empty());
        assert_eq!(file.end_of_file_token.kind(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_missing_close_paren_is_zero_width() {
        let arena = Bump::new();
        let (file, diagnostics) = parse(&arena, "import(\"a.gni\"");
        let Statement::Import(import) = &file.statements[0] else {
            panic!("expected import");
        };
        assert!(import.data.has_error());
        assert_eq!(import.data.range.end, 14);
        assert_eq!(diagnostics.diagnostics()[0].message_text, "')' expected.");
        assert_eq!(diagnostics.diagnostics()[0].file.as_deref(), Some("test.gn"));
    }

    #[test]
    fn test_minus_digit_after_operand_starts_a_statement() {
        let arena = Bump::new();
        let (file, diagnostics) = parse(&arena, "a = b -1\nc = (b -1)\nd = b - 1");
        assert!(diagnostics.is_empty());
        assert_eq!(file.statements.len(), 4);
        let Statement::Assignment(first) = &file.statements[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(first.value, Expression::Primary(PrimaryExpression::Identifier(_))));
        let Statement::Expression(Expression::Primary(PrimaryExpression::Integer(value))) = &file.statements[1]
        else {
            panic!("expected integer statement");
        };
        assert_eq!(value.value(), Some(-1));
        let Statement::Assignment(grouped) = &file.statements[2] else {
            panic!("expected assignment");
        };
        let Expression::Primary(PrimaryExpression::Parenthesized(inner)) = grouped.value else {
            panic!("expected parenthesized expression");
        };
        assert!(matches!(inner.expression, Expression::Binary(_)));
        let Statement::Assignment(spaced) = &file.statements[3] else {
            panic!("expected assignment");
        };
        assert!(matches!(spaced.value, Expression::Binary(_)));
    }

    #[test]
    fn test_negative_integer_in_operand_position() {
        let arena = Bump::new();
        let (file, _) = parse(&arena, "c = -1");
        let Statement::Assignment(assignment) = &file.statements[0] else {
            panic!("expected assignment");
        };
        let Expression::Primary(PrimaryExpression::Integer(value)) = assignment.value else {
            panic!("expected integer");
        };
        assert_eq!(value.value(), Some(-1));
    }

    #[test]
    fn test_depth_limit() {
        let arena = Bump::new();
        let options = ParseOptions::default().with_max_depth(8);
        let source = format!("x = {}1{}", "(".repeat(20), ")".repeat(20));
        let mut parser = Parser::with_options(&arena, "", &source, &options);
        let file = parser.parse_source_file();
        let diagnostics = parser.take_diagnostics();
        let codes: Vec<_> = diagnostics.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![messages::NESTING_TOO_DEEP_0.code]);
        assert_eq!(file.error_node_count(), 1);
        assert_eq!(file.end_of_file_token.data.range.end as usize, source.len());
    }

    #[test]
    fn test_deep_statements_skip_to_end_of_block() {
        let arena = Bump::new();
        let options = ParseOptions::default().with_max_depth(2);
        let source = "a = { b = 1 ) c = { d = 2 } }\nf = 3";
        let mut parser = Parser::with_options(&arena, "", source, &options);
        let file = parser.parse_source_file();
        let diagnostics = parser.take_diagnostics();
        assert_eq!(diagnostics.diagnostics().len(), 1);
        assert_eq!(file.statements.len(), 2);
        assert!(matches!(file.statements[1], Statement::Assignment(_)));
    }

    #[test]
    fn test_zero_depth_limit_still_terminates() {
        let arena = Bump::new();
        let options = ParseOptions::default().with_max_depth(0);
        let mut parser = Parser::with_options(&arena, "", "} a = 1", &options);
        let file = parser.parse_source_file();
        assert!(!file.statements.is_empty());
        assert!(file.statements.iter().all(|s| matches!(s, Statement::Error(_))));
    }

    #[test]
    fn test_long_else_if_chain_past_depth_limit() {
        let arena = Bump::new();
        let options = ParseOptions::default().with_max_depth(4);
        let mut source = String::from("if (a) { }");
        for _ in 0..10 {
            source.push_str(" else if (b) { x = 1 }");
        }
        source.push_str(" else { }\ny = 2");
        let mut parser = Parser::with_options(&arena, "", &source, &options);
        let file = parser.parse_source_file();
        assert_eq!(file.statements.len(), 2);
        assert!(matches!(file.statements[1], Statement::Assignment(_)));
    }

    #[test]
    fn test_trivia_not_collected() {
        let arena = Bump::new();
        let options = ParseOptions::default().with_collect_trivia(false);
        let mut parser = Parser::with_options(&arena, "", "a = 1 # c\n", &options);
        let file = parser.parse_source_file();
        assert_eq!(file.tokens.len(), 3);
        assert_eq!(file.comments().count(), 0);
    }

    #[test]
    fn test_identifier_text_borrows_arena_source() {
        let arena = Bump::new();
        let file = {
            let source = String::from("toolchain_name = 1");
            let (file, _) = parse(&arena, &source);
            file
        };
        let Statement::Assignment(assignment) = &file.statements[0] else {
            panic!("expected assignment");
        };
        let AssignmentTarget::Identifier(id) = &assignment.target else {
            panic!("expected identifier");
        };
        assert_eq!(id.name, "toolchain_name");
    }
}
