//! Visitor trait for traversing the syntax tree.
//!
//! Implement `AstVisitor` and override the methods for the node kinds you
//! care about. Default implementations walk into children in source order.

use crate::node::*;

pub trait AstVisitor<'a> {
    fn visit_source_file(&mut self, node: &SourceFile<'a>) {
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        match stmt {
            Statement::Import(n) => self.visit_import_statement(n),
            Statement::If(n) => self.visit_if_statement(n),
            Statement::Foreach(n) => self.visit_foreach_statement(n),
            Statement::Assignment(n) => self.visit_assignment_statement(n),
            Statement::Expression(e) => self.visit_expression(e),
            Statement::Error(n) => self.visit_error(n),
        }
    }

    // -- Statements --

    fn visit_import_statement(&mut self, node: &ImportStatement<'a>) {
        self.visit_expression(node.source);
    }

    fn visit_if_statement(&mut self, node: &IfStatement<'a>) {
        self.visit_expression(node.condition);
        self.visit_block(&node.consequence);
        for clause in node.else_clauses.iter() {
            self.visit_else_statement(clause);
        }
    }

    fn visit_else_statement(&mut self, node: &ElseStatement<'a>) {
        match &node.alternative {
            ElseAlternative::If(n) => self.visit_if_statement(n),
            ElseAlternative::Block(b) => self.visit_block(b),
        }
    }

    fn visit_foreach_statement(&mut self, node: &ForeachStatement<'a>) {
        self.visit_identifier(&node.item);
        self.visit_expression(node.list);
        self.visit_block(&node.body);
    }

    fn visit_assignment_statement(&mut self, node: &AssignmentStatement<'a>) {
        match &node.target {
            AssignmentTarget::Identifier(id) => self.visit_identifier(id),
            AssignmentTarget::ArrayAccess(n) => self.visit_array_access(n),
            AssignmentTarget::ScopeAccess(n) => self.visit_scope_access(n),
        }
        self.visit_expression(node.value);
    }

    fn visit_block(&mut self, node: &Block<'a>) {
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
    }

    // -- Expressions --

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        match expr {
            Expression::Unary(n) => self.visit_unary_expression(n),
            Expression::Binary(n) => self.visit_binary_expression(n),
            Expression::Primary(p) => self.visit_primary_expression(p),
        }
    }

    fn visit_unary_expression(&mut self, node: &UnaryExpression<'a>) {
        self.visit_primary_expression(node.operand);
    }

    fn visit_binary_expression(&mut self, node: &BinaryExpression<'a>) {
        self.visit_expression(node.left);
        self.visit_expression(node.right);
    }

    fn visit_primary_expression(&mut self, expr: &PrimaryExpression<'a>) {
        match expr {
            PrimaryExpression::Identifier(n) => self.visit_identifier(n),
            PrimaryExpression::Integer(_) | PrimaryExpression::Boolean(_) => {}
            PrimaryExpression::String(n) => self.visit_string(n),
            PrimaryExpression::Call(n) => self.visit_call_expression(n),
            PrimaryExpression::ArrayAccess(n) => self.visit_array_access(n),
            PrimaryExpression::ScopeAccess(n) => self.visit_scope_access(n),
            PrimaryExpression::Block(n) => self.visit_block(n),
            PrimaryExpression::Parenthesized(n) => self.visit_expression(n.expression),
            PrimaryExpression::List(n) => {
                for element in n.elements.iter() {
                    self.visit_expression(element);
                }
            }
            PrimaryExpression::Error(n) => self.visit_error(n),
        }
    }

    fn visit_call_expression(&mut self, node: &CallExpression<'a>) {
        self.visit_identifier(&node.function);
        for arg in node.arguments.iter() {
            self.visit_expression(arg);
        }
        if let Some(ref block) = node.block {
            self.visit_block(block);
        }
    }

    fn visit_array_access(&mut self, node: &ArrayAccess<'a>) {
        self.visit_primary_expression(node.array);
        self.visit_expression(node.index);
    }

    fn visit_scope_access(&mut self, node: &ScopeAccess<'a>) {
        self.visit_primary_expression(node.scope);
        self.visit_identifier(&node.field);
    }

    fn visit_string(&mut self, node: &StringLiteral<'a>) {
        if !node.terminated {
            self.visit_unterminated_string(node);
        }
        for part in node.parts() {
            if let StringPart::Expansion(expansion) = part {
                self.visit_expansion(expansion);
            }
        }
    }

    fn visit_expansion(&mut self, node: &Expansion<'a>) {
        match &node.target {
            ExpansionTarget::Identifier(id) => self.visit_identifier(id),
            ExpansionTarget::Hex(_) => {}
            ExpansionTarget::Access(p) => self.visit_primary_expression(p),
            ExpansionTarget::Error(n) => self.visit_error(n),
        }
    }

    // -- Leaves --

    fn visit_identifier(&mut self, _node: &Identifier<'a>) {}

    fn visit_unterminated_string(&mut self, _node: &StringLiteral<'a>) {}

    fn visit_error(&mut self, _node: &ErrorNode) {}
}

/// Counts error nodes and unterminated strings in a tree.
#[derive(Debug, Default)]
pub struct ErrorCounter {
    pub count: usize,
}

impl<'a> AstVisitor<'a> for ErrorCounter {
    fn visit_error(&mut self, _node: &ErrorNode) {
        self.count += 1;
    }

    fn visit_unterminated_string(&mut self, _node: &StringLiteral<'a>) {
        self.count += 1;
    }
}

impl<'a> SourceFile<'a> {
    /// Whether the parser had to recover anywhere in this file.
    ///
    /// Missing punctuation (e.g. an absent `)`) is recorded on the
    /// enclosing node's flags and in the parse diagnostics, not as an
    /// error node; check `data.has_error()` on nodes for those.
    pub fn error_node_count(&self) -> usize {
        let mut counter = ErrorCounter::default();
        counter.visit_source_file(self);
        counter.count
    }
}
