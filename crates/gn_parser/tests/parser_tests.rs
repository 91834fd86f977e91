//! Parser integration tests.
//!
//! Verifies the tree shapes the parser builds from GN source, checked
//! mostly through the S-expression rendering of the generic tree view.

use bumpalo::Bump;
use gn_ast::node::*;
use gn_ast::tree::NodeRef;
use gn_core::text::TextRange;
use gn_options::ParseOptions;
use gn_parser::{parse, parse_with_options, tokenize, Parser};

/// Helper: parse source text and render the tree.
fn sexp(source: &str) -> String {
    let arena = Bump::new();
    parse(&arena, source).to_sexp()
}

/// Helper: the diagnostic codes a parse reports, in source order.
fn diagnostic_codes(source: &str) -> Vec<u32> {
    let arena = Bump::new();
    let result = parse_with_options(&arena, source, &ParseOptions::default());
    result.diagnostics.diagnostics().iter().map(|d| d.code).collect()
}

fn has_errors(source: &str) -> bool {
    let arena = Bump::new();
    parse_with_options(&arena, source, &ParseOptions::default()).has_errors()
}

/// Helper: assert that parsing produces the expected number of top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    let arena = Bump::new();
    assert_eq!(parse(&arena, source).statements.len(), expected, "source: {}", source);
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_assignment() {
    assert_eq!(
        sexp("x = 1"),
        "(source_file (assignment_statement (identifier) (integer)))"
    );
    assert!(!has_errors("x = 1"));
}

#[test]
fn test_compound_assignments() {
    let arena = Bump::new();
    let file = parse(&arena, "a += [ 1 ]\nb -= [ 2 ]");
    let operators: Vec<_> = file
        .statements
        .iter()
        .map(|s| match s {
            Statement::Assignment(a) => a.operator.text(file.text),
            _ => panic!("expected assignment"),
        })
        .collect();
    assert_eq!(operators, vec!["+=", "-="]);
}

#[test]
fn test_assignment_to_scope_and_array_access() {
    assert_eq!(
        sexp("a.b = 1"),
        "(source_file (assignment_statement (scope_access scope: (identifier) field: (identifier)) (integer)))"
    );
    assert_eq!(
        sexp("a[0] = 1"),
        "(source_file (assignment_statement (array_access array: (identifier) index: (integer)) (integer)))"
    );
}

#[test]
fn test_assignment_root_identifier() {
    let arena = Bump::new();
    let file = parse(&arena, "a[0].b.c = 1\nd = e.f");
    let Statement::Assignment(first) = &file.statements[0] else {
        panic!("expected assignment");
    };
    assert_eq!(first.target.root_identifier().map(|id| id.name), Some("a"));
    let Statement::Assignment(second) = &file.statements[1] else {
        panic!("expected assignment");
    };
    let value = second.value.as_primary().expect("primary value");
    assert_eq!(value.root_identifier().map(|id| id.name), Some("e"));
}

#[test]
fn test_multiple_statements_need_no_separator() {
    assert_statement_count("a = 1 b = 2", 2);
    assert_statement_count("a = 1\n\n\nb = 2\nc = 3", 3);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        sexp("iffy = true_value"),
        "(source_file (assignment_statement (identifier) (identifier)))"
    );
}

#[test]
fn test_import() {
    assert_eq!(
        sexp("import(\"//build/config.gni\")"),
        "(source_file (import_statement (string (string_content))))"
    );
}

#[test]
fn test_foreach() {
    assert_eq!(
        sexp("foreach(src, sources) { x += [ src ] }"),
        "(source_file (foreach_statement item: (identifier) list: (identifier) (block (assignment_statement (identifier) (list (identifier))))))"
    );
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    assert_eq!(
        sexp("if(a){1} else if(b){2} else {3}"),
        "(source_file (if_statement condition: (identifier) consequence: (block (integer)) \
         (else_statement alternative: (if_statement condition: (identifier) consequence: (block (integer)) \
         (else_statement alternative: (block (integer)))))))"
    );
}

#[test]
fn test_else_chain_structure() {
    let arena = Bump::new();
    let file = parse(&arena, "if (a) { } else if (b) { } else if (c) { } else { }");
    let Statement::If(outer) = &file.statements[0] else {
        panic!("expected if");
    };
    assert_eq!(outer.else_clauses.len(), 1);
    let ElseAlternative::If(second) = &outer.else_clauses[0].alternative else {
        panic!("expected else if");
    };
    assert_eq!(second.else_clauses.len(), 1);
    let ElseAlternative::If(third) = &second.else_clauses[0].alternative else {
        panic!("expected else if");
    };
    assert!(matches!(third.else_clauses[0].alternative, ElseAlternative::Block(_)));
}

#[test]
fn test_bare_block_statement() {
    assert_eq!(
        sexp("{ a = 1 }"),
        "(source_file (block (assignment_statement (identifier) (integer))))"
    );
}

#[test]
fn test_target_call_with_block() {
    assert_eq!(
        sexp("executable(\"app\") {\n  sources = [ \"main.cc\" ]\n}"),
        "(source_file (call_expression function: (identifier) (string (string_content)) \
         (block (assignment_statement (identifier) (list (string (string_content)))))))"
    );
}

#[test]
fn test_call_without_block_and_trailing_comma() {
    let arena = Bump::new();
    let file = parse(&arena, "f(a, b,)");
    let Statement::Expression(Expression::Primary(PrimaryExpression::Call(call))) = &file.statements[0] else {
        panic!("expected call");
    };
    assert_eq!(call.function.name, "f");
    assert_eq!(call.arguments.len(), 2);
    assert!(call.block.is_none());
    assert!(!has_errors("f(a, b,)"));
}

#[test]
fn test_comments_are_not_tree_children() {
    let source = "# leading\nx = 1 # trailing\n";
    assert_eq!(sexp(source), sexp("x = 1"));
    let arena = Bump::new();
    let file = parse(&arena, source);
    let comments: Vec<_> = file.comments().map(|c| c.text(file.text)).collect();
    assert_eq!(comments, vec!["# leading", "# trailing"]);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_precedence_or_and_equality() {
    assert_eq!(
        sexp("x = a == b && c || d"),
        "(source_file (assignment_statement (identifier) \
         (binary_expression left: (binary_expression left: (binary_expression left: (identifier) right: (identifier)) \
         right: (identifier)) right: (identifier))))"
    );
}

#[test]
fn test_and_binds_tighter_than_or_on_the_right() {
    assert_eq!(
        sexp("x = a || b && c"),
        "(source_file (assignment_statement (identifier) \
         (binary_expression left: (identifier) right: (binary_expression left: (identifier) right: (identifier)))))"
    );
}

#[test]
fn test_comparison_and_addition_share_a_level() {
    let arena = Bump::new();
    let file = parse(&arena, "x = a < b + c");
    let Statement::Assignment(assignment) = &file.statements[0] else {
        panic!("expected assignment");
    };
    let Expression::Binary(outer) = assignment.value else {
        panic!("expected binary");
    };
    assert_eq!(outer.operator_token.text(file.text), "+");
    let Expression::Binary(inner) = outer.left else {
        panic!("expected binary on the left");
    };
    assert_eq!(inner.operator_token.text(file.text), "<");
}

#[test]
fn test_left_associative_subtraction() {
    let arena = Bump::new();
    let file = parse(&arena, "x = a - b - c");
    let Statement::Assignment(assignment) = &file.statements[0] else {
        panic!("expected assignment");
    };
    let Expression::Binary(outer) = assignment.value else {
        panic!("expected binary");
    };
    assert!(matches!(outer.left, Expression::Binary(_)));
    assert!(matches!(outer.right, Expression::Primary(PrimaryExpression::Identifier(_))));
}

#[test]
fn test_left_associative_access_chain() {
    assert_eq!(
        sexp("x = a.b[0].c"),
        "(source_file (assignment_statement (identifier) \
         (scope_access scope: (array_access array: (scope_access scope: (identifier) field: (identifier)) \
         index: (integer)) field: (identifier))))"
    );
}

#[test]
fn test_access_on_call_result() {
    assert_eq!(
        sexp("x = get_target_outputs(\":a\")[0]"),
        "(source_file (assignment_statement (identifier) \
         (array_access array: (call_expression function: (identifier) (string (string_content))) index: (integer))))"
    );
}

#[test]
fn test_unary_takes_primary_operand() {
    assert_eq!(
        sexp("x = !a.b"),
        "(source_file (assignment_statement (identifier) \
         (unary_expression (scope_access scope: (identifier) field: (identifier)))))"
    );
    assert_eq!(
        sexp("x = !a || b"),
        "(source_file (assignment_statement (identifier) \
         (binary_expression left: (unary_expression (identifier)) right: (identifier))))"
    );
}

#[test]
fn test_unary_of_parenthesized_is_fine() {
    assert!(!has_errors("x = !(a && b)"));
    assert!(!has_errors("x = !(a)"));
    assert_eq!(
        sexp("x = !(a)"),
        "(source_file (assignment_statement (identifier) \
         (unary_expression (parenthesized_expression (identifier)))))"
    );
}

#[test]
fn test_double_negation_is_an_error() {
    assert!(has_errors("x = !!a"));
    assert_eq!(diagnostic_codes("x = !!a"), vec![2006]);
    assert_eq!(
        sexp("x = !!a"),
        "(source_file (assignment_statement (identifier) (unary_expression (ERROR))))"
    );
}

#[test]
fn test_negative_integers() {
    let arena = Bump::new();
    let file = parse(&arena, "x = [ -1, 2 ]\ny = [ a -1 ]");
    let Statement::Assignment(first) = &file.statements[0] else {
        panic!("expected assignment");
    };
    let Expression::Primary(PrimaryExpression::List(list)) = first.value else {
        panic!("expected list");
    };
    let Expression::Primary(PrimaryExpression::Integer(value)) = &list.elements[0] else {
        panic!("expected integer");
    };
    assert_eq!(value.text, "-1");
    let Statement::Assignment(second) = &file.statements[1] else {
        panic!("expected assignment");
    };
    let Expression::Primary(PrimaryExpression::List(list)) = second.value else {
        panic!("expected list");
    };
    assert!(matches!(list.elements[0], Expression::Binary(_)));
}

#[test]
fn test_minus_digit_on_next_line_is_a_new_statement() {
    assert_eq!(
        sexp("x = a\n-1"),
        "(source_file (assignment_statement (identifier) (identifier)) (integer))"
    );
    assert_eq!(diagnostic_codes("x = a\n-1"), Vec::<u32>::new());
    assert_eq!(
        sexp("x = a + b -2"),
        "(source_file (assignment_statement (identifier) \
         (binary_expression left: (identifier) right: (identifier))) (integer))"
    );
}

#[test]
fn test_minus_digit_inside_brackets_is_subtraction() {
    assert_statement_count("x = f(a -1)", 1);
    assert_statement_count("x = b[a -1]", 1);
    assert_statement_count("if (a -1 == 0) { }", 1);
    assert_eq!(
        sexp("x = (a -1)"),
        "(source_file (assignment_statement (identifier) \
         (parenthesized_expression (binary_expression left: (identifier) right: (integer)))))"
    );
    // A block inside brackets holds statements again.
    assert_statement_count("x = f({ y = a -1 })", 1);
    assert_eq!(
        sexp("f({ y = a -1 })"),
        "(source_file (call_expression function: (identifier) \
         (block (assignment_statement (identifier) (identifier)) (integer))))"
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        sexp("x = [ true, false, 42, \"s\", [], {} ]"),
        "(source_file (assignment_statement (identifier) \
         (list (boolean) (boolean) (integer) (string (string_content)) (list) (block))))"
    );
}

#[test]
fn test_list_trailing_comma() {
    assert!(!has_errors("x = [\n  \"a\",\n  \"b\",\n]"));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_empty_string() {
    assert_eq!(
        sexp("x = \"\""),
        "(source_file (assignment_statement (identifier) (string)))"
    );
}

#[test]
fn test_string_interpolation() {
    let source = "x = \"$foo-${bar[0]}\"";
    assert_eq!(
        sexp(source),
        "(source_file (assignment_statement (identifier) (string (string_content \
         (expansion (identifier)) (expansion (array_access array: (identifier) index: (integer)))))))"
    );

    let arena = Bump::new();
    let file = parse(&arena, source);
    let Statement::Assignment(assignment) = &file.statements[0] else {
        panic!("expected assignment");
    };
    let Expression::Primary(PrimaryExpression::String(string)) = assignment.value else {
        panic!("expected string");
    };
    let parts = string.parts();
    assert_eq!(parts.len(), 3);
    assert!(matches!(&parts[0], StringPart::Expansion(e) if !e.braced));
    assert!(matches!(&parts[1], StringPart::Fragment(t) if t.text(file.text) == "-"));
    assert!(matches!(&parts[2], StringPart::Expansion(e) if e.braced));
    assert!(string.has_expansions());
}

#[test]
fn test_scope_access_expansion() {
    assert_eq!(
        sexp("x = \"${invoker.name}\""),
        "(source_file (assignment_statement (identifier) (string (string_content \
         (expansion (scope_access scope: (identifier) field: (identifier)))))))"
    );
}

#[test]
fn test_hex_expansion() {
    let arena = Bump::new();
    let file = parse(&arena, "x = \"$0x41\"");
    let Statement::Assignment(assignment) = &file.statements[0] else {
        panic!("expected assignment");
    };
    let Expression::Primary(PrimaryExpression::String(string)) = assignment.value else {
        panic!("expected string");
    };
    let StringPart::Expansion(expansion) = &string.parts()[0] else {
        panic!("expected expansion");
    };
    let ExpansionTarget::Hex(hex) = &expansion.target else {
        panic!("expected hex");
    };
    assert_eq!(hex.value(), Some(0x41));
}

#[test]
fn test_escape_sequences() {
    assert_eq!(
        sexp(r#"x = "a\"b\$c\\""#),
        "(source_file (assignment_statement (identifier) (string (string_content \
         (escape_sequence) (escape_sequence) (escape_sequence)))))"
    );
}

#[test]
fn test_cooked_text() {
    let arena = Bump::new();
    let file = parse(&arena, r#"import("//a/\$b\"c $d.gni")"#);
    let Statement::Import(import) = &file.statements[0] else {
        panic!("expected import");
    };
    let Expression::Primary(PrimaryExpression::String(string)) = import.source else {
        panic!("expected string");
    };
    assert_eq!(string.cooked_text(file.text), "//a/$b\"c $d.gni");
}

#[test]
fn test_unknown_escape_is_a_warning() {
    assert!(!has_errors(r#"x = "a\nb""#));
    assert_eq!(diagnostic_codes(r#"x = "a\nb""#), vec![1004]);
}

#[test]
fn test_string_with_comment_character() {
    let arena = Bump::new();
    let file = parse(&arena, "x = \"# not a comment\"");
    assert_eq!(file.comments().count(), 0);
}

#[test]
fn test_nested_string_in_expansion_index() {
    assert!(!has_errors("x = \"${scope[\"key\"]}\""));
}

#[test]
fn test_unterminated_string() {
    let arena = Bump::new();
    let result = parse_with_options(&arena, "x = \"abc", &ParseOptions::default());
    let Statement::Assignment(assignment) = &result.source_file.statements[0] else {
        panic!("expected assignment");
    };
    let Expression::Primary(PrimaryExpression::String(string)) = assignment.value else {
        panic!("expected string");
    };
    assert!(!string.terminated);
    assert!(string.data.has_error());
    assert_eq!(string.data.range.end, 8);
    let codes: Vec<_> = result.diagnostics.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![1001]);
}

#[test]
fn test_invalid_braced_expansion() {
    assert_eq!(diagnostic_codes("x = \"${1}\""), vec![2007]);
    assert_eq!(diagnostic_codes("x = \"${f(a)}\""), vec![2007]);
    assert!(has_errors("x = \"${}\""));
}

#[test]
fn test_bare_dollar_needs_a_target() {
    assert_eq!(diagnostic_codes("x = \"cost: $ 5\""), vec![1003]);
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_missing_operand() {
    assert_eq!(
        sexp("x = "),
        "(source_file (assignment_statement (identifier) (ERROR)))"
    );
    assert_eq!(diagnostic_codes("x = "), vec![2002]);
}

#[test]
fn test_stray_close_paren_is_skipped() {
    let arena = Bump::new();
    let file = parse(&arena, "x = 1\n) y = 2");
    assert_eq!(file.statements.len(), 3);
    assert!(matches!(file.statements[1], Statement::Error(_)));
    assert!(matches!(file.statements[2], Statement::Assignment(_)));
    assert_eq!(diagnostic_codes("x = 1\n) y = 2"), vec![2004]);
}

#[test]
fn test_stray_close_brace_at_top_level() {
    assert_eq!(
        sexp("}\nx = 1"),
        "(source_file (ERROR) (assignment_statement (identifier) (integer)))"
    );
}

#[test]
fn test_invalid_assignment_target() {
    let arena = Bump::new();
    let file = parse(&arena, "f(x) = 1\ny = 2");
    assert!(matches!(file.statements[0], Statement::Error(_)));
    assert!(matches!(file.statements[1], Statement::Assignment(_)));
    assert_eq!(diagnostic_codes("f(x) = 1"), vec![2005]);
}

#[test]
fn test_missing_close_paren_in_condition() {
    assert_eq!(
        sexp("if (a { b = 1 }"),
        "(source_file (if_statement condition: (identifier) consequence: (block (assignment_statement (identifier) (integer)))))"
    );
    assert_eq!(diagnostic_codes("if (a { b = 1 }"), vec![2001]);
}

#[test]
fn test_missing_block_does_not_swallow_file() {
    let arena = Bump::new();
    let file = parse(&arena, "if (a) b = 1\nc = 2");
    assert_eq!(file.statements.len(), 3);
    let Statement::If(statement) = &file.statements[0] else {
        panic!("expected if");
    };
    assert!(statement.consequence.data.has_error());
    assert!(statement.consequence.statements.is_empty());
}

#[test]
fn test_missing_foreach_item_is_rendered_missing() {
    assert_eq!(
        sexp("foreach(, x) { }"),
        "(source_file (foreach_statement item: (MISSING identifier) list: (identifier) (block)))"
    );
}

#[test]
fn test_missing_separator_in_list() {
    let arena = Bump::new();
    let result = parse_with_options(&arena, "x = [ a b ]", &ParseOptions::default());
    let Statement::Assignment(assignment) = &result.source_file.statements[0] else {
        panic!("expected assignment");
    };
    let Expression::Primary(PrimaryExpression::List(list)) = assignment.value else {
        panic!("expected list");
    };
    assert_eq!(list.elements.len(), 2);
    assert!(list.data.has_error());
    assert_eq!(result.diagnostics.diagnostics()[0].message_text, "',' expected.");
}

#[test]
fn test_unclosed_block_at_end_of_file() {
    let arena = Bump::new();
    let file = parse(&arena, "group(\"g\") {\n  deps = []\n");
    assert_eq!(file.statements.len(), 1);
    let root = file.root();
    assert!(root.contains_error());
}

#[test]
fn test_invalid_character_recovers() {
    let arena = Bump::new();
    let file = parse(&arena, "a = 1\n@\nb = 2");
    assert_eq!(file.statements.len(), 3);
    assert_eq!(diagnostic_codes("a = 1\n@\nb = 2"), vec![1002]);
}

#[test]
fn test_diagnostics_are_sorted_and_located() {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, "BUILD.gn", "x = \"\\q\"\ny = ");
    parser.parse_source_file();
    let diagnostics = parser.take_diagnostics();
    let rendered: Vec<_> = diagnostics.diagnostics().iter().map(|d| d.code_string()).collect();
    assert_eq!(rendered, vec!["GN1004", "GN2002"]);
    assert!(diagnostics
        .diagnostics()
        .iter()
        .all(|d| d.file.as_deref() == Some("BUILD.gn")));
}

/// Parse on a thread with the stack size test threads and rayon workers get
/// by default, returning the diagnostic codes and whether parsing reached
/// the end of the input.
fn parse_on_small_stack(source: String) -> (Vec<u32>, bool) {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            let arena = Bump::new();
            let result = parse_with_options(&arena, &source, &ParseOptions::default());
            let codes = result.diagnostics.diagnostics().iter().map(|d| d.code).collect();
            let reached_end = result.source_file.end_of_file_token.data.range.pos as usize == source.len();
            (codes, reached_end)
        })
        .expect("failed to spawn thread")
        .join()
        .expect("parser thread panicked")
}

#[test]
fn test_deep_parentheses_fit_default_stack() {
    let source = format!("x = {}1{}", "(".repeat(5000), ")".repeat(5000));
    let (codes, reached_end) = parse_on_small_stack(source);
    assert_eq!(codes, vec![2008]);
    assert!(reached_end);
}

#[test]
fn test_deep_index_chain_fits_default_stack() {
    let source = format!("x = {}1{}", "a[".repeat(5000), "]".repeat(5000));
    let (codes, reached_end) = parse_on_small_stack(source);
    assert_eq!(codes, vec![2008]);
    assert!(reached_end);
}

#[test]
fn test_deep_lists_blocks_and_calls_fit_default_stack() {
    for (open, close) in [("[", "]"), ("{ y = ", "}"), ("f(", ")"), ("!(", ")")] {
        let source = format!("x = {}1{}\nz = 2", open.repeat(5000), close.repeat(5000));
        let (codes, reached_end) = parse_on_small_stack(source);
        assert_eq!(codes, vec![2008], "{}", open);
        assert!(reached_end);
    }
}

#[test]
fn test_nesting_within_default_limit_is_clean() {
    let source = format!("x = {}1{}", "a[".repeat(60), "]".repeat(60));
    let (codes, reached_end) = parse_on_small_stack(source);
    assert!(codes.is_empty(), "{:?}", codes);
    assert!(reached_end);
}

// ============================================================================
// Tree view and token stream
// ============================================================================

#[test]
fn test_child_by_field_name() {
    let arena = Bump::new();
    let file = parse(&arena, "x = a + 1");
    let root = file.root();
    let assignment = root.named_children()[0];
    assert_eq!(assignment.name(), "assignment_statement");
    assert!(assignment.child_by_field_name("value").is_none());
    let value = assignment.named_children()[1];
    assert_eq!(value.name(), "binary_expression");
    let operator = value.child_by_field_name("operator").expect("operator field");
    assert_eq!(operator.name(), "+");
    assert!(!operator.is_named());
}

#[test]
fn test_unnamed_children_match_grammar_fields() {
    let arena = Bump::new();
    let file = parse(&arena, "import(\"a.gni\")\nforeach(i, l) { }\ny = !z");
    assert_eq!(
        file.to_sexp(),
        "(source_file (import_statement (string (string_content))) \
         (foreach_statement item: (identifier) list: (identifier) (block)) \
         (assignment_statement (identifier) (unary_expression (identifier))))"
    );
    let unary = file.root().named_children()[2].named_children()[1];
    assert!(unary.child_by_field_name("argument").is_none());
    assert!(unary.child_by_field_name("operator").is_none());
}

#[test]
fn test_descendant_for_range() {
    let arena = Bump::new();
    let file = parse(&arena, "x = a + 1");
    let found = file
        .root()
        .descendant_for_range(TextRange::new(4, 5))
        .expect("node at range");
    assert_eq!(found.name(), "identifier");
    assert!(found.is_expression());
}

#[test]
fn test_tokenize_is_lossless() {
    let source = "# header\nimport(\"//a.gni\")\n\nif (!is_win) {\n  x = \"$a-${b.c}\\\"\" # t\n}\n";
    let tokens = tokenize(source);
    let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(rebuilt, source);
    assert!(tokens.windows(2).all(|w| w[0].end == w[1].pos));
}

#[test]
fn test_subtree_reparse_is_stable() {
    let arena = Bump::new();
    let source = "foreach(f, files) {\n  if (f != \"x\") {\n    out += [ \"${f}.o\" ]\n  }\n}\n";
    let file = parse(&arena, source);
    let Statement::Foreach(foreach) = &file.statements[0] else {
        panic!("expected foreach");
    };
    let inner = &foreach.body.statements[0];
    let text = file.text_of(inner.range());

    let reparsed = parse(&arena, text);
    let original = NodeRef::from_statement(inner).to_sexp();
    let again = NodeRef::from_statement(&reparsed.statements[0]).to_sexp();
    assert_eq!(original, again);
}
