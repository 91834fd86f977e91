//! gn_tests: GN sources and helpers shared by the cross-crate tests.

use bumpalo::Bump;
use gn_ast::syntax_kind::SyntaxKind;
use gn_ast::tree::NodeRef;
use gn_options::ParseOptions;
use gn_parser::{parse, parse_with_options, tokenize};

/// Realistic build files that parse without errors.
pub const CORPUS: &[(&str, &str)] = &[
    (
        "BUILD.gn",
        r#"# Copyright notice.

import("//build/config/features.gni")
import("//build/config/ui.gni")

declare_args() {
  enable_tracing = true
  max_workers = 8
}

config("internal_config") {
  include_dirs = [ "include", "$target_gen_dir/include" ]
  defines = [ "MAX_WORKERS=$max_workers" ]
  if (is_debug && !is_official_build) {
    defines += [ "DEBUG_CHECKS=1" ]
  }
}

static_library("base") {
  sources = [
    "files/file.cc",
    "files/file.h",
    "strings/split.cc",
  ]
  public_configs = [ ":internal_config" ]
  deps = [ "//third_party/zlib" ]
  if (is_win) {
    sources += [ "win/registry.cc" ]
    libs = [ "advapi32.lib" ]
  } else if (is_mac || is_ios) {
    sources += [ "mac/bundle.mm" ]
  } else {
    sources -= [ "files/file.h" ]
  }
}
"#,
    ),
    (
        "toolchain.gni",
        r#"template("component_target") {
  _name = target_name
  _outputs = get_target_outputs(":${_name}_gen")
  foreach(output, _outputs) {
    sources += [ "${output}" ]
  }
  forward_variables_from(invoker, "*", [ "visibility" ])
  if (defined(invoker.output_name)) {
    output_name = invoker.output_name
  } else {
    output_name = "lib" + target_name
  }
  copies = invoker.data[0].files
  enabled = invoker.count >= 2 && invoker.count <= 16 || invoker.force == true
  _prefix = "\"quoted\" \$literal \\ $0x41"
}
"#,
    ),
    (
        "args.gn",
        r#"target_cpu = "x64"
is_component_build = false
symbol_level = -1
dcheck_always_on = !(is_debug == false)
extra_flags = [ -2, 3 - 1, (4 + 5) - 6 ]
scope = {
  a = 1
  b = [ ]
}
"#,
    ),
];

/// Statements that parse cleanly on their own.
pub const STATEMENTS: &[&str] = &[
    "a = 1",
    "b += [ \"x\", \"y\" ]",
    "c -= [ c[0] ]",
    "d.e = f.g[1]",
    "import(\"//a.gni\")",
    "group(\"all\") { deps = [ \":a\" ] }",
    "print(\"$a ${b.c} ${d[0]}\")",
    "if (a < 2) { b = a + 1 } else { b = 0 }",
    "if (x) { } else if (y) { } else { }",
    "foreach(item, list) { out += [ item ] }",
    "flag = !enabled || x == \"y\" && z != 3",
    "values = [ -1, 0, (a), [ ], { } ]",
    "assert(defined(invoker.sources), \"sources required\")",
    "# just a comment",
];

/// Pieces for building arbitrary, mostly malformed input.
pub const FRAGMENTS: &[&str] = &[
    "a", "b1", "_x", "if", "else", "foreach", "import", "true", "false", "0", "42", "-", "-7",
    "=", "+=", "-=", "==", "!=", "<", "<=", ">", ">=", "+", "&&", "||", "&", "|", "!", ".",
    ",", "(", ")", "[", "]", "{", "}", "\"", "\"s\"", "$", "${", "$a", "$0x1F", "\\", "\\\"",
    "\\$", "#c\n", "\n", " ", "\t", "\r\n", "@", "é", "\u{a0}",
];

/// The concatenated token texts of a parse of `source`.
pub fn reassemble(source: &str) -> String {
    tokenize(source).iter().map(|t| t.text.as_str()).collect()
}

pub fn has_errors(source: &str) -> bool {
    let arena = Bump::new();
    parse_with_options(&arena, source, &ParseOptions::default()).has_errors()
}

/// Re-parse the text of every error-free statement and expression, at any
/// depth, and compare shapes. Returns the first mismatch as
/// `(original, reparsed)`.
pub fn reparse_mismatch(source: &str) -> Option<(String, String)> {
    let arena = Bump::new();
    let file = parse(&arena, source);
    let mut pending = file.root().named_children();
    while let Some(node) = pending.pop() {
        if node.contains_error() {
            continue;
        }
        pending.extend(node.named_children());
        let text = file.text_of(node.range());
        if !node.is_statement() || splits_at_top_level(node, text) {
            continue;
        }
        let again = parse(&arena, text);
        let original = node.to_sexp();
        let reparsed = match again.statements {
            [only] => NodeRef::from_statement(only).to_sexp(),
            _ => again.to_sexp(),
        };
        if original != reparsed {
            return Some((original, reparsed));
        }
    }
    None
}

/// A subtraction written `a -1` only exists inside brackets; on its own the
/// same text is two statements.
fn splits_at_top_level(node: NodeRef<'_, '_>, text: &str) -> bool {
    node.kind() == SyntaxKind::BinaryExpression
        && text.as_bytes().windows(2).any(|w| w[0] == b'-' && w[1].is_ascii_digit())
}
