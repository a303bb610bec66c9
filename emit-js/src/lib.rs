//! Renders a `parse-js` tree back to JavaScript source.
//!
//! Output is deterministic and layout-normalized rather than faithful to the
//! original formatting: one top-level statement per line, single spaces
//! inside braces, precedence-driven parenthesization. Doc comments captured
//! by the parser are re-emitted in front of the node that owns them.

mod expr;
mod stmt;

pub use expr::emit_expr;
pub use stmt::emit_stmt;

use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;
use parse_js::lex::doc_comment;

/// Emits a whole file, one top-level statement per line, with a trailing
/// newline when non-empty.
pub fn emit_top_level(top: &Node<TopLevel>) -> String {
  let mut out = String::new();
  if let Some(doc) = doc_comment(&top.assoc) {
    out.push_str("/**");
    out.push_str(&doc.text);
    out.push_str("*/\n");
  }
  for stmt in &top.stx.body {
    let rendered = stmt::emit_stmt(stmt);
    if rendered.is_empty() {
      continue;
    }
    out.push_str(&rendered);
    out.push('\n');
  }
  out
}
