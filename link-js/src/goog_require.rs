//! The `goog.require` local transform, run before renaming.
//!
//! Rewrites
//!   const foo = goog.require('bar.foo');
//! to
//!   goog.require('bar.foo');
//!   const foo = bar.foo;
//! so the require call survives verbatim while the binding becomes an
//! ordinary qualified-name alias the renamer can process.

use diagnostics::Diagnostic;
use diagnostics::FileId;
use parse_js::ast::decl::VarDeclMode;
use parse_js::ast::expr::{Expr, IdExpr, MemberExpr};
use parse_js::ast::stmt::ExprStmt;
use parse_js::ast::node::Node;
use parse_js::ast::pat::Pat;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;

use crate::errors;

pub(crate) fn rewrite_requires(
  top: &mut Node<TopLevel>,
  file: FileId,
  diagnostics: &mut Vec<Diagnostic>,
) {
  let body = std::mem::take(&mut top.stx.body);
  let mut new_body = Vec::with_capacity(body.len());
  for mut stmt in body {
    let hoisted = rewrite_decl(&mut stmt, file, diagnostics);
    new_body.extend(hoisted);
    new_body.push(stmt);
  }
  top.stx.body = new_body;
}

/// Transforms the declarators of a top-level declaration; returns the
/// hoisted require calls to insert before it.
fn rewrite_decl(
  stmt: &mut Node<Stmt>,
  file: FileId,
  diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Node<Stmt>> {
  let stmt_loc = stmt.loc;
  let Stmt::VarDecl(decl) = stmt.stx.as_mut() else {
    return Vec::new();
  };
  let mut hoisted = Vec::new();
  let mut reported_non_const = false;
  for declarator in &mut decl.stx.declarators {
    let Some(initializer) = &mut declarator.initializer else {
      continue;
    };
    let Some(namespace) = goog_require_namespace(initializer) else {
      continue;
    };
    if decl.stx.mode != VarDeclMode::Const && !reported_non_const {
      diagnostics.push(errors::lhs_of_goog_require_must_be_const(file, stmt_loc));
      reported_non_const = true;
    }
    // Canonicalize shorthand destructuring so renaming the bound name
    // cannot disturb the property key:
    //   const {x} = goog.require('y')  ->  const {x: x} = goog.require('y')
    if let Pat::Obj(obj) = declarator.pattern.stx.pat.stx.as_mut() {
      for prop in &mut obj.stx.properties {
        prop.stx.shorthand = false;
      }
    }
    let call = std::mem::replace(initializer, qualified_name(&namespace, stmt_loc));
    hoisted.push(
      call
        .wrap(|expr| ExprStmt { expr })
        .into_wrapped(),
    );
  }
  hoisted
}

/// The required namespace string, if this expression is a direct
/// `goog.require('...')` call.
fn goog_require_namespace(expr: &Node<Expr>) -> Option<String> {
  let Expr::Call(call) = expr.stx.as_ref() else {
    return None;
  };
  let Expr::Member(member) = call.stx.callee.stx.as_ref() else {
    return None;
  };
  if member.stx.right != "require" {
    return None;
  }
  let Expr::Id(id) = member.stx.left.stx.as_ref() else {
    return None;
  };
  if id.stx.name != "goog" {
    return None;
  }
  let [arg] = call.stx.arguments.as_slice() else {
    return None;
  };
  if arg.stx.spread {
    return None;
  }
  let Expr::LitStr(lit) = arg.stx.value.stx.as_ref() else {
    return None;
  };
  Some(lit.stx.value.clone())
}

/// Builds `foo.bar.baz` from the dotted namespace string.
fn qualified_name(namespace: &str, loc: Loc) -> Node<Expr> {
  let mut parts = namespace.split('.');
  let root = parts.next().expect("namespace is non-empty");
  let mut expr: Node<Expr> = Node::new(loc, IdExpr {
    name: root.to_string(),
  })
  .into_wrapped();
  for part in parts {
    expr = Node::new(loc, MemberExpr {
      left: expr,
      right: part.to_string(),
    })
    .into_wrapped();
  }
  expr
}
