use parse_js::ast::decl::{ClassDecl, FuncDecl, VarDecl};
use parse_js::ast::expr::Expr;
use parse_js::ast::import_export::{ExportNames, ImportNames};
use parse_js::ast::node::Node;
use parse_js::ast::stmt::{ForInOfLhs, ForTripleStmtInit, Stmt};
use parse_js::lex::doc_comment;

use crate::expr::{emit_braced_body, emit_class_tail, emit_expr_into, emit_func_tail, emit_pat};

pub fn emit_stmt(stmt: &Node<Stmt>) -> String {
  let mut out = String::new();
  if let Some(doc) = doc_comment(&stmt.assoc) {
    out.push_str("/**");
    out.push_str(&doc.text);
    out.push_str("*/\n");
  }
  emit_stmt_into(&mut out, stmt);
  out
}

/// Emits a nested statement list, single-space separated, skipping empties.
pub(crate) fn emit_stmt_list(body: &[Node<Stmt>]) -> String {
  let mut out = String::new();
  for stmt in body {
    if matches!(stmt.stx.as_ref(), Stmt::Empty(_)) {
      continue;
    }
    if !out.is_empty() {
      out.push(' ');
    }
    if let Some(doc) = doc_comment(&stmt.assoc) {
      out.push_str("/**");
      out.push_str(&doc.text);
      out.push_str("*/ ");
    }
    emit_stmt_into(&mut out, stmt);
  }
  out
}

/// Whether an expression statement would begin with `{`, `function` or
/// `class` and therefore needs wrapping parentheses.
fn leftmost_needs_parens(expr: &Expr) -> bool {
  match expr {
    Expr::LitObj(_) | Expr::Func(_) | Expr::Class(_) => true,
    Expr::Assign(assign) => leftmost_needs_parens(&assign.stx.target.stx),
    Expr::Binary(binary) => leftmost_needs_parens(&binary.stx.left.stx),
    Expr::Call(call) => leftmost_needs_parens(&call.stx.callee.stx),
    Expr::Member(member) => leftmost_needs_parens(&member.stx.left.stx),
    Expr::ComputedMember(computed) => leftmost_needs_parens(&computed.stx.object.stx),
    Expr::Cond(cond) => leftmost_needs_parens(&cond.stx.test.stx),
    Expr::UnaryPostfix(postfix) => leftmost_needs_parens(&postfix.stx.argument.stx),
    _ => false,
  }
}

fn emit_stmt_into(out: &mut String, stmt: &Node<Stmt>) {
  match stmt.stx.as_ref() {
    Stmt::Block(block) => emit_braced_body(out, &block.stx.body),
    Stmt::Break(_) => out.push_str("break;"),
    Stmt::Continue(_) => out.push_str("continue;"),
    Stmt::Debugger(_) => out.push_str("debugger;"),
    Stmt::DoWhile(do_while) => {
      out.push_str("do ");
      emit_stmt_into(out, &do_while.stx.body);
      out.push_str(" while (");
      emit_expr_into(out, &do_while.stx.condition);
      out.push_str(");");
    }
    Stmt::Empty(_) => {}
    Stmt::ExportDefaultExpr(export) => {
      out.push_str("export default ");
      emit_expr_into(out, &export.stx.expression);
      out.push(';');
    }
    Stmt::ExportList(list) => emit_export_list(out, list),
    Stmt::Expr(expr_stmt) => {
      if leftmost_needs_parens(&expr_stmt.stx.expr.stx) {
        out.push('(');
        emit_expr_into(out, &expr_stmt.stx.expr);
        out.push(')');
      } else {
        emit_expr_into(out, &expr_stmt.stx.expr);
      }
      out.push(';');
    }
    Stmt::ForIn(for_in) => {
      out.push_str("for (");
      emit_for_in_of_lhs(out, &for_in.stx.lhs);
      out.push_str(" in ");
      emit_expr_into(out, &for_in.stx.rhs);
      out.push_str(") ");
      emit_braced_body(out, &for_in.stx.body.stx.body);
    }
    Stmt::ForOf(for_of) => {
      out.push_str("for (");
      emit_for_in_of_lhs(out, &for_of.stx.lhs);
      out.push_str(" of ");
      emit_expr_into(out, &for_of.stx.rhs);
      out.push_str(") ");
      emit_braced_body(out, &for_of.stx.body.stx.body);
    }
    Stmt::ForTriple(for_triple) => {
      out.push_str("for (");
      match &for_triple.stx.init {
        ForTripleStmtInit::None => {}
        ForTripleStmtInit::Expr(expr) => emit_expr_into(out, expr),
        ForTripleStmtInit::Decl(decl) => emit_var_decl(out, decl),
      }
      out.push(';');
      if let Some(cond) = &for_triple.stx.cond {
        out.push(' ');
        emit_expr_into(out, cond);
      }
      out.push(';');
      if let Some(post) = &for_triple.stx.post {
        out.push(' ');
        emit_expr_into(out, post);
      }
      out.push_str(") ");
      emit_braced_body(out, &for_triple.stx.body.stx.body);
    }
    Stmt::If(if_stmt) => {
      out.push_str("if (");
      emit_expr_into(out, &if_stmt.stx.test);
      out.push_str(") ");
      emit_stmt_into(out, &if_stmt.stx.consequent);
      if let Some(alternate) = &if_stmt.stx.alternate {
        out.push_str(" else ");
        emit_stmt_into(out, alternate);
      }
    }
    Stmt::Import(import) => {
      out.push_str("import ");
      let mut wrote_bindings = false;
      if let Some(default) = &import.stx.default {
        emit_pat(out, &default.stx.pat);
        wrote_bindings = true;
      }
      match &import.stx.names {
        Some(ImportNames::All(alias)) => {
          if wrote_bindings {
            out.push_str(", ");
          }
          out.push_str("* as ");
          emit_pat(out, &alias.stx.pat);
          wrote_bindings = true;
        }
        Some(ImportNames::Specific(names)) => {
          if wrote_bindings {
            out.push_str(", ");
          }
          out.push('{');
          let mut first = true;
          for name in names {
            if !first {
              out.push_str(", ");
            }
            first = false;
            let alias = pat_name(&name.stx.alias.stx.pat);
            if name.stx.importable == alias {
              out.push_str(&name.stx.importable);
            } else {
              out.push_str(&name.stx.importable);
              out.push_str(" as ");
              out.push_str(alias);
            }
          }
          out.push('}');
          wrote_bindings = true;
        }
        None => {}
      }
      if wrote_bindings {
        out.push_str(" from ");
      }
      out.push('\'');
      out.push_str(&import.stx.module);
      out.push_str("';");
    }
    Stmt::Return(ret) => {
      match &ret.stx.value {
        Some(value) => {
          out.push_str("return ");
          emit_expr_into(out, value);
          out.push(';');
        }
        None => out.push_str("return;"),
      }
    }
    Stmt::Throw(throw) => {
      out.push_str("throw ");
      emit_expr_into(out, &throw.stx.value);
      out.push(';');
    }
    Stmt::Try(try_stmt) => {
      out.push_str("try ");
      emit_braced_body(out, &try_stmt.stx.wrapped.stx.body);
      if let Some(catch) = &try_stmt.stx.catch {
        out.push_str(" catch ");
        if let Some(parameter) = &catch.stx.parameter {
          out.push('(');
          emit_pat(out, &parameter.stx.pat);
          out.push_str(") ");
        }
        emit_braced_body(out, &catch.stx.body);
      }
      if let Some(finally) = &try_stmt.stx.finally {
        out.push_str(" finally ");
        emit_braced_body(out, &finally.stx.body);
      }
    }
    Stmt::While(while_stmt) => {
      out.push_str("while (");
      emit_expr_into(out, &while_stmt.stx.condition);
      out.push_str(") ");
      emit_stmt_into(out, &while_stmt.stx.body);
    }
    Stmt::ClassDecl(decl) => emit_class_decl(out, decl),
    Stmt::FuncDecl(decl) => emit_func_decl(out, decl),
    Stmt::VarDecl(decl) => {
      emit_var_decl(out, decl);
      out.push(';');
    }
  }
}

fn pat_name(pat: &Node<parse_js::ast::pat::Pat>) -> &str {
  match pat.stx.as_ref() {
    parse_js::ast::pat::Pat::Id(id) => &id.stx.name,
    _ => "",
  }
}

fn emit_for_in_of_lhs(out: &mut String, lhs: &ForInOfLhs) {
  match lhs {
    ForInOfLhs::Assign(pat) => emit_pat(out, pat),
    ForInOfLhs::Decl(decl) => {
      out.push_str(decl.mode.keyword());
      out.push(' ');
      emit_pat(out, &decl.pat.stx.pat);
    }
  }
}

fn emit_export_list(out: &mut String, list: &Node<parse_js::ast::stmt::ExportListStmt>) {
  out.push_str("export ");
  match &list.stx.names {
    ExportNames::All(alias) => {
      out.push('*');
      if let Some(alias) = alias {
        out.push_str(" as ");
        out.push_str(&alias.stx.name);
      }
    }
    ExportNames::Specific(names) => {
      out.push('{');
      let mut first = true;
      for name in names {
        if !first {
          out.push_str(", ");
        }
        first = false;
        if name.stx.exportable == name.stx.alias.stx.name {
          out.push_str(&name.stx.exportable);
        } else {
          out.push_str(&name.stx.exportable);
          out.push_str(" as ");
          out.push_str(&name.stx.alias.stx.name);
        }
      }
      out.push('}');
    }
  }
  if let Some(from) = &list.stx.from {
    out.push_str(" from '");
    out.push_str(from);
    out.push('\'');
  }
  out.push(';');
}

fn emit_var_decl(out: &mut String, decl: &Node<VarDecl>) {
  if decl.stx.export {
    out.push_str("export ");
  }
  out.push_str(decl.stx.mode.keyword());
  out.push(' ');
  let mut first = true;
  for declarator in &decl.stx.declarators {
    if !first {
      out.push_str(", ");
    }
    first = false;
    emit_pat(out, &declarator.pattern.stx.pat);
    if let Some(initializer) = &declarator.initializer {
      out.push_str(" = ");
      // Sequence-free: the initializer grammar bottoms out at assignment.
      emit_expr_into(out, initializer);
    }
  }
}

fn emit_func_decl(out: &mut String, decl: &Node<FuncDecl>) {
  if decl.stx.export {
    out.push_str("export ");
  }
  if decl.stx.export_default {
    out.push_str("export default ");
  }
  out.push_str("function");
  if let Some(name) = &decl.stx.name {
    out.push(' ');
    out.push_str(&name.stx.name);
  }
  emit_func_tail(out, &decl.stx.function);
}

fn emit_class_decl(out: &mut String, decl: &Node<ClassDecl>) {
  if decl.stx.export {
    out.push_str("export ");
  }
  if decl.stx.export_default {
    out.push_str("export default ");
  }
  out.push_str("class");
  if let Some(name) = &decl.stx.name {
    out.push(' ');
    out.push_str(&name.stx.name);
  }
  emit_class_tail(out, decl.stx.extends.as_ref(), &decl.stx.members);
}
