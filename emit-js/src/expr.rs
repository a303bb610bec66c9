use parse_js::ast::class_or_object::{ClassMember, ClassOrObjKey, ObjMember};
use parse_js::ast::expr::{CallArg, Expr, LitArrElem};
use parse_js::ast::func::{Func, FuncBody};
use parse_js::ast::node::Node;
use parse_js::ast::pat::Pat;

use crate::stmt::emit_stmt_list;

// Binding strength used for parenthesization decisions. Binary operators
// occupy 5..=15 (4 + their parse precedence); everything tighter than any
// binary operator starts at 16.
const PREC_ASSIGN: u8 = 2;
const PREC_COND: u8 = 3;
const PREC_UNARY: u8 = 16;
const PREC_POSTFIX: u8 = 17;
const PREC_NEW_NO_ARGS: u8 = 18;
const PREC_MEMBER: u8 = 19;
const PREC_PRIMARY: u8 = 20;

fn precedence(expr: &Expr) -> u8 {
  match expr {
    Expr::Arrow(_) | Expr::Assign(_) => PREC_ASSIGN,
    Expr::Cond(_) => PREC_COND,
    Expr::Binary(binary) => 4 + binary.stx.operator.binary_precedence().unwrap_or(0),
    Expr::Unary(_) => PREC_UNARY,
    Expr::UnaryPostfix(_) => PREC_POSTFIX,
    Expr::New(new) => {
      if new.stx.arguments.is_some() {
        PREC_MEMBER
      } else {
        PREC_NEW_NO_ARGS
      }
    }
    Expr::Call(_) | Expr::Member(_) | Expr::ComputedMember(_) => PREC_MEMBER,
    _ => PREC_PRIMARY,
  }
}

/// Emits `expr` into `out`, wrapping in parentheses when its precedence is
/// below what the surrounding context requires.
fn emit_with_min_prec(out: &mut String, expr: &Node<Expr>, min_prec: u8) {
  if precedence(&expr.stx) < min_prec {
    out.push('(');
    emit_expr_into(out, expr);
    out.push(')');
  } else {
    emit_expr_into(out, expr);
  }
}

pub fn emit_expr(expr: &Node<Expr>) -> String {
  let mut out = String::new();
  emit_expr_into(&mut out, expr);
  out
}

pub(crate) fn emit_expr_into(out: &mut String, expr: &Node<Expr>) {
  match expr.stx.as_ref() {
    Expr::Arrow(arrow) => emit_arrow(out, &arrow.stx.func),
    Expr::Assign(assign) => {
      emit_with_min_prec(out, &assign.stx.target, PREC_UNARY);
      out.push(' ');
      out.push_str(assign.stx.operator.symbol());
      out.push(' ');
      emit_with_min_prec(out, &assign.stx.value, PREC_ASSIGN);
    }
    Expr::Binary(binary) => {
      let prec = 4 + binary.stx.operator.binary_precedence().unwrap_or(0);
      emit_with_min_prec(out, &binary.stx.left, prec);
      out.push(' ');
      out.push_str(binary.stx.operator.symbol());
      out.push(' ');
      emit_with_min_prec(out, &binary.stx.right, prec + 1);
    }
    Expr::Call(call) => {
      emit_with_min_prec(out, &call.stx.callee, PREC_MEMBER);
      emit_call_args(out, &call.stx.arguments);
    }
    Expr::Class(class) => {
      out.push_str("class");
      if let Some(name) = &class.stx.name {
        out.push(' ');
        out.push_str(&name.stx.name);
      }
      emit_class_tail(out, class.stx.extends.as_ref(), &class.stx.members);
    }
    Expr::ComputedMember(computed) => {
      emit_with_min_prec(out, &computed.stx.object, PREC_MEMBER);
      out.push('[');
      emit_expr_into(out, &computed.stx.member);
      out.push(']');
    }
    Expr::Cond(cond) => {
      emit_with_min_prec(out, &cond.stx.test, PREC_COND + 1);
      out.push_str(" ? ");
      emit_with_min_prec(out, &cond.stx.consequent, PREC_ASSIGN);
      out.push_str(" : ");
      emit_with_min_prec(out, &cond.stx.alternate, PREC_ASSIGN);
    }
    Expr::Func(func) => {
      out.push_str("function");
      if let Some(name) = &func.stx.name {
        out.push(' ');
        out.push_str(&name.stx.name);
      }
      emit_func_tail(out, &func.stx.func);
    }
    Expr::Id(id) => out.push_str(&id.stx.name),
    Expr::Member(member) => {
      emit_with_min_prec(out, &member.stx.left, PREC_MEMBER);
      out.push('.');
      out.push_str(&member.stx.right);
    }
    Expr::New(new) => {
      out.push_str("new ");
      // The callee of `new` must not itself contain a call; that call would
      // capture the argument list.
      let callee_needs_parens = precedence(&new.stx.callee.stx) < PREC_MEMBER
        || matches!(new.stx.callee.stx.as_ref(), Expr::Call(_));
      if callee_needs_parens {
        out.push('(');
        emit_expr_into(out, &new.stx.callee);
        out.push(')');
      } else {
        emit_expr_into(out, &new.stx.callee);
      }
      if let Some(arguments) = &new.stx.arguments {
        emit_call_args(out, arguments);
      }
    }
    Expr::This(_) => out.push_str("this"),
    Expr::Unary(unary) => {
      out.push_str(unary.stx.operator.symbol());
      if unary.stx.operator.is_keyword() {
        out.push(' ');
      }
      emit_with_min_prec(out, &unary.stx.argument, PREC_UNARY);
    }
    Expr::UnaryPostfix(postfix) => {
      emit_with_min_prec(out, &postfix.stx.argument, PREC_POSTFIX);
      out.push_str(postfix.stx.operator.symbol());
    }
    Expr::LitArr(arr) => {
      out.push('[');
      let mut first = true;
      for elem in &arr.stx.elements {
        if !first {
          out.push_str(", ");
        }
        first = false;
        match elem {
          LitArrElem::Single(value) => emit_with_min_prec(out, value, PREC_ASSIGN),
          LitArrElem::Spread(value) => {
            out.push_str("...");
            emit_with_min_prec(out, value, PREC_ASSIGN);
          }
          LitArrElem::Empty => {}
        }
      }
      out.push(']');
    }
    Expr::LitBool(lit) => out.push_str(if lit.stx.value { "true" } else { "false" }),
    Expr::LitNull(_) => out.push_str("null"),
    Expr::LitNum(lit) => out.push_str(&lit.stx.raw),
    Expr::LitObj(obj) => emit_obj_literal(out, &obj.stx.members),
    Expr::LitStr(lit) => out.push_str(&lit.stx.raw),
  }
}

fn emit_obj_literal(out: &mut String, members: &[Node<ObjMember>]) {
  if members.is_empty() {
    out.push_str("{}");
    return;
  }
  out.push('{');
  let mut first = true;
  for member in members {
    if !first {
      out.push_str(", ");
    }
    first = false;
    match &member.stx.key {
      ClassOrObjKey::Direct(key) => {
        let shorthand_still_valid = member.stx.shorthand
          && matches!(member.stx.value.stx.as_ref(), Expr::Id(id) if &id.stx.name == key);
        if shorthand_still_valid {
          out.push_str(key);
        } else {
          out.push_str(key);
          out.push_str(": ");
          emit_with_min_prec(out, &member.stx.value, PREC_ASSIGN);
        }
      }
      ClassOrObjKey::Computed(key) => {
        out.push('[');
        emit_expr_into(out, key);
        out.push_str("]: ");
        emit_with_min_prec(out, &member.stx.value, PREC_ASSIGN);
      }
    }
  }
  out.push('}');
}

fn emit_call_args(out: &mut String, arguments: &[Node<CallArg>]) {
  out.push('(');
  let mut first = true;
  for arg in arguments {
    if !first {
      out.push_str(", ");
    }
    first = false;
    if arg.stx.spread {
      out.push_str("...");
    }
    emit_with_min_prec(out, &arg.stx.value, PREC_ASSIGN);
  }
  out.push(')');
}

fn emit_arrow(out: &mut String, func: &Node<Func>) {
  out.push('(');
  emit_parameters(out, func);
  out.push_str(") => ");
  match &func.stx.body {
    FuncBody::Block(body) => emit_braced_body(out, body),
    FuncBody::Expression(expr) => {
      // An object literal body would parse as a block.
      if matches!(expr.stx.as_ref(), Expr::LitObj(_)) {
        out.push('(');
        emit_expr_into(out, expr);
        out.push(')');
      } else {
        emit_with_min_prec(out, expr, PREC_ASSIGN);
      }
    }
  }
}

pub(crate) fn emit_func_tail(out: &mut String, func: &Node<Func>) {
  out.push('(');
  emit_parameters(out, func);
  out.push_str(") ");
  match &func.stx.body {
    FuncBody::Block(body) => emit_braced_body(out, body),
    FuncBody::Expression(expr) => emit_expr_into(out, expr),
  }
}

fn emit_parameters(out: &mut String, func: &Node<Func>) {
  let mut first = true;
  for param in &func.stx.parameters {
    if !first {
      out.push_str(", ");
    }
    first = false;
    if param.stx.rest {
      out.push_str("...");
    }
    emit_pat(out, &param.stx.pattern.stx.pat);
    if let Some(default_value) = &param.stx.default_value {
      out.push_str(" = ");
      emit_with_min_prec(out, default_value, PREC_ASSIGN);
    }
  }
}

pub(crate) fn emit_braced_body(out: &mut String, body: &[Node<parse_js::ast::stmt::Stmt>]) {
  let rendered = emit_stmt_list(body);
  if rendered.is_empty() {
    out.push_str("{}");
  } else {
    out.push_str("{ ");
    out.push_str(&rendered);
    out.push_str(" }");
  }
}

pub(crate) fn emit_class_tail(
  out: &mut String,
  extends: Option<&Node<Expr>>,
  members: &[Node<ClassMember>],
) {
  if let Some(extends) = extends {
    out.push_str(" extends ");
    emit_with_min_prec(out, extends, PREC_MEMBER);
  }
  if members.is_empty() {
    out.push_str(" {}");
    return;
  }
  out.push_str(" { ");
  let mut first = true;
  for member in members {
    if !first {
      out.push(' ');
    }
    first = false;
    if let Some(doc) = parse_js::lex::doc_comment(&member.assoc) {
      out.push_str("/**");
      out.push_str(&doc.text);
      out.push_str("*/ ");
    }
    if member.stx.static_ {
      out.push_str("static ");
    }
    match &member.stx.key {
      ClassOrObjKey::Direct(key) => out.push_str(key),
      ClassOrObjKey::Computed(key) => {
        out.push('[');
        emit_expr_into(out, key);
        out.push(']');
      }
    }
    emit_func_tail(out, &member.stx.func);
  }
  out.push_str(" }");
}

pub(crate) fn emit_pat(out: &mut String, pat: &Node<Pat>) {
  match pat.stx.as_ref() {
    Pat::Id(id) => out.push_str(&id.stx.name),
    Pat::Obj(obj) => {
      out.push('{');
      let mut first = true;
      for prop in &obj.stx.properties {
        if !first {
          out.push_str(", ");
        }
        first = false;
        let shorthand_still_valid = prop.stx.shorthand
          && matches!(
            prop.stx.target.stx.as_ref(),
            Pat::Id(id) if id.stx.name == prop.stx.key
          );
        if shorthand_still_valid {
          out.push_str(&prop.stx.key);
        } else {
          out.push_str(&prop.stx.key);
          out.push_str(": ");
          emit_pat(out, &prop.stx.target);
        }
        if let Some(default_value) = &prop.stx.default_value {
          out.push_str(" = ");
          emit_with_min_prec(out, default_value, PREC_ASSIGN);
        }
      }
      if let Some(rest) = &obj.stx.rest {
        if !first {
          out.push_str(", ");
        }
        out.push_str("...");
        out.push_str(&rest.stx.name);
      }
      out.push('}');
    }
    Pat::Arr(arr) => {
      out.push('[');
      let mut first = true;
      for elem in &arr.stx.elements {
        if !first {
          out.push_str(", ");
        }
        first = false;
        if let Some(elem) = elem {
          emit_pat(out, &elem.target);
          if let Some(default_value) = &elem.default_value {
            out.push_str(" = ");
            emit_with_min_prec(out, default_value, PREC_ASSIGN);
          }
        }
      }
      if let Some(rest) = &arr.stx.rest {
        if !first {
          out.push_str(", ");
        }
        out.push_str("...");
        emit_pat(out, rest);
      }
      out.push(']');
    }
  }
}
