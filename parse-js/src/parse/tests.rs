use crate::ast::expr::Expr;
use crate::ast::import_export::{ExportNames, ImportNames};
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::ast::stx::TopLevel;
use crate::lex::doc_comment;
use crate::operator::OperatorName;
use crate::parse;

fn parse_ok(source: &str) -> Node<TopLevel> {
  parse(source).unwrap_or_else(|err| panic!("parse of {:?} failed: {:?}", source, err))
}

fn only_stmt(top: &Node<TopLevel>) -> &Stmt {
  assert_eq!(top.stx.body.len(), 1);
  top.stx.body[0].stx.as_ref()
}

#[test]
fn parses_var_declarations() {
  let top = parse_ok("var a = 1, b = 2;");
  let Stmt::VarDecl(decl) = only_stmt(&top) else {
    panic!("expected var decl");
  };
  assert_eq!(decl.stx.declarators.len(), 2);

  let top = parse_ok("const {x, y: z} = source;");
  let Stmt::VarDecl(decl) = only_stmt(&top) else {
    panic!("expected const decl");
  };
  assert_eq!(decl.stx.declarators.len(), 1);
}

#[test]
fn parses_functions_and_classes() {
  let top = parse_ok("function f(a, b) { return a + b; }");
  let Stmt::FuncDecl(decl) = only_stmt(&top) else {
    panic!("expected function decl");
  };
  assert_eq!(decl.stx.name.as_ref().unwrap().stx.name, "f");

  let top = parse_ok("class Child extends Parent { useParent(parent) {} static of() {} }");
  let Stmt::ClassDecl(decl) = only_stmt(&top) else {
    panic!("expected class decl");
  };
  assert!(decl.stx.extends.is_some());
  assert_eq!(decl.stx.members.len(), 2);
  assert!(decl.stx.members[1].stx.static_);
}

#[test]
fn parses_member_chains_and_calls() {
  let top = parse_ok("ns1.ns2.ns3.foo(bar[0], new Baz());");
  let Stmt::Expr(stmt) = only_stmt(&top) else {
    panic!("expected expression stmt");
  };
  let Expr::Call(call) = stmt.stx.expr.stx.as_ref() else {
    panic!("expected call");
  };
  let Expr::Member(member) = call.stx.callee.stx.as_ref() else {
    panic!("expected member callee");
  };
  assert_eq!(member.stx.right, "foo");
  assert_eq!(call.stx.arguments.len(), 2);
}

#[test]
fn keyword_allowed_as_property() {
  let top = parse_ok("ns.default(ns.name);");
  let Stmt::Expr(stmt) = only_stmt(&top) else {
    panic!("expected expression stmt");
  };
  let Expr::Call(call) = stmt.stx.expr.stx.as_ref() else {
    panic!("expected call");
  };
  let Expr::Member(member) = call.stx.callee.stx.as_ref() else {
    panic!("expected member callee");
  };
  assert_eq!(member.stx.right, "default");
}

#[test]
fn binary_precedence_groups_multiplication_tighter() {
  let top = parse_ok("x = a + b * c;");
  let Stmt::Expr(stmt) = only_stmt(&top) else {
    panic!("expected expression stmt");
  };
  let Expr::Assign(assign) = stmt.stx.expr.stx.as_ref() else {
    panic!("expected assignment");
  };
  let Expr::Binary(add) = assign.stx.value.stx.as_ref() else {
    panic!("expected binary value");
  };
  assert_eq!(add.stx.operator, OperatorName::Addition);
  let Expr::Binary(mul) = add.stx.right.stx.as_ref() else {
    panic!("expected nested multiplication");
  };
  assert_eq!(mul.stx.operator, OperatorName::Multiplication);
}

#[test]
fn parses_import_forms() {
  let top = parse_ok("import def, {a as b, default as c} from 'mod';");
  let Stmt::Import(import) = only_stmt(&top) else {
    panic!("expected import");
  };
  assert_eq!(import.stx.module, "mod");
  assert!(import.stx.default.is_some());
  let Some(ImportNames::Specific(names)) = &import.stx.names else {
    panic!("expected named imports");
  };
  assert_eq!(names.len(), 2);
  assert_eq!(names[0].stx.importable, "a");

  let top = parse_ok("import * as ns from 'mod';");
  let Stmt::Import(import) = only_stmt(&top) else {
    panic!("expected import");
  };
  assert!(matches!(import.stx.names, Some(ImportNames::All(_))));

  let top = parse_ok("import 'mod';");
  let Stmt::Import(import) = only_stmt(&top) else {
    panic!("expected import");
  };
  assert!(import.stx.default.is_none());
  assert!(import.stx.names.is_none());
}

#[test]
fn parses_export_forms() {
  let top = parse_ok("export var a = 1, b;");
  let Stmt::VarDecl(decl) = only_stmt(&top) else {
    panic!("expected var decl");
  };
  assert!(decl.stx.export);

  let top = parse_ok("export default function f() {}");
  let Stmt::FuncDecl(decl) = only_stmt(&top) else {
    panic!("expected function decl");
  };
  assert!(decl.stx.export_default);

  let top = parse_ok("export default 'someString';");
  assert!(matches!(only_stmt(&top), Stmt::ExportDefaultExpr(_)));

  let top = parse_ok("export {f as foo, b} from 'mod';");
  let Stmt::ExportList(list) = only_stmt(&top) else {
    panic!("expected export list");
  };
  assert_eq!(list.stx.from.as_deref(), Some("mod"));
  let ExportNames::Specific(names) = &list.stx.names else {
    panic!("expected specific names");
  };
  assert_eq!(names[0].stx.exportable, "f");
  assert_eq!(names[0].stx.alias.stx.name, "foo");
  assert_eq!(names[1].stx.alias.stx.name, "b");

  let top = parse_ok("export * from 'mod';");
  let Stmt::ExportList(list) = only_stmt(&top) else {
    panic!("expected export list");
  };
  assert!(matches!(list.stx.names, ExportNames::All(None)));
}

#[test]
fn attaches_doc_comments_to_statements() {
  let top = parse_ok("/** @type {number} */ var x = 3;\nvar y;");
  let doc = doc_comment(&top.stx.body[0].assoc).expect("doc on first stmt");
  assert_eq!(doc.text, " @type {number} ");
  assert!(doc_comment(&top.stx.body[1].assoc).is_none());
}

#[test]
fn fileoverview_doc_attaches_to_root() {
  let top = parse_ok("/** @fileoverview yes */ var x;");
  assert!(doc_comment(&top.assoc).is_some());
  assert!(doc_comment(&top.stx.body[0].assoc).is_none());
}

#[test]
fn asi_accepts_line_breaks_and_eof() {
  parse_ok("var a = 1\nvar b = 2");
  parse_ok("use(name)");
  assert!(parse("var a = 1 var b").is_err());
}

#[test]
fn rejects_invalid_assignment_targets() {
  assert!(parse("1 = 2;").is_err());
  assert!(parse("f() = 2;").is_err());
}

#[test]
fn parses_for_forms() {
  parse_ok("for (var i = 0; i < n; i++) { use(i); }");
  parse_ok("for (const k in obj) use(k);");
  parse_ok("for (let v of items) { use(v); }");
}

#[test]
fn ast_serializes_with_type_tags() {
  let top = parse_ok("use(name);");
  let json = serde_json::to_value(&top.stx.body[0]).unwrap();
  assert_eq!(json["$t"], "Expr");
  assert_eq!(json["expr"]["$t"], "Call");
  assert_eq!(json["expr"]["callee"]["$t"], "Id");
  assert_eq!(json["expr"]["callee"]["name"], "use");
}

#[test]
fn parses_arrow_functions() {
  let top = parse_ok("const f = (a, b) => a + b;");
  let Stmt::VarDecl(decl) = only_stmt(&top) else {
    panic!("expected decl");
  };
  let init = decl.stx.declarators[0].initializer.as_ref().unwrap();
  assert!(matches!(init.stx.as_ref(), Expr::Arrow(_)));
  parse_ok("const g = x => use(x);");
}
