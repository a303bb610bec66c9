//! Just enough scope analysis for the rewrite pass.
//!
//! The rewriter only ever asks one question of a name: does it resolve to
//! the module scope, to some nested local scope, or to nothing at all? A
//! full symbol table is unnecessary; a stack of declared-name sets driven by
//! the traversal answers it.

use ahash::{HashSet, HashSetExt};
use parse_js::ast::decl::{PatDecl, VarDeclMode};
use parse_js::ast::func::{Func, FuncBody};
use parse_js::ast::node::Node;
use parse_js::ast::pat::Pat;
use parse_js::ast::stmt::{ForInOfLhs, ForTripleStmtInit, Stmt};
use parse_js::ast::stx::TopLevel;

/// Where a name resolved.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NameResolution {
  /// Declared at module top level (or an import-introduced binding).
  Module,
  /// Declared in some enclosing non-module scope.
  Local,
  /// Not declared anywhere in the file.
  Unknown,
}

/// Stack of declared-name sets. Index 0 is always the module scope.
pub struct ScopeStack {
  scopes: Vec<HashSet<String>>,
}

impl ScopeStack {
  pub fn new(module_scope: HashSet<String>) -> Self {
    Self {
      scopes: vec![module_scope],
    }
  }

  pub fn push(&mut self, names: HashSet<String>) {
    self.scopes.push(names);
  }

  pub fn pop(&mut self) {
    assert!(self.scopes.len() > 1, "module scope must stay");
    self.scopes.pop();
  }

  /// Whether the traversal currently sits directly in module scope.
  pub fn at_module_scope(&self) -> bool {
    self.scopes.len() == 1
  }

  pub fn module_scope(&self) -> &HashSet<String> {
    &self.scopes[0]
  }

  pub fn resolve(&self, name: &str) -> NameResolution {
    for (idx, scope) in self.scopes.iter().enumerate().rev() {
      if scope.contains(name) {
        return if idx == 0 {
          NameResolution::Module
        } else {
          NameResolution::Local
        };
      }
    }
    NameResolution::Unknown
  }
}

pub fn pat_names(pat: &Node<Pat>, out: &mut HashSet<String>) {
  match pat.stx.as_ref() {
    Pat::Id(id) => {
      out.insert(id.stx.name.clone());
    }
    Pat::Obj(obj) => {
      for prop in &obj.stx.properties {
        pat_names(&prop.stx.target, out);
      }
      if let Some(rest) = &obj.stx.rest {
        out.insert(rest.stx.name.clone());
      }
    }
    Pat::Arr(arr) => {
      for elem in arr.stx.elements.iter().flatten() {
        pat_names(&elem.target, out);
      }
      if let Some(rest) = &arr.stx.rest {
        pat_names(rest, out);
      }
    }
  }
}

fn pat_decl_names(pat_decl: &Node<PatDecl>, out: &mut HashSet<String>) {
  pat_names(&pat_decl.stx.pat, out);
}

/// Names declared directly by a statement list: `let`/`const` declarators,
/// classes, and function declarations (block-scoped in modules).
pub fn lexical_names(stmts: &[Node<Stmt>], out: &mut HashSet<String>) {
  for stmt in stmts {
    match stmt.stx.as_ref() {
      Stmt::VarDecl(decl) if decl.stx.mode != VarDeclMode::Var => {
        for declarator in &decl.stx.declarators {
          pat_decl_names(&declarator.pattern, out);
        }
      }
      Stmt::FuncDecl(decl) => {
        if let Some(name) = &decl.stx.name {
          out.insert(name.stx.name.clone());
        }
      }
      Stmt::ClassDecl(decl) => {
        if let Some(name) = &decl.stx.name {
          out.insert(name.stx.name.clone());
        }
      }
      _ => {}
    }
  }
}

/// `var` names hoisted to the nearest closure: collected through every
/// nested construct except function bodies.
pub fn hoisted_var_names(stmts: &[Node<Stmt>], out: &mut HashSet<String>) {
  for stmt in stmts {
    hoisted_var_names_of_stmt(stmt, out);
  }
}

fn hoisted_var_names_of_stmt(stmt: &Node<Stmt>, out: &mut HashSet<String>) {
  match stmt.stx.as_ref() {
    Stmt::VarDecl(decl) => {
      if decl.stx.mode == VarDeclMode::Var {
        for declarator in &decl.stx.declarators {
          pat_decl_names(&declarator.pattern, out);
        }
      }
    }
    Stmt::Block(block) => hoisted_var_names(&block.stx.body, out),
    Stmt::If(if_stmt) => {
      hoisted_var_names_of_stmt(&if_stmt.stx.consequent, out);
      if let Some(alternate) = &if_stmt.stx.alternate {
        hoisted_var_names_of_stmt(alternate, out);
      }
    }
    Stmt::While(while_stmt) => hoisted_var_names_of_stmt(&while_stmt.stx.body, out),
    Stmt::DoWhile(do_while) => hoisted_var_names_of_stmt(&do_while.stx.body, out),
    Stmt::ForTriple(for_triple) => {
      if let ForTripleStmtInit::Decl(decl) = &for_triple.stx.init {
        if decl.stx.mode == VarDeclMode::Var {
          for declarator in &decl.stx.declarators {
            pat_decl_names(&declarator.pattern, out);
          }
        }
      }
      hoisted_var_names(&for_triple.stx.body.stx.body, out);
    }
    Stmt::ForIn(for_in) => {
      hoisted_for_in_of_lhs(&for_in.stx.lhs, out);
      hoisted_var_names(&for_in.stx.body.stx.body, out);
    }
    Stmt::ForOf(for_of) => {
      hoisted_for_in_of_lhs(&for_of.stx.lhs, out);
      hoisted_var_names(&for_of.stx.body.stx.body, out);
    }
    Stmt::Try(try_stmt) => {
      hoisted_var_names(&try_stmt.stx.wrapped.stx.body, out);
      if let Some(catch) = &try_stmt.stx.catch {
        hoisted_var_names(&catch.stx.body, out);
      }
      if let Some(finally) = &try_stmt.stx.finally {
        hoisted_var_names(&finally.stx.body, out);
      }
    }
    _ => {}
  }
}

fn hoisted_for_in_of_lhs(lhs: &ForInOfLhs, out: &mut HashSet<String>) {
  if let ForInOfLhs::Decl(decl) = lhs {
    if decl.mode == VarDeclMode::Var {
      pat_decl_names(&decl.pat, out);
    }
  }
}

/// The module scope: every top-level declaration, `var`s hoisted out of
/// nested constructs, and the locals the module's imports introduced (the
/// import declarations themselves are already gone from the tree).
pub fn module_scope_names<'a>(
  top: &Node<TopLevel>,
  import_locals: impl Iterator<Item = &'a str>,
) -> HashSet<String> {
  let mut names = HashSet::new();
  lexical_names(&top.stx.body, &mut names);
  hoisted_var_names(&top.stx.body, &mut names);
  names.extend(import_locals.map(str::to_string));
  names
}

/// The scope a function body opens: parameters, the function expression's
/// own name if any, hoisted `var`s and body-level lexicals.
pub fn function_scope_names(own_name: Option<&str>, func: &Node<Func>) -> HashSet<String> {
  let mut names = HashSet::new();
  if let Some(own_name) = own_name {
    names.insert(own_name.to_string());
  }
  for param in &func.stx.parameters {
    pat_decl_names(&param.stx.pattern, &mut names);
  }
  if let FuncBody::Block(body) = &func.stx.body {
    hoisted_var_names(body, &mut names);
    lexical_names(body, &mut names);
  }
  names
}

#[cfg(test)]
mod tests {
  use super::*;
  use parse_js::parse;

  fn module_names(source: &str) -> HashSet<String> {
    let top = parse(source).unwrap();
    module_scope_names(&top, std::iter::empty())
  }

  #[test]
  fn collects_top_level_declarations() {
    let names = module_names("var a; let b; const c = 1; function f() {} class C {}");
    for name in ["a", "b", "c", "f", "C"] {
      assert!(names.contains(name), "{} missing", name);
    }
  }

  #[test]
  fn vars_hoist_out_of_blocks_but_lexicals_do_not() {
    let names = module_names("if (x) { var hoisted = 1; let scoped = 2; }");
    assert!(names.contains("hoisted"));
    assert!(!names.contains("scoped"));
  }

  #[test]
  fn function_bodies_do_not_leak() {
    let names = module_names("function f() { var inner; }");
    assert!(names.contains("f"));
    assert!(!names.contains("inner"));
  }

  #[test]
  fn destructuring_declarations_contribute_all_names() {
    let names = module_names("var {a, b: c, ...rest} = o; var [d, , e] = xs;");
    for name in ["a", "c", "rest", "d", "e"] {
      assert!(names.contains(name), "{} missing", name);
    }
  }

  #[test]
  fn scope_stack_resolution() {
    let mut module = HashSet::new();
    module.insert("top".to_string());
    let mut stack = ScopeStack::new(module);
    assert_eq!(stack.resolve("top"), NameResolution::Module);
    assert_eq!(stack.resolve("nope"), NameResolution::Unknown);

    let mut inner = HashSet::new();
    inner.insert("top".to_string());
    inner.insert("local".to_string());
    stack.push(inner);
    assert_eq!(stack.resolve("top"), NameResolution::Local);
    assert_eq!(stack.resolve("local"), NameResolution::Local);
    stack.pop();
    assert_eq!(stack.resolve("top"), NameResolution::Module);
  }
}
