//! The per-file extraction pass: collects import and export entries from a
//! parsed module, rewrites export declarations into plain declarations in
//! place, and removes import declarations from the tree.

use ahash::{HashSet, HashSetExt};
use derive_visitor::{Drive, Visitor};
use diagnostics::Diagnostic;
use diagnostics::FileId;
use parse_js::ast::decl::{PatDecl, VarDecl, VarDeclMode, VarDeclarator};
use parse_js::ast::expr::{CallExpr, ClassExpr, Expr, FuncExpr};
use parse_js::ast::import_export::{ExportNames, ImportNames};
use parse_js::ast::node::Node;
use parse_js::ast::pat::{IdPat, Pat};
use parse_js::ast::stmt::{ExportListStmt, ImportStmt, Stmt};
use parse_js::ast::stx::TopLevel;
use parse_js::lex::DocComment;
use parse_js::loc::Loc;

use crate::errors;
use crate::module::{ExportEntry, ImportEntry};

/// Fresh local bound for an anonymous `export default`.
pub const DEFAULT_EXPORT_VAR_NAME: &str = "$jscompDefaultExport";

const DEFAULT_EXPORT_NAME: &str = "default";

/// The extraction pass output a module record is constructed from.
#[derive(Default)]
pub struct ModuleParse {
  /// Every specifier referenced by an import or a from-export, in source
  /// order.
  pub module_requests: Vec<(String, Loc)>,
  pub import_entries: Vec<ImportEntry>,
  pub export_entries: Vec<ExportEntry>,
}

impl ModuleParse {
  pub fn is_empty(&self) -> bool {
    self.module_requests.is_empty()
      && self.import_entries.is_empty()
      && self.export_entries.is_empty()
  }
}

type CallExprNode = Node<CallExpr>;

/// Detects files written against the older namespace system; those are kept
/// as plain scripts and never treated as modules.
#[derive(Default, Visitor)]
#[visitor(CallExprNode(enter))]
struct GoogModuleFinder {
  found: bool,
}

impl GoogModuleFinder {
  fn enter_call_expr_node(&mut self, node: &CallExprNode) {
    if let Expr::Member(member) = node.stx.callee.stx.as_ref() {
      if matches!(member.stx.right.as_str(), "provide" | "module") {
        if let Expr::Id(id) = member.stx.left.stx.as_ref() {
          if id.stx.name == "goog" {
            self.found = true;
          }
        }
      }
    }
  }
}

fn is_goog_provide_or_module(top: &Node<TopLevel>) -> bool {
  let mut finder = GoogModuleFinder::default();
  top.drive(&mut finder);
  finder.found
}

/// Extracts module requests, import entries and export entries from one
/// file, mutating the tree so the rewriter only sees ordinary declarations.
pub fn extract_module(
  top: &mut Node<TopLevel>,
  file: FileId,
  diagnostics: &mut Vec<Diagnostic>,
) -> ModuleParse {
  if is_goog_provide_or_module(top) {
    return ModuleParse::default();
  }

  let mut extractor = Extractor {
    file,
    parse: ModuleParse::default(),
    bound_locals: HashSet::new(),
    diagnostics,
  };
  let body = std::mem::take(&mut top.stx.body);
  let mut new_body = Vec::with_capacity(body.len());
  for stmt in body {
    if let Some(stmt) = extractor.process_stmt(stmt) {
      new_body.push(stmt);
    }
  }
  top.stx.body = new_body;
  extractor.parse
}

enum StmtKind {
  Import,
  ExportList,
  ExportDefaultExpr,
  AnonymousDefaultFunc,
  AnonymousDefaultClass,
  Other,
}

struct Extractor<'a> {
  file: FileId,
  parse: ModuleParse,
  bound_locals: HashSet<String>,
  diagnostics: &'a mut Vec<Diagnostic>,
}

impl Extractor<'_> {
  fn add_import_entry(
    &mut self,
    module_request: &str,
    import_name: Option<&str>,
    local_name: &str,
    loc: Loc,
  ) {
    if !self.bound_locals.insert(local_name.to_string()) {
      self
        .diagnostics
        .push(errors::duplicated_imported_bound_names(self.file, loc, local_name));
      return;
    }
    self.parse.import_entries.push(ImportEntry {
      module_request: module_request.to_string(),
      import_name: import_name.map(str::to_string),
      local_name: local_name.to_string(),
      loc,
    });
  }

  fn add_export_entry(
    &mut self,
    export_name: Option<&str>,
    module_request: Option<&str>,
    orig_name: Option<&str>,
    loc: Loc,
  ) {
    self.parse.export_entries.push(ExportEntry {
      export_name: export_name.map(str::to_string),
      module_request: module_request.map(str::to_string),
      orig_name: orig_name.map(str::to_string),
      loc,
    });
  }

  /// Returns the statement to keep in the tree, or `None` to drop it.
  fn process_stmt(&mut self, mut stmt: Node<Stmt>) -> Option<Node<Stmt>> {
    let kind = match stmt.stx.as_ref() {
      Stmt::Import(_) => StmtKind::Import,
      Stmt::ExportList(_) => StmtKind::ExportList,
      Stmt::ExportDefaultExpr(_) => StmtKind::ExportDefaultExpr,
      Stmt::FuncDecl(decl) if decl.stx.export_default && decl.stx.name.is_none() => {
        StmtKind::AnonymousDefaultFunc
      }
      Stmt::ClassDecl(decl) if decl.stx.export_default && decl.stx.name.is_none() => {
        StmtKind::AnonymousDefaultClass
      }
      _ => StmtKind::Other,
    };

    match kind {
      StmtKind::Import => {
        let Stmt::Import(import) = *stmt.stx else {
          unreachable!()
        };
        self.visit_import(&import);
        None
      }
      StmtKind::ExportList => {
        let Stmt::ExportList(list) = *stmt.stx else {
          unreachable!()
        };
        self.visit_export_list(list);
        None
      }
      StmtKind::ExportDefaultExpr => {
        //   export default someExpression
        //     ->
        //   var $jscompDefaultExport = someExpression;
        let loc = stmt.loc;
        let doc = stmt.assoc.remove::<DocComment>();
        let Stmt::ExportDefaultExpr(export) = *stmt.stx else {
          unreachable!()
        };
        self.add_export_entry(
          Some(DEFAULT_EXPORT_NAME),
          None,
          Some(DEFAULT_EXPORT_VAR_NAME),
          loc,
        );
        Some(synthetic_default_var(loc, export.stx.expression, doc))
      }
      StmtKind::AnonymousDefaultFunc => {
        //   export default function() {}
        let loc = stmt.loc;
        let doc = stmt.assoc.remove::<DocComment>();
        let Stmt::FuncDecl(decl) = *stmt.stx else {
          unreachable!()
        };
        self.add_export_entry(
          Some(DEFAULT_EXPORT_NAME),
          None,
          Some(DEFAULT_EXPORT_VAR_NAME),
          loc,
        );
        let func_loc = decl.loc;
        let expr = Node::new(func_loc, FuncExpr {
          name: None,
          func: decl.stx.function,
        })
        .into_wrapped();
        Some(synthetic_default_var(loc, expr, doc))
      }
      StmtKind::AnonymousDefaultClass => {
        //   export default class {}
        let loc = stmt.loc;
        let doc = stmt.assoc.remove::<DocComment>();
        let Stmt::ClassDecl(decl) = *stmt.stx else {
          unreachable!()
        };
        self.add_export_entry(
          Some(DEFAULT_EXPORT_NAME),
          None,
          Some(DEFAULT_EXPORT_VAR_NAME),
          loc,
        );
        let class_loc = decl.loc;
        let expr = Node::new(class_loc, ClassExpr {
          name: None,
          extends: decl.stx.extends,
          members: decl.stx.members,
        })
        .into_wrapped();
        Some(synthetic_default_var(loc, expr, doc))
      }
      StmtKind::Other => {
        self.strip_exported_decl(&mut stmt);
        Some(stmt)
      }
    }
  }

  /// Handles `export` in front of a named declaration: record entries and
  /// keep the declaration itself.
  fn strip_exported_decl(&mut self, stmt: &mut Node<Stmt>) {
    match stmt.stx.as_mut() {
      Stmt::FuncDecl(decl) => {
        if decl.stx.export_default {
          //   export default function name() {}
          let name = decl.stx.name.as_ref().expect("named default export");
          let (name, loc) = (name.stx.name.clone(), name.loc);
          self.add_export_entry(Some(DEFAULT_EXPORT_NAME), None, Some(&name), loc);
          decl.stx.export_default = false;
        } else if decl.stx.export {
          //   export function name() {}
          let name = decl.stx.name.as_ref().expect("exported function has a name");
          let (name, loc) = (name.stx.name.clone(), name.loc);
          self.add_export_entry(Some(&name), None, Some(&name), loc);
          decl.stx.export = false;
        }
      }
      Stmt::ClassDecl(decl) => {
        if decl.stx.export_default {
          let name = decl.stx.name.as_ref().expect("named default export");
          let (name, loc) = (name.stx.name.clone(), name.loc);
          self.add_export_entry(Some(DEFAULT_EXPORT_NAME), None, Some(&name), loc);
          decl.stx.export_default = false;
        } else if decl.stx.export {
          let name = decl.stx.name.as_ref().expect("exported class has a name");
          let (name, loc) = (name.stx.name.clone(), name.loc);
          self.add_export_entry(Some(&name), None, Some(&name), loc);
          decl.stx.export = false;
        }
      }
      Stmt::VarDecl(decl) => {
        if decl.stx.export {
          //   export var Foo, Bar, Baz;
          let mut entries = Vec::new();
          for declarator in &decl.stx.declarators {
            // Destructuring exports are not supported; only direct names
            // become entries.
            let Pat::Id(id) = declarator.pattern.stx.pat.stx.as_ref() else {
              break;
            };
            entries.push((id.stx.name.clone(), id.loc));
          }
          for (name, loc) in entries {
            self.add_export_entry(Some(&name), None, Some(&name), loc);
          }
          decl.stx.export = false;
        }
      }
      _ => {}
    }
  }

  fn visit_import(&mut self, import: &Node<ImportStmt>) {
    let module = import.stx.module.clone();
    self.parse.module_requests.push((module.clone(), import.loc));

    if let Some(default) = &import.stx.default {
      //   import foo from "mod"
      let (local, loc) = pat_decl_name(default);
      self.add_import_entry(&module, Some(DEFAULT_EXPORT_NAME), &local, loc);
    }
    match &import.stx.names {
      Some(ImportNames::All(alias)) => {
        //   import * as foo from "mod"
        let (local, loc) = pat_decl_name(alias);
        self.add_import_entry(&module, None, &local, loc);
      }
      Some(ImportNames::Specific(names)) => {
        //   import {a as foo, b} from "mod"
        for name in names {
          let (local, loc) = pat_decl_name(&name.stx.alias);
          let importable = name.stx.importable.clone();
          self.add_import_entry(&module, Some(&importable), &local, loc);
        }
      }
      None => {}
    }
  }

  fn visit_export_list(&mut self, list: Node<ExportListStmt>) {
    let list_loc = list.loc;
    let stx = *list.stx;
    match (stx.names, stx.from) {
      (ExportNames::All(None), Some(from)) => {
        //   export * from 'mod';
        self.add_export_entry(None, Some(&from), None, list_loc);
        self.parse.module_requests.push((from, list_loc));
      }
      (ExportNames::All(Some(alias)), Some(from)) => {
        //   export * as ns from 'mod';
        self.add_export_entry(Some(&alias.stx.name), Some(&from), None, alias.loc);
        self.parse.module_requests.push((from, list_loc));
      }
      (ExportNames::Specific(names), from) => {
        //   export {x, y as z};
        //   export {x, y as z} from 'mod';
        for name in &names {
          // The existence of a local binding is validated during the
          // rewrite pass; `exportable` may name an imported binding, which
          // cannot be checked yet.
          self.add_export_entry(
            Some(&name.stx.alias.stx.name),
            from.as_deref(),
            Some(&name.stx.exportable),
            name.stx.alias.loc,
          );
        }
        if let Some(from) = from {
          self.parse.module_requests.push((from, list_loc));
        }
      }
      (ExportNames::All(_), None) => unreachable!("star export always has a specifier"),
    }
  }
}

fn pat_decl_name(pat_decl: &Node<PatDecl>) -> (String, Loc) {
  match pat_decl.stx.pat.stx.as_ref() {
    Pat::Id(id) => (id.stx.name.clone(), id.loc),
    _ => unreachable!("import bindings are identifier patterns"),
  }
}

fn synthetic_default_var(loc: Loc, initializer: Node<Expr>, doc: Option<DocComment>) -> Node<Stmt> {
  let pattern = Node::new(loc, IdPat {
    name: DEFAULT_EXPORT_VAR_NAME.to_string(),
  })
  .into_wrapped::<Pat>()
  .wrap(|pat| PatDecl { pat });
  let decl = Node::new(loc, VarDecl {
    export: false,
    mode: VarDeclMode::Var,
    declarators: vec![VarDeclarator {
      pattern,
      initializer: Some(initializer),
    }],
  });
  let mut stmt: Node<Stmt> = decl.into_wrapped();
  if let Some(doc) = doc {
    stmt.assoc.set(doc);
  }
  stmt
}
