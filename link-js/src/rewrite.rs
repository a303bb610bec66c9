//! The per-module rewrite pass.
//!
//! Renames every module-scope binding to its global name
//! (`local$$module$name`), substitutes imported references with their
//! resolved targets, and statically collapses property accesses on module
//! namespace objects. The traversal is post-order: in a chain like
//! `ns1.ns2.ns3.foo` the innermost access is rewritten first, producing a
//! `module$`-prefixed identifier that the enclosing access then reduces
//! again, until a concrete global name (or an error) is reached.

use ahash::{HashSet, HashSetExt};
use diagnostics::Diagnostic;
use diagnostics::FileId;
use parse_js::ast::class_or_object::{ClassMember, ClassOrObjKey};
use parse_js::ast::expr::{Expr, IdExpr, LitArrElem, LitStrExpr};
use parse_js::ast::stmt::ExprStmt;
use parse_js::ast::func::{Func, FuncBody};
use parse_js::ast::node::{FreeCall, Node, OriginalName};
use parse_js::ast::pat::{ClassOrFuncName, Pat};
use parse_js::ast::stmt::{ForInOfLhs, ForTripleStmtInit, Stmt};
use parse_js::ast::stx::TopLevel;
use parse_js::lex::DocComment;
use parse_js::loc::Loc;

use crate::errors;
use crate::goog_require;
use crate::jsdoc;
use crate::loader::{ModuleLoader, MODULE_NAME_PREFIX};
use crate::module::{global_name, Binding, ModuleId};
use crate::registry::ModuleRegistry;
use crate::scope::{
  function_scope_names, lexical_names, module_scope_names, NameResolution, ScopeStack,
};

/// Marker left on a node whose text was produced by collapsing a namespace
/// property access; a call whose callee carries it loses its implicit
/// receiver.
#[derive(Clone, Copy, Debug)]
struct NamespaceCollapsed;

/// How the expression currently being rewritten is used by its parent.
#[derive(Clone, Copy, Default)]
struct ExprCtx {
  /// The expression is written to (assignment target or update operand).
  assign_target: bool,
  /// The expression is the object of a non-computed property access, the
  /// only position where a bare namespace object may appear.
  member_object: bool,
}

pub(crate) struct ModuleRewriter<'a> {
  pub(crate) registry: &'a ModuleRegistry,
  pub(crate) loader: &'a dyn ModuleLoader,
  pub(crate) module: ModuleId,
  pub(crate) file: FileId,
  pub(crate) scopes: ScopeStack,
  pub(crate) diagnostics: &'a mut Vec<Diagnostic>,
}

/// Rewrites one registered module's tree in place.
pub fn rewrite_module(
  registry: &ModuleRegistry,
  loader: &dyn ModuleLoader,
  module: ModuleId,
  top: &mut Node<TopLevel>,
  diagnostics: &mut Vec<Diagnostic>,
) {
  let file = registry.module(module).file();

  // Requires must be rewritten before renaming so their bindings become
  // ordinary qualified-name aliases.
  goog_require::rewrite_requires(top, file, diagnostics);

  let record = registry.module(module);
  let module_scope =
    module_scope_names(top, record.import_entries().map(|e| e.local_name.as_str()));
  let mut rewriter = ModuleRewriter {
    registry,
    loader,
    module,
    file,
    scopes: ScopeStack::new(module_scope),
    diagnostics,
  };
  rewriter.check_local_exports();

  // An emptied tree (e.g. a module that only re-exported an imported
  // namespace) gets neither renames nor the script-root treatment.
  if top.stx.body.is_empty() {
    return;
  }
  rewriter.rewrite_stmts(&mut top.stx.body);
  rewriter.finish_root(top);
}

impl ModuleRewriter<'_> {
  /// `export {x}` requires `x` to actually be declared; re-exports of
  /// imported bindings were already moved to the indirect bucket and
  /// validated during instantiation.
  fn check_local_exports(&mut self) {
    let record = self.registry.module(self.module);
    let mut missing = Vec::new();
    for entry in record.local_exports() {
      let name = entry.orig_name.as_deref().expect("local export has a name");
      if !self.scopes.module_scope().contains(name) {
        missing.push((name.to_string(), entry.loc));
      }
    }
    for (name, loc) in missing {
      self
        .diagnostics
        .push(errors::exported_binding_not_declared(self.file, loc, &name));
    }
  }

  /// Resolves a textual name against the current scope chain, per the
  /// module environment: module-scope names map to bindings (possibly in
  /// another module, via an import entry); anything local or unknown is not
  /// this pass's business.
  pub(crate) fn resolve_module_binding(&self, name: &str) -> Option<Binding> {
    match self.scopes.resolve(name) {
      NameResolution::Local | NameResolution::Unknown => None,
      NameResolution::Module => {
        let record = self.registry.module(self.module);
        match record.import_entry(name) {
          None => Some(Binding {
            module: self.module,
            name: Some(name.to_string()),
          }),
          Some(entry) => {
            let imported = self
              .registry
              .resolve_imported_module(self.loader, self.module, &entry.module_request)
              .expect("requested modules were validated during instantiation");
            match &entry.import_name {
              //   import * as ns from "mod"
              None => Some(Binding {
                module: imported,
                name: None,
              }),
              //   import {a} from "mod"
              //   import a from "mod"
              Some(import_name) => Some(
                self
                  .registry
                  .resolve_export(self.loader, imported, import_name)
                  .expect("imported names were validated during instantiation"),
              ),
            }
          }
        }
      }
    }
  }

  fn rewrite_stmts(&mut self, stmts: &mut [Node<Stmt>]) {
    for stmt in stmts {
      self.rewrite_stmt(stmt);
    }
  }

  fn rewrite_stmt(&mut self, stmt: &mut Node<Stmt>) {
    if let Some(mut doc) = stmt.assoc.remove::<DocComment>() {
      jsdoc::rewrite_doc_types(self, &mut doc);
      stmt.assoc.set(doc);
    }
    match stmt.stx.as_mut() {
      Stmt::Block(block) => {
        let mut names = HashSet::new();
        lexical_names(&block.stx.body, &mut names);
        self.scopes.push(names);
        self.rewrite_stmts(&mut block.stx.body);
        self.scopes.pop();
      }
      Stmt::Break(_) | Stmt::Continue(_) | Stmt::Debugger(_) | Stmt::Empty(_) => {}
      Stmt::DoWhile(do_while) => {
        self.rewrite_stmt(&mut do_while.stx.body);
        self.rewrite_expr(&mut do_while.stx.condition, ExprCtx::default());
      }
      Stmt::Expr(expr_stmt) => {
        self.rewrite_expr(&mut expr_stmt.stx.expr, ExprCtx::default());
      }
      Stmt::ForIn(for_in) => {
        let scoped = self.enter_for_in_of_head(&mut for_in.stx.lhs);
        self.rewrite_expr(&mut for_in.stx.rhs, ExprCtx::default());
        self.rewrite_body_block(&mut for_in.stx.body.stx.body);
        if scoped {
          self.scopes.pop();
        }
      }
      Stmt::ForOf(for_of) => {
        let scoped = self.enter_for_in_of_head(&mut for_of.stx.lhs);
        self.rewrite_expr(&mut for_of.stx.rhs, ExprCtx::default());
        self.rewrite_body_block(&mut for_of.stx.body.stx.body);
        if scoped {
          self.scopes.pop();
        }
      }
      Stmt::ForTriple(for_triple) => {
        let mut scoped = false;
        match &mut for_triple.stx.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(expr) => self.rewrite_expr(expr, ExprCtx::default()),
          ForTripleStmtInit::Decl(decl) => {
            if decl.stx.mode != parse_js::ast::decl::VarDeclMode::Var {
              let mut names = HashSet::new();
              for declarator in &decl.stx.declarators {
                crate::scope::pat_names(&declarator.pattern.stx.pat, &mut names);
              }
              self.scopes.push(names);
              scoped = true;
            }
            for declarator in &mut decl.stx.declarators {
              self.rewrite_pat(&mut declarator.pattern.stx.pat, false);
              if let Some(initializer) = &mut declarator.initializer {
                self.rewrite_expr(initializer, ExprCtx::default());
              }
            }
          }
        }
        if let Some(cond) = &mut for_triple.stx.cond {
          self.rewrite_expr(cond, ExprCtx::default());
        }
        if let Some(post) = &mut for_triple.stx.post {
          self.rewrite_expr(post, ExprCtx::default());
        }
        self.rewrite_body_block(&mut for_triple.stx.body.stx.body);
        if scoped {
          self.scopes.pop();
        }
      }
      Stmt::If(if_stmt) => {
        self.rewrite_expr(&mut if_stmt.stx.test, ExprCtx::default());
        self.rewrite_stmt(&mut if_stmt.stx.consequent);
        if let Some(alternate) = &mut if_stmt.stx.alternate {
          self.rewrite_stmt(alternate);
        }
      }
      Stmt::Return(ret) => {
        if let Some(value) = &mut ret.stx.value {
          self.rewrite_expr(value, ExprCtx::default());
        }
      }
      Stmt::Throw(throw) => {
        self.rewrite_expr(&mut throw.stx.value, ExprCtx::default());
      }
      Stmt::Try(try_stmt) => {
        self.rewrite_body_block(&mut try_stmt.stx.wrapped.stx.body);
        if let Some(catch) = &mut try_stmt.stx.catch {
          let mut names = HashSet::new();
          if let Some(parameter) = &catch.stx.parameter {
            crate::scope::pat_names(&parameter.stx.pat, &mut names);
          }
          lexical_names(&catch.stx.body, &mut names);
          self.scopes.push(names);
          self.rewrite_stmts(&mut catch.stx.body);
          self.scopes.pop();
        }
        if let Some(finally) = &mut try_stmt.stx.finally {
          self.rewrite_body_block(&mut finally.stx.body);
        }
      }
      Stmt::While(while_stmt) => {
        self.rewrite_expr(&mut while_stmt.stx.condition, ExprCtx::default());
        self.rewrite_stmt(&mut while_stmt.stx.body);
      }
      Stmt::VarDecl(decl) => {
        for declarator in &mut decl.stx.declarators {
          self.rewrite_pat(&mut declarator.pattern.stx.pat, false);
          if let Some(initializer) = &mut declarator.initializer {
            self.rewrite_expr(initializer, ExprCtx::default());
          }
        }
      }
      Stmt::FuncDecl(decl) => {
        if let Some(name) = &mut decl.stx.name {
          self.rewrite_decl_name(name);
        }
        self.rewrite_func(None, &mut decl.stx.function);
      }
      Stmt::ClassDecl(decl) => {
        if let Some(name) = &mut decl.stx.name {
          self.rewrite_decl_name(name);
        }
        if let Some(extends) = &mut decl.stx.extends {
          self.rewrite_expr(extends, ExprCtx::default());
        }
        self.rewrite_class_members(&mut decl.stx.members);
      }
      // Import/export declarations only survive in non-module files, which
      // this pass never visits.
      Stmt::Import(_) | Stmt::ExportList(_) | Stmt::ExportDefaultExpr(_) => {}
    }
  }

  /// `for` heads with a lexical declaration scope over the whole statement.
  fn enter_for_in_of_head(&mut self, lhs: &mut ForInOfLhs) -> bool {
    match lhs {
      ForInOfLhs::Assign(pat) => {
        self.rewrite_pat(pat, true);
        false
      }
      ForInOfLhs::Decl(decl) => {
        let lexical = decl.mode != parse_js::ast::decl::VarDeclMode::Var;
        if lexical {
          let mut names = HashSet::new();
          crate::scope::pat_names(&decl.pat.stx.pat, &mut names);
          self.scopes.push(names);
        }
        self.rewrite_pat(&mut decl.pat.stx.pat, false);
        lexical
      }
    }
  }

  fn rewrite_body_block(&mut self, body: &mut [Node<Stmt>]) {
    let mut names = HashSet::new();
    lexical_names(body, &mut names);
    self.scopes.push(names);
    self.rewrite_stmts(body);
    self.scopes.pop();
  }

  fn rewrite_func(&mut self, own_name: Option<&str>, func: &mut Node<Func>) {
    self.scopes.push(function_scope_names(own_name, func));
    for param in &mut func.stx.parameters {
      self.rewrite_pat(&mut param.stx.pattern.stx.pat, false);
      if let Some(default_value) = &mut param.stx.default_value {
        self.rewrite_expr(default_value, ExprCtx::default());
      }
    }
    match &mut func.stx.body {
      FuncBody::Block(body) => self.rewrite_stmts(body),
      FuncBody::Expression(expr) => self.rewrite_expr(expr, ExprCtx::default()),
    }
    self.scopes.pop();
  }

  fn rewrite_class_members(&mut self, members: &mut [Node<ClassMember>]) {
    for member in members {
      if let Some(mut doc) = member.assoc.remove::<DocComment>() {
        jsdoc::rewrite_doc_types(self, &mut doc);
        member.assoc.set(doc);
      }
      if let ClassOrObjKey::Computed(key) = &mut member.stx.key {
        self.rewrite_expr(key, ExprCtx::default());
      }
      self.rewrite_func(None, &mut member.stx.func);
    }
  }

  /// Renames a declaration's name when it belongs to module scope.
  fn rewrite_decl_name(&mut self, name: &mut Node<ClassOrFuncName>) {
    let Some(binding) = self.resolve_module_binding(&name.stx.name) else {
      return;
    };
    let Some(bound_name) = &binding.name else {
      return;
    };
    let original = std::mem::replace(
      &mut name.stx.name,
      global_name(bound_name, self.registry.module_name(binding.module)),
    );
    name.assoc.set(OriginalName(original));
  }

  /// Renames the identifiers a pattern introduces (or, for assignment
  /// patterns, writes to).
  fn rewrite_pat(&mut self, pat: &mut Node<Pat>, assign_target: bool) {
    match pat.stx.as_mut() {
      Pat::Id(id) => {
        let Some(binding) = self.resolve_module_binding(&id.stx.name) else {
          return;
        };
        if assign_target && binding.module != self.module {
          self
            .diagnostics
            .push(errors::imported_binding_assignment(self.file, id.loc));
          return;
        }
        let Some(bound_name) = &binding.name else {
          // A namespace object can never be bound or written through a
          // pattern.
          self
            .diagnostics
            .push(errors::module_namespace_non_getprop(self.file, id.loc));
          return;
        };
        let original = std::mem::replace(
          &mut id.stx.name,
          global_name(bound_name, self.registry.module_name(binding.module)),
        );
        id.assoc.set(OriginalName(original));
      }
      Pat::Obj(obj) => {
        for prop in &mut obj.stx.properties {
          self.rewrite_pat(&mut prop.stx.target, assign_target);
          if let Some(default_value) = &mut prop.stx.default_value {
            self.rewrite_expr(default_value, ExprCtx::default());
          }
        }
        if let Some(rest) = &mut obj.stx.rest {
          let Some(binding) = self.resolve_module_binding(&rest.stx.name) else {
            return;
          };
          if let Some(bound_name) = &binding.name {
            let original = std::mem::replace(
              &mut rest.stx.name,
              global_name(bound_name, self.registry.module_name(binding.module)),
            );
            rest.assoc.set(OriginalName(original));
          }
        }
      }
      Pat::Arr(arr) => {
        for elem in arr.stx.elements.iter_mut().flatten() {
          self.rewrite_pat(&mut elem.target, assign_target);
          if let Some(default_value) = &mut elem.default_value {
            self.rewrite_expr(default_value, ExprCtx::default());
          }
        }
        if let Some(rest) = &mut arr.stx.rest {
          self.rewrite_pat(rest, assign_target);
        }
      }
    }
  }

  fn rewrite_expr(&mut self, expr: &mut Node<Expr>, ctx: ExprCtx) {
    match expr.stx.as_ref() {
      Expr::Id(_) => return self.rewrite_id_expr(expr, ctx),
      Expr::Member(_) => return self.rewrite_member_expr(expr, ctx),
      Expr::This(_) => {
        // The `this` of a module environment record is undefined.
        if self.scopes.at_module_scope() {
          let loc = expr.loc;
          expr.stx = Box::new(Expr::Id(Node::new(loc, IdExpr {
            name: "undefined".to_string(),
          })));
        }
        return;
      }
      _ => {}
    }
    match expr.stx.as_mut() {
      Expr::Id(_) | Expr::Member(_) | Expr::This(_) => unreachable!(),
      Expr::Arrow(arrow) => self.rewrite_func(None, &mut arrow.stx.func),
      Expr::Assign(assign) => {
        self.rewrite_expr(&mut assign.stx.target, ExprCtx {
          assign_target: true,
          member_object: false,
        });
        self.rewrite_expr(&mut assign.stx.value, ExprCtx::default());
      }
      Expr::Binary(binary) => {
        self.rewrite_expr(&mut binary.stx.left, ExprCtx::default());
        self.rewrite_expr(&mut binary.stx.right, ExprCtx::default());
      }
      Expr::Call(call) => {
        self.rewrite_expr(&mut call.stx.callee, ExprCtx::default());
        // A collapsed namespace method access loses its implicit receiver.
        if call.stx.callee.assoc.get::<NamespaceCollapsed>().is_some() {
          call.assoc.set(FreeCall);
        }
        for arg in &mut call.stx.arguments {
          self.rewrite_expr(&mut arg.stx.value, ExprCtx::default());
        }
      }
      Expr::Class(class) => {
        // A class expression's name is scoped to the expression itself and
        // is never a module binding.
        if let Some(extends) = &mut class.stx.extends {
          self.rewrite_expr(extends, ExprCtx::default());
        }
        self.rewrite_class_members(&mut class.stx.members);
      }
      Expr::ComputedMember(computed) => {
        // Only dotted access may dereference a namespace; a namespace
        // flowing into a computed object position is reported when the
        // object identifier itself is rewritten.
        self.rewrite_expr(&mut computed.stx.object, ExprCtx::default());
        self.rewrite_expr(&mut computed.stx.member, ExprCtx::default());
      }
      Expr::Cond(cond) => {
        self.rewrite_expr(&mut cond.stx.test, ExprCtx::default());
        self.rewrite_expr(&mut cond.stx.consequent, ExprCtx::default());
        self.rewrite_expr(&mut cond.stx.alternate, ExprCtx::default());
      }
      Expr::Func(func) => {
        let own_name = func.stx.name.as_ref().map(|name| name.stx.name.clone());
        self.rewrite_func(own_name.as_deref(), &mut func.stx.func);
      }
      Expr::New(new) => {
        self.rewrite_expr(&mut new.stx.callee, ExprCtx::default());
        if let Some(arguments) = &mut new.stx.arguments {
          for arg in arguments {
            self.rewrite_expr(&mut arg.stx.value, ExprCtx::default());
          }
        }
      }
      Expr::Unary(unary) => {
        let assign_target = matches!(
          unary.stx.operator,
          parse_js::operator::OperatorName::PrefixIncrement
            | parse_js::operator::OperatorName::PrefixDecrement
        );
        self.rewrite_expr(&mut unary.stx.argument, ExprCtx {
          assign_target,
          member_object: false,
        });
      }
      Expr::UnaryPostfix(postfix) => {
        self.rewrite_expr(&mut postfix.stx.argument, ExprCtx {
          assign_target: true,
          member_object: false,
        });
      }
      Expr::LitArr(arr) => {
        for elem in &mut arr.stx.elements {
          match elem {
            LitArrElem::Single(value) | LitArrElem::Spread(value) => {
              self.rewrite_expr(value, ExprCtx::default())
            }
            LitArrElem::Empty => {}
          }
        }
      }
      Expr::LitObj(obj) => {
        for member in &mut obj.stx.members {
          if let ClassOrObjKey::Computed(key) = &mut member.stx.key {
            self.rewrite_expr(key, ExprCtx::default());
          }
          self.rewrite_expr(&mut member.stx.value, ExprCtx::default());
        }
      }
      Expr::LitBool(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitStr(_) => {}
    }
  }

  fn rewrite_id_expr(&mut self, expr: &mut Node<Expr>, ctx: ExprCtx) {
    let (name, loc) = {
      let Expr::Id(id) = expr.stx.as_ref() else {
        unreachable!()
      };
      (id.stx.name.clone(), id.loc)
    };
    let Some(binding) = self.resolve_module_binding(&name) else {
      return;
    };
    if ctx.assign_target && binding.module != self.module {
      // Imported bindings are immutable.
      self
        .diagnostics
        .push(errors::imported_binding_assignment(self.file, loc));
      return;
    }
    self.substitute_binding(expr, binding, name, ctx);
  }

  /// Statically collapses `module$x.prop` into the binding `prop` resolves
  /// to. Because the object was rewritten first (post-order), a chained
  /// namespace re-export shows up here as another `module$` identifier and
  /// reduces again one level up.
  fn rewrite_member_expr(&mut self, expr: &mut Node<Expr>, ctx: ExprCtx) {
    {
      let Expr::Member(member) = expr.stx.as_mut() else {
        unreachable!()
      };
      self.rewrite_expr(&mut member.stx.left, ExprCtx {
        assign_target: false,
        member_object: true,
      });
    }
    let target = {
      let Expr::Member(member) = expr.stx.as_ref() else {
        unreachable!()
      };
      match member.stx.left.stx.as_ref() {
        Expr::Id(id) if id.stx.name.starts_with(MODULE_NAME_PREFIX) => {
          let left_original = member
            .stx
            .left
            .assoc
            .get::<OriginalName>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| id.stx.name.clone());
          Some((id.stx.name.clone(), member.stx.right.clone(), left_original))
        }
        _ => None,
      }
    };
    let Some((namespace_name, property, left_original)) = target else {
      return;
    };
    if ctx.assign_target {
      // The namespace exotic object is not extensible and all its
      // properties are immutable.
      self
        .diagnostics
        .push(errors::module_namespace_assignment(self.file, expr.loc));
      return;
    }
    let Some(namespace_module) = self.registry.by_name(&namespace_name) else {
      return;
    };
    match self
      .registry
      .namespace_get(self.loader, namespace_module, &property)
    {
      None => {
        self.diagnostics.push(errors::resolve_export_failure(
          self.file,
          expr.loc,
          &namespace_name,
          &property,
        ));
      }
      Some(binding) => {
        let original = format!("{}.{}", left_original, property);
        self.substitute_binding(expr, binding, original, ctx);
        if matches!(expr.stx.as_ref(), Expr::Id(_)) {
          expr.assoc.set(NamespaceCollapsed);
        }
      }
    }
  }

  /// The binding-substitution rule: a concrete binding becomes its global
  /// name; a namespace binding becomes the bare module name, legal only as
  /// the object of a further property access.
  fn substitute_binding(
    &mut self,
    expr: &mut Node<Expr>,
    binding: Binding,
    original: String,
    ctx: ExprCtx,
  ) {
    let new_name = match &binding.name {
      None => {
        if !ctx.member_object {
          self
            .diagnostics
            .push(errors::module_namespace_non_getprop(self.file, expr.loc));
          return;
        }
        self.registry.module_name(binding.module).to_string()
      }
      Some(name) => global_name(name, self.registry.module_name(binding.module)),
    };
    let loc = expr.loc;
    expr.stx = Box::new(Expr::Id(Node::new(loc, IdExpr { name: new_name })));
    expr.assoc.set(OriginalName(original));
  }

  /// Script-root finalization: normalize the `use strict` directive and
  /// ensure a file overview with provide/require suppressions exists.
  fn finish_root(&mut self, top: &mut Node<TopLevel>) {
    let mut has_use_strict = None;
    for stmt in &top.stx.body {
      let Stmt::Expr(expr_stmt) = stmt.stx.as_ref() else {
        break;
      };
      let Expr::LitStr(lit) = expr_stmt.stx.expr.stx.as_ref() else {
        break;
      };
      if lit.stx.value == "use strict" {
        has_use_strict = Some(stmt.loc);
        break;
      }
    }
    match has_use_strict {
      Some(loc) => {
        // Module sources are strict by construction.
        self
          .diagnostics
          .push(errors::useless_use_strict_directive(self.file, loc));
      }
      None => {
        let loc = Loc(0, 0);
        let directive: Node<Expr> = Node::new(loc, LitStrExpr {
          raw: "'use strict'".to_string(),
          value: "use strict".to_string(),
        })
        .into_wrapped();
        top
          .stx
          .body
          .insert(0, directive.wrap(|expr| ExprStmt { expr }).into_wrapped());
      }
    }

    // Downstream passes would otherwise complain about the synthesized
    // provide/require annotations.
    const SUPPRESSIONS: &str = "@suppress {missingProvide|missingRequire}";
    match top.assoc.get_mut::<DocComment>() {
      Some(doc) => {
        if !doc.text.contains("@fileoverview") {
          doc.text = format!(" @fileoverview{}", doc.text);
        }
        if !doc.text.contains("@suppress") {
          if !doc.text.ends_with(' ') {
            doc.text.push(' ');
          }
          doc.text.push_str(SUPPRESSIONS);
          doc.text.push(' ');
        }
      }
      None => {
        top.assoc.set(DocComment {
          text: format!(" @fileoverview {} ", SUPPRESSIONS),
          loc: Loc(0, 0),
        });
      }
    }
  }
}
