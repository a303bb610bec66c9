//! Statically links a set of ES module sources into a concatenation-safe
//! program.
//!
//! Every module-scope binding is renamed to a globally unique identifier
//! (`local$$module$name`), every cross-module reference is replaced with its
//! resolved target's identifier, and every module-namespace property access
//! is collapsed at compile time. After linking, the rewritten files contain
//! no import or export declarations and can be concatenated in dependency
//! order (the order itself is the consumer's job, driven by the
//! provide/require annotations each input receives).
//!
//! ```
//! use link_js::Linker;
//!
//! let mut linker = Linker::new();
//! let other = linker.add_source("other.js", "export var name = 1;").unwrap();
//! let main = linker
//!   .add_source("main.js", "import {name} from 'other'; use(name);")
//!   .unwrap();
//! linker.link();
//! assert!(!linker.has_errors());
//! assert!(linker.emit(other).contains("var name$$module$other = 1;"));
//! assert!(linker.emit(main).contains("use(name$$module$other);"));
//! ```

pub mod errors;
pub mod extract;
pub mod loader;
pub mod module;
pub mod registry;
pub mod rewrite;
pub mod scope;

mod goog_require;
mod jsdoc;

use diagnostics::render::SourceProvider;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use diagnostics::Severity;
use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;
use parse_js::error::SyntaxError;

use loader::{ModuleLoader, PathLoader};
use registry::ModuleRegistry;

/// One source file in the compile session.
pub struct Input {
  pub file: FileId,
  /// Canonical loader address.
  pub path: String,
  pub top: Node<TopLevel>,
  /// Canonical module names this input provides, for the external
  /// dependency sorter. At most one.
  pub provides: Vec<String>,
  /// Canonical module names this input requires, in source order.
  pub requires: Vec<String>,
  source: String,
}

/// A single compile session: sources in, rewritten trees and diagnostics
/// out.
///
/// The pipeline is strictly phased: parse on `add_source`, then one `link`
/// call that extracts module records, builds and validates the registry,
/// and rewrites every registered module. The registry is mutated only
/// during the build phase and read-only afterwards.
#[derive(Default)]
pub struct Linker {
  loader: PathLoader,
  inputs: Vec<Input>,
  registry: ModuleRegistry,
  diagnostics: Vec<Diagnostic>,
  linked: bool,
}

impl Linker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Parses and registers one source file. The returned id addresses the
  /// input in every later call. On a syntax error the input is still
  /// registered (with an empty tree) so its diagnostics render.
  pub fn add_source(&mut self, path: &str, source: &str) -> Result<FileId, SyntaxError> {
    assert!(!self.linked, "sources must be added before linking");
    let file = FileId(self.inputs.len() as u32);
    let (top, result) = match parse_js::parse(source) {
      Ok(top) => (top, Ok(file)),
      Err(err) => {
        self.diagnostics.push(errors::parse_error(file, &err));
        let empty = Node::new(parse_js::loc::Loc(0, 0), TopLevel { body: Vec::new() });
        (empty, Err(err))
      }
    };
    let address = self.loader.normalize(path);
    self.loader.add_input(address.clone());
    self.inputs.push(Input {
      file,
      path: address,
      top,
      provides: Vec::new(),
      requires: Vec::new(),
      source: source.to_string(),
    });
    result
  }

  /// Runs the whole pipeline over the added sources.
  ///
  /// Graph-level errors (unresolvable specifiers or exports, duplicate
  /// names) abort before the rewrite phase: rewriting relies on the
  /// invariants instantiation just failed to establish. Node-level errors
  /// found while rewriting only skip the offending node.
  pub fn link(&mut self) {
    assert!(!self.linked, "link may only run once");
    self.linked = true;

    for input in &mut self.inputs {
      let parse = extract::extract_module(&mut input.top, input.file, &mut self.diagnostics);
      self
        .registry
        .add_module(input.file, input.path.clone(), parse, &mut self.diagnostics);
    }

    self
      .registry
      .instantiate_all(&self.loader, &mut self.diagnostics);

    for input in &mut self.inputs {
      if let Some(id) = self.registry.get_module(input.file) {
        let module = self.registry.module(id);
        input.provides.push(module.name().to_string());
        input.requires.extend(module.resolved_requires().iter().cloned());
      }
    }

    if self.has_errors() {
      return;
    }

    for input in &mut self.inputs {
      if let Some(id) = self.registry.get_module(input.file) {
        rewrite::rewrite_module(
          &self.registry,
          &self.loader,
          id,
          &mut input.top,
          &mut self.diagnostics,
        );
      }
    }
  }

  pub fn input(&self, file: FileId) -> &Input {
    &self.inputs[file.0 as usize]
  }

  pub fn inputs(&self) -> impl Iterator<Item = &Input> {
    self.inputs.iter()
  }

  pub fn registry(&self) -> &ModuleRegistry {
    &self.registry
  }

  /// Renders one input's current tree as source text.
  pub fn emit(&self, file: FileId) -> String {
    emit_js::emit_top_level(&self.input(file).top)
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  pub fn has_errors(&self) -> bool {
    self
      .diagnostics
      .iter()
      .any(|diagnostic| diagnostic.severity == Severity::Error)
  }
}

impl SourceProvider for Linker {
  fn file_name(&self, file: FileId) -> &str {
    &self.input(file).path
  }

  fn file_text(&self, file: FileId) -> &str {
    &self.input(file).source
  }
}
