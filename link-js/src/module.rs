//! Module records: the per-file import/export tables of the ECMAScript
//! Source Text Module Record, reduced to what static linking needs.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use ahash::HashMap;
use diagnostics::FileId;
use once_cell::unsync::OnceCell;
use parse_js::loc::Loc;

/// Index of a module inside the registry. Cross-module references are ids,
/// never owned pointers, because the module graph may be cyclic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) u32);

impl ModuleId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// ES ImportEntry record. One entry exists per local name an import
/// declaration introduces; a side-effect `import "mod"` introduces none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportEntry {
  pub module_request: String,
  /// `None` is a star import: the binding refers to the whole namespace.
  pub import_name: Option<String>,
  pub local_name: String,
  /// Location of the imported name, for diagnostics.
  pub loc: Loc,
}

/// ES ExportEntry record, before the registry partitions entries into the
/// local/indirect/star buckets.
///
/// - Local: `module_request` is `None`, `orig_name` is the local name.
/// - Indirect: `module_request` is set, `orig_name` is the name imported
///   from it (`None` re-exports that module's namespace).
/// - Star: `module_request` is set, `export_name` and `orig_name` are
///   `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportEntry {
  pub export_name: Option<String>,
  pub module_request: Option<String>,
  pub orig_name: Option<String>,
  /// Location of the export name (or the whole statement for star
  /// exports), for diagnostics.
  pub loc: Loc,
}

/// A resolved reference: a binding named `name` inside `module`. `name` of
/// `None` denotes the module's namespace object itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
  pub module: ModuleId,
  pub name: Option<String>,
}

/// Outcome of the internal `ResolveExport` algorithm. Ambiguity is never
/// surfaced outside the resolver; public callers observe it as an
/// unresolvable export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
  Found(Binding),
  Unresolved,
  Ambiguous,
}

/// The final identifier a binding is renamed to: `local$$module$name`.
pub fn global_name(local: &str, module_name: &str) -> String {
  format!("{}$${}", local, module_name)
}

/// One source file's module record. Structurally frozen after construction;
/// the two caches fill lazily while the resolver runs.
pub struct EsModule {
  pub(crate) file: FileId,
  /// Canonical loader address of the backing input.
  pub(crate) address: String,
  /// Canonical module name, `module$`-prefixed.
  pub(crate) name: String,
  pub(crate) requested_modules: Vec<(String, Loc)>,
  pub(crate) imports_by_local: BTreeMap<String, ImportEntry>,
  pub(crate) local_exports: Vec<ExportEntry>,
  pub(crate) indirect_exports: Vec<ExportEntry>,
  pub(crate) star_exports: Vec<ExportEntry>,
  /// Set by `instantiate_all` when the file turns out to be a plain script.
  pub(crate) demoted: bool,
  /// Canonical names of the successfully resolved requested modules, filled
  /// by `instantiate_all` for dependency ordering.
  pub(crate) resolved_requires: Vec<String>,
  /// Lazily computed exported-name set; `None` inside means a star export
  /// chain failed to load.
  pub(crate) exported_names: OnceCell<Option<BTreeSet<String>>>,
  /// Memoized export resolution. "Resolved to nothing" is cached distinctly
  /// from "not yet tried"; without negative caching star-export fan-out
  /// degrades quadratically.
  pub(crate) resolved_exports: RefCell<HashMap<String, Option<Binding>>>,
}

impl EsModule {
  pub fn file(&self) -> FileId {
    self.file
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn address(&self) -> &str {
    &self.address
  }

  pub fn requested_modules(&self) -> &[(String, Loc)] {
    &self.requested_modules
  }

  pub fn import_entry(&self, local_name: &str) -> Option<&ImportEntry> {
    self.imports_by_local.get(local_name)
  }

  pub fn import_entries(&self) -> impl Iterator<Item = &ImportEntry> {
    self.imports_by_local.values()
  }

  pub fn local_exports(&self) -> &[ExportEntry] {
    &self.local_exports
  }

  pub fn indirect_exports(&self) -> &[ExportEntry] {
    &self.indirect_exports
  }

  pub fn star_exports(&self) -> &[ExportEntry] {
    &self.star_exports
  }

  pub fn has_exports(&self) -> bool {
    !self.local_exports.is_empty()
      || !self.indirect_exports.is_empty()
      || !self.star_exports.is_empty()
  }

  pub fn resolved_requires(&self) -> &[String] {
    &self.resolved_requires
  }
}
