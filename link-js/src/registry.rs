//! The module registry: owns every module record in the compile session and
//! implements the host-wide parts of module semantics, including
//! `GetExportedNames`, `ResolveExport` and `ModuleDeclarationInstantiation`.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use diagnostics::Diagnostic;
use diagnostics::FileId;

use crate::errors;
use crate::extract::ModuleParse;
use crate::loader::to_module_name;
use crate::loader::ModuleLoader;
use crate::module::{Binding, EsModule, ExportEntry, ImportEntry, ModuleId, Resolution};

pub struct ModuleRegistry {
  modules: Vec<EsModule>,
  by_name: BTreeMap<String, ModuleId>,
  by_file: HashMap<FileId, ModuleId>,
}

impl Default for ModuleRegistry {
  fn default() -> Self {
    Self::new()
  }
}

impl ModuleRegistry {
  pub fn new() -> Self {
    Self {
      modules: Vec::new(),
      by_name: BTreeMap::new(),
      by_file: HashMap::new(),
    }
  }

  pub fn module(&self, id: ModuleId) -> &EsModule {
    &self.modules[id.index()]
  }

  pub fn module_name(&self, id: ModuleId) -> &str {
    &self.modules[id.index()].name
  }

  /// The module registered for an input, unless it was demoted to a plain
  /// script.
  pub fn get_module(&self, file: FileId) -> Option<ModuleId> {
    let id = *self.by_file.get(&file)?;
    (!self.modules[id.index()].demoted).then_some(id)
  }

  pub fn by_name(&self, name: &str) -> Option<ModuleId> {
    self.by_name.get(name).copied()
  }

  pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &EsModule)> {
    self
      .modules
      .iter()
      .enumerate()
      .map(|(idx, module)| (ModuleId(idx as u32), module))
  }

  /// Registers one parsed input. Partitions its export entries into the
  /// local/indirect/star buckets, rewriting re-exports of imported bindings
  /// into indirect entries so they collapse statically, and diagnoses
  /// duplicate export names.
  pub fn add_module(
    &mut self,
    file: FileId,
    address: String,
    parse: ModuleParse,
    diagnostics: &mut Vec<Diagnostic>,
  ) -> ModuleId {
    let name = to_module_name(&address);
    assert!(
      !self.by_name.contains_key(&name),
      "module {} registered twice",
      name
    );

    let mut imports_by_local = BTreeMap::new();
    for entry in parse.import_entries {
      imports_by_local.insert(entry.local_name.clone(), entry);
    }

    let mut exported_names: HashSet<&str> = HashSet::new();
    let mut local_exports = Vec::new();
    let mut indirect_exports = Vec::new();
    let mut star_exports = Vec::new();

    for entry in &parse.export_entries {
      // Module-level early error: the ExportedNames of all export
      // declarations must be duplicate-free.
      if let Some(export_name) = &entry.export_name {
        if !exported_names.insert(export_name.as_str()) {
          diagnostics.push(errors::duplicated_export_names(file, entry.loc, export_name));
        }
      }
      match &entry.module_request {
        None => {
          let local_name = entry.orig_name.as_deref().expect("local export has a name");
          match imports_by_local.get(local_name) {
            None => {
              // Plain local export:
              //   var a = 12; export {a};
              //   export function foo() {}
              local_exports.push(entry.clone());
            }
            Some(import) => {
              // Re-export of an imported binding:
              //   import a from "mod"; export {a};
              //   import * as ns from "mod"; export {ns};
              // The specification keeps re-exported namespace objects in the
              // local bucket; they live in the indirect bucket here so the
              // rewriter can resolve them statically.
              indirect_exports.push(ExportEntry {
                export_name: entry.export_name.clone(),
                module_request: Some(import.module_request.clone()),
                orig_name: import.import_name.clone(),
                loc: entry.loc,
              });
            }
          }
        }
        Some(_) => {
          if entry.export_name.is_none() && entry.orig_name.is_none() {
            //   export * from "mod";
            star_exports.push(entry.clone());
          } else {
            //   export {a, b as c} from "mod";
            //   export * as ns from "mod";
            indirect_exports.push(entry.clone());
          }
        }
      }
    }

    let id = ModuleId(self.modules.len() as u32);
    self.modules.push(EsModule {
      file,
      address,
      name: name.clone(),
      requested_modules: parse.module_requests,
      imports_by_local,
      local_exports,
      indirect_exports,
      star_exports,
      demoted: false,
      resolved_requires: Vec::new(),
      exported_names: Default::default(),
      resolved_exports: Default::default(),
    });
    self.by_name.insert(name, id);
    self.by_file.insert(file, id);
    id
  }

  /// HostResolveImportedModule(referencingModule, specifier).
  pub fn resolve_imported_module(
    &self,
    loader: &dyn ModuleLoader,
    referrer: ModuleId,
    specifier: &str,
  ) -> Option<ModuleId> {
    let address = loader.locate(specifier, &self.modules[referrer.index()].address)?;
    self.by_name.get(&to_module_name(&address)).copied()
  }

  /// GetExportedNames, cached. `None` means a star-export chain requested a
  /// module that did not load.
  pub fn exported_names(
    &self,
    loader: &dyn ModuleLoader,
    id: ModuleId,
  ) -> Option<&BTreeSet<String>> {
    self.modules[id.index()]
      .exported_names
      .get_or_init(|| self.exported_names_uncached(loader, id, &mut HashSet::new()))
      .as_ref()
  }

  fn exported_names_uncached(
    &self,
    loader: &dyn ModuleLoader,
    id: ModuleId,
    export_star_set: &mut HashSet<ModuleId>,
  ) -> Option<BTreeSet<String>> {
    if !export_star_set.insert(id) {
      return Some(BTreeSet::new());
    }
    let module = &self.modules[id.index()];
    let mut names = BTreeSet::new();
    for entry in module.local_exports.iter().chain(&module.indirect_exports) {
      names.insert(entry.export_name.clone().expect("named export entry"));
    }
    for entry in &module.star_exports {
      let request = entry.module_request.as_deref().expect("star export request");
      let requested = self.resolve_imported_module(loader, id, request)?;
      // `default` is never contributed through `export *`.
      for name in self.exported_names_uncached(loader, requested, export_star_set)? {
        if name != "default" {
          names.insert(name);
        }
      }
    }
    Some(names)
  }

  /// ResolveExport, cached, with ambiguity collapsed to `None`: from the
  /// caller's viewpoint an ambiguous export is simply not resolvable.
  pub fn resolve_export(
    &self,
    loader: &dyn ModuleLoader,
    id: ModuleId,
    export_name: &str,
  ) -> Option<Binding> {
    if let Some(cached) = self.modules[id.index()]
      .resolved_exports
      .borrow()
      .get(export_name)
    {
      return cached.clone();
    }
    let resolution = self.resolve_export_uncached(
      loader,
      id,
      export_name,
      &mut HashSet::new(),
      &mut HashSet::new(),
    );
    let binding = match resolution {
      Resolution::Found(binding) => Some(binding),
      Resolution::Unresolved | Resolution::Ambiguous => None,
    };
    self.modules[id.index()]
      .resolved_exports
      .borrow_mut()
      .insert(export_name.to_string(), binding.clone());
    binding
  }

  fn resolve_export_uncached(
    &self,
    loader: &dyn ModuleLoader,
    id: ModuleId,
    export_name: &str,
    resolve_set: &mut HashSet<(ModuleId, String)>,
    export_star_set: &mut HashSet<ModuleId>,
  ) -> Resolution {
    if !resolve_set.insert((id, export_name.to_string())) {
      // Circular import request.
      return Resolution::Unresolved;
    }

    let module = &self.modules[id.index()];
    for entry in &module.local_exports {
      if entry.export_name.as_deref() == Some(export_name) {
        // This module provides the direct binding.
        return Resolution::Found(Binding {
          module: id,
          name: entry.orig_name.clone(),
        });
      }
    }

    for entry in &module.indirect_exports {
      if entry.export_name.as_deref() == Some(export_name) {
        let request = entry.module_request.as_deref().expect("indirect export request");
        let Some(imported) = self.resolve_imported_module(loader, id, request) else {
          return Resolution::Unresolved;
        };
        match &entry.orig_name {
          // Re-export of another module's namespace object.
          None => return Resolution::Found(Binding {
            module: imported,
            name: None,
          }),
          Some(orig_name) => {
            let resolution =
              self.resolve_export_uncached(loader, imported, orig_name, resolve_set, export_star_set);
            if resolution != Resolution::Unresolved {
              return resolution;
            }
          }
        }
      }
    }

    if export_name == "default" {
      // A default export was not explicitly provided by this module, and
      // `export *` cannot contribute one.
      return Resolution::Unresolved;
    }

    if !export_star_set.insert(id) {
      return Resolution::Unresolved;
    }

    let mut star_resolution: Option<Binding> = None;
    for entry in &module.star_exports {
      let request = entry.module_request.as_deref().expect("star export request");
      let Some(imported) = self.resolve_imported_module(loader, id, request) else {
        return Resolution::Unresolved;
      };
      match self.resolve_export_uncached(loader, imported, export_name, resolve_set, export_star_set)
      {
        Resolution::Ambiguous => return Resolution::Ambiguous,
        Resolution::Unresolved => {}
        Resolution::Found(binding) => match &star_resolution {
          None => star_resolution = Some(binding),
          Some(existing) => {
            if *existing != binding {
              // More than one star export provides the requested name.
              return Resolution::Ambiguous;
            }
          }
        },
      }
    }
    match star_resolution {
      Some(binding) => Resolution::Found(binding),
      None => Resolution::Unresolved,
    }
  }

  /// GetModuleNamespace(module).get(name): resolves a property access on the
  /// namespace object. Only names in the exported-name set resolve.
  pub fn namespace_get(
    &self,
    loader: &dyn ModuleLoader,
    id: ModuleId,
    name: &str,
  ) -> Option<Binding> {
    let names = self.exported_names(loader, id)?;
    if !names.contains(name) {
      return None;
    }
    self.resolve_export(loader, id, name)
  }

  /// ModuleDeclarationInstantiation over the whole registry: validates every
  /// requested module, indirect export and named import, demotes inputs
  /// that take no part in the module graph to plain scripts, and records
  /// each surviving module's resolved requires for dependency ordering.
  pub fn instantiate_all(&mut self, loader: &dyn ModuleLoader, diagnostics: &mut Vec<Diagnostic>) {
    let ids: Vec<ModuleId> = (0..self.modules.len() as u32).map(ModuleId).collect();
    let mut non_modules: BTreeSet<ModuleId> = ids.iter().copied().collect();
    let mut resolved_requires: HashMap<ModuleId, Vec<String>> = HashMap::new();

    for &id in &ids {
      let module = &self.modules[id.index()];
      let file = module.file;
      let module_name = module.name.clone();

      // Anything that imports or exports is a module.
      if !module.requested_modules.is_empty() || module.has_exports() {
        non_modules.remove(&id);
      }

      let mut failed_requests: HashSet<String> = HashSet::new();

      // Every requested specifier must resolve to a registered input.
      let requests = module.requested_modules.clone();
      for (specifier, loc) in &requests {
        match self.resolve_imported_module(loader, id, specifier) {
          None => {
            diagnostics.push(errors::load_error(file, *loc, specifier));
            failed_requests.insert(specifier.clone());
          }
          Some(required) => {
            // Being required also makes the target a module.
            non_modules.remove(&required);
            resolved_requires
              .entry(id)
              .or_default()
              .push(self.modules[required.index()].name.clone());
          }
        }
      }

      // Every named indirect export must resolve.
      let indirect = self.modules[id.index()].indirect_exports.clone();
      for entry in &indirect {
        if entry
          .module_request
          .as_deref()
          .is_some_and(|request| failed_requests.contains(request))
        {
          continue;
        }
        if let Some(export_name) = &entry.export_name {
          if self.resolve_export(loader, id, export_name).is_none() {
            diagnostics.push(errors::resolve_export_failure(
              file,
              entry.loc,
              &module_name,
              export_name,
            ));
          }
        }
      }

      // Every named import must resolve in its source module.
      let imports: Vec<ImportEntry> =
        self.modules[id.index()].imports_by_local.values().cloned().collect();
      for entry in &imports {
        if failed_requests.contains(&entry.module_request) {
          continue;
        }
        // Namespace imports resolve by construction.
        let Some(import_name) = &entry.import_name else {
          continue;
        };
        if let Some(required) = self.resolve_imported_module(loader, id, &entry.module_request) {
          if self.resolve_export(loader, required, import_name).is_none() {
            diagnostics.push(errors::resolve_export_failure(
              file,
              entry.loc,
              &self.modules[required.index()].name,
              import_name,
            ));
          }
        }
      }
    }

    // What remains neither imports, exports, nor is imported from anywhere:
    // treat those inputs as plain scripts.
    for id in non_modules {
      let module = &mut self.modules[id.index()];
      module.demoted = true;
      self.by_name.remove(&module.name);
    }
    for (id, requires) in resolved_requires {
      if !self.modules[id.index()].demoted {
        self.modules[id.index()].resolved_requires = requires;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::loader::PathLoader;
  use crate::module::ExportEntry;
  use crate::module::ImportEntry;
  use parse_js::loc::Loc;

  fn loader_for(paths: &[&str]) -> PathLoader {
    let mut loader = PathLoader::new();
    for path in paths {
      let address = loader.normalize(path);
      loader.add_input(address);
    }
    loader
  }

  fn local(name: &str) -> ExportEntry {
    ExportEntry {
      export_name: Some(name.to_string()),
      module_request: None,
      orig_name: Some(name.to_string()),
      loc: Loc(0, 0),
    }
  }

  fn star(request: &str) -> ExportEntry {
    ExportEntry {
      export_name: None,
      module_request: Some(request.to_string()),
      orig_name: None,
      loc: Loc(0, 0),
    }
  }

  fn indirect(export_name: &str, request: &str, orig_name: &str) -> ExportEntry {
    ExportEntry {
      export_name: Some(export_name.to_string()),
      module_request: Some(request.to_string()),
      orig_name: Some(orig_name.to_string()),
      loc: Loc(0, 0),
    }
  }

  fn parse_of(imports: Vec<ImportEntry>, exports: Vec<ExportEntry>) -> ModuleParse {
    let module_requests = imports
      .iter()
      .map(|entry| entry.module_request.clone())
      .chain(exports.iter().filter_map(|entry| entry.module_request.clone()))
      .map(|request| (request, Loc(0, 0)))
      .collect();
    ModuleParse {
      module_requests,
      import_entries: imports,
      export_entries: exports,
    }
  }

  fn add(
    registry: &mut ModuleRegistry,
    file: u32,
    path: &str,
    imports: Vec<ImportEntry>,
    exports: Vec<ExportEntry>,
  ) -> ModuleId {
    let mut diagnostics = Vec::new();
    let id = registry.add_module(
      FileId(file),
      format!("{}.js", path),
      parse_of(imports, exports),
      &mut diagnostics,
    );
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
    id
  }

  #[test]
  fn ambiguous_star_resolution_is_collapsed_for_callers() {
    let loader = loader_for(&["a.js", "b.js", "star.js"]);
    let mut registry = ModuleRegistry::new();
    add(&mut registry, 0, "a", vec![], vec![local("x")]);
    add(&mut registry, 1, "b", vec![], vec![local("x")]);
    let star_id = add(&mut registry, 2, "star", vec![], vec![star("a"), star("b")]);

    let internal = registry.resolve_export_uncached(
      &loader,
      star_id,
      "x",
      &mut HashSet::new(),
      &mut HashSet::new(),
    );
    assert_eq!(internal, Resolution::Ambiguous);
    assert_eq!(registry.resolve_export(&loader, star_id, "x"), None);
  }

  #[test]
  fn negative_resolutions_are_cached() {
    let loader = loader_for(&["m.js"]);
    let mut registry = ModuleRegistry::new();
    let id = add(&mut registry, 0, "m", vec![], vec![local("x")]);

    assert_eq!(registry.resolve_export(&loader, id, "missing"), None);
    // "Resolved to nothing" is stored, not retried.
    assert!(registry
      .module(id)
      .resolved_exports
      .borrow()
      .get("missing")
      .is_some_and(|cached| cached.is_none()));
  }

  #[test]
  fn circular_indirect_exports_terminate_unresolved() {
    let loader = loader_for(&["a.js", "b.js"]);
    let mut registry = ModuleRegistry::new();
    let a = add(&mut registry, 0, "a", vec![], vec![indirect("x", "b", "x")]);
    add(&mut registry, 1, "b", vec![], vec![indirect("x", "a", "x")]);

    assert_eq!(registry.resolve_export(&loader, a, "x"), None);
  }

  #[test]
  fn star_exported_names_exclude_default() {
    let loader = loader_for(&["mod.js", "star.js"]);
    let mut registry = ModuleRegistry::new();
    add(&mut registry, 0, "mod", vec![], vec![
      local("default"),
      local("v"),
    ]);
    let star_id = add(&mut registry, 1, "star", vec![], vec![star("mod")]);

    let names = registry.exported_names(&loader, star_id).unwrap();
    assert!(names.contains("v"));
    assert!(!names.contains("default"));
  }

  #[test]
  fn reexport_of_imported_binding_becomes_indirect() {
    let loader = loader_for(&["mod2.js", "mod1.js"]);
    let mut registry = ModuleRegistry::new();
    let mod2 = add(&mut registry, 0, "mod2", vec![], vec![local("a")]);
    let mod1 = add(
      &mut registry,
      1,
      "mod1",
      vec![ImportEntry {
        module_request: "mod2".to_string(),
        import_name: Some("a".to_string()),
        local_name: "b".to_string(),
        loc: Loc(0, 0),
      }],
      // `export {b as c};` arrives as a raw local entry.
      vec![ExportEntry {
        export_name: Some("c".to_string()),
        module_request: None,
        orig_name: Some("b".to_string()),
        loc: Loc(0, 0),
      }],
    );

    let record = registry.module(mod1);
    assert!(record.local_exports().is_empty());
    assert_eq!(record.indirect_exports().len(), 1);
    assert_eq!(
      registry.resolve_export(&loader, mod1, "c"),
      Some(Binding {
        module: mod2,
        name: Some("a".to_string()),
      })
    );
  }

  #[test]
  fn duplicate_export_names_are_reported_during_bucketing() {
    let mut registry = ModuleRegistry::new();
    let mut diagnostics = Vec::new();
    registry.add_module(
      FileId(0),
      "m.js".to_string(),
      parse_of(vec![], vec![local("z"), {
        let mut dup = local("other");
        dup.export_name = Some("z".to_string());
        dup
      }]),
      &mut diagnostics,
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, crate::errors::DUPLICATED_EXPORT_NAMES);
  }
}
