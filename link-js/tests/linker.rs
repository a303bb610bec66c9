//! End-to-end linking tests over multi-file programs.

use diagnostics::FileId;
use link_js::errors;
use link_js::Linker;

const OVERVIEW: &str = "/** @fileoverview @suppress {missingProvide|missingRequire} */";

fn link(files: &[(&str, &str)]) -> (Linker, Vec<FileId>) {
  let mut linker = Linker::new();
  let ids = files
    .iter()
    .map(|(path, source)| {
      linker
        .add_source(path, source)
        .unwrap_or_else(|err| panic!("parse of {} failed: {:?}", path, err))
    })
    .collect();
  linker.link();
  (linker, ids)
}

fn link_ok(files: &[(&str, &str)]) -> (Linker, Vec<FileId>) {
  let (linker, ids) = link(files);
  assert!(
    !linker.has_errors(),
    "unexpected errors: {:?}",
    linker.diagnostics()
  );
  (linker, ids)
}

/// Emitted output minus the synthesized file overview and strict directive,
/// so expectations focus on the rewritten payload.
fn body(linker: &Linker, file: FileId) -> String {
  let out = linker.emit(file);
  let mut lines: Vec<&str> = out.lines().collect();
  if lines.first() == Some(&OVERVIEW) {
    lines.remove(0);
  }
  if lines.first() == Some(&"'use strict';") {
    lines.remove(0);
  }
  let mut body = lines.join("\n");
  if !body.is_empty() {
    body.push('\n');
  }
  body
}

fn codes(linker: &Linker) -> Vec<&'static str> {
  linker.diagnostics().iter().map(|d| d.code).collect()
}

#[test]
fn renames_exported_vars() {
  let (linker, ids) = link_ok(&[("testcode.js", "export var a = 1, b = 2;")]);
  assert_eq!(
    body(&linker, ids[0]),
    "var a$$module$testcode = 1, b$$module$testcode = 2;\n"
  );

  let (linker, ids) = link_ok(&[("testcode.js", "export var a; export var b;")]);
  assert_eq!(
    body(&linker, ids[0]),
    "var a$$module$testcode;\nvar b$$module$testcode;\n"
  );
}

#[test]
fn renames_exported_functions_and_uses() {
  let (linker, ids) = link_ok(&[("testcode.js", "export function f() {};")]);
  assert_eq!(body(&linker, ids[0]), "function f$$module$testcode() {}\n");

  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "export function f() {}; function g() { f(); }",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "function f$$module$testcode() {}\nfunction g$$module$testcode() { f$$module$testcode(); }\n"
  );

  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "export function MyClass() {};\nMyClass.prototype.foo = function() {};",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "function MyClass$$module$testcode() {}\nMyClass$$module$testcode.prototype.foo = function() {};\n"
  );
}

#[test]
fn export_lists_only_rename_declarations() {
  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "var f = 1; var b = 2;\nexport {f as foo, b as bar};",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "var f$$module$testcode = 1;\nvar b$$module$testcode = 2;\n"
  );

  // `export {f as default}` emits no binding of its own; `default` resolves
  // through the export table.
  let (linker, ids) = link_ok(&[("testcode.js", "var f = 1; export {f as default};")]);
  assert_eq!(body(&linker, ids[0]), "var f$$module$testcode = 1;\n");

  let (linker, ids) = link_ok(&[("testcode.js", "export {name}; var name;")]);
  assert_eq!(body(&linker, ids[0]), "var name$$module$testcode;\n");
}

#[test]
fn default_exports_keep_named_locals() {
  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "export default function f() {};\nvar x = f();",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "function f$$module$testcode() {}\nvar x$$module$testcode = f$$module$testcode();\n"
  );

  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "export default class Foo {};\nvar x = new Foo;",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "class Foo$$module$testcode {}\nvar x$$module$testcode = new Foo$$module$testcode;\n"
  );
}

#[test]
fn anonymous_default_exports_bind_a_fresh_local() {
  let (linker, ids) = link_ok(&[("testcode.js", "export default 'someString';")]);
  assert_eq!(
    body(&linker, ids[0]),
    "var $jscompDefaultExport$$module$testcode = 'someString';\n"
  );

  let (linker, ids) = link_ok(&[("testcode.js", "var x = 5; export default x;")]);
  assert_eq!(
    body(&linker, ids[0]),
    "var x$$module$testcode = 5;\nvar $jscompDefaultExport$$module$testcode = x$$module$testcode;\n"
  );

  let (linker, ids) = link_ok(&[("testcode.js", "export default class {};")]);
  assert_eq!(
    body(&linker, ids[0]),
    "var $jscompDefaultExport$$module$testcode = class {};\n"
  );

  let (linker, ids) = link_ok(&[("testcode.js", "export default function() {}")]);
  assert_eq!(
    body(&linker, ids[0]),
    "var $jscompDefaultExport$$module$testcode = function() {};\n"
  );
}

#[test]
fn named_imports_substitute_the_original_binding() {
  let other = ("other.js", "export var name;\nexport default function use() {}");

  let (linker, ids) = link_ok(&[other, ("main.js", "import {name} from 'other';\nuse(name);")]);
  assert_eq!(
    body(&linker, ids[0]),
    "var name$$module$other;\nfunction use$$module$other() {}\n"
  );
  assert_eq!(body(&linker, ids[1]), "use(name$$module$other);\n");

  let (linker, ids) = link_ok(&[other, ("main.js", "import use from 'other';\nuse(name);")]);
  assert_eq!(body(&linker, ids[1]), "use$$module$other(name);\n");

  let (linker, ids) = link_ok(&[other, (
    "main.js",
    "import use, {name} from 'other';\nuse(name);",
  )]);
  assert_eq!(body(&linker, ids[1]), "use$$module$other(name$$module$other);\n");
}

#[test]
fn namespace_imports_collapse_property_accesses() {
  let other = ("other.js", "export var name;\nexport default function use() {}");
  let (linker, ids) = link_ok(&[other, (
    "main.js",
    "import * as ns from 'other';\nuse(name);\nns.default(ns.name);",
  )]);
  assert_eq!(
    body(&linker, ids[1]),
    "use(name);\nuse$$module$other(name$$module$other);\n"
  );
}

#[test]
fn import_chains_resolve_to_the_origin() {
  let (linker, ids) = link_ok(&[
    ("mod2.js", "export var a;"),
    ("mod1.js", "import {a as b} from 'mod2';\nuse(b)\nexport {b as c};"),
    ("main.js", "import {c as d} from 'mod1';\nuse(d);"),
  ]);
  assert_eq!(body(&linker, ids[0]), "var a$$module$mod2;\n");
  assert_eq!(body(&linker, ids[1]), "use(a$$module$mod2);\n");
  assert_eq!(body(&linker, ids[2]), "use(a$$module$mod2);\n");
}

#[test]
fn indirect_exports_leave_no_code_behind() {
  let (linker, ids) = link_ok(&[
    ("mod2.js", "export var a;"),
    ("mod1.js", "export {a as b} from 'mod2';"),
    ("main.js", "import {b as c} from 'mod1';\nuse(c);"),
  ]);
  // mod1 is emptied entirely; no overview, no directive.
  assert_eq!(linker.emit(ids[1]), "");
  assert_eq!(body(&linker, ids[2]), "use(a$$module$mod2);\n");
}

#[test]
fn star_exports_forward_names() {
  let (linker, ids) = link_ok(&[
    ("mod2.js", "export var a;"),
    ("mod1.js", "export * from 'mod2';"),
    ("main.js", "import {a} from 'mod1';\nuse(a);"),
  ]);
  assert_eq!(linker.emit(ids[1]), "");
  assert_eq!(body(&linker, ids[2]), "use(a$$module$mod2);\n");
}

#[test]
fn namespace_reexports_collapse_through_chains() {
  let (linker, ids) = link_ok(&[
    ("mod2.js", "export var a;"),
    ("mod1.js", "import * as mod2 from 'mod2';\nexport {mod2};"),
    ("main.js", "import {mod2} from 'mod1';\nuse(mod2.a);"),
  ]);
  assert_eq!(linker.emit(ids[1]), "");
  assert_eq!(body(&linker, ids[2]), "use(a$$module$mod2);\n");

  let (linker, ids) = link_ok(&[
    ("mod2.js", "export var a;"),
    ("mod1.js", "import * as mod2 from 'mod2';\nexport {mod2}"),
    ("main.js", "import * as mod1 from 'mod1';\nuse(mod1.mod2.a);"),
  ]);
  assert_eq!(body(&linker, ids[2]), "use(a$$module$mod2);\n");
}

#[test]
fn deep_namespace_chains_collapse_in_one_pass() {
  let (linker, ids) = link_ok(&[
    ("mod3.js", "export var a;"),
    ("mod2.js", "import * as ns3 from 'mod3';\nexport {ns3};"),
    ("mod1.js", "import * as ns2 from 'mod2';\nexport {ns2};"),
    ("app.js", "import * as ns1 from 'mod1';\nuse(ns1.ns2.ns3.a);"),
  ]);
  assert_eq!(body(&linker, ids[3]), "use(a$$module$mod3);\n");
}

#[test]
fn extending_imported_classes() {
  let parent = ("parent.js", "export class Parent {}\nexport default class {}");

  let (linker, ids) = link_ok(&[parent, (
    "main.js",
    "import {Parent} from 'parent';\nclass Child extends Parent { useParent(parent) {} }",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "class Parent$$module$parent {}\nvar $jscompDefaultExport$$module$parent = class {};\n"
  );
  assert_eq!(
    body(&linker, ids[1]),
    "class Child$$module$main extends Parent$$module$parent { useParent(parent) {} }\n"
  );

  let (linker, ids) = link_ok(&[parent, (
    "main.js",
    "import Parent from 'parent';\nclass Child extends Parent {}",
  )]);
  assert_eq!(
    body(&linker, ids[1]),
    "class Child$$module$main extends $jscompDefaultExport$$module$parent {}\n"
  );

  let (linker, ids) = link_ok(&[
    parent,
    (
      "child.js",
      "import {Parent} from 'parent';\nexport * from 'parent';\nexport class Child extends Parent {}",
    ),
    (
      "main.js",
      "import {Child, Parent} from 'child';\nvar obj = new Child();\nobj.useParent(new Parent())",
    ),
  ]);
  assert_eq!(
    body(&linker, ids[1]),
    "class Child$$module$child extends Parent$$module$parent {}\n"
  );
  assert_eq!(
    body(&linker, ids[2]),
    "var obj$$module$main = new Child$$module$child();\nobj$$module$main.useParent(new Parent$$module$parent);\n"
  );
}

#[test]
fn top_level_this_becomes_undefined() {
  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "export var x;\nuse(this);\nfunction f() { return this; }",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "var x$$module$testcode;\nuse(undefined);\nfunction f$$module$testcode() { return this; }\n"
  );
}

#[test]
fn fixes_jsdoc_type_names() {
  let (linker, ids) = link_ok(&[
    (
      "other.js",
      "export default class {}\nexport class Foo {}\n/** @typedef {number|!Object} */ export var NumOrObj;",
    ),
    (
      "main.js",
      "import Def, * as ns from 'other';\n/** @param {Def} arg1 @param {ns.Foo} arg2 @param {ns.NumOrObj} arg3 */\nfunction use(arg1, arg2, arg3) {}",
    ),
  ]);
  assert_eq!(
    body(&linker, ids[0]),
    "var $jscompDefaultExport$$module$other = class {};\nclass Foo$$module$other {}\n/** @typedef {number|!Object} */\nvar NumOrObj$$module$other;\n"
  );
  assert_eq!(
    body(&linker, ids[1]),
    "/** @param {$jscompDefaultExport$$module$other} arg1 @param {Foo$$module$other} arg2 @param {NumOrObj$$module$other} arg3 */\nfunction use$$module$main(arg1, arg2, arg3) {}\n"
  );
}

#[test]
fn fixes_jsdoc_paths_through_file_local_objects() {
  let (linker, ids) = link_ok(&[
    (
      "other.js",
      "/** @const */ export var repo = {};\nrepo.Foo = class {};",
    ),
    (
      "main.js",
      "import * as ns from 'other';\n/** @param {ns.repo.Foo} arg1 */\nfunction use(arg1) {}",
    ),
  ]);
  assert_eq!(
    body(&linker, ids[0]),
    "/** @const */\nvar repo$$module$other = {};\nrepo$$module$other.Foo = class {};\n"
  );
  assert_eq!(
    body(&linker, ids[1]),
    "/** @param {repo$$module$other.Foo} arg1 */\nfunction use$$module$main(arg1) {}\n"
  );
}

#[test]
fn fixes_relative_jsdoc_type_names() {
  let (linker, ids) = link_ok(&[
    ("parent.js", "export class Parent {}\nexport default class {}"),
    (
      "main.js",
      "import Parent from 'parent';\nclass Child extends Parent { /** @param {./parent.Parent} parent */ useParent(parent) {} }",
    ),
  ]);
  assert_eq!(
    body(&linker, ids[1]),
    "class Child$$module$main extends $jscompDefaultExport$$module$parent { /** @param {Parent$$module$parent} parent */ useParent(parent) {} }\n"
  );
}

#[test]
fn unresolvable_relative_jsdoc_types_report_load_error() {
  let (linker, _) = link(&[(
    "testcode.js",
    "export var name;\n/** @param {./module/does/not/exist.Foo} arg */ function f(arg) {}",
  )]);
  assert_eq!(codes(&linker), vec![errors::LOAD_ERROR]);
}

#[test]
fn load_errors_for_missing_modules() {
  let (linker, _) = link(&[(
    "main.js",
    "import name from 'module_does_not_exist';\nuse(name);",
  )]);
  assert_eq!(codes(&linker), vec![errors::LOAD_ERROR]);

  let (linker, _) = link(&[("main.js", "export {name} from 'module_does_not_exist';")]);
  assert_eq!(codes(&linker), vec![errors::LOAD_ERROR]);
}

#[test]
fn unresolvable_exports_are_reported() {
  let (linker, _) = link(&[
    ("other.js", "export var x;"),
    ("main.js", "import {missing} from 'other';\nuse(missing);"),
  ]);
  assert_eq!(codes(&linker), vec![errors::RESOLVE_EXPORT_FAILURE]);

  let (linker, _) = link(&[
    ("other.js", "export var x;"),
    ("mid.js", "export {missing} from 'other';"),
  ]);
  assert_eq!(codes(&linker), vec![errors::RESOLVE_EXPORT_FAILURE]);
}

#[test]
fn namespace_property_misses_are_reported() {
  let (linker, _) = link(&[
    ("other.js", "export var x;"),
    ("main.js", "import * as ns from 'other';\nuse(ns.missing);"),
  ]);
  assert_eq!(codes(&linker), vec![errors::RESOLVE_EXPORT_FAILURE]);
}

#[test]
fn assigning_imported_bindings_is_an_error() {
  let mod1 = ("mod1.js", "export var name = 12");

  let (linker, _) = link(&[mod1, ("main.js", "import {name} from 'mod1';\nname = 42;")]);
  assert_eq!(codes(&linker), vec![errors::IMPORTED_BINDING_ASSIGNMENT]);

  let (linker, _) = link(&[mod1, ("main.js", "import {name} from 'mod1';\nname++;")]);
  assert_eq!(codes(&linker), vec![errors::IMPORTED_BINDING_ASSIGNMENT]);

  let (linker, _) = link(&[mod1, ("main.js", "import * as ns from 'mod1';\nns = 42;")]);
  assert_eq!(codes(&linker), vec![errors::IMPORTED_BINDING_ASSIGNMENT]);
}

#[test]
fn assigning_namespace_properties_is_an_error() {
  let mod1 = ("mod1.js", "export var name = 12");

  let (linker, _) = link(&[mod1, ("main.js", "import * as ns from 'mod1';\nns.name = 42;")]);
  assert_eq!(codes(&linker), vec![errors::MODULE_NAMESPACE_ASSIGNMENT]);

  let (linker, _) = link(&[mod1, (
    "main.js",
    "import * as ns from 'mod1';\nns.newName = 42;",
  )]);
  assert_eq!(codes(&linker), vec![errors::MODULE_NAMESPACE_ASSIGNMENT]);
}

#[test]
fn assigning_through_an_imported_object_is_fine() {
  let (linker, ids) = link_ok(&[
    ("mod1.js", "export var obj = { foo: 12 };"),
    (
      "main.js",
      "import {obj} from 'mod1';\nobj.foo = 42;\nobj.newName = 24",
    ),
  ]);
  assert_eq!(
    body(&linker, ids[1]),
    "obj$$module$mod1.foo = 42;\nobj$$module$mod1.newName = 24;\n"
  );
}

#[test]
fn lone_namespace_use_is_an_error() {
  let mod1 = ("mod1.js", "export var name");

  let (linker, _) = link(&[mod1, ("main.js", "import * as ns from 'mod1';\nuse(ns)")]);
  assert_eq!(codes(&linker), vec![errors::MODULE_NAMESPACE_NON_GETPROP]);

  let (linker, _) = link(&[
    mod1,
    ("mod2.js", "import * as ns1 from 'mod1';\nexport {ns1};"),
    ("main.js", "import * as ns2 from 'mod2'\nuse(ns2.ns1)"),
  ]);
  assert_eq!(codes(&linker), vec![errors::MODULE_NAMESPACE_NON_GETPROP]);
}

#[test]
fn duplicate_export_names_are_errors() {
  let (linker, _) = link(&[("testcode.js", "var x, y; export {x as z, y as z};")]);
  assert_eq!(codes(&linker), vec![errors::DUPLICATED_EXPORT_NAMES]);

  let (linker, _) = link(&[("testcode.js", "var x, y; export {x as z}; export {y as z};")]);
  assert_eq!(codes(&linker), vec![errors::DUPLICATED_EXPORT_NAMES]);

  let (linker, _) = link(&[(
    "testcode.js",
    "var x; export {x as default}; export default 1;",
  )]);
  assert_eq!(codes(&linker), vec![errors::DUPLICATED_EXPORT_NAMES]);
}

#[test]
fn duplicate_imported_locals_are_errors() {
  let (linker, _) = link(&[
    ("other.js", "export default 1; export var x"),
    (
      "main.js",
      "import z from 'other';\nimport {x as z} from 'other';",
    ),
  ]);
  assert_eq!(codes(&linker), vec![errors::DUPLICATED_IMPORTED_BOUND_NAMES]);
}

#[test]
fn exporting_undeclared_locals_is_an_error() {
  let (linker, _) = link(&[("testcode.js", "export {foo}")]);
  assert_eq!(codes(&linker), vec![errors::EXPORTED_BINDING_NOT_DECLARED]);

  let (linker, _) = link(&[("testcode.js", "var foo; export {bar as foo};")]);
  assert_eq!(codes(&linker), vec![errors::EXPORTED_BINDING_NOT_DECLARED]);
}

#[test]
fn goog_requires_are_hoisted_and_aliased() {
  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "const bar = goog.require('foo.bar'); export var x;",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "goog.require('foo.bar');\nconst bar$$module$testcode = foo.bar;\nvar x$$module$testcode;\n"
  );

  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "export var x; const bar = goog.require('foo.bar');",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "var x$$module$testcode;\ngoog.require('foo.bar');\nconst bar$$module$testcode = foo.bar;\n"
  );
}

#[test]
fn goog_require_lhs_must_be_const() {
  let (linker, _) = link(&[(
    "testcode.js",
    "var bar = goog.require('foo.bar'); export var x;",
  )]);
  assert_eq!(codes(&linker), vec![errors::LHS_OF_GOOG_REQUIRE_MUST_BE_CONST]);
}

#[test]
fn goog_require_destructuring_is_canonicalized() {
  let (linker, ids) = link_ok(&[
    ("other.js", ""),
    (
      "main.js",
      "import * as s from 'other';\nconst {foo, bar} = goog.require('some.name.space');\nuse(foo, bar);",
    ),
  ]);
  assert_eq!(linker.emit(ids[0]), "");
  assert_eq!(
    body(&linker, ids[1]),
    "goog.require('some.name.space');\nconst {foo: foo$$module$main, bar: bar$$module$main} = some.name.space;\nuse(foo$$module$main, bar$$module$main);\n"
  );
}

#[test]
fn goog_namespace_files_stay_scripts() {
  let (linker, ids) = link_ok(&[
    ("legacy.js", "goog.provide('foo.bar');\nvar x = 1;"),
    ("main.js", "export var y;"),
  ]);
  assert_eq!(linker.emit(ids[0]), "goog.provide('foo.bar');\nvar x = 1;\n");
  assert!(linker.input(ids[0]).provides.is_empty());
}

#[test]
fn existing_use_strict_is_flagged_useless() {
  let (linker, ids) = link(&[("testcode.js", "'use strict';\nexport var x;")]);
  assert!(!linker.has_errors());
  assert_eq!(codes(&linker), vec![errors::USELESS_USE_STRICT_DIRECTIVE]);
  assert_eq!(
    body(&linker, ids[0]),
    "var x$$module$testcode;\n",
    "the existing directive is kept, not duplicated"
  );
}

#[test]
fn synthesizes_overview_and_strict_directive() {
  let (linker, ids) = link_ok(&[("testcode.js", "export var x;")]);
  assert_eq!(
    linker.emit(ids[0]),
    format!("{}\n'use strict';\nvar x$$module$testcode;\n", OVERVIEW)
  );
}

#[test]
fn plain_scripts_are_left_untouched() {
  let (linker, ids) = link_ok(&[
    ("script.js", "var x = 1;\nuse(x);"),
    ("mod.js", "export var y;"),
  ]);
  assert_eq!(linker.emit(ids[0]), "var x = 1;\nuse(x);\n");
  assert!(linker.input(ids[0]).provides.is_empty());
  assert_eq!(linker.input(ids[1]).provides, vec!["module$mod".to_string()]);
}

#[test]
fn relinking_linked_output_is_a_fixpoint() {
  let (first, ids) = link_ok(&[
    ("other.js", "export var name;"),
    ("main.js", "import {name} from 'other';\nuse(name);"),
  ]);
  let other_out = first.emit(ids[0]);
  let main_out = first.emit(ids[1]);

  // The rewritten files no longer import or export anything, so a second
  // session treats them as plain scripts and changes nothing.
  let (second, ids2) = link_ok(&[
    ("other.js", other_out.as_str()),
    ("main.js", main_out.as_str()),
  ]);
  assert_eq!(second.emit(ids2[0]), other_out);
  assert_eq!(second.emit(ids2[1]), main_out);
}

#[test]
fn provides_and_requires_drive_dependency_sorting() {
  let (linker, ids) = link_ok(&[
    ("a.js", "import 'b'; import 'c'"),
    ("b.js", "import 'd'"),
    ("c.js", "import 'd'"),
    ("d.js", "1;"),
  ]);
  let a = linker.input(ids[0]);
  assert_eq!(a.provides, vec!["module$a".to_string()]);
  assert_eq!(a.requires, vec!["module$b".to_string(), "module$c".to_string()]);
  let d = linker.input(ids[3]);
  assert_eq!(d.provides, vec!["module$d".to_string()]);
  assert!(d.requires.is_empty());
}

#[test]
fn cyclic_imports_terminate_and_resolve() {
  let (linker, ids) = link_ok(&[
    ("a.js", "import {b} from 'b';\nexport var a;\nuse(b);"),
    ("b.js", "import {a} from 'a';\nexport var b;\nuse(a);"),
  ]);
  assert_eq!(body(&linker, ids[0]), "var a$$module$a;\nuse(b$$module$b);\n");
  assert_eq!(body(&linker, ids[1]), "var b$$module$b;\nuse(a$$module$a);\n");
}

#[test]
fn unsatisfiable_export_cycles_fail_cleanly() {
  let (linker, _) = link(&[
    ("a.js", "export {x} from 'b';"),
    ("b.js", "export {x} from 'a';"),
    ("main.js", "import {x} from 'a';\nuse(x);"),
  ]);
  assert!(linker.has_errors());
  assert!(codes(&linker)
    .iter()
    .all(|code| *code == errors::RESOLVE_EXPORT_FAILURE));
}

#[test]
fn ambiguous_star_exports_do_not_resolve() {
  let (linker, _) = link(&[
    ("a.js", "export var x;"),
    ("b.js", "export var x;"),
    ("star.js", "export * from 'a';\nexport * from 'b';"),
    ("main.js", "import {x} from 'star';\nuse(x);"),
  ]);
  assert_eq!(codes(&linker), vec![errors::RESOLVE_EXPORT_FAILURE]);
}

#[test]
fn diamond_star_exports_agree_and_resolve() {
  let (linker, ids) = link_ok(&[
    ("base.js", "export var x;"),
    ("a.js", "export * from 'base';"),
    ("b.js", "export * from 'base';"),
    ("top.js", "export * from 'a';\nexport * from 'b';"),
    ("main.js", "import {x} from 'top';\nuse(x);"),
  ]);
  assert_eq!(body(&linker, ids[4]), "use(x$$module$base);\n");
}

#[test]
fn star_exports_never_forward_default() {
  let (linker, ids) = link_ok(&[
    ("mod.js", "export default 1;\nexport var v;"),
    ("star.js", "export * from 'mod';"),
    ("main.js", "import {v} from 'star';\nuse(v);"),
  ]);
  assert_eq!(body(&linker, ids[2]), "use(v$$module$mod);\n");

  let (linker, _) = link(&[
    ("mod.js", "export default 1;\nexport var v;"),
    ("star.js", "export * from 'mod';"),
    ("main.js", "import def from 'star';\nuse(def);"),
  ]);
  assert_eq!(codes(&linker), vec![errors::RESOLVE_EXPORT_FAILURE]);
}

#[test]
fn relative_specifiers_resolve_against_the_referrer() {
  let (linker, ids) = link_ok(&[
    ("lib/util.js", "export var helper;"),
    ("lib/main.js", "import {helper} from './util';\nuse(helper);"),
  ]);
  assert_eq!(body(&linker, ids[1]), "use(helper$$module$lib$util);\n");
}

#[test]
fn locals_shadowing_imports_win_inside_functions() {
  let (linker, ids) = link_ok(&[
    ("other.js", "export var name;"),
    (
      "main.js",
      "import {name} from 'other';\nfunction f(name) { use(name); }\nuse(name);",
    ),
  ]);
  assert_eq!(
    body(&linker, ids[1]),
    "function f$$module$main(name) { use(name); }\nuse(name$$module$other);\n"
  );
}

#[test]
fn block_lexicals_shadow_module_bindings() {
  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "export var a = 1;\nif (x) { let a = 2; use(a); }\nuse(a);",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "var a$$module$testcode = 1;\nif (x) { let a = 2; use(a); }\nuse(a$$module$testcode);\n"
  );
}

#[test]
fn vars_in_blocks_hoist_to_module_scope() {
  let (linker, ids) = link_ok(&[(
    "testcode.js",
    "export var flag;\nif (flag) { var hoisted = 1; }\nuse(hoisted);",
  )]);
  assert_eq!(
    body(&linker, ids[0]),
    "var flag$$module$testcode;\nif (flag$$module$testcode) { var hoisted$$module$testcode = 1; }\nuse(hoisted$$module$testcode);\n"
  );
}
