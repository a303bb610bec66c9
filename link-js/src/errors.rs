//! Diagnostic codes and constructors for module linking.
//!
//! The code strings are external contract; downstream tooling matches on
//! them, so they are stable (including the historical `ASSIGNEMNT`
//! spelling).

use diagnostics::{Diagnostic, FileId, Span, TextRange};
use parse_js::error::SyntaxError;
use parse_js::loc::Loc;

pub const MODULE_NAMESPACE_ASSIGNMENT: &str = "ES6_MODULE_NAMESPACE_OBJECT_ASSIGNEMNT";
pub const MODULE_NAMESPACE_NON_GETPROP: &str = "ES6_MODULE_NAMESPACE_OBJECT_NON_GETPROP";
pub const IMPORTED_BINDING_ASSIGNMENT: &str = "ES6_IMPORTED_BINDING_ASSIGNMENT";
pub const LHS_OF_GOOG_REQUIRE_MUST_BE_CONST: &str = "LHS_OF_GOOG_REQUIRE_MUST_BE_CONST";
pub const USELESS_USE_STRICT_DIRECTIVE: &str = "USELESS_USE_STRICT_DIRECTIVE";
pub const DUPLICATED_IMPORTED_BOUND_NAMES: &str = "ES6_DUPLICATED_IMPORTED_BOUND_NAMES";
pub const DUPLICATED_EXPORT_NAMES: &str = "ES6_DUPLICATED_EXPORT_NAMES";
pub const RESOLVE_EXPORT_FAILURE: &str = "ES6_RESOLVE_EXPORT_FAILURE";
pub const EXPORTED_BINDING_NOT_DECLARED: &str = "ES6_EXPORTED_BINDING_NOT_DECLARED";
pub const LOAD_ERROR: &str = "LOAD_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";

pub(crate) fn loc_span(file: FileId, loc: Loc) -> Span {
  Span::new(
    file,
    TextRange::new(loc.0.min(u32::MAX as usize) as u32, loc.1.min(u32::MAX as usize) as u32),
  )
}

pub(crate) fn parse_error(file: FileId, err: &SyntaxError) -> Diagnostic {
  Diagnostic::error(PARSE_ERROR, err.typ.message(), loc_span(file, err.loc))
}

pub(crate) fn module_namespace_assignment(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::error(
    MODULE_NAMESPACE_ASSIGNMENT,
    "All properties on module namespace exotic object are immutable.",
    loc_span(file, loc),
  )
}

pub(crate) fn module_namespace_non_getprop(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::error(
    MODULE_NAMESPACE_NON_GETPROP,
    "Using module namespace exotic object without property get is not supported.",
    loc_span(file, loc),
  )
}

pub(crate) fn imported_binding_assignment(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::error(
    IMPORTED_BINDING_ASSIGNMENT,
    "Imported bindings are immutable.",
    loc_span(file, loc),
  )
}

pub(crate) fn lhs_of_goog_require_must_be_const(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::error(
    LHS_OF_GOOG_REQUIRE_MUST_BE_CONST,
    "The left side of a goog.require() must use `const` (not `let` or `var`)",
    loc_span(file, loc),
  )
}

pub(crate) fn useless_use_strict_directive(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::warning(
    USELESS_USE_STRICT_DIRECTIVE,
    "'use strict' is unnecessary in module files.",
    loc_span(file, loc),
  )
}

pub(crate) fn duplicated_imported_bound_names(file: FileId, loc: Loc, name: &str) -> Diagnostic {
  Diagnostic::error(
    DUPLICATED_IMPORTED_BOUND_NAMES,
    format!("Duplicated imported binding name: {}", name),
    loc_span(file, loc),
  )
}

pub(crate) fn duplicated_export_names(file: FileId, loc: Loc, name: &str) -> Diagnostic {
  Diagnostic::error(
    DUPLICATED_EXPORT_NAMES,
    format!("Duplicated export name: {}", name),
    loc_span(file, loc),
  )
}

pub(crate) fn resolve_export_failure(
  file: FileId,
  loc: Loc,
  module_name: &str,
  export_name: &str,
) -> Diagnostic {
  Diagnostic::error(
    RESOLVE_EXPORT_FAILURE,
    format!(
      "Failed to resolve exported name \"{}\" in module \"{}\"",
      export_name, module_name
    ),
    loc_span(file, loc),
  )
}

pub(crate) fn exported_binding_not_declared(file: FileId, loc: Loc, name: &str) -> Diagnostic {
  Diagnostic::error(
    EXPORTED_BINDING_NOT_DECLARED,
    format!("Exporting local name \"{}\" is not declared.", name),
    loc_span(file, loc),
  )
}

pub(crate) fn load_error(file: FileId, loc: Loc, specifier: &str) -> Diagnostic {
  Diagnostic::error(
    LOAD_ERROR,
    format!("Failed to load module \"{}\"", specifier),
    loc_span(file, loc),
  )
}
