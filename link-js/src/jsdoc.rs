//! Rewrites type names inside doc comments.
//!
//! Type annotations can reference imported bindings and namespace paths
//! just like code can, plus a relative-path syntax where everything up to
//! the first period after the last slash is a module specifier:
//!
//! ```text
//! @param {./path/to.the/module.NAME} arg
//!         ^^^^^^^^^^^^^^^^^^^^ module specifier
//! ```
//!
//! Doc types never add edges to the dependency graph, so a relative name
//! may refer to a module the loader cannot resolve; that is reported and
//! the name is left as written.

use itertools::Itertools;
use parse_js::lex::DocComment;

use crate::errors;
use crate::loader::is_relative_identifier;
use crate::module::{global_name, Binding};
use crate::rewrite::ModuleRewriter;

/// Tags whose braced group is a type position.
const TYPE_TAGS: &[&str] = &[
  "const", "define", "enum", "extends", "implements", "param", "return", "returns", "this",
  "throws", "type", "typedef",
];

pub(crate) fn rewrite_doc_types(rewriter: &mut ModuleRewriter, doc: &mut DocComment) {
  let text = doc.text.clone();
  let bytes = text.as_bytes();
  let mut out = String::with_capacity(text.len());
  let mut pos = 0;

  while let Some(at) = text[pos..].find('@') {
    let tag_start = pos + at + 1;
    let tag_end = tag_start
      + text[tag_start..]
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    let tag = &text[tag_start..tag_end];
    if !TYPE_TAGS.contains(&tag) {
      out.push_str(&text[pos..tag_end]);
      pos = tag_end;
      continue;
    }
    // The type group, if present, is the next non-whitespace character
    // being `{`.
    let mut group_start = tag_end;
    while group_start < bytes.len() && (bytes[group_start] as char).is_whitespace() {
      group_start += 1;
    }
    if group_start >= bytes.len() || bytes[group_start] != b'{' {
      out.push_str(&text[pos..tag_end]);
      pos = tag_end;
      continue;
    }
    let Some(group_end) = matching_brace(bytes, group_start) else {
      out.push_str(&text[pos..]);
      pos = text.len();
      break;
    };
    out.push_str(&text[pos..=group_start]);
    let inner = &text[group_start + 1..group_end];
    out.push_str(&rewrite_type_region(rewriter, doc, inner));
    out.push('}');
    pos = group_end + 1;
  }
  out.push_str(&text[pos..]);
  doc.text = out;
}

/// Index of the `}` matching the `{` at `open`, honoring nesting (record
/// and function types contain inner braces).
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
  let mut depth = 0usize;
  for (idx, &byte) in bytes.iter().enumerate().skip(open) {
    match byte {
      b'{' => depth += 1,
      b'}' => {
        depth -= 1;
        if depth == 0 {
          return Some(idx);
        }
      }
      _ => {}
    }
  }
  None
}

fn is_name_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/' | '-')
}

/// Rewrites every dotted name path inside one braced type group.
fn rewrite_type_region(rewriter: &mut ModuleRewriter, doc: &DocComment, region: &str) -> String {
  let mut out = String::with_capacity(region.len());
  let mut chars = region.char_indices().peekable();
  while let Some((start, c)) = chars.next() {
    let starts_name = c.is_ascii_alphabetic()
      || matches!(c, '_' | '$')
      || (c == '.' && region[start..].starts_with("./"))
      || (c == '.' && region[start..].starts_with("../"));
    if !starts_name {
      out.push(c);
      continue;
    }
    let mut end = start + c.len_utf8();
    while let Some(&(idx, next)) = chars.peek() {
      if is_name_char(next) {
        end = idx + next.len_utf8();
        chars.next();
      } else {
        break;
      }
    }
    let name = &region[start..end];
    match fix_type_name(rewriter, doc, name) {
      Some(fixed) => out.push_str(&fixed),
      None => out.push_str(name),
    }
  }
  out
}

/// Maps one dotted type name to its rewritten form, or `None` to leave it
/// untouched.
fn fix_type_name(rewriter: &mut ModuleRewriter, doc: &DocComment, name: &str) -> Option<String> {
  let (mut binding, mut rest): (Binding, Vec<&str>) = if is_relative_identifier(name) {
    //   @type {./foo/bar.baz/qux.Foo}
    let last_slash = name.rfind('/').expect("relative name contains a slash");
    let Some(dot) = name[last_slash..].find('.') else {
      // A bare specifier is the namespace object itself, which cannot be a
      // type.
      rewriter.diagnostics.push(errors::module_namespace_non_getprop(
        rewriter.file,
        doc.loc,
      ));
      return None;
    };
    let split = last_slash + dot;
    let specifier = &name[..split];
    let Some(module) =
      rewriter
        .registry
        .resolve_imported_module(rewriter.loader, rewriter.module, specifier)
    else {
      // Doc types are not instantiated, so the specifier may point nowhere.
      rewriter
        .diagnostics
        .push(errors::load_error(rewriter.file, doc.loc, specifier));
      return None;
    };
    (
      Binding {
        module,
        name: None,
      },
      name[split + 1..].split('.').collect(),
    )
  } else {
    let mut parts = name.split('.');
    let base = parts.next().expect("split yields at least one part");
    let binding = rewriter.resolve_module_binding(base)?;
    (binding, parts.collect())
  };

  // Walk the dotted path through nested namespaces until a concrete
  // binding is reached.
  while binding.name.is_none() {
    if rest.is_empty() {
      rewriter.diagnostics.push(errors::module_namespace_non_getprop(
        rewriter.file,
        doc.loc,
      ));
      return None;
    }
    let property = rest.remove(0);
    match rewriter
      .registry
      .namespace_get(rewriter.loader, binding.module, property)
    {
      None => {
        rewriter.diagnostics.push(errors::resolve_export_failure(
          rewriter.file,
          doc.loc,
          rewriter.registry.module_name(binding.module),
          property,
        ));
        return None;
      }
      Some(resolved) => binding = resolved,
    }
  }

  let bound_name = binding.name.as_deref().expect("concrete binding");
  let mut new_name = global_name(bound_name, rewriter.registry.module_name(binding.module));
  if !rest.is_empty() {
    new_name = format!("{}.{}", new_name, rest.iter().join("."));
  }
  Some(new_name)
}
