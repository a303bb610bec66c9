//! Specifier resolution: maps module specifiers to canonical addresses and
//! addresses to stable module names.

use std::collections::BTreeSet;

/// Every canonical module name starts with this prefix. The rewriter relies
/// on it to recognize a materialized module namespace by identifier text
/// alone.
pub const MODULE_NAME_PREFIX: &str = "module$";

/// Whether a specifier is spelled relative to the importing file.
pub fn is_relative_identifier(specifier: &str) -> bool {
  specifier.starts_with("./") || specifier.starts_with("../")
}

/// Derives the stable, concatenation-safe module name for an address:
/// `path/to/mod-x.js` becomes `module$path$to$mod_x`.
pub fn to_module_name(address: &str) -> String {
  let trimmed = address.strip_prefix("./").unwrap_or(address);
  let trimmed = trimmed.strip_suffix(".js").unwrap_or(trimmed);
  let mut name = String::with_capacity(MODULE_NAME_PREFIX.len() + trimmed.len());
  name.push_str(MODULE_NAME_PREFIX);
  for c in trimmed.chars() {
    name.push(match c {
      '/' | '\\' => '$',
      '-' | '.' => '_',
      c => c,
    });
  }
  name
}

/// Maps a specifier to the canonical address of a registered input.
pub trait ModuleLoader {
  /// Canonicalizes a raw input path.
  fn normalize(&self, path: &str) -> String;
  /// Resolves `specifier` as written in the file at `referrer` to the
  /// canonical address of a registered input, or `None` when nothing
  /// registered matches.
  fn locate(&self, specifier: &str, referrer: &str) -> Option<String>;
}

/// The standard loader: resolves relative specifiers against the referrer's
/// directory and bare specifiers against the input root, over the set of
/// registered input paths.
#[derive(Default)]
pub struct PathLoader {
  known: BTreeSet<String>,
}

impl PathLoader {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_input(&mut self, address: String) {
    self.known.insert(address);
  }
}

fn fold_segments(path: &str) -> String {
  let mut segments: Vec<&str> = Vec::new();
  for segment in path.split('/') {
    match segment {
      "" | "." => {}
      ".." => {
        segments.pop();
      }
      segment => segments.push(segment),
    }
  }
  segments.join("/")
}

fn with_js_extension(path: String) -> String {
  if path.rsplit('/').next().is_some_and(|base| base.contains('.')) {
    path
  } else {
    path + ".js"
  }
}

impl ModuleLoader for PathLoader {
  fn normalize(&self, path: &str) -> String {
    with_js_extension(fold_segments(path))
  }

  fn locate(&self, specifier: &str, referrer: &str) -> Option<String> {
    let joined = if is_relative_identifier(specifier) {
      let dir = match referrer.rfind('/') {
        Some(idx) => &referrer[..idx],
        None => "",
      };
      if dir.is_empty() {
        specifier.to_string()
      } else {
        format!("{}/{}", dir, specifier)
      }
    } else {
      specifier.to_string()
    };
    let address = self.normalize(&joined);
    self.known.contains(&address).then_some(address)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn module_names_carry_the_prefix() {
    assert_eq!(to_module_name("testcode.js"), "module$testcode");
    assert_eq!(to_module_name("foo/bar.js"), "module$foo$bar");
    assert_eq!(to_module_name("./a/b-c.js"), "module$a$b_c");
    assert_eq!(to_module_name("x.y/z.js"), "module$x_y$z");
  }

  #[test]
  fn relative_identifier_detection() {
    assert!(is_relative_identifier("./mod"));
    assert!(is_relative_identifier("../up/mod"));
    assert!(!is_relative_identifier("mod"));
    assert!(!is_relative_identifier("scope/mod"));
  }

  fn loader(paths: &[&str]) -> PathLoader {
    let mut loader = PathLoader::new();
    for path in paths {
      let normalized = loader.normalize(path);
      loader.add_input(normalized);
    }
    loader
  }

  #[test]
  fn locates_bare_specifiers_from_the_root() {
    let loader = loader(&["other.js", "lib/util.js"]);
    assert_eq!(loader.locate("other", "main.js").as_deref(), Some("other.js"));
    assert_eq!(
      loader.locate("lib/util", "main.js").as_deref(),
      Some("lib/util.js")
    );
    assert_eq!(loader.locate("missing", "main.js"), None);
  }

  #[test]
  fn locates_relative_specifiers_from_the_referrer() {
    let loader = loader(&["a/b/mod.js", "a/sib.js"]);
    assert_eq!(
      loader.locate("./mod", "a/b/main.js").as_deref(),
      Some("a/b/mod.js")
    );
    assert_eq!(
      loader.locate("../sib", "a/b/main.js").as_deref(),
      Some("a/sib.js")
    );
    assert_eq!(loader.locate("./mod", "main.js"), None);
  }

  #[test]
  fn normalize_appends_extension_and_folds_dots() {
    let loader = PathLoader::new();
    assert_eq!(loader.normalize("./x/./y/../z"), "x/z.js");
    assert_eq!(loader.normalize("x/z.js"), "x/z.js");
  }
}
