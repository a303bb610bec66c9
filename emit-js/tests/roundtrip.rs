use emit_js::emit_top_level;
use parse_js::parse;

fn emit(source: &str) -> String {
  let top = parse(source).unwrap_or_else(|err| panic!("parse of {:?} failed: {:?}", source, err));
  emit_top_level(&top)
}

/// Emitting normalized output twice must be a fixpoint.
fn assert_stable(source: &str, expected: &str) {
  let once = emit(source);
  assert_eq!(once, expected, "first emit of {:?}", source);
  let twice = emit(&once);
  assert_eq!(twice, expected, "second emit of {:?}", source);
}

#[test]
fn var_declarations() {
  assert_stable("var a = 1, b = 2;", "var a = 1, b = 2;\n");
  assert_stable("const {x, y: z} = src", "const {x, y: z} = src;\n");
  assert_stable("let [a, , b] = xs;", "let [a, , b] = xs;\n");
}

#[test]
fn functions_and_classes() {
  assert_stable("function f() {}", "function f() {}\n");
  assert_stable(
    "function f(a, b) { return a + b; }",
    "function f(a, b) { return a + b; }\n",
  );
  assert_stable(
    "class Child extends Parent { useParent(parent) {} }",
    "class Child extends Parent { useParent(parent) {} }\n",
  );
  assert_stable("class A { static of() {} }", "class A { static of() {} }\n");
}

#[test]
fn expression_statements() {
  assert_stable("use(name);", "use(name);\n");
  assert_stable("obj.foo = 42", "obj.foo = 42;\n");
  assert_stable("a.b.c.d();", "a.b.c.d();\n");
  assert_stable("x = a + b * c;", "x = a + b * c;\n");
  assert_stable("x = (a + b) * c;", "x = (a + b) * c;\n");
  assert_stable("f()[0].g(1, 2);", "f()[0].g(1, 2);\n");
}

#[test]
fn new_expressions() {
  assert_stable("var x = new Foo;", "var x = new Foo;\n");
  assert_stable("var x = new Foo();", "var x = new Foo();\n");
  assert_stable("var x = new ns.Foo(1);", "var x = new ns.Foo(1);\n");
  assert_stable("obj.useParent(new Parent)", "obj.useParent(new Parent);\n");
}

#[test]
fn object_literals() {
  assert_stable("var obj = { foo: 12 };", "var obj = {foo: 12};\n");
  assert_stable("use({a, b: 2});", "use({a, b: 2});\n");
  // An object literal cannot open an expression statement.
  assert_stable("({x: 1}).x;", "({x: 1}.x);\n");
}

#[test]
fn control_flow() {
  assert_stable("if (a) { b(); } else c();", "if (a) { b(); } else c();\n");
  assert_stable("while (x) x--;", "while (x) x--;\n");
  assert_stable(
    "for (var i = 0; i < n; i++) { use(i); }",
    "for (var i = 0; i < n; i++) { use(i); }\n",
  );
  assert_stable(
    "for (const k in o) { use(k); }",
    "for (const k in o) { use(k); }\n",
  );
  assert_stable(
    "try { f(); } catch (e) { g(e); } finally { h(); }",
    "try { f(); } catch (e) { g(e); } finally { h(); }\n",
  );
}

#[test]
fn import_export_forms() {
  assert_stable(
    "import def, {a as b} from 'mod';",
    "import def, {a as b} from 'mod';\n",
  );
  assert_stable("import * as ns from 'mod';", "import * as ns from 'mod';\n");
  assert_stable("import 'mod';", "import 'mod';\n");
  assert_stable("export {f as foo, b};", "export {f as foo, b};\n");
  assert_stable("export * from 'mod';", "export * from 'mod';\n");
  assert_stable("export var a = 1;", "export var a = 1;\n");
  assert_stable("export default 'someString';", "export default 'someString';\n");
}

#[test]
fn doc_comments_travel_with_statements() {
  assert_stable(
    "/** @type {number} */ var x = 3;",
    "/** @type {number} */\nvar x = 3;\n",
  );
  assert_stable(
    "class C { /** @param {F} a */ m(a) {} }",
    "class C { /** @param {F} a */ m(a) {} }\n",
  );
}

#[test]
fn strings_keep_raw_quoting() {
  assert_stable("use('a\\'b', \"c\");", "use('a\\'b', \"c\");\n");
}

#[test]
fn arrows() {
  assert_stable("const f = (a, b) => a + b;", "const f = (a, b) => a + b;\n");
  assert_stable("const g = x => ({a: x});", "const g = (x) => ({a: x});\n");
  assert_stable("const h = () => { use(1); };", "const h = () => { use(1); };\n");
}
