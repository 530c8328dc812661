//! Config-driven migration through the `etm` facade.

use etm::{AstBuilder, JsEmitter, NodeArena, NodeIndex, migrate_with_config, parse_config};

fn legacy_component_test(legacy_module: &str) -> (NodeArena, NodeIndex) {
    let b = AstBuilder::new();
    let import = b.import(&["setupComponentTest"], legacy_module);
    let options = b.object(vec![b.prop("integration", b.boolean(true))]);
    let setup = b.expr_stmt(b.call_named(
        "setupComponentTest",
        vec![b.string("x-foo"), options],
    ));
    let render = b.expr_stmt(b.call(
        b.this_member("render"),
        vec![b.tagged_template("hbs", "{{x-foo}}")],
    ));
    let test = b.expr_stmt(b.call_named(
        "it",
        vec![b.string("renders"), b.function(&[], vec![render])],
    ));
    let suite = b.expr_stmt(b.call_named(
        "describe",
        vec![b.string("x-foo"), b.function(&[], vec![setup, test])],
    ));
    b.finish(vec![import, suite])
}

#[test]
fn printer_options_come_from_config() {
    let config = parse_config(r#"{ "printer": { "quote": "double", "wrapColumn": 40 } }"#).unwrap();
    let (mut arena, root) = legacy_component_test("ember-mocha");

    let output = migrate_with_config(&mut arena, root, &config, &JsEmitter)
        .unwrap()
        .expect("file uses ember-mocha");
    assert_eq!(
        output,
        "\
import {
  setupRenderingTest,
} from \"ember-mocha\";
import {
  render,
} from \"@ember/test-helpers\";
describe(\"x-foo\", function() {
  setupRenderingTest();
  it(\"renders\", async function() {
    await render(hbs`{{x-foo}}`);
  });
});
"
    );
}

#[test]
fn names_come_from_config() {
    let config = parse_config(r#"{ "names": { "legacyModule": "ember-mocha-legacy" } }"#).unwrap();

    let (mut arena, root) = legacy_component_test("ember-mocha");
    assert_eq!(
        migrate_with_config(&mut arena, root, &config, &JsEmitter),
        Ok(None),
        "default module is not the configured legacy module"
    );

    let (mut arena, root) = legacy_component_test("ember-mocha-legacy");
    let output = migrate_with_config(&mut arena, root, &config, &JsEmitter)
        .unwrap()
        .unwrap();
    assert!(output.starts_with(
        "import { setupRenderingTest } from 'ember-mocha-legacy';\n\
         import { render } from '@ember/test-helpers';\n"
    ));
}
