//! Integration tests for the reference printer.

use etm_ast::node::{
    AccessExprData, CallExprData, ExprStatementData, IdentifierData, ImportDeclData, LiteralData,
    OtherData, SourceFileData, SpecifierData,
};
use etm_ast::{AstBuilder, NodeArena, NodeIndex, NodeList, SourcePrinter, SyntaxKind};
use etm_common::{PrinterOptions, QuoteStyle};
use etm_emitter::{JsEmitter, Printer};

fn print(arena: &NodeArena, root: NodeIndex) -> String {
    JsEmitter.print(arena, root, &PrinterOptions::default())
}

fn print_with(arena: &NodeArena, root: NodeIndex, options: PrinterOptions) -> String {
    JsEmitter.print(arena, root, &options)
}

const PARSED_SOURCE: &str = "import { a } from 'x';\n\n// keep\nfoo(1, 2);\n";

/// Hand-built tree for `PARSED_SOURCE`, with real spans, as a host parser
/// would produce it. Returns the arena, the root and the `foo` identifier.
fn parsed_fixture() -> (NodeArena, NodeIndex, NodeIndex) {
    let mut arena = NodeArena::new();
    arena.set_source_text(PARSED_SOURCE);

    let ident = |arena: &mut NodeArena, text: &str, pos: u32| {
        arena.add_identifier(
            pos,
            pos + text.len() as u32,
            IdentifierData {
                escaped_text: text.to_string(),
            },
        )
    };
    let literal = |arena: &mut NodeArena, kind: SyntaxKind, raw: &str, text: &str, pos: u32| {
        arena.add_literal(
            kind,
            pos,
            pos + raw.len() as u32,
            LiteralData {
                text: text.to_string(),
                raw_text: Some(raw.to_string()),
            },
        )
    };

    let a = ident(&mut arena, "a", 9);
    let spec = arena.add_specifier(
        SyntaxKind::ImportSpecifier,
        9,
        10,
        SpecifierData {
            property_name: NodeIndex::NONE,
            name: a,
        },
    );
    let source = literal(&mut arena, SyntaxKind::StringLiteral, "'x'", "x", 18);
    let import = arena.add_import_decl(
        0,
        22,
        ImportDeclData {
            specifiers: NodeList::new(vec![spec]),
            module_specifier: source,
        },
    );

    let foo = ident(&mut arena, "foo", 32);
    let one = literal(&mut arena, SyntaxKind::NumericLiteral, "1", "1", 36);
    let two = literal(&mut arena, SyntaxKind::NumericLiteral, "2", "2", 39);
    let call = arena.add_call_expr(
        32,
        41,
        CallExprData {
            expression: foo,
            arguments: NodeList::new(vec![one, two]),
        },
    );
    let stmt = arena.add_expr_statement(32, 42, ExprStatementData { expression: call });

    let root = arena.add_source_file(
        0,
        PARSED_SOURCE.len() as u32,
        SourceFileData {
            file_name: "fixture.js".to_string(),
            statements: NodeList::new(vec![import, stmt]),
        },
    );
    (arena, root, foo)
}

#[test]
fn test_untouched_tree_is_reproduced_verbatim() {
    let (arena, root, _) = parsed_fixture();
    assert_eq!(print(&arena, root), PARSED_SOURCE);
}

#[test]
fn test_modified_statement_keeps_neighbours_and_trivia() {
    let (mut arena, root, foo) = parsed_fixture();
    assert!(arena.rename_identifier(foo, "bar"));

    let output = print(&arena, root);
    assert_eq!(output, "import { a } from 'x';\n\n// keep\nbar(1, 2);\n");
}

#[test]
fn test_set_source_text_overrides_arena_text() {
    let (mut arena, root, foo) = parsed_fixture();
    arena.source_text = None;
    assert!(arena.rename_identifier(foo, "bar"));

    let options = PrinterOptions::default();
    let mut printer = Printer::new(&arena, &options);
    printer.set_source_text(PARSED_SOURCE);
    printer.print(root);
    let output = printer.finish();
    assert!(
        output.starts_with("import { a } from 'x';\n\n// keep\n"),
        "verbatim import and comment expected: {output}"
    );
}

#[test]
fn test_rendering_test_shape() {
    let b = AstBuilder::new();
    let import = b.import(&["render"], "@ember/test-helpers");
    let render = b.expr_stmt(b.await_expr(
        b.call_named("render", vec![b.tagged_template("hbs", "<div></div>")]),
    ));
    let test = b.expr_stmt(b.call_named(
        "it",
        vec![b.string("renders"), b.async_function(&[], vec![render])],
    ));
    let suite = b.expr_stmt(b.call_named(
        "describe",
        vec![b.string("x"), b.function(&[], vec![test])],
    ));
    let (arena, root) = b.finish(vec![import, suite]);

    let expected = "\
import { render } from '@ember/test-helpers';
describe('x', function() {
  it('renders', async function() {
    await render(hbs`<div></div>`);
  });
});
";
    assert_eq!(print(&arena, root), expected);
}

#[test]
fn test_double_quote_style_and_escaping() {
    let b = AstBuilder::new();
    let stmt = b.expr_stmt(b.call_named("it", vec![b.string("says \"hi\" and it's fine")]));
    let (arena, root) = b.finish(vec![stmt]);

    let options = PrinterOptions {
        quote: QuoteStyle::Double,
        ..PrinterOptions::default()
    };
    assert_eq!(
        print_with(&arena, root, options),
        "it(\"says \\\"hi\\\" and it's fine\");\n"
    );
    assert_eq!(print(&arena, root), "it('says \"hi\" and it\\'s fine');\n");
}

#[test]
fn test_import_specifiers_wrap_past_column() {
    let b = AstBuilder::new();
    let stmt = b.import(&["clearRender", "render", "settled"], "@ember/test-helpers");
    let (arena, root) = b.finish(vec![stmt]);

    let options = PrinterOptions {
        wrap_column: 40,
        ..PrinterOptions::default()
    };
    let expected = "\
import {
  clearRender,
  render,
  settled,
} from '@ember/test-helpers';
";
    assert_eq!(print_with(&arena, root, options), expected);
    assert_eq!(
        print(&arena, root),
        "import { clearRender, render, settled } from '@ember/test-helpers';\n"
    );
}

#[test]
fn test_call_arguments_wrap_past_column() {
    let b = AstBuilder::new();
    let stmt = b.expr_stmt(b.call_named(
        "foo",
        vec![b.ident("aaaaaaaaaa"), b.ident("bbbbbbbbbb")],
    ));
    let (arena, root) = b.finish(vec![stmt]);

    let options = PrinterOptions {
        wrap_column: 20,
        ..PrinterOptions::default()
    };
    assert_eq!(
        print_with(&arena, root, options),
        "foo(\n  aaaaaaaaaa,\n  bbbbbbbbbb\n);\n"
    );
}

#[test]
fn test_zero_wrap_column_never_wraps() {
    let b = AstBuilder::new();
    let stmt = b.import(&["aaaaaaaaaaaaaaaaaaaa", "bbbbbbbbbbbbbbbbbbbb"], "x");
    let (arena, root) = b.finish(vec![stmt]);

    let options = PrinterOptions {
        wrap_column: 0,
        ..PrinterOptions::default()
    };
    let output = print_with(&arena, root, options);
    assert_eq!(output.lines().count(), 1, "unexpected wrap: {output}");
}

#[test]
fn test_callback_argument_does_not_force_wrap() {
    let b = AstBuilder::new();
    let inner = b.expr_stmt(b.call_named("setupRenderingTest", vec![]));
    let stmt = b.expr_stmt(b.call_named(
        "describe",
        vec![b.string("Integration | Component | x-foo"), b.function(&[], vec![inner])],
    ));
    let (arena, root) = b.finish(vec![stmt]);

    assert_eq!(
        print(&arena, root),
        "describe('Integration | Component | x-foo', function() {\n  setupRenderingTest();\n});\n"
    );
}

#[test]
fn test_import_binding_forms() {
    let b = AstBuilder::new();
    let empty = b.import(&[], "side-effect");
    let default = b.import_default("hbs", "htmlbars-inline-precompile");
    let namespace = b.import_namespace("helpers", "@ember/test-helpers");
    let aliased = b.import_aliased("setupTest", "setup", "ember-mocha");
    let (arena, root) = b.finish(vec![empty, default, namespace, aliased]);

    let expected = "\
import 'side-effect';
import hbs from 'htmlbars-inline-precompile';
import * as helpers from '@ember/test-helpers';
import { setupTest as setup } from 'ember-mocha';
";
    assert_eq!(print(&arena, root), expected);
}

#[test]
fn test_statements_and_arrows() {
    let b = AstBuilder::new();
    let decl = b.const_decl(
        "options",
        b.object(vec![b.prop("integration", b.boolean(true)), b.shorthand("needs")]),
    );
    let empty_let = b.let_decl("element", None);
    let branch = b.if_stmt(
        b.this_member("ready"),
        vec![b.return_stmt(Some(b.null()))],
        Some(vec![b.return_stmt(None)]),
    );
    let arrow = b.const_decl("make", b.arrow_expr(&["x"], b.object(vec![])));
    let list = b.const_decl("list", b.array(vec![b.number("1"), b.template("t")]));
    let (arena, root) = b.finish(vec![decl, empty_let, branch, arrow, list]);

    let expected = "\
const options = { integration: true, needs };
let element;
if (this.ready) {
  return null;
} else {
  return;
}
const make = (x) => ({});
const list = [1, `t`];
";
    assert_eq!(print(&arena, root), expected);
}

#[test]
fn test_function_declaration_and_empty_block() {
    let b = AstBuilder::new();
    let func = b.function_declaration("noop", &["a", "b"], vec![]);
    let (arena, root) = b.finish(vec![func]);

    assert_eq!(print(&arena, root), "function noop(a, b) {}\n");
}

const INDEXED_SOURCE: &str = "this._element.children[0];\n";

/// `this._element.children[0];` with the element access held by an `Other`
/// node. Returns the arena, the root and the `_element` identifier.
fn indexed_fixture() -> (NodeArena, NodeIndex, NodeIndex) {
    let mut arena = NodeArena::new();
    arena.set_source_text(INDEXED_SOURCE);

    let this = arena.add_token(SyntaxKind::ThisKeyword, 0, 4);
    let element = arena.add_identifier(
        5,
        13,
        IdentifierData {
            escaped_text: "_element".to_string(),
        },
    );
    let element_access = arena.add_access_expr(
        0,
        13,
        AccessExprData {
            expression: this,
            name_or_argument: element,
            question_dot_token: false,
        },
    );
    let children = arena.add_identifier(
        14,
        22,
        IdentifierData {
            escaped_text: "children".to_string(),
        },
    );
    let children_access = arena.add_access_expr(
        0,
        22,
        AccessExprData {
            expression: element_access,
            name_or_argument: children,
            question_dot_token: false,
        },
    );
    let indexed = arena.add_other(
        0,
        25,
        OtherData {
            children: NodeList::new(vec![children_access]),
            fragments: Vec::new(),
        },
    );
    let stmt = arena.add_expr_statement(0, 26, ExprStatementData { expression: indexed });
    let root = arena.add_source_file(
        0,
        INDEXED_SOURCE.len() as u32,
        SourceFileData {
            file_name: "indexed.js".to_string(),
            statements: NodeList::new(vec![stmt]),
        },
    );
    (arena, root, element)
}

#[test]
fn test_modified_other_splices_children_into_source() {
    let (mut arena, root, element) = indexed_fixture();
    assert_eq!(print(&arena, root), INDEXED_SOURCE);

    assert!(arena.rename_identifier(element, "element"));
    assert_eq!(print(&arena, root), "this.element.children[0];\n");
}

#[test]
fn test_synthesized_other_prints_fragments() {
    let b = AstBuilder::new();
    let render = b.expr_stmt(b.await_expr(b.call_named("render", vec![])));
    let attempt = b.other(&["try ", " catch (e) {}"], vec![b.block(vec![render])]);
    let text = b.member(b.this_member("element"), "textContent");
    let check = b.expr_stmt(b.other(&["", " === "], vec![text, b.string("x")]));
    let (arena, root) = b.finish(vec![attempt, check]);

    let expected = "\
try {
  await render();
} catch (e) {}
this.element.textContent === 'x';
";
    assert_eq!(print(&arena, root), expected);
}
