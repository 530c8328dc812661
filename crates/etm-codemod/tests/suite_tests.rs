use crate::error::MigrationError;
use crate::suite::*;
use etm_ast::{AstBuilder, NodeIndex, SyntaxKind};
use etm_common::MigrationNames;

/// `setupComponentTest('name', options);`
fn setup_call(b: &AstBuilder, options: Option<NodeIndex>) -> NodeIndex {
    let mut args = vec![b.string("component:x-foo")];
    args.extend(options);
    b.expr_stmt(b.call_named("setupComponentTest", args))
}

/// `describe('name', function() { body });`
fn describe(b: &AstBuilder, body: Vec<NodeIndex>) -> NodeIndex {
    b.expr_stmt(b.call_named(
        "describe",
        vec![b.string("XFooComponent"), b.function(&[], body)],
    ))
}

fn it(b: &AstBuilder, body: Vec<NodeIndex>) -> NodeIndex {
    b.expr_stmt(b.call_named("it", vec![b.string("works"), b.function(&[], body)]))
}

#[test]
fn test_classify_statement_kinds() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let setup = setup_call(&b, Some(b.object(vec![])));
    let test = it(&b, vec![]);
    let hook = b.expr_stmt(b.call_named("afterEach", vec![b.function(&[], vec![])]));
    let member = b.expr_stmt(b.call(b.member(b.ident("it"), "skip"), vec![]));
    let other = b.expr_stmt(b.call_named("expect", vec![]));
    let arena = b.into_arena();

    assert!(matches!(
        classify_statement(&arena, setup, &names),
        SuiteStatement::SetupCall { .. }
    ));
    assert!(matches!(
        classify_statement(&arena, test, &names),
        SuiteStatement::TestCase { .. }
    ));
    assert!(matches!(
        classify_statement(&arena, hook, &names),
        SuiteStatement::LifecycleHook {
            kind: HookKind::AfterEach,
            ..
        }
    ));
    // `it.skip(...)` has a member callee, not the bare identifier.
    assert_eq!(classify_statement(&arena, member, &names), SuiteStatement::Other);
    assert_eq!(classify_statement(&arena, other, &names), SuiteStatement::Other);
}

#[test]
fn test_classify_honors_configured_names() {
    let names = MigrationNames {
        test_keyword: "setupComponentTest".to_string(),
        ..MigrationNames::default()
    };
    let b = AstBuilder::new();
    let stmt = setup_call(&b, None);
    let arena = b.into_arena();

    // The setup macro check runs first.
    assert!(matches!(
        classify_statement(&arena, stmt, &names),
        SuiteStatement::SetupCall { .. }
    ));
}

#[test]
fn test_analyze_rendering_suite() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let options = b.object(vec![b.prop("integration", b.boolean(true))]);
    let setup = setup_call(&b, Some(options));
    let before = b.expr_stmt(b.call_named("beforeEach", vec![b.function(&[], vec![])]));
    let first = it(&b, vec![]);
    let second = it(&b, vec![]);
    let suite = describe(&b, vec![setup, before, first, second]);
    let arena = b.into_arena();

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    assert!(descriptor.is_legacy_setup);
    assert_eq!(descriptor.setup_kind, Some(SetupKind::Rendering));
    assert_eq!(descriptor.setup_name(&names), Some("setupRenderingTest"));
    assert_eq!(descriptor.tests.len(), 2);
    assert_eq!(descriptor.hooks.len(), 1);
    assert_eq!(descriptor.hooks[0].0, HookKind::BeforeEach);
    assert_eq!(resolve_setup_name(&descriptor, &names).as_deref(), Some("setupRenderingTest"));
}

#[test]
fn test_analyze_plain_suite_without_integration() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let options = b.object(vec![b.prop("needs", b.array(vec![b.string("service:foo")]))]);
    let suite = describe(&b, vec![setup_call(&b, Some(options))]);
    let arena = b.into_arena();

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    assert_eq!(descriptor.setup_kind, Some(SetupKind::Plain));
    assert_eq!(resolve_setup_name(&descriptor, &names).as_deref(), Some("setupTest"));
}

#[test]
fn test_integration_flag_value_is_irrelevant() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let false_flag = describe(
        &b,
        vec![setup_call(&b, Some(b.object(vec![b.prop("integration", b.boolean(false))])))],
    );
    let shorthand = describe(&b, vec![setup_call(&b, Some(b.object(vec![b.shorthand("integration")])))]);
    let arena = b.into_arena();

    for suite in [false_flag, shorthand] {
        let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
        assert_eq!(descriptor.setup_kind, Some(SetupKind::Rendering));
    }
}

#[test]
fn test_string_keyed_integration_does_not_count() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let options = b.object(vec![b.string_prop("integration", b.boolean(true))]);
    let suite = describe(&b, vec![setup_call(&b, Some(options))]);
    let arena = b.into_arena();

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    assert_eq!(descriptor.setup_kind, Some(SetupKind::Plain));
}

#[test]
fn test_suite_without_setup_is_not_legacy() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let suite = describe(&b, vec![it(&b, vec![])]);
    let arena = b.into_arena();

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    assert!(!descriptor.is_legacy_setup);
    assert_eq!(descriptor.setup_kind, None);
    assert!(descriptor.setup_call.is_none());
    assert_eq!(resolve_setup_name(&descriptor, &names), None);
}

#[test]
fn test_setup_without_options_is_an_error() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let suite = describe(&b, vec![setup_call(&b, None)]);
    let arena = b.into_arena();

    assert_eq!(
        SuiteDescriptor::analyze(&arena, suite, &names),
        Err(MigrationError::MissingExpectedField {
            construct: "setup macro call",
            field: "options argument",
        })
    );
}

#[test]
fn test_non_object_options_is_an_error() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let options = b.ident("sharedOptions");
    let suite = describe(&b, vec![setup_call(&b, Some(options))]);
    let arena = b.into_arena();

    assert_eq!(
        SuiteDescriptor::analyze(&arena, suite, &names),
        Err(MigrationError::InvalidNode {
            index: options.0,
            expected: SyntaxKind::ObjectLiteralExpression,
        })
    );
}

#[test]
fn test_suite_callback_must_be_a_function_with_block() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let no_callback = b.expr_stmt(b.call_named("describe", vec![b.string("x")]));
    let arrow_expr = b.expr_stmt(b.call_named(
        "describe",
        vec![b.string("x"), b.arrow_expr(&[], b.null())],
    ));
    let arena = b.into_arena();

    for suite in [no_callback, arrow_expr] {
        assert_eq!(
            SuiteDescriptor::analyze(&arena, suite, &names),
            Err(MigrationError::MissingExpectedField {
                construct: "suite block",
                field: "callback function",
            })
        );
    }
}

#[test]
fn test_arrow_callback_with_block_is_accepted() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let suite = b.expr_stmt(b.call_named(
        "describe",
        vec![b.string("x"), b.arrow(&[], vec![it(&b, vec![])])],
    ));
    let arena = b.into_arena();

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    assert_eq!(descriptor.tests.len(), 1);
}

#[test]
fn test_first_setup_call_wins() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let first = setup_call(&b, Some(b.object(vec![b.prop("integration", b.boolean(true))])));
    // Would be an error if it were analyzed.
    let second = setup_call(&b, None);
    let suite = describe(&b, vec![first, second]);
    let arena = b.into_arena();

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    assert_eq!(descriptor.setup_kind, Some(SetupKind::Rendering));
    assert_eq!(
        descriptor.setup_call,
        arena.get_expression_statement(arena.get(first).unwrap()).unwrap().expression
    );
}

#[test]
fn test_nested_suite_statements_are_not_classified() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let inner = describe(&b, vec![it(&b, vec![])]);
    let outer = describe(&b, vec![inner]);
    let arena = b.into_arena();

    let descriptor = SuiteDescriptor::analyze(&arena, outer, &names).unwrap();
    assert!(descriptor.tests.is_empty());
}

#[test]
fn test_update_setup_invocation_clears_arguments() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let options = b.object(vec![b.prop("integration", b.boolean(true))]);
    let setup = setup_call(&b, Some(options));
    let suite = describe(&b, vec![setup]);
    let (mut arena, _root) = b.finish(vec![suite]);

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    descriptor.update_setup_invocation(&mut arena, &names).unwrap();

    let call = arena.get_call_expr_at(descriptor.setup_call).unwrap();
    assert!(call.arguments.is_empty());
    assert_eq!(arena.identifier_text(call.expression), Some("setupRenderingTest"));
    assert!(arena.is_modified(suite));
}

#[test]
fn test_update_setup_invocation_requires_resolved_kind() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let suite = describe(&b, vec![it(&b, vec![])]);
    let mut arena = b.into_arena();

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    assert_eq!(
        descriptor.update_setup_invocation(&mut arena, &names),
        Err(MigrationError::UnresolvedSetup)
    );
}

#[test]
fn test_plain_suite_bodies_are_left_alone() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let render = b.expr_stmt(b.call(b.this_member("render"), vec![]));
    let test = it(&b, vec![render]);
    let suite = describe(&b, vec![setup_call(&b, Some(b.object(vec![]))), test]);
    let (mut arena, root) = b.finish(vec![suite]);

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    let rewrite = descriptor.update_tests(&mut arena, root, &names).unwrap();
    assert!(rewrite.is_empty());
    assert!(!arena.is_modified(render));
}

#[test]
fn test_update_lifecycles_rewrites_hooks() {
    let names = MigrationNames::default();
    let b = AstBuilder::new();
    let render = b.expr_stmt(b.call(b.this_member("render"), vec![]));
    let hook = b.expr_stmt(b.call_named("beforeEach", vec![b.function(&[], vec![render])]));
    let options = b.object(vec![b.prop("integration", b.boolean(true))]);
    let suite = describe(&b, vec![setup_call(&b, Some(options)), hook]);
    let (mut arena, root) = b.finish(vec![suite]);

    let descriptor = SuiteDescriptor::analyze(&arena, suite, &names).unwrap();
    assert!(descriptor.update_tests(&mut arena, root, &names).unwrap().is_empty());

    let rewrite = descriptor.update_lifecycles(&mut arena, root, &names).unwrap();
    assert_eq!(rewrite.awaited_calls, 1);
    assert!(rewrite.helpers.contains("render"));
}
