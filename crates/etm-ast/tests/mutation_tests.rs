//! Tests for in-place mutation primitives.

use crate::*;

fn spanned_identifier(arena: &mut NodeArena, text: &str, pos: u32) -> NodeIndex {
    arena.add_identifier(
        pos,
        pos + text.len() as u32,
        node::IdentifierData {
            escaped_text: text.to_string(),
        },
    )
}

#[test]
fn rename_marks_node_and_ancestors_modified() {
    let b = AstBuilder::new();
    let access = b.this_member("_element");
    let stmt = b.expr_stmt(access);
    let (mut arena, root) = b.finish(vec![stmt]);
    let name = arena.get_access_expr(arena.get(access).unwrap()).unwrap().name_or_argument;

    assert!(!arena.is_modified(root));
    assert!(arena.rename_identifier(name, "element"));

    assert_eq!(arena.identifier_text(name), Some("element"));
    for index in [name, access, stmt, root] {
        assert!(arena.is_modified(index), "node {index:?} should be marked");
    }
}

#[test]
fn rename_to_same_text_is_not_a_modification() {
    let mut arena = NodeArena::new();
    let ident = spanned_identifier(&mut arena, "it", 0);

    assert!(arena.rename_identifier(ident, "it"));
    assert!(!arena.is_modified(ident));
}

#[test]
fn rename_rejects_non_identifiers() {
    let b = AstBuilder::new();
    let literal = b.string("ember-mocha");
    let mut arena = b.into_arena();

    assert!(!arena.rename_identifier(literal, "x"));
    assert!(!arena.rename_identifier(NodeIndex::NONE, "x"));
}

#[test]
fn set_call_arguments_reparents_new_arguments() {
    let b = AstBuilder::new();
    let call = b.call_named("setupComponentTest", vec![b.string("x-foo")]);
    let replacement = b.number("1");
    let mut arena = b.into_arena();

    assert!(arena.set_call_arguments(call, NodeList::new(vec![replacement])));
    assert_eq!(arena.get_call_expr_at(call).unwrap().arguments.nodes, vec![replacement]);
    assert_eq!(arena.parent_of(replacement), call);

    assert!(arena.set_call_arguments(call, NodeList::empty()));
    assert!(arena.get_call_expr_at(call).unwrap().arguments.is_empty());
}

#[test]
fn set_function_async_only_touches_functions() {
    let b = AstBuilder::new();
    let function = b.function(&[], vec![]);
    let ident = b.ident("render");
    let mut arena = b.into_arena();

    assert!(arena.set_function_async(function, true));
    assert!(arena.get_function_at(function).unwrap().is_async);
    assert!(arena.is_modified(function));
    assert!(!arena.set_function_async(ident, true));
}

#[test]
fn insert_and_remove_statements() {
    let b = AstBuilder::new();
    let first = b.import(&["a"], "a");
    let last = b.expr_stmt(b.this());
    let inserted = b.import(&["b"], "b");
    let (mut arena, root) = b.finish(vec![first, last]);

    assert!(arena.insert_statement(root, 1, inserted));
    assert_eq!(arena.statements_of(root).unwrap().nodes, vec![first, inserted, last]);
    assert_eq!(arena.parent_of(inserted), root);

    assert!(arena.remove_statement(root, first));
    assert_eq!(arena.statements_of(root).unwrap().nodes, vec![inserted, last]);
    assert!(arena.parent_of(first).is_none());
    assert!(!arena.remove_statement(root, first), "already detached");
}

#[test]
fn insert_past_end_appends() {
    let b = AstBuilder::new();
    let existing = b.expr_stmt(b.this());
    let appended = b.expr_stmt(b.this());
    let (mut arena, root) = b.finish(vec![existing]);

    assert!(arena.insert_statement(root, 99, appended));
    assert_eq!(arena.statements_of(root).unwrap().nodes, vec![existing, appended]);
}

#[test]
fn insert_refuses_non_statements() {
    let b = AstBuilder::new();
    let existing = b.expr_stmt(b.this());
    let bare_call = b.call_named("render", vec![]);
    let try_block = b.other(&["try ", " catch (e) {}"], vec![b.block(vec![])]);
    let (mut arena, root) = b.finish(vec![existing]);

    assert!(!arena.insert_statement(root, 0, bare_call));
    assert!(!arena.insert_statement(root, 0, NodeIndex::NONE));
    assert!(!arena.is_modified(root));

    assert!(arena.insert_statement(root, 1, try_block));
    assert_eq!(arena.statements_of(root).unwrap().nodes, vec![existing, try_block]);
}

#[test]
fn set_statement_expression_swaps_expression() {
    let b = AstBuilder::new();
    let call = b.call(b.this_member("render"), vec![]);
    let stmt = b.expr_stmt(call);
    let awaited = b.await_expr(b.call_named("render", vec![]));
    let mut arena = b.into_arena();

    assert!(arena.set_statement_expression(stmt, awaited));
    let data = arena
        .get_expression_statement(arena.get(stmt).unwrap())
        .unwrap();
    assert_eq!(data.expression, awaited);
    assert_eq!(arena.parent_of(awaited), stmt);
}
