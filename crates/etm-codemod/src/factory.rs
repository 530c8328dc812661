//! Allocation of the few replacement nodes the rewrite needs.
//!
//! Nodes are flagged `SYNTHESIZED` so printers regenerate them instead of
//! looking for source text.

use etm_ast::node::{
    CallExprData, IdentifierData, ImportDeclData, LiteralData, SpecifierData, UnaryExprDataEx,
};
use etm_ast::{NodeArena, NodeIndex, NodeList, SyntaxKind, node_flags};

fn synthesized(arena: &mut NodeArena, index: NodeIndex) -> NodeIndex {
    arena.add_flags(index, node_flags::SYNTHESIZED);
    index
}

pub(crate) fn identifier(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let index = arena.add_identifier(
        0,
        0,
        IdentifierData {
            escaped_text: name.to_string(),
        },
    );
    synthesized(arena, index)
}

pub(crate) fn string_literal(arena: &mut NodeArena, value: &str) -> NodeIndex {
    let index = arena.add_literal(
        SyntaxKind::StringLiteral,
        0,
        0,
        LiteralData {
            text: value.to_string(),
            raw_text: None,
        },
    );
    synthesized(arena, index)
}

/// `name(arguments)`, reusing an existing argument list.
pub(crate) fn call(arena: &mut NodeArena, name: &str, arguments: NodeList) -> NodeIndex {
    let expression = identifier(arena, name);
    let index = arena.add_call_expr(
        0,
        0,
        CallExprData {
            expression,
            arguments,
        },
    );
    synthesized(arena, index)
}

pub(crate) fn await_expr(arena: &mut NodeArena, expression: NodeIndex) -> NodeIndex {
    let index = arena.add_await_expr(0, 0, UnaryExprDataEx { expression });
    synthesized(arena, index)
}

/// Un-aliased `{ name }` import specifier.
pub(crate) fn import_specifier(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let name = identifier(arena, name);
    let index = arena.add_specifier(
        SyntaxKind::ImportSpecifier,
        0,
        0,
        SpecifierData {
            property_name: NodeIndex::NONE,
            name,
        },
    );
    synthesized(arena, index)
}

/// `import 'module';` with no bindings yet.
pub(crate) fn empty_import(arena: &mut NodeArena, module: &str) -> NodeIndex {
    let module_specifier = string_literal(arena, module);
    let index = arena.add_import_decl(
        0,
        0,
        ImportDeclData {
            specifiers: NodeList::empty(),
            module_specifier,
        },
    );
    synthesized(arena, index)
}
