//! Rendering-test body rewrite.
//!
//! Inside one test or hook call:
//! - `this.render(...);` / `this.clearRender(...);` statements become
//!   `await render(...);` / `await clearRender(...);` and the function that
//!   immediately contains the statement is marked `async`
//! - the helpers used are merged into the `@ember/test-helpers` import
//! - `this._element` becomes `this.element`
//!
//! The walk enters the callback, nested blocks, control flow, arrow
//! functions and the children of `Other` nodes (operators, element access,
//! `try` and so on), but never a nested `function`, whose `this` is not the
//! test context.

use etm_ast::{NodeArena, NodeIndex, SyntaxKind};
use etm_common::MigrationNames;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::{MigrationError, Result};
use crate::factory;
use crate::imports::{ImportRegistry, SpecifierSet};
use crate::matcher::{Field, Shape, field_of, matches};

/// What one or more body rewrites changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyRewrite {
    /// Helper names that were turned into awaited calls
    pub helpers: SpecifierSet,
    pub awaited_calls: usize,
    pub renamed_elements: usize,
}

impl BodyRewrite {
    pub fn absorb(&mut self, other: BodyRewrite) {
        self.helpers.union_with(&other.helpers);
        self.awaited_calls += other.awaited_calls;
        self.renamed_elements += other.renamed_elements;
    }

    pub fn is_empty(&self) -> bool {
        self.awaited_calls == 0 && self.renamed_elements == 0
    }
}

/// Nodes of interest found by the scoped walk, in document order.
#[derive(Default)]
struct ScopedMatches {
    /// `(statement, helper name)`
    helper_statements: Vec<(NodeIndex, String)>,
    element_accesses: Vec<NodeIndex>,
}

pub struct BodyRewriter<'n> {
    names: &'n MigrationNames,
    method_call_shape: Shape,
    element_shape: Shape,
}

impl<'n> BodyRewriter<'n> {
    pub fn new(names: &'n MigrationNames) -> BodyRewriter<'n> {
        BodyRewriter {
            names,
            method_call_shape: Shape::this_method_call_statement(None),
            element_shape: Shape::this_member(&names.legacy_element_property),
        }
    }

    /// Rewrite the test or hook `call` for the rendering convention. `root`
    /// is the source file whose imports receive the helper names.
    pub fn rewrite_for_rendering_test(
        &self,
        arena: &mut NodeArena,
        root: NodeIndex,
        call: NodeIndex,
    ) -> Result<BodyRewrite> {
        if !arena.is_kind(call, SyntaxKind::CallExpression) {
            return Err(MigrationError::InvalidNode {
                index: call.0,
                expected: SyntaxKind::CallExpression,
            });
        }

        let found = self.collect(arena, call);
        let mut rewrite = BodyRewrite::default();

        for (stmt, helper) in found.helper_statements {
            self.await_helper_call(arena, stmt, &helper)?;
            rewrite.helpers.insert(helper);
            rewrite.awaited_calls += 1;
        }

        {
            let mut registry = ImportRegistry::new(arena, root)?;
            registry.ensure_import_with_specifiers(
                &self.names.helpers_module,
                &self.names.legacy_module,
                &rewrite.helpers,
            )?;
        }

        for access in found.element_accesses {
            let property = field_of(arena, access, Field::Property);
            if arena.rename_identifier(property, &self.names.element_property) {
                rewrite.renamed_elements += 1;
            }
        }

        if !rewrite.is_empty() {
            debug!(
                call = call.0,
                awaited = rewrite.awaited_calls,
                renamed = rewrite.renamed_elements,
                helpers = ?rewrite.helpers,
                "rewrote rendering test body"
            );
        }
        Ok(rewrite)
    }

    /// Walk the arguments of `call` in document order, entering the direct
    /// callback functions, blocks, control flow and arrows but no nested
    /// `function`.
    fn collect(&self, arena: &NodeArena, call: NodeIndex) -> ScopedMatches {
        let mut found = ScopedMatches::default();
        let Some(call_data) = arena.get_call_expr_at(call) else {
            return found;
        };

        let mut stack: SmallVec<[NodeIndex; 32]> = SmallVec::new();
        for &argument in call_data.arguments.nodes.iter().rev() {
            if arena
                .kind_of(argument)
                .is_some_and(SyntaxKind::is_function_like)
            {
                // The test callback itself is the scope being rewritten.
                stack.extend(arena.get_children(argument).into_iter().rev());
            } else {
                stack.push(argument);
            }
        }

        while let Some(idx) = stack.pop() {
            match arena.kind_of(idx) {
                Some(SyntaxKind::FunctionExpression | SyntaxKind::FunctionDeclaration) => {
                    trace!(idx = idx.0, "not entering nested function");
                    continue;
                }
                Some(SyntaxKind::ExpressionStatement) => {
                    if let Some(helper) = self.helper_called_by(arena, idx) {
                        found.helper_statements.push((idx, helper.to_string()));
                    }
                }
                Some(SyntaxKind::PropertyAccessExpression) => {
                    if matches(arena, idx, &self.element_shape) {
                        found.element_accesses.push(idx);
                    }
                }
                _ => {}
            }
            stack.extend(arena.get_children(idx).into_iter().rev());
        }

        found
    }

    fn helper_called_by<'a>(&self, arena: &'a NodeArena, stmt: NodeIndex) -> Option<&'a str> {
        if !matches(arena, stmt, &self.method_call_shape) {
            return None;
        }
        let callee = field_of(arena, field_of(arena, stmt, Field::Expression), Field::Callee);
        let method = arena.identifier_text(field_of(arena, callee, Field::Property))?;
        self.names.is_render_helper(method).then_some(method)
    }

    /// `this.helper(args);` -> `await helper(args);`, marking the immediate
    /// enclosing function async.
    fn await_helper_call(&self, arena: &mut NodeArena, stmt: NodeIndex, helper: &str) -> Result<()> {
        let old_call = field_of(arena, stmt, Field::Expression);
        let arguments = arena
            .get_call_expr_at(old_call)
            .map(|call| call.arguments.clone())
            .ok_or(MigrationError::InvalidNode {
                index: old_call.0,
                expected: SyntaxKind::CallExpression,
            })?;

        let new_call = factory::call(arena, helper, arguments);
        let awaited = factory::await_expr(arena, new_call);
        arena.set_statement_expression(stmt, awaited);

        let scope = arena.enclosing_function(stmt);
        arena.set_function_async(scope, true);
        trace!(stmt = stmt.0, scope = scope.0, helper, "awaited helper call");
        Ok(())
    }
}
