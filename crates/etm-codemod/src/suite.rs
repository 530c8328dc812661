//! Suite block analysis.
//!
//! A suite block is a `describe(name, function() { ... })` statement. Its
//! callback's direct statements are classified into the setup invocation,
//! test cases, lifecycle hooks and everything else, producing a
//! `SuiteDescriptor` that the driver then uses to rewrite the block.

use etm_ast::{NodeArena, NodeIndex, NodeList, SyntaxKind};
use etm_common::MigrationNames;
use tracing::{debug, trace, warn};

use crate::body_rewriter::{BodyRewrite, BodyRewriter};
use crate::error::{MigrationError, Result};
use crate::matcher::{Field, Shape, field_of, matches};

/// Convention a legacy suite migrates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupKind {
    /// `setupTest()`
    Plain,
    /// `setupRenderingTest()`, selected by an `integration` option
    Rendering,
}

impl SetupKind {
    pub fn setup_name(self, names: &MigrationNames) -> &str {
        match self {
            SetupKind::Plain => &names.plain_setup,
            SetupKind::Rendering => &names.rendering_setup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Before,
    BeforeEach,
    AfterEach,
    After,
}

impl HookKind {
    const ALL: [HookKind; 4] = [
        HookKind::Before,
        HookKind::BeforeEach,
        HookKind::AfterEach,
        HookKind::After,
    ];
}

/// Classification of one direct statement of a suite callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteStatement {
    SetupCall { call: NodeIndex },
    TestCase { call: NodeIndex },
    LifecycleHook { call: NodeIndex, kind: HookKind },
    Other,
}

/// Classify `stmt`. Checks run in fixed priority: setup macro, test case,
/// lifecycle hook.
pub fn classify_statement(arena: &NodeArena, stmt: NodeIndex, names: &MigrationNames) -> SuiteStatement {
    let call = field_of(arena, stmt, Field::Expression);

    if matches(arena, stmt, &Shape::call_statement(&names.setup_macro)) {
        return SuiteStatement::SetupCall { call };
    }
    if matches(arena, stmt, &Shape::call_statement(&names.test_keyword)) {
        return SuiteStatement::TestCase { call };
    }
    for (kind, hook) in HookKind::ALL.into_iter().zip(names.lifecycle_hooks()) {
        if matches(arena, stmt, &Shape::call_statement(hook)) {
            return SuiteStatement::LifecycleHook { call, kind };
        }
    }
    SuiteStatement::Other
}

/// Structured view of one suite block. Handles point into the arena, so the
/// descriptor observes every mutation made through them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteDescriptor {
    /// The `describe(...)` expression statement
    pub statement: NodeIndex,
    /// The suite callback function
    pub callback: NodeIndex,
    /// The block invokes the legacy setup macro
    pub is_legacy_setup: bool,
    pub setup_kind: Option<SetupKind>,
    /// Call expression of the (first) setup macro invocation
    pub setup_call: NodeIndex,
    /// Call expressions of the test cases, in order
    pub tests: Vec<NodeIndex>,
    /// Call expressions of the lifecycle hooks, in order
    pub hooks: Vec<(HookKind, NodeIndex)>,
}

impl SuiteDescriptor {
    /// Analyze the suite block `statement`.
    ///
    /// The callback is the second argument of the suite call and must be a
    /// function with a block body. A setup macro call must carry an object
    /// literal as its second argument.
    pub fn analyze(arena: &NodeArena, statement: NodeIndex, names: &MigrationNames) -> Result<SuiteDescriptor> {
        let call = field_of(arena, statement, Field::Expression);
        let Some(call_data) = arena.get_call_expr_at(call) else {
            return Err(MigrationError::InvalidNode {
                index: statement.0,
                expected: SyntaxKind::CallExpression,
            });
        };

        let callback = call_data.arguments.at(1);
        let body = arena
            .get_function_at(callback)
            .map(|func| func.body)
            .filter(|&body| arena.is_kind(body, SyntaxKind::Block))
            .ok_or(MigrationError::MissingExpectedField {
                construct: "suite block",
                field: "callback function",
            })?;

        let mut descriptor = SuiteDescriptor {
            statement,
            callback,
            is_legacy_setup: false,
            setup_kind: None,
            setup_call: NodeIndex::NONE,
            tests: Vec::new(),
            hooks: Vec::new(),
        };

        let statements = arena
            .statements_of(body)
            .map_or(&[][..], |list| list.nodes.as_slice());
        for &stmt in statements {
            match classify_statement(arena, stmt, names) {
                SuiteStatement::SetupCall { call } => {
                    if descriptor.is_legacy_setup {
                        warn!(
                            suite = statement.0,
                            call = call.0,
                            "ignoring additional setup macro call in suite block"
                        );
                        continue;
                    }
                    let kind = if has_integration_flag(arena, call, names)? {
                        SetupKind::Rendering
                    } else {
                        SetupKind::Plain
                    };
                    descriptor.is_legacy_setup = true;
                    descriptor.setup_kind = Some(kind);
                    descriptor.setup_call = call;
                }
                SuiteStatement::TestCase { call } => descriptor.tests.push(call),
                SuiteStatement::LifecycleHook { call, kind } => descriptor.hooks.push((kind, call)),
                SuiteStatement::Other => {}
            }
        }

        trace!(
            suite = statement.0,
            legacy = descriptor.is_legacy_setup,
            setup = ?descriptor.setup_kind,
            tests = descriptor.tests.len(),
            hooks = descriptor.hooks.len(),
            "analyzed suite block"
        );
        Ok(descriptor)
    }

    /// Identifier the setup invocation becomes, once resolved.
    pub fn setup_name<'n>(&self, names: &'n MigrationNames) -> Option<&'n str> {
        self.setup_kind.map(|kind| kind.setup_name(names))
    }

    /// Replace `setupComponentTest(name, options)` with `setupTest()` or
    /// `setupRenderingTest()`.
    pub fn update_setup_invocation(&self, arena: &mut NodeArena, names: &MigrationNames) -> Result<()> {
        let Some(setup_name) = self.setup_name(names) else {
            return Err(MigrationError::UnresolvedSetup);
        };
        let callee = arena
            .get_call_expr_at(self.setup_call)
            .map(|call| call.expression)
            .ok_or(MigrationError::InvalidNode {
                index: self.setup_call.0,
                expected: SyntaxKind::CallExpression,
            })?;

        arena.set_call_arguments(self.setup_call, NodeList::empty());
        if !arena.rename_identifier(callee, setup_name) {
            return Err(MigrationError::InvalidNode {
                index: callee.0,
                expected: SyntaxKind::Identifier,
            });
        }
        debug!(suite = self.statement.0, setup = setup_name, "updated setup invocation");
        Ok(())
    }

    /// Rewrite every test case. Only rendering suites change.
    pub fn update_tests(&self, arena: &mut NodeArena, root: NodeIndex, names: &MigrationNames) -> Result<BodyRewrite> {
        self.rewrite_calls(arena, root, names, self.tests.iter().copied())
    }

    /// Rewrite every lifecycle hook. Only rendering suites change.
    pub fn update_lifecycles(
        &self,
        arena: &mut NodeArena,
        root: NodeIndex,
        names: &MigrationNames,
    ) -> Result<BodyRewrite> {
        self.rewrite_calls(arena, root, names, self.hooks.iter().map(|&(_, call)| call))
    }

    fn rewrite_calls(
        &self,
        arena: &mut NodeArena,
        root: NodeIndex,
        names: &MigrationNames,
        calls: impl Iterator<Item = NodeIndex>,
    ) -> Result<BodyRewrite> {
        let mut total = BodyRewrite::default();
        if self.setup_kind != Some(SetupKind::Rendering) {
            return Ok(total);
        }
        let rewriter = BodyRewriter::new(names);
        for call in calls {
            let rewrite = rewriter.rewrite_for_rendering_test(arena, root, call)?;
            total.absorb(rewrite);
        }
        Ok(total)
    }
}

/// Does the options object of a setup call carry the integration flag?
/// Only identifier-keyed properties count; the value is irrelevant.
fn has_integration_flag(arena: &NodeArena, call: NodeIndex, names: &MigrationNames) -> Result<bool> {
    let options = arena
        .get_call_expr_at(call)
        .map(|data| data.arguments.at(1))
        .filter(|options| options.is_some())
        .ok_or(MigrationError::MissingExpectedField {
            construct: "setup macro call",
            field: "options argument",
        })?;

    let Some(object) = arena
        .get(options)
        .filter(|node| node.kind == SyntaxKind::ObjectLiteralExpression as u16)
        .and_then(|node| arena.get_literal_expr(node))
    else {
        return Err(MigrationError::InvalidNode {
            index: options.0,
            expected: SyntaxKind::ObjectLiteralExpression,
        });
    };

    let key = Shape::identifier(&names.integration_flag);
    Ok(object
        .elements
        .nodes
        .iter()
        .any(|&prop| matches(arena, field_of(arena, prop, Field::Key), &key)))
}

/// Setup identifier a legacy-setup suite resolves to. Suites that never
/// invoke the setup macro contribute nothing.
pub fn resolve_setup_name(suite: &SuiteDescriptor, names: &MigrationNames) -> Option<String> {
    if !suite.is_legacy_setup {
        return None;
    }
    suite.setup_name(names).map(str::to_string)
}
