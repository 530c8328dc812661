//! Convenience constructor for synthesized trees.
//!
//! `AstBuilder` wraps an arena in a `RefCell` so calls nest naturally:
//!
//! ```
//! use etm_ast::AstBuilder;
//!
//! let b = AstBuilder::new();
//! let stmt = b.expr_stmt(b.call(b.ident("it"), vec![b.string("works"), b.function(&[], vec![])]));
//! let (arena, root) = b.finish(vec![stmt]);
//! assert_eq!(arena.get_source_file_at(root).unwrap().statements.len(), 1);
//! ```
//!
//! Every node it creates is flagged `SYNTHESIZED` and carries an empty span.

use std::cell::RefCell;

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind::SyntaxKind;

pub struct AstBuilder {
    arena: RefCell<NodeArena>,
    file_name: String,
}

impl AstBuilder {
    pub fn new() -> AstBuilder {
        AstBuilder::for_file("test.js")
    }

    pub fn for_file(file_name: impl Into<String>) -> AstBuilder {
        AstBuilder {
            arena: RefCell::new(NodeArena::new()),
            file_name: file_name.into(),
        }
    }

    /// Start from an existing arena, e.g. to append synthesized nodes to a
    /// parsed file.
    pub fn from_arena(arena: NodeArena) -> AstBuilder {
        AstBuilder {
            arena: RefCell::new(arena),
            file_name: String::new(),
        }
    }

    fn synthesized(&self, build: impl FnOnce(&mut NodeArena) -> NodeIndex) -> NodeIndex {
        let mut arena = self.arena.borrow_mut();
        let index = build(&mut arena);
        arena.add_flags(index, node_flags::SYNTHESIZED);
        index
    }

    /// Wrap `statements` in a source file and hand back the arena.
    pub fn finish(self, statements: Vec<NodeIndex>) -> (NodeArena, NodeIndex) {
        let file_name = self.file_name.clone();
        let root = self.synthesized(|arena| {
            arena.add_source_file(
                0,
                0,
                SourceFileData {
                    file_name,
                    statements: NodeList::new(statements),
                },
            )
        });
        (self.arena.into_inner(), root)
    }

    /// Hand back the arena without creating a source file.
    pub fn into_arena(self) -> NodeArena {
        self.arena.into_inner()
    }

    // =========================================================================
    // Names and literals
    // =========================================================================

    pub fn ident(&self, name: &str) -> NodeIndex {
        self.synthesized(|arena| {
            arena.add_identifier(
                0,
                0,
                IdentifierData {
                    escaped_text: name.to_string(),
                },
            )
        })
    }

    fn literal(&self, kind: SyntaxKind, text: &str) -> NodeIndex {
        self.synthesized(|arena| {
            arena.add_literal(
                kind,
                0,
                0,
                LiteralData {
                    text: text.to_string(),
                    raw_text: None,
                },
            )
        })
    }

    pub fn string(&self, value: &str) -> NodeIndex {
        self.literal(SyntaxKind::StringLiteral, value)
    }

    pub fn number(&self, text: &str) -> NodeIndex {
        self.literal(SyntaxKind::NumericLiteral, text)
    }

    /// A template literal without substitutions; `text` is emitted as-is.
    pub fn template(&self, text: &str) -> NodeIndex {
        self.literal(SyntaxKind::NoSubstitutionTemplateLiteral, text)
    }

    /// `tag\`text\``
    pub fn tagged_template(&self, tag: &str, text: &str) -> NodeIndex {
        let tag = self.ident(tag);
        let template = self.template(text);
        self.synthesized(|arena| arena.add_tagged_template(0, 0, TaggedTemplateData { tag, template }))
    }

    pub fn this(&self) -> NodeIndex {
        self.synthesized(|arena| arena.add_token(SyntaxKind::ThisKeyword, 0, 0))
    }

    pub fn boolean(&self, value: bool) -> NodeIndex {
        let kind = if value {
            SyntaxKind::TrueKeyword
        } else {
            SyntaxKind::FalseKeyword
        };
        self.synthesized(|arena| arena.add_token(kind, 0, 0))
    }

    pub fn null(&self) -> NodeIndex {
        self.synthesized(|arena| arena.add_token(SyntaxKind::NullKeyword, 0, 0))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// `object.name`
    pub fn member(&self, object: NodeIndex, name: &str) -> NodeIndex {
        let name = self.ident(name);
        self.synthesized(|arena| {
            arena.add_access_expr(
                0,
                0,
                AccessExprData {
                    expression: object,
                    name_or_argument: name,
                    question_dot_token: false,
                },
            )
        })
    }

    /// `this.name`
    pub fn this_member(&self, name: &str) -> NodeIndex {
        let this = self.this();
        self.member(this, name)
    }

    pub fn call(&self, callee: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.synthesized(|arena| {
            arena.add_call_expr(
                0,
                0,
                CallExprData {
                    expression: callee,
                    arguments: NodeList::new(arguments),
                },
            )
        })
    }

    /// `name(arguments)`
    pub fn call_named(&self, name: &str, arguments: Vec<NodeIndex>) -> NodeIndex {
        let callee = self.ident(name);
        self.call(callee, arguments)
    }

    pub fn await_expr(&self, expression: NodeIndex) -> NodeIndex {
        self.synthesized(|arena| arena.add_await_expr(0, 0, UnaryExprDataEx { expression }))
    }

    fn parameters(&self, params: &[&str]) -> NodeList {
        let nodes = params
            .iter()
            .map(|name| {
                let name = self.ident(name);
                self.synthesized(|arena| {
                    arena.add_parameter(
                        0,
                        0,
                        ParameterData {
                            dot_dot_dot_token: false,
                            name,
                            initializer: NodeIndex::NONE,
                        },
                    )
                })
            })
            .collect();
        NodeList::new(nodes)
    }

    fn function_like(
        &self,
        kind: SyntaxKind,
        name: Option<&str>,
        is_async: bool,
        params: &[&str],
        body: NodeIndex,
    ) -> NodeIndex {
        let name = name.map_or(NodeIndex::NONE, |n| self.ident(n));
        let parameters = self.parameters(params);
        self.synthesized(|arena| {
            arena.add_function(
                kind,
                0,
                0,
                FunctionData {
                    is_async,
                    asterisk_token: false,
                    name,
                    parameters,
                    body,
                },
            )
        })
    }

    /// `function(params) { body }`
    pub fn function(&self, params: &[&str], body: Vec<NodeIndex>) -> NodeIndex {
        let body = self.block(body);
        self.function_like(SyntaxKind::FunctionExpression, None, false, params, body)
    }

    /// `async function(params) { body }`
    pub fn async_function(&self, params: &[&str], body: Vec<NodeIndex>) -> NodeIndex {
        let body = self.block(body);
        self.function_like(SyntaxKind::FunctionExpression, None, true, params, body)
    }

    /// `function name(params) { body }` as a statement
    pub fn function_declaration(
        &self,
        name: &str,
        params: &[&str],
        body: Vec<NodeIndex>,
    ) -> NodeIndex {
        let body = self.block(body);
        self.function_like(SyntaxKind::FunctionDeclaration, Some(name), false, params, body)
    }

    /// `(params) => { body }`
    pub fn arrow(&self, params: &[&str], body: Vec<NodeIndex>) -> NodeIndex {
        let body = self.block(body);
        self.function_like(SyntaxKind::ArrowFunction, None, false, params, body)
    }

    /// `(params) => expression`
    pub fn arrow_expr(&self, params: &[&str], expression: NodeIndex) -> NodeIndex {
        self.function_like(SyntaxKind::ArrowFunction, None, false, params, expression)
    }

    pub fn object(&self, properties: Vec<NodeIndex>) -> NodeIndex {
        self.synthesized(|arena| {
            arena.add_literal_expr(
                SyntaxKind::ObjectLiteralExpression,
                0,
                0,
                LiteralExprData {
                    elements: NodeList::new(properties),
                    multi_line: false,
                },
            )
        })
    }

    pub fn array(&self, elements: Vec<NodeIndex>) -> NodeIndex {
        self.synthesized(|arena| {
            arena.add_literal_expr(
                SyntaxKind::ArrayLiteralExpression,
                0,
                0,
                LiteralExprData {
                    elements: NodeList::new(elements),
                    multi_line: false,
                },
            )
        })
    }

    /// `key: value` with an identifier key
    pub fn prop(&self, key: &str, value: NodeIndex) -> NodeIndex {
        let name = self.ident(key);
        self.property(name, value)
    }

    /// `'key': value` with a string literal key
    pub fn string_prop(&self, key: &str, value: NodeIndex) -> NodeIndex {
        let name = self.string(key);
        self.property(name, value)
    }

    fn property(&self, name: NodeIndex, initializer: NodeIndex) -> NodeIndex {
        self.synthesized(|arena| {
            arena.add_property_assignment(
                SyntaxKind::PropertyAssignment,
                0,
                0,
                PropertyAssignmentData { name, initializer },
            )
        })
    }

    /// `{ name }`
    pub fn shorthand(&self, name: &str) -> NodeIndex {
        let name = self.ident(name);
        self.synthesized(|arena| {
            arena.add_property_assignment(
                SyntaxKind::ShorthandPropertyAssignment,
                0,
                0,
                PropertyAssignmentData {
                    name,
                    initializer: NodeIndex::NONE,
                },
            )
        })
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn expr_stmt(&self, expression: NodeIndex) -> NodeIndex {
        self.synthesized(|arena| arena.add_expr_statement(0, 0, ExprStatementData { expression }))
    }

    pub fn block(&self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.synthesized(|arena| {
            arena.add_block(
                0,
                0,
                BlockData {
                    statements: NodeList::new(statements),
                },
            )
        })
    }

    fn variable(&self, flags: u16, name: &str, initializer: Option<NodeIndex>) -> NodeIndex {
        let name = self.ident(name);
        let declaration = self.synthesized(|arena| {
            arena.add_variable_declaration(
                0,
                0,
                VariableDeclarationData {
                    name,
                    initializer: initializer.unwrap_or(NodeIndex::NONE),
                },
            )
        });
        self.synthesized(|arena| {
            arena.add_variable(
                0,
                0,
                flags,
                VariableData {
                    declarations: NodeList::new(vec![declaration]),
                },
            )
        })
    }

    /// `const name = initializer;`
    pub fn const_decl(&self, name: &str, initializer: NodeIndex) -> NodeIndex {
        self.variable(node_flags::CONST, name, Some(initializer))
    }

    /// `let name;` / `let name = initializer;`
    pub fn let_decl(&self, name: &str, initializer: Option<NodeIndex>) -> NodeIndex {
        self.variable(node_flags::LET, name, initializer)
    }

    pub fn return_stmt(&self, expression: Option<NodeIndex>) -> NodeIndex {
        let expression = expression.unwrap_or(NodeIndex::NONE);
        self.synthesized(|arena| arena.add_return(0, 0, ReturnData { expression }))
    }

    pub fn if_stmt(
        &self,
        condition: NodeIndex,
        then_statements: Vec<NodeIndex>,
        else_statements: Option<Vec<NodeIndex>>,
    ) -> NodeIndex {
        let then_statement = self.block(then_statements);
        let else_statement = else_statements.map_or(NodeIndex::NONE, |s| self.block(s));
        self.synthesized(|arena| {
            arena.add_if_statement(
                0,
                0,
                IfStatementData {
                    expression: condition,
                    then_statement,
                    else_statement,
                },
            )
        })
    }

    /// A construct without a dedicated kind, written as `fragments`
    /// interleaved with `children`:
    /// `b.other(&["", "[0]"], vec![list])` is `list[0]`.
    pub fn other(&self, fragments: &[&str], children: Vec<NodeIndex>) -> NodeIndex {
        let fragments = fragments.iter().map(|f| f.to_string()).collect();
        self.synthesized(|arena| {
            arena.add_other(
                0,
                0,
                OtherData {
                    children: NodeList::new(children),
                    fragments,
                },
            )
        })
    }

    // =========================================================================
    // Imports
    // =========================================================================

    fn specifier(&self, kind: SyntaxKind, property_name: Option<&str>, name: &str) -> NodeIndex {
        let property_name = property_name.map_or(NodeIndex::NONE, |n| self.ident(n));
        let name = self.ident(name);
        self.synthesized(|arena| {
            arena.add_specifier(kind, 0, 0, SpecifierData { property_name, name })
        })
    }

    /// `import { a, b } from 'source';`
    pub fn import(&self, names: &[&str], source: &str) -> NodeIndex {
        let specifiers = names
            .iter()
            .map(|name| self.specifier(SyntaxKind::ImportSpecifier, None, name))
            .collect();
        self.import_decl(specifiers, source)
    }

    /// `import { imported as local } from 'source';`
    pub fn import_aliased(&self, imported: &str, local: &str, source: &str) -> NodeIndex {
        let specifier = self.specifier(SyntaxKind::ImportSpecifier, Some(imported), local);
        self.import_decl(vec![specifier], source)
    }

    /// `import name from 'source';`
    pub fn import_default(&self, name: &str, source: &str) -> NodeIndex {
        let specifier = self.specifier(SyntaxKind::ImportDefaultSpecifier, None, name);
        self.import_decl(vec![specifier], source)
    }

    /// `import * as name from 'source';`
    pub fn import_namespace(&self, name: &str, source: &str) -> NodeIndex {
        let specifier = self.specifier(SyntaxKind::NamespaceImport, None, name);
        self.import_decl(vec![specifier], source)
    }

    pub fn import_decl(&self, specifiers: Vec<NodeIndex>, source: &str) -> NodeIndex {
        let module_specifier = self.string(source);
        self.synthesized(|arena| {
            arena.add_import_decl(
                0,
                0,
                ImportDeclData {
                    specifiers: NodeList::new(specifiers),
                    module_specifier,
                },
            )
        })
    }
}

impl Default for AstBuilder {
    fn default() -> Self {
        AstBuilder::new()
    }
}
