//! NodeArena access methods and the NodeView wrapper.
//!
//! Every typed accessor checks the node kind before indexing its pool, so a
//! handle of the wrong kind yields `None` instead of another node's data.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind::SyntaxKind;

macro_rules! pool_accessor {
    ($(#[$doc:meta])* $name:ident, $pool:ident, $data:ty, [$($kind:ident),+]) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&self, node: &Node) -> Option<&$data> {
            if node.has_data() && ($(node.kind == SyntaxKind::$kind as u16)||+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Parent of a node, or NONE for the root and detached nodes.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// Kind of the node at `index`, if it exists and is a known kind.
    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).and_then(|node| SyntaxKind::from_u16(node.kind))
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: SyntaxKind) -> bool {
        self.get(index).is_some_and(|node| node.kind == kind as u16)
    }

    pool_accessor!(get_identifier, identifiers, IdentifierData, [Identifier]);
    pool_accessor!(
        /// String, numeric and no-substitution template literals
        get_literal,
        literals,
        LiteralData,
        [StringLiteral, NumericLiteral, NoSubstitutionTemplateLiteral]
    );
    pool_accessor!(get_call_expr, call_exprs, CallExprData, [CallExpression]);
    pool_accessor!(
        get_access_expr,
        access_exprs,
        AccessExprData,
        [PropertyAccessExpression]
    );
    pool_accessor!(get_await_expr, unary_exprs_ex, UnaryExprDataEx, [AwaitExpression]);
    pool_accessor!(
        get_tagged_template,
        tagged_templates,
        TaggedTemplateData,
        [TaggedTemplateExpression]
    );
    pool_accessor!(
        /// Function declarations, function expressions and arrow functions
        get_function,
        functions,
        FunctionData,
        [FunctionExpression, FunctionDeclaration, ArrowFunction]
    );
    pool_accessor!(get_parameter, parameters, ParameterData, [Parameter]);
    pool_accessor!(
        /// Object and array literals
        get_literal_expr,
        literal_exprs,
        LiteralExprData,
        [ObjectLiteralExpression, ArrayLiteralExpression]
    );
    pool_accessor!(
        get_property_assignment,
        property_assignments,
        PropertyAssignmentData,
        [PropertyAssignment, ShorthandPropertyAssignment]
    );
    pool_accessor!(get_block, blocks, BlockData, [Block]);
    pool_accessor!(
        get_expression_statement,
        expr_statements,
        ExprStatementData,
        [ExpressionStatement]
    );
    pool_accessor!(get_variable, variables, VariableData, [VariableStatement]);
    pool_accessor!(
        get_variable_declaration,
        variable_declarations,
        VariableDeclarationData,
        [VariableDeclaration]
    );
    pool_accessor!(get_return_statement, return_data, ReturnData, [ReturnStatement]);
    pool_accessor!(get_if_statement, if_statements, IfStatementData, [IfStatement]);
    pool_accessor!(get_other, others, OtherData, [Other]);
    pool_accessor!(get_import_decl, import_decls, ImportDeclData, [ImportDeclaration]);
    pool_accessor!(
        /// Import specifiers, default import bindings and namespace imports
        get_specifier,
        specifiers,
        SpecifierData,
        [ImportSpecifier, ImportDefaultSpecifier, NamespaceImport]
    );
    pool_accessor!(get_source_file, source_files, SourceFileData, [SourceFile]);

    // Index-based shortcuts for the accessors used most by the engine

    #[inline]
    pub fn get_call_expr_at(&self, index: NodeIndex) -> Option<&CallExprData> {
        self.get(index).and_then(|node| self.get_call_expr(node))
    }

    #[inline]
    pub fn get_function_at(&self, index: NodeIndex) -> Option<&FunctionData> {
        self.get(index).and_then(|node| self.get_function(node))
    }

    #[inline]
    pub fn get_import_decl_at(&self, index: NodeIndex) -> Option<&ImportDeclData> {
        self.get(index).and_then(|node| self.get_import_decl(node))
    }

    #[inline]
    pub fn get_source_file_at(&self, index: NodeIndex) -> Option<&SourceFileData> {
        self.get(index).and_then(|node| self.get_source_file(node))
    }

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node)
            .map(|data| data.escaped_text.as_str())
    }

    /// Cooked text of a literal node.
    pub fn literal_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_literal(node).map(|data| data.text.as_str())
    }

    /// Statement list of a source file or block.
    pub fn statements_of(&self, index: NodeIndex) -> Option<&NodeList> {
        let node = self.get(index)?;
        if let Some(file) = self.get_source_file(node) {
            return Some(&file.statements);
        }
        self.get_block(node).map(|block| &block.statements)
    }

    /// Nearest enclosing function-like node, excluding `index` itself.
    pub fn enclosing_function(&self, index: NodeIndex) -> NodeIndex {
        let mut current = self.parent_of(index);
        while current.is_some() {
            if self
                .kind_of(current)
                .is_some_and(SyntaxKind::is_function_like)
            {
                return current;
            }
            current = self.parent_of(current);
        }
        NodeIndex::NONE
    }

    /// Children of a node in source order (for traversal).
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(index) else {
            return Vec::new();
        };
        let Some(kind) = SyntaxKind::from_u16(node.kind) else {
            return Vec::new();
        };

        let mut children = Vec::new();
        let mut push = |idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };

        match kind {
            SyntaxKind::CallExpression => {
                if let Some(data) = self.get_call_expr(node) {
                    push(data.expression);
                    data.arguments.nodes.iter().for_each(|&a| push(a));
                }
            }
            SyntaxKind::PropertyAccessExpression => {
                if let Some(data) = self.get_access_expr(node) {
                    push(data.expression);
                    push(data.name_or_argument);
                }
            }
            SyntaxKind::AwaitExpression => {
                if let Some(data) = self.get_await_expr(node) {
                    push(data.expression);
                }
            }
            SyntaxKind::TaggedTemplateExpression => {
                if let Some(data) = self.get_tagged_template(node) {
                    push(data.tag);
                    push(data.template);
                }
            }
            SyntaxKind::FunctionExpression
            | SyntaxKind::FunctionDeclaration
            | SyntaxKind::ArrowFunction => {
                if let Some(data) = self.get_function(node) {
                    push(data.name);
                    data.parameters.nodes.iter().for_each(|&p| push(p));
                    push(data.body);
                }
            }
            SyntaxKind::Parameter => {
                if let Some(data) = self.get_parameter(node) {
                    push(data.name);
                    push(data.initializer);
                }
            }
            SyntaxKind::ObjectLiteralExpression | SyntaxKind::ArrayLiteralExpression => {
                if let Some(data) = self.get_literal_expr(node) {
                    data.elements.nodes.iter().for_each(|&e| push(e));
                }
            }
            SyntaxKind::PropertyAssignment | SyntaxKind::ShorthandPropertyAssignment => {
                if let Some(data) = self.get_property_assignment(node) {
                    push(data.name);
                    push(data.initializer);
                }
            }
            SyntaxKind::Block => {
                if let Some(data) = self.get_block(node) {
                    data.statements.nodes.iter().for_each(|&s| push(s));
                }
            }
            SyntaxKind::ExpressionStatement => {
                if let Some(data) = self.get_expression_statement(node) {
                    push(data.expression);
                }
            }
            SyntaxKind::Other => {
                if let Some(data) = self.get_other(node) {
                    data.children.nodes.iter().for_each(|&c| push(c));
                }
            }
            SyntaxKind::VariableStatement => {
                if let Some(data) = self.get_variable(node) {
                    data.declarations.nodes.iter().for_each(|&d| push(d));
                }
            }
            SyntaxKind::VariableDeclaration => {
                if let Some(data) = self.get_variable_declaration(node) {
                    push(data.name);
                    push(data.initializer);
                }
            }
            SyntaxKind::ReturnStatement => {
                if let Some(data) = self.get_return_statement(node) {
                    push(data.expression);
                }
            }
            SyntaxKind::IfStatement => {
                if let Some(data) = self.get_if_statement(node) {
                    push(data.expression);
                    push(data.then_statement);
                    push(data.else_statement);
                }
            }
            SyntaxKind::ImportDeclaration => {
                if let Some(data) = self.get_import_decl(node) {
                    data.specifiers.nodes.iter().for_each(|&s| push(s));
                    push(data.module_specifier);
                }
            }
            SyntaxKind::ImportSpecifier
            | SyntaxKind::ImportDefaultSpecifier
            | SyntaxKind::NamespaceImport => {
                if let Some(data) = self.get_specifier(node) {
                    push(data.property_name);
                    push(data.name);
                }
            }
            SyntaxKind::SourceFile => {
                if let Some(data) = self.get_source_file(node) {
                    data.statements.nodes.iter().for_each(|&s| push(s));
                }
            }
            SyntaxKind::Unknown
            | SyntaxKind::Identifier
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => {}
        }

        children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// =============================================================================
// Node View - Ergonomic wrapper for reading Nodes
// =============================================================================

/// A view into a node that pairs its header with the arena, so typed data can
/// be read without passing the arena around.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    pub node: &'a Node,
    pub arena: &'a NodeArena,
    pub index: NodeIndex,
}

impl<'a> NodeView<'a> {
    #[inline]
    pub fn new(arena: &'a NodeArena, index: NodeIndex) -> Option<NodeView<'a>> {
        arena.get(index).map(|node| NodeView { node, arena, index })
    }

    #[inline]
    pub fn kind(&self) -> Option<SyntaxKind> {
        SyntaxKind::from_u16(self.node.kind)
    }

    #[inline]
    pub fn parent(&self) -> NodeIndex {
        self.arena.parent_of(self.index)
    }

    #[inline]
    pub fn child(&self, index: NodeIndex) -> Option<NodeView<'a>> {
        NodeView::new(self.arena, index)
    }

    #[inline]
    pub fn as_identifier(&self) -> Option<&'a IdentifierData> {
        self.arena.get_identifier(self.node)
    }

    #[inline]
    pub fn as_literal(&self) -> Option<&'a LiteralData> {
        self.arena.get_literal(self.node)
    }

    #[inline]
    pub fn as_call_expr(&self) -> Option<&'a CallExprData> {
        self.arena.get_call_expr(self.node)
    }

    #[inline]
    pub fn as_access_expr(&self) -> Option<&'a AccessExprData> {
        self.arena.get_access_expr(self.node)
    }

    #[inline]
    pub fn as_function(&self) -> Option<&'a FunctionData> {
        self.arena.get_function(self.node)
    }

    #[inline]
    pub fn as_import_decl(&self) -> Option<&'a ImportDeclData> {
        self.arena.get_import_decl(self.node)
    }
}
