//! NodeArena creation methods (add_* methods).
//!
//! Children are created before their parents, so every `add_*` method wires
//! the parent link of the children it receives.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind::SyntaxKind;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(capacity);
        arena.extended_info = Vec::with_capacity(capacity);
        arena.identifiers = Vec::with_capacity(capacity / 4);
        arena.call_exprs = Vec::with_capacity(capacity / 8);
        arena.access_exprs = Vec::with_capacity(capacity / 8);
        arena
    }

    /// Attach the text node spans refer to. Printers reuse it for untouched nodes.
    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source_text = Some(text.into());
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    #[inline]
    pub(crate) fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_some()
            && let Some(info) = self.extended_info.get_mut(child.0 as usize)
        {
            info.parent = parent;
        }
    }

    #[inline]
    pub(crate) fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    #[inline]
    fn push_node(&mut self, kind: SyntaxKind, pos: u32, end: u32, data_index: u32) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes
            .push(Node::with_data(kind as u16, pos, end, data_index));
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a token node (`this`, `true`, `false`, `null`)
    pub fn add_token(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeIndex {
        self.push_node(kind, pos, end, Node::NO_DATA)
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, data: IdentifierData) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(data);
        self.push_node(SyntaxKind::Identifier, pos, end, data_index)
    }

    /// Add a string, numeric or no-substitution template literal
    pub fn add_literal(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: LiteralData,
    ) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.push_node(kind, pos, end, data_index)
    }

    pub fn add_call_expr(&mut self, pos: u32, end: u32, data: CallExprData) -> NodeIndex {
        let expression = data.expression;
        let arguments = data.arguments.clone();

        let data_index = self.call_exprs.len() as u32;
        self.call_exprs.push(data);
        let parent = self.push_node(SyntaxKind::CallExpression, pos, end, data_index);

        self.set_parent(expression, parent);
        self.set_parent_list(&arguments, parent);
        parent
    }

    pub fn add_access_expr(&mut self, pos: u32, end: u32, data: AccessExprData) -> NodeIndex {
        let expression = data.expression;
        let name = data.name_or_argument;

        let data_index = self.access_exprs.len() as u32;
        self.access_exprs.push(data);
        let parent = self.push_node(SyntaxKind::PropertyAccessExpression, pos, end, data_index);

        self.set_parent(expression, parent);
        self.set_parent(name, parent);
        parent
    }

    pub fn add_await_expr(&mut self, pos: u32, end: u32, data: UnaryExprDataEx) -> NodeIndex {
        let expression = data.expression;

        let data_index = self.unary_exprs_ex.len() as u32;
        self.unary_exprs_ex.push(data);
        let parent = self.push_node(SyntaxKind::AwaitExpression, pos, end, data_index);

        self.set_parent(expression, parent);
        parent
    }

    pub fn add_tagged_template(
        &mut self,
        pos: u32,
        end: u32,
        data: TaggedTemplateData,
    ) -> NodeIndex {
        let tag = data.tag;
        let template = data.template;

        let data_index = self.tagged_templates.len() as u32;
        self.tagged_templates.push(data);
        let parent = self.push_node(SyntaxKind::TaggedTemplateExpression, pos, end, data_index);

        self.set_parent(tag, parent);
        self.set_parent(template, parent);
        parent
    }

    /// Add a function declaration, function expression or arrow function
    pub fn add_function(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: FunctionData,
    ) -> NodeIndex {
        debug_assert!(kind.is_function_like());
        let name = data.name;
        let parameters = data.parameters.clone();
        let body = data.body;

        let data_index = self.functions.len() as u32;
        self.functions.push(data);
        let parent = self.push_node(kind, pos, end, data_index);

        self.set_parent(name, parent);
        self.set_parent_list(&parameters, parent);
        self.set_parent(body, parent);
        parent
    }

    pub fn add_parameter(&mut self, pos: u32, end: u32, data: ParameterData) -> NodeIndex {
        let name = data.name;
        let initializer = data.initializer;

        let data_index = self.parameters.len() as u32;
        self.parameters.push(data);
        let parent = self.push_node(SyntaxKind::Parameter, pos, end, data_index);

        self.set_parent(name, parent);
        self.set_parent(initializer, parent);
        parent
    }

    /// Add an object or array literal
    pub fn add_literal_expr(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: LiteralExprData,
    ) -> NodeIndex {
        let elements = data.elements.clone();

        let data_index = self.literal_exprs.len() as u32;
        self.literal_exprs.push(data);
        let parent = self.push_node(kind, pos, end, data_index);

        self.set_parent_list(&elements, parent);
        parent
    }

    /// Add a property assignment or shorthand property assignment
    pub fn add_property_assignment(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: PropertyAssignmentData,
    ) -> NodeIndex {
        let name = data.name;
        let initializer = data.initializer;

        let data_index = self.property_assignments.len() as u32;
        self.property_assignments.push(data);
        let parent = self.push_node(kind, pos, end, data_index);

        self.set_parent(name, parent);
        self.set_parent(initializer, parent);
        parent
    }

    pub fn add_block(&mut self, pos: u32, end: u32, data: BlockData) -> NodeIndex {
        let statements = data.statements.clone();

        let data_index = self.blocks.len() as u32;
        self.blocks.push(data);
        let parent = self.push_node(SyntaxKind::Block, pos, end, data_index);

        self.set_parent_list(&statements, parent);
        parent
    }

    pub fn add_expr_statement(
        &mut self,
        pos: u32,
        end: u32,
        data: ExprStatementData,
    ) -> NodeIndex {
        let expression = data.expression;

        let data_index = self.expr_statements.len() as u32;
        self.expr_statements.push(data);
        let parent = self.push_node(SyntaxKind::ExpressionStatement, pos, end, data_index);

        self.set_parent(expression, parent);
        parent
    }

    /// Add a variable statement; pass `node_flags::CONST` / `LET` in `flags`
    pub fn add_variable(
        &mut self,
        pos: u32,
        end: u32,
        flags: u16,
        data: VariableData,
    ) -> NodeIndex {
        let declarations = data.declarations.clone();

        let data_index = self.variables.len() as u32;
        self.variables.push(data);
        let parent = self.push_node(SyntaxKind::VariableStatement, pos, end, data_index);
        self.nodes[parent.0 as usize].flags |= flags;

        self.set_parent_list(&declarations, parent);
        parent
    }

    pub fn add_variable_declaration(
        &mut self,
        pos: u32,
        end: u32,
        data: VariableDeclarationData,
    ) -> NodeIndex {
        let name = data.name;
        let initializer = data.initializer;

        let data_index = self.variable_declarations.len() as u32;
        self.variable_declarations.push(data);
        let parent = self.push_node(SyntaxKind::VariableDeclaration, pos, end, data_index);

        self.set_parent(name, parent);
        self.set_parent(initializer, parent);
        parent
    }

    pub fn add_return(&mut self, pos: u32, end: u32, data: ReturnData) -> NodeIndex {
        let expression = data.expression;

        let data_index = self.return_data.len() as u32;
        self.return_data.push(data);
        let parent = self.push_node(SyntaxKind::ReturnStatement, pos, end, data_index);

        self.set_parent(expression, parent);
        parent
    }

    pub fn add_if_statement(&mut self, pos: u32, end: u32, data: IfStatementData) -> NodeIndex {
        let expression = data.expression;
        let then_statement = data.then_statement;
        let else_statement = data.else_statement;

        let data_index = self.if_statements.len() as u32;
        self.if_statements.push(data);
        let parent = self.push_node(SyntaxKind::IfStatement, pos, end, data_index);

        self.set_parent(expression, parent);
        self.set_parent(then_statement, parent);
        self.set_parent(else_statement, parent);
        parent
    }

    pub fn add_other(&mut self, pos: u32, end: u32, data: OtherData) -> NodeIndex {
        let children = data.children.clone();

        let data_index = self.others.len() as u32;
        self.others.push(data);
        let parent = self.push_node(SyntaxKind::Other, pos, end, data_index);

        self.set_parent_list(&children, parent);
        parent
    }

    pub fn add_import_decl(&mut self, pos: u32, end: u32, data: ImportDeclData) -> NodeIndex {
        let specifiers = data.specifiers.clone();
        let module_specifier = data.module_specifier;

        let data_index = self.import_decls.len() as u32;
        self.import_decls.push(data);
        let parent = self.push_node(SyntaxKind::ImportDeclaration, pos, end, data_index);

        self.set_parent_list(&specifiers, parent);
        self.set_parent(module_specifier, parent);
        parent
    }

    /// Add an import specifier, default import binding or namespace import
    pub fn add_specifier(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        data: SpecifierData,
    ) -> NodeIndex {
        let property_name = data.property_name;
        let name = data.name;

        let data_index = self.specifiers.len() as u32;
        self.specifiers.push(data);
        let parent = self.push_node(kind, pos, end, data_index);

        self.set_parent(property_name, parent);
        self.set_parent(name, parent);
        parent
    }

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let statements = data.statements.clone();

        let data_index = self.source_files.len() as u32;
        self.source_files.push(data);
        let parent = self.push_node(SyntaxKind::SourceFile, pos, end, data_index);

        self.set_parent_list(&statements, parent);
        parent
    }
}
