//! In-place mutation primitives.
//!
//! Every primitive keeps parent links consistent and marks the mutated node
//! and its ancestors `MODIFIED`, which tells printers which subtrees can no
//! longer be reproduced from the original source text. Primitives return
//! `false` when the handle does not refer to a node of the required kind.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind::SyntaxKind;

impl NodeArena {
    /// Mark `index` and all of its ancestors as modified.
    pub fn mark_modified(&mut self, index: NodeIndex) {
        let mut current = index;
        while let Some(node) = self.get_mut(current) {
            if node.has_flag(node_flags::MODIFIED) {
                // Ancestors of a modified node are already marked.
                break;
            }
            node.flags |= node_flags::MODIFIED;
            current = self.parent_of(current);
        }
    }

    /// Was `index` (or anything below it) changed since construction?
    pub fn is_modified(&self, index: NodeIndex) -> bool {
        self.get(index)
            .is_some_and(|node| node.has_flag(node_flags::MODIFIED))
    }

    pub fn add_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags;
        }
    }

    /// Data pool slot of `index` when its kind is one of `kinds`.
    fn data_slot(&self, index: NodeIndex, kinds: &[SyntaxKind]) -> Option<usize> {
        let node = self.get(index)?;
        if node.has_data() && kinds.iter().any(|&k| node.kind == k as u16) {
            Some(node.data_index as usize)
        } else {
            None
        }
    }

    /// Replace the text of an identifier.
    pub fn rename_identifier(&mut self, index: NodeIndex, text: &str) -> bool {
        let Some(slot) = self.data_slot(index, &[SyntaxKind::Identifier]) else {
            return false;
        };
        let Some(data) = self.identifiers.get_mut(slot) else {
            return false;
        };
        if data.escaped_text != text {
            data.escaped_text = text.to_string();
            self.mark_modified(index);
        }
        true
    }

    /// Replace the argument list of a call expression.
    pub fn set_call_arguments(&mut self, call: NodeIndex, arguments: NodeList) -> bool {
        let Some(slot) = self.data_slot(call, &[SyntaxKind::CallExpression]) else {
            return false;
        };
        let Some(data) = self.call_exprs.get_mut(slot) else {
            return false;
        };
        data.arguments = arguments.clone();
        self.set_parent_list(&arguments, call);
        self.mark_modified(call);
        true
    }

    /// Replace the expression of an expression statement.
    pub fn set_statement_expression(&mut self, statement: NodeIndex, expression: NodeIndex) -> bool {
        let Some(slot) = self.data_slot(statement, &[SyntaxKind::ExpressionStatement]) else {
            return false;
        };
        let Some(data) = self.expr_statements.get_mut(slot) else {
            return false;
        };
        data.expression = expression;
        self.set_parent(expression, statement);
        self.mark_modified(statement);
        true
    }

    /// Set or clear the `async` modifier of a function-like node.
    pub fn set_function_async(&mut self, function: NodeIndex, is_async: bool) -> bool {
        let Some(slot) = self.data_slot(
            function,
            &[
                SyntaxKind::FunctionExpression,
                SyntaxKind::FunctionDeclaration,
                SyntaxKind::ArrowFunction,
            ],
        ) else {
            return false;
        };
        let Some(data) = self.functions.get_mut(slot) else {
            return false;
        };
        if data.is_async != is_async {
            data.is_async = is_async;
            self.mark_modified(function);
        }
        true
    }

    /// Replace the specifier list of an import declaration.
    pub fn set_import_specifiers(&mut self, declaration: NodeIndex, specifiers: NodeList) -> bool {
        let Some(slot) = self.data_slot(declaration, &[SyntaxKind::ImportDeclaration]) else {
            return false;
        };
        let Some(data) = self.import_decls.get_mut(slot) else {
            return false;
        };
        data.specifiers = specifiers.clone();
        self.set_parent_list(&specifiers, declaration);
        self.mark_modified(declaration);
        true
    }

    fn statements_mut(&mut self, container: NodeIndex) -> Option<&mut NodeList> {
        if let Some(slot) = self.data_slot(container, &[SyntaxKind::SourceFile]) {
            return self.source_files.get_mut(slot).map(|f| &mut f.statements);
        }
        let slot = self.data_slot(container, &[SyntaxKind::Block])?;
        self.blocks.get_mut(slot).map(|b| &mut b.statements)
    }

    /// Insert `statement` at `position` of a source file or block statement
    /// list. Positions past the end append. Expressions and other
    /// non-statement nodes are refused.
    pub fn insert_statement(
        &mut self,
        container: NodeIndex,
        position: usize,
        statement: NodeIndex,
    ) -> bool {
        if !self.kind_of(statement).is_some_and(SyntaxKind::is_statement) {
            return false;
        }
        let Some(statements) = self.statements_mut(container) else {
            return false;
        };
        let position = position.min(statements.nodes.len());
        statements.nodes.insert(position, statement);
        self.set_parent(statement, container);
        self.mark_modified(container);
        true
    }

    /// Detach `statement` from a source file or block statement list.
    pub fn remove_statement(&mut self, container: NodeIndex, statement: NodeIndex) -> bool {
        let Some(statements) = self.statements_mut(container) else {
            return false;
        };
        let Some(position) = statements.nodes.iter().position(|&s| s == statement) else {
            return false;
        };
        statements.nodes.remove(position);
        self.set_parent(statement, NodeIndex::NONE);
        self.mark_modified(container);
        true
    }
}
