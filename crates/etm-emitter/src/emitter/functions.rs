use etm_ast::{Node, SyntaxKind};

use super::Printer;
use super::expressions::ListFormat;

impl<'a> Printer<'a> {
    // =========================================================================
    // Functions
    // =========================================================================

    /// `async function* name(params) { ... }` for both expressions and
    /// declarations.
    pub(super) fn emit_function(&mut self, node: &Node) {
        let Some(func) = self.arena.get_function(node) else {
            return;
        };

        if func.is_async {
            self.write("async ");
        }
        self.write("function");
        if func.asterisk_token {
            self.write("*");
        }
        if func.name.is_some() {
            self.write(" ");
            self.emit(func.name);
        }
        self.emit_list(&func.parameters.nodes, ListFormat::ARGUMENTS, false, 2);
        self.write(" ");
        self.emit(func.body);
    }

    /// Arrow functions always get parenthesized parameters.
    pub(super) fn emit_arrow_function(&mut self, node: &Node) {
        let Some(func) = self.arena.get_function(node) else {
            return;
        };

        if func.is_async {
            self.write("async ");
        }
        self.emit_list(&func.parameters.nodes, ListFormat::ARGUMENTS, false, 5);
        self.write(" => ");

        // A concise object literal body would read as a block.
        let body_is_object =
            self.kind_of(func.body) == Some(SyntaxKind::ObjectLiteralExpression);
        if body_is_object {
            self.write("(");
            self.emit(func.body);
            self.write(")");
        } else {
            self.emit(func.body);
        }
    }

    pub(super) fn emit_parameter(&mut self, node: &Node) {
        let Some(param) = self.arena.get_parameter(node) else {
            return;
        };
        if param.dot_dot_dot_token {
            self.write("...");
        }
        self.emit(param.name);
        if param.initializer.is_some() {
            self.write(" = ");
            self.emit(param.initializer);
        }
    }
}
