use etm_ast::{Node, NodeIndex, SyntaxKind};

use super::Printer;
use super::expressions::ListFormat;

impl<'a> Printer<'a> {
    // =========================================================================
    // Imports
    // =========================================================================

    /// `import a, { b, c as d } from 'x';`, `import * as ns from 'x';` or,
    /// with no bindings at all, `import 'x';`.
    pub(super) fn emit_import_declaration(&mut self, node: &Node) {
        let Some(import) = self.arena.get_import_decl(node) else {
            return;
        };

        let mut default_binding = NodeIndex::NONE;
        let mut namespace_binding = NodeIndex::NONE;
        let mut named: Vec<NodeIndex> = Vec::with_capacity(import.specifiers.len());
        for &spec in &import.specifiers.nodes {
            match self.kind_of(spec) {
                Some(SyntaxKind::ImportDefaultSpecifier) => default_binding = spec,
                Some(SyntaxKind::NamespaceImport) => namespace_binding = spec,
                Some(SyntaxKind::ImportSpecifier) => named.push(spec),
                _ => {}
            }
        }

        self.write("import ");
        if import.specifiers.is_empty() {
            self.emit(import.module_specifier);
            self.write(";");
            return;
        }

        let mut wrote_binding = false;
        if default_binding.is_some() {
            self.emit(default_binding);
            wrote_binding = true;
        }
        if namespace_binding.is_some() {
            if wrote_binding {
                self.write(", ");
            }
            self.emit(namespace_binding);
            wrote_binding = true;
        }
        if !named.is_empty() {
            if wrote_binding {
                self.write(", ");
            }
            // ` from '` + source + `';`
            let suffix_width = self.module_specifier_width(import.module_specifier) + 7;
            self.emit_list(&named, ListFormat::OBJECT, false, suffix_width);
        }

        self.write(" from ");
        self.emit(import.module_specifier);
        self.write(";");
    }

    pub(super) fn emit_import_binding(&mut self, node: &Node, kind: SyntaxKind) {
        let Some(spec) = self.arena.get_specifier(node) else {
            return;
        };
        if kind == SyntaxKind::NamespaceImport {
            self.write("* as ");
        } else if spec.property_name.is_some() {
            self.emit(spec.property_name);
            self.write(" as ");
        }
        self.emit(spec.name);
    }

    fn module_specifier_width(&self, idx: NodeIndex) -> usize {
        self.arena
            .literal_text(idx)
            .map_or(0, |text| text.chars().count() + 2)
    }
}
