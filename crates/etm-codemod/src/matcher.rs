//! Declarative node-shape matching.
//!
//! A `Shape` is a sparse pattern: an optional kind, an optional text (the
//! name of an identifier or the value of a string literal) and constraints on
//! named child fields. Anything the shape does not mention is unconstrained.
//! List-valued children (arguments, statements, specifiers) are never
//! matched. A missing child, a malformed node or `NodeIndex::NONE` is simply
//! a non-match.

use etm_ast::{NodeArena, NodeIndex, SyntaxKind};
use smallvec::SmallVec;
use tracing::trace;

/// Scalar child fields a shape can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Expression of an expression statement, await or return
    Expression,
    /// Called expression of a call
    Callee,
    /// Object of a property access
    Object,
    /// Property name of a property access
    Property,
    /// Module specifier of an import declaration
    Source,
    /// Key of an object literal property
    Key,
    /// Body of a function or arrow
    Body,
    /// Name of a function, variable declaration or imported binding
    Name,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shape {
    pub kind: Option<SyntaxKind>,
    pub text: Option<String>,
    pub fields: Vec<(Field, Shape)>,
}

impl Shape {
    /// Matches any existing node.
    pub fn any() -> Shape {
        Shape::default()
    }

    pub fn of_kind(kind: SyntaxKind) -> Shape {
        Shape {
            kind: Some(kind),
            ..Shape::default()
        }
    }

    /// An identifier with exactly this name.
    pub fn identifier(name: &str) -> Shape {
        Shape::of_kind(SyntaxKind::Identifier).with_text(name)
    }

    /// A string literal with exactly this value.
    pub fn string(value: &str) -> Shape {
        Shape::of_kind(SyntaxKind::StringLiteral).with_text(value)
    }

    pub fn with_text(mut self, text: &str) -> Shape {
        self.text = Some(text.to_string());
        self
    }

    pub fn field(mut self, field: Field, shape: Shape) -> Shape {
        self.fields.push((field, shape));
        self
    }

    /// `name(...);` as a statement
    pub fn call_statement(callee: &str) -> Shape {
        Shape::of_kind(SyntaxKind::ExpressionStatement).field(
            Field::Expression,
            Shape::of_kind(SyntaxKind::CallExpression)
                .field(Field::Callee, Shape::identifier(callee)),
        )
    }

    /// `this.property`
    pub fn this_member(property: &str) -> Shape {
        Shape::of_kind(SyntaxKind::PropertyAccessExpression)
            .field(Field::Object, Shape::of_kind(SyntaxKind::ThisKeyword))
            .field(Field::Property, Shape::identifier(property))
    }

    /// `this.method(...);` as a statement. `None` accepts any method name.
    pub fn this_method_call_statement(method: Option<&str>) -> Shape {
        let callee = match method {
            Some(method) => Shape::this_member(method),
            None => Shape::of_kind(SyntaxKind::PropertyAccessExpression)
                .field(Field::Object, Shape::of_kind(SyntaxKind::ThisKeyword))
                .field(Field::Property, Shape::of_kind(SyntaxKind::Identifier)),
        };
        Shape::of_kind(SyntaxKind::ExpressionStatement).field(
            Field::Expression,
            Shape::of_kind(SyntaxKind::CallExpression).field(Field::Callee, callee),
        )
    }

    /// `import ... from 'module';`
    pub fn import_from(module: &str) -> Shape {
        Shape::of_kind(SyntaxKind::ImportDeclaration).field(Field::Source, Shape::string(module))
    }
}

/// Resolve a named scalar child of `idx`. NONE when the node kind has no
/// such field or the field is empty.
pub fn field_of(arena: &NodeArena, idx: NodeIndex, field: Field) -> NodeIndex {
    let Some(node) = arena.get(idx) else {
        return NodeIndex::NONE;
    };

    let found = match field {
        Field::Expression => arena
            .get_expression_statement(node)
            .map(|s| s.expression)
            .or_else(|| arena.get_await_expr(node).map(|a| a.expression))
            .or_else(|| arena.get_return_statement(node).map(|r| r.expression)),
        Field::Callee => arena.get_call_expr(node).map(|c| c.expression),
        Field::Object => arena.get_access_expr(node).map(|a| a.expression),
        Field::Property => arena.get_access_expr(node).map(|a| a.name_or_argument),
        Field::Source => arena.get_import_decl(node).map(|d| d.module_specifier),
        Field::Key => arena.get_property_assignment(node).map(|p| p.name),
        Field::Body => arena.get_function(node).map(|f| f.body),
        Field::Name => arena
            .get_function(node)
            .map(|f| f.name)
            .or_else(|| arena.get_variable_declaration(node).map(|d| d.name))
            .or_else(|| {
                // `import { imported as local }` matches on `imported`.
                arena.get_specifier(node).map(|s| {
                    if s.property_name.is_some() {
                        s.property_name
                    } else {
                        s.name
                    }
                })
            }),
    };
    found.unwrap_or(NodeIndex::NONE)
}

/// Does the node at `idx` satisfy `shape`?
pub fn matches(arena: &NodeArena, idx: NodeIndex, shape: &Shape) -> bool {
    let Some(node) = arena.get(idx) else {
        return false;
    };

    if let Some(kind) = shape.kind
        && node.kind != kind as u16
    {
        return false;
    }

    if let Some(expected) = &shape.text {
        let actual = arena.identifier_text(idx).or_else(|| {
            arena
                .is_kind(idx, SyntaxKind::StringLiteral)
                .then(|| arena.literal_text(idx))
                .flatten()
        });
        if actual != Some(expected.as_str()) {
            return false;
        }
    }

    shape
        .fields
        .iter()
        .all(|(field, nested)| matches(arena, field_of(arena, idx, *field), nested))
}

/// Every node under `root` (root included) matching `shape`, in document
/// order.
pub fn find_all(arena: &NodeArena, root: NodeIndex, shape: &Shape) -> Vec<NodeIndex> {
    let mut found = Vec::new();
    let mut stack: SmallVec<[NodeIndex; 32]> = SmallVec::new();
    stack.push(root);

    while let Some(idx) = stack.pop() {
        if matches(arena, idx, shape) {
            trace!(idx = idx.0, "shape matched");
            found.push(idx);
        }
        // Reverse so the first child is visited next.
        stack.extend(arena.get_children(idx).into_iter().rev());
    }

    found
}
