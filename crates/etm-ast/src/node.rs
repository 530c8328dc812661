//! Thin node headers and typed data pools.
//!
//! Each node is a 16-byte `Node` header (kind, flags, span, data index). The
//! kind-specific payload lives in a separate `Vec<T>` pool on `NodeArena`,
//! selected by `kind` and addressed by `data_index`. Parent links live in
//! `extended_info`, parallel to `nodes`.

use super::base::{NodeIndex, NodeList};
use serde::{Deserialize, Serialize};

/// A thin 16-byte node header.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// SyntaxKind value
    pub kind: u16,
    /// Packed `node_flags`
    pub flags: u16,
    /// Start of the node's own text in the attached source (no leading trivia)
    pub pos: u32,
    /// End position in source
    pub end: u32,
    /// Index into the type-specific storage pool (u32::MAX = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }

    /// True when the node maps onto a real range of the attached source text.
    #[inline]
    pub fn has_source_span(&self) -> bool {
        self.pos < self.end && !self.has_flag(node_flags::SYNTHESIZED)
    }
}

pub mod node_flags {
    pub const NONE: u16 = 0;
    /// `const` variable statement
    pub const CONST: u16 = 1 << 0;
    /// `let` variable statement
    pub const LET: u16 = 1 << 1;
    /// Created by a builder or a rewrite, never backed by source text
    pub const SYNTHESIZED: u16 = 1 << 4;
    /// The node itself, or something below it, was mutated in place
    pub const MODIFIED: u16 = 1 << 5;
}

/// Per-node information kept outside the hot header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

// =============================================================================
// Typed Data Pools
// =============================================================================

/// Data for identifier nodes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Data for string, numeric and template literals
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralData {
    /// Cooked value (string contents without quotes)
    pub text: String,
    /// Source spelling including quotes, when the host parser kept it
    pub raw_text: Option<String>,
}

/// Data for call expressions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
}

/// Data for property access (`a.b`, `a?.b`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot_token: bool,
}

/// Data for `await` expressions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnaryExprDataEx {
    pub expression: NodeIndex,
}

/// Data for tagged templates (`hbs\`...\``)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedTemplateData {
    pub tag: NodeIndex,
    pub template: NodeIndex,
}

/// Data for function declarations, function expressions and arrows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionData {
    pub is_async: bool,
    pub asterisk_token: bool,
    pub name: NodeIndex,
    pub parameters: NodeList,
    /// Block for functions; block or expression for arrows
    pub body: NodeIndex,
}

/// Data for parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterData {
    pub dot_dot_dot_token: bool,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for object and array literals
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
    pub multi_line: bool,
}

/// Data for property assignments (`key: value`); shorthand properties leave
/// `initializer` as NONE
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for blocks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Data for expression statements
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

/// Data for variable statements; `const`/`let` live in the node flags
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// Data for constructs without a dedicated kind.
///
/// Only the children are structured. `fragments` is the text between them
/// for synthesized nodes: `fragments[i]` precedes `children[i]` and the
/// fragment past the last child closes the node. Nodes with a source span
/// take that text from the source instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherData {
    pub children: NodeList,
    pub fragments: Vec<String>,
}

/// Data for import declarations.
///
/// `specifiers` holds `ImportDefaultSpecifier`, `NamespaceImport` and
/// `ImportSpecifier` nodes in source order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDeclData {
    pub specifiers: NodeList,
    pub module_specifier: NodeIndex,
}

/// Data for import specifiers (`a`, `a as b`, `* as ns`, default bindings).
///
/// For `a as b`, `property_name` is `a` and `name` is `b`; without an alias
/// `property_name` is NONE.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecifierData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileData {
    pub file_name: String,
    pub statements: NodeList,
}

// =============================================================================
// NodeArena
// =============================================================================

/// Arena holding every node of one file.
///
/// Nodes are never freed; a detached subtree simply becomes unreachable from
/// the root.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub unary_exprs_ex: Vec<UnaryExprDataEx>,
    pub tagged_templates: Vec<TaggedTemplateData>,
    pub functions: Vec<FunctionData>,
    pub parameters: Vec<ParameterData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub property_assignments: Vec<PropertyAssignmentData>,
    pub blocks: Vec<BlockData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub return_data: Vec<ReturnData>,
    pub if_statements: Vec<IfStatementData>,
    pub others: Vec<OtherData>,
    pub import_decls: Vec<ImportDeclData>,
    pub specifiers: Vec<SpecifierData>,
    pub source_files: Vec<SourceFileData>,
    /// Text the node spans refer to, when the host parser attached it
    pub source_text: Option<String>,
}
