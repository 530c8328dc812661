//! Node kinds of the JavaScript subset the engine reads and writes.
//!
//! Kinds are stored on `Node` as `u16` (`SyntaxKind::X as u16`), the same way
//! the scanner kinds are packed into thin node headers.

use serde::{Deserialize, Serialize};

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    Unknown = 0,

    // Names and literals
    Identifier,
    StringLiteral,
    NumericLiteral,
    NoSubstitutionTemplateLiteral,

    // Keyword tokens (no data)
    ThisKeyword,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,

    // Expressions
    CallExpression,
    PropertyAccessExpression,
    AwaitExpression,
    TaggedTemplateExpression,
    FunctionExpression,
    ArrowFunction,
    ObjectLiteralExpression,
    ArrayLiteralExpression,
    PropertyAssignment,
    ShorthandPropertyAssignment,
    Parameter,

    // Statements
    Block,
    ExpressionStatement,
    VariableStatement,
    VariableDeclaration,
    ReturnStatement,
    IfStatement,
    FunctionDeclaration,

    // Any construct without a dedicated kind (element access, operators,
    // `new`, loops, `try`, ...): its text around a list of child nodes
    Other,

    // Modules
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    NamespaceImport,

    SourceFile,
}

impl SyntaxKind {
    const ALL: [SyntaxKind; 33] = [
        SyntaxKind::Unknown,
        SyntaxKind::Identifier,
        SyntaxKind::StringLiteral,
        SyntaxKind::NumericLiteral,
        SyntaxKind::NoSubstitutionTemplateLiteral,
        SyntaxKind::ThisKeyword,
        SyntaxKind::TrueKeyword,
        SyntaxKind::FalseKeyword,
        SyntaxKind::NullKeyword,
        SyntaxKind::CallExpression,
        SyntaxKind::PropertyAccessExpression,
        SyntaxKind::AwaitExpression,
        SyntaxKind::TaggedTemplateExpression,
        SyntaxKind::FunctionExpression,
        SyntaxKind::ArrowFunction,
        SyntaxKind::ObjectLiteralExpression,
        SyntaxKind::ArrayLiteralExpression,
        SyntaxKind::PropertyAssignment,
        SyntaxKind::ShorthandPropertyAssignment,
        SyntaxKind::Parameter,
        SyntaxKind::Block,
        SyntaxKind::ExpressionStatement,
        SyntaxKind::VariableStatement,
        SyntaxKind::VariableDeclaration,
        SyntaxKind::ReturnStatement,
        SyntaxKind::IfStatement,
        SyntaxKind::FunctionDeclaration,
        SyntaxKind::Other,
        SyntaxKind::ImportDeclaration,
        SyntaxKind::ImportSpecifier,
        SyntaxKind::ImportDefaultSpecifier,
        SyntaxKind::NamespaceImport,
        SyntaxKind::SourceFile,
    ];

    /// Recover the kind from a packed `u16` node kind.
    pub fn from_u16(kind: u16) -> Option<SyntaxKind> {
        Self::ALL.get(kind as usize).copied()
    }

    /// Kinds that introduce their own function scope.
    pub const fn is_function_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionExpression
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::ArrowFunction
        )
    }

    /// Kinds that may sit in a source file or block statement list.
    /// `Other` qualifies since it covers loops, `try` and the like.
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::VariableStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::ImportDeclaration
                | SyntaxKind::Other
        )
    }
}
