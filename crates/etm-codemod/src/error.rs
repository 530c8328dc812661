use etm_ast::SyntaxKind;
use thiserror::Error;

/// Fatal structural errors. A statement that simply does not match a
/// recognized shape is never an error; it is left alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    /// A recognized construct lacks a part the migration depends on, e.g. a
    /// setup macro call without its options argument.
    #[error("{construct} is missing its {field}")]
    MissingExpectedField {
        construct: &'static str,
        field: &'static str,
    },

    /// The setup invocation was updated before its convention was resolved.
    #[error("setup invocation updated before the setup convention was resolved")]
    UnresolvedSetup,

    /// A handle does not refer to the node kind an operation requires.
    #[error("node {index} is not a {expected:?}")]
    InvalidNode { index: u32, expected: SyntaxKind },
}

pub type Result<T> = std::result::Result<T, MigrationError>;
