//! Pattern matching and structural rewrite core of etm.
//!
//! Migrates Ember test files from the legacy `ember-mocha`
//! `setupComponentTest` convention to `setupTest` / `setupRenderingTest`:
//!
//! - `matcher`: declarative node-shape matching and document-order search
//! - `imports`: import specifier consolidation (`ImportRegistry`)
//! - `suite`: analysis of `describe` blocks into `SuiteDescriptor`s
//! - `body_rewriter`: `this.render(...)` to `await render(...)` and `this._element` to `this.element`
//! - `driver`: the two passes tying it together (`Migration`)
//!
//! The engine works on an `etm_ast::NodeArena` built by a host parser (or by
//! `etm_ast::AstBuilder`) and mutates it in place. Printing is delegated to an
//! injected `etm_ast::SourcePrinter`.

pub mod error;
pub use error::{MigrationError, Result};

pub mod matcher;
pub use matcher::{Field, Shape, find_all, matches};

pub mod imports;
pub use imports::{ImportOutcome, ImportRegistry, SpecifierMapping, SpecifierMappings, SpecifierSet};

pub mod suite;
pub use suite::{HookKind, SetupKind, SuiteDescriptor, SuiteStatement, classify_statement};

pub mod body_rewriter;
pub use body_rewriter::{BodyRewrite, BodyRewriter};

pub mod driver;
pub use driver::{Migration, MigrationReport, migrate, migrate_source, migrate_with};

mod factory;

#[cfg(test)]
#[path = "../tests/matcher_tests.rs"]
mod matcher_tests;

#[cfg(test)]
#[path = "../tests/imports_tests.rs"]
mod imports_tests;

#[cfg(test)]
#[path = "../tests/suite_tests.rs"]
mod suite_tests;

#[cfg(test)]
#[path = "../tests/body_rewriter_tests.rs"]
mod body_rewriter_tests;
