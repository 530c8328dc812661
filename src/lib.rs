//! etm: migrates Ember test files from `setupComponentTest` to
//! `setupTest` / `setupRenderingTest`.
//!
//! This crate is the facade over the workspace. Hosts parse a test file into
//! an `etm_ast::NodeArena`, run the migration and print the result:
//!
//! ```ignore
//! let config = etm::load_config(Path::new("etm.json"))?;
//! if let Some(text) = etm::migrate_with_config(&mut arena, root, &config, &etm::JsEmitter)? {
//!     std::fs::write(path, text)?;
//! }
//! ```

// Names, printer options and config loading
pub use etm_common as common;
pub use etm_common::config::{load_config, parse_config};
pub use etm_common::{EtmConfig, MigrationNames, PrinterOptions, QuoteStyle};

// Tree facility
pub use etm_ast as ast;
pub use etm_ast::{AstBuilder, NodeArena, NodeIndex, SourcePrinter, SyntaxKind};

// Reference printer
pub use etm_emitter as emitter;
pub use etm_emitter::JsEmitter;

// Migration engine
pub use etm_codemod as codemod;
pub use etm_codemod::{MigrationError, MigrationReport, migrate, migrate_source, migrate_with};

// Subscriber setup for hosts
pub mod tracing_config;

use tracing::debug;

/// Migrate with the names in `config` and print with its printer options.
///
/// Returns `None` when the file does not use the legacy module, so hosts can
/// leave it untouched.
pub fn migrate_with_config<P: SourcePrinter + ?Sized>(
    arena: &mut NodeArena,
    root: NodeIndex,
    config: &EtmConfig,
    printer: &P,
) -> etm_codemod::Result<Option<String>> {
    let report = migrate_with(arena, root, &config.names)?;
    if report.skipped {
        return Ok(None);
    }
    debug!(
        migrated = report.suites_migrated,
        quote = ?config.printer.quote,
        wrap_column = config.printer.wrap_column,
        "printing migrated file"
    );
    Ok(Some(printer.print(arena, root, &config.printer)))
}
