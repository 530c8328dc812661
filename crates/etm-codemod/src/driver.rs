//! Migration driver: import migration, then per-suite rewrite.

use etm_ast::{NodeArena, NodeIndex, SourcePrinter};
use etm_common::{MigrationNames, PrinterOptions};
use rustc_hash::FxHashMap;
use tracing::{debug, info_span};

use crate::error::Result;
use crate::imports::{ImportRegistry, SpecifierMapping, SpecifierMappings, SpecifierSet};
use crate::matcher::{Shape, find_all};
use crate::suite::{SuiteDescriptor, resolve_setup_name};

/// Summary of one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// The file does not import the legacy module; nothing was touched.
    pub skipped: bool,
    /// Suite blocks found anywhere in the file
    pub suites_found: usize,
    /// Suite blocks that invoked the legacy setup macro and were rewritten
    pub suites_migrated: usize,
    /// Specifiers the legacy module import ended up with (empty if removed)
    pub legacy_specifiers: Vec<String>,
    /// Helper names imported from the helpers module
    pub helpers: Vec<String>,
    pub awaited_calls: usize,
    pub renamed_elements: usize,
}

impl MigrationReport {
    fn skipped() -> MigrationReport {
        MigrationReport {
            skipped: true,
            ..MigrationReport::default()
        }
    }
}

pub struct Migration<'a> {
    arena: &'a mut NodeArena,
    root: NodeIndex,
    names: &'a MigrationNames,
}

impl<'a> Migration<'a> {
    pub fn new(arena: &'a mut NodeArena, root: NodeIndex, names: &'a MigrationNames) -> Migration<'a> {
        Migration { arena, root, names }
    }

    pub fn run(mut self) -> Result<MigrationReport> {
        let span = info_span!("migration", root = self.root.0);
        let _enter = span.enter();

        let Some(legacy_specifiers) = self.migrate_imports()? else {
            debug!(module = %self.names.legacy_module, "no legacy import, skipping file");
            return Ok(MigrationReport::skipped());
        };

        let mut report = MigrationReport {
            legacy_specifiers,
            ..MigrationReport::default()
        };
        self.rewrite_suites(&mut report)?;
        debug!(
            suites = report.suites_found,
            migrated = report.suites_migrated,
            awaited = report.awaited_calls,
            "migration finished"
        );
        Ok(report)
    }

    /// Every suite statement in the file, in document order at any depth.
    fn suite_statements(&self) -> Vec<NodeIndex> {
        find_all(
            self.arena,
            self.root,
            &Shape::call_statement(&self.names.suite_keyword),
        )
    }

    fn analyze_suites(&self) -> Result<Vec<SuiteDescriptor>> {
        self.suite_statements()
            .into_iter()
            .map(|stmt| SuiteDescriptor::analyze(self.arena, stmt, self.names))
            .collect()
    }

    /// Pass 1. Rewrite the legacy module's specifiers; the setup macro
    /// resolves to the setup names of every legacy suite in the file.
    /// `None` when the file does not import the legacy module.
    fn migrate_imports(&mut self) -> Result<Option<Vec<String>>> {
        let has_legacy_import = ImportRegistry::new(self.arena, self.root)?
            .find_import(&self.names.legacy_module)
            .is_some();
        if !has_legacy_import {
            return Ok(None);
        }

        let suites = self.analyze_suites()?;
        let names = self.names;
        let mut mapping: SpecifierMappings<'_> = FxHashMap::default();
        mapping.insert(
            names.setup_macro.clone(),
            SpecifierMapping::PerSuite(Box::new(move |_: &str, suite: &SuiteDescriptor| {
                resolve_setup_name(suite, names)
            })),
        );

        let mut registry = ImportRegistry::new(self.arena, self.root)?;
        let migrated =
            registry.migrate_module_specifiers(&names.legacy_module, &mapping, &suites)?;
        debug!(suites = suites.len(), specifiers = ?migrated, "pass 1: imports migrated");
        Ok(migrated.map(|set| set.iter().map(str::to_string).collect()))
    }

    /// Pass 2. Analyze each suite afresh and rewrite the legacy ones.
    fn rewrite_suites(&mut self, report: &mut MigrationReport) -> Result<()> {
        let suites = self.analyze_suites()?;
        report.suites_found = suites.len();

        let mut helpers = SpecifierSet::new();
        for suite in suites.iter().filter(|suite| suite.is_legacy_setup) {
            suite.update_setup_invocation(self.arena, self.names)?;

            let mut rewrite = suite.update_tests(self.arena, self.root, self.names)?;
            rewrite.absorb(suite.update_lifecycles(self.arena, self.root, self.names)?);

            helpers.union_with(&rewrite.helpers);
            report.awaited_calls += rewrite.awaited_calls;
            report.renamed_elements += rewrite.renamed_elements;
            report.suites_migrated += 1;
        }

        report.helpers = helpers.sorted().into_iter().map(str::to_string).collect();
        debug!(migrated = report.suites_migrated, "pass 2: suites rewritten");
        Ok(())
    }
}

/// Migrate with the default names.
pub fn migrate(arena: &mut NodeArena, root: NodeIndex) -> Result<MigrationReport> {
    migrate_with(arena, root, &MigrationNames::default())
}

pub fn migrate_with(arena: &mut NodeArena, root: NodeIndex, names: &MigrationNames) -> Result<MigrationReport> {
    Migration::new(arena, root, names).run()
}

/// Migrate and print. `None` when the file was skipped, so hosts can leave
/// it alone.
pub fn migrate_source<P: SourcePrinter + ?Sized>(
    arena: &mut NodeArena,
    root: NodeIndex,
    printer: &P,
    options: &PrinterOptions,
) -> Result<Option<String>> {
    let report = migrate(arena, root)?;
    if report.skipped {
        return Ok(None);
    }
    Ok(Some(printer.print(arena, root, options)))
}
