//! Import specifier consolidation.
//!
//! `ImportRegistry` finds import declarations by module source among the
//! top-level statements of a file, creates a missing one at a deterministic
//! position, and rewrites specifier lists. A declaration whose specifier set
//! ends up empty is removed from the file.

use etm_ast::{NodeArena, NodeIndex, NodeList, SyntaxKind};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{MigrationError, Result};
use crate::factory;
use crate::matcher::{Shape, matches};
use crate::suite::SuiteDescriptor;

// =============================================================================
// SpecifierSet
// =============================================================================

/// A set of specifier names with union semantics. Iteration follows
/// insertion order; `sorted` gives the alphabetical (byte) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecifierSet {
    names: IndexSet<String>,
}

impl SpecifierSet {
    pub fn new() -> SpecifierSet {
        SpecifierSet::default()
    }

    /// Add `name`; returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn union_with(&mut self, other: &SpecifierSet) {
        self.names.extend(other.names.iter().cloned());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.iter().collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for SpecifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SpecifierSet {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for SpecifierSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

// =============================================================================
// Specifier mapping
// =============================================================================

/// Resolves a legacy specifier name against one suite block.
pub type SuiteResolver<'r> = dyn Fn(&str, &SuiteDescriptor) -> Option<String> + 'r;

/// Replacement rule for one imported name.
pub enum SpecifierMapping<'r> {
    /// Always becomes this name.
    Fixed(String),
    /// Resolved once per suite block; the results are unioned. A suite for
    /// which the resolver returns `None` contributes nothing.
    PerSuite(Box<SuiteResolver<'r>>),
}

impl std::fmt::Debug for SpecifierMapping<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecifierMapping::Fixed(name) => f.debug_tuple("Fixed").field(name).finish(),
            SpecifierMapping::PerSuite(_) => f.write_str("PerSuite(..)"),
        }
    }
}

/// Imported name -> replacement rule. Unmapped names pass through.
pub type SpecifierMappings<'r> = FxHashMap<String, SpecifierMapping<'r>>;

// =============================================================================
// ImportRegistry
// =============================================================================

/// What a specifier rewrite did to its declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Updated(NodeIndex),
    Removed,
}

pub struct ImportRegistry<'a> {
    arena: &'a mut NodeArena,
    root: NodeIndex,
}

impl<'a> ImportRegistry<'a> {
    /// Registry over the top-level statements of the source file `root`.
    pub fn new(arena: &'a mut NodeArena, root: NodeIndex) -> Result<ImportRegistry<'a>> {
        if !arena.is_kind(root, SyntaxKind::SourceFile) {
            return Err(MigrationError::InvalidNode {
                index: root.0,
                expected: SyntaxKind::SourceFile,
            });
        }
        Ok(ImportRegistry { arena, root })
    }

    fn statements(&self) -> &[NodeIndex] {
        self.arena
            .statements_of(self.root)
            .map_or(&[], |list| list.nodes.as_slice())
    }

    /// Top-level import declarations in statement order.
    pub fn imports(&self) -> Vec<NodeIndex> {
        self.statements()
            .iter()
            .copied()
            .filter(|&stmt| self.arena.is_kind(stmt, SyntaxKind::ImportDeclaration))
            .collect()
    }

    /// Every top-level declaration importing `module`, in statement order.
    pub fn find_imports(&self, module: &str) -> Vec<NodeIndex> {
        let shape = Shape::import_from(module);
        self.statements()
            .iter()
            .copied()
            .filter(|&stmt| matches(self.arena, stmt, &shape))
            .collect()
    }

    /// First declaration importing `module`.
    pub fn find_import(&self, module: &str) -> Option<NodeIndex> {
        self.find_imports(module).into_iter().next()
    }

    /// Imported names of the named specifiers of `decl`, in list order.
    /// Default and namespace bindings are not included.
    pub fn named_specifiers(&self, decl: NodeIndex) -> Vec<String> {
        let Some(import) = self.arena.get_import_decl_at(decl) else {
            return Vec::new();
        };
        import
            .specifiers
            .nodes
            .iter()
            .filter(|&&spec| self.arena.is_kind(spec, SyntaxKind::ImportSpecifier))
            .filter_map(|&spec| {
                let data = self.arena.get(spec).and_then(|n| self.arena.get_specifier(n))?;
                let imported = if data.property_name.is_some() {
                    data.property_name
                } else {
                    data.name
                };
                self.arena.identifier_text(imported).map(str::to_string)
            })
            .collect()
    }

    /// Return the first declaration importing `module`, creating an empty
    /// one when there is none. A new declaration goes right after the last
    /// declaration importing `anchor`, else after the last import, else
    /// becomes the first statement of the file.
    pub fn find_or_create_import(&mut self, module: &str, anchor: &str) -> Result<NodeIndex> {
        if let Some(existing) = self.find_import(module) {
            return Ok(existing);
        }

        let statements = self.statements();
        let anchor_shape = Shape::import_from(anchor);
        let after_anchor = statements
            .iter()
            .rposition(|&stmt| matches(self.arena, stmt, &anchor_shape));
        let after_last_import = statements
            .iter()
            .rposition(|&stmt| self.arena.is_kind(stmt, SyntaxKind::ImportDeclaration));
        let position = after_anchor.or(after_last_import).map_or(0, |i| i + 1);

        let decl = factory::empty_import(self.arena, module);
        if !self.arena.insert_statement(self.root, position, decl) {
            return Err(MigrationError::InvalidNode {
                index: self.root.0,
                expected: SyntaxKind::SourceFile,
            });
        }
        debug!(
            module,
            anchor,
            position,
            anchored = after_anchor.is_some(),
            "created import declaration"
        );
        Ok(decl)
    }

    /// Union the named specifiers of `decl` with `desired` and replace the
    /// list with the alphabetically sorted union. An empty union removes
    /// the declaration.
    pub fn merge_specifiers(&mut self, decl: NodeIndex, desired: &SpecifierSet) -> Result<ImportOutcome> {
        self.expect_import(decl)?;
        let mut combined: SpecifierSet = desired.clone();
        combined.extend(self.named_specifiers(decl));
        let sorted: Vec<String> = combined.sorted().into_iter().map(str::to_string).collect();
        trace!(decl = decl.0, specifiers = ?sorted, "merged specifiers");
        self.replace_specifiers(decl, sorted.iter().map(String::as_str))
    }

    /// Rewrite the specifiers imported from `old_module` through `mapping`.
    ///
    /// Every named specifier (across all declarations of `old_module`) is
    /// mapped: `Fixed` names replace it, `PerSuite` resolvers are asked once
    /// per suite and all answers are unioned, unmapped names pass through.
    /// The result keeps first-seen order. The first declaration receives the
    /// result (or is removed when it is empty); further declarations of the
    /// same module are folded into it and removed.
    ///
    /// Returns `None` when the file does not import `old_module`.
    pub fn migrate_module_specifiers(
        &mut self,
        old_module: &str,
        mapping: &SpecifierMappings<'_>,
        suites: &[SuiteDescriptor],
    ) -> Result<Option<SpecifierSet>> {
        let declarations = self.find_imports(old_module);
        let Some((&first, rest)) = declarations.split_first() else {
            return Ok(None);
        };

        let mut migrated = SpecifierSet::new();
        for decl in &declarations {
            for name in self.named_specifiers(*decl) {
                match mapping.get(&name) {
                    Some(SpecifierMapping::Fixed(replacement)) => {
                        migrated.insert(replacement.as_str());
                    }
                    Some(SpecifierMapping::PerSuite(resolve)) => {
                        migrated.extend(suites.iter().filter_map(|suite| resolve(&name, suite)));
                    }
                    None => {
                        migrated.insert(name);
                    }
                }
            }
        }

        for &extra in rest {
            self.arena.remove_statement(self.root, extra);
        }
        let outcome = self.replace_specifiers(first, migrated.iter())?;
        debug!(
            module = old_module,
            declarations = declarations.len(),
            specifiers = ?migrated,
            removed = outcome == ImportOutcome::Removed,
            "migrated module specifiers"
        );
        Ok(Some(migrated))
    }

    /// Make sure `module` is imported with at least `names`. Does nothing
    /// when `names` is empty.
    pub fn ensure_import_with_specifiers(
        &mut self,
        module: &str,
        anchor: &str,
        names: &SpecifierSet,
    ) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        let decl = self.find_or_create_import(module, anchor)?;
        self.merge_specifiers(decl, names)?;
        Ok(())
    }

    fn expect_import(&self, decl: NodeIndex) -> Result<()> {
        if self.arena.is_kind(decl, SyntaxKind::ImportDeclaration) {
            Ok(())
        } else {
            Err(MigrationError::InvalidNode {
                index: decl.0,
                expected: SyntaxKind::ImportDeclaration,
            })
        }
    }

    /// Replace every binding of `decl` with un-aliased named specifiers.
    fn replace_specifiers<'n>(
        &mut self,
        decl: NodeIndex,
        names: impl Iterator<Item = &'n str>,
    ) -> Result<ImportOutcome> {
        self.expect_import(decl)?;

        let names: Vec<&str> = names.collect();
        if names.is_empty() {
            self.arena.remove_statement(self.root, decl);
            debug!(decl = decl.0, "removed empty import declaration");
            return Ok(ImportOutcome::Removed);
        }

        // An identical list is left alone so its source text is reused.
        if self.plain_specifier_names(decl).is_some_and(|current| current == names) {
            return Ok(ImportOutcome::Updated(decl));
        }

        let specifiers: Vec<NodeIndex> = names
            .iter()
            .map(|name| factory::import_specifier(self.arena, name))
            .collect();
        self.arena.set_import_specifiers(decl, NodeList::new(specifiers));
        Ok(ImportOutcome::Updated(decl))
    }

    /// Names of `decl`'s bindings when every one is an un-aliased named
    /// specifier.
    fn plain_specifier_names(&self, decl: NodeIndex) -> Option<Vec<&str>> {
        let import = self.arena.get_import_decl_at(decl)?;
        import
            .specifiers
            .nodes
            .iter()
            .map(|&spec| {
                if !self.arena.is_kind(spec, SyntaxKind::ImportSpecifier) {
                    return None;
                }
                let data = self.arena.get(spec).and_then(|n| self.arena.get_specifier(n))?;
                if data.property_name.is_some() {
                    return None;
                }
                self.arena.identifier_text(data.name)
            })
            .collect()
    }
}
