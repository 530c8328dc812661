//! Names recognized by the migration.
//!
//! Every name is matched exactly and case-sensitively. The defaults describe
//! the `ember-mocha` `setupComponentTest` convention and its replacement by
//! `setupTest` / `setupRenderingTest` plus `@ember/test-helpers`.

use serde::{Deserialize, Serialize};

pub const LEGACY_MODULE: &str = "ember-mocha";
pub const SETUP_MACRO: &str = "setupComponentTest";
pub const SUITE_KEYWORD: &str = "describe";
pub const TEST_KEYWORD: &str = "it";
pub const HOOK_BEFORE: &str = "before";
pub const HOOK_BEFORE_EACH: &str = "beforeEach";
pub const HOOK_AFTER_EACH: &str = "afterEach";
pub const HOOK_AFTER: &str = "after";
pub const INTEGRATION_FLAG: &str = "integration";
pub const PLAIN_SETUP: &str = "setupTest";
pub const RENDERING_SETUP: &str = "setupRenderingTest";
pub const HELPERS_MODULE: &str = "@ember/test-helpers";
pub const RENDER_HELPERS: [&str; 2] = ["render", "clearRender"];
pub const LEGACY_ELEMENT_PROPERTY: &str = "_element";
pub const ELEMENT_PROPERTY: &str = "element";

/// The full set of names the engine matches and emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MigrationNames {
    /// Module source of the legacy test framework import.
    pub legacy_module: String,
    /// Legacy setup macro invoked at the top of a suite block.
    pub setup_macro: String,
    pub suite_keyword: String,
    pub test_keyword: String,
    pub hook_before: String,
    pub hook_before_each: String,
    pub hook_after_each: String,
    pub hook_after: String,
    /// Option property whose presence selects the rendering convention.
    pub integration_flag: String,
    pub plain_setup: String,
    pub rendering_setup: String,
    /// Module the awaited helpers are imported from.
    pub helpers_module: String,
    /// `this.<name>(...)` calls rewritten to `await <name>(...)`.
    pub render_helpers: Vec<String>,
    pub legacy_element_property: String,
    pub element_property: String,
}

impl Default for MigrationNames {
    fn default() -> Self {
        MigrationNames {
            legacy_module: LEGACY_MODULE.to_string(),
            setup_macro: SETUP_MACRO.to_string(),
            suite_keyword: SUITE_KEYWORD.to_string(),
            test_keyword: TEST_KEYWORD.to_string(),
            hook_before: HOOK_BEFORE.to_string(),
            hook_before_each: HOOK_BEFORE_EACH.to_string(),
            hook_after_each: HOOK_AFTER_EACH.to_string(),
            hook_after: HOOK_AFTER.to_string(),
            integration_flag: INTEGRATION_FLAG.to_string(),
            plain_setup: PLAIN_SETUP.to_string(),
            rendering_setup: RENDERING_SETUP.to_string(),
            helpers_module: HELPERS_MODULE.to_string(),
            render_helpers: RENDER_HELPERS.iter().map(|s| s.to_string()).collect(),
            legacy_element_property: LEGACY_ELEMENT_PROPERTY.to_string(),
            element_property: ELEMENT_PROPERTY.to_string(),
        }
    }
}

impl MigrationNames {
    /// Lifecycle hook names in declaration order: before, beforeEach, afterEach, after.
    pub fn lifecycle_hooks(&self) -> [&str; 4] {
        [
            &self.hook_before,
            &self.hook_before_each,
            &self.hook_after_each,
            &self.hook_after,
        ]
    }

    /// Check if `name` is one of the rewritten render helpers.
    pub fn is_render_helper(&self, name: &str) -> bool {
        self.render_helpers.iter().any(|h| h == name)
    }
}
