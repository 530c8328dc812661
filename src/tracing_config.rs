//! Tracing configuration for hosts running the migration.
//!
//! Supports three output formats controlled by `ETM_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one level per
//!   migration span
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! # Which suites were migrated and why
//! ETM_LOG=debug ETM_LOG_FORMAT=tree etm-host tests/
//!
//! # Per-node matching and rewrites in the engine only
//! ETM_LOG="etm_codemod=trace" etm-host tests/
//! ```
//!
//! The subscriber is only installed when `ETM_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively. Unknown names fall back to
    /// `Text`.
    pub fn parse(value: &str) -> LogFormat {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => LogFormat::Tree,
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    fn from_env() -> LogFormat {
        LogFormat::parse(&std::env::var("ETM_LOG_FORMAT").unwrap_or_default())
    }
}

/// `ETM_LOG` takes precedence over `RUST_LOG`; both use `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    match std::env::var("ETM_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber. Does nothing when neither `ETM_LOG` nor
/// `RUST_LOG` is set, or when a subscriber is already installed.
///
/// Output goes to stderr so it never mixes with printed source on stdout.
pub fn init_tracing() {
    if std::env::var_os("ETM_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };

    if let Err(err) = installed {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_formats() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" text "), LogFormat::Text);
    }

    #[test]
    fn parse_unknown_format_falls_back_to_text() {
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
    }
}
