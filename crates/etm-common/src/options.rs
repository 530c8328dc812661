//! Printer options.
//!
//! These are formatting preferences handed through to whichever printer
//! serializes the migrated tree. They carry no migration semantics.

use serde::{Deserialize, Deserializer, Serialize};

/// Quote character used for string literals the printer has to regenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub const fn as_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

pub const DEFAULT_WRAP_COLUMN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrinterOptions {
    pub quote: QuoteStyle,
    /// Lists whose single-line form would run past this column are broken one item per line.
    #[serde(deserialize_with = "deserialize_usize_or_string")]
    pub wrap_column: usize,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        PrinterOptions {
            quote: QuoteStyle::Single,
            wrap_column: DEFAULT_WRAP_COLUMN,
        }
    }
}

/// Accept both `"wrapColumn": 100` and `"wrapColumn": "100"`.
fn deserialize_usize_or_string<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum UsizeOrString {
        Number(usize),
        String(String),
    }

    match UsizeOrString::deserialize(deserializer)? {
        UsizeOrString::Number(n) => Ok(n),
        UsizeOrString::String(s) => s.trim().parse::<usize>().map_err(|_| {
            Error::custom(format!(
                "invalid wrap column: '{}'. Expected a non-negative integer",
                s
            ))
        }),
    }
}
