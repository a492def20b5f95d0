//! Styling of rendered flag usage blocks.
//!
//! A flag block is the text clap flags render to, one flag per line:
//!
//! ```text
//!   -f, --flag string   some flag
//!       --verbose       be loud
//! ```
//!
//! Each line is split on runs of two or more whitespace characters. A line
//! with exactly three columns (indent, names and type, description) gets its
//! type and description styled; anything else, such as the continuation
//! line of a multi-line description, keeps only its flag names styled.
//!
//! Replacements are textual: the *first occurrence* of each piece within the
//! line is styled, so a flag name repeated earlier on the same line can be
//! picked up instead.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::painter::Painter;

static FLAG_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"--?\S+").expect("static regex"));
static COLUMN_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("static regex"));
static TYPE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+(\w+)$").expect("static regex"));

/// At most this many flag tokens (short and long form) are styled per line.
const MAX_FLAG_TOKENS: usize = 2;

/// Styles flag names, value types and descriptions in a flag usage block.
#[derive(Debug, Clone, Default)]
pub struct FlagStyler {
    names: Option<Painter>,
    types: Option<Painter>,
    descriptions: Option<Painter>,
}

impl FlagStyler {
    pub fn new(
        names: Option<Painter>,
        types: Option<Painter>,
        descriptions: Option<Painter>,
    ) -> Self {
        Self {
            names,
            types,
            descriptions,
        }
    }

    /// Whether any painter is configured.
    pub fn is_active(&self) -> bool {
        self.names.is_some() || self.types.is_some() || self.descriptions.is_some()
    }

    /// Styles every line of `block` and joins them back with `\n`.
    pub fn style_block(&self, block: &str) -> String {
        block
            .split('\n')
            .map(|line| self.style_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Styles a single flag line.
    pub fn style_line(&self, line: &str) -> String {
        let mut line = line.to_string();

        if let Some(names) = &self.names {
            let tokens: Vec<String> = FLAG_TOKEN
                .find_iter(&line)
                .take(MAX_FLAG_TOKENS)
                .map(|m| m.as_str().to_string())
                .collect();
            for token in tokens {
                line = line.replacen(&token, &names.paint(&token), 1);
            }
        }

        if self.types.is_none() && self.descriptions.is_none() {
            return line;
        }

        let columns: Vec<String> = split_columns(&line)
            .into_iter()
            .map(str::to_string)
            .collect();
        if columns.len() != 3 {
            return line;
        }

        if let Some(descriptions) = &self.descriptions {
            let description = &columns[2];
            if !description.is_empty() {
                line = line.replacen(description.as_str(), &descriptions.paint(description), 1);
            }
        }

        if let Some(types) = &self.types {
            let found: Vec<_> = TYPE_TOKEN.captures_iter(&columns[1]).collect();
            if let [caps] = found.as_slice() {
                if let Some(ty) = caps.get(1) {
                    line = line.replacen(ty.as_str(), &types.paint(ty.as_str()), 1);
                }
            }
        }

        line
    }
}

/// Splits a flag line on runs of two or more whitespace characters.
///
/// The leading indent produces an empty first column, so a well formed line
/// yields `["", names_and_type, description]`.
pub fn split_columns(line: &str) -> Vec<&str> {
    COLUMN_GAP.split(line).collect()
}
