//! The style capability applied to each decorated region.
//!
//! A [`Painter`] turns a piece of text into its styled form. It is opaque to
//! the patcher: ANSI codes via [`console::Style`], markup for tests, or
//! anything else that maps `&str` to `String`.
//!
//! ```rust
//! use stylish_clap::Painter;
//! use console::Style;
//!
//! let bold: Painter = Style::new().bold().force_styling(true).into();
//! assert_eq!(bold.paint("Usage:"), "\u{1b}[1mUsage:\u{1b}[0m");
//!
//! let tagged = Painter::from_fn(|s| format!("<h>{s}</h>"));
//! assert_eq!(tagged.paint("Usage:"), "<h>Usage:</h>");
//! ```

use std::fmt;
use std::sync::Arc;

use console::Style;

use crate::error::{HelpError, Result};

const COLORS: &[&str] = &[
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

const ATTRIBUTES: &[&str] = &[
    "bold",
    "dim",
    "italic",
    "underlined",
    "blink",
    "blink_fast",
    "reverse",
    "hidden",
    "strikethrough",
    "bright",
];

/// A cheap, cloneable `render(text) -> styled text` handle.
#[derive(Clone)]
pub struct Painter(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Painter {
    /// Wraps an arbitrary rendering function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A painter that returns its input unchanged.
    pub fn identity() -> Self {
        Self::from_fn(str::to_string)
    }

    /// Parses console's dotted style syntax, e.g. `cyan.bold.underlined`.
    ///
    /// Unlike [`Style::from_dotted_str`], unknown tokens are rejected rather
    /// than silently dropped.
    pub fn from_dotted(spec: &str) -> Result<Self> {
        for token in spec.split('.').filter(|t| !t.is_empty()) {
            if !is_known_token(token) {
                return Err(HelpError::InvalidStyle {
                    spec: spec.to_string(),
                    token: token.to_string(),
                });
            }
        }
        Ok(Style::from_dotted_str(spec).into())
    }

    /// Renders `text` in this painter's style.
    pub fn paint(&self, text: &str) -> String {
        (self.0)(text)
    }
}

impl From<Style> for Painter {
    fn from(style: Style) -> Self {
        Self::from_fn(move |text| style.apply_to(text).to_string())
    }
}

impl From<&Style> for Painter {
    fn from(style: &Style) -> Self {
        style.clone().into()
    }
}

impl fmt::Debug for Painter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Painter(..)")
    }
}

fn is_known_token(token: &str) -> bool {
    let color = token.strip_prefix("on_").unwrap_or(token);
    COLORS.contains(&color)
        || color == "bright"
        || color.parse::<u8>().is_ok()
        || ATTRIBUTES.contains(&token)
}
