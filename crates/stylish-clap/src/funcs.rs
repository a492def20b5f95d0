//! Named template functions referenced by a patched usage template.
//!
//! The patcher doesn't register anything globally. It returns a
//! [`TemplateFuncs`] set alongside the patched template, and the renderer
//! installs that set into the environment it renders with.

use std::collections::BTreeMap;

use minijinja::value::Rest;
use minijinja::{Environment, ErrorKind, Value};

use crate::flags::FlagStyler;
use crate::painter::Painter;

pub const HEADING_STYLE: &str = "HeadingStyle";
pub const COMMAND_STYLE: &str = "CommandStyle";
pub const CMD_SHORT_STYLE: &str = "CmdShortStyle";
pub const EXEC_STYLE: &str = "ExecStyle";
pub const USE_LINE_STYLE: &str = "UseLineStyle";
pub const FLAG_STYLE: &str = "FlagStyle";
pub const ALIAS_STYLE: &str = "AliasStyle";
pub const EXAMPLE_STYLE: &str = "ExampleStyle";
pub const SUM: &str = "sum";

/// A callable a usage template can invoke by name.
#[derive(Debug, Clone)]
pub enum TemplateFunc {
    /// Concatenates its arguments and paints the result.
    Style(Painter),
    /// Paints only the first space-separated token (the executable name).
    UseLine(Painter),
    /// Runs a flag usage block through a [`FlagStyler`].
    FlagBlock(FlagStyler),
    /// Integer addition, for padding arithmetic.
    Sum,
}

impl TemplateFunc {
    /// Calls the function on string input. `Sum` has no string form and
    /// returns the input unchanged.
    pub fn call_str(&self, text: &str) -> String {
        match self {
            TemplateFunc::Style(painter) => painter.paint(text),
            TemplateFunc::UseLine(painter) => style_use_line(text, painter),
            TemplateFunc::FlagBlock(styler) => styler.style_block(text),
            TemplateFunc::Sum => text.to_string(),
        }
    }
}

/// Paints the first space-separated token of a usage line.
pub fn style_use_line(line: &str, painter: &Painter) -> String {
    let mut parts: Vec<String> = line.split(' ').map(str::to_string).collect();
    if let Some(first) = parts.first_mut() {
        *first = painter.paint(first);
    }
    parts.join(" ")
}

/// An explicit name → function map. Inserting an existing name overwrites it.
#[derive(Debug, Clone, Default)]
pub struct TemplateFuncs {
    funcs: BTreeMap<String, TemplateFunc>,
}

impl TemplateFuncs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, func: TemplateFunc) {
        self.funcs.insert(name.into(), func);
    }

    pub fn get(&self, name: &str) -> Option<&TemplateFunc> {
        self.funcs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Merges `other` into `self`; functions in `other` win on name clashes.
    pub fn extend(&mut self, other: TemplateFuncs) {
        self.funcs.extend(other.funcs);
    }

    /// Registers every function on a MiniJinja environment.
    pub fn install(&self, env: &mut Environment<'_>) {
        for (name, func) in &self.funcs {
            match func.clone() {
                TemplateFunc::Style(painter) => {
                    env.add_function(name.clone(), move |args: Rest<Value>| -> String {
                        let text: String = args.iter().map(|v| v.to_string()).collect();
                        painter.paint(&text)
                    });
                }
                TemplateFunc::UseLine(painter) => {
                    env.add_function(name.clone(), move |line: String| -> String {
                        style_use_line(&line, &painter)
                    });
                }
                TemplateFunc::FlagBlock(styler) => {
                    env.add_function(name.clone(), move |block: String| -> String {
                        styler.style_block(&block)
                    });
                }
                TemplateFunc::Sum => {
                    env.add_function(name.clone(), |a: i64, b: i64| {
                        a.checked_add(b).ok_or_else(|| {
                            minijinja::Error::new(ErrorKind::InvalidOperation, "sum overflowed")
                        })
                    });
                }
            }
        }
    }
}
