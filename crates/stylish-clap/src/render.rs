//! Usage template rendering.

use minijinja::{Environment, Value};
use serde::Serialize;

use crate::error::Result;
use crate::funcs::TemplateFuncs;

/// Renders a usage template against `data`, with `funcs` installed.
///
/// A template that calls a style function missing from `funcs` fails with
/// [`HelpError::Template`](crate::HelpError::Template).
pub fn render_usage<S: Serialize>(template: &str, data: &S, funcs: &TemplateFuncs) -> Result<String> {
    let env = usage_environment(funcs);
    Ok(env.render_str(template, data)?)
}

/// A MiniJinja environment set up for usage templates.
pub fn usage_environment(funcs: &TemplateFuncs) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    register_builtins(&mut env);
    funcs.install(&mut env);
    env
}

/// Registers the helpers the default usage template relies on.
pub fn register_builtins(env: &mut Environment<'_>) {
    // Left-justifies by char count, escape codes included.
    env.add_function("rpad", |value: Value, width: usize| -> String {
        format!("{:<width$}", value.to_string())
    });

    env.add_filter("trim_trailing_whitespaces", |value: String| -> String {
        value.trim_end().to_string()
    });
}
