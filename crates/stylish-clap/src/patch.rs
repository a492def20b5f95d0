//! The template patcher.
//!
//! [`patch_template`] rewrites a usage template in a fixed sequence of steps:
//!
//! 1. blank lines around section labels (unless disabled)
//! 2. headings
//! 3. command name / command path columns
//! 4. command short descriptions
//! 5. executable name
//! 6. flag blocks
//! 7. aliases
//! 8. example text
//! 9. trailing newline (unless disabled)
//!
//! Steps 2 to 8 only run when their painter is configured. Every step works
//! on the output of the previous one. A step whose anchor doesn't match the
//! template replaces nothing and is not an error.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::config::StyleConfig;
use crate::flags::FlagStyler;
use crate::funcs::{self, TemplateFunc, TemplateFuncs};
use crate::grammar::{self, Region, Rewrite, CONTINUATION_PREFIX, HEADING_DIRECTIVE, SECTION_LABELS};
use crate::painter::Painter;

static LABELS: Lazy<Regex> = Lazy::new(|| {
    let labels = SECTION_LABELS
        .iter()
        .chain(std::iter::once(&CONTINUATION_PREFIX))
        .map(|label| regex::escape(label));
    let alternation = std::iter::once(HEADING_DIRECTIVE.to_string())
        .chain(labels)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).expect("escaped literals")
});

static FLAGS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)Flags:([ \t]*)$").expect("static regex"));

/// A patched template and the functions it calls.
#[derive(Debug, Clone)]
pub struct PatchedTemplate {
    pub template: String,
    pub funcs: TemplateFuncs,
}

/// Rewrites `template` so each configured region is routed through a style
/// function, and returns the functions to install when rendering.
pub fn patch_template(template: &str, config: &StyleConfig) -> PatchedTemplate {
    let mut tpl = template.to_string();
    let mut funcs = TemplateFuncs::new();

    if config.extra_newlines() {
        tpl = insert_blank_lines(&tpl);
    }

    if let Some(painter) = &config.headings {
        register_style(&mut funcs, funcs::HEADING_STYLE, painter);
        tpl = rewrite_region(tpl, Region::Headings);
    }

    if let Some(painter) = &config.commands {
        register_style(&mut funcs, funcs::COMMAND_STYLE, painter);
        funcs.insert(funcs::SUM, TemplateFunc::Sum);
        tpl = rewrite_region(tpl, Region::Commands);
    }

    if let Some(painter) = &config.cmd_short_descr {
        register_style(&mut funcs, funcs::CMD_SHORT_STYLE, painter);
        tpl = rewrite_region(tpl, Region::CmdShortDescr);
    }

    if let Some(painter) = &config.exec_name {
        register_style(&mut funcs, funcs::EXEC_STYLE, painter);
        funcs.insert(funcs::USE_LINE_STYLE, TemplateFunc::UseLine(painter.clone()));
        tpl = rewrite_region(tpl, Region::ExecName);
    }

    let styler = FlagStyler::new(
        config.flags.clone(),
        config.flags_data_type.clone(),
        config.flags_descr.clone(),
    );
    if styler.is_active() {
        funcs.insert(funcs::FLAG_STYLE, TemplateFunc::FlagBlock(styler));
        tpl = rewrite_region(tpl, Region::Flags);
    }

    if let Some(painter) = &config.aliases {
        register_style(&mut funcs, funcs::ALIAS_STYLE, painter);
        tpl = rewrite_region(tpl, Region::Aliases);
    }

    if let Some(painter) = &config.example {
        register_style(&mut funcs, funcs::EXAMPLE_STYLE, painter);
        tpl = rewrite_region(tpl, Region::Example);
    }

    if config.bottom_newline() {
        tpl.push('\n');
    }

    log::debug!(
        "patched usage template (grammar v{}), {} template function(s)",
        grammar::GRAMMAR_VERSION,
        funcs.len()
    );

    PatchedTemplate {
        template: tpl,
        funcs,
    }
}

fn register_style(funcs: &mut TemplateFuncs, name: &str, painter: &Painter) {
    funcs.insert(name, TemplateFunc::Style(painter.clone()));
}

/// Puts a blank line above every section label and the footer, and below
/// every section label. Labels already wrapped in a heading directive are
/// treated as a whole.
fn insert_blank_lines(tpl: &str) -> String {
    let tpl = LABELS.replace_all(tpl, |caps: &Captures| {
        let label = &caps[0];
        if label == CONTINUATION_PREFIX {
            format!("\n{label}")
        } else {
            format!("\n{label}\n")
        }
    });
    FLAGS_LINE.replace_all(&tpl, "\n${1}Flags:${2}\n").into_owned()
}

/// Applies every anchor of `region` in table order.
fn rewrite_region(mut tpl: String, region: Region) -> String {
    for compiled in grammar::anchors_for(region) {
        let (anchor, regex) = (compiled.anchor, &compiled.regex);
        let mut hits = 0usize;
        let rewritten = match anchor.rewrite {
            Rewrite::Expand(replacement) => regex.replace_all(&tpl, |caps: &Captures| {
                hits += 1;
                let mut out = String::new();
                caps.expand(replacement, &mut out);
                out
            }),
            Rewrite::WrapHeading => regex.replace_all(&tpl, |caps: &Captures| {
                let text = &caps[0];
                if text.starts_with("{{") {
                    text.to_string()
                } else {
                    hits += 1;
                    format!("{{{{ {}(\"{}\") }}}}", funcs::HEADING_STYLE, text)
                }
            }),
            Rewrite::FirstInBody { replacement, .. } => {
                let Some(target) = &compiled.target else {
                    continue;
                };
                regex.replace_all(&tpl, |caps: &Captures| {
                    let body = target.replacen(&caps[2], 1, regex::NoExpand(replacement));
                    if matches!(body, std::borrow::Cow::Owned(_)) {
                        hits += 1;
                    }
                    format!("{}{}{}", &caps[1], body, &caps[3])
                })
            }
        };

        if hits == 0 {
            log::trace!("anchor '{}' matched nothing", anchor.name);
        } else {
            log::debug!("anchor '{}' rewrote {} occurrence(s)", anchor.name, hits);
        }

        tpl = rewritten.into_owned();
    }
    tpl
}
