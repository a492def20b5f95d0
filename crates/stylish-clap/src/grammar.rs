//! The usage template grammar the patcher understands.
//!
//! [`DEFAULT_USAGE_TEMPLATE`] is the template every [`HelpCommand`](crate::HelpCommand)
//! starts with. The patcher doesn't parse it; it only knows a fixed set of
//! anchors (literal section labels and directive shapes) listed in
//! [`ANCHORS`]. If a template uses a different shape, the affected anchor
//! matches nothing and that region stays unstyled.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bumped whenever the default template or an anchor changes shape.
pub const GRAMMAR_VERSION: u32 = 1;

/// The stock usage template, in minijinja syntax.
pub const DEFAULT_USAGE_TEMPLATE: &str = r#"Usage:{% if runnable %}
  {{ use_line }}{% endif %}{% if has_available_sub_commands %}
  {{ command_path }} [command]{% endif %}{% if aliases %}

Aliases:
  {{ name_and_aliases }}{% endif %}{% if has_example %}

Examples:
{{ example }}{% endif %}{% if has_available_sub_commands %}

Available Commands:{% for cmd in commands %}{% if cmd.is_available %}
  {{ rpad(cmd.name, cmd.name_padding) }} {{ cmd.short }}{% endif %}{% endfor %}{% endif %}{% if has_available_local_flags %}

Flags:
{{ local_flags.flag_usages | trim_trailing_whitespaces }}{% endif %}{% if has_available_inherited_flags %}

Global Flags:
{{ inherited_flags.flag_usages | trim_trailing_whitespaces }}{% endif %}{% if has_help_topics %}

Additional help topics:{% for cmd in help_topics %}
  {{ rpad(cmd.command_path, cmd.command_path_padding) }} {{ cmd.short }}{% endfor %}{% endif %}{% if has_available_sub_commands %}

Use "{{ command_path }} [command] --help" for more information about a command.{% endif %}
"#;

/// The help text shown by `--help` and `help <command>`: the command's
/// description followed by its usage. It is not patched.
pub const DEFAULT_HELP_TEMPLATE: &str = r#"{% if description %}{{ description | trim_trailing_whitespaces }}

{% endif %}{{ usage }}"#;

/// Section labels that are matched as literal text.
///
/// The bare `Flags:` label is not listed: `Global Flags:` contains it, so it
/// is matched as a whole line instead.
pub const SECTION_LABELS: &[&str] = &[
    "Usage:",
    "Aliases:",
    "Examples:",
    "Available Commands:",
    "Global Flags:",
    "Additional help topics:",
];

/// The footer line prefix that gets a blank line above it.
pub const CONTINUATION_PREFIX: &str = "Use \"";

/// Width added to command padding so invisible escape codes don't eat the
/// visible column.
pub const PADDING_COMPENSATION: usize = 12;

/// The region of the usage text an anchor decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Headings,
    Commands,
    CmdShortDescr,
    ExecName,
    Flags,
    Aliases,
    Example,
}

/// How the text matched by an anchor is rewritten.
#[derive(Debug, Clone, Copy)]
pub enum Rewrite {
    /// Regex replacement with `${n}` group references.
    Expand(&'static str),
    /// Wrap a literal label in a `HeadingStyle` call, leaving labels that are
    /// already wrapped untouched.
    WrapHeading,
    /// The pattern captures a loop as `(header)(body)(footer)`. The first
    /// match of `target` inside the body is replaced.
    FirstInBody {
        target: &'static str,
        replacement: &'static str,
    },
}

/// One named substitution point in the grammar.
#[derive(Debug)]
pub struct Anchor {
    pub name: &'static str,
    pub region: Region,
    pub pattern: &'static str,
    pub rewrite: Rewrite,
}

/// A label already wrapped in a `HeadingStyle` call.
pub(crate) const HEADING_DIRECTIVE: &str = r#"\{\{\s*HeadingStyle\s*\(\s*"[^"]*"\s*\)\s*\}\}"#;

/// Matches an existing heading directive first, then any literal label.
///
/// Kept in sync with [`SECTION_LABELS`] by the `test_heading_pattern_covers_labels`
/// test.
const HEADING_LABELS_PATTERN: &str = r#"\{\{\s*HeadingStyle\s*\(\s*"[^"]*"\s*\)\s*\}\}|Usage:|Aliases:|Examples:|Available Commands:|Global Flags:|Additional help topics:"#;

/// Every substitution point, in application order within each region.
pub static ANCHORS: &[Anchor] = &[
    Anchor {
        name: "section-labels",
        region: Region::Headings,
        pattern: HEADING_LABELS_PATTERN,
        rewrite: Rewrite::WrapHeading,
    },
    Anchor {
        name: "flags-label",
        region: Region::Headings,
        pattern: r"(?m)^(\s*)Flags:(\s*)$",
        rewrite: Rewrite::Expand(r#"${1}{{ HeadingStyle("Flags:") }}${2}"#),
    },
    Anchor {
        name: "command-name-column",
        region: Region::Commands,
        pattern: r"(?i)\{\{\s*rpad\s*\(\s*cmd\.name\s*,\s*cmd\.name_padding\s*\)\s*\}\}",
        rewrite: Rewrite::Expand("{{ rpad(CommandStyle(cmd.name), sum(cmd.name_padding, 12)) }}"),
    },
    Anchor {
        name: "command-path-column",
        region: Region::Commands,
        pattern: r"(?i)\{\{\s*rpad\s*\(\s*cmd\.command_path\s*,\s*cmd\.command_path_padding\s*\)\s*\}\}",
        rewrite: Rewrite::Expand(
            "{{ rpad(CommandStyle(cmd.command_path), sum(cmd.command_path_padding, 12)) }}",
        ),
    },
    Anchor {
        name: "command-short",
        region: Region::CmdShortDescr,
        pattern: r"(?is)(\{%-?\s*for\s+cmd\s+in\s+commands\s*-?%\})(.*?)(\{%-?\s*endfor\s*-?%\})",
        rewrite: Rewrite::FirstInBody {
            target: r"(?i)\{\{\s*cmd\.short\s*\}\}",
            replacement: "{{ CmdShortStyle(cmd.short) }}",
        },
    },
    Anchor {
        name: "command-path",
        region: Region::ExecName,
        pattern: r"(?i)\{\{\s*command_path\s*\}\}",
        rewrite: Rewrite::Expand("{{ ExecStyle(command_path) }}"),
    },
    Anchor {
        name: "use-line",
        region: Region::ExecName,
        pattern: r"(?i)\{\{\s*use_line\s*\}\}",
        rewrite: Rewrite::Expand("{{ UseLineStyle(use_line) }}"),
    },
    Anchor {
        name: "flag-usages",
        region: Region::Flags,
        pattern: r"(?i)\{\{\s*((?:inherited|local)_flags\.flag_usages)",
        rewrite: Rewrite::Expand("{{ FlagStyle(${1})"),
    },
    Anchor {
        name: "name-and-aliases",
        region: Region::Aliases,
        pattern: r"(?i)\{\{\s*name_and_aliases\s*\}\}",
        rewrite: Rewrite::Expand("{{ AliasStyle(name_and_aliases) }}"),
    },
    Anchor {
        name: "example",
        region: Region::Example,
        pattern: r"(?i)\{\{\s*example\s*\}\}",
        rewrite: Rewrite::Expand("{{ ExampleStyle(example) }}"),
    },
];

/// An anchor with its patterns compiled.
pub(crate) struct CompiledAnchor {
    pub anchor: &'static Anchor,
    pub regex: Regex,
    /// The compiled `target` of a [`Rewrite::FirstInBody`] anchor.
    pub target: Option<Regex>,
}

fn compile(anchor: &Anchor, pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|e| panic!("anchor '{}' has a bad pattern: {e}", anchor.name))
}

pub(crate) static COMPILED: Lazy<Vec<CompiledAnchor>> = Lazy::new(|| {
    ANCHORS
        .iter()
        .map(|anchor| CompiledAnchor {
            anchor,
            regex: compile(anchor, anchor.pattern),
            target: match anchor.rewrite {
                Rewrite::FirstInBody { target, .. } => Some(compile(anchor, target)),
                _ => None,
            },
        })
        .collect()
});

/// Compiled anchors for one region, in table order.
pub(crate) fn anchors_for(region: Region) -> impl Iterator<Item = &'static CompiledAnchor> {
    COMPILED.iter().filter(move |c| c.anchor.region == region)
}
