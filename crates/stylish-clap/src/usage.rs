//! Usage data extraction from clap commands.
//!
//! [`UsageData`] is the context the usage template is rendered against. Its
//! field names are the directive vocabulary of the grammar in
//! [`grammar`](crate::grammar).

use clap::{Arg, Command};
use serde::Serialize;

use crate::error::{HelpError, Result};
use crate::topics::TopicRegistry;

/// Minimum width of the command name and command path columns.
pub(crate) const MIN_NAME_PADDING: usize = 11;

/// Spaces between the widest flag column and its description.
const COLUMN_GAP: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct UsageData {
    pub name: String,
    /// The command's `about` text.
    pub short: String,
    /// The command's `long_about` text.
    pub long: String,
    pub command_path: String,
    pub use_line: String,
    pub runnable: bool,
    pub aliases: Vec<String>,
    pub name_and_aliases: String,
    pub example: String,
    pub has_example: bool,
    pub has_available_sub_commands: bool,
    pub commands: Vec<CommandEntry>,
    pub has_available_local_flags: bool,
    pub local_flags: FlagSet,
    pub has_available_inherited_flags: bool,
    pub inherited_flags: FlagSet,
    pub has_help_topics: bool,
    pub help_topics: Vec<CommandEntry>,
}

/// One row of the command or help topic list.
#[derive(Debug, Clone, Serialize)]
pub struct CommandEntry {
    pub name: String,
    pub short: String,
    pub command_path: String,
    pub name_padding: usize,
    pub command_path_padding: usize,
    pub is_available: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FlagSet {
    pub flag_usages: String,
}

/// Resolves `path` below `root` and returns the chain `[root, .., target]`.
///
/// Names are matched the way clap matches them, aliases included.
pub fn resolve_path<'a>(root: &'a Command, path: &[&str]) -> Result<Vec<&'a Command>> {
    let mut chain = vec![root];
    let mut current = root;
    for name in path {
        current = current.find_subcommand(name).ok_or_else(|| {
            let mut full = vec![root.get_name()];
            full.extend_from_slice(path);
            HelpError::UnknownCommand(full.join(" "))
        })?;
        chain.push(current);
    }
    Ok(chain)
}

/// Builds the usage context for the subcommand at `path`.
///
/// `root` should be built (see [`Command::build`]) so that global args and
/// the generated help flag are present on every subcommand.
pub fn usage_data(root: &Command, path: &[&str], topics: &TopicRegistry) -> Result<UsageData> {
    let chain = resolve_path(root, path)?;
    let (target, ancestors) = chain
        .split_last()
        .ok_or_else(|| HelpError::UnknownCommand(root.get_name().to_string()))?;
    let target = *target;

    let command_path = chain
        .iter()
        .map(|c| c.get_name())
        .collect::<Vec<_>>()
        .join(" ");

    let rendered_usage = target.clone().render_usage().to_string();
    let use_line = rendered_usage
        .strip_prefix("Usage: ")
        .unwrap_or(&rendered_usage)
        .to_string();

    let aliases: Vec<String> = target.get_visible_aliases().map(str::to_string).collect();
    let name_and_aliases = std::iter::once(target.get_name().to_string())
        .chain(aliases.iter().cloned())
        .collect::<Vec<_>>()
        .join(", ");

    let example = target
        .get_after_help()
        .map(|s| s.to_string())
        .unwrap_or_default();

    let commands = command_entries(target, &command_path);
    let has_available_sub_commands = commands.iter().any(|c| c.is_available);

    let (inherited, local): (Vec<&Arg>, Vec<&Arg>) = target
        .get_arguments()
        .filter(|a| !a.is_positional() && !a.is_hide_set())
        .partition(|a| is_inherited(a, ancestors));

    let help_topics = if ancestors.is_empty() {
        topic_entries(topics, &command_path)
    } else {
        Vec::new()
    };

    Ok(UsageData {
        name: target.get_name().to_string(),
        short: target.get_about().map(|s| s.to_string()).unwrap_or_default(),
        long: target
            .get_long_about()
            .map(|s| s.to_string())
            .unwrap_or_default(),
        runnable: !target.is_subcommand_required_set(),
        use_line,
        aliases,
        name_and_aliases,
        has_example: !example.is_empty(),
        example,
        has_available_sub_commands,
        commands,
        has_available_local_flags: !local.is_empty(),
        local_flags: FlagSet {
            flag_usages: flag_usages(&local),
        },
        has_available_inherited_flags: !inherited.is_empty(),
        inherited_flags: FlagSet {
            flag_usages: flag_usages(&inherited),
        },
        has_help_topics: !help_topics.is_empty(),
        help_topics,
        command_path,
    })
}

fn command_entries(target: &Command, parent_path: &str) -> Vec<CommandEntry> {
    let mut subs: Vec<&Command> = target.get_subcommands().collect();
    subs.sort_by_key(|s| s.get_display_order());

    let paths: Vec<String> = subs
        .iter()
        .map(|s| format!("{} {}", parent_path, s.get_name()))
        .collect();

    let visible = || subs.iter().zip(&paths).filter(|(s, _)| !s.is_hide_set());
    let name_padding = visible()
        .map(|(s, _)| s.get_name().chars().count())
        .fold(MIN_NAME_PADDING, usize::max);
    let command_path_padding = visible()
        .map(|(_, p)| p.chars().count())
        .fold(MIN_NAME_PADDING, usize::max);

    subs.iter()
        .zip(paths)
        .map(|(sub, command_path)| CommandEntry {
            name: sub.get_name().to_string(),
            short: sub.get_about().map(|s| s.to_string()).unwrap_or_default(),
            command_path,
            name_padding,
            command_path_padding,
            is_available: !sub.is_hide_set(),
        })
        .collect()
}

fn topic_entries(topics: &TopicRegistry, root_path: &str) -> Vec<CommandEntry> {
    let listed = topics.list_topics();
    let paths: Vec<String> = listed
        .iter()
        .map(|t| format!("{} {}", root_path, t.name))
        .collect();
    let name_padding = listed
        .iter()
        .map(|t| t.name.chars().count())
        .fold(MIN_NAME_PADDING, usize::max);
    let command_path_padding = paths
        .iter()
        .map(|p| p.chars().count())
        .fold(MIN_NAME_PADDING, usize::max);

    listed
        .iter()
        .zip(paths)
        .map(|(topic, command_path)| CommandEntry {
            name: topic.name.clone(),
            short: topic.title.clone(),
            command_path,
            name_padding,
            command_path_padding,
            is_available: true,
        })
        .collect()
}

/// A global arg is inherited when an ancestor declares it global.
fn is_inherited(arg: &Arg, ancestors: &[&Command]) -> bool {
    arg.is_global_set()
        && ancestors.iter().any(|cmd| {
            cmd.get_arguments()
                .any(|a| a.get_id() == arg.get_id() && a.is_global_set())
        })
}

/// Renders flags one per line with the description column aligned:
///
/// ```text
///   -f, --flag string   some flag
///       --verbose       be loud
/// ```
///
/// Flags are sorted by long name, falling back to the short name. Every line
/// ends in `\n`. Continuation lines of multi-line help are indented to the
/// description column.
pub fn flag_usages(args: &[&Arg]) -> String {
    let mut sorted = args.to_vec();
    sorted.sort_by_cached_key(|arg| sort_key(arg));
    let rows: Vec<(String, String)> = sorted.iter().map(|arg| flag_row(arg)).collect();
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);
    let indent = format!("\n{}", " ".repeat(width + COLUMN_GAP));

    let mut out = String::new();
    for (left, usage) in rows {
        let pad = width - left.chars().count();
        out.push_str(&left);
        out.push_str(&" ".repeat(pad + COLUMN_GAP));
        out.push_str(&usage.replace('\n', &indent));
        out.push('\n');
    }
    out
}

fn sort_key(arg: &Arg) -> String {
    match (arg.get_long(), arg.get_short()) {
        (Some(long), _) => long.to_string(),
        (None, Some(short)) => short.to_string(),
        (None, None) => arg.get_id().to_string(),
    }
}

fn flag_row(arg: &Arg) -> (String, String) {
    let mut left = match (arg.get_short(), arg.get_long()) {
        (Some(short), Some(long)) => format!("  -{short}, --{long}"),
        (Some(short), None) => format!("  -{short}"),
        (None, Some(long)) => format!("      --{long}"),
        (None, None) => format!("      --{}", arg.get_id()),
    };
    if let Some(ty) = value_type(arg) {
        left.push(' ');
        left.push_str(&ty);
    }

    let mut usage = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
    if let Some(default) = default_value(arg) {
        usage.push_str(&format!(" (default {default})"));
    }
    (left, usage)
}

/// The value placeholder shown after the flag names, if the flag takes one.
fn value_type(arg: &Arg) -> Option<String> {
    if !arg.get_action().takes_values() {
        return None;
    }
    let ty = arg
        .get_value_names()
        .and_then(|names| names.first())
        .map(|name| name.to_string().to_lowercase())
        .unwrap_or_else(|| "string".to_string());
    Some(ty)
}

fn default_value(arg: &Arg) -> Option<String> {
    if !arg.get_action().takes_values() {
        return None;
    }
    let values: Vec<String> = arg
        .get_default_values()
        .iter()
        .map(|v| v.to_string_lossy().into_owned())
        .collect();
    match values.as_slice() {
        [] => None,
        [single] => Some(format!("\"{single}\"")),
        many => Some(format!("[{}]", many.join(","))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::Topic;
    use clap::ArgAction;

    fn app() -> Command {
        let mut cmd = Command::new("app")
            .about("An app")
            .visible_alias("application")
            .after_help("app run --fast")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("config file")
                    .global(true),
            )
            .arg(
                Arg::new("verbose")
                    .long("verbose")
                    .action(ArgAction::SetTrue)
                    .help("be loud"),
            )
            .subcommand(
                Command::new("run")
                    .about("Run things")
                    .arg(Arg::new("fast").long("fast").action(ArgAction::SetTrue)),
            )
            .subcommand(Command::new("secret").hide(true));
        cmd.build();
        cmd
    }

    #[test]
    fn test_root_usage_data() {
        let data = usage_data(&app(), &[], &TopicRegistry::new()).unwrap();
        assert_eq!(data.name, "app");
        assert_eq!(data.short, "An app");
        assert_eq!(data.long, "");
        assert_eq!(data.command_path, "app");
        assert!(data.runnable);
        assert!(data.use_line.starts_with("app"));
        assert_eq!(data.aliases, vec!["application"]);
        assert_eq!(data.name_and_aliases, "app, application");
        assert_eq!(data.example, "app run --fast");
        assert!(data.has_example);
        assert!(data.has_available_sub_commands);
        assert!(data.has_available_local_flags);
        assert!(!data.has_available_inherited_flags);
        assert!(!data.has_help_topics);
    }

    #[test]
    fn test_command_entries() {
        let data = usage_data(&app(), &[], &TopicRegistry::new()).unwrap();
        let run = data.commands.iter().find(|c| c.name == "run").unwrap();
        assert_eq!(run.short, "Run things");
        assert_eq!(run.command_path, "app run");
        assert_eq!(run.name_padding, MIN_NAME_PADDING);
        assert!(run.is_available);

        let secret = data.commands.iter().find(|c| c.name == "secret").unwrap();
        assert!(!secret.is_available);
    }

    #[test]
    fn test_subcommand_inherits_global_flags() {
        let data = usage_data(&app(), &["run"], &TopicRegistry::new()).unwrap();
        assert_eq!(data.command_path, "app run");
        assert!(data.has_available_inherited_flags);
        assert!(data.inherited_flags.flag_usages.contains("--config file"));
        assert!(data.local_flags.flag_usages.contains("--fast"));
        assert!(!data.local_flags.flag_usages.contains("--config"));
        assert!(!data.has_example);
    }

    #[test]
    fn test_resolve_alias_and_unknown() {
        let cmd = Command::new("app").subcommand(Command::new("run").alias("r"));
        let chain = resolve_path(&cmd, &["r"]).unwrap();
        assert_eq!(chain.last().unwrap().get_name(), "run");

        let err = resolve_path(&cmd, &["nope"]).unwrap_err();
        assert!(err.to_string().contains("app nope"));
    }

    #[test]
    fn test_flag_usages_alignment() {
        let flag = Arg::new("flag")
            .short('f')
            .long("flag")
            .help("some flag");
        let verbose = Arg::new("verbose")
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("be loud");
        let out = flag_usages(&[&flag, &verbose]);
        assert_eq!(
            out,
            "  -f, --flag string   some flag\n      --verbose       be loud\n"
        );
    }

    #[test]
    fn test_flag_usages_sorted_by_name() {
        let zeta = Arg::new("zeta").long("zeta").action(ArgAction::SetTrue);
        let quiet = Arg::new("quiet").short('q').action(ArgAction::SetTrue);
        let alpha = Arg::new("alpha").short('z').long("alpha").action(ArgAction::SetTrue);
        let out = flag_usages(&[&zeta, &quiet, &alpha]);
        let lines: Vec<&str> = out.lines().map(str::trim).collect();
        assert_eq!(lines, vec!["-z, --alpha", "-q", "--zeta"]);
    }

    #[test]
    fn test_long_about_in_usage_data() {
        let cmd = Command::new("app").about("short").long_about("the long story");
        let data = usage_data(&cmd, &[], &TopicRegistry::new()).unwrap();
        assert_eq!(data.short, "short");
        assert_eq!(data.long, "the long story");
    }

    #[test]
    fn test_flag_usages_defaults_and_short_only() {
        let author = Arg::new("author")
            .short('a')
            .long("author")
            .default_value("YOUR NAME")
            .help("author name");
        let quiet = Arg::new("quiet").short('q').action(ArgAction::SetTrue).help("hush");
        let out = flag_usages(&[&author, &quiet]);
        assert_eq!(
            out,
            "  -a, --author string   author name (default \"YOUR NAME\")\n  -q                    hush\n"
        );
    }

    #[test]
    fn test_flag_usages_multiline_help() {
        let arg = Arg::new("mode")
            .long("mode")
            .help("first line\nsecond line");
        let out = flag_usages(&[&arg]);
        assert_eq!(
            out,
            "      --mode string   first line\n                      second line\n"
        );
    }

    #[test]
    fn test_flag_usages_empty() {
        assert_eq!(flag_usages(&[]), "");
    }

    #[test]
    fn test_root_lists_topics() {
        let mut topics = TopicRegistry::new();
        topics
            .add_topic(Topic::new("Configuration Files", "How config works", None))
            .unwrap();
        let data = usage_data(&app(), &[], &topics).unwrap();
        assert!(data.has_help_topics);
        assert_eq!(data.help_topics[0].name, "configuration-files");
        assert_eq!(data.help_topics[0].command_path, "app configuration-files");
        assert_eq!(data.help_topics[0].short, "Configuration Files");
        assert_eq!(
            data.help_topics[0].command_path_padding,
            "app configuration-files".len()
        );

        let data = usage_data(&app(), &["run"], &topics).unwrap();
        assert!(!data.has_help_topics);
    }
}
