//! A clap command paired with a styled usage template.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Arg, ArgMatches, Command};

use crate::error::{HelpError, Result};
use crate::funcs::TemplateFuncs;
use crate::grammar::{DEFAULT_HELP_TEMPLATE, DEFAULT_USAGE_TEMPLATE};
use crate::render::render_usage;
use crate::topics::TopicRegistry;
use crate::usage::{usage_data, UsageData};

/// Outcome of [`HelpCommand::try_parse_from`].
#[derive(Debug)]
pub enum Parsed {
    /// Arguments parsed normally.
    Matches(ArgMatches),
    /// Help was requested; holds the rendered help or topic text.
    Help(String),
}

/// Owns a clap command tree, its usage template and the template functions
/// that template calls.
///
/// ```rust
/// use clap::Command;
/// use stylish_clap::{HelpCommand, Painter, StyleConfig};
///
/// let mut app = HelpCommand::new(
///     Command::new("app").subcommand(Command::new("run").about("Run it")),
/// );
/// StyleConfig::new()
///     .style_commands(Painter::from_fn(|s| s.to_uppercase()))
///     .apply(&mut app);
///
/// let help = app.render_usage(&[]).unwrap();
/// assert!(help.contains("RUN"));
/// ```
#[derive(Debug)]
pub struct HelpCommand {
    command: Command,
    usage_template: String,
    help_template: String,
    funcs: TemplateFuncs,
    topics: TopicRegistry,
}

impl HelpCommand {
    /// Wraps `command`, building it so global args reach every subcommand.
    pub fn new(mut command: Command) -> Self {
        command.build();
        Self {
            command,
            usage_template: DEFAULT_USAGE_TEMPLATE.to_string(),
            help_template: DEFAULT_HELP_TEMPLATE.to_string(),
            funcs: TemplateFuncs::new(),
            topics: TopicRegistry::new(),
        }
    }

    pub fn with_topics(mut self, topics: TopicRegistry) -> Self {
        self.topics = topics;
        self
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn topics(&self) -> &TopicRegistry {
        &self.topics
    }

    pub fn topics_mut(&mut self) -> &mut TopicRegistry {
        &mut self.topics
    }

    pub fn usage_template(&self) -> &str {
        &self.usage_template
    }

    pub fn set_usage_template(&mut self, template: impl Into<String>) {
        self.usage_template = template.into();
    }

    pub fn help_template(&self) -> &str {
        &self.help_template
    }

    /// Replaces the wrapper rendered around the usage text on help requests.
    /// It sees two variables: `description` and `usage`.
    pub fn set_help_template(&mut self, template: impl Into<String>) {
        self.help_template = template.into();
    }

    pub fn template_funcs(&self) -> &TemplateFuncs {
        &self.funcs
    }

    /// Merges `funcs` into the installed set, replacing same-named entries.
    pub fn add_template_funcs(&mut self, funcs: TemplateFuncs) {
        self.funcs.extend(funcs);
    }

    /// The template context for the subcommand at `path`.
    pub fn usage_data(&self, path: &[&str]) -> Result<UsageData> {
        usage_data(&self.command, path, &self.topics)
    }

    /// Renders the usage text for the subcommand at `path` (`&[]` is the root).
    pub fn render_usage(&self, path: &[&str]) -> Result<String> {
        let data = self.usage_data(path)?;
        render_usage(&self.usage_template, &data, &self.funcs)
    }

    /// Renders the help for `--help` and `help <command>`: the long
    /// description (or the short one if there is none) and the usage.
    pub fn render_help(&self, path: &[&str]) -> Result<String> {
        let data = self.usage_data(path)?;
        let description = if data.long.is_empty() { &data.short } else { &data.long };
        self.render_help_with(path, description)
    }

    /// Renders the help for `-h`: the short description (or the long one if
    /// there is none) and the usage.
    pub fn render_short_help(&self, path: &[&str]) -> Result<String> {
        let data = self.usage_data(path)?;
        let description = if data.short.is_empty() { &data.long } else { &data.short };
        self.render_help_with(path, description)
    }

    fn render_help_with(&self, path: &[&str], description: &str) -> Result<String> {
        let usage = self.render_usage(path)?;
        let ctx = minijinja::context! { description => description, usage => usage };
        render_usage(&self.help_template, &ctx, &self.funcs)
    }

    pub fn render_topic(&self, name: &str) -> Result<String> {
        self.topics
            .get_topic(name)
            .map(|t| t.render())
            .ok_or_else(|| HelpError::UnknownTopic(name.to_string()))
    }

    /// Parses `args`, answering help requests with the styled usage instead
    /// of clap's own help.
    ///
    /// `help <topic>` renders the topic. `--help`, `-h` and `help <command>`
    /// render the help of the deepest subcommand named in `args`; `-h` and a
    /// missing required subcommand get the short description.
    pub fn try_parse_from<I, T>(&self, args: I) -> Result<Parsed>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let strs: Vec<&str> = args.iter().skip(1).filter_map(|a| a.to_str()).collect();
        let words = self.command_words(&strs);

        if let [help, topic, ..] = words.as_slice() {
            if *help == "help"
                && self.command.find_subcommand(topic).is_none()
                && self.topics.get_topic(topic).is_some()
            {
                log::debug!("rendering help topic '{topic}'");
                return self.render_topic(topic).map(Parsed::Help);
            }
        }

        match self.command.clone().try_get_matches_from(&args) {
            Ok(matches) => Ok(Parsed::Matches(matches)),
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                let path = self.help_path(&words);
                let long = err.kind() == ErrorKind::DisplayHelp
                    && (words.first() == Some(&"help") || strs.contains(&"--help"));
                log::debug!("rendering {} help for {:?}", if long { "long" } else { "short" }, path);
                if long {
                    self.render_help(&path).map(Parsed::Help)
                } else {
                    self.render_short_help(&path).map(Parsed::Help)
                }
            }
            Err(err) => Err(HelpError::Clap(err)),
        }
    }

    /// Like [`try_parse_from`](Self::try_parse_from) on the process args, but
    /// prints help and exits on help requests and parse errors.
    pub fn get_matches(&self) -> ArgMatches {
        self.get_matches_from(std::env::args_os())
    }

    pub fn get_matches_from<I, T>(&self, args: I) -> ArgMatches
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.try_parse_from(args) {
            Ok(Parsed::Matches(matches)) => matches,
            Ok(Parsed::Help(text)) => {
                print!("{text}");
                std::process::exit(0);
            }
            Err(HelpError::Clap(err)) => err.exit(),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(2);
            }
        }
    }

    /// The words of `args` that aren't options or option values, up to `--`.
    ///
    /// Options are looked up on the subcommand reached so far, so a value
    /// that looks like a subcommand name (`--config run`) is skipped.
    fn command_words<'s>(&self, args: &[&'s str]) -> Vec<&'s str> {
        let mut words = Vec::new();
        let mut current = &self.command;
        let mut args = args.iter();
        while let Some(&arg) = args.next() {
            if arg == "--" {
                break;
            }
            let needs_value = if let Some(long) = arg.strip_prefix("--") {
                !long.contains('=') && takes_value(current.get_arguments().find(|a| a.get_long() == Some(long)))
            } else if let Some(shorts) = arg.strip_prefix('-').filter(|s| !s.is_empty()) {
                let mut chars = shorts.chars().peekable();
                let mut needs = false;
                while let Some(c) = chars.next() {
                    if takes_value(current.get_arguments().find(|a| a.get_short() == Some(c))) {
                        needs = chars.peek().is_none();
                        break;
                    }
                }
                needs
            } else {
                words.push(arg);
                if let Some(sub) = current.find_subcommand(arg) {
                    current = sub;
                }
                continue;
            };
            if needs_value {
                args.next();
            }
        }
        words
    }

    /// Canonical names of the subcommands named in `words`, outermost first.
    ///
    /// A leading `help` is skipped. Words that aren't subcommands (option
    /// values, positionals) are passed over.
    fn help_path<'a>(&'a self, words: &[&str]) -> Vec<&'a str> {
        let words = match words {
            ["help", rest @ ..] if self.command.find_subcommand("help").is_some() => rest,
            _ => words,
        };

        let mut path = Vec::new();
        let mut current = &self.command;
        for word in words {
            if let Some(sub) = current.find_subcommand(word) {
                path.push(sub.get_name());
                current = sub;
            }
        }
        path
    }
}

fn takes_value(arg: Option<&Arg>) -> bool {
    arg.is_some_and(|a| a.get_action().takes_values())
}
