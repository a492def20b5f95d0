use std::io::Write;

use clap::{Arg, ArgAction, Command};
use stylish_clap::{HelpCommand, HelpError, Painter, Parsed, StyleConfig, Topic, TopicRegistry};

fn tag(name: &'static str) -> Painter {
    Painter::from_fn(move |s| format!("<{name}>{s}</{name}>"))
}

fn app() -> Command {
    Command::new("app")
        .about("Does things")
        .visible_alias("ap")
        .after_help("  app run --fast")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("config file")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("be loud"),
        )
        .subcommand(Command::new("run").about("Run it"))
}

fn all_regions() -> StyleConfig {
    StyleConfig::new()
        .style_headings(tag("h"))
        .style_commands(tag("c"))
        .style_cmd_short_descr(tag("s"))
        .style_exec_name(tag("e"))
        .style_flags(tag("f"))
        .style_flags_data_type(tag("t"))
        .style_flags_descr(tag("d"))
        .style_aliases(tag("a"))
        .style_example(tag("x"))
}

#[test]
fn test_heading_style_end_to_end() {
    let mut cmd = HelpCommand::new(app());
    StyleConfig::new().style_headings(tag("h")).apply(&mut cmd);

    let out = cmd.render_usage(&[]).unwrap();
    assert!(out.starts_with("\n<h>Usage:</h>\n\n  app"), "{out:?}");
    assert!(out.contains("\n<h>Flags:</h>\n\n"), "{out:?}");
    assert!(out.contains("\n<h>Available Commands:</h>\n"), "{out:?}");
    assert!(out.ends_with("about a command.\n\n"), "{out:?}");
}

#[test]
fn test_all_regions_styled() {
    let mut cmd = HelpCommand::new(app());
    all_regions().apply(&mut cmd);

    let out = cmd.render_usage(&[]).unwrap();
    assert!(out.contains("<e>app</e> [OPTIONS]"), "{out}");
    assert!(out.contains("<e>app</e> [command]"), "{out}");
    assert!(out.contains("<a>app, ap</a>"), "{out}");
    assert!(out.contains("<x>  app run --fast</x>"), "{out}");
    assert!(out.contains("<c>run</c>"), "{out}");
    assert!(out.contains("<s>Run it</s>"), "{out}");
    assert!(out.contains("<f>--config</f> <t>string</t>"), "{out}");
    assert!(out.contains("<d>config file</d>"), "{out}");
    assert!(out.contains("<f>--verbose</f>"), "{out}");
    assert!(out.contains("Use \"<e>app</e> [command] --help\""), "{out}");
}

#[test]
fn test_styled_command_column_is_widened() {
    let mut cmd = HelpCommand::new(app());
    StyleConfig::new()
        .style_commands(Painter::from_fn(|s| format!("\x1b[1m{s}\x1b[0m")))
        .apply(&mut cmd);

    let out = cmd.render_usage(&[]).unwrap();
    // 11 chars of padding plus 12, minus the 11 chars of the styled name.
    let row = format!("  \x1b[1mrun\x1b[0m{}Run it", " ".repeat(13));
    assert!(out.contains(&row), "{out:?}");
}

#[test]
fn test_global_flags_styled_in_subcommand() {
    let mut cmd = HelpCommand::new(app());
    StyleConfig::new().style_flags(tag("f")).apply(&mut cmd);

    let out = cmd.render_usage(&["run"]).unwrap();
    assert!(out.contains("Global Flags:\n\n  <f>-c,</f> <f>--config</f> string"), "{out}");
}

#[test]
fn test_unstyled_regions_render_plain() {
    let mut cmd = HelpCommand::new(app());
    StyleConfig::new()
        .disable_extra_newlines()
        .disable_bottom_newline()
        .apply(&mut cmd);

    let plain = HelpCommand::new(app()).render_usage(&[]).unwrap();
    assert_eq!(cmd.render_usage(&[]).unwrap(), plain);
    assert!(cmd.template_funcs().is_empty());
}

#[test]
fn test_apply_twice_still_renders() {
    let mut cmd = HelpCommand::new(app());
    all_regions().apply(&mut cmd);
    all_regions().apply(&mut cmd);

    let out = cmd.render_usage(&[]).unwrap();
    assert!(out.contains("<h>Usage:</h>"));
    assert!(!out.contains("<h><h>"), "{out}");
}

#[test]
fn test_later_config_overrides_functions() {
    let mut cmd = HelpCommand::new(app());
    StyleConfig::new().style_headings(tag("h")).apply(&mut cmd);
    StyleConfig::new()
        .disable_extra_newlines()
        .disable_bottom_newline()
        .style_headings(tag("H"))
        .apply(&mut cmd);

    let out = cmd.render_usage(&[]).unwrap();
    assert!(out.contains("<H>Usage:</H>"), "{out}");
}

#[test]
fn test_help_flag_renders_styled_usage() {
    let mut cmd = HelpCommand::new(app());
    StyleConfig::new().style_headings(tag("h")).apply(&mut cmd);

    match cmd.try_parse_from(["app", "run", "-h"]).unwrap() {
        Parsed::Help(text) => {
            assert!(text.contains("<h>Usage:</h>"), "{text}");
            assert!(text.contains("app run"), "{text}");
        }
        Parsed::Matches(_) => panic!("expected help"),
    }
}

#[test]
fn test_long_help_shows_long_about() {
    let mut cmd = HelpCommand::new(app().long_about("Does things.\nMany of them."));
    StyleConfig::new().style_headings(tag("h")).apply(&mut cmd);

    match cmd.try_parse_from(["app", "--help"]).unwrap() {
        Parsed::Help(text) => {
            assert!(text.starts_with("Does things.\nMany of them.\n\n\n<h>Usage:</h>"), "{text:?}")
        }
        Parsed::Matches(_) => panic!("expected help"),
    }
    match cmd.try_parse_from(["app", "-h"]).unwrap() {
        Parsed::Help(text) => assert!(text.starts_with("Does things\n\n\n<h>Usage:</h>"), "{text:?}"),
        Parsed::Matches(_) => panic!("expected help"),
    }
}

#[test]
fn test_help_topic_listed_and_shown() {
    let mut topics = TopicRegistry::new();
    topics
        .add_topic(Topic::new("Output Colors", "Set NO_COLOR to turn colors off.", None))
        .unwrap();
    let mut cmd = HelpCommand::new(app()).with_topics(topics);
    StyleConfig::new().style_commands(tag("c")).apply(&mut cmd);

    let usage = cmd.render_usage(&[]).unwrap();
    assert!(usage.contains("Additional help topics:"), "{usage}");
    assert!(usage.contains("<c>app output-colors</c>"), "{usage}");

    match cmd.try_parse_from(["app", "help", "output-colors"]).unwrap() {
        Parsed::Help(text) => assert_eq!(text, "Output Colors\n\nSet NO_COLOR to turn colors off.\n"),
        Parsed::Matches(_) => panic!("expected topic"),
    }
}

#[test]
fn test_unknown_topic() {
    let cmd = HelpCommand::new(app());
    let err = cmd.render_topic("nothing").unwrap_err();
    assert!(matches!(err, HelpError::UnknownTopic(name) if name == "nothing"));
}

#[test]
fn test_yaml_style_sheet_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "headings: bold").unwrap();
    writeln!(file, "commands: yellow.bold").unwrap();
    writeln!(file, "no_extra_newlines: true").unwrap();

    let mut cmd = HelpCommand::new(app());
    StyleConfig::load(file.path()).unwrap().apply(&mut cmd);

    assert!(cmd.template_funcs().contains("HeadingStyle"));
    assert!(cmd.template_funcs().contains("CommandStyle"));
    assert!(cmd.usage_template().starts_with("{{ HeadingStyle(\"Usage:\") }}"));
    assert!(cmd.render_usage(&[]).is_ok());
}

#[test]
fn test_custom_template_with_unknown_shapes() {
    let mut cmd = HelpCommand::new(app());
    cmd.set_usage_template("{{ name | upper }} Usage:\n");
    StyleConfig::new()
        .disable_extra_newlines()
        .style_headings(tag("h"))
        .style_commands(tag("c"))
        .apply(&mut cmd);

    let out = cmd.render_usage(&[]).unwrap();
    assert_eq!(out, "APP <h>Usage:</h>\n\n");
}
