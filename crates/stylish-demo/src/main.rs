//! Demo app showing every styled region of a clap usage text.
//!
//! Try:
//!
//! ```text
//! example help
//! example help test
//! example help colors
//! ```
//!
//! Set `RUST_LOG=debug` to see how the usage template gets patched.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::Style;
use stylish_clap::{HelpCommand, StyleConfig, Topic, TopicRegistry};

const EXAMPLES: &str = "There is a simple example of the Examples section.
Just try commands:

example help
example help test";

fn cli() -> Command {
    Command::new("example")
        .about("This is an example of using the stylish-clap library.")
        .long_about(
            "This is just an example of using the stylish-clap library.\n\
             It styles the usage text of a clap command tree.",
        )
        .visible_aliases(["alias1", "alias2", "alias3"])
        .after_help(EXAMPLES)
        .arg(
            Arg::new("flag")
                .short('f')
                .long("flag")
                .help("some flag")
                .global(true),
        )
        .arg(
            Arg::new("author")
                .short('a')
                .long("author")
                .default_value("YOUR NAME")
                .help("author name for copyright attribution")
                .global(true),
        )
        .arg(
            Arg::new("license")
                .short('l')
                .long("license")
                .help("name of license for the project")
                .global(true),
        )
        .arg(
            Arg::new("zzz")
                .long("zzz")
                .value_name("BOOLS")
                .value_parser(value_parser!(bool))
                .value_delimiter(',')
                .action(ArgAction::Append)
                .default_values(["true", "false"])
                .help("usage of bools")
                .global(true),
        )
        .subcommand(
            Command::new("test")
                .about("Add a test command")
                .visible_alias("t")
                .after_help("example test --count 3")
                .arg(
                    Arg::new("count")
                        .short('c')
                        .long("count")
                        .value_name("INT")
                        .value_parser(value_parser!(u32))
                        .default_value("1")
                        .help("how many times to run\nthe test"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("print what would run"),
                ),
        )
}

fn styles() -> StyleConfig {
    StyleConfig::new()
        .style_headings(Style::new().cyan().bold().underlined())
        .style_commands(Style::new().yellow().bold())
        .style_aliases(Style::new().bold().italic())
        .style_cmd_short_descr(Style::new().red().bright())
        .style_example(Style::new().italic())
        .style_exec_name(Style::new().bold())
        .style_flags(Style::new().bold())
        .style_flags_descr(Style::new().red())
        .style_flags_data_type(Style::new().color256(238).italic())
}

fn topics() -> stylish_clap::Result<TopicRegistry> {
    let mut topics = TopicRegistry::new();
    topics.add_topic(Topic::new(
        "Colors",
        "Styles are plain console styles. Set NO_COLOR or pipe the output\n\
         to turn them off.",
        None,
    ))?;
    Ok(topics)
}

fn run(matches: &ArgMatches) {
    let author = matches
        .get_one::<String>("author")
        .map(String::as_str)
        .unwrap_or_default();
    log::debug!("author is '{author}'");

    match matches.subcommand() {
        Some(("test", sub)) => {
            let count = sub.get_one::<u32>("count").copied().unwrap_or(1);
            let verb = if sub.get_flag("dry-run") { "would run" } else { "ran" };
            println!("{verb} the test {count} time(s)");
        }
        _ => println!(
            "No commands given. Run 'example help' for usage help.\n\
             Also try commands:\n\n\
             example help\n\
             example help test"
        ),
    }
}

fn main() {
    env_logger::init();

    let topics = match topics() {
        Ok(topics) => topics,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let mut app = HelpCommand::new(cli()).with_topics(topics);
    styles().apply(&mut app);

    let matches = app.get_matches();
    run(&matches);
}
