//! # Stylish Clap - Styled Usage Text for Clap Commands
//!
//! Stylish Clap colors the usage text of a [`clap::Command`] tree without
//! touching how the text is laid out. It works on the usage *template*:
//!
//! - The usage text is rendered from a MiniJinja template
//!   ([`DEFAULT_USAGE_TEMPLATE`]) against data read from the clap command
//! - A [`StyleConfig`] holds one optional painter per region of that text
//! - Applying the config rewrites the template so each configured region goes
//!   through a named style function, and installs those functions
//! - Help topics can be listed next to the commands and shown with `help <topic>`
//!
//! ## Regions
//!
//! | Region | Covers |
//! |---|---|
//! | headings | `Usage:`, `Flags:`, `Available Commands:` and the other section labels |
//! | commands | the name column of the command and help topic lists |
//! | cmd_short_descr | the short description next to each command |
//! | exec_name | the command path and the executable in the use line |
//! | flags, flags_data_type, flags_descr | the three columns of a flag line |
//! | aliases | the name-and-aliases line |
//! | example | the example block |
//!
//! ## Quick Start
//!
//! ```rust
//! use clap::{Arg, Command};
//! use console::Style;
//! use stylish_clap::{HelpCommand, StyleConfig};
//!
//! let mut app = HelpCommand::new(
//!     Command::new("app")
//!         .about("Does things")
//!         .arg(Arg::new("config").short('c').long("config").help("config file"))
//!         .subcommand(Command::new("run").about("Run it")),
//! );
//!
//! StyleConfig::new()
//!     .style_headings(Style::new().cyan().bold().underlined())
//!     .style_commands(Style::new().yellow().bold())
//!     .style_exec_name(Style::new().bold())
//!     .style_flags(Style::new().bold())
//!     .style_flags_data_type(Style::new().italic())
//!     .apply(&mut app);
//!
//! let usage = app.render_usage(&[]).unwrap();
//! assert!(usage.contains("Available Commands:"));
//! ```
//!
//! In a real binary call [`HelpCommand::get_matches`] instead of clap's own:
//! `--help`, `-h` and `help <command>` then print the command's description
//! followed by the styled usage.
//!
//! ## Custom Painters
//!
//! Anything convertible into a [`Painter`] can style a region: a
//! [`console::Style`], a closure, or a dotted style string.
//!
//! ```rust
//! use stylish_clap::Painter;
//!
//! let shout = Painter::from_fn(|s| s.to_uppercase());
//! assert_eq!(shout.paint("run"), "RUN");
//!
//! let bold = Painter::from_dotted("red.bold").unwrap();
//! assert!(Painter::from_dotted("red.sparkly").is_err());
//! # let _ = bold;
//! ```
//!
//! ## Custom Templates
//!
//! [`HelpCommand::set_usage_template`] replaces the stock template. The
//! patcher recognizes the section labels and directive shapes listed in
//! [`grammar::ANCHORS`]; regions written differently are rendered unstyled.

pub mod command;
pub mod config;
pub mod error;
pub mod flags;
pub mod funcs;
pub mod grammar;
pub mod painter;
pub mod patch;
pub mod render;
pub mod topics;
pub mod usage;

// Command and configuration
pub use command::{HelpCommand, Parsed};
pub use config::StyleConfig;

// Errors
pub use error::{HelpError, Result};

// Template patching
pub use flags::{split_columns, FlagStyler};
pub use funcs::{TemplateFunc, TemplateFuncs};
pub use grammar::{DEFAULT_HELP_TEMPLATE, DEFAULT_USAGE_TEMPLATE, GRAMMAR_VERSION};
pub use painter::Painter;
pub use patch::{patch_template, PatchedTemplate};

// Rendering
pub use render::render_usage;
pub use topics::{Topic, TopicRegistry};
pub use usage::{usage_data, UsageData};
