//! Error types for stylish-clap.

use thiserror::Error;

/// Errors raised while loading styles, rendering usage text or parsing args.
///
/// Patching a template never fails: anchors that don't match are skipped.
#[derive(Debug, Error)]
pub enum HelpError {
    /// The usage template failed to compile or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// A subcommand path did not resolve against the command tree.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// No help topic is registered under this name.
    #[error("unknown help topic: {0}")]
    UnknownTopic(String),

    /// A help topic with this name is already registered.
    #[error("help topic '{0}' is already registered")]
    DuplicateTopic(String),

    /// A dotted style string contains a token console doesn't understand.
    #[error("invalid style '{spec}': unknown token '{token}'")]
    InvalidStyle { spec: String, token: String },

    /// The style sheet is not valid YAML or has unknown keys.
    #[error("invalid style sheet: {0}")]
    StyleSheet(#[from] serde_yaml::Error),

    /// I/O error while reading a style sheet or topic directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Argument parsing failed.
    #[error(transparent)]
    Clap(#[from] clap::Error),
}

/// Result type for stylish-clap operations.
pub type Result<T> = std::result::Result<T, HelpError>;
