//! Style configuration for usage templates.
//!
//! [`StyleConfig`] is an immutable value built by chaining `style_*` calls.
//! Each call consumes the config and returns the updated one:
//!
//! ```rust
//! use console::Style;
//! use stylish_clap::{HelpCommand, StyleConfig};
//!
//! let mut cmd = HelpCommand::new(clap::Command::new("app"));
//!
//! StyleConfig::new()
//!     .style_headings(Style::new().bold().underlined())
//!     .style_commands(Style::new().yellow().bold())
//!     .style_exec_name(Style::new().bold())
//!     .style_flags(Style::new().bold())
//!     .apply(&mut cmd);
//! ```
//!
//! Configs can also be read from a YAML style sheet whose keys are region
//! names and whose values use console's dotted style syntax:
//!
//! ```yaml
//! headings: cyan.bold.underlined
//! commands: yellow.bold
//! flags_data_type: italic
//! no_bottom_newline: true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::command::HelpCommand;
use crate::error::Result;
use crate::painter::Painter;
use crate::patch::{patch_template, PatchedTemplate};

/// Optional painters for each decorated region plus two layout toggles.
///
/// A region without a painter is left unstyled.
#[derive(Debug, Clone, Default)]
pub struct StyleConfig {
    pub(crate) headings: Option<Painter>,
    pub(crate) commands: Option<Painter>,
    pub(crate) cmd_short_descr: Option<Painter>,
    pub(crate) exec_name: Option<Painter>,
    pub(crate) flags: Option<Painter>,
    pub(crate) flags_data_type: Option<Painter>,
    pub(crate) flags_descr: Option<Painter>,
    pub(crate) aliases: Option<Painter>,
    pub(crate) example: Option<Painter>,
    pub(crate) no_extra_newlines: bool,
    pub(crate) no_bottom_newline: bool,
}

impl StyleConfig {
    /// A config that styles nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Section headings such as `Usage:` and `Flags:`.
    pub fn style_headings(mut self, style: impl Into<Painter>) -> Self {
        self.headings = Some(style.into());
        self
    }

    /// Subcommand names in the command list.
    pub fn style_commands(mut self, style: impl Into<Painter>) -> Self {
        self.commands = Some(style.into());
        self
    }

    /// Short descriptions next to subcommand names.
    pub fn style_cmd_short_descr(mut self, style: impl Into<Painter>) -> Self {
        self.cmd_short_descr = Some(style.into());
        self
    }

    /// The executable name in the usage line and command path.
    pub fn style_exec_name(mut self, style: impl Into<Painter>) -> Self {
        self.exec_name = Some(style.into());
        self
    }

    /// Flag names (`-f`, `--flag`).
    pub fn style_flags(mut self, style: impl Into<Painter>) -> Self {
        self.flags = Some(style.into());
        self
    }

    /// Flag value types (`string`, `file`).
    pub fn style_flags_data_type(mut self, style: impl Into<Painter>) -> Self {
        self.flags_data_type = Some(style.into());
        self
    }

    /// Flag descriptions.
    pub fn style_flags_descr(mut self, style: impl Into<Painter>) -> Self {
        self.flags_descr = Some(style.into());
        self
    }

    /// The name-and-aliases line.
    pub fn style_aliases(mut self, style: impl Into<Painter>) -> Self {
        self.aliases = Some(style.into());
        self
    }

    /// The example text.
    pub fn style_example(mut self, style: impl Into<Painter>) -> Self {
        self.example = Some(style.into());
        self
    }

    /// Don't insert blank lines around section headings.
    pub fn disable_extra_newlines(mut self) -> Self {
        self.no_extra_newlines = true;
        self
    }

    pub fn enable_extra_newlines(mut self) -> Self {
        self.no_extra_newlines = false;
        self
    }

    /// Don't append a newline at the end of the template.
    pub fn disable_bottom_newline(mut self) -> Self {
        self.no_bottom_newline = true;
        self
    }

    pub fn enable_bottom_newline(mut self) -> Self {
        self.no_bottom_newline = false;
        self
    }

    pub fn extra_newlines(&self) -> bool {
        !self.no_extra_newlines
    }

    pub fn bottom_newline(&self) -> bool {
        !self.no_bottom_newline
    }

    /// Whether no region has a painter.
    pub fn is_unstyled(&self) -> bool {
        [
            &self.headings,
            &self.commands,
            &self.cmd_short_descr,
            &self.exec_name,
            &self.flags,
            &self.flags_data_type,
            &self.flags_descr,
            &self.aliases,
            &self.example,
        ]
        .iter()
        .all(|slot| slot.is_none())
    }

    /// Rewrites `template` for this config.
    pub fn patch(&self, template: &str) -> PatchedTemplate {
        patch_template(template, self)
    }

    /// Patches `cmd`'s current usage template and installs the result.
    pub fn apply(&self, cmd: &mut HelpCommand) {
        let PatchedTemplate { template, funcs } = self.patch(cmd.usage_template());
        cmd.set_usage_template(template);
        cmd.add_template_funcs(funcs);
    }

    /// Builds a config from a YAML style sheet.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let sheet: StyleSheet = serde_yaml::from_str(source)?;
        sheet.into_config()
    }

    /// Reads a YAML style sheet from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&source)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StyleSheet {
    headings: Option<String>,
    commands: Option<String>,
    cmd_short_descr: Option<String>,
    exec_name: Option<String>,
    flags: Option<String>,
    flags_data_type: Option<String>,
    flags_descr: Option<String>,
    aliases: Option<String>,
    example: Option<String>,
    no_extra_newlines: bool,
    no_bottom_newline: bool,
}

impl StyleSheet {
    fn into_config(self) -> Result<StyleConfig> {
        let painter = |spec: Option<String>| spec.as_deref().map(Painter::from_dotted).transpose();
        Ok(StyleConfig {
            headings: painter(self.headings)?,
            commands: painter(self.commands)?,
            cmd_short_descr: painter(self.cmd_short_descr)?,
            exec_name: painter(self.exec_name)?,
            flags: painter(self.flags)?,
            flags_data_type: painter(self.flags_data_type)?,
            flags_descr: painter(self.flags_descr)?,
            aliases: painter(self.aliases)?,
            example: painter(self.example)?,
            no_extra_newlines: self.no_extra_newlines,
            no_bottom_newline: self.no_bottom_newline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HelpError;
    use std::io::Write;

    #[test]
    fn test_new_is_unstyled() {
        let cfg = StyleConfig::new();
        assert!(cfg.is_unstyled());
        assert!(cfg.extra_newlines());
        assert!(cfg.bottom_newline());
    }

    #[test]
    fn test_builder_sets_slots() {
        let cfg = StyleConfig::new()
            .style_headings(Painter::identity())
            .style_flags_descr(Painter::identity());
        assert!(!cfg.is_unstyled());
        assert!(cfg.headings.is_some());
        assert!(cfg.flags_descr.is_some());
        assert!(cfg.commands.is_none());
    }

    #[test]
    fn test_newline_toggles_are_independent() {
        let cfg = StyleConfig::new().disable_bottom_newline();
        assert!(cfg.extra_newlines());
        assert!(!cfg.bottom_newline());

        let cfg = StyleConfig::new().disable_extra_newlines();
        assert!(!cfg.extra_newlines());
        assert!(cfg.bottom_newline());

        let cfg = cfg.enable_extra_newlines().disable_bottom_newline().enable_bottom_newline();
        assert!(cfg.extra_newlines());
        assert!(cfg.bottom_newline());
    }

    #[test]
    fn test_from_yaml() {
        let cfg = StyleConfig::from_yaml(
            "headings: cyan.bold.underlined\nflags: bold\nno_bottom_newline: true\n",
        )
        .unwrap();
        assert!(cfg.headings.is_some());
        assert!(cfg.flags.is_some());
        assert!(cfg.example.is_none());
        assert!(cfg.extra_newlines());
        assert!(!cfg.bottom_newline());
    }

    #[test]
    fn test_from_yaml_unknown_key() {
        let err = StyleConfig::from_yaml("heading: bold\n").unwrap_err();
        assert!(matches!(err, HelpError::StyleSheet(_)));
    }

    #[test]
    fn test_from_yaml_bad_style() {
        let err = StyleConfig::from_yaml("commands: yellow.loud\n").unwrap_err();
        assert!(matches!(err, HelpError::InvalidStyle { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "example: italic").unwrap();
        writeln!(file, "no_extra_newlines: true").unwrap();

        let cfg = StyleConfig::load(file.path()).unwrap();
        assert!(cfg.example.is_some());
        assert!(!cfg.extra_newlines());
    }

    #[test]
    fn test_load_missing_file() {
        let err = StyleConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, HelpError::Io(_)));
    }
}
