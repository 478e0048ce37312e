//! Structured parsing of command output.
//!
//! The parser is a collaborator of the analysis core: it turns the raw text
//! of one command into rows of named fields. [`TextFsmParser`] is the
//! built-in implementation, backed by TextFSM templates indexed by
//! platform and abbreviated command pattern.

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;
use textfsm_rust::Template;

use crate::error::ParseError;
use crate::vendor::pattern::compile_command_pattern;

/// One parsed record: field name to value.
pub type Row = IndexMap<String, String>;

/// Turns command output into rows.
pub trait StructuredParser {
    /// Parse the output of `command` captured on a `platform` device.
    fn parse(&self, platform: &str, command: &str, content: &str) -> Result<Vec<Row>, ParseError>;
}

struct TemplateEntry {
    command: String,
    pattern: Regex,
    template: Template,
}

/// TextFSM-backed parser.
///
/// Templates are registered per platform together with the command they
/// parse, written in the abbreviation syntax (`dis[[play]] cpu[[-usage]]`).
/// The first template whose command pattern matches the whole command
/// name is used.
///
/// Field names in the returned rows are lowercased.
#[derive(Default)]
pub struct TextFsmParser {
    platforms: IndexMap<String, Vec<TemplateEntry>>,
}

impl TextFsmParser {
    /// Create a parser with no templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template for a platform command.
    pub fn add_template(
        &mut self,
        platform: impl Into<String>,
        command: &str,
        source: &str,
    ) -> Result<(), ParseError> {
        let template = Template::parse_str(source).map_err(|e| ParseError::Template {
            message: e.to_string(),
        })?;
        let pattern = compile_command_pattern(command).map_err(|e| ParseError::Template {
            message: e.to_string(),
        })?;

        self.platforms
            .entry(platform.into())
            .or_default()
            .push(TemplateEntry {
                command: command.replace("[[", "").replace("]]", ""),
                pattern,
                template,
            });
        Ok(())
    }

    /// Add a template, builder style.
    pub fn with_template(
        mut self,
        platform: impl Into<String>,
        command: &str,
        source: &str,
    ) -> Result<Self, ParseError> {
        self.add_template(platform, command, source)?;
        Ok(self)
    }

    /// Full command text of the template that would parse `command`.
    pub fn template_command(&self, platform: &str, command: &str) -> Option<&str> {
        self.platforms
            .get(platform)?
            .iter()
            .find(|entry| entry.pattern.is_match(command))
            .map(|entry| entry.command.as_str())
    }

    /// List platforms with at least one template.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.platforms.keys().map(String::as_str)
    }
}

impl StructuredParser for TextFsmParser {
    fn parse(&self, platform: &str, command: &str, content: &str) -> Result<Vec<Row>, ParseError> {
        let entries = self
            .platforms
            .get(platform)
            .ok_or_else(|| ParseError::UnsupportedPlatform {
                platform: platform.to_string(),
            })?;

        let entry = entries
            .iter()
            .find(|entry| entry.pattern.is_match(command))
            .ok_or_else(|| ParseError::UnsupportedCommand {
                platform: platform.to_string(),
                command: command.to_string(),
            })?;

        let mut parser = entry.template.parser();
        let records = parser
            .parse_text_to_dicts(content)
            .map_err(|e| ParseError::Parser {
                platform: platform.to_string(),
                command: command.to_string(),
                message: e.to_string(),
            })?;

        if records.is_empty() {
            return Err(ParseError::NoRows {
                platform: platform.to_string(),
                command: command.to_string(),
            });
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let mut row: Row = record
                    .into_iter()
                    .map(|(key, value)| (key.to_lowercase(), value))
                    .collect();
                row.sort_keys();
                row
            })
            .collect())
    }
}

impl fmt::Debug for TextFsmParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (platform, entries) in &self.platforms {
            let commands: Vec<&str> = entries.iter().map(|e| e.command.as_str()).collect();
            map.entry(platform, &commands);
        }
        map.finish()
    }
}
