//! A captured command and its parsed rows.

use crate::parse::Row;

/// Collapse runs of whitespace in a command name to single spaces.
pub fn normalize_command(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One command captured from a device.
///
/// Holds the raw output until the parse step replaces it with rows.
#[derive(Debug, Clone, Default)]
pub struct Command {
    name: String,
    content: String,
    rows: Vec<Row>,
    parsed: bool,
}

impl Command {
    /// Create a command from its name and raw output.
    ///
    /// The name is whitespace-normalised.
    pub fn new(name: impl AsRef<str>, content: impl Into<String>) -> Self {
        Self {
            name: normalize_command(name.as_ref()),
            content: content.into(),
            rows: Vec::new(),
            parsed: false,
        }
    }

    /// The normalised command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw output, empty once parsed unless the content was kept.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Parsed rows, empty until parsed.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Whether the parse step produced rows for this command.
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Store parsed rows. The raw output is released unless `keep_content`.
    pub fn set_rows(&mut self, rows: Vec<Row>, keep_content: bool) {
        self.rows = rows;
        self.parsed = true;
        if !keep_content {
            self.content = String::new();
        }
    }
}
