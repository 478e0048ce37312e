//! Inspection options.

use serde::{Deserialize, Serialize};

/// Options for a parse and analysis run.
///
/// Deserialisable so it can be embedded in a caller's own configuration
/// file; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectOptions {
    /// Log unsupported-platform and unsupported-command parser errors as
    /// warnings and flag the platform in the parse summary.
    pub strict: bool,

    /// Keep raw command output after it has been parsed.
    pub keep_content: bool,
}

impl InspectOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Keep raw output after parsing.
    pub fn with_keep_content(mut self, keep_content: bool) -> Self {
        self.keep_content = keep_content;
        self
    }
}
