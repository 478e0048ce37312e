//! Data handed to a check callback.

use indexmap::IndexMap;

use super::template::template_for_command;
use crate::error::AnalysisError;
use crate::parse::Row;

/// The rows and base-info values one check declared, for one device.
///
/// Built fresh by the dispatcher for every callback invocation. Rows only
/// carry the declared fields, keyed with the case used in the
/// declaration.
#[derive(Debug, Clone, Default)]
pub struct Context {
    platform: String,
    templates: IndexMap<String, Vec<Row>>,
    base_info: IndexMap<String, String>,
}

impl Context {
    /// Create an empty context for a platform.
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            templates: IndexMap::new(),
            base_info: IndexMap::new(),
        }
    }

    /// Set the rows of a template.
    pub fn with_rows(mut self, template: &str, rows: Vec<Row>) -> Self {
        self.insert_rows(template, rows);
        self
    }

    /// Set a base-info value.
    pub fn with_base_info(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_info.insert(field.into(), value.into());
        self
    }

    pub(crate) fn insert_rows(&mut self, template: &str, rows: Vec<Row>) {
        let key = template_for_command(&self.platform, template);
        self.templates.insert(key, rows);
    }

    /// Vendor platform id of the device.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Rows of a declared template.
    ///
    /// `name` is either the template file name
    /// (`huawei_vrp_display_version.textfsm`) or the full command it parses
    /// (`display version`). Abbreviated commands are not accepted.
    pub fn rows(&self, name: &str) -> Result<&[Row], AnalysisError> {
        let key = template_for_command(&self.platform, name);
        self.templates
            .get(&key)
            .map(Vec::as_slice)
            .ok_or(AnalysisError::TemplateNotDeclared { template: key })
    }

    /// A declared base-info value.
    pub fn base_info(&self, field: &str) -> Result<&str, AnalysisError> {
        self.base_info
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| AnalysisError::FieldNotDeclared {
                field: field.to_string(),
            })
    }

    /// Whether any template has rows or any base-info value is non-empty.
    pub fn has_data(&self) -> bool {
        self.templates.values().any(|rows| !rows.is_empty())
            || self.base_info.values().any(|value| !value.is_empty())
    }

    /// Declared templates and their rows.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &[Row])> {
        self.templates
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.as_slice()))
    }
}

/// Read a declared field from a row.
pub fn field<'a>(row: &'a Row, name: &str) -> Result<&'a str, AnalysisError> {
    row.get(name)
        .map(String::as_str)
        .ok_or_else(|| AnalysisError::FieldNotDeclared {
            field: name.to_string(),
        })
}

/// Read a declared field as a number. A trailing `%` is ignored.
pub fn number(row: &Row, name: &str) -> Result<f64, AnalysisError> {
    let value = field(row, name)?;
    value
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| AnalysisError::InvalidValue {
            field: name.to_string(),
            value: value.to_string(),
        })
}
