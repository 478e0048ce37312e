//! Registry of vendor-specific checks.

use std::fmt;

use indexmap::IndexMap;

use super::context::Context;
use super::result::ResultSet;
use super::template::template_file_name;
use crate::error::{AnalysisError, RegistryError};

/// Prefix some callers put in front of check names.
const CHECK_PREFIX: &str = "analysispluginwith";

/// Signature of a check callback.
///
/// The callback reads the rows and base-info values it declared from the
/// [`Context`] and appends findings to the result set. Returning an error
/// discards whatever the callback added.
pub type CheckFn = fn(&Context, &mut ResultSet) -> Result<(), AnalysisError>;

/// Reduce a check name to the form used for loose comparisons.
///
/// Lowercases, drops spaces, underscores and hyphens, and strips the
/// `AnalysisPluginWith` prefix: `AnalysisPluginWithPowerStatus`,
/// `power_status` and `power status` all become `powerstatus`.
pub fn short_check_name(name: &str) -> String {
    let compact: String = name
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect();
    match compact.strip_prefix(CHECK_PREFIX) {
        Some(rest) => rest.to_string(),
        None => compact,
    }
}

/// A template a check reads, and the fields it needs from each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRequirement {
    /// Template file name, always ending in `.textfsm`.
    pub template: String,

    /// Field names, case as declared.
    pub fields: Vec<String>,
}

impl TemplateRequirement {
    pub fn new(template: &str, fields: &[&str]) -> Self {
        Self {
            template: template_file_name(template),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// One check callback for one vendor, with its declared data needs.
#[derive(Clone)]
pub struct AnalysisFunctionInfo {
    /// Check name (e.g., "power_status").
    pub check: String,

    /// Vendor platform id the callback handles.
    pub platform: String,

    pub callback: CheckFn,

    /// Templates read by the callback, in declaration order.
    pub templates: Vec<TemplateRequirement>,

    /// Base-info fields read by the callback.
    pub base_info_fields: Vec<String>,

    /// Human-readable description of what the check asserts.
    pub doc: String,
}

impl AnalysisFunctionInfo {
    /// Create a check with no declared data.
    pub fn new(check: impl Into<String>, platform: impl Into<String>, callback: CheckFn) -> Self {
        Self {
            check: check.into(),
            platform: platform.into(),
            callback,
            templates: Vec::new(),
            base_info_fields: Vec::new(),
            doc: String::new(),
        }
    }

    /// Declare a template and the fields read from its rows.
    pub fn with_template(mut self, template: &str, fields: &[&str]) -> Self {
        self.templates.push(TemplateRequirement::new(template, fields));
        self
    }

    /// Declare base-info fields.
    pub fn with_base_info(mut self, fields: &[&str]) -> Self {
        self.base_info_fields
            .extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Set the description.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    fn matches_check(&self, name: &str) -> bool {
        self.check == name || short_check_name(&self.check) == short_check_name(name)
    }

    fn same_callback(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.callback, other.callback)
    }
}

impl fmt::Debug for AnalysisFunctionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisFunctionInfo")
            .field("check", &self.check)
            .field("platform", &self.platform)
            .field("callback", &"<CheckFn>")
            .field("templates", &self.templates)
            .field("base_info_fields", &self.base_info_fields)
            .field("doc", &self.doc)
            .finish()
    }
}

/// Catalog of checks, built once before analysis starts.
///
/// Checks run in registration order.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    checks: Vec<AnalysisFunctionInfo>,
    only_run: Vec<String>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in checks.
    pub fn with_builtin_checks() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        super::checks::register_builtin(&mut registry)?;
        Ok(registry)
    }

    /// Register a check.
    ///
    /// Registering the same callback twice for one check and vendor is a
    /// conflict. Callbacks are compared by function address, which the
    /// compiler does not guarantee to be unique: two functions with
    /// identical bodies may share an address, and one function may have
    /// several. Give each callback a distinct body.
    pub fn register(&mut self, info: AnalysisFunctionInfo) -> Result<(), RegistryError> {
        let duplicate = self.checks.iter().any(|existing| {
            existing.check == info.check
                && existing.platform == info.platform
                && existing.same_callback(&info)
        });
        if duplicate {
            return Err(RegistryError::Conflict {
                check: info.check,
                platform: info.platform,
            });
        }
        self.checks.push(info);
        Ok(())
    }

    /// Checks matching every non-empty criterion, in registration order.
    ///
    /// `check` matches exactly or loosely (see [`short_check_name`]).
    pub fn filter(&self, check: &str, platform: &str) -> Vec<&AnalysisFunctionInfo> {
        self.checks
            .iter()
            .filter(|info| check.is_empty() || info.matches_check(check))
            .filter(|info| platform.is_empty() || info.platform == platform)
            .collect()
    }

    /// Restrict dispatch to the named checks. An empty list lifts the
    /// restriction.
    pub fn set_only_run(&mut self, checks: &[&str]) {
        self.only_run = checks.iter().map(|c| short_check_name(c)).collect();
    }

    /// Whether dispatch may run `check`.
    pub fn is_enabled(&self, check: &str) -> bool {
        self.only_run.is_empty() || self.only_run.contains(&short_check_name(check))
    }

    /// Checks the dispatcher runs for a platform.
    pub fn checks_for(&self, platform: &str) -> Vec<&AnalysisFunctionInfo> {
        self.checks
            .iter()
            .filter(|info| info.platform == platform && self.is_enabled(&info.check))
            .collect()
    }

    /// Every check name with the platforms it supports, in registration
    /// order.
    pub fn catalog(&self) -> Vec<(String, Vec<String>)> {
        let mut catalog: IndexMap<&str, Vec<String>> = IndexMap::new();
        for info in &self.checks {
            let platforms = catalog.entry(info.check.as_str()).or_default();
            if !platforms.contains(&info.platform) {
                platforms.push(info.platform.clone());
            }
        }
        catalog
            .into_iter()
            .map(|(check, platforms)| (check.to_string(), platforms))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisFunctionInfo> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
