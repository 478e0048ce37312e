//! Severity levels and the result set checks write into.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::registry::short_check_name;

/// Severity of a finding, in ascending importance.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to report.
    #[default]
    Normal,

    /// Worth a look, not a fault.
    Focus,

    /// A fault the operator should act on.
    Warning,
}

impl Severity {
    /// Lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Focus => "focus",
            Severity::Warning => "warning",
        }
    }

    /// `Focus` or above.
    pub fn is_focus(&self) -> bool {
        *self >= Severity::Focus
    }

    /// Exactly `Warning`.
    pub fn is_warning(&self) -> bool {
        *self == Severity::Warning
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One finding produced by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub severity: Severity,
    pub message: String,

    /// Name of the check that produced the finding. Empty until the
    /// dispatcher tags it.
    pub check: String,
}

impl Alarm {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            check: String::new(),
        }
    }
}

/// Ordered, append-only collection of findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    alarms: Vec<Alarm>,
}

impl ResultSet {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding.
    pub fn push(&mut self, alarm: Alarm) {
        self.alarms.push(alarm);
    }

    /// Append a finding with the given severity.
    pub fn add(&mut self, severity: Severity, message: impl Into<String>) {
        self.push(Alarm::new(severity, message));
    }

    pub fn add_normal(&mut self, message: impl Into<String>) {
        self.add(Severity::Normal, message);
    }

    pub fn add_focus(&mut self, message: impl Into<String>) {
        self.add(Severity::Focus, message);
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.add(Severity::Warning, message);
    }

    /// Append all findings of `other`, preserving order.
    pub fn merge(&mut self, other: ResultSet) {
        self.alarms.extend(other.alarms);
    }

    /// Attribute untagged findings to `check`.
    pub(crate) fn tag_untagged(&mut self, check: &str) {
        for alarm in self.alarms.iter_mut().filter(|a| a.check.is_empty()) {
            alarm.check = check.to_string();
        }
    }

    /// Findings of one check.
    ///
    /// `name` may be the check's exact name or any spelling that differs
    /// only in case, spaces, underscores or the `AnalysisPluginWith`
    /// prefix: `power_status`, `power status`, `PowerStatus` and
    /// `AnalysisPluginWithPowerStatus` all select the same findings.
    pub fn get(&self, name: &str) -> ResultSet {
        let wanted = short_check_name(name);
        ResultSet {
            alarms: self
                .alarms
                .iter()
                .filter(|a| a.check == name || short_check_name(&a.check) == wanted)
                .cloned()
                .collect(),
        }
    }

    /// Highest severity present, `None` when empty.
    pub fn max_severity(&self) -> Option<Severity> {
        self.alarms.iter().map(|a| a.severity).max()
    }

    /// Whether any finding is a warning.
    pub fn includes_warning(&self) -> bool {
        self.alarms.iter().any(|a| a.severity.is_warning())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Alarm> {
        self.alarms.iter()
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }
}

impl Index<usize> for ResultSet {
    type Output = Alarm;

    fn index(&self, index: usize) -> &Alarm {
        &self.alarms[index]
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Alarm;
    type IntoIter = std::slice::Iter<'a, Alarm>;

    fn into_iter(self) -> Self::IntoIter {
        self.alarms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(check: &str, severity: Severity, message: &str) -> Alarm {
        Alarm {
            severity,
            message: message.to_string(),
            check: check.to_string(),
        }
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Normal < Severity::Focus);
        assert!(Severity::Focus < Severity::Warning);
        assert!(Severity::Warning.is_focus());
        assert!(!Severity::Normal.is_focus());
        assert_eq!(Severity::Focus.to_string(), "focus");
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut first = ResultSet::new();
        first.add_focus("a");
        let mut second = ResultSet::new();
        second.add_warning("b");
        second.add_normal("c");

        first.merge(second);
        let messages: Vec<_> = first.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tag_untagged() {
        let mut result = ResultSet::new();
        result.add_warning("untagged");
        result.push(tagged("fan_status", Severity::Focus, "tagged"));
        result.tag_untagged("power_status");

        assert_eq!(result[0].check, "power_status");
        assert_eq!(result[1].check, "fan_status");
    }

    #[test]
    fn test_get_aliases() {
        let mut result = ResultSet::new();
        result.push(tagged("power_status", Severity::Warning, "PSU 1 failed"));
        result.push(tagged("fan_status", Severity::Normal, ""));
        result.push(tagged("power_status", Severity::Normal, ""));

        let expected = result.get("power_status");
        assert_eq!(expected.len(), 2);
        for alias in [
            "power status",
            "AnalysisPluginWithPowerStatus",
            "analysis_plugin_with_power_status",
            "analysispluginwithpowerstatus",
            "PowerStatus",
        ] {
            assert_eq!(result.get(alias), expected, "alias {alias}");
        }
        assert!(result.get("cpu status").is_empty());
    }

    #[test]
    fn test_max_severity() {
        let mut result = ResultSet::new();
        assert_eq!(result.max_severity(), None);
        result.add_normal("");
        result.add_focus("");
        assert_eq!(result.max_severity(), Some(Severity::Focus));
        assert!(!result.includes_warning());
        result.add_warning("");
        assert!(result.includes_warning());
    }

    #[test]
    fn test_serialize() {
        let mut result = ResultSet::new();
        result.push(tagged("cpu_status", Severity::Warning, "CPU usage at 91%"));
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"[{"severity":"warning","message":"CPU usage at 91%","check":"cpu_status"}]"#
        );
    }
}
