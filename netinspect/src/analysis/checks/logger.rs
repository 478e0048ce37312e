//! The log buffer must not hold alarms at warning level or above.

use crate::analysis::context::{field, number};
use crate::analysis::{AnalysisFunctionInfo, Context, PluginRegistry, ResultSet};
use crate::error::{AnalysisError, RegistryError};

pub const CHECK: &str = "logger_summary";

/// Log levels counted by the summary, with their display names.
const LEVELS: [(&str, &str); 5] = [
    ("emerg", "emergency"),
    ("alert", "alert"),
    ("crit", "critical"),
    ("error", "error"),
    ("warn", "warning"),
];

pub fn register(registry: &mut PluginRegistry) -> Result<(), RegistryError> {
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "hp_comware", hp_comware)
            .with_template(
                "hp_comware_display_logbuffer_summary.textfsm",
                &["slot", "emerg", "alert", "crit", "error", "warn"],
            )
            .with_doc("Warn for every log level at warning or above with buffered messages."),
    )
}

fn hp_comware(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for row in ctx.rows("display logbuffer summary")? {
        let slot = field(row, "slot")?;
        for (key, label) in LEVELS {
            let count = number(row, key)?;
            if count > 0.0 {
                result.add_warning(format!("Slot {slot} has {count} {label} log messages"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Row;

    #[test]
    fn test_logbuffer_summary() {
        let row: Row = [
            ("slot", "1"),
            ("emerg", "0"),
            ("alert", "0"),
            ("crit", "2"),
            ("error", "0"),
            ("warn", "15"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let ctx = Context::new("hp_comware").with_rows("display logbuffer summary", vec![row]);
        let mut result = ResultSet::new();
        hp_comware(&ctx, &mut result).unwrap();

        let messages: Vec<_> = result.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Slot 1 has 2 critical log messages",
                "Slot 1 has 15 warning log messages"
            ]
        );
    }
}
