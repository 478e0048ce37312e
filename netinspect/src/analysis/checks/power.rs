//! Every installed power supply must be healthy.

use crate::analysis::context::field;
use crate::analysis::{AnalysisFunctionInfo, Context, PluginRegistry, ResultSet};
use crate::error::{AnalysisError, RegistryError};

pub const CHECK: &str = "power_status";

pub fn register(registry: &mut PluginRegistry) -> Result<(), RegistryError> {
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "huawei_vrp", huawei_vrp)
            .with_template("huawei_vrp_display_power.textfsm", &["id", "present", "state"])
            .with_doc("Warn when an installed power module is not in Normal or Supply state."),
    )?;
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "cisco_ios", cisco_ios)
            .with_template(
                "cisco_ios_show_power_status.textfsm",
                &["model", "status", "input_status"],
            )
            .with_doc("Warn when a power supply or its input is not good."),
    )
}

fn huawei_vrp(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for row in ctx.rows("display power")? {
        // Empty slots are not a fault
        let present = field(row, "present")?;
        if !(present.starts_with("Yes") || present.starts_with("Present")) {
            continue;
        }
        let state = field(row, "state")?;
        if !(state.starts_with("Normal") || state.starts_with("Supply")) {
            result.add_warning(format!("Power {} state {state}", field(row, "id")?));
        }
    }
    Ok(())
}

fn cisco_ios(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for row in ctx.rows("show power status")? {
        let status = field(row, "status")?;
        let input = field(row, "input_status")?;
        if !status.eq_ignore_ascii_case("good") || !input.eq_ignore_ascii_case("good") {
            result.add_warning(format!(
                "Power {} status {status}, input {input}",
                field(row, "model")?
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Row;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_huawei_power() {
        let ctx = Context::new("huawei_vrp").with_rows(
            "display power",
            vec![
                row(&[("id", "PWR1"), ("present", "Yes"), ("state", "Normal")]),
                row(&[("id", "PWR2"), ("present", "Yes"), ("state", "Abnormal")]),
                row(&[("id", "PWR3"), ("present", "No"), ("state", "Abnormal")]),
                row(&[("id", "PWR4"), ("present", "Present"), ("state", "Supply")]),
            ],
        );
        let mut result = ResultSet::new();
        huawei_vrp(&ctx, &mut result).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "Power PWR2 state Abnormal");
    }

    #[test]
    fn test_cisco_power() {
        let ctx = Context::new("cisco_ios").with_rows(
            "show power status",
            vec![
                row(&[("model", "PWR-C1-350WAC"), ("status", "good"), ("input_status", "good")]),
                row(&[("model", "PWR-C1-715WAC"), ("status", "bad"), ("input_status", "good")]),
            ],
        );
        let mut result = ResultSet::new();
        cisco_ios(&ctx, &mut result).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].message.starts_with("Power PWR-C1-715WAC"));
    }
}
