//! CPU usage must stay below the usage threshold.

use super::USAGE_THRESHOLD;
use crate::analysis::context::number;
use crate::analysis::{AnalysisFunctionInfo, Context, PluginRegistry, ResultSet};
use crate::error::{AnalysisError, RegistryError};

pub const CHECK: &str = "cpu_status";

const DOC: &str = "Warn when the 5-minute CPU usage is above 80%.";

pub fn register(registry: &mut PluginRegistry) -> Result<(), RegistryError> {
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "huawei_vrp", huawei_vrp)
            .with_template("huawei_vrp_display_cpu-usage.textfsm", &["cpu_5_min"])
            .with_doc(DOC),
    )?;
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "cisco_ios", cisco_ios)
            .with_template("cisco_ios_show_processes_cpu.textfsm", &["cpu_5_min"])
            .with_doc(DOC),
    )?;
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "ruijie_os", ruijie_os)
            .with_template("ruijie_os_show_cpu.textfsm", &["cpu_5_min"])
            .with_doc(DOC),
    )?;
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "maipu_mypower", maipu_mypower)
            .with_template("maipu_mypower_show_cpu_monitor.textfsm", &["cpu_5_min"])
            .with_doc(DOC),
    )?;
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "hp_comware", hp_comware)
            .with_template("hp_comware_display_cpu-usage.textfsm", &["cpu_5_min"])
            .with_doc(DOC),
    )
}

fn huawei_vrp(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    check_rows(ctx, "display cpu-usage", result)
}

fn cisco_ios(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    check_rows(ctx, "show processes cpu", result)
}

fn ruijie_os(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    check_rows(ctx, "show cpu", result)
}

fn maipu_mypower(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    check_rows(ctx, "show cpu monitor", result)
}

fn hp_comware(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    check_rows(ctx, "display cpu-usage", result)
}

fn check_rows(ctx: &Context, command: &str, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for row in ctx.rows(command)? {
        let usage = number(row, "cpu_5_min")?;
        if usage > USAGE_THRESHOLD {
            result.add_warning(format!("CPU usage at {usage}%"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Row;

    fn rows(values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .map(|v| [("cpu_5_min".to_string(), v.to_string())].into_iter().collect())
            .collect()
    }

    #[test]
    fn test_high_cpu_warns() {
        let ctx = Context::new("huawei_vrp").with_rows("display cpu-usage", rows(&["91"]));
        let mut result = ResultSet::new();
        huawei_vrp(&ctx, &mut result).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "CPU usage at 91%");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let ctx = Context::new("cisco_ios").with_rows("show processes cpu", rows(&["80", "12"]));
        let mut result = ResultSet::new();
        cisco_ios(&ctx, &mut result).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_bad_value_is_error() {
        let ctx = Context::new("ruijie_os").with_rows("show cpu", rows(&["high"]));
        let mut result = ResultSet::new();
        assert!(ruijie_os(&ctx, &mut result).is_err());
    }
}
