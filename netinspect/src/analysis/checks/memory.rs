//! Memory usage must stay below the usage threshold.

use super::USAGE_THRESHOLD;
use crate::analysis::context::number;
use crate::analysis::{AnalysisFunctionInfo, Context, PluginRegistry, ResultSet};
use crate::error::{AnalysisError, RegistryError};

pub const CHECK: &str = "memory_status";

const DOC: &str = "Warn when memory usage is above 80%.";

pub fn register(registry: &mut PluginRegistry) -> Result<(), RegistryError> {
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "huawei_vrp", huawei_vrp)
            .with_template(
                "huawei_vrp_display_memory-usage.textfsm",
                &["MEMORY_USING_PERCENT"],
            )
            .with_doc(DOC),
    )?;
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "cisco_ios", cisco_ios)
            .with_template(
                "cisco_ios_show_processes_memory_sorted.textfsm",
                &["memory_total", "memory_used"],
            )
            .with_template(
                "cisco_ios_show_processes_memory.textfsm",
                &["memory_total", "memory_used"],
            )
            .with_doc(DOC),
    )?;
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "ruijie_os", ruijie_os)
            .with_template(
                "ruijie_os_show_memory.textfsm",
                &["system_memory_used_rate_precent"],
            )
            .with_doc(DOC),
    )?;
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "maipu_mypower", maipu_mypower)
            .with_template("maipu_mypower_show_memory.textfsm", &["used_percent"])
            .with_doc(DOC),
    )?;
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "hp_comware", hp_comware)
            .with_template("hp_comware_display_memory.textfsm", &["used_rate"])
            .with_doc(DOC),
    )
}

fn huawei_vrp(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for row in ctx.rows("display memory-usage")? {
        check_usage(number(row, "MEMORY_USING_PERCENT")?, result);
    }
    Ok(())
}

fn cisco_ios(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for command in ["show processes memory sorted", "show processes memory"] {
        for row in ctx.rows(command)? {
            let total = number(row, "memory_total")?;
            let used = number(row, "memory_used")?;
            if total <= 0.0 {
                return Err(AnalysisError::InvalidValue {
                    field: "memory_total".to_string(),
                    value: total.to_string(),
                });
            }
            check_usage(used / total * 100.0, result);
        }
    }
    Ok(())
}

fn ruijie_os(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for row in ctx.rows("show memory")? {
        check_usage(number(row, "system_memory_used_rate_precent")?, result);
    }
    Ok(())
}

fn maipu_mypower(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for row in ctx.rows("show memory")? {
        check_usage(number(row, "used_percent")?, result);
    }
    Ok(())
}

fn hp_comware(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for row in ctx.rows("display memory")? {
        check_usage(number(row, "used_rate")?, result);
    }
    Ok(())
}

fn check_usage(usage: f64, result: &mut ResultSet) {
    if usage > USAGE_THRESHOLD {
        result.add_warning(format!("Memory usage at {usage:.1}%"));
    }
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
    fn test_cisco_ratio() {
        let ctx = Context::new("cisco_ios")
            .with_rows("show processes memory sorted", vec![])
            .with_rows(
                "show processes memory",
                vec![row(&[("memory_total", "1000"), ("memory_used", "905")])],
            );
        let mut result = ResultSet::new();
        cisco_ios(&ctx, &mut result).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "Memory usage at 90.5%");
    }

    #[test]
    fn test_cisco_zero_total() {
        let ctx = Context::new("cisco_ios")
            .with_rows(
                "show processes memory sorted",
                vec![row(&[("memory_total", "0"), ("memory_used", "0")])],
            )
            .with_rows("show processes memory", vec![]);
        let mut result = ResultSet::new();
        assert!(cisco_ios(&ctx, &mut result).is_err());
    }

    #[test]
    fn test_huawei_normal() {
        let ctx = Context::new("huawei_vrp").with_rows(
            "display memory-usage",
            vec![row(&[("MEMORY_USING_PERCENT", "43%")])],
        );
        let mut result = ResultSet::new();
        huawei_vrp(&ctx, &mut result).unwrap();
        assert!(result.is_empty());
    }
}
