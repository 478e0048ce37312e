//! Every fan module must run normally.

use crate::analysis::context::field;
use crate::analysis::{AnalysisFunctionInfo, Context, PluginRegistry, ResultSet};
use crate::error::{AnalysisError, RegistryError};

pub const CHECK: &str = "fan_status";

pub fn register(registry: &mut PluginRegistry) -> Result<(), RegistryError> {
    registry.register(
        AnalysisFunctionInfo::new(CHECK, "hp_comware", hp_comware)
            .with_template("hp_comware_display_fan.textfsm", &["slot", "id", "status"])
            .with_doc("Warn when a fan is not in Normal state."),
    )
}

fn hp_comware(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
    for row in ctx.rows("display fan")? {
        let status = field(row, "status")?;
        if status.eq_ignore_ascii_case("normal") {
            continue;
        }
        let id = field(row, "id")?;
        match field(row, "slot")? {
            "" => result.add_warning(format!("Fan {id} state {status}")),
            slot => result.add_warning(format!("Slot {slot} fan {id} state {status}")),
        }
    }
    Ok(())
}
