//! Runs registered checks against one device.
//!
//! Each check moves through a fixed sequence:
//!
//! ```text
//! Pending ──► Skipped                        (no data, or a declaration error)
//!    │
//!    └─────► Executed ──► Normal injected    (callback added nothing)
//!                  │
//!                  └───► As returned
//!                               │
//!                               ▼
//!                            Merged          (into the device result set)
//! ```
//!
//! Checks run strictly in registration order and never run twice for the
//! same dispatch.

use log::{debug, warn};

use super::context::Context;
use super::registry::{AnalysisFunctionInfo, PluginRegistry};
use super::result::ResultSet;
use super::template::command_from_template;
use crate::device::Device;
use crate::error::AnalysisError;
use crate::parse::Row;

/// What happened to one check.
#[derive(Debug)]
enum CheckOutcome {
    Skipped,
    Executed(ResultSet),
}

/// Run every enabled check registered for the device's vendor and collect
/// their findings in registration order.
///
/// A device whose vendor has no checks yields an empty result set. Checks
/// that fail are logged and contribute nothing; they never stop the
/// remaining checks.
pub fn run_all(device: &Device, registry: &PluginRegistry) -> ResultSet {
    let mut result = ResultSet::new();

    for info in registry.checks_for(device.platform()) {
        match evaluate(info, device) {
            Ok(CheckOutcome::Executed(each)) => result.merge(each),
            Ok(CheckOutcome::Skipped) => {
                debug!(
                    "{}: check '{}' skipped, no data for '{}'",
                    device.name(),
                    info.check,
                    info.platform
                );
            }
            Err(e) => {
                warn!(
                    "{}: check '{}' for '{}' failed: {}",
                    device.name(),
                    info.check,
                    info.platform,
                    e
                );
            }
        }
    }

    result
}

fn evaluate(info: &AnalysisFunctionInfo, device: &Device) -> Result<CheckOutcome, AnalysisError> {
    let context = build_context(info, device)?;
    if !context.has_data() {
        return Ok(CheckOutcome::Skipped);
    }

    let mut each = ResultSet::new();
    (info.callback)(&context, &mut each)?;

    if each.is_empty() {
        each.add_normal("");
    }
    each.tag_untagged(&info.check);
    Ok(CheckOutcome::Executed(each))
}

/// Gather the declared rows and base-info values of one check.
fn build_context(info: &AnalysisFunctionInfo, device: &Device) -> Result<Context, AnalysisError> {
    let vendor = device.vendor();
    let mut context = Context::new(vendor.platform.as_str());

    for requirement in &info.templates {
        let command = command_from_template(&vendor.platform, &requirement.template);

        // Unparsed output that the vendor marks invalid counts as not captured
        let rows: &[Row] = match device.resolve(&command) {
            Some(cmd) if cmd.is_parsed() || vendor.is_valid_output(cmd.content()) => cmd.rows(),
            _ => &[],
        };

        let projected = rows
            .iter()
            .map(|row| project(row, &requirement.fields, &info.check, &requirement.template))
            .collect::<Result<Vec<_>, _>>()?;
        context.insert_rows(&requirement.template, projected);
    }

    let base_info = device.base_info();
    for name in &info.base_info_fields {
        let value = base_info
            .field(name)
            .ok_or_else(|| AnalysisError::BaseInfoFieldMissing {
                check: info.check.clone(),
                field: name.clone(),
            })?;
        context = context.with_base_info(name.as_str(), value);
    }

    Ok(context)
}

/// Keep only the declared fields of a row, keyed as declared.
///
/// Parsers may report field names in a different case than the check
/// declares them, so the lookup falls back to a case-insensitive match.
fn project(row: &Row, fields: &[String], check: &str, template: &str) -> Result<Row, AnalysisError> {
    fields
        .iter()
        .map(|name| {
            let value = row
                .get(name)
                .or_else(|| row.get(&name.to_lowercase()))
                .or_else(|| {
                    row.iter()
                        .find(|(key, _)| key.eq_ignore_ascii_case(name))
                        .map(|(_, value)| value)
                })
                .ok_or_else(|| AnalysisError::FieldMissing {
                    check: check.to_string(),
                    template: template.to_string(),
                    field: name.clone(),
                })?;
            Ok((name.clone(), value.clone()))
        })
        .collect()
}
