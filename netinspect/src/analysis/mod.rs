//! Vendor-specific health checks.
//!
//! A check is a plain function registered for one vendor together with the
//! templates and fields it reads. The dispatcher projects the device's
//! parsed rows onto those declarations, calls the function and merges its
//! findings into the device result set.
//!
//! ```rust
//! use netinspect::analysis::{AnalysisFunctionInfo, Context, PluginRegistry, ResultSet};
//! use netinspect::error::AnalysisError;
//!
//! fn uptime(ctx: &Context, result: &mut ResultSet) -> Result<(), AnalysisError> {
//!     if ctx.base_info("uptime")?.contains("0 day") {
//!         result.add_focus("Device rebooted recently");
//!     }
//!     Ok(())
//! }
//!
//! let mut registry = PluginRegistry::new();
//! registry
//!     .register(
//!         AnalysisFunctionInfo::new("uptime_check", "huawei_vrp", uptime)
//!             .with_base_info(&["uptime"])
//!             .with_doc("Flag devices that restarted within a day."),
//!     )
//!     .unwrap();
//! assert_eq!(registry.filter("Uptime Check", "").len(), 1);
//! ```

pub mod checks;
pub mod context;
mod dispatcher;
mod registry;
mod result;
mod template;

pub use context::Context;
pub use dispatcher::run_all;
pub use registry::{
    AnalysisFunctionInfo, CheckFn, PluginRegistry, TemplateRequirement, short_check_name,
};
pub use result::{Alarm, ResultSet, Severity};
pub use template::{TEMPLATE_SUFFIX, command_from_template, template_file_name, template_for_command};
