//! # netinspect
//!
//! Health inspection of captured network device output.
//!
//! netinspect takes the raw text of commands captured from routers and
//! switches of several vendors, works out which vendor produced it, parses
//! it into rows and runs vendor-aware health checks over the rows.
//!
//! ## Features
//!
//! - Vendor detection from the version command (Huawei VRP, H3C Comware,
//!   Cisco IOS, Ruijie OS, Maipu MyPower)
//! - Abbreviated command lookup (`dis cpu` finds `display cpu-usage`)
//! - TextFSM parsing via textfsm-rust, or any [`StructuredParser`]
//! - A registry of checks that declare the templates and fields they read
//! - Severity-graded results (`normal`, `focus`, `warning`)
//!
//! ## Quick Start
//!
//! ```rust
//! use netinspect::{Cluster, DeviceInfo, TextFsmParser};
//!
//! const CPU_TEMPLATE: &str = r#"Value CPU_5_MIN (\d+)
//!
//! Start
//!   ^\s*CPU utilization for five minutes:\s*${CPU_5_MIN}% -> Record
//! "#;
//!
//! fn main() -> Result<(), netinspect::Error> {
//!     let parser = TextFsmParser::new().with_template(
//!         "huawei_vrp",
//!         "dis[[play]] cpu[[-usage]]",
//!         CPU_TEMPLATE,
//!     )?;
//!
//!     let mut cluster = Cluster::with_builtins(Box::new(parser))?;
//!     cluster.add_device(
//!         DeviceInfo::new("core-1"),
//!         [
//!             ("dis ver", "Huawei Versatile Routing Platform Software"),
//!             ("dis cpu", "CPU utilization for five minutes: 93%"),
//!         ],
//!     );
//!     cluster.run();
//!
//!     let device = &cluster.devices()[0];
//!     for alarm in device.analysis_result() {
//!         println!("[{}] {} {}", alarm.severity, alarm.check, alarm.message);
//!     }
//!     assert!(device.analysis_result().includes_warning());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod base_info;
pub mod cluster;
pub mod config;
pub mod device;
pub mod error;
pub mod parse;
pub mod vendor;

// Re-export main types for convenience
pub use analysis::{Alarm, AnalysisFunctionInfo, Context, PluginRegistry, ResultSet, Severity};
pub use base_info::{BaseInfo, HealthStatus, HealthSummary};
pub use cluster::Cluster;
pub use config::InspectOptions;
pub use device::{Command, Device, DeviceInfo, ParseSummary};
pub use error::{AnalysisError, Error, ParseError, RegistryError};
pub use parse::{Row, StructuredParser, TextFsmParser};
pub use vendor::{VendorDescriptor, VendorRegistry};
