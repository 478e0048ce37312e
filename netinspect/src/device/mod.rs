//! Devices and the commands captured from them.

mod command;
#[allow(clippy::module_inception)]
mod device;
pub mod index;

pub use command::{Command, normalize_command};
pub use device::{Device, DeviceInfo, ParseSummary};
