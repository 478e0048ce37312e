//! A device and its captured commands.

use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::command::Command;
use super::index;
use crate::analysis::{self, PluginRegistry, ResultSet};
use crate::base_info::{self, BaseInfo, HealthSummary};
use crate::config::InspectOptions;
use crate::error::ParseError;
use crate::parse::StructuredParser;
use crate::vendor::{VendorDescriptor, VendorRegistry};

/// Identity of a captured device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device name (usually the hostname or capture file stem).
    pub name: String,

    /// Management IP address, empty when unknown.
    #[serde(default)]
    pub ip: String,
}

impl DeviceInfo {
    /// Create device info from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: String::new(),
        }
    }

    /// Set the management IP.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }
}

/// Counters reported by [`Device::parse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    /// Commands that produced rows.
    pub parsed: usize,

    /// Commands skipped because their output was blank or an error echo.
    pub invalid: usize,

    /// Commands the parser has no template for.
    pub unsupported: usize,

    /// Commands the parser failed on or that produced no rows.
    pub failed: usize,

    /// The parser has no templates for the device's platform at all. Only
    /// set under strict mode.
    pub unsupported_platform: bool,
}

/// One device: its captured commands, detected vendor and results.
#[derive(Debug, Clone)]
pub struct Device {
    info: DeviceInfo,
    commands: IndexMap<String, Command>,
    vendor: Arc<VendorDescriptor>,
    base_info: BaseInfo,
    analysis_result: ResultSet,
}

impl Device {
    /// Create a device from captured `(command, output)` pairs.
    ///
    /// Command names are whitespace-normalised; when two captures normalise
    /// to the same name the later output wins. The vendor is unknown until
    /// [`detect_vendor`](Self::detect_vendor) runs.
    pub fn new<I, K, V>(info: DeviceInfo, commands: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut device = Self {
            info,
            commands: IndexMap::new(),
            vendor: Arc::new(VendorDescriptor::unknown()),
            base_info: BaseInfo::default(),
            analysis_result: ResultSet::new(),
        };
        for (name, content) in commands {
            device.insert_command(name, content);
        }
        device
    }

    /// Add or replace a captured command.
    pub fn insert_command(&mut self, name: impl AsRef<str>, content: impl Into<String>) {
        let cmd = Command::new(name, content);
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Device identity.
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Captured commands, in capture order.
    pub fn commands(&self) -> &IndexMap<String, Command> {
        &self.commands
    }

    #[cfg(test)]
    pub(crate) fn commands_mut(&mut self) -> &mut IndexMap<String, Command> {
        &mut self.commands
    }

    /// Get a command by its exact (normalised) name.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(&super::normalize_command(name))
    }

    /// Find the captured command that best matches an approximate name.
    pub fn resolve(&self, query: &str) -> Option<&Command> {
        index::resolve(&self.commands, query)
    }

    /// Rows of the command matching `query`, empty when not captured.
    pub fn rows(&self, query: &str) -> &[crate::parse::Row] {
        self.resolve(query).map(Command::rows).unwrap_or_default()
    }

    /// The detected vendor.
    pub fn vendor(&self) -> &VendorDescriptor {
        &self.vendor
    }

    /// Platform id of the detected vendor.
    pub fn platform(&self) -> &str {
        &self.vendor.platform
    }

    /// Detect the vendor from the captured commands.
    pub fn detect_vendor(&mut self, vendors: &VendorRegistry) -> &VendorDescriptor {
        self.vendor = vendors.detect(&self.commands);
        debug!("{}: vendor '{}'", self.info.name, self.vendor.platform);
        &self.vendor
    }

    /// Set the vendor explicitly.
    pub fn set_vendor(&mut self, vendor: Arc<VendorDescriptor>) {
        self.vendor = vendor;
    }

    /// Parse every captured command with `parser`.
    ///
    /// Blank output and device error echoes are skipped. Parser failures
    /// leave the command without rows; they are not errors for the device.
    ///
    /// When the parser has no templates for the platform, parsing stops.
    /// Under strict mode this is logged as a warning and reported in
    /// [`ParseSummary::unsupported_platform`], and commands without a
    /// template are logged as warnings too.
    pub fn parse(&mut self, parser: &dyn StructuredParser, options: &InspectOptions) -> ParseSummary {
        let mut summary = ParseSummary::default();
        let vendor = Arc::clone(&self.vendor);

        for cmd in self.commands.values_mut() {
            if cmd.is_parsed() {
                continue;
            }
            if !vendor.is_valid_output(cmd.content()) {
                trace!("{}: skipping invalid output of '{}'", self.info.name, cmd.name());
                summary.invalid += 1;
                continue;
            }

            match parser.parse(&vendor.platform, cmd.name(), cmd.content()) {
                Ok(rows) => {
                    cmd.set_rows(rows, options.keep_content);
                    summary.parsed += 1;
                }
                Err(e @ ParseError::UnsupportedPlatform { .. }) => {
                    if options.strict {
                        warn!("{}: {}", self.info.name, e);
                        summary.unsupported_platform = true;
                    } else {
                        debug!("{}: {}", self.info.name, e);
                    }
                    break;
                }
                Err(e @ ParseError::UnsupportedCommand { .. }) => {
                    if options.strict {
                        warn!("{}: {}", self.info.name, e);
                    } else {
                        trace!("{}: {}", self.info.name, e);
                    }
                    summary.unsupported += 1;
                }
                Err(e) => {
                    debug!("{}: {}", self.info.name, e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    /// Derive the base-info record from the parsed commands.
    pub fn collect_base_info(&mut self) -> &BaseInfo {
        self.base_info = base_info::collect(self);
        &self.base_info
    }

    /// The base-info record.
    pub fn base_info(&self) -> &BaseInfo {
        &self.base_info
    }

    /// Run every check registered for this device's vendor.
    ///
    /// Replaces the results of any earlier analysis.
    pub fn analyze(&mut self, registry: &PluginRegistry) -> &ResultSet {
        self.analysis_result = analysis::run_all(self, registry);
        &self.analysis_result
    }

    /// Results of the last analysis.
    pub fn analysis_result(&self) -> &ResultSet {
        &self.analysis_result
    }

    /// Per-item health derived from the analysis results.
    pub fn health(&self) -> HealthSummary {
        HealthSummary::from_results(&self.analysis_result)
    }
}
