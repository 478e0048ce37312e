//! A batch of devices inspected together.

use std::fmt;

use log::{debug, info};

use crate::analysis::PluginRegistry;
use crate::config::InspectOptions;
use crate::device::{Device, DeviceInfo, ParseSummary};
use crate::error::RegistryError;
use crate::parse::StructuredParser;
use crate::vendor::VendorRegistry;

/// Devices plus the registries and parser used to inspect them.
///
/// ```rust
/// use netinspect::{Cluster, DeviceInfo, TextFsmParser};
///
/// let mut cluster = Cluster::with_builtins(Box::new(TextFsmParser::new())).unwrap();
/// cluster.add_device(
///     DeviceInfo::new("core-1"),
///     [("dis ver", "Huawei Versatile Routing Platform Software")],
/// );
/// cluster.run();
///
/// assert_eq!(cluster.search("core")[0].platform(), "huawei_vrp");
/// ```
pub struct Cluster {
    vendors: VendorRegistry,
    checks: PluginRegistry,
    parser: Box<dyn StructuredParser>,
    options: InspectOptions,
    devices: Vec<Device>,
}

impl Cluster {
    /// Create a cluster from explicit registries.
    pub fn new(
        vendors: VendorRegistry,
        checks: PluginRegistry,
        parser: Box<dyn StructuredParser>,
    ) -> Self {
        Self {
            vendors,
            checks,
            parser,
            options: InspectOptions::default(),
            devices: Vec::new(),
        }
    }

    /// Create a cluster with the built-in vendors and checks.
    pub fn with_builtins(parser: Box<dyn StructuredParser>) -> Result<Self, RegistryError> {
        Ok(Self::new(
            VendorRegistry::with_builtin_vendors()?,
            PluginRegistry::with_builtin_checks()?,
            parser,
        ))
    }

    /// Set the inspection options.
    pub fn with_options(mut self, options: InspectOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a device from captured `(command, output)` pairs and detect its
    /// vendor.
    pub fn add_device<I, K, V>(&mut self, info: DeviceInfo, commands: I) -> &mut Device
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut device = Device::new(info, commands);
        device.detect_vendor(&self.vendors);
        self.devices.push(device);
        let last = self.devices.len() - 1;
        &mut self.devices[last]
    }

    /// Parse every device, returning one summary per device in order.
    pub fn parse(&mut self) -> Vec<ParseSummary> {
        self.devices
            .iter_mut()
            .map(|device| {
                let summary = device.parse(self.parser.as_ref(), &self.options);
                debug!("{}: {:?}", device.name(), summary);
                summary
            })
            .collect()
    }

    /// Derive base info for every device.
    pub fn collect_base_info(&mut self) {
        for device in &mut self.devices {
            device.collect_base_info();
        }
    }

    /// Run the checks on every device.
    pub fn analyze(&mut self) {
        for device in &mut self.devices {
            device.analyze(&self.checks);
        }
    }

    /// Parse, collect base info and analyse, in that order.
    pub fn run(&mut self) -> Vec<ParseSummary> {
        let summaries = self.parse();
        self.collect_base_info();
        self.analyze();

        let warnings = self
            .devices
            .iter()
            .filter(|device| device.analysis_result().includes_warning())
            .count();
        info!(
            "inspected {} devices, {} with warnings",
            self.devices.len(),
            warnings
        );
        summaries
    }

    /// Devices whose name contains `name`, ignoring case.
    pub fn search(&self, name: &str) -> Vec<&Device> {
        let needle = name.to_lowercase();
        self.devices
            .iter()
            .filter(|device| device.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn vendors(&self) -> &VendorRegistry {
        &self.vendors
    }

    pub fn checks(&self) -> &PluginRegistry {
        &self.checks
    }

    /// Mutable access to the check registry, e.g. to restrict the checks
    /// that run.
    pub fn checks_mut(&mut self) -> &mut PluginRegistry {
        &mut self.checks
    }

    pub fn options(&self) -> &InspectOptions {
        &self.options
    }
}

impl fmt::Debug for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cluster")
            .field("vendors", &self.vendors)
            .field("checks", &self.checks.len())
            .field("options", &self.options)
            .field("devices", &self.devices.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Severity;
    use crate::error::ParseError;
    use crate::parse::Row;

    /// Parses `key=value` lines into a single row.
    struct KeyValueParser;

    impl StructuredParser for KeyValueParser {
        fn parse(&self, _: &str, _: &str, content: &str) -> Result<Vec<Row>, ParseError> {
            let row: Row = content
                .lines()
                .filter_map(|line| line.split_once('='))
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .collect();
            Ok(vec![row])
        }
    }

    fn cluster() -> Cluster {
        let mut cluster = Cluster::with_builtins(Box::new(KeyValueParser)).unwrap();
        cluster.add_device(
            DeviceInfo::new("Core-SW-01"),
            [
                ("display version", "Huawei Versatile Routing Platform Software\nmodel=S12708"),
                ("display cpu-usage", "cpu_5_min=93"),
            ],
        );
        cluster.add_device(
            DeviceInfo::new("access-sw-02"),
            [
                ("display version", "H3C Comware Platform Software\nmodel=S5130"),
                ("display cpu-usage", "cpu_5_min=12"),
            ],
        );
        cluster.add_device(DeviceInfo::new("unknown-box"), [("show version", "FooOS 1.0")]);
        cluster
    }

    #[test]
    fn test_add_device_detects_vendor() {
        let cluster = cluster();
        let platforms: Vec<_> = cluster.devices().iter().map(Device::platform).collect();
        assert_eq!(platforms, vec!["huawei_vrp", "hp_comware", "default"]);
    }

    #[test]
    fn test_search() {
        let cluster = cluster();
        assert_eq!(cluster.search("sw").len(), 2);
        assert_eq!(cluster.search("CORE")[0].name(), "Core-SW-01");
        assert!(cluster.search("router").is_empty());
    }

    #[test]
    fn test_run() {
        let mut cluster = cluster();
        let summaries = cluster.run();
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].parsed, 2);

        let core = &cluster.devices()[0];
        assert_eq!(core.base_info().model, "S12708");
        assert_eq!(core.base_info().cpu_usage, "93%");
        let cpu = core.analysis_result().get("cpu_status");
        assert_eq!(cpu.max_severity(), Some(Severity::Warning));

        let access = &cluster.devices()[1];
        let cpu = access.analysis_result().get("cpu status");
        assert_eq!(cpu.len(), 1);
        assert_eq!(cpu[0].severity, Severity::Normal);

        assert!(cluster.devices()[2].analysis_result().is_empty());
    }

    #[test]
    fn test_run_twice_is_stable() {
        let mut cluster = cluster();
        cluster.run();
        let first = cluster.devices()[0].analysis_result().clone();
        cluster.run();
        assert_eq!(cluster.devices()[0].analysis_result(), &first);
    }

    #[test]
    fn test_only_run() {
        let mut cluster = cluster();
        cluster.checks_mut().set_only_run(&["memory_status"]);
        cluster.run();
        assert!(cluster.devices().iter().all(|d| d.analysis_result().is_empty()));
    }
}
