//! Vendor-normalised device summary.
//!
//! [`BaseInfo`] is filled from parsed rows by a collector per vendor. Rows
//! are looked up by approximate command name, so a capture of `dis ver`
//! feeds the `display version` collector.

use log::debug;
use serde::Serialize;

use crate::analysis::ResultSet;
use crate::device::Device;
use crate::parse::Row;

/// Names accepted by [`BaseInfo::field`].
pub const FIELDS: &[&str] = &[
    "hostname",
    "vendor_platform",
    "model",
    "version",
    "uptime",
    "ip",
    "serials",
    "cpu_usage",
    "memory_usage",
];

/// Summary record of one device.
///
/// Empty strings mean the value was not found in the captured output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BaseInfo {
    pub hostname: String,
    pub vendor_platform: String,
    pub model: String,
    pub version: String,
    pub uptime: String,
    pub ip: String,

    /// `(component, serial number)` pairs.
    pub serials: Vec<(String, String)>,

    /// 5-minute CPU usage, with a trailing `%`.
    pub cpu_usage: String,

    /// Memory usage, with a trailing `%`.
    pub memory_usage: String,
}

impl BaseInfo {
    /// Read a field by name. Serial numbers are rendered as
    /// `component:serial` pairs separated by `, `.
    ///
    /// Returns `None` for names not listed in [`FIELDS`].
    pub fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "hostname" => self.hostname.clone(),
            "vendor_platform" => self.vendor_platform.clone(),
            "model" => self.model.clone(),
            "version" => self.version.clone(),
            "uptime" => self.uptime.clone(),
            "ip" => self.ip.clone(),
            "serials" => self
                .serials
                .iter()
                .map(|(component, serial)| format!("{component}:{serial}"))
                .collect::<Vec<_>>()
                .join(", "),
            "cpu_usage" => self.cpu_usage.clone(),
            "memory_usage" => self.memory_usage.clone(),
            _ => return None,
        };
        Some(value)
    }
}

/// Build the base info of a device from its parsed commands.
pub fn collect(device: &Device) -> BaseInfo {
    let mut info = BaseInfo {
        hostname: device.name().to_string(),
        vendor_platform: device.platform().to_string(),
        ip: device.info().ip.clone(),
        ..BaseInfo::default()
    };

    match device.platform() {
        "huawei_vrp" => huawei_vrp(device, &mut info),
        "hp_comware" => hp_comware(device, &mut info),
        "cisco_ios" => cisco_ios(device, &mut info),
        "ruijie_os" => ruijie_os(device, &mut info),
        "maipu_mypower" => maipu_mypower(device, &mut info),
        platform => debug!("{}: no base info collector for '{}'", device.name(), platform),
    }

    info
}

/// Case-insensitive row lookup, empty when absent.
fn value<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name)
        .or_else(|| {
            row.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .map(String::as_str)
        .unwrap_or_default()
}

fn first_value(device: &Device, command: &str, name: &str) -> Option<String> {
    device
        .rows(command)
        .first()
        .map(|row| value(row, name).to_string())
}

fn percent(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!("{}%", v.trim_end_matches('%')),
        _ => String::new(),
    }
}

fn huawei_vrp(device: &Device, info: &mut BaseInfo) {
    for row in device.rows("display version") {
        info.model = value(row, "model").to_string();
        info.version = value(row, "vrp_version").to_string();
        info.uptime = value(row, "uptime").to_string();
    }

    for row in device.rows("display device manufacture-info") {
        info.serials
            .push((value(row, "type").to_string(), value(row, "serial").to_string()));
    }

    // Older releases only report the chassis ESN and board labels
    if info.serials.is_empty() {
        if let Some(esn) = first_value(device, "display esn", "esn") {
            info.serials.push(("chassis".to_string(), esn));
        }
        for row in device.rows("display elabel brief") {
            info.serials
                .push((value(row, "slot").to_string(), value(row, "bar_code").to_string()));
        }
    }

    info.cpu_usage = percent(first_value(device, "display cpu-usage", "cpu_5_min"));
    info.memory_usage = percent(first_value(
        device,
        "display memory-usage",
        "memory_using_percent",
    ));
}

fn hp_comware(device: &Device, info: &mut BaseInfo) {
    for row in device.rows("display version") {
        info.model = value(row, "model").to_string();
        info.version = format!(
            "{} Release: {}",
            value(row, "software_version"),
            value(row, "release")
        );
        info.uptime = value(row, "uptime").to_string();
    }

    for row in device.rows("display device manuinfo") {
        let serial = value(row, "device_serial_number");
        if serial.is_empty() || serial.eq_ignore_ascii_case("none") {
            continue;
        }
        info.serials
            .push((value(row, "device_name").to_string(), serial.to_string()));
    }

    info.cpu_usage = percent(first_value(device, "display cpu-usage", "cpu_5_min"));
    info.memory_usage = percent(first_value(device, "display memory", "used_rate"));
}

fn cisco_ios(device: &Device, info: &mut BaseInfo) {
    for row in device.rows("show version") {
        // Stacks list one hardware entry per member
        info.model = value(row, "hardware")
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        info.version = value(row, "version").to_string();
        info.uptime = value(row, "uptime").to_string();
    }

    for row in device.rows("show inventory") {
        info.serials
            .push((value(row, "name").to_string(), value(row, "sn").to_string()));
    }

    info.cpu_usage = percent(first_value(device, "show processes cpu", "cpu_5_min"));

    if let Some(row) = device.rows("show processes memory").first() {
        let total = value(row, "memory_total").parse::<f64>();
        let used = value(row, "memory_used").parse::<f64>();
        if let (Ok(total), Ok(used)) = (total, used) {
            if total > 0.0 {
                info.memory_usage = format!("{}%", (used / total * 100.0) as u64);
            }
        }
    }
}

fn ruijie_os(device: &Device, info: &mut BaseInfo) {
    let version = device.rows("show version");
    if let Some(row) = version.first() {
        info.model = value(row, "model").to_string();
        info.version = value(row, "soft_version").to_string();
        info.uptime = value(row, "uptime").to_string();
    }
    for row in version {
        let serial = value(row, "serial_number");
        if !serial.is_empty() {
            info.serials
                .push((value(row, "slot_name").to_string(), serial.to_string()));
        }
    }

    info.cpu_usage = percent(first_value(device, "show cpu", "cpu_5_min"));
    info.memory_usage = percent(first_value(
        device,
        "show memory",
        "system_memory_used_rate_precent",
    ));
}

fn maipu_mypower(device: &Device, info: &mut BaseInfo) {
    for row in device.rows("show version") {
        info.model = value(row, "model").to_string();
        info.version = value(row, "software_version").to_string();
        info.uptime = value(row, "uptime").to_string();
    }

    for row in device.rows("show system module brief") {
        let name = value(row, "name");
        if name != "/" {
            info.serials
                .push((name.to_string(), value(row, "sn").to_string()));
        }
    }

    info.cpu_usage = percent(first_value(device, "show cpu monitor", "cpu_5_min"));
    info.memory_usage = percent(first_value(device, "show memory", "used_percent"));
}

/// Outcome of one health item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Normal,
    Abnormal,
}

/// Health of the items every report shows.
///
/// `None` means the check produced no result for the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HealthSummary {
    pub cpu: Option<HealthStatus>,
    pub memory: Option<HealthStatus>,
    pub fan: Option<HealthStatus>,
    pub power: Option<HealthStatus>,
}

impl HealthSummary {
    /// Derive the summary from a device result set. Any warning makes an
    /// item abnormal.
    pub fn from_results(results: &ResultSet) -> Self {
        let status = |check: &str| {
            let each = results.get(check);
            if each.is_empty() {
                None
            } else if each.includes_warning() {
                Some(HealthStatus::Abnormal)
            } else {
                Some(HealthStatus::Normal)
            }
        };

        Self {
            cpu: status("cpu_status"),
            memory: status("memory_status"),
            fan: status("fan_status"),
            power: status("power_status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Alarm;
    use crate::analysis::Severity;
    use crate::device::DeviceInfo;
    use crate::vendor::VendorRegistry;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn parsed(info: DeviceInfo, commands: Vec<(&str, &str, Vec<Row>)>) -> Device {
        let mut device = Device::new(info, commands.iter().map(|(name, content, _)| (*name, *content)));
        device.detect_vendor(&VendorRegistry::with_builtin_vendors().unwrap());
        for (cmd, (_, _, rows)) in device.commands_mut().values_mut().zip(commands) {
            cmd.set_rows(rows, false);
        }
        device
    }

    #[test]
    fn test_huawei_base_info() {
        let device = parsed(
            DeviceInfo::new("NE20E-A").with_ip("10.0.0.1"),
            vec![
                (
                    "dis version",
                    "Huawei Versatile Routing Platform Software",
                    vec![row(&[
                        ("model", "NE20E-S4"),
                        ("vrp_version", "8.180"),
                        ("uptime", "493 days, 18 hours, 38 minutes"),
                    ])],
                ),
                ("display esn", "ESN of slot 1: 2102351931P0A3000168", vec![row(&[("esn", "2102351931P0A3000168")])]),
                ("display cpu-usage", "CPU Usage : 9%", vec![row(&[("cpu_5_min", "9")])]),
                (
                    "display memory-usage",
                    "Memory Using Percentage Is: 43%",
                    vec![row(&[("MEMORY_USING_PERCENT", "43")])],
                ),
            ],
        );

        let info = collect(&device);
        assert_eq!(info.hostname, "NE20E-A");
        assert_eq!(info.vendor_platform, "huawei_vrp");
        assert_eq!(info.ip, "10.0.0.1");
        assert_eq!(info.model, "NE20E-S4");
        assert_eq!(info.version, "8.180");
        assert_eq!(info.serials, vec![("chassis".to_string(), "2102351931P0A3000168".to_string())]);
        assert_eq!(info.cpu_usage, "9%");
        assert_eq!(info.memory_usage, "43%");
    }

    #[test]
    fn test_cisco_memory_ratio() {
        let device = parsed(
            DeviceInfo::new("core-sw"),
            vec![
                (
                    "show version",
                    "Cisco IOS Software, C2960X Software",
                    vec![row(&[("hardware", "WS-C2960X-48TS-L, WS-C2960X-24TS-L"), ("version", "15.2(2)E7")])],
                ),
                (
                    "show processes memory",
                    "Processor Pool Total: 1000 Used: 456",
                    vec![row(&[("memory_total", "1000"), ("memory_used", "456")])],
                ),
            ],
        );

        let info = collect(&device);
        assert_eq!(info.model, "WS-C2960X-48TS-L");
        assert_eq!(info.memory_usage, "45%");
        assert_eq!(info.cpu_usage, "");
    }

    #[test]
    fn test_unknown_vendor() {
        let device = parsed(DeviceInfo::new("mystery"), vec![("show version", "v1", vec![])]);
        let info = collect(&device);
        assert_eq!(info.vendor_platform, "default");
        assert_eq!(info.hostname, "mystery");
        assert!(info.model.is_empty());
    }

    #[test]
    fn test_field() {
        let info = BaseInfo {
            model: "S5130".to_string(),
            serials: vec![
                ("slot 1".to_string(), "210235A1".to_string()),
                ("slot 2".to_string(), "210235A2".to_string()),
            ],
            ..BaseInfo::default()
        };
        assert_eq!(info.field("model").as_deref(), Some("S5130"));
        assert_eq!(info.field("serials").as_deref(), Some("slot 1:210235A1, slot 2:210235A2"));
        assert_eq!(info.field("uptime").as_deref(), Some(""));
        assert!(info.field("boot_time").is_none());
        assert!(FIELDS.iter().all(|name| info.field(name).is_some()));
    }

    #[test]
    fn test_health_summary() {
        let mut results = ResultSet::new();
        for (check, severity) in [
            ("cpu_status", Severity::Normal),
            ("power_status", Severity::Normal),
            ("power_status", Severity::Warning),
            ("fan_status", Severity::Focus),
        ] {
            let mut alarm = Alarm::new(severity, "");
            alarm.check = check.to_string();
            results.push(alarm);
        }

        let health = HealthSummary::from_results(&results);
        assert_eq!(health.cpu, Some(HealthStatus::Normal));
        assert_eq!(health.power, Some(HealthStatus::Abnormal));
        assert_eq!(health.fan, Some(HealthStatus::Normal));
        assert_eq!(health.memory, None);
    }
}
