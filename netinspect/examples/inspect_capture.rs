//! Inspection Example
//!
//! Runs the built-in checks over a small set of captured outputs and
//! prints the findings per device.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example inspect_capture
//! cargo run --example inspect_capture -- --only cpu_status --json
//! RUST_LOG=debug cargo run --example inspect_capture -- --strict
//! ```

use std::env;

use netinspect::{Cluster, DeviceInfo, InspectOptions, TextFsmParser};

/// Commands, their abbreviation pattern and TextFSM template
struct CommandTemplate {
    platform: &'static str,
    command: &'static str,
    template: &'static str,
}

const TEMPLATES: &[CommandTemplate] = &[
    CommandTemplate {
        platform: "huawei_vrp",
        command: "dis[[play]] ver[[sion]]",
        template: r"Value VRP_VERSION (\S+)
Value MODEL (\S+)
Value UPTIME (.+)

Start
  ^VRP \(R\) software, Version ${VRP_VERSION}
  ^HUAWEI ${MODEL} .*uptime is ${UPTIME} -> Record
",
    },
    CommandTemplate {
        platform: "huawei_vrp",
        command: "dis[[play]] cpu[[-usage]]",
        template: r"Value CPU_5_MIN (\d+)

Start
  ^CPU utilization for five seconds:.*five minutes:\s*${CPU_5_MIN}% -> Record
",
    },
    CommandTemplate {
        platform: "huawei_vrp",
        command: "dis[[play]] mem[[ory-usage]]",
        template: r"Value MEMORY_USING_PERCENT (\d+)

Start
  ^Memory Using Percentage Is:\s*${MEMORY_USING_PERCENT}% -> Record
",
    },
    CommandTemplate {
        platform: "cisco_ios",
        command: "sh[[ow]] proc[[esses]] cpu",
        template: r"Value CPU_5_MIN (\d+)

Start
  ^CPU utilization for five seconds:.*five minutes:\s*${CPU_5_MIN}% -> Record
",
    },
];

/// Captured `(command, output)` pairs per device
const CAPTURES: &[(&str, &[(&str, &str)])] = &[
    (
        "BJ-CORE-01",
        &[
            (
                "dis ver",
                "Huawei Versatile Routing Platform Software\n\
                 VRP (R) software, Version 5.170 (S12700 V200R013C00SPC500)\n\
                 HUAWEI S12708 Routing Switch uptime is 201 days, 3 hours, 12 minutes\n",
            ),
            (
                "dis cpu",
                "CPU utilization for five seconds: 12%: one minute: 40%: five minutes: 91%\n",
            ),
            ("dis mem", "Memory Using Percentage Is: 43%\n"),
        ],
    ),
    (
        "SH-EDGE-07",
        &[
            ("show version", "Cisco IOS Software, C2900 Software, Version 15.1(4)M4\n"),
            (
                "sh proc cpu",
                "CPU utilization for five seconds: 3%/0%; one minute: 4%; five minutes: 5%\n",
            ),
            ("show power", "% Invalid input detected at '^' marker.\n"),
        ],
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut parser = TextFsmParser::new();
    for entry in TEMPLATES {
        parser.add_template(entry.platform, entry.command, entry.template)?;
    }

    let options = InspectOptions::new().with_strict(args.strict);
    let mut cluster = Cluster::with_builtins(Box::new(parser))?.with_options(options);
    if !args.only.is_empty() {
        let only: Vec<&str> = args.only.iter().map(String::as_str).collect();
        cluster.checks_mut().set_only_run(&only);
    }

    for (name, commands) in CAPTURES {
        cluster.add_device(DeviceInfo::new(*name), commands.iter().copied());
    }

    println!("=== Registered checks ===");
    for (check, platforms) in cluster.checks().catalog() {
        println!("  {:<16} {}", check, platforms.join(", "));
    }
    println!();

    let summaries = cluster.run();

    for (device, summary) in cluster.devices().iter().zip(&summaries) {
        println!("{}", "=".repeat(60));
        println!("Device:   {} ({})", device.name(), device.platform());
        println!(
            "Parsed:   {} parsed, {} invalid, {} unsupported, {} failed",
            summary.parsed, summary.invalid, summary.unsupported, summary.failed
        );
        println!("{}", "=".repeat(60));

        if args.json {
            println!("{}", serde_json::to_string_pretty(device.base_info())?);
            println!("{}", serde_json::to_string_pretty(device.analysis_result())?);
            println!("{}", serde_json::to_string_pretty(&device.health())?);
        } else {
            let info = device.base_info();
            println!("  Model:   {}", info.model);
            println!("  Version: {}", info.version);
            println!("  CPU:     {}", info.cpu_usage);
            println!("  Memory:  {}", info.memory_usage);
            println!();
            for alarm in device.analysis_result() {
                println!("  [{:<7}] {:<16} {}", alarm.severity, alarm.check, alarm.message);
            }
        }
        println!();
    }

    Ok(())
}

/// Simple argument parser
struct Args {
    strict: bool,
    json: bool,
    only: Vec<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut strict = false;
        let mut json = false;
        let mut only = Vec::new();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--strict" => strict = true,
                "--json" => json = true,
                "--only" => {
                    i += 1;
                    if i < args.len() {
                        only.push(args[i].clone());
                    }
                }
                "--help" => {
                    println!("Usage: inspect_capture [OPTIONS]");
                    println!();
                    println!("Options:");
                    println!("  --strict        Warn about platforms without templates");
                    println!("  --json          Print results as JSON");
                    println!("  --only <CHECK>  Only run the named check (repeatable)");
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {}", other);
                    std::process::exit(1);
                }
            }
            i += 1;
        }

        Self { strict, json, only }
    }
}
