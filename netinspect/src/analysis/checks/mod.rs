//! Built-in health checks.
//!
//! Each module registers one check for every vendor it supports. Checks
//! read parsed rows by full command name; see
//! [`Context::rows`](crate::analysis::Context::rows).

pub mod cpu;
pub mod fan;
pub mod logger;
pub mod memory;
pub mod power;

use super::registry::PluginRegistry;
use crate::error::RegistryError;

/// Usage percentage above which CPU and memory checks warn.
pub const USAGE_THRESHOLD: f64 = 80.0;

/// Register every built-in check, in this order: cpu, memory, fan, power,
/// logger summary.
pub fn register_builtin(registry: &mut PluginRegistry) -> Result<(), RegistryError> {
    cpu::register(registry)?;
    memory::register(registry)?;
    fan::register(registry)?;
    power::register(registry)?;
    logger::register(registry)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtin() {
        let mut registry = PluginRegistry::new();
        register_builtin(&mut registry).unwrap();

        let checks: Vec<String> = registry.catalog().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            checks,
            vec![
                "cpu_status",
                "memory_status",
                "fan_status",
                "power_status",
                "logger_summary"
            ]
        );
        assert!(registry.iter().all(|info| !info.doc.is_empty()));
    }

    #[test]
    fn test_register_builtin_twice_conflicts() {
        let mut registry = PluginRegistry::new();
        register_builtin(&mut registry).unwrap();
        assert!(matches!(
            register_builtin(&mut registry),
            Err(RegistryError::Conflict { .. })
        ));
    }
}
