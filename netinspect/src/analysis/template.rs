//! Mapping between template file names and the commands they parse.
//!
//! Template files follow the `<platform>_<command words>.textfsm`
//! convention, with the command's spaces replaced by underscores:
//!
//! ```text
//! huawei_vrp_display_cpu-usage.textfsm  <->  display cpu-usage
//! ```

/// File suffix of TextFSM templates.
pub const TEMPLATE_SUFFIX: &str = ".textfsm";

/// Append the template suffix when missing.
pub fn template_file_name(name: &str) -> String {
    if name.ends_with(TEMPLATE_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{TEMPLATE_SUFFIX}")
    }
}

/// Command text parsed by a template.
///
/// ```
/// use netinspect::analysis::command_from_template;
///
/// assert_eq!(
///     command_from_template("huawei_vrp", "huawei_vrp_display_interface_brief.textfsm"),
///     "display interface brief"
/// );
/// ```
pub fn command_from_template(platform: &str, template: &str) -> String {
    let name = template.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(template);
    let name = name
        .strip_prefix(platform)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(name);
    name.replace('_', " ")
}

/// Template file name for a command, or a template name given without
/// platform prefix or suffix.
pub fn template_for_command(platform: &str, command: &str) -> String {
    let mut name = command.trim().to_lowercase().replace(' ', "_");
    if !name.starts_with(platform) {
        name = format!("{platform}_{name}");
    }
    template_file_name(&name)
}
