//! Error types for netinspect.

use thiserror::Error;

/// Main error type for netinspect operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Vendor or check registration errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Errors raised while evaluating a single check
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Errors reported by the structured-data parser
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Registration errors. These indicate a build-time mistake and are
/// expected to surface while the registries are being assembled.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A detection, signature or invalid-output pattern failed to compile
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A vendor with the same platform id is already registered
    #[error("Vendor '{platform}' is already registered")]
    DuplicateVendor { platform: String },

    /// The same callback was registered twice for one check and vendor
    #[error("Check '{check}' is already registered for vendor '{platform}'")]
    Conflict { check: String, platform: String },
}

/// Errors scoped to one check. The dispatcher converts these into a
/// skipped check; they never abort the device or the batch.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A template row does not carry a field the check declared
    #[error("Check '{check}' declares field '{field}' which template '{template}' does not provide")]
    FieldMissing {
        check: String,
        template: String,
        field: String,
    },

    /// The check declared a base-info field that does not exist
    #[error("Check '{check}' declares unknown base-info field '{field}'")]
    BaseInfoFieldMissing { check: String, field: String },

    /// The check asked its context for a template it never declared
    #[error("Template '{template}' was not declared by this check")]
    TemplateNotDeclared { template: String },

    /// The check read a row or base-info field it never declared
    #[error("Field '{field}' was not declared by this check")]
    FieldNotDeclared { field: String },

    /// A row value could not be interpreted
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },
}

/// Outcomes of the structured-data parser that produce no rows.
#[derive(Error, Debug)]
pub enum ParseError {
    /// No templates exist for this platform
    #[error("No templates for platform '{platform}'")]
    UnsupportedPlatform { platform: String },

    /// The platform has templates, but none for this command
    #[error("No template for command '{command}' on platform '{platform}'")]
    UnsupportedCommand { platform: String, command: String },

    /// The template engine failed on the command output
    #[error("Failed to parse '{command}' on platform '{platform}': {message}")]
    Parser {
        platform: String,
        command: String,
        message: String,
    },

    /// Parsing succeeded but produced no rows
    #[error("Parsing '{command}' on platform '{platform}' produced no rows")]
    NoRows { platform: String, command: String },

    /// A template could not be compiled when it was added
    #[error("Invalid template: {message}")]
    Template { message: String },
}

/// Result type alias using netinspect's Error.
pub type Result<T> = std::result::Result<T, Error>;
