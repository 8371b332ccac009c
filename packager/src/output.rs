//! Output formatting for packaging commands.
//!
//! Human-readable text goes to the terminal; the JSON forms are stable for
//! build scripts that consume the descriptor or the package report.

use crate::descriptor::PackageDescriptor;
use crate::packager::PackageReport;

/// Format a descriptor for human-readable output.
///
/// # Examples
///
/// ```
/// use addon_packager::descriptor::PackageDescriptor;
/// use addon_packager::output::format_descriptor_human;
///
/// let descriptor = PackageDescriptor::new("sample", "0.1.0", "https://example.invalid", "addons/sample/*");
/// let output = format_descriptor_human(&descriptor);
/// assert!(output.starts_with("sample 0.1.0"));
/// ```
#[must_use]
pub fn format_descriptor_human(descriptor: &PackageDescriptor) -> String {
    let (name, version, source_url) = descriptor.identity();
    format!(
        "{name} {version}\n  source:  {source_url}\n  payload: {}",
        descriptor.payload_root()
    )
}

/// Format a descriptor as pretty-printed JSON.
#[must_use]
pub fn format_descriptor_json(descriptor: &PackageDescriptor) -> String {
    serde_json::to_string_pretty(descriptor).unwrap_or_else(|_| "{}".to_owned())
}

/// Format the one-line summary printed after a successful packaging run.
#[must_use]
pub fn format_package_summary(report: &PackageReport) -> String {
    format!(
        "Packaged {} {}: {} file(s), {} byte(s) into {}",
        report.name,
        report.version,
        report.file_count(),
        report.total_bytes(),
        report.destination
    )
}

/// Format a package report as pretty-printed JSON.
#[must_use]
pub fn format_package_json(report: &PackageReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_owned())
}

/// Format the message printed after the build phase.
#[must_use]
pub fn format_build_message(descriptor: &PackageDescriptor) -> String {
    format!(
        "Build step complete for {} {}; payload is packaged as-is.",
        descriptor.name(),
        descriptor.version()
    )
}
