use crate::bom_analysis::domain::ReportMetadata;
use chrono::Utc;
use uuid::Uuid;

/// ReportMetadataGenerator service for stamping analysis reports
///
/// Every report gets a fresh `urn:uuid:` identifier and an RFC 3339 timestamp
/// so that an exported comparison or scale preview can be traced later.
pub struct ReportMetadataGenerator;

impl ReportMetadataGenerator {
    /// Generates report metadata with current timestamp and unique report id
    ///
    /// # Arguments
    /// * `tool_name` - Name of the tool producing the report
    /// * `tool_version` - Version of the tool
    pub fn generate_metadata(tool_name: &str, tool_version: &str) -> ReportMetadata {
        let generated_at = Utc::now().to_rfc3339();
        let report_id = format!("urn:uuid:{}", Uuid::new_v4());

        ReportMetadata::new(
            report_id,
            generated_at,
            tool_name.to_string(),
            tool_version.to_string(),
        )
    }

    /// Generates report metadata for this crate, using the compile-time version
    pub fn generate_default_metadata() -> ReportMetadata {
        Self::generate_metadata(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}
