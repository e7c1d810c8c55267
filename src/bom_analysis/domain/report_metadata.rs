use serde::Serialize;

/// ReportMetadata value object attached to every analysis report
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    report_id: String,
    generated_at: String,
    tool_name: String,
    tool_version: String,
}

impl ReportMetadata {
    pub fn new(
        report_id: String,
        generated_at: String,
        tool_name: String,
        tool_version: String,
    ) -> Self {
        Self {
            report_id,
            generated_at,
            tool_name,
            tool_version,
        }
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn generated_at(&self) -> &str {
        &self.generated_at
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }
}
