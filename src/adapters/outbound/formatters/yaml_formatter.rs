use crate::application::dto::AnalysisResponse;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// YamlFormatter adapter for YAML reports
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for YamlFormatter {
    fn format(&self, response: &AnalysisResponse) -> Result<String> {
        serde_yaml_ng::to_string(response)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report to YAML: {}", e))
    }
}
