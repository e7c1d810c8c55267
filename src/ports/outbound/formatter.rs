use crate::application::dto::AnalysisResponse;
use crate::shared::Result;

/// ReportFormatter port for serializing analysis responses
pub trait ReportFormatter {
    /// Formats an analysis response
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &AnalysisResponse) -> Result<String>;
}
