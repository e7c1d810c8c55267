use crate::bom_analysis::domain::{
    ComparisonResult, ExplosionResult, ReportMetadata, ScaleResult, YieldProjection, YieldResult,
};
use serde::Serialize;

/// Result of one engine operation, tagged with the operation that produced it
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "analysis", content = "result", rename_all = "snake_case")]
pub enum AnalysisReport {
    Comparison(ComparisonResult),
    Explosion(ExplosionResult),
    Scale(ScaleResult),
    Yield {
        #[serde(flatten)]
        result: YieldResult,
        #[serde(skip_serializing_if = "Option::is_none")]
        projection: Option<YieldProjection>,
    },
}

/// AnalysisResponse - Internal response DTO from the analyze-BOM use case
///
/// Carries the engine result together with report metadata and the
/// non-fatal findings that the CLI may turn into a non-zero exit code.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub metadata: ReportMetadata,
    #[serde(flatten)]
    pub report: AnalysisReport,
    /// Non-fatal findings: rounding warnings, yield variance, depth truncation
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AnalysisResponse {
    pub fn new(metadata: ReportMetadata, report: AnalysisReport, warnings: Vec<String>) -> Self {
        Self {
            metadata,
            report,
            warnings,
        }
    }

    /// Whether the analysis raised findings worth failing a CI job on
    pub fn is_flagged(&self) -> bool {
        !self.warnings.is_empty()
    }
}
