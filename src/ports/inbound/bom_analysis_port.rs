use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::shared::Result;

/// BomAnalysisPort - Inbound port for BOM analysis
///
/// This port defines the interface that external adapters (CLI, API handlers)
/// use to run an engine operation against stored BOMs.
pub trait BomAnalysisPort {
    /// Runs one analysis
    ///
    /// # Errors
    /// Returns an error if:
    /// - A referenced BOM cannot be loaded
    /// - The engine rejects the request (the error downcasts to `BomError`)
    /// - An applied scale cannot be persisted
    fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}
