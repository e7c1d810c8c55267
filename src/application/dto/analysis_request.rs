use crate::bom_analysis::domain::{BomId, ScaleOptions, ScaleTarget, YieldOptions};

/// AnalysisRequest - Internal request DTO for the analyze-BOM use case
///
/// One variant per engine operation. BOMs are referenced by id and loaded
/// by the use case through its snapshot reader.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Compare {
        bom_1: BomId,
        bom_2: BomId,
    },
    Explode {
        bom_id: BomId,
        max_depth: u8,
    },
    Scale {
        bom_id: BomId,
        /// `None` when the caller gave neither a batch size nor a factor
        target: Option<ScaleTarget>,
        options: ScaleOptions,
    },
    Yield {
        bom_id: BomId,
        actual_output: f64,
        options: YieldOptions,
        /// Planned run size to project output and waste for
        planned_quantity: Option<f64>,
    },
}

impl AnalysisRequest {
    /// Short name of the operation, used in progress messages
    pub fn operation(&self) -> &'static str {
        match self {
            AnalysisRequest::Compare { .. } => "comparison",
            AnalysisRequest::Explode { .. } => "explosion",
            AnalysisRequest::Scale { .. } => "scaling",
            AnalysisRequest::Yield { .. } => "yield calculation",
        }
    }

    /// Whether executing the request writes to storage
    pub fn mutates(&self) -> bool {
        matches!(self, AnalysisRequest::Scale { options, .. } if !options.preview_only)
    }
}
