use crate::application::dto::{AnalysisReport, AnalysisRequest, AnalysisResponse};
use crate::bom_analysis::domain::{
    BomId, BomSnapshot, ExplosionResult, ScaleOptions, ScaleTarget, YieldOptions, YieldResult,
};
use crate::bom_analysis::services::{
    BomComparator, BomExplosionEngine, BomScaler, ReportMetadataGenerator, YieldCalculator,
};
use crate::ports::inbound::BomAnalysisPort;
use crate::ports::outbound::{BomSnapshotReader, BomWriter, ComponentResolver, ProgressReporter};
use crate::shared::Result;

/// AnalyzeBomUseCase - Core use case for BOM analysis
///
/// Loads the BOMs a request refers to, runs the matching engine operation
/// and wraps the result with report metadata. Non-fatal findings are
/// reported as warnings and returned in the response.
///
/// # Type Parameters
/// * `SR` - BomSnapshotReader implementation
/// * `CR` - ComponentResolver implementation
/// * `BW` - BomWriter implementation (only needed for applied scaling)
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeBomUseCase<SR, CR, BW, PR> {
    snapshot_reader: SR,
    component_resolver: CR,
    bom_writer: Option<BW>,
    progress_reporter: PR,
}

impl<SR, CR, BW, PR> AnalyzeBomUseCase<SR, CR, BW, PR>
where
    SR: BomSnapshotReader,
    CR: ComponentResolver,
    BW: BomWriter,
    PR: ProgressReporter,
{
    /// Creates a new AnalyzeBomUseCase with injected dependencies
    pub fn new(
        snapshot_reader: SR,
        component_resolver: CR,
        bom_writer: Option<BW>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            snapshot_reader,
            component_resolver,
            bom_writer,
            progress_reporter,
        }
    }

    /// Executes the analysis described by `request`
    pub fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        tracing::debug!(operation = request.operation(), "executing analysis");

        let (report, warnings) = match request {
            AnalysisRequest::Compare { bom_1, bom_2 } => self.compare(&bom_1, &bom_2)?,
            AnalysisRequest::Explode { bom_id, max_depth } => self.explode(&bom_id, max_depth)?,
            AnalysisRequest::Scale {
                bom_id,
                target,
                options,
            } => self.scale(&bom_id, target, options)?,
            AnalysisRequest::Yield {
                bom_id,
                actual_output,
                options,
                planned_quantity,
            } => self.calculate_yield(&bom_id, actual_output, &options, planned_quantity)?,
        };

        for warning in &warnings {
            self.progress_reporter.report_warning(warning);
        }

        let metadata = ReportMetadataGenerator::generate_default_metadata();
        Ok(AnalysisResponse::new(metadata, report, warnings))
    }

    fn load(&self, bom_id: &BomId) -> Result<BomSnapshot> {
        self.progress_reporter
            .report(&format!("📖 Loading BOM {}", bom_id));
        self.snapshot_reader.load_snapshot(bom_id)
    }

    fn compare(&self, bom_1: &BomId, bom_2: &BomId) -> Result<(AnalysisReport, Vec<String>)> {
        let left = self.load(bom_1)?;
        let right = self.load(bom_2)?;

        let result = BomComparator::compare(&left, &right)?;
        self.progress_reporter.report_completion(&format!(
            "✅ Compared {} and {}: {} added, {} removed, {} modified",
            bom_1,
            bom_2,
            result.summary.total_added,
            result.summary.total_removed,
            result.summary.total_modified
        ));

        Ok((AnalysisReport::Comparison(result), Vec::new()))
    }

    fn explode(&self, bom_id: &BomId, max_depth: u8) -> Result<(AnalysisReport, Vec<String>)> {
        let root = self.load(bom_id)?;

        self.progress_reporter
            .report(&format!("🔍 Exploding {} (max depth {})", bom_id, max_depth));
        let result = BomExplosionEngine::explode(&root, &self.component_resolver, max_depth)?;

        self.progress_reporter.report_completion(&format!(
            "✅ Exploded {} into {} item(s) over {} level(s), {} purchased material(s)",
            bom_id,
            result.total_items,
            result.total_levels,
            result.raw_materials_summary.len()
        ));

        let warnings = Self::explosion_warnings(&result, max_depth);
        Ok((AnalysisReport::Explosion(result), warnings))
    }

    fn explosion_warnings(result: &ExplosionResult, max_depth: u8) -> Vec<String> {
        if result.truncated {
            vec![format!(
                "explosion of {} stopped at the depth limit of {} level(s); deeper sub-BOMs were not expanded",
                result.bom_id,
                max_depth.max(1)
            )]
        } else {
            Vec::new()
        }
    }

    fn scale(
        &self,
        bom_id: &BomId,
        target: Option<ScaleTarget>,
        options: ScaleOptions,
    ) -> Result<(AnalysisReport, Vec<String>)> {
        let bom = self.load(bom_id)?;

        let writer = self.bom_writer.as_ref().map(|w| w as &dyn BomWriter);
        let result = BomScaler::scale(&bom, target, options, writer)?;

        let verb = if result.applied { "Applied" } else { "Previewed" };
        self.progress_reporter.report_completion(&format!(
            "✅ {} scaling of {}: {} -> {} {} (factor {})",
            verb,
            bom_id,
            result.original_batch_size,
            result.new_batch_size,
            bom.output_uom,
            result.scale_factor
        ));

        let warnings = result.warnings.clone();
        Ok((AnalysisReport::Scale(result), warnings))
    }

    fn calculate_yield(
        &self,
        bom_id: &BomId,
        actual_output: f64,
        options: &YieldOptions,
        planned_quantity: Option<f64>,
    ) -> Result<(AnalysisReport, Vec<String>)> {
        let bom = self.load(bom_id)?;
        let result = YieldCalculator::calculate_yield(&bom, actual_output, options)?;

        let projection = match planned_quantity {
            Some(planned) => {
                let yield_percent = result
                    .expected_yield_percent
                    .unwrap_or_else(|| result.theoretical_yield_percent.min(100.0));
                Some(YieldCalculator::project_output(planned, yield_percent)?)
            }
            None => None,
        };

        self.progress_reporter.report_completion(&format!(
            "✅ Theoretical yield of {}: {}%",
            bom_id, result.theoretical_yield_percent
        ));

        let warnings = Self::yield_warnings(&result, options);
        Ok((AnalysisReport::Yield { result, projection }, warnings))
    }

    fn yield_warnings(result: &YieldResult, options: &YieldOptions) -> Vec<String> {
        match (result.variance_warning, result.expected_yield_percent, result.variance_percent) {
            (true, Some(expected), Some(variance)) => vec![format!(
                "theoretical yield {}% deviates from expected {}% by {}% (threshold {}%)",
                result.theoretical_yield_percent,
                expected,
                variance,
                options.variance_threshold_percent
            )],
            _ => Vec::new(),
        }
    }
}

impl<SR, CR, BW, PR> BomAnalysisPort for AnalyzeBomUseCase<SR, CR, BW, PR>
where
    SR: BomSnapshotReader,
    CR: ComponentResolver,
    BW: BomWriter,
    PR: ProgressReporter,
{
    fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        self.execute(request)
    }
}
