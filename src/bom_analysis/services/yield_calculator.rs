use crate::bom_analysis::domain::{
    BomItem, BomSnapshot, LossFactor, YieldOptions, YieldProjection, YieldResult,
};
use crate::bom_analysis::policies::RoundingPolicy;
use crate::shared::error::BomError;
use crate::shared::EngineResult;
use rust_decimal::Decimal;

/// Percentages in a yield report keep one decimal
const YIELD_DECIMALS: u8 = 1;

/// YieldCalculator service for theoretical yield and variance
///
/// Pure computation over a snapshot. The variance threshold and the
/// expected yield come in through `YieldOptions`, never from ambient settings.
pub struct YieldCalculator;

impl YieldCalculator {
    /// Calculates the yield of `bom` for one production run
    ///
    /// # Arguments
    /// * `bom` - Snapshot whose inputs and output define the theoretical yield
    /// * `actual_output` - Quantity actually produced, in the BOM's output unit
    /// * `options` - Expected yield, tolerance and caller-supplied loss breakdown
    ///
    /// # Errors
    /// Returns `InvalidYield` when:
    /// - `expected_yield_percent` lies outside 0..=100
    /// - `variance_threshold_percent` is negative or not finite
    /// - `actual_output` is negative or not finite
    /// - A loss factor is negative, or the losses add up to more than the input total
    pub fn calculate_yield(
        bom: &BomSnapshot,
        actual_output: f64,
        options: &YieldOptions,
    ) -> EngineResult<YieldResult> {
        if let Some(expected) = options.expected_yield_percent {
            Self::check_percent("expected_yield_percent", expected)?;
        }

        let threshold = options.variance_threshold_percent;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(BomError::invalid_yield(format!(
                "variance threshold must be a non-negative number, got {}",
                threshold
            )));
        }

        if !actual_output.is_finite() || actual_output < 0.0 {
            return Err(BomError::invalid_yield(format!(
                "actual output must be a non-negative number, got {}",
                actual_output
            )));
        }

        let input_total: f64 = bom
            .items
            .iter()
            .filter(|item| item.is_required_input())
            .map(BomItem::gross_quantity)
            .sum();

        let by_product_total: f64 = bom
            .items
            .iter()
            .filter(|item| item.is_by_product)
            .map(|item| item.quantity)
            .sum();

        let theoretical_yield_percent = Self::percent_of(bom.output_quantity, input_total);
        let actual_yield_percent = Self::percent_of(actual_output, input_total);

        let loss_breakdown = Self::validate_losses(&options.loss_factors, input_total)?;

        let variance = options
            .expected_yield_percent
            .map(|expected| Self::difference(theoretical_yield_percent, expected));
        let variance_percent = variance
            .map(|variance| RoundingPolicy::to_f64(RoundingPolicy::round_decimal(variance, YIELD_DECIMALS)));
        let variance_warning = match (variance, RoundingPolicy::decimal(options.variance_threshold_percent)) {
            (Some(variance), Some(threshold)) => variance.abs() > threshold,
            _ => false,
        };

        if variance_warning {
            tracing::warn!(
                bom_id = %bom.bom_id,
                theoretical_yield_percent,
                expected_yield_percent = ?options.expected_yield_percent,
                threshold = options.variance_threshold_percent,
                "yield variance exceeds threshold"
            );
        }

        Ok(YieldResult {
            bom_id: bom.bom_id.clone(),
            input_total,
            output_total: bom.output_quantity,
            by_product_total,
            theoretical_yield_percent,
            actual_output,
            actual_yield_percent,
            expected_yield_percent: options.expected_yield_percent,
            variance_percent,
            variance_warning,
            loss_breakdown,
        })
    }

    /// Projects the usable output of a planned run at a given yield
    ///
    /// # Errors
    /// Returns `InvalidYield` when `yield_percent` lies outside 0..=100 or
    /// `planned_quantity` is negative or not finite.
    pub fn project_output(planned_quantity: f64, yield_percent: f64) -> EngineResult<YieldProjection> {
        Self::check_percent("yield_percent", yield_percent)?;
        if !planned_quantity.is_finite() || planned_quantity < 0.0 {
            return Err(BomError::invalid_yield(format!(
                "planned quantity must be a non-negative number, got {}",
                planned_quantity
            )));
        }

        let projected_quantity = planned_quantity * yield_percent / 100.0;

        Ok(YieldProjection {
            planned_quantity,
            yield_percent,
            projected_quantity,
            waste_quantity: planned_quantity - projected_quantity,
        })
    }

    fn check_percent(name: &str, value: f64) -> EngineResult<()> {
        if !(0.0..=100.0).contains(&value) {
            return Err(BomError::invalid_yield(format!(
                "{} must be between 0 and 100, got {}",
                name, value
            )));
        }
        Ok(())
    }

    /// `theoretical - expected` without binary noise; both sides are finite here
    fn difference(theoretical: f64, expected: f64) -> Decimal {
        match (RoundingPolicy::decimal(theoretical), RoundingPolicy::decimal(expected)) {
            (Some(theoretical), Some(expected)) => theoretical - expected,
            _ => Decimal::ZERO,
        }
    }

    /// `part / whole * 100` at one decimal; 0 when there is nothing to divide by
    fn percent_of(part: f64, whole: f64) -> f64 {
        if whole > 0.0 {
            RoundingPolicy::round(part / whole * 100.0, YIELD_DECIMALS)
        } else {
            0.0
        }
    }

    fn validate_losses(losses: &[LossFactor], input_total: f64) -> EngineResult<Vec<LossFactor>> {
        if let Some(bad) = losses
            .iter()
            .find(|loss| !loss.quantity.is_finite() || loss.quantity < 0.0)
        {
            return Err(BomError::invalid_yield(format!(
                "{} loss must be a non-negative number, got {}",
                bad.kind, bad.quantity
            )));
        }

        let total_loss: f64 = losses.iter().map(|loss| loss.quantity).sum();
        let tolerance = input_total.abs().max(1.0) * f64::EPSILON * 8.0;
        if total_loss > input_total + tolerance {
            return Err(BomError::invalid_yield(format!(
                "loss breakdown totals {} which exceeds the input total {}",
                total_loss, input_total
            )));
        }

        Ok(losses
            .iter()
            .map(|loss| LossFactor {
                percent_of_input: Self::percent_of(loss.quantity, input_total),
                ..loss.clone()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_analysis::domain::{BomId, ComponentId, ComponentType, LossKind};
    use crate::shared::error::ErrorKind;

    fn line(id: &str, component: &str, quantity: f64, seq: u32) -> BomItem {
        BomItem::new(
            id,
            ComponentId::new(component).unwrap(),
            ComponentType::Raw,
            quantity,
            "kg",
            seq,
        )
    }

    /// 400kg + 100kg at 5% scrap = 505kg in, 475kg out
    fn mash() -> BomSnapshot {
        BomSnapshot::new(
            BomId::new("bom-mash").unwrap(),
            ComponentId::new("mash").unwrap(),
            "1",
            475.0,
            "kg",
            vec![
                line("m1", "grain", 400.0, 1),
                line("m2", "malt", 100.0, 2).with_scrap_percent(5.0),
                line("m3", "husk", 20.0, 3).as_by_product(),
                line("m4", "mash", 475.0, 4).as_output(),
            ],
        )
    }

    #[test]
    fn test_theoretical_yield_matches_hand_calculation() {
        let result = YieldCalculator::calculate_yield(&mash(), 470.0, &YieldOptions::default())
            .unwrap();

        assert!((result.input_total - 505.0).abs() < 1e-9);
        assert_eq!(result.output_total, 475.0);
        assert_eq!(result.by_product_total, 20.0);
        // 475 / 505 * 100 = 94.059...
        assert_eq!(result.theoretical_yield_percent, 94.1);
        // 470 / 505 * 100 = 93.069...
        assert_eq!(result.actual_yield_percent, 93.1);
        assert_eq!(result.variance_percent, None);
        assert!(!result.variance_warning);
    }

    #[test]
    fn test_variance_within_threshold() {
        let options = YieldOptions::default().with_expected_yield(90.0);
        let result = YieldCalculator::calculate_yield(&mash(), 475.0, &options).unwrap();

        assert_eq!(result.variance_percent, Some(4.1));
        assert!(!result.variance_warning);
    }

    #[test]
    fn test_variance_beyond_threshold() {
        let options = YieldOptions::default().with_expected_yield(85.0);
        let result = YieldCalculator::calculate_yield(&mash(), 475.0, &options).unwrap();
        assert_eq!(result.variance_percent, Some(9.1));
        assert!(result.variance_warning);

        let tolerant = YieldOptions::default()
            .with_expected_yield(85.0)
            .with_threshold(10.0);
        let result = YieldCalculator::calculate_yield(&mash(), 475.0, &tolerant).unwrap();
        assert!(!result.variance_warning);
    }

    #[test]
    fn test_expected_yield_bounds() {
        for expected in [150.0, -10.0] {
            let options = YieldOptions::default().with_expected_yield(expected);
            let err = YieldCalculator::calculate_yield(&mash(), 475.0, &options).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidYield);
        }
    }

    #[test]
    fn test_negative_actual_output_rejected() {
        let err = YieldCalculator::calculate_yield(&mash(), -1.0, &YieldOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidYield);
    }

    #[test]
    fn test_loss_breakdown_echoed_with_share() {
        let options = YieldOptions::default()
            .with_loss(LossFactor::new(LossKind::Moisture, 20.2))
            .with_loss(LossFactor::new(LossKind::Trim, 10.1));
        let result = YieldCalculator::calculate_yield(&mash(), 475.0, &options).unwrap();

        assert_eq!(result.loss_breakdown.len(), 2);
        assert_eq!(result.loss_breakdown[0].kind, LossKind::Moisture);
        assert_eq!(result.loss_breakdown[0].percent_of_input, 4.0);
        assert_eq!(result.loss_breakdown[1].percent_of_input, 2.0);
    }

    #[test]
    fn test_loss_breakdown_exceeding_input_rejected() {
        let options = YieldOptions::default()
            .with_loss(LossFactor::new(LossKind::Process, 400.0))
            .with_loss(LossFactor::new(LossKind::Custom("spill".to_string()), 200.0));
        let err = YieldCalculator::calculate_yield(&mash(), 475.0, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidYield);
        assert!(err.to_string().contains("exceeds the input total"));
    }

    #[test]
    fn test_negative_loss_rejected() {
        let options = YieldOptions::default().with_loss(LossFactor::new(LossKind::Trim, -1.0));
        let err = YieldCalculator::calculate_yield(&mash(), 475.0, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidYield);
    }

    #[test]
    fn test_empty_input_reports_zero_yield() {
        let bom = BomSnapshot::new(
            BomId::new("bom-empty").unwrap(),
            ComponentId::new("empty").unwrap(),
            "1",
            10.0,
            "kg",
            vec![],
        );
        let result = YieldCalculator::calculate_yield(&bom, 5.0, &YieldOptions::default())
            .unwrap();
        assert_eq!(result.input_total, 0.0);
        assert_eq!(result.theoretical_yield_percent, 0.0);
        assert_eq!(result.actual_yield_percent, 0.0);
    }

    #[test]
    fn test_project_output() {
        let projection = YieldCalculator::project_output(200.0, 95.0).unwrap();
        assert_eq!(projection.projected_quantity, 190.0);
        assert_eq!(projection.waste_quantity, 10.0);

        let err = YieldCalculator::project_output(200.0, 120.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidYield);
        let err = YieldCalculator::project_output(-1.0, 90.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidYield);
    }

    /// 941 out of 1000 gives a theoretical yield of exactly 94.1%
    fn thousand_in() -> BomSnapshot {
        BomSnapshot::new(
            BomId::new("bom-press").unwrap(),
            ComponentId::new("press").unwrap(),
            "1",
            941.0,
            "kg",
            vec![line("p1", "grape", 1000.0, 1)],
        )
    }

    #[test]
    fn test_variance_equal_to_threshold_does_not_warn() {
        let options = YieldOptions::default().with_expected_yield(89.1);
        let result = YieldCalculator::calculate_yield(&thousand_in(), 941.0, &options).unwrap();
        assert_eq!(result.theoretical_yield_percent, 94.1);
        assert_eq!(result.variance_percent, Some(5.0));
        assert!(!result.variance_warning);
    }

    #[test]
    fn test_variance_just_above_threshold_warns_before_rounding() {
        // 94.1 - 89.06 = 5.04, reported as 5.0 but still beyond the 5.0 threshold
        let options = YieldOptions::default().with_expected_yield(89.06);
        let result = YieldCalculator::calculate_yield(&thousand_in(), 941.0, &options).unwrap();
        assert_eq!(result.variance_percent, Some(5.0));
        assert!(result.variance_warning);
    }

    #[test]
    fn test_negative_variance_beyond_threshold_warns() {
        let options = YieldOptions::default().with_expected_yield(99.2);
        let result = YieldCalculator::calculate_yield(&thousand_in(), 941.0, &options).unwrap();
        assert_eq!(result.variance_percent, Some(-5.1));
        assert!(result.variance_warning);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        for threshold in [-1.0, f64::NAN, f64::INFINITY] {
            let options = YieldOptions::default()
                .with_expected_yield(90.0)
                .with_threshold(threshold);
            let err = YieldCalculator::calculate_yield(&thousand_in(), 941.0, &options).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidYield);
            assert!(err.to_string().contains("variance threshold"));
        }
    }
}
