use crate::bom_analysis::domain::{
    BomSnapshot, ScaleOptions, ScaleResult, ScaleTarget, ScaledItem, MAX_ROUND_DECIMALS,
};
use crate::bom_analysis::policies::RoundingPolicy;
use crate::ports::outbound::BomWriter;
use crate::shared::error::BomError;
use crate::shared::EngineResult;
use rust_decimal::Decimal;

const PRECISION_WARNING: &str =
    "quantity below display precision; consider finer rounding or manual override";

/// BomScaler service for recomputing a BOM at a new batch size
///
/// Every line is scaled, including the output line and by-products. In
/// preview mode nothing leaves the process; in apply mode the scaled
/// header and items are handed to a `BomWriter` exactly once.
pub struct BomScaler;

impl BomScaler {
    /// Scales `bom` to `target`
    ///
    /// # Arguments
    /// * `bom` - Snapshot to scale (left untouched)
    /// * `target` - New batch size or multiplier; `None` when the request carried neither
    /// * `options` - Rounding precision and preview/apply mode
    /// * `writer` - Persistence collaborator, required in apply mode
    ///
    /// # Errors
    /// - `MissingScaleParam` if `target` is `None`
    /// - `InvalidScale` for non-positive targets, a non-positive output quantity
    ///   or a precision above `MAX_ROUND_DECIMALS`
    /// - `MissingWriter` in apply mode without a writer
    /// - `WriteFailed` with the writer's own error, unmodified
    pub fn scale(
        bom: &BomSnapshot,
        target: Option<ScaleTarget>,
        options: ScaleOptions,
        writer: Option<&dyn BomWriter>,
    ) -> EngineResult<ScaleResult> {
        let target = target.ok_or(BomError::MissingScaleParam)?;

        if options.round_decimals > MAX_ROUND_DECIMALS {
            return Err(BomError::invalid_scale(format!(
                "round_decimals must be at most {}, got {}",
                MAX_ROUND_DECIMALS, options.round_decimals
            )));
        }

        let ratio = Self::scale_ratio(bom, target)?;
        let scale_factor = RoundingPolicy::to_f64(ratio);
        let decimals = options.round_decimals;

        let new_batch_size = match target {
            ScaleTarget::BatchSize(batch_size) => batch_size,
            ScaleTarget::Factor(_) => {
                let output = Self::decimal(bom.output_quantity, "output quantity")?;
                RoundingPolicy::to_f64(RoundingPolicy::round_decimal(
                    Self::multiply(output, ratio)?,
                    decimals,
                ))
            }
        };

        let mut scaled = bom.clone();
        scaled.output_quantity = new_batch_size;

        let mut items = Vec::with_capacity(bom.items.len());
        let mut warnings = Vec::new();

        for item in scaled.items.iter_mut() {
            let exact = Self::multiply(Self::decimal(item.quantity, "quantity")?, ratio)?;
            let rounded = RoundingPolicy::round_decimal(exact, decimals);
            let new_quantity = RoundingPolicy::to_f64(rounded);

            if RoundingPolicy::lost_to_precision(item.quantity, new_quantity) {
                warnings.push(format!(
                    "{} ({}): {}",
                    item.display_name(),
                    item.component_code,
                    PRECISION_WARNING
                ));
            }

            items.push(ScaledItem {
                item_id: item.item_id.clone(),
                component_id: item.component_id.clone(),
                component_code: item.component_code.clone(),
                component_name: item.component_name.clone(),
                uom: item.uom.clone(),
                original_quantity: item.quantity,
                new_quantity,
                rounded: rounded != exact,
                is_output: item.is_output,
                is_by_product: item.is_by_product,
            });

            item.quantity = new_quantity;
        }

        tracing::debug!(
            bom_id = %bom.bom_id,
            scale_factor,
            new_batch_size,
            warnings = warnings.len(),
            preview_only = options.preview_only,
            "scaled BOM"
        );

        let applied = if options.preview_only {
            false
        } else {
            let writer = writer.ok_or(BomError::MissingWriter)?;
            writer.persist(&scaled.bom_id, scaled.output_quantity, &scaled.items)?;
            tracing::info!(bom_id = %bom.bom_id, new_batch_size, "applied scaled BOM");
            true
        };

        Ok(ScaleResult {
            bom_id: bom.bom_id.clone(),
            original_batch_size: bom.output_quantity,
            new_batch_size,
            scale_factor,
            items,
            warnings,
            applied,
            scaled,
        })
    }

    /// Multiplier from the current batch to the target, as an exact decimal
    fn scale_ratio(bom: &BomSnapshot, target: ScaleTarget) -> EngineResult<Decimal> {
        match target {
            ScaleTarget::BatchSize(batch_size) => {
                if !batch_size.is_finite() || batch_size <= 0.0 {
                    return Err(BomError::invalid_scale(format!(
                        "batch size must be greater than 0, got {}",
                        batch_size
                    )));
                }
                if !bom.output_quantity.is_finite() || bom.output_quantity <= 0.0 {
                    return Err(BomError::invalid_scale(format!(
                        "BOM {} has output quantity {}, cannot scale to a batch size",
                        bom.bom_id, bom.output_quantity
                    )));
                }
                let batch_size = Self::decimal(batch_size, "batch size")?;
                let output = Self::decimal(bom.output_quantity, "output quantity")?;
                batch_size.checked_div(output).ok_or_else(|| {
                    BomError::invalid_scale(format!(
                        "batch size {} is out of range for output quantity {}",
                        batch_size, output
                    ))
                })
            }
            ScaleTarget::Factor(factor) => {
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(BomError::invalid_scale(format!(
                        "scale factor must be greater than 0, got {}",
                        factor
                    )));
                }
                Self::decimal(factor, "scale factor")
            }
        }
    }

    fn decimal(value: f64, what: &str) -> EngineResult<Decimal> {
        RoundingPolicy::decimal(value).ok_or_else(|| {
            BomError::invalid_scale(format!("{} {} is outside the supported range", what, value))
        })
    }

    fn multiply(quantity: Decimal, ratio: Decimal) -> EngineResult<Decimal> {
        quantity.checked_mul(ratio).ok_or_else(|| {
            BomError::invalid_scale(format!(
                "scaling {} by {} overflows the supported range",
                quantity, ratio
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_analysis::domain::{BomId, BomItem, ComponentId, ComponentType};
    use crate::shared::error::{ErrorKind, WriteError};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingWriter {
        calls: RefCell<Vec<(String, f64, usize)>>,
        reject: bool,
    }

    impl BomWriter for RecordingWriter {
        fn persist(
            &self,
            bom_id: &BomId,
            output_quantity: f64,
            items: &[BomItem],
        ) -> Result<(), WriteError> {
            if self.reject {
                return Err(WriteError::Rejected {
                    reason: "read-only".to_string(),
                });
            }
            self.calls
                .borrow_mut()
                .push((bom_id.to_string(), output_quantity, items.len()));
            Ok(())
        }
    }

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

    fn dough() -> BomSnapshot {
        BomSnapshot::new(
            BomId::new("bom-dough").unwrap(),
            ComponentId::new("dough").unwrap(),
            "1",
            100.0,
            "kg",
            vec![
                line("i1", "flour", 60.0, 1),
                line("i2", "water", 35.5, 2),
                line("i3", "salt", 1.25, 3),
                line("i4", "bran", 2.0, 4).as_by_product(),
                line("i5", "dough", 100.0, 5).as_output(),
            ],
        )
    }

    fn quantities(result: &ScaleResult) -> Vec<f64> {
        result.items.iter().map(|item| item.new_quantity).collect()
    }

    #[test]
    fn test_scale_missing_target() {
        let err = BomScaler::scale(&dough(), None, ScaleOptions::default(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingScaleParam);
    }

    #[test]
    fn test_scale_rejects_non_positive_targets() {
        for target in [
            ScaleTarget::BatchSize(0.0),
            ScaleTarget::BatchSize(-5.0),
            ScaleTarget::Factor(-1.0),
            ScaleTarget::Factor(0.0),
            ScaleTarget::Factor(f64::NAN),
        ] {
            let err = BomScaler::scale(&dough(), Some(target), ScaleOptions::default(), None)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidScale, "target {:?}", target);
        }
    }

    #[test]
    fn test_scale_rejects_excessive_precision() {
        let options = ScaleOptions::default().with_round_decimals(7);
        let err = BomScaler::scale(&dough(), Some(ScaleTarget::Factor(2.0)), options, None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidScale);
    }

    #[test]
    fn test_scale_factor_one_is_identity() {
        let bom = dough();
        let result =
            BomScaler::scale(&bom, Some(ScaleTarget::Factor(1.0)), ScaleOptions::default(), None)
                .unwrap();

        let originals: Vec<f64> = bom.items.iter().map(|item| item.quantity).collect();
        assert_eq!(quantities(&result), originals);
        assert_eq!(result.new_batch_size, 100.0);
        assert!(result.items.iter().all(|item| !item.rounded));
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_scale_to_batch_size_scales_every_line() {
        let result = BomScaler::scale(
            &dough(),
            Some(ScaleTarget::BatchSize(150.0)),
            ScaleOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(result.scale_factor, 1.5);
        assert_eq!(result.original_batch_size, 100.0);
        assert_eq!(result.new_batch_size, 150.0);
        assert_eq!(quantities(&result), vec![90.0, 53.25, 1.88, 3.0, 150.0]);
        assert!(result.items[2].rounded);
        assert!(!result.applied);
        assert_eq!(result.scaled_snapshot().output_quantity, 150.0);
    }

    #[test]
    fn test_scale_round_trip_within_one_unit() {
        let bom = dough();
        let up = BomScaler::scale(
            &bom,
            Some(ScaleTarget::BatchSize(150.0)),
            ScaleOptions::default(),
            None,
        )
        .unwrap();
        let back = BomScaler::scale(
            up.scaled_snapshot(),
            Some(ScaleTarget::BatchSize(100.0)),
            ScaleOptions::default(),
            None,
        )
        .unwrap();

        let unit = RoundingPolicy::unit(2);
        for (original, item) in bom.items.iter().zip(back.items.iter()) {
            assert!(
                (original.quantity - item.new_quantity).abs() <= unit + 1e-9,
                "{} drifted to {}",
                original.quantity,
                item.new_quantity
            );
        }
    }

    #[test]
    fn test_scale_warns_when_quantity_vanishes() {
        let mut bom = dough();
        bom.items.push(line("i6", "vanilla", 0.004, 6));

        let result =
            BomScaler::scale(&bom, Some(ScaleTarget::Factor(1.0)), ScaleOptions::default(), None)
                .unwrap();

        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("vanilla"));
        assert!(result.warnings[0].contains("quantity below display precision"));
        assert_eq!(result.items[5].new_quantity, 0.0);

        let finer = ScaleOptions::default().with_round_decimals(3);
        let result = BomScaler::scale(&bom, Some(ScaleTarget::Factor(1.0)), finer, None).unwrap();
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_scale_preview_never_calls_writer() {
        let writer = RecordingWriter::default();
        let result = BomScaler::scale(
            &dough(),
            Some(ScaleTarget::Factor(2.0)),
            ScaleOptions::default(),
            Some(&writer),
        )
        .unwrap();

        assert!(!result.applied);
        assert!(writer.calls.borrow().is_empty());
    }

    #[test]
    fn test_scale_apply_requires_writer() {
        let err = BomScaler::scale(
            &dough(),
            Some(ScaleTarget::Factor(2.0)),
            ScaleOptions::apply(),
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingWriter);
    }

    #[test]
    fn test_scale_apply_persists_once() {
        let writer = RecordingWriter::default();
        let result = BomScaler::scale(
            &dough(),
            Some(ScaleTarget::Factor(2.0)),
            ScaleOptions::apply(),
            Some(&writer),
        )
        .unwrap();

        assert!(result.applied);
        let calls = writer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("bom-dough".to_string(), 200.0, 5));
    }

    #[test]
    fn test_scale_apply_passes_writer_error_through() {
        let writer = RecordingWriter {
            reject: true,
            ..Default::default()
        };
        let err = BomScaler::scale(
            &dough(),
            Some(ScaleTarget::Factor(2.0)),
            ScaleOptions::apply(),
            Some(&writer),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::WriteError);
        assert_eq!(err.to_string(), "write rejected: read-only");
    }

    #[test]
    fn test_scale_leaves_input_untouched() {
        let bom = dough();
        let before = bom.clone();
        BomScaler::scale(&bom, Some(ScaleTarget::Factor(3.0)), ScaleOptions::default(), None)
            .unwrap();
        assert_eq!(bom, before);
    }

    #[test]
    fn test_scale_uses_exact_decimal_products() {
        let bom = BomSnapshot::new(
            BomId::new("bom-brine").unwrap(),
            ComponentId::new("brine").unwrap(),
            "1",
            100.0,
            "kg",
            vec![line("i1", "salt", 0.1, 1), line("i2", "water", 1.005, 2)],
        );
        let options = ScaleOptions::default().with_round_decimals(3);
        let result = BomScaler::scale(&bom, Some(ScaleTarget::Factor(3.0)), options, None).unwrap();

        // 0.1 * 3 is exactly 0.3 in decimal arithmetic
        assert_eq!(result.items[0].new_quantity, 0.3);
        assert!(!result.items[0].rounded);
        assert_eq!(result.items[1].new_quantity, 3.015);
        assert!(!result.items[1].rounded);

        let result = BomScaler::scale(
            &bom,
            Some(ScaleTarget::Factor(1.0)),
            ScaleOptions::default(),
            None,
        )
        .unwrap();
        // 1.005 is a decimal tie at two places
        assert_eq!(result.items[1].new_quantity, 1.01);
        assert!(result.items[1].rounded);
    }

    #[test]
    fn test_scale_to_batch_size_with_repeating_ratio() {
        let result = BomScaler::scale(
            &dough(),
            Some(ScaleTarget::BatchSize(300.0)),
            ScaleOptions::default(),
            None,
        )
        .unwrap();
        assert_eq!(result.scale_factor, 3.0);

        let third = BomScaler::scale(
            &dough(),
            Some(ScaleTarget::BatchSize(100.0 / 3.0)),
            ScaleOptions::default(),
            None,
        )
        .unwrap();
        // 60 / 3
        assert_eq!(third.items[0].new_quantity, 20.0);
    }
}
