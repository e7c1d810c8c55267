use super::{BomId, BomSnapshot, ComponentId};
use crate::shared::error::BomError;
use crate::shared::EngineResult;
use serde::{Deserialize, Serialize};

/// Default number of decimals kept when scaling
pub const DEFAULT_ROUND_DECIMALS: u8 = 2;

/// Largest supported rounding precision
pub const MAX_ROUND_DECIMALS: u8 = 6;

/// What the caller wants the BOM scaled to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleTarget {
    /// New output quantity; factor is `batch_size / output_quantity`
    BatchSize(f64),
    /// Multiplier applied directly to every quantity
    Factor(f64),
}

impl ScaleTarget {
    /// Builds a target from the two optional request fields.
    ///
    /// Returns `None` when neither is supplied.
    ///
    /// # Errors
    /// `InvalidScale` when both are supplied, since the two disagree on the factor
    pub fn from_request(batch_size: Option<f64>, factor: Option<f64>) -> EngineResult<Option<Self>> {
        match (batch_size, factor) {
            (Some(batch_size), Some(factor)) => Err(BomError::invalid_scale(format!(
                "give either a batch size or a factor, not both (got {} and {})",
                batch_size, factor
            ))),
            (Some(batch_size), None) => Ok(Some(ScaleTarget::BatchSize(batch_size))),
            (None, Some(factor)) => Ok(Some(ScaleTarget::Factor(factor))),
            (None, None) => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleOptions {
    pub round_decimals: u8,
    pub preview_only: bool,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            round_decimals: DEFAULT_ROUND_DECIMALS,
            preview_only: true,
        }
    }
}

impl ScaleOptions {
    pub fn apply() -> Self {
        Self {
            preview_only: false,
            ..Self::default()
        }
    }

    pub fn with_round_decimals(mut self, round_decimals: u8) -> Self {
        self.round_decimals = round_decimals;
        self
    }
}

/// Before/after view of one scaled line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledItem {
    pub item_id: String,
    pub component_id: ComponentId,
    pub component_code: String,
    pub component_name: String,
    pub uom: String,
    pub original_quantity: f64,
    pub new_quantity: f64,
    /// Rounding changed the exact scaled value
    pub rounded: bool,
    pub is_output: bool,
    pub is_by_product: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleResult {
    pub bom_id: BomId,
    pub original_batch_size: f64,
    pub new_batch_size: f64,
    pub scale_factor: f64,
    pub items: Vec<ScaledItem>,
    pub warnings: Vec<String>,
    pub applied: bool,
    /// Derived snapshot carrying the scaled quantities
    #[serde(skip)]
    pub scaled: BomSnapshot,
}

impl ScaleResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn scaled_snapshot(&self) -> &BomSnapshot {
        &self.scaled
    }
}
