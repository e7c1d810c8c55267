use super::BomId;
use serde::{Deserialize, Serialize};

/// Default variance tolerance between theoretical and expected yield
pub const DEFAULT_VARIANCE_THRESHOLD_PERCENT: f64 = 5.0;

/// Source of a loss in the process
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    Moisture,
    Trim,
    Process,
    Custom(String),
}

impl std::str::FromStr for LossKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Loss kind cannot be empty".to_string());
        }
        Ok(match trimmed.to_lowercase().as_str() {
            "moisture" => LossKind::Moisture,
            "trim" => LossKind::Trim,
            "process" => LossKind::Process,
            _ => LossKind::Custom(trimmed.to_string()),
        })
    }
}

impl std::fmt::Display for LossKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossKind::Moisture => write!(f, "moisture"),
            LossKind::Trim => write!(f, "trim"),
            LossKind::Process => write!(f, "process"),
            LossKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Caller-supplied loss contribution, in the BOM's input unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossFactor {
    pub kind: LossKind,
    pub quantity: f64,
    /// Filled in by the calculator: share of the input total
    #[serde(default)]
    pub percent_of_input: f64,
}

impl LossFactor {
    pub fn new(kind: LossKind, quantity: f64) -> Self {
        Self {
            kind,
            quantity,
            percent_of_input: 0.0,
        }
    }
}

/// Knobs for a yield calculation
#[derive(Debug, Clone, PartialEq)]
pub struct YieldOptions {
    pub expected_yield_percent: Option<f64>,
    pub variance_threshold_percent: f64,
    pub loss_factors: Vec<LossFactor>,
}

impl Default for YieldOptions {
    fn default() -> Self {
        Self {
            expected_yield_percent: None,
            variance_threshold_percent: DEFAULT_VARIANCE_THRESHOLD_PERCENT,
            loss_factors: Vec::new(),
        }
    }
}

impl YieldOptions {
    pub fn with_expected_yield(mut self, expected_yield_percent: f64) -> Self {
        self.expected_yield_percent = Some(expected_yield_percent);
        self
    }

    pub fn with_threshold(mut self, variance_threshold_percent: f64) -> Self {
        self.variance_threshold_percent = variance_threshold_percent;
        self
    }

    pub fn with_loss(mut self, loss: LossFactor) -> Self {
        self.loss_factors.push(loss);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldResult {
    pub bom_id: BomId,
    pub input_total: f64,
    pub output_total: f64,
    pub by_product_total: f64,
    pub theoretical_yield_percent: f64,
    pub actual_output: f64,
    pub actual_yield_percent: f64,
    pub expected_yield_percent: Option<f64>,
    pub variance_percent: Option<f64>,
    pub variance_warning: bool,
    pub loss_breakdown: Vec<LossFactor>,
}

/// Planned versus projected output for a given expected yield
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldProjection {
    pub planned_quantity: f64,
    pub yield_percent: f64,
    pub projected_quantity: f64,
    pub waste_quantity: f64,
}
