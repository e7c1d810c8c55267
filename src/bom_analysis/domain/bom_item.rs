use super::ComponentId;
use serde::{Deserialize, Serialize};

/// Classification of the component a BOM line consumes or produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    #[default]
    Raw,
    /// Intermediate product with its own BOM
    #[serde(alias = "semi_finished")]
    Wip,
    Finished,
    Packaging,
}

impl ComponentType {
    /// Terminal materials purchased rather than manufactured
    pub fn is_purchased_material(self) -> bool {
        matches!(self, ComponentType::Raw | ComponentType::Packaging)
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ComponentType::Raw => "raw",
            ComponentType::Wip => "wip",
            ComponentType::Finished => "finished",
            ComponentType::Packaging => "packaging",
        };
        write!(f, "{}", label)
    }
}

/// One line of a BOM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomItem {
    pub item_id: String,
    pub component_id: ComponentId,
    #[serde(default)]
    pub component_code: String,
    #[serde(default)]
    pub component_name: String,
    #[serde(default)]
    pub component_type: ComponentType,
    pub quantity: f64,
    pub uom: String,
    pub sequence: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_seq: Option<u32>,
    #[serde(default)]
    pub scrap_percent: f64,
    #[serde(default)]
    pub is_output: bool,
    #[serde(default)]
    pub is_by_product: bool,
}

impl BomItem {
    /// Creates an input line with no scrap.
    pub fn new(
        item_id: impl Into<String>,
        component_id: ComponentId,
        component_type: ComponentType,
        quantity: f64,
        uom: impl Into<String>,
        sequence: u32,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            component_code: component_id.as_str().to_uppercase(),
            component_name: component_id.as_str().to_string(),
            component_id,
            component_type,
            quantity,
            uom: uom.into(),
            sequence,
            operation_seq: None,
            scrap_percent: 0.0,
            is_output: false,
            is_by_product: false,
        }
    }

    pub fn with_names(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.component_code = code.into();
        self.component_name = name.into();
        self
    }

    pub fn with_scrap_percent(mut self, scrap_percent: f64) -> Self {
        self.scrap_percent = scrap_percent;
        self
    }

    pub fn with_operation_seq(mut self, operation_seq: u32) -> Self {
        self.operation_seq = Some(operation_seq);
        self
    }

    pub fn as_output(mut self) -> Self {
        self.is_output = true;
        self
    }

    pub fn as_by_product(mut self) -> Self {
        self.is_by_product = true;
        self
    }

    /// Whether this line counts towards the required input of the BOM
    pub fn is_required_input(&self) -> bool {
        !self.is_output && !self.is_by_product
    }

    /// Nominal quantity grossed up by the expected scrap
    pub fn gross_quantity(&self) -> f64 {
        self.quantity * (1.0 + self.scrap_percent / 100.0)
    }

    /// Label used in warnings: name when present, otherwise the component id
    pub fn display_name(&self) -> &str {
        if self.component_name.is_empty() {
            self.component_id.as_str()
        } else {
            &self.component_name
        }
    }
}
