use super::{BomId, BomItem, BomSnapshot, ComponentId};
use serde::Serialize;

/// Item field tracked by the comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Quantity,
    Uom,
    ScrapPercent,
    Sequence,
    OperationSeq,
}

/// Old or new value of a compared field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// Optional field left unset, serialized as `null`
    Missing,
}

impl FieldValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(_) | FieldValue::Missing => None,
        }
    }
}

/// A single changed field of a component present in both versions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifiedItem {
    pub item_id: String,
    pub component_id: ComponentId,
    pub component_code: String,
    pub component_name: String,
    pub field: ItemField,
    pub old_value: FieldValue,
    pub new_value: FieldValue,
    /// `None` for text fields and when the old value is zero
    pub change_percent: Option<f64>,
}

impl ModifiedItem {
    pub(crate) fn new(
        item: &BomItem,
        field: ItemField,
        old_value: FieldValue,
        new_value: FieldValue,
    ) -> Self {
        let change_percent = match (old_value.as_number(), new_value.as_number()) {
            (Some(old), Some(new)) if old != 0.0 => Some((new - old) / old * 100.0),
            _ => None,
        };

        Self {
            item_id: item.item_id.clone(),
            component_id: item.component_id.clone(),
            component_code: item.component_code.clone(),
            component_name: item.component_name.clone(),
            field,
            old_value,
            new_value,
            change_percent,
        }
    }
}

/// Header of one compared BOM version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomVersionHeader {
    pub bom_id: BomId,
    pub version: String,
    pub output_quantity: f64,
    pub output_uom: String,
    pub total_items: usize,
}

impl BomVersionHeader {
    pub(crate) fn from_snapshot(bom: &BomSnapshot) -> Self {
        Self {
            bom_id: bom.bom_id.clone(),
            version: bom.version.clone(),
            output_quantity: bom.output_quantity,
            output_uom: bom.output_uom.clone(),
            total_items: bom.non_output_items().count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub total_items_v1: usize,
    pub total_items_v2: usize,
    pub total_added: usize,
    pub total_removed: usize,
    pub total_modified: usize,
    pub weight_v1: f64,
    pub weight_v2: f64,
    pub weight_change: f64,
    pub weight_change_percent: f64,
}

/// Difference between two versions of the same product's BOM
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub bom_1: BomVersionHeader,
    pub bom_2: BomVersionHeader,
    pub added: Vec<BomItem>,
    pub removed: Vec<BomItem>,
    pub modified: Vec<ModifiedItem>,
    pub summary: ComparisonSummary,
}

impl ComparisonResult {
    pub fn has_differences(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.modified.is_empty()
    }
}
