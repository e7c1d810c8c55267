use super::{BomId, BomItem, ComponentId, ComponentType};
use serde::Serialize;

/// A BOM line reached during explosion, with its requirement per root batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplodedItem {
    #[serde(flatten)]
    pub item: BomItem,
    /// BOM the line belongs to
    pub source_bom_id: BomId,
    pub depth: u8,
    /// Quantity required per root batch after multiplying through every level
    pub cumulative_quantity: f64,
    pub has_sub_bom: bool,
    /// Component ids from the root's first level down to this line
    pub path: Vec<ComponentId>,
}

/// All exploded items found at one depth (0 = root's own lines)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplosionLevel {
    pub depth: u8,
    pub items: Vec<ExplodedItem>,
}

/// Aggregated requirement for one purchased material across the whole tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawMaterialSummary {
    pub component_id: ComponentId,
    pub component_code: String,
    pub component_name: String,
    pub component_type: ComponentType,
    pub total_quantity: f64,
    pub uom: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplosionResult {
    pub bom_id: BomId,
    pub product_id: ComponentId,
    pub output_quantity: f64,
    pub output_uom: String,
    pub levels: Vec<ExplosionLevel>,
    pub raw_materials_summary: Vec<RawMaterialSummary>,
    pub total_levels: usize,
    pub total_items: usize,
    /// Set when the depth limit stopped at least one branch
    pub truncated: bool,
}

impl ExplosionResult {
    /// Summary entry for a purchased material, if it occurs anywhere in the tree
    pub fn raw_material(&self, component_id: &str) -> Option<&RawMaterialSummary> {
        self.raw_materials_summary
            .iter()
            .find(|summary| summary.component_id.as_str() == component_id)
    }

    pub fn level(&self, depth: u8) -> Option<&ExplosionLevel> {
        self.levels.iter().find(|level| level.depth == depth)
    }
}
