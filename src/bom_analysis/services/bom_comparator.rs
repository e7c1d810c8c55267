use crate::bom_analysis::domain::{
    BomItem, BomSnapshot, BomVersionHeader, ComparisonResult, ComparisonSummary, ComponentId,
    FieldValue, ItemField, ModifiedItem,
};
use crate::shared::error::BomError;
use crate::shared::EngineResult;
use std::collections::HashMap;

/// BomComparator service for diffing two versions of a product's BOM
///
/// Pure function over its inputs. Items are matched by `component_id`;
/// the primary output line is not part of the diff.
pub struct BomComparator;

impl BomComparator {
    /// Compares `bom1` (typically the older version) with `bom2`
    ///
    /// # Returns
    /// A ComparisonResult with added, removed and modified items plus a weight summary
    ///
    /// # Errors
    /// - `InvalidComparison` when both snapshots carry the same `bom_id`
    /// - `ProductMismatch` when they belong to different products
    pub fn compare(bom1: &BomSnapshot, bom2: &BomSnapshot) -> EngineResult<ComparisonResult> {
        if bom1.bom_id == bom2.bom_id {
            return Err(BomError::InvalidComparison {
                bom_id: bom1.bom_id.to_string(),
            });
        }

        if bom1.product_id != bom2.product_id {
            return Err(BomError::ProductMismatch {
                left_product: bom1.product_id.to_string(),
                right_product: bom2.product_id.to_string(),
            });
        }

        let items1 = Self::index_by_component(bom1);
        let items2 = Self::index_by_component(bom2);

        let added: Vec<BomItem> = bom2
            .non_output_items()
            .filter(|item| !items1.contains_key(&item.component_id))
            .cloned()
            .collect();

        let removed: Vec<BomItem> = bom1
            .non_output_items()
            .filter(|item| !items2.contains_key(&item.component_id))
            .cloned()
            .collect();

        // Walk bom1 in line order but only diff the line the index kept,
        // so a component listed twice yields one set of changes
        let mut modified = Vec::new();
        for old in bom1.non_output_items() {
            let indexed = items1.get(&old.component_id).copied();
            if !indexed.is_some_and(|kept| std::ptr::eq(kept, old)) {
                continue;
            }
            if let Some(new) = items2.get(&old.component_id) {
                modified.extend(Self::diff_item(old, new));
            }
        }

        let weight_v1 = bom1.required_input_weight();
        let weight_v2 = bom2.required_input_weight();
        let weight_change = weight_v2 - weight_v1;
        let weight_change_percent = if weight_v1 != 0.0 {
            weight_change / weight_v1 * 100.0
        } else {
            0.0
        };

        tracing::debug!(
            bom_1 = %bom1.bom_id,
            bom_2 = %bom2.bom_id,
            added = added.len(),
            removed = removed.len(),
            modified = modified.len(),
            "compared BOM versions"
        );

        let summary = ComparisonSummary {
            total_items_v1: bom1.non_output_items().count(),
            total_items_v2: bom2.non_output_items().count(),
            total_added: added.len(),
            total_removed: removed.len(),
            total_modified: modified.len(),
            weight_v1,
            weight_v2,
            weight_change,
            weight_change_percent,
        };

        Ok(ComparisonResult {
            bom_1: BomVersionHeader::from_snapshot(bom1),
            bom_2: BomVersionHeader::from_snapshot(bom2),
            added,
            removed,
            modified,
            summary,
        })
    }

    /// Builds a `component_id -> item` map; a later duplicate line wins
    fn index_by_component(bom: &BomSnapshot) -> HashMap<&ComponentId, &BomItem> {
        bom.non_output_items()
            .map(|item| (&item.component_id, item))
            .collect()
    }

    /// Emits one ModifiedItem per differing tracked field
    fn diff_item(old: &BomItem, new: &BomItem) -> Vec<ModifiedItem> {
        let mut changes = Vec::new();

        if old.quantity != new.quantity {
            changes.push(ModifiedItem::new(
                old,
                ItemField::Quantity,
                FieldValue::Number(old.quantity),
                FieldValue::Number(new.quantity),
            ));
        }
        if old.uom != new.uom {
            changes.push(ModifiedItem::new(
                old,
                ItemField::Uom,
                FieldValue::Text(old.uom.clone()),
                FieldValue::Text(new.uom.clone()),
            ));
        }
        if old.scrap_percent != new.scrap_percent {
            changes.push(ModifiedItem::new(
                old,
                ItemField::ScrapPercent,
                FieldValue::Number(old.scrap_percent),
                FieldValue::Number(new.scrap_percent),
            ));
        }
        if old.sequence != new.sequence {
            changes.push(ModifiedItem::new(
                old,
                ItemField::Sequence,
                FieldValue::Number(f64::from(old.sequence)),
                FieldValue::Number(f64::from(new.sequence)),
            ));
        }
        if old.operation_seq != new.operation_seq {
            changes.push(ModifiedItem::new(
                old,
                ItemField::OperationSeq,
                Self::operation_value(old.operation_seq),
                Self::operation_value(new.operation_seq),
            ));
        }

        changes
    }

    fn operation_value(operation_seq: Option<u32>) -> FieldValue {
        operation_seq
            .map(|seq| FieldValue::Number(f64::from(seq)))
            .unwrap_or(FieldValue::Missing)
    }
}
