use super::{BomId, BomItem, ComponentId};
use crate::shared::error::BomError;
use crate::shared::EngineResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lifecycle status of a BOM version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BomStatus {
    Draft,
    #[default]
    Active,
    PhasedOut,
}

/// Immutable view of one BOM version: header plus its ordered items
///
/// Analysis services never mutate a snapshot; scaling and comparison
/// produce new derived structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomSnapshot {
    pub bom_id: BomId,
    pub product_id: ComponentId,
    pub version: String,
    pub output_quantity: f64,
    pub output_uom: String,
    #[serde(default)]
    pub status: BomStatus,
    /// First day the version may be used, open-ended when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<NaiveDate>,
    /// Last day the version may be used, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_to: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<BomItem>,
}

impl BomSnapshot {
    pub fn new(
        bom_id: BomId,
        product_id: ComponentId,
        version: impl Into<String>,
        output_quantity: f64,
        output_uom: impl Into<String>,
        items: Vec<BomItem>,
    ) -> Self {
        Self {
            bom_id,
            product_id,
            version: version.into(),
            output_quantity,
            output_uom: output_uom.into(),
            status: BomStatus::Active,
            effective_from: None,
            effective_to: None,
            items,
        }
    }

    pub fn with_status(mut self, status: BomStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_effective_window(
        mut self,
        effective_from: Option<NaiveDate>,
        effective_to: Option<NaiveDate>,
    ) -> Self {
        self.effective_from = effective_from;
        self.effective_to = effective_to;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == BomStatus::Active
    }

    /// Whether `date` falls inside the effectivity window, both ends inclusive
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from.is_none_or(|from| from <= date)
            && self.effective_to.is_none_or(|to| date <= to)
    }

    /// Lines that take part in explosion and comparison (everything but the primary output)
    pub fn non_output_items(&self) -> impl Iterator<Item = &BomItem> {
        self.items.iter().filter(|item| !item.is_output)
    }

    /// Sum of `quantity * (1 + scrap_percent/100)` over required inputs
    pub fn required_input_weight(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.is_required_input())
            .map(BomItem::gross_quantity)
            .sum()
    }

    /// Checks the load-time invariants of a snapshot.
    ///
    /// Called by snapshot loaders before a snapshot is handed to the engine.
    ///
    /// # Errors
    /// Returns [`BomError::InvalidSnapshot`] when:
    /// - The output quantity is not a positive finite number
    /// - An item has a negative or non-finite quantity
    /// - An item's scrap percent lies outside 0..=100
    /// - An item is flagged both as output and by-product
    /// - More than one item is flagged as the primary output
    /// - Two items share a sequence number
    /// - `effective_from` is later than `effective_to`
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |reason: String| BomError::InvalidSnapshot {
            bom_id: self.bom_id.to_string(),
            reason,
        };

        if !self.output_quantity.is_finite() || self.output_quantity <= 0.0 {
            return Err(invalid(format!(
                "output quantity must be positive, got {}",
                self.output_quantity
            )));
        }

        if let (Some(from), Some(to)) = (self.effective_from, self.effective_to) {
            if from > to {
                return Err(invalid(format!(
                    "effective_from {} is after effective_to {}",
                    from, to
                )));
            }
        }

        let mut sequences = HashSet::new();
        let mut output_lines = 0usize;

        for item in &self.items {
            if item.item_id.trim().is_empty() || item.component_id.as_str().trim().is_empty() {
                return Err(invalid("item and component ids must not be empty".to_string()));
            }
            if !item.quantity.is_finite() || item.quantity < 0.0 {
                return Err(invalid(format!(
                    "item {} has invalid quantity {}",
                    item.item_id, item.quantity
                )));
            }
            if !(0.0..=100.0).contains(&item.scrap_percent) {
                return Err(invalid(format!(
                    "item {} has scrap percent {} outside 0-100",
                    item.item_id, item.scrap_percent
                )));
            }
            if item.is_output && item.is_by_product {
                return Err(invalid(format!(
                    "item {} cannot be both output and by-product",
                    item.item_id
                )));
            }
            if item.is_output {
                output_lines += 1;
            }
            if !sequences.insert(item.sequence) {
                return Err(invalid(format!(
                    "sequence {} is used more than once",
                    item.sequence
                )));
            }
        }

        if output_lines > 1 {
            return Err(invalid(format!(
                "{} items are flagged as primary output, at most one allowed",
                output_lines
            )));
        }

        Ok(())
    }
}
