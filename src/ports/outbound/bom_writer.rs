use crate::bom_analysis::domain::{BomId, BomItem};
use crate::shared::error::WriteError;

/// BomWriter port for persisting an applied scale result
///
/// The writer owns authorization, transactions and audit logging; the engine
/// performs none of these and surfaces whatever the writer returns.
pub trait BomWriter {
    /// Persists the scaled quantities of a BOM
    ///
    /// # Arguments
    /// * `bom_id` - BOM being rewritten
    /// * `output_quantity` - New batch size of the BOM header
    /// * `items` - Every line of the BOM with its scaled quantity
    ///
    /// # Errors
    /// Returns a [`WriteError`] if the write is rejected or the backend fails.
    fn persist(
        &self,
        bom_id: &BomId,
        output_quantity: f64,
        items: &[BomItem],
    ) -> Result<(), WriteError>;
}

impl<W: BomWriter + ?Sized> BomWriter for &W {
    fn persist(
        &self,
        bom_id: &BomId,
        output_quantity: f64,
        items: &[BomItem],
    ) -> Result<(), WriteError> {
        (**self).persist(bom_id, output_quantity, items)
    }
}
