use crate::bom_analysis::domain::{BomId, BomSnapshot};
use crate::shared::Result;

/// BomSnapshotReader port for loading BOM snapshots by id
///
/// This port abstracts the BOM tree loader. Implementations must hand out
/// snapshots that already passed [`BomSnapshot::validate`].
pub trait BomSnapshotReader {
    /// Loads one BOM version with all of its items
    ///
    /// # Errors
    /// Returns an error if:
    /// - No BOM with the given id exists
    /// - The stored record fails snapshot validation
    /// - The underlying storage cannot be read
    fn load_snapshot(&self, bom_id: &BomId) -> Result<BomSnapshot>;
}

impl<T: BomSnapshotReader + ?Sized> BomSnapshotReader for &T {
    fn load_snapshot(&self, bom_id: &BomId) -> Result<BomSnapshot> {
        (**self).load_snapshot(bom_id)
    }
}
