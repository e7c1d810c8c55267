use bom_engine::prelude::*;
use std::collections::HashMap;

/// Mock BomSnapshotReader for testing
pub struct MockSnapshotReader {
    snapshots: HashMap<BomId, BomSnapshot>,
}

impl MockSnapshotReader {
    pub fn new() -> Self {
        Self {
            snapshots: HashMap::new(),
        }
    }

    pub fn with_snapshot(mut self, snapshot: BomSnapshot) -> Self {
        self.snapshots.insert(snapshot.bom_id.clone(), snapshot);
        self
    }
}

impl BomSnapshotReader for MockSnapshotReader {
    fn load_snapshot(&self, bom_id: &BomId) -> Result<BomSnapshot> {
        self.snapshots
            .get(bom_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("BOM not found: {}", bom_id))
    }
}
