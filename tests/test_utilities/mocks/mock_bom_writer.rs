use bom_engine::prelude::*;
use std::sync::{Arc, Mutex};

/// A single persist call as seen by the writer
#[derive(Debug, Clone)]
pub struct PersistCall {
    pub bom_id: BomId,
    pub output_quantity: f64,
    pub items: Vec<BomItem>,
}

/// Mock BomWriter for testing that records persist calls
#[derive(Default, Clone)]
pub struct MockBomWriter {
    pub calls: Arc<Mutex<Vec<PersistCall>>>,
    conflict: bool,
}

impl MockBomWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer whose every persist call reports a concurrent modification
    pub fn conflicting() -> Self {
        Self {
            conflict: true,
            ..Self::default()
        }
    }

    pub fn get_calls(&self) -> Vec<PersistCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl BomWriter for MockBomWriter {
    fn persist(
        &self,
        bom_id: &BomId,
        output_quantity: f64,
        items: &[BomItem],
    ) -> std::result::Result<(), WriteError> {
        if self.conflict {
            return Err(WriteError::Conflict {
                bom_id: bom_id.to_string(),
            });
        }
        self.calls.lock().unwrap().push(PersistCall {
            bom_id: bom_id.clone(),
            output_quantity,
            items: items.to_vec(),
        });
        Ok(())
    }
}
