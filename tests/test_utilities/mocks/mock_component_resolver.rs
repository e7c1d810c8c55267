use bom_engine::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock ComponentResolver for testing
///
/// Maps product ids to their sub-BOMs and counts lookups.
#[derive(Default)]
pub struct MockComponentResolver {
    sub_boms: HashMap<ComponentId, BomSnapshot>,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockComponentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sub_bom(mut self, snapshot: BomSnapshot) -> Self {
        self.sub_boms.insert(snapshot.product_id.clone(), snapshot);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ComponentResolver for MockComponentResolver {
    fn resolve(&self, component_id: &ComponentId) -> Result<Option<BomSnapshot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock resolver failure for {}", component_id);
        }
        Ok(self.sub_boms.get(component_id).cloned())
    }
}
