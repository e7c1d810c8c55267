use crate::bom_analysis::domain::{BomSnapshot, ComponentId};
use crate::ports::outbound::ComponentResolver;
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingComponentResolver wraps a ComponentResolver and adds in-memory caching.
///
/// The explosion engine already memoizes within one call; this decorator keeps
/// answers across calls, e.g. when several BOMs sharing sub-assemblies are
/// exploded in a row. Both hits and "no BOM" answers are cached, errors are not.
/// The cache is thread-safe and can be shared between workers.
pub struct CachingComponentResolver<R: ComponentResolver> {
    inner: R,
    cache: Arc<DashMap<ComponentId, Option<BomSnapshot>>>,
}

impl<R: ComponentResolver> CachingComponentResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<R: ComponentResolver> ComponentResolver for CachingComponentResolver<R> {
    fn resolve(&self, component_id: &ComponentId) -> Result<Option<BomSnapshot>> {
        if let Some(cached) = self.cache.get(component_id) {
            return Ok(cached.clone());
        }

        let resolved = self.inner.resolve(component_id)?;
        self.cache.insert(component_id.clone(), resolved.clone());
        tracing::debug!(
            component_id = %component_id,
            cached = self.cache_size(),
            "resolver cache miss"
        );

        Ok(resolved)
    }
}
