use crate::bom_analysis::domain::{BomSnapshot, ComponentId};
use crate::shared::Result;

/// ComponentResolver port for looking up sub-BOMs during explosion
///
/// Supplied by the persistence layer. The explosion engine asks it, for every
/// WIP line it meets, whether the component is itself manufactured.
pub trait ComponentResolver {
    /// Resolves the active BOM that manufactures `component_id`
    ///
    /// # Arguments
    /// * `component_id` - Component referenced by a BOM line
    ///
    /// # Returns
    /// - `Some(snapshot)` when the component has an active BOM
    /// - `None` when it is a terminal (purchased) material
    ///
    /// # Errors
    /// Returns an error if the lookup itself fails (storage unavailable, corrupt record).
    /// The engine reports it as `ResolutionFailed`.
    fn resolve(&self, component_id: &ComponentId) -> Result<Option<BomSnapshot>>;
}

impl<R: ComponentResolver + ?Sized> ComponentResolver for &R {
    fn resolve(&self, component_id: &ComponentId) -> Result<Option<BomSnapshot>> {
        (**self).resolve(component_id)
    }
}
