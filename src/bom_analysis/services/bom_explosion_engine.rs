use crate::bom_analysis::domain::{
    BomId, BomSnapshot, ComponentId, ComponentType, ExplodedItem, ExplosionLevel,
    ExplosionResult, RawMaterialSummary,
};
use crate::ports::outbound::ComponentResolver;
use crate::shared::error::BomError;
use crate::shared::EngineResult;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

/// Default number of levels returned by an explosion
pub const DEFAULT_MAX_DEPTH: u8 = 10;

/// BomExplosionEngine service for multi-level BOM explosion
///
/// Walks the tree of sub-BOMs depth-first, multiplying batch ratios through
/// every level so that each line reports its requirement per root batch.
///
/// Cycle detection uses the set of BOMs on the current path only: a sub-BOM
/// reused by two sibling branches is legitimate, a sub-BOM that reappears
/// below itself is a `CircularReference`.
pub struct BomExplosionEngine;

impl BomExplosionEngine {
    /// Explodes `root` into a leveled list of contributing components
    ///
    /// # Arguments
    /// * `root` - BOM to explode; its own lines form level 0
    /// * `resolver` - Looks up the active BOM of each WIP component
    /// * `max_depth` - Number of levels to return (values below 1 are treated as 1)
    ///
    /// # Returns
    /// ExplosionResult with levels, raw materials summary and a `truncated` flag
    /// set when the depth limit stopped a branch that had more to expand
    ///
    /// # Errors
    /// - `CircularReference` if a sub-BOM reappears on its own path (aborts the whole call)
    /// - `ResolutionFailed` if the resolver fails
    /// - `InvalidSnapshot` if a resolved sub-BOM has a non-positive output quantity
    pub fn explode<R>(
        root: &BomSnapshot,
        resolver: &R,
        max_depth: u8,
    ) -> EngineResult<ExplosionResult>
    where
        R: ComponentResolver + ?Sized,
    {
        let max_depth = max_depth.max(1);
        let mut traversal = Traversal::new(resolver, max_depth);

        traversal.enter(&root.bom_id);
        traversal.expand(root, 0, 1.0, &[])?;
        traversal.leave();

        let levels: Vec<ExplosionLevel> = traversal
            .levels
            .into_iter()
            .map(|(depth, items)| ExplosionLevel { depth, items })
            .collect();

        let raw_materials_summary = Self::summarize_raw_materials(&levels);
        let total_items = levels.iter().map(|level| level.items.len()).sum();

        if traversal.truncated {
            tracing::warn!(
                bom_id = %root.bom_id,
                max_depth,
                "explosion truncated at depth limit"
            );
        }

        Ok(ExplosionResult {
            bom_id: root.bom_id.clone(),
            product_id: root.product_id.clone(),
            output_quantity: root.output_quantity,
            output_uom: root.output_uom.clone(),
            total_levels: levels.len(),
            total_items,
            levels,
            raw_materials_summary,
            truncated: traversal.truncated,
        })
    }

    /// Groups purchased materials by component, summing every occurrence at every depth
    fn summarize_raw_materials(levels: &[ExplosionLevel]) -> Vec<RawMaterialSummary> {
        let mut summary: Vec<RawMaterialSummary> = Vec::new();
        let mut index: HashMap<ComponentId, usize> = HashMap::new();

        let purchased = levels
            .iter()
            .flat_map(|level| level.items.iter())
            .filter(|exploded| {
                exploded.item.component_type.is_purchased_material() && !exploded.item.is_by_product
            });

        for exploded in purchased {
            let item = &exploded.item;
            match index.get(&item.component_id) {
                Some(&position) => {
                    let entry = &mut summary[position];
                    entry.total_quantity += exploded.cumulative_quantity;
                    entry.occurrences += 1;
                }
                None => {
                    index.insert(item.component_id.clone(), summary.len());
                    summary.push(RawMaterialSummary {
                        component_id: item.component_id.clone(),
                        component_code: item.component_code.clone(),
                        component_name: item.component_name.clone(),
                        component_type: item.component_type,
                        total_quantity: exploded.cumulative_quantity,
                        uom: item.uom.clone(),
                        occurrences: 1,
                    });
                }
            }
        }

        summary
    }
}

/// Per-call traversal state
struct Traversal<'r, R: ?Sized> {
    resolver: &'r R,
    max_depth: u8,
    /// Resolver answers memoized for the duration of one explosion
    resolved: HashMap<ComponentId, Option<Rc<BomSnapshot>>>,
    /// BOMs on the current root-to-node path, in order
    path: Vec<BomId>,
    on_path: HashSet<BomId>,
    levels: BTreeMap<u8, Vec<ExplodedItem>>,
    truncated: bool,
}

impl<'r, R> Traversal<'r, R>
where
    R: ComponentResolver + ?Sized,
{
    fn new(resolver: &'r R, max_depth: u8) -> Self {
        Self {
            resolver,
            max_depth,
            resolved: HashMap::new(),
            path: Vec::new(),
            on_path: HashSet::new(),
            levels: BTreeMap::new(),
            truncated: false,
        }
    }

    fn enter(&mut self, bom_id: &BomId) {
        self.path.push(bom_id.clone());
        self.on_path.insert(bom_id.clone());
    }

    fn leave(&mut self) {
        if let Some(bom_id) = self.path.pop() {
            self.on_path.remove(&bom_id);
        }
    }

    fn expand(
        &mut self,
        bom: &BomSnapshot,
        depth: u8,
        factor: f64,
        parent_path: &[ComponentId],
    ) -> EngineResult<()> {
        for item in bom.non_output_items() {
            let cumulative_quantity = item.quantity * factor;

            let mut path = parent_path.to_vec();
            path.push(item.component_id.clone());

            let sub_bom = if item.component_type == ComponentType::Wip {
                self.resolve(&item.component_id)?
            } else {
                None
            };

            if item.component_type == ComponentType::Wip && sub_bom.is_none() {
                tracing::warn!(
                    bom_id = %bom.bom_id,
                    component_id = %item.component_id,
                    "WIP component has no active BOM"
                );
            }

            self.levels.entry(depth).or_default().push(ExplodedItem {
                item: item.clone(),
                source_bom_id: bom.bom_id.clone(),
                depth,
                cumulative_quantity,
                has_sub_bom: sub_bom.is_some(),
                path: path.clone(),
            });

            let Some(sub_bom) = sub_bom else {
                continue;
            };

            if self.on_path.contains(&sub_bom.bom_id) {
                let mut cycle = self.path.iter().map(BomId::to_string).collect::<Vec<_>>();
                cycle.push(sub_bom.bom_id.to_string());
                return Err(BomError::CircularReference { path: cycle });
            }

            if depth + 1 >= self.max_depth {
                if sub_bom.non_output_items().next().is_some() {
                    self.truncated = true;
                }
                continue;
            }

            if !sub_bom.output_quantity.is_finite() || sub_bom.output_quantity <= 0.0 {
                return Err(BomError::InvalidSnapshot {
                    bom_id: sub_bom.bom_id.to_string(),
                    reason: format!(
                        "output quantity must be positive, got {}",
                        sub_bom.output_quantity
                    ),
                });
            }

            let child_factor = cumulative_quantity / sub_bom.output_quantity;
            tracing::debug!(
                parent = %bom.bom_id,
                child = %sub_bom.bom_id,
                depth = depth + 1,
                child_factor,
                "descending into sub-BOM"
            );

            self.enter(&sub_bom.bom_id);
            let outcome = self.expand(&sub_bom, depth + 1, child_factor, &path);
            self.leave();
            outcome?;
        }

        Ok(())
    }

    fn resolve(&mut self, component_id: &ComponentId) -> EngineResult<Option<Rc<BomSnapshot>>> {
        if let Some(cached) = self.resolved.get(component_id) {
            return Ok(cached.clone());
        }

        let resolved = self
            .resolver
            .resolve(component_id)
            .map_err(|e| BomError::ResolutionFailed {
                component_id: component_id.to_string(),
                details: format!("{:#}", e),
            })?
            .map(Rc::new);

        self.resolved.insert(component_id.clone(), resolved.clone());
        Ok(resolved)
    }
}
