pub mod bom_item;
pub mod bom_snapshot;
pub mod comparison;
pub mod explosion;
pub mod identifiers;
pub mod report_metadata;
pub mod scaling;
pub mod yield_analysis;

pub use bom_item::{BomItem, ComponentType};
pub use bom_snapshot::{BomSnapshot, BomStatus};
pub use comparison::{
    BomVersionHeader, ComparisonResult, ComparisonSummary, FieldValue, ItemField, ModifiedItem,
};
pub use explosion::{ExplodedItem, ExplosionLevel, ExplosionResult, RawMaterialSummary};
pub use identifiers::{BomId, ComponentId};
pub use report_metadata::ReportMetadata;
pub use scaling::{
    ScaleOptions, ScaleResult, ScaleTarget, ScaledItem, DEFAULT_ROUND_DECIMALS, MAX_ROUND_DECIMALS,
};
pub use yield_analysis::{
    LossFactor, LossKind, YieldOptions, YieldProjection, YieldResult,
    DEFAULT_VARIANCE_THRESHOLD_PERCENT,
};
