mod bom_comparator;
mod bom_explosion_engine;
mod bom_scaler;
mod report_metadata_generator;
mod yield_calculator;

pub use bom_comparator::BomComparator;
pub use bom_explosion_engine::{BomExplosionEngine, DEFAULT_MAX_DEPTH};
pub use bom_scaler::BomScaler;
pub use report_metadata_generator::ReportMetadataGenerator;
pub use yield_calculator::YieldCalculator;
