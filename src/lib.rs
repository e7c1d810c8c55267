//! bom-engine - Bill of Materials analysis engine
//!
//! This library compares BOM versions, explodes multi-level BOMs into their
//! purchased materials, scales batches and calculates theoretical yield,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`bom_analysis`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Config** (`config`): Config file loading and settings resolution
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use bom_engine::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let catalog = CatalogFileReader::open(Path::new("boms.yml"))?;
//! let resolver = CachingComponentResolver::new(&catalog);
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case (no writer: scaling stays in preview mode)
//! let use_case = AnalyzeBomUseCase::new(
//!     &catalog,
//!     resolver,
//!     None::<CatalogFileWriter>,
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = AnalysisRequest::Explode {
//!     bom_id: BomId::new("bread-v1")?,
//!     max_depth: DEFAULT_MAX_DEPTH,
//! };
//! let response = use_case.execute(request)?;
//!
//! // Format output
//! let output = JsonFormatter::new().format(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod bom_analysis;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::cache::CachingComponentResolver;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        CatalogFileReader, CatalogFileWriter, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, YamlFormatter};
    pub use crate::application::dto::{
        AnalysisReport, AnalysisRequest, AnalysisResponse, OutputFormat,
    };
    pub use crate::application::use_cases::AnalyzeBomUseCase;
    pub use crate::bom_analysis::domain::{
        BomId, BomItem, BomSnapshot, BomStatus, ComparisonResult, ComponentId, ComponentType,
        ExplosionResult, ItemField, LossFactor, LossKind, ScaleOptions, ScaleResult,
        ScaleTarget, YieldOptions, YieldResult,
    };
    pub use crate::bom_analysis::policies::RoundingPolicy;
    pub use crate::bom_analysis::services::{
        BomComparator, BomExplosionEngine, BomScaler, YieldCalculator, DEFAULT_MAX_DEPTH,
    };
    pub use crate::ports::inbound::BomAnalysisPort;
    pub use crate::ports::outbound::{
        BomSnapshotReader, BomWriter, ComponentResolver, OutputPresenter, ProgressReporter,
        ReportFormatter,
    };
    pub use crate::shared::error::{BomError, ErrorKind, WriteError};
    pub use crate::shared::{EngineResult, Result};
}
