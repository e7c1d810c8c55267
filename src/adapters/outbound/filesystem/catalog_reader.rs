use super::catalog_format::{BomCatalog, CatalogFormat};
use crate::bom_analysis::domain::{BomId, BomSnapshot, ComponentId};
use crate::ports::outbound::{BomSnapshotReader, ComponentResolver};
use crate::shared::error::AppError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// CatalogFileReader adapter for BOM catalogs stored on disk
///
/// Implements both BomSnapshotReader (load by BOM id) and ComponentResolver
/// (active BOM by product id) over one catalog file. The file is read and
/// validated once, when the reader is opened.
///
/// Resolution only considers BOMs whose effectivity window covers the
/// reference date, today's local date unless set otherwise.
#[derive(Debug)]
pub struct CatalogFileReader {
    path: PathBuf,
    catalog: BomCatalog,
    reference_date: NaiveDate,
}

impl CatalogFileReader {
    /// Opens and validates a catalog file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or fails the file-safety checks
    /// - The extension is not one of `.yml`, `.yaml`, `.json`, `.toml`
    /// - The content cannot be parsed, or a BOM fails snapshot validation
    /// - Two BOMs share the same id
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::CatalogNotFound {
                path: path.to_path_buf(),
                suggestion: "Specify an existing catalog file with --catalog".to_string(),
            }
            .into());
        }

        let format = Self::detect_format(path)?;
        let content = read_regular_file(path)?;
        let catalog = format.parse(&content).map_err(|e| AppError::CatalogParseError {
            path: path.to_path_buf(),
            details: format!("{:#}", e),
        })?;

        Self::validate(path, &catalog)?;

        tracing::debug!(
            path = %path.display(),
            boms = catalog.boms.len(),
            "loaded BOM catalog"
        );

        Ok(Self {
            path: path.to_path_buf(),
            catalog,
            reference_date: chrono::Local::now().date_naive(),
        })
    }

    /// Resolves sub-assemblies as of `date` instead of today
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    pub(super) fn detect_format(path: &Path) -> Result<CatalogFormat> {
        CatalogFormat::from_path(path).ok_or_else(|| {
            AppError::CatalogParseError {
                path: path.to_path_buf(),
                details: "unsupported file extension".to_string(),
            }
            .into()
        })
    }

    pub(super) fn validate(path: &Path, catalog: &BomCatalog) -> Result<()> {
        let mut seen = HashSet::new();
        for bom in &catalog.boms {
            if !seen.insert(&bom.bom_id) {
                return Err(AppError::CatalogParseError {
                    path: path.to_path_buf(),
                    details: format!("BOM id {} appears more than once", bom.bom_id),
                }
                .into());
            }
            bom.validate()?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn boms(&self) -> &[BomSnapshot] {
        &self.catalog.boms
    }
}

impl BomSnapshotReader for CatalogFileReader {
    fn load_snapshot(&self, bom_id: &BomId) -> Result<BomSnapshot> {
        self.catalog
            .boms
            .iter()
            .find(|bom| &bom.bom_id == bom_id)
            .cloned()
            .ok_or_else(|| {
                AppError::BomNotFound {
                    bom_id: bom_id.to_string(),
                    catalog: self.path.clone(),
                }
                .into()
            })
    }
}

impl ComponentResolver for CatalogFileReader {
    fn resolve(&self, component_id: &ComponentId) -> Result<Option<BomSnapshot>> {
        let mut active = self
            .catalog
            .boms
            .iter()
            .filter(|bom| {
                bom.is_active()
                    && bom.is_effective_on(self.reference_date)
                    && &bom.product_id == component_id
            });

        let first = active.next();
        if first.is_some() && active.next().is_some() {
            tracing::warn!(
                component_id = %component_id,
                date = %self.reference_date,
                "several active BOMs for component, using the first in catalog order"
            );
        }

        Ok(first.cloned())
    }
}
