use super::catalog_reader::CatalogFileReader;
use crate::bom_analysis::domain::{BomId, BomItem};
use crate::ports::outbound::BomWriter;
use crate::shared::error::{AppError, WriteError};
use crate::shared::security::{read_regular_file, validate_write_target};
use std::fs;
use std::path::PathBuf;

/// CatalogFileWriter adapter for persisting applied scale results
///
/// Rewrites the header quantity and the items of one BOM in place and
/// serializes the catalog back in its original format.
pub struct CatalogFileWriter {
    path: PathBuf,
}

impl CatalogFileWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl BomWriter for CatalogFileWriter {
    fn persist(
        &self,
        bom_id: &BomId,
        output_quantity: f64,
        items: &[BomItem],
    ) -> Result<(), WriteError> {
        let format = CatalogFileReader::detect_format(&self.path)?;
        let content = read_regular_file(&self.path)?;
        let mut catalog = format.parse(&content)?;

        let bom = catalog
            .boms
            .iter_mut()
            .find(|bom| &bom.bom_id == bom_id)
            .ok_or_else(|| WriteError::Rejected {
                reason: format!(
                    "BOM {} no longer exists in {}",
                    bom_id,
                    self.path.display()
                ),
            })?;

        if bom.items.len() != items.len() {
            return Err(WriteError::Conflict {
                bom_id: bom_id.to_string(),
            });
        }

        bom.output_quantity = output_quantity;
        bom.items = items.to_vec();

        let rendered = format.render(&catalog)?;
        validate_write_target(&self.path)?;
        fs::write(&self.path, rendered).map_err(|e| {
            anyhow::Error::from(AppError::FileWriteError {
                path: self.path.clone(),
                details: e.to_string(),
            })
        })?;

        tracing::info!(
            bom_id = %bom_id,
            path = %self.path.display(),
            "persisted scaled BOM"
        );
        Ok(())
    }
}
