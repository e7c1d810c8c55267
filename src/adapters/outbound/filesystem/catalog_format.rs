use crate::bom_analysis::domain::BomSnapshot;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout of a BOM catalog: a top-level `boms` list
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BomCatalog {
    #[serde(default)]
    pub boms: Vec<BomSnapshot>,
}

/// Serialization format of a catalog file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
    Toml,
}

impl CatalogFormat {
    /// Detects the format from the file extension (`.yml`, `.yaml`, `.json`, `.toml`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yml" | "yaml" => Some(CatalogFormat::Yaml),
            "json" => Some(CatalogFormat::Json),
            "toml" => Some(CatalogFormat::Toml),
            _ => None,
        }
    }

    pub fn parse(self, content: &str) -> Result<BomCatalog> {
        let catalog = match self {
            CatalogFormat::Yaml => serde_yaml_ng::from_str(content)?,
            CatalogFormat::Json => serde_json::from_str(content)?,
            CatalogFormat::Toml => toml::from_str(content)?,
        };
        Ok(catalog)
    }

    pub fn render(self, catalog: &BomCatalog) -> Result<String> {
        let content = match self {
            CatalogFormat::Yaml => serde_yaml_ng::to_string(catalog)?,
            CatalogFormat::Json => serde_json::to_string_pretty(catalog)?,
            CatalogFormat::Toml => toml::to_string_pretty(catalog)?,
        };
        Ok(content)
    }
}
