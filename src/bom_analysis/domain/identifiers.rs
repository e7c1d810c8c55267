use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Maximum length for identifiers (security limit)
const MAX_IDENTIFIER_LENGTH: usize = 128;

fn validate_identifier(kind: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{} cannot be empty", kind);
    }

    if value.len() > MAX_IDENTIFIER_LENGTH {
        anyhow::bail!(
            "{} is too long ({} bytes). Maximum allowed: {} bytes",
            kind,
            value.len(),
            MAX_IDENTIFIER_LENGTH
        );
    }

    if value.chars().any(|c| c.is_control()) {
        anyhow::bail!("{} contains control characters", kind);
    }

    Ok(())
}

/// NewType wrapper for a BOM identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BomId(String);

impl BomId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_identifier("BOM id", &id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for a component (product) identifier
///
/// A component id doubles as the product id of the BOM that manufactures it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_identifier("Component id", &id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
