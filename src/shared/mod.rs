/// Shared kernel - error types, result aliases and file-safety helpers
pub mod error;
pub mod result;
pub mod security;

pub use result::{EngineResult, Result};
