use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems and schedulers to distinguish between
/// different types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - analysis completed without flags
    Success = 0,
    /// Analysis completed but raised a flag (yield variance, precision warnings)
    AnalysisFlagged = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (catalog I/O, engine error, write-back failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::AnalysisFlagged => write!(f, "Analysis Flagged (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Discriminant of [`BomError`], free of payload.
///
/// API handlers match on this to choose a status code and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidComparison,
    ProductMismatch,
    CircularReference,
    ResolutionFailed,
    MissingScaleParam,
    InvalidScale,
    MissingWriter,
    InvalidYield,
    InvalidSnapshot,
    WriteError,
}

/// Failure reported by a [`BomWriter`](crate::ports::outbound::BomWriter).
///
/// The engine passes these through unmodified.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("write rejected: {reason}")]
    Rejected { reason: String },

    #[error("BOM {bom_id} was modified concurrently")]
    Conflict { bom_id: String },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Typed errors produced by the BOM analysis engine.
#[derive(Debug, Error)]
pub enum BomError {
    #[error("cannot compare a BOM to itself: {bom_id}")]
    InvalidComparison { bom_id: String },

    #[error("cannot compare BOMs of different products: {left_product} vs {right_product}")]
    ProductMismatch {
        left_product: String,
        right_product: String,
    },

    #[error("circular BOM reference detected: {}", .path.join(" -> "))]
    CircularReference { path: Vec<String> },

    #[error("failed to resolve sub-BOM for component {component_id}: {details}")]
    ResolutionFailed {
        component_id: String,
        details: String,
    },

    #[error("either a target batch size or a scale factor must be provided")]
    MissingScaleParam,

    #[error("invalid scale: {reason}")]
    InvalidScale { reason: String },

    #[error("apply mode requires a BOM writer")]
    MissingWriter,

    #[error("invalid yield: {reason}")]
    InvalidYield { reason: String },

    #[error("invalid BOM snapshot {bom_id}: {reason}")]
    InvalidSnapshot { bom_id: String, reason: String },

    #[error(transparent)]
    WriteFailed(#[from] WriteError),
}

impl BomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BomError::InvalidComparison { .. } => ErrorKind::InvalidComparison,
            BomError::ProductMismatch { .. } => ErrorKind::ProductMismatch,
            BomError::CircularReference { .. } => ErrorKind::CircularReference,
            BomError::ResolutionFailed { .. } => ErrorKind::ResolutionFailed,
            BomError::MissingScaleParam => ErrorKind::MissingScaleParam,
            BomError::InvalidScale { .. } => ErrorKind::InvalidScale,
            BomError::MissingWriter => ErrorKind::MissingWriter,
            BomError::InvalidYield { .. } => ErrorKind::InvalidYield,
            BomError::InvalidSnapshot { .. } => ErrorKind::InvalidSnapshot,
            BomError::WriteFailed(_) => ErrorKind::WriteError,
        }
    }

    pub(crate) fn invalid_scale(reason: impl Into<String>) -> Self {
        BomError::InvalidScale {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_yield(reason: impl Into<String>) -> Self {
        BomError::InvalidYield {
            reason: reason.into(),
        }
    }
}

/// Application-level errors raised by adapters and the CLI.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("BOM catalog not found: {path}\n\n💡 Hint: {suggestion}")]
    CatalogNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse BOM catalog: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the catalog is valid YAML, JSON or TOML with a top-level `boms` list")]
    CatalogParseError { path: PathBuf, details: String },

    #[error("BOM not found: {bom_id}\n\n💡 Hint: Check the BOM id against the catalog {catalog}")]
    BomNotFound { bom_id: String, catalog: PathBuf },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for request builders and CLI arguments
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
