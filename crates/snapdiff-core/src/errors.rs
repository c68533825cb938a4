use thiserror::Error;

/// Result type alias using SnapDiffError
pub type Result<T> = std::result::Result<T, SnapDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log assertions. The diff engine itself never
/// fails; every kind here belongs to the document boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Snapshot bytes are not JSON, or the JSON root is not an object
    InvalidSnapshot,
    /// Reading a snapshot document failed
    Io,
    /// Producing output from a diff failed
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context
/// (operation, which snapshot side) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    side: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            side: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add snapshot side context (`current` or `pending`)
    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.side = Some(side.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn side(&self) -> Option<&str> {
        self.side.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(side) = &self.side {
            write!(f, " (snapshot: {})", side)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Failures at the snapshot document boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapDiffError {
    /// Document bytes are not valid JSON
    #[error("Snapshot is not valid JSON: {message}")]
    InvalidJson { message: String },

    /// Document is JSON but not shaped like a snapshot
    #[error("Invalid snapshot document: {reason}")]
    InvalidDocument { reason: String },

    /// Reading a document from disk failed
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Serializing a diff failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SnapDiffError> for ExError {
    fn from(err: SnapDiffError) -> Self {
        match err {
            SnapDiffError::InvalidJson { message } => {
                ExError::new(ExErrorKind::InvalidSnapshot).with_message(message)
            }
            SnapDiffError::InvalidDocument { reason } => {
                ExError::new(ExErrorKind::InvalidSnapshot).with_message(reason)
            }
            SnapDiffError::Io { path, message } => {
                ExError::new(ExErrorKind::Io).with_message(format!("{}: {}", path, message))
            }
            SnapDiffError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SnapDiffError {
    fn from(err: serde_json::Error) -> Self {
        SnapDiffError::Serialization {
            message: err.to_string(),
        }
    }
}
