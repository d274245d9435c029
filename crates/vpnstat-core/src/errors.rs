use vpnstat_core_types::TickId;
use thiserror::Error;

/// Result type alias using StatusError
pub type Result<T> = std::result::Result<T, StatusError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log filtering and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Snapshot/Validation
    InvalidInput,
    InvalidName,
    DuplicateEntity,
    CapacityExceeded,
    NotFound,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    ExternalService,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidName => "ERR_INVALID_NAME",
            ExErrorKind::DuplicateEntity => "ERR_DUPLICATE_ENTITY",
            ExErrorKind::CapacityExceeded => "ERR_CAPACITY_EXCEEDED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// (operation, entity, tick) needed to make a log line actionable.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    tick_id: Option<TickId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            tick_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (service name) context
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add poll tick context
    pub fn with_tick_id(mut self, tick_id: TickId) -> Self {
        self.tick_id = Some(tick_id);
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

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the tick context, if any
    pub fn tick_id(&self) -> Option<&TickId> {
        self.tick_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {:?}", self.code(), self.kind)?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(tick_id) = &self.tick_id {
            write!(f, " [tick {}]", tick_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
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

/// Domain errors raised by the snapshot model and store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatusError {
    /// Entity name is empty, too long or contains forbidden characters
    #[error("Invalid entity name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The same identifier appears twice in one snapshot
    #[error("Duplicate entity in snapshot: {name}")]
    DuplicateEntity { name: String },

    /// Snapshot holds more entities than the configured bound
    #[error("Snapshot has {count} entities, limit is {max}")]
    CapacityExceeded { count: usize, max: usize },

    /// Configuration value out of range
    #[error("Invalid configuration for `{key}`: {reason}")]
    InvalidConfig { key: String, reason: String },

    /// Serialization error (TOML/JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from StatusError to ExError
impl From<StatusError> for ExError {
    fn from(err: StatusError) -> Self {
        match err {
            StatusError::InvalidName { name, reason } => ExError::new(ExErrorKind::InvalidName)
                .with_entity(name)
                .with_message(reason),

            StatusError::DuplicateEntity { name } => ExError::new(ExErrorKind::DuplicateEntity)
                .with_entity(name)
                .with_message("Entity appears more than once in snapshot"),

            StatusError::CapacityExceeded { count, max } => {
                ExError::new(ExErrorKind::CapacityExceeded)
                    .with_op("replace_current")
                    .with_message(format!("{} entities exceeds limit of {}", count, max))
            }

            StatusError::InvalidConfig { key, reason } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(format!("{}: {}", key, reason)),

            StatusError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<toml::de::Error> for StatusError {
    fn from(err: toml::de::Error) -> Self {
        StatusError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StatusError {
    fn from(err: serde_json::Error) -> Self {
        StatusError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Wrap an IO error with operation context
pub fn io_error(op: &str, err: std::io::Error) -> ExError {
    let kind = if err.kind() == std::io::ErrorKind::NotFound {
        ExErrorKind::NotFound
    } else {
        ExErrorKind::Io
    };
    ExError::new(kind).with_op(op).with_message(err.to_string())
}
