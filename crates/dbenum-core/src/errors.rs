use thiserror::Error;

/// Result type alias using DbEnumError
pub type Result<T> = std::result::Result<T, DbEnumError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and testing. Configuration errors and rejected column
/// values share `InvalidConfiguration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Registration/Validation
    InvalidConfiguration,
    RegistrationFailure,
    NotFound,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidConfiguration => "ERR_INVALID_CONFIGURATION",
            ExErrorKind::RegistrationFailure => "ERR_REGISTRATION_FAILURE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// debugging. Store-level failures are reported through this type directly.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    key: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
    expected: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            key: None,
            message: String::new(),
            source: None,
            expected: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add enum type name context
    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Add registry key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
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

    /// Add the accepted values (used when a column value was rejected)
    pub fn with_expected(mut self, values: Vec<String>) -> Self {
        self.expected = Some(values);
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

    /// Get the enum type name context, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Get the registry key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Get the accepted values, if any
    pub fn expected(&self) -> Option<&[String]> {
        self.expected.as_deref()
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
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
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

/// Error taxonomy for enum registration and conversion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbEnumError {
    // ===== Configuration Errors =====
    /// Registration was given a type without the enumerated capability
    #[error("Provided enum type \"{type_name}\" is not valid. Enums must implement \"{capability}\".")]
    InvalidEnumType {
        type_name: String,
        capability: String,
    },

    /// A column value is outside the bound enum's valid set
    #[error("The value \"{value}\" is not valid for the enum \"{enum_name}\". Expected one of [{}]", quote_list(.expected))]
    InvalidEnumValue {
        value: String,
        enum_name: String,
        expected: Vec<String>,
    },

    /// Registry configuration could not be read or parsed
    #[error("Invalid registry configuration: {reason}")]
    InvalidConfig { reason: String },

    // ===== Registry Errors =====
    /// The registry refused the operation
    #[error("Registration of type \"{key}\" failed: {reason}")]
    RegistrationFailure { key: String, reason: String },

    /// No type is registered under the given name
    #[error("Unknown column type requested: \"{name}\"")]
    UnknownType { name: String },

    // ===== Generic Errors =====
    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Render values as `"a", "b", "c"`
pub(crate) fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Conversion from DbEnumError to ExError
impl From<DbEnumError> for ExError {
    fn from(err: DbEnumError) -> Self {
        let message = err.to_string();
        match err {
            DbEnumError::InvalidEnumType { type_name, .. } => {
                ExError::new(ExErrorKind::InvalidConfiguration)
                    .with_op("register_enum_type")
                    .with_type_name(type_name)
                    .with_message(message)
            }

            DbEnumError::InvalidEnumValue {
                enum_name,
                expected,
                ..
            } => ExError::new(ExErrorKind::InvalidConfiguration)
                .with_op("decode")
                .with_type_name(enum_name)
                .with_expected(expected)
                .with_message(message),

            DbEnumError::InvalidConfig { .. } => ExError::new(ExErrorKind::InvalidConfiguration)
                .with_op("load_config")
                .with_message(message),

            DbEnumError::RegistrationFailure { key, .. } => {
                ExError::new(ExErrorKind::RegistrationFailure)
                    .with_key(key)
                    .with_message(message)
            }

            DbEnumError::UnknownType { name } => ExError::new(ExErrorKind::NotFound)
                .with_op("get_type")
                .with_key(name)
                .with_message(message),

            DbEnumError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from toml::de::Error to DbEnumError
impl From<toml::de::Error> for DbEnumError {
    fn from(err: toml::de::Error) -> Self {
        DbEnumError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
