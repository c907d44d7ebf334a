use std::error::Error;
use std::fmt;

/// Setup-time failures: raised while configuring services or fields, never
/// while answering a render-time lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No entity type is registered under this name.
    UnknownEntityType(String),
    /// The entity type descriptor is incomplete (missing table or key field).
    InvalidEntityType { entity: String, reason: String },
    /// A configuration value exists but has the wrong shape.
    InvalidValue { key: String, message: String },
    /// Unrecognised locale strategy name.
    InvalidStrategy(String),
    /// A field or locale name that cannot be spliced into SQL.
    InvalidIdentifier(String),
    /// The configuration source could not be read.
    Unreadable(String),
    /// The configuration document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownEntityType(name) => write!(f, "unknown entity type: {}", name),
            ConfigError::InvalidEntityType { entity, reason } => {
                write!(f, "invalid entity type {}: {}", entity, reason)
            }
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid configuration value for {}: {}", key, message)
            }
            ConfigError::InvalidStrategy(name) => write!(
                f,
                "invalid locale strategy {:?} (expected auto, filament, config or manual)",
                name
            ),
            ConfigError::InvalidIdentifier(ident) => {
                write!(f, "identifier cannot be used in a query: {:?}", ident)
            }
            ConfigError::Unreadable(msg) => write!(f, "configuration unreadable: {}", msg),
            ConfigError::Parse(msg) => write!(f, "configuration parse error: {}", msg),
        }
    }
}

impl Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Data-store failures. These are never recovered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
    /// A record could not be encoded into or decoded from its stored form.
    Decode { entity: String, message: String },
    /// Backend-specific failure (connection, statement, driver).
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "entity store lock poisoned during {}", operation)
            }
            StoreError::Decode { entity, message } => {
                write!(f, "failed to decode {} record: {}", entity, message)
            }
            StoreError::Backend(msg) => write!(f, "entity store error: {}", msg),
        }
    }
}

impl Error for StoreError {}

/// Umbrella error for entry points that both validate configuration and
/// touch the data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    Config(ConfigError),
    Store(StoreError),
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::Config(e) => write!(f, "{}", e),
            SelectError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl Error for SelectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SelectError::Config(e) => Some(e),
            SelectError::Store(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SelectError {
    fn from(err: ConfigError) -> Self {
        SelectError::Config(err)
    }
}

impl From<StoreError> for SelectError {
    fn from(err: StoreError) -> Self {
        SelectError::Store(err)
    }
}

impl SelectError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            SelectError::Config(_) => 400,
            SelectError::Store(_) => 500,
        }
    }
}
