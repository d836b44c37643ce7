use std::fmt;
use std::time::Duration;

// ==============================================================================
// Error Kind
// ==============================================================================

/// Classification carried by every [`LithoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAddress,
    InvalidParameter,
    NetworkError,
    Timeout,
    TransactionFailed,
    InsufficientFunds,
    ContractError,
    /// The caller aborted a long-running operation through its cancellation token.
    Cancelled,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::TransactionFailed => "TRANSACTION_FAILED",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::ContractError => "CONTRACT_ERROR",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==============================================================================
// Client Error
// ==============================================================================

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by every public client operation.
///
/// Lower-level [`RpcError`] and [`DecodeError`] values are kept as the
/// `source()` so callers can walk the full cause chain.
#[derive(Debug)]
pub struct LithoError {
    kind: ErrorKind,
    message: String,
    source: Option<BoxError>,
}

impl LithoError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidAddress, message)
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParameter, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Wrap this error under a higher-level message. The kind is preserved
    /// and the original error becomes the cause.
    pub fn context(self, message: impl Into<String>) -> Self {
        let kind = self.kind;
        Self::new(kind, message).with_source(self)
    }
}

impl fmt::Display for LithoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for LithoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl From<RpcError> for LithoError {
    fn from(err: RpcError) -> Self {
        let kind = match err {
            RpcError::Timeout(_) => ErrorKind::Timeout,
            _ => ErrorKind::NetworkError,
        };
        Self::new(kind, err.to_string()).with_source(err)
    }
}

impl From<DecodeError> for LithoError {
    fn from(err: DecodeError) -> Self {
        Self::new(
            ErrorKind::NetworkError,
            format!("non-conformant RPC result: {err}"),
        )
        .with_source(err)
    }
}

// ==============================================================================
// Transport Errors
// ==============================================================================

/// Failure of a single JSON-RPC exchange.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("HTTP {status}: {text}")]
    HttpStatus { status: u16, text: String },

    #[error("RPC error {code}: {message}")]
    ServerError { code: i64, message: String },

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),
}

// ==============================================================================
// Decode Errors
// ==============================================================================

/// A raw RPC result that does not match the shape or encoding we expect.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid quantity `{value}` in `{field}`: {reason}")]
    InvalidQuantity {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("`{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("invalid receipt status `{0}`")]
    InvalidStatus(String),

    #[error("malformed {what}: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
