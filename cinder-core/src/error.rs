use crate::Error;
use thiserror::Error;

/// Status reported by the engine for a failed call.
///
/// Drivers return it from every operation that yields a result code, the statement then decides
/// which [`StatementError`] kind it becomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (code {code})")]
pub struct EngineError {
    /// Engine result code (for SQLite the primary or extended result code).
    pub code: i32,
    /// Diagnostic message taken from the connection.
    pub message: String,
}

impl EngineError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// The failure kinds a [`Statement`](crate::Statement) can raise.
///
/// They travel inside [`Error`], possibly wrapped in some context. Use [`StatementError::of`] to
/// get them back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatementError {
    /// The SQL text was rejected by the engine, no statement was created.
    #[error("Cannot compile the statement: {0}")]
    Compile(EngineError),
    /// The statement is closed.
    #[error("{0}")]
    InvalidState(&'static str),
    /// A named placeholder has no match in the compiled statement.
    #[error("No such bind parameter `{0}`")]
    UnknownParameter(String),
    /// The host value cannot be represented by any engine storage type.
    #[error("{0}")]
    OutOfRange(String),
    /// Any other non zero result code reported during bind, step or reset.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl StatementError {
    /// Extract the statement error kind carried by `error`, if any.
    pub fn of(error: &Error) -> Option<&StatementError> {
        error.downcast_ref::<StatementError>()
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(..))
    }

    pub fn is_unknown_parameter(&self) -> bool {
        matches!(self, Self::UnknownParameter(..))
    }

    /// Engine code for the kinds that carry one.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Compile(e) | Self::Engine(e) => Some(e.code),
            _ => None,
        }
    }
}
