//! Error types, one enum per boundary.
//!
//! Board reveal/flag operations never fail: out-of-range coordinates and
//! moves outside `Playing` are inert no-ops. Only `initialize` can reject
//! its input.

use thiserror::Error;

/// Invalid board or curation configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("{mines} mines do not fit on a {rows}x{cols} board")]
    TooManyMines { mines: usize, rows: usize, cols: usize },

    #[error("a {rows}x{cols} board has more cells than can be addressed")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("curation needs at least one attempt")]
    NoAttempts,
}

/// `Board::initialize` contract violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("{mines} confusing concepts do not fit on a {rows}x{cols} board")]
    TooManyMines { mines: usize, rows: usize, cols: usize },

    #[error("a {rows}x{cols} board has more cells than can be addressed")]
    GridTooLarge { rows: usize, cols: usize },
}

/// Failure reported by a generation collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Transient failure (network, service error, bad payload). Costs one attempt.
    #[error("{0}")]
    Retryable(String),

    /// Non-retryable failure (credential missing or rejected). Aborts curation.
    #[error("{0}")]
    Fatal(String),
}

impl GenerationError {
    pub fn retryable(message: impl Into<String>) -> Self {
        Self::Retryable(message.into())
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal(message.into())
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

/// A generation batch that could not be turned into two label lists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no JSON object found in response")]
    NoObject,

    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("field `{0}` is missing or not a list")]
    MissingList(&'static str),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Why one curation attempt did not contribute labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("invalid batch: {0}")]
    Validation(#[from] ValidationError),
}

/// Curation failure; `Display` is the message shown to the player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurationError {
    #[error("no API credential is configured")]
    MissingCredential,

    #[error("generation failed on attempt {attempt}: {cause}")]
    Fatal { attempt: u32, cause: GenerationError },

    #[error(
        "not enough concepts after {attempts} attempts: got {related} related and {confusing} confusing{}",
        last_error_suffix(.last_error)
    )]
    Exhausted {
        attempts: u32,
        related: usize,
        confusing: usize,
        last_error: Option<AttemptError>,
    },
}

fn last_error_suffix(last_error: &Option<AttemptError>) -> String {
    last_error
        .as_ref()
        .map(|e| format!(". Last error: {e}"))
        .unwrap_or_default()
}

/// Failure of the end-to-end session flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("theme must not be empty")]
    EmptyTheme,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Curation(#[from] CurationError),

    #[error(transparent)]
    Board(#[from] BoardError),
}
