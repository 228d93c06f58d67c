use crate::form::FormError;
use crate::gateway::MutationOutcome;
use thiserror::Error;

/// Anything that went wrong between the client and the games backend.
///
/// Surfaced to the caller as-is: the core never retries and never swallows
/// one of these.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode backend response: {0}")]
    Decode(String),

    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("could not build HTTP client: {0}")]
    Client(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Request { source, .. } if source.is_timeout())
    }
}

/// Errors surfaced by the [`GameLibrary`](crate::library::GameLibrary) facade.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend accepted the mutation but the follow-up reload failed.
    /// The local collection still shows the pre-mutation state.
    #[error("{outcome} succeeded but the library could not be refreshed: {source}")]
    RefreshAfterMutation {
        outcome: MutationOutcome,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    Form(#[from] FormError),
}

impl LibraryError {
    /// The mutation that went through, if this error happened after one.
    pub fn applied_mutation(&self) -> Option<&MutationOutcome> {
        match self {
            LibraryError::RefreshAfterMutation { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
