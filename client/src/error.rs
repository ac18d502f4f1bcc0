//! Error taxonomy for the client core

use shared::WireError;
use thiserror::Error;

/// Failure of a single request to the game server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The transport failed: unreachable server, reset connection, transport timeout.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered, but not with something we can decode.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Protocol(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<WireError> for FetchError {
    fn from(err: WireError) -> Self {
        FetchError::Protocol(err.to_string())
    }
}

/// Violations of the board's one-time initialization contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board has not been initialized")]
    NotInitialized,

    #[error("board size is fixed at {current} for this session, got {requested}")]
    SizeChanged { current: usize, requested: usize },

    #[error("board size must be positive")]
    EmptyBoard,
}

/// Why one fetch+render cycle did not produce a render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors raised while bringing up a session.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to start sync thread: {0}")]
    Thread(#[from] std::io::Error),
}
