//! RIT client error types.

use rit_core::VenueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode {endpoint} response: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("Order book for {ticker} has no {side} levels")]
    EmptyBook { ticker: String, side: &'static str },

    #[error("Invalid API key header: {0}")]
    InvalidApiKey(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for VenueError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, body } => VenueError::Status { status, body },
            ClientError::Decode { .. } | ClientError::EmptyBook { .. } => {
                VenueError::Decode(err.to_string())
            }
            ClientError::Http(_) | ClientError::InvalidApiKey(_) => {
                VenueError::Transport(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_venue_status() {
        let venue: VenueError = ClientError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        }
        .into();
        assert_eq!(
            venue,
            VenueError::Status {
                status: 401,
                body: "unauthorized".to_string()
            }
        );
    }

    #[test]
    fn test_empty_book_maps_to_decode() {
        let venue: VenueError = ClientError::EmptyBook {
            ticker: "ALGO".to_string(),
            side: "bid",
        }
        .into();
        assert!(matches!(venue, VenueError::Decode(msg) if msg.contains("no bid levels")));
    }
}
