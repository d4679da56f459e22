//! EventPublisher port - Interface for handing canonical events downstream.
//!
//! The publisher is a black box that accepts serialized bytes and reports
//! success or failure. Transport (Redis pub/sub, in-memory for tests) is up
//! to the adapter.

use async_trait::async_trait;
use thiserror::Error;

/// Port for publishing serialized channel events.
///
/// Implementations must return only once the message has been accepted by
/// the transport; the webhook dispatcher acknowledges the delivery after
/// `publish` returns `Ok`.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, message: Vec<u8>) -> Result<(), PublishError>;
}

/// Failure to publish a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("publisher connection failed: {0}")]
    Connection(String),

    #[error("publisher rejected message: {0}")]
    Rejected(String),
}

impl PublishError {
    pub fn connection(message: impl Into<String>) -> Self {
        PublishError::Connection(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        PublishError::Rejected(message.into())
    }
}
