//! In-memory event publisher for testing.
//!
//! Captures every published message for assertions.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in production.
//! It uses `.expect()` on lock operations which will panic if locks are poisoned.
//! Production code should use [`super::RedisEventPublisher`].

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::webhook::ChannelEvent;
use crate::ports::{EventPublisher, PublishError};

/// In-memory publisher for testing.
///
/// # Example
///
/// ```ignore
/// let publisher = Arc::new(InMemoryEventPublisher::new());
/// let translator = EventTranslator::new(publisher.clone());
///
/// // ...deliver a notification...
///
/// assert_eq!(publisher.message_count(), 1);
/// assert!(publisher.has_event("stream_started"));
/// ```
#[derive(Default)]
pub struct InMemoryEventPublisher {
    published: RwLock<Vec<Vec<u8>>>,
    failure: RwLock<Option<PublishError>>,
}

impl InMemoryEventPublisher {
    /// Creates a new empty publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a publisher that rejects every message with `error`.
    pub fn failing(error: PublishError) -> Self {
        let publisher = Self::new();
        publisher.fail_with(Some(error));
        publisher
    }

    // === Test Helpers ===

    /// Sets or clears the error returned by `publish`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail_with(&self, error: Option<PublishError>) {
        *self
            .failure
            .write()
            .expect("InMemoryEventPublisher: failure write lock poisoned") = error;
    }

    /// Returns all published messages as raw bytes.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn published_messages(&self) -> Vec<Vec<u8>> {
        self.published
            .read()
            .expect("InMemoryEventPublisher: published lock poisoned")
            .clone()
    }

    /// Returns all published messages decoded as channel events.
    ///
    /// Messages that do not decode are skipped.
    pub fn published_events(&self) -> Vec<ChannelEvent> {
        self.published_messages()
            .iter()
            .filter_map(|m| serde_json::from_slice(m).ok())
            .collect()
    }

    /// Checks if an event of the given kind was published.
    pub fn has_event(&self, kind: &str) -> bool {
        self.published_events().iter().any(|e| e.kind() == kind)
    }

    /// Returns count of published messages.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn message_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventPublisher: published lock poisoned")
            .len()
    }

    /// Clears all published messages (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventPublisher: published write lock poisoned")
            .clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, message: Vec<u8>) -> Result<(), PublishError> {
        if let Some(error) = self
            .failure
            .read()
            .expect("InMemoryEventPublisher: failure lock poisoned")
            .clone()
        {
            return Err(error);
        }

        self.published
            .write()
            .expect("InMemoryEventPublisher: published write lock poisoned")
            .push(message);
        Ok(())
    }
}
