//! Redis pub/sub event publisher for production deployments.
//!
//! Each canonical event is sent with a single `PUBLISH` on the configured
//! channel. Pub/sub is fire-and-forget: a message published while no
//! consumer is subscribed is dropped by Redis, which is logged but not
//! treated as a failure.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{EventPublisher, PublishError};

/// Publishes serialized channel events to a Redis pub/sub channel.
#[derive(Clone)]
pub struct RedisEventPublisher {
    conn: MultiplexedConnection,
    channel: String,
}

impl RedisEventPublisher {
    pub fn new(conn: MultiplexedConnection, channel: impl Into<String>) -> Self {
        Self {
            conn,
            channel: channel.into(),
        }
    }

    /// Opens a multiplexed connection to `url`.
    pub async fn connect(url: &str, channel: impl Into<String>) -> Result<Self, PublishError> {
        let client = redis::Client::open(url)
            .map_err(|e: redis::RedisError| PublishError::connection(e.to_string()))?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e: redis::RedisError| PublishError::connection(e.to_string()))?;
        Ok(Self::new(conn, channel))
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, message: Vec<u8>) -> Result<(), PublishError> {
        let mut conn = self.conn.clone();

        let receivers: i64 = conn
            .publish(&self.channel, message)
            .await
            .map_err(|e: redis::RedisError| {
                if e.is_io_error() || e.is_connection_dropped() {
                    PublishError::connection(e.to_string())
                } else {
                    PublishError::rejected(e.to_string())
                }
            })?;

        if receivers == 0 {
            tracing::warn!(channel = %self.channel, "Published event had no subscribers");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Note: Redis integration tests require a running Redis instance
    // and are run separately from unit tests.
    //
    // #[tokio::test]
    // #[ignore] // Run with: cargo test -- --ignored
    // async fn publishes_to_channel() {
    //     let publisher = RedisEventPublisher::connect("redis://127.0.0.1/", "twitch-events")
    //         .await
    //         .unwrap();
    //     publisher.publish(b"{}".to_vec()).await.unwrap();
    // }
}
