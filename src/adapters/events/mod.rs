//! Event publisher adapters.
//!
//! Adapters implement the `EventPublisher` port for different environments:
//!
//! - `RedisEventPublisher` - Redis pub/sub, used in production
//! - `InMemoryEventPublisher` - In-process capture for testing

mod in_memory;
mod redis_publisher;

pub use in_memory::InMemoryEventPublisher;
pub use redis_publisher::RedisEventPublisher;
