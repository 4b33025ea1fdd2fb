//! # jobpilot-broker
//!
//! AMQP broker connection manager for the jobpilot pipeline.
//!
//! This crate provides:
//! - [`BrokerConnection`]: connect with fixed-delay retries, transparent
//!   reconnect-on-drop, durable queue declaration, prefetch 1
//! - [`TaskPublisher`]: the publish seam workers depend on, so pipeline
//!   logic can be tested without a running broker
//!
//! ## Example
//!
//! ```rust,ignore
//! use jobpilot_broker::{BrokerConnection, RetryConfig};
//! use jobpilot_core::defaults;
//!
//! let mut broker =
//!     BrokerConnection::connect("amqp://localhost:5672/", RetryConfig::default()).await?;
//! let consumer = broker.consume(defaults::QUEUE_VACANCIES, "process-worker").await?;
//! ```

pub mod connection;
pub mod publish;

pub use connection::{BrokerConnection, RetryConfig};
pub use publish::TaskPublisher;
