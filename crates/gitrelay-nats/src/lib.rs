//! # gitrelay-nats
//!
//! NATS infrastructure for the gitrelay webhook bridge.
//!
//! This crate provides:
//! - Connection management with automatic reconnection and connection-event
//!   logging ([`connect`])
//! - Auth resolution (credentials file, NKey, user/password, token) plus
//!   optional mutual TLS ([`NatsConfig`])
//! - The [`StreamPublisher`] trait, a single acknowledged publish operation
//!   (monomorphized for zero cost, mockable in tests), and its JetStream
//!   implementation ([`JetStreamPublisher`])
//! - A recording mock publisher (`test-support` feature)
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitrelay_nats::{JetStreamPublisher, NatsConfig, StreamPublisher, connect};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = NatsConfig::from_url("nats://localhost:4222");
//!     let client = connect(&config).await.expect("failed to connect");
//!     let publisher = JetStreamPublisher::new(client);
//!     publisher
//!         .publish("github.events".into(), "{}".into())
//!         .await
//!         .expect("publish failed");
//! }
//! ```

pub mod config;
pub mod connect;
pub mod publish;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use config::{NatsAuth, NatsConfig, TlsPair};
pub use connect::{ConnectError, connect};
pub use publish::{JetStreamPublisher, PublishError, StreamPublisher};

#[cfg(any(test, feature = "test-support"))]
pub use mocks::MockPublisher;
