use std::future::Future;

use async_nats::jetstream;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Error returned by [`StreamPublisher::publish`].
///
/// Both variants mean the message is not known to be on a durable stream;
/// callers report the failure and let the webhook source retry.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("publish to '{channel}' was not accepted: {reason}")]
    Send { channel: String, reason: String },
    #[error("no broker acknowledgement for '{channel}': {reason}")]
    Ack { channel: String, reason: String },
}

/// A single acknowledged publish to a named channel.
///
/// Implementations must be safe to call concurrently from many in-flight
/// requests; `Clone` hands out shared handles over one connection.
pub trait StreamPublisher: Send + Sync + Clone + 'static {
    fn publish(
        &self,
        channel: String,
        payload: Bytes,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;
}

/// Publishes to NATS JetStream and waits for the broker acknowledgement,
/// so a success means a durable stream accepted the message.
///
/// The relay does not create streams; a publish to a subject no stream
/// captures fails its acknowledgement.
#[derive(Clone)]
pub struct JetStreamPublisher {
    js: jetstream::Context,
}

impl JetStreamPublisher {
    pub fn new(client: async_nats::Client) -> Self {
        Self {
            js: jetstream::new(client),
        }
    }

    /// Publish through a named JetStream domain (isolated clusters,
    /// leaf-node deployments).
    pub fn with_domain(client: async_nats::Client, domain: &str) -> Self {
        Self {
            js: jetstream::with_domain(client, domain),
        }
    }
}

impl StreamPublisher for JetStreamPublisher {
    async fn publish(&self, channel: String, payload: Bytes) -> Result<(), PublishError> {
        let ack = self
            .js
            .publish(channel.clone(), payload)
            .await
            .map_err(|e| PublishError::Send {
                channel: channel.clone(),
                reason: e.to_string(),
            })?;

        ack.await.map_err(|e| PublishError::Ack {
            channel: channel.clone(),
            reason: e.to_string(),
        })?;

        debug!(channel = %channel, "publish acknowledged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_error_names_the_channel() {
        let err = PublishError::Send {
            channel: "o.r.push".into(),
            reason: "no responders".into(),
        };
        assert!(err.to_string().contains("'o.r.push'"));
        assert!(err.to_string().contains("no responders"));
    }

    #[test]
    fn ack_error_names_the_channel() {
        let err = PublishError::Ack {
            channel: "github.events".into(),
            reason: "timed out".into(),
        };
        assert!(err.to_string().contains("'github.events'"));
        assert!(err.to_string().contains("timed out"));
    }
}
