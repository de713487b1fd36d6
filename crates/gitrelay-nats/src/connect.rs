use std::time::Duration;

use async_nats::{Client, ConnectOptions, Event};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::{NatsAuth, NatsConfig};

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to load NATS credentials file: {0}")]
    Credentials(#[source] std::io::Error),
    #[error("failed to connect to NATS servers {servers:?}: {source}")]
    Connection {
        servers: Vec<String>,
        #[source]
        source: async_nats::ConnectError,
    },
}

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(30);

/// Exponential backoff for reconnect attempts, capped at 30s.
fn reconnect_delay(attempts: usize) -> Duration {
    Duration::from_secs(std::cmp::min(
        MAX_RECONNECT_DELAY.as_secs(),
        2u64.saturating_pow(attempts as u32),
    ))
}

async fn log_event(event: Event) {
    match event {
        Event::Connected => info!("NATS connected"),
        Event::Disconnected => warn!("NATS disconnected, reconnecting"),
        Event::ServerError(err) => warn!(error = %err, "NATS server error"),
        Event::ClientError(err) => warn!(error = %err, "NATS client error"),
        Event::SlowConsumer(sid) => warn!(sid, "NATS slow consumer"),
        Event::LameDuckMode => warn!("NATS server entering lame duck mode"),
        Event::Closed => info!("NATS connection closed"),
        Event::Draining => info!("NATS connection draining"),
    }
}

async fn build_options(config: &NatsConfig) -> Result<ConnectOptions, ConnectError> {
    let mut opts = match &config.auth {
        NatsAuth::Credentials(path) => ConnectOptions::with_credentials_file(path.clone())
            .await
            .map_err(ConnectError::Credentials)?,
        NatsAuth::NKey(seed) => ConnectOptions::with_nkey(seed.clone()),
        NatsAuth::UserPassword { user, password } => {
            ConnectOptions::with_user_and_password(user.clone(), password.clone())
        }
        NatsAuth::Token(token) => ConnectOptions::with_token(token.clone()),
        NatsAuth::None => ConnectOptions::new(),
    };

    if let Some(tls) = &config.tls {
        opts = opts
            .add_client_certificate(tls.cert.clone(), tls.key.clone())
            .require_tls(true);
    }
    if let Some(name) = &config.client_name {
        opts = opts.name(name);
    }

    // No retry_on_initial_connect: an unreachable server at startup must
    // surface as a fatal error, not a silently pending connection.
    Ok(opts
        .connection_timeout(CONNECTION_TIMEOUT)
        .reconnect_delay_callback(reconnect_delay)
        .event_callback(|event| async move { log_event(event).await }))
}

/// Connect to NATS.
///
/// The initial connection fails fast; once established, the client
/// reconnects automatically with exponential backoff.
#[instrument(
    name = "nats.connect",
    skip(config),
    fields(servers = ?config.servers, auth = %config.auth.description())
)]
pub async fn connect(config: &NatsConfig) -> Result<Client, ConnectError> {
    let opts = build_options(config).await?;

    match opts.connect(&config.servers).await {
        Ok(client) => {
            info!("connected to NATS");
            Ok(client)
        }
        Err(e) => {
            warn!(error = %e, "failed to connect to NATS");
            Err(ConnectError::Connection {
                servers: config.servers.clone(),
                source: e,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconnect_delay_is_exponential() {
        assert_eq!(reconnect_delay(0).as_secs(), 1);
        assert_eq!(reconnect_delay(1).as_secs(), 2);
        assert_eq!(reconnect_delay(3).as_secs(), 8);
    }

    #[test]
    fn reconnect_delay_caps_at_max() {
        assert_eq!(reconnect_delay(5).as_secs(), 30);
        assert_eq!(reconnect_delay(100).as_secs(), 30);
        assert_eq!(reconnect_delay(usize::MAX).as_secs(), 30);
    }

    #[tokio::test]
    async fn log_event_handles_all_variants() {
        use async_nats::{ClientError, ServerError};

        log_event(Event::Connected).await;
        log_event(Event::Disconnected).await;
        log_event(Event::ServerError(ServerError::Other("test".to_string()))).await;
        log_event(Event::ClientError(ClientError::Other("test".to_string()))).await;
        log_event(Event::SlowConsumer(42)).await;
        log_event(Event::LameDuckMode).await;
        log_event(Event::Closed).await;
        log_event(Event::Draining).await;
    }

    #[test]
    fn credentials_error_reports_source() {
        let err = ConnectError::Credentials(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(err.to_string().contains("credentials file"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
