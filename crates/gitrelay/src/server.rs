use std::net::SocketAddr;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use gitrelay_nats::StreamPublisher;
use tracing::{info, instrument, warn};

use crate::channel::{ChannelTemplate, ChannelVars};
use crate::config::Config;
use crate::envelope::WebhookEnvelope;
use crate::signature;

const SIGNATURE_HEADER: &str = "x-hub-signature";
const EVENT_HEADER: &str = "x-github-event";

/// Per-process state shared by every request: the injected transport
/// handle, the compiled template and the secret. All read-only after
/// startup except the publisher, which is safe for concurrent use.
#[derive(Clone)]
pub struct AppState<P> {
    pub publisher: P,
    pub template: ChannelTemplate,
    pub secret: Option<String>,
}

/// Builds the relay router: one handler, mounted as the fallback so that
/// every path is served.
pub fn app<P: StreamPublisher>(state: AppState<P>) -> Router {
    Router::new().fallback(relay::<P>).with_state(state)
}

#[instrument(
    name = "relay.webhook",
    skip_all,
    fields(
        event = tracing::field::Empty,
        channel = tracing::field::Empty,
    )
)]
async fn relay<P: StreamPublisher>(
    State(state): State<AppState<P>>,
    request: Request,
) -> StatusCode {
    // The method gate comes first: non-POST requests are refused without
    // reading the body.
    if request.method() != Method::POST {
        return StatusCode::METHOD_NOT_ALLOWED;
    }

    let (parts, body) = request.into_parts();

    // Buffer the full body; it is both the signature input and the publish
    // payload. No size cap beyond the transport's own limits.
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    let sig = parts
        .headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match (&state.secret, sig) {
        (Some(secret), Some(sig)) => {
            if !signature::verify(sig, secret, &body) {
                warn!("webhook signature did not match");
                return StatusCode::UNAUTHORIZED;
            }
        }
        (Some(_), None) => {
            warn!("webhook signature header missing");
            return StatusCode::UNAUTHORIZED;
        }
        (None, Some(_)) => {
            // A signature we cannot verify signals misconfiguration on one
            // side or the other; do not pass it through.
            warn!("signature header present but no secret is configured");
            return StatusCode::UNAUTHORIZED;
        }
        (None, None) => {}
    }

    let event = parts
        .headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    tracing::Span::current().record("event", event);

    // Ping is the provider's endpoint health check; it carries no
    // repository and must not reach the decoder.
    if event == "ping" {
        info!("ignoring ping event");
        return StatusCode::OK;
    }

    let envelope = match WebhookEnvelope::decode(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "could not decode webhook payload");
            return StatusCode::UNPROCESSABLE_ENTITY;
        }
    };

    let channel = match state.template.render(&ChannelVars {
        owner: &envelope.repository.owner.login,
        repo: &envelope.repository.name,
        event,
    }) {
        Ok(channel) => channel,
        Err(e) => {
            warn!(error = %e, "channel template failed to render");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };
    tracing::Span::current().record("channel", channel.as_str());

    // The raw body goes out unmodified; downstream consumers may rely on
    // fields the envelope ignores.
    match state.publisher.publish(channel, body).await {
        Ok(()) => {
            info!("published webhook event");
            StatusCode::OK
        }
        Err(e) => {
            warn!(error = %e, "publish failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Binds the listener and serves until the process exits.
///
/// With a TLS pair configured the listener terminates TLS itself;
/// otherwise it serves plain HTTP.
pub async fn serve<P: StreamPublisher>(
    config: &Config,
    state: AppState<P>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = app(state);

    match (&config.http_tls_cert, &config.http_tls_key) {
        (Some(cert), Some(key)) => {
            let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert, key).await?;
            let addr = resolve_addr(&config.http_addr)?;
            info!(addr = %addr, "webhook listener serving HTTPS");
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await?;
        }
        _ => {
            let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
            info!(addr = %config.http_addr, "webhook listener serving HTTP");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn resolve_addr(addr: &str) -> std::io::Result<SocketAddr> {
    use std::net::ToSocketAddrs;
    addr.to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            format!("no address resolved for '{addr}'"),
        )
    })
}
