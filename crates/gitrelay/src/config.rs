use std::path::PathBuf;

use clap::Parser;
use gitrelay_nats::{NatsAuth, NatsConfig, TlsPair};

/// GitHub webhook → NATS JetStream relay.
///
/// Every flag also reads an environment variable, so the relay can be
/// configured entirely from the environment in container deployments.
#[derive(Debug, Parser)]
#[command(name = "gitrelay", version, about)]
pub struct Config {
    /// NATS server URL(s), comma-separated.
    #[arg(long, env = "NATS_URL", default_value = "nats://localhost:4222")]
    pub nats_url: String,

    /// Client certificate for mutual TLS with NATS.
    #[arg(long, env = "NATS_TLS_CERT", requires = "nats_tls_key")]
    pub nats_tls_cert: Option<PathBuf>,

    /// Client key for mutual TLS with NATS.
    #[arg(long, env = "NATS_TLS_KEY", requires = "nats_tls_cert")]
    pub nats_tls_key: Option<PathBuf>,

    /// NATS credentials file (takes priority over the other auth flags).
    #[arg(long, env = "NATS_CREDS")]
    pub nats_creds: Option<PathBuf>,

    /// NATS NKey seed.
    #[arg(long, env = "NATS_NKEY")]
    pub nats_nkey: Option<String>,

    /// NATS username.
    #[arg(long, env = "NATS_USER", requires = "nats_password")]
    pub nats_user: Option<String>,

    /// NATS password.
    #[arg(long, env = "NATS_PASSWORD", requires = "nats_user")]
    pub nats_password: Option<String>,

    /// NATS auth token.
    #[arg(long, env = "NATS_TOKEN")]
    pub nats_token: Option<String>,

    /// JetStream domain to publish through.
    #[arg(long, env = "RELAY_JS_DOMAIN")]
    pub js_domain: Option<String>,

    /// Connection name reported to the NATS server.
    #[arg(long, env = "RELAY_CLIENT_NAME", default_value = "github-webhook")]
    pub client_name: String,

    /// Channel-name template; {{.Owner}}, {{.Repo}} and {{.Event}} are
    /// substituted per event.
    #[arg(long, env = "RELAY_CHANNEL_TEMPLATE", default_value = "github.events")]
    pub channel_template: String,

    /// HTTP bind address.
    #[arg(long, env = "RELAY_HTTP_ADDR", default_value = "localhost:8080")]
    pub http_addr: String,

    /// TLS certificate for the inbound listener.
    #[arg(long, env = "RELAY_HTTP_TLS_CERT", requires = "http_tls_key")]
    pub http_tls_cert: Option<PathBuf>,

    /// TLS key for the inbound listener.
    #[arg(long, env = "RELAY_HTTP_TLS_KEY", requires = "http_tls_cert")]
    pub http_tls_key: Option<PathBuf>,

    /// Shared webhook secret; signature verification is disabled when unset.
    #[arg(long, env = "GITHUB_WEBHOOK_SECRET")]
    pub github_secret: Option<String>,
}

impl Config {
    /// Assemble the NATS connection config from the relay's flags.
    pub fn nats_config(&self) -> NatsConfig {
        NatsConfig {
            servers: NatsConfig::parse_servers(&self.nats_url),
            auth: NatsAuth::resolve(
                self.nats_creds.clone(),
                self.nats_nkey.clone(),
                self.nats_user.clone(),
                self.nats_password.clone(),
                self.nats_token.clone(),
            ),
            tls: match (&self.nats_tls_cert, &self.nats_tls_key) {
                (Some(cert), Some(key)) => Some(TlsPair {
                    cert: cert.clone(),
                    key: key.clone(),
                }),
                _ => None,
            },
            client_name: Some(self.client_name.clone()),
        }
    }
}
