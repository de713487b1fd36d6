use clap::Parser;
use gitrelay::channel::ChannelTemplate;
use gitrelay::config::Config;
use gitrelay::server::{AppState, serve};
use gitrelay_nats::{JetStreamPublisher, connect};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    // An invalid template must stop the process before the listener binds.
    let template = ChannelTemplate::parse(&config.channel_template).map_err(|e| {
        format!(
            "invalid channel template '{}': {e}",
            config.channel_template
        )
    })?;

    let nats = connect(&config.nats_config()).await?;
    let publisher = match &config.js_domain {
        Some(domain) => JetStreamPublisher::with_domain(nats, domain),
        None => JetStreamPublisher::new(nats),
    };

    let state = AppState {
        publisher,
        template,
        secret: config.github_secret.clone(),
    };
    serve(&config, state).await
}
