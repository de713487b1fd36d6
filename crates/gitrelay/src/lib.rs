//! # gitrelay
//!
//! GitHub webhook receiver that republishes raw event payloads to NATS
//! JetStream channels.
//!
//! ## How it works
//!
//! 1. GitHub POSTs a webhook delivery (any path) with `X-Hub-Signature` and
//!    `X-GitHub-Event` headers plus a JSON payload.
//! 2. The relay verifies the HMAC-SHA1 signature against the configured
//!    shared secret. A configured secret with a missing or wrong signature
//!    rejects the request; so does a signature arriving when no secret is
//!    configured.
//! 3. `ping` events are acknowledged and dropped; they carry no repository.
//! 4. The payload is partially decoded for `repository.name` and
//!    `repository.owner.login`, and the channel name is rendered from the
//!    configured template over `{Owner, Repo, Event}`.
//! 5. The raw, unmodified body is published to JetStream under that channel
//!    and the broker acknowledgement is awaited before responding.
//!
//! ## Channel template
//!
//! `--channel-template` takes literal text with `{{.Owner}}`, `{{.Repo}}`
//! and `{{.Event}}` placeholders, e.g. `{{.Owner}}.{{.Repo}}.{{.Event}}`.
//! The default, `github.events`, routes every event to one static channel.
//! An invalid template stops the process before the listener binds.
//!
//! ## Responses
//!
//! Status code only, never a body: 200 (published, or ignored ping),
//! 401 (signature policy violation), 405 (non-POST), 422 (undecodable
//! payload), 500 (body read / template render), 503 (publish not
//! acknowledged; the webhook source should retry).

pub mod channel;
pub mod config;
pub mod envelope;
pub mod server;
pub mod signature;

pub use channel::{ChannelTemplate, ChannelVars, TemplateError};
pub use config::Config;
pub use server::{AppState, app, serve};
