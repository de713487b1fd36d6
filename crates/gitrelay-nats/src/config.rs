use std::path::PathBuf;

/// NATS authentication method.
///
/// When resolved from individual settings, priority order is:
/// 1. Credentials file
/// 2. NKey seed
/// 3. User/password
/// 4. Token
/// 5. No auth
#[derive(Debug, Clone, Default)]
pub enum NatsAuth {
    Credentials(PathBuf),
    NKey(String),
    UserPassword { user: String, password: String },
    Token(String),
    #[default]
    None,
}

impl NatsAuth {
    /// Label for log fields. Never contains secret material.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Credentials(_) => "credentials file",
            Self::NKey(_) => "NKey",
            Self::UserPassword { .. } => "user/password",
            Self::Token(_) => "token",
            Self::None => "none",
        }
    }

    /// Pick the highest-priority auth method among the configured ones.
    pub fn resolve(
        creds: Option<PathBuf>,
        nkey: Option<String>,
        user: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Self {
        if let Some(path) = creds {
            return Self::Credentials(path);
        }
        if let Some(seed) = nkey {
            return Self::NKey(seed);
        }
        if let (Some(user), Some(password)) = (user, password) {
            return Self::UserPassword { user, password };
        }
        if let Some(token) = token {
            return Self::Token(token);
        }
        Self::None
    }
}

/// Client certificate/key pair for mutual TLS with the NATS server.
#[derive(Debug, Clone)]
pub struct TlsPair {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct NatsConfig {
    pub servers: Vec<String>,
    pub auth: NatsAuth,
    /// When set, the connection presents this client certificate and
    /// requires TLS on the wire.
    pub tls: Option<TlsPair>,
    /// Connection name reported to the server (shows up in monitoring).
    pub client_name: Option<String>,
}

impl NatsConfig {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            servers: vec![url.into()],
            auth: NatsAuth::None,
            tls: None,
            client_name: None,
        }
    }

    /// Split a comma-separated server list, dropping empty entries.
    pub fn parse_servers(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
