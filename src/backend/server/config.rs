/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables,
 * with defaults suited to local development.
 *
 * # Variables
 *
 * | Variable | Default |
 * |---|---|
 * | `WORKSPACE_ROOT` | `Stored` |
 * | `SERVER_PORT` | `5000` |
 * | `PUBLIC_BASE_URL` | `http://localhost:<port>` |
 * | `CLIENT_APP_URL` | `http://localhost:3000` |
 * | `CORS_ORIGINS` | `http://localhost:3000` (comma-separated) |
 * | `SESSION_COOKIE_SECURE` | `false` |
 * | `SESSION_LIFETIME_MINUTES` | `10080` |
 * | `SESSION_STORE_PATH` | `<workspace root>/sessions.db` |
 * | `GITHUB_CLIENT_ID` / `GITHUB_CLIENT_SECRET` | unset |
 * | `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` | unset |
 *
 * # Error Handling
 *
 * Malformed values fail startup with a `ConfigError`. `CORS_ORIGINS` must
 * list explicit origins; `*` is rejected. Missing provider credentials do
 * not fail startup: that provider's login is disabled and the server
 * continues without it.
 */
use std::path::PathBuf;

use thiserror::Error;

use crate::backend::auth::Provider;

pub const DEFAULT_WORKSPACE_ROOT: &str = "Stored";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CLIENT_APP_URL: &str = "http://localhost:3000";
pub const DEFAULT_SESSION_LIFETIME_MINUTES: i64 = 7 * 24 * 60;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// OAuth application credentials for one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Root directory holding one workspace directory per identity
    pub workspace_root: PathBuf,
    pub port: u16,
    /// Externally visible base URL, used for OAuth redirect URIs
    pub public_base_url: String,
    /// Where the browser is sent after a successful login
    pub client_app_url: String,
    /// Origins allowed to call the API with credentials
    pub cors_origins: Vec<String>,
    pub cookie_secure: bool,
    /// Idle time after which a session expires
    pub session_lifetime_minutes: i64,
    /// SQLite file holding sessions; defaults to a file in the workspace root
    pub session_store: Option<PathBuf>,
    pub github: Option<ProviderCredentials>,
    pub google: Option<ProviderCredentials>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from(DEFAULT_WORKSPACE_ROOT),
            port: DEFAULT_PORT,
            public_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            client_app_url: DEFAULT_CLIENT_APP_URL.to_string(),
            cors_origins: vec![DEFAULT_CLIENT_APP_URL.to_string()],
            cookie_secure: false,
            session_lifetime_minutes: DEFAULT_SESSION_LIFETIME_MINUTES,
            session_store: None,
            github: None,
            google: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use flowspace::backend::server::config::ServerConfig;
    ///
    /// let config = ServerConfig::from_env().expect("invalid configuration");
    /// println!("listening on {}", config.port);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("SERVER_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "SERVER_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let cookie_secure = match get("SESSION_COOKIE_SECURE") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidValue {
                name: "SESSION_COOKIE_SECURE",
                value,
            })?,
            None => false,
        };

        let session_lifetime_minutes = match get("SESSION_LIFETIME_MINUTES") {
            Some(value) => match value.parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "SESSION_LIFETIME_MINUTES",
                        value,
                    })
                }
            },
            None => DEFAULT_SESSION_LIFETIME_MINUTES,
        };

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(|origin| origin.trim().trim_end_matches('/').to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_CLIENT_APP_URL.to_string()]);
        if let Some(wildcard) = cors_origins.iter().find(|origin| origin.as_str() == "*") {
            return Err(ConfigError::InvalidValue {
                name: "CORS_ORIGINS",
                value: wildcard.clone(),
            });
        }

        let credentials = |id: &str, secret: &str| match (get(id), get(secret)) {
            (Some(client_id), Some(client_secret)) => Some(ProviderCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Ok(Self {
            workspace_root: get("WORKSPACE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKSPACE_ROOT)),
            port,
            public_base_url: get("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}", port)),
            client_app_url: get("CLIENT_APP_URL")
                .unwrap_or_else(|| DEFAULT_CLIENT_APP_URL.to_string()),
            cors_origins,
            cookie_secure,
            session_lifetime_minutes,
            session_store: get("SESSION_STORE_PATH").map(PathBuf::from),
            github: credentials("GITHUB_CLIENT_ID", "GITHUB_CLIENT_SECRET"),
            google: credentials("GOOGLE_CLIENT_ID", "GOOGLE_CLIENT_SECRET"),
        })
    }

    /// Credentials for `provider`, if configured
    pub fn credentials(&self, provider: Provider) -> Option<&ProviderCredentials> {
        match provider {
            Provider::Github => self.github.as_ref(),
            Provider::Google => self.google.as_ref(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
