//! config-rs/lib.rs
//! Process configuration for the log triage server and client
//! Values are read once at startup and passed explicitly to the components that need them

use std::env;
use std::fmt;

/// Default listen port for the API server
pub const DEFAULT_PORT: u16 = 8787;

/// Default bind host for the API server
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default allowed CORS origin (local web UI dev server)
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Default API base URL used by clients
pub const DEFAULT_API_BASE: &str = "http://localhost:8787";

/// Load a `.env` file from the working directory, if one exists
///
/// Variables already set in the process environment take precedence.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// Analysis strategy selected by `AI_PROVIDER`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Local keyword heuristic, also the fallback for every other provider
    #[default]
    Heuristic,
    /// Third-party provider (currently a stub that defers to the heuristic)
    External,
}

impl ProviderKind {
    /// Parse a provider name
    ///
    /// # Arguments
    /// * `value` - Provider name as written in the environment (case-insensitive)
    ///
    /// # Returns
    /// The matching kind, or `None` for an unknown name
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" | "heuristic" => Some(Self::Heuristic),
            "openai" | "external" => Some(Self::External),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::External => "external",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analyzer provider settings
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Credential for the external provider; never logged
    pub api_key: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// HTTP listener and CORS settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Full server-side configuration, immutable for the process lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load `.env` (if present) and read configuration from the process environment
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Arguments
    /// * `lookup` - Returns the raw value for an environment key, if set
    ///
    /// # Returns
    /// Configuration with defaults applied for missing or invalid values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = match lookup("AI_PROVIDER") {
            Some(raw) => ProviderKind::parse(&raw).unwrap_or_else(|| {
                log::warn!("Unknown AI_PROVIDER '{}', using heuristic analysis", raw);
                ProviderKind::Heuristic
            }),
            None => ProviderKind::Heuristic,
        };

        let api_key = lookup("AI_API_KEY").filter(|key| !key.trim().is_empty());

        let port = parse_port(lookup("PORT"), DEFAULT_PORT);
        let host = non_empty(lookup("HOST")).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let cors_origin =
            non_empty(lookup("ORIGIN")).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Self {
            provider: ProviderConfig { kind, api_key },
            server: ServerConfig {
                host,
                port,
                cors_origin,
            },
        }
    }
}

/// Client-side configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: build_time_api_base().to_string(),
        }
    }
}

impl ClientConfig {
    /// Read `API_BASE` from `.env` or the environment, falling back to the build-time value
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = non_empty(lookup("API_BASE"))
            .unwrap_or_else(|| build_time_api_base().to_string());

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

/// API base baked in at compile time, or the local development default
fn build_time_api_base() -> &'static str {
    option_env!("API_BASE").unwrap_or(DEFAULT_API_BASE)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a port value with proper fallback
///
/// # Arguments
/// * `raw` - The raw value, if the variable was set
/// * `default_port` - The port to use when unset or invalid
fn parse_port(raw: Option<String>, default_port: u16) -> u16 {
    match raw {
        Some(value) => value.trim().parse::<u16>().unwrap_or_else(|_| {
            log::warn!("Invalid port in PORT ({}), using default {}", value, default_port);
            default_port
        }),
        None => default_port,
    }
}
