use serde::Deserialize;

/// Connection settings for a Firebird server.
///
/// The field set mirrors what common Firebird drivers accept; Embers itself
/// never dials a socket — the struct is consumed by whatever
/// `ConnectionProvider` implementation the application wires in.
///
/// Deserializable from any serde source, or loadable from `EMBERS_DB_*`
/// environment variables via [`ConnectionConfig::from_env`].
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path or alias of the database, e.g. `/data/app.fdb`. Required.
    pub database: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Connections the provider should pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3050
}

fn default_user() -> String {
    "SYSDBA".to_string()
}

fn default_page_size() -> u32 {
    4096
}

fn default_pool_size() -> u32 {
    5
}

impl ConnectionConfig {
    /// Settings for `database` with every other field at its default.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: database.into(),
            user: default_user(),
            password: String::new(),
            role: None,
            page_size: default_page_size(),
            pool_size: default_pool_size(),
        }
    }

    /// Load settings from `EMBERS_DB_*` environment variables.
    ///
    /// A `.env` file in the working directory is honored when present.
    /// `EMBERS_DB_DATABASE` is required; everything else falls back to the
    /// serde defaults above.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database = std::env::var("EMBERS_DB_DATABASE")
            .map_err(|_| ConfigError::Missing("EMBERS_DB_DATABASE"))?;
        let mut config = Self::new(database);

        if let Ok(host) = std::env::var("EMBERS_DB_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("EMBERS_DB_PORT") {
            config.port = parse_var("EMBERS_DB_PORT", &port)?;
        }
        if let Ok(user) = std::env::var("EMBERS_DB_USER") {
            config.user = user;
        }
        if let Ok(password) = std::env::var("EMBERS_DB_PASSWORD") {
            config.password = password;
        }
        if let Ok(role) = std::env::var("EMBERS_DB_ROLE") {
            config.role = Some(role);
        }
        if let Ok(page_size) = std::env::var("EMBERS_DB_PAGE_SIZE") {
            config.page_size = parse_var("EMBERS_DB_PAGE_SIZE", &page_size)?;
        }
        if let Ok(pool_size) = std::env::var("EMBERS_DB_POOL_SIZE") {
            config.pool_size = parse_var("EMBERS_DB_POOL_SIZE", &pool_size)?;
        }

        tracing::debug!(
            host = config.host,
            port = config.port,
            database = config.database,
            pool_size = config.pool_size,
            "loaded connection config from environment"
        );
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::Invalid(name, raw.to_string()))
}

/// Errors from environment-backed configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{name} is not set"),
            ConfigError::Invalid(name, raw) => write!(f, "{name} has invalid value `{raw}`"),
        }
    }
}

impl std::error::Error for ConfigError {}
