use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub grafana: GrafanaConfig,
    pub provision: ProvisionConfig,
    pub authz_cache: AuthzCacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Grafana instance and the administrative identity used for every
/// outbound command.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GrafanaConfig {
    pub location: String,
    pub admin_user: String,
    pub admin_password: String,
    pub timeout_secs: u64,
}

/// Provision authority that validates delegated access keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    pub location: String,
    pub timeout_secs: u64,
}

/// Authorization verdict cache sizing and expiry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthzCacheConfig {
    /// Seconds a verdict stays authoritative
    pub verdict_ttl_secs: u64,
    /// Upper bound on how long stale entries linger in memory
    pub purge_after_secs: u64,
    pub max_capacity: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for GrafanaConfig {
    fn default() -> Self {
        Self {
            location: "http://localhost".to_string(),
            admin_user: "admin".to_string(),
            admin_password: "admin".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            location: "http://api-provision:8070".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for AuthzCacheConfig {
    fn default() -> Self {
        Self {
            verdict_ttl_secs: 60,
            purge_after_secs: 600,
            max_capacity: 10_000,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
