mod app_config;

pub use app_config::{
    AppConfig, AuthzCacheConfig, GrafanaConfig, LogFormat, LoggingConfig, ProvisionConfig,
    ServerConfig,
};
