use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::analytics::segmentation::{DEFAULT_CLUSTER_COUNT, DEFAULT_SEED};

/// Runtime stage, taken from `ANALYTICS_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidVar {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("ANALYTICS_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[from]
        source: std::net::AddrParseError,
    },
}

fn parsed_var<T: FromStr>(
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidVar {
            name,
            expected,
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

/// Top-level configuration for the analytics service. Every field has a
/// development default so a bare environment still boots.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub segmentation: SegmentationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(
            &env::var("ANALYTICS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let server = ServerConfig {
            host: env::var("ANALYTICS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed_var("ANALYTICS_PORT", 3000, "u16 port")?,
        };

        let telemetry = TelemetryConfig {
            log_level: env::var("ANALYTICS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        let default_clusters = parsed_var(
            "ANALYTICS_DEFAULT_CLUSTERS",
            DEFAULT_CLUSTER_COUNT,
            "positive integer",
        )?;
        if default_clusters == 0 {
            return Err(ConfigError::InvalidVar {
                name: "ANALYTICS_DEFAULT_CLUSTERS",
                expected: "positive integer",
                value: "0".to_string(),
            });
        }
        let segmentation = SegmentationConfig {
            default_clusters,
            seed: parsed_var("ANALYTICS_SEGMENTATION_SEED", DEFAULT_SEED, "u64 seed")?,
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            segmentation,
        })
    }
}

/// HTTP binding for the service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host.parse()?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Segmentation defaults applied when a request leaves them unspecified.
/// The seed is configurable so staging runs can be distinguished from
/// production ones while each stays internally reproducible.
#[derive(Debug, Clone, Copy)]
pub struct SegmentationConfig {
    pub default_clusters: usize,
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "ANALYTICS_ENV",
            "ANALYTICS_HOST",
            "ANALYTICS_PORT",
            "ANALYTICS_LOG_LEVEL",
            "ANALYTICS_DEFAULT_CLUSTERS",
            "ANALYTICS_SEGMENTATION_SEED",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn bare_environment_boots_with_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.segmentation.default_clusters, DEFAULT_CLUSTER_COUNT);
        assert_eq!(config.segmentation.seed, DEFAULT_SEED);
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ANALYTICS_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn garbled_port_is_rejected_by_name() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ANALYTICS_PORT", "eighty");
        let error = AppConfig::load().expect_err("port must fail");
        assert!(error.to_string().contains("ANALYTICS_PORT"));
    }

    #[test]
    fn zero_cluster_default_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ANALYTICS_DEFAULT_CLUSTERS", "0");
        let error = AppConfig::load().expect_err("zero clusters must fail");
        assert!(error.to_string().contains("ANALYTICS_DEFAULT_CLUSTERS"));
    }

    #[test]
    fn segmentation_overrides_are_parsed() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ANALYTICS_DEFAULT_CLUSTERS", "7");
        env::set_var("ANALYTICS_SEGMENTATION_SEED", "99");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.segmentation.default_clusters, 7);
        assert_eq!(config.segmentation.seed, 99);
    }
}
