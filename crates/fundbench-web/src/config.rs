//! Server configuration from command-line flags and environment variables.
//!
//! | Flag | Env | Default |
//! |------|-----|---------|
//! | `--port` | `PORT` | `5001` |
//! | `--env` | `APP_ENV` | `development` |
//! | `--allowed-origins` | `ALLOWED_ORIGINS` | `http://localhost:3000` |
//! | `--upstream-timeout-ms` | `UPSTREAM_TIMEOUT_MS` | `10000` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::{header, HeaderValue, Method};
use clap::{Parser, ValueEnum};
use fundbench_core::http_client::DEFAULT_TIMEOUT_MS;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

/// Fund-versus-index comparison API server.
#[derive(Debug, Clone, Parser)]
#[command(name = "fundbench", version, about = "Fund-versus-index comparison API")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5001)]
    pub port: u16,

    /// Production binds all interfaces and restricts CORS to the allow-list.
    #[arg(long = "env", env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Origins allowed by CORS in production (comma separated).
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Per-call budget for upstream data requests, in milliseconds.
    #[arg(long, env = "UPSTREAM_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub upstream_timeout_ms: u64,
}

impl ServerConfig {
    pub const fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        let ip = if self.is_production() {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        };
        SocketAddr::new(ip, self.port)
    }

    pub fn cors_layer(&self) -> CorsLayer {
        if !self.is_production() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    }
}
