use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use urlshort_storage::RedisStoreConfig;
use urlshort_telemetry::LogFormat;

pub const LISTEN_ADDR_ENV: &str = "URLSHORT_LISTEN_ADDR";
pub const LOG_FORMAT_ENV: &str = "URLSHORT_LOG_FORMAT";
pub const REQUEST_TIMEOUT_ENV: &str = "URLSHORT_REQUEST_TIMEOUT_SECS";
pub const PUBLIC_BASE_URL_ENV: &str = "URLSHORT_PUBLIC_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "URLSHORT_STORAGE";
pub const MAX_ATTEMPTS_ENV: &str = "URLSHORT_MAX_ATTEMPTS";
pub const REDIS_HOST_ENV: &str = "REDIS_HOST";
pub const REDIS_PORT_ENV: &str = "REDIS_PORT";
pub const REDIS_USERNAME_ENV: &str = "REDIS_USERNAME";
pub const REDIS_PASSWORD_ENV: &str = "REDIS_PASSWORD";
pub const REDIS_DB_ENV: &str = "REDIS_DB";
pub const REDIS_EXPIRATION_MINUTES_ENV: &str = "REDIS_EXPIRATION_MINUTES";
pub const REDIS_OP_TIMEOUT_ENV: &str = "REDIS_OP_TIMEOUT_MS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "urlshort", version, about = "Short-link redirect server")]
pub struct CLI {
    #[arg(long, global = true, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, global = true, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Upper bound on the time spent serving one request.
    #[arg(long, global = true, env = REQUEST_TIMEOUT_ENV, default_value_t = 10)]
    pub request_timeout_secs: u64,

    #[command(subcommand)]
    pub mode: Mode,
}

impl CLI {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Redirect paths listed in a YAML or JSON mapping file.
    Static(StaticArgs),
    /// Shorten URLs on demand and redirect from a key-value store.
    Dynamic(DynamicArgs),
}

#[derive(Debug, Args)]
pub struct StaticArgs {
    /// Path of a YAML mapping file.
    #[arg(long)]
    pub yaml: Option<PathBuf>,

    /// Path of a JSON mapping file.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DynamicArgs {
    /// Prefix of the short URLs shown to users.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Redis
    )]
    pub storage: StorageBackendArg,

    /// Keys tried per request before giving up on collisions.
    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = urlshort_shortener::DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    /// Lifetime of every short key, in minutes.
    #[arg(
        long,
        env = REDIS_EXPIRATION_MINUTES_ENV,
        value_parser = clap::value_parser!(u64).range(1..=urlshort_storage::MAX_TTL_MINUTES)
    )]
    pub expiration_minutes: u64,

    #[arg(long, env = REDIS_HOST_ENV, default_value = "127.0.0.1")]
    pub redis_host: String,

    #[arg(long, env = REDIS_PORT_ENV, default_value_t = 6379)]
    pub redis_port: u16,

    #[arg(long, env = REDIS_USERNAME_ENV)]
    pub redis_username: Option<String>,

    #[arg(long, env = REDIS_PASSWORD_ENV, hide_env_values = true)]
    pub redis_password: Option<String>,

    #[arg(long, env = REDIS_DB_ENV, default_value_t = 0)]
    pub redis_db: i64,

    /// Per-command Redis timeout in milliseconds.
    #[arg(long, env = REDIS_OP_TIMEOUT_ENV)]
    pub redis_op_timeout_ms: Option<u64>,
}

impl DynamicArgs {
    pub fn redis_config(&self) -> RedisStoreConfig {
        RedisStoreConfig::builder()
            .host(self.redis_host.clone())
            .port(self.redis_port)
            .username(self.redis_username.clone().filter(|u| !u.is_empty()))
            .password(self.redis_password.clone().filter(|p| !p.is_empty()))
            .db(self.redis_db)
            .ttl_minutes(self.expiration_minutes)
            .op_timeout(self.redis_op_timeout_ms.map(Duration::from_millis))
            .build()
    }
}
