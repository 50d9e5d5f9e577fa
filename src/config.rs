use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Psychage Intake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_BIND_ADDR: &str = "PSYCHAGE_BIND_ADDR";
pub const ENV_SESSION_IDLE_SECS: &str = "PSYCHAGE_SESSION_IDLE_SECS";
pub const ENV_MAX_SESSIONS: &str = "PSYCHAGE_MAX_SESSIONS";

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 8787));
/// Abandoned intakes are dropped after 30 minutes.
const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;
const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "psychage_intake_lib=info,tower_http=warn"
}

/// Runtime settings for the intake server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub session_idle_timeout: Duration,
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ServerConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to the
    /// default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = parse_or(&lookup, ENV_BIND_ADDR, defaults.bind_addr);
        let idle_secs = parse_or(&lookup, ENV_SESSION_IDLE_SECS, DEFAULT_SESSION_IDLE_SECS);
        let max_sessions = match parse_or(&lookup, ENV_MAX_SESSIONS, DEFAULT_MAX_SESSIONS) {
            0 => {
                tracing::warn!(key = ENV_MAX_SESSIONS, "Zero session capacity, using default");
                DEFAULT_MAX_SESSIONS
            }
            n => n,
        };

        Self {
            bind_addr,
            session_idle_timeout: Duration::from_secs(idle_secs),
            max_sessions,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid config value, using default");
            default
        }),
    }
}
