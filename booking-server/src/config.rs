//! Server configuration from environment variables.

use std::net::SocketAddr;

use crate::schedule::{DefaultSchedule, UnknownDefaultSchedule};
use crate::validate::{PhonePattern, UnknownPhonePattern};

/// Listen address variable.
pub const BIND_ADDR_VAR: &str = "BOOKING_BIND_ADDR";
/// Phone pattern variable: "lenient" or "indian".
pub const PHONE_PATTERN_VAR: &str = "BOOKING_PHONE_PATTERN";
/// Unmatched-route schedule variable: "midnight" or "morning".
pub const DEFAULT_SCHEDULE_VAR: &str = "BOOKING_DEFAULT_SCHEDULE";

/// Configuration errors, reported at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("BOOKING_BIND_ADDR: invalid socket address {value:?}")]
    BindAddr { value: String },

    #[error("BOOKING_PHONE_PATTERN: {0}")]
    PhonePattern(#[from] UnknownPhonePattern),

    #[error("BOOKING_DEFAULT_SCHEDULE: {0}")]
    DefaultSchedule(#[from] UnknownDefaultSchedule),
}

/// Settings for the booking server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub phone_pattern: PhonePattern,
    pub default_schedule: DefaultSchedule,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through a variable lookup. Unset or blank
    /// variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = match get(BIND_ADDR_VAR) {
            Some(value) => value
                .trim()
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::BindAddr { value })?,
            None => default_bind_addr(),
        };

        let phone_pattern = get(PHONE_PATTERN_VAR)
            .map(|v| v.parse::<PhonePattern>())
            .transpose()?
            .unwrap_or_default();

        let default_schedule = get(DEFAULT_SCHEDULE_VAR)
            .map(|v| v.parse::<DefaultSchedule>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            bind_addr,
            phone_pattern,
            default_schedule,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            phone_pattern: PhonePattern::default(),
            default_schedule: DefaultSchedule::default(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}
