//! Client configuration.
//!
//! Every field has a working default; the CLI overrides them from flags.

use crate::http_client::DEFAULT_TIMEOUT_MS;

/// NWS asks callers to put contact details here; override it with them.
pub const DEFAULT_USER_AGENT: &str = concat!("feedpluck/", env!("CARGO_PKG_VERSION"));

pub const PARLIAMENT_NOW_BASE: &str = "https://now-api.parliament.uk/api";
pub const PARLIAMENT_MEMBERS_BASE: &str = "https://members-api.parliament.uk/api";
pub const WEATHER_BASE: &str = "https://api.weather.gov";

/// Endpoints, identification and timeout shared by the source clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub parliament_now_base: String,
    pub parliament_members_base: String,
    pub weather_base: String,
    /// Sent as `user-agent`; api.weather.gov rejects requests without one.
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            parliament_now_base: String::from(PARLIAMENT_NOW_BASE),
            parliament_members_base: String::from(PARLIAMENT_MEMBERS_BASE),
            weather_base: String::from(WEATHER_BASE),
            user_agent: String::from(DEFAULT_USER_AGENT),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_parliament_now_base(mut self, base: impl Into<String>) -> Self {
        self.parliament_now_base = base.into();
        self
    }

    pub fn with_parliament_members_base(mut self, base: impl Into<String>) -> Self {
        self.parliament_members_base = base.into();
        self
    }

    pub fn with_weather_base(mut self, base: impl Into<String>) -> Self {
        self.weather_base = base.into();
        self
    }
}
