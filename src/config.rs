//! Client configuration.

use std::{env, time::Duration};

/// The server URL used when `BT_SERVER_URL` is not set: requests go to the
/// origin the page was served from.
pub const DEFAULT_SERVER_URL: &str = "/";

/// The timezone used when `BT_TIMEZONE` is not set.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// The environment variable holding the server URL.
pub const SERVER_URL_VAR: &str = "BT_SERVER_URL";

/// The environment variable holding the canonical local timezone name.
pub const TIMEZONE_VAR: &str = "BT_TIMEZONE";

/// How long a toast stays on screen before it dismisses itself.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(5);

/// Settings shared by every action the client performs.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// The prefix joined onto every backend route, e.g.
    /// "https://budget.example.com/".
    pub server_url: String,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Used to decide whether a date is in the future.
    pub local_timezone: String,

    /// How long toasts stay visible.
    pub toast_duration: Duration,
}

impl ClientConfig {
    /// Create a config that targets `server_url` with the default timezone and
    /// toast duration.
    pub fn new(server_url: &str) -> Self {
        Self {
            server_url: server_url.to_owned(),
            ..Default::default()
        }
    }

    /// Read the config from `BT_SERVER_URL` and `BT_TIMEZONE`, falling back to
    /// the defaults for unset variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from the variables `var` returns. Unset or empty
    /// variables fall back to the defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let var_or = |key: &str, default: &str| {
            var(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        Self {
            server_url: var_or(SERVER_URL_VAR, DEFAULT_SERVER_URL),
            local_timezone: var_or(TIMEZONE_VAR, DEFAULT_TIMEZONE),
            toast_duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Set the local timezone.
    pub fn with_timezone(mut self, local_timezone: &str) -> Self {
        self.local_timezone = local_timezone.to_owned();
        self
    }

    /// Set how long toasts stay visible.
    pub fn with_toast_duration(mut self, toast_duration: Duration) -> Self {
        self.toast_duration = toast_duration;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            local_timezone: DEFAULT_TIMEZONE.to_owned(),
            toast_duration: DEFAULT_TOAST_DURATION,
        }
    }
}
