use std::time::Duration;

use clap::Args;

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";

/// Connection and runtime settings, read from flags or the environment.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Base URL of the users API.
    #[arg(long, env = "ROSTER_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Value sent in the `x-api-key` header.
    #[arg(long, env = "ROSTER_API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true, global = true)]
    pub api_key: String,

    /// Page of users to load.
    #[arg(long, env = "ROSTER_PAGE", default_value_t = 1, global = true)]
    pub page: u32,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "ROSTER_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Capacity of the store's request mailbox.
    #[arg(long, default_value_t = 32, global = true)]
    pub mailbox: usize,
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            page: 1,
            timeout_secs: 30,
            mailbox: 32,
        }
    }
}
