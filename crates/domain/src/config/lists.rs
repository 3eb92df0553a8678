use serde::{Deserialize, Serialize};

pub const DEFAULT_BLACKLIST_SOURCE: &str =
    "https://raw.githubusercontent.com/StevenBlack/hosts/master/hosts";

/// Sources are URLs (`http://`, `https://`) or local file paths in hosts format.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListsConfig {
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,

    #[serde(default)]
    pub whitelist: Vec<String>,

    /// Seconds between reloads; 0 loads once at startup
    #[serde(default)]
    pub refresh_interval: u64,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            blacklist: default_blacklist(),
            whitelist: Vec::new(),
            refresh_interval: 0,
        }
    }
}

fn default_blacklist() -> Vec<String> {
    vec![DEFAULT_BLACKLIST_SOURCE.to_string()]
}
