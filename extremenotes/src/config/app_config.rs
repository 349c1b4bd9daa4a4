use std::path::PathBuf;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    /// Root of the document store. The in-memory store is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_directory: Option<PathBuf>,

    #[serde(default = "app_config_default_memory_fallback")]
    pub memory_fallback: bool,
}

pub fn app_config_default_memory_fallback() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_directory: None,
            memory_fallback: app_config_default_memory_fallback(),
        }
    }
}
