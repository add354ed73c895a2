use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "state.json";
const COOKIE_FILE: &str = "cookies.txt";

/// Where persisted state, cookies and exports live
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding `state.json` and `cookies.txt` (default: "./.ferrous-doh")
    #[serde(default = "default_state_dir")]
    pub state_dir: String,

    /// Directory receiving exported result files (default: ".")
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

impl StorageConfig {
    pub fn state_file(&self) -> PathBuf {
        Path::new(&self.state_dir).join(STATE_FILE)
    }

    pub fn cookie_file(&self) -> PathBuf {
        Path::new(&self.state_dir).join(COOKIE_FILE)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            export_dir: default_export_dir(),
        }
    }
}

fn default_state_dir() -> String {
    "./.ferrous-doh".to_string()
}

fn default_export_dir() -> String {
    ".".to_string()
}
