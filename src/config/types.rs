use serde::Deserialize;

// ─── Top-Level Config ───────────────────────────────────────────────────────

/// Root of the optional cosmonav.yaml settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub settings: Settings,
    /// Inventory file the `index` command crawls.
    pub inventory: Option<String>,
}

/// Runtime settings. Every field has a default so the file is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub working_dir: String,
    pub backend: BackendConfig,
    pub result_limit: usize,
    pub debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            working_dir: ".cosmonav".to_string(),
            backend: BackendConfig::Sqlite,
            result_limit: 20,
            debounce_ms: 150,
        }
    }
}

/// Index backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendConfig {
    /// Durable cache under the working directory.
    Sqlite,
    /// Process-local cache; nothing touches disk.
    Memory,
}
