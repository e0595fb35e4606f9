use std::path::Path;

use anyhow::{bail, Context, Result};

use super::types::NavConfig;

pub const DEFAULT_CONFIG_PATH: &str = ".";

/// Load settings from a yaml file, or defaults when none exists.
///
/// - If `path` is a file, load exactly that file.
/// - If `path` is a directory, look for `cosmonav.yaml` / `cosmonav.yml` in it.
/// - A missing file is not an error: the palette runs fine on defaults.
///   An explicitly named file that doesn't exist still is.
pub fn load_config(path: &str) -> Result<NavConfig> {
    let p = Path::new(path);

    if p.is_file() {
        return parse_file(p);
    }

    if p.is_dir() {
        for name in ["cosmonav.yaml", "cosmonav.yml"] {
            let candidate = p.join(name);
            if candidate.is_file() {
                tracing::info!(file = %candidate.display(), "Loaded config");
                return parse_file(&candidate);
            }
        }
        return Ok(NavConfig::default());
    }

    if path != DEFAULT_CONFIG_PATH {
        bail!("Config not found: '{}'", path);
    }
    Ok(NavConfig::default())
}

fn parse_file(path: &Path) -> Result<NavConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
