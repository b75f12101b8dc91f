/// Config file loading and creation for the tierwise CLI.
///
/// Config lives at ~/.config/tierwise/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default)]
pub struct TierwiseConfig {
    pub tier_labels: Option<Vec<String>>,
    pub min_comparisons: Option<u32>,
    pub target_comparisons: Option<u32>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# tierwise configuration
# All values here can be overridden by CLI flags.

# Tier names, best to worst
# tier_labels = [\"S\", \"A\", \"B\", \"C\", \"D\", \"F\"]

# Comparisons an item needs before it can leave \"unranked\"
# min_comparisons = 2

# Desired comparisons per item for the vote loop
# target_comparisons = 3
";

/// Returns the default config path: ~/.config/tierwise/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("tierwise").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> TierwiseConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => TierwiseConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
