//! Configuration: defaults plus `~/.config/mfr/config.toml`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Mount point of the photo frame.
const DEFAULT_TARGET_DIR: &str = "/media/MEMORY";

/// Board crawled when none are configured.
const DEFAULT_BOARD: &str = "adviceanimals";

fn default_listing_limit() -> u32 {
    100
}

fn default_user_agent() -> String {
    "mfr/0.1".to_string()
}

/// Global configuration loaded from `~/.config/mfr/config.toml`.
/// CLI flags override individual fields; credentials are never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfrConfig {
    /// Directory refreshed with the downloaded images.
    pub target_dir: PathBuf,
    /// Boards to crawl.
    pub boards: Vec<String>,
    /// Entries requested per listing (top and hot each).
    #[serde(default = "default_listing_limit")]
    pub listing_limit: u32,
    /// User agent sent on listing requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for MfrConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            boards: vec![DEFAULT_BOARD.to_string()],
            listing_limit: default_listing_limit(),
            user_agent: default_user_agent(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mfr")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MfrConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MfrConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MfrConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = MfrConfig::default();
        assert_eq!(cfg.target_dir, PathBuf::from("/media/MEMORY"));
        assert_eq!(cfg.boards, vec!["adviceanimals".to_string()]);
        assert_eq!(cfg.listing_limit, 100);
        assert_eq!(cfg.user_agent, "mfr/0.1");
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = MfrConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: MfrConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.target_dir, cfg.target_dir);
        assert_eq!(parsed.boards, cfg.boards);
        assert_eq!(parsed.listing_limit, cfg.listing_limit);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            target_dir = "/mnt/frame"
            boards = ["pics", "earthporn"]
            listing_limit = 25
        "#;
        let cfg: MfrConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.target_dir, PathBuf::from("/mnt/frame"));
        assert_eq!(cfg.boards.len(), 2);
        assert_eq!(cfg.listing_limit, 25);
        // Omitted optional field falls back to its default.
        assert_eq!(cfg.user_agent, "mfr/0.1");
    }
}
