//! Plugin install layout and environment configuration

use crate::error::{PluginError, Result};
use scryfall_api::ScryfallClient;
use std::env;
use std::path::{Path, PathBuf};

/// Plugin environment parsed from environment variables
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Plugin install directory; `cache/` and `img/` live beneath it
    pub root: PathBuf,
    pub api_url: String,
    pub language: String,
}

impl PluginConfig {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let root = match env::var("FLOW_SCRYFALL_ROOT") {
            Ok(root) => PathBuf::from(root),
            Err(_) => executable_dir()?,
        };

        let api_url = env::var("SCRYFALL_API_URL")
            .unwrap_or_else(|_| ScryfallClient::DEFAULT_BASE_URL.to_string());

        let language = env::var("SCRYFALL_LANG")
            .unwrap_or_else(|_| ScryfallClient::DEFAULT_LANGUAGE.to_string());

        Ok(Self {
            root,
            api_url,
            language,
        })
    }

    /// Configuration for a plugin installed at `root`, talking to the public API
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            api_url: ScryfallClient::DEFAULT_BASE_URL.to_string(),
            language: ScryfallClient::DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    pub fn image_dir(&self) -> PathBuf {
        self.root.join("img")
    }

    pub fn icons(&self) -> Icons {
        Icons::in_dir(&self.image_dir())
    }
}

/// Bundled icons shipped in the plugin's `img/` directory
#[derive(Debug, Clone)]
pub struct Icons {
    pub app: PathBuf,
    pub trash: PathBuf,
    pub folder: PathBuf,
    pub scryfall: PathBuf,
    pub quicklook: PathBuf,
}

impl Icons {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            app: dir.join("app.png"),
            trash: dir.join("trash.png"),
            folder: dir.join("folder.png"),
            scryfall: dir.join("scryfall.png"),
            quicklook: dir.join("ql.png"),
        }
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe()
        .map_err(|e| PluginError::Config(format!("cannot locate executable: {}", e)))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| PluginError::Config(format!("executable has no parent: {:?}", exe)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_root() {
        let config = PluginConfig::with_root("/plugins/Scryfall");
        assert_eq!(config.cache_dir(), PathBuf::from("/plugins/Scryfall/cache"));
        assert_eq!(config.image_dir(), PathBuf::from("/plugins/Scryfall/img"));
        assert_eq!(config.api_url, "https://api.scryfall.com");
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_icons() {
        let icons = PluginConfig::with_root("/p").icons();
        assert_eq!(icons.app, PathBuf::from("/p/img/app.png"));
        assert_eq!(icons.trash, PathBuf::from("/p/img/trash.png"));
        assert_eq!(icons.folder, PathBuf::from("/p/img/folder.png"));
        assert_eq!(icons.scryfall, PathBuf::from("/p/img/scryfall.png"));
        assert_eq!(icons.quicklook, PathBuf::from("/p/img/ql.png"));
    }

    #[test]
    fn test_bundled_icons_ship_with_plugin() {
        let plugin_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../plugin");
        let icons = PluginConfig::with_root(&plugin_dir).icons();

        for icon in [
            &icons.app,
            &icons.trash,
            &icons.folder,
            &icons.scryfall,
            &icons.quicklook,
        ] {
            let bytes = std::fs::read(icon).unwrap_or_else(|e| panic!("{icon:?}: {e}"));
            assert!(bytes.starts_with(b"\x89PNG"), "{icon:?} is not a PNG");
        }
    }

    #[test]
    fn test_executable_dir_exists() {
        assert!(executable_dir().unwrap().is_dir());
    }
}
