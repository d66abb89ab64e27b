//! Configuration loading for veneer.
//!
//! Three layers, later ones winning:
//!
//! 1. Platform defaults derived from the user's project directories,
//! 2. an optional TOML or YAML config file,
//! 3. `VENEER_`-prefixed environment variables.
//!
//! Nothing here touches the filesystem beyond reading the config file; the
//! configured directories are created by whatever writes into them first.

pub mod error;

use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "VENEER_";
const CONFIG_FILE: &str = "config.toml";

/// Where veneer keeps and finds its files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory the theme package archives live in.
    pub themes_dir: PathBuf,
    /// Staging root for extracted assets.
    pub data_dir: PathBuf,
    /// Catalog database file.
    pub database: PathBuf,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// The file (`config.toml` under the platform config directory) is
    /// optional; defaults plus environment variables apply without it.
    pub fn load() -> Result<Self> {
        let dirs = project_dirs()?;
        let file = dirs.config_dir().join(CONFIG_FILE);
        debug!(file = %file.display(), "loading configuration");
        let figment = Self::figment(Self::defaults(&dirs)).merge(Toml::file(&file));
        Self::finish(figment)
    }

    /// Load configuration from an explicit config file.
    ///
    /// Unlike [`load`](Self::load), the file must exist. Files ending in
    /// `.yaml`/`.yml` are parsed as YAML, everything else as TOML.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let figment = Self::figment(Self::defaults(&project_dirs()?));
        let figment = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => figment.merge(Yaml::file_exact(path)),
            _ => figment.merge(Toml::file_exact(path)),
        };
        Self::finish(figment)
    }

    fn figment(defaults: Self) -> Figment {
        Figment::from(Serialized::defaults(defaults))
    }

    fn finish(figment: Figment) -> Result<Self> {
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract::<Self>()
            .or_raise(|| ErrorKind::Invalid)
    }

    fn defaults(dirs: &ProjectDirs) -> Self {
        let root = dirs.data_local_dir();
        Self {
            themes_dir: root.join("themes"),
            data_dir: root.join("staged"),
            database: root.join("catalog.db"),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "veneer").ok_or_raise(|| ErrorKind::NoProjectDirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_share_a_root() {
        let dirs = project_dirs().unwrap();
        let config = Config::defaults(&dirs);
        assert_eq!(config.themes_dir.parent(), config.data_dir.parent());
        assert_eq!(config.database.file_name().unwrap(), "catalog.db");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load().expect("defaults should load");
            assert!(config.themes_dir.ends_with("themes"));
            assert!(config.data_dir.ends_with("staged"));
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    themes_dir = "/srv/themes"
                    database = "/srv/catalog.db"
                "#,
            )?;
            let config = Config::load_from("config.toml").expect("explicit file should load");
            assert_eq!(config.themes_dir, PathBuf::from("/srv/themes"));
            assert_eq!(config.database, PathBuf::from("/srv/catalog.db"));
            // Unset keys keep their defaults
            assert!(config.data_dir.ends_with("staged"));
            Ok(())
        });
    }

    #[test]
    fn test_load_from_yaml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "themes_dir: /srv/yaml-themes\n")?;
            let config = Config::load_from("config.yaml").expect("yaml file should load");
            assert_eq!(config.themes_dir, PathBuf::from("/srv/yaml-themes"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", r#"themes_dir = "/from/file""#)?;
            jail.set_env("VENEER_THEMES_DIR", "/from/env");
            let config = Config::load_from("config.toml").expect("env layer should win");
            assert_eq!(config.themes_dir, PathBuf::from("/from/env"));
            Ok(())
        });
    }

    #[test]
    fn test_load_from_missing_file() {
        figment::Jail::expect_with(|_jail| {
            assert!(Config::load_from("nope.toml").is_err());
            Ok(())
        });
    }
}
