use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub csv: Option<PipelineConfig>,
    pub ris: Option<PipelineConfig>,
    pub render: Option<RenderConfig>,
}

/// Input and output paths for one pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    pub max_authors: Option<usize>,
    pub escape_html: Option<bool>,
}

/// Platform config directory path: `<config_dir>/publist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("publist").join("config.toml"))
}

/// Load config by cascading CWD `.publist.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".publist.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    match load_strict(path) {
        Ok(config) => Some(config),
        Err(ConfigError::Io { .. }) => None,
        Err(e) => {
            tracing::warn!("ignoring config: {e}");
            None
        }
    }
}

/// Load a config the user asked for explicitly; missing or malformed files
/// are errors.
pub fn load_strict(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        csv: merge_pipeline(base.csv, overlay.csv),
        ris: merge_pipeline(base.ris, overlay.ris),
        render: match (base.render, overlay.render) {
            (None, None) => None,
            (b, o) => {
                let b = b.unwrap_or_default();
                let o = o.unwrap_or_default();
                Some(RenderConfig {
                    max_authors: o.max_authors.or(b.max_authors),
                    escape_html: o.escape_html.or(b.escape_html),
                })
            }
        },
    }
}

fn merge_pipeline(
    base: Option<PipelineConfig>,
    overlay: Option<PipelineConfig>,
) -> Option<PipelineConfig> {
    match (base, overlay) {
        (None, None) => None,
        (b, o) => {
            let b = b.unwrap_or_default();
            let o = o.unwrap_or_default();
            Some(PipelineConfig {
                input: o.input.or(b.input),
                output: o.output.or(b.output),
            })
        }
    }
}
