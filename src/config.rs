use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Options accepted by [`crate::generate`].
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    #[serde(default = "default_template")]
    pub template: String,

    /// Destination root.
    #[serde(default = "default_cwd")]
    pub cwd: PathBuf,

    /// Rewrite destination files that already exist.
    #[serde(default, rename = "override")]
    pub overwrite: bool,

    #[serde(default)]
    pub dry_run: bool,

    /// Upper bound on files processed concurrently.
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Directory holding the template sets; the bundled one when unset.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            template: default_template(),
            cwd: default_cwd(),
            overwrite: false,
            dry_run: false,
            jobs: None,
            templates_dir: None,
        }
    }
}

fn default_template() -> String {
    "default".to_string()
}

fn default_cwd() -> PathBuf {
    PathBuf::from(".")
}

/// Template sets shipped with the crate.
pub fn bundled_templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GenerateOptions {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let options: GenerateOptions = serde_yaml::from_str(&content)?;
        Ok(options)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.templates_dir
            .clone()
            .unwrap_or_else(bundled_templates_dir)
    }
}
