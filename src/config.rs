use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Viewer settings loadable from a TOML file; CLI flags override these.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    /// Vertices per grid edge.
    pub side: Option<i32>,
    /// Surface texture candidates, first existing path wins.
    #[serde(default)]
    pub texture: Vec<String>,
}

impl ViewerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
