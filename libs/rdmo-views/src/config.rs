use serde::Deserialize;

use rdmo_api::{DEFAULT_FILE_URL, DisplayContext, Labels};

use crate::error::ViewError;

/// View rendering configuration, parsed from TOML.
///
/// ```toml
/// file_url = "/api/v1/projects/values/{id}/file/"
///
/// [labels]
/// yes = "Ja"
/// no = "Nein"
/// set = "Satz"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    /// Localized strings for the active language.
    #[serde(default)]
    pub labels: Labels,

    /// URL template for value files, must contain `{id}`.
    #[serde(default = "default_file_url")]
    pub file_url: String,
}

fn default_file_url() -> String {
    DEFAULT_FILE_URL.to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            file_url: default_file_url(),
        }
    }
}

impl ViewConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, ViewError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ViewError::Config(format!("{path}: {e}")))?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, ViewError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ViewError::Config(e.to_string()))?;
        if !config.file_url.contains("{id}") {
            return Err(ViewError::Config(format!(
                "file_url '{}' has no {{id}} placeholder",
                config.file_url
            )));
        }
        Ok(config)
    }

    pub fn display(&self) -> DisplayContext<'_> {
        DisplayContext {
            labels: &self.labels,
            file_url: &self.file_url,
        }
    }
}
