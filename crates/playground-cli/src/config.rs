use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use playground_api::DEFAULT_ENDPOINT;
use playground_core::{FontSize, Language, SessionConfig};
use serde::Deserialize;

/// Contents of a `playground.toml` file.
///
/// ```toml
/// endpoint = "http://127.0.0.1:3000/api/run"
///
/// [session]
/// language = "python"
/// font_size = 16
/// dark_mode = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub session: SessionConfig,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub language: Option<String>,
    pub font_size: Option<u32>,
    pub dark: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub session: SessionConfig,
}

impl Settings {
    /// Defaults, then the config file, then overrides.
    pub fn resolve(file: Option<FileConfig>, overrides: Overrides) -> Result<Self> {
        let file = file.unwrap_or_default();
        let mut session = file.session;
        if let Some(name) = overrides.language.as_deref() {
            session.language = name.parse::<Language>()?;
        }
        if let Some(points) = overrides.font_size {
            session.font_size = FontSize::new(points)?;
        }
        if overrides.dark {
            session.dark_mode = true;
        }
        let endpoint = overrides
            .endpoint
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Ok(Self { endpoint, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn settings_default_without_file() {
        let settings = Settings::resolve(None, Overrides::default()).unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.session, SessionConfig::default());
    }

    #[test]
    fn settings_layer_file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "endpoint = \"http://runner:8080/api/run\"\n[session]\nlanguage = \"python\"\nfont_size = 18"
        )
        .unwrap();
        let loaded = FileConfig::load(file.path()).unwrap();

        let settings = Settings::resolve(
            Some(loaded),
            Overrides {
                font_size: Some(22),
                dark: true,
                ..Overrides::default()
            },
        )
        .unwrap();
        assert_eq!(settings.endpoint, "http://runner:8080/api/run");
        assert_eq!(settings.session.language, Language::Python);
        assert_eq!(settings.session.font_size.get(), 22);
        assert!(settings.session.dark_mode);
    }

    #[test]
    fn settings_reject_invalid_values() {
        let bad_language = Overrides {
            language: Some("cobol".to_string()),
            ..Overrides::default()
        };
        assert!(Settings::resolve(None, bad_language).is_err());

        let bad_font = Overrides {
            font_size: Some(13),
            ..Overrides::default()
        };
        assert!(Settings::resolve(None, bad_font).is_err());
    }

    #[test]
    fn file_config_rejects_bad_font_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nfont_size = 40").unwrap();
        assert!(FileConfig::load(file.path()).is_err());
    }
}
