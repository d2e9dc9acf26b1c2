#![forbid(unsafe_code)]

//! File-backed localization settings.
//!
//! [`Settings`] is the serializable description of a localizer: which
//! language is active, which one fills the gaps, the catalog namespace and
//! directory, and the languages offered to the user. Every field has a
//! default, so an empty file is valid.
//!
//! [`FileSettings`] pairs settings with the path they came from and acts as
//! the [`LanguageContext`] of a localizer. Its `persist` rewrites the file
//! through a temp file and a rename, so a crash mid-write never leaves a
//! truncated settings file behind.
//!
//! # Example (TOML)
//!
//! ```toml
//! language = "de"
//! fallback_language = "en"
//! namespace = "app"
//! catalog_dir = "i18n"
//!
//! [[languages]]
//! name_key = "lang.english"
//! culture = "en"
//!
//! [[languages]]
//! name_key = "lang.german"
//! culture = "de"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use glossa_i18n::{LanguageContext, LanguageDescriptor, PersistError};
use serde::{Deserialize, Serialize};

/// Serializable localization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active language code.
    pub language: String,
    /// Language consulted when the active catalog lacks a key.
    pub fallback_language: String,
    /// Catalog namespace.
    pub namespace: String,
    /// Catalog root for the directory loader. Relative paths are taken
    /// relative to the settings file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,
    /// Languages offered to the user.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<LanguageDescriptor>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "en".into(),
            fallback_language: "en".into(),
            namespace: "app".into(),
            catalog_dir: None,
            languages: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        toml::from_str(s).map_err(SettingsError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(s).map_err(SettingsError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        toml::to_string(self).map_err(SettingsError::Serialize)
    }

    /// Check the settings for values a localizer cannot work with.
    ///
    /// Returns a list of problems. An empty list means the settings are
    /// valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.language.trim().is_empty() {
            errors.push("language must not be empty".into());
        }
        if self.fallback_language.trim().is_empty() {
            errors.push("fallback_language must not be empty".into());
        }
        if self.namespace.trim().is_empty() {
            errors.push("namespace must not be empty".into());
        }

        for (index, descriptor) in self.languages.iter().enumerate() {
            if descriptor.culture().trim().is_empty() {
                errors.push(format!("languages[{index}].culture must not be empty"));
            }
            if descriptor.name_key().trim().is_empty() {
                errors.push(format!("languages[{index}].name_key must not be empty"));
            }
        }

        for culture in repeated_cultures(&self.languages) {
            errors.push(format!("languages lists culture {culture:?} more than once"));
        }

        if !self.languages.is_empty()
            && !self
                .languages
                .iter()
                .any(|d| d.culture() == self.language)
        {
            errors.push(format!(
                "language {:?} is not among the listed languages",
                self.language
            ));
        }

        errors
    }

    /// Catalog directory resolved against `base` (the settings file's
    /// directory) when relative.
    #[must_use]
    pub fn catalog_root(&self, base: &Path) -> Option<PathBuf> {
        self.catalog_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                base.join(dir)
            }
        })
    }
}

/// Cultures listed more than once, in first-repeat order.
fn repeated_cultures(languages: &[LanguageDescriptor]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(languages.len());
    let mut repeated = Vec::new();
    for culture in languages.iter().map(LanguageDescriptor::culture) {
        if seen.contains(&culture) {
            if !repeated.contains(&culture) {
                repeated.push(culture);
            }
        } else {
            seen.push(culture);
        }
    }
    repeated
}

/// Settings bound to the file they are saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSettings {
    path: PathBuf,
    settings: Settings,
}

impl FileSettings {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Load and validate a TOML settings file.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let settings = Settings::from_toml_file(&path)?;
        let errors = settings.validate();
        if !errors.is_empty() {
            return Err(SettingsError::Validation(errors));
        }
        tracing::debug!(
            target: "glossa.language",
            path = %path.display(),
            language = %settings.language,
            "settings loaded"
        );
        Ok(Self { path, settings })
    }

    /// Like [`load`](Self::load), but a missing file yields default settings
    /// bound to `path`.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::new(path, Settings::default()));
        }
        Self::load(path)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Directory the settings file lives in.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Catalog directory, resolved against [`base_dir`](Self::base_dir).
    #[must_use]
    pub fn catalog_root(&self) -> Option<PathBuf> {
        self.settings.catalog_root(self.base_dir())
    }

    /// Write the settings to their file.
    pub fn save(&self) -> Result<(), SettingsError> {
        let toml = self.settings.to_toml_string()?;
        // Atomic write: temp file then rename
        let temp = self.path.with_extension("toml.tmp");
        std::fs::write(&temp, toml).map_err(SettingsError::Io)?;
        std::fs::rename(&temp, &self.path).map_err(SettingsError::Io)?;
        Ok(())
    }
}

impl LanguageContext for FileSettings {
    fn language(&self) -> &str {
        &self.settings.language
    }

    fn set_language(&mut self, code: &str) {
        code.clone_into(&mut self.settings.language);
    }

    fn fallback_language(&self) -> &str {
        &self.settings.fallback_language
    }

    fn namespace(&self) -> &str {
        &self.settings.namespace
    }

    fn languages(&self) -> &[LanguageDescriptor] {
        &self.settings.languages
    }

    fn persist(&mut self) -> Result<(), PersistError> {
        self.save().map_err(|err| {
            PersistError::with_source(format!("writing {}", self.path.display()), err)
        })
    }
}

/// Errors from reading, writing or validating settings.
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error reading or writing a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// TOML serialization error.
    Serialize(toml::ser::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Serialize(e) => write!(f, "TOML serialize error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Serialize(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    fn two_languages() -> Settings {
        Settings {
            language: "de".into(),
            catalog_dir: Some(PathBuf::from("i18n")),
            languages: vec![
                LanguageDescriptor::new("lang.english", "en"),
                LanguageDescriptor::new("lang.german", "de"),
            ],
            ..Settings::default()
        }
    }

    #[test]
    fn default_validates_clean() {
        let errors = Settings::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Settings::from_toml_str("").expect("parse"), Settings::default());
    }

    #[test]
    fn toml_round_trip() {
        let settings = two_languages();
        let toml = settings.to_toml_string().expect("serialize");
        assert!(toml.contains("[[languages]]"));
        assert_eq!(Settings::from_toml_str(&toml).expect("parse"), settings);
    }

    #[test]
    fn json_partial_fills_defaults() {
        let settings = Settings::from_json_str(r#"{"language": "fr"}"#).expect("parse");
        assert_eq!(settings.language, "fr");
        assert_eq!(settings.namespace, "app");
        assert_eq!(settings.fallback_language, "en");
    }

    #[test]
    fn validate_catches_empty_codes() {
        let settings = Settings {
            language: " ".into(),
            namespace: String::new(),
            ..Settings::default()
        };
        let errors = settings.validate();
        assert!(errors.iter().any(|e| e.starts_with("language")));
        assert!(errors.iter().any(|e| e.starts_with("namespace")));
    }

    #[test]
    fn validate_catches_duplicate_cultures() {
        let mut settings = two_languages();
        settings
            .languages
            .push(LanguageDescriptor::new("lang.german.again", "de"));
        let errors = settings.validate();
        assert_eq!(errors, vec![r#"languages lists culture "de" more than once"#]);
    }

    #[test]
    fn validate_catches_unlisted_active_language() {
        let settings = Settings {
            language: "fr".into(),
            ..two_languages()
        };
        let errors = settings.validate();
        assert!(errors[0].contains("\"fr\""), "{errors:?}");
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = Settings::from_toml_str("language = ").expect_err("invalid");
        assert!(matches!(err, SettingsError::Toml(_)));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn relative_catalog_dir_follows_settings_file() {
        let file = FileSettings::new("/etc/myapp/glossa.toml", two_languages());
        assert_eq!(
            file.catalog_root(),
            Some(PathBuf::from("/etc/myapp/i18n"))
        );

        let absolute = Settings {
            catalog_dir: Some(PathBuf::from("/srv/i18n")),
            ..Settings::default()
        };
        assert_eq!(
            absolute.catalog_root(Path::new("/etc")),
            Some(PathBuf::from("/srv/i18n"))
        );
    }

    #[test]
    fn persist_rewrites_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("glossa.toml");
        std::fs::write(&path, two_languages().to_toml_string().expect("toml")).expect("write");

        let mut file = FileSettings::load(&path).expect("load");
        file.set_language("en");
        file.persist().expect("persist");

        let reloaded = Settings::from_toml_file(&path).expect("reload");
        assert_eq!(reloaded.language, "en");
        assert_eq!(reloaded.languages.len(), 2);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn persist_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut file = FileSettings::new(dir.path().join("nope").join("glossa.toml"), Settings::default());
        let err = file.persist().expect_err("no parent directory");
        assert!(err.to_string().contains("glossa.toml"));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn load_rejects_invalid_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("glossa.toml");
        std::fs::write(&path, "namespace = \"\"\n").expect("write");
        let err = FileSettings::load(&path).expect_err("invalid");
        assert!(matches!(err, SettingsError::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = FileSettings::load_or_default(dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(file.settings(), &Settings::default());
    }
}
