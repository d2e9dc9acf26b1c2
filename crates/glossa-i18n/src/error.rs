#![forbid(unsafe_code)]

//! Error types for catalog loading and language persistence.
//!
//! Neither error ever escapes key resolution: a [`CatalogError`] is logged
//! and the tier it belongs to is treated as absent, and a [`PersistError`]
//! is logged by the language switch without undoing the change.

use std::fmt;
use std::path::PathBuf;

/// Failure to produce a catalog for a `(namespace, language)` pair.
#[derive(Debug)]
pub enum CatalogError {
    /// The loader has no catalog for this pair.
    NotFound { namespace: String, language: String },
    /// Reading the catalog source failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The catalog file is not valid JSON.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The catalog file is not valid TOML.
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The catalog file parsed, but its root is not a key/value map.
    Shape {
        path: PathBuf,
        /// What the root turned out to be, e.g. `array`.
        found: &'static str,
    },
}

impl CatalogError {
    /// Shorthand for [`CatalogError::NotFound`].
    #[must_use]
    pub fn not_found(namespace: impl Into<String>, language: impl Into<String>) -> Self {
        Self::NotFound {
            namespace: namespace.into(),
            language: language.into(),
        }
    }

    /// Label used in tracing fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Io { .. } => "io",
            Self::Json { .. } => "json",
            Self::Toml { .. } => "toml",
            Self::Shape { .. } => "shape",
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound {
                namespace,
                language,
            } => write!(f, "no catalog for {namespace}/{language}"),
            Self::Io { path, source } => {
                write!(f, "reading catalog {}: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON catalog {}: {source}", path.display())
            }
            Self::Toml { path, source } => {
                write!(f, "TOML catalog {}: {source}", path.display())
            }
            Self::Shape { path, found } => write!(
                f,
                "catalog {} must map keys to strings, found {found} at the root",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } | Self::Shape { .. } => None,
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Toml { source, .. } => Some(source),
        }
    }
}

/// Failure reported by a language context while saving the active language.
#[derive(Debug)]
pub struct PersistError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl PersistError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error with a short description of what was attempted.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "persisting language: {}: {source}", self.message),
            None => write!(f, "persisting language: {}", self.message),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn not_found_names_the_pair() {
        let err = CatalogError::not_found("app", "de");
        assert_eq!(err.to_string(), "no catalog for app/de");
        assert_eq!(err.kind(), "not_found");
        assert!(StdError::source(&err).is_none());
    }

    #[test]
    fn io_error_chains_to_source() {
        let err = CatalogError::Io {
            path: PathBuf::from("/tmp/app/de.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("de.json"));
        let source = StdError::source(&err).expect("io source");
        assert!(source.to_string().contains("denied"));
    }

    #[test]
    fn shape_error_names_file_and_root() {
        let err = CatalogError::Shape {
            path: PathBuf::from("/tmp/app/de.json"),
            found: "array",
        };
        assert_eq!(err.kind(), "shape");
        assert!(err.to_string().contains("de.json"));
        assert!(err.to_string().contains("found array"));
        assert!(StdError::source(&err).is_none());
    }

    #[test]
    fn persist_error_with_and_without_source() {
        let plain = PersistError::new("read-only settings");
        assert_eq!(plain.to_string(), "persisting language: read-only settings");
        assert!(StdError::source(&plain).is_none());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let wrapped = PersistError::with_source("writing settings.toml", io);
        assert!(wrapped.to_string().contains("disk full"));
        assert_eq!(wrapped.message(), "writing settings.toml");
        assert!(StdError::source(&wrapped).is_some());
    }
}
