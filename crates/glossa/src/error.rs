#![forbid(unsafe_code)]

//! Glossa error model and graceful degradation.
//!
//! # Design Principles
//!
//! 1. **Typed per concern**: catalogs, persistence, node content and
//!    settings each have their own error in the crate that produces them.
//! 2. **Degrade, never blank**: every variant maps to a [`Recovery`] that
//!    keeps the UI readable. The worst visible outcome is a `{$key$}`
//!    placeholder.
//! 3. **Observability**: [`Error::error_type`] gives a stable label for
//!    tracing fields without the error types depending on tracing.

use std::fmt;

use glossa_i18n::{CatalogError, PersistError};
use glossa_widgets::ContentError;

use crate::settings::SettingsError;

/// Top-level error type for Glossa applications.
#[derive(Debug)]
pub enum Error {
    /// A catalog could not be loaded.
    Catalog(CatalogError),
    /// The active language could not be saved.
    Persist(PersistError),
    /// A node's content could not be read or written.
    Content(ContentError),
    /// Settings could not be read, written or validated.
    Settings(SettingsError),
    /// Raw I/O error (convenience variant for `?` on io::Result).
    Io(std::io::Error),
}

/// Standard result type for Glossa APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Graceful Degradation ────────────────────────────────────────────────

/// What the application should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Treat the catalog tier as absent; affected keys show placeholders.
    ShowPlaceholders,
    /// Keep the language change in memory only.
    KeepInMemory,
    /// Leave the node untranslated and continue with the rest of the tree.
    SkipNode,
    /// Start from default settings.
    UseDefaults,
    /// The error is unrecoverable.
    Abort,
}

impl Error {
    /// Determine the recovery action for this error.
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Catalog(_) => Recovery::ShowPlaceholders,
            Self::Persist(_) => Recovery::KeepInMemory,
            Self::Content(_) => Recovery::SkipNode,
            Self::Settings(SettingsError::Io(err))
                if err.kind() != std::io::ErrorKind::NotFound =>
            {
                Recovery::Abort
            }
            Self::Settings(_) => Recovery::UseDefaults,
            Self::Io(_) => Recovery::Abort,
        }
    }

    /// Error type label for tracing fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Catalog(_) => "catalog",
            Self::Persist(_) => "persist",
            Self::Content(_) => "content",
            Self::Settings(_) => "settings",
            Self::Io(_) => "io",
        }
    }

    /// Whether the application can keep running.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.recovery(), Recovery::Abort)
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "{err}"),
            Self::Content(err) => write!(f, "{err}"),
            Self::Settings(err) => write!(f, "settings: {err}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowPlaceholders => write!(f, "show_placeholders"),
            Self::KeepInMemory => write!(f, "keep_in_memory"),
            Self::SkipNode => write!(f, "skip_node"),
            Self::UseDefaults => write!(f, "use_defaults"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Persist(err) => Some(err),
            Self::Content(err) => Some(err),
            Self::Settings(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<PersistError> for Error {
    fn from(err: PersistError) -> Self {
        Self::Persist(err)
    }
}

impl From<ContentError> for Error {
    fn from(err: ContentError) -> Self {
        Self::Content(err)
    }
}

impl From<SettingsError> for Error {
    fn from(err: SettingsError) -> Self {
        Self::Settings(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn catalog_errors_degrade_to_placeholders() {
        let err = Error::from(CatalogError::not_found("app", "de"));
        assert_eq!(err.recovery(), Recovery::ShowPlaceholders);
        assert_eq!(err.error_type(), "catalog");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("app/de"));
    }

    #[test]
    fn persist_error_keeps_change_in_memory() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = Error::from(PersistError::with_source("writing glossa.toml", io));
        assert_eq!(err.recovery(), Recovery::KeepInMemory);
        let persist = StdError::source(&err).expect("persist error");
        assert!(StdError::source(persist).is_some());
    }

    #[test]
    fn content_error_skips_node() {
        let err = Error::from(ContentError::new("detached"));
        assert_eq!(err.recovery(), Recovery::SkipNode);
        assert_eq!(err.to_string(), "node content: detached");
    }

    #[test]
    fn missing_settings_file_uses_defaults() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "absent");
        let err = Error::from(SettingsError::Io(io));
        assert_eq!(err.recovery(), Recovery::UseDefaults);
        assert!(err.to_string().starts_with("settings: "));
    }

    #[test]
    fn unreadable_settings_file_aborts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(SettingsError::Io(io));
        assert_eq!(err.recovery(), Recovery::Abort);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn validation_errors_use_defaults() {
        let err = Error::from(SettingsError::Validation(vec!["namespace must not be empty".into()]));
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("namespace"));
    }

    #[test]
    fn raw_io_is_fatal() {
        let err = Error::from(std::io::Error::other("disk gone"));
        assert_eq!(err.error_type(), "io");
        assert_eq!(err.recovery().to_string(), "abort");
    }

    #[test]
    fn recovery_labels() {
        let labels: Vec<String> = [
            Recovery::ShowPlaceholders,
            Recovery::KeepInMemory,
            Recovery::SkipNode,
            Recovery::UseDefaults,
            Recovery::Abort,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(
            labels,
            ["show_placeholders", "keep_in_memory", "skip_node", "use_defaults", "abort"]
        );
    }
}
