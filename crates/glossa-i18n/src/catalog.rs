#![forbid(unsafe_code)]

//! Immutable key → string catalogs, one per `(namespace, language)` pair.
//!
//! A [`Catalog`] is built once (by a loader or by hand) and never mutated
//! afterwards. Resolution only ever reads from it.
//!
//! # Example
//!
//! ```
//! use glossa_i18n::catalog::{Catalog, CatalogId};
//!
//! let de = Catalog::new(CatalogId::new("app", "de"))
//!     .with_entry("menu.open", "Öffnen")
//!     .with_entry("menu.quit", "Beenden");
//!
//! assert_eq!(de.get("menu.open"), Some("Öffnen"));
//! assert_eq!(de.get("menu.save"), None);
//! assert_eq!(de.len(), 2);
//! ```

use std::fmt;

use ahash::AHashMap;

/// Identity of a catalog: the resource namespace plus a language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogId {
    pub namespace: String,
    pub language: String,
}

impl CatalogId {
    #[must_use]
    pub fn new(namespace: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            language: language.into(),
        }
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.language)
    }
}

/// Translated strings for one language of one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    id: CatalogId,
    entries: AHashMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new(id: CatalogId) -> Self {
        Self {
            id,
            entries: AHashMap::new(),
        }
    }

    /// Build a catalog from `(key, value)` pairs. Later duplicates win.
    #[must_use]
    pub fn from_entries<I, K, V>(id: CatalogId, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id,
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Add one entry (builder style).
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &CatalogId {
        &self.id
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.id.language
    }

    /// Look up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Compare this catalog's key set against a reference catalog (usually
    /// the fallback language).
    #[must_use]
    pub fn coverage_against(&self, reference: &Catalog) -> CatalogCoverage {
        let mut missing: Vec<String> = reference
            .entries
            .keys()
            .filter(|key| !self.entries.contains_key(key.as_str()))
            .cloned()
            .collect();
        missing.sort_unstable();
        CatalogCoverage {
            language: self.id.language.clone(),
            reference_keys: reference.len(),
            present: reference.len() - missing.len(),
            missing,
        }
    }
}

/// How much of a reference catalog another catalog translates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCoverage {
    pub language: String,
    pub reference_keys: usize,
    pub present: usize,
    /// Reference keys with no entry here, sorted.
    pub missing: Vec<String>,
}

impl CatalogCoverage {
    /// Percentage of reference keys present, in `[0, 100]`.
    ///
    /// An empty reference counts as fully covered.
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        if self.reference_keys == 0 {
            return 100.0;
        }
        self.present as f64 / self.reference_keys as f64 * 100.0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
