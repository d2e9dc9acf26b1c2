#![forbid(unsafe_code)]

//! Two-tier key resolution.
//!
//! A [`KeyResolver`] looks a key up in the primary (active language) catalog,
//! then in the fallback catalog, and finally gives back the key re-wrapped
//! as a marker so a missing translation is visible on screen instead of
//! blank.
//!
//! Catalogs are loaded on first need and memoized per
//! `(namespace, language)` pair. A load failure is logged once and memoized
//! as "absent"; resolution then degrades to the other tier or the
//! placeholder. Nothing here returns an error.
//!
//! The resolver uses `RefCell` for its memo table, so it is `!Sync` and must
//! stay on the thread that owns the display tree.
//!
//! ```
//! use glossa_i18n::catalog::{Catalog, CatalogId};
//! use glossa_i18n::loader::MemoryLoader;
//! use glossa_i18n::resolver::KeyResolver;
//!
//! let loader = MemoryLoader::new()
//!     .with_catalog(Catalog::new(CatalogId::new("app", "fr")).with_entry("ok", "D'accord"))
//!     .with_catalog(
//!         Catalog::new(CatalogId::new("app", "en"))
//!             .with_entry("ok", "OK")
//!             .with_entry("cancel", "Cancel"),
//!     );
//! let resolver = KeyResolver::new(loader, "app", "fr", "en");
//!
//! assert_eq!(resolver.resolve("ok"), "D'accord");
//! assert_eq!(resolver.resolve("cancel"), "Cancel");
//! assert_eq!(resolver.resolve("quit"), "{$quit$}");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

use crate::catalog::{Catalog, CatalogId};
use crate::loader::CatalogLoader;
use crate::marker;

/// Which catalog produced a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// The active language.
    Primary,
    /// The fallback language.
    Fallback,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    pub tier: Tier,
}

/// Resolves keys through a primary and a fallback catalog.
pub struct KeyResolver {
    loader: Box<dyn CatalogLoader>,
    namespace: String,
    language: String,
    fallback_language: String,
    /// `None` entries record a failed load so it is not retried.
    catalogs: RefCell<AHashMap<CatalogId, Option<Rc<Catalog>>>>,
}

impl KeyResolver {
    #[must_use]
    pub fn new(
        loader: impl CatalogLoader + 'static,
        namespace: impl Into<String>,
        language: impl Into<String>,
        fallback_language: impl Into<String>,
    ) -> Self {
        Self {
            loader: Box::new(loader),
            namespace: namespace.into(),
            language: language.into(),
            fallback_language: fallback_language.into(),
            catalogs: RefCell::new(AHashMap::new()),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Code of the primary tier.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    /// Point the primary tier at another language.
    ///
    /// Catalogs stay memoized per pair, so returning to a language that was
    /// already loaded does not hit the loader again.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Forget every memoized catalog (including failed loads).
    pub fn invalidate(&self) {
        let dropped = {
            let mut catalogs = self.catalogs.borrow_mut();
            let n = catalogs.len();
            catalogs.clear();
            n
        };
        tracing::debug!(
            target: "glossa.catalog",
            namespace = %self.namespace,
            dropped,
            "catalog cache invalidated"
        );
    }

    /// Number of memoized pairs, loaded or failed.
    #[must_use]
    pub fn cached_catalogs(&self) -> usize {
        self.catalogs.borrow().len()
    }

    /// The primary catalog, loading it if needed.
    #[must_use]
    pub fn primary(&self) -> Option<Rc<Catalog>> {
        self.catalog(&self.language)
    }

    /// The fallback catalog, loading it if needed.
    #[must_use]
    pub fn fallback(&self) -> Option<Rc<Catalog>> {
        self.catalog(&self.fallback_language)
    }

    fn catalog(&self, language: &str) -> Option<Rc<Catalog>> {
        let id = CatalogId::new(self.namespace.as_str(), language);
        if let Some(slot) = self.catalogs.borrow().get(&id) {
            return slot.clone();
        }

        let loaded = match self.loader.load(&self.namespace, language) {
            Ok(catalog) => {
                tracing::debug!(
                    target: "glossa.catalog",
                    catalog = %id,
                    entries = catalog.len(),
                    "catalog loaded"
                );
                Some(Rc::new(catalog))
            }
            Err(err) => {
                tracing::warn!(
                    target: "glossa.catalog",
                    catalog = %id,
                    error_kind = err.kind(),
                    error = %err,
                    "catalog load failed; tier is absent"
                );
                None
            }
        };
        self.catalogs.borrow_mut().insert(id, loaded.clone());
        loaded
    }

    /// Look a key up without synthesizing a placeholder.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Resolved> {
        if let Some(text) = self
            .primary()
            .and_then(|catalog| catalog.get(key).map(str::to_owned))
        {
            return Some(Resolved {
                text,
                tier: Tier::Primary,
            });
        }

        // Same language on both tiers: the primary miss already answered.
        if self.fallback_language == self.language {
            return None;
        }

        let text = self
            .fallback()
            .and_then(|catalog| catalog.get(key).map(str::to_owned))?;
        tracing::debug!(
            target: "glossa.resolve",
            key,
            language = %self.language,
            fallback = %self.fallback_language,
            "resolved from fallback tier"
        );
        Some(Resolved {
            text,
            tier: Tier::Fallback,
        })
    }

    /// Resolve a key. Never fails: a key no tier knows comes back as `{$key$}`.
    #[must_use]
    pub fn resolve(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(resolved) => resolved.text,
            None => {
                tracing::debug!(
                    target: "glossa.resolve",
                    key,
                    language = %self.language,
                    "no translation; returning placeholder"
                );
                marker::encode(key)
            }
        }
    }

    /// Translate `text` if it is a marker.
    ///
    /// Returns `Some(translation)` only when `text` decodes to a key and the
    /// resolved string differs from `text`. `None` means "leave the original
    /// text in place", which covers literal text, malformed markers, and a
    /// key whose translation is the marker itself.
    #[must_use]
    pub fn try_translate(&self, text: &str) -> Option<String> {
        let key = marker::decode(text)?;
        let output = self.resolve(key);
        (output != text).then_some(output)
    }
}

impl fmt::Debug for KeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyResolver")
            .field("namespace", &self.namespace)
            .field("language", &self.language)
            .field("fallback_language", &self.fallback_language)
            .field("cached_catalogs", &self.cached_catalogs())
            .finish_non_exhaustive()
    }
}
