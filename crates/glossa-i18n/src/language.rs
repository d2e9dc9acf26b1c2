#![forbid(unsafe_code)]

//! Available languages and the context that owns the active language code.

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::resolver::KeyResolver;

/// One selectable language.
///
/// The display name is a catalog key, not text. It is resolved through the
/// resolver of the *currently active* language, so a language list always
/// reads in the language the user is looking at, not in each language's own
/// name for itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    name_key: String,
    culture: String,
}

impl LanguageDescriptor {
    #[must_use]
    pub fn new(name_key: impl Into<String>, culture: impl Into<String>) -> Self {
        Self {
            name_key: name_key.into(),
            culture: culture.into(),
        }
    }

    /// Catalog key of the display name.
    #[must_use]
    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    /// Culture / locale code, e.g. `de` or `pt-BR`.
    #[must_use]
    pub fn culture(&self) -> &str {
        &self.culture
    }

    /// Display name in the resolver's active language.
    #[must_use]
    pub fn display_name(&self, resolver: &KeyResolver) -> String {
        resolver.resolve(&self.name_key)
    }
}

/// Where the active language lives and how it is saved.
pub trait LanguageContext {
    /// Active language code.
    fn language(&self) -> &str;

    /// Change the active language code. Does not persist.
    fn set_language(&mut self, code: &str);

    /// Language consulted when the active one lacks a key.
    fn fallback_language(&self) -> &str;

    /// Resource namespace all catalogs are loaded from.
    fn namespace(&self) -> &str;

    /// Languages offered to the user.
    fn languages(&self) -> &[LanguageDescriptor];

    /// Save the active language.
    fn persist(&mut self) -> Result<(), PersistError>;
}

/// A [`LanguageContext`] held entirely in memory.
///
/// `persist` only counts calls, which makes it the natural context for tests
/// and for applications that store the choice elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryContext {
    namespace: String,
    language: String,
    fallback_language: String,
    languages: Vec<LanguageDescriptor>,
    persist_count: usize,
}

impl MemoryContext {
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        language: impl Into<String>,
        fallback_language: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            language: language.into(),
            fallback_language: fallback_language.into(),
            languages: Vec::new(),
            persist_count: 0,
        }
    }

    /// Offer another language.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: LanguageDescriptor) -> Self {
        self.languages.push(descriptor);
        self
    }

    /// How many times `persist` has been called.
    #[must_use]
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }
}

impl LanguageContext for MemoryContext {
    fn language(&self) -> &str {
        &self.language
    }

    fn set_language(&mut self, code: &str) {
        code.clone_into(&mut self.language);
    }

    fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn languages(&self) -> &[LanguageDescriptor] {
        &self.languages
    }

    fn persist(&mut self) -> Result<(), PersistError> {
        self.persist_count += 1;
        Ok(())
    }
}
