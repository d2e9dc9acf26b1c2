#![forbid(unsafe_code)]

//! The language switch: a [`LanguageContext`] paired with its resolver.
//!
//! [`Localizer::change_language`] is the only way the active language moves.
//! It updates the context, asks it to persist, and re-points the resolver's
//! primary tier so the very next resolution serves the new language. Trees
//! that were already translated keep their old text until the application
//! rebuilds them from markers and applies the translator again.

use crate::error::PersistError;
use crate::language::{LanguageContext, LanguageDescriptor};
use crate::loader::CatalogLoader;
use crate::resolver::KeyResolver;

/// Owns the active-language context and the resolver built from it.
#[derive(Debug)]
pub struct Localizer<C> {
    context: C,
    resolver: KeyResolver,
}

impl<C: LanguageContext> Localizer<C> {
    #[must_use]
    pub fn new(context: C, loader: impl CatalogLoader + 'static) -> Self {
        let resolver = KeyResolver::new(
            loader,
            context.namespace(),
            context.language(),
            context.fallback_language(),
        );
        Self { context, resolver }
    }

    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    #[must_use]
    pub fn resolver(&self) -> &KeyResolver {
        &self.resolver
    }

    #[must_use]
    pub fn active_language(&self) -> &str {
        self.context.language()
    }

    /// Languages offered by the context.
    #[must_use]
    pub fn languages(&self) -> &[LanguageDescriptor] {
        self.context.languages()
    }

    /// Display name of a descriptor, in the active language.
    #[must_use]
    pub fn display_name(&self, descriptor: &LanguageDescriptor) -> String {
        descriptor.display_name(&self.resolver)
    }

    /// See [`KeyResolver::resolve`].
    #[must_use]
    pub fn resolve(&self, key: &str) -> String {
        self.resolver.resolve(key)
    }

    /// See [`KeyResolver::try_translate`].
    #[must_use]
    pub fn try_translate(&self, text: &str) -> Option<String> {
        self.resolver.try_translate(text)
    }

    /// Switch to `descriptor`'s language.
    ///
    /// Returns `false` and does nothing when it is already active. Otherwise
    /// updates the context, persists it exactly once, and returns `true`. A
    /// persistence failure is logged; the switch still takes effect for this
    /// session.
    pub fn change_language(&mut self, descriptor: &LanguageDescriptor) -> bool {
        let target = descriptor.culture();
        if self.context.language() == target {
            return false;
        }

        let previous = self.context.language().to_owned();
        self.context.set_language(target);
        if let Err(err) = self.context.persist() {
            log_persist_failure(target, &err);
        }
        self.resolver.set_language(target);

        tracing::debug!(
            target: "glossa.language",
            from = %previous,
            to = %target,
            "active language changed"
        );
        true
    }

    /// Drop every memoized catalog so the next lookup reloads.
    pub fn reload(&self) {
        self.resolver.invalidate();
    }

    /// Give back the context, e.g. to inspect it after persisting.
    #[must_use]
    pub fn into_context(self) -> C {
        self.context
    }
}

fn log_persist_failure(language: &str, err: &PersistError) {
    tracing::warn!(
        target: "glossa.language",
        language = %language,
        error = %err,
        "failed to persist active language"
    );
}
