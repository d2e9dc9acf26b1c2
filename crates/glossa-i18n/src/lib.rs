#![forbid(unsafe_code)]

//! Key resolution foundation for Glossa.
//!
//! Resolves translation keys against a primary language catalog with a
//! fallback catalog behind it, recognizes the `{$key$}` marker syntax, and
//! owns the active-language switch.
//!
//! # Role in Glossa
//! `glossa-i18n` knows nothing about display trees. `glossa-widgets` walks a
//! tree and asks this crate whether each string is a marker and what it
//! translates to.
//!
//! # How it fits in the system
//! Catalogs come from a [`CatalogLoader`]; a [`KeyResolver`] memoizes them per
//! `(namespace, language)` pair and never surfaces load failures to callers.
//! A [`Localizer`] pairs the resolver with a [`LanguageContext`] that stores
//! and persists the active language.

pub mod catalog;
pub mod error;
pub mod language;
pub mod loader;
pub mod localizer;
pub mod marker;
pub mod resolver;

pub use catalog::{Catalog, CatalogCoverage, CatalogId};
pub use error::{CatalogError, PersistError};
pub use language::{LanguageContext, LanguageDescriptor, MemoryContext};
pub use loader::{CatalogLoader, DirectoryLoader, MemoryLoader};
pub use localizer::Localizer;
pub use resolver::{KeyResolver, Resolved, Tier};
