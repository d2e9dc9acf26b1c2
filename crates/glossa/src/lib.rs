#![forbid(unsafe_code)]

//! Glossa public facade crate.
//!
//! Glossa translates display trees in place. Strings of the form `{$key$}`
//! anywhere in a tree (node text, list items, custom translatable content)
//! are looked up in the active language's catalog, then in the fallback
//! language's catalog. Keys missing from both stay visible as `{$key$}`.
//!
//! This crate re-exports the building blocks from `glossa-i18n` and
//! `glossa-widgets` and adds file-backed settings, a unified error type and
//! subscriber setup.
//!
//! # Example
//!
//! ```
//! use glossa::prelude::*;
//!
//! let loader = MemoryLoader::new().with_catalog(
//!     Catalog::new(CatalogId::new("app", "en")).with_entry("greeting", "Hello"),
//! );
//! let context = MemoryContext::new("app", "en", "en");
//! let localizer = Localizer::new(context, loader);
//!
//! let root = DisplayNode::panel([DisplayNode::label("{$greeting$}").into_ref()]).into_ref();
//! glossa::localize(&localizer, &root);
//!
//! let label = root.borrow().children().unwrap()[0].clone();
//! assert_eq!(label.borrow().text(), Some("Hello"));
//! ```

pub mod error;
pub mod logging;
pub mod settings;

use std::path::Path;

pub use error::{Error, Recovery, Result};
pub use settings::{FileSettings, Settings, SettingsError};

// --- i18n re-exports -------------------------------------------------------

pub use glossa_i18n::marker;
pub use glossa_i18n::{
    Catalog, CatalogCoverage, CatalogError, CatalogId, CatalogLoader, DirectoryLoader,
    KeyResolver, LanguageContext, LanguageDescriptor, Localizer, MemoryContext, MemoryLoader,
    PersistError, Resolved, Tier,
};

// --- Widget re-exports -----------------------------------------------------

pub use glossa_widgets::{
    ApplyReport, Caption, Choices, Content, ContentError, DisplayNode, Item, NodeRef,
    Translatable, Translator, enumerate,
};

/// Open a localizer from a TOML settings file.
///
/// Catalogs are read from the settings' `catalog_dir` (relative to the
/// settings file). Without a catalog directory every key shows its
/// placeholder until catalogs are provided some other way.
pub fn open_localizer(path: impl AsRef<Path>) -> Result<Localizer<FileSettings>> {
    let file = FileSettings::load(path.as_ref())?;
    let localizer = match file.catalog_root() {
        Some(root) => {
            tracing::debug!(
                target: "glossa.catalog",
                root = %root.display(),
                "using catalog directory"
            );
            Localizer::new(file, DirectoryLoader::new(root))
        }
        None => {
            tracing::warn!(
                target: "glossa.catalog",
                path = %path.as_ref().display(),
                "settings name no catalog_dir; all keys will show placeholders"
            );
            Localizer::new(file, MemoryLoader::new())
        }
    };
    Ok(localizer)
}

/// Translate every marker reachable from `root` with the localizer's
/// current language.
pub fn localize<C: LanguageContext>(localizer: &Localizer<C>, root: &NodeRef) -> ApplyReport {
    Translator::new(localizer.resolver()).apply_with_report(root)
}

/// Items for a language picker: each offered language's display name, in
/// the active language, in the order the context lists them.
#[must_use]
pub fn language_items<C: LanguageContext>(localizer: &Localizer<C>) -> Vec<Item> {
    localizer
        .languages()
        .iter()
        .map(|descriptor| Item::Text(localizer.display_name(descriptor)))
        .collect()
}

/// Common imports for day-to-day usage.
pub mod prelude {
    pub use crate::{
        ApplyReport, Caption, Catalog, CatalogId, CatalogLoader, Content, DirectoryLoader,
        DisplayNode, Error, FileSettings, Item, KeyResolver, LanguageContext,
        LanguageDescriptor, Localizer, MemoryContext, MemoryLoader, NodeRef, Result, Settings,
        Translatable, Translator,
    };
}
