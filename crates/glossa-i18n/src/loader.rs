#![forbid(unsafe_code)]

//! Catalog loaders.
//!
//! Loading is the seam between Glossa and wherever strings are stored. The
//! resolver only needs [`CatalogLoader::load`]; a failure is never fatal to
//! resolution.
//!
//! Two loaders ship with the crate:
//!
//! - [`MemoryLoader`]: prebuilt catalogs held in memory (tests, bundles
//!   compiled into the binary).
//! - [`DirectoryLoader`]: one file per language under
//!   `<root>/<namespace>/`, either `<language>.json` or `<language>.toml`.
//!
//! Nested JSON objects and TOML tables flatten into dotted keys, so
//! `{"menu": {"open": "Open"}}` provides `menu.open`. A JSON file whose root
//! is not an object is a [`CatalogError::Shape`] error; the `.toml` sibling
//! is not consulted, the same as for a JSON syntax error.

use std::path::{Path, PathBuf};

use ahash::{AHashMap, AHashSet};

use crate::catalog::{Catalog, CatalogId};
use crate::error::CatalogError;

/// Produces the catalog for a `(namespace, language)` pair.
pub trait CatalogLoader {
    /// Load one catalog. Called at most once per pair by a resolver until it
    /// is invalidated.
    fn load(&self, namespace: &str, language: &str) -> Result<Catalog, CatalogError>;
}

impl<F> CatalogLoader for F
where
    F: Fn(&str, &str) -> Result<Catalog, CatalogError>,
{
    fn load(&self, namespace: &str, language: &str) -> Result<Catalog, CatalogError> {
        self(namespace, language)
    }
}

// ---------------------------------------------------------------------------
// MemoryLoader
// ---------------------------------------------------------------------------

/// Serves catalogs registered up front.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    catalogs: AHashMap<CatalogId, Catalog>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a catalog under its own id, replacing any previous one.
    pub fn insert(&mut self, catalog: Catalog) {
        self.catalogs.insert(catalog.id().clone(), catalog);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.insert(catalog);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

impl CatalogLoader for MemoryLoader {
    fn load(&self, namespace: &str, language: &str) -> Result<Catalog, CatalogError> {
        self.catalogs
            .get(&CatalogId::new(namespace, language))
            .cloned()
            .ok_or_else(|| CatalogError::not_found(namespace, language))
    }
}

// ---------------------------------------------------------------------------
// DirectoryLoader
// ---------------------------------------------------------------------------

/// Reads `<root>/<namespace>/<language>.json`, then `<language>.toml`.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files for a pair, in lookup order.
    ///
    /// `None` when the namespace or language is not a single plain path
    /// segment, so a code like `../x` never reaches outside `root`.
    #[must_use]
    pub fn candidates(&self, namespace: &str, language: &str) -> Option<[PathBuf; 2]> {
        if !is_plain_segment(namespace) || !is_plain_segment(language) {
            return None;
        }
        let dir = self.root.join(namespace);
        Some([
            dir.join(format!("{language}.json")),
            dir.join(format!("{language}.toml")),
        ])
    }
}

impl CatalogLoader for DirectoryLoader {
    fn load(&self, namespace: &str, language: &str) -> Result<Catalog, CatalogError> {
        let Some([json_path, toml_path]) = self.candidates(namespace, language) else {
            tracing::warn!(
                target: "glossa.catalog",
                namespace,
                language,
                "catalog pair is not a plain path segment; not looking it up"
            );
            return Err(CatalogError::not_found(namespace, language));
        };
        let id = CatalogId::new(namespace, language);

        if let Some(text) = read_optional(&json_path)? {
            let value: serde_json::Value =
                serde_json::from_str(&text).map_err(|source| CatalogError::Json {
                    path: json_path.clone(),
                    source,
                })?;
            let map = match value {
                serde_json::Value::Object(map) => map,
                other => {
                    return Err(CatalogError::Shape {
                        found: json_kind(&other),
                        path: json_path,
                    });
                }
            };
            let mut entries = Vec::new();
            for (key, child) in &map {
                flatten_json(key, child, &mut entries);
            }
            return Ok(build_catalog(id, &json_path, entries));
        }

        if let Some(text) = read_optional(&toml_path)? {
            let table: toml::Table = toml::from_str(&text).map_err(|source| CatalogError::Toml {
                path: toml_path.clone(),
                source,
            })?;
            let mut entries = Vec::new();
            for (key, value) in &table {
                flatten_toml(key, value, &mut entries);
            }
            return Ok(build_catalog(id, &toml_path, entries));
        }

        Err(CatalogError::not_found(namespace, language))
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', ':'])
}

/// `Ok(None)` when the file does not exist.
fn read_optional(path: &Path) -> Result<Option<String>, CatalogError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Flattened keys collide when a dotted key and a nested table name the same
// entry. The later entry wins, as in `Catalog::from_entries`.
fn build_catalog(id: CatalogId, path: &Path, entries: Vec<(String, String)>) -> Catalog {
    let mut seen = AHashSet::with_capacity(entries.len());
    for (key, _) in &entries {
        if !seen.insert(key.as_str()) {
            tracing::debug!(
                target: "glossa.catalog",
                path = %path.display(),
                key = %key,
                "duplicate catalog key; the later entry wins"
            );
        }
    }
    Catalog::from_entries(id, entries)
}

fn join_key(prefix: &str, key: &str) -> String {
    format!("{prefix}.{key}")
}

fn push_entry(key: &str, text: String, out: &mut Vec<(String, String)>) {
    if key.split('.').any(str::is_empty) {
        tracing::debug!(
            target: "glossa.catalog",
            key = %key,
            "skipping catalog value with an empty key segment"
        );
        return;
    }
    out.push((key.to_owned(), text));
}

// Scalars become their textual form; arrays and nulls carry no translation.
fn flatten_json(key: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
    use serde_json::Value;
    match value {
        Value::Object(map) => {
            for (child_key, child) in map {
                flatten_json(&join_key(key, child_key), child, out);
            }
        }
        Value::String(s) => push_entry(key, s.clone(), out),
        Value::Number(n) => push_entry(key, n.to_string(), out),
        Value::Bool(b) => push_entry(key, b.to_string(), out),
        Value::Null | Value::Array(_) => tracing::debug!(
            target: "glossa.catalog",
            key = %key,
            "skipping non-scalar catalog value"
        ),
    }
}

fn flatten_toml(key: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    use toml::Value;
    match value {
        Value::Table(table) => {
            for (child_key, child) in table {
                flatten_toml(&join_key(key, child_key), child, out);
            }
        }
        Value::String(s) => push_entry(key, s.clone(), out),
        Value::Integer(i) => push_entry(key, i.to_string(), out),
        Value::Float(f) => push_entry(key, f.to_string(), out),
        Value::Boolean(b) => push_entry(key, b.to_string(), out),
        Value::Datetime(d) => push_entry(key, d.to_string(), out),
        Value::Array(_) => tracing::debug!(
            target: "glossa.catalog",
            key = %key,
            "skipping array catalog value"
        ),
    }
}
