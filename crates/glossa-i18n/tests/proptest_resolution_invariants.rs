//! Property-based invariant tests for key resolution.
//!
//! 1. Keys only in the fallback catalog resolve to the fallback value
//! 2. Keys in neither catalog resolve to the `{$key$}` placeholder
//! 3. The primary catalog wins whenever it has the key
//! 4. Resolution is deterministic for fixed catalogs
//! 5. Non-marker text is never translated
//! 6. decode(encode(k)) == k for every non-empty key
//! 7. Coverage percent stays in [0, 100]

use std::collections::BTreeMap;

use glossa_i18n::marker;
use glossa_i18n::{Catalog, CatalogId, KeyResolver, MemoryLoader};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn catalog(language: &str, entries: &BTreeMap<String, String>) -> Catalog {
    Catalog::from_entries(
        CatalogId::new("app", language),
        entries.iter().map(|(k, v)| (k.clone(), v.clone())),
    )
}

fn resolver(
    primary: &BTreeMap<String, String>,
    fallback: &BTreeMap<String, String>,
) -> KeyResolver {
    let loader = MemoryLoader::new()
        .with_catalog(catalog("de", primary))
        .with_catalog(catalog("en", fallback));
    KeyResolver::new(loader, "app", "de", "en")
}

fn entries() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,6}(\\.[a-z]{1,6})?", "[A-Za-z ]{0,12}", 0..12)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Fallback-only keys
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fallback_only_keys_use_fallback(primary in entries(), fallback in entries()) {
        let r = resolver(&primary, &fallback);
        for (key, value) in &fallback {
            if !primary.contains_key(key) {
                prop_assert_eq!(&r.resolve(key), value);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Missing keys become placeholders
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_keys_become_placeholders(
        primary in entries(),
        fallback in entries(),
        key in "[a-z_]{1,10}",
    ) {
        prop_assume!(!primary.contains_key(&key) && !fallback.contains_key(&key));
        let r = resolver(&primary, &fallback);
        prop_assert_eq!(r.resolve(&key), format!("{{${key}$}}"));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Primary wins
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn primary_wins(primary in entries(), fallback in entries()) {
        let r = resolver(&primary, &fallback);
        for (key, value) in &primary {
            prop_assert_eq!(&r.resolve(key), value);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolution_is_deterministic(
        primary in entries(),
        fallback in entries(),
        key in "[a-z]{1,6}",
    ) {
        let r = resolver(&primary, &fallback);
        let a = r.resolve(&key);
        let b = r.resolve(&key);
        prop_assert_eq!(a, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Non-markers are left alone
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn non_markers_never_translate(text in ".{0,24}", fallback in entries()) {
        let is_marker_shape =
            text.len() > 4 && text.starts_with("{$") && text.ends_with("$}");
        prop_assume!(!is_marker_shape);
        let r = resolver(&BTreeMap::new(), &fallback);
        prop_assert_eq!(r.try_translate(&text), None);
    }
}

#[test]
fn empty_marker_is_not_a_key() {
    let mut fallback = BTreeMap::new();
    fallback.insert(String::new(), "empty".to_string());
    let r = resolver(&BTreeMap::new(), &fallback);
    assert_eq!(r.try_translate("{$$}"), None);
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Marker codec
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn encode_decode_identity(key in ".{1,16}") {
        let wrapped = marker::encode(&key);
        prop_assert_eq!(marker::decode(&wrapped), Some(key.as_str()));
    }

    #[test]
    fn decode_never_panics(text in any::<String>()) {
        let _ = marker::decode(&text);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Coverage bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coverage_percent_in_range(primary in entries(), reference in entries()) {
        let coverage = catalog("de", &primary).coverage_against(&catalog("en", &reference));
        let pct = coverage.coverage_percent();
        prop_assert!((0.0..=100.0).contains(&pct), "coverage {} out of range", pct);
        prop_assert_eq!(coverage.present + coverage.missing.len(), reference.len());
    }
}
