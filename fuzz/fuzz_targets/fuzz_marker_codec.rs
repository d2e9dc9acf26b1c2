#![no_main]

use glossa_i18n::marker;
use glossa_i18n::{Catalog, CatalogId, KeyResolver, MemoryLoader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // decode must never panic, including on multi-byte text near the delimiters.
    match marker::decode(text) {
        Some(key) => {
            assert!(!key.is_empty(), "decoded key must be non-empty");
            assert!(marker::is_marker(text));
            assert_eq!(marker::encode(key), text, "decode/encode must be lossless");
        }
        None => assert!(!marker::is_marker(text)),
    }

    // Any non-empty text survives encode/decode verbatim.
    if !text.is_empty() {
        let encoded = marker::encode(text);
        assert_eq!(marker::decode(&encoded), Some(text));
    }

    // With no catalogs, translation is always a no-op.
    let resolver = KeyResolver::new(MemoryLoader::new(), "app", "en", "en");
    assert_eq!(resolver.try_translate(text), None);

    // With one catalog holding the fuzzed key, a marker translates to its value.
    if let Some(key) = marker::decode(text) {
        let loader = MemoryLoader::new()
            .with_catalog(Catalog::new(CatalogId::new("app", "en")).with_entry(key, "value"));
        let resolver = KeyResolver::new(loader, "app", "en", "en");
        assert_eq!(resolver.try_translate(text).as_deref(), Some("value"));
    }
});
