//! Test fixtures for loading form documents.
//!
//! Fixtures live under `tests/fixtures/` and are cached after the first load.

use form_schema::FormDocument;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

static FIXTURE_CACHE: OnceLock<Mutex<HashMap<String, Value>>> = OnceLock::new();

/// Load a JSON fixture relative to `tests/fixtures`.
pub fn load_fixture(path: &str) -> Value {
    let cache = FIXTURE_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().expect("Fixture cache poisoned");

    if let Some(cached) = cache.get(path) {
        return cached.clone();
    }

    let fixture_path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), path);
    let content = std::fs::read_to_string(&fixture_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", fixture_path));
    let value: Value = serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse JSON fixture: {}", fixture_path));

    cache.insert(path.to_string(), value.clone());
    value
}

/// Load a form document fixture by name.
pub fn load_form(name: &str) -> FormDocument {
    serde_json::from_value(load_fixture(&format!("forms/{}.json", name)))
        .unwrap_or_else(|e| panic!("Invalid form fixture '{}': {}", name, e))
}

/// Raw JSON text of a form document fixture.
pub fn form_json(name: &str) -> String {
    load_fixture(&format!("forms/{}.json", name)).to_string()
}
