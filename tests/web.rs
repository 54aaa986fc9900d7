//! Browser tests for the localStorage-backed layout preference.
//! Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use window_manager::{LayoutMode, LocalStorage, PreferenceStore, Settings, load_layout, save_layout};

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_store(settings: &Settings) -> LocalStorage {
    let store = LocalStorage::open().unwrap();
    store.remove(&settings.layout_key).unwrap();
    store.remove(&settings.legacy_layout_key).unwrap();
    store
}

#[wasm_bindgen_test]
fn test_legacy_column_count_is_migrated() {
    let settings = Settings::default();
    let store = fresh_store(&settings);
    store.set(&settings.legacy_layout_key, "4").unwrap();

    assert_eq!(load_layout(&store, &settings), LayoutMode::Columns(4));
    assert_eq!(store.get(&settings.legacy_layout_key).unwrap(), None);
    assert_eq!(store.get(&settings.layout_key).unwrap().as_deref(), Some("4"));
}

#[wasm_bindgen_test]
fn test_saved_layout_survives_reload() {
    let settings = Settings::default();
    let store = fresh_store(&settings);

    save_layout(&store, &settings, LayoutMode::Compact);

    let reopened = LocalStorage::open().unwrap();
    assert_eq!(load_layout(&reopened, &settings), LayoutMode::Compact);
}

#[wasm_bindgen_test]
fn test_missing_preference_is_medium() {
    let settings = Settings::default();
    let store = fresh_store(&settings);

    assert_eq!(load_layout(&store, &settings), LayoutMode::Medium);
}
