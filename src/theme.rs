use crate::config::StorageKeys;
use crate::core::kv::KeyValue;
use crate::models::models::Theme;
use crate::store::{read_record, write_record};

/// The saved theme, light when nothing readable is stored.
pub fn load_theme(kv: &impl KeyValue, keys: &StorageKeys) -> Theme {
    read_record(kv, &keys.theme).unwrap_or_default()
}

/// Returns false when the write did not reach storage.
pub fn save_theme(kv: &mut impl KeyValue, keys: &StorageKeys, theme: Theme) -> bool {
    write_record(kv, &keys.theme, &theme)
}

pub fn toggle_theme(kv: &mut impl KeyValue, keys: &StorageKeys) -> Theme {
    let theme = load_theme(&*kv, keys).toggled();
    save_theme(kv, keys, theme);
    theme
}
