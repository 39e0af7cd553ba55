//! Named alphabets for common positional numeral systems.

use std::collections::BTreeMap;

// Built-in alphabets, digits ordered from lowest to highest value.
const PRESET_ALPHABETS: [(&str, &str); 5] = [
    ("binary", "01"),
    ("ternary", "012"),
    ("octal", "01234567"),
    ("decimal", "0123456789"),
    ("hex", "0123456789ABCDEF"),
];

lazy_static::lazy_static! {
    pub static ref PRESETS: BTreeMap<&'static str, &'static str> =
        PRESET_ALPHABETS.iter().copied().collect();
}

pub struct PresetManager;

impl PresetManager {
    /// Resolves a preset name to its digits. Anything that is not a preset name is
    /// taken to be a literal alphabet and returned unchanged.
    pub fn resolve(name_or_alphabet: &str) -> &str {
        PRESETS
            .get(name_or_alphabet.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(name_or_alphabet)
    }

    /// Get a preset alphabet by its name
    pub fn get_preset(name: &str) -> Option<&'static str> {
        PRESETS.get(name).copied()
    }

    /// List all preset names
    pub fn list_preset_names() -> Vec<&'static str> {
        PRESETS.keys().copied().collect()
    }
}
