//! Game settings and preferences
//!
//! Persisted separately from high scores in the key/value store.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};
use crate::platform::TimestepMode;
use crate::sim::{SimConfig, Variant};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Physics/scoring preset
    pub variant: Variant,
    /// Frame pacing
    #[serde(default)]
    pub timestep: TimestepMode,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no star twinkle or wave animation)
    #[serde(default)]
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Rush,
            timestep: TimestepMode::Fixed,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "penguin_rush_settings";

    /// Simulation tuning for the selected variant
    pub fn sim_config(&self) -> SimConfig {
        SimConfig::for_variant(self.variant)
    }

    /// Load settings, falling back to defaults on any storage problem
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_missing_or_corrupt() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        store.set(Settings::STORAGE_KEY, "garbage").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            variant: Variant::Classic,
            timestep: TimestepMode::PerFrame,
            show_fps: true,
            ..Default::default()
        };
        settings.save(&mut store);

        let loaded = Settings::load(&store);
        assert_eq!(loaded, settings);
        assert_eq!(loaded.sim_config(), SimConfig::classic());
    }

    #[test]
    fn test_older_save_without_new_fields() {
        // Saves from older builds may carry fields that no longer exist
        let mut store = MemoryStore::new();
        store
            .set(
                Settings::STORAGE_KEY,
                r#"{"variant":"Classic","muted":true,"show_fps":false}"#,
            )
            .unwrap();
        let loaded = Settings::load(&store);
        assert_eq!(loaded.variant, Variant::Classic);
        assert_eq!(loaded.timestep, TimestepMode::Fixed);
        assert!(!loaded.reduced_motion);
    }
}
