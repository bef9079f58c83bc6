//! Game settings and preferences
//!
//! Persisted as JSON in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::renderer::RenderOptions;
use crate::sim::{Features, GameConfig};

/// Rule set preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Idle start, power-ups, obstacles, character select
    #[default]
    Arcade,
    /// Ball falls at spawn, platform-touch scoring, level colours
    Classic,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Arcade => "Arcade",
            Variant::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arcade" => Some(Variant::Arcade),
            "classic" => Some(Variant::Classic),
            _ => None,
        }
    }

    pub fn features(&self) -> Features {
        match self {
            Variant::Arcade => Features::arcade(),
            Variant::Classic => Features::classic(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base rule set
    pub variant: Variant,

    // === Feature overrides (None = variant default) ===
    pub obstacles: Option<bool>,
    pub power_ups: Option<bool>,
    pub level_colors: Option<bool>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === HUD ===
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no invulnerability blink)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),

            obstacles: None,
            power_ups: None,
            level_colors: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            show_fps: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Settings for a variant with everything else at defaults
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Variant features with overrides applied
    pub fn features(&self) -> Features {
        let mut features = self.variant.features();
        if let Some(on) = self.obstacles {
            features.obstacles = on;
        }
        if let Some(on) = self.power_ups {
            features.power_ups = on;
        }
        if let Some(on) = self.level_colors {
            features.level_colors = on;
        }
        features
    }

    /// Simulation config for a new run
    pub fn game_config(&self, seed: u64, character: usize) -> GameConfig {
        GameConfig::new(self.features(), seed).with_character(character)
    }

    /// Flip mute; returns the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            blink: !self.reduced_motion,
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "skyhop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_arcade() {
        let settings = Settings::default();
        assert_eq!(settings.variant, Variant::Arcade);
        assert_eq!(settings.features(), Features::arcade());
    }

    #[test]
    fn test_overrides_apply_on_top_of_variant() {
        let mut settings = Settings::from_variant(Variant::Classic);
        assert_eq!(settings.features(), Features::classic());

        settings.power_ups = Some(true);
        settings.level_colors = Some(false);
        let features = settings.features();
        assert!(features.power_ups);
        assert!(!features.level_colors);
        assert!(!features.obstacles);
        assert!(features.ball_starts_falling);
    }

    #[test]
    fn test_game_config_carries_seed_and_character() {
        let config = Settings::default().game_config(99, 3);
        assert_eq!(config.seed, 99);
        assert_eq!(config.character, 3);
        assert_eq!(config.features, Features::arcade());
    }

    #[test]
    fn test_reduced_motion_disables_blink() {
        let mut settings = Settings::default();
        assert!(settings.render_options().blink);
        settings.reduced_motion = true;
        assert!(!settings.render_options().blink);
    }

    #[test]
    fn test_toggle_muted() {
        let mut settings = Settings::default();
        assert!(settings.toggle_muted());
        assert!(settings.muted);
        assert!(!settings.toggle_muted());
        assert!(!settings.muted);
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::from_str("CLASSIC"), Some(Variant::Classic));
        assert_eq!(Variant::from_str(Variant::Arcade.as_str()), Some(Variant::Arcade));
        assert_eq!(Variant::from_str("hard"), None);
    }

    #[test]
    fn test_json_round_trip_and_partial_input() {
        let mut settings = Settings::from_variant(Variant::Classic);
        settings.muted = true;
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);

        // Missing fields fall back to defaults
        let partial: Settings = serde_json::from_str(r#"{"variant":"Classic"}"#).unwrap();
        assert_eq!(partial.variant, Variant::Classic);
        assert_eq!(partial.master_volume, 0.8);
    }
}
