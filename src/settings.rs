//! Game settings and preferences
//!
//! Persisted separately from the run in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::tuning::SceneDensity;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Next preset, wrapping High back to Low
    pub fn cycle(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Scenery density for this preset
    pub fn density(&self) -> SceneDensity {
        match self {
            QualityPreset::Low => SceneDensity {
                trees: 3,
                clouds: 2,
                hill_layers: 1,
            },
            QualityPreset::Medium => SceneDensity {
                trees: 6,
                clouds: 5,
                hill_layers: 2,
            },
            QualityPreset::High => SceneDensity {
                trees: 10,
                clouds: 8,
                hill_layers: 3,
            },
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Scrolling hill layers
    pub parallax: bool,
    /// Drifting clouds
    pub clouds: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no bobbing hearts, no hit blinking)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            parallax: true,
            clouds: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "gannons_quest_settings";

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the drifting clouds for performance
        self.clouds = preset != QualityPreset::Low;
    }

    /// Scenery density implied by the quality preset
    pub fn density(&self) -> SceneDensity {
        self.quality.density()
    }

    /// Load settings from storage, falling back to defaults
    pub fn load() -> Self {
        match persistence::load_json::<Settings>(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                if let Err(e) = persistence::remove(Self::STORAGE_KEY) {
                    log::warn!("Stale settings left in storage: {}", e);
                }
                Self::default()
            }
        }
    }

    /// Save settings to storage
    pub fn save(&self) {
        match persistence::save_json(Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}
