//! Game settings and preferences
//!
//! Read from `orbit-dodge.json` in the working directory when present.
//! Gameplay tuning stays in [`crate::consts`]; this only covers presentation
//! and how a session is driven.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{RENDER_HZ, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Edge count of the circle fan
    pub fn circle_edges(&self) -> u32 {
        match self {
            QualityPreset::Low => 24,
            QualityPreset::Medium => 50,
            QualityPreset::High => 96,
        }
    }
}

/// Which draw-call sink to render into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// wgpu, offscreen target
    #[default]
    Gpu,
    /// Record draw calls only
    Null,
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub width: u32,
    pub height: u32,
    pub title: String,

    // === Rendering ===
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Ball afterimage
    pub trails: bool,
    /// Render cap in frames per second
    pub render_hz: f32,
    pub backend: Backend,

    // === Session ===
    /// Obstacle RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Close the window after this many seconds, driving input by autopilot.
    /// Without it the game runs until Escape or the process is stopped.
    pub session_seconds: Option<f64>,
    /// Simulated clock step per loop iteration instead of wall time
    pub fixed_step: Option<f64>,
    /// Autopilot hold length per direction, seconds
    pub autopilot_period: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            title: "Orbit Dodge".to_string(),

            quality: QualityPreset::Medium,
            trails: true,
            render_hz: RENDER_HZ,
            backend: Backend::Gpu,

            seed: None,
            session_seconds: None,
            fixed_step: None,
            autopilot_period: 1.5,
        }
    }
}

impl Settings {
    /// Settings file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "orbit-dodge.json";

    /// Circle fan edge count for the current preset
    pub fn circle_edges(&self) -> u32 {
        self.quality.circle_edges()
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from the working directory
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Seed to use for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
