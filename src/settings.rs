//! Persisted Settings
//!
//! Window, frame cap, background path, and camera tuning, stored as JSON
//! next to the binary. Missing fields fall back to defaults so old files
//! keep loading as tunables are added.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::camera::CameraTuning;
use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

pub const SETTINGS_PATH: &str = "mode7.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Frame-rate cap in frames per second
    pub frame_cap: f32,
    /// Background image path, tried at startup
    pub image: String,
    /// Perspective near-plane distance in screen rows
    pub near: f32,
    /// Horizon scanline; rows at or above it stay sky
    pub horizon: u32,
    pub camera: CameraTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            frame_cap: 60.0,
            image: "content/map.png".to_string(),
            near: 16.0,
            horizon: DEFAULT_HEIGHT / 2,
            camera: CameraTuning::default(),
        }
    }
}

impl Settings {
    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}
