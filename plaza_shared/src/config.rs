//! Configuration system.
//!
//! Loads client configuration from JSON strings/files (file IO left to app).

use serde::{Deserialize, Serialize};

/// Root configuration for the client core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// World extent in world units.
    pub world_w: f32,
    pub world_h: f32,
    /// Viewport extent in world units.
    pub viewport_w: f32,
    pub viewport_h: f32,
    /// Exponential smoothing rate: larger is snappier tracking.
    #[serde(default = "default_smoothing_rate")]
    pub smoothing_rate: f32,
    /// Milliseconds each walk-cycle frame is held.
    #[serde(default = "default_walk_frame_ms")]
    pub walk_frame_ms: f32,
    /// Jump gesture duration in milliseconds.
    #[serde(default = "default_jump_ms")]
    pub jump_ms: f32,
    /// Jump gesture peak draw offset in world units.
    #[serde(default = "default_jump_peak")]
    pub jump_peak: f32,
    /// Avatar extent, used for draw culling margins and label placement.
    #[serde(default = "default_avatar_w")]
    pub avatar_w: f32,
    #[serde(default = "default_avatar_h")]
    pub avatar_h: f32,
    /// Display name sent with the join intent.
    #[serde(default = "default_player_name")]
    pub player_name: String,
}

fn default_smoothing_rate() -> f32 {
    10.0
}

fn default_walk_frame_ms() -> f32 {
    120.0
}

fn default_jump_ms() -> f32 {
    600.0
}

fn default_jump_peak() -> f32 {
    24.0
}

fn default_avatar_w() -> f32 {
    32.0
}

fn default_avatar_h() -> f32 {
    48.0
}

fn default_player_name() -> String {
    "Player".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            world_w: 2000.0,
            world_h: 2000.0,
            viewport_w: 800.0,
            viewport_h: 600.0,
            smoothing_rate: default_smoothing_rate(),
            walk_frame_ms: default_walk_frame_ms(),
            jump_ms: default_jump_ms(),
            jump_peak: default_jump_peak(),
            avatar_w: default_avatar_w(),
            avatar_h: default_avatar_h(),
            player_name: default_player_name(),
        }
    }
}

impl ClientConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
