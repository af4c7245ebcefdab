//! Game tuning and configuration
//!
//! Every gameplay constant lives here. Hosts may override any subset of them
//! with a JSON document; missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Camera follow policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CameraMode {
    /// Camera holds still while the player stays within `half_width` of its
    /// center, then tracks the player at the zone boundary.
    DeadZone { half_width: f32 },
    /// Camera sits a fixed distance ahead of the player.
    LeadOffset { lead: f32 },
}

impl Default for CameraMode {
    fn default() -> Self {
        CameraMode::DeadZone { half_width: 140.0 }
    }
}

/// Invalid configuration, reported at construction time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be zero or greater (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("jump_apex_fraction must be in (0, 1] (got {0})")]
    ApexFraction(f32),
    #[error("max_hits must be at least 1")]
    NoHits,
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All tunable numbers for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Player ===
    /// Horizontal running speed (units/s)
    pub run_speed: f32,
    /// Jump apex as a fraction of viewport height
    pub jump_apex_fraction: f32,
    /// Player counts as grounded while |vy| is below this
    pub jump_epsilon: f32,
    /// Upward speed given to the player after a stomp
    pub stomp_bounce: f32,
    /// Player must be this far above an enemy's center to stomp it
    pub stomp_margin: f32,
    pub player_radius: f32,
    pub player_start_x: f32,
    pub player_start_y: f32,

    // === World ===
    /// Downward acceleration magnitude (units/s²)
    pub gravity: f32,
    /// Center line of the ground slab
    pub ground_y: f32,
    pub ground_thickness: f32,
    pub ground_width: f32,

    // === Camera ===
    pub camera: CameraMode,

    // === Spawning ===
    pub enemy_spawn_gap: f32,
    pub scenery_spawn_gap: f32,
    pub power_up_spawn_gap: f32,
    /// Distance ahead of the watermark that new entities appear
    pub spawn_lead: f32,
    /// Extra distance past x = 0 that spawned entities travel before removal
    pub travel_margin: f32,
    pub enemy_speed: f32,
    /// Time for scenery and power-ups to drift their whole travel distance
    pub drift_duration: f32,
    pub enemy_radius: f32,
    pub enemy_y: f32,
    pub power_up_radius: f32,
    pub power_up_y: f32,
    pub scenery_size: f32,
    pub scenery_y: f32,

    // === Rules ===
    pub max_hits: u32,
    /// Eviction power duration (seconds)
    pub power_up_duration: f32,
    /// Fall distance of a stomped enemy before it despawns
    pub kill_drop_distance: f32,
    pub kill_drop_duration: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 400.0,
            viewport_height: 600.0,

            run_speed: 250.0,
            jump_apex_fraction: 0.5,
            jump_epsilon: 1.0,
            stomp_bounce: 400.0,
            stomp_margin: 20.0,
            player_radius: 25.0,
            player_start_x: 100.0,
            player_start_y: 120.0,

            // 9.8 m/s² at 150 units per meter
            gravity: 1470.0,
            ground_y: 40.0,
            ground_thickness: 20.0,
            ground_width: 100_000.0,

            camera: CameraMode::default(),

            enemy_spawn_gap: 500.0,
            scenery_spawn_gap: 300.0,
            power_up_spawn_gap: 1500.0,
            spawn_lead: 300.0,
            travel_margin: 1000.0,
            enemy_speed: 100.0,
            drift_duration: 60.0,
            enemy_radius: 23.0,
            enemy_y: 60.0,
            power_up_radius: 20.0,
            power_up_y: 120.0,
            scenery_size: 80.0,
            scenery_y: 100.0,

            max_hits: 3,
            power_up_duration: 5.0,
            kill_drop_distance: 600.0,
            kill_drop_duration: 1.0,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Top of the ground slab (where the player's feet rest)
    pub fn ground_top(&self) -> f32 {
        self.ground_y + self.ground_thickness / 2.0
    }

    /// World-space height the player's jump peaks at
    pub fn jump_apex_y(&self) -> f32 {
        self.viewport_height * self.jump_apex_fraction
    }

    /// Reject values that would make the simulation misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("run_speed", self.run_speed),
            ("jump_epsilon", self.jump_epsilon),
            ("player_radius", self.player_radius),
            ("gravity", self.gravity),
            ("ground_width", self.ground_width),
            ("enemy_spawn_gap", self.enemy_spawn_gap),
            ("scenery_spawn_gap", self.scenery_spawn_gap),
            ("power_up_spawn_gap", self.power_up_spawn_gap),
            ("enemy_speed", self.enemy_speed),
            ("drift_duration", self.drift_duration),
            ("enemy_radius", self.enemy_radius),
            ("power_up_radius", self.power_up_radius),
            ("scenery_size", self.scenery_size),
            ("power_up_duration", self.power_up_duration),
            ("kill_drop_duration", self.kill_drop_duration),
        ];
        let non_negative = [
            ("stomp_bounce", self.stomp_bounce),
            ("stomp_margin", self.stomp_margin),
            ("ground_thickness", self.ground_thickness),
            ("spawn_lead", self.spawn_lead),
            ("travel_margin", self.travel_margin),
            ("kill_drop_distance", self.kill_drop_distance),
        ];
        let anywhere = [
            ("player_start_x", self.player_start_x),
            ("player_start_y", self.player_start_y),
            ("ground_y", self.ground_y),
            ("enemy_y", self.enemy_y),
            ("power_up_y", self.power_up_y),
            ("scenery_y", self.scenery_y),
            ("jump_apex_fraction", self.jump_apex_fraction),
        ];

        for &(field, value) in positive.iter().chain(&non_negative).chain(&anywhere) {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.jump_apex_fraction <= 0.0 || self.jump_apex_fraction > 1.0 {
            return Err(ConfigError::ApexFraction(self.jump_apex_fraction));
        }
        if self.max_hits == 0 {
            return Err(ConfigError::NoHits);
        }

        match self.camera {
            CameraMode::DeadZone { half_width } => {
                if !half_width.is_finite() {
                    return Err(ConfigError::NotFinite { field: "camera.half_width", value: half_width });
                }
                if half_width < 0.0 {
                    return Err(ConfigError::Negative { field: "camera.half_width", value: half_width });
                }
            }
            CameraMode::LeadOffset { lead } => {
                if !lead.is_finite() {
                    return Err(ConfigError::NotFinite { field: "camera.lead", value: lead });
                }
            }
        }

        Ok(())
    }
}
