//! Horizontal camera follow
//!
//! The canonical policy is a dead zone: the camera stays put while the
//! player is within `half_width` of its center and otherwise sits exactly
//! `half_width` behind the player. Vertical position is pinned to the
//! viewport mid-line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::CameraMode;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub mode: CameraMode,
}

impl Camera {
    pub fn new(mode: CameraMode, player_x: f32, mid_y: f32) -> Self {
        let mut camera = Self {
            pos: Vec2::new(player_x, mid_y),
            mode,
        };
        camera.follow(player_x, mid_y);
        camera
    }

    /// Recompute the camera origin from the player's x
    pub fn follow(&mut self, player_x: f32, mid_y: f32) {
        match self.mode {
            CameraMode::DeadZone { half_width } => {
                let dx = player_x - self.pos.x;
                if dx > half_width {
                    self.pos.x = player_x - half_width;
                } else if dx < -half_width {
                    self.pos.x = player_x + half_width;
                }
            }
            CameraMode::LeadOffset { lead } => {
                self.pos.x = player_x + lead;
            }
        }
        self.pos.y = mid_y;
    }
}
