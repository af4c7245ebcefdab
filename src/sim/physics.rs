//! Player kinematics and gravity integration
//!
//! Integration uses the exact constant-acceleration update, so a jump arc is
//! the same parabola regardless of step size and never rises past its apex.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Horizontal input direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveDir {
    Left,
    #[default]
    None,
    Right,
}

impl MoveDir {
    pub fn sign(self) -> f32 {
        match self {
            MoveDir::Left => -1.0,
            MoveDir::None => 0.0,
            MoveDir::Right => 1.0,
        }
    }
}

/// Launch speed that peaks exactly at `apex_y` from `from_y`
///
/// Returns `None` when the apex is not above the start height.
pub fn jump_velocity(gravity: f32, from_y: f32, apex_y: f32) -> Option<f32> {
    let dy = apex_y - from_y;
    if dy <= 0.0 {
        return None;
    }
    Some((2.0 * gravity * dy).sqrt())
}

/// Whether the player is steady enough vertically to jump
#[inline]
pub fn can_jump(vel_y: f32, epsilon: f32) -> bool {
    vel_y.abs() < epsilon
}

/// Advance one body by `dt` under a constant downward `gravity`
pub fn integrate(entity: &mut Entity, gravity: f32, dt: f32) {
    let accel = match entity.body {
        Some(body) if !body.dynamic => return,
        Some(body) if body.gravity => Vec2::new(0.0, -gravity),
        _ => Vec2::ZERO,
    };
    entity.pos += entity.vel * dt + 0.5 * accel * dt * dt;
    entity.vel += accel * dt;
}

/// Keep a falling body resting on top of the ground
///
/// Returns true if the body was clamped this step.
pub fn clamp_to_ground(entity: &mut Entity, ground_top: f32, radius: f32) -> bool {
    let floor = ground_top + radius;
    if entity.pos.y < floor {
        entity.pos.y = floor;
        if entity.vel.y < 0.0 {
            entity.vel.y = 0.0;
        }
        return true;
    }
    false
}
