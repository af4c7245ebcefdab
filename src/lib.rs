//! Eviction Run - a side-scrolling arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, contacts, spawning, game state)
//! - `config`: Data-driven tuning with construction-time validation
//!
//! Rendering, audio and input wiring belong to the host. The host feeds
//! [`sim::InputEvent`]s and a tick delta to [`sim::World::advance`] and draws
//! the returned [`sim::FrameSnapshot`].

pub mod config;
pub mod sim;

pub use config::{CameraMode, ConfigError, GameConfig};

/// Simulation timing constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame the fixed stepper will account for
    pub const MAX_FRAME_DT: f32 = 0.1;
}
