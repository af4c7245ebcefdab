//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep, simulation clock only (no wall time)
//! - Seeded or injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod entity;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{ContactContext, ContactKind, begin_contacts, classify_contact, shapes_overlap};
pub use entity::{Body, Category, Entity, EntityId, EntityKind, Layer, Lifecycle, Shape};
pub use physics::{MoveDir, can_jump, clamp_to_ground, integrate, jump_velocity};
pub use spawner::{SpawnClass, SpawnCursor, Spawned, Spawner};
pub use state::{GameEvent, GamePhase, GameState, HitOutcome, PowerBuff};
pub use tick::{FixedStepper, FrameSnapshot, InputEvent, RenderableEntity, TickInput, World};
