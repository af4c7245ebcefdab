//! Distance-triggered content spawning
//!
//! One watermark per spawn class. Whenever the player's x plus the class gap
//! passes the watermark, the watermark advances by one gap and one entity of
//! that class is emitted. This repeats until the watermark catches up, so a
//! large jump in progress emits one entity per crossed threshold.

use glam::Vec2;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityId, EntityKind, Layer, Shape};
use crate::config::GameConfig;

/// Spawn class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnClass {
    Enemy,
    Scenery,
    PowerUp,
}

/// Per-class watermarks (never decrease)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnCursor {
    pub enemy_x: f32,
    pub scenery_x: f32,
    pub power_up_x: f32,
}

impl SpawnCursor {
    pub fn watermark(&self, class: SpawnClass) -> f32 {
        match class {
            SpawnClass::Enemy => self.enemy_x,
            SpawnClass::Scenery => self.scenery_x,
            SpawnClass::PowerUp => self.power_up_x,
        }
    }

    fn watermark_mut(&mut self, class: SpawnClass) -> &mut f32 {
        match class {
            SpawnClass::Enemy => &mut self.enemy_x,
            SpawnClass::Scenery => &mut self.scenery_x,
            SpawnClass::PowerUp => &mut self.power_up_x,
        }
    }
}

/// One emitted entity and the watermark that triggered it
#[derive(Debug, Clone)]
pub struct Spawned {
    pub class: SpawnClass,
    pub watermark: f32,
    pub entity: Entity,
}

/// Procedural content generator
///
/// The RNG only chooses sub-kinds (Judge/Tenant, House/Building). Any
/// `RngCore` can be injected; the world defaults to a seeded PCG.
#[derive(Debug, Clone)]
pub struct Spawner<R> {
    cursor: SpawnCursor,
    rng: R,
}

impl<R: RngCore> Spawner<R> {
    pub fn new(rng: R) -> Self {
        Self {
            cursor: SpawnCursor::default(),
            rng,
        }
    }

    pub fn cursor(&self) -> &SpawnCursor {
        &self.cursor
    }

    /// Emit every entity whose threshold `player_x` has crossed
    ///
    /// `next_id` allocates ids for new entities. Classes are evaluated
    /// independently, in enemy, scenery, power-up order.
    pub fn update(
        &mut self,
        player_x: f32,
        config: &GameConfig,
        mut next_id: impl FnMut() -> EntityId,
    ) -> Vec<Spawned> {
        let mut spawned = Vec::new();

        for class in [SpawnClass::Enemy, SpawnClass::Scenery, SpawnClass::PowerUp] {
            let gap = gap_for(class, config);
            debug_assert!(gap > 0.0, "spawn gap must be positive");
            if gap <= 0.0 {
                continue;
            }

            while player_x + gap > self.cursor.watermark(class) {
                let watermark = {
                    let mark = self.cursor.watermark_mut(class);
                    *mark += gap;
                    *mark
                };
                let entity = self.make_entity(class, watermark, config, next_id());
                log::debug!(
                    "spawned {:?} #{} at x={} (watermark {})",
                    entity.kind,
                    entity.id.0,
                    entity.pos.x,
                    watermark
                );
                spawned.push(Spawned {
                    class,
                    watermark,
                    entity,
                });
            }
        }

        spawned
    }

    fn make_entity(&mut self, class: SpawnClass, watermark: f32, config: &GameConfig, id: EntityId) -> Entity {
        let x = watermark + config.spawn_lead;
        // Entities travel past the left edge of the world before despawning
        let distance = x + config.travel_margin;

        match class {
            SpawnClass::Enemy => {
                let kind = if self.rng.random_bool(0.5) {
                    EntityKind::Judge
                } else {
                    EntityKind::Tenant
                };
                let duration = distance / config.enemy_speed;
                Entity::new(id, kind, Vec2::new(x, config.enemy_y), Shape::Circle {
                    radius: config.enemy_radius,
                })
                .with_body(Body::drifting(kind.category()))
                .with_velocity(Vec2::new(-config.enemy_speed, 0.0))
                .with_ttl(duration)
            }
            SpawnClass::Scenery => {
                let kind = if self.rng.random_bool(0.5) {
                    EntityKind::House
                } else {
                    EntityKind::Building
                };
                Entity::new(id, kind, Vec2::new(x, config.scenery_y), Shape::Rect {
                    half_extents: Vec2::splat(config.scenery_size / 2.0),
                })
                .on_layer(Layer::Background)
                .with_velocity(Vec2::new(-distance / config.drift_duration, 0.0))
                .with_ttl(config.drift_duration)
            }
            SpawnClass::PowerUp => Entity::new(id, EntityKind::PowerUp, Vec2::new(x, config.power_up_y), Shape::Circle {
                radius: config.power_up_radius,
            })
            .with_body(Body::drifting(EntityKind::PowerUp.category()))
            .with_velocity(Vec2::new(-distance / config.drift_duration, 0.0))
            .with_ttl(config.drift_duration),
        }
    }
}

fn gap_for(class: SpawnClass, config: &GameConfig) -> f32 {
    match class {
        SpawnClass::Enemy => config.enemy_spawn_gap,
        SpawnClass::Scenery => config.scenery_spawn_gap,
        SpawnClass::PowerUp => config.power_up_spawn_gap,
    }
}
