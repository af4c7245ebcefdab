//! Entity model: player, hostiles, power-ups, scenery and ground
//!
//! Entities are plain records. Physics attributes live in an optional
//! [`Body`]; scenery has none and never takes part in contacts.

use std::ops::BitOr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable entity identifier (allocated in increasing order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    /// Hostile, stomp message "OVERRULED!"
    Judge,
    /// Hostile, stomp message "EVICTED!"
    Tenant,
    PowerUp,
    /// Scenery
    House,
    /// Scenery
    Building,
    Ground,
}

impl EntityKind {
    pub fn is_hostile(self) -> bool {
        matches!(self, EntityKind::Judge | EntityKind::Tenant)
    }

    pub fn is_scenery(self) -> bool {
        matches!(self, EntityKind::House | EntityKind::Building)
    }

    /// Physics category for kinds that carry a body
    pub fn category(self) -> Category {
        match self {
            EntityKind::Player => Category::PLAYER,
            EntityKind::Judge => Category::JUDGE,
            EntityKind::Tenant => Category::TENANT,
            EntityKind::PowerUp => Category::POWER_UP,
            EntityKind::Ground => Category::GROUND,
            EntityKind::House | EntityKind::Building => Category::NONE,
        }
    }
}

/// Physics category bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Category(pub u32);

impl Category {
    pub const NONE: Category = Category(0);
    pub const PLAYER: Category = Category(1 << 0);
    pub const GROUND: Category = Category(1 << 1);
    pub const JUDGE: Category = Category(1 << 2);
    pub const TENANT: Category = Category(1 << 3);
    pub const POWER_UP: Category = Category(1 << 4);

    pub const HOSTILE: Category = Category(Self::JUDGE.0 | Self::TENANT.0);

    /// True if every bit of `other` is set in `self`
    #[inline]
    pub fn contains(self, other: Category) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    #[inline]
    pub fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Category) -> Category {
        Category(self.0 | rhs.0)
    }
}

/// Physical participation of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub category: Category,
    /// Categories that raise contact notifications
    pub contact_test: Category,
    /// Categories that physically block this body
    pub collision: Category,
    /// Integrated each tick (static bodies never move)
    pub dynamic: bool,
    /// Pulled down by gravity
    pub gravity: bool,
}

impl Body {
    pub fn player() -> Self {
        Self {
            category: Category::PLAYER,
            contact_test: Category::HOSTILE | Category::POWER_UP,
            collision: Category::GROUND,
            dynamic: true,
            gravity: true,
        }
    }

    /// Gravity-exempt body that only reports contacts with the player
    pub fn drifting(category: Category) -> Self {
        Self {
            category,
            contact_test: Category::PLAYER,
            collision: Category::NONE,
            dynamic: true,
            gravity: false,
        }
    }

    pub fn ground() -> Self {
        Self {
            category: Category::GROUND,
            contact_test: Category::NONE,
            collision: Category::PLAYER,
            dynamic: false,
            gravity: false,
        }
    }
}

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { half_extents: Vec2 },
}

impl Shape {
    /// Full width/height for rendering
    pub fn size(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius * 2.0),
            Shape::Rect { half_extents } => half_extents * 2.0,
        }
    }
}

/// Draw layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Background,
    Gameplay,
}

/// Where an entity is in its life
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Lifecycle {
    Alive,
    /// Stomped: falling off screen, no longer collides
    Dying { remaining: f32 },
    /// Removed at the end of the tick
    Dead,
}

/// A simulated entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub shape: Shape,
    pub body: Option<Body>,
    pub layer: Layer,
    pub lifecycle: Lifecycle,
    /// Seconds left before removal (None = lives forever)
    pub ttl: Option<f32>,
    /// Overlapping the player as of the last contact pass
    #[serde(default)]
    pub touching: bool,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, shape: Shape) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            shape,
            body: None,
            layer: Layer::Gameplay,
            lifecycle: Lifecycle::Alive,
            ttl: None,
            touching: false,
        }
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_ttl(mut self, ttl: f32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lifecycle == Lifecycle::Dead
    }

    pub fn category(&self) -> Category {
        self.body.map(|b| b.category).unwrap_or(Category::NONE)
    }

    /// Start the stomp-kill drop: strip the body and fall straight down
    pub fn begin_dying(&mut self, drop_distance: f32, drop_duration: f32) {
        debug_assert!(self.is_alive(), "entity {:?} killed twice", self.id);
        if !self.is_alive() {
            return;
        }
        self.body = None;
        self.touching = false;
        self.vel = Vec2::new(0.0, -drop_distance / drop_duration);
        self.lifecycle = Lifecycle::Dying { remaining: drop_duration };
    }

    /// Mark for removal at the end of the tick
    pub fn despawn(&mut self) {
        self.body = None;
        self.touching = false;
        self.lifecycle = Lifecycle::Dead;
    }

    /// Count down ttl and dying timers, despawning when either runs out
    pub fn age(&mut self, dt: f32) {
        if let Some(ttl) = self.ttl.as_mut() {
            *ttl -= dt;
            if *ttl <= 0.0 {
                self.despawn();
                return;
            }
        }
        if let Lifecycle::Dying { remaining } = self.lifecycle {
            let remaining = remaining - dt;
            self.lifecycle = if remaining <= 0.0 {
                Lifecycle::Dead
            } else {
                Lifecycle::Dying { remaining }
            };
        }
    }
}
