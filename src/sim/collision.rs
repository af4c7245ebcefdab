//! Contact detection and classification
//!
//! Only the player tests for contacts. A contact is acted on once, on the
//! tick the overlap begins; the `touching` flag on each entity suppresses
//! repeats while the overlap continues.

use glam::Vec2;

use super::entity::{Category, Entity, Shape};

/// How a player contact resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Player wins: the other entity is killed, player bounces
    Stomp,
    /// Player takes a hit
    Hit,
    /// Power-up collected
    Pickup,
}

/// Inputs needed to classify a contact
#[derive(Debug, Clone, Copy)]
pub struct ContactContext {
    pub player_y: f32,
    pub player_vel_y: f32,
    pub other_y: f32,
    pub other_category: Category,
    pub stomp_margin: f32,
    pub power_active: bool,
}

/// Decide how a player contact resolves
///
/// Returns `None` for categories the player doesn't react to.
pub fn classify_contact(ctx: &ContactContext) -> Option<ContactKind> {
    if ctx.other_category.contains(Category::POWER_UP) {
        return Some(ContactKind::Pickup);
    }
    if !ctx.other_category.intersects(Category::HOSTILE) {
        return None;
    }

    let stomp = ctx.player_y > ctx.other_y + ctx.stomp_margin && ctx.player_vel_y < 0.0;
    if stomp || ctx.power_active {
        Some(ContactKind::Stomp)
    } else {
        Some(ContactKind::Hit)
    }
}

/// Check whether two shapes overlap
pub fn shapes_overlap(a_pos: Vec2, a: &Shape, b_pos: Vec2, b: &Shape) -> bool {
    match (*a, *b) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            let reach = ra + rb;
            a_pos.distance_squared(b_pos) < reach * reach
        }
        (Shape::Circle { radius }, Shape::Rect { half_extents }) => {
            circle_rect_overlap(a_pos, radius, b_pos, half_extents)
        }
        (Shape::Rect { half_extents }, Shape::Circle { radius }) => {
            circle_rect_overlap(b_pos, radius, a_pos, half_extents)
        }
        (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
            let d = (a_pos - b_pos).abs();
            d.x < ha.x + hb.x && d.y < ha.y + hb.y
        }
    }
}

fn circle_rect_overlap(center: Vec2, radius: f32, rect_pos: Vec2, half_extents: Vec2) -> bool {
    let closest = center.clamp(rect_pos - half_extents, rect_pos + half_extents);
    center.distance_squared(closest) < radius * radius
}

/// Find contacts that began this tick between the player and `others`
///
/// Updates each entity's `touching` flag and returns the indices of entities
/// whose overlap started now. Dead, dying and bodyless entities are skipped.
pub fn begin_contacts(player: &Entity, others: &mut [Entity]) -> Vec<usize> {
    let Some(player_body) = player.body else {
        return Vec::new();
    };

    let mut began = Vec::new();
    for (index, other) in others.iter_mut().enumerate() {
        if other.id == player.id || !other.is_alive() {
            continue;
        }
        let Some(body) = other.body else {
            continue;
        };
        if !player_body.contact_test.intersects(body.category) {
            continue;
        }

        let overlapping = shapes_overlap(player.pos, &player.shape, other.pos, &other.shape);
        if overlapping && !other.touching {
            began.push(index);
        }
        other.touching = overlapping;
    }
    began
}
