//! Game state machine: hits, eviction power and game over
//!
//! `Playing` is the only live phase. `GameOver` is terminal; a new run means
//! building a new world.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Events raised during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A hostile was stomped (or flattened under eviction power)
    EnemyKilled { id: EntityId, kind: EntityKind },
    /// The player took a non-fatal hit
    PlayerHit { remaining: u32 },
    /// A power-up was collected
    PowerUpCollected { id: EntityId, expires_at: f64 },
    /// Eviction power ran out
    PowerUpExpired,
    /// The final hit landed
    GameOver,
}

impl GameEvent {
    /// HUD text shown for this event, in display order
    pub fn hud_messages(&self) -> Vec<String> {
        match self {
            GameEvent::EnemyKilled { kind, .. } => {
                let text = if *kind == EntityKind::Tenant { "EVICTED!" } else { "OVERRULED!" };
                vec![text.to_string()]
            }
            GameEvent::PlayerHit { remaining } => vec![format!("Ouch! {remaining} left")],
            GameEvent::PowerUpCollected { .. } => vec!["EVICTION POWER!".to_string()],
            GameEvent::PowerUpExpired => Vec::new(),
            GameEvent::GameOver => vec!["OTSC GRANTED".to_string(), "GAME OVER".to_string()],
        }
    }
}

/// Result of registering a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Remaining(u32),
    GameOver,
}

/// Time-limited eviction power
///
/// Active while `now < expiry`. Expiry is a deadline on the simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerBuff {
    pub expiry: Option<f64>,
}

impl PowerBuff {
    pub fn activate(&mut self, now: f64, duration: f64) -> f64 {
        let expiry = now + duration;
        self.expiry = Some(expiry);
        expiry
    }

    #[inline]
    pub fn is_active(&self, now: f64) -> bool {
        self.expiry.is_some_and(|expiry| now < expiry)
    }

    /// Clear a lapsed deadline; returns true the first time it is observed
    pub fn expire(&mut self, now: f64) -> bool {
        match self.expiry {
            Some(expiry) if now >= expiry => {
                self.expiry = None;
                true
            }
            _ => false,
        }
    }
}

/// Rules state for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub hits: u32,
    pub max_hits: u32,
    pub power: PowerBuff,
}

impl GameState {
    pub fn new(max_hits: u32) -> Self {
        debug_assert!(max_hits > 0);
        Self {
            phase: GamePhase::Playing,
            hits: 0,
            max_hits,
            power: PowerBuff::default(),
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn hits_remaining(&self) -> u32 {
        self.max_hits.saturating_sub(self.hits)
    }

    /// Count a hit, ending the run once `max_hits` is reached
    pub fn register_hit(&mut self) -> HitOutcome {
        debug_assert!(!self.is_game_over(), "hit registered after game over");
        if self.is_game_over() {
            return HitOutcome::GameOver;
        }

        self.hits += 1;
        if self.hits >= self.max_hits {
            self.phase = GamePhase::GameOver;
            log::info!("game over after {} hits", self.hits);
            HitOutcome::GameOver
        } else {
            HitOutcome::Remaining(self.max_hits - self.hits)
        }
    }

    pub fn activate_power(&mut self, now: f64, duration: f64) -> f64 {
        let expiry = self.power.activate(now, duration);
        log::info!("eviction power active until t={expiry:.2}");
        expiry
    }

    pub fn power_active(&self, now: f64) -> bool {
        self.power.is_active(now)
    }
}
