//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Capped per-frame delta only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{
    Chaser, GameEvent, GameOverReason, GamePhase, GameState, MoveDir, Obstacle, ObstacleKind,
    Player, RoadLayout, ViewSize, TAUNT_LINES,
};
pub use tick::{tick, TickInput};
