//! Lane Rush - an endless lane-dodging arcade chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, the chaser)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio engine drone + procedural sound effects
//! - `best_time`: Persisted best survival time
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod best_time;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use best_time::BestTime;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest delta-time the simulation will accept per frame (seconds).
    /// Keeps a backgrounded tab from producing one huge catch-up step.
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Road / lane geometry
    pub const LANE_COUNT: usize = 5;
    pub const ROAD_MAX_WIDTH: f32 = 380.0;
    pub const ROAD_WIDTH_FRACTION: f32 = 0.92;

    /// Player vehicle
    pub const PLAYER_WIDTH: f32 = 26.0;
    pub const PLAYER_HEIGHT: f32 = 44.0;
    /// Distance of the player's center above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 120.0;
    pub const PLAYER_HITBOX_PAD: f32 = 4.0;
    /// Spring gain pulling the player toward the target lane center (1/s)
    pub const LANE_SPRING_GAIN: f32 = 12.0;
    /// Minimum time between lane steps while a direction is held (seconds)
    pub const LANE_CHANGE_COOLDOWN: f32 = 0.10;

    /// Obstacle fall speed at run start (px/s) and its ramp (px/s per second)
    pub const START_SPEED: f32 = 210.0;
    pub const SPEED_RAMP: f32 = 6.5;
    /// Speed above the starting speed that saturates the danger measure
    pub const DANGER_SPEED_RANGE: f32 = 600.0;

    /// Spawn policy
    pub const SPAWN_INTERVAL_START: f32 = 0.62;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.36;
    /// Interval shrink per elapsed second
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.002;
    pub const DOUBLE_SPAWN_CHANCE: f64 = 0.18;
    /// Elapsed time before double spawns become possible (seconds)
    pub const DOUBLE_SPAWN_AFTER: f32 = 10.0;
    pub const OBSTACLE_MIN_SIZE: f32 = 34.0;
    pub const OBSTACLE_SIZE_JITTER: f32 = 10.0;
    /// Obstacles are discarded this far below the bottom edge
    pub const OBSTACLE_CULL_MARGIN: f32 = 120.0;

    /// Chaser pressure
    pub const CHASER_START_CLOSENESS: f32 = 0.12;
    pub const CHASER_BASE_RATE: f32 = 0.032;
    pub const CHASER_DANGER_RATE: f32 = 0.050;
    pub const CHASER_CONGESTION_RATE: f32 = 0.018;
    /// Live obstacles beyond this count add congestion pressure
    pub const CONGESTION_THRESHOLD: usize = 6;
    /// Closeness above which the full-screen warning tint fades in
    pub const WARNING_TINT_THRESHOLD: f32 = 0.72;

    /// Flavor-toast cadence
    pub const TOAST_INTERVAL_START: f32 = 4.2;
    pub const TOAST_INTERVAL_MIN: f32 = 1.4;
    /// Interval shrink per elapsed second
    pub const TOAST_INTERVAL_DECAY: f32 = 0.02;
}

/// Format a survival time the way the HUD shows it
#[inline]
pub fn format_time(seconds: f32) -> String {
    format!("{:.1}", seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_formats_to_tenths() {
        assert_eq!(format_time(0.0), "0.0");
        assert_eq!(format_time(27.54), "27.5");
        assert_eq!(format_time(120.06), "120.1");
    }
}
