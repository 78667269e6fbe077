//! Game state and core simulation types
//!
//! Everything the update step mutates and the renderer reads lives here.
//! All timers and cooldowns are explicit named fields.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of the run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first start
    Start,
    /// Help overlay (reached from Start only)
    HowTo,
    /// Active gameplay
    Running,
    /// Run frozen; resumes to Running
    Paused,
    /// Run ended; only action is restart
    GameOver,
}

/// Held movement intent, resolved from whichever input source is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveDir {
    #[default]
    None,
    Left,
    Right,
}

impl MoveDir {
    /// Lane step this direction produces
    pub fn offset(self) -> i32 {
        match self {
            MoveDir::None => 0,
            MoveDir::Left => -1,
            MoveDir::Right => 1,
        }
    }
}

/// Obstacle variety. Spawn split is 72% cone, 20% barrier, 8% slick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Cone,
    Barrier,
    Slick,
}

impl ObstacleKind {
    /// Weighted-random kind roll
    pub fn roll(rng: &mut impl Rng) -> Self {
        let r: f32 = rng.random();
        if r < 0.72 {
            ObstacleKind::Cone
        } else if r < 0.92 {
            ObstacleKind::Barrier
        } else {
            ObstacleKind::Slick
        }
    }

    /// Hitbox inset for this kind; cones are forgiving at the edges
    pub fn hitbox_pad(self) -> f32 {
        match self {
            ObstacleKind::Cone => 6.0,
            ObstacleKind::Barrier | ObstacleKind::Slick => 4.0,
        }
    }
}

/// A falling obstacle. Plain data, no identity beyond its fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub lane: usize,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Collision box, shrunk by the kind-specific pad
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_min_size(self.pos, self.size).shrink(self.kind.hitbox_pad())
    }
}

/// The player's vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Target lane, always within [0, LANE_COUNT-1]
    pub lane: usize,
    /// Center position; x converges toward the lane center, y is fixed per view
    pub pos: Vec2,
    /// Horizontal spring velocity
    pub vx: f32,
}

impl Player {
    /// Collision box, shrunk by the fixed player pad
    pub fn hitbox(&self) -> Aabb {
        Aabb::centered(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)).shrink(PLAYER_HITBOX_PAD)
    }
}

/// The pursuer. One scalar: 1.0 means caught.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chaser {
    /// Normalized proximity in [0, 1], non-decreasing during a run
    pub closeness: f32,
}

/// Viewport in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSize {
    pub w: f32,
    pub h: f32,
}

/// Road placement derived from the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoadLayout {
    /// Left edge of the road
    pub x: f32,
    pub width: f32,
    pub lane_width: f32,
}

impl RoadLayout {
    /// Center x of a lane
    pub fn lane_center_x(&self, lane: usize) -> f32 {
        self.x + self.lane_width * (lane as f32 + 0.5)
    }
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Hit an obstacle
    Collision,
    /// The chaser closed the gap
    Caught,
}

/// Simulation-to-shell notifications, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Show a transient flavor line
    Toast(&'static str),
    /// The run just ended
    GameOver {
        reason: GameOverReason,
        survived: f32,
    },
}

/// Flavor lines flashed at the player as the chase drags on
pub const TAUNT_LINES: &[&str] = &[
    "HE'S GAINING",
    "NO DEFENSE",
    "HE'S STILL FASTER",
    "FIVE SECOND PENALTY (FOR YOU)",
    "BLUE FLAGS",
    "DRS ENABLED",
    "IT'S OVER, BRO",
    "HE SMELLS FEAR",
];

/// Complete simulation state. Created once, reset at each run start.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub view: ViewSize,
    pub road: RoadLayout,
    /// Elapsed run time (seconds)
    pub t: f32,
    /// Survival score (seconds); equals `t` today but scored independently
    pub score_time: f32,
    /// Obstacle fall speed (px/s), ramps forever
    pub speed: f32,
    /// Fall-speed increase per second
    pub speed_ramp: f32,
    pub spawn_timer: f32,
    /// Base spawn interval before the elapsed-time shrink
    pub spawn_every: f32,
    /// Remaining time before another held-direction lane step
    pub lane_cooldown: f32,
    pub toast_timer: f32,
    /// Base flavor-toast interval before the elapsed-time shrink
    pub toast_every: f32,
    pub player: Player,
    pub chaser: Chaser,
    pub obstacles: Vec<Obstacle>,
    /// Audio feedback signal in [0, 1], refreshed every tick
    pub engine_intensity: f32,
    /// Pending notifications for the shell
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh state on the title screen
    pub fn new(view: ViewSize, seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Start,
            view,
            road: RoadLayout::default(),
            t: 0.0,
            score_time: 0.0,
            speed: START_SPEED,
            speed_ramp: SPEED_RAMP,
            spawn_timer: 0.0,
            spawn_every: SPAWN_INTERVAL_START,
            lane_cooldown: 0.0,
            toast_timer: 0.0,
            toast_every: TOAST_INTERVAL_START,
            player: Player {
                lane: LANE_COUNT / 2,
                pos: Vec2::ZERO,
                vx: 0.0,
            },
            chaser: Chaser {
                closeness: CHASER_START_CLOSENESS,
            },
            obstacles: Vec::new(),
            engine_intensity: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.recompute_layout();
        state.player.pos.x = state.road.lane_center_x(state.player.lane);
        state
    }

    /// Reset every run field and enter Running. Deterministic for a fixed seed.
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = GamePhase::Running;
        self.t = 0.0;
        self.score_time = 0.0;
        self.speed = START_SPEED;
        self.speed_ramp = SPEED_RAMP;
        self.spawn_timer = 0.0;
        self.spawn_every = SPAWN_INTERVAL_START;
        self.lane_cooldown = 0.0;
        self.toast_timer = 0.0;
        self.toast_every = TOAST_INTERVAL_START;
        self.obstacles.clear();
        self.engine_intensity = 0.0;
        self.events.clear();
        self.chaser.closeness = CHASER_START_CLOSENESS;

        self.recompute_layout();
        self.player.lane = LANE_COUNT / 2;
        self.player.pos.x = self.road.lane_center_x(self.player.lane);
        self.player.vx = 0.0;
    }

    /// Adopt a new viewport. Lane centers only steer the player target and
    /// future spawns, so refreshing mid-run is safe.
    pub fn set_view(&mut self, view: ViewSize) {
        self.view = view;
        self.recompute_layout();
    }

    fn recompute_layout(&mut self) {
        let road_w = ROAD_MAX_WIDTH.min(self.view.w * ROAD_WIDTH_FRACTION);
        self.road = RoadLayout {
            x: (self.view.w - road_w) / 2.0,
            width: road_w,
            lane_width: road_w / LANE_COUNT as f32,
        };
        self.player.pos.y = self.view.h - PLAYER_BOTTOM_OFFSET;
    }

    /// Spawn one obstacle at a random lane with randomized size and kind,
    /// starting above the visible area.
    pub fn spawn_obstacle(&mut self) {
        let lane = self.rng.random_range(0..LANE_COUNT);
        let size = OBSTACLE_MIN_SIZE + self.rng.random::<f32>() * OBSTACLE_SIZE_JITTER;
        let x = self.road.lane_center_x(lane) - size / 2.0;
        let y = -80.0 - self.rng.random::<f32>() * 80.0;
        self.obstacles.push(Obstacle {
            lane,
            pos: Vec2::new(x, y),
            size: Vec2::splat(size),
            kind: ObstacleKind::roll(&mut self.rng),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_view() -> ViewSize {
        ViewSize { w: 420.0, h: 720.0 }
    }

    #[test]
    fn new_state_starts_on_title_screen() {
        let state = GameState::new(test_view(), 7);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.player.lane, LANE_COUNT / 2);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn road_is_centered_and_capped() {
        let state = GameState::new(test_view(), 7);
        assert_eq!(state.road.width, 380.0); // 420 * 0.92 > 380 cap
        assert_eq!(state.road.x, 20.0);
        let mid = state.road.lane_center_x(LANE_COUNT / 2);
        assert!((mid - 210.0).abs() < 1e-4);
    }

    #[test]
    fn narrow_view_uses_width_fraction() {
        let state = GameState::new(ViewSize { w: 300.0, h: 600.0 }, 7);
        assert!((state.road.width - 276.0).abs() < 1e-4);
    }

    #[test]
    fn reset_is_deterministic_for_a_seed() {
        let mut a = GameState::new(test_view(), 1);
        let mut b = GameState::new(test_view(), 2);
        a.reset(99);
        b.reset(99);
        assert_eq!(a, b);

        // Resetting again yields the same initial state
        let snapshot = a.clone();
        a.reset(99);
        assert_eq!(a, snapshot);
    }

    #[test]
    fn spawned_obstacles_stay_in_lane_bounds() {
        let mut state = GameState::new(test_view(), 42);
        state.reset(42);
        for _ in 0..200 {
            state.spawn_obstacle();
        }
        for o in &state.obstacles {
            assert!(o.lane < LANE_COUNT);
            assert!(o.size.x >= OBSTACLE_MIN_SIZE);
            assert!(o.size.x <= OBSTACLE_MIN_SIZE + OBSTACLE_SIZE_JITTER);
            assert!(o.pos.y <= -80.0);
            // Centered on its lane
            let center = o.pos.x + o.size.x / 2.0;
            assert!((center - state.road.lane_center_x(o.lane)).abs() < 1e-3);
        }
        // All three kinds show up across 200 rolls, cones most often
        let cones = state
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Cone)
            .count();
        let barriers = state
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Barrier)
            .count();
        let slicks = state.obstacles.len() - cones - barriers;
        assert!(cones > barriers && barriers > 0 && slicks > 0);
    }
}
