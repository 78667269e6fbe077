//! Per-frame simulation update
//!
//! Advances one capped delta-time step: difficulty ramp, obstacle spawning,
//! player spring motion, lane-change input, collision testing, chaser
//! pressure, flavor toasts, and the engine feedback signal.

use rand::Rng;

use super::state::{GameEvent, GameOverReason, GamePhase, GameState, MoveDir, TAUNT_LINES};
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement direction
    pub move_dir: MoveDir,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Advance the simulation by one frame's delta-time.
///
/// `dt` is clamped to [0, MAX_FRAME_DT] so a stalled tab or a backwards
/// clock can never produce a runaway step. Only the Running phase advances.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Running,
            _ => {}
        }
    }

    if state.phase != GamePhase::Running {
        return;
    }

    state.t += dt;
    state.score_time += dt;

    // Difficulty ramps forever
    state.speed += state.speed_ramp * dt;

    // Spawn cadence shrinks with elapsed time down to a floor. The timer
    // resets to zero on fire; the overshoot is deliberately discarded.
    state.spawn_timer += dt;
    let spawn_interval =
        (state.spawn_every - state.t * SPAWN_INTERVAL_DECAY).max(SPAWN_INTERVAL_MIN);
    if state.spawn_timer >= spawn_interval {
        state.spawn_timer = 0.0;
        state.spawn_obstacle();
        if state.t > DOUBLE_SPAWN_AFTER && state.rng.random_bool(DOUBLE_SPAWN_CHANCE) {
            state.spawn_obstacle();
        }
    }

    // Smooth lane slide: first-order spring toward the lane center
    let target_x = state.road.lane_center_x(state.player.lane);
    state.player.vx = (target_x - state.player.pos.x) * LANE_SPRING_GAIN;
    state.player.pos.x += state.player.vx * dt;

    // A held direction steps one lane per cooldown window, never more
    if input.move_dir != MoveDir::None {
        state.lane_cooldown -= dt;
        if state.lane_cooldown <= 0.0 {
            let lane = state.player.lane as i32 + input.move_dir.offset();
            state.player.lane = lane.clamp(0, LANE_COUNT as i32 - 1) as usize;
            state.lane_cooldown = LANE_CHANGE_COOLDOWN;
        }
    }

    // Obstacles fall; drop the ones well past the bottom edge
    for o in &mut state.obstacles {
        o.pos.y += state.speed * dt;
    }
    let cull_y = state.view.h + OBSTACLE_CULL_MARGIN;
    state.obstacles.retain(|o| o.pos.y < cull_y);

    // Any overlap ends the run outright
    let player_box = state.player.hitbox();
    if state
        .obstacles
        .iter()
        .any(|o| o.hitbox().overlaps(&player_box))
    {
        end_run(state, GameOverReason::Collision);
        return;
    }

    // Chaser pressure: base rate, plus speed danger, plus congestion
    let danger = ((state.speed - START_SPEED) / DANGER_SPEED_RANGE).clamp(0.0, 1.0);
    let mut rate = CHASER_BASE_RATE + danger * CHASER_DANGER_RATE;
    if state.obstacles.len() > CONGESTION_THRESHOLD {
        rate += CHASER_CONGESTION_RATE;
    }
    state.chaser.closeness = (state.chaser.closeness + rate * dt).min(1.0);
    if state.chaser.closeness >= 1.0 {
        end_run(state, GameOverReason::Caught);
        return;
    }

    // Flavor toasts on their own shrinking cadence
    state.toast_timer += dt;
    let toast_interval =
        (state.toast_every - state.t * TOAST_INTERVAL_DECAY).clamp(TOAST_INTERVAL_MIN, state.toast_every);
    if state.toast_timer >= toast_interval {
        state.toast_timer = 0.0;
        let line = TAUNT_LINES[state.rng.random_range(0..TAUNT_LINES.len())];
        state.events.push(GameEvent::Toast(line));
    }

    // Feedback for the audio shell: idle rumble, plus speed, plus dread
    state.engine_intensity =
        (0.15 + danger * 0.85 + state.chaser.closeness * 0.55).clamp(0.0, 1.0);
}

fn end_run(state: &mut GameState, reason: GameOverReason) {
    state.phase = GamePhase::GameOver;
    state.engine_intensity = 0.0;
    state.events.push(GameEvent::GameOver {
        reason,
        survived: state.score_time,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, ObstacleKind, ViewSize};
    use glam::Vec2;
    use proptest::prelude::*;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(ViewSize { w: 420.0, h: 720.0 }, seed);
        state.reset(seed);
        state
    }

    /// Running state that never spawns, for tests that need an empty road
    fn quiet_state(seed: u64) -> GameState {
        let mut state = running_state(seed);
        state.spawn_every = f32::INFINITY;
        state
    }

    fn held(dir: MoveDir) -> TickInput {
        TickInput {
            move_dir: dir,
            pause: false,
        }
    }

    #[test]
    fn zero_dt_does_not_advance() {
        let mut state = running_state(3);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 0.0);
        }
        assert_eq!(state.t, 0.0);
        assert_eq!(state.score_time, 0.0);
        assert_eq!(state.speed, START_SPEED);
        assert_eq!(state.chaser.closeness, CHASER_START_CLOSENESS);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn oversized_dt_is_capped() {
        let mut state = quiet_state(3);
        tick(&mut state, &TickInput::default(), 5.0);
        assert!((state.t - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn exact_overlap_ends_the_run() {
        let mut state = quiet_state(5);
        let size = Vec2::splat(40.0);
        state.obstacles.push(Obstacle {
            lane: state.player.lane,
            pos: state.player.pos - size / 2.0,
            size,
            kind: ObstacleKind::Barrier,
        });

        tick(&mut state, &TickInput::default(), 1e-3);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.engine_intensity, 0.0);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::GameOver {
                reason: GameOverReason::Collision,
                ..
            }]
        ));
    }

    #[test]
    fn grazing_obstacle_in_next_lane_is_survivable() {
        let mut state = quiet_state(5);
        let lane = state.player.lane + 1;
        let size = Vec2::splat(34.0);
        state.obstacles.push(Obstacle {
            lane,
            pos: Vec2::new(
                state.road.lane_center_x(lane) - size.x / 2.0,
                state.player.pos.y - size.y / 2.0,
            ),
            size,
            kind: ObstacleKind::Cone,
        });

        tick(&mut state, &TickInput::default(), 1e-3);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn closeness_grows_at_base_rate_without_danger() {
        let mut state = quiet_state(7);
        state.speed_ramp = 0.0; // keep danger at zero

        let dt = 0.01;
        for _ in 0..2000 {
            tick(&mut state, &TickInput::default(), dt);
        }
        // After 20 s: 0.12 + 0.032 * 20 = 0.76
        assert!((state.chaser.closeness - 0.76).abs() < 5e-3);

        // The catch lands near T = (1 - 0.12) / 0.032 = 27.5 s
        let mut ticks = 2000u32;
        while state.phase == GamePhase::Running {
            tick(&mut state, &TickInput::default(), dt);
            ticks += 1;
            assert!(ticks < 3000, "chaser never caught up");
        }
        let caught_at = ticks as f32 * dt;
        assert!((caught_at - 27.5).abs() < 0.1, "caught at {caught_at}");
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::GameOver {
                reason: GameOverReason::Caught,
                ..
            })
        ));
    }

    #[test]
    fn pause_freezes_and_resumes() {
        let mut state = quiet_state(11);
        tick(&mut state, &TickInput::default(), 0.016);
        let frozen = (state.score_time, state.chaser.closeness);

        tick(&mut state, &TickInput { move_dir: MoveDir::None, pause: true }, 0.016);
        assert_eq!(state.phase, GamePhase::Paused);
        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), 0.016);
        }
        assert_eq!((state.score_time, state.chaser.closeness), frozen);

        tick(&mut state, &TickInput { move_dir: MoveDir::None, pause: true }, 0.016);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.score_time > frozen.0);
    }

    #[test]
    fn game_over_state_stays_inert() {
        let mut state = quiet_state(13);
        state.chaser.closeness = 1.0 - 1e-4;
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.phase, GamePhase::GameOver);

        let snapshot = state.clone();
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), 0.016);
        }
        assert_eq!(state, snapshot);
    }

    #[test]
    fn held_direction_steps_one_lane_per_cooldown() {
        let mut state = quiet_state(17);
        assert_eq!(state.player.lane, 2);

        // First step is immediate, the next waits out the cooldown
        tick(&mut state, &held(MoveDir::Left), 0.016);
        assert_eq!(state.player.lane, 1);
        for _ in 0..5 {
            tick(&mut state, &held(MoveDir::Left), 0.016);
        }
        assert_eq!(state.player.lane, 1);

        // Enough held time reaches the wall and clamps there
        for _ in 0..60 {
            tick(&mut state, &held(MoveDir::Left), 0.016);
        }
        assert_eq!(state.player.lane, 0);
    }

    #[test]
    fn player_slides_toward_target_lane_center() {
        let mut state = quiet_state(19);
        state.player.lane = LANE_COUNT - 1;
        let target = state.road.lane_center_x(state.player.lane);

        let mut last_dist = (target - state.player.pos.x).abs();
        for _ in 0..180 {
            tick(&mut state, &TickInput::default(), 0.016);
            let dist = (target - state.player.pos.x).abs();
            assert!(dist <= last_dist + 1e-4);
            last_dist = dist;
        }
        assert!(last_dist < 0.5);
    }

    #[test]
    fn early_spawns_fire_singly_on_the_base_cadence() {
        let mut state = running_state(23);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), 0.01);
        }
        // Two seconds in: fires near 0.62, 1.24, 1.85 - three singles, no
        // doubles before the 10 s threshold, nothing culled yet
        assert_eq!(state.obstacles.len(), 3);
    }

    #[test]
    fn engine_intensity_stays_normalized() {
        let mut state = quiet_state(29);
        tick(&mut state, &TickInput::default(), 0.016);
        let expected = 0.15 + state.chaser.closeness * 0.55;
        assert!((state.engine_intensity - expected).abs() < 1e-3);

        state.speed = START_SPEED + 10_000.0; // saturate danger
        state.chaser.closeness = 0.99;
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.engine_intensity, 1.0);
    }

    proptest! {
        #[test]
        fn lane_never_leaves_range(
            seed in any::<u64>(),
            steps in prop::collection::vec((0u8..3, 0.0f32..0.05), 1..300),
        ) {
            let mut state = running_state(seed);
            for (dir, dt) in steps {
                let move_dir = match dir {
                    0 => MoveDir::None,
                    1 => MoveDir::Left,
                    _ => MoveDir::Right,
                };
                tick(&mut state, &held(move_dir), dt);
                prop_assert!(state.player.lane < LANE_COUNT);
            }
        }

        #[test]
        fn closeness_never_decreases(
            seed in any::<u64>(),
            dts in prop::collection::vec(0.0f32..0.05, 1..400),
        ) {
            let mut state = quiet_state(seed);
            let mut last = state.chaser.closeness;
            for dt in dts {
                tick(&mut state, &TickInput::default(), dt);
                prop_assert!(state.chaser.closeness >= last);
                prop_assert!(state.chaser.closeness <= 1.0);
                last = state.chaser.closeness;
            }
        }
    }
}
