//! Scene assembly
//!
//! Turns the simulation state into one vertex list per frame, in draw order:
//! road, lane lines, vignette, obstacles, chaser (glow, body, warning tint),
//! player, closeness bar. Pure with respect to the simulation; no game-logic
//! decisions happen here. Textual HUD lives in the DOM, not the GPU.

use glam::Vec2;

use super::shapes::{dashed_vline, gradient_rect, rect, rounded_rect};
use super::vertex::{colors, Vertex};
use crate::consts::*;
use crate::sim::{GameState, ObstacleKind};

/// Build the full frame for the current state
pub fn build(state: &GameState, reduced_motion: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);
    vertices.extend(road(state));
    vertices.extend(obstacles(state));
    vertices.extend(chaser(state, reduced_motion));
    vertices.extend(player(state));
    vertices.extend(closeness_bar(state));
    vertices
}

fn road(state: &GameState) -> Vec<Vertex> {
    let view = state.view;
    let road = state.road;
    let mut vertices = rounded_rect(
        Vec2::new(road.x, 0.0),
        Vec2::new(road.width, view.h),
        18.0,
        colors::ROAD,
    );

    for i in 1..LANE_COUNT {
        vertices.extend(dashed_vline(
            road.x + road.lane_width * i as f32,
            0.0,
            view.h,
            2.0,
            10.0,
            18.0,
            colors::LANE_LINE,
        ));
    }

    // Vertical vignette: a touch of shadow at the top, more at the bottom
    let [r, g, b] = colors::VIGNETTE;
    vertices.extend(gradient_rect(
        Vec2::ZERO,
        Vec2::new(view.w, view.h / 2.0),
        [r, g, b, 0.10],
        [r, g, b, 0.0],
    ));
    vertices.extend(gradient_rect(
        Vec2::new(0.0, view.h / 2.0),
        Vec2::new(view.w, view.h / 2.0),
        [r, g, b, 0.0],
        [r, g, b, 0.25],
    ));
    vertices
}

fn obstacles(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for o in &state.obstacles {
        let (w, h) = (o.size.x, o.size.y);
        match o.kind {
            ObstacleKind::Cone => {
                vertices.extend(rounded_rect(o.pos, o.size, 8.0, colors::CONE));
                vertices.extend(rounded_rect(
                    o.pos + Vec2::new(6.0, 10.0),
                    Vec2::new(w - 12.0, 6.0),
                    6.0,
                    colors::CONE_STRIPE,
                ));
            }
            ObstacleKind::Barrier => {
                vertices.extend(rounded_rect(o.pos, o.size, 10.0, colors::BARRIER));
                vertices.extend(rounded_rect(
                    o.pos + Vec2::new(6.0, 8.0),
                    Vec2::new(w - 12.0, h - 16.0),
                    8.0,
                    colors::BARRIER_INSET,
                ));
            }
            ObstacleKind::Slick => {
                vertices.extend(rounded_rect(o.pos, o.size, 18.0, colors::SLICK));
            }
        }
    }
    vertices
}

/// The pursuer is a red presence behind the player: it rises and swells with
/// closeness, and past the warning threshold it tints the whole screen.
fn chaser(state: &GameState, reduced_motion: bool) -> Vec<Vertex> {
    let closeness = state.chaser.closeness.clamp(0.0, 1.0);
    let road = state.road;

    let base_y = state.player.pos.y + 90.0;
    let y = base_y - closeness * 160.0;
    let x = road.x + road.width / 2.0;
    let w = 46.0 + closeness * 24.0;
    let h = 26.0 + closeness * 10.0;

    let mut vertices = rounded_rect(
        Vec2::new(x - (w + 40.0) / 2.0, y - (h + 30.0) / 2.0),
        Vec2::new(w + 40.0, h + 30.0),
        24.0,
        colors::CHASER_GLOW,
    );
    vertices.extend(rounded_rect(
        Vec2::new(x - w / 2.0, y - h / 2.0),
        Vec2::new(w, h),
        12.0,
        colors::CHASER,
    ));
    // Helmet dot
    vertices.extend(rounded_rect(
        Vec2::new(x - 8.0, y - 6.0),
        Vec2::new(16.0, 12.0),
        8.0,
        colors::CHASER_DOT,
    ));

    if closeness > WARNING_TINT_THRESHOLD && !reduced_motion {
        let alpha =
            (closeness - WARNING_TINT_THRESHOLD) / (1.0 - WARNING_TINT_THRESHOLD) * 0.20;
        let [r, g, b] = colors::WARNING_TINT;
        vertices.extend(rect(
            Vec2::ZERO,
            Vec2::new(state.view.w, state.view.h),
            [r, g, b, alpha],
        ));
    }
    vertices
}

fn player(state: &GameState) -> Vec<Vertex> {
    let p = state.player;
    let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
    let min = p.pos - size / 2.0;

    let mut vertices = rounded_rect(min, size, 8.0, colors::PLAYER_BODY);
    // Windshield
    vertices.extend(rounded_rect(
        min + Vec2::new(5.0, 7.0),
        Vec2::new(size.x - 10.0, 12.0),
        6.0,
        colors::PLAYER_GLASS,
    ));
    // Tail light
    vertices.extend(rounded_rect(
        min + Vec2::new(6.0, size.y - 10.0),
        Vec2::new(size.x - 12.0, 6.0),
        6.0,
        colors::PLAYER_TAIL,
    ));
    vertices
}

fn closeness_bar(state: &GameState) -> Vec<Vertex> {
    let closeness = state.chaser.closeness.clamp(0.0, 1.0);
    let road = state.road;
    let bar_x = road.x + 12.0;
    let bar_y = 38.0;
    let bar_w = road.width - 24.0;

    let mut vertices = rounded_rect(
        Vec2::new(bar_x, bar_y),
        Vec2::new(bar_w, 10.0),
        8.0,
        colors::BAR_TRACK,
    );
    vertices.extend(rounded_rect(
        Vec2::new(bar_x, bar_y),
        Vec2::new(bar_w * closeness, 10.0),
        8.0,
        colors::BAR_FILL,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ViewSize;

    fn state() -> GameState {
        let mut state = GameState::new(ViewSize { w: 420.0, h: 720.0 }, 1);
        state.reset(1);
        state
    }

    #[test]
    fn frame_is_whole_triangles() {
        let vertices = build(&state(), false);
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 3, 0);
    }

    #[test]
    fn warning_tint_appears_past_the_threshold() {
        let mut s = state();
        s.chaser.closeness = 0.5;
        let calm = build(&s, false).len();
        s.chaser.closeness = 0.9;
        let close = build(&s, false).len();
        assert_eq!(close, calm + 6); // one extra full-screen quad

        // Reduced motion suppresses the tint
        assert_eq!(build(&s, true).len(), calm);
    }

    #[test]
    fn obstacles_add_geometry() {
        let mut s = state();
        let empty = build(&s, false).len();
        s.spawn_obstacle();
        assert!(build(&s, false).len() > empty);
    }
}
