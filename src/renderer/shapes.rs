//! Triangulation of 2D primitives
//!
//! All coordinates are CSS pixels, origin top-left, y down; the pipeline maps
//! them to NDC at submit time.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use super::vertex::Vertex;

/// Arc segments used per rounded corner
const CORNER_SEGMENTS: u32 = 4;

/// Axis-aligned filled rectangle (two triangles)
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Rectangle with per-vertex colors along y, for gradients
pub fn gradient_rect(min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
    ]
}

/// Filled rounded rectangle as a fan around its center.
/// The corner radius is clamped to half the smaller extent.
pub fn rounded_rect(min: Vec2, size: Vec2, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let r = radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    let max = min + size;
    let center = min + size / 2.0;

    // Corner arc centers and their starting angles, walking clockwise in
    // screen space from the top-right corner
    let corners = [
        (Vec2::new(max.x - r, min.y + r), -FRAC_PI_2),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
        (Vec2::new(min.x + r, min.y + r), FRAC_PI_2 * 2.0),
    ];

    let mut outline = Vec::with_capacity((CORNER_SEGMENTS as usize + 1) * 4);
    for (pivot, start) in corners {
        for i in 0..=CORNER_SEGMENTS {
            let theta = start + FRAC_PI_2 * (i as f32 / CORNER_SEGMENTS as f32);
            outline.push(pivot + Vec2::new(theta.cos(), theta.sin()) * r);
        }
    }

    // Convex outline: fan from the center
    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Vertical dashed line, rendered as a column of thin rectangles
pub fn dashed_vline(
    x: f32,
    y_start: f32,
    y_end: f32,
    width: f32,
    dash: f32,
    gap: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut y = y_start;
    while y < y_end {
        let len = dash.min(y_end - y);
        vertices.extend(rect(
            Vec2::new(x - width / 2.0, y),
            Vec2::new(width, len),
            color,
        ));
        y += dash + gap;
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_two_triangles() {
        let v = rect(Vec2::ZERO, Vec2::new(10.0, 5.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
    }

    #[test]
    fn degenerate_shapes_produce_nothing() {
        assert!(rect(Vec2::ZERO, Vec2::new(0.0, 5.0), [1.0; 4]).is_empty());
        assert!(rounded_rect(Vec2::ZERO, Vec2::new(-1.0, 5.0), 4.0, [1.0; 4]).is_empty());
    }

    #[test]
    fn rounded_rect_stays_inside_its_bounds() {
        let min = Vec2::new(10.0, 20.0);
        let size = Vec2::new(30.0, 40.0);
        let v = rounded_rect(min, size, 8.0, [1.0; 4]);
        assert_eq!(v.len() % 3, 0);
        for vert in v {
            assert!(vert.position[0] >= min.x - 1e-3 && vert.position[0] <= min.x + size.x + 1e-3);
            assert!(vert.position[1] >= min.y - 1e-3 && vert.position[1] <= min.y + size.y + 1e-3);
        }
    }

    #[test]
    fn oversized_radius_is_clamped() {
        // Radius past half-extent must not invert the outline
        let v = rounded_rect(Vec2::ZERO, Vec2::new(10.0, 6.0), 50.0, [1.0; 4]);
        assert!(!v.is_empty());
        for vert in v {
            assert!(vert.position[0] >= -1e-3 && vert.position[0] <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn dashes_respect_the_pattern() {
        let v = dashed_vline(5.0, 0.0, 100.0, 2.0, 10.0, 18.0, [1.0; 4]);
        // 100 / (10 + 18) -> 4 dashes, 6 vertices each
        assert_eq!(v.len(), 4 * 6);
    }
}
