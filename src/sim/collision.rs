//! Axis-aligned collision testing
//!
//! The entire collision model is overlap between padded axis-aligned boxes:
//! the player's box shrunk by a fixed pad against each obstacle's box shrunk
//! by its kind-specific pad. Any overlap ends the run.

use glam::Vec2;

/// An axis-aligned box in screen space (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    /// Box from its center and size
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inset every edge by `pad`. A negative pad grows the box.
    pub fn shrink(self, pad: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(pad),
            max: self.max - Vec2::splat(pad),
        }
    }

    /// Strict overlap test; boxes that merely touch do not overlap.
    /// A box shrunk past its own extent can never overlap anything.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aabb(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_min_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn overlapping_boxes_overlap() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_boxes_do_not_overlap_until_padded() {
        // Zero gap: b starts exactly where a ends
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));

        // Growing both by a positive pad closes the gap
        assert!(a.shrink(-1.0).overlaps(&b.shrink(-1.0)));
    }

    #[test]
    fn separated_boxes_never_overlap() {
        // Separation beyond combined half-extents on x
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(25.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn overlap_is_reflexive_for_positive_boxes() {
        let a = aabb(3.0, 4.0, 5.0, 6.0);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn over_shrunk_box_hits_nothing() {
        let a = aabb(0.0, 0.0, 10.0, 10.0).shrink(6.0);
        let b = aabb(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = aabb(ax, ay, aw, ah);
            let b = aabb(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn far_apart_boxes_miss(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
            gap in 0.001f32..50.0,
        ) {
            let a = aabb(ax, ay, aw, ah);
            // Place b past a's right edge by `gap`
            let b = aabb(ax + aw + gap, ay, bw, bh);
            prop_assert!(!a.overlaps(&b));
        }
    }
}
