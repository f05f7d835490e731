//! Edge resistance for live dragging
//!
//! Past an edge with a resistance coefficient `r`, the allowed excursion is
//! `extent * (1 - r^min(f, 1))` where `f` is the raw overflow fraction. Only
//! one edge per axis applies: the near edge is checked first.

use glam::Vec2;

use super::geometry::{Axis, Edge, Geometry, out_of_bounds};
use crate::config::EdgeConfigs;

/// Allowed excursion past an edge, in pixels
#[inline]
pub fn allowed_excursion(extent: f32, resistance: f32, fraction: f32) -> f32 {
    extent * (1.0 - resistance.powf(fraction.min(1.0)))
}

/// Apply edge resistance to a candidate drag position
pub fn resist(candidate: Vec2, geometry: &Geometry, edges: &EdgeConfigs) -> Vec2 {
    let oob = out_of_bounds(candidate, geometry);
    let x = resist_axis(
        candidate.x,
        Axis::X,
        (Edge::Left, oob.left),
        (Edge::Right, oob.right),
        geometry,
        edges,
    );
    let y = resist_axis(
        candidate.y,
        Axis::Y,
        (Edge::Top, oob.top),
        (Edge::Bottom, oob.bottom),
        geometry,
        edges,
    );
    Vec2::new(x, y)
}

fn resist_axis(
    coord: f32,
    axis: Axis,
    (near, near_oob): (Edge, f32),
    (far, far_oob): (Edge, f32),
    geometry: &Geometry,
    edges: &EdgeConfigs,
) -> f32 {
    let extent = geometry.box_extent(axis);

    if let Some(r) = active_resistance(edges, near).filter(|_| near_oob > 0.0) {
        // Coordinate may not go below -allowed
        return coord.max(-allowed_excursion(extent, r, near_oob));
    }

    if let Some(r) = active_resistance(edges, far).filter(|_| far_oob > 0.0) {
        // Pull back by the raw overflow, then forward by the allowed excursion
        let allowed = allowed_excursion(extent, r, far_oob);
        return coord.min(coord + allowed - far_oob * extent);
    }

    coord
}

/// Resistance coefficient for an edge; zero counts as disabled
#[inline]
fn active_resistance(edges: &EdgeConfigs, edge: Edge) -> Option<f32> {
    edges.get(edge).resistance.filter(|&r| r > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EdgeConfig;
    use proptest::prelude::*;

    fn geometry() -> Geometry {
        let mut g = Geometry::default();
        g.set_box_size(100.0, 100.0);
        g.set_container_size(300.0, 600.0);
        g
    }

    fn resisting(r: f32) -> EdgeConfigs {
        EdgeConfigs::uniform(EdgeConfig {
            resistance: Some(r),
            ..Default::default()
        })
    }

    #[test]
    fn test_inside_is_untouched() {
        let p = Vec2::new(42.0, 300.0);
        assert_eq!(resist(p, &geometry(), &resisting(0.8)), p);
    }

    #[test]
    fn test_left_resistance() {
        // 50px past left edge => f = 0.5, allowed = 100 * (1 - 0.8^0.5)
        let p = resist(Vec2::new(-50.0, 300.0), &geometry(), &resisting(0.8));
        let expected = -100.0 * (1.0 - 0.8f32.sqrt());
        assert!((p.x - expected).abs() < 1e-4, "x = {}", p.x);
        assert_eq!(p.y, 300.0);
    }

    #[test]
    fn test_bottom_resistance() {
        // 50px past bottom edge of a 600px container
        let p = resist(Vec2::new(100.0, 550.0), &geometry(), &resisting(0.8));
        let allowed = 100.0 * (1.0 - 0.8f32.sqrt());
        assert!((p.y - (500.0 + allowed)).abs() < 1e-3, "y = {}", p.y);
    }

    #[test]
    fn test_no_resistance_configured() {
        let edges = EdgeConfigs::default();
        let p = Vec2::new(-250.0, 900.0);
        assert_eq!(resist(p, &geometry(), &edges), p);
    }

    #[test]
    fn test_zero_coefficient_is_disabled() {
        let p = Vec2::new(-80.0, 10.0);
        assert_eq!(resist(p, &geometry(), &resisting(0.0)), p);
    }

    #[test]
    fn test_unmeasured_box_is_untouched() {
        let edges = resisting(0.8);
        let p = Vec2::new(-80.0, -80.0);
        assert_eq!(resist(p, &Geometry::default(), &edges), p);
    }

    proptest! {
        #[test]
        fn prop_excursion_bounded_by_box_extent(
            r in 0.01f32..0.99,
            raw in 0.0f32..1.0e5,
        ) {
            let g = geometry();
            let edges = resisting(r);
            let left = resist(Vec2::new(-raw, 300.0), &g, &edges);
            let right = resist(Vec2::new(200.0 + raw, 300.0), &g, &edges);

            // Never further out than the box's own extent
            prop_assert!(-left.x <= 100.0);
            prop_assert!(right.x - 200.0 <= 100.0 + 1e-3);
            // Saturates at extent * (1 - r) once a full box is past the edge
            prop_assert!(-left.x <= 100.0 * (1.0 - r) + 1e-3);
            // Never pushes the box back inside
            prop_assert!(left.x <= 0.0);
            prop_assert!(right.x >= 200.0 - 1e-3);
        }

        #[test]
        fn prop_saturated_excursion(r in 0.01f32..0.99, raw in 100.0f32..1.0e4) {
            let p = resist(Vec2::new(-raw, 300.0), &geometry(), &resisting(r));
            prop_assert!((-p.x - 100.0 * (1.0 - r)).abs() < 1e-3);
        }
    }
}
