//! Polygonal boundary approximation and even-odd point membership.
use glam::Vec2;

use crate::geometry::bezier::flatten_cubic;
use crate::geometry::{BoundingBox, PathShape};

/// Anything that can answer "is this point inside the shape?".
///
/// [`BoundaryPolygon`] is the standard implementation. Closures `Fn(Vec2) -> bool` also
/// implement it, which is handy for analytic masks.
pub trait ShapeMask {
    fn contains(&self, p: Vec2) -> bool;
}

impl<F> ShapeMask for F
where
    F: Fn(Vec2) -> bool,
{
    #[inline]
    fn contains(&self, p: Vec2) -> bool {
        self(p)
    }
}

/// A straight boundary edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Does a ray from `p` towards +x cross this edge?
    ///
    /// Horizontal edges never count. The y-span test is half-open
    /// (`min < y <= max`) so a vertex shared by two edges is counted once.
    #[inline]
    pub fn crosses_ray(&self, p: Vec2) -> bool {
        let (a, b) = (self.start, self.end);
        if a.y == b.y {
            return false;
        }
        if !(a.y.min(b.y) < p.y && p.y <= a.y.max(b.y)) {
            return false;
        }
        let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
        x > p.x
    }
}

/// Flattened, closed, possibly multi-contour approximation of a [`PathShape`].
///
/// Built once per run and immutable afterwards.
#[derive(Clone, Debug, Default)]
pub struct BoundaryPolygon {
    edges: Vec<Edge>,
    contour_count: usize,
}

impl BoundaryPolygon {
    /// Flatten every segment of every contour (closing segments included) into edges,
    /// splitting each cubic into `segments` pieces.
    pub fn from_shape(shape: &PathShape, segments: usize) -> Self {
        let mut edges = Vec::new();
        let mut contour_count = 0;

        for contour in &shape.contours {
            let before = edges.len();
            for [p0, p1, p2, p3] in contour.segments() {
                let points = flatten_cubic(p0, p1, p2, p3, segments);
                edges.extend(points.windows(2).map(|w| Edge::new(w[0], w[1])));
            }
            if edges.len() > before {
                contour_count += 1;
            }
        }

        Self {
            edges,
            contour_count,
        }
    }

    /// Closed polygon from plain vertices.
    pub fn from_points(points: &[Vec2]) -> Self {
        if points.len() < 2 {
            return Self::default();
        }
        let n = points.len();
        let edges = (0..n)
            .map(|i| Edge::new(points[i], points[(i + 1) % n]))
            .collect();
        Self {
            edges,
            contour_count: 1,
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of contours that produced at least one edge.
    pub fn contour_count(&self) -> usize {
        self.contour_count
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Bounding box of all edge endpoints.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.edges.iter().flat_map(|e| [e.start, e.end]))
    }

    /// Number of edges crossed by the ray from `p` towards +x.
    pub fn crossing_count(&self, p: Vec2) -> usize {
        self.edges.iter().filter(|e| e.crosses_ray(p)).count()
    }
}

impl ShapeMask for BoundaryPolygon {
    /// Even-odd rule: inside iff the rightward ray crosses an odd number of edges.
    #[inline]
    fn contains(&self, p: Vec2) -> bool {
        self.crossing_count(p) % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::bezier::DEFAULT_FLATTEN_SEGMENTS;
    use crate::geometry::{Anchor, Contour};

    fn square(min: f32, max: f32) -> Contour {
        Contour::polygon([
            Vec2::new(min, min),
            Vec2::new(max, min),
            Vec2::new(max, max),
            Vec2::new(min, max),
        ])
    }

    fn unit_square_boundary() -> BoundaryPolygon {
        BoundaryPolygon::from_shape(
            &PathShape::from_contour(square(0.0, 10.0)),
            DEFAULT_FLATTEN_SEGMENTS,
        )
    }

    #[test]
    fn rectangle_interior_and_exterior() {
        let b = unit_square_boundary();
        assert!(b.contains(Vec2::new(5.0, 5.0)));
        assert!(!b.contains(Vec2::new(15.0, 5.0)));
        assert!(!b.contains(Vec2::new(-1.0, 5.0)));
        assert!(!b.contains(Vec2::new(5.0, 11.0)));
    }

    #[test]
    fn horizontal_edges_never_cross() {
        let horizontal = Edge::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!horizontal.crosses_ray(Vec2::new(-5.0, 10.0)));

        // On the top edge only the right side counts, the top edge itself does not.
        let b = unit_square_boundary();
        assert_eq!(b.crossing_count(Vec2::new(5.0, 10.0)), 1);
        // On the bottom edge nothing is crossed because of the half-open span.
        assert_eq!(b.crossing_count(Vec2::new(5.0, 0.0)), 0);
    }

    #[test]
    fn shared_vertex_is_counted_once() {
        let diamond = BoundaryPolygon::from_points(&[
            Vec2::new(0.0, 5.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(5.0, 10.0),
        ]);
        // The ray from (2, 5) passes through the vertex (10, 5).
        assert_eq!(diamond.crossing_count(Vec2::new(2.0, 5.0)), 1);
        assert!(diamond.contains(Vec2::new(2.0, 5.0)));
    }

    #[test]
    fn hole_is_outside_under_even_odd() {
        let shape = PathShape::new(vec![square(0.0, 10.0), square(3.0, 7.0)]);
        let b = BoundaryPolygon::from_shape(&shape, DEFAULT_FLATTEN_SEGMENTS);
        assert_eq!(b.contour_count(), 2);
        assert!(b.contains(Vec2::new(1.5, 5.0)));
        assert!(!b.contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn edges_are_flattened_per_segment() {
        let b = unit_square_boundary();
        assert_eq!(b.edge_count(), 4 * DEFAULT_FLATTEN_SEGMENTS);
        assert_eq!(b.contour_count(), 1);
    }

    #[test]
    fn single_anchor_contour_contributes_nothing() {
        let shape = PathShape::new(vec![Contour::new(vec![Anchor::corner(Vec2::ONE)])]);
        let b = BoundaryPolygon::from_shape(&shape, DEFAULT_FLATTEN_SEGMENTS);
        assert!(b.is_empty());
        assert_eq!(b.contour_count(), 0);
        assert!(b.bounding_box().is_none());
        assert!(!b.contains(Vec2::ONE));
    }

    #[test]
    fn curved_contour_approximates_circle() {
        // Four-arc circle of radius 10 around the origin.
        let k = 10.0 * 0.552_284_8;
        let contour = Contour::new(vec![
            Anchor::new(Vec2::new(k, -10.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, k)),
            Anchor::new(Vec2::new(k, 10.0), Vec2::new(0.0, 10.0), Vec2::new(-k, 10.0)),
            Anchor::new(Vec2::new(-10.0, k), Vec2::new(-10.0, 0.0), Vec2::new(-10.0, -k)),
            Anchor::new(Vec2::new(-k, -10.0), Vec2::new(0.0, -10.0), Vec2::new(k, -10.0)),
        ]);
        let b = BoundaryPolygon::from_shape(&PathShape::from_contour(contour), 8);
        assert!(b.contains(Vec2::ZERO));
        assert!(b.contains(Vec2::new(6.5, 6.5)));
        assert!(!b.contains(Vec2::new(7.5, 7.5)));
        assert!(!b.contains(Vec2::new(10.5, 0.5)));
    }

    #[test]
    fn closures_act_as_masks() {
        let disk = |p: Vec2| p.length() < 1.0;
        assert!(disk.contains(Vec2::new(0.5, 0.0)));
        assert!(!disk.contains(Vec2::new(1.5, 0.0)));
    }
}
