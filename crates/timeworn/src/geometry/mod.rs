//! Host-facing geometry: path commands, anchor contours and bounding boxes.
//!
//! A [`PathShape`] is the input contract with the host: one or more closed contours made
//! of anchors with incoming/outgoing Bézier handles. [`PathCommand`] is the flat
//! move/line/cubic/close form used both to build shapes and to describe produced outlines.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::Vec2;

pub mod bezier;
pub mod boundary;

/// Axis-aligned box given by its minimum corner and size.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner (left/top in document coordinates).
    pub min: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl BoundingBox {
    /// Create a box from its minimum corner and size.
    pub fn from_min_size(min: impl Into<Vec2>, size: impl Into<Vec2>) -> Self {
        Self {
            min: min.into(),
            size: size.into(),
        }
    }

    /// Smallest box containing all `points`, or `None` when there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (lo, hi) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self {
            min: lo,
            size: hi - lo,
        })
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// True if `p` lies inside the closed box.
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }

    /// Clamp `p` component-wise into the closed box.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        let max = self.max();
        Vec2::new(
            p.x.max(self.min.x).min(max.x),
            p.y.max(self.min.y).min(max.y),
        )
    }

    /// All four values are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.size.is_finite()
    }

    /// The box cannot hold any area: non-finite, or zero/negative width or height.
    pub fn is_degenerate(&self) -> bool {
        !self.is_finite() || self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

/// One drawing command of a vector path.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Cubic segment: first control point, second control point, end point.
    CubicTo(Vec2, Vec2, Vec2),
    Close,
}

/// A path vertex with its two Bézier handles.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Control point of the segment arriving at this anchor.
    pub handle_in: Vec2,
    /// The on-curve point.
    pub point: Vec2,
    /// Control point of the segment leaving this anchor.
    pub handle_out: Vec2,
}

impl Anchor {
    pub fn new(handle_in: impl Into<Vec2>, point: impl Into<Vec2>, handle_out: impl Into<Vec2>) -> Self {
        Self {
            handle_in: handle_in.into(),
            point: point.into(),
            handle_out: handle_out.into(),
        }
    }

    /// A sharp corner: both handles sit on the point, so adjacent segments are straight.
    pub fn corner(point: impl Into<Vec2>) -> Self {
        let point = point.into();
        Self {
            handle_in: point,
            point,
            handle_out: point,
        }
    }
}

/// One closed boundary loop. The last anchor implicitly connects back to the first.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    pub anchors: Vec<Anchor>,
}

impl Contour {
    pub fn new(anchors: Vec<Anchor>) -> Self {
        Self { anchors }
    }

    /// Closed polygon through `points` with straight edges.
    pub fn polygon<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec2>,
    {
        Self {
            anchors: points.into_iter().map(Anchor::corner).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Cubic segments of the contour, including the closing one, as `[p0, p1, p2, p3]`.
    ///
    /// Contours with fewer than two anchors have no segments.
    pub fn segments(&self) -> impl Iterator<Item = [Vec2; 4]> + '_ {
        let n = if self.anchors.len() < 2 {
            0
        } else {
            self.anchors.len()
        };
        (0..n).map(move |i| {
            let current = &self.anchors[i];
            let next = &self.anchors[(i + 1) % n];
            [current.point, current.handle_out, next.handle_in, next.point]
        })
    }
}

/// A shape made of one or more closed contours, filled with the even-odd rule.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathShape {
    pub contours: Vec<Contour>,
}

impl PathShape {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    /// Shape with a single contour.
    pub fn from_contour(contour: Contour) -> Self {
        Self {
            contours: vec![contour],
        }
    }

    /// Axis-aligned rectangle with the given minimum corner and size.
    pub fn rectangle(min: impl Into<Vec2>, size: impl Into<Vec2>) -> Self {
        let min = min.into();
        let max = min + size.into();
        Self::from_contour(Contour::polygon([
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ]))
    }

    /// Build anchor contours from a flat command list.
    ///
    /// `MoveTo` starts a new contour and `Close` ends the current one. A segment that
    /// follows `Close` without a `MoveTo` starts from the closed subpath's start point;
    /// one that arrives before any `MoveTo` starts a contour at its end point. When the last
    /// anchor of a contour coincides with the first, the two are merged so the closing
    /// segment carries that curve.
    pub fn from_commands(commands: &[PathCommand]) -> Self {
        let mut contours = Vec::new();
        let mut current: Vec<Anchor> = Vec::new();
        let mut subpath_start: Option<Vec2> = None;

        for command in commands {
            if current.is_empty()
                && matches!(command, PathCommand::LineTo(_) | PathCommand::CubicTo(..))
            {
                if let Some(start) = subpath_start {
                    current.push(Anchor::corner(start));
                }
            }
            match *command {
                PathCommand::MoveTo(p) => {
                    finish_contour(&mut current, &mut contours);
                    subpath_start = Some(p);
                    current.push(Anchor::corner(p));
                }
                PathCommand::LineTo(p) => {
                    current.push(Anchor::corner(p));
                }
                PathCommand::CubicTo(c1, c2, p) => match current.last_mut() {
                    Some(last) => {
                        last.handle_out = c1;
                        current.push(Anchor::new(c2, p, p));
                    }
                    None => current.push(Anchor::corner(p)),
                },
                PathCommand::Close => finish_contour(&mut current, &mut contours),
            }
        }
        finish_contour(&mut current, &mut contours);

        Self { contours }
    }

    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(|c| c.len() < 2)
    }

    /// Bounding box of the flattened boundary, or `None` if the shape has no edges.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        boundary::BoundaryPolygon::from_shape(self, bezier::DEFAULT_FLATTEN_SEGMENTS)
            .bounding_box()
    }
}

fn finish_contour(current: &mut Vec<Anchor>, contours: &mut Vec<Contour>) {
    if current.is_empty() {
        return;
    }
    let mut anchors = std::mem::take(current);
    if anchors.len() >= 2 && anchors[anchors.len() - 1].point == anchors[0].point {
        if let Some(last) = anchors.pop() {
            anchors[0].handle_in = last.handle_in;
        }
    }
    contours.push(Contour::new(anchors));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_from_points_spans_extremes() {
        let bb = BoundingBox::from_points([
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 3.0),
            Vec2::new(4.0, -1.0),
        ])
        .expect("non-empty");
        assert_eq!(bb.min, Vec2::new(-2.0, -1.0));
        assert_eq!(bb.max(), Vec2::new(4.0, 5.0));
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn clamp_keeps_points_inside() {
        let bb = BoundingBox::from_min_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0));
        assert_eq!(bb.clamp(Vec2::new(-3.0, 7.0)), Vec2::new(0.0, 5.0));
        assert_eq!(bb.clamp(Vec2::new(4.0, 2.0)), Vec2::new(4.0, 2.0));
        assert!(bb.contains(Vec2::new(10.0, 5.0)));
        assert!(!bb.contains(Vec2::new(10.1, 5.0)));
    }

    #[test]
    fn degenerate_boxes_are_detected() {
        let flat = BoundingBox::from_min_size(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let nan = BoundingBox::from_min_size(Vec2::ZERO, Vec2::new(f32::NAN, 1.0));
        let ok = BoundingBox::from_min_size(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert!(flat.is_degenerate());
        assert!(nan.is_degenerate());
        assert!(!ok.is_degenerate());
    }

    #[test]
    fn mint_vectors_convert_into_anchors() {
        let p = mint::Vector2 { x: 2.0_f32, y: 3.0 };
        let a = Anchor::corner(p);
        assert_eq!(a.point, Vec2::new(2.0, 3.0));
        assert_eq!(a.handle_in, a.point);
    }

    #[test]
    fn contour_segments_include_closing_segment() {
        let c = Contour::polygon([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)].map(Vec2::from));
        let segs: Vec<_> = c.segments().collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2][0], Vec2::new(1.0, 1.0));
        assert_eq!(segs[2][3], Vec2::new(0.0, 0.0));
    }

    #[test]
    fn single_anchor_contour_has_no_segments() {
        let c = Contour::polygon([Vec2::new(3.0, 3.0)]);
        assert_eq!(c.segments().count(), 0);
    }

    #[test]
    fn from_commands_splits_contours_and_folds_closing_anchor() {
        let commands = [
            PathCommand::MoveTo(Vec2::new(0.0, 0.0)),
            PathCommand::LineTo(Vec2::new(4.0, 0.0)),
            PathCommand::CubicTo(Vec2::new(5.0, 1.0), Vec2::new(5.0, 3.0), Vec2::new(4.0, 4.0)),
            PathCommand::CubicTo(Vec2::new(2.0, 5.0), Vec2::new(-1.0, 2.0), Vec2::new(0.0, 0.0)),
            PathCommand::Close,
            PathCommand::MoveTo(Vec2::new(1.0, 1.0)),
            PathCommand::LineTo(Vec2::new(2.0, 1.0)),
            PathCommand::LineTo(Vec2::new(2.0, 2.0)),
            PathCommand::Close,
        ];
        let shape = PathShape::from_commands(&commands);
        assert_eq!(shape.contours.len(), 2);

        let outer = &shape.contours[0];
        assert_eq!(outer.len(), 3);
        assert_eq!(outer.anchors[0].handle_in, Vec2::new(-1.0, 2.0));
        assert_eq!(outer.anchors[1].handle_out, Vec2::new(5.0, 1.0));
        assert_eq!(outer.anchors[2].handle_in, Vec2::new(5.0, 3.0));
        assert_eq!(outer.anchors[2].handle_out, Vec2::new(2.0, 5.0));

        assert_eq!(shape.contours[1].len(), 3);
    }

    #[test]
    fn segment_after_close_restarts_at_subpath_start() {
        let commands = [
            PathCommand::MoveTo(Vec2::new(0.0, 0.0)),
            PathCommand::LineTo(Vec2::new(4.0, 0.0)),
            PathCommand::LineTo(Vec2::new(4.0, 4.0)),
            PathCommand::Close,
            PathCommand::LineTo(Vec2::new(-4.0, 0.0)),
            PathCommand::CubicTo(Vec2::new(-5.0, -2.0), Vec2::new(-2.0, -5.0), Vec2::new(0.0, -4.0)),
            PathCommand::Close,
            PathCommand::Close,
        ];
        let shape = PathShape::from_commands(&commands);
        assert_eq!(shape.contours.len(), 2);

        let second = &shape.contours[1];
        assert_eq!(second.len(), 3);
        assert_eq!(second.anchors[0].point, Vec2::new(0.0, 0.0));
        assert_eq!(second.anchors[1].point, Vec2::new(-4.0, 0.0));
        assert_eq!(second.anchors[1].handle_out, Vec2::new(-5.0, -2.0));
        assert_eq!(second.anchors[2].point, Vec2::new(0.0, -4.0));
    }

    #[test]
    fn segment_before_any_move_starts_at_its_end_point() {
        let commands = [
            PathCommand::LineTo(Vec2::new(1.0, 0.0)),
            PathCommand::LineTo(Vec2::new(1.0, 1.0)),
            PathCommand::LineTo(Vec2::new(0.0, 1.0)),
            PathCommand::Close,
        ];
        let shape = PathShape::from_commands(&commands);
        assert_eq!(shape.contours.len(), 1);
        assert_eq!(shape.contours[0].anchors[0].point, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn rectangle_bounding_box_matches_input() {
        let shape = PathShape::rectangle(Vec2::new(2.0, 3.0), Vec2::new(10.0, 20.0));
        let bb = shape.bounding_box().expect("rectangle has edges");
        assert_eq!(bb.min, Vec2::new(2.0, 3.0));
        assert_eq!(bb.size, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn empty_shape_has_no_bounding_box() {
        assert!(PathShape::default().bounding_box().is_none());
        assert!(PathShape::default().is_empty());
    }
}
