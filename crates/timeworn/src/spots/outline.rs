//! Closed outlines produced for each spot.

use glam::Vec2;

use crate::geometry::bezier::flatten_cubic;
use crate::geometry::{BoundingBox, PathCommand};

/// A closed path: one `MoveTo`, then line or cubic segments, then `Close`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    commands: Vec<PathCommand>,
}

impl Outline {
    /// Build an outline from raw commands. Callers are responsible for closure.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Straight-edged closed outline through `points`.
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut commands = Vec::with_capacity(points.len() + 1);
        if let Some((first, rest)) = points.split_first() {
            commands.push(PathCommand::MoveTo(*first));
            commands.extend(rest.iter().map(|p| PathCommand::LineTo(*p)));
            commands.push(PathCommand::Close);
        }
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PathCommand> {
        self.commands
    }

    /// Starts with a move and ends with an explicit close.
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.first(), Some(PathCommand::MoveTo(_)))
            && matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// On-curve points in drawing order, without the repeated start point.
    pub fn vertices(&self) -> Vec<Vec2> {
        let mut out: Vec<Vec2> = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::CubicTo(_, _, p) => {
                    out.push(p)
                }
                PathCommand::Close => {}
            }
        }
        if out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        out
    }

    /// Polygon approximation, splitting every cubic into `segments` lines.
    pub fn flatten(&self, segments: usize) -> Vec<Vec2> {
        let mut out: Vec<Vec2> = Vec::new();
        let mut current = Vec2::ZERO;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    out.push(p);
                    current = p;
                }
                PathCommand::CubicTo(c1, c2, p) => {
                    out.extend(flatten_cubic(current, c1, c2, p, segments).into_iter().skip(1));
                    current = p;
                }
                PathCommand::Close => {}
            }
        }
        if out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        out
    }

    /// Bounding box of the on-curve points.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices())
    }

    /// SVG path data, e.g. `M 1,2 L 3,4 Z`.
    pub fn to_svg_path_data(&self) -> String {
        self.commands
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo(p) => format!("M {},{}", p.x, p.y),
                PathCommand::LineTo(p) => format!("L {},{}", p.x, p.y),
                PathCommand::CubicTo(c1, c2, p) => format!(
                    "C {},{} {},{} {},{}",
                    c1.x, c1.y, c2.x, c2.y, p.x, p.y
                ),
                PathCommand::Close => "Z".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
