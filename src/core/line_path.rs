use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::primitives::finite_or;
use crate::core::scale::to_pixel;
use crate::core::{DataPoint, Point, ValueRange};

/// Sample count used to approximate the arc length of one quadratic segment.
const QUAD_LENGTH_SAMPLES: usize = 24;

const SOLVE_EPSILON: f64 = 1e-12;

/// How consecutive data points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Straight segments between points.
    Linear,
    /// Two quadratic curves per pair, meeting at the pair's midpoint.
    #[default]
    Smoothed,
}

/// One drawing step of a [`LinePath`], in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    Close,
}

impl PathSegment {
    fn end(self) -> Option<Point> {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => Some(point),
            Self::QuadTo { to, .. } => Some(to),
            Self::Close => None,
        }
    }
}

/// Renderer-agnostic path through projected data points.
///
/// The leading `outline` segments follow the data. A closed path appends two
/// baseline lines and `Close` after the outline; those never take part in
/// [`LinePath::point_at`] or [`LinePath::trimmed`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinePath {
    segments: Vec<PathSegment>,
    outline_len: usize,
}

impl LinePath {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Segments tracing the data, without the closing baseline.
    #[must_use]
    pub fn outline(&self) -> &[PathSegment] {
        &self.segments[..self.outline_len]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Close))
    }

    /// Arc length of the outline.
    #[must_use]
    pub fn length(&self) -> f64 {
        let mut current = match self.start() {
            Some(point) => point,
            None => return 0.0,
        };
        let mut total = 0.0;
        for segment in &self.outline()[1..] {
            total += segment_length(current, *segment);
            if let Some(end) = segment.end() {
                current = end;
            }
        }
        total
    }

    /// Y pixel of the outline at `x`.
    ///
    /// Positions left or right of the outline clamp to its first or last point.
    /// Returns `None` for an empty path or a non-finite `x`.
    #[must_use]
    pub fn point_at(&self, x: f64) -> Option<f64> {
        let first = self.start()?;
        if !x.is_finite() {
            return None;
        }
        if x <= first.x {
            return Some(first.y);
        }

        let mut current = first;
        for segment in &self.outline()[1..] {
            match *segment {
                PathSegment::LineTo(end) => {
                    if brackets(current.x, end.x, x) {
                        return Some(line_y_at(current, end, x));
                    }
                    current = end;
                }
                PathSegment::QuadTo { control, to } => {
                    if brackets(current.x, to.x, x) {
                        return Some(quad_y_at(current, control, to, x));
                    }
                    current = to;
                }
                PathSegment::MoveTo(point) => current = point,
                PathSegment::Close => {}
            }
        }
        Some(current.y)
    }

    /// Leading `progress` share of the outline by arc length.
    ///
    /// `progress` is clamped to `[0, 1]`. At `1` the full path (including any
    /// closing baseline) is returned; below that only the open outline prefix.
    #[must_use]
    pub fn trimmed(&self, progress: f64) -> Self {
        let progress = finite_or(progress, 1.0).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return self.clone();
        }
        let Some(first) = self.start() else {
            return Self::empty();
        };

        let target = self.length() * progress;
        let mut segments = vec![PathSegment::MoveTo(first)];
        let mut walked = 0.0;
        let mut current = first;
        for segment in &self.outline()[1..] {
            let length = segment_length(current, *segment);
            if walked + length <= target {
                segments.push(*segment);
                walked += length;
                if let Some(end) = segment.end() {
                    current = end;
                }
                continue;
            }

            let remaining = target - walked;
            if remaining <= 0.0 {
                break;
            }
            match *segment {
                PathSegment::LineTo(end) if length > 0.0 => {
                    segments.push(PathSegment::LineTo(current.lerp(end, remaining / length)));
                }
                PathSegment::QuadTo { control, to } => {
                    let t = quad_t_at_length(current, control, to, remaining);
                    let (control, to) = split_quad(current, control, to, t);
                    segments.push(PathSegment::QuadTo { control, to });
                }
                _ => {}
            }
            break;
        }

        let outline_len = segments.len();
        Self {
            segments,
            outline_len,
        }
    }

    fn start(&self) -> Option<Point> {
        match self.outline().first() {
            Some(PathSegment::MoveTo(point)) => Some(*point),
            _ => None,
        }
    }
}

/// Projects data points into pixel space with a top-left origin.
#[must_use]
pub fn project_points(
    points: &[DataPoint],
    scale_x: ValueRange,
    scale_y: ValueRange,
    width: f64,
    height: f64,
) -> Vec<Point> {
    let width = sanitize_length(width);
    let height = sanitize_length(height);
    points
        .iter()
        .map(|point| {
            Point::new(
                to_pixel(point.x, scale_x, width),
                height - to_pixel(point.y, scale_y, height),
            )
        })
        .collect()
}

/// Builds the path through `points`.
///
/// Fewer than two points yield an empty path. With `close_shape` the outline is
/// closed along the bottom edge, `(width, height)` then `(0, height)`.
#[must_use]
pub fn build_line_path(
    points: &[DataPoint],
    scale_x: ValueRange,
    scale_y: ValueRange,
    width: f64,
    height: f64,
    interpolation: Interpolation,
    close_shape: bool,
) -> LinePath {
    if points.len() < 2 {
        return LinePath::empty();
    }

    let projected = project_points(points, scale_x, scale_y, width, height);
    let per_pair = match interpolation {
        Interpolation::Linear => 1,
        Interpolation::Smoothed => 2,
    };
    let mut segments = Vec::with_capacity(1 + (projected.len() - 1) * per_pair + 3);
    segments.push(PathSegment::MoveTo(projected[0]));
    for pair in projected.windows(2) {
        segments.extend(connect(pair[0], pair[1], interpolation));
    }

    let outline_len = segments.len();
    if close_shape {
        let width = sanitize_length(width);
        let height = sanitize_length(height);
        segments.push(PathSegment::LineTo(Point::new(width, height)));
        segments.push(PathSegment::LineTo(Point::new(0.0, height)));
        segments.push(PathSegment::Close);
    }

    LinePath {
        segments,
        outline_len,
    }
}

fn connect(p0: Point, p1: Point, interpolation: Interpolation) -> SmallVec<[PathSegment; 2]> {
    match interpolation {
        Interpolation::Linear => smallvec![PathSegment::LineTo(p1)],
        Interpolation::Smoothed => {
            let mid = p0.midpoint(p1);
            smallvec![
                PathSegment::QuadTo {
                    control: control_point(mid, p0),
                    to: mid,
                },
                PathSegment::QuadTo {
                    control: control_point(mid, p1),
                    to: p1,
                },
            ]
        }
    }
}

/// Control point `(b.x, a.y)`: the curve leaves the midpoint horizontally.
fn control_point(a: Point, b: Point) -> Point {
    Point::new(b.x, a.y)
}

fn sanitize_length(length: f64) -> f64 {
    finite_or(length, 0.0).max(0.0)
}

fn brackets(a: f64, b: f64, x: f64) -> bool {
    x >= a.min(b) && x <= a.max(b)
}

fn line_y_at(start: Point, end: Point, x: f64) -> f64 {
    if x == end.x {
        return end.y;
    }
    if x == start.x {
        return start.y;
    }
    let dx = end.x - start.x;
    if dx.abs() < SOLVE_EPSILON {
        return end.y;
    }
    start.y + (end.y - start.y) * (x - start.x) / dx
}

fn quad_y_at(start: Point, control: Point, end: Point, x: f64) -> f64 {
    if x == end.x {
        return end.y;
    }
    if x == start.x {
        return start.y;
    }
    let t = solve_quad_t(start.x, control.x, end.x, x);
    quad_point(start, control, end, t).y
}

/// Parameter `t` in `[0, 1]` where the quadratic's x coordinate equals `x`.
fn solve_quad_t(x0: f64, cx: f64, x1: f64, x: f64) -> f64 {
    let a = x0 - 2.0 * cx + x1;
    let b = 2.0 * (cx - x0);
    let c = x0 - x;

    let t = if a.abs() < SOLVE_EPSILON {
        if b.abs() < SOLVE_EPSILON { 0.0 } else { -c / b }
    } else {
        let root = (b * b - 4.0 * a * c).max(0.0).sqrt();
        let t1 = (-b + root) / (2.0 * a);
        let t2 = (-b - root) / (2.0 * a);
        let in_unit = |t: f64| (-1e-9..=1.0 + 1e-9).contains(&t);
        if in_unit(t1) || !in_unit(t2) { t1 } else { t2 }
    };
    finite_or(t, 0.0).clamp(0.0, 1.0)
}

fn quad_point(start: Point, control: Point, end: Point, t: f64) -> Point {
    start.lerp(control, t).lerp(control.lerp(end, t), t)
}

fn split_quad(start: Point, control: Point, end: Point, t: f64) -> (Point, Point) {
    (start.lerp(control, t), quad_point(start, control, end, t))
}

fn segment_length(start: Point, segment: PathSegment) -> f64 {
    match segment {
        PathSegment::LineTo(end) => start.distance(end),
        PathSegment::QuadTo { control, to } => {
            let mut total = 0.0;
            let mut previous = start;
            for step in 1..=QUAD_LENGTH_SAMPLES {
                let point = quad_point(start, control, to, step as f64 / QUAD_LENGTH_SAMPLES as f64);
                total += previous.distance(point);
                previous = point;
            }
            total
        }
        PathSegment::MoveTo(_) | PathSegment::Close => 0.0,
    }
}

fn quad_t_at_length(start: Point, control: Point, end: Point, length: f64) -> f64 {
    let mut walked = 0.0;
    let mut previous = start;
    for step in 1..=QUAD_LENGTH_SAMPLES {
        let point = quad_point(start, control, end, step as f64 / QUAD_LENGTH_SAMPLES as f64);
        let piece = previous.distance(point);
        if walked + piece >= length {
            let within = if piece > 0.0 { (length - walked) / piece } else { 0.0 };
            return ((step - 1) as f64 + within) / QUAD_LENGTH_SAMPLES as f64;
        }
        walked += piece;
        previous = point;
    }
    1.0
}
