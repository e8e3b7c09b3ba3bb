//! Freehand strokes.

use super::OverlayId;
use crate::color::SerializableColor;
use kurbo::{BezPath, Point, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fewest points a committed stroke may have.
pub const MIN_POINTS: usize = 2;

pub const DEFAULT_BRUSH_WIDTH: f64 = 4.0;

pub const BRUSH_WIDTHS: [f64; 7] = [2.0, 4.0, 6.0, 8.0, 12.0, 16.0, 24.0];

pub const BRUSH_COLORS: [SerializableColor; 12] = [
    SerializableColor::rgb(0xFF, 0xFF, 0xFF),
    SerializableColor::rgb(0x00, 0x00, 0x00),
    SerializableColor::rgb(0xFF, 0x47, 0x57),
    SerializableColor::rgb(0xFF, 0x63, 0x48),
    SerializableColor::rgb(0xFF, 0xA5, 0x02),
    SerializableColor::rgb(0xFF, 0xEA, 0xA7),
    SerializableColor::rgb(0x2E, 0xD5, 0x73),
    SerializableColor::rgb(0x00, 0xD4, 0xAA),
    SerializableColor::rgb(0x1E, 0x90, 0xFF),
    SerializableColor::rgb(0x53, 0x52, 0xED),
    SerializableColor::rgb(0xA2, 0x9B, 0xFE),
    SerializableColor::rgb(0xFD, 0x79, 0xA8),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawPathError {
    #[error("a stroke needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("stroke width must be positive and finite, got {0}")]
    InvalidWidth(f64),
}

/// A committed freehand stroke. Points are normalized to the canvas.
///
/// Strokes are immutable once built; construction rejects anything with
/// fewer than two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDrawPath")]
pub struct DrawPath {
    id: OverlayId,
    points: Vec<Point>,
    color: SerializableColor,
    width: f64,
}

impl DrawPath {
    pub fn new(
        points: Vec<Point>,
        color: SerializableColor,
        width: f64,
    ) -> Result<Self, DrawPathError> {
        Self::with_id(Uuid::new_v4(), points, color, width)
    }

    pub fn with_id(
        id: OverlayId,
        points: Vec<Point>,
        color: SerializableColor,
        width: f64,
    ) -> Result<Self, DrawPathError> {
        if points.len() < MIN_POINTS {
            return Err(DrawPathError::TooFewPoints(points.len()));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(DrawPathError::InvalidWidth(width));
        }
        Ok(Self {
            id,
            points,
            color,
            width,
        })
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// The stroke as a polyline in a canvas of the given size.
    pub fn to_canvas_path(&self, canvas: Size) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self
            .points
            .iter()
            .map(|p| Point::new(p.x * canvas.width, p.y * canvas.height));
        if let Some(first) = points.next() {
            path.move_to(first);
            for point in points {
                path.line_to(point);
            }
        }
        path
    }
}

#[derive(Deserialize)]
struct RawDrawPath {
    id: OverlayId,
    points: Vec<Point>,
    color: SerializableColor,
    width: f64,
}

impl TryFrom<RawDrawPath> for DrawPath {
    type Error = DrawPathError;

    fn try_from(raw: RawDrawPath) -> Result<Self, Self::Error> {
        DrawPath::with_id(raw.id, raw.points, raw.color, raw.width)
    }
}

/// An in-progress stroke, fed point by point while the finger is down.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeBuilder {
    points: Vec<Point>,
    color: SerializableColor,
    width: f64,
}

impl StrokeBuilder {
    pub fn new(color: SerializableColor, width: f64) -> Self {
        Self {
            points: Vec::new(),
            color,
            width,
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop points that deviate less than `tolerance` from the stroke's shape.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.points.len() < 3 {
            return;
        }
        self.points = rdp_simplify(&self.points, tolerance);
    }

    /// Turn the stroke into a committed path. A tap (one point) yields an error
    /// and must not reach the state.
    pub fn finish(self) -> Result<DrawPath, DrawPathError> {
        DrawPath::new(self.points, self.color, self.width)
    }
}

/// Ramer-Douglas-Peucker line simplification.
fn rdp_simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, point) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = rdp_simplify(&points[..=max_index], tolerance);
        let right = rdp_simplify(&points[max_index..], tolerance);
        // Junction point appears in both halves.
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let d = line_end - line_start;
    let len_sq = d.hypot2();
    if len_sq < f64::EPSILON {
        return point.distance(line_start);
    }
    let v = point - line_start;
    (v.x * d.y - v.y * d.x).abs() / len_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> SerializableColor {
        SerializableColor::white()
    }

    #[test]
    fn test_rejects_single_point() {
        let err = DrawPath::new(vec![Point::new(0.1, 0.1)], white(), 4.0).unwrap_err();
        assert_eq!(err, DrawPathError::TooFewPoints(1));
        assert!(DrawPath::new(vec![], white(), 4.0).is_err());
    }

    #[test]
    fn test_rejects_bad_width() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(matches!(
            DrawPath::new(points.clone(), white(), 0.0),
            Err(DrawPathError::InvalidWidth(_))
        ));
        assert!(DrawPath::new(points, white(), f64::NAN).is_err());
    }

    #[test]
    fn test_stroke_builder() {
        let mut stroke = StrokeBuilder::new(BRUSH_COLORS[2], DEFAULT_BRUSH_WIDTH);
        stroke.push(Point::new(0.2, 0.2));
        assert_eq!(stroke.clone().finish(), Err(DrawPathError::TooFewPoints(1)));

        stroke.push(Point::new(0.4, 0.3));
        let path = stroke.finish().unwrap();
        assert_eq!(path.points().len(), 2);
        assert_eq!(path.color(), BRUSH_COLORS[2]);
        assert_eq!(path.width(), 4.0);
    }

    #[test]
    fn test_simplify_collinear() {
        let mut stroke = StrokeBuilder::new(white(), 2.0);
        for i in 0..=10 {
            stroke.push(Point::new(f64::from(i) * 0.1, 0.5));
        }
        stroke.simplify(0.001);
        assert_eq!(stroke.points(), &[Point::new(0.0, 0.5), Point::new(1.0, 0.5)]);
    }

    #[test]
    fn test_simplify_keeps_corner() {
        let mut stroke = StrokeBuilder::new(white(), 2.0);
        stroke.push(Point::new(0.0, 0.0));
        stroke.push(Point::new(0.25, 0.25));
        stroke.push(Point::new(0.5, 0.5));
        stroke.push(Point::new(0.75, 0.25));
        stroke.push(Point::new(1.0, 0.0));
        stroke.simplify(0.01);
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.points()[1], Point::new(0.5, 0.5));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"id":"6f1c2d1e-2b9a-4c59-8f43-0d5b3b0b3c11","points":[{"x":0.5,"y":0.5}],"color":{"r":0,"g":0,"b":0,"a":255},"width":4.0}"#;
        assert!(serde_json::from_str::<DrawPath>(json).is_err());

        let ok = json.replace(r#"[{"x":0.5,"y":0.5}]"#, r#"[{"x":0.5,"y":0.5},{"x":0.6,"y":0.6}]"#);
        let path: DrawPath = serde_json::from_str(&ok).unwrap();
        assert_eq!(path.points().len(), 2);
    }

    #[test]
    fn test_canvas_path() {
        let path = DrawPath::new(
            vec![Point::new(0.0, 0.0), Point::new(0.5, 1.0)],
            white(),
            2.0,
        )
        .unwrap();
        let bez = path.to_canvas_path(Size::new(200.0, 100.0));
        let bbox = kurbo::Shape::bounding_box(&bez);
        assert_eq!(bbox.x1, 100.0);
        assert_eq!(bbox.y1, 100.0);
    }
}
