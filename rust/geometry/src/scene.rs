// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Renderer-agnostic scene description
//!
//! A scene is an ordered list of typed primitives in drawing units (inches).
//! Each primitive carries a [`Role`] saying what it depicts and an optional
//! [`StyleHint`]; the renderer owns final appearance and paints in list order.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// 2D point in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_point(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<Point2<f64>> for Point2D {
    fn from(p: Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// What a primitive depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Stile,
    Rail,
    GlassStop,
    Glass,
    PanelOutline,
    Handle,
    Track,
    DirectionArrow,
    SwingArc,
    DoorLeaf,
    Hinge,
    Jamb,
    Clearance,
    Wall,
    WallExtension,
    Hatch,
    EndLine,
    PanelDivision,
    GlassLine,
    FixedMarker,
    Label,
    RoomLabel,
    Caption,
    Dimension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokePattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    #[default]
    None,
    /// Filled with the stroke color
    Solid,
    /// Light tint
    Tint,
    /// Knock-out fill in the background color
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrowheads {
    #[default]
    None,
    End,
    Both,
}

/// Default appearance; a renderer may override any of it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleHint {
    pub stroke: StrokePattern,
    pub weight: f64,
    pub fill: Fill,
    pub arrowheads: Arrowheads,
}

impl Default for StyleHint {
    fn default() -> Self {
        Self::solid(1.0)
    }
}

impl StyleHint {
    pub const fn solid(weight: f64) -> Self {
        Self {
            stroke: StrokePattern::Solid,
            weight,
            fill: Fill::None,
            arrowheads: Arrowheads::None,
        }
    }

    pub const fn dotted(weight: f64) -> Self {
        Self {
            stroke: StrokePattern::Dotted,
            weight,
            fill: Fill::None,
            arrowheads: Arrowheads::None,
        }
    }

    pub const fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub const fn with_arrowheads(mut self, arrowheads: Arrowheads) -> Self {
        self.arrowheads = arrowheads;
        self
    }
}

/// Geometry of a primitive. Angles are degrees, counter-clockwise from +x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Shape {
    /// `width` runs along `rotation`, `height` along `rotation + 90`, both from `origin`
    Rectangle {
        origin: Point2D,
        width: f64,
        height: f64,
        rotation: f64,
    },
    /// Counter-clockwise sweep from `start_angle` to `end_angle`
    Arc {
        center: Point2D,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Line {
        start: Point2D,
        end: Point2D,
    },
    Circle {
        center: Point2D,
        radius: f64,
    },
    /// Centered on `position`
    Text {
        position: Point2D,
        text: String,
        rotation: f64,
    },
    /// Measured span from `start` to `end` with its label
    Dimension {
        start: Point2D,
        end: Point2D,
        label: String,
        label_position: Point2D,
        label_rotation: f64,
    },
}

impl Shape {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Shape::Rectangle {
            origin: Point2D::new(x, y),
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Shape::Line {
            start: Point2D::new(x0, y0),
            end: Point2D::new(x1, y1),
        }
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>) -> Self {
        Shape::Text {
            position: Point2D::new(x, y),
            text: text.into(),
            rotation: 0.0,
        }
    }

    /// Points whose hull bounds the shape
    fn extent_points(&self) -> Vec<Point2D> {
        match self {
            Shape::Rectangle {
                origin,
                width,
                height,
                rotation,
            } => {
                let along = direction(*rotation) * *width;
                let across = direction(rotation + 90.0) * *height;
                let o = origin.to_point();
                vec![
                    o.into(),
                    (o + along).into(),
                    (o + along + across).into(),
                    (o + across).into(),
                ]
            }
            Shape::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let c = center.to_point();
                let mut points: Vec<Point2D> = vec![
                    (c + direction(*start_angle) * *radius).into(),
                    (c + direction(*end_angle) * *radius).into(),
                ];
                // Cardinal extremes inside the sweep
                let mut cardinal = (start_angle / 90.0).ceil() * 90.0;
                while cardinal < *end_angle {
                    points.push((c + direction(cardinal) * *radius).into());
                    cardinal += 90.0;
                }
                points
            }
            Shape::Line { start, end } => vec![*start, *end],
            Shape::Circle { center, radius } => vec![
                center.offset(-radius, -radius),
                center.offset(*radius, *radius),
            ],
            Shape::Text { position, .. } => vec![*position],
            Shape::Dimension {
                start,
                end,
                label_position,
                ..
            } => vec![*start, *end, *label_position],
        }
    }
}

/// Unit vector at `degrees`
#[inline]
pub fn direction(degrees: f64) -> Vector2<f64> {
    let r = degrees.to_radians();
    Vector2::new(r.cos(), r.sin())
}

/// A tagged, styled shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Primitive {
    #[serde(flatten)]
    pub shape: Shape,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleHint>,
}

/// Axis-aligned bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_point(p: Point2D) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    pub fn include(&mut self, p: Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Figure size in renderer units, aspect-preserving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
    /// Renderer units per inch of drawing
    pub scale: f64,
}

impl FigureSize {
    /// Largest size within `budget_w × budget_h` whose aspect is `content_w / content_h`
    pub fn fit(content_w: f64, content_h: f64, budget_w: f64, budget_h: f64) -> Self {
        let scale = (budget_w / content_w).min(budget_h / content_h);
        Self {
            width: content_w * scale,
            height: content_h * scale,
            scale,
        }
    }
}

/// Ordered primitive list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, role: Role, shape: Shape) {
        self.primitives.push(Primitive {
            shape,
            role,
            style: None,
        });
    }

    pub fn add_styled(&mut self, role: Role, shape: Shape, style: StyleHint) {
        self.primitives.push(Primitive {
            shape,
            role,
            style: Some(style),
        });
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn extend(&mut self, other: Scene) {
        self.primitives.extend(other.primitives);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.role == role)
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.with_role(role).count()
    }

    /// Bounds of every primitive, `None` for an empty scene
    pub fn extent(&self) -> Option<Bounds> {
        let mut points = self.primitives.iter().flat_map(|p| p.shape.extent_points());
        let mut bounds = Bounds::from_point(points.next()?);
        for p in points {
            bounds.include(p);
        }
        Some(bounds)
    }
}

/// A laid-out drawing: scene plus the measurements callers report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub scene: Scene,
    /// Sum of panel widths
    pub bounding_width: f64,
    /// Opening height
    pub bounding_height: f64,
    pub figure_size: FigureSize,
    pub extent: Option<Bounds>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotated_rectangle_extent() {
        let mut scene = Scene::new();
        scene.add(
            Role::DoorLeaf,
            Shape::Rectangle {
                origin: Point2D::new(10.0, 0.0),
                width: 24.0,
                height: 2.0,
                rotation: 90.0,
            },
        );
        let b = scene.extent().unwrap();
        assert_relative_eq!(b.min_x, 8.0, epsilon = 1e-9);
        assert_relative_eq!(b.max_x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(b.min_y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(b.max_y, 24.0, epsilon = 1e-9);
    }

    #[test]
    fn test_arc_extent_includes_cardinals() {
        let mut scene = Scene::new();
        scene.add(
            Role::SwingArc,
            Shape::Arc {
                center: Point2D::new(0.0, 0.0),
                radius: 10.0,
                start_angle: 45.0,
                end_angle: 135.0,
            },
        );
        let b = scene.extent().unwrap();
        assert_relative_eq!(b.max_y, 10.0, epsilon = 1e-9);
        assert_relative_eq!(b.min_x, -10.0 * 45f64.to_radians().cos(), epsilon = 1e-9);
    }

    #[test]
    fn test_empty_scene_has_no_extent() {
        assert!(Scene::new().extent().is_none());
    }

    #[test]
    fn test_figure_fit_preserves_aspect() {
        let size = FigureSize::fit(120.0, 96.0, 12.0, 6.0);
        assert_relative_eq!(size.width / size.height, 120.0 / 96.0, epsilon = 1e-12);
        assert_relative_eq!(size.height, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_primitive_wire_format() {
        let mut scene = Scene::new();
        scene.add_styled(Role::GlassStop, Shape::rect(1.0, 2.0, 3.0, 4.0), StyleHint::dotted(0.7));
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json[0]["type"], "rectangle");
        assert_eq!(json[0]["role"], "glass-stop");
        assert_eq!(json[0]["style"]["stroke"], "dotted");
        assert_eq!(json[0]["origin"]["x"], 1.0);
    }
}
