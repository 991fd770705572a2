// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local drawing frames
//!
//! Wall runs are laid out in a local frame (u along the wall, v toward the
//! hall side) and mapped to world coordinates at emission. A frame is a 2D
//! affine transform held as a homogeneous 3×3 matrix: the identity for runs
//! along +x, a reflection for the run turning up from a corner.

use crate::scene::{direction, Point2D, Primitive, Shape};
use nalgebra::{Matrix3, Point2, Vector2};

/// Affine map from a local frame to the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    matrix: Matrix3<f64>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

impl Frame {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Run turning up from `origin`: local u maps to world +y, local v to world +x
    pub fn reflected_up(origin: Point2D) -> Self {
        Self {
            matrix: Matrix3::new(
                0.0, 1.0, origin.x, //
                1.0, 0.0, origin.y, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// True when the frame flips orientation
    pub fn is_mirrored(&self) -> bool {
        let m = &self.matrix;
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)] < 0.0
    }

    pub fn point(&self, p: Point2D) -> Point2D {
        self.matrix.transform_point(&Point2::new(p.x, p.y)).into()
    }

    pub fn vector(&self, v: Vector2<f64>) -> Vector2<f64> {
        self.matrix.transform_vector(&v)
    }

    /// World angle of a local direction, normalized to `[0, 360)`
    pub fn angle(&self, degrees: f64) -> f64 {
        let v = self.vector(direction(degrees));
        normalize_degrees(v.y.atan2(v.x).to_degrees())
    }

    pub fn shape(&self, shape: &Shape) -> Shape {
        match shape {
            Shape::Rectangle {
                origin,
                width,
                height,
                rotation,
            } => {
                // A reflection swaps the rectangle's handedness; re-anchor at the
                // opposite corner along its height so width/height stay positive.
                let anchor = if self.is_mirrored() {
                    let across = direction(rotation + 90.0) * *height;
                    Point2D::from(origin.to_point() + across)
                } else {
                    *origin
                };
                Shape::Rectangle {
                    origin: self.point(anchor),
                    width: *width,
                    height: *height,
                    rotation: self.angle(*rotation),
                }
            }
            Shape::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let sweep = end_angle - start_angle;
                let (start, end) = if self.is_mirrored() {
                    let start = self.angle(*end_angle);
                    (start, start + sweep)
                } else {
                    let start = self.angle(*start_angle);
                    (start, start + sweep)
                };
                Shape::Arc {
                    center: self.point(*center),
                    radius: *radius,
                    start_angle: start,
                    end_angle: end,
                }
            }
            Shape::Line { start, end } => Shape::Line {
                start: self.point(*start),
                end: self.point(*end),
            },
            Shape::Circle { center, radius } => Shape::Circle {
                center: self.point(*center),
                radius: *radius,
            },
            // Free text stays upright
            Shape::Text {
                position,
                text,
                rotation,
            } => Shape::Text {
                position: self.point(*position),
                text: text.clone(),
                rotation: *rotation,
            },
            // Dimension labels follow the measured edge
            Shape::Dimension {
                start,
                end,
                label,
                label_position,
                label_rotation,
            } => Shape::Dimension {
                start: self.point(*start),
                end: self.point(*end),
                label: label.clone(),
                label_position: self.point(*label_position),
                label_rotation: self.angle(*label_rotation),
            },
        }
    }

    pub fn primitive(&self, primitive: &Primitive) -> Primitive {
        Primitive {
            shape: self.shape(&primitive.shape),
            role: primitive.role,
            style: primitive.style,
        }
    }

    /// Map a local primitive list into the world
    pub fn map_all<'a>(&'a self, primitives: &'a [Primitive]) -> impl Iterator<Item = Primitive> + 'a {
        primitives.iter().map(move |p| self.primitive(p))
    }
}

/// Normalize to `[0, 360)`, snapping values within 1e-9 of a full turn to 0
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    if (360.0 - d).abs() < 1e-9 || d.abs() < 1e-9 {
        0.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_point(p: Point2D, x: f64, y: f64) {
        assert_relative_eq!(p.x, x, epsilon = 1e-9);
        assert_relative_eq!(p.y, y, epsilon = 1e-9);
    }

    #[test]
    fn test_identity_frame() {
        let frame = Frame::identity();
        let p = Point2D::new(3.0, 4.0);
        assert!(!frame.is_mirrored());
        assert_eq!(frame.point(p), p);
        assert_relative_eq!(frame.angle(135.0), 135.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reflected_up_frame() {
        let frame = Frame::reflected_up(Point2D::new(72.0, 0.0));
        assert!(frame.is_mirrored());
        // along the wall → +y, toward the hall → +x
        assert_point(frame.point(Point2D::new(10.0, 0.0)), 72.0, 10.0);
        assert_point(frame.point(Point2D::new(0.0, 5.0)), 77.0, 0.0);
        assert_relative_eq!(frame.angle(0.0), 90.0, epsilon = 1e-9);
        assert_relative_eq!(frame.angle(90.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mirrored_rectangle_keeps_footprint() {
        let frame = Frame::reflected_up(Point2D::new(0.0, 0.0));
        let wall = Shape::rect(0.0, -4.0, 30.0, 8.0);
        let mapped = frame.shape(&wall);
        let mut scene = crate::scene::Scene::new();
        scene.add(crate::scene::Role::Wall, mapped);
        let b = scene.extent().unwrap();
        assert_relative_eq!(b.min_x, -4.0, epsilon = 1e-9);
        assert_relative_eq!(b.max_x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(b.min_y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(b.max_y, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mirrored_arc_reverses_sweep() {
        let frame = Frame::reflected_up(Point2D::new(0.0, 0.0));
        let left = frame.shape(&Shape::Arc {
            center: Point2D::default(),
            radius: 24.0,
            start_angle: 0.0,
            end_angle: 90.0,
        });
        let right = frame.shape(&Shape::Arc {
            center: Point2D::default(),
            radius: 24.0,
            start_angle: 90.0,
            end_angle: 180.0,
        });
        match (left, right) {
            (
                Shape::Arc {
                    start_angle: ls,
                    end_angle: le,
                    ..
                },
                Shape::Arc {
                    start_angle: rs,
                    end_angle: re,
                    ..
                },
            ) => {
                assert_relative_eq!(ls, 0.0, epsilon = 1e-9);
                assert_relative_eq!(le, 90.0, epsilon = 1e-9);
                assert_relative_eq!(rs, 270.0, epsilon = 1e-9);
                assert_relative_eq!(re, 360.0, epsilon = 1e-9);
            }
            other => panic!("expected arcs, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_label_turns_with_frame() {
        let frame = Frame::reflected_up(Point2D::new(50.0, 0.0));
        let dim = frame.shape(&Shape::Dimension {
            start: Point2D::new(0.0, 15.0),
            end: Point2D::new(30.0, 15.0),
            label: "30\"".to_string(),
            label_position: Point2D::new(15.0, 17.0),
            label_rotation: 0.0,
        });
        match dim {
            Shape::Dimension {
                start,
                label_rotation,
                ..
            } => {
                assert_point(start, 65.0, 0.0);
                assert_relative_eq!(label_rotation, 90.0, epsilon = 1e-9);
            }
            other => panic!("expected dimension, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
    }
}
