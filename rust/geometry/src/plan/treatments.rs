// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-panel plan treatments, in the local frame of a wall run
//!
//! `left`/`right` are positions along the wall (u); v = 0 is the wall
//! centerline and +v is the hall side.

use crate::config::PlanConfig;
use crate::scene::{direction as direction_of, Arrowheads, Fill, Point2D, Role, Scene, Shape, StyleHint};
use crate::transform::Frame;
use shopgen_core::{SlidingDirection, SwingDirection};

/// Fixed glazing: three glass lines, heavy division lines and an `F{n}` marker
pub(crate) fn fixed(scene: &mut Scene, left: f64, right: f64, marker: usize, cfg: &PlanConfig) {
    let half = cfg.wall_thickness / 2.0;
    let gap = cfg.glass_line_gap;

    scene.add_styled(Role::GlassLine, Shape::line(left, gap, right, gap), StyleHint::solid(1.0));
    scene.add_styled(Role::GlassLine, Shape::line(left, 0.0, right, 0.0), StyleHint::dotted(1.0));
    scene.add_styled(Role::GlassLine, Shape::line(left, -gap, right, -gap), StyleHint::solid(1.0));

    for u in [left, right] {
        scene.add_styled(Role::PanelDivision, Shape::line(u, -half, u, half), StyleHint::solid(2.0));
    }

    let center = Point2D::new((left + right) / 2.0, 0.0);
    scene.add_styled(
        Role::FixedMarker,
        Shape::Circle {
            center,
            radius: cfg.fixed_marker_radius,
        },
        StyleHint::solid(1.5).with_fill(Fill::Background),
    );
    scene.add(Role::FixedMarker, Shape::text(center.x, center.y, format!("F{}", marker)));
}

/// Door opening with the wall knocked out and layered jamb lines on both sides
pub(crate) fn cleared_opening(scene: &mut Scene, left: f64, right: f64, cfg: &PlanConfig) {
    let half = cfg.wall_thickness / 2.0;
    scene.add_styled(
        Role::Clearance,
        Shape::rect(left, -half, right - left, cfg.wall_thickness),
        StyleHint::solid(0.0).with_fill(Fill::Background),
    );
    for &offset in &cfg.jamb_offsets {
        let style = StyleHint::solid(if offset == 0.0 { 1.1 } else { 0.7 });
        scene.add_styled(Role::Jamb, Shape::line(left + offset, -half, left + offset, half), style);
        scene.add_styled(Role::Jamb, Shape::line(right - offset, -half, right - offset, half), style);
    }
}

/// One hand of a swing: arc sweep and open leaf direction, in world degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SwingQuadrant {
    pub start: f64,
    pub end: f64,
    pub leaf: f64,
}

/// World-space swing geometry for the doors of one wall run. The arc tip is
/// at the end of the sweep; `tail` is the unit offset from tip to arrow tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SwingQuadrants {
    pub left_hand: SwingQuadrant,
    pub right_hand: SwingQuadrant,
    pub tail: (f64, f64),
}

impl SwingQuadrants {
    /// Run along +x: both hands open toward +y
    pub const HORIZONTAL: Self = Self {
        left_hand: SwingQuadrant {
            start: 0.0,
            end: 90.0,
            leaf: 90.0,
        },
        right_hand: SwingQuadrant {
            start: 90.0,
            end: 180.0,
            leaf: 90.0,
        },
        tail: (-1.0, -1.0),
    };

    /// Run up +y from a corner
    pub const VERTICAL: Self = Self {
        left_hand: SwingQuadrant {
            start: 270.0,
            end: 360.0,
            leaf: 0.0,
        },
        right_hand: SwingQuadrant {
            start: 180.0,
            end: 270.0,
            leaf: 180.0,
        },
        tail: (-1.0, 1.0),
    };

    fn hand(&self, direction: SwingDirection) -> SwingQuadrant {
        if direction.is_left_hand() {
            self.left_hand
        } else {
            self.right_hand
        }
    }
}

/// Open swing leaf with hinge, arc and travel arrow. The hinge is placed in
/// the run's local frame; everything else is drawn in world coordinates.
pub(crate) fn swing_leaf(
    scene: &mut Scene,
    left: f64,
    right: f64,
    direction: SwingDirection,
    frame: &Frame,
    swing: &SwingQuadrants,
    cfg: &PlanConfig,
) {
    let local_hinge = Point2D::new(
        if direction.is_left_hand() {
            left + cfg.frame_depth
        } else {
            right - cfg.frame_depth
        },
        0.0,
    );
    let hinge = frame.point(local_hinge);
    let door_length = (right - left) - 2.0 * cfg.frame_depth;
    let quadrant = swing.hand(direction);

    scene.add_styled(
        Role::DoorLeaf,
        Shape::Rectangle {
            origin: hinge,
            width: door_length,
            height: cfg.door_thickness,
            rotation: quadrant.leaf,
        },
        StyleHint::solid(2.5).with_fill(Fill::Solid),
    );
    scene.add_styled(
        Role::Hinge,
        Shape::Circle {
            center: hinge,
            radius: cfg.hinge_radius,
        },
        StyleHint::solid(1.0).with_fill(Fill::Solid),
    );
    scene.add_styled(
        Role::SwingArc,
        Shape::Arc {
            center: hinge,
            radius: door_length,
            start_angle: quadrant.start,
            end_angle: quadrant.end,
        },
        StyleHint::solid(1.7),
    );

    let tip = Point2D::from(hinge.to_point() + direction_of(quadrant.end) * door_length);
    let tail = tip.offset(swing.tail.0 * cfg.swing_arrow_tail, swing.tail.1 * cfg.swing_arrow_tail);
    scene.add_styled(
        Role::DirectionArrow,
        Shape::Line { start: tail, end: tip },
        StyleHint::solid(1.2).with_arrowheads(Arrowheads::End),
    );
}

/// Sliding leaf parked on the hall side over the neighbor it slides toward,
/// tracks at both wall faces and a travel arrow on the centerline
pub(crate) fn sliding_leaf(scene: &mut Scene, left: f64, right: f64, direction: SlidingDirection, cfg: &PlanConfig) {
    let w = right - left;
    let half = cfg.wall_thickness / 2.0;
    let door_length = w - 2.0 * cfg.frame_depth;
    let leaf_v = half + cfg.leaf_gap;

    let (leaf_u, arrow_end) = match direction {
        SlidingDirection::Left => (
            left + cfg.frame_depth - door_length * cfg.leaf_overlap,
            left + w / 4.0,
        ),
        SlidingDirection::Right => (
            right - cfg.frame_depth - door_length * (1.0 - cfg.leaf_overlap),
            left + 3.0 * w / 4.0,
        ),
    };

    scene.add_styled(
        Role::DoorLeaf,
        Shape::rect(leaf_u, leaf_v, door_length, cfg.door_thickness),
        StyleHint::solid(2.5).with_fill(Fill::Tint),
    );

    let track_from = left + cfg.frame_depth;
    let track_to = right - cfg.frame_depth;
    for v in [half - cfg.track_inset, -half + cfg.track_inset] {
        scene.add_styled(Role::Track, Shape::line(track_from, v, track_to, v), StyleHint::solid(2.0));
    }

    scene.add_styled(
        Role::DirectionArrow,
        Shape::line(left + w / 2.0, 0.0, arrow_end, 0.0),
        StyleHint::solid(1.5).with_arrowheads(Arrowheads::End),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_marker_text() {
        let mut scene = Scene::new();
        fixed(&mut scene, 0.0, 36.0, 3, &PlanConfig::default());
        assert_eq!(scene.count_role(Role::GlassLine), 3);
        assert_eq!(scene.count_role(Role::PanelDivision), 2);
        let label = scene
            .with_role(Role::FixedMarker)
            .find_map(|p| match &p.shape {
                Shape::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(label, "F3");
    }

    #[test]
    fn test_jamb_layers() {
        let mut scene = Scene::new();
        cleared_opening(&mut scene, 36.0, 66.0, &PlanConfig::default());
        assert_eq!(scene.count_role(Role::Jamb), 6);
        assert_eq!(scene.count_role(Role::Clearance), 1);
    }

    #[test]
    fn test_swing_right_hand_hinge() {
        let mut scene = Scene::new();
        swing_leaf(
            &mut scene,
            0.0,
            36.0,
            SwingDirection::RightIn,
            &Frame::identity(),
            &SwingQuadrants::HORIZONTAL,
            &PlanConfig::default(),
        );
        let arc = scene.with_role(Role::SwingArc).next().cloned().unwrap();
        match arc.shape {
            Shape::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                assert_relative_eq!(center.x, 33.0);
                assert_relative_eq!(radius, 30.0);
                assert_eq!((start_angle, end_angle), (90.0, 180.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        let arrow = scene.with_role(Role::DirectionArrow).next().cloned().unwrap();
        match arrow.shape {
            Shape::Line { start, end } => {
                assert_relative_eq!(end.x, 3.0, epsilon = 1e-9);
                assert_relative_eq!(end.y, 0.0, epsilon = 1e-9);
                assert_relative_eq!(start.x, -4.0, epsilon = 1e-9);
                assert_relative_eq!(start.y, -7.0, epsilon = 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    fn swing_arc_and_arrow(scene: &Scene) -> ((f64, f64), Point2D, Point2D) {
        let arc = match &scene.with_role(Role::SwingArc).next().unwrap().shape {
            Shape::Arc {
                start_angle, end_angle, ..
            } => (*start_angle, *end_angle),
            other => panic!("unexpected {:?}", other),
        };
        match &scene.with_role(Role::DirectionArrow).next().unwrap().shape {
            Shape::Line { start, end } => (arc, *start, *end),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_vertical_run_quadrants() {
        let cfg = PlanConfig::default();
        let frame = Frame::reflected_up(Point2D::new(36.0, 0.0));

        let mut scene = Scene::new();
        swing_leaf(&mut scene, 0.0, 36.0, SwingDirection::LeftIn, &frame, &SwingQuadrants::VERTICAL, &cfg);
        let (arc, tail, tip) = swing_arc_and_arrow(&scene);
        assert_eq!(arc, (270.0, 360.0));
        // hinge (36, 3), tip along +x
        assert_relative_eq!(tip.x, 66.0, epsilon = 1e-9);
        assert_relative_eq!(tip.y, 3.0, epsilon = 1e-9);
        assert_relative_eq!(tail.x, 59.0, epsilon = 1e-9);
        assert_relative_eq!(tail.y, 10.0, epsilon = 1e-9);

        let mut scene = Scene::new();
        swing_leaf(&mut scene, 0.0, 36.0, SwingDirection::RightOut, &frame, &SwingQuadrants::VERTICAL, &cfg);
        let (arc, tail, tip) = swing_arc_and_arrow(&scene);
        assert_eq!(arc, (180.0, 270.0));
        // hinge (36, 33), tip straight down
        assert_relative_eq!(tip.x, 36.0, epsilon = 1e-9);
        assert_relative_eq!(tip.y, 3.0, epsilon = 1e-9);
        assert_relative_eq!(tail.x, 29.0, epsilon = 1e-9);
        assert_relative_eq!(tail.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sliding_left_overlaps_left_neighbor() {
        let mut scene = Scene::new();
        sliding_leaf(&mut scene, 36.0, 84.0, SlidingDirection::Left, &PlanConfig::default());
        let leaf = scene.with_role(Role::DoorLeaf).next().cloned().unwrap();
        match leaf.shape {
            Shape::Rectangle { origin, width, .. } => {
                assert_relative_eq!(origin.x, 39.0 - 42.0 * 0.7, epsilon = 1e-9);
                assert_relative_eq!(origin.y, 6.0);
                assert_relative_eq!(width, 42.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(scene.count_role(Role::Track), 2);
    }
}
