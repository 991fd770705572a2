// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan (top-down) layout
//!
//! A straight opening is one wall run along +x with stubs at both ends. An
//! opening with a single 90° corner splits into two runs meeting at a pivot:
//! the first along +x from the origin, the second up +y from the end of the
//! first. Both legs keep the hall side on their left when walking away from
//! the pivot, so the second leg's frame is a reflection rather than a plain
//! rotation. Swing arcs do not follow the frame: the vertical leg opens a
//! left-hand door through 270°..360° and a right-hand door through 180°..270°.
//!
//! ```text
//!            ║  second run (up)
//!            ║
//!  ══════════╝ pivot
//!  first run
//! ```

mod segment;
mod treatments;

use crate::config::{LayoutConfig, PlanConfig};
use crate::error::{Error, Result};
use crate::scene::{Drawing, FigureSize, Point2D, Role, Scene, Shape};
use crate::transform::Frame;
use segment::{DimensionPlacement, LeafPolicy, WallRun};
use treatments::SwingQuadrants;
use shopgen_core::units::format_inches;
use shopgen_core::{Panel, PanelKind};

/// First swing door, else first sliding door
pub fn primary_door(panels: &[Panel]) -> Option<usize> {
    panels
        .iter()
        .position(|p| p.kind == PanelKind::SwingDoor)
        .or_else(|| panels.iter().position(|p| p.kind == PanelKind::SlidingDoor))
}

/// Top-down layout of an opening
pub fn layout_plan(panels: &[Panel], height: f64, config: &LayoutConfig) -> Result<Drawing> {
    if panels.is_empty() {
        return Err(Error::Validation("Opening has no panels".to_string()));
    }
    if let Some((i, p)) = panels
        .iter()
        .enumerate()
        .find(|(_, p)| !p.width.is_finite() || p.width <= 0.0)
    {
        return Err(Error::Validation(format!(
            "Panel {} width must be positive, got {}",
            i + 1,
            p.width
        )));
    }
    let primary = primary_door(panels)
        .ok_or_else(|| Error::unsupported("Plan view requires at least one door (swing or sliding)"))?;

    let corners: Vec<usize> = panels
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind == PanelKind::Corner)
        .map(|(i, _)| i)
        .collect();

    if corners.len() > 1 {
        return Err(Error::unsupported(format!(
            "Plan view supports at most one corner, found {}",
            corners.len()
        )));
    }

    let cfg = &config.plan;
    let min_door = 2.0 * cfg.frame_depth;
    if let Some((i, p)) = panels
        .iter()
        .enumerate()
        .find(|(_, p)| p.kind.is_door() && p.width <= min_door)
    {
        return Err(Error::unsupported(format!(
            "Panel {} is too narrow for a door in plan view: {} must exceed {}",
            i + 1,
            format_inches(p.width),
            format_inches(min_door)
        )));
    }

    let scene = match corners.first() {
        None => straight_plan(panels, primary, cfg),
        Some(&corner) => corner_plan(panels, corner, primary, cfg),
    };

    let extent = scene.extent();
    let figure_size = match extent {
        Some(b) if b.width() > 0.0 && b.height() > 0.0 => {
            FigureSize::fit(b.width(), b.height(), cfg.figure_width, cfg.figure_height)
        }
        _ => FigureSize::fit(1.0, 1.0, cfg.figure_width, cfg.figure_height),
    };
    tracing::debug!(
        panels = panels.len(),
        corners = corners.len(),
        primary_door = primary,
        primitives = scene.len(),
        "plan laid out"
    );

    Ok(Drawing {
        scene,
        bounding_width: panels.iter().map(|p| p.width).sum(),
        bounding_height: height,
        figure_size,
        extent,
    })
}

fn straight_plan(panels: &[Panel], primary: usize, cfg: &PlanConfig) -> Scene {
    let mut scene = Scene::new();
    let mut fixed_count = 0;
    let run = WallRun {
        panels,
        frame: Frame::identity(),
        start_stub: true,
        end_stub: true,
        leaves: LeafPolicy::EveryDoor,
        swing: SwingQuadrants::HORIZONTAL,
        dimensions: DimensionPlacement::below(cfg),
    };
    run.emit(&mut scene, &mut fixed_count, cfg);
    room_labels(&mut scene, &panels[primary], run.length(), cfg);
    scene
}

fn corner_plan(panels: &[Panel], corner: usize, primary: usize, cfg: &PlanConfig) -> Scene {
    let first = &panels[..corner];
    let second = &panels[corner + 1..];
    let pivot = Point2D::new(first.iter().map(|p| p.width).sum(), 0.0);

    let (first_leaves, second_leaves) = if primary < corner {
        (LeafPolicy::Single(primary), LeafPolicy::NoLeaves)
    } else {
        (LeafPolicy::NoLeaves, LeafPolicy::Single(primary - corner - 1))
    };

    let mut scene = Scene::new();
    let mut fixed_count = 0;
    WallRun {
        panels: first,
        frame: Frame::identity(),
        start_stub: true,
        end_stub: false,
        leaves: first_leaves,
        swing: SwingQuadrants::HORIZONTAL,
        dimensions: DimensionPlacement::below(cfg),
    }
    .emit(&mut scene, &mut fixed_count, cfg);
    WallRun {
        panels: second,
        frame: Frame::reflected_up(pivot),
        start_stub: false,
        end_stub: true,
        leaves: second_leaves,
        swing: SwingQuadrants::VERTICAL,
        dimensions: DimensionPlacement::outer(cfg),
    }
    .emit(&mut scene, &mut fixed_count, cfg);
    scene
}

/// HALL/OFFICE placement follows the primary door: a left-hand swing puts
/// the hall below, any other swing or a slider puts it above.
fn room_labels(scene: &mut Scene, primary: &Panel, length: f64, cfg: &PlanConfig) {
    let half = cfg.wall_thickness / 2.0;
    let left_x = -cfg.extension_length + cfg.room_label_inset;
    let right_x = length + cfg.extension_length - cfg.room_label_inset;
    let above = half + cfg.room_label_above;
    let below = -half - cfg.room_label_below;

    let hall_below = primary.kind == PanelKind::SwingDoor && primary.swing_direction.is_left_hand();
    let (hall_y, office_y) = if hall_below { (below, above) } else { (above, below) };
    scene.add(Role::RoomLabel, Shape::text(left_x, hall_y, "HALL"));
    scene.add(Role::RoomLabel, Shape::text(right_x, office_y, "OFFICE"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopgen_core::{SlidingDirection, SwingDirection};

    fn room_label(scene: &Scene, name: &str) -> Point2D {
        scene
            .with_role(Role::RoomLabel)
            .find_map(|p| match &p.shape {
                Shape::Text { position, text, .. } if text == name => Some(*position),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_primary_door_prefers_swing() {
        let panels = vec![
            Panel::new(PanelKind::SlidingDoor, 48.0, 96.0),
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
            Panel::new(PanelKind::SwingDoor, 36.0, 96.0),
        ];
        assert_eq!(primary_door(&panels), Some(2));
        assert_eq!(primary_door(&panels[..2]), Some(0));
        assert_eq!(primary_door(&panels[1..2]), None);
    }

    #[test]
    fn test_room_labels_follow_primary_door() {
        let config = LayoutConfig::default();
        let left = vec![Panel::new(PanelKind::SwingDoor, 36.0, 96.0).with_swing(SwingDirection::LeftIn)];
        let drawing = layout_plan(&left, 96.0, &config).unwrap();
        assert!(room_label(&drawing.scene, "HALL").y < 0.0);
        assert!(room_label(&drawing.scene, "OFFICE").y > 0.0);

        let right = vec![Panel::new(PanelKind::SwingDoor, 36.0, 96.0).with_swing(SwingDirection::RightOut)];
        let drawing = layout_plan(&right, 96.0, &config).unwrap();
        assert_eq!(room_label(&drawing.scene, "HALL"), Point2D::new(-10.0, 34.0));
        assert_eq!(room_label(&drawing.scene, "OFFICE"), Point2D::new(46.0, -24.0));

        let slider = vec![Panel::new(PanelKind::SlidingDoor, 48.0, 96.0).with_sliding(SlidingDirection::Right)];
        let drawing = layout_plan(&slider, 96.0, &config).unwrap();
        assert!(room_label(&drawing.scene, "HALL").y > 0.0);
    }

    #[test]
    fn test_multiple_corners_rejected() {
        let panels = vec![
            Panel::new(PanelKind::SwingDoor, 36.0, 96.0),
            Panel::new(PanelKind::Corner, 4.0, 96.0),
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
            Panel::new(PanelKind::Corner, 4.0, 96.0),
        ];
        let err = layout_plan(&panels, 96.0, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConfiguration(_)));
        assert!(err.to_string().contains("at most one corner"));
    }

    #[test]
    fn test_door_narrower_than_frame_rejected() {
        let config = LayoutConfig::default();
        let panels = vec![Panel::new(PanelKind::SwingDoor, 5.0, 96.0)];
        let err = layout_plan(&panels, 96.0, &config).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConfiguration(_)));
        assert_eq!(
            err.to_string(),
            "Panel 1 is too narrow for a door in plan view: 5\" must exceed 6\""
        );

        let slider = vec![
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
            Panel::new(PanelKind::SlidingDoor, 6.0, 96.0),
        ];
        assert!(layout_plan(&slider, 96.0, &config).is_err());

        // a narrow fixed lite next to a real door is fine
        let narrow_fixed = vec![
            Panel::new(PanelKind::Fixed, 2.0, 96.0),
            Panel::new(PanelKind::SwingDoor, 36.0, 96.0),
        ];
        let drawing = layout_plan(&narrow_fixed, 96.0, &config).unwrap();
        let radius = drawing
            .scene
            .with_role(Role::SwingArc)
            .find_map(|p| match p.shape {
                Shape::Arc { radius, .. } => Some(radius),
                _ => None,
            })
            .unwrap();
        assert!(radius > 0.0);
    }

    #[test]
    fn test_no_room_labels_on_corner_plan() {
        let panels = vec![
            Panel::new(PanelKind::SwingDoor, 36.0, 96.0),
            Panel::new(PanelKind::Corner, 4.0, 96.0),
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
        ];
        let drawing = layout_plan(&panels, 96.0, &LayoutConfig::default()).unwrap();
        assert_eq!(drawing.scene.count_role(Role::RoomLabel), 0);
    }
}
