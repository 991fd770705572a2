// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elevation layout
//!
//! Panels are placed left to right from x = 0 with no gaps, bottom of the
//! opening at y = 0. Each panel kind gets its own frame members; fixed panels
//! look at their neighbors to decide which stiles exist.

use crate::config::{ElevationConfig, LayoutConfig, MiniatureConfig};
use crate::error::{Error, Result};
use crate::scene::{Arrowheads, Drawing, Fill, FigureSize, Point2D, Role, Scene, Shape, StyleHint};
use shopgen_core::units::format_inches;
use shopgen_core::{Panel, PanelKind, SlidingDirection};

const MEMBER: StyleHint = StyleHint::solid(0.8);
const GLASS_STOP: StyleHint = StyleHint::dotted(0.7);

/// Full elevation of an opening
pub fn layout_elevation(panels: &[Panel], height: f64, config: &LayoutConfig) -> Result<Drawing> {
    validate(panels, height)?;
    let cfg = &config.elevation;
    let total_width: f64 = panels.iter().map(|p| p.width).sum();

    let mut scene = Scene::new();
    let mut x = 0.0;
    for (idx, panel) in panels.iter().enumerate() {
        let w = panel.width;
        match panel.kind {
            PanelKind::Fixed => fixed_members(&mut scene, panels, idx, x, height, cfg),
            PanelKind::SwingDoor => swing_members(&mut scene, panel, x, height, cfg),
            PanelKind::SlidingDoor => sliding_members(&mut scene, panel, x, height, cfg),
            PanelKind::Corner => {}
        }

        scene.add(
            Role::Label,
            Shape::text(x + w / 2.0, height + cfg.label_offset, (idx + 1).to_string()),
        );
        let dim_y = -cfg.dimension_offset;
        scene.add_styled(
            Role::Dimension,
            Shape::Dimension {
                start: Point2D::new(x, dim_y),
                end: Point2D::new(x + w, dim_y),
                label: format_inches(w),
                label_position: Point2D::new(x + w / 2.0, dim_y - cfg.dimension_label_gap),
                label_rotation: 0.0,
            },
            StyleHint::solid(0.8).with_arrowheads(Arrowheads::Both),
        );
        x += w;
    }

    opening_annotations(&mut scene, panels, total_width, height, cfg);

    let figure_size = FigureSize::fit(total_width, height, cfg.figure_width, cfg.figure_height);
    tracing::debug!(
        panels = panels.len(),
        total_width,
        height,
        scale = figure_size.scale,
        primitives = scene.len(),
        "elevation laid out"
    );
    let extent = scene.extent();
    Ok(Drawing {
        scene,
        bounding_width: total_width,
        bounding_height: height,
        figure_size,
        extent,
    })
}

/// Simplified elevation for quote thumbnails
pub fn layout_miniature(panels: &[Panel], height: f64, config: &LayoutConfig) -> Result<Drawing> {
    validate(panels, height)?;
    let cfg = &config.miniature;
    let total_width: f64 = panels.iter().map(|p| p.width).sum();

    let mut scene = Scene::new();
    let outline = StyleHint::solid(0.5);
    let thin = StyleHint::solid(0.3);
    let glass = StyleHint::dotted(0.3);
    let mut x = 0.0;
    for panel in panels {
        let w = panel.width;
        match panel.kind {
            PanelKind::Fixed => {
                scene.add_styled(Role::PanelOutline, Shape::rect(x, 0.0, w, height), outline);
                let inset = cfg.stile.min(w / cfg.fixed_inset_divisor);
                scene.add_styled(
                    Role::Glass,
                    Shape::rect(x + inset, cfg.rail, w - 2.0 * inset, span(height - 2.0 * cfg.rail)),
                    glass,
                );
            }
            PanelKind::SwingDoor | PanelKind::SlidingDoor => {
                scene.add_styled(Role::PanelOutline, Shape::rect(x, 0.0, w, height), outline);
                let inner_w = span(w - 2.0 * cfg.stile);
                scene.add_styled(
                    Role::Rail,
                    Shape::rect(x + cfg.stile, height - cfg.rail, inner_w, cfg.rail),
                    thin,
                );
                scene.add_styled(Role::Rail, Shape::rect(x + cfg.stile, 0.0, inner_w, cfg.rail), thin);
                scene.add_styled(
                    Role::Glass,
                    Shape::rect(x + cfg.stile, cfg.rail, inner_w, span(height - 2.0 * cfg.rail)),
                    glass,
                );
            }
            PanelKind::Corner => {}
        }
        x += w;
    }

    let (budget_w, budget_h) = miniature_budget(total_width, height, cfg);
    let figure_size = FigureSize::fit(total_width, height, budget_w, budget_h);
    let extent = scene.extent();
    Ok(Drawing {
        scene,
        bounding_width: total_width,
        bounding_height: height,
        figure_size,
        extent,
    })
}

/// Thumbnail budget grows with the opening, clamped on both axes
pub fn miniature_budget(total_width: f64, height: f64, cfg: &MiniatureConfig) -> (f64, f64) {
    let w = (total_width / cfg.width_divisor).max(cfg.min_width).min(cfg.max_width);
    let h = (height / cfg.height_divisor).max(cfg.min_height).min(cfg.max_height);
    (w, h)
}

fn validate(panels: &[Panel], height: f64) -> Result<()> {
    if panels.is_empty() {
        return Err(Error::Validation("Opening has no panels".to_string()));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::Validation(format!("Opening height must be positive, got {}", height)));
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
    Ok(())
}

/// Length left between two frame members; panels narrower than their
/// members collapse to zero instead of going negative
fn span(length: f64) -> f64 {
    length.max(0.0)
}

/// Fixed glazing. Terminal stiles at the opening ends; a stile next to a
/// sliding door is dropped so the door's own stile forms the boundary.
fn fixed_members(scene: &mut Scene, panels: &[Panel], idx: usize, px: f64, ph: f64, cfg: &ElevationConfig) {
    let pw = panels[idx].width;
    let last = panels.len() - 1;

    let left_stile = if idx == 0 { cfg.terminal_stile } else { cfg.fixed_stile };
    let right_stile = if idx == last { cfg.terminal_stile } else { cfg.fixed_stile };
    let hide_left = idx > 0 && panels[idx - 1].kind == PanelKind::SlidingDoor;
    let hide_right = idx < last && panels[idx + 1].kind == PanelKind::SlidingDoor;
    let left = if hide_left { 0.0 } else { left_stile };
    let right = if hide_right { 0.0 } else { right_stile };

    if !hide_left {
        scene.add_styled(Role::Stile, Shape::rect(px, 0.0, left, ph), MEMBER);
    }
    if !hide_right {
        scene.add_styled(Role::Stile, Shape::rect(px + pw - right, 0.0, right, ph), MEMBER);
    }

    let rail_w = span(pw - left - right);
    scene.add_styled(
        Role::Rail,
        Shape::rect(px + left, ph - cfg.fixed_rail, rail_w, cfg.fixed_rail),
        MEMBER,
    );
    scene.add_styled(Role::Rail, Shape::rect(px + left, 0.0, rail_w, cfg.fixed_rail), MEMBER);

    glass_stop(scene, px + left, px + pw - right, cfg.fixed_rail, cfg.fixed_rail, ph, cfg);
}

fn swing_members(scene: &mut Scene, panel: &Panel, px: f64, ph: f64, cfg: &ElevationConfig) {
    let pw = panel.width;
    let stile = cfg.swing_stile;

    let rail_w = span(pw - 2.0 * stile);

    scene.add_styled(Role::Stile, Shape::rect(px, 0.0, stile, ph), MEMBER);
    scene.add_styled(Role::Stile, Shape::rect(px + pw - stile, 0.0, stile, ph), MEMBER);
    scene.add_styled(
        Role::Rail,
        Shape::rect(px + stile, ph - cfg.swing_top_rail, rail_w, cfg.swing_top_rail),
        MEMBER,
    );
    scene.add_styled(
        Role::Rail,
        Shape::rect(px + stile, 0.0, rail_w, cfg.swing_bottom_rail),
        MEMBER,
    );

    glass_stop(
        scene,
        px + stile,
        px + pw - stile,
        cfg.swing_bottom_rail,
        cfg.swing_top_rail,
        ph,
        cfg,
    );

    // Pull sits on the latch side, away from the hinge
    let handle_y = ph / 2.0;
    let handle_x = if panel.swing_direction.is_left_hand() {
        px + pw - stile - cfg.handle_length
    } else {
        px + stile
    };
    scene.add_styled(
        Role::Handle,
        Shape::line(handle_x, handle_y, handle_x + cfg.handle_length, handle_y),
        StyleHint::solid(1.5),
    );
}

fn sliding_members(scene: &mut Scene, panel: &Panel, px: f64, ph: f64, cfg: &ElevationConfig) {
    let pw = panel.width;
    let outer = cfg.sliding_outer_stile;
    let lock = cfg.sliding_lock_stile;

    let (outer_x, lock_x, rail_x0, rail_x1) = match panel.sliding_direction {
        SlidingDirection::Left => (px, px + pw - lock, px + outer, px + pw - lock),
        SlidingDirection::Right => (px + pw - outer, px, px + lock, px + pw - outer),
    };

    scene.add_styled(Role::Stile, Shape::rect(outer_x, 0.0, outer, ph), MEMBER);
    scene.add_styled(Role::Stile, Shape::rect(lock_x, 0.0, lock, ph), MEMBER);
    let rail_w = span(rail_x1 - rail_x0);
    scene.add_styled(
        Role::Rail,
        Shape::rect(rail_x0, ph - cfg.sliding_rail, rail_w, cfg.sliding_rail),
        MEMBER,
    );
    scene.add_styled(Role::Rail, Shape::rect(rail_x0, 0.0, rail_w, cfg.sliding_rail), MEMBER);

    glass_stop(scene, rail_x0, rail_x1, cfg.sliding_rail, cfg.sliding_rail, ph, cfg);

    let handle_h = ph * cfg.sliding_handle_ratio;
    let handle_y0 = (ph - handle_h) / 2.0;
    let handle_x = lock_x + lock / 2.0 - cfg.sliding_handle_offset;
    scene.add_styled(
        Role::Handle,
        Shape::line(handle_x, handle_y0, handle_x, handle_y0 + handle_h),
        StyleHint::solid(3.0),
    );

    scene.add_styled(
        Role::Track,
        Shape::rect(px, ph - cfg.track_height, pw, cfg.track_height),
        StyleHint::solid(0.0).with_fill(Fill::Tint),
    );

    let arrow_y = ph - cfg.track_height - cfg.arrow_drop;
    let (tail_x, head_x) = match panel.sliding_direction {
        SlidingDirection::Left => (px + pw - cfg.arrow_tail_inset, px + cfg.arrow_head_inset),
        SlidingDirection::Right => (px + cfg.arrow_tail_inset, px + pw - cfg.arrow_head_inset),
    };
    scene.add_styled(
        Role::DirectionArrow,
        Shape::line(tail_x, arrow_y, head_x, arrow_y),
        StyleHint::solid(0.8).with_arrowheads(Arrowheads::End),
    );
}

/// Glass stop inset inside the frame opening bounded by `x0..x1` and the rails
fn glass_stop(scene: &mut Scene, x0: f64, x1: f64, bottom_rail: f64, top_rail: f64, ph: f64, cfg: &ElevationConfig) {
    let inset = cfg.glass_stop_inset;
    scene.add_styled(
        Role::GlassStop,
        Shape::rect(
            x0 + inset,
            bottom_rail + inset,
            span(x1 - x0 - 2.0 * inset),
            span(ph - top_rail - bottom_rail - 2.0 * inset),
        ),
        GLASS_STOP,
    );
}

/// Overall width, height and glass caption
fn opening_annotations(scene: &mut Scene, panels: &[Panel], total_width: f64, height: f64, cfg: &ElevationConfig) {
    let dim_style = StyleHint::solid(0.8).with_arrowheads(Arrowheads::Both);
    let top = height + cfg.dimension_offset;
    scene.add_styled(
        Role::Dimension,
        Shape::Dimension {
            start: Point2D::new(0.0, top),
            end: Point2D::new(total_width, top),
            label: format_inches(total_width),
            label_position: Point2D::new(total_width / 2.0, top + cfg.dimension_label_gap),
            label_rotation: 0.0,
        },
        dim_style,
    );

    let side = -cfg.dimension_offset;
    scene.add_styled(
        Role::Dimension,
        Shape::Dimension {
            start: Point2D::new(side, 0.0),
            end: Point2D::new(side, height),
            label: format_inches(height),
            label_position: Point2D::new(side - cfg.dimension_label_gap, height / 2.0),
            label_rotation: 90.0,
        },
        dim_style,
    );

    let first_glass = &panels[0].glass_type;
    if panels.iter().all(|p| &p.glass_type == first_glass) {
        scene.add(
            Role::Caption,
            Shape::text(
                total_width / 2.0,
                -cfg.caption_offset,
                format!("{} GLASS", first_glass.to_uppercase()),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shopgen_core::SwingDirection;

    fn rects(scene: &Scene, role: Role) -> Vec<(f64, f64, f64, f64)> {
        scene
            .with_role(role)
            .filter_map(|p| match &p.shape {
                Shape::Rectangle {
                    origin, width, height, ..
                } => Some((origin.x, origin.y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_narrow_panels_never_draw_negative_members() {
        let panels = vec![
            Panel::new(PanelKind::Fixed, 6.0, 96.0),
            Panel::new(PanelKind::SwingDoor, 5.0, 96.0),
            Panel::new(PanelKind::SlidingDoor, 4.0, 96.0),
            Panel::new(PanelKind::Fixed, 3.0, 96.0),
        ];
        let config = LayoutConfig::default();
        for drawing in [
            layout_elevation(&panels, 96.0, &config).unwrap(),
            layout_miniature(&panels, 1.5, &config).unwrap(),
        ] {
            for primitive in drawing.scene.primitives() {
                if let Shape::Rectangle { width, height, .. } = primitive.shape {
                    assert!(width >= 0.0 && height >= 0.0, "{:?}", primitive);
                }
            }
        }

        // 3" end lite: 1" fixed stile on the left, 4" terminal stile on the right
        let drawing = layout_elevation(&panels, 96.0, &config).unwrap();
        let last_rails: Vec<_> = rects(&drawing.scene, Role::Rail)
            .into_iter()
            .filter(|r| r.0 >= 15.0)
            .collect();
        assert_eq!(last_rails.len(), 2);
        assert!(last_rails.iter().all(|r| r.2 == 0.0));
    }

    #[test]
    fn test_fixed_terminal_stiles() {
        let panels = vec![
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
        ];
        let drawing = layout_elevation(&panels, 96.0, &LayoutConfig::default()).unwrap();
        let stiles = rects(&drawing.scene, Role::Stile);
        assert_eq!(
            stiles,
            vec![
                (0.0, 0.0, 4.0, 96.0),
                (35.0, 0.0, 1.0, 96.0),
                (36.0, 0.0, 1.0, 96.0),
                (68.0, 0.0, 4.0, 96.0),
            ]
        );
        let stops = rects(&drawing.scene, Role::GlassStop);
        assert_eq!(stops[0], (5.0, 6.0, 29.0, 84.0));
    }

    #[test]
    fn test_fixed_stile_hidden_next_to_sliding_door() {
        let panels = vec![
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
            Panel::new(PanelKind::SlidingDoor, 48.0, 96.0),
            Panel::new(PanelKind::Fixed, 30.0, 96.0),
        ];
        let drawing = layout_elevation(&panels, 96.0, &LayoutConfig::default()).unwrap();
        let stiles = rects(&drawing.scene, Role::Stile);
        // fixed: left terminal only; sliding: two; fixed: right terminal only
        assert_eq!(stiles.len(), 4);
        assert_eq!(stiles[0], (0.0, 0.0, 4.0, 96.0));
        assert_eq!(stiles[3], (110.0, 0.0, 4.0, 96.0));

        let rails = rects(&drawing.scene, Role::Rail);
        assert_eq!(rails[0], (4.0, 91.0, 32.0, 5.0));
    }

    #[test]
    fn test_swing_handle_side() {
        let left = vec![Panel::new(PanelKind::SwingDoor, 36.0, 84.0).with_swing(SwingDirection::LeftIn)];
        let right = vec![Panel::new(PanelKind::SwingDoor, 36.0, 84.0).with_swing(SwingDirection::RightOut)];
        let config = LayoutConfig::default();

        let handle_x = |panels: &[Panel]| {
            let drawing = layout_elevation(panels, 84.0, &config).unwrap();
            let handle = drawing.scene.with_role(Role::Handle).next().cloned().unwrap();
            match handle.shape {
                Shape::Line { start, end } => (start.x, end.x, start.y),
                other => panic!("unexpected handle {:?}", other),
            }
        };
        assert_eq!(handle_x(&left), (26.0, 32.0, 42.0));
        assert_eq!(handle_x(&right), (4.0, 10.0, 42.0));
    }

    #[test]
    fn test_sliding_members() {
        let panels = vec![Panel::new(PanelKind::SlidingDoor, 48.0, 96.0).with_sliding(SlidingDirection::Left)];
        let drawing = layout_elevation(&panels, 96.0, &LayoutConfig::default()).unwrap();
        let stiles = rects(&drawing.scene, Role::Stile);
        assert_eq!(stiles, vec![(0.0, 0.0, 2.0, 96.0), (44.0, 0.0, 4.0, 96.0)]);
        assert_eq!(rects(&drawing.scene, Role::Track), vec![(0.0, 95.5, 48.0, 0.5)]);

        let arrow = drawing.scene.with_role(Role::DirectionArrow).next().cloned().unwrap();
        match arrow.shape {
            Shape::Line { start, end } => {
                assert_relative_eq!(start.x, 38.0);
                assert_relative_eq!(end.x, 5.0);
                assert_relative_eq!(start.y, 93.5);
            }
            other => panic!("unexpected arrow {:?}", other),
        }

        let handle = drawing.scene.with_role(Role::Handle).next().cloned().unwrap();
        match handle.shape {
            Shape::Line { start, end } => {
                assert_relative_eq!(start.x, 45.5);
                assert_relative_eq!(end.y - start.y, 96.0 * 0.3, epsilon = 1e-9);
            }
            other => panic!("unexpected handle {:?}", other),
        }
    }

    #[test]
    fn test_corner_gets_label_and_dimension_only() {
        let panels = vec![Panel::new(PanelKind::Corner, 4.0, 96.0)];
        let drawing = layout_elevation(&panels, 96.0, &LayoutConfig::default()).unwrap();
        assert_eq!(drawing.scene.count_role(Role::Stile), 0);
        assert_eq!(drawing.scene.count_role(Role::Rail), 0);
        assert_eq!(drawing.scene.count_role(Role::Label), 1);
        // per-panel + overall width + height
        assert_eq!(drawing.scene.count_role(Role::Dimension), 3);
    }

    #[test]
    fn test_caption_only_for_uniform_glass() {
        let mut panels = vec![
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
        ];
        let config = LayoutConfig::default();
        let drawing = layout_elevation(&panels, 96.0, &config).unwrap();
        let caption = drawing.scene.with_role(Role::Caption).next().cloned().unwrap();
        assert!(matches!(caption.shape, Shape::Text { ref text, .. } if text == "CLEAR GLASS"));

        panels[1].glass_type = "Low-E".to_string();
        let drawing = layout_elevation(&panels, 96.0, &config).unwrap();
        assert_eq!(drawing.scene.count_role(Role::Caption), 0);
    }

    #[test]
    fn test_scale_and_aspect() {
        let panels = vec![Panel::new(PanelKind::Fixed, 200.0, 96.0)];
        let drawing = layout_elevation(&panels, 96.0, &LayoutConfig::default()).unwrap();
        assert_relative_eq!(drawing.figure_size.scale, (12.0f64 / 200.0).min(6.0 / 96.0));
        assert_relative_eq!(
            drawing.figure_size.width / drawing.figure_size.height,
            200.0 / 96.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_validation() {
        let config = LayoutConfig::default();
        assert!(matches!(layout_elevation(&[], 96.0, &config), Err(Error::Validation(_))));
        let bad = vec![Panel::new(PanelKind::Fixed, 0.0, 96.0)];
        assert!(matches!(layout_elevation(&bad, 96.0, &config), Err(Error::Validation(_))));
        let ok = vec![Panel::new(PanelKind::Fixed, 36.0, 96.0)];
        assert!(matches!(layout_elevation(&ok, 0.0, &config), Err(Error::Validation(_))));
    }

    #[test]
    fn test_miniature() {
        let panels = vec![
            Panel::new(PanelKind::Fixed, 36.0, 96.0),
            Panel::new(PanelKind::SwingDoor, 36.0, 96.0),
            Panel::new(PanelKind::Corner, 4.0, 96.0),
        ];
        let config = LayoutConfig::default();
        let drawing = layout_miniature(&panels, 96.0, &config).unwrap();
        assert_eq!(drawing.scene.count_role(Role::PanelOutline), 2);
        assert_eq!(drawing.scene.count_role(Role::Rail), 2);
        assert_eq!(drawing.scene.count_role(Role::Glass), 2);
        assert_eq!(drawing.bounding_width, 76.0);

        let glass = rects(&drawing.scene, Role::Glass);
        assert_eq!(glass[0], (0.5, 1.0, 35.0, 94.0));

        let (bw, bh) = miniature_budget(76.0, 96.0, &config.miniature);
        assert_relative_eq!(bw, 76.0 / 30.0);
        assert_relative_eq!(bh, 2.4);
        assert_relative_eq!(
            drawing.figure_size.width / drawing.figure_size.height,
            76.0 / 96.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_miniature_budget_clamps() {
        let cfg = MiniatureConfig::default();
        assert_eq!(miniature_budget(30.0, 40.0, &cfg), (2.0, 1.5));
        assert_eq!(miniature_budget(600.0, 400.0, &cfg), (4.0, 3.0));
    }
}
