// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One straight wall run
//!
//! Both the plain plan and the two legs of a corner plan go through
//! [`WallRun::emit`]: geometry is built in the run's local frame and mapped
//! to the world through its [`Frame`] in one pass at the end. Swing leaves
//! are the exception; their arcs use the run's own world quadrants.

use super::treatments::{self, SwingQuadrants};
use crate::config::PlanConfig;
use crate::scene::{Arrowheads, Point2D, Role, Scene, Shape, StyleHint};
use crate::transform::Frame;
use shopgen_core::units::format_inches;
use shopgen_core::{Panel, PanelKind};

/// Which door panels of a run get a leaf, arc and arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LeafPolicy {
    /// Every door draws its own treatment
    EveryDoor,
    /// Only the door at this index within the run
    Single(usize),
    /// Doors are drawn as neutral cleared openings
    NoLeaves,
}

impl LeafPolicy {
    fn draws_leaf(self, idx: usize) -> bool {
        match self {
            LeafPolicy::EveryDoor => true,
            LeafPolicy::Single(i) => i == idx,
            LeafPolicy::NoLeaves => false,
        }
    }
}

/// Where a run puts its panel dimensions, in local v
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DimensionPlacement {
    pub line_v: f64,
    pub label_v: f64,
}

impl DimensionPlacement {
    /// Below the office-side wall face
    pub fn below(cfg: &PlanConfig) -> Self {
        let line_v = -cfg.wall_thickness / 2.0 - cfg.dimension_offset;
        Self {
            line_v,
            label_v: line_v - cfg.dimension_label_gap,
        }
    }

    /// Outside a perpendicular run, measured from its centerline
    pub fn outer(cfg: &PlanConfig) -> Self {
        Self {
            line_v: cfg.side_dimension_offset,
            label_v: cfg.side_dimension_offset + cfg.dimension_label_gap,
        }
    }
}

pub(crate) struct WallRun<'a> {
    pub panels: &'a [Panel],
    pub frame: Frame,
    pub start_stub: bool,
    pub end_stub: bool,
    pub leaves: LeafPolicy,
    pub swing: SwingQuadrants,
    pub dimensions: DimensionPlacement,
}

impl WallRun<'_> {
    pub fn length(&self) -> f64 {
        self.panels.iter().map(|p| p.width).sum()
    }

    /// Lay out the run and append it to `scene` in world coordinates.
    /// `fixed_count` numbers fixed markers across runs of the same opening.
    pub fn emit(&self, scene: &mut Scene, fixed_count: &mut usize, cfg: &PlanConfig) {
        if self.panels.is_empty() {
            return;
        }
        let mut local = Scene::new();
        // swing leaves are drawn straight into world space
        let mut leaves = Scene::new();
        let length = self.length();
        let half = cfg.wall_thickness / 2.0;

        local.add_styled(
            Role::Wall,
            Shape::rect(0.0, -half, length, cfg.wall_thickness),
            StyleHint::solid(1.0),
        );
        if self.start_stub {
            extension_stub(&mut local, -cfg.extension_length, 0.0, cfg);
        }
        if self.end_stub {
            extension_stub(&mut local, length, length + cfg.extension_length, cfg);
        }

        let last = self.panels.len() - 1;
        let mut u = 0.0;
        for (idx, panel) in self.panels.iter().enumerate() {
            let (left, right) = (u, u + panel.width);
            if idx == 0 {
                local.add_styled(Role::EndLine, Shape::line(left, -half, left, half), StyleHint::solid(2.0));
            }
            if idx == last {
                local.add_styled(Role::EndLine, Shape::line(right, -half, right, half), StyleHint::solid(2.0));
            }

            match panel.kind {
                PanelKind::Fixed => {
                    *fixed_count += 1;
                    treatments::fixed(&mut local, left, right, *fixed_count, cfg);
                }
                PanelKind::SwingDoor => {
                    treatments::cleared_opening(&mut local, left, right, cfg);
                    if self.leaves.draws_leaf(idx) {
                        treatments::swing_leaf(
                            &mut leaves,
                            left,
                            right,
                            panel.swing_direction,
                            &self.frame,
                            &self.swing,
                            cfg,
                        );
                    }
                }
                PanelKind::SlidingDoor => {
                    treatments::cleared_opening(&mut local, left, right, cfg);
                    if self.leaves.draws_leaf(idx) {
                        treatments::sliding_leaf(&mut local, left, right, panel.sliding_direction, cfg);
                    }
                }
                PanelKind::Corner => {}
            }
            u = right;
        }

        self.panel_dimensions(&mut local);

        for primitive in self.frame.map_all(local.primitives()) {
            scene.push(primitive);
        }
        scene.extend(leaves);
    }

    fn panel_dimensions(&self, local: &mut Scene) {
        let DimensionPlacement { line_v, label_v } = self.dimensions;
        let mut u = 0.0;
        for panel in self.panels {
            let w = panel.width;
            local.add_styled(
                Role::Dimension,
                Shape::Dimension {
                    start: Point2D::new(u, line_v),
                    end: Point2D::new(u + w, line_v),
                    label: format_inches(w),
                    label_position: Point2D::new(u + w / 2.0, label_v),
                    label_rotation: 0.0,
                },
                StyleHint::solid(1.5).with_arrowheads(Arrowheads::Both),
            );
            u += w;
        }
    }
}

/// Outlined wall stub over `a..b` with 45° hatching clipped to the stub
fn extension_stub(scene: &mut Scene, a: f64, b: f64, cfg: &PlanConfig) {
    let t = cfg.wall_thickness;
    let bottom = -t / 2.0;
    scene.add_styled(
        Role::WallExtension,
        Shape::rect(a, bottom, b - a, t),
        StyleHint::solid(2.5),
    );

    let first = a - t;
    let mut k = 0usize;
    loop {
        let hx = first + k as f64 * cfg.hatch_spacing;
        if hx >= b {
            break;
        }
        let x0 = hx.max(a);
        let x1 = (hx + t).min(b);
        if x0 < b && x1 > a {
            scene.add_styled(
                Role::Hatch,
                Shape::line(x0, bottom, x1, bottom + (x1 - x0)),
                StyleHint::solid(0.8),
            );
        }
        k += 1;
    }
}
