// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Architectural constants for the layout engines
//!
//! All lengths are inches. `Default` reproduces the standard storefront
//! profile; a product line can override any subset from JSON, missing fields
//! keep their defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Complete layout configuration, injected into every engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub elevation: ElevationConfig,
    pub miniature: MiniatureConfig,
    pub plan: PlanConfig,
}

impl LayoutConfig {
    /// Parse a (possibly partial) config and validate it
    pub fn from_json(text: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let e = &self.elevation;
        let p = &self.plan;
        let m = &self.miniature;
        let positive = [
            ("elevation.fixedStile", e.fixed_stile),
            ("elevation.terminalStile", e.terminal_stile),
            ("elevation.fixedRail", e.fixed_rail),
            ("elevation.swingStile", e.swing_stile),
            ("elevation.swingTopRail", e.swing_top_rail),
            ("elevation.swingBottomRail", e.swing_bottom_rail),
            ("elevation.slidingOuterStile", e.sliding_outer_stile),
            ("elevation.slidingLockStile", e.sliding_lock_stile),
            ("elevation.slidingRail", e.sliding_rail),
            ("elevation.figureWidth", e.figure_width),
            ("elevation.figureHeight", e.figure_height),
            ("miniature.minWidth", m.min_width),
            ("miniature.minHeight", m.min_height),
            ("miniature.widthDivisor", m.width_divisor),
            ("miniature.heightDivisor", m.height_divisor),
            ("plan.wallThickness", p.wall_thickness),
            ("plan.frameDepth", p.frame_depth),
            ("plan.doorThickness", p.door_thickness),
            ("plan.extensionLength", p.extension_length),
            ("plan.hatchSpacing", p.hatch_spacing),
            ("plan.figureWidth", p.figure_width),
            ("plan.figureHeight", p.figure_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!("{} must be positive, got {}", name, value)));
            }
        }
        if m.max_width < m.min_width || m.max_height < m.min_height {
            return Err(Error::InvalidConfig(
                "miniature maximum figure size is below its minimum".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&p.leaf_overlap) {
            return Err(Error::InvalidConfig(format!(
                "plan.leafOverlap must be within 0..=1, got {}",
                p.leaf_overlap
            )));
        }
        if !(0.0..=1.0).contains(&e.sliding_handle_ratio) {
            return Err(Error::InvalidConfig(format!(
                "elevation.slidingHandleRatio must be within 0..=1, got {}",
                e.sliding_handle_ratio
            )));
        }
        Ok(())
    }
}

/// Elevation frame members and annotation offsets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElevationConfig {
    pub fixed_stile: f64,
    /// Outer stile of a fixed panel at either end of the opening
    pub terminal_stile: f64,
    pub fixed_rail: f64,
    pub glass_stop_inset: f64,
    pub swing_stile: f64,
    pub swing_top_rail: f64,
    pub swing_bottom_rail: f64,
    pub handle_length: f64,
    pub sliding_outer_stile: f64,
    pub sliding_lock_stile: f64,
    pub sliding_rail: f64,
    /// Pull bar height as a fraction of panel height
    pub sliding_handle_ratio: f64,
    /// Pull bar offset from the lock stile center
    pub sliding_handle_offset: f64,
    pub track_height: f64,
    /// Direction arrow distance below the track
    pub arrow_drop: f64,
    /// Arrow tail inset from the far edge
    pub arrow_tail_inset: f64,
    /// Arrow head inset from the near edge
    pub arrow_head_inset: f64,
    pub label_offset: f64,
    pub dimension_offset: f64,
    /// Gap between a dimension line and its label
    pub dimension_label_gap: f64,
    pub caption_offset: f64,
    pub figure_width: f64,
    pub figure_height: f64,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            fixed_stile: 1.0,
            terminal_stile: 4.0,
            fixed_rail: 5.0,
            glass_stop_inset: 1.0,
            swing_stile: 4.0,
            swing_top_rail: 5.0,
            swing_bottom_rail: 10.0,
            handle_length: 6.0,
            sliding_outer_stile: 2.0,
            sliding_lock_stile: 4.0,
            sliding_rail: 5.0,
            sliding_handle_ratio: 0.3,
            sliding_handle_offset: 0.5,
            track_height: 0.5,
            arrow_drop: 2.0,
            arrow_tail_inset: 10.0,
            arrow_head_inset: 5.0,
            label_offset: 6.0,
            dimension_offset: 12.0,
            dimension_label_gap: 3.0,
            caption_offset: 24.0,
            figure_width: 12.0,
            figure_height: 6.0,
        }
    }
}

/// Simplified frame used for quote thumbnails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MiniatureConfig {
    pub stile: f64,
    pub rail: f64,
    /// Fixed glass inset is `min(stile, width / fixed_inset_divisor)`
    pub fixed_inset_divisor: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub width_divisor: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub height_divisor: f64,
}

impl Default for MiniatureConfig {
    fn default() -> Self {
        Self {
            stile: 0.5,
            rail: 1.0,
            fixed_inset_divisor: 8.0,
            min_width: 2.0,
            max_width: 4.0,
            width_divisor: 30.0,
            min_height: 1.5,
            max_height: 3.0,
            height_divisor: 40.0,
        }
    }
}

/// Plan (top-down) wall and door conventions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanConfig {
    pub wall_thickness: f64,
    pub frame_depth: f64,
    pub door_thickness: f64,
    /// Jamb line offsets from each side of a door opening
    pub jamb_offsets: Vec<f64>,
    pub extension_length: f64,
    pub hatch_spacing: f64,
    /// Offset of the solid glass lines from the centerline
    pub glass_line_gap: f64,
    pub fixed_marker_radius: f64,
    pub hinge_radius: f64,
    /// Swing arrow tail offset along both axes
    pub swing_arrow_tail: f64,
    /// Gap between the wall face and an open sliding leaf
    pub leaf_gap: f64,
    /// Share of a sliding leaf parked over the neighbor
    pub leaf_overlap: f64,
    pub track_inset: f64,
    /// Dimension line distance below the wall face
    pub dimension_offset: f64,
    pub dimension_label_gap: f64,
    /// Dimension line distance from the centerline of a perpendicular run
    pub side_dimension_offset: f64,
    pub room_label_inset: f64,
    pub room_label_above: f64,
    pub room_label_below: f64,
    pub figure_width: f64,
    pub figure_height: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            wall_thickness: 8.0,
            frame_depth: 3.0,
            door_thickness: 2.0,
            jamb_offsets: vec![0.0, 0.75, 1.5],
            extension_length: 20.0,
            hatch_spacing: 2.5,
            glass_line_gap: 2.0,
            fixed_marker_radius: 3.0,
            hinge_radius: 0.7,
            swing_arrow_tail: 7.0,
            leaf_gap: 2.0,
            leaf_overlap: 0.7,
            track_inset: 0.5,
            dimension_offset: 10.0,
            dimension_label_gap: 2.0,
            side_dimension_offset: 15.0,
            room_label_inset: 10.0,
            room_label_above: 30.0,
            room_label_below: 20.0,
            figure_width: 12.0,
            figure_height: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let config = LayoutConfig::from_json(r#"{"plan": {"wallThickness": 6}, "elevation": {"swingStile": 5}}"#).unwrap();
        assert_eq!(config.plan.wall_thickness, 6.0);
        assert_eq!(config.plan.frame_depth, 3.0);
        assert_eq!(config.elevation.swing_stile, 5.0);
        assert_eq!(config.elevation.swing_bottom_rail, 10.0);
        assert_eq!(config.miniature, MiniatureConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            LayoutConfig::from_json(r#"{"plan": {"wallThickness": 0}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            LayoutConfig::from_json(r#"{"plan": {"leafOverlap": 1.5}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(LayoutConfig::from_json("{not json"), Err(Error::Json(_))));
    }
}
