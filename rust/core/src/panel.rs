// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical panel and opening model
//!
//! These are the values every layout and aggregation stage works on. They are
//! produced only by [`crate::normalize`]; nothing downstream looks at raw
//! upstream records.

use crate::options::ProductOptionSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default glass description when upstream leaves it blank
pub const DEFAULT_GLASS: &str = "Clear";

/// Panel classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Fixed,
    SwingDoor,
    SlidingDoor,
    Corner,
}

impl PanelKind {
    /// Map an upstream product type identifier. Unknown identifiers are fixed glazing.
    pub fn from_product_type(product_type: Option<&str>) -> Self {
        match product_type.map(str::trim) {
            Some("SWING_DOOR") => PanelKind::SwingDoor,
            Some("SLIDING_DOOR") => PanelKind::SlidingDoor,
            Some("CORNER_90") => PanelKind::Corner,
            _ => PanelKind::Fixed,
        }
    }

    pub fn is_door(self) -> bool {
        matches!(self, PanelKind::SwingDoor | PanelKind::SlidingDoor)
    }

    /// Name shown in the door schedule
    pub fn display_name(self) -> &'static str {
        match self {
            PanelKind::Fixed => "Fixed",
            PanelKind::SwingDoor => "Swing Door",
            PanelKind::SlidingDoor => "Sliding Door",
            PanelKind::Corner => "Corner",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Hand and swing of a swing door
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SwingDirection {
    LeftIn,
    #[default]
    RightIn,
    LeftOut,
    RightOut,
}

impl SwingDirection {
    /// Parse upstream free text ("Left Out", "LEFT_OUT", "left-out", ...)
    pub fn parse(text: &str) -> Self {
        let lower = text.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        let compact: Vec<&str> = lower.split_whitespace().collect();
        match compact.as_slice() {
            ["left", "in"] => SwingDirection::LeftIn,
            ["right", "in"] => SwingDirection::RightIn,
            ["left", "out"] => SwingDirection::LeftOut,
            ["right", "out"] => SwingDirection::RightOut,
            _ => {
                let left = lower.contains("left");
                let out = lower.contains("out");
                match (left, out) {
                    (true, true) => SwingDirection::LeftOut,
                    (true, false) => SwingDirection::LeftIn,
                    (false, true) => SwingDirection::RightOut,
                    (false, false) => SwingDirection::RightIn,
                }
            }
        }
    }

    /// Hinge on the left jamb
    pub fn is_left_hand(self) -> bool {
        matches!(self, SwingDirection::LeftIn | SwingDirection::LeftOut)
    }

    pub fn label(self) -> &'static str {
        match self {
            SwingDirection::LeftIn => "Left In",
            SwingDirection::RightIn => "Right In",
            SwingDirection::LeftOut => "Left Out",
            SwingDirection::RightOut => "Right Out",
        }
    }
}

impl fmt::Display for SwingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Side a sliding leaf travels toward when opened
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SlidingDirection {
    #[default]
    Left,
    Right,
}

impl SlidingDirection {
    pub fn parse(text: &str) -> Self {
        if text.to_ascii_lowercase().contains("right") {
            SlidingDirection::Right
        } else {
            SlidingDirection::Left
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlidingDirection::Left => "Left",
            SlidingDirection::Right => "Right",
        }
    }
}

impl fmt::Display for SlidingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One bill-of-material line attached to a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BomComponent {
    pub part_name: Option<String>,
    pub part_type: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
    pub cost: Option<f64>,
    pub formula: Option<String>,
}

/// One structural bay of an opening
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub width: f64,
    pub height: f64,
    pub kind: PanelKind,
    pub swing_direction: SwingDirection,
    pub sliding_direction: SlidingDirection,
    pub glass_type: String,
    /// Category id → selected option id, in upstream order
    pub hardware_selections: Vec<(String, String)>,
    /// Upstream product type identifier, verbatim
    pub product_type: Option<String>,
    pub option_schema: ProductOptionSchema,
    pub bom: Vec<BomComponent>,
}

impl Panel {
    /// A bare panel with defaults, mostly useful for building fixtures
    pub fn new(kind: PanelKind, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            kind,
            swing_direction: SwingDirection::default(),
            sliding_direction: SlidingDirection::default(),
            glass_type: DEFAULT_GLASS.to_string(),
            hardware_selections: Vec::new(),
            product_type: None,
            option_schema: ProductOptionSchema::default(),
            bom: Vec::new(),
        }
    }

    pub fn with_swing(mut self, direction: SwingDirection) -> Self {
        self.swing_direction = direction;
        self
    }

    pub fn with_sliding(mut self, direction: SlidingDirection) -> Self {
        self.sliding_direction = direction;
        self
    }

    /// Direction text for the schedule, `-` when the panel does not operate
    pub fn direction_label(&self) -> &'static str {
        match self.kind {
            PanelKind::SwingDoor => self.swing_direction.label(),
            PanelKind::SlidingDoor => self.sliding_direction.label(),
            PanelKind::Fixed | PanelKind::Corner => "-",
        }
    }
}

/// A storefront assembly: ordered panels sharing one nominal height
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    pub id: Option<String>,
    pub name: Option<String>,
    pub height: f64,
    pub panels: Vec<Panel>,
    pub price: Option<f64>,
    pub finish_color: Option<String>,
}

impl Opening {
    pub fn new(height: f64, panels: Vec<Panel>) -> Self {
        Self {
            id: None,
            name: None,
            height,
            panels,
            price: None,
            finish_color: None,
        }
    }

    /// Sum of panel widths, left to right
    pub fn total_width(&self) -> f64 {
        self.panels.iter().map(|p| p.width).sum()
    }

    /// Tallest panel, 0 for an empty opening
    pub fn max_panel_height(&self) -> f64 {
        self.panels.iter().map(|p| p.height).fold(0.0, f64::max)
    }

    pub fn corner_indices(&self) -> Vec<usize> {
        self.panels
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind == PanelKind::Corner)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_door(&self) -> bool {
        self.panels.iter().any(|p| p.kind.is_door())
    }
}

/// A customer project: the unit for BOM and quote aggregation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Project {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub openings: Vec<Opening>,
}
