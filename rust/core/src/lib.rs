// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # SHOPGEN Core
//!
//! Panel model for storefront openings: fixed glazing, swing doors, sliding
//! doors and 90° corners laid out left to right under one nominal height.
//!
//! ## Overview
//!
//! - **Records**: permissive camelCase wire records ([`RawOpening`], [`RawPanel`])
//! - **Normalization**: records → canonical [`Opening`] / [`Panel`] values with
//!   defaults applied and validation enforced
//! - **Hardware resolution**: option selections resolved against a product's
//!   [`ProductOptionSchema`], with the schedule and BOM/quote classifiers
//! - **Units**: inch/foot conversion and label formatting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shopgen_core::{normalize_opening, RawOpening};
//!
//! let raw: RawOpening = serde_json::from_str(r#"{"panels": [{"width": 36}, {"width": 30, "productType": "SWING_DOOR"}]}"#)?;
//! let opening = normalize_opening(&raw)?;
//! assert_eq!(opening.total_width(), 66.0);
//! ```

pub mod error;
pub mod normalize;
pub mod options;
pub mod panel;
pub mod record;
pub mod units;

pub use error::{Error, Result};
pub use normalize::{
    build_option_schema, normalize_opening, normalize_panel, normalize_project, parse_selections,
    DEFAULT_OPENING_HEIGHT, DEFAULT_PANEL_WIDTH,
};
pub use options::{
    is_hardware_category, is_schedule_hardware, resolve_selections, HardwareLineItem, OptionCategory,
    OptionEntry, ProductOptionSchema,
};
pub use panel::{
    BomComponent, Opening, Panel, PanelKind, Project, SlidingDirection, SwingDirection, DEFAULT_GLASS,
};
pub use record::{RawOpening, RawOption, RawOptionCategory, RawOptionSchema, RawPanel, RawProject, RecordId};
pub use units::{format_cents, format_inches, format_number, format_whole_dollars, inches_to_feet};
