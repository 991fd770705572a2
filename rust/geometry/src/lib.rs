// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SHOPGEN Geometry
//!
//! Elevation and plan layout for storefront openings, emitted as
//! renderer-agnostic scenes. Frames use nalgebra affine transforms; all
//! constants come from an injected [`LayoutConfig`].

pub mod config;
pub mod elevation;
pub mod error;
pub mod plan;
pub mod scene;
pub mod transform;

pub use config::{ElevationConfig, LayoutConfig, MiniatureConfig, PlanConfig};
pub use elevation::{layout_elevation, layout_miniature, miniature_budget};
pub use error::{Error, Result};
pub use plan::{layout_plan, primary_door};
pub use scene::{
    Arrowheads, Bounds, Drawing, FigureSize, Fill, Point2D, Primitive, Role, Scene, Shape, StrokePattern,
    StyleHint,
};
pub use transform::Frame;
