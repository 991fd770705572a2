// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project package: every opening's drawings and schedule, plus the
//! project-wide BOM and quote

use crate::bom::BillOfMaterials;
use crate::quote::Quote;
use crate::schedule::Table;
use serde::Serialize;
use shopgen_geometry::Drawing;

/// One shop-drawing sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningSheet {
    pub opening_id: Option<String>,
    pub name: Option<String>,
    pub elevation: Drawing,
    /// Quote thumbnail
    pub miniature: Drawing,
    /// Absent when the opening cannot be drawn in plan (no door, several corners)
    pub plan: Option<Drawing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_error: Option<String>,
    pub door_schedule: Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPackage {
    pub openings: Vec<OpeningSheet>,
    pub bom: BillOfMaterials,
    pub quote: Quote,
}
