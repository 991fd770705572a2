// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw upstream records, as they arrive on the wire (camelCase JSON)
//!
//! Everything here is permissive: fields are optional and ids may be numbers
//! or strings. [`crate::normalize`] turns these into the canonical model.

use crate::panel::BomComponent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier that may be a JSON number or a JSON string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RecordId {
    /// Canonical string form used for all id comparisons
    pub fn canonical(&self) -> String {
        match self {
            RecordId::Int(v) => v.to_string(),
            RecordId::Float(v) => crate::units::format_number(*v),
            RecordId::Text(s) => s.trim().to_string(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOption {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOptionCategory {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    #[serde(alias = "individualOptions")]
    pub options: Vec<RawOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOptionSchema {
    pub categories: Vec<RawOptionCategory>,
}

/// One panel as supplied by the quoting tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPanel {
    pub id: Option<RecordId>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub product_type: Option<String>,
    pub swing_direction: Option<String>,
    pub sliding_direction: Option<String>,
    pub glass_type: Option<String>,
    /// Category id → option id; either a JSON object or that object serialized to a string
    pub hardware_selections: Option<serde_json::Value>,
    pub product_option_schema: Option<RawOptionSchema>,
    pub product_boms: Vec<BomComponent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOpening {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub height: Option<f64>,
    pub price: Option<f64>,
    pub finish_color: Option<String>,
    pub panels: Vec<RawPanel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProject {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub openings: Vec<RawOpening>,
}
