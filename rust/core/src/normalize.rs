// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw records → canonical panels, openings and projects

use crate::error::{Error, Result};
use crate::options::{OptionCategory, OptionEntry, ProductOptionSchema};
use crate::panel::{Opening, Panel, PanelKind, Project, SlidingDirection, SwingDirection, DEFAULT_GLASS};
use crate::record::{RawOpening, RawOptionSchema, RawPanel, RawProject, RecordId};
use crate::units::format_number;
use serde_json::Value;

/// Panel width when upstream omits it
pub const DEFAULT_PANEL_WIDTH: f64 = 36.0;

/// Opening height when neither the opening nor any panel states one
pub const DEFAULT_OPENING_HEIGHT: f64 = 96.0;

/// Normalize one opening
///
/// Height resolution: explicit opening height, else the tallest panel that
/// states one, else [`DEFAULT_OPENING_HEIGHT`]. Panels without their own
/// height inherit the opening height.
pub fn normalize_opening(raw: &RawOpening) -> Result<Opening> {
    if raw.panels.is_empty() {
        return Err(Error::validation("Opening has no panels"));
    }

    let height = resolve_opening_height(raw)?;
    let panels = raw
        .panels
        .iter()
        .enumerate()
        .map(|(i, p)| normalize_panel(p, i, height))
        .collect::<Result<Vec<_>>>()?;

    Ok(Opening {
        id: raw.id.as_ref().map(RecordId::canonical),
        name: raw.name.clone(),
        height,
        panels,
        price: raw.price,
        finish_color: non_blank(raw.finish_color.as_deref()),
    })
}

/// Normalize every opening of a project, failing on the first bad one
pub fn normalize_project(raw: &RawProject) -> Result<Project> {
    let openings = raw
        .openings
        .iter()
        .map(normalize_opening)
        .collect::<Result<Vec<_>>>()?;

    Ok(Project {
        id: raw.id.as_ref().map(RecordId::canonical),
        name: raw.name.clone(),
        status: raw.status.clone(),
        created_at: raw.created_at.clone(),
        updated_at: raw.updated_at.clone(),
        openings,
    })
}

fn resolve_opening_height(raw: &RawOpening) -> Result<f64> {
    if let Some(h) = raw.height {
        if !h.is_finite() || h <= 0.0 {
            return Err(Error::validation(format!("Opening height must be positive, got {}", h)));
        }
        return Ok(h);
    }
    let tallest = raw
        .panels
        .iter()
        .filter_map(|p| p.height)
        .filter(|h| h.is_finite() && *h > 0.0)
        .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |a| a.max(h))));
    Ok(tallest.unwrap_or(DEFAULT_OPENING_HEIGHT))
}

/// Normalize one panel record (`index` is 0-based, used in messages)
pub fn normalize_panel(raw: &RawPanel, index: usize, opening_height: f64) -> Result<Panel> {
    let width = raw.width.unwrap_or(DEFAULT_PANEL_WIDTH);
    if !width.is_finite() || width <= 0.0 {
        return Err(Error::validation(format!(
            "Panel {} width must be positive, got {}",
            index + 1,
            width
        )));
    }

    let height = raw.height.unwrap_or(opening_height);
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::validation(format!(
            "Panel {} height must be positive, got {}",
            index + 1,
            height
        )));
    }

    let hardware_selections = match &raw.hardware_selections {
        Some(blob) => parse_selections(blob, index)?,
        None => Vec::new(),
    };

    Ok(Panel {
        width,
        height,
        kind: PanelKind::from_product_type(raw.product_type.as_deref()),
        swing_direction: raw
            .swing_direction
            .as_deref()
            .map(SwingDirection::parse)
            .unwrap_or_default(),
        sliding_direction: raw
            .sliding_direction
            .as_deref()
            .map(SlidingDirection::parse)
            .unwrap_or_default(),
        glass_type: non_blank(raw.glass_type.as_deref()).unwrap_or_else(|| DEFAULT_GLASS.to_string()),
        hardware_selections,
        product_type: non_blank(raw.product_type.as_deref()),
        option_schema: raw
            .product_option_schema
            .as_ref()
            .map(build_option_schema)
            .unwrap_or_default(),
        bom: raw.product_boms.clone(),
    })
}

/// Read a selection blob into ordered (category id, option id) pairs.
///
/// Accepts an object or a string holding a serialized object. Null and empty
/// option ids are dropped.
pub fn parse_selections(blob: &Value, panel: usize) -> Result<Vec<(String, String)>> {
    let parsed;
    let map = match blob {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        Value::String(text) if text.trim().is_empty() => return Ok(Vec::new()),
        Value::String(text) => {
            parsed = serde_json::from_str::<Value>(text).map_err(|e| Error::MalformedSelections {
                panel: panel + 1,
                reason: e.to_string(),
            })?;
            match &parsed {
                Value::Object(map) => map,
                Value::Null => return Ok(Vec::new()),
                other => {
                    return Err(Error::MalformedSelections {
                        panel: panel + 1,
                        reason: format!("expected an object, found {}", json_kind(other)),
                    })
                }
            }
        }
        other => {
            return Err(Error::MalformedSelections {
                panel: panel + 1,
                reason: format!("expected an object, found {}", json_kind(other)),
            })
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (category_id, option_id) in map {
        let option_id = match option_id {
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            Value::Number(n) => match n.as_i64() {
                Some(i) => i.to_string(),
                None => format_number(n.as_f64().unwrap_or_default()),
            },
            _ => continue,
        };
        pairs.push((category_id.trim().to_string(), option_id));
    }
    Ok(pairs)
}

/// Typed option schema with canonical string ids. Entries without an id are dropped.
pub fn build_option_schema(raw: &RawOptionSchema) -> ProductOptionSchema {
    let mut schema = ProductOptionSchema::new();
    for raw_category in &raw.categories {
        let Some(id) = raw_category.id.as_ref() else {
            continue;
        };
        let mut category = OptionCategory::new(id.canonical(), raw_category.name.clone().unwrap_or_default());
        for raw_option in &raw_category.options {
            let Some(option_id) = raw_option.id.as_ref() else {
                continue;
            };
            category.insert_option(OptionEntry {
                id: option_id.canonical(),
                name: raw_option.name.clone().unwrap_or_default(),
                price: raw_option.price.unwrap_or(0.0),
            });
        }
        schema.insert_category(category);
    }
    schema
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
