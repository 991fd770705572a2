// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Customer quote: one line per opening plus the project header.
//!
//! Everything here is derived from the project data except `valid_until`,
//! which counts days from the issue date the caller passes in.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use shopgen_core::units::{format_number, format_whole_dollars};
use shopgen_core::{resolve_selections, Opening, Project};

pub const DEFAULT_VALID_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHeader {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<&Project> for ProjectHeader {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            status: project.status.clone(),
            created_at: project.created_at.clone(),
            updated_at: project.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub opening_id: Option<String>,
    pub name: Option<String>,
    pub description: String,
    pub dimensions: String,
    pub color: String,
    pub hardware: String,
    pub hardware_price: f64,
    pub glass_type: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub project: ProjectHeader,
    pub quote_items: Vec<QuoteItem>,
    pub total_price: f64,
    pub issued_on: NaiveDate,
    pub valid_until: NaiveDate,
}

/// Quote a whole project, issued on `issued_on` and valid for `valid_days`
pub fn build_quote(project: &Project, issued_on: NaiveDate, valid_days: u32) -> Quote {
    let quote_items: Vec<QuoteItem> = project.openings.iter().map(quote_item).collect();
    let total_price = quote_items.iter().map(|item| item.price).sum();
    let valid_until = issued_on
        .checked_add_days(Days::new(u64::from(valid_days)))
        .unwrap_or(issued_on);
    tracing::debug!(
        openings = quote_items.len(),
        total_price,
        %valid_until,
        "quote built"
    );
    Quote {
        project: ProjectHeader::from(project),
        quote_items,
        total_price,
        issued_on,
        valid_until,
    }
}

/// Quote line for one opening
pub fn quote_item(opening: &Opening) -> QuoteItem {
    let mut hardware_lines = Vec::new();
    let mut hardware_price = 0.0;
    let mut glass_types: Vec<&str> = Vec::new();

    for panel in &opening.panels {
        let glass = panel.glass_type.as_str();
        if !glass.is_empty() && glass != "N/A" && !glass_types.contains(&glass) {
            glass_types.push(glass);
        }
        for item in resolve_selections(&panel.hardware_selections, &panel.option_schema) {
            if item.is_category_hardware() {
                hardware_price += item.price;
                hardware_lines.push(format!("{} | +${}", item.text(), format_whole_dollars(item.price)));
            }
        }
    }

    let hardware = if hardware_lines.is_empty() {
        "Standard Hardware".to_string()
    } else {
        hardware_lines.join(" • ")
    };
    let glass_type = if glass_types.is_empty() {
        "Clear".to_string()
    } else {
        glass_types.join(", ")
    };

    QuoteItem {
        opening_id: opening.id.clone(),
        name: opening.name.clone(),
        description: describe_panels(opening),
        dimensions: format!(
            "{}\" W × {}\" H",
            format_number(opening.total_width()),
            format_number(opening.max_panel_height())
        ),
        color: opening.finish_color.clone().unwrap_or_else(|| "Standard".to_string()),
        hardware,
        hardware_price,
        glass_type,
        price: opening.price.unwrap_or(0.0),
    }
}

/// `"2 Swing Doors, 1 Fixed Panel"`, counted in encounter order
fn describe_panels(opening: &Opening) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for product_type in opening.panels.iter().filter_map(|p| p.product_type.as_deref()) {
        match counts.iter_mut().find(|(t, _)| *t == product_type) {
            Some((_, n)) => *n += 1,
            None => counts.push((product_type, 1)),
        }
    }
    if counts.is_empty() {
        return "Custom Opening".to_string();
    }
    counts
        .iter()
        .map(|(product_type, n)| {
            let plural = if *n > 1 { "s" } else { "" };
            format!("{} {}{}", n, product_display_name(product_type), plural)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn product_display_name(product_type: &str) -> &str {
    match product_type {
        "SWING_DOOR" => "Swing Door",
        "SLIDING_DOOR" => "Sliding Door",
        "FIXED_PANEL" => "Fixed Panel",
        "CORNER_90" => "90° Corner",
        other => other,
    }
}
