// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project bill of materials
//!
//! Product BOM lines from every panel of every opening are merged by
//! `"{partName} ({unit})"`. The first line seen for a key fixes its type,
//! description and unit cost; quantities accumulate. Hardware options whose
//! category classifies as hardware join the BOM as one `ea` line per panel.

use crate::schedule::Table;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use shopgen_core::units::{format_cents, inches_to_feet};
use shopgen_core::{resolve_selections, BomComponent, Panel, Project};

pub const BOM_HEADERS: [&str; 7] = [
    "Part Name",
    "Type",
    "Description",
    "Quantity",
    "Unit",
    "Unit Cost",
    "Total Cost",
];

const DESCRIPTION_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomLine {
    pub key: String,
    pub part_name: String,
    pub part_type: String,
    pub description: String,
    pub unit: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillOfMaterials {
    pub items: Vec<BomLine>,
    pub total_cost: f64,
}

impl BillOfMaterials {
    pub fn item(&self, key: &str) -> Option<&BomLine> {
        self.items.iter().find(|line| line.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Accumulates lines in first-seen order
#[derive(Default)]
struct BomBuilder {
    index: FxHashMap<String, usize>,
    lines: Vec<BomLine>,
}

impl BomBuilder {
    fn add(&mut self, line: BomLine) {
        match self.index.get(&line.key) {
            Some(&i) => self.lines[i].quantity += line.quantity,
            None => {
                self.index.insert(line.key.clone(), self.lines.len());
                self.lines.push(line);
            }
        }
    }

    fn finish(self) -> BillOfMaterials {
        let mut items = self.lines;
        let mut total_cost = 0.0;
        for line in &mut items {
            line.total_cost = line.quantity * line.unit_cost;
            total_cost += line.total_cost;
        }
        BillOfMaterials { items, total_cost }
    }
}

/// Aggregate the bill of materials across a whole project
pub fn aggregate_bom(project: &Project) -> BillOfMaterials {
    let mut builder = BomBuilder::default();
    for opening in &project.openings {
        for panel in &opening.panels {
            for component in &panel.bom {
                builder.add(component_line(component, panel));
            }
            for item in resolve_selections(&panel.hardware_selections, &panel.option_schema) {
                if !item.is_category_hardware() {
                    continue;
                }
                let part_name = item.text();
                builder.add(BomLine {
                    key: format!("{} (ea)", part_name),
                    part_name,
                    part_type: "Hardware".to_string(),
                    description: item.category_name.clone(),
                    unit: "ea".to_string(),
                    quantity: 1.0,
                    unit_cost: item.price,
                    total_cost: 0.0,
                });
            }
        }
    }
    let bom = builder.finish();
    tracing::debug!(
        openings = project.openings.len(),
        lines = bom.items.len(),
        total_cost = bom.total_cost,
        "bill of materials aggregated"
    );
    bom
}

fn component_line(component: &BomComponent, panel: &Panel) -> BomLine {
    let part_name = component.part_name.clone().unwrap_or_else(|| "Unknown".to_string());
    let unit = component.unit.clone().unwrap_or_else(|| "ea".to_string());
    BomLine {
        key: format!("{} ({})", part_name, unit),
        part_name,
        part_type: component.part_type.clone().unwrap_or_else(|| "Material".to_string()),
        description: component.description.clone().unwrap_or_default(),
        unit,
        quantity: component_quantity(component, panel),
        unit_cost: component.cost.unwrap_or(0.0),
        total_cost: 0.0,
    }
}

/// Quantity one panel contributes: a formula mentioning width or height
/// measures that side in feet, otherwise the line's own quantity (1 if absent)
pub fn component_quantity(component: &BomComponent, panel: &Panel) -> f64 {
    let default = component.quantity.unwrap_or(1.0);
    match component.formula.as_deref().map(str::to_lowercase) {
        Some(f) if f.contains("width") => inches_to_feet(panel.width),
        Some(f) if f.contains("height") => inches_to_feet(panel.height),
        _ => default,
    }
}

/// Tabular rendering with a closing `TOTAL:` row
pub fn bom_table(bom: &BillOfMaterials) -> Table {
    let mut table = Table::new(&BOM_HEADERS);
    for line in &bom.items {
        table.push_row(vec![
            line.part_name.clone(),
            line.part_type.clone(),
            truncate(&line.description, DESCRIPTION_WIDTH),
            format!("{:.2}", line.quantity),
            line.unit.clone(),
            format_cents(line.unit_cost),
            format_cents(line.total_cost),
        ]);
    }
    let mut total = vec![String::new(); BOM_HEADERS.len() - 2];
    total.push("TOTAL:".to_string());
    total.push(format_cents(bom.total_cost));
    table.push_row(total);
    table
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
