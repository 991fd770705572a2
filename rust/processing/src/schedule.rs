// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door schedule: one row per panel, in opening order

use serde::{Deserialize, Serialize};
use shopgen_core::units::format_number;
use shopgen_core::{resolve_selections, Panel};

pub const SCHEDULE_HEADERS: [&str; 6] = ["Panel #", "Type", "Width (in)", "Direction", "Glass", "Hardware"];

/// Header row plus string cells, ready for a table renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the door schedule for an opening's panels
pub fn door_schedule(panels: &[Panel]) -> Table {
    let mut table = Table::new(&SCHEDULE_HEADERS);
    for (idx, panel) in panels.iter().enumerate() {
        table.push_row(vec![
            (idx + 1).to_string(),
            panel.kind.display_name().to_string(),
            format_number(panel.width),
            panel.direction_label().to_string(),
            panel.glass_type.clone(),
            hardware_cell(panel),
        ]);
    }
    table
}

/// Schedule-classified hardware joined by `", "`, or `-`
fn hardware_cell(panel: &Panel) -> String {
    let items: Vec<String> = resolve_selections(&panel.hardware_selections, &panel.option_schema)
        .iter()
        .filter(|item| item.is_schedule_hardware())
        .map(|item| item.text())
        .collect();
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
