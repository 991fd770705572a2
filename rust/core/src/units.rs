// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length conversion and the text formats used on drawings and quotes
//!
//! All geometry is carried in inches. BOM formulas convert to feet, and
//! labels print lengths the way the shop floor reads them (`36"`, `36.5"`).

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Convert inches to feet
#[inline]
pub fn inches_to_feet(inches: f64) -> f64 {
    inches / INCHES_PER_FOOT
}

/// Plain numeric rendering: integral values drop the fraction (`36`),
/// everything else keeps its shortest exact form (`36.5`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Inch label used by dimension annotations: `36"`
pub fn format_inches(value: f64) -> String {
    format!("{}\"", format_number(value))
}

/// Whole-dollar amount with thousands separators: `1,250`
pub fn format_whole_dollars(amount: f64) -> String {
    group_thousands(amount.round() as i64)
}

/// Dollar amount with cents: `$1234.50`
pub fn format_cents(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
