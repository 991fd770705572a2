// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Product option schemas and hardware resolution
//!
//! A panel carries a sparse selection map (category id → option id). The
//! resolver walks that map against the product's option schema and produces
//! `"{category}: {option}"` line items. Ids that do not resolve are dropped.
//!
//! Two classifiers decide what counts as hardware and they are kept apart on
//! purpose: the door schedule filters on the line text with a wide keyword
//! list, while BOM and quote filter on the category name with a narrow one.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Keywords for the door schedule hardware column (matched on line text)
const SCHEDULE_KEYWORDS: &[&str] = &[
    "hardware", "locking", "hinge", "handle", "lockset", "track", "rollers", "lock", "closer",
    "panic", "exit", "pull", "knob",
];

/// Keywords for BOM and quote hardware (matched on category name)
const CATEGORY_KEYWORDS: &[&str] = &["hardware", "handle", "lock", "hinge"];

/// One selectable option inside a category
#[derive(Debug, Clone, PartialEq)]
pub struct OptionEntry {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// An option category and its options, keyed by canonical option id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionCategory {
    pub id: String,
    pub name: String,
    options: FxHashMap<String, OptionEntry>,
}

impl OptionCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            options: FxHashMap::default(),
        }
    }

    /// Add an option; a repeated id keeps the first entry
    pub fn with_option(mut self, id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        self.insert_option(OptionEntry {
            id: id.into(),
            name: name.into(),
            price,
        });
        self
    }

    pub fn insert_option(&mut self, option: OptionEntry) {
        self.options.entry(option.id.clone()).or_insert(option);
    }

    pub fn option(&self, id: &str) -> Option<&OptionEntry> {
        self.options.get(id)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Option schema of one product: categories keyed by canonical category id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductOptionSchema {
    categories: FxHashMap<String, OptionCategory>,
}

impl ProductOptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: OptionCategory) -> Self {
        self.insert_category(category);
        self
    }

    /// Add a category; a repeated id keeps the first entry
    pub fn insert_category(&mut self, category: OptionCategory) {
        self.categories.entry(category.id.clone()).or_insert(category);
    }

    pub fn category(&self, id: &str) -> Option<&OptionCategory> {
        self.categories.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// A resolved selection: `"{category}: {option}"` plus price
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareLineItem {
    pub category_id: String,
    pub category_name: String,
    pub option_id: String,
    pub option_name: String,
    pub price: f64,
}

impl HardwareLineItem {
    /// Display text, `"Handle: Pull Bar"`
    pub fn text(&self) -> String {
        format!("{}: {}", self.category_name, self.option_name)
    }

    /// Door schedule classifier (line text, wide keyword list)
    pub fn is_schedule_hardware(&self) -> bool {
        is_schedule_hardware(&self.text())
    }

    /// BOM/quote classifier (category name, narrow keyword list)
    pub fn is_category_hardware(&self) -> bool {
        is_hardware_category(&self.category_name)
    }
}

/// Resolve every selection against the schema, in selection order.
/// Selections whose category or option is missing are skipped.
pub fn resolve_selections(
    selections: &[(String, String)],
    schema: &ProductOptionSchema,
) -> Vec<HardwareLineItem> {
    let mut items = Vec::with_capacity(selections.len());
    for (category_id, option_id) in selections {
        let Some(category) = schema.category(category_id) else {
            tracing::debug!(category_id = %category_id, "option category not in product schema");
            continue;
        };
        let Some(option) = category.option(option_id) else {
            tracing::debug!(
                category_id = %category_id,
                option_id = %option_id,
                "option not in category"
            );
            continue;
        };
        items.push(HardwareLineItem {
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            option_id: option.id.clone(),
            option_name: option.name.clone(),
            price: option.price,
        });
    }
    items
}

/// True if resolved line text mentions any schedule hardware keyword
pub fn is_schedule_hardware(text: &str) -> bool {
    contains_any(text, SCHEDULE_KEYWORDS)
}

/// True if a category name mentions any BOM/quote hardware keyword
pub fn is_hardware_category(category_name: &str) -> bool {
    contains_any(category_name, CATEGORY_KEYWORDS)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ProductOptionSchema {
        ProductOptionSchema::new()
            .with_category(
                OptionCategory::new("1", "Handle")
                    .with_option("10", "Pull Bar", 125.0)
                    .with_option("11", "Ladder Pull", 210.0),
            )
            .with_category(OptionCategory::new("2", "Finish").with_option("20", "Bronze", 0.0))
            .with_category(OptionCategory::new("3", "Door Track").with_option("30", "Top Hung", 300.0))
    }

    fn sel(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(c, o)| (c.to_string(), o.to_string())).collect()
    }

    #[test]
    fn test_resolve_in_selection_order() {
        let items = resolve_selections(&sel(&[("2", "20"), ("1", "11")]), &schema());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text(), "Finish: Bronze");
        assert_eq!(items[1].text(), "Handle: Ladder Pull");
        assert_eq!(items[1].price, 210.0);
    }

    #[test]
    fn test_unresolved_ids_are_skipped() {
        let items = resolve_selections(&sel(&[("9", "10"), ("1", "99"), ("1", "10")]), &schema());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].option_name, "Pull Bar");
    }

    #[test]
    fn test_empty_schema_resolves_nothing() {
        let items = resolve_selections(&sel(&[("1", "10")]), &ProductOptionSchema::default());
        assert!(items.is_empty());
    }

    #[test]
    fn test_classifiers_are_independent() {
        let items = resolve_selections(&sel(&[("1", "10"), ("2", "20"), ("3", "30")]), &schema());
        let schedule: Vec<_> = items.iter().filter(|i| i.is_schedule_hardware()).map(|i| i.text()).collect();
        let bom: Vec<_> = items.iter().filter(|i| i.is_category_hardware()).map(|i| i.text()).collect();

        // "track" only counts for the schedule
        assert_eq!(schedule, vec!["Handle: Pull Bar", "Door Track: Top Hung"]);
        assert_eq!(bom, vec!["Handle: Pull Bar"]);
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        assert!(is_schedule_hardware("PANIC DEVICE: Concealed"));
        assert!(is_schedule_hardware("Finish: Brushed Knob"));
        assert!(!is_schedule_hardware("Finish: Bronze"));
        assert!(is_hardware_category("Locking Hardware"));
        assert!(is_hardware_category("Hinges"));
        assert!(!is_hardware_category("Closer"));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let cat = OptionCategory::new("1", "Handle")
            .with_option("10", "First", 1.0)
            .with_option("10", "Second", 2.0);
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.option("10").map(|o| o.name.as_str()), Some("First"));
    }
}
