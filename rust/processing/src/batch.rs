// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parallel batch processing
//!
//! Openings share nothing, so batches fan out over the rayon pool and are
//! collected back in input order.

use crate::bom::aggregate_bom;
use crate::error::Result;
use crate::package::{OpeningSheet, ProjectPackage};
use crate::pipeline::{Processor, Request, Response};
use crate::schedule::door_schedule;
use rayon::prelude::*;
use serde_json::Value;
use shopgen_core::{Opening, Project};
use shopgen_geometry::{layout_elevation, layout_miniature, layout_plan, Error as LayoutError};

/// Handle independent requests in parallel, responses in request order
pub fn process_batch(processor: &Processor, requests: &[Request]) -> Vec<Response> {
    let start = std::time::Instant::now();
    let responses: Vec<Response> = requests.par_iter().map(|r| processor.handle(r)).collect();
    let failed = responses.iter().filter(|r| !r.success).count();
    tracing::info!(
        requests = requests.len(),
        failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch complete"
    );
    responses
}

/// Like [`process_batch`] for requests still in JSON form; an element that
/// does not decode fails on its own without affecting the others
pub fn process_values(processor: &Processor, values: Vec<Value>) -> Vec<Response> {
    let count = values.len();
    let responses: Vec<Response> = values.into_par_iter().map(|v| processor.handle_value(v)).collect();
    tracing::info!(requests = count, "batch complete");
    responses
}

/// Lay out every opening of a project and attach the project BOM and quote
pub fn build_package(processor: &Processor, project: &Project) -> Result<ProjectPackage> {
    let openings = project
        .openings
        .par_iter()
        .enumerate()
        .map(|(index, opening)| opening_sheet(processor, index, opening))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        project = project.name.as_deref().unwrap_or("-"),
        openings = openings.len(),
        without_plan = openings.iter().filter(|s| s.plan.is_none()).count(),
        "package assembled"
    );

    Ok(ProjectPackage {
        openings,
        bom: aggregate_bom(project),
        quote: processor.quote(project),
    })
}

fn opening_sheet(processor: &Processor, index: usize, opening: &Opening) -> Result<OpeningSheet> {
    let _span = tracing::info_span!("opening", index, id = opening.id.as_deref().unwrap_or("-")).entered();
    let layout = processor.layout();

    let elevation = layout_elevation(&opening.panels, opening.height, layout)?;
    let miniature = layout_miniature(&opening.panels, opening.height, layout)?;
    let (plan, plan_error) = match layout_plan(&opening.panels, opening.height, layout) {
        Ok(plan) => (Some(plan), None),
        Err(LayoutError::UnsupportedConfiguration(reason)) => {
            tracing::debug!(%reason, "opening has no plan view");
            (None, Some(reason))
        }
        Err(e) => return Err(e.into()),
    };

    Ok(OpeningSheet {
        opening_id: opening.id.clone(),
        name: opening.name.clone(),
        elevation,
        miniature,
        plan,
        plan_error,
        door_schedule: door_schedule(&opening.panels),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shopgen_core::{Panel, PanelKind};

    #[test]
    fn test_package_keeps_opening_order_and_tolerates_planless_openings() {
        let mut storefront = Opening::new(
            96.0,
            vec![
                Panel::new(PanelKind::Fixed, 36.0, 96.0),
                Panel::new(PanelKind::SwingDoor, 36.0, 96.0),
            ],
        );
        storefront.id = Some("A".to_string());
        let mut sidelight = Opening::new(84.0, vec![Panel::new(PanelKind::Fixed, 24.0, 84.0)]);
        sidelight.id = Some("B".to_string());

        let project = Project {
            openings: vec![storefront, sidelight],
            ..Project::default()
        };
        let processor = Processor::default().with_issue_date(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        let package = build_package(&processor, &project).unwrap();

        let ids: Vec<_> = package.openings.iter().map(|s| s.opening_id.as_deref()).collect();
        assert_eq!(ids, vec![Some("A"), Some("B")]);
        assert!(package.openings[0].plan.is_some());
        assert!(package.openings[1].plan.is_none());
        assert!(package.openings[1]
            .plan_error
            .as_deref()
            .unwrap()
            .contains("at least one door"));
        assert_eq!(package.quote.quote_items.len(), 2);
    }

    #[test]
    fn test_undecodable_element_fails_alone() {
        let values = vec![
            serde_json::json!({"type": "schedule", "data": {"panels": [{"width": 36}]}}),
            serde_json::json!({"type": "schedule", "data": {"panels": "none"}}),
            serde_json::json!({"type": "schedule", "data": {"panels": [{"width": 48}]}}),
        ];
        let responses = process_values(&Processor::default(), values);
        let flags: Vec<bool> = responses.iter().map(|r| r.success).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert!(responses[1].error.as_deref().unwrap().starts_with("Invalid JSON input"));
    }

    #[test]
    fn test_batch_preserves_request_order() {
        let processor = Processor::default();
        let requests: Vec<Request> = (0..16)
            .map(|i| {
                let kind = if i % 3 == 0 { "section" } else { "schedule" };
                serde_json::from_value(serde_json::json!({
                    "type": kind,
                    "data": {"panels": [{"width": 30 + i}]}
                }))
                .unwrap()
            })
            .collect();
        let responses = process_batch(&processor, &requests);
        assert_eq!(responses.len(), 16);
        for (i, response) in responses.iter().enumerate() {
            assert_eq!(response.success, i % 3 != 0, "request {}", i);
        }
    }
}
