// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request dispatch and response envelopes
//!
//! A request names what to produce (`elevation`, `plan`, `schedule`, `bom`,
//! `quote` or `package`) and carries either one opening (`data`) or a whole
//! project (`project`). Every request yields a [`Response`]; failures are
//! reported in the envelope, never raised to the caller.

use crate::batch::build_package;
use crate::bom::{aggregate_bom, bom_table, BillOfMaterials};
use crate::error::{Error, Result};
use crate::package::ProjectPackage;
use crate::quote::{build_quote, Quote, DEFAULT_VALID_DAYS};
use crate::schedule::{door_schedule, Table};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shopgen_core::{normalize_opening, normalize_project, Opening, Project, RawOpening, RawProject};
use shopgen_geometry::{layout_elevation, layout_miniature, layout_plan, Drawing, LayoutConfig};

fn default_request_type() -> String {
    "elevation".to_string()
}

/// Incoming request, camelCase on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type", default = "default_request_type")]
    pub request_type: String,
    /// Single opening for drawing and schedule requests
    #[serde(default)]
    pub data: Option<RawOpening>,
    /// Whole project for BOM, quote and package requests
    #[serde(default)]
    pub project: Option<RawProject>,
    /// Elevation only: draw the quote thumbnail variant
    #[serde(default)]
    pub miniature: bool,
}

impl Request {
    pub fn opening(request_type: &str, data: RawOpening) -> Self {
        Self {
            request_type: request_type.to_string(),
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn project(request_type: &str, project: RawProject) -> Self {
        Self {
            request_type: request_type.to_string(),
            project: Some(project),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Elevation,
    Plan,
    Schedule,
    Bom,
    Quote,
    Package,
}

impl RequestKind {
    pub fn parse(request_type: &str) -> Result<Self> {
        match request_type {
            "elevation" => Ok(RequestKind::Elevation),
            "plan" => Ok(RequestKind::Plan),
            "schedule" => Ok(RequestKind::Schedule),
            "bom" => Ok(RequestKind::Bom),
            "quote" => Ok(RequestKind::Quote),
            "package" | "complete_package" => Ok(RequestKind::Package),
            other => Err(Error::UnknownRequestType(other.to_string())),
        }
    }
}

/// A laid-out drawing, with the door schedule for elevations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingOutput {
    #[serde(flatten)]
    pub drawing: Drawing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_schedule: Option<Table>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BomOutput {
    #[serde(flatten)]
    pub bom: BillOfMaterials,
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Drawing(DrawingOutput),
    Schedule(Table),
    Bom(BomOutput),
    Quote(Quote),
    Package(ProjectPackage),
}

/// `{ success, error?, ...output }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub output: Option<Output>,
}

impl Response {
    pub fn ok(output: Output) -> Self {
        Self {
            success: true,
            error: None,
            output: Some(output),
        }
    }

    pub fn failure(error: &Error) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            output: None,
        }
    }
}

/// Runs requests against one layout configuration
#[derive(Debug, Clone)]
pub struct Processor {
    layout: LayoutConfig,
    quote_valid_days: u32,
    issue_date: Option<NaiveDate>,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl Processor {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            quote_valid_days: DEFAULT_VALID_DAYS,
            issue_date: None,
        }
    }

    pub fn with_quote_valid_days(mut self, days: u32) -> Self {
        self.quote_valid_days = days;
        self
    }

    /// Pin the quote issue date instead of reading the local clock
    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    fn issue_date(&self) -> NaiveDate {
        self.issue_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Parse and handle one JSON request
    pub fn handle_json(&self, text: &str) -> Response {
        match serde_json::from_str::<Request>(text) {
            Ok(request) => self.handle(&request),
            Err(e) => {
                let err = Error::from(e);
                tracing::warn!(error = %err, "rejected request");
                Response::failure(&err)
            }
        }
    }

    /// Handle a request already parsed as a JSON value
    pub fn handle_value(&self, value: serde_json::Value) -> Response {
        match serde_json::from_value::<Request>(value) {
            Ok(request) => self.handle(&request),
            Err(e) => {
                let err = Error::from(e);
                tracing::warn!(error = %err, "rejected request");
                Response::failure(&err)
            }
        }
    }

    pub fn handle(&self, request: &Request) -> Response {
        tracing::info!(
            request_type = %request.request_type,
            miniature = request.miniature,
            "handling request"
        );
        match self.try_handle(request) {
            Ok(output) => Response::ok(output),
            Err(err) => {
                tracing::warn!(request_type = %request.request_type, error = %err, "request failed");
                Response::failure(&err)
            }
        }
    }

    pub fn try_handle(&self, request: &Request) -> Result<Output> {
        match RequestKind::parse(&request.request_type)? {
            RequestKind::Elevation => {
                let opening = opening_of(request)?;
                Ok(Output::Drawing(self.draw_elevation(&opening, request.miniature)?))
            }
            RequestKind::Plan => {
                let opening = opening_of(request)?;
                Ok(Output::Drawing(self.draw_plan(&opening)?))
            }
            RequestKind::Schedule => {
                let opening = opening_of(request)?;
                Ok(Output::Schedule(door_schedule(&opening.panels)))
            }
            RequestKind::Bom => {
                let bom = aggregate_bom(&project_of(request)?);
                let table = bom_table(&bom);
                Ok(Output::Bom(BomOutput { bom, table }))
            }
            RequestKind::Quote => Ok(Output::Quote(self.quote(&project_of(request)?))),
            RequestKind::Package => Ok(Output::Package(build_package(self, &project_of(request)?)?)),
        }
    }

    /// Elevation (or miniature) plus its door schedule
    pub fn draw_elevation(&self, opening: &Opening, miniature: bool) -> Result<DrawingOutput> {
        let drawing = if miniature {
            layout_miniature(&opening.panels, opening.height, &self.layout)?
        } else {
            layout_elevation(&opening.panels, opening.height, &self.layout)?
        };
        Ok(DrawingOutput {
            drawing,
            door_schedule: Some(door_schedule(&opening.panels)),
        })
    }

    pub fn draw_plan(&self, opening: &Opening) -> Result<DrawingOutput> {
        Ok(DrawingOutput {
            drawing: layout_plan(&opening.panels, opening.height, &self.layout)?,
            door_schedule: None,
        })
    }

    pub fn quote(&self, project: &Project) -> Quote {
        build_quote(project, self.issue_date(), self.quote_valid_days)
    }
}

fn opening_of(request: &Request) -> Result<Opening> {
    let raw = request.data.as_ref().ok_or(Error::MissingData("opening"))?;
    Ok(normalize_opening(raw)?)
}

fn project_of(request: &Request) -> Result<Project> {
    let raw = request.project.as_ref().ok_or(Error::MissingData("project"))?;
    Ok(normalize_project(raw)?)
}
