// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared processing pipeline for SHOPGEN callers
//!
//! Turns normalized openings and projects into the artifacts callers ship:
//! drawings with their door schedule, the project bill of materials, the
//! customer quote, and full project packages assembled in parallel.

pub mod batch;
pub mod bom;
pub mod error;
pub mod package;
pub mod pipeline;
pub mod quote;
pub mod schedule;

pub use batch::{build_package, process_batch, process_values};
pub use bom::{aggregate_bom, bom_table, component_quantity, BillOfMaterials, BomLine, BOM_HEADERS};
pub use error::{Error, Result};
pub use package::{OpeningSheet, ProjectPackage};
pub use pipeline::{BomOutput, DrawingOutput, Output, Processor, Request, RequestKind, Response};
pub use quote::{build_quote, quote_item, ProjectHeader, Quote, QuoteItem, DEFAULT_VALID_DAYS};
pub use schedule::{door_schedule, Table, SCHEDULE_HEADERS};
