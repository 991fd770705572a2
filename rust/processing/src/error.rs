// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced at the request boundary
///
/// Core and geometry errors pass through unchanged so the response envelope
/// carries their own message.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] shopgen_core::Error),

    #[error(transparent)]
    Geometry(#[from] shopgen_geometry::Error),

    #[error("Unknown drawing type: {0}")]
    UnknownRequestType(String),

    #[error("No {0} data provided")]
    MissingData(&'static str),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
