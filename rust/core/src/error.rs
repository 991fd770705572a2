// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for panel model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning upstream records into canonical panels
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid panel data (zero panels, non-positive width, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The hardware selection blob could not be read as a category → option map
    #[error("Malformed option selections on panel {panel}: {reason}")]
    MalformedSelections { panel: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
