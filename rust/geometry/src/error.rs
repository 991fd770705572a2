// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while laying out an opening
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Panel arrangement the layout engines cannot draw
    #[error("{0}")]
    UnsupportedConfiguration(String),

    #[error("Invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("Core error: {0}")]
    CoreError(#[from] shopgen_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Error::UnsupportedConfiguration(msg.into())
    }
}
