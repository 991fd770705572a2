// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Errors that stop the CLI before a response envelope can be written.
//!
//! Request-level failures never land here; they are reported inside the
//! envelope on stdout.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid layout config in {path}: {source}")]
    Layout {
        path: String,
        #[source]
        source: shopgen_geometry::Error,
    },

    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Failed to write response: {0}")]
    Output(#[from] serde_json::Error),
}
