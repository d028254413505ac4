// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Failures that end a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Missing required configuration: {}", keys.join(", "))]
    MissingConfig { keys: Vec<&'static str> },

    #[error("Failed to {step}")]
    Transport {
        step: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to {step}. Status code: {status}, body: {body}")]
    UnexpectedStatus {
        step: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response for {step}")]
    Decode {
        step: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
