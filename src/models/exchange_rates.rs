// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Digits kept after the decimal point when a rate is sent downstream.
pub const RATE_PRECISION: usize = 6;

/// A rates response from the provider's `latest.json` or
/// `historical/{date}.json` endpoint. Each rate is units of the target
/// currency per one unit of `base`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateSnapshot {
    pub timestamp: i64,
    pub base: String,
    pub rates: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateItem {
    pub code: String,
    pub rate: String,
}

impl RateItem {
    pub fn new(code: &str, rate: f64) -> Self {
        Self {
            code: code.to_string(),
            rate: format!("{:.*}", RATE_PRECISION, rate),
        }
    }
}

/// Body of `POST /api/v1/system/import-currency-rates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesImport {
    pub timestamp: i64,
    pub base: String,
    pub items: Vec<RateItem>,
}
