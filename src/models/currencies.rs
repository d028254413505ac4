// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Currency code to display name, as served by the provider's
/// `currencies.json` endpoint.
pub type CurrencyCatalog = BTreeMap<String, String>;

/// Body of `POST /api/v1/system/import-currency-list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyListImport {
    pub items: Vec<String>,
}
