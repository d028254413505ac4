// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use tracing::info;

use crate::api::{EconumoClient, OpenExchangeRatesClient};
use crate::models::{CurrencyCatalog, CurrencyListImport};

/// Codes from the catalog that are also in `symbols`, in catalog order.
/// An empty filter keeps every code.
pub fn filter_catalog(catalog: &CurrencyCatalog, symbols: &[String]) -> Vec<String> {
    catalog
        .keys()
        .filter(|code| symbols.is_empty() || symbols.contains(code))
        .cloned()
        .collect()
}

/// Fetch the provider's currency list, filter it and upload it.
/// Returns the number of codes sent.
pub async fn sync_currencies(
    provider: &OpenExchangeRatesClient<'_>,
    econumo: &EconumoClient<'_>,
    symbols: &[String],
) -> Result<usize> {
    info!("Fetching currencies...");
    let catalog = provider.get_currencies().await?;
    info!(count = catalog.len(), "✅ Currencies fetched");

    let items = filter_catalog(&catalog, symbols);
    let count = items.len();
    econumo
        .import_currency_list(&CurrencyListImport { items })
        .await?;

    info!(count, "✅ Currencies sent to econumo API");
    Ok(count)
}
