// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use tracing::info;

use crate::api::{EconumoClient, HttpTransport, OpenExchangeRatesClient};
use crate::config::Config;
use crate::currencies::sync_currencies;
use crate::exchange_rates::sync_exchange_rates;

#[derive(Debug, Clone, PartialEq)]
pub struct SyncSummary {
    pub currencies: usize,
    pub rates: usize,
    pub timestamp: i64,
    pub base: String,
}

/// Uploads the currency list, then the rates. The rates stage only starts
/// once the currency list has been accepted.
pub async fn run(config: &Config, transport: &dyn HttpTransport) -> Result<SyncSummary> {
    let provider =
        OpenExchangeRatesClient::new(transport, &config.provider_url, &config.provider_token);
    let econumo = EconumoClient::new(transport, &config.econumo_api_url, &config.econumo_api_key);

    let currencies = sync_currencies(&provider, &econumo, &config.symbols).await?;
    let rates = sync_exchange_rates(
        &provider,
        &econumo,
        config.date,
        &config.base_symbol,
        &config.symbols,
    )
    .await?;

    info!("Currency list and rates imported");
    Ok(SyncSummary {
        currencies,
        rates: rates.items,
        timestamp: rates.timestamp,
        base: rates.base,
    })
}
