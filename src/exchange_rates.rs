// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::api::{EconumoClient, OpenExchangeRatesClient};
use crate::models::{RateItem, RateSnapshot, RatesImport};

/// One item per rate in the snapshot, rates rendered as fixed-point strings.
pub fn to_rate_items(snapshot: &RateSnapshot) -> Vec<RateItem> {
    snapshot
        .rates
        .iter()
        .map(|(code, rate)| RateItem::new(code, *rate))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatesSummary {
    pub timestamp: i64,
    pub base: String,
    pub items: usize,
}

/// Fetch rates for `base` (latest, or for `date`) and upload them.
pub async fn sync_exchange_rates(
    provider: &OpenExchangeRatesClient<'_>,
    econumo: &EconumoClient<'_>,
    date: Option<NaiveDate>,
    base: &str,
    symbols: &[String],
) -> Result<RatesSummary> {
    match date {
        Some(date) => info!(%date, base, "Fetching historical exchange rates..."),
        None => info!(base, "Fetching current exchange rates..."),
    }
    let url = provider.rates_url(date, base, symbols)?;
    let snapshot = provider.get_rates(url).await?;
    info!(
        count = snapshot.rates.len(),
        timestamp = snapshot.timestamp,
        "✅ Exchange rates fetched"
    );

    let body = RatesImport {
        timestamp: snapshot.timestamp,
        base: snapshot.base.clone(),
        items: to_rate_items(&snapshot),
    };
    econumo.import_currency_rates(&body).await?;

    info!(count = body.items.len(), "✅ Exchange rates sent to econumo API");
    Ok(RatesSummary {
        timestamp: body.timestamp,
        base: body.base,
        items: body.items.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::fake::FakeTransport;
    use approx::assert_relative_eq;
    use serde_json::{json, Value};
    use std::collections::{BTreeMap, HashSet};

    fn snapshot(rates: &[(&str, f64)]) -> RateSnapshot {
        RateSnapshot {
            timestamp: 1700000000,
            base: "USD".to_string(),
            rates: rates
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_to_rate_items_one_per_rate() {
        let snapshot = snapshot(&[("EUR", 0.91234), ("GBP", 0.79), ("JPY", 149.123456)]);
        let items = to_rate_items(&snapshot);

        assert_eq!(items.len(), 3);
        let codes: HashSet<&str> = items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, HashSet::from(["EUR", "GBP", "JPY"]));
    }

    #[test]
    fn test_to_rate_items_round_trip_to_precision() {
        let snapshot = snapshot(&[("EUR", 0.91234), ("JPY", 149.123456), ("BTC", 0.000027)]);

        for item in to_rate_items(&snapshot) {
            let parsed: f64 = item.rate.parse().unwrap();
            assert_relative_eq!(parsed, snapshot.rates[&item.code], epsilon = 0.000001);
            assert_eq!(item.rate.split('.').nth(1).map(str::len), Some(6));
        }
    }

    #[test]
    fn test_to_rate_items_empty() {
        assert!(to_rate_items(&snapshot(&[])).is_empty());
    }

    #[tokio::test]
    async fn test_sync_exchange_rates_uploads_snapshot() -> Result<()> {
        let transport = FakeTransport::new()
            .respond(200, r#"{"timestamp":1700000000,"base":"USD","rates":{"EUR":0.91234}}"#)
            .respond(200, "");
        let provider = OpenExchangeRatesClient::new(&transport, "http://provider", "tok");
        let econumo = EconumoClient::new(&transport, "http://econumo", "key");

        let summary = sync_exchange_rates(&provider, &econumo, None, "USD", &[]).await?;
        assert_eq!(summary.timestamp, 1700000000);
        assert_eq!(summary.base, "USD");
        assert_eq!(summary.items, 1);

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://provider/latest.json?app_id=tok&base=USD");
        let sent: Value = serde_json::from_str(requests[1].body.as_deref().unwrap_or_default())?;
        assert_eq!(
            sent,
            json!({
                "timestamp": 1700000000,
                "base": "USD",
                "items": [{"code": "EUR", "rate": "0.912340"}]
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_sync_exchange_rates_historical_date() -> Result<()> {
        let transport = FakeTransport::new()
            .respond(200, r#"{"timestamp":1694649600,"base":"USD","rates":{"EUR":0.93}}"#)
            .respond(200, "");
        let provider = OpenExchangeRatesClient::new(&transport, "http://provider", "tok");
        let econumo = EconumoClient::new(&transport, "http://econumo", "key");
        let date = NaiveDate::from_ymd_opt(2023, 9, 14);

        sync_exchange_rates(&provider, &econumo, date, "USD", &["EUR".to_string()]).await?;

        let url = &transport.requests()[0].url;
        assert_eq!(
            url,
            "http://provider/historical/2023-09-14.json?app_id=tok&base=USD&symbols=EUR"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_sync_exchange_rates_upload_rejected() {
        let transport = FakeTransport::new()
            .respond(200, r#"{"timestamp":1700000000,"base":"USD","rates":{"EUR":0.91234}}"#)
            .respond(400, "bad payload");
        let provider = OpenExchangeRatesClient::new(&transport, "http://provider", "tok");
        let econumo = EconumoClient::new(&transport, "http://econumo", "key");

        let err = sync_exchange_rates(&provider, &econumo, None, "USD", &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bad payload"));
    }
}
