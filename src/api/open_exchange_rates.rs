// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::transport::{HttpRequest, HttpTransport};
use crate::error::SyncError;
use crate::models::{CurrencyCatalog, RateSnapshot};

/// Client for the openexchangerates.org REST API.
pub struct OpenExchangeRatesClient<'a> {
    transport: &'a dyn HttpTransport,
    base_url: String,
    app_id: String,
}

impl<'a> OpenExchangeRatesClient<'a> {
    pub fn new(transport: &'a dyn HttpTransport, base_url: &str, app_id: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
        }
    }

    pub fn currencies_url(&self) -> Result<String> {
        self.endpoint("currencies.json", &[])
    }

    /// `latest.json` when no date is given, `historical/{date}.json` otherwise.
    /// `symbols` is only sent when non-empty; the provider then returns every
    /// currency it knows.
    pub fn rates_url(
        &self,
        date: Option<NaiveDate>,
        base: &str,
        symbols: &[String],
    ) -> Result<String> {
        let path = match date {
            None => "latest.json".to_string(),
            Some(date) => format!("historical/{}.json", date.format("%Y-%m-%d")),
        };
        let joined = symbols.join(",");
        let mut params = vec![("base", base)];
        if !symbols.is_empty() {
            params.push(("symbols", joined.as_str()));
        }
        self.endpoint(&path, &params)
    }

    /// Query values are percent-encoded, so tokens and codes pass through intact.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let raw = format!("{}/{}", self.base_url, path);
        let url = Url::parse_with_params(
            &raw,
            std::iter::once(("app_id", self.app_id.as_str())).chain(params.iter().copied()),
        )
        .with_context(|| format!("Invalid provider URL '{}'", self.base_url))?;
        Ok(url.to_string())
    }

    pub async fn get_currencies(&self) -> Result<CurrencyCatalog> {
        self.fetch(self.currencies_url()?, "fetch currencies").await
    }

    pub async fn get_rates(&self, url: String) -> Result<RateSnapshot> {
        self.fetch(url, "fetch currency rates").await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: String, step: &'static str) -> Result<T> {
        debug!(url = %redact(&url), "GET");

        let response = self
            .transport
            .execute(HttpRequest::get(url))
            .await
            .map_err(|source| SyncError::Transport { step, source })?;

        if response.status != 200 {
            return Err(SyncError::UnexpectedStatus {
                step,
                status: response.status,
                body: response.body,
            }
            .into());
        }

        let parsed = serde_json::from_str(&response.body)
            .map_err(|source| SyncError::Decode { step, source })?;
        Ok(parsed)
    }
}

/// Hides the app id so URLs can be logged.
fn redact(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "app_id" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}
