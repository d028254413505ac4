// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use super::transport::{HttpRequest, HttpTransport};
use crate::error::SyncError;
use crate::models::{CurrencyListImport, RatesImport};

pub const CURRENCY_LIST_PATH: &str = "/api/v1/system/import-currency-list";
pub const CURRENCY_RATES_PATH: &str = "/api/v1/system/import-currency-rates";

/// Client for the econumo system import API.
pub struct EconumoClient<'a> {
    transport: &'a dyn HttpTransport,
    base_url: String,
    api_key: String,
}

impl<'a> EconumoClient<'a> {
    pub fn new(transport: &'a dyn HttpTransport, base_url: &str, api_key: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn import_currency_list(&self, body: &CurrencyListImport) -> Result<()> {
        self.post(CURRENCY_LIST_PATH, body, "upload currencies").await
    }

    pub async fn import_currency_rates(&self, body: &RatesImport) -> Result<()> {
        self.post(CURRENCY_RATES_PATH, body, "upload currency rates").await
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T, step: &'static str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let payload = serde_json::to_string(body)
            .with_context(|| format!("Failed to serialize request to {}", step))?;
        debug!(%url, bytes = payload.len(), "POST");

        // The import API takes the raw key, without a Bearer prefix.
        let request = HttpRequest::post_json(url, payload).header("Authorization", &self.api_key);
        let response = self
            .transport
            .execute(request)
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

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{fake::FakeTransport, Method};
    use crate::models::RateItem;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_import_currency_list() -> Result<()> {
        let transport = FakeTransport::new().respond(200, "");
        let client = EconumoClient::new(&transport, "https://econumo.example.com/", "secret");

        let body = CurrencyListImport {
            items: vec!["USD".to_string(), "EUR".to_string()],
        };
        client.import_currency_list(&body).await?;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url,
            "https://econumo.example.com/api/v1/system/import-currency-list"
        );
        assert_eq!(request.header_value("Authorization"), Some("secret"));
        assert_eq!(request.header_value("Content-Type"), Some("application/json"));

        let sent: Value = serde_json::from_str(request.body.as_deref().unwrap_or_default())?;
        assert_eq!(sent, json!({"items": ["USD", "EUR"]}));
        Ok(())
    }

    #[tokio::test]
    async fn test_import_currency_rates() -> Result<()> {
        let transport = FakeTransport::new().respond(200, "{}");
        let client = EconumoClient::new(&transport, "https://econumo.example.com", "secret");

        let body = RatesImport {
            timestamp: 1700000000,
            base: "USD".to_string(),
            items: vec![RateItem::new("EUR", 0.91234)],
        };
        client.import_currency_rates(&body).await?;

        let requests = transport.requests();
        assert_eq!(
            requests[0].url,
            "https://econumo.example.com/api/v1/system/import-currency-rates"
        );
        let sent: Value = serde_json::from_str(requests[0].body.as_deref().unwrap_or_default())?;
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
    async fn test_import_rejected_reports_status_and_body() {
        let transport = FakeTransport::new().respond(403, "Access denied");
        let client = EconumoClient::new(&transport, "https://econumo.example.com", "wrong");

        let body = RatesImport {
            timestamp: 1,
            base: "USD".to_string(),
            items: Vec::new(),
        };
        let err = client.import_currency_rates(&body).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("upload currency rates"));
        assert!(message.contains("403"));
        assert!(message.contains("Access denied"));
    }

    #[tokio::test]
    async fn test_import_accepts_only_200() {
        let transport = FakeTransport::new().respond(201, "");
        let client = EconumoClient::new(&transport, "https://econumo.example.com", "secret");

        let body = CurrencyListImport { items: Vec::new() };
        let err = client.import_currency_list(&body).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::UnexpectedStatus { status: 201, .. })
        ));
    }
}
