// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::SyncError;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_PROVIDER_URL: &str = "https://openexchangerates.org/api";

pub const TOKEN_KEY: &str = "OPEN_EXCHANGE_RATES_TOKEN";
pub const BASE_SYMBOL_KEY: &str = "BASE_SYMBOL";
pub const API_URL_KEY: &str = "ECONUMO_API_URL";
pub const API_KEY_KEY: &str = "ECONUMO_API_KEY";
pub const SYMBOLS_KEY: &str = "SYMBOLS";
pub const DATE_KEY: &str = "RATES_DATE";
pub const PROVIDER_URL_KEY: &str = "OPEN_EXCHANGE_RATES_URL";

/// Settings for one sync run, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub provider_token: String,
    pub provider_url: String,
    pub base_symbol: String,
    /// Shared by the currency list upload and the rates request.
    pub symbols: Vec<String>,
    pub date: Option<NaiveDate>,
    pub econumo_api_url: String,
    pub econumo_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Every missing required key is
    /// reported in one error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            let found = value(key);
            if found.is_none() {
                missing.push(key);
            }
            found.unwrap_or_default()
        };

        let provider_token = required(TOKEN_KEY);
        let base_symbol = required(BASE_SYMBOL_KEY);
        let econumo_api_url = required(API_URL_KEY);
        let econumo_api_key = required(API_KEY_KEY);

        if !missing.is_empty() {
            return Err(SyncError::MissingConfig { keys: missing }.into());
        }

        let date = value(DATE_KEY)
            .map(|raw| parse_date(&raw).with_context(|| format!("Invalid {}", DATE_KEY)))
            .transpose()?;

        let provider_url =
            value(PROVIDER_URL_KEY).unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string());

        Ok(Self {
            provider_token,
            provider_url: provider_url.trim_end_matches('/').to_string(),
            base_symbol,
            symbols: parse_symbols(&value(SYMBOLS_KEY).unwrap_or_default()),
            date,
            econumo_api_url: econumo_api_url.trim_end_matches('/').to_string(),
            econumo_api_key,
        })
    }

    /// A date given on the command line replaces `RATES_DATE`.
    pub fn with_date(self, date: Option<NaiveDate>) -> Self {
        match date {
            Some(_) => Self { date, ..self },
            None => self,
        }
    }
}

/// Splits a comma-separated symbol list, dropping blanks and repeats.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !symbols.iter().any(|s| s == symbol) {
            symbols.push(symbol.to_string());
        }
    }
    symbols
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("expected a date like 2023-09-14, got '{}'", raw))
}

/// Seeds the process environment from a dotenv file. Variables that are
/// already set keep their values. A missing file is not an error.
pub fn load_env_file(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded settings file");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Error loading settings file");
            false
        }
    }
}
