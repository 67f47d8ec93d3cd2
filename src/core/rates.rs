//! Exchange rate tables and the provider abstraction that produces them.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

pub const DEFAULT_PIVOT: &str = "USD";

/// Raw rate data as reported by a provider, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateSnapshot {
    #[serde(default = "default_pivot")]
    pub base: String,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

fn default_pivot() -> String {
    DEFAULT_PIVOT.to_string()
}

impl RateSnapshot {
    /// When the rates were published: the provider's `date` if sent, otherwise its Unix
    /// `timestamp` rendered in UTC.
    pub fn as_of(&self) -> Option<String> {
        self.date.clone().or_else(|| {
            self.timestamp
                .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),
    #[error("Failed to parse rates response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Fetch unsuccessful{}", reason_suffix(.0))]
    Unsuccessful(Option<String>),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {r}"))
        .unwrap_or_default()
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateSnapshot, FetchError>;
}

/// Rates keyed by uppercase currency code, all relative to `pivot`.
///
/// The pivot is always present with a rate of exactly 1.0 and every other rate is finite
/// and strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pivot: String,
    rates: HashMap<String, f64>,
}

pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl RateTable {
    pub fn new(pivot: &str, rates: HashMap<String, f64>) -> Self {
        let pivot = normalize_code(pivot);
        let mut table: HashMap<String, f64> = rates
            .into_iter()
            .filter_map(|(code, rate)| {
                if rate.is_finite() && rate > 0.0 {
                    Some((normalize_code(&code), rate))
                } else {
                    warn!(currency = %code, rate, "Dropping unusable rate");
                    None
                }
            })
            .collect();
        table.insert(pivot.clone(), 1.0);

        Self {
            pivot,
            rates: table,
        }
    }

    pub fn pivot(&self) -> &str {
        &self.pivot
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&normalize_code(code)).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rate(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Currency codes in alphabetical order.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// `(code, rate)` pairs in alphabetical order of code.
    pub fn iter_sorted(&self) -> Vec<(&str, f64)> {
        self.codes()
            .into_iter()
            .map(|code| (code, self.rates[code]))
            .collect()
    }
}

impl From<RateSnapshot> for RateTable {
    fn from(snapshot: RateSnapshot) -> Self {
        RateTable::new(&snapshot.base, snapshot.rates)
    }
}
