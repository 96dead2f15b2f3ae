use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{error::FetchError, models::PriceSample, services::price_source::PriceSource};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// The chart endpoint rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; stock-alert/0.1)";

#[derive(Clone)]
pub struct YahooClient {
    http: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Chart URL for `symbol`. The symbol is a single percent-encoded path
    /// segment, so it can never add query parameters or change the endpoint.
    pub fn chart_url(&self, symbol: &str) -> Result<Url, FetchError> {
        let bad_base = || FetchError::BadUrl(self.base_url.clone());

        let mut url = Url::parse(&self.base_url).map_err(|_| bad_base())?;
        url.path_segments_mut()
            .map_err(|_| bad_base())?
            .pop_if_empty()
            .extend(["v8", "finance", "chart"])
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("range", "1d")
            .append_pair("interval", "1m");

        Ok(url)
    }

    /// One day of one-minute bars for `symbol`.
    pub async fn intraday_chart(&self, symbol: &str) -> Result<ChartResponse, FetchError> {
        let url = self.chart_url(symbol)?;
        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            // Unknown symbols come back as 404 with a chart.error object.
            if let Ok(chart) = serde_json::from_str::<ChartResponse>(&body) {
                if let Some(err) = chart.chart.error {
                    return Err(FetchError::InvalidSymbol {
                        symbol: symbol.to_string(),
                        reason: err.description,
                    });
                }
            }
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn fetch_latest_price(&self, ticker: &str) -> Result<PriceSample, FetchError> {
        let chart = self.intraday_chart(ticker).await?;
        chart.latest_close(ticker)
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBars>,
}

/// Column-oriented OHLC bars; a missing bar is `null` in every column.
/// Only the close column is read.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteBars {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Close of the last recorded bar, skipping empty trailing bars.
    pub fn latest_close(self, ticker: &str) -> Result<PriceSample, FetchError> {
        if let Some(err) = self.chart.error {
            return Err(FetchError::InvalidSymbol {
                symbol: ticker.to_string(),
                reason: err.description,
            });
        }

        let no_data = || FetchError::NoData(ticker.to_string());

        let result = self
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(no_data)?;
        let bars = result.indicators.quote.into_iter().next().ok_or_else(no_data)?;

        let (idx, price) = bars
            .close
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, c)| c.map(|p| (i, p)))
            .ok_or_else(no_data)?;

        if !price.is_finite() || price <= 0.0 {
            return Err(no_data());
        }

        let sampled_at = result
            .timestamp
            .get(idx)
            .and_then(|t| DateTime::<Utc>::from_timestamp(*t, 0))
            .unwrap_or_else(Utc::now);

        Ok(PriceSample {
            ticker: ticker.to_string(),
            price,
            sampled_at,
        })
    }
}
