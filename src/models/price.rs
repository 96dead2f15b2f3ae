use chrono::{DateTime, Utc};

/// Latest close for a ticker, as reported by the market-data provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSample {
    pub ticker: String,
    pub price: f64,
    pub sampled_at: DateTime<Utc>,
}
