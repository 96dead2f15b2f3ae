use std::{fmt, str::FromStr};

use crate::error::InvalidWatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    Above,
    Below,
}

impl ComparisonMode {
    /// Inclusive at the boundary: a price exactly at the threshold triggers
    /// in both directions.
    pub fn is_triggered(self, price: f64, threshold: f64) -> bool {
        match self {
            ComparisonMode::Above => price >= threshold,
            ComparisonMode::Below => price <= threshold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonMode::Above => "above",
            ComparisonMode::Below => "below",
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonMode {
    type Err = InvalidWatch;

    // "1"/"0" are accepted for the old numeric greater-than/less-than flag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" | "1" => Ok(ComparisonMode::Above),
            "below" | "0" => Ok(ComparisonMode::Below),
            other => Err(InvalidWatch::Mode(other.to_string())),
        }
    }
}

// Fields stay private so every request goes through `new`.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchRequest {
    recipient: String,
    ticker: String,
    threshold: f64,
    mode: ComparisonMode,
}

impl WatchRequest {
    pub fn new(
        recipient: &str,
        ticker: &str,
        threshold: f64,
        mode: ComparisonMode,
    ) -> Result<Self, InvalidWatch> {
        let recipient = recipient.trim();
        let ticker = ticker.trim();

        if recipient.is_empty() {
            return Err(InvalidWatch::EmptyRecipient);
        }
        if ticker.is_empty() {
            return Err(InvalidWatch::EmptyTicker);
        }
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(InvalidWatch::Threshold(threshold));
        }

        Ok(Self {
            recipient: recipient.to_string(),
            ticker: ticker.to_uppercase(),
            threshold,
            mode,
        })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mode(&self) -> ComparisonMode {
        self.mode
    }

    pub fn is_triggered_by(&self, price: f64) -> bool {
        self.mode.is_triggered(price, self.threshold)
    }
}
