use thiserror::Error;

/// Market data could not be turned into a usable price.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("market data request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("market data provider answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("symbol {symbol} rejected by provider: {reason}")]
    InvalidSymbol { symbol: String, reason: String },

    #[error("no price data returned for {0}")]
    NoData(String),

    #[error("market data base url {0:?} cannot hold a chart path")]
    BadUrl(String),

    #[error("could not decode market data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Provider outages that may clear up on a later attempt, as opposed to
    /// a symbol the provider will never know about.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::InvalidSymbol { .. }
            | FetchError::NoData(_)
            | FetchError::Decode(_)
            | FetchError::BadUrl(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("email credential {0} is not configured")]
    ConfigurationMissing(&'static str),

    #[error("could not build alert email: {0}")]
    InvalidMessage(String),

    #[error("sending alert email failed: {0}")]
    NotificationFailed(String),
}

impl From<lettre::address::AddressError> for NotifyError {
    fn from(e: lettre::address::AddressError) -> Self {
        NotifyError::InvalidMessage(format!("invalid address: {e}"))
    }
}

impl From<lettre::error::Error> for NotifyError {
    fn from(e: lettre::error::Error) -> Self {
        NotifyError::InvalidMessage(e.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for NotifyError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        NotifyError::NotificationFailed(e.to_string())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidWatch {
    #[error("recipient address is empty")]
    EmptyRecipient,

    #[error("ticker symbol is empty")]
    EmptyTicker,

    #[error("threshold must be a positive number, got {0}")]
    Threshold(f64),

    #[error("unknown comparison mode {0:?} (expected above or below)")]
    Mode(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error(transparent)]
    Watch(#[from] InvalidWatch),
}
