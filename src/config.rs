use std::{env, time::Duration};

use crate::{
    error::ConfigError,
    models::{ComparisonMode, WatchRequest},
    services::yahoo,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub market_data_url: String,
    pub smtp: SmtpSettings,
    pub sender_name: Option<String>,
}

/// What the binary should watch, and how often.
#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub request: WatchRequest,
    pub interval: Option<Duration>,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();
    settings_from(|k| env::var(k).ok())
}

pub fn load_watch() -> Result<WatchSettings, ConfigError> {
    dotenvy::dotenv().ok();
    watch_from(|k| env::var(k).ok())
}

pub fn settings_from<F>(lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let market_data_url =
        lookup("MARKET_DATA_URL").unwrap_or_else(|| yahoo::DEFAULT_BASE_URL.to_string());

    let defaults = SmtpSettings::default();
    let host = lookup("SMTP_HOST").unwrap_or(defaults.host);
    let port = lookup("SMTP_PORT")
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let sender_name = lookup("ALERT_SENDER_NAME").filter(|s| !s.trim().is_empty());

    Settings {
        market_data_url,
        smtp: SmtpSettings { host, port },
        sender_name,
    }
}

pub fn watch_from<F>(lookup: F) -> Result<WatchSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

    let recipient = required("WATCH_RECIPIENT")?;
    let symbol = required("WATCH_SYMBOL")?;

    let raw_threshold = required("WATCH_THRESHOLD")?;
    let threshold = raw_threshold
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::Invalid {
            key: "WATCH_THRESHOLD",
            value: raw_threshold.clone(),
        })?;

    let mode = match lookup("WATCH_MODE") {
        Some(m) => m.parse::<ComparisonMode>()?,
        None => ComparisonMode::Above,
    };

    let interval = match lookup("WATCH_INTERVAL_SECS") {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                return Err(ConfigError::Invalid {
                    key: "WATCH_INTERVAL_SECS",
                    value: raw,
                });
            }
        },
        None => None,
    };

    let request = WatchRequest::new(&recipient, &symbol, threshold, mode)?;

    Ok(WatchSettings { request, interval })
}
