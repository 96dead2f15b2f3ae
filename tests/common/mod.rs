#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::Utc;
use lettre::Message;
use stockalert::{
    error::{FetchError, NotifyError},
    models::PriceSample,
    services::{
        notifier::{AlertSink, CredentialSource, EmailCredentials, MailTransport},
        price_source::PriceSource,
    },
};

#[derive(Debug, Clone, Copy)]
pub enum Quote {
    Price(f64),
    Outage,
    UnknownSymbol,
}

/// Replays quotes in order; the last one repeats once the script runs out.
pub struct ScriptedPrices {
    script: Mutex<VecDeque<Quote>>,
    last: Mutex<Quote>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrices {
    pub fn new(quotes: &[Quote]) -> Self {
        Self {
            script: Mutex::new(quotes.iter().copied().collect()),
            last: Mutex::new(*quotes.last().unwrap_or(&Quote::Outage)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always(q: Quote) -> Self {
        Self::new(&[q])
    }
}

#[async_trait]
impl PriceSource for ScriptedPrices {
    async fn fetch_latest_price(&self, ticker: &str) -> Result<PriceSample, FetchError> {
        self.calls.lock().unwrap().push(ticker.to_string());

        let q = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(*self.last.lock().unwrap());

        match q {
            Quote::Price(price) => Ok(PriceSample {
                ticker: ticker.to_string(),
                price,
                sampled_at: Utc::now(),
            }),
            Quote::Outage => Err(FetchError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            }),
            Quote::UnknownSymbol => Err(FetchError::InvalidSymbol {
                symbol: ticker.to_string(),
                reason: "No data found, symbol may be delisted".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentAlert {
    pub recipient: String,
    pub ticker: String,
    pub threshold: f64,
    pub current_price: f64,
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    pub sent: Arc<Mutex<Vec<SentAlert>>>,
    pub reject: bool,
}

impl RecordingSink {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    async fn send_alert(
        &self,
        recipient: &str,
        ticker: &str,
        threshold: f64,
        current_price: f64,
    ) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(SentAlert {
            recipient: recipient.to_string(),
            ticker: ticker.to_string(),
            threshold,
            current_price,
        });

        if self.reject {
            return Err(NotifyError::NotificationFailed(
                "535 5.7.8 Username and Password not accepted".to_string(),
            ));
        }
        Ok(())
    }
}

/// Captures the raw RFC 5322 text of every delivered message.
#[derive(Clone, Default)]
pub struct CapturingTransport {
    pub delivered: Arc<Mutex<Vec<String>>>,
    pub logins: Arc<Mutex<Vec<String>>>,
    pub reject_auth: bool,
}

impl CapturingTransport {
    pub fn rejecting_auth() -> Self {
        Self {
            reject_auth: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for CapturingTransport {
    async fn deliver(&self, creds: &EmailCredentials, message: Message) -> Result<(), NotifyError> {
        self.logins.lock().unwrap().push(creds.address.clone());

        if self.reject_auth {
            return Err(NotifyError::NotificationFailed(
                "permanent error (535): authentication failed".to_string(),
            ));
        }

        let raw = String::from_utf8_lossy(&message.formatted()).to_string();
        self.delivered.lock().unwrap().push(raw);
        Ok(())
    }
}

pub fn sender() -> EmailCredentials {
    EmailCredentials {
        address: "alerts@example.com".to_string(),
        password: "app-token".to_string(),
    }
}

/// Hands out the same credentials but counts every lookup.
#[derive(Clone, Default)]
pub struct CountingCredentials {
    pub lookups: Arc<AtomicUsize>,
}

impl CountingCredentials {
    pub fn count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl CredentialSource for CountingCredentials {
    fn credentials(&self) -> Result<EmailCredentials, NotifyError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(sender())
    }
}
