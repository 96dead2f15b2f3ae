use crate::{
    error::{FetchError, NotifyError},
    models::{PriceSample, WatchRequest},
    services::{notifier::AlertSink, price_source::PriceSource},
};

/// Terminal state of one evaluation.
#[derive(Debug)]
pub enum Outcome {
    AlertSent(PriceSample),
    NoAlert(PriceSample),
    FetchError(FetchError),
    SendError(NotifyError),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::FetchError(_) | Outcome::SendError(_))
    }
}

pub struct Monitor<P, N> {
    prices: P,
    notifier: N,
}

impl<P: PriceSource, N: AlertSink> Monitor<P, N> {
    pub fn new(prices: P, notifier: N) -> Self {
        Self { prices, notifier }
    }

    /// Fetch once, compare once, notify at most once.
    pub async fn evaluate(&self, req: &WatchRequest) -> Outcome {
        let ticker = req.ticker();
        let threshold = req.threshold();

        let sample = match self.prices.fetch_latest_price(ticker).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(ticker, transient = e.is_transient(), "error fetching stock data: {e}");
                return Outcome::FetchError(e);
            }
        };

        if !req.is_triggered_by(sample.price) {
            tracing::info!(
                "{} is currently at ${:.2}, not {} the threshold of ${:.2}.",
                ticker,
                sample.price,
                req.mode(),
                threshold
            );
            return Outcome::NoAlert(sample);
        }

        match self
            .notifier
            .send_alert(req.recipient(), ticker, threshold, sample.price)
            .await
        {
            Ok(()) => Outcome::AlertSent(sample),
            Err(e) => {
                tracing::warn!(ticker, recipient = req.recipient(), "error sending email: {e}");
                Outcome::SendError(e)
            }
        }
    }
}
