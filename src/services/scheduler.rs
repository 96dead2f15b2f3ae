use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time};

use crate::{
    models::WatchRequest,
    services::{
        monitor::{Monitor, Outcome},
        notifier::AlertSink,
        price_source::PriceSource,
    },
};

/// Re-runs one independent evaluation every `every`, starting immediately.
/// Stops after the first sent alert so the recipient is not mailed every tick.
pub fn spawn_watch<P, N>(
    monitor: Arc<Monitor<P, N>>,
    req: WatchRequest,
    every: Duration,
) -> JoinHandle<()>
where
    P: PriceSource + 'static,
    N: AlertSink + 'static,
{
    tokio::spawn(async move {
        let mut interval = time::interval(every);

        loop {
            interval.tick().await;

            match monitor.evaluate(&req).await {
                Outcome::AlertSent(sample) => {
                    tracing::info!(ticker = req.ticker(), price = sample.price, "[watch] alert sent, stopping");
                    break;
                }
                Outcome::NoAlert(_) => {}
                Outcome::FetchError(e) => {
                    tracing::warn!(ticker = req.ticker(), "[watch] tick error: {e}");
                }
                Outcome::SendError(e) => {
                    tracing::warn!(ticker = req.ticker(), "[watch] tick error: {e}");
                }
            }
        }
    })
}
