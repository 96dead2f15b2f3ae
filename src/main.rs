use std::{process::ExitCode, sync::Arc};

use tracing_subscriber::EnvFilter;

use stockalert::{
    Monitor, Outcome, config,
    services::{
        notifier::{EnvCredentials, Notifier, SmtpRelay},
        scheduler,
        yahoo::YahooClient,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    let settings = config::load();
    let watch = match config::load_watch() {
        Ok(w) => w,
        Err(e) => {
            tracing::error!("invalid watch configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let prices = YahooClient::new(settings.market_data_url.clone());
    let notifier = Notifier::new(EnvCredentials, SmtpRelay::new(settings.smtp.clone()))
        .with_sender_name(settings.sender_name.clone());
    let monitor = Monitor::new(prices, notifier);

    tracing::info!(
        "Monitoring {} for price {} ${:.2}.",
        watch.request.ticker(),
        watch.request.mode(),
        watch.request.threshold()
    );

    if let Some(every) = watch.interval {
        let handle = scheduler::spawn_watch(Arc::new(monitor), watch.request, every);
        return match handle.await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("watch task failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match monitor.evaluate(&watch.request).await {
        Outcome::AlertSent(_) | Outcome::NoAlert(_) => ExitCode::SUCCESS,
        Outcome::FetchError(_) | Outcome::SendError(_) => ExitCode::FAILURE,
    }
}
