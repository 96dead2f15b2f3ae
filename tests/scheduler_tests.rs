mod common;

use std::{sync::Arc, time::Duration};

use common::{Quote, RecordingSink, ScriptedPrices};
use stockalert::{
    Monitor,
    models::{ComparisonMode, WatchRequest},
    services::scheduler,
};

#[tokio::test]
async fn watch_keeps_polling_until_alert_is_sent() {
    let prices = ScriptedPrices::new(&[
        Quote::Price(99.0),
        Quote::Outage,
        Quote::Price(100.5),
    ]);
    let calls = prices.calls.clone();
    let sink = RecordingSink::default();
    let monitor = Arc::new(Monitor::new(prices, sink.clone()));
    let req = WatchRequest::new("trader@example.com", "NVDA", 100.0, ComparisonMode::Above).unwrap();

    let handle = scheduler::spawn_watch(monitor, req, Duration::from_millis(10));

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("watch finishes")
        .expect("watch task does not panic");

    assert_eq!(calls.lock().unwrap().len(), 3);
    assert_eq!(sink.count(), 1);
    assert_eq!(sink.sent.lock().unwrap()[0].current_price, 100.5);
}
