pub mod price_source;
pub mod yahoo;
pub mod notifier;
pub mod monitor;
pub mod scheduler;
