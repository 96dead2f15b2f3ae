pub mod watch;
pub mod price;
pub mod alert;

pub use watch::{ComparisonMode, WatchRequest};
pub use price::PriceSample;
pub use alert::AlertMessage;
