//! Records of past runs. A request run produces one [`HistoryRequest`]; a
//! subscription produces one [`HistorySubscription`] that grows as messages
//! arrive.

mod history_record;
mod history_store;

pub use history_record::HistoryRecord;
pub use history_record::HistoryRequest;
pub use history_record::HistorySubscription;
pub use history_record::SubscriptionResponse;
pub use history_store::HistoryStore;

#[cfg(test)]
mod tests;
