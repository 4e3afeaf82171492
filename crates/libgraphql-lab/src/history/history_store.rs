use crate::history::HistoryRecord;
use crate::history::SubscriptionResponse;
use parking_lot::RwLock;
use std::sync::Arc;
use time::Date;
use time::Duration;
use time::OffsetDateTime;
use time::UtcOffset;
use uuid::Uuid;

/// The session's run history, shared between the runner (which writes it)
/// and whoever displays it. Cloning gives another handle on the same store.
///
/// Records are never edited in place, with one exception: subscription
/// records receive their messages through
/// [`append_response`](Self::append_response).
#[derive(Clone, Debug, Default)]
pub struct HistoryStore {
    inner: Arc<RwLock<HistoryState>>,
}
impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        let last_timestamp = records.iter().map(HistoryRecord::created_at).max();
        Self {
            inner: Arc::new(RwLock::new(HistoryState {
                records,
                last_timestamp,
            })),
        }
    }

    /// A capture time for a new record or message. Successive calls on one
    /// store return strictly increasing times, even when the clock does
    /// not advance between them.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.inner.write().next_timestamp()
    }

    pub fn add(&self, record: HistoryRecord) -> Uuid {
        let id = record.id();
        self.inner.write().records.push(record);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<HistoryRecord> {
        self.inner.read().records.iter().find(|record| record.id() == id).cloned()
    }

    pub fn list(&self) -> Vec<HistoryRecord> {
        self.inner.read().records.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    /// Appends a message to the subscription record `id`. Does nothing (and
    /// returns `None`) when `id` is unknown or names a request record.
    pub fn append_response(&self, id: Uuid, data: String) -> Option<SubscriptionResponse> {
        let mut state = self.inner.write();
        let index = state.records.iter().position(|record| {
            record.id() == id && matches!(record, HistoryRecord::Subscription(_))
        })?;

        let response = SubscriptionResponse {
            created_at: state.next_timestamp(),
            data,
        };
        if let HistoryRecord::Subscription(sub) = &mut state.records[index] {
            sub.responses.push(response.clone());
        }
        Some(response)
    }

    pub fn remove(&self, id: Uuid) -> Option<HistoryRecord> {
        let mut state = self.inner.write();
        let index = state.records.iter().position(|record| record.id() == id)?;
        Some(state.records.remove(index))
    }

    /// Removes every record, returning them.
    pub fn clear(&self) -> Vec<HistoryRecord> {
        std::mem::take(&mut self.inner.write().records)
    }

    /// Removes the records created on `day` (UTC), returning them.
    pub fn remove_by_day(&self, day: Date) -> Vec<HistoryRecord> {
        let mut state = self.inner.write();
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.records)
            .into_iter()
            .partition(|record| record.created_at().to_offset(UtcOffset::UTC).date() == day);
        state.records = kept;
        removed
    }
}

#[derive(Debug, Default)]
struct HistoryState {
    records: Vec<HistoryRecord>,
    last_timestamp: Option<OffsetDateTime>,
}
impl HistoryState {
    fn next_timestamp(&mut self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }
}
