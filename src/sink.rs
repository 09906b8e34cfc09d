// Booking sink and notification collaborators
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;

use crate::model::{BookingRecord, ReservationDraft, ReservationStatus, RoomType};
use crate::pricing;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Booking rejected: {0}")]
    Rejected(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Draft incomplete: {0}")]
    IncompleteDraft(String),
}

impl SinkError {
    // Whether the guest can retry without changing the draft.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SinkError::IncompleteDraft(_))
    }
}

// The system of record that persists a finalized reservation. The wizard's
// submit call is the only place this is awaited.
#[async_trait]
pub trait BookingSink: Send + Sync {
    async fn create_booking(&self, draft: &ReservationDraft) -> Result<BookingRecord, SinkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

// Fire-and-forget toast display. No return value is consumed anywhere.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotifyLevel, message: &str);
}

// Routes notifications into the tracing pipeline, one event per toast.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Info => tracing::info!(target: "staymaster::toast", "{message}"),
            NotifyLevel::Success => tracing::info!(target: "staymaster::toast", "{message}"),
            NotifyLevel::Error => tracing::error!(target: "staymaster::toast", "{message}"),
        }
    }
}

// Captures notifications so tests can assert on what the guest would see.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(NotifyLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(NotifyLevel, String)> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.messages.lock().push((level, message.to_string()));
    }
}

// In-memory booking sink. Behaves like the hosted booking API from the
// wizard's point of view: prices the draft against its own rate table,
// generates identifiers, echoes the submitted fields, and can be scripted to
// fail the next N requests.
#[derive(Debug)]
pub struct InMemoryBookingSink {
    rooms: Vec<RoomType>,
    records: Mutex<Vec<BookingRecord>>,
    fail_next: AtomicUsize,
    calls: AtomicUsize,
}

impl Default for InMemoryBookingSink {
    fn default() -> Self {
        Self::with_rooms(crate::catalog::default_room_types())
    }
}

impl InMemoryBookingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rooms(rooms: Vec<RoomType>) -> Self {
        Self {
            rooms,
            records: Mutex::new(Vec::new()),
            fail_next: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    // Make the next `count` create_booking calls fail with a retryable error.
    pub fn fail_next_requests(&self, count: usize) {
        self.fail_next.store(count, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<BookingRecord> {
        self.records.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn build_record(&self, draft: &ReservationDraft) -> Result<BookingRecord, SinkError> {
        let room_type_id = draft
            .stay
            .room_type_id
            .clone()
            .ok_or_else(|| SinkError::IncompleteDraft("no room type selected".to_string()))?;
        let check_in = draft
            .stay
            .check_in
            .ok_or_else(|| SinkError::IncompleteDraft("no check-in date".to_string()))?;
        let check_out = draft
            .stay
            .check_out
            .ok_or_else(|| SinkError::IncompleteDraft("no check-out date".to_string()))?;
        let room = self
            .rooms
            .iter()
            .find(|r| r.id == room_type_id)
            .ok_or_else(|| SinkError::Rejected(format!("unknown room type '{room_type_id}'")))?;
        let summary = pricing::quote(room, check_in, check_out, draft.rooms)
            .ok_or_else(|| SinkError::IncompleteDraft("non-positive stay length".to_string()))?;

        Ok(BookingRecord {
            id: format!("res-{}", rand::random::<u32>()),
            guest: draft.guest.clone(),
            room_type_id,
            check_in_date: check_in,
            check_out_date: check_out,
            nights: summary.nights,
            total_amount: summary.total,
            rooms: draft.rooms,
            special_requests: draft.special_requests.clone(),
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
            check_in_time: None,
            check_out_time: None,
            check_in_details: None,
            feedback: None,
        })
    }
}

#[async_trait]
impl BookingSink for InMemoryBookingSink {
    async fn create_booking(&self, draft: &ReservationDraft) -> Result<BookingRecord, SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.fail_next.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_next.store(remaining - 1, Ordering::SeqCst);
            return Err(SinkError::Rejected(
                "Booking service temporarily unavailable".to_string(),
            ));
        }

        let record = self.build_record(draft)?;
        self.records.lock().push(record.clone());
        Ok(record)
    }
}
