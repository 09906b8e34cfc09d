// Core data structures shared by the reservation wizard and guest portal
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Reference data describing a bookable room category. Loaded once per session
// from the room catalog and treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomType {
    pub id: String,
    pub name: String,
    pub rate: f64,
    pub capacity: u32,
    pub bed_type: String,
    #[serde(default)]
    pub available: u32,
}

// The guest's chosen room and date range. All fields start empty and are
// filled in as the wizard progresses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StaySelection {
    pub room_type_id: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl StaySelection {
    // True once both dates are present, regardless of their ordering.
    pub fn has_dates(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GuestInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub adults: u32,
    pub children: u32,
}

impl Default for GuestInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            adults: 1,
            children: 0,
        }
    }
}

pub const MAX_ADULTS: u32 = 6;
pub const MIN_ADULTS: u32 = 1;
pub const MAX_CHILDREN: u32 = 4;

impl GuestInfo {
    // Counter-style setters matching the +/- steppers in the booking form:
    // out-of-range values are clamped, never rejected.
    pub fn set_adults(&mut self, adults: u32) {
        self.adults = adults.clamp(MIN_ADULTS, MAX_ADULTS);
    }

    pub fn set_children(&mut self, children: u32) {
        self.children = children.min(MAX_CHILDREN);
    }

    pub fn total_guests(&self) -> u32 {
        self.adults + self.children
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PaymentMethod {
    Card,
    PayAtHotel,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Card
    }
}

impl PaymentMethod {
    pub fn requires_card(self) -> bool {
        matches!(self, PaymentMethod::Card)
    }
}

// Payment stub carried by the draft. Raw card input is kept as typed by the
// guest; shape checks happen at step validation, never here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

// Everything the guest has entered so far. Exists only client-side until
// submission hands it to the booking sink.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReservationDraft {
    pub stay: StaySelection,
    pub guest: GuestInfo,
    pub payment: PaymentDetails,
    pub special_requests: String,
    pub rooms: u32,
    pub agree_to_terms: bool,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            stay: StaySelection::default(),
            guest: GuestInfo::default(),
            payment: PaymentDetails::default(),
            special_requests: String::new(),
            rooms: 1,
            agree_to_terms: false,
        }
    }
}

// Lifecycle of a persisted reservation as the guest portal sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    Confirmed,
    #[serde(rename = "ready-for-checkin")]
    ReadyForCheckIn,
    CheckedIn,
    Completed,
}

// Identification captured during self-service check-in.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CheckInDetails {
    pub identification_method: IdentificationMethod,
    pub identification_number: String,
    pub credit_card_last4: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum IdentificationMethod {
    DriverLicense,
    Passport,
    IdCard,
}

// Feedback captured during check-out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StayFeedback {
    pub rating: u8,
    pub comment: String,
}

// What the booking sink returns: a generated identifier plus the submitted
// fields echoed back, ready to be tracked through check-in and check-out.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingRecord {
    pub id: String,
    pub guest: GuestInfo,
    pub room_type_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: i64,
    pub total_amount: f64,
    pub rooms: u32,
    pub special_requests: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub check_in_details: Option<CheckInDetails>,
    pub feedback: Option<StayFeedback>,
}
