// Guest self-service portal: check-in/check-out flows over a reservation store
use chrono::Utc;
use dashmap::DashMap;
use thiserror::Error;

use crate::model::{
    BookingRecord, CheckInDetails, IdentificationMethod, ReservationStatus, StayFeedback,
};
use crate::wizard::FieldErrors;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Reservation {0} not found")]
    NotFound(String),

    #[error("Reservation {id} cannot {action} while {status:?}")]
    InvalidStatus {
        id: String,
        action: &'static str,
        status: ReservationStatus,
    },

    #[error("Form has {} invalid field(s)", .0.len())]
    Validation(FieldErrors),
}

// What the guest fills in at the check-in kiosk.
#[derive(Debug, Clone)]
pub struct CheckInRequest {
    pub identification_method: IdentificationMethod,
    pub identification_number: String,
    pub credit_card_last4: String,
    pub signature: bool,
    pub agree_to_terms: bool,
}

impl CheckInRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.identification_number.trim().is_empty() {
            errors.insert(
                "identification_number",
                "Identification number is required".to_string(),
            );
        }

        if self.credit_card_last4.is_empty() {
            errors.insert(
                "credit_card_last4",
                "Credit card information is required".to_string(),
            );
        } else if self.credit_card_last4.len() != 4
            || !self.credit_card_last4.chars().all(|c| c.is_ascii_digit())
        {
            errors.insert(
                "credit_card_last4",
                "Please enter the last 4 digits of your credit card".to_string(),
            );
        }

        if !self.signature {
            errors.insert("signature", "Signature is required".to_string());
        }

        if !self.agree_to_terms {
            errors.insert(
                "agree_to_terms",
                "You must agree to the terms and conditions".to_string(),
            );
        }

        errors
    }
}

// Feedback form shown at check-out. The comment is optional.
#[derive(Debug, Clone)]
pub struct CheckOutRequest {
    pub feedback_rating: u8,
    pub feedback_comment: String,
}

impl CheckOutRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.feedback_rating < 1 || self.feedback_rating > 5 {
            errors.insert("feedback_rating", "Please provide a rating".to_string());
        }
        errors
    }
}

// Filters matching the tabs on the bookings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    All,
    Active,
    Upcoming,
    Completed,
}

impl BookingFilter {
    fn matches(self, status: ReservationStatus) -> bool {
        match self {
            BookingFilter::All => true,
            BookingFilter::Active => status == ReservationStatus::CheckedIn,
            BookingFilter::Upcoming => matches!(
                status,
                ReservationStatus::Confirmed | ReservationStatus::ReadyForCheckIn
            ),
            BookingFilter::Completed => status == ReservationStatus::Completed,
        }
    }
}

// Concurrent in-memory store of reservations keyed by id. Stands in for the
// hosted reservation table; shared freely between the front desk and the
// guest portal.
#[derive(Debug, Default)]
pub struct ReservationLedger {
    records: DashMap<String, BookingRecord>,
}

impl ReservationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: BookingRecord) {
        self.records.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<BookingRecord> {
        self.records.get(id).map(|r| r.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // All reservations for one guest, newest stay first.
    pub fn reservations_for_guest(&self, email: &str) -> Vec<BookingRecord> {
        let mut found: Vec<BookingRecord> = self
            .records
            .iter()
            .filter(|r| r.guest.email == email)
            .map(|r| r.clone())
            .collect();
        found.sort_by(|a, b| b.check_in_date.cmp(&a.check_in_date));
        found
    }

    pub fn filtered(&self, filter: BookingFilter) -> Vec<BookingRecord> {
        let mut found: Vec<BookingRecord> = self
            .records
            .iter()
            .filter(|r| filter.matches(r.status))
            .map(|r| r.clone())
            .collect();
        found.sort_by(|a, b| b.check_in_date.cmp(&a.check_in_date));
        found
    }

    // Complete check-in: validates the kiosk form, requires a reservation
    // that is confirmed or ready, stamps the check-in time.
    pub fn check_in(&self, id: &str, request: &CheckInRequest) -> Result<BookingRecord, PortalError> {
        let errors = request.validate();
        if !errors.is_empty() {
            return Err(PortalError::Validation(errors));
        }

        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| PortalError::NotFound(id.to_string()))?;

        match record.status {
            ReservationStatus::Confirmed | ReservationStatus::ReadyForCheckIn => {}
            status => {
                return Err(PortalError::InvalidStatus {
                    id: id.to_string(),
                    action: "check in",
                    status,
                })
            }
        }

        record.status = ReservationStatus::CheckedIn;
        record.check_in_time = Some(Utc::now());
        record.check_in_details = Some(CheckInDetails {
            identification_method: request.identification_method,
            identification_number: request.identification_number.clone(),
            credit_card_last4: request.credit_card_last4.clone(),
        });
        tracing::debug!(reservation = %record.id, "guest checked in");
        Ok(record.clone())
    }

    // Complete check-out: requires a checked-in reservation, stores the
    // feedback, stamps the check-out time.
    pub fn check_out(
        &self,
        id: &str,
        request: &CheckOutRequest,
    ) -> Result<BookingRecord, PortalError> {
        let errors = request.validate();
        if !errors.is_empty() {
            return Err(PortalError::Validation(errors));
        }

        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| PortalError::NotFound(id.to_string()))?;

        if record.status != ReservationStatus::CheckedIn {
            return Err(PortalError::InvalidStatus {
                id: id.to_string(),
                action: "check out",
                status: record.status,
            });
        }

        record.status = ReservationStatus::Completed;
        record.check_out_time = Some(Utc::now());
        record.feedback = Some(StayFeedback {
            rating: request.feedback_rating,
            comment: request.feedback_comment.clone(),
        });
        tracing::debug!(reservation = %record.id, "guest checked out");
        Ok(record.clone())
    }
}
