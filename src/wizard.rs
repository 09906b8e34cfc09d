// Multi-step reservation wizard: step progression, validation, submission
use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use crate::catalog::RoomCatalog;
use crate::model::{ReservationDraft, RoomType};
use crate::pricing::{self, PricingSummary};
use crate::sink::{BookingSink, Notifier, NotifyLevel, SinkError};

pub const STEP_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    RoomSelection,
    Dates,
    GuestDetails,
    Payment,
    Review,
}

impl WizardStep {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            1 => Some(WizardStep::RoomSelection),
            2 => Some(WizardStep::Dates),
            3 => Some(WizardStep::GuestDetails),
            4 => Some(WizardStep::Payment),
            5 => Some(WizardStep::Review),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            WizardStep::RoomSelection => 1,
            WizardStep::Dates => 2,
            WizardStep::GuestDetails => 3,
            WizardStep::Payment => 4,
            WizardStep::Review => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::RoomSelection => "Select Room",
            WizardStep::Dates => "Choose Dates",
            WizardStep::GuestDetails => "Guest Details",
            WizardStep::Payment => "Payment",
            WizardStep::Review => "Review & Confirm",
        }
    }
}

// Field name -> inline message. Validation problems are data, never errors.
pub type FieldErrors = BTreeMap<&'static str, String>;

// One required-field predicate in the step schema. Returning Some(message)
// adds an entry to the error map under `field`.
struct FieldRule {
    field: &'static str,
    check: fn(&ReservationDraft, NaiveDate) -> Option<String>,
}

const ROOM_SELECTION_RULES: &[FieldRule] = &[FieldRule {
    field: "room_type",
    check: |draft, _| match draft.stay.room_type_id.as_deref() {
        Some(id) if !id.is_empty() => None,
        _ => Some("Please select a room type".to_string()),
    },
}];

const DATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "dates",
        check: |draft, _| {
            if draft.stay.has_dates() {
                None
            } else {
                Some("Please select both check-in and check-out dates".to_string())
            }
        },
    },
    FieldRule {
        field: "check_out_date",
        check: |draft, _| match (draft.stay.check_in, draft.stay.check_out) {
            (Some(check_in), Some(check_out)) if check_out <= check_in => {
                Some("Check-out must be after check-in".to_string())
            }
            _ => None,
        },
    },
    FieldRule {
        field: "check_in_date",
        check: |draft, today| match draft.stay.check_in {
            Some(check_in) if check_in < today => {
                Some("Check-in date cannot be in the past".to_string())
            }
            _ => None,
        },
    },
];

const GUEST_RULES: &[FieldRule] = &[
    FieldRule {
        field: "guest_name",
        check: |draft, _| {
            if draft.guest.name.trim().is_empty() {
                Some("Guest name is required".to_string())
            } else {
                None
            }
        },
    },
    FieldRule {
        field: "email",
        check: |draft, _| {
            let email = draft.guest.email.trim();
            if email.is_empty() {
                Some("Email is required".to_string())
            } else if !email_looks_valid(email) {
                Some("Email address is invalid".to_string())
            } else {
                None
            }
        },
    },
    FieldRule {
        field: "phone",
        check: |draft, _| {
            if draft.guest.phone.trim().is_empty() {
                Some("Phone number is required".to_string())
            } else {
                None
            }
        },
    },
];

const PAYMENT_RULES: &[FieldRule] = &[
    FieldRule {
        field: "card_number",
        check: |draft, _| {
            if !draft.payment.method.requires_card() {
                return None;
            }
            let digits = draft
                .payment
                .card_number
                .chars()
                .filter(|c| c.is_ascii_digit())
                .count();
            if digits == 16 {
                None
            } else {
                Some("Card number must be 16 digits".to_string())
            }
        },
    },
    FieldRule {
        field: "card_expiry",
        check: |draft, _| {
            if draft.payment.method.requires_card() && draft.payment.expiry.trim().is_empty() {
                Some("Expiry date is required".to_string())
            } else {
                None
            }
        },
    },
    FieldRule {
        field: "card_cvv",
        check: |draft, _| {
            if draft.payment.method.requires_card() && draft.payment.cvv.trim().is_empty() {
                Some("CVV is required".to_string())
            } else {
                None
            }
        },
    },
];

const REVIEW_RULES: &[FieldRule] = &[FieldRule {
    field: "agree_to_terms",
    check: |draft, _| {
        if draft.agree_to_terms {
            None
        } else {
            Some("You must agree to the terms and conditions".to_string())
        }
    },
}];

fn rules_for(step: WizardStep) -> &'static [FieldRule] {
    match step {
        WizardStep::RoomSelection => ROOM_SELECTION_RULES,
        WizardStep::Dates => DATE_RULES,
        WizardStep::GuestDetails => GUEST_RULES,
        WizardStep::Payment => PAYMENT_RULES,
        WizardStep::Review => REVIEW_RULES,
    }
}

// Run one step's schema against the draft.
pub fn validate_step(step: WizardStep, draft: &ReservationDraft, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in rules_for(step) {
        if let Some(message) = (rule.check)(draft, today) {
            errors.insert(rule.field, message);
        }
    }
    errors
}

// Approximation of the `\S+@\S+\.\S+` check the booking form applies.
fn email_looks_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    // Booking accepted; the wizard has reset to a fresh draft at step 1.
    Booked(crate::model::BookingRecord),
    // Re-validation found problems; see the error map.
    InvalidFields,
    // submit() is only valid from the review step.
    NotOnFinalStep,
    // A submission is already in flight; this call did nothing.
    AlreadyInFlight,
    // The sink rejected the booking; draft preserved for retry.
    Failed(SinkError),
}

// Owns the draft, the current step, and the error map for one reservation
// session. All transitions run synchronously on the calling event; only
// submit() crosses the async boundary into the booking sink.
pub struct ReservationWizard {
    rooms: Vec<RoomType>,
    draft: ReservationDraft,
    current_step: usize,
    errors: FieldErrors,
    submission_in_progress: bool,
    today: NaiveDate,
}

impl ReservationWizard {
    pub fn new(rooms: Vec<RoomType>) -> Self {
        Self::with_today(rooms, Utc::now().date_naive())
    }

    // Injectable clock for deterministic date validation.
    pub fn with_today(rooms: Vec<RoomType>, today: NaiveDate) -> Self {
        Self {
            rooms,
            draft: ReservationDraft::default(),
            current_step: 1,
            errors: FieldErrors::new(),
            submission_in_progress: false,
            today,
        }
    }

    // Mount against a catalog. An unavailable catalog degrades to an empty
    // room list; the wizard stays alive and reports the empty state instead
    // of failing construction.
    pub async fn mount(catalog: &dyn RoomCatalog) -> Self {
        match catalog.list_room_types().await {
            Ok(rooms) => Self::new(rooms),
            Err(e) => {
                tracing::error!(error = %e, "room catalog unavailable at mount");
                Self::new(Vec::new())
            }
        }
    }

    pub fn room_types(&self) -> &[RoomType] {
        &self.rooms
    }

    // Static empty-state copy shown when there is nothing to sell.
    pub fn empty_state_message(&self) -> Option<&'static str> {
        if self.rooms.is_empty() {
            Some("Room information is currently unavailable. Please contact the front desk.")
        } else {
            None
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step(&self) -> WizardStep {
        // current_step is maintained within 1..=STEP_COUNT by every transition
        WizardStep::from_index(self.current_step).unwrap_or(WizardStep::RoomSelection)
    }

    pub fn progress_percent(&self) -> u32 {
        (self.current_step * 100 / STEP_COUNT) as u32
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submission_in_progress(&self) -> bool {
        self.submission_in_progress
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ReservationDraft {
        &mut self.draft
    }

    // The booking form clears a field's inline error as soon as the guest
    // edits that field.
    pub fn clear_error(&mut self, field: &str) {
        self.errors.retain(|k, _| *k != field);
    }

    pub fn selected_room(&self) -> Option<&RoomType> {
        let id = self.draft.stay.room_type_id.as_deref()?;
        self.rooms.iter().find(|r| r.id == id)
    }

    // Derived pricing, recomputed on every read so it can never go stale.
    pub fn pricing_summary(&self) -> Option<PricingSummary> {
        let room = self.selected_room()?;
        let check_in = self.draft.stay.check_in?;
        let check_out = self.draft.stay.check_out?;
        pricing::quote(room, check_in, check_out, self.draft.rooms)
    }

    // Validate the current step and move forward on success. No partial
    // advancement: a failed step leaves the index untouched and fills the
    // error map.
    pub fn advance(&mut self) -> bool {
        if self.current_step >= STEP_COUNT {
            return false;
        }

        let errors = validate_step(self.step(), &self.draft, self.today);
        if !errors.is_empty() {
            tracing::debug!(
                step = self.current_step,
                error_count = errors.len(),
                "step validation failed"
            );
            self.errors = errors;
            return false;
        }

        self.errors.clear();
        self.current_step += 1;
        tracing::debug!(
            step = self.current_step,
            progress = self.progress_percent(),
            "advanced to next step"
        );
        true
    }

    // Move back one step without re-validating. No-op at step 1.
    pub fn retreat(&mut self) -> bool {
        if self.current_step <= 1 {
            return false;
        }
        self.current_step -= 1;
        true
    }

    // Direct navigation. A guest may revisit anything already reached but
    // may not skip ahead: the target must satisfy `i <= max(current, 2)`.
    pub fn jump_to(&mut self, target: usize) -> bool {
        let limit = self.current_step.max(2);
        if target < 1 || target > STEP_COUNT || target > limit {
            tracing::warn!(requested = target, current = self.current_step, "rejected step jump");
            return false;
        }
        self.current_step = target;
        true
    }

    // Submit the finished draft to the booking sink. Only valid from the
    // review step; every step is re-validated first. Re-entrant calls while
    // a submission is in flight are ignored.
    pub async fn submit(
        &mut self,
        sink: &dyn BookingSink,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        if self.submission_in_progress {
            return SubmitOutcome::AlreadyInFlight;
        }
        if self.current_step != STEP_COUNT {
            tracing::warn!(step = self.current_step, "submit attempted before review step");
            return SubmitOutcome::NotOnFinalStep;
        }

        let mut errors = FieldErrors::new();
        for index in 1..=STEP_COUNT {
            if let Some(step) = WizardStep::from_index(index) {
                errors.extend(validate_step(step, &self.draft, self.today));
            }
        }
        if !errors.is_empty() {
            tracing::warn!(error_count = errors.len(), "submit blocked by validation");
            self.errors = errors;
            notifier.notify(NotifyLevel::Error, "Please correct the errors in the form");
            return SubmitOutcome::InvalidFields;
        }

        self.submission_in_progress = true;
        let result = sink.create_booking(&self.draft).await;
        self.submission_in_progress = false;

        match result {
            Ok(record) => {
                tracing::debug!(booking_id = %record.id, "reservation created");
                notifier.notify(NotifyLevel::Success, "Reservation created successfully!");
                self.draft = ReservationDraft::default();
                self.current_step = 1;
                self.errors.clear();
                SubmitOutcome::Booked(record)
            }
            Err(e) => {
                tracing::error!(error = %e, "booking sink rejected submission");
                notifier.notify(
                    NotifyLevel::Error,
                    &format!("Failed to create reservation: {e}"),
                );
                SubmitOutcome::Failed(e)
            }
        }
    }
}
