// Main library file for the StayMaster reservation core

// Export one module per concern of the booking flow
pub mod catalog;
pub mod format;
pub mod model;
pub mod portal;
pub mod pricing;
pub mod sink;
pub mod stats;
pub mod wizard;

// Re-export key types for convenience
pub use catalog::{CatalogError, RoomCatalog, SessionCatalog, StaticRoomCatalog};
pub use model::{
    BookingRecord, GuestInfo, PaymentDetails, PaymentMethod, ReservationDraft, ReservationStatus,
    RoomType, StaySelection,
};
pub use portal::{BookingFilter, CheckInRequest, CheckOutRequest, PortalError, ReservationLedger};
pub use pricing::{night_count, quote, PricingSummary};
pub use sink::{
    BookingSink, InMemoryBookingSink, Notifier, NotifyLevel, RecordingNotifier, SinkError,
    TracingNotifier,
};
pub use stats::{compute_stats, HotelStats, Room, RoomStatus};
pub use wizard::{FieldErrors, ReservationWizard, SubmitOutcome, WizardStep};
