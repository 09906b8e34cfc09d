// Front-desk dashboard figures derived from room and reservation state
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{BookingRecord, ReservationStatus};

// Operational state of one physical room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Reserved,
    Cleaning,
    Maintenance,
}

// A physical room as housekeeping tracks it, distinct from the RoomType
// reference data the booking flow sells.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Room {
    pub number: String,
    pub room_type_id: String,
    pub status: RoomStatus,
    pub guest: Option<String>,
    pub last_cleaned: Option<DateTime<Utc>>,
    pub cleaning_staff: Option<String>,
    pub maintenance_issue: Option<String>,
}

impl Room {
    pub fn new(number: &str, room_type_id: &str, status: RoomStatus) -> Self {
        Self {
            number: number.to_string(),
            room_type_id: room_type_id.to_string(),
            status,
            guest: None,
            last_cleaned: None,
            cleaning_staff: None,
            maintenance_issue: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HotelStats {
    pub occupancy_rate: f64,
    pub available_rooms: usize,
    pub reserved_rooms: usize,
    pub today_arrivals: usize,
    pub today_departures: usize,
    pub pending_maintenance: usize,
}

// Pure snapshot computation. Arrivals are reservations starting today that
// have not checked in yet; departures are checked-in stays ending today.
pub fn compute_stats(rooms: &[Room], reservations: &[BookingRecord], today: NaiveDate) -> HotelStats {
    let occupied = rooms
        .iter()
        .filter(|r| r.status == RoomStatus::Occupied)
        .count();
    let occupancy_rate = if rooms.is_empty() {
        0.0
    } else {
        occupied as f64 / rooms.len() as f64 * 100.0
    };

    let today_arrivals = reservations
        .iter()
        .filter(|r| {
            r.check_in_date == today
                && matches!(
                    r.status,
                    ReservationStatus::Confirmed | ReservationStatus::ReadyForCheckIn
                )
        })
        .count();
    let today_departures = reservations
        .iter()
        .filter(|r| r.check_out_date == today && r.status == ReservationStatus::CheckedIn)
        .count();

    HotelStats {
        occupancy_rate,
        available_rooms: rooms
            .iter()
            .filter(|r| r.status == RoomStatus::Available)
            .count(),
        reserved_rooms: rooms
            .iter()
            .filter(|r| r.status == RoomStatus::Reserved)
            .count(),
        today_arrivals,
        today_departures,
        pending_maintenance: rooms
            .iter()
            .filter(|r| r.status == RoomStatus::Maintenance)
            .count(),
    }
}
