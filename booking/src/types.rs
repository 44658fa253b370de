//! Domain types for the Box Office booking engine.
//!
//! Value objects shared by the catalog, the seat grids, the pending queue and
//! the booking reducer. Seat coordinates are 0-based internally and always
//! rendered 1-based.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Catalog
// ============================================================================

/// A movie in the catalog. The title is its unique key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movie {
    /// Title (unique, compared case-sensitively)
    pub title: String,
    /// Running time in minutes
    pub duration_minutes: u32,
    /// Genre label
    pub genre: String,
}

impl Movie {
    /// Creates a new `Movie`
    #[must_use]
    pub fn new(title: impl Into<String>, duration_minutes: u32, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration_minutes,
            genre: genre.into(),
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} min, {})",
            self.title, self.duration_minutes, self.genre
        )
    }
}

// ============================================================================
// Seats
// ============================================================================

/// Position of a seat in a theater grid (0-based).
///
/// `Display` renders the 1-based `row,col` form shown to customers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatCoord {
    /// Row index, 0-based
    pub row: usize,
    /// Column index, 0-based
    pub col: usize,
}

impl SeatCoord {
    /// Creates a new `SeatCoord` from 0-based indices
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for SeatCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for SeatCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row + 1, self.col + 1)
    }
}

/// Occupancy of a single seat for one movie.
///
/// There is no transition back from `Booked`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatState {
    /// Free to book
    #[default]
    Available,
    /// Taken
    Booked,
}

impl fmt::Display for SeatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Booked => write!(f, "Booked"),
        }
    }
}

/// Render seats as 1-based `row,col` pairs separated by `", "`.
///
/// ```
/// use boxoffice::types::{format_seat_numbers, SeatCoord};
///
/// let seats = [SeatCoord::new(0, 0), SeatCoord::new(0, 1)];
/// assert_eq!(format_seat_numbers(&seats), "1,1, 1,2");
/// ```
#[must_use]
pub fn format_seat_numbers(seats: &[SeatCoord]) -> String {
    seats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Bookings
// ============================================================================

/// Returned to the caller when a booking is committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Customer who booked
    pub customer_name: String,
    /// Movie booked
    pub movie_title: String,
    /// Theater booked
    pub theater_name: String,
    /// Seats in request order
    pub seats: Vec<SeatCoord>,
    /// When the seats were committed
    pub booked_at: DateTime<Utc>,
}

impl BookingConfirmation {
    /// 1-based `row,col` labels of the booked seats
    #[must_use]
    pub fn seat_labels(&self) -> Vec<String> {
        self.seats.iter().map(ToString::to_string).collect()
    }

    /// The queue entry that settles this booking
    #[must_use]
    pub fn to_pending_record(&self) -> PendingRecord {
        PendingRecord {
            customer_name: self.customer_name.clone(),
            movie_title: self.movie_title.clone(),
            theater_name: self.theater_name.clone(),
            seats: self.seats.clone(),
            accepted_at: self.booked_at,
        }
    }
}

impl fmt::Display for BookingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Seats {} successfully booked for {}.",
            format_seat_numbers(&self.seats),
            self.customer_name
        )
    }
}

/// An accepted booking waiting for settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRecord {
    /// Customer who booked
    pub customer_name: String,
    /// Movie booked
    pub movie_title: String,
    /// Theater booked
    pub theater_name: String,
    /// Seats in request order
    pub seats: Vec<SeatCoord>,
    /// When the booking was accepted
    pub accepted_at: DateTime<Utc>,
}

impl PendingRecord {
    /// Report line for this record, e.g. `Alice booked 1,1, 1,2 for movie Inception`
    #[must_use]
    pub fn settlement_line(&self) -> String {
        format!(
            "{} booked {} for movie {}",
            self.customer_name,
            format_seat_numbers(&self.seats),
            self.movie_title
        )
    }
}

/// Outcome of draining the pending queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    /// One line per settled booking, in submission order
    Completed(Vec<String>),
    /// The queue was already empty
    NoBookings,
}

impl Settlement {
    /// Build a settlement from report lines; no lines means `NoBookings`
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            Self::NoBookings
        } else {
            Self::Completed(lines)
        }
    }

    /// Report lines (empty for `NoBookings`)
    #[must_use]
    pub fn lines(&self) -> &[String] {
        match self {
            Self::Completed(lines) => lines,
            Self::NoBookings => &[],
        }
    }

    /// Returns true if nothing was settled
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::NoBookings)
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(lines) => {
                write!(f, "Booking process completed:\n{}", lines.join("\n"))
            }
            Self::NoBookings => write!(f, "There are no bookings to process."),
        }
    }
}
