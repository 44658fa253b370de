//! Box Office - an in-memory movie-ticket reservation engine
//!
//! Built on the reducer architecture from `boxoffice-core`. It covers:
//!
//! - **Catalog**: an unbalanced binary search tree of movies keyed by title
//! - **Seat grids**: one occupancy grid per (theater, movie) pair with
//!   all-or-nothing multi-seat booking
//! - **Pending queue**: accepted bookings waiting for settlement, first in first out
//! - **Booking service**: validation, seat commitment, queueing and settlement
//!
//! # Architecture
//!
//! ```text
//!   submit_booking ──► BookingReducer ──► CatalogIndex::search
//!                          │          └─► Theater ─► SeatGrid (validate, commit)
//!                          │
//!                          └─ Dispatch(QueueBooking) ─► PendingQueue
//!
//!   settle_all ──► BookingReducer ──► drain PendingQueue ──► Settlement
//! ```
//!
//! ## All-or-nothing booking
//!
//! ```text
//! for each requested seat: if Booked → reject, nothing written
//! for each requested seat: mark Booked
//! ```
//!
//! Seats never go back to `Available`; there is no cancellation.
//!
//! ## Grid snapshots
//!
//! A theater allocates grids for the movies registered when it opens. Booking
//! a movie registered afterwards at that theater fails with
//! [`BookingError::InconsistentState`].
//!
//! # Usage
//!
//! See [`BookingService`] for the entry point.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod pending_queue;
pub mod reducer;
pub mod seat_grid;
pub mod service;
pub mod theater;
pub mod types;

pub use catalog::CatalogIndex;
pub use config::Config;
pub use error::{BookingError, ErrorKind};
pub use pending_queue::PendingQueue;
pub use reducer::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
pub use seat_grid::SeatGrid;
pub use service::BookingService;
pub use theater::Theater;
pub use types::*;
