//! Error types for booking operations.

use crate::types::{SeatCoord, format_seat_numbers};
use boxoffice_core::store::StoreError;
use thiserror::Error;

/// Errors returned by the booking engine.
///
/// Every variant except [`BookingError::InconsistentState`] and
/// [`BookingError::Store`] is reported before any seat or queue state
/// changes, so the caller can correct the request and retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Missing customer name, missing selection or no seats.
    #[error("Input error: {reason}")]
    InputError {
        /// What was wrong with the request
        reason: String,
    },

    /// The movie or theater does not exist.
    #[error("Selection error: {reason}")]
    SelectionError {
        /// What could not be resolved
        reason: String,
    },

    /// One or more requested seats are already booked.
    #[error(
        "Seats {} are already booked for {movie_title} at {theater_name}",
        format_seat_numbers(.seats)
    )]
    BookingConflict {
        /// Movie requested
        movie_title: String,
        /// Theater requested
        theater_name: String,
        /// Requested seats that were already taken
        seats: Vec<SeatCoord>,
    },

    /// Seat coordinate outside the grid (0-based in the message).
    #[error("Seat (row {row}, col {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Grid rows
        rows: usize,
        /// Grid columns
        cols: usize,
    },

    /// The theater has no seat grid for a catalog movie.
    ///
    /// Theaters allocate grids for the movies known when they open; a movie
    /// added later cannot be booked there.
    #[error("Theater {theater_name} has no seat grid for movie {movie_title}")]
    InconsistentState {
        /// Theater addressed
        theater_name: String,
        /// Movie without a grid
        movie_title: String,
    },

    /// The store refused to run the booking's follow-up actions.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coarse classification of a [`BookingError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`BookingError::InputError`]
    Input,
    /// See [`BookingError::SelectionError`]
    Selection,
    /// See [`BookingError::BookingConflict`]
    Conflict,
    /// See [`BookingError::OutOfBounds`]
    OutOfBounds,
    /// See [`BookingError::InconsistentState`]
    InconsistentState,
    /// See [`BookingError::Store`]
    Internal,
}

impl BookingError {
    /// Shorthand for [`BookingError::InputError`]
    #[must_use]
    pub fn input(reason: impl Into<String>) -> Self {
        Self::InputError {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`BookingError::SelectionError`]
    #[must_use]
    pub fn selection(reason: impl Into<String>) -> Self {
        Self::SelectionError {
            reason: reason.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InputError { .. } => ErrorKind::Input,
            Self::SelectionError { .. } => ErrorKind::Selection,
            Self::BookingConflict { .. } => ErrorKind::Conflict,
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::InconsistentState { .. } => ErrorKind::InconsistentState,
            Self::Store(_) => ErrorKind::Internal,
        }
    }

    /// Returns true if the caller can fix the request and try again
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InconsistentState { .. } | Self::Store(_))
    }
}

/// Result alias for booking operations
pub type Result<T> = std::result::Result<T, BookingError>;
