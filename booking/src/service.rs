//! Booking service: the library surface a presentation shell calls into.
//!
//! Wraps a [`Store`] running the [`BookingReducer`] and turns the per-action
//! results the reducer leaves in state into return values.

use crate::error::{BookingError, Result};
use crate::reducer::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
use crate::theater::Theater;
use crate::types::{BookingConfirmation, Movie, SeatCoord, Settlement};
use boxoffice_core::store::Store;
use tracing::error;

type BookingStore = Store<BookingState, BookingAction, BookingEnvironment, BookingReducer>;

/// Entry point for catalog setup, seat lookups, bookings and settlement.
///
/// # Example
///
/// ```
/// use boxoffice::{BookingEnvironment, BookingService, Movie, SeatCoord, Settlement};
/// use boxoffice_core::environment::SystemClock;
/// use std::sync::Arc;
///
/// let mut service = BookingService::new(BookingEnvironment::new(Arc::new(SystemClock)));
/// service.add_movie(Movie::new("Inception", 148, "Sci-Fi")).unwrap();
/// service.add_theater("PVR Cinemas", 5, 5).unwrap();
///
/// let seats = [SeatCoord::new(0, 0), SeatCoord::new(0, 1)];
/// service.submit_booking("Alice", "Inception", "PVR Cinemas", &seats).unwrap();
///
/// assert_eq!(
///     service.settle_all(),
///     Settlement::Completed(vec!["Alice booked 1,1, 1,2 for movie Inception".to_string()])
/// );
/// assert_eq!(service.settle_all(), Settlement::NoBookings);
/// ```
#[derive(Debug)]
pub struct BookingService {
    store: BookingStore,
}

impl BookingService {
    /// Creates a service with an empty catalog and no theaters
    #[must_use]
    pub fn new(env: BookingEnvironment) -> Self {
        Self {
            store: Store::new(BookingState::new(), BookingReducer::new(), env),
        }
    }

    /// Bound the number of follow-up hops one request may take (minimum 1)
    #[must_use]
    pub fn with_max_dispatch_depth(self, depth: usize) -> Self {
        Self {
            store: self.store.with_max_dispatch_depth(depth.max(1)),
        }
    }

    /// Register a movie.
    ///
    /// Returns `false` if a movie with the same title was already registered;
    /// the existing record is kept.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InputError`] for an empty title.
    pub fn add_movie(&mut self, movie: Movie) -> Result<bool> {
        self.store.state_mut(|s| s.last_movie_added = None);
        self.dispatch(BookingAction::AddMovie { movie })?;
        Ok(self.store.state_mut(|s| s.last_movie_added.take()) == Some(true))
    }

    /// Open a theater with a grid for every movie registered so far.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InputError`] for an empty or duplicate name, a
    /// zero dimension or a layout over [`crate::seat_grid::MAX_SEATS`] seats.
    pub fn add_theater(&mut self, name: &str, rows: usize, cols: usize) -> Result<()> {
        self.dispatch(BookingAction::AddTheater {
            name: name.to_string(),
            rows,
            cols,
        })
    }

    /// Movies in the order they were added
    #[must_use]
    pub fn list_movies(&self) -> Vec<Movie> {
        self.store.state(|s| s.movies.clone())
    }

    /// Theaters in the order they opened
    #[must_use]
    pub fn list_theaters(&self) -> Vec<Theater> {
        self.store.state(|s| s.theaters.clone())
    }

    /// Exact-title catalog lookup
    #[must_use]
    pub fn search_movie(&self, title: &str) -> Option<Movie> {
        self.store.state(|s| s.catalog.search(title).cloned())
    }

    /// Returns true if the seat is free
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::SelectionError`] for an unknown theater,
    /// [`BookingError::InconsistentState`] if the theater has no grid for the
    /// movie and [`BookingError::OutOfBounds`] for a coordinate outside it.
    pub fn is_seat_available(
        &self,
        theater_name: &str,
        movie_title: &str,
        row: usize,
        col: usize,
    ) -> Result<bool> {
        self.store.state(|s| {
            s.find_theater(theater_name)
                .ok_or_else(|| unknown_theater(theater_name))?
                .is_seat_available(movie_title, row, col)
        })
    }

    /// Per-row availability, for rendering a seat picker
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::SelectionError`] for an unknown theater and
    /// [`BookingError::InconsistentState`] if it has no grid for the movie.
    pub fn seat_map(&self, theater_name: &str, movie_title: &str) -> Result<Vec<Vec<bool>>> {
        self.store.state(|s| {
            s.find_theater(theater_name)
                .ok_or_else(|| unknown_theater(theater_name))?
                .seat_map(movie_title)
        })
    }

    /// Reserve `seats` for a customer, all or nothing.
    ///
    /// On success the booking is queued for settlement.
    ///
    /// # Errors
    ///
    /// - [`BookingError::InputError`]: empty name or selection, no seats
    /// - [`BookingError::SelectionError`]: unknown movie or theater
    /// - [`BookingError::BookingConflict`]: a seat is already booked
    /// - [`BookingError::OutOfBounds`]: a seat is outside the grid
    /// - [`BookingError::InconsistentState`]: the theater has no grid for the movie
    ///
    /// No seat or queue state changes on any of these.
    pub fn submit_booking(
        &mut self,
        customer_name: &str,
        movie_title: &str,
        theater_name: &str,
        seats: &[SeatCoord],
    ) -> Result<BookingConfirmation> {
        self.store.state_mut(|s| s.last_confirmation = None);
        self.dispatch(BookingAction::SubmitBooking {
            customer_name: customer_name.to_string(),
            movie_title: movie_title.to_string(),
            theater_name: theater_name.to_string(),
            seats: seats.to_vec(),
        })?;

        self.store
            .state_mut(|s| s.last_confirmation.take())
            .ok_or_else(|| BookingError::InconsistentState {
                theater_name: theater_name.to_string(),
                movie_title: movie_title.to_string(),
            })
    }

    /// Number of bookings waiting for settlement
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.store.state(|s| s.pending.len())
    }

    /// Drain the pending queue into report lines, in submission order.
    ///
    /// Returns [`Settlement::NoBookings`] when nothing is waiting.
    pub fn settle_all(&mut self) -> Settlement {
        self.store.state_mut(|s| s.last_settlement = None);
        if let Err(err) = self.store.send(BookingAction::SettleAll) {
            error!(error = %err, "Settlement did not run");
        }
        self.store
            .state_mut(|s| s.last_settlement.take())
            .unwrap_or(Settlement::NoBookings)
    }

    /// Send an action and surface the rejection it produced, if any
    fn dispatch(&mut self, action: BookingAction) -> Result<()> {
        self.store.state_mut(|s| s.last_error = None);
        self.store.send(action)?;
        match self.store.state_mut(|s| s.last_error.take()) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn unknown_theater(name: &str) -> BookingError {
    BookingError::selection(format!("Unknown theater {name}"))
}
