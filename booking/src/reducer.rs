//! Booking reducer: catalog registration, seat reservation and settlement.
//!
//! Commands are validated against the current state and turned into events;
//! state only changes when an event is applied. A committed booking
//! dispatches a follow-up `QueueBooking` command, so "seats reserved" and
//! "booking waiting for settlement" are separate steps.

use crate::catalog::CatalogIndex;
use crate::error::BookingError;
use crate::pending_queue::PendingQueue;
use crate::seat_grid::SeatGrid;
use crate::theater::Theater;
use crate::types::{BookingConfirmation, Movie, PendingRecord, SeatCoord, Settlement};
use boxoffice_core::{
    effect::Effect, environment::Clock, reducer::Reducer, store::dispatch_one, SmallVec,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

// ============================================================================
// State
// ============================================================================

/// Everything the booking engine knows.
#[derive(Clone, Debug, Default)]
pub struct BookingState {
    /// Title index
    pub catalog: CatalogIndex,
    /// Movies in the order they were added
    pub movies: Vec<Movie>,
    /// Theaters in the order they opened
    pub theaters: Vec<Theater>,
    /// Accepted bookings not yet settled
    pub pending: PendingQueue,
    /// Whether the most recent movie registration indexed a new title
    pub last_movie_added: Option<bool>,
    /// Confirmation of the most recent successful booking
    pub last_confirmation: Option<BookingConfirmation>,
    /// Most recent rejection
    pub last_error: Option<BookingError>,
    /// Result of the most recent settlement
    pub last_settlement: Option<Settlement>,
}

impl BookingState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Theater by exact name (linear scan)
    #[must_use]
    pub fn find_theater(&self, name: &str) -> Option<&Theater> {
        self.theaters.iter().find(|theater| theater.name() == name)
    }

    fn find_theater_mut(&mut self, name: &str) -> Option<&mut Theater> {
        self.theaters.iter_mut().find(|theater| theater.name() == name)
    }
}

// ============================================================================
// Actions (Commands + Events)
// ============================================================================

/// Actions for the booking reducer
#[derive(Clone, Debug, PartialEq)]
pub enum BookingAction {
    // Commands
    /// Register a movie in the catalog
    AddMovie {
        /// Movie to register
        movie: Movie,
    },

    /// Open a theater with a grid per currently known movie
    AddTheater {
        /// Theater name
        name: String,
        /// Seat rows
        rows: usize,
        /// Seat columns
        cols: usize,
    },

    /// Reserve seats for a customer
    SubmitBooking {
        /// Customer name
        customer_name: String,
        /// Movie title
        movie_title: String,
        /// Theater name
        theater_name: String,
        /// Requested seats (0-based)
        seats: Vec<SeatCoord>,
    },

    /// Put a committed booking on the settlement queue
    QueueBooking {
        /// Record to queue
        record: PendingRecord,
    },

    /// Drain the settlement queue into a report
    SettleAll,

    // Events
    /// A movie was added to the catalog
    MovieAdded {
        /// Added movie
        movie: Movie,
    },

    /// A movie with an already indexed title was skipped
    DuplicateMovieIgnored {
        /// Duplicate title
        title: String,
    },

    /// A theater opened
    TheaterOpened {
        /// Theater name
        name: String,
        /// Seat rows
        rows: usize,
        /// Seat columns
        cols: usize,
        /// Movies that got a seat grid
        movie_titles: Vec<String>,
    },

    /// Seats were committed
    SeatsBooked {
        /// Booking details
        confirmation: BookingConfirmation,
    },

    /// A booking joined the settlement queue
    BookingQueued {
        /// Queued record
        record: PendingRecord,
    },

    /// A command was refused
    BookingRejected {
        /// Why
        error: BookingError,
    },

    /// The settlement queue was drained
    BookingsSettled {
        /// Report
        settlement: Settlement,
    },
}

impl BookingAction {
    /// Returns true if this action is a command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::AddMovie { .. }
                | Self::AddTheater { .. }
                | Self::SubmitBooking { .. }
                | Self::QueueBooking { .. }
                | Self::SettleAll
        )
    }

    /// Returns true if this action is an event
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Environment dependencies for the booking reducer
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for booking timestamps
    pub clock: Arc<dyn Clock>,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl std::fmt::Debug for BookingEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingEnvironment").finish_non_exhaustive()
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the booking engine
#[derive(Clone, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates an `AddMovie` command
    fn validate_add_movie(movie: &Movie) -> Result<(), BookingError> {
        if movie.title.is_empty() {
            return Err(BookingError::input("Movie title cannot be empty"));
        }
        Ok(())
    }

    /// Validates an `AddTheater` command
    fn validate_add_theater(
        state: &BookingState,
        name: &str,
        rows: usize,
        cols: usize,
    ) -> Result<(), BookingError> {
        if name.trim().is_empty() {
            return Err(BookingError::input("Theater name cannot be empty"));
        }

        SeatGrid::capacity(rows, cols)?;

        if state.find_theater(name).is_some() {
            return Err(BookingError::input(format!("Theater {name} already exists")));
        }

        Ok(())
    }

    /// Validates a `SubmitBooking` command up to and including the seat check.
    ///
    /// Returns the confirmation to commit. Nothing is written here.
    fn validate_submit_booking(
        state: &BookingState,
        customer_name: &str,
        movie_title: &str,
        theater_name: &str,
        seats: &[SeatCoord],
        env: &BookingEnvironment,
    ) -> Result<BookingConfirmation, BookingError> {
        if movie_title.is_empty() || theater_name.is_empty() {
            return Err(BookingError::input("Select a movie and a theater"));
        }

        if customer_name.trim().is_empty() {
            return Err(BookingError::input("Customer name cannot be empty"));
        }

        if seats.is_empty() {
            return Err(BookingError::input("Select at least one seat"));
        }

        let Some(movie) = state.catalog.search(movie_title) else {
            return Err(BookingError::selection(format!(
                "Unknown movie {movie_title}"
            )));
        };

        let Some(theater) = state.find_theater(theater_name) else {
            return Err(BookingError::selection(format!(
                "Unknown theater {theater_name}"
            )));
        };

        let taken = theater.grid(&movie.title)?.conflicts(seats)?;
        if !taken.is_empty() {
            return Err(BookingError::BookingConflict {
                movie_title: movie.title.clone(),
                theater_name: theater.name().to_string(),
                seats: taken,
            });
        }

        Ok(BookingConfirmation {
            customer_name: customer_name.to_string(),
            movie_title: movie.title.clone(),
            theater_name: theater.name().to_string(),
            seats: seats.to_vec(),
            booked_at: env.clock.now(),
        })
    }

    /// Applies an event to state
    fn apply_event(state: &mut BookingState, action: &BookingAction) {
        match action {
            BookingAction::MovieAdded { movie } => {
                let added = state.catalog.insert(movie.clone());
                if added {
                    state.movies.push(movie.clone());
                }
                state.last_movie_added = Some(added);
                state.last_error = None;
            }
            BookingAction::DuplicateMovieIgnored { .. } => {
                state.last_movie_added = Some(false);
                state.last_error = None;
            }
            BookingAction::TheaterOpened {
                name,
                rows,
                cols,
                movie_titles,
            } => match Theater::new(name.clone(), *rows, *cols, movie_titles.iter().cloned()) {
                Ok(theater) => {
                    state.theaters.push(theater);
                    state.last_error = None;
                }
                Err(error) => Self::fail(state, error),
            },
            BookingAction::SeatsBooked { confirmation } => {
                match Self::commit_seats(state, confirmation) {
                    Ok(()) => {
                        state.last_confirmation = Some(confirmation.clone());
                        state.last_error = None;
                    }
                    Err(error) => Self::fail(state, error),
                }
            }
            BookingAction::BookingQueued { record } => {
                state.pending.enqueue(record.clone());
            }
            BookingAction::BookingRejected { error } => {
                Self::fail(state, error.clone());
            }
            BookingAction::BookingsSettled { settlement } => {
                let drained = std::iter::from_fn(|| state.pending.dequeue()).count();
                if drained != settlement.lines().len() {
                    warn!(
                        drained,
                        reported = settlement.lines().len(),
                        "Settlement report does not match the drained queue"
                    );
                }
                state.last_settlement = Some(settlement.clone());
            }
            // Commands are not applied to state
            BookingAction::AddMovie { .. }
            | BookingAction::AddTheater { .. }
            | BookingAction::SubmitBooking { .. }
            | BookingAction::QueueBooking { .. }
            | BookingAction::SettleAll => {}
        }
    }

    /// Commit phase of a booking.
    ///
    /// Seats are re-checked here, so a `SeatsBooked` event for seats that are
    /// already taken is refused instead of recorded.
    fn commit_seats(
        state: &mut BookingState,
        confirmation: &BookingConfirmation,
    ) -> Result<(), BookingError> {
        let movie = state
            .catalog
            .search(&confirmation.movie_title)
            .cloned()
            .ok_or_else(|| {
                BookingError::selection(format!("Unknown movie {}", confirmation.movie_title))
            })?;
        let theater = state
            .find_theater_mut(&confirmation.theater_name)
            .ok_or_else(|| {
                BookingError::selection(format!("Unknown theater {}", confirmation.theater_name))
            })?;

        if theater.book(&movie, &confirmation.customer_name, &confirmation.seats)? {
            return Ok(());
        }
        Err(BookingError::BookingConflict {
            seats: theater.grid(&movie.title)?.conflicts(&confirmation.seats)?,
            movie_title: movie.title,
            theater_name: confirmation.theater_name.clone(),
        })
    }

    /// Log a refusal and leave it in state for the caller
    fn fail(state: &mut BookingState, error: BookingError) {
        if error.is_recoverable() {
            warn!(error = %error, "Booking command rejected");
        } else {
            error!(error = %error, "Booking engine state is inconsistent");
        }
        state.last_error = Some(error);
    }

    fn reject(state: &mut BookingState, error: BookingError) -> SmallVec<[Effect<BookingAction>; 4]> {
        Self::apply_event(state, &BookingAction::BookingRejected { error });
        SmallVec::new()
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            BookingAction::AddMovie { movie } => {
                if let Err(error) = Self::validate_add_movie(&movie) {
                    return Self::reject(state, error);
                }

                let event = if state.catalog.contains(&movie.title) {
                    warn!(title = %movie.title, "Duplicate movie title ignored");
                    BookingAction::DuplicateMovieIgnored { title: movie.title }
                } else {
                    debug!(title = %movie.title, "Movie added to catalog");
                    BookingAction::MovieAdded { movie }
                };

                Self::apply_event(state, &event);
                SmallVec::new()
            }

            BookingAction::AddTheater { name, rows, cols } => {
                if let Err(error) = Self::validate_add_theater(state, &name, rows, cols) {
                    return Self::reject(state, error);
                }

                let movie_titles: Vec<String> =
                    state.movies.iter().map(|movie| movie.title.clone()).collect();
                info!(
                    theater = %name,
                    rows,
                    cols,
                    movies = movie_titles.len(),
                    "Theater opened"
                );

                Self::apply_event(
                    state,
                    &BookingAction::TheaterOpened {
                        name,
                        rows,
                        cols,
                        movie_titles,
                    },
                );
                SmallVec::new()
            }

            BookingAction::SubmitBooking {
                customer_name,
                movie_title,
                theater_name,
                seats,
            } => {
                let confirmation = match Self::validate_submit_booking(
                    state,
                    &customer_name,
                    &movie_title,
                    &theater_name,
                    &seats,
                    env,
                ) {
                    Ok(confirmation) => confirmation,
                    Err(error) => return Self::reject(state, error),
                };

                let record = confirmation.to_pending_record();
                Self::apply_event(state, &BookingAction::SeatsBooked { confirmation });
                if state.last_error.is_some() {
                    return SmallVec::new();
                }

                info!(
                    customer = %record.customer_name,
                    movie = %record.movie_title,
                    theater = %record.theater_name,
                    seats = %crate::types::format_seat_numbers(&record.seats),
                    "Seats booked"
                );

                dispatch_one(BookingAction::QueueBooking { record })
            }

            BookingAction::QueueBooking { record } => {
                debug!(customer = %record.customer_name, "Booking queued for settlement");
                Self::apply_event(state, &BookingAction::BookingQueued { record });
                SmallVec::new()
            }

            BookingAction::SettleAll => {
                let lines = state
                    .pending
                    .iter()
                    .map(PendingRecord::settlement_line)
                    .collect::<Vec<_>>();
                let settlement = Settlement::from_lines(lines);

                info!(settled = settlement.lines().len(), "Bookings settled");
                Self::apply_event(state, &BookingAction::BookingsSettled { settlement });
                SmallVec::new()
            }

            // ========== Events ==========
            BookingAction::MovieAdded { .. }
            | BookingAction::DuplicateMovieIgnored { .. }
            | BookingAction::TheaterOpened { .. }
            | BookingAction::SeatsBooked { .. }
            | BookingAction::BookingQueued { .. }
            | BookingAction::BookingRejected { .. }
            | BookingAction::BookingsSettled { .. } => {
                // Replayed events go straight to state
                Self::apply_event(state, &action);
                SmallVec::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use boxoffice_testing::{assertions, test_clock, ReducerTest};

    fn create_test_env() -> BookingEnvironment {
        BookingEnvironment::new(Arc::new(test_clock()))
    }

    fn add_movie(title: &str) -> BookingAction {
        BookingAction::AddMovie {
            movie: Movie::new(title, 148, "Sci-Fi"),
        }
    }

    fn add_theater(name: &str) -> BookingAction {
        BookingAction::AddTheater {
            name: name.to_string(),
            rows: 5,
            cols: 5,
        }
    }

    fn submit(customer: &str, seats: &[(usize, usize)]) -> BookingAction {
        BookingAction::SubmitBooking {
            customer_name: customer.to_string(),
            movie_title: "Inception".to_string(),
            theater_name: "PVR Cinemas".to_string(),
            seats: seats.iter().copied().map(SeatCoord::from).collect(),
        }
    }

    fn last_error_kind(state: &BookingState) -> Option<ErrorKind> {
        state.last_error.as_ref().map(BookingError::kind)
    }

    #[test]
    fn test_add_movie() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .when_action(add_movie("Inception"))
            .then_state(|state| {
                assert_eq!(state.movies.len(), 1);
                assert!(state.catalog.contains("Inception"));
                assert_eq!(state.last_movie_added, Some(true));
                assert!(state.last_error.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_duplicate_movie_is_skipped() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_movie("Inception"))
            .when_action(BookingAction::AddMovie {
                movie: Movie::new("Inception", 90, "Comedy"),
            })
            .then_state(|state| {
                assert_eq!(state.movies.len(), 1);
                assert_eq!(state.catalog.search("Inception").unwrap().genre, "Sci-Fi");
                assert_eq!(state.last_movie_added, Some(false));
                assert!(state.last_error.is_none());
            })
            .run();
    }

    #[test]
    fn test_add_theater_snapshots_current_movies() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_movie("Inception"))
            .given_action(add_theater("PVR Cinemas"))
            .when_action(add_movie("Tenet"))
            .then_state(|state| {
                let theater = state.find_theater("PVR Cinemas").unwrap();
                assert!(theater.has_grid("Inception"));
                assert!(!theater.has_grid("Tenet"));
            })
            .run();
    }

    #[test]
    fn test_add_theater_rejects_bad_dimensions_and_duplicates() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .when_action(BookingAction::AddTheater {
                name: "Tiny".to_string(),
                rows: 0,
                cols: 4,
            })
            .then_state(|state| {
                assert!(state.theaters.is_empty());
                assert_eq!(last_error_kind(state), Some(ErrorKind::Input));
            })
            .run();

        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_theater("INOX"))
            .when_action(add_theater("INOX"))
            .then_state(|state| {
                assert_eq!(state.theaters.len(), 1);
                assert_eq!(last_error_kind(state), Some(ErrorKind::Input));
            })
            .run();
    }

    #[test]
    fn test_add_theater_rejects_oversized_layout() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_movie("Inception"))
            .when_action(BookingAction::AddTheater {
                name: "Huge".to_string(),
                rows: 1 << 33,
                cols: 1 << 31,
            })
            .then_state(|state| {
                assert!(state.theaters.is_empty());
                assert_eq!(last_error_kind(state), Some(ErrorKind::Input));
            })
            .run();
    }

    #[test]
    fn test_replayed_theater_with_oversized_layout_is_refused() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .when_action(BookingAction::TheaterOpened {
                name: "Huge".to_string(),
                rows: usize::MAX,
                cols: 2,
                movie_titles: vec!["Inception".to_string()],
            })
            .then_state(|state| {
                assert!(state.theaters.is_empty());
                assert_eq!(last_error_kind(state), Some(ErrorKind::Input));
            })
            .run();
    }

    fn replayed_booking(customer: &str, seats: &[(usize, usize)]) -> BookingAction {
        BookingAction::SeatsBooked {
            confirmation: BookingConfirmation {
                customer_name: customer.to_string(),
                movie_title: "Inception".to_string(),
                theater_name: "PVR Cinemas".to_string(),
                seats: seats.iter().copied().map(SeatCoord::from).collect(),
                booked_at: test_clock().now(),
            },
        }
    }

    #[test]
    fn test_replayed_booking_on_taken_seat_is_refused() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_movie("Inception"))
            .given_action(add_theater("PVR Cinemas"))
            .given_action(replayed_booking("Alice", &[(0, 0)]))
            .when_action(replayed_booking("Bob", &[(0, 0), (0, 1)]))
            .then_state(|state| {
                assert_eq!(
                    state.last_error,
                    Some(BookingError::BookingConflict {
                        movie_title: "Inception".to_string(),
                        theater_name: "PVR Cinemas".to_string(),
                        seats: vec![SeatCoord::new(0, 0)],
                    })
                );
                let confirmation = state.last_confirmation.as_ref().unwrap();
                assert_eq!(confirmation.customer_name, "Alice");

                let theater = state.find_theater("PVR Cinemas").unwrap();
                assert!(theater.is_seat_available("Inception", 0, 1).unwrap());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_replayed_booking_without_grid_is_inconsistent() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_theater("PVR Cinemas"))
            .given_action(add_movie("Inception"))
            .when_action(replayed_booking("Alice", &[(0, 0)]))
            .then_state(|state| {
                assert_eq!(last_error_kind(state), Some(ErrorKind::InconsistentState));
                assert!(state.last_confirmation.is_none());
            })
            .run();
    }

    #[test]
    fn test_submit_booking_commits_and_dispatches_queue() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_movie("Inception"))
            .given_action(add_theater("PVR Cinemas"))
            .when_action(submit("Alice", &[(0, 0), (0, 1)]))
            .then_state(|state| {
                let theater = state.find_theater("PVR Cinemas").unwrap();
                assert!(!theater.is_seat_available("Inception", 0, 0).unwrap());
                assert!(!theater.is_seat_available("Inception", 0, 1).unwrap());

                let confirmation = state.last_confirmation.as_ref().unwrap();
                assert_eq!(confirmation.seat_labels(), vec!["1,1", "1,2"]);
                assert_eq!(confirmation.booked_at, test_clock().now());

                // queued only once the dispatched command runs
                assert!(state.pending.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_dispatches(effects, |action| {
                    matches!(action, BookingAction::QueueBooking { record } if record.customer_name == "Alice")
                });
            })
            .run();
    }

    #[test]
    fn test_conflicting_booking_changes_nothing() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_movie("Inception"))
            .given_action(add_theater("PVR Cinemas"))
            .given_action(submit("Alice", &[(0, 0), (0, 1)]))
            .when_action(submit("Bob", &[(0, 1), (1, 1)]))
            .then_state(|state| {
                let theater = state.find_theater("PVR Cinemas").unwrap();
                assert!(theater.is_seat_available("Inception", 1, 1).unwrap());
                assert_eq!(
                    state.last_error,
                    Some(BookingError::BookingConflict {
                        movie_title: "Inception".to_string(),
                        theater_name: "PVR Cinemas".to_string(),
                        seats: vec![SeatCoord::new(0, 1)],
                    })
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_submit_booking_input_errors() {
        let cases = [
            BookingAction::SubmitBooking {
                customer_name: String::new(),
                movie_title: "Inception".to_string(),
                theater_name: "PVR Cinemas".to_string(),
                seats: vec![SeatCoord::new(0, 0)],
            },
            BookingAction::SubmitBooking {
                customer_name: "Alice".to_string(),
                movie_title: String::new(),
                theater_name: "PVR Cinemas".to_string(),
                seats: vec![SeatCoord::new(0, 0)],
            },
            submit("Alice", &[]),
        ];

        for case in cases {
            ReducerTest::new(BookingReducer::new())
                .with_env(create_test_env())
                .given_state(BookingState::new())
                .given_action(add_movie("Inception"))
                .given_action(add_theater("PVR Cinemas"))
                .when_action(case)
                .then_state(|state| {
                    assert_eq!(last_error_kind(state), Some(ErrorKind::Input));
                    assert!(state.last_confirmation.is_none());
                })
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn test_submit_booking_selection_errors() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_theater("PVR Cinemas"))
            .when_action(submit("Alice", &[(0, 0)]))
            .then_state(|state| {
                assert_eq!(last_error_kind(state), Some(ErrorKind::Selection));
            })
            .run();

        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_movie("Inception"))
            .when_action(submit("Alice", &[(0, 0)]))
            .then_state(|state| {
                assert_eq!(last_error_kind(state), Some(ErrorKind::Selection));
            })
            .run();
    }

    #[test]
    fn test_movie_added_after_theater_is_inconsistent() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_theater("PVR Cinemas"))
            .given_action(add_movie("Inception"))
            .when_action(submit("Alice", &[(0, 0)]))
            .then_state(|state| {
                assert_eq!(last_error_kind(state), Some(ErrorKind::InconsistentState));
                assert!(!state.last_error.as_ref().unwrap().is_recoverable());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_out_of_bounds_seat_is_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(add_movie("Inception"))
            .given_action(add_theater("PVR Cinemas"))
            .when_action(submit("Alice", &[(0, 0), (5, 0)]))
            .then_state(|state| {
                assert_eq!(last_error_kind(state), Some(ErrorKind::OutOfBounds));
                let theater = state.find_theater("PVR Cinemas").unwrap();
                assert!(theater.is_seat_available("Inception", 0, 0).unwrap());
            })
            .run();
    }

    #[test]
    fn test_settle_all_drains_queue() {
        let record = BookingConfirmation {
            customer_name: "Alice".to_string(),
            movie_title: "Inception".to_string(),
            theater_name: "PVR Cinemas".to_string(),
            seats: vec![SeatCoord::new(0, 0), SeatCoord::new(0, 1)],
            booked_at: test_clock().now(),
        }
        .to_pending_record();

        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .given_action(BookingAction::QueueBooking { record })
            .when_action(BookingAction::SettleAll)
            .then_state(|state| {
                assert!(state.pending.is_empty());
                assert_eq!(
                    state.last_settlement,
                    Some(Settlement::Completed(vec![
                        "Alice booked 1,1, 1,2 for movie Inception".to_string()
                    ]))
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_settle_all_on_empty_queue() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(BookingState::new())
            .when_action(BookingAction::SettleAll)
            .then_state(|state| {
                assert_eq!(state.last_settlement, Some(Settlement::NoBookings));
                assert!(state.last_error.is_none());
            })
            .run();
    }

    #[test]
    fn test_command_and_event_classification() {
        assert!(BookingAction::SettleAll.is_command());
        assert!(add_movie("Inception").is_command());
        assert!(
            BookingAction::DuplicateMovieIgnored {
                title: "Inception".to_string()
            }
            .is_event()
        );
    }
}
