//! Theaters and their per-movie seat grids.
//!
//! A theater allocates one [`SeatGrid`] per movie title it is given when it
//! opens. The set of grids never changes afterwards: a movie added to the
//! catalog later has no grid here and cannot be booked at this theater.

use crate::error::{BookingError, Result};
use crate::seat_grid::SeatGrid;
use crate::types::{Movie, SeatCoord};
use std::collections::BTreeMap;

/// A screening venue with a fixed seat layout.
#[derive(Clone, Debug)]
pub struct Theater {
    name: String,
    rows: usize,
    cols: usize,
    grids: BTreeMap<String, SeatGrid>,
}

impl Theater {
    /// Open a theater with a `rows` × `cols` grid for each of `movie_titles`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InputError`] if [`SeatGrid::capacity`] rejects
    /// the layout, whether or not any movie is given.
    pub fn new<I, T>(
        name: impl Into<String>,
        rows: usize,
        cols: usize,
        movie_titles: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let blank = SeatGrid::new(rows, cols)?;
        let grids = movie_titles
            .into_iter()
            .map(|title| (title.into(), blank.clone()))
            .collect();

        Ok(Self {
            name: name.into(),
            rows,
            cols,
            grids,
        })
    }

    /// Theater name (unique key)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of seat rows
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of seat columns
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Titles this theater holds grids for, sorted
    pub fn movie_titles(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }

    /// Returns true if `movie_title` has a grid here
    #[must_use]
    pub fn has_grid(&self, movie_title: &str) -> bool {
        self.grids.contains_key(movie_title)
    }

    /// Seat grid for a movie
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InconsistentState`] if the theater has no grid
    /// for `movie_title`.
    pub fn grid(&self, movie_title: &str) -> Result<&SeatGrid> {
        self.grids
            .get(movie_title)
            .ok_or_else(|| missing_grid(&self.name, movie_title))
    }

    /// Returns true if the seat is free for `movie_title`
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InconsistentState`] for an unknown partition and
    /// [`BookingError::OutOfBounds`] for a coordinate outside the grid.
    pub fn is_seat_available(&self, movie_title: &str, row: usize, col: usize) -> Result<bool> {
        self.grid(movie_title)?.is_available(row, col)
    }

    /// Book `seats` for `movie`, all or nothing.
    ///
    /// Returns `Ok(false)` if any seat is already booked.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InconsistentState`] if the theater has no grid for
    /// the movie and [`BookingError::OutOfBounds`] for a coordinate outside the
    /// grid. Neither writes any seat.
    pub fn book(&mut self, movie: &Movie, customer_name: &str, seats: &[SeatCoord]) -> Result<bool> {
        let name = &self.name;
        let grid = self
            .grids
            .get_mut(&movie.title)
            .ok_or_else(|| missing_grid(name, &movie.title))?;

        let booked = grid.book(seats)?;
        tracing::trace!(
            theater = %self.name,
            movie = %movie.title,
            customer = customer_name,
            seats = seats.len(),
            booked,
            "Seat grid updated"
        );
        Ok(booked)
    }

    /// Per-row availability for `movie_title`
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InconsistentState`] if the theater has no grid
    /// for `movie_title`.
    pub fn seat_map(&self, movie_title: &str) -> Result<Vec<Vec<bool>>> {
        Ok(self.grid(movie_title)?.availability_rows())
    }

}

fn missing_grid(theater_name: &str, movie_title: &str) -> BookingError {
    BookingError::InconsistentState {
        theater_name: theater_name.to_string(),
        movie_title: movie_title.to_string(),
    }
}
