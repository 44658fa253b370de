//! Seat occupancy grid for one (theater, movie) pair.
//!
//! Booking is two-phase: every requested seat is checked first, and cells are
//! only written once the whole request has passed. A request that touches a
//! booked seat or a coordinate outside the grid leaves every cell as it was.

use crate::error::{BookingError, Result};
use crate::types::{SeatCoord, SeatState};

/// Row-major grid of seat states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatGrid {
    rows: usize,
    cols: usize,
    cells: Vec<SeatState>,
}

/// Most seats a single grid may hold.
pub const MAX_SEATS: usize = 1 << 16;

impl SeatGrid {
    /// Creates a grid with every seat `Available`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InputError`] if the layout is rejected by
    /// [`SeatGrid::capacity`].
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let seats = Self::capacity(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![SeatState::Available; seats],
        })
    }

    /// Seat count of a `rows` x `cols` layout.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InputError`] if either dimension is zero or the
    /// layout holds more than [`MAX_SEATS`] seats.
    pub fn capacity(rows: usize, cols: usize) -> Result<usize> {
        if rows == 0 || cols == 0 {
            return Err(BookingError::input(format!(
                "A seat layout needs at least one row and one column (got {rows}x{cols})"
            )));
        }
        rows.checked_mul(cols)
            .filter(|seats| *seats <= MAX_SEATS)
            .ok_or_else(|| {
                BookingError::input(format!(
                    "A {rows}x{cols} seat layout exceeds {MAX_SEATS} seats"
                ))
            })
    }

    /// Number of rows
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// State of one seat
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::OutOfBounds`] if `row`/`col` fall outside the grid.
    pub fn state(&self, row: usize, col: usize) -> Result<SeatState> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Returns true if the seat is `Available`
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::OutOfBounds`] if `row`/`col` fall outside the grid.
    pub fn is_available(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.state(row, col)? == SeatState::Available)
    }

    /// Requested seats that are already booked, in request order.
    ///
    /// This is the validate phase of [`SeatGrid::book`]; it never mutates.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::OutOfBounds`] for the first coordinate outside the grid.
    pub fn conflicts(&self, seats: &[SeatCoord]) -> Result<Vec<SeatCoord>> {
        let mut taken = Vec::new();
        for seat in seats {
            if self.state(seat.row, seat.col)? == SeatState::Booked && !taken.contains(seat) {
                taken.push(*seat);
            }
        }
        Ok(taken)
    }

    /// Book every seat in `seats`, or none of them.
    ///
    /// Returns `Ok(false)` without touching the grid if any seat is already
    /// booked. Repeated coordinates in one request are written once each and
    /// do not conflict with themselves.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::OutOfBounds`] if any coordinate falls outside the
    /// grid; nothing is written in that case either.
    pub fn book(&mut self, seats: &[SeatCoord]) -> Result<bool> {
        if !self.conflicts(seats)?.is_empty() {
            return Ok(false);
        }

        for seat in seats {
            let idx = self.index(seat.row, seat.col)?;
            self.cells[idx] = SeatState::Booked;
        }
        Ok(true)
    }

    /// Count of `Available` seats
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|state| **state == SeatState::Available)
            .count()
    }

    /// Per-row availability, for rendering a seat picker
    #[must_use]
    pub fn availability_rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|state| *state == SeatState::Available).collect())
            .collect()
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(BookingError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}
