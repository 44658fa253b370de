//! Synchronous store that runs a reducer and executes its effects.
//!
//! The store owns the state. [`Store::send`] reduces one action, then feeds
//! every action dispatched by the returned effects back into the reducer, in
//! order, until no work remains. Mutation requires `&mut self`, so a store is
//! never observed halfway through an action.

use crate::effect::Effect;
use crate::reducer::Reducer;
use std::collections::VecDeque;
use thiserror::Error;

/// Default bound on how many feedback hops one `send` may take.
pub const DEFAULT_MAX_DISPATCH_DEPTH: usize = 16;

/// Errors raised while executing effects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Dispatched actions kept producing more dispatches past the configured bound.
    ///
    /// Actions reduced before the bound was hit keep their state changes.
    #[error("Dispatch depth {depth} exceeds the limit of {limit}")]
    DispatchDepthExceeded {
        /// Depth of the action that was refused
        depth: usize,
        /// Configured limit
        limit: usize,
    },
}

/// The Store - runtime for a reducer
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer type
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: S,
    reducer: R,
    environment: E,
    max_dispatch_depth: usize,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new store with initial state, reducer, and environment
    #[must_use]
    pub const fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: initial_state,
            reducer,
            environment,
            max_dispatch_depth: DEFAULT_MAX_DISPATCH_DEPTH,
        }
    }

    /// Override the feedback bound (see [`StoreError::DispatchDepthExceeded`])
    #[must_use]
    pub const fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
        self.max_dispatch_depth = depth;
        self
    }

    /// Send an action to the store
    ///
    /// Returns the number of actions reduced, the sent action included.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DispatchDepthExceeded`] when dispatched actions
    /// chain deeper than the configured limit.
    pub fn send(&mut self, action: A) -> Result<usize, StoreError> {
        let mut pending = VecDeque::from([(action, 0_usize)]);
        let mut reduced = 0;

        while let Some((action, depth)) = pending.pop_front() {
            if depth > self.max_dispatch_depth {
                return Err(StoreError::DispatchDepthExceeded {
                    depth,
                    limit: self.max_dispatch_depth,
                });
            }

            let effects = self
                .reducer
                .reduce(&mut self.state, action, &self.environment);
            reduced += 1;

            for effect in effects {
                pending.extend(
                    effect
                        .into_actions()
                        .into_iter()
                        .map(|next| (next, depth + 1)),
                );
            }
        }

        Ok(reduced)
    }

    /// Read from the current state
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        f(&self.state)
    }

    /// Mutate the current state outside of the reducer
    ///
    /// Meant for reading back and clearing per-action results; business
    /// rules belong in the reducer.
    pub fn state_mut<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut S) -> T,
    {
        f(&mut self.state)
    }

    /// Access the injected environment
    pub const fn environment(&self) -> &E {
        &self.environment
    }
}

impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
where
    S: std::fmt::Debug,
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("max_dispatch_depth", &self.max_dispatch_depth)
            .finish_non_exhaustive()
    }
}

/// Convenience for reducers: a single dispatch wrapped for the return vector
#[must_use]
pub fn dispatch_one<A>(action: A) -> smallvec::SmallVec<[Effect<A>; 4]> {
    smallvec::smallvec![Effect::dispatch(action)]
}
