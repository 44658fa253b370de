//! # Box Office Core
//!
//! Core traits and types for the Box Office booking engine.
//!
//! Business logic is written as reducers: pure functions that take the current
//! state, an action and an environment of injected dependencies, mutate the
//! state in place and return descriptions of follow-up work (effects). The
//! [`store::Store`] runs a reducer and executes the effects it returns.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (commands and events)
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up work descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! Everything here is synchronous. A store processes one action at a time to
//! completion, including every action its effects dispatch.
//!
//! ## Example
//!
//! ```
//! use boxoffice_core::{effect::Effect, reducer::Reducer, store::Store, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     IncrementTwice,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 SmallVec::new()
//!             }
//!             CounterAction::IncrementTwice => {
//!                 let mut effects = SmallVec::new();
//!                 effects.push(Effect::dispatch(CounterAction::Increment));
//!                 effects.push(Effect::dispatch(CounterAction::Increment));
//!                 effects
//!             }
//!         }
//!     }
//! }
//!
//! let mut store = Store::new(CounterState::default(), CounterReducer, ());
//! store.send(CounterAction::IncrementTwice).unwrap();
//! assert_eq!(store.state(|s| s.count), 2);
//! ```

pub mod store;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most actions produce no effects, so the returned vector stays inline
        /// for up to four effects.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Follow-up work descriptions
///
/// Effects are values returned from reducers. They are executed by the
/// [`Store`](crate::store::Store), never by the reducer itself.
pub mod effect {
    /// Effect type - describes work to perform after a reducer returns
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects one after another, in order
        Sequential(Vec<Effect<Action>>),

        /// Feed an action back into the reducer
        Dispatch(Box<Action>),
    }

    impl<Action> Effect<Action> {
        /// Feed `action` back into the reducer once the current action is done
        #[must_use]
        pub fn dispatch(action: Action) -> Self {
            Effect::Dispatch(Box::new(action))
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Self {
            Effect::Sequential(effects)
        }

        /// Returns true if this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Sequential(effects) => effects.iter().all(Effect::is_none),
                Effect::Dispatch(_) => false,
            }
        }

        /// Consume the effect, yielding every dispatched action in execution order
        #[must_use]
        pub fn into_actions(self) -> Vec<Action> {
            let mut actions = Vec::new();
            self.collect_into(&mut actions);
            actions
        }

        /// Borrow every dispatched action in execution order
        #[must_use]
        pub fn actions(&self) -> Vec<&Action> {
            match self {
                Effect::None => Vec::new(),
                Effect::Sequential(effects) => effects.iter().flat_map(Effect::actions).collect(),
                Effect::Dispatch(action) => vec![action.as_ref()],
            }
        }

        fn collect_into(self, out: &mut Vec<Action>) {
            match self {
                Effect::None => {}
                Effect::Sequential(effects) => {
                    for effect in effects {
                        effect.collect_into(out);
                    }
                }
                Effect::Dispatch(action) => out.push(*action),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use boxoffice_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;

    #[test]
    fn test_none_effects() {
        assert!(Effect::<u8>::None.is_none());
        assert!(Effect::<u8>::chain(vec![Effect::None, Effect::chain(vec![])]).is_none());
        assert!(!Effect::dispatch(1_u8).is_none());
    }

    #[test]
    fn test_dispatched_actions_keep_order() {
        let effect = Effect::chain(vec![
            Effect::dispatch(1_u8),
            Effect::None,
            Effect::chain(vec![Effect::dispatch(2), Effect::dispatch(3)]),
        ]);

        assert_eq!(effect.actions(), vec![&1, &2, &3]);
        assert_eq!(effect.into_actions(), vec![1, 2, 3]);
    }
}
