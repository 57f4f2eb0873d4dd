//! Stateful folds over an ordered input stream.
//!
//! A [`Reducer`] is the pure transition function; a [`Fold`] owns the state
//! and feeds inputs through the reducer one at a time, in the order they are
//! handed to it. Ordering is the caller's job: whoever owns the fold decides
//! the single total order of its inputs.

/// Transition function of a fold.
///
/// Implementations must be deterministic: the same state and the same input
/// always produce the same next state. That is what makes a fold replayable.
pub trait Reducer {
    type State: Clone + Default;
    type Input;

    /// Apply one input to `state` in place.
    fn apply(&self, state: &mut Self::State, input: Self::Input);
}

/// Runs inputs through a reducer and tracks progress.
pub struct Fold<R>
where
    R: Reducer,
{
    reducer: R,
    state: R::State,
    applied: u64,
}

impl<R> Fold<R>
where
    R: Reducer,
{
    /// A fold starting from the reducer's default (empty) state.
    pub fn new(reducer: R) -> Self {
        Self {
            reducer,
            state: R::State::default(),
            applied: 0,
        }
    }

    pub fn state(&self) -> &R::State {
        &self.state
    }

    pub fn into_state(self) -> R::State {
        self.state
    }

    /// Number of inputs folded so far.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Fold a single input and return the new state.
    pub fn apply(&mut self, input: R::Input) -> &R::State {
        self.reducer.apply(&mut self.state, input);
        self.applied += 1;
        &self.state
    }

    /// Fold many inputs in order.
    pub fn run(&mut self, inputs: impl IntoIterator<Item = R::Input>) -> &R::State {
        for input in inputs {
            self.apply(input);
        }
        &self.state
    }

    /// Replay a full input history into a fresh state.
    pub fn replay(reducer: R, inputs: impl IntoIterator<Item = R::Input>) -> R::State {
        let mut fold = Fold::new(reducer);
        fold.run(inputs);
        fold.into_state()
    }
}

impl<R> core::fmt::Debug for Fold<R>
where
    R: Reducer + core::fmt::Debug,
    R::State: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Fold")
            .field("reducer", &self.reducer)
            .field("state", &self.state)
            .field("applied", &self.applied)
            .finish()
    }
}
