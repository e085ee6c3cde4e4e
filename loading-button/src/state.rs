//! Button state machine.
//!
//! [`transition`] is a pure function: it maps the current [`ButtonState`] and a
//! [`ButtonEvent`] to the next state plus the ordered [`Effect`]s the button
//! must carry out. The button owns the side effects; this module only decides
//! them.
use smallvec::SmallVec;

/// Visible state of a loading button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Ready to accept a start.
    #[default]
    Idle,
    /// Start was requested; the driver has not produced a frame yet.
    Clicked,
    /// A run is delivering frames.
    Loading,
    /// The last run ended.
    ///
    /// There is no automatic return to [`ButtonState::Idle`]: `state()` keeps
    /// returning `Completed` until the next `start()`, which it accepts exactly
    /// like `Idle` does.
    Completed,
}

impl ButtonState {
    /// Whether a start begins a fresh cycle without interrupting one.
    pub fn is_ready(self) -> bool {
        matches!(self, ButtonState::Idle | ButtonState::Completed)
    }

    /// Whether a cycle is currently running.
    pub fn is_busy(self) -> bool {
        matches!(self, ButtonState::Clicked | ButtonState::Loading)
    }
}

/// Triggers accepted by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    /// The host asked the button to start.
    Start,
    /// The active run delivered a frame.
    Tick,
    /// The host asked the button to finish early.
    Finish,
    /// The active run delivered its last frame.
    RunEnded,
}

/// Side effects requested by a transition, applied in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Cancel the active run, if any.
    CancelRun,
    /// Call `on_start` on the listener.
    NotifyStart,
    /// Set progress back to zero.
    ResetProgress,
    /// Begin the 0 → 100 run.
    StartPrimaryRun,
    /// Begin the short run from the current progress to 100.
    StartFinishingRun,
    /// Call `on_progress` with the current progress.
    NotifyProgress,
    /// Call `on_completed` on the listener.
    NotifyCompleted,
}

/// Outcome of [`transition`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: ButtonState,
    pub to: ButtonState,
    pub effects: SmallVec<[Effect; 4]>,
}

impl Transition {
    fn ignored(state: ButtonState) -> Self {
        Self {
            from: state,
            to: state,
            effects: SmallVec::new(),
        }
    }

    fn new(from: ButtonState, to: ButtonState, effects: &[Effect]) -> Self {
        Self {
            from,
            to,
            effects: SmallVec::from_slice(effects),
        }
    }

    /// True when the event changed nothing.
    pub fn is_ignored(&self) -> bool {
        self.from == self.to && self.effects.is_empty()
    }
}

/// Computes the transition for `event` in `state`.
pub fn transition(state: ButtonState, event: ButtonEvent) -> Transition {
    use ButtonEvent as Ev;
    use ButtonState as St;

    match (state, event) {
        // Restarting from Clicked/Loading is allowed; hosts keep their own busy flag.
        (_, Ev::Start) => Transition::new(
            state,
            St::Clicked,
            &[
                Effect::CancelRun,
                Effect::NotifyStart,
                Effect::ResetProgress,
                Effect::StartPrimaryRun,
            ],
        ),
        (St::Clicked | St::Loading, Ev::Tick) => {
            Transition::new(state, St::Loading, &[Effect::NotifyProgress])
        }
        (St::Loading, Ev::Finish) => Transition::new(
            state,
            St::Loading,
            &[Effect::CancelRun, Effect::StartFinishingRun],
        ),
        (St::Clicked | St::Loading, Ev::RunEnded) => Transition::new(
            state,
            St::Completed,
            &[Effect::NotifyCompleted, Effect::ResetProgress],
        ),
        _ => Transition::ignored(state),
    }
}
