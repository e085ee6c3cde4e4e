//! The loading button.
//!
//! ## Usage
//!
//! Create one button per screen, feed it resize events and frame deltas, and
//! draw it whenever [`LoadingButton::take_redraw_request`] reports a change.
//!
//! ```
//! use std::time::Duration;
//! use loading_button::{
//!     ButtonState, DisplayList, LoadingButton, LoadingButtonArgsBuilder, PxSize,
//! };
//!
//! let args = LoadingButtonArgsBuilder::default()
//!     .label("Download")
//!     .build()
//!     .unwrap();
//! let mut button = LoadingButton::new(args);
//! button.on_resize(PxSize::from([200, 80]));
//!
//! button.start();
//! button.tick(Duration::from_millis(16));
//! assert_eq!(button.state(), ButtonState::Loading);
//!
//! let mut frame = DisplayList::new();
//! button.draw(&mut frame);
//! assert_eq!(frame.len(), 3);
//! ```
use std::time::Duration;

use derive_builder::Builder;
use tracing::{debug, trace, warn};

use crate::{
    Color, Dp, LoadingButtonError, PxSize,
    animation::{FINISHING_RUN_DURATION, PRIMARY_RUN_DURATION, ValueAnimator},
    layout::{self, ButtonLayout, EstimatedTextMeasure, TextBounds, TextMeasure},
    render::{self, Canvas, DisplayList, PaintStyle},
    state::{self, ButtonEvent, ButtonState, Effect},
};

/// Default style values of a loading button.
pub struct LoadingButtonDefaults;

impl LoadingButtonDefaults {
    pub const LABEL: &'static str = "Download";
    pub const TEXT_SIZE: Dp = Dp(24.0);
    pub const CIRCULAR_DIAMETER: Dp = Dp(100.0);
    pub const CIRCULAR_COLOR: Color = Color::YELLOW;
    pub const HORIZONTAL_COLOR: Color = Color::BLUE;
    pub const TEXT_COLOR: Color = Color::BLACK;
}

/// Style arguments of a loading button, fixed at construction.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(pattern = "owned", build_fn(validate = "Self::validate"))]
pub struct LoadingButtonArgs {
    /// Label shown before the first cycle.
    #[builder(default = "LoadingButtonDefaults::LABEL.to_owned()", setter(into))]
    pub label: String,
    /// Label text size.
    #[builder(default = "LoadingButtonDefaults::TEXT_SIZE")]
    pub text_size: Dp,
    /// Fill color of the circular indicator.
    #[builder(default = "LoadingButtonDefaults::CIRCULAR_COLOR")]
    pub circular_color: Color,
    /// Fill color of the horizontal bar.
    #[builder(default = "LoadingButtonDefaults::HORIZONTAL_COLOR")]
    pub horizontal_color: Color,
    /// Label color.
    #[builder(default = "LoadingButtonDefaults::TEXT_COLOR")]
    pub text_color: Color,
    /// Diameter of the circular indicator.
    #[builder(default = "LoadingButtonDefaults::CIRCULAR_DIAMETER")]
    pub circular_diameter: Dp,
}

impl LoadingButtonArgsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(size) = self.text_size {
            if !(size.0.is_finite() && size.0 > 0.0) {
                return Err(format!("text size must be positive, got {}", size.0));
            }
        }
        if let Some(diameter) = self.circular_diameter {
            if !(diameter.0.is_finite() && diameter.0 >= 0.0) {
                return Err(format!(
                    "circular diameter must not be negative, got {}",
                    diameter.0
                ));
            }
        }
        Ok(())
    }
}

impl Default for LoadingButtonArgs {
    fn default() -> Self {
        Self {
            label: LoadingButtonDefaults::LABEL.to_owned(),
            text_size: LoadingButtonDefaults::TEXT_SIZE,
            circular_color: LoadingButtonDefaults::CIRCULAR_COLOR,
            horizontal_color: LoadingButtonDefaults::HORIZONTAL_COLOR,
            text_color: LoadingButtonDefaults::TEXT_COLOR,
            circular_diameter: LoadingButtonDefaults::CIRCULAR_DIAMETER,
        }
    }
}

impl TryFrom<LoadingButtonArgsBuilder> for LoadingButtonArgs {
    type Error = LoadingButtonError;

    fn try_from(builder: LoadingButtonArgsBuilder) -> Result<Self, Self::Error> {
        Ok(builder.build()?)
    }
}

/// Receives the button's lifecycle notifications.
///
/// Every method has an empty default. Callbacks get a [`ButtonHandle`] so they
/// can swap the label while the button is notifying.
pub trait LoadingListener {
    /// A new cycle started.
    fn on_start(&mut self, button: &mut ButtonHandle<'_>) {
        let _ = button;
    }

    /// A frame of the active run was applied.
    fn on_progress(&mut self, button: &mut ButtonHandle<'_>, progress: f32) {
        let _ = (button, progress);
    }

    /// The cycle reached 100 %.
    fn on_completed(&mut self, button: &mut ButtonHandle<'_>) {
        let _ = button;
    }
}

/// Restricted view of a button handed to listener callbacks.
pub struct ButtonHandle<'a> {
    button: &'a mut LoadingButton,
}

impl ButtonHandle<'_> {
    pub fn set_label(&mut self, text: impl Into<String>) {
        self.button.set_label(text);
    }

    pub fn label(&self) -> &str {
        self.button.label()
    }

    pub fn state(&self) -> ButtonState {
        self.button.state()
    }

    pub fn progress(&self) -> f32 {
        self.button.progress()
    }
}

/// Which run is currently driving the button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunKind {
    /// The 0 → 100 run started by [`LoadingButton::start`].
    Primary,
    /// The short run started by [`LoadingButton::finish`].
    Finishing,
}

#[derive(Debug)]
struct ActiveRun {
    kind: RunKind,
    animator: ValueAnimator,
}

impl ActiveRun {
    fn primary() -> Self {
        Self {
            kind: RunKind::Primary,
            animator: ValueAnimator::new(0.0, 100.0, PRIMARY_RUN_DURATION),
        }
    }

    fn finishing(from: f32) -> Self {
        Self {
            kind: RunKind::Finishing,
            animator: ValueAnimator::new(from, 100.0, FINISHING_RUN_DURATION),
        }
    }
}

/// A button that animates a horizontal fill and a pie-slice indicator from 0 to 100 %.
///
/// The button is single-threaded: every call, including listener callbacks,
/// happens on the caller's thread. Starting while a cycle is running restarts
/// the cycle; hosts that must not restart keep their own busy flag.
pub struct LoadingButton {
    args: LoadingButtonArgs,
    state: ButtonState,
    progress: f32,
    label: String,
    size: PxSize,
    text_bounds: TextBounds,
    layout: ButtonLayout,
    run: Option<ActiveRun>,
    listener: Option<Box<dyn LoadingListener>>,
    measure: Box<dyn TextMeasure>,
    redraw_requested: bool,
}

impl std::fmt::Debug for LoadingButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingButton")
            .field("args", &self.args)
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("label", &self.label)
            .field("size", &self.size)
            .field("layout", &self.layout)
            .field("run", &self.run)
            .field("listener", &self.listener.as_ref().map(|_| "<listener>"))
            .field("redraw_requested", &self.redraw_requested)
            .finish()
    }
}

impl LoadingButton {
    /// Creates an idle button measuring its label with [`EstimatedTextMeasure`].
    pub fn new(args: impl Into<LoadingButtonArgs>) -> Self {
        Self::with_text_measure(args, EstimatedTextMeasure::default())
    }

    /// Creates an idle button with a custom text measurer.
    pub fn with_text_measure(
        args: impl Into<LoadingButtonArgs>,
        measure: impl TextMeasure + 'static,
    ) -> Self {
        let args: LoadingButtonArgs = args.into();
        let label = args.label.clone();
        let mut button = Self {
            args,
            state: ButtonState::Idle,
            progress: 0.0,
            label,
            size: PxSize::ZERO,
            text_bounds: TextBounds::default(),
            layout: ButtonLayout::default(),
            run: None,
            listener: None,
            measure: Box::new(measure),
            redraw_requested: false,
        };
        button.remeasure_label();
        button.relayout();
        button.invalidate();
        button
    }

    pub fn args(&self) -> &LoadingButtonArgs {
        &self.args
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Current progress in `[0, 100]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn size(&self) -> PxSize {
        self.size
    }

    pub fn layout(&self) -> &ButtonLayout {
        &self.layout
    }

    /// Whether [`LoadingButton::start`] would begin a fresh cycle.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// The run currently delivering frames.
    pub fn active_run(&self) -> Option<RunKind> {
        self.run.as_ref().map(|run| run.kind)
    }

    /// Installs the listener, dropping any previous one.
    pub fn subscribe(&mut self, listener: impl LoadingListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Removes the listener.
    pub fn unsubscribe(&mut self) {
        self.listener = None;
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.label {
            return;
        }
        self.label = text;
        self.remeasure_label();
        self.relayout();
        self.invalidate();
    }

    /// Sets progress directly.
    ///
    /// Values outside `0..=100` and NaN are rejected and leave the button untouched.
    pub fn set_progress(&mut self, value: f32) -> Result<(), LoadingButtonError> {
        if !(0.0..=100.0).contains(&value) {
            warn!(value, "rejecting out-of-range progress");
            return Err(LoadingButtonError::ProgressOutOfRange(value));
        }
        self.apply_progress(value);
        Ok(())
    }

    /// Updates the size the button is laid out in.
    pub fn on_resize(&mut self, size: PxSize) {
        if size.is_degenerate() {
            debug!(?size, "loading button resized to a degenerate size");
        }
        self.size = size;
        self.relayout();
        self.invalidate();
    }

    /// Starts a cycle: notifies `on_start`, resets progress and begins the primary run.
    pub fn start(&mut self) {
        if self.state.is_busy() {
            warn!(state = ?self.state, "loading button restarted while busy");
        }
        self.dispatch(ButtonEvent::Start);
    }

    /// Asks the running cycle to complete.
    ///
    /// While loading, the primary run is cancelled and a short run closes the
    /// gap to 100 %. In every other state, or when a finishing run is already
    /// active, this does nothing.
    pub fn finish(&mut self) {
        if self.active_run() == Some(RunKind::Finishing) {
            debug!("finish ignored, finishing run already active");
            return;
        }
        self.dispatch(ButtonEvent::Finish);
    }

    /// Advances the active run by `delta` and applies the resulting frame.
    pub fn tick(&mut self, delta: Duration) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let Some(frame) = run.animator.advance(delta) else {
            self.run = None;
            return;
        };
        // Finishing frames must strictly increase; stalled ones are dropped.
        if run.kind == RunKind::Finishing && !frame.is_last && frame.value <= self.progress {
            trace!(value = frame.value, "stalled finishing frame dropped");
            return;
        }
        trace!(value = frame.value, kind = ?run.kind, "loading button frame");
        self.apply_progress(frame.value);
        self.dispatch(ButtonEvent::Tick);
        if frame.is_last {
            self.run = None;
            self.dispatch(ButtonEvent::RunEnded);
        }
    }

    /// Returns whether a redraw was requested since the last call, and clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Paints the current frame onto `canvas`.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        render::paint(&self.layout, &self.label, &self.paint_style(), canvas);
    }

    /// Records the current frame.
    pub fn display_list(&self) -> DisplayList {
        let mut list = DisplayList::new();
        self.draw(&mut list);
        list
    }

    fn paint_style(&self) -> PaintStyle {
        PaintStyle {
            horizontal_color: self.args.horizontal_color,
            circular_color: self.args.circular_color,
            text_color: self.args.text_color,
            text_size_px: self.args.text_size.to_pixels_f32(),
        }
    }

    fn dispatch(&mut self, event: ButtonEvent) {
        let transition = state::transition(self.state, event);
        if transition.is_ignored() {
            trace!(?event, state = ?self.state, "loading button event ignored");
            return;
        }
        if transition.from != transition.to {
            debug!(from = ?transition.from, to = ?transition.to, ?event, "loading button transition");
        }
        self.state = transition.to;
        for effect in transition.effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::CancelRun => {
                if let Some(mut run) = self.run.take() {
                    run.animator.cancel();
                    debug!(
                        kind = ?run.kind,
                        elapsed = ?run.animator.elapsed(),
                        "loading button run cancelled"
                    );
                }
            }
            Effect::NotifyStart => self.notify(|listener, handle| listener.on_start(handle)),
            Effect::ResetProgress => self.apply_progress(0.0),
            Effect::StartPrimaryRun => {
                debug!("loading button primary run started");
                self.run = Some(ActiveRun::primary());
            }
            Effect::StartFinishingRun => {
                debug!(from = self.progress, "loading button finishing run started");
                self.run = Some(ActiveRun::finishing(self.progress));
            }
            Effect::NotifyProgress => {
                let progress = self.progress;
                self.notify(|listener, handle| listener.on_progress(handle, progress));
            }
            Effect::NotifyCompleted => {
                self.notify(|listener, handle| listener.on_completed(handle))
            }
        }
    }

    fn notify(&mut self, call: impl FnOnce(&mut dyn LoadingListener, &mut ButtonHandle<'_>)) {
        let Some(mut listener) = self.listener.take() else {
            return;
        };
        call(listener.as_mut(), &mut ButtonHandle { button: self });
        self.listener = Some(listener);
    }

    fn apply_progress(&mut self, value: f32) {
        self.progress = value.clamp(0.0, 100.0);
        self.relayout();
        self.invalidate();
    }

    fn remeasure_label(&mut self) {
        self.text_bounds = self
            .measure
            .measure(&self.label, self.args.text_size.to_pixels_f32());
    }

    fn relayout(&mut self) {
        self.layout = layout::compute_layout(
            self.size,
            self.text_bounds,
            self.args.circular_diameter.to_pixels_f32(),
            self.progress,
        );
    }

    fn invalidate(&mut self) {
        self.redraw_requested = true;
    }
}

impl From<LoadingButtonArgs> for LoadingButton {
    fn from(args: LoadingButtonArgs) -> Self {
        LoadingButton::new(args)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::render::DrawCommand;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Start,
        Progress(f32),
        Completed,
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Call>>>);

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.0.lock().clone()
        }
    }

    impl LoadingListener for Recorder {
        fn on_start(&mut self, _button: &mut ButtonHandle<'_>) {
            self.0.lock().push(Call::Start);
        }

        fn on_progress(&mut self, _button: &mut ButtonHandle<'_>, progress: f32) {
            self.0.lock().push(Call::Progress(progress));
        }

        fn on_completed(&mut self, _button: &mut ButtonHandle<'_>) {
            self.0.lock().push(Call::Completed);
        }
    }

    fn button() -> (LoadingButton, Recorder) {
        let recorder = Recorder::default();
        let mut button = LoadingButton::new(LoadingButtonArgs::default());
        button.on_resize(PxSize::from([200, 80]));
        button.subscribe(recorder.clone());
        (button, recorder)
    }

    #[test]
    fn builder_defaults_match_default_args() {
        let built = LoadingButtonArgsBuilder::default().build().unwrap();
        assert_eq!(built, LoadingButtonArgs::default());
        assert_eq!(built.label, "Download");
        assert_eq!(built.circular_color, Color::YELLOW);
    }

    #[test]
    fn builder_rejects_bad_sizes() {
        let err = LoadingButtonArgsBuilder::default()
            .text_size(Dp(0.0))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("text size"));

        let err: LoadingButtonError = LoadingButtonArgs::try_from(
            LoadingButtonArgsBuilder::default().circular_diameter(Dp(-1.0)),
        )
        .unwrap_err();
        assert!(matches!(err, LoadingButtonError::Config(_)));
    }

    #[test]
    fn start_notifies_and_resets() {
        let (mut button, recorder) = button();
        button.set_progress(30.0).unwrap();
        button.start();

        assert_eq!(button.state(), ButtonState::Clicked);
        assert_eq!(button.progress(), 0.0);
        assert_eq!(button.active_run(), Some(RunKind::Primary));
        assert_eq!(recorder.calls(), vec![Call::Start]);
    }

    #[test]
    fn first_tick_enters_loading_and_reports_progress() {
        let (mut button, recorder) = button();
        button.start();
        button.tick(Duration::from_millis(1000));

        assert_eq!(button.state(), ButtonState::Loading);
        let expected = ValueAnimator::new(0.0, 100.0, PRIMARY_RUN_DURATION)
            .value_at(Duration::from_millis(1000));
        assert_eq!(button.progress(), expected);
        assert_eq!(recorder.calls(), vec![Call::Start, Call::Progress(expected)]);
    }

    #[test]
    fn tick_without_run_is_a_no_op() {
        let (mut button, recorder) = button();
        button.take_redraw_request();
        button.tick(Duration::from_millis(16));
        assert_eq!(button.state(), ButtonState::Idle);
        assert!(!button.take_redraw_request());
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn finish_outside_loading_is_ignored() {
        let (mut button, recorder) = button();
        button.finish();
        assert_eq!(button.state(), ButtonState::Idle);

        button.start();
        button.finish();
        assert_eq!(button.state(), ButtonState::Clicked);
        assert_eq!(button.active_run(), Some(RunKind::Primary));
        assert_eq!(recorder.calls(), vec![Call::Start]);
    }

    #[test]
    fn second_finish_keeps_first_finishing_run() {
        let (mut button, _recorder) = button();
        button.start();
        button.tick(Duration::from_secs(4));
        button.finish();
        button.tick(Duration::from_millis(300));
        let progress = button.progress();

        button.finish();
        assert_eq!(button.active_run(), Some(RunKind::Finishing));
        button.tick(Duration::from_millis(400));
        assert_eq!(button.state(), ButtonState::Completed);
        assert!(progress < 100.0);
    }

    #[test]
    fn completion_resets_progress_after_notifying() {
        #[derive(Clone, Default)]
        struct SeenAtCompletion(Arc<Mutex<Option<f32>>>);

        impl LoadingListener for SeenAtCompletion {
            fn on_completed(&mut self, button: &mut ButtonHandle<'_>) {
                *self.0.lock() = Some(button.progress());
            }
        }

        let seen = SeenAtCompletion::default();
        let mut button = LoadingButton::new(LoadingButtonArgs::default());
        button.subscribe(seen.clone());
        button.start();
        button.tick(PRIMARY_RUN_DURATION);

        assert_eq!(*seen.0.lock(), Some(100.0));
        assert_eq!(button.state(), ButtonState::Completed);
        assert_eq!(button.progress(), 0.0);
        assert_eq!(button.active_run(), None);
    }

    #[test]
    fn listener_can_swap_label_from_callbacks() {
        struct Labels;

        impl LoadingListener for Labels {
            fn on_start(&mut self, button: &mut ButtonHandle<'_>) {
                button.set_label("We are loading");
            }

            fn on_completed(&mut self, button: &mut ButtonHandle<'_>) {
                button.set_label("Download");
            }
        }

        let mut button = LoadingButton::new(LoadingButtonArgs::default());
        button.on_resize(PxSize::from([300, 80]));
        button.subscribe(Labels);
        let idle_arc = button.layout().arc_bounds;

        button.start();
        assert_eq!(button.label(), "We are loading");
        assert!(button.layout().arc_bounds.x > idle_arc.x);

        button.tick(PRIMARY_RUN_DURATION);
        assert_eq!(button.label(), "Download");
        assert_eq!(button.layout().arc_bounds, idle_arc);
    }

    #[test]
    fn replacing_listener_drops_previous() {
        let (mut button, first) = button();
        let second = Recorder::default();
        button.subscribe(second.clone());
        button.start();
        assert!(first.calls().is_empty());
        assert_eq!(second.calls(), vec![Call::Start]);

        button.unsubscribe();
        button.tick(Duration::from_millis(16));
        assert_eq!(second.calls(), vec![Call::Start]);
        assert_eq!(button.state(), ButtonState::Loading);
    }

    #[test]
    fn set_progress_rejects_out_of_range() {
        let (mut button, _recorder) = button();
        button.set_progress(50.0).unwrap();
        for bad in [-0.5, 100.5, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                button.set_progress(bad),
                Err(LoadingButtonError::ProgressOutOfRange(_))
            ));
        }
        assert_eq!(button.progress(), 50.0);
        assert_eq!(button.layout().fill_rect.width, 100.0);
    }

    #[test]
    fn restart_while_loading_begins_a_new_cycle() {
        let (mut button, recorder) = button();
        button.start();
        button.tick(Duration::from_secs(3));
        button.start();

        assert_eq!(button.state(), ButtonState::Clicked);
        assert_eq!(button.progress(), 0.0);
        let starts = recorder
            .calls()
            .into_iter()
            .filter(|call| *call == Call::Start)
            .count();
        assert_eq!(starts, 2);
    }

    #[test]
    fn redraw_requested_on_every_visible_change() {
        let (mut button, _recorder) = button();
        assert!(button.take_redraw_request());
        assert!(!button.take_redraw_request());

        button.set_label("Other");
        assert!(button.take_redraw_request());

        button.set_label("Other");
        assert!(!button.take_redraw_request());

        button.start();
        button.tick(Duration::from_millis(16));
        assert!(button.take_redraw_request());
    }

    #[test]
    fn draw_does_not_mutate() {
        let (mut button, _recorder) = button();
        button.start();
        button.tick(Duration::from_secs(5));
        button.take_redraw_request();

        let first = button.display_list();
        let second = button.display_list();
        assert_eq!(first, second);
        assert!(!button.take_redraw_request());

        match &first.commands()[0] {
            DrawCommand::Rect(rect) => {
                assert_eq!(rect.rect.width, 200.0 * button.progress() / 100.0)
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }
}
