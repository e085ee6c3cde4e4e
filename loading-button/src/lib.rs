//! An animated progress button.
//!
//! The button shows a label, a horizontal bar filling from the left and a
//! pie-slice indicator sweeping clockwise from 12 o'clock, both tracking a
//! progress value from 0 to 100. A `start` kicks off a ten second run to 100 %;
//! a `finish` while loading replaces it with a short run that closes the gap.
//!
//! The crate has no windowing or GPU dependency. Hosts drive it with:
//!
//! - [`LoadingButton::on_resize`] whenever the button's size changes,
//! - [`LoadingButton::tick`] once per frame with the time since the last frame,
//! - [`LoadingButton::draw`] onto any [`Canvas`] when a redraw is requested.
//!
//! Lifecycle notifications are delivered to a single [`LoadingListener`].

pub mod animation;
mod button;
pub mod color;
pub mod dp;
mod error;
pub mod layout;
pub mod px;
pub mod render;
pub mod state;

pub use crate::{
    animation::{Easing, ValueAnimator},
    button::{
        ButtonHandle, LoadingButton, LoadingButtonArgs, LoadingButtonArgsBuilder,
        LoadingButtonArgsBuilderError, LoadingButtonDefaults, LoadingListener, RunKind,
    },
    color::Color,
    dp::Dp,
    error::LoadingButtonError,
    layout::{ButtonLayout, EstimatedTextMeasure, Point, Rect, TextBounds, TextMeasure},
    px::{Px, PxSize},
    render::{ArcCommand, Canvas, DisplayList, DrawCommand, RectCommand, TextCommand},
    state::ButtonState,
};
