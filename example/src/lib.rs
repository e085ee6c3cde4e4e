//! Headless download screen built around [`loading_button::LoadingButton`].
//!
//! [`run`] picks an option, clicks the button and then multiplexes a frame
//! timer with download completions on the current task until the button has
//! settled, printing frames to stdout as the button changes.

pub mod detail;
pub mod download;
pub mod screen;
pub mod terminal;

use std::time::Duration;

use anyhow::bail;
use loading_button::{ButtonState, LoadingButtonArgs, PxSize};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::{
    detail::{DetailView, Notification},
    download::{DownloadOutcome, Downloader, FileDownload},
    screen::{ClickOutcome, MainScreen},
    terminal::TerminalCanvas,
};

/// Pixels covered by one terminal cell.
const CELL_SIZE: (f32, f32) = (8.0, 16.0);

/// Parameters of one [`run`].
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub option: Option<FileDownload>,
    pub outcome: DownloadOutcome,
    pub download_time: Duration,
    pub size: PxSize,
    pub frame_time: Duration,
    pub button: LoadingButtonArgs,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            option: None,
            outcome: DownloadOutcome::Success,
            download_time: Duration::from_secs(4),
            size: PxSize::from([480, 96]),
            frame_time: Duration::from_millis(16),
            button: LoadingButtonArgs::default(),
        }
    }
}

/// What a finished [`run`] produced.
#[derive(Debug)]
pub struct RunReport {
    pub notification: Option<Notification>,
    pub detail: Option<DetailView>,
    pub frames_printed: usize,
}

/// Decides which frames are worth printing.
///
/// A frame is printed on every state change and whenever progress crosses
/// into a new tenth.
#[derive(Debug, Default)]
struct FrameThrottle {
    last: Option<(ButtonState, u8)>,
}

impl FrameThrottle {
    fn should_print(&mut self, state: ButtonState, progress: f32) -> bool {
        let key = (state, (progress / 10.0).floor() as u8);
        if self.last == Some(key) {
            return false;
        }
        self.last = Some(key);
        true
    }
}

/// Drives one download cycle on the current runtime.
pub async fn run(config: RunConfig) -> anyhow::Result<RunReport> {
    let (downloader, mut completions) = Downloader::new(config.download_time, config.outcome);
    let mut screen = MainScreen::new(config.button.clone(), downloader);
    screen.resize(config.size);
    if let Some(option) = config.option {
        screen.select(option);
    }

    match screen.click() {
        ClickOutcome::Started(id) => info!(%id, "button clicked"),
        ClickOutcome::Toast(message) => {
            println!("{message}");
            return Ok(RunReport {
                notification: None,
                detail: None,
                frames_printed: 0,
            });
        }
    }

    let (cell_width, cell_height) = CELL_SIZE;
    let mut canvas = TerminalCanvas::new(config.size, cell_width, cell_height);
    let mut throttle = FrameThrottle::default();
    let mut frames_printed = 0;
    let mut notification = None;

    let mut frames = tokio::time::interval(config.frame_time.max(Duration::from_millis(1)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    while !screen.is_settled() {
        tokio::select! {
            now = frames.tick() => {
                screen.tick(now.saturating_duration_since(last_frame));
                last_frame = now;

                let button = screen.button_mut();
                if button.take_redraw_request()
                    && throttle.should_print(button.state(), button.progress())
                {
                    canvas.clear();
                    button.draw(&mut canvas);
                    println!(
                        "{:?} {:>5.1}% {}\n{canvas}",
                        button.state(),
                        button.progress(),
                        button.label()
                    );
                    frames_printed += 1;
                }
            }
            completed = completions.recv() => {
                let Some(completed) = completed else {
                    bail!("download queue closed before the download finished");
                };
                if let Some(posted) = screen.on_download_complete(completed) {
                    println!("{posted}");
                    notification = Some(posted);
                }
            }
        }
    }

    let detail = match &notification {
        Some(posted) => DetailView::open(&posted.args),
        None => {
            warn!("button settled without a notification");
            None
        }
    };
    if let Some(view) = &detail {
        println!("{view}");
    }

    Ok(RunReport {
        notification,
        detail,
        frames_printed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::DetailStatus;

    #[test]
    fn throttle_prints_state_changes_and_new_tenths() {
        let mut throttle = FrameThrottle::default();
        assert!(throttle.should_print(ButtonState::Clicked, 0.0));
        assert!(throttle.should_print(ButtonState::Loading, 0.5));
        assert!(!throttle.should_print(ButtonState::Loading, 9.9));
        assert!(throttle.should_print(ButtonState::Loading, 10.0));
        assert!(throttle.should_print(ButtonState::Completed, 0.0));
    }

    #[tokio::test]
    async fn run_without_option_returns_early() {
        let report = run(RunConfig::default()).await.unwrap();
        assert!(report.notification.is_none());
        assert_eq!(report.frames_printed, 0);
    }

    #[tokio::test]
    async fn fast_download_finishes_the_button() {
        let config = RunConfig {
            option: Some(FileDownload::Glide),
            outcome: DownloadOutcome::Failure,
            download_time: Duration::from_millis(50),
            frame_time: Duration::from_millis(5),
            ..RunConfig::default()
        };
        let report = run(config).await.unwrap();

        let detail = report.detail.unwrap();
        assert_eq!(detail.file, Some(FileDownload::Glide));
        assert_eq!(detail.status, DetailStatus::Fail);
        assert!(report.frames_printed >= 2);
    }
}
