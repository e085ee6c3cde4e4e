//! The download screen: option picker, loading button and completion handling.
use std::time::Duration;

use loading_button::{
    ButtonHandle, LoadingButton, LoadingButtonArgs, LoadingListener, PxSize,
};
use tracing::{debug, info};

use crate::{
    detail::Notification,
    download::{DownloadCompleted, DownloadId, Downloader, FileDownload},
};

pub const BUTTON_NAME: &str = "Download";
pub const BUTTON_LOADING: &str = "We are loading";
pub const SELECT_AN_OPTION: &str = "Please select the file to download";
pub const WAIT_TO_FINISH: &str = "Please wait for the download to finish";

/// Swaps the button label between its name and the loading text.
#[derive(Debug, Default)]
pub struct LabelSwapper;

impl LoadingListener for LabelSwapper {
    fn on_start(&mut self, button: &mut ButtonHandle<'_>) {
        button.set_label(BUTTON_LOADING);
    }

    fn on_progress(&mut self, button: &mut ButtonHandle<'_>, _progress: f32) {
        button.set_label(BUTTON_LOADING);
    }

    fn on_completed(&mut self, button: &mut ButtonHandle<'_>) {
        button.set_label(BUTTON_NAME);
    }
}

/// Result of clicking the button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The button started and a download was enqueued.
    Started(DownloadId),
    /// Short message shown instead of starting.
    Toast(&'static str),
}

#[derive(Debug)]
pub struct MainScreen {
    button: LoadingButton,
    downloader: Downloader,
    selected: Option<FileDownload>,
    current: Option<DownloadId>,
}

impl MainScreen {
    pub fn new(args: LoadingButtonArgs, downloader: Downloader) -> Self {
        let mut button = LoadingButton::new(args);
        button.subscribe(LabelSwapper);
        Self {
            button,
            downloader,
            selected: None,
            current: None,
        }
    }

    pub fn button(&self) -> &LoadingButton {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut LoadingButton {
        &mut self.button
    }

    pub fn selected(&self) -> Option<FileDownload> {
        self.selected
    }

    /// Whether a download is running.
    pub fn is_downloading(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the screen has nothing left to animate or wait for.
    pub fn is_settled(&self) -> bool {
        !self.is_downloading() && self.button.is_ready()
    }

    pub fn select(&mut self, option: FileDownload) {
        self.selected = Some(option);
    }

    pub fn resize(&mut self, size: PxSize) {
        self.button.on_resize(size);
    }

    pub fn click(&mut self) -> ClickOutcome {
        if self.is_downloading() {
            return ClickOutcome::Toast(WAIT_TO_FINISH);
        }
        let Some(option) = self.selected else {
            return ClickOutcome::Toast(SELECT_AN_OPTION);
        };
        self.button.start();
        let id = self.downloader.enqueue(option);
        self.current = Some(id);
        info!(%id, file = option.name(), "download started");
        ClickOutcome::Started(id)
    }

    pub fn tick(&mut self, delta: Duration) {
        self.button.tick(delta);
    }

    /// Handles a completion report, returning the notification to post.
    ///
    /// Reports for downloads this screen did not start are ignored.
    pub fn on_download_complete(&mut self, completed: DownloadCompleted) -> Option<Notification> {
        if self.current != Some(completed.id) {
            debug!(id = %completed.id, "ignoring completion of an unknown download");
            return None;
        }
        self.button.finish();
        self.current = None;
        info!(
            id = %completed.id,
            outcome = ?completed.outcome,
            "download finished"
        );
        Some(Notification::download_finished(
            completed.outcome.is_success(),
            completed.title,
        ))
    }
}
