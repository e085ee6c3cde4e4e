//! Simulated file downloads.
//!
//! [`Downloader`] hands out ids and reports each finished download on a
//! channel, the way a system download service broadcasts completions. Nothing
//! touches the network: a download is a timer that resolves to a preset
//! [`DownloadOutcome`].
use std::{fmt, time::Duration};

use clap::ValueEnum;
use tokio::sync::mpsc;
use tracing::debug;

/// Files the screen offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum FileDownload {
    Glide,
    #[value(name = "loadapp")]
    LoadApp,
    Retrofit,
}

impl FileDownload {
    pub const ALL: [FileDownload; 3] = [
        FileDownload::Glide,
        FileDownload::LoadApp,
        FileDownload::Retrofit,
    ];

    /// Short name carried as the download title.
    pub fn name(self) -> &'static str {
        match self {
            FileDownload::Glide => "GLIDE",
            FileDownload::LoadApp => "LOADAPP",
            FileDownload::Retrofit => "RETROFIT",
        }
    }

    /// Text shown next to the option and on the detail view.
    pub fn title(self) -> &'static str {
        match self {
            FileDownload::Glide => "Glide - Image Loading Library by BumpTech",
            FileDownload::LoadApp => "LoadApp - Current repository",
            FileDownload::Retrofit => "Retrofit - Type-safe HTTP client for Android and Java by Square",
        }
    }

    /// Looks an option up by its download title.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.name() == name)
    }
}

impl fmt::Display for FileDownload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// How a simulated download ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DownloadOutcome {
    #[default]
    Success,
    Failure,
}

impl DownloadOutcome {
    pub fn is_success(self) -> bool {
        self == DownloadOutcome::Success
    }
}

/// Id handed out by [`Downloader::enqueue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DownloadId(pub u64);

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Completion report of one download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadCompleted {
    pub id: DownloadId,
    /// Title the download was enqueued with.
    pub title: String,
    pub outcome: DownloadOutcome,
}

/// One queued download.
#[derive(Clone, Debug)]
pub struct SimulatedDownload {
    pub id: DownloadId,
    pub option: FileDownload,
    pub duration: Duration,
    pub outcome: DownloadOutcome,
}

impl SimulatedDownload {
    /// Waits for the download to "transfer" and reports how it ended.
    pub async fn run(self) -> DownloadCompleted {
        tokio::time::sleep(self.duration).await;
        DownloadCompleted {
            id: self.id,
            title: self.option.name().to_owned(),
            outcome: self.outcome,
        }
    }
}

/// Queue of simulated downloads.
#[derive(Debug)]
pub struct Downloader {
    next_id: u64,
    duration: Duration,
    outcome: DownloadOutcome,
    completions: mpsc::UnboundedSender<DownloadCompleted>,
}

impl Downloader {
    /// Creates a downloader whose downloads take `duration` and end with `outcome`.
    ///
    /// Completions arrive on the returned receiver.
    pub fn new(
        duration: Duration,
        outcome: DownloadOutcome,
    ) -> (Self, mpsc::UnboundedReceiver<DownloadCompleted>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        let downloader = Self {
            next_id: 1,
            duration,
            outcome,
            completions,
        };
        (downloader, receiver)
    }

    /// Starts a download on the current tokio runtime.
    pub fn enqueue(&mut self, option: FileDownload) -> DownloadId {
        let id = DownloadId(self.next_id);
        self.next_id += 1;
        let download = SimulatedDownload {
            id,
            option,
            duration: self.duration,
            outcome: self.outcome,
        };
        debug!(%id, title = option.name(), "download enqueued");

        let completions = self.completions.clone();
        tokio::spawn(async move {
            let completed = download.run().await;
            // The receiver is gone once the screen shut down.
            let _ = completions.send(completed);
        });
        id
    }
}
