//! Completion notification and the detail view it opens.
use std::fmt;

use loading_button::Color;
use owo_colors::OwoColorize;
use tracing::error;

use crate::download::FileDownload;

pub const NOTIFICATION_TITLE: &str = "Download finished";
pub const NOTIFICATION_DESCRIPTION: &str = "The selected file is downloaded";
pub const NOTIFICATION_ACTION: &str = "Check the status";

/// Arguments the notification passes to the detail view.
///
/// Both fields are optional the way intent extras are; the detail view
/// refuses to open without them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailArgs {
    pub completed: Option<bool>,
    pub file: Option<String>,
}

/// Posted once a download finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
    pub args: DetailArgs,
}

impl Notification {
    pub fn download_finished(completed: bool, file: impl Into<String>) -> Self {
        Self {
            title: NOTIFICATION_TITLE,
            description: NOTIFICATION_DESCRIPTION,
            action: NOTIFICATION_ACTION,
            args: DetailArgs {
                completed: Some(completed),
                file: Some(file.into()),
            },
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.title.bold(), self.description)?;
        write!(f, "  > {}", self.action.underline())
    }
}

/// Status line of the detail view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailStatus {
    Success,
    Fail,
}

impl DetailStatus {
    pub fn text(self) -> &'static str {
        match self {
            DetailStatus::Success => "Success",
            DetailStatus::Fail => "Fail",
        }
    }

    /// Green for success, red for failure.
    pub fn color(self) -> Color {
        match self {
            DetailStatus::Success => Color::GREEN,
            DetailStatus::Fail => Color::RED,
        }
    }
}

/// Screen showing which file was downloaded and how it went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    /// Known option, or `None` when the title matches none of them.
    pub file: Option<FileDownload>,
    pub status: DetailStatus,
}

impl DetailView {
    /// Opens the view, or logs and returns `None` when an argument is missing.
    pub fn open(args: &DetailArgs) -> Option<Self> {
        let (Some(completed), Some(file)) = (args.completed, args.file.as_deref()) else {
            error!("missing detail argument: download status or download file");
            return None;
        };
        let status = if completed {
            DetailStatus::Success
        } else {
            DetailStatus::Fail
        };
        Some(Self {
            file: FileDownload::from_name(file),
            status,
        })
    }

    pub fn file_title(&self) -> &'static str {
        self.file.map(FileDownload::title).unwrap_or_default()
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File name: {}", self.file_title())?;
        let [r, g, b, _] = self.status.color().to_rgba_u8();
        write!(f, "Status:    {}", self.status.text().truecolor(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_opens_detail_for_its_file() {
        let notification = Notification::download_finished(true, "LOADAPP");
        let view = DetailView::open(&notification.args).unwrap();
        assert_eq!(view.file, Some(FileDownload::LoadApp));
        assert_eq!(view.status, DetailStatus::Success);
        assert!(view.to_string().contains("Success"));
    }

    #[test]
    fn failed_download_shows_fail() {
        let view = DetailView::open(&DetailArgs {
            completed: Some(false),
            file: Some("GLIDE".into()),
        })
        .unwrap();
        assert_eq!(view.status.text(), "Fail");
        assert_eq!(view.status.color(), Color::RED);
        assert_eq!(DetailStatus::Success.color(), Color::GREEN);
        assert!(view.to_string().contains(FileDownload::Glide.title()));
    }

    #[test]
    fn missing_arguments_do_not_open() {
        assert_eq!(DetailView::open(&DetailArgs::default()), None);
        assert_eq!(
            DetailView::open(&DetailArgs {
                completed: Some(true),
                file: None,
            }),
            None
        );
    }

    #[test]
    fn unknown_file_leaves_name_blank() {
        let view = DetailView::open(&DetailArgs {
            completed: Some(true),
            file: Some("OTHER".into()),
        })
        .unwrap();
        assert_eq!(view.file, None);
        assert_eq!(view.file_title(), "");
    }
}
