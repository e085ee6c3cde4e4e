use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use example::{
    RunConfig,
    download::{DownloadOutcome, FileDownload},
};
use loading_button::{LoadingButtonArgsBuilder, PxSize, dp::set_scale_factor};

/// Run one download cycle with the loading button in the terminal.
#[derive(Parser, Debug)]
#[command(name = "example", version, about, long_about = None)]
struct Cli {
    /// File to download; without one the screen asks you to pick an option
    #[arg(short, long, value_enum)]
    option: Option<FileDownload>,
    /// How the simulated download ends
    #[arg(long, value_enum, default_value_t = DownloadOutcome::Success)]
    outcome: DownloadOutcome,
    /// Duration of the simulated download in milliseconds
    #[arg(long, default_value_t = 4000)]
    download_ms: u64,
    /// Button width in physical pixels
    #[arg(long, default_value_t = 480)]
    width: i32,
    /// Button height in physical pixels
    #[arg(long, default_value_t = 96)]
    height: i32,
    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Display scale factor used for dp conversions
    #[arg(long, default_value_t = 1.0)]
    scale_factor: f64,
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("warn,example=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("warn"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    set_scale_factor(cli.scale_factor);

    let button = LoadingButtonArgsBuilder::default()
        .text_size(loading_button::Dp(16.0))
        .circular_diameter(loading_button::Dp(48.0))
        .build()
        .context("invalid button style")?;

    let config = RunConfig {
        option: cli.option,
        outcome: cli.outcome,
        download_time: Duration::from_millis(cli.download_ms),
        size: PxSize::from([cli.width, cli.height]),
        frame_time: Duration::from_millis(cli.frame_ms),
        button,
    };
    example::run(config).await?;
    Ok(())
}
