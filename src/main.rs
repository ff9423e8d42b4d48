use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use finger_snake::config::AppConfig;
use finger_snake::input::TerminalKeys;
use finger_snake::modes::PlayMode;
use finger_snake::video::{BlankFrames, FrameDump, ImageSequence};
use finger_snake::vision::scripted::ReplayScript;
use finger_snake::vision::MediaPipeDetector;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "finger_snake")]
#[command(version, about = "Snake steered by your index finger")]
struct Cli {
    /// Where frames come from
    #[arg(long, default_value = "live")]
    mode: Mode,

    /// TOML config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Food image
    #[arg(long)]
    food: Option<PathBuf>,

    /// Frame directory (frames mode) or replay script (replay mode)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for annotated frames in headless modes
    #[arg(long)]
    output: Option<PathBuf>,

    /// Read restart/quit keys from this terminal in headless modes
    #[arg(long)]
    terminal_keys: bool,

    /// Minimum hand detection confidence
    #[arg(long)]
    detection_confidence: Option<f32>,

    /// Maximum number of hands to track
    #[arg(long)]
    max_hands: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Camera capture with a preview window
    Live,
    /// A directory of images, annotated frames written as PNGs
    Frames,
    /// Scripted fingertips and keys on a blank canvas
    Replay,
}

impl Cli {
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load_or_default(self.config.as_deref())?;
        if let Some(food) = &self.food {
            config.food_asset = food.clone();
        }
        if let Some(confidence) = self.detection_confidence {
            config.tracker.detection_confidence = confidence;
        }
        if let Some(max_hands) = self.max_hands {
            config.tracker.max_hands = max_hands;
        }
        Ok(config)
    }

    fn input(&self) -> Result<&PathBuf> {
        self.input
            .as_ref()
            .context("--input is required in this mode")
    }

    fn headless_display(&self) -> Result<FrameDump> {
        let display = FrameDump::new(self.output.as_deref())?;
        if self.terminal_keys {
            Ok(display.with_terminal(TerminalKeys::new()?))
        } else {
            Ok(display)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("finger_snake=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.app_config()?;

    match cli.mode {
        Mode::Live => run_live(config, cli.seed),
        Mode::Frames => {
            let source = ImageSequence::open(cli.input()?, config.capture.mirror)?;
            let detector = MediaPipeDetector::spawn(&config.tracker)?;
            let display = cli.headless_display()?;
            PlayMode::new(config, cli.seed, source, detector, display)?.run()
        }
        Mode::Replay => {
            let script = ReplayScript::load(cli.input()?)?;
            info!(frames = script.len(), "Loaded replay script");
            let source = BlankFrames::new(config.capture.width, config.capture.height, script.len());
            let (hands, keys) = script.split();
            let display = cli.headless_display()?.with_scripted_keys(keys);
            PlayMode::new(config, cli.seed, source, hands, display)?.run()
        }
    }
}

#[cfg(feature = "opencv-backend")]
fn run_live(config: AppConfig, seed: Option<u64>) -> Result<()> {
    use finger_snake::video::{CameraSource, HighGuiWindow, WINDOW_TITLE};

    let source = CameraSource::open(&config.capture)?;
    let detector = MediaPipeDetector::spawn(&config.tracker)?;
    let display = HighGuiWindow::open(WINDOW_TITLE)?;
    PlayMode::new(config, seed, source, detector, display)?.run()
}

#[cfg(not(feature = "opencv-backend"))]
fn run_live(_config: AppConfig, _seed: Option<u64>) -> Result<()> {
    anyhow::bail!("live mode needs the `opencv-backend` feature; use --mode frames or --mode replay")
}
