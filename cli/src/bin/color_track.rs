use clap::{Parser, Subcommand};
use cli::{color_table, resolve_config, Overrides};
use color_eyre::eyre::{Result, WrapErr};
use color_pipeline::{
    ColorTracker, FrameResult, ImageSequence, PipelineBuilder, SelectionPolicy, TrackerConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
struct TrackingArgs {
    /// Comma-separated target colors, e.g. "green,magenta"
    #[arg(long)]
    colors: Option<String>,
    /// TOML or JSON tracker configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Contour selection policy (first, largest_area, nearest_to_previous)
    #[arg(long)]
    selection: Option<SelectionPolicy>,
    /// Do not draw bounding boxes
    #[arg(long)]
    no_annotation: bool,
}

impl TrackingArgs {
    fn resolve(&self) -> Result<TrackerConfig> {
        let overrides = Overrides {
            colors: self.colors.clone(),
            selection: self.selection,
            no_annotation: self.no_annotation,
        };
        Ok(resolve_config(self.config.as_deref(), &overrides)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline on a single image and print the frame result
    Detect {
        /// Path to the input image
        #[arg(short, long)]
        input: PathBuf,
        /// Where to save the annotated frame
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        tracking: TrackingArgs,
    },
    /// Replay a directory of frames while a control loop polls the result
    Replay {
        /// Directory of image frames, processed in file-name order
        #[arg(short, long)]
        frames: PathBuf,
        /// Frames per second to feed the pipeline
        #[arg(long, default_value = "30")]
        fps: u32,
        /// Control loop polling interval in milliseconds
        #[arg(long, default_value = "50")]
        poll_ms: u64,
        /// Directory to write annotated frames into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[command(flatten)]
        tracking: TrackingArgs,
    },
    /// List the built-in color ranges
    Colors,
    /// Print the JSON schema of the tracker configuration
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect { input, output, tracking } => {
            detect(&input, output.as_deref(), &tracking.resolve()?)?;
        }
        Commands::Replay { frames, fps, poll_ms, output_dir, tracking } => {
            replay(frames, fps, poll_ms, output_dir, tracking.resolve()?).await?;
        }
        Commands::Colors => {
            print!("{}", color_table());
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&TrackerConfig::schema())?);
        }
    }

    Ok(())
}

fn detect(input: &Path, output: Option<&Path>, config: &TrackerConfig) -> Result<()> {
    let pipeline = PipelineBuilder::from_config(config).build();
    info!("{}", pipeline.info());

    let frame = image::open(input)
        .wrap_err_with(|| format!("failed to open {}", input.display()))?
        .to_rgb8();
    let annotated = pipeline.process_frame(frame);

    if let Some(output) = output {
        annotated.save(output)?;
        info!("Annotated frame saved to {:?}", output);
    }

    let result = pipeline.state().result();
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn replay(
    frames: PathBuf,
    fps: u32,
    poll_ms: u64,
    output_dir: Option<PathBuf>,
    config: TrackerConfig,
) -> Result<()> {
    let pipeline = Arc::new(PipelineBuilder::from_config(&config).build());
    let tracker = ColorTracker::new(&pipeline);
    let mut source = ImageSequence::from_dir(&frames)?;
    info!("{} | {} frames queued", pipeline.info(), source.remaining());

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let frame_period = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    let producer = {
        let pipeline = Arc::clone(&pipeline);
        tokio::task::spawn_blocking(move || {
            let mut index = 0usize;
            pipeline.run(&mut source, |annotated| {
                if let Some(dir) = &output_dir {
                    let path = dir.join(format!("frame_{index:05}.png"));
                    if let Err(err) = annotated.save(&path) {
                        warn!("Could not save {:?}: {}", path, err);
                    }
                }
                index += 1;
                std::thread::sleep(frame_period);
            })
        })
    };
    tokio::pin!(producer);

    let mut ticker = tokio::time::interval(Duration::from_millis(poll_ms.max(1)));
    let mut last_seen = FrameResult::default();
    let processed = loop {
        tokio::select! {
            joined = &mut producer => break joined?,
            _ = ticker.tick() => {
                let result = tracker.get_frame_result();
                if result != last_seen {
                    match result.position {
                        Some(position) => info!(
                            "{} target(s), tracking ({:.1}, {:.1})",
                            result.count, position.x, position.y
                        ),
                        None => info!("{} target(s)", result.count),
                    }
                    last_seen = result;
                }
            }
        }
    };

    info!("✅ Replayed {} frames", processed);
    println!("{}", serde_json::to_string_pretty(&tracker.get_frame_result())?);
    Ok(())
}
