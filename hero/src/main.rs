//! Hero CLI - inspect and simulate the landing-page hero animation
mod fmt;

use clap::{Parser, Subcommand};
use hero_core::headless::SceneSnapshot;
use hero_core::{HeadlessScene, HeroConfig, HeroSection, HeroStatus, ViewportMetrics};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use owo_colors::OwoColorize as _;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::fmt::HeroFormatter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_env_filter(EnvFilter::builder().parse("warn,hero=info")?)
            .compact()
            .without_time()
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(false)
            .event_format(HeroFormatter)
            .with_writer(std::io::stderr)
            .init();
    }
    debug!("Command line arguments: {:?}", cli);

    let config = HeroConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Layout { width, height } => {
            print_layout(&config, ViewportMetrics::new(width, height), &cli.output)
        }
        Commands::Rows { width, height } => {
            print_rows(&config, ViewportMetrics::new(width, height), &cli.output)
        }
        Commands::Plan => print_plan(config, &cli.output),
        Commands::Simulate {
            width,
            height,
            duration,
            fps,
            resize,
            realtime,
        } => {
            anyhow::ensure!(
                duration.is_finite() && duration >= 0.0,
                "duration must be a non-negative number of seconds, got {duration}"
            );
            let run = SimulationRun {
                viewport: ViewportMetrics::new(width, height),
                resizes: resize
                    .into_iter()
                    .map(|step| (step.at, step.viewport))
                    .collect(),
                duration: Duration::from_secs_f32(duration),
                frame_interval: Duration::from_secs_f32(1.0 / fps.max(1) as f32),
            };
            let (status, scene) = if realtime {
                run.realtime(config).await?
            } else {
                hero_core::simulate(
                    config,
                    run.viewport,
                    &run.resizes,
                    run.duration,
                    run.frame_interval,
                )
            };
            print_simulation(&status, &scene.snapshot(), &cli.output)
        }
    }
}

const ABOUT: &str = "Inspect the hero layout, marquee rows and entrance timeline";
#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = ABOUT)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, default_value = "text", global = true)]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the font size and row count derived from a viewport
    Layout {
        /// Viewport width in pixels
        #[arg(long, default_value_t = 1440)]
        width: u32,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 900)]
        height: u32,
    },
    /// Show the text and direction of every marquee row
    Rows {
        /// Viewport width in pixels
        #[arg(long, default_value_t = 1440)]
        width: u32,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 900)]
        height: u32,
    },
    /// Show the start and end of every entrance segment
    Plan,
    /// Run the hero headlessly and report its final state
    #[clap(alias = "sim")]
    Simulate {
        /// Viewport width in pixels
        #[arg(long, default_value_t = 1440)]
        width: u32,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 900)]
        height: u32,
        /// Simulated time in seconds
        #[arg(short, long, default_value_t = 4.0)]
        duration: f32,
        /// Frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Resize at a point in time, e.g. `1.5:800x600` (repeatable)
        #[arg(long, value_parser = parse_resize)]
        resize: Vec<ResizeStep>,
        /// Pace frames with the wall clock instead of running as fast as possible
        #[arg(long)]
        realtime: bool,
    },
}

/// Output format options
#[derive(Clone, Debug, clap::ValueEnum)]
enum OutputFormat {
    /// Human readable output
    Text,
    /// JSON output
    Json,
}

#[derive(Clone, Debug)]
struct ResizeStep {
    at: Duration,
    viewport: ViewportMetrics,
}

/// Parse `SECONDS:WIDTHxHEIGHT`.
fn parse_resize(raw: &str) -> Result<ResizeStep, String> {
    let (at, size) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected SECONDS:WIDTHxHEIGHT, got `{raw}`"))?;
    let at: f32 = at
        .trim()
        .parse()
        .map_err(|e| format!("invalid time `{at}`: {e}"))?;
    if !at.is_finite() || at < 0.0 {
        return Err(format!("resize time must be a non-negative number, got {at}"));
    }
    let viewport = parse_size(size)?;
    Ok(ResizeStep {
        at: Duration::from_secs_f32(at),
        viewport,
    })
}

fn parse_size(raw: &str) -> Result<ViewportMetrics, String> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{raw}`"))?;
    let width = width
        .trim()
        .parse()
        .map_err(|e| format!("invalid width `{width}`: {e}"))?;
    let height = height
        .trim()
        .parse()
        .map_err(|e| format!("invalid height `{height}`: {e}"))?;
    Ok(ViewportMetrics::new(width, height))
}

struct SimulationRun {
    viewport: ViewportMetrics,
    resizes: Vec<(Duration, ViewportMetrics)>,
    duration: Duration,
    frame_interval: Duration,
}

impl SimulationRun {
    /// Drive frames from a tokio interval, with a progress bar on stderr.
    async fn realtime(&self, config: HeroConfig) -> anyhow::Result<(HeroStatus, HeadlessScene)> {
        let mut scene = HeadlessScene::new();
        let targets = scene.mount_content(&config.content);
        let mut hero = HeroSection::new(config);

        let progress_bar = ProgressBar::new(self.duration.as_millis() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}ms {msg}")?
                .progress_chars("#>-"),
        );

        let mut interval = tokio::time::interval(self.frame_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let started = tokio::time::Instant::now();
        hero.mount(self.viewport, targets, Duration::ZERO, &mut scene);

        let mut pending = self.resizes.iter().peekable();
        loop {
            interval.tick().await;
            let now = started.elapsed().min(self.duration);
            while let Some((_, size)) = pending.next_if(|(at, _)| *at <= now) {
                hero.resize(*size, now, &mut scene);
            }
            hero.frame(now, &mut scene);
            progress_bar.set_position(now.as_millis() as u64);
            progress_bar.set_message(format!("{:?}", hero.status().entrance));
            if now >= self.duration {
                break;
            }
        }

        let elapsed = progress_bar.elapsed();
        progress_bar.finish_and_clear();
        info!("Simulation finished in {:#}", HumanDuration(elapsed));
        Ok((hero.status(), scene))
    }
}

fn print_layout(
    config: &HeroConfig,
    viewport: ViewportMetrics,
    output: &OutputFormat,
) -> anyhow::Result<()> {
    let layout = config.layout.compute(viewport);
    let style = layout.row_style();
    match output {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "viewport": viewport,
                "layout": layout,
                "row_style": style,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!(
                "{} {}x{}",
                "Viewport:".blue().bold(),
                viewport.width,
                viewport.height
            );
            println!("  Font size:  {}", format!("{:.1}px", layout.font_size_px).cyan());
            println!("  Rows:       {}", layout.row_count.to_string().cyan());
            println!(
                "  Row style:  {:.1}px font, {:.1}px min height",
                style.font_size_px, style.min_height_px
            );
        }
    }
    Ok(())
}

fn print_rows(
    config: &HeroConfig,
    viewport: ViewportMetrics,
    output: &OutputFormat,
) -> anyhow::Result<()> {
    let (status, _) = hero_core::simulate(
        config.clone(),
        viewport,
        &[],
        Duration::ZERO,
        Duration::from_millis(16),
    );
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status.rows)?),
        OutputFormat::Text => {
            println!(
                "{} {} rows",
                "Marquee:".blue().bold(),
                status.rows.len()
            );
            for row in &status.rows {
                println!(
                    "  {:>2} {:<5} {}",
                    row.index,
                    row.direction.to_string().dimmed(),
                    row.text
                );
            }
        }
    }
    Ok(())
}

fn print_plan(config: HeroConfig, output: &OutputFormat) -> anyhow::Result<()> {
    let start = config.timing.entrance.start_delay();
    let mut scene = HeadlessScene::new();
    let targets = scene.mount_content(&config.content);
    let mut hero = HeroSection::new(config);
    hero.mount(ViewportMetrics::new(1440, 900), targets, Duration::ZERO, &mut scene);
    hero.frame(start, &mut scene);
    let plan = hero.status().entrance_plan;
    hero.unmount(&mut scene);

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => {
            println!(
                "{} starts {}ms after mount",
                "Entrance:".blue().bold(),
                start.as_millis()
            );
            for segment in &plan {
                println!(
                    "  {:<11} {:>5.2}s -> {:>5.2}s  ({} targets)",
                    segment.label.green(),
                    segment.start,
                    segment.end,
                    segment.targets
                );
            }
        }
    }
    Ok(())
}

fn print_simulation(
    status: &HeroStatus,
    snapshot: &SceneSnapshot,
    output: &OutputFormat,
) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "status": status,
                "scene": snapshot,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("{}", "Simulation Summary:".green().bold());
            if let Some(layout) = status.layout {
                println!(
                    "Layout: {} rows at {:.1}px",
                    layout.row_count, layout.font_size_px
                );
            }
            println!("Entrance: {:?}", status.entrance);
            println!("Live loops: {}", status.live_loops);
            println!("Marquee rebuilds: {}", status.marquee_rebuilds);
            println!("Live splits: {}", status.live_splits);
            for row in &snapshot.rows {
                println!(
                    "  {:>2} opacity {:.2} x {:>9.1}  {}",
                    row.index,
                    row.opacity.unwrap_or_default(),
                    row.x.unwrap_or_default(),
                    row.text.dimmed()
                );
            }
        }
    }
    Ok(())
}
